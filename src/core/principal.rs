//! Authenticated-caller identity passed through to persistence backends
//!
//! The framework never makes authorization decisions itself. The principal is
//! extracted from request headers and handed to the [`ResourceStore`]
//! unchanged, so backends can apply whatever access policy they implement.
//!
//! [`ResourceStore`]: crate::core::store::ResourceStore

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use std::convert::Infallible;

/// Header carrying an explicit principal subject, for deployments where an
/// upstream gateway has already authenticated the caller.
pub const PRINCIPAL_HEADER: &str = "x-principal";

/// The authenticated caller of a request.
///
/// Opaque to the framework: the subject is whatever the transport supplied,
/// either a bearer token or the [`PRINCIPAL_HEADER`] value. Extraction never
/// rejects a request; absent credentials yield [`Principal::Anonymous`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// No credentials were presented.
    Anonymous,

    /// A caller identified by an opaque subject string.
    Known { subject: String },
}

impl Principal {
    /// Get the subject if the caller is identified.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Principal::Anonymous => None,
            Principal::Known { subject } => Some(subject),
        }
    }

    /// Check whether no credentials were presented.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Principal::Anonymous)
    }

    /// Derive the principal from request headers.
    ///
    /// Precedence: `Authorization: Bearer <subject>`, then the
    /// [`PRINCIPAL_HEADER`], then anonymous.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if let Some(value) = headers.get(axum::http::header::AUTHORIZATION)
            && let Ok(raw) = value.to_str()
            && let Some(subject) = raw.strip_prefix("Bearer ")
            && !subject.is_empty()
        {
            return Principal::Known {
                subject: subject.to_string(),
            };
        }

        if let Some(value) = headers.get(PRINCIPAL_HEADER)
            && let Ok(subject) = value.to_str()
            && !subject.is_empty()
        {
            return Principal::Known {
                subject: subject.to_string(),
            };
        }

        Principal::Anonymous
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Principal::from_headers(&parts.headers))
    }
}
