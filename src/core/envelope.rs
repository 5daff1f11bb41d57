//! Response envelope wrapping a payload with hypermedia links

use serde::{Deserialize, Serialize};

/// The canonical relation name for a link pointing back at the resource itself.
pub const SELF_REL: &str = "self";

/// A single hyperlink relation attached to an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRelation {
    /// Relation name (e.g., "self", "next")
    pub rel: String,
    /// Target URI
    pub href: String,
}

/// Response wrapper carrying a payload plus an ordered collection of
/// hyperlink relations.
///
/// The payload is set once at construction and never replaced; links are
/// appended during response preparation and never removed. Envelopes are
/// created per request and discarded after serialization.
///
/// Wire shape:
///
/// ```json
/// {"data": {...}, "links": [{"rel": "self", "href": "/items/42"}]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    data: T,
    links: Vec<LinkRelation>,
}

impl<T> Envelope<T> {
    /// Wrap a payload in a new envelope with no links.
    pub fn new(data: T) -> Self {
        Self {
            data,
            links: Vec::new(),
        }
    }

    /// Borrow the wrapped payload.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consume the envelope and return the payload.
    pub fn into_data(self) -> T {
        self.data
    }

    /// Append a hyperlink relation.
    pub fn add_link(&mut self, rel: impl Into<String>, href: impl Into<String>) {
        self.links.push(LinkRelation {
            rel: rel.into(),
            href: href.into(),
        });
    }

    /// The links attached so far, in insertion order.
    pub fn links(&self) -> &[LinkRelation] {
        &self.links
    }

    /// Find the first link with the given relation name.
    pub fn link(&self, rel: &str) -> Option<&LinkRelation> {
        self.links.iter().find(|link| link.rel == rel)
    }
}
