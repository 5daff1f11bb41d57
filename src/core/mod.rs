//! Core abstractions: envelopes, the persistence contract, principals, errors

pub mod envelope;
pub mod error;
pub mod principal;
pub mod store;

pub use envelope::{Envelope, LinkRelation, SELF_REL};
pub use error::RestError;
pub use principal::Principal;
pub use store::{NoopDecorator, ResourceDecorator, ResourceStore};
