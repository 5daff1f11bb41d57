//! Storage backends implementing the ResourceStore contract

#[cfg(feature = "in-memory")]
pub mod in_memory;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryResourceStore;
