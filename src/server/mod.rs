//! Server module: the generic CRUD controller, route composition, and the
//! process-wide response middleware

pub mod builder;
pub mod handlers;
pub mod not_found;
pub mod registry;
pub mod routes;

pub use builder::{ServerBuilder, init_tracing};
pub use handlers::{ResourceState, RestResource};
pub use not_found::not_found_on_empty;
pub use registry::{ResourceDescriptor, ResourceRegistry};
pub use routes::RouteRegistry;
