//! Schema-driven query/mutation execution over the in-memory product
//! catalog.
//!
//! The engine owns the declared schema (a [`catalog_registry::Registry`])
//! and a handle to the shared [`catalog_store::ProductStore`]. Each call to
//! [`Engine::execute`] turns one request into a result tree shaped exactly
//! like the requested selection, plus the ordered list of field-scoped
//! errors met along the way. Grammar concerns are delegated to
//! `async-graphql-parser`; serialization of the result tree is the
//! boundary layer's business.

mod coercion;
mod execute;
mod parse;
mod request;
mod resolver;
mod response;
mod schema;

#[cfg(test)]
use {insta as _, tokio as _};

use std::sync::Arc;

use catalog_registry::{Registry, RegistryError};

pub use async_graphql_value::Variables;
pub use catalog_store::{Product, ProductDraft, ProductStore};
pub use request::Request;
pub use response::{GraphqlError, Location, Response, ResponsePath, ResponsePathSegment};

/// The execution engine: the declared schema plus the store handle, shared
/// read-only by every concurrent execution.
pub struct Engine {
    registry: Registry,
    store: Arc<ProductStore>,
}

impl Engine {
    /// Builds the engine over the given store. Fails only on a schema
    /// declaration conflict, which is a startup configuration error.
    pub fn new(store: Arc<ProductStore>) -> Result<Self, RegistryError> {
        Ok(Self {
            registry: schema::build_registry()?,
            store,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }
}
