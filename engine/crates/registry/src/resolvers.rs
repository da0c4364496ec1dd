//! Resolver bindings for declared operations.
//!
//! Only the binding lives here. Implement the logic where the engine
//! dispatches on it, next to the store it reads and mutates.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    /// Point lookup of a product by id.
    Product,
    /// Full scan of the catalog in insertion order.
    ProductList,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}
