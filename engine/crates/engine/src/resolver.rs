use catalog_registry::Resolver;
use catalog_store::{Product, ProductDraft, ProductStore, ProductUpdate};

use crate::coercion::{ArgumentSet, ArgumentValue};

/// What a resolver handed back, before projection onto the requested
/// sub-fields.
#[derive(Debug)]
pub(crate) enum Resolved {
    Null,
    Product(Product),
    List(Vec<Product>),
    /// `update` or `delete` named an identifier with no live record. On the
    /// wire this renders as the zero-value product; in here it stays
    /// distinct so core callers can tell the two cases apart.
    Missing,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ResolverError {
    #[error("Product name cannot be empty.")]
    EmptyName,
    #[error("Product {0} cannot be set to null.")]
    NonNullableField(&'static str),
}

/// Runs the resolver an operation is bound to. Resolvers are the only
/// code that touches the store, and each one acquires it for a single
/// store operation at most.
pub(crate) fn resolve(
    resolver: Resolver,
    arguments: &ArgumentSet,
    store: &ProductStore,
) -> Result<Resolved, ResolverError> {
    match resolver {
        Resolver::Product => Ok(match arguments.i64("id").and_then(|id| store.get(id)) {
            Some(product) => Resolved::Product(product),
            // An absent, null or unmatched id resolves to null, not to an
            // error.
            None => Resolved::Null,
        }),

        Resolver::ProductList => Ok(Resolved::List(store.list())),

        Resolver::CreateProduct => {
            let name = arguments.string("name").unwrap_or_default().to_string();
            if name.trim().is_empty() {
                return Err(ResolverError::EmptyName);
            }
            let info = arguments.string("info").unwrap_or_default().to_string();
            let price = arguments.f64("price").unwrap_or_default();
            Ok(Resolved::Product(store.insert(ProductDraft { name, info, price })))
        }

        Resolver::UpdateProduct => {
            let id = arguments.i64("id").unwrap_or_default();
            let mut update = ProductUpdate::default();
            match arguments.get("name") {
                ArgumentValue::String(name) if name.trim().is_empty() => {
                    return Err(ResolverError::EmptyName)
                }
                ArgumentValue::String(name) => update.name = Some(name.clone()),
                ArgumentValue::Null => return Err(ResolverError::NonNullableField("name")),
                _ => {}
            }
            match arguments.get("info") {
                ArgumentValue::String(info) => update.info = Some(info.clone()),
                // An explicit null clears the optional field back to its
                // default.
                ArgumentValue::Null => update.info = Some(String::new()),
                _ => {}
            }
            match arguments.get("price") {
                ArgumentValue::Float(price) => update.price = Some(*price),
                ArgumentValue::Null => return Err(ResolverError::NonNullableField("price")),
                _ => {}
            }
            Ok(match store.update(id, update) {
                Some(product) => Resolved::Product(product),
                None => Resolved::Missing,
            })
        }

        Resolver::DeleteProduct => {
            let id = arguments.i64("id").unwrap_or_default();
            Ok(match store.delete(id) {
                Some(product) => Resolved::Product(product),
                None => Resolved::Missing,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_update_and_delete_signal_missing_not_null() {
        let store = ProductStore::new();
        let arguments = ArgumentSet::default();

        let resolved = resolve(Resolver::UpdateProduct, &arguments, &store).unwrap();
        assert!(matches!(resolved, Resolved::Missing));

        let resolved = resolve(Resolver::DeleteProduct, &arguments, &store).unwrap();
        assert!(matches!(resolved, Resolved::Missing));
    }

    #[test]
    fn product_lookup_without_an_id_resolves_to_null() {
        let store = ProductStore::new();
        store.insert(ProductDraft {
            name: "Pisco".to_string(),
            info: String::new(),
            price: 9.95,
        });

        let resolved = resolve(Resolver::Product, &ArgumentSet::default(), &store).unwrap();
        assert!(matches!(resolved, Resolved::Null));
    }
}
