use catalog_registry::{
    ArgumentDescriptor, FieldType, ObjectType, OperationDescriptor, OperationKind, Registry,
    RegistryError, Resolver, ScalarType,
};

/// Declares the catalog schema: the `Product` type, the Query root
/// (`product`, `list`) and the Mutation root (`create`, `update`,
/// `delete`).
pub(crate) fn build_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();

    registry.declare_type(
        ObjectType::new("Product")
            .field("id", FieldType::scalar(ScalarType::Int))
            .field("name", FieldType::scalar(ScalarType::String))
            .field("info", FieldType::scalar(ScalarType::String))
            .field("price", FieldType::scalar(ScalarType::Float)),
    )?;

    registry.declare_operation(
        OperationKind::Query,
        OperationDescriptor::new("product", FieldType::object("Product"), Resolver::Product)
            .description("Get product by id")
            .argument(ArgumentDescriptor::new("id", ScalarType::Int)),
    )?;
    registry.declare_operation(
        OperationKind::Query,
        OperationDescriptor::new("list", FieldType::list_of("Product"), Resolver::ProductList)
            .description("Get product list"),
    )?;

    registry.declare_operation(
        OperationKind::Mutation,
        OperationDescriptor::new("create", FieldType::object("Product"), Resolver::CreateProduct)
            .description("Create new product")
            .argument(ArgumentDescriptor::new("name", ScalarType::String).non_null().required())
            .argument(ArgumentDescriptor::new("info", ScalarType::String))
            .argument(ArgumentDescriptor::new("price", ScalarType::Float).non_null().required()),
    )?;
    registry.declare_operation(
        OperationKind::Mutation,
        OperationDescriptor::new("update", FieldType::object("Product"), Resolver::UpdateProduct)
            .description("Update product by id")
            .argument(ArgumentDescriptor::new("id", ScalarType::Int).non_null().required())
            .argument(ArgumentDescriptor::new("name", ScalarType::String))
            .argument(ArgumentDescriptor::new("info", ScalarType::String))
            .argument(ArgumentDescriptor::new("price", ScalarType::Float)),
    )?;
    registry.declare_operation(
        OperationKind::Mutation,
        OperationDescriptor::new("delete", FieldType::object("Product"), Resolver::DeleteProduct)
            .description("Delete product by id")
            .argument(ArgumentDescriptor::new("id", ScalarType::Int).non_null().required()),
    )?;

    Ok(registry)
}
