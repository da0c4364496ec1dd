use async_graphql_parser::{
    types::{Field, OperationType, Selection, SelectionSet},
    Positioned,
};
use async_graphql_value::Variables;
use catalog_registry::{FieldType, OperationKind, Registry, TypeKind};
use catalog_store::{Product, ProductStore};

use crate::{
    coercion, parse,
    resolver::{self, Resolved},
    response::{GraphqlError, Response, ResponsePath},
    Engine, Request,
};

impl Engine {
    /// Executes one request: parse, then for each requested top-level field
    /// in document order validate, coerce arguments, resolve and project.
    /// A failing field nulls its own slot and records an error; it never
    /// aborts siblings. Only an unparsable document fails the request as a
    /// whole, with no partial result tree.
    pub async fn execute(&self, request: Request) -> Response {
        let operation = match parse::parse_operation(&request) {
            Ok(operation) => operation,
            Err(err) => return Response::from_error(err),
        };

        let kind = match operation.definition.ty {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
            OperationType::Subscription => {
                return Response::from_error(GraphqlError::new("Subscriptions are not supported."))
            }
        };

        tracing::debug!(operation = operation.name.as_deref(), "executing {kind} operation");

        let mut ctx = ExecutionContext {
            registry: self.registry(),
            store: self.store(),
            variables: &request.variables,
            errors: Vec::new(),
        };

        let mut data = serde_json::Map::new();
        for item in &operation.definition.selection_set.node.items {
            match &item.node {
                Selection::Field(field) => {
                    let key = response_key(field).to_string();
                    let value = ctx.execute_field(kind, field);
                    data.insert(key, value);
                }
                Selection::FragmentSpread(_) | Selection::InlineFragment(_) => {
                    ctx.errors.push(
                        GraphqlError::new("Fragments are not supported.").with_location(item.pos),
                    );
                }
            }
        }

        Response {
            data: Some(data),
            errors: ctx.errors,
        }
    }
}

struct ExecutionContext<'a> {
    registry: &'a Registry,
    store: &'a ProductStore,
    variables: &'a Variables,
    errors: Vec<GraphqlError>,
}

impl<'a> ExecutionContext<'a> {
    fn execute_field(&mut self, kind: OperationKind, field: &Positioned<Field>) -> serde_json::Value {
        let registry = self.registry;
        let name = field.node.name.node.as_str();
        let path = ResponsePath::default().child(response_key(field));

        let Some(operation) = registry.operation(kind, name) else {
            self.errors.push(
                GraphqlError::new(format!("{kind} does not have a field named '{name}'."))
                    .with_location(field.pos)
                    .with_path(path),
            );
            return serde_json::Value::Null;
        };

        if matches!(operation.ty.kind, TypeKind::Object(_) | TypeKind::List(_))
            && field.node.selection_set.node.items.is_empty()
        {
            self.errors.push(
                GraphqlError::new(format!(
                    "Field '{name}' of type '{}' must have a selection of subfields.",
                    operation.ty
                ))
                .with_location(field.pos)
                .with_path(path),
            );
            return serde_json::Value::Null;
        }

        let arguments = match coercion::coerce_arguments(
            name,
            field.pos,
            &operation.arguments,
            &field.node.arguments,
            self.variables,
        ) {
            Ok(arguments) => arguments,
            Err(err) => {
                let location = err.location();
                self.errors.push(
                    GraphqlError::new(err.to_string())
                        .with_location(location)
                        .with_path(path),
                );
                return serde_json::Value::Null;
            }
        };

        let resolved = match resolver::resolve(operation.resolver, &arguments, self.store) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.errors.push(
                    GraphqlError::new(err.to_string())
                        .with_location(field.pos)
                        .with_path(path),
                );
                return serde_json::Value::Null;
            }
        };

        self.project(&operation.ty, resolved, field, path)
    }

    /// Projects the resolved value onto the requested selection.
    /// Unrequested record fields never reach the result tree.
    fn project(
        &mut self,
        ty: &FieldType,
        resolved: Resolved,
        field: &Positioned<Field>,
        path: ResponsePath,
    ) -> serde_json::Value {
        match (&ty.kind, resolved) {
            (_, Resolved::Null) => serde_json::Value::Null,
            (TypeKind::Object(name), Resolved::Product(product)) => {
                self.project_record(name, &product, &field.node.selection_set, &path)
            }
            (TypeKind::Object(name), Resolved::Missing) => {
                self.project_record(name, &Product::default(), &field.node.selection_set, &path)
            }
            (TypeKind::List(name), Resolved::List(products)) => serde_json::Value::Array(
                products
                    .into_iter()
                    .enumerate()
                    .map(|(index, product)| {
                        self.project_record(name, &product, &field.node.selection_set, &path.child(index))
                    })
                    .collect(),
            ),
            (_, _) => {
                tracing::warn!(
                    "resolver for '{}' returned a value that does not match its declared type",
                    field.node.name.node
                );
                serde_json::Value::Null
            }
        }
    }

    fn project_record(
        &mut self,
        type_name: &str,
        product: &Product,
        selection_set: &Positioned<SelectionSet>,
        path: &ResponsePath,
    ) -> serde_json::Value {
        let Some(object) = self.registry.object_type(type_name) else {
            return serde_json::Value::Null;
        };

        let record = serde_json::to_value(product).unwrap_or_default();
        let mut output = serde_json::Map::new();
        for item in &selection_set.node.items {
            let Selection::Field(sub_field) = &item.node else {
                self.errors.push(
                    GraphqlError::new("Fragments are not supported.")
                        .with_location(item.pos)
                        .with_path(path.clone()),
                );
                continue;
            };

            let sub_name = sub_field.node.name.node.as_str();
            let key = response_key(sub_field);
            let sub_path = path.child(key);

            let Some(descriptor) = object.field_by_name(sub_name) else {
                self.errors.push(
                    GraphqlError::new(format!(
                        "Type '{}' does not have a field named '{sub_name}'.",
                        object.name
                    ))
                    .with_location(sub_field.pos)
                    .with_path(sub_path),
                );
                output.insert(key.to_string(), serde_json::Value::Null);
                continue;
            };

            if matches!(descriptor.ty.kind, TypeKind::Scalar(_))
                && !sub_field.node.selection_set.node.items.is_empty()
            {
                self.errors.push(
                    GraphqlError::new(format!("Field '{sub_name}' does not have any fields."))
                        .with_location(sub_field.pos)
                        .with_path(sub_path),
                );
                output.insert(key.to_string(), serde_json::Value::Null);
                continue;
            }

            let value = record.get(sub_name).cloned().unwrap_or(serde_json::Value::Null);
            output.insert(key.to_string(), value);
        }

        serde_json::Value::Object(output)
    }
}

fn response_key(field: &Positioned<Field>) -> &str {
    field
        .node
        .alias
        .as_ref()
        .map(|alias| alias.node.as_str())
        .unwrap_or_else(|| field.node.name.node.as_str())
}
