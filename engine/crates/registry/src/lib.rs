//! Static declaration of the schema the engine executes against: object
//! types, the fields they expose, the operations declared under the Query
//! and Mutation roots, and the resolver each operation is bound to.
//!
//! A [`Registry`] is built once at startup and read-only afterwards; it is
//! shared by every concurrent execution without locking.

mod export_sdl;
mod resolvers;
mod types;

use indexmap::IndexMap;

pub use resolvers::Resolver;
pub use types::{
    ArgumentDescriptor, FieldDescriptor, FieldType, ObjectType, OperationKind, ScalarType, TypeKind,
};

/// A declaration conflict, reported at startup rather than at request time.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("an object type named '{0}' is already declared")]
    DuplicateType(String),
    #[error("{kind} already declares a field named '{name}'")]
    DuplicateOperation { kind: OperationKind, name: String },
    #[error("{kind} field '{field}' references an undeclared type '{ty}'")]
    UnknownType {
        kind: OperationKind,
        field: String,
        ty: String,
    },
}

/// A field declared under one of the root operation types.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<ArgumentDescriptor>,
    pub ty: FieldType,
    pub resolver: Resolver,
}

impl OperationDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldType, resolver: Resolver) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            ty,
            resolver,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn argument(mut self, argument: ArgumentDescriptor) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn argument_by_name(&self, name: &str) -> Option<&ArgumentDescriptor> {
        self.arguments.iter().find(|argument| argument.name == name)
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    types: IndexMap<String, ObjectType>,
    query_fields: IndexMap<String, OperationDescriptor>,
    mutation_fields: IndexMap<String, OperationDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_type(&mut self, ty: ObjectType) -> Result<(), RegistryError> {
        if self.types.contains_key(&ty.name) {
            return Err(RegistryError::DuplicateType(ty.name));
        }
        self.types.insert(ty.name.clone(), ty);
        Ok(())
    }

    /// Declares an operation under the given root. The referenced value type
    /// must already be declared.
    pub fn declare_operation(
        &mut self,
        kind: OperationKind,
        operation: OperationDescriptor,
    ) -> Result<(), RegistryError> {
        if let TypeKind::Object(name) | TypeKind::List(name) = &operation.ty.kind {
            if !self.types.contains_key(name) {
                return Err(RegistryError::UnknownType {
                    kind,
                    field: operation.name,
                    ty: name.clone(),
                });
            }
        }
        let fields = self.fields_mut(kind);
        if fields.contains_key(&operation.name) {
            return Err(RegistryError::DuplicateOperation {
                kind,
                name: operation.name,
            });
        }
        fields.insert(operation.name.clone(), operation);
        Ok(())
    }

    pub fn operation(&self, kind: OperationKind, name: &str) -> Option<&OperationDescriptor> {
        self.fields(kind).get(name)
    }

    pub fn operations(&self, kind: OperationKind) -> impl Iterator<Item = &OperationDescriptor> {
        self.fields(kind).values()
    }

    pub fn object_type(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name)
    }

    pub fn object_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.types.values()
    }

    fn fields(&self, kind: OperationKind) -> &IndexMap<String, OperationDescriptor> {
        match kind {
            OperationKind::Query => &self.query_fields,
            OperationKind::Mutation => &self.mutation_fields,
        }
    }

    fn fields_mut(&mut self, kind: OperationKind) -> &mut IndexMap<String, OperationDescriptor> {
        match kind {
            OperationKind::Query => &mut self.query_fields,
            OperationKind::Mutation => &mut self.mutation_fields,
        }
    }
}
