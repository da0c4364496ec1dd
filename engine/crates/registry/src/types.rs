use std::fmt;

use async_graphql_value::ConstValue;

/// The two root operation kinds the registry declares fields under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Query => f.write_str("Query"),
            OperationKind::Mutation => f.write_str("Mutation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Boolean,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Int => f.write_str("Int"),
            ScalarType::Float => f.write_str("Float"),
            ScalarType::String => f.write_str("String"),
            ScalarType::Boolean => f.write_str("Boolean"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Scalar(ScalarType),
    /// Reference to a declared object type, by name.
    Object(String),
    /// A list of the named object type.
    List(String),
}

/// The declared value type of a field: what it is, and whether null is a
/// legal value for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub kind: TypeKind,
    pub nullable: bool,
}

impl FieldType {
    pub fn scalar(scalar: ScalarType) -> Self {
        Self {
            kind: TypeKind::Scalar(scalar),
            nullable: true,
        }
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Object(name.into()),
            nullable: true,
        }
    }

    pub fn list_of(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::List(name.into()),
            nullable: true,
        }
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Scalar(scalar) => write!(f, "{scalar}")?,
            TypeKind::Object(name) => f.write_str(name)?,
            TypeKind::List(name) => write!(f, "[{name}]")?,
        }
        if !self.nullable {
            f.write_str("!")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: FieldType,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// An output object type and the fields that may be selected on it.
#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldDescriptor::new(name, ty));
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// An argument accepted by a declared operation.
///
/// `required` is distinct from nullability: an argument may have to be
/// present in the document even though `null` is a legal value for it.
#[derive(Debug, Clone)]
pub struct ArgumentDescriptor {
    pub name: String,
    pub ty: ScalarType,
    pub nullable: bool,
    pub required: bool,
    pub default_value: Option<ConstValue>,
}

impl ArgumentDescriptor {
    pub fn new(name: impl Into<String>, ty: ScalarType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: true,
            required: false,
            default_value: None,
        }
    }

    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<ConstValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// The argument type as it reads in the schema, e.g. `Int!`.
    pub fn type_display(&self) -> String {
        let mut s = self.ty.to_string();
        if !self.nullable {
            s.push('!');
        }
        s
    }
}

impl fmt::Display for ArgumentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_display())?;
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}
