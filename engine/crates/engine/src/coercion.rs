use std::fmt;

use async_graphql_parser::{Pos, Positioned};
use async_graphql_value::{ConstValue, Name, Value, Variables};
use catalog_registry::{ArgumentDescriptor, ScalarType};
use indexmap::IndexMap;

use crate::response::Location;

/// A coerced argument as handed to a resolver. `Absent` (omitted, no
/// default) is distinct from an explicit `Null`, so partial-update
/// semantics stay unambiguous.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArgumentValue {
    Absent,
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl ArgumentValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgumentValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgumentValue::Float(value) => Some(*value),
            ArgumentValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgumentValue::String(value) => Some(value),
            _ => None,
        }
    }
}

/// The coerced arguments of one field invocation. Every declared argument
/// has an entry; ones the document omitted without a default are `Absent`.
#[derive(Debug, Default)]
pub(crate) struct ArgumentSet(IndexMap<String, ArgumentValue>);

impl ArgumentSet {
    pub fn get(&self, name: &str) -> &ArgumentValue {
        self.0.get(name).unwrap_or(&ArgumentValue::Absent)
    }

    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).as_i64()
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).as_f64()
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).as_str()
    }

    fn insert(&mut self, name: String, value: ArgumentValue) {
        self.0.insert(name, value);
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum CoercionError {
    #[error("Field '{field}' does not have an argument named '{name}'.")]
    UnknownArgument {
        field: String,
        name: String,
        location: Location,
    },
    #[error("Missing required argument '{name}'.")]
    MissingArgument { name: String, location: Location },
    #[error("Unknown variable ${name}")]
    UnknownVariable { name: String, location: Location },
    #[error("Found a null where we expected a {expected}")]
    UnexpectedNull { expected: String, location: Location },
    #[error("Found a {actual} value where we expected a {expected} scalar")]
    IncorrectScalarType {
        actual: ValueKind,
        expected: ScalarType,
        location: Location,
    },
    #[error("Found value {actual} which cannot be coerced into a {expected} scalar")]
    IncorrectScalarValue {
        actual: String,
        expected: ScalarType,
        location: Location,
    },
}

impl CoercionError {
    pub(crate) fn location(&self) -> Location {
        match self {
            CoercionError::UnknownArgument { location, .. }
            | CoercionError::MissingArgument { location, .. }
            | CoercionError::UnknownVariable { location, .. }
            | CoercionError::UnexpectedNull { location, .. }
            | CoercionError::IncorrectScalarType { location, .. }
            | CoercionError::IncorrectScalarValue { location, .. } => *location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueKind {
    String,
    Integer,
    Float,
    Object,
    Boolean,
    List,
    Null,
    Enum,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ValueKind::String => "String",
            ValueKind::Integer => "Integer",
            ValueKind::Float => "Float",
            ValueKind::Object => "Object",
            ValueKind::Boolean => "Boolean",
            ValueKind::List => "List",
            ValueKind::Null => "Null",
            ValueKind::Enum => "Enum",
        };
        f.write_str(kind)
    }
}

impl From<&ConstValue> for ValueKind {
    fn from(value: &ConstValue) -> Self {
        match value {
            ConstValue::Null => ValueKind::Null,
            ConstValue::Number(number) if number.is_f64() => ValueKind::Float,
            ConstValue::Number(_) => ValueKind::Integer,
            ConstValue::String(_) => ValueKind::String,
            ConstValue::Boolean(_) => ValueKind::Boolean,
            ConstValue::Binary(_) => ValueKind::String,
            ConstValue::Enum(_) => ValueKind::Enum,
            ConstValue::List(_) => ValueKind::List,
            ConstValue::Object(_) => ValueKind::Object,
        }
    }
}

/// Coerces the supplied argument literals and variable references of one
/// field against its declared descriptors.
///
/// Omitted arguments take their declared default when one exists;
/// otherwise a required argument is an error and an optional one comes out
/// `Absent`. A variable reference the variable mapping cannot resolve
/// behaves exactly like an omitted argument.
pub(crate) fn coerce_arguments(
    field_name: &str,
    field_pos: Pos,
    descriptors: &[ArgumentDescriptor],
    supplied: &[(Positioned<Name>, Positioned<Value>)],
    variables: &Variables,
) -> Result<ArgumentSet, CoercionError> {
    for (name, _) in supplied {
        if !descriptors.iter().any(|descriptor| descriptor.name == *name.node) {
            return Err(CoercionError::UnknownArgument {
                field: field_name.to_string(),
                name: name.node.to_string(),
                location: name.pos.into(),
            });
        }
    }

    let mut arguments = ArgumentSet::default();
    for descriptor in descriptors {
        let supplied_value = supplied
            .iter()
            .find(|(name, _)| *name.node == descriptor.name)
            .map(|(_, value)| value);
        let value = match supplied_value {
            Some(value) => coerce_supplied(descriptor, value, variables)?,
            None => coerce_omitted(descriptor, field_pos.into())?,
        };
        arguments.insert(descriptor.name.clone(), value);
    }
    Ok(arguments)
}

fn coerce_supplied(
    descriptor: &ArgumentDescriptor,
    value: &Positioned<Value>,
    variables: &Variables,
) -> Result<ArgumentValue, CoercionError> {
    let location = Location::from(value.pos);
    let value = match &value.node {
        Value::Variable(name) => match variables.get(name.as_str()) {
            Some(value) => value.clone(),
            None if descriptor.required => {
                return Err(CoercionError::UnknownVariable {
                    name: name.to_string(),
                    location,
                })
            }
            None => return coerce_omitted(descriptor, location),
        },
        other => other.clone().into_const_with(|name| {
            Err(CoercionError::UnknownVariable {
                name: name.to_string(),
                location,
            })
        })?,
    };
    coerce_const(descriptor, value, location)
}

fn coerce_omitted(
    descriptor: &ArgumentDescriptor,
    location: Location,
) -> Result<ArgumentValue, CoercionError> {
    if let Some(default) = &descriptor.default_value {
        return coerce_const(descriptor, default.clone(), location);
    }
    if descriptor.required {
        return Err(CoercionError::MissingArgument {
            name: descriptor.name.clone(),
            location,
        });
    }
    Ok(ArgumentValue::Absent)
}

fn coerce_const(
    descriptor: &ArgumentDescriptor,
    value: ConstValue,
    location: Location,
) -> Result<ArgumentValue, CoercionError> {
    if let ConstValue::Null = value {
        if !descriptor.nullable {
            return Err(CoercionError::UnexpectedNull {
                expected: descriptor.type_display(),
                location,
            });
        }
        return Ok(ArgumentValue::Null);
    }

    match descriptor.ty {
        ScalarType::Int => match value {
            ConstValue::Number(ref number) if !number.is_f64() => {
                number
                    .as_i64()
                    .map(ArgumentValue::Int)
                    .ok_or_else(|| CoercionError::IncorrectScalarValue {
                        actual: number.to_string(),
                        expected: descriptor.ty,
                        location,
                    })
            }
            _ => Err(CoercionError::IncorrectScalarType {
                actual: (&value).into(),
                expected: descriptor.ty,
                location,
            }),
        },
        ScalarType::Float => match value {
            ConstValue::Number(ref number) => {
                number
                    .as_f64()
                    .map(ArgumentValue::Float)
                    .ok_or_else(|| CoercionError::IncorrectScalarValue {
                        actual: number.to_string(),
                        expected: descriptor.ty,
                        location,
                    })
            }
            _ => Err(CoercionError::IncorrectScalarType {
                actual: (&value).into(),
                expected: descriptor.ty,
                location,
            }),
        },
        ScalarType::String => match value {
            ConstValue::String(string) => Ok(ArgumentValue::String(string)),
            _ => Err(CoercionError::IncorrectScalarType {
                actual: (&value).into(),
                expected: descriptor.ty,
                location,
            }),
        },
        ScalarType::Boolean => match value {
            ConstValue::Boolean(boolean) => Ok(ArgumentValue::Boolean(boolean)),
            _ => Err(CoercionError::IncorrectScalarType {
                actual: (&value).into(),
                expected: descriptor.ty,
                location,
            }),
        },
    }
}
