use async_graphql_parser::types::{DocumentOperations, OperationDefinition};

use crate::{
    request::Request,
    response::{GraphqlError, Location},
};

#[derive(thiserror::Error, Debug)]
pub(crate) enum ParseError {
    #[error("Unknown operation named '{0}'.")]
    UnknownOperation(String),
    #[error("Missing operation name.")]
    MissingOperationName,
    #[error(transparent)]
    ParserError(#[from] async_graphql_parser::Error),
}

pub(crate) type ParseResult<T> = Result<T, ParseError>;

impl From<ParseError> for GraphqlError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::ParserError(err) => {
                let locations = err.positions().into_iter().map(Location::from).collect();
                GraphqlError {
                    message: err.to_string(),
                    locations,
                    path: None,
                }
            }
            err => GraphqlError::new(err.to_string()),
        }
    }
}

#[derive(Debug)]
pub(crate) struct ParsedOperation {
    pub name: Option<String>,
    pub definition: OperationDefinition,
}

/// Returns the operation this request executes, before any validation
/// against the registry. Documents holding several operations must name
/// the one to run.
pub(crate) fn parse_operation(request: &Request) -> ParseResult<ParsedOperation> {
    let document = async_graphql_parser::parse_query(&request.query)?;

    let (name, operation) = if let Some(operation_name) = request.operation_name.as_deref() {
        match document.operations {
            DocumentOperations::Single(_) => None,
            DocumentOperations::Multiple(mut operations) => operations
                .remove(operation_name)
                .map(|operation| (Some(operation_name.to_string()), operation)),
        }
        .ok_or_else(|| ParseError::UnknownOperation(operation_name.to_string()))?
    } else {
        match document.operations {
            DocumentOperations::Single(operation) => (None, operation),
            DocumentOperations::Multiple(operations) => {
                let mut operations = operations.into_iter();
                let first = operations
                    .next()
                    .map(|(name, operation)| (Some(name.to_string()), operation))
                    .ok_or(ParseError::MissingOperationName)?;
                if operations.next().is_some() {
                    return Err(ParseError::MissingOperationName);
                }
                first
            }
        }
    };

    Ok(ParsedOperation {
        name,
        definition: operation.node,
    })
}
