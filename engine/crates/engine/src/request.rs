use async_graphql_value::Variables;
use serde::{Deserialize, Serialize};

/// A GraphQL request as it arrives from the boundary layer: the query
/// source, the optional operation name and the variable values.
///
/// Deserializes from the usual wire shape, with all field names in
/// `camelCase` (e.g. `operationName`).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub operation_name: Option<String>,

    #[serde(default)]
    pub variables: Variables,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }
}
