use async_graphql_parser::Pos;
use serde::Serialize;

/// A line/column position in the query source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl From<Pos> for Location {
    fn from(pos: Pos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}

/// Where in the result tree an error applies: response keys for fields,
/// indices for list elements.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponsePath(Vec<ResponsePathSegment>);

impl ResponsePath {
    pub fn child(&self, segment: impl Into<ResponsePathSegment>) -> ResponsePath {
        let mut path = self.0.clone();
        path.push(segment.into());
        ResponsePath(path)
    }

    pub fn segments(&self) -> &[ResponsePathSegment] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePathSegment {
    Field(String),
    Index(usize),
}

impl Serialize for ResponsePathSegment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResponsePathSegment::Field(name) => serializer.serialize_str(name),
            ResponsePathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl From<&str> for ResponsePathSegment {
    fn from(name: &str) -> Self {
        ResponsePathSegment::Field(name.to_string())
    }
}

impl From<usize> for ResponsePathSegment {
    fn from(index: usize) -> Self {
        ResponsePathSegment::Index(index)
    }
}

/// One field-scoped failure. Errors never abort sibling fields; they
/// accumulate on the response in the order they were found.
#[derive(Debug, Serialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ResponsePath>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<Location>) -> Self {
        self.locations.push(location.into());
        self
    }

    pub fn with_path(mut self, path: ResponsePath) -> Self {
        self.path = Some(path);
        self
    }
}

/// The outcome of one execution: the result tree shaped like the requested
/// selection, plus every field-scoped error met along the way. `data` is
/// `None` only when the document could not be executed at all.
#[derive(Debug, Serialize)]
pub struct Response {
    pub data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub errors: Vec<GraphqlError>,
}

impl Response {
    pub fn from_error(error: impl Into<GraphqlError>) -> Self {
        Self {
            data: None,
            errors: vec![error.into()],
        }
    }
}
