//! Error types for soap-mapper.
//!
//! Only a fault envelope aborts deserialization. Everything else that goes
//! wrong while mapping fields is recorded in an [`Outcome`](crate::Outcome)
//! instead of failing the call.

/// Result type alias for soap-mapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for soap-mapper operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if the response was a protocol-level fault.
    pub fn is_fault(&self) -> bool {
        matches!(self.kind, ErrorKind::Fault)
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The response root is a fault envelope. No fields were mapped.
    #[error("SOAP fault received")]
    Fault,

    /// The node list handed in has an unusable shape.
    #[error("Malformed node list: {0}")]
    MalformedNodes(String),

    /// Raw XML text could not be parsed into nodes.
    #[error("XML parse error: {0}")]
    Parse(String),
}

impl From<busbar_soap_node::Error> for Error {
    fn from(err: busbar_soap_node::Error) -> Self {
        let kind = match &err.kind {
            busbar_soap_node::ErrorKind::Malformed(message) => {
                ErrorKind::MalformedNodes(message.clone())
            }
            other => ErrorKind::Parse(other.to_string()),
        };
        Error::with_source(kind, err)
    }
}
