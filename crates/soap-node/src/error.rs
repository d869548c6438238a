//! Error types for soap-node.

/// Result type alias for soap-node operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for soap-node operations.
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

    /// Returns true if the input was a node list of the wrong shape,
    /// as opposed to unparseable XML text.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, ErrorKind::Malformed(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The XML text is not well formed.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// A name or value is not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(String),

    /// The document contains no element at all.
    #[error("Document has no root element")]
    NoRoot,

    /// The document contains more than one top-level element.
    #[error("Document has {0} root elements, expected exactly one")]
    MultipleRoots(usize),

    /// DOCTYPE declarations are refused outright.
    #[error("DOCTYPE declarations are not accepted")]
    DoctypeRejected,

    /// A node list handed over by a foreign parser has an unusable shape.
    #[error("Malformed node list: {0}")]
    Malformed(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::with_source(ErrorKind::Utf8(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Malformed(err.to_string()), err)
    }
}
