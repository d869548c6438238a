//! Partial-result reporting for deserialization.

/// Something that could not be mapped but did not stop deserialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// Structured content arrived for a field that has no nested type.
    #[error("{type_name}.{field}: no nested type to receive structured content")]
    UnresolvedNestedType {
        type_name: &'static str,
        field: &'static str,
    },

    /// Text could not be converted to the field's scalar type.
    #[error("{type_name}.{field}: cannot convert {value:?}: {reason}")]
    InvalidScalar {
        type_name: &'static str,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The nested content lies deeper than the configured limit.
    #[error("{type_name}.{field}: nesting depth {depth} exceeds the configured limit")]
    DepthLimitExceeded {
        type_name: &'static str,
        field: &'static str,
        depth: usize,
    },
}

impl Diagnostic {
    /// The declared name of the field concerned.
    pub fn field(&self) -> &'static str {
        match self {
            Diagnostic::UnresolvedNestedType { field, .. }
            | Diagnostic::InvalidScalar { field, .. }
            | Diagnostic::DepthLimitExceeded { field, .. } => field,
        }
    }
}

/// Result of a successful `populate` call.
///
/// Unknown elements are skipped silently and never show up here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Outcome {
    diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    /// Returns true if every matched node was mapped.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
