//! Fault envelope detection.
//!
//! Fault responses have a different shape from normal responses, so they
//! must never reach field mapping. Detection only looks at the root element
//! name; the fault's own content is not parsed.

use crate::error::{Error, ErrorKind, Result};
use busbar_soap_node::XmlNode;
use tracing::debug;

/// Checks response roots for the fault marker.
#[derive(Debug, Clone)]
pub struct FaultDetector {
    /// Lowercased marker, e.g. `:fault`.
    marker: String,
}

impl Default for FaultDetector {
    fn default() -> Self {
        Self::new(crate::DEFAULT_FAULT_MARKER)
    }
}

impl FaultDetector {
    /// Create a detector for the given marker. Matching ignores case.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().to_lowercase(),
        }
    }

    /// Returns true if the element name carries the fault marker.
    ///
    /// # Example
    ///
    /// ```rust
    /// use busbar_soap_mapper::FaultDetector;
    ///
    /// let detector = FaultDetector::default();
    /// assert!(detector.is_fault("soap:Fault"));
    /// assert!(detector.is_fault("SOAP-ENV:FAULT"));
    /// assert!(!detector.is_fault("Fault"));
    /// assert!(!detector.is_fault("ns:GetBalanceResponse"));
    /// ```
    pub fn is_fault(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.marker)
    }

    /// Fail with [`ErrorKind::Fault`] if the root is a fault envelope.
    pub fn check(&self, root: &XmlNode) -> Result<()> {
        if self.is_fault(&root.name) {
            debug!(root = %root.name, "fault envelope detected");
            return Err(Error::new(ErrorKind::Fault));
        }
        Ok(())
    }
}
