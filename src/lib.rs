//! # busbar-soap
//!
//! Metadata-driven XML mapping for SOAP-style vendor APIs.
//!
//! Request and response messages are plain Rust structs that describe their
//! wire layout once, in a static field catalog. The catalog drives both
//! serialization into request body fragments and population from parsed
//! response documents, including repeated fields, nested messages,
//! attribute-carrying value types and fault detection.
//!
//! ## Crates
//!
//! - **busbar-soap-node** - Parsed XML node trees and a quick-xml based parser
//! - **busbar-soap-mapper** - Field catalogs, serializer and deserializer
//!
//! ## Quick Start
//!
//! ```rust
//! use busbar_soap::{parse_document, Catalog, XmlMessage};
//! use std::sync::OnceLock;
//!
//! #[derive(Debug, Default)]
//! struct AddressVerifyResponse {
//!     ack: Option<String>,
//!     street_match: Option<String>,
//! }
//!
//! impl XmlMessage for AddressVerifyResponse {
//!     fn catalog() -> &'static Catalog<Self> {
//!         static CATALOG: OnceLock<Catalog<AddressVerifyResponse>> = OnceLock::new();
//!         CATALOG.get_or_init(|| {
//!             Catalog::<AddressVerifyResponse>::builder()
//!                 .element("Ack", |m| &m.ack, |m| &mut m.ack)
//!                 .element("StreetMatch", |m| &m.street_match, |m| &mut m.street_match)
//!                 .build()
//!         })
//!     }
//! }
//!
//! let root = parse_document(
//!     "<AddressVerifyResponse><Ack>Success</Ack><StreetMatch>Matched</StreetMatch></AddressVerifyResponse>",
//! )?;
//! let (response, _) = AddressVerifyResponse::from_nodes(&[root])?;
//! assert_eq!(response.street_match.as_deref(), Some("Matched"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "mapper")]
pub use busbar_soap_mapper as mapper;
#[cfg(feature = "node")]
pub use busbar_soap_node as node;

// Re-export commonly used types at the top level
#[cfg(feature = "mapper")]
pub use busbar_soap_mapper::{
    Catalog, Deserializer, Diagnostic, Error, ErrorKind, FieldSpec, MapperConfig, Outcome,
    Repeated, Serializer, Stage, XmlMessage,
};
#[cfg(feature = "node")]
pub use busbar_soap_node::{parse_document, parse_fragment, NodeList, XmlNode};
