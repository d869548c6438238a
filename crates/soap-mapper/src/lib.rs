//! # busbar-soap-mapper
//!
//! Metadata-driven mapping between typed messages and SOAP XML.
//!
//! Every message type implements [`XmlMessage`] by returning a static
//! [`Catalog`] that declares its fields in order: attributes, a text value,
//! scalar elements and nested messages, each optionally repeated. The same
//! catalog drives both directions:
//!
//! - [`Serializer`] turns a message into an XML body fragment
//! - [`Deserializer`] fills a message from parsed [`XmlNode`]s
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐        ┌──────────────────────────┐
//! │   message (XmlMessage)   │◄──────►│     Catalog<Message>     │
//! └──────────────────────────┘        └──────────────────────────┘
//!         │          ▲                        ▲         ▲
//!         ▼          │                        │         │
//! ┌──────────────┐ ┌──────────────────┐       │         │
//! │  Serializer  │ │   Deserializer   │───────┘         │
//! │  (fragment)  │ │ (fault, matching)│                 │
//! └──────────────┘ └──────────────────┘─────────────────┘
//!                          ▲
//!                          │
//!              busbar-soap-node (XmlNode)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use busbar_soap_mapper::{parse_document, Catalog, Repeated, XmlMessage};
//! use std::sync::OnceLock;
//!
//! #[derive(Debug, Default)]
//! struct Amount {
//!     currency_id: Option<String>,
//!     value: Option<String>,
//! }
//!
//! impl XmlMessage for Amount {
//!     fn catalog() -> &'static Catalog<Self> {
//!         static CATALOG: OnceLock<Catalog<Amount>> = OnceLock::new();
//!         CATALOG.get_or_init(|| {
//!             Catalog::<Amount>::builder()
//!                 .attribute("currencyID", |m| &m.currency_id, |m| &mut m.currency_id)
//!                 .value("value", |m| &m.value, |m| &mut m.value)
//!                 .build()
//!         })
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct GetBalanceResponse {
//!     ack: Option<String>,
//!     balances: Repeated<Amount>,
//! }
//!
//! impl XmlMessage for GetBalanceResponse {
//!     fn catalog() -> &'static Catalog<Self> {
//!         static CATALOG: OnceLock<Catalog<GetBalanceResponse>> = OnceLock::new();
//!         CATALOG.get_or_init(|| {
//!             Catalog::<GetBalanceResponse>::builder()
//!                 .element("Ack", |m| &m.ack, |m| &mut m.ack)
//!                 .children("Balance", |m| &m.balances, |m| &mut m.balances)
//!                 .build()
//!         })
//!     }
//! }
//!
//! let root = parse_document(
//!     r#"<ns:GetBalanceResponse xmlns:ns="urn:ebay:api:PayPalAPI">
//!          <ns:Ack>Success</ns:Ack>
//!          <ns:Balance currencyID="USD">10.00</ns:Balance>
//!          <ns:Balance currencyID="EUR">4.50</ns:Balance>
//!        </ns:GetBalanceResponse>"#,
//! )?;
//!
//! let (response, outcome) = GetBalanceResponse::from_nodes(&[root])?;
//! assert!(outcome.is_complete());
//! assert_eq!(response.ack.as_deref(), Some("Success"));
//! assert_eq!(response.balances.len(), 2);
//!
//! assert_eq!(
//!     response.to_xml_string(),
//!     "<ebl:Ack>Success</ebl:Ack>\
//!      <ebl:Balance currencyID=\"USD\">10.00</ebl:Balance>\
//!      <ebl:Balance currencyID=\"EUR\">4.50</ebl:Balance>"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Faults
//!
//! A response whose root element name contains `:fault` (any case) is
//! rejected with [`ErrorKind::Fault`] before any field is touched.
//!
//! ## Logging
//!
//! The crate logs through `tracing`: serialization and population emit
//! `debug` spans, skipped elements are `trace`, and fields left unpopulated
//! are `warn`.

mod catalog;
mod config;
mod de;
mod error;
mod escape;
mod fault;
mod message;
mod outcome;
mod scalar;
mod ser;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, CatalogBuilder, FieldMeta, FieldSpec, Namespace, Placement};
pub use config::{MapperConfig, MapperConfigBuilder};
pub use de::{Deserializer, Stage, VALUE_FIELD};
pub use error::{Error, ErrorKind, Result};
pub use escape::{escape, is_xml_char};
pub use fault::FaultDetector;
pub use message::XmlMessage;
pub use outcome::{Diagnostic, Outcome};
pub use scalar::{Repeated, XmlScalar};
pub use ser::{Fragment, Serializer};

pub use busbar_soap_node::{parse_document, parse_fragment, NodeList, XmlNode};

/// Namespace prefix for element fields without an explicit one.
pub const DEFAULT_NAMESPACE: &str = "ebl";

/// Root element marker identifying a fault response.
pub const DEFAULT_FAULT_MARKER: &str = ":fault";

/// Nesting depth beyond which nested content is not populated.
pub const DEFAULT_MAX_DEPTH: usize = 64;
