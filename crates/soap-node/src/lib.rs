//! # busbar-soap-node
//!
//! Generic parsed-XML node trees for SOAP-style APIs.
//!
//! A node is the minimal record a mapper needs from an XML parser: a
//! qualified name, optional text, attributes and ordered children. This crate
//! provides:
//!
//! - [`XmlNode`] - the node record, serde-compatible
//! - [`parse_document`] / [`parse_fragment`] - a quick-xml parser producing nodes
//! - [`NodeList`] - validated node lists built from loosely shaped JSON input
//!
//! ## Example
//!
//! ```rust
//! use busbar_soap_node::{parse_document, XmlNode};
//!
//! let root = parse_document("<Response><ns3:Amount currencyID=\"USD\">10.00</ns3:Amount></Response>")?;
//! let amount: &XmlNode = &root.children[0];
//!
//! assert_eq!(amount.local_name(), "Amount");
//! assert_eq!(amount.attributes["currencyID"], "USD");
//! assert_eq!(amount.text.as_deref(), Some("10.00"));
//! # Ok::<(), busbar_soap_node::Error>(())
//! ```

mod error;
mod list;
mod node;
mod parser;

pub use error::{Error, ErrorKind, Result};
pub use list::NodeList;
pub use node::XmlNode;
pub use parser::{parse_document, parse_fragment};
