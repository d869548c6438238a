//! Validated node lists.
//!
//! Parsers in other runtimes hand node trees over as loosely typed JSON. The
//! usual shape is a list of node records, but a single record sometimes
//! arrives unwrapped. [`NodeList::from_value`] wraps that case once and
//! rejects everything else.

use crate::error::{Error, ErrorKind, Result};
use crate::node::XmlNode;
use serde_json::Value;
use std::ops::Deref;
use tracing::debug;

/// An ordered list of sibling nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeList(Vec<XmlNode>);

impl NodeList {
    /// Create a node list from already-typed nodes.
    pub fn new(nodes: Vec<XmlNode>) -> Self {
        Self(nodes)
    }

    /// Normalize a JSON value into a node list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use busbar_soap_node::NodeList;
    /// use serde_json::json;
    ///
    /// let list = NodeList::from_value(json!([{"name": "Ack", "text": "Success"}])).unwrap();
    /// assert_eq!(list.len(), 1);
    ///
    /// // A bare record is wrapped into a one-element list.
    /// let list = NodeList::from_value(json!({"name": "Ack", "text": "Success"})).unwrap();
    /// assert_eq!(list[0].name, "Ack");
    ///
    /// assert!(NodeList::from_value(json!("Success")).is_err());
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(position, item)| node_from_value(position, item))
                .collect::<Result<Vec<_>>>()
                .map(Self),
            Value::Object(ref record) if record.contains_key("name") => {
                debug!("wrapping a bare node record into a node list");
                let node: XmlNode = serde_json::from_value(value)?;
                Ok(Self(vec![node]))
            }
            other => Err(Error::new(ErrorKind::Malformed(format!(
                "expected a list of node records, found {}",
                describe(&other)
            )))),
        }
    }

    /// Consume the list, returning the nodes.
    pub fn into_inner(self) -> Vec<XmlNode> {
        self.0
    }
}

fn node_from_value(position: usize, item: Value) -> Result<XmlNode> {
    if !item.is_object() {
        return Err(Error::new(ErrorKind::Malformed(format!(
            "entry {} is {}, not a node record",
            position,
            describe(&item)
        ))));
    }
    serde_json::from_value(item).map_err(|err| {
        Error::with_source(
            ErrorKind::Malformed(format!("entry {}: {}", position, err)),
            err,
        )
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without a name",
    }
}

impl Deref for NodeList {
    type Target = [XmlNode];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<XmlNode>> for NodeList {
    fn from(nodes: Vec<XmlNode>) -> Self {
        Self(nodes)
    }
}

impl From<XmlNode> for NodeList {
    fn from(node: XmlNode) -> Self {
        Self(vec![node])
    }
}

impl IntoIterator for NodeList {
    type Item = XmlNode;
    type IntoIter = std::vec::IntoIter<XmlNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
