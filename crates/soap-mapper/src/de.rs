//! Parsed XML nodes to message deserialization.
//!
//! Deserialization has two stages. At [`Stage::Root`] the first node is the
//! response wrapper: it is checked for a fault and then unwrapped to its
//! children. Every nested message is filled at [`Stage::Nested`] from a bare
//! list of field nodes; there is no way back to the root stage.
//!
//! Matching is forgiving. Namespace prefixes are stripped, names are
//! compared without case, `Field[n]` / `Field(n)` address a position of a
//! repeated field, and elements that match nothing are skipped. Problems
//! that leave a field unpopulated are reported through [`Outcome`] rather
//! than failing the call; only a fault envelope is an error.

use crate::catalog::{Access, Catalog, Field};
use crate::config::MapperConfig;
use crate::error::Result;
use crate::fault::FaultDetector;
use crate::message::XmlMessage;
use crate::outcome::{Diagnostic, Outcome};
use busbar_soap_node::{parse_document, NodeList, XmlNode};
use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, instrument, trace, warn};

/// Name of the synthesized child carrying an attribute-bearing element's text.
///
/// It resolves to a field of this name, or else to the message's
/// value-placed field whatever that is called.
pub const VALUE_FIELD: &str = "value";

static PREFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9]+:(.+)").unwrap());

static INDEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)[\[\(](\d+)[\]\)]$").unwrap());

/// Where in the document a node list sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The list starts with the response wrapper element.
    Root,
    /// The list holds the field elements of one message.
    Nested,
}

/// Populates messages from parsed nodes using their catalogs.
#[derive(Debug, Clone)]
pub struct Deserializer {
    config: MapperConfig,
    fault: FaultDetector,
}

impl Default for Deserializer {
    fn default() -> Self {
        Self::new(MapperConfig::default())
    }
}

impl Deserializer {
    /// Create a deserializer with the given configuration.
    pub fn new(config: MapperConfig) -> Self {
        let fault = FaultDetector::new(config.fault_marker.clone());
        Self { config, fault }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Populate `target` in place.
    ///
    /// At [`Stage::Root`] a fault root fails with
    /// [`ErrorKind::Fault`](crate::ErrorKind::Fault) before any field is
    /// touched.
    #[instrument(skip_all, fields(message = T::catalog().type_name(), stage = ?stage))]
    pub fn populate<T: XmlMessage>(
        &self,
        target: &mut T,
        nodes: &[XmlNode],
        stage: Stage,
    ) -> Result<Outcome> {
        let nodes = match (stage, nodes.first()) {
            (Stage::Root, Some(root)) => {
                self.fault.check(root)?;
                root.children.as_slice()
            }
            _ => nodes,
        };

        let mut walk = Walk {
            de: self,
            outcome: Outcome::default(),
            depth: 0,
        };
        walk.fill(target, nodes)?;

        debug!(
            nodes = nodes.len(),
            diagnostics = walk.outcome.diagnostics().len(),
            "populated message"
        );
        Ok(walk.outcome)
    }

    /// Build a fresh message from parsed nodes.
    pub fn from_nodes<T: XmlMessage>(
        &self,
        nodes: &[XmlNode],
        stage: Stage,
    ) -> Result<(T, Outcome)> {
        let mut message = T::default();
        let outcome = self.populate(&mut message, nodes, stage)?;
        Ok((message, outcome))
    }

    /// Populate from a loosely shaped JSON node list.
    ///
    /// A single bare node record is wrapped once; other shapes fail with
    /// [`ErrorKind::MalformedNodes`](crate::ErrorKind::MalformedNodes).
    pub fn populate_value<T: XmlMessage>(
        &self,
        target: &mut T,
        value: serde_json::Value,
        stage: Stage,
    ) -> Result<Outcome> {
        let nodes = NodeList::from_value(value)?;
        self.populate(target, &nodes, stage)
    }

    /// Parse an XML document and populate from its root.
    pub fn populate_xml<T: XmlMessage>(&self, target: &mut T, xml: &str) -> Result<Outcome> {
        let root = parse_document(xml)?;
        self.populate(target, std::slice::from_ref(&root), Stage::Root)
    }
}

/// Strip a leading `prefix:` qualifier from an element name.
pub(crate) fn strip_prefix(name: &str) -> &str {
    PREFIX_PATTERN
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map_or(name, |local| local.as_str())
}

/// Resolve a wire name to a field, with an explicit position if the name
/// carried an index suffix.
fn resolve<T: 'static>(
    catalog: &'static Catalog<T>,
    raw_name: &str,
) -> Option<(&'static Field<T>, Option<usize>)> {
    let key = strip_prefix(raw_name).to_lowercase();
    if key.is_empty() {
        return None;
    }
    if let Some(field) = catalog.field(&key) {
        return Some((field, None));
    }
    if key == VALUE_FIELD {
        return catalog.value_field().map(|field| (field, None));
    }

    let captures = INDEX_PATTERN.captures(&key)?;
    let index = captures[2].parse::<usize>().ok()?;
    catalog.field(&captures[1]).map(|field| (field, Some(index)))
}

/// State of one `populate` call.
pub(crate) struct Walk<'d> {
    de: &'d Deserializer,
    outcome: Outcome,
    depth: usize,
}

impl Walk<'_> {
    /// Fill a nested message one level below the current one.
    pub(crate) fn populate_object<N: XmlMessage>(
        &mut self,
        target: &mut N,
        nodes: &[XmlNode],
    ) -> Result<()> {
        self.depth += 1;
        let result = self.fill(target, nodes);
        self.depth -= 1;
        result
    }

    fn fill<T: XmlMessage>(&mut self, target: &mut T, nodes: &[XmlNode]) -> Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }

        let catalog = T::catalog();
        // Next position per repeated field, for this message only.
        let mut counters: HashMap<&'static str, usize> = HashMap::new();

        for node in nodes {
            let Some((field, explicit)) = resolve(catalog, &node.name) else {
                trace!(
                    message = catalog.type_name(),
                    element = %node.name,
                    "skipping unknown element"
                );
                continue;
            };

            let meta = field.meta();
            let index = if meta.is_array {
                Some(explicit.unwrap_or_else(|| {
                    let next = counters.entry(meta.name).or_insert(0);
                    let index = *next;
                    *next += 1;
                    index
                }))
            } else {
                None
            };

            if !node.attributes.is_empty() {
                let mut children = node.children.clone();
                children.extend(
                    node.attributes
                        .iter()
                        .map(|(name, value)| XmlNode::new(name.as_str()).with_text(value.as_str())),
                );
                if let Some(text) = &node.text {
                    children.push(XmlNode::new(VALUE_FIELD).with_text(text.as_str()));
                }
                self.fill_relation(target, catalog, field, index, &children)?;
            } else if let Some(text) = &node.text {
                self.assign_text(target, catalog, field, index, node, text)?;
            } else if !node.children.is_empty() {
                self.fill_relation(target, catalog, field, index, &node.children)?;
            }
        }

        Ok(())
    }

    fn assign_text<T: XmlMessage>(
        &mut self,
        target: &mut T,
        catalog: &Catalog<T>,
        field: &'static Field<T>,
        index: Option<usize>,
        node: &XmlNode,
        text: &str,
    ) -> Result<()> {
        match field.access() {
            Access::Scalar(slot) => {
                if let Err(reason) = slot.assign(target, index, text) {
                    self.record(Diagnostic::InvalidScalar {
                        type_name: catalog.type_name(),
                        field: field.meta().name,
                        value: text.to_string(),
                        reason,
                    });
                }
                Ok(())
            }
            Access::Nested(_) => {
                // Bare text for a nested message lands in its value field.
                let mut children = node.children.clone();
                children.push(XmlNode::new(VALUE_FIELD).with_text(text));
                self.fill_relation(target, catalog, field, index, &children)
            }
        }
    }

    fn fill_relation<T: XmlMessage>(
        &mut self,
        target: &mut T,
        catalog: &Catalog<T>,
        field: &'static Field<T>,
        index: Option<usize>,
        children: &[XmlNode],
    ) -> Result<()> {
        let meta = field.meta();
        let Access::Nested(slot) = field.access() else {
            self.record(Diagnostic::UnresolvedNestedType {
                type_name: catalog.type_name(),
                field: meta.name,
            });
            return Ok(());
        };

        if self.depth >= self.de.config.max_depth {
            self.record(Diagnostic::DepthLimitExceeded {
                type_name: catalog.type_name(),
                field: meta.name,
                depth: self.depth + 1,
            });
            return Ok(());
        }

        slot.populate(target, index, children, self)
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        warn!(%diagnostic, "field left unpopulated");
        self.outcome.push(diagnostic);
    }
}
