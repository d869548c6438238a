//! The trait implemented by every mapped message type.

use crate::catalog::Catalog;
use crate::de::{Deserializer, Stage};
use crate::error::Result;
use crate::outcome::Outcome;
use crate::ser::Serializer;
use busbar_soap_node::XmlNode;

/// A message type described by a static [`Catalog`].
///
/// Implementors only provide [`catalog`](XmlMessage::catalog); the
/// conversions are shared. The default methods use the default
/// [`MapperConfig`](crate::MapperConfig); build a [`Serializer`] or
/// [`Deserializer`] directly to use another one.
pub trait XmlMessage: Default + Sized + 'static {
    /// The field catalog for this type. Must return the same instance on
    /// every call.
    fn catalog() -> &'static Catalog<Self>;

    /// Serialize into a body fragment.
    fn to_xml_string(&self) -> String {
        Serializer::default().to_string(self)
    }

    /// Alias of [`to_xml_string`](XmlMessage::to_xml_string).
    fn to_soap(&self) -> String {
        self.to_xml_string()
    }

    /// Populate this message in place from parsed nodes.
    fn init(&mut self, nodes: &[XmlNode], stage: Stage) -> Result<Outcome> {
        Deserializer::default().populate(self, nodes, stage)
    }

    /// Build a fresh message from a parsed response (root stage).
    fn from_nodes(nodes: &[XmlNode]) -> Result<(Self, Outcome)> {
        Deserializer::default().from_nodes(nodes, Stage::Root)
    }
}
