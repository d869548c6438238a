//! Message to XML serialization.
//!
//! The output is a body fragment: no XML declaration and no envelope. The
//! transport layer embeds it in its own request element.
//!
//! Attribute fields come first, then element fields in declaration order.
//! Absent or empty fields are omitted entirely. A `Value` field ends element
//! processing for its message.

use crate::catalog::{Access, FieldMeta, Namespace, Placement};
use crate::config::MapperConfig;
use crate::escape::escape;
use crate::message::XmlMessage;
use std::borrow::Cow;
use tracing::{debug, instrument};

/// The serialized form of one message.
///
/// Attributes are kept apart from the content so that an enclosing element
/// can decide where they go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    /// Attribute names with already escaped values, in declaration order.
    pub attributes: Vec<(String, String)>,
    /// Escaped element content.
    pub content: String,
}

impl Fragment {
    /// Returns true if the fragment has neither attributes nor content.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.content.is_empty()
    }

    /// Attributes rendered as `name="value"` pairs joined by spaces.
    pub fn attribute_text(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flatten into a single string.
    ///
    /// Without attributes this is just the content. With attributes the
    /// attribute text comes first and is closed with `>`, so the result can
    /// be appended directly to an open start tag such as `<ns:Request `.
    pub fn into_string(self) -> String {
        if self.attributes.is_empty() {
            return self.content;
        }
        let mut out = self.attribute_text();
        out.push('>');
        out.push_str(&self.content);
        out
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.attributes.is_empty() {
            write!(f, "{}>", self.attribute_text())?;
        }
        f.write_str(&self.content)
    }
}

/// Serializes messages using their catalogs.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: MapperConfig,
}

impl Serializer {
    /// Create a serializer with the given configuration.
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Serialize a message into a flattened body fragment.
    #[instrument(skip_all, fields(message = T::catalog().type_name()))]
    pub fn to_string<T: XmlMessage>(&self, message: &T) -> String {
        let out = self.emit(message).into_string();
        debug!(len = out.len(), "serialized message");
        out
    }

    /// Serialize a message, keeping attributes and content apart.
    pub fn emit<T: XmlMessage>(&self, message: &T) -> Fragment {
        let catalog = T::catalog();
        let mut fragment = Fragment::default();

        for field in catalog.entries() {
            let meta = field.meta();
            if meta.placement != Placement::Attribute {
                continue;
            }
            if let Access::Scalar(slot) = field.access() {
                if let Some(text) = slot.texts(message).into_iter().next() {
                    fragment
                        .attributes
                        .push((meta.wire_name().to_string(), escape(&text)));
                }
            }
        }

        for field in catalog.entries() {
            let meta = field.meta();
            match (meta.placement, field.access()) {
                (Placement::Attribute, _) => continue,
                (Placement::Value, Access::Scalar(slot)) => {
                    if let Some(text) = slot.texts(message).into_iter().next() {
                        fragment.content.push_str(&escape(&text));
                        break;
                    }
                }
                (Placement::Element, Access::Scalar(slot)) => {
                    for text in slot.texts(message) {
                        self.wrap_text(meta, &text, &mut fragment.content);
                    }
                }
                (Placement::Element, Access::Nested(slot)) => {
                    for inner in slot.emit(message, self) {
                        self.wrap_fragment(meta, inner, &mut fragment.content);
                    }
                }
                // The builder only pairs `Value` with scalar access.
                (Placement::Value, Access::Nested(_)) => {}
            }
        }

        fragment
    }

    /// Qualified element name for a field.
    fn tag_name<'a>(&'a self, meta: &FieldMeta) -> Cow<'a, str> {
        match meta.namespace {
            Namespace::Bare => Cow::Borrowed(meta.wire_name()),
            Namespace::Prefix(prefix) => Cow::Owned(format!("{}:{}", prefix, meta.wire_name())),
            Namespace::Default => Cow::Owned(format!(
                "{}:{}",
                self.config.default_namespace,
                meta.wire_name()
            )),
        }
    }

    fn wrap_text(&self, meta: &FieldMeta, text: &str, out: &mut String) {
        let tag = self.tag_name(meta);
        out.push('<');
        out.push_str(&tag);
        out.push('>');
        out.push_str(&escape(text));
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
    }

    fn wrap_fragment(&self, meta: &FieldMeta, inner: Fragment, out: &mut String) {
        let tag = self.tag_name(meta);
        out.push('<');
        out.push_str(&tag);
        // Attributes of the nested message belong on this element's tag.
        for (name, value) in &inner.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        out.push_str(&inner.content);
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
    }
}
