//! quick-xml based parser producing [`XmlNode`] trees.
//!
//! quick-xml never expands external entities; DOCTYPE declarations are
//! rejected before any further processing.

use crate::error::{Error, ErrorKind, Result};
use crate::node::XmlNode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// An element whose end tag has not been seen yet.
struct OpenElement {
    name: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<XmlNode>,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();

        let mut attributes = BTreeMap::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            if is_namespace_declaration(key) {
                continue;
            }
            let value = attr.unescape_value()?.into_owned();
            attributes.insert(key.to_string(), value);
        }

        Ok(Self {
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    fn finish(self) -> XmlNode {
        // Whitespace between child elements is layout. A leaf keeps it.
        let layout = !self.children.is_empty() && self.text.trim().is_empty();
        let text = if self.text.is_empty() || layout {
            None
        } else {
            Some(self.text)
        };
        XmlNode {
            name: self.name,
            text,
            attributes: self.attributes,
            children: self.children,
        }
    }
}

fn is_namespace_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

fn attach(stack: &mut [OpenElement], roots: &mut Vec<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn push_text(stack: &mut [OpenElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(open) => {
            open.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::new(ErrorKind::Xml(
            "text outside of any element".to_string(),
        ))),
    }
}

/// Parse a body fragment that may hold several sibling top-level elements.
///
/// # Example
///
/// ```rust
/// use busbar_soap_node::parse_fragment;
///
/// let nodes = parse_fragment("<ebl:Ack>Success</ebl:Ack><ebl:Version>204.0</ebl:Version>").unwrap();
/// assert_eq!(nodes.len(), 2);
/// assert_eq!(nodes[0].name, "ebl:Ack");
/// assert_eq!(nodes[1].text.as_deref(), Some("204.0"));
/// ```
#[instrument(skip_all, fields(len = xml.len()))]
pub fn parse_fragment(xml: &str) -> Result<Vec<XmlNode>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut roots: Vec<XmlNode> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(OpenElement::from_start(&start)?),
            Event::Empty(start) => {
                let node = OpenElement::from_start(&start)?.finish();
                attach(&mut stack, &mut roots, node);
            }
            Event::End(end) => {
                let open = stack.pop().ok_or_else(|| {
                    Error::new(ErrorKind::Xml(format!(
                        "unexpected end tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    )))
                })?;
                attach(&mut stack, &mut roots, open.finish());
            }
            Event::Text(text) => push_text(&mut stack, &text.unescape()?)?,
            Event::CData(cdata) => {
                let raw = cdata.into_inner();
                push_text(&mut stack, std::str::from_utf8(&raw)?)?;
            }
            Event::DocType(_) => return Err(Error::new(ErrorKind::DoctypeRejected)),
            Event::Eof => break,
            // Declarations, comments and processing instructions carry no data.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::new(ErrorKind::Xml(format!(
            "element <{}> is never closed",
            open.name
        ))));
    }

    debug!(roots = roots.len(), "parsed XML fragment");
    Ok(roots)
}

/// Parse a complete XML document into its root node.
///
/// # Example
///
/// ```rust
/// use busbar_soap_node::parse_document;
///
/// let root = parse_document(r#"<?xml version="1.0"?>
/// <SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
///   <SOAP-ENV:Body><Ack>Success</Ack></SOAP-ENV:Body>
/// </SOAP-ENV:Envelope>"#).unwrap();
///
/// assert_eq!(root.name, "SOAP-ENV:Envelope");
/// assert!(root.attributes.is_empty());
/// assert_eq!(root.children[0].children[0].text.as_deref(), Some("Success"));
/// ```
pub fn parse_document(xml: &str) -> Result<XmlNode> {
    let mut roots = parse_fragment(xml)?;
    match roots.len() {
        0 => Err(Error::new(ErrorKind::NoRoot)),
        1 => Ok(roots.remove(0)),
        n => Err(Error::new(ErrorKind::MultipleRoots(n))),
    }
}
