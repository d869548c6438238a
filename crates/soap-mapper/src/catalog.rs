//! Per-type field metadata.
//!
//! A [`Catalog`] is the static description of one message type: which
//! fields it has, where each lands on the wire, and how to read and write
//! them. It is built once per type (see [`XmlMessage::catalog`]) and never
//! mutated afterwards, so it can be shared freely across threads.
//!
//! Field access goes through plain function pointers captured at build
//! time. Nested message types are type parameters of the builder methods,
//! so the type to instantiate for a nested field is known before any
//! document is seen.

use crate::de::Walk;
use crate::error::Result;
use crate::message::XmlMessage;
use crate::scalar::{Repeated, XmlScalar};
use crate::ser::{Fragment, Serializer};
use busbar_soap_node::XmlNode;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::warn;

/// Where a field is placed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// `name="value"` on the enclosing element.
    Attribute,
    /// A child element.
    Element,
    /// The enclosing element's own text content.
    Value,
}

/// Namespace prefix applied to an element field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    /// The configured default prefix.
    #[default]
    Default,
    /// An explicit prefix.
    Prefix(&'static str),
    /// No prefix at all.
    Bare,
}

/// Declaration-time options for a field.
///
/// A plain `&'static str` converts into a spec with default options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    namespace: Namespace,
    wire_name: Option<&'static str>,
}

impl FieldSpec {
    /// A field with the given declared name and default options.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            namespace: Namespace::Default,
            wire_name: None,
        }
    }

    /// Use an explicit namespace prefix.
    pub const fn namespace(mut self, prefix: &'static str) -> Self {
        self.namespace = Namespace::Prefix(prefix);
        self
    }

    /// Render the element without any prefix.
    pub const fn bare(mut self) -> Self {
        self.namespace = Namespace::Bare;
        self
    }

    /// Use a different name on the wire.
    pub const fn rename(mut self, wire_name: &'static str) -> Self {
        self.wire_name = Some(wire_name);
        self
    }
}

impl From<&'static str> for FieldSpec {
    fn from(name: &'static str) -> Self {
        FieldSpec::new(name)
    }
}

/// Resolved metadata for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared name.
    pub name: &'static str,
    pub placement: Placement,
    pub namespace: Namespace,
    /// Optional wire rename.
    pub wire_name: Option<&'static str>,
    /// Whether the field holds a [`Repeated`] collection.
    pub is_array: bool,
    /// Type name of the nested message, for nested fields.
    pub related_type: Option<&'static str>,
}

impl FieldMeta {
    /// The name used on the wire.
    pub fn wire_name(&self) -> &'static str {
        self.wire_name.unwrap_or(self.name)
    }
}

pub(crate) trait ScalarSlot<T>: Send + Sync {
    /// Rendered texts in position order. Single fields yield nothing when
    /// absent or empty.
    fn texts<'a>(&self, owner: &'a T) -> Vec<Cow<'a, str>>;

    fn assign(&self, owner: &mut T, index: Option<usize>, text: &str)
        -> std::result::Result<(), String>;
}

pub(crate) trait NestedSlot<T>: Send + Sync {
    /// Whether the nested type declares attribute fields. Those go on the
    /// opening tag of this field's element.
    fn emits_as_attributes(&self) -> bool;

    /// One fragment per present nested message, in position order.
    fn emit(&self, owner: &T, serializer: &Serializer) -> Vec<Fragment>;

    fn populate(
        &self,
        owner: &mut T,
        index: Option<usize>,
        nodes: &[XmlNode],
        walk: &mut Walk<'_>,
    ) -> Result<()>;
}

pub(crate) enum Access<T> {
    Scalar(Box<dyn ScalarSlot<T>>),
    Nested(Box<dyn NestedSlot<T>>),
}

struct Single<T, V> {
    get: fn(&T) -> &Option<V>,
    get_mut: fn(&mut T) -> &mut Option<V>,
}

impl<T, V: XmlScalar + 'static> ScalarSlot<T> for Single<T, V> {
    fn texts<'a>(&self, owner: &'a T) -> Vec<Cow<'a, str>> {
        (self.get)(owner)
            .as_ref()
            .map(XmlScalar::to_xml_text)
            .filter(|text| !text.is_empty())
            .into_iter()
            .collect()
    }

    fn assign(
        &self,
        owner: &mut T,
        _index: Option<usize>,
        text: &str,
    ) -> std::result::Result<(), String> {
        *(self.get_mut)(owner) = Some(V::from_xml_text(text)?);
        Ok(())
    }
}

struct Many<T, V> {
    get: fn(&T) -> &Repeated<V>,
    get_mut: fn(&mut T) -> &mut Repeated<V>,
}

impl<T, V: XmlScalar + 'static> ScalarSlot<T> for Many<T, V> {
    fn texts<'a>(&self, owner: &'a T) -> Vec<Cow<'a, str>> {
        (self.get)(owner).iter().map(XmlScalar::to_xml_text).collect()
    }

    fn assign(
        &self,
        owner: &mut T,
        index: Option<usize>,
        text: &str,
    ) -> std::result::Result<(), String> {
        let value = V::from_xml_text(text)?;
        let items = (self.get_mut)(owner);
        let index = index
            .or_else(|| items.next_index())
            .ok_or_else(|| "no position left after the last occupied one".to_string())?;
        items.insert(index, value);
        Ok(())
    }
}

struct Child<T, N> {
    get: fn(&T) -> &Option<N>,
    get_mut: fn(&mut T) -> &mut Option<N>,
}

impl<T, N: XmlMessage> NestedSlot<T> for Child<T, N> {
    fn emits_as_attributes(&self) -> bool {
        has_attributes::<N>()
    }

    fn emit(&self, owner: &T, serializer: &Serializer) -> Vec<Fragment> {
        (self.get)(owner)
            .iter()
            .map(|nested| serializer.emit(nested))
            .collect()
    }

    fn populate(
        &self,
        owner: &mut T,
        _index: Option<usize>,
        nodes: &[XmlNode],
        walk: &mut Walk<'_>,
    ) -> Result<()> {
        let mut nested = N::default();
        walk.populate_object(&mut nested, nodes)?;
        *(self.get_mut)(owner) = Some(nested);
        Ok(())
    }
}

struct Children<T, N> {
    get: fn(&T) -> &Repeated<N>,
    get_mut: fn(&mut T) -> &mut Repeated<N>,
}

impl<T, N: XmlMessage> NestedSlot<T> for Children<T, N> {
    fn emits_as_attributes(&self) -> bool {
        has_attributes::<N>()
    }

    fn emit(&self, owner: &T, serializer: &Serializer) -> Vec<Fragment> {
        (self.get)(owner)
            .iter()
            .map(|nested| serializer.emit(nested))
            .collect()
    }

    fn populate(
        &self,
        owner: &mut T,
        index: Option<usize>,
        nodes: &[XmlNode],
        walk: &mut Walk<'_>,
    ) -> Result<()> {
        let mut nested = N::default();
        walk.populate_object(&mut nested, nodes)?;
        let items = (self.get_mut)(owner);
        match index.or_else(|| items.next_index()) {
            Some(index) => {
                items.insert(index, nested);
            }
            None => warn!(
                message = short_type_name::<N>(),
                "no position left after the last occupied one, item skipped"
            ),
        }
        Ok(())
    }
}

fn has_attributes<N: XmlMessage>() -> bool {
    N::catalog()
        .fields()
        .any(|meta| meta.placement == Placement::Attribute)
}

/// One catalog entry: metadata plus the accessors for the field.
pub(crate) struct Field<T> {
    meta: FieldMeta,
    access: Access<T>,
}

impl<T> Field<T> {
    pub(crate) fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    pub(crate) fn access(&self) -> &Access<T> {
        &self.access
    }
}

/// Field metadata for one message type.
pub struct Catalog<T> {
    type_name: &'static str,
    fields: Vec<Field<T>>,
    /// Lowercased declared and wire names to field position.
    index: HashMap<String, usize>,
    /// Position of the `Value`-placed field, if any.
    value: Option<usize>,
}

impl<T: 'static> Catalog<T> {
    /// Start building a catalog for `T`.
    pub fn builder() -> CatalogBuilder<T> {
        CatalogBuilder {
            type_name: short_type_name::<T>(),
            fields: Vec::new(),
        }
    }
}

impl<T> Catalog<T> {
    /// Short name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Field metadata in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldMeta> {
        self.fields.iter().map(Field::meta)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Field<T>] {
        &self.fields
    }

    pub(crate) fn field(&self, name: &str) -> Option<&Field<T>> {
        self.index
            .get(&name.to_lowercase())
            .map(|position| &self.fields[*position])
    }

    /// The field receiving an element's own text content.
    pub(crate) fn value_field(&self) -> Option<&Field<T>> {
        self.value.map(|position| &self.fields[position])
    }

    /// Case-insensitive lookup by declared or wire name.
    pub fn lookup(&self, name: &str) -> Option<&FieldMeta> {
        self.field(name).map(Field::meta)
    }

    /// The declared name a wire name resolves to.
    pub fn canonical_name(&self, name: &str) -> Option<&'static str> {
        self.lookup(name).map(|meta| meta.name)
    }

    /// Whether the named field is repeated. Unknown names are not.
    pub fn is_array(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|meta| meta.is_array)
    }

    /// Type name of the nested message behind the named field.
    pub fn related_type(&self, name: &str) -> Option<&'static str> {
        self.lookup(name).and_then(|meta| meta.related_type)
    }

    /// Whether the named nested field carries attributes on its opening tag.
    ///
    /// Derived from the nested type's own catalog when asked, so
    /// self-referencing types are fine. Scalar and unknown fields are not.
    pub fn emits_as_attributes(&self, name: &str) -> bool {
        match self.field(name).map(Field::access) {
            Some(Access::Nested(slot)) => slot.emits_as_attributes(),
            _ => false,
        }
    }
}

impl<T> std::fmt::Debug for Catalog<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Catalog`]. Fields are recorded in call order.
///
/// # Example
///
/// ```rust
/// use busbar_soap_mapper::{Catalog, FieldSpec, XmlMessage};
/// use std::sync::OnceLock;
///
/// #[derive(Debug, Default)]
/// struct BasicAmount {
///     currency_id: Option<String>,
///     value: Option<String>,
/// }
///
/// impl XmlMessage for BasicAmount {
///     fn catalog() -> &'static Catalog<Self> {
///         static CATALOG: OnceLock<Catalog<BasicAmount>> = OnceLock::new();
///         CATALOG.get_or_init(|| {
///             Catalog::<BasicAmount>::builder()
///                 .attribute("currencyID", |m| &m.currency_id, |m| &mut m.currency_id)
///                 .value("value", |m| &m.value, |m| &mut m.value)
///                 .build()
///         })
///     }
/// }
///
/// let catalog = BasicAmount::catalog();
/// assert_eq!(catalog.canonical_name("CURRENCYID"), Some("currencyID"));
/// assert!(!catalog.is_array("value"));
/// ```
pub struct CatalogBuilder<T> {
    type_name: &'static str,
    fields: Vec<Field<T>>,
}

impl<T: 'static> CatalogBuilder<T> {
    fn push(
        mut self,
        spec: FieldSpec,
        placement: Placement,
        is_array: bool,
        related_type: Option<&'static str>,
        access: Access<T>,
    ) -> Self {
        self.fields.push(Field {
            meta: FieldMeta {
                name: spec.name,
                placement,
                namespace: spec.namespace,
                wire_name: spec.wire_name,
                is_array,
                related_type,
            },
            access,
        });
        self
    }

    /// A scalar rendered as an attribute of the enclosing element.
    pub fn attribute<V: XmlScalar + 'static>(
        self,
        spec: impl Into<FieldSpec>,
        get: fn(&T) -> &Option<V>,
        get_mut: fn(&mut T) -> &mut Option<V>,
    ) -> Self {
        let access = Access::Scalar(Box::new(Single { get, get_mut }));
        self.push(spec.into(), Placement::Attribute, false, None, access)
    }

    /// A scalar rendered as the enclosing element's own text.
    pub fn value<V: XmlScalar + 'static>(
        self,
        spec: impl Into<FieldSpec>,
        get: fn(&T) -> &Option<V>,
        get_mut: fn(&mut T) -> &mut Option<V>,
    ) -> Self {
        let access = Access::Scalar(Box::new(Single { get, get_mut }));
        self.push(spec.into(), Placement::Value, false, None, access)
    }

    /// A scalar rendered as one child element.
    pub fn element<V: XmlScalar + 'static>(
        self,
        spec: impl Into<FieldSpec>,
        get: fn(&T) -> &Option<V>,
        get_mut: fn(&mut T) -> &mut Option<V>,
    ) -> Self {
        let access = Access::Scalar(Box::new(Single { get, get_mut }));
        self.push(spec.into(), Placement::Element, false, None, access)
    }

    /// Repeated scalars, one child element per value.
    pub fn elements<V: XmlScalar + 'static>(
        self,
        spec: impl Into<FieldSpec>,
        get: fn(&T) -> &Repeated<V>,
        get_mut: fn(&mut T) -> &mut Repeated<V>,
    ) -> Self {
        let access = Access::Scalar(Box::new(Many { get, get_mut }));
        self.push(spec.into(), Placement::Element, true, None, access)
    }

    /// A nested message rendered as one child element.
    pub fn child<N: XmlMessage>(
        self,
        spec: impl Into<FieldSpec>,
        get: fn(&T) -> &Option<N>,
        get_mut: fn(&mut T) -> &mut Option<N>,
    ) -> Self {
        let access = Access::Nested(Box::new(Child { get, get_mut }));
        let related = Some(short_type_name::<N>());
        self.push(spec.into(), Placement::Element, false, related, access)
    }

    /// Repeated nested messages, one child element per value.
    pub fn children<N: XmlMessage>(
        self,
        spec: impl Into<FieldSpec>,
        get: fn(&T) -> &Repeated<N>,
        get_mut: fn(&mut T) -> &mut Repeated<N>,
    ) -> Self {
        let access = Access::Nested(Box::new(Children { get, get_mut }));
        let related = Some(short_type_name::<N>());
        self.push(spec.into(), Placement::Element, true, related, access)
    }

    /// Finish the catalog and build its lookup table.
    pub fn build(self) -> Catalog<T> {
        let mut index = HashMap::with_capacity(self.fields.len() * 2);
        let mut value = None;
        for (position, field) in self.fields.iter().enumerate() {
            let meta = field.meta();
            if meta.placement == Placement::Value {
                if value.is_some() {
                    warn!(
                        message = self.type_name,
                        field = meta.name,
                        "more than one value field in catalog, keeping the first"
                    );
                } else {
                    value = Some(position);
                }
            }
            for key in [meta.name, meta.wire_name()] {
                let key = key.to_lowercase();
                match index.get(&key) {
                    None => {
                        index.insert(key, position);
                    }
                    Some(existing) if *existing != position => {
                        warn!(
                            message = self.type_name,
                            field = meta.name,
                            "duplicate field name in catalog, keeping the first declaration"
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        Catalog {
            type_name: self.type_name,
            fields: self.fields,
            index,
            value,
        }
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
