//! Proptest support for etree
//!
//! Proptests allow you to test for *properties* of your code that must hold
//! for arbitrary data. This module helps you write a proptest by letting you
//! generate an arbitrary element tree.
//!
//! This can be enabled by adding the `proptest` feature to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! etree = { version = "0.1", features = ["proptest"] }
//! ```
//!
//! See the [`proptest`](https://docs.rs/proptest/latest/proptest/)
//! documentation for more information.

use ahash::HashSet;
use proptest::prelude::*;

use crate::element::{Element, ElementData};
use crate::error::Error;
use crate::etree::Etree;
use crate::qname::QName;

const NAMESPACES: &[Option<&str>] = &[None, Some("http://example.com/x"), Some("http://example.com/y")];
const ELEMENT_NAMES: &[&str] = &["a", "b", "c", "d", "e"];
const ATTRIBUTE_NAMES: &[&str] = &["q", "r", "s"];
const TEXT: &str = "[a-z &<>\"'\n\t\r]{0,8}";

/// A fixed representation of an element and its descendants.
///
/// Unlike elements in an [`Etree`] this is a plain value that you can create
/// and store separately. Turn it into an element with
/// [`FixedElement::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedElement {
    /// Name of the element
    pub qname: QName,
    /// Attributes in order; keys are unique
    pub attributes: Vec<(QName, String)>,
    /// Text before the first child
    pub text: String,
    /// Text after the end tag
    pub tail: String,
    /// Children
    pub children: Vec<FixedElement>,
}

impl FixedElement {
    /// Create a detached element in `etree` from this fixed representation.
    pub fn build(&self, etree: &mut Etree) -> Result<Element, Error> {
        let mut data = ElementData::new(self.qname.clone());
        for (name, value) in &self.attributes {
            data.attrib.insert(name.clone(), value.clone());
        }
        data.text = self.text.clone();
        data.tail = self.tail.clone();
        let element = etree.new_element_data(data);
        for child in &self.children {
            let child = child.build(etree)?;
            etree.append(element, child)?;
        }
        Ok(element)
    }
}

fn arb_qname(names: &'static [&'static str]) -> impl Strategy<Value = QName> {
    (
        prop::sample::select(NAMESPACES),
        prop::sample::select(names),
    )
        .prop_filter_map("valid name", |(namespace, local)| {
            QName::new(namespace, local).ok()
        })
}

fn arb_attributes() -> impl Strategy<Value = Vec<(QName, String)>> {
    prop::collection::vec((arb_qname(ATTRIBUTE_NAMES), TEXT), 0..4)
        .prop_map(|attributes| unduplicate_attributes(&attributes))
}

fn unduplicate_attributes(attributes: &[(QName, String)]) -> Vec<(QName, String)> {
    let mut seen = HashSet::default();
    attributes
        .iter()
        .filter(|(name, _)| seen.insert(name.clone()))
        .cloned()
        .collect()
}

/// Generate a random element tree.
///
/// Names come from a small pool in two namespaces and no namespace, so
/// generated trees need namespace prefixes and reuse them.
pub fn arb_element() -> impl Strategy<Value = FixedElement> {
    let leaf = (arb_qname(ELEMENT_NAMES), arb_attributes(), TEXT, TEXT).prop_map(
        |(qname, attributes, text, tail)| FixedElement {
            qname,
            attributes,
            text,
            tail,
            children: vec![],
        },
    );

    leaf.prop_recursive(
        4,  // levels deep
        64, // maximum size of 64 elements
        6,  // up to 6 children per element
        |inner| {
            (
                arb_qname(ELEMENT_NAMES),
                arb_attributes(),
                TEXT,
                TEXT,
                prop::collection::vec(inner, 0..6),
            )
                .prop_map(|(qname, attributes, text, tail, children)| FixedElement {
                    qname,
                    attributes,
                    text,
                    tail,
                    children,
                })
        },
    )
}
