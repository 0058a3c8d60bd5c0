//! Serialization of elements and trees to XML text.
//!
//! Use [`Etree::tostring`](crate::Etree::tostring) for the defaults, or
//! [`Etree::tostring_with`](crate::Etree::tostring_with) with
//! [`Parameters`] to control the output.
mod fullname;
mod xml_serializer;

pub(crate) use fullname::{element_declarations, FullnameSerializer};
pub(crate) use xml_serializer::XmlSerializer;

use crate::element::{Element, Tree};

/// The namespace bound to the `xmlns` prefix. It can never be declared.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

pub(crate) const DEFAULT_PREFIX_STEM: &str = "ns";

/// Parameters that control serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    /// Emit `<?xml version="1.0"?>` and a newline before the root element.
    pub declaration: bool,
    /// Emit a newline after the root element.
    pub trailing_newline: bool,
    /// Emit the tail of the serialized element after its end tag.
    pub with_tail: bool,
    /// Generated namespace prefixes are this stem followed by a number.
    ///
    /// The stem must be a name without colon that does not start with `xml`
    /// in any case. Otherwise `ns` is used.
    pub prefix_stem: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            declaration: false,
            trailing_newline: false,
            with_tail: false,
            prefix_stem: DEFAULT_PREFIX_STEM.to_string(),
        }
    }
}

impl Parameters {
    /// The parameters for serializing a whole document: with XML declaration
    /// and trailing newline.
    pub fn document() -> Self {
        Self {
            declaration: true,
            trailing_newline: true,
            ..Self::default()
        }
    }
}

/// Something that can be serialized: an [`Element`] or a [`Tree`].
pub trait Serializable {
    /// The element at the top of the output.
    fn top(&self) -> Element;

    /// The parameters used by [`Etree::tostring`](crate::Etree::tostring).
    fn default_parameters(&self) -> Parameters;
}

impl Serializable for Element {
    fn top(&self) -> Element {
        *self
    }

    fn default_parameters(&self) -> Parameters {
        Parameters::default()
    }
}

impl Serializable for Tree {
    fn top(&self) -> Element {
        self.root()
    }

    fn default_parameters(&self) -> Parameters {
        Parameters::document()
    }
}
