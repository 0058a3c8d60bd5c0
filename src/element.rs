use indextree::NodeId;

use crate::attrmap::AttrMap;
use crate::qname::QName;

/// Namespace declarations made on a single element, in declaration order.
///
/// Each entry is `(prefix, uri)`. The empty prefix is the default
/// namespace; an empty uri for the empty prefix undeclares the default
/// namespace (`xmlns=""`).
pub type Prefixes = Vec<(String, String)>;

/// A handle to an element.
///
/// This is a lightweight value and can be copied. All data lives in the
/// [`Etree`](crate::Etree) that created it; pass the handle to its methods to
/// access or change the element. Two handles are equal when they refer to the
/// same element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element(NodeId);

impl Element {
    #[inline]
    pub(crate) fn new(node_id: NodeId) -> Self {
        Element(node_id)
    }

    #[inline]
    pub(crate) fn get(&self) -> NodeId {
        self.0
    }
}

/// A document: a root element without a parent.
///
/// Obtain one with [`Etree::getroottree`](crate::Etree::getroottree) or
/// [`Etree::parse_tree`](crate::Etree::parse_tree). Serializing a tree adds an
/// XML declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tree(Element);

impl Tree {
    #[inline]
    pub(crate) fn new(root: Element) -> Self {
        Tree(root)
    }

    /// The root element of this tree.
    #[inline]
    pub fn root(&self) -> Element {
        self.0
    }
}

/// The data stored for an element in the arena.
#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    pub(crate) qname: QName,
    pub(crate) attrib: AttrMap,
    pub(crate) prefixes: Prefixes,
    pub(crate) text: String,
    pub(crate) tail: String,
}

impl ElementData {
    pub(crate) fn new(qname: QName) -> Self {
        ElementData {
            qname,
            attrib: AttrMap::new(),
            prefixes: Prefixes::new(),
            text: String::new(),
            tail: String::new(),
        }
    }
}
