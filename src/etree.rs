use indextree::Arena;

use crate::element::{Element, ElementData};

pub(crate) type ElementArena = Arena<ElementData>;

/// The `Etree` struct owns all element data in your program. It lets you
/// build, navigate, change and serialize one or more XML trees and detached
/// elements.
///
/// Elements are referred to by [`Element`] handles. `Etree` is implemented in
/// several sections focusing on different aspects: creation, read access,
/// value access, manipulation, parsing and serialization.
///
/// ```rust
/// use etree::Etree;
///
/// let mut etree = Etree::new();
/// let root = etree.new_element("root")?;
/// let child = etree.sub_element(root, "{urn:x}child")?;
/// etree.set_text(child, "hi");
/// assert_eq!(
///     etree.tostring(root),
///     r#"<root xmlns:ns0="urn:x"><ns0:child>hi</ns0:child></root>"#
/// );
/// # Ok::<(), etree::Error>(())
/// ```
pub struct Etree {
    pub(crate) arena: ElementArena,
}

impl Etree {
    /// Create a new, empty `Etree`.
    pub fn new() -> Self {
        Etree {
            arena: ElementArena::new(),
        }
    }

    #[inline]
    pub(crate) fn arena(&self) -> &ElementArena {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut ElementArena {
        &mut self.arena
    }

    #[inline]
    pub(crate) fn data(&self, element: Element) -> &ElementData {
        self.arena[element.get()].get()
    }

    #[inline]
    pub(crate) fn data_mut(&mut self, element: Element) -> &mut ElementData {
        self.arena[element.get()].get_mut()
    }
}

impl Default for Etree {
    fn default() -> Self {
        Self::new()
    }
}
