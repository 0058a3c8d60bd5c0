use crate::element::{Element, ElementData};
use crate::error::Error;
use crate::etree::Etree;
use crate::qname::ToQName;

/// Creation of new elements.
///
/// New elements are detached: they have no parent until you append them
/// somewhere.
impl Etree {
    pub(crate) fn new_element_data(&mut self, data: ElementData) -> Element {
        Element::new(self.arena_mut().new_node(data))
    }

    /// Create a new detached element.
    ///
    /// The name is either a [`QName`](crate::QName) or a string of the form
    /// `local` or `{uri}local`.
    pub fn new_element(&mut self, qname: impl ToQName) -> Result<Element, Error> {
        let qname = qname.to_qname()?.into_owned();
        Ok(self.new_element_data(ElementData::new(qname)))
    }

    /// Create a new detached element with attributes.
    ///
    /// The attributes are set in the given order, with the semantics of
    /// [`AttrMap::set_many`](crate::AttrMap::set_many).
    ///
    /// ```rust
    /// use etree::Etree;
    ///
    /// let mut etree = Etree::new();
    /// let x = etree.new_element_with("x", [("a", "b"), ("c", "d")])?;
    /// assert_eq!(etree.attrib(x).get("a"), "b");
    /// assert!(!etree.attrib(x).has("b"));
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn new_element_with<K, V>(
        &mut self,
        qname: impl ToQName,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Element, Error>
    where
        K: ToQName,
        V: Into<String>,
    {
        let mut data = ElementData::new(qname.to_qname()?.into_owned());
        data.attrib.set_many(attributes)?;
        Ok(self.new_element_data(data))
    }

    /// Create a new element and append it to `parent`.
    pub fn sub_element(&mut self, parent: Element, qname: impl ToQName) -> Result<Element, Error> {
        let child = self.new_element(qname)?;
        self.append(parent, child)?;
        Ok(child)
    }

    /// Create a detached deep copy of an element and its descendants.
    ///
    /// The copy keeps text, tail, attributes and the namespace declarations
    /// made on the copied elements themselves. Declarations inherited from
    /// ancestors are not copied; serialization creates prefixes as needed.
    pub fn deepcopy(&mut self, element: Element) -> Element {
        let copy = self.new_element_data(self.data(element).clone());
        let children = self.children(element).collect::<Vec<_>>();
        for child in children {
            let child_copy = self.deepcopy(child);
            copy.get().append(child_copy.get(), self.arena_mut());
        }
        copy
    }
}
