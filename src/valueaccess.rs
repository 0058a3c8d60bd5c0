use crate::attrmap::AttrMap;
use crate::element::Element;
use crate::error::Error;
use crate::etree::Etree;
use crate::qname::{is_ncname, QName, ToQName, XML_NAMESPACE};

/// ## Element values
///
/// Access and change the name, text, tail, attributes and namespace
/// declarations of an element.
impl Etree {
    /// The full name of the element, namespace included.
    pub fn qname(&self, element: Element) -> &QName {
        &self.data(element).qname
    }

    /// Replace the full name of the element.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let e = etree.new_element("x")?;
    /// etree.set_qname(e, "{x}y")?;
    /// assert_eq!(etree.qname(e).to_string(), "{x}y");
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn set_qname(&mut self, element: Element, qname: impl ToQName) -> Result<(), Error> {
        let qname = qname.to_qname()?.into_owned();
        self.data_mut(element).qname = qname;
        Ok(())
    }

    /// The local part of the element name.
    pub fn tag(&self, element: Element) -> &str {
        self.data(element).qname.local()
    }

    /// Rename the element, keeping its namespace.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let e = etree.new_element("{x}y")?;
    /// etree.set_tag(e, "z")?;
    /// assert_eq!(etree.tag(e), "z");
    /// assert_eq!(etree.ns(e), "x");
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn set_tag(&mut self, element: Element, local: &str) -> Result<(), Error> {
        let qname = self.data(element).qname.with_local(local)?;
        self.data_mut(element).qname = qname;
        Ok(())
    }

    /// The namespace URI of the element, or the empty string.
    pub fn ns(&self, element: Element) -> &str {
        self.data(element).qname.ns()
    }

    /// The text directly inside the element, before its first child.
    /// The empty string means there is no text.
    pub fn text(&self, element: Element) -> &str {
        &self.data(element).text
    }

    /// Set the text. Setting the empty string removes the text.
    pub fn set_text(&mut self, element: Element, text: impl Into<String>) {
        self.data_mut(element).text = text.into();
    }

    /// The text after the element's end tag, up to the next sibling.
    pub fn tail(&self, element: Element) -> &str {
        &self.data(element).tail
    }

    /// Set the tail. Setting the empty string removes the tail.
    pub fn set_tail(&mut self, element: Element, tail: impl Into<String>) {
        self.data_mut(element).tail = tail.into();
    }

    /// The attributes of the element.
    pub fn attrib(&self, element: Element) -> &AttrMap {
        &self.data(element).attrib
    }

    /// The attributes of the element, for changing them.
    pub fn attrib_mut(&mut self, element: Element) -> &mut AttrMap {
        &mut self.data_mut(element).attrib
    }

    /// Shortcut for `attrib(element).get(key)`.
    pub fn get(&self, element: Element, key: impl ToQName) -> &str {
        self.attrib(element).get(key)
    }

    /// Shortcut for `attrib_mut(element).set(key, value)`.
    pub fn set(
        &mut self,
        element: Element,
        key: impl ToQName,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        self.attrib_mut(element).set(key, value)
    }

    /// The namespace declarations made on this element itself, as
    /// `(prefix, uri)` pairs in declaration order. The empty prefix is the
    /// default namespace.
    pub fn namespace_declarations(
        &self,
        element: Element,
    ) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.data(element)
            .prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Declare a namespace prefix on an element.
    ///
    /// Serialization uses declared prefixes for names in that namespace
    /// instead of inventing `ns0`-style prefixes. The empty prefix declares
    /// the default namespace; an empty uri with the empty prefix undeclares
    /// it. Redeclaring a prefix on the same element replaces its uri.
    pub fn declare_namespace(
        &mut self,
        element: Element,
        prefix: &str,
        uri: &str,
    ) -> Result<(), Error> {
        check_prefix(prefix, uri)?;
        let prefixes = &mut self.data_mut(element).prefixes;
        match prefixes.iter_mut().find(|(p, _)| p == prefix) {
            Some((_, existing)) => *existing = uri.to_string(),
            None => prefixes.push((prefix.to_string(), uri.to_string())),
        }
        Ok(())
    }

    /// Remove a namespace declaration from an element. Returns `true` if it
    /// was declared there.
    ///
    /// Names that relied on it get a generated prefix on serialization.
    pub fn undeclare_namespace(&mut self, element: Element, prefix: &str) -> bool {
        let prefixes = &mut self.data_mut(element).prefixes;
        let before = prefixes.len();
        prefixes.retain(|(p, _)| p != prefix);
        prefixes.len() != before
    }

    /// The namespace prefixes in scope for an element, resolved over its
    /// ancestors and itself. Inner declarations win; the default namespace
    /// is listed under the empty prefix. The `xml` prefix is implicit and not
    /// listed.
    pub fn namespaces_in_scope(&self, element: Element) -> Vec<(&str, &str)> {
        let mut chain = self.ancestors(element).collect::<Vec<_>>();
        chain.reverse();
        chain.push(element);
        let mut in_scope: Vec<(&str, &str)> = Vec::new();
        for e in chain {
            for (prefix, uri) in self.namespace_declarations(e) {
                in_scope.retain(|(p, _)| *p != prefix);
                if !uri.is_empty() {
                    in_scope.push((prefix, uri));
                }
            }
        }
        in_scope
    }
}

pub(crate) fn check_prefix(prefix: &str, uri: &str) -> Result<(), Error> {
    let invalid = || Error::InvalidPrefix(prefix.to_string());
    if prefix == "xmlns" || uri == crate::output::XMLNS_NAMESPACE {
        return Err(invalid());
    }
    if (prefix == "xml") != (uri == XML_NAMESPACE) {
        return Err(invalid());
    }
    if !prefix.is_empty() && uri.is_empty() {
        return Err(invalid());
    }
    if !prefix.is_empty() && !is_ncname(prefix) {
        return Err(invalid());
    }
    Ok(())
}
