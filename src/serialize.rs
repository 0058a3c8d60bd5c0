use std::io::Write;

use crate::error::Error;
use crate::etree::Etree;
use crate::output::{Parameters, Serializable, XmlSerializer};

/// ## Serialization
///
/// Namespace prefixes are resolved against the declarations in scope: those
/// made in the serialized subtree, and those made on the ancestors of its top
/// element. Ancestor declarations are used but not repeated in the output.
///
/// A namespace without any prefix in scope gets a generated prefix (`ns0`,
/// `ns1`, ... by default), declared on the top element. Numbering starts
/// over for every call, so the same element may get different prefixes when
/// serialized on its own or as part of a larger tree.
impl Etree {
    /// Serialize an element or a tree to a string.
    ///
    /// An element serializes as a fragment without XML declaration, trailing
    /// newline or its own tail. A [`Tree`](crate::Tree) gets an XML
    /// declaration and a trailing newline.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let name = etree.new_element("name")?;
    /// etree.set_text(name, "David");
    /// etree.attrib_mut(name).set_many([("{urn:foo}x", "1"), ("{urn:bar}y", "2")])?;
    /// assert_eq!(
    ///     etree.tostring(name),
    ///     r#"<name xmlns:ns0="urn:foo" xmlns:ns1="urn:bar" ns0:x="1" ns1:y="2">David</name>"#
    /// );
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn tostring(&self, item: impl Serializable) -> String {
        self.tostring_with(&item, &item.default_parameters())
    }

    /// Serialize with explicit [`Parameters`].
    pub fn tostring_with(&self, item: &impl Serializable, parameters: &Parameters) -> String {
        let mut out = String::new();
        XmlSerializer::new(self, item.top(), parameters).serialize(&mut out);
        out
    }

    /// Serialize to a writer, with the same output as
    /// [`Etree::tostring`].
    pub fn write(&self, item: impl Serializable, w: &mut impl Write) -> Result<(), Error> {
        w.write_all(self.tostring(item).as_bytes())?;
        Ok(())
    }
}
