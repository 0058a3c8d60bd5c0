use crate::error::Error;
use crate::qname::{QName, ToQName};

/// The attributes of an element.
///
/// Behaves like an ordered map from [`QName`] to string value. Iteration order
/// is insertion order (for parsed documents: document order). Overwriting an
/// existing attribute keeps its position.
///
/// Lookups are total: a missing attribute, or a key that cannot be parsed as
/// a name, is simply absent.
///
/// Access is linear time, which is fine for the handful of attributes an
/// element typically carries.
///
/// You obtain one through [`Etree::attrib`](crate::Etree::attrib) and
/// [`Etree::attrib_mut`](crate::Etree::attrib_mut).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: Vec<(QName, String)>,
}

impl AttrMap {
    /// An empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: impl ToQName) -> Option<usize> {
        let key = key.to_qname().ok()?;
        self.entries.iter().position(|(name, _)| *name == *key)
    }

    /// Return `true` if the attribute exists.
    pub fn has(&self, key: impl ToQName) -> bool {
        self.position(key).is_some()
    }

    /// The attribute value, or `None` if absent.
    pub fn value(&self, key: impl ToQName) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    /// The attribute value, or the empty string if absent.
    ///
    /// ```rust
    /// use etree::AttrMap;
    ///
    /// let mut attrib = AttrMap::new();
    /// attrib.set("{x}y", "1")?;
    /// assert_eq!(attrib.get("{x}y"), "1");
    /// assert_eq!(attrib.get("missing"), "");
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn get(&self, key: impl ToQName) -> &str {
        self.value(key).unwrap_or("")
    }

    /// The attribute value, or `default` if absent.
    pub fn get_or<'a>(&'a self, key: impl ToQName, default: &'a str) -> &'a str {
        self.value(key).unwrap_or(default)
    }

    /// Set an attribute.
    ///
    /// A new attribute goes to the end of the iteration order; an existing one
    /// is overwritten in place. Fails only if `key` is not a valid name.
    pub fn set(&mut self, key: impl ToQName, value: impl Into<String>) -> Result<(), Error> {
        let key = key.to_qname()?.into_owned();
        self.insert(key, value.into());
        Ok(())
    }

    /// Set a list of attributes in order.
    ///
    /// Later duplicates overwrite earlier ones, keeping the position of the
    /// first insertion. All keys are checked before anything is changed.
    pub fn set_many<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Result<(), Error>
    where
        K: ToQName,
        V: Into<String>,
    {
        let pairs = pairs
            .into_iter()
            .map(|(key, value)| Ok((key.to_qname()?.into_owned(), value.into())))
            .collect::<Result<Vec<_>, Error>>()?;
        for (key, value) in pairs {
            self.insert(key, value);
        }
        Ok(())
    }

    /// Insert with an already valid name, returning the old value if any.
    pub fn insert(&mut self, key: QName, value: String) -> Option<String> {
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove an attribute. Returns `true` if it was present.
    pub fn remove(&mut self, key: impl ToQName) -> bool {
        match self.position(key) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove all attributes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The attribute names in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &QName> + '_ {
        self.entries.iter().map(|(name, _)| name)
    }

    /// The attribute values in iteration order.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(_, value)| value.as_str())
    }

    /// The number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    ///
    /// The iterator borrows the map, so the map cannot be changed while
    /// iterating. To change attributes in a loop, collect the keys first.
    /// Calling `iter` again restarts from the first attribute.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over the attributes of an element. See [`AttrMap::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (QName, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a QName, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name, value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a AttrMap {
    type Item = (&'a QName, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(QName, String)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (QName, String)>>(iter: I) -> Self {
        let mut attrib = AttrMap::new();
        for (key, value) in iter {
            attrib.insert(key, value);
        }
        attrib
    }
}
