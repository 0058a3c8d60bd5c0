use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use xmlparser::XmlCharExt;

use crate::error::Error;

/// The namespace bound to the `xml` prefix. It never needs declaring.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A qualified name: a local name, optionally in a namespace.
///
/// The textual form is `{uri}local` for names in a namespace, and just
/// `local` for names without one. Prefixes are not part of a name; they are
/// resolved against the tree when serializing.
///
/// Names compare and order by `(namespace, local)`.
///
/// ```rust
/// use etree::QName;
///
/// let name: QName = "{urn:foo}bar".parse()?;
/// assert_eq!(name.namespace(), Some("urn:foo"));
/// assert_eq!(name.local(), "bar");
/// assert_eq!(name.to_string(), "{urn:foo}bar");
/// # Ok::<(), etree::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QName {
    namespace: Option<String>,
    local: String,
}

impl QName {
    /// Create a name from its parts.
    ///
    /// An empty namespace means no namespace. The local name must be an XML
    /// name without a colon.
    pub fn new(namespace: Option<&str>, local: &str) -> Result<Self, Error> {
        check_local(local).map_err(|_| Error::MalformedQName(local.to_string()))?;
        let namespace = namespace.filter(|ns| !ns.is_empty());
        if let Some(ns) = namespace {
            if ns.contains(['{', '}']) {
                return Err(Error::MalformedQName(format!("{{{}}}{}", ns, local)));
            }
        }
        Ok(Self {
            namespace: namespace.map(|ns| ns.to_string()),
            local: local.to_string(),
        })
    }

    /// Parse `local` or `{uri}local`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let malformed = || Error::MalformedQName(s.to_string());
        if let Some(rest) = s.strip_prefix('{') {
            let (namespace, local) = rest.split_once('}').ok_or_else(malformed)?;
            if namespace.contains('{') {
                return Err(malformed());
            }
            check_local(local).map_err(|_| malformed())?;
            Ok(Self {
                namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
                local: local.to_string(),
            })
        } else {
            check_local(s).map_err(|_| malformed())?;
            Ok(Self {
                namespace: None,
                local: s.to_string(),
            })
        }
    }

    /// The local part of the name.
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The namespace URI, if the name is in a namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The namespace URI, or the empty string if there is none.
    pub fn ns(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }

    /// A name with the same namespace and a new local part.
    pub fn with_local(&self, local: &str) -> Result<Self, Error> {
        check_local(local).map_err(|_| Error::MalformedQName(local.to_string()))?;
        Ok(Self {
            namespace: self.namespace.clone(),
            local: local.to_string(),
        })
    }
}

// a name without colon, usable as local part or prefix
pub(crate) fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first != ':' && first.is_xml_name_start() => {
            chars.all(|c| c != ':' && c.is_xml_name())
        }
        _ => false,
    }
}

fn check_local(local: &str) -> Result<(), ()> {
    if is_ncname(local) {
        Ok(())
    } else {
        Err(())
    }
}

impl Display for QName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

impl FromStr for QName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QName::parse(s)
    }
}

impl TryFrom<&str> for QName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        QName::parse(s)
    }
}

impl PartialEq<str> for QName {
    fn eq(&self, other: &str) -> bool {
        match QName::parse(other) {
            Ok(other) => *self == other,
            Err(_) => false,
        }
    }
}

impl PartialEq<&str> for QName {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Anything that can name an element or attribute.
///
/// Implemented for strings (parsed as `local` or `{uri}local`) and for
/// [`QName`] itself, so every API taking a name accepts either.
pub trait ToQName {
    /// Convert to a name, borrowing when possible.
    fn to_qname(&self) -> Result<Cow<'_, QName>, Error>;
}

impl ToQName for QName {
    fn to_qname(&self) -> Result<Cow<'_, QName>, Error> {
        Ok(Cow::Borrowed(self))
    }
}

impl ToQName for str {
    fn to_qname(&self) -> Result<Cow<'_, QName>, Error> {
        QName::parse(self).map(Cow::Owned)
    }
}

impl ToQName for String {
    fn to_qname(&self) -> Result<Cow<'_, QName>, Error> {
        self.as_str().to_qname()
    }
}

impl<T: ToQName + ?Sized> ToQName for &T {
    fn to_qname(&self) -> Result<Cow<'_, QName>, Error> {
        (**self).to_qname()
    }
}
