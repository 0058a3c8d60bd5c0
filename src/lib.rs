#![forbid(unsafe_code)]

//! An in-memory XML element tree with namespace support.
//!
//! All elements live in an [`Etree`]. You refer to them with [`Element`]
//! handles, and use methods on `Etree` to read and change them. An element
//! has a namespace-qualified name ([`QName`]), ordered attributes
//! ([`AttrMap`]), text before its first child, and a tail: the text after its
//! end tag.
//!
//! Names are written in Clark notation, `{uri}local`, or as a plain `local`
//! name without namespace. Prefixes are a concern of serialization only:
//! declarations made on parsed elements are kept, and any namespace without a
//! prefix in scope gets a generated one.
//!
//! ```rust
//! use etree::Etree;
//!
//! let mut etree = Etree::new();
//! let root = etree.fromstring(r#"<doc xmlns:a="urn:a"><a:p>one</a:p>x</doc>"#)?;
//! let note = etree.sub_element(root, "{urn:b}note")?;
//! etree.set(note, "{urn:a}id", "n1")?;
//! assert_eq!(
//!     etree.tostring(root),
//!     r#"<doc xmlns:a="urn:a" xmlns:ns0="urn:b"><a:p>one</a:p>x<ns0:note a:id="n1"/></doc>"#
//! );
//! # Ok::<(), etree::Error>(())
//! ```

mod access;
mod attrmap;
mod creation;
mod element;
mod encoding;
mod entity;
mod error;
mod etree;
mod manipulation;
pub mod output;
mod parse;
mod qname;
mod serialize;
mod valueaccess;

#[cfg(feature = "proptest")]
pub mod proptest;
#[cfg(all(test, not(feature = "proptest")))]
mod proptest;

pub use attrmap::{AttrMap, Iter as AttrIter};
pub use element::{Element, Prefixes, Tree};
pub use error::{Error, ParseError};
pub use etree::Etree;
pub use output::{Parameters, Serializable, XMLNS_NAMESPACE};
pub use qname::{QName, ToQName, XML_NAMESPACE};
