use std::fmt::{Display, Formatter};

/// An error raised while parsing XML text into a tree.
#[derive(Debug)]
pub enum ParseError {
    /// The tokenizer rejected the input.
    XmlParser(xmlparser::Error),
    /// A prefix was used without being declared.
    UnknownPrefix(String),
    /// A close tag does not match the open tag. Holds the open and the close
    /// name as they were written.
    InvalidCloseTag(String, String),
    /// The same attribute (after namespace resolution) appears twice.
    DuplicateAttribute(String),
    /// The input ended while this element was still open.
    UnclosedTag(String),
    /// The input has no root element.
    NoRootElement,
    /// The input has a second element at the top level.
    MultipleRootElements,
    /// Non-whitespace text appears outside the root element.
    TextOutsideRoot,
    /// Document type declarations are not supported.
    DtdUnsupported,
    /// An entity reference is not terminated by `;`.
    UnclosedEntity(String),
    /// An entity reference is not one of the predefined entities or a valid
    /// character reference.
    InvalidEntity(String),
    /// A namespace declaration is not allowed, such as binding `xmlns`.
    InvalidNamespaceDeclaration(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::XmlParser(e) => write!(f, "{}", e),
            ParseError::UnknownPrefix(prefix) => write!(f, "unknown prefix: {}", prefix),
            ParseError::InvalidCloseTag(open, close) => {
                write!(f, "close tag </{}> does not match <{}>", close, open)
            }
            ParseError::DuplicateAttribute(name) => write!(f, "duplicate attribute: {}", name),
            ParseError::UnclosedTag(name) => write!(f, "unclosed element: {}", name),
            ParseError::NoRootElement => write!(f, "no root element"),
            ParseError::MultipleRootElements => write!(f, "more than one root element"),
            ParseError::TextOutsideRoot => write!(f, "text outside of root element"),
            ParseError::DtdUnsupported => write!(f, "DTD is not supported"),
            ParseError::UnclosedEntity(entity) => write!(f, "unclosed entity: {}", entity),
            ParseError::InvalidEntity(entity) => write!(f, "invalid entity: {}", entity),
            ParseError::InvalidNamespaceDeclaration(decl) => {
                write!(f, "invalid namespace declaration: {}", decl)
            }
        }
    }
}

/// Etree errors.
#[derive(Debug)]
pub enum Error {
    /// Appending or inserting would make an element its own descendant.
    CyclicalTree,
    /// A string could not be parsed as `local` or `{uri}local`.
    MalformedQName(String),
    /// A namespace prefix is reserved or malformed.
    InvalidPrefix(String),
    /// XML text could not be parsed.
    Parse(ParseError),
    /// Bytes could not be decoded into text.
    Encoding(String),
    /// Writing serialized output failed.
    Io(std::io::Error),
    /// Arena linkage failed.
    Node(indextree::NodeError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CyclicalTree => write!(f, "element cannot be its own descendant"),
            Error::MalformedQName(s) => write!(f, "malformed qualified name: {:?}", s),
            Error::InvalidPrefix(s) => write!(f, "invalid namespace prefix: {:?}", s),
            Error::Parse(e) => write!(f, "parse error: {}", e),
            Error::Encoding(s) => write!(f, "cannot decode input: {}", s),
            Error::Io(e) => write!(f, "{}", e),
            Error::Node(e) => write!(f, "arena error: {:?}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(ParseError::XmlParser(e)) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// The underlying parse error, if this is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    #[inline]
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<xmlparser::Error> for Error {
    #[inline]
    fn from(e: xmlparser::Error) -> Self {
        Error::Parse(ParseError::XmlParser(e))
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<indextree::NodeError> for Error {
    #[inline]
    fn from(e: indextree::NodeError) -> Self {
        Error::Node(e)
    }
}
