use tracing::trace;
use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::element::{Element, ElementData, Prefixes, Tree};
use crate::encoding::encoding;
use crate::entity::{normalize_attribute_whitespace, parse_entities};
use crate::error::{Error, ParseError};
use crate::etree::Etree;
use crate::qname::{QName, XML_NAMESPACE};

// an element whose start tag is being read; attributes are resolved once the
// start tag ends, because declarations may follow the attributes that use
// them
struct PendingElement<'a> {
    prefix: &'a str,
    local: &'a str,
    prefixes: Prefixes,
    attributes: Vec<(&'a str, &'a str, String)>,
}

struct OpenElement<'a> {
    element: Element,
    prefix: &'a str,
    local: &'a str,
}

struct TreeBuilder<'a> {
    root: Option<Element>,
    open: Vec<OpenElement<'a>>,
    // declarations per open element, outermost first
    scopes: Vec<Prefixes>,
    pending: Option<PendingElement<'a>>,
}

fn raw_name(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

impl<'a> TreeBuilder<'a> {
    fn new() -> Self {
        TreeBuilder {
            root: None,
            open: Vec::new(),
            scopes: Vec::new(),
            pending: None,
        }
    }

    fn namespace_by_prefix(&self, prefix: &str) -> Option<&str> {
        for scope in self.scopes.iter().rev() {
            if let Some((_, uri)) = scope.iter().rev().find(|(p, _)| p == prefix) {
                return (!uri.is_empty()).then_some(uri.as_str());
            }
        }
        (prefix == "xml").then_some(XML_NAMESPACE)
    }

    fn resolve(&self, prefix: &str, local: &str, is_attribute: bool) -> Result<QName, Error> {
        let namespace = if prefix.is_empty() {
            // unprefixed attributes are never in a namespace
            if is_attribute {
                None
            } else {
                self.namespace_by_prefix("")
            }
        } else {
            Some(
                self.namespace_by_prefix(prefix)
                    .ok_or_else(|| ParseError::UnknownPrefix(prefix.to_string()))?,
            )
        };
        QName::new(namespace, local)
    }

    fn element_start(&mut self, prefix: StrSpan<'a>, local: StrSpan<'a>) -> Result<(), Error> {
        if self.open.is_empty() && self.root.is_some() {
            return Err(ParseError::MultipleRootElements.into());
        }
        self.pending = Some(PendingElement {
            prefix: prefix.as_str(),
            local: local.as_str(),
            prefixes: Prefixes::new(),
            attributes: Vec::new(),
        });
        Ok(())
    }

    fn attribute(
        &mut self,
        prefix: StrSpan<'a>,
        local: StrSpan<'a>,
        value: StrSpan<'a>,
    ) -> Result<(), Error> {
        let (prefix, local) = (prefix.as_str(), local.as_str());
        let value = parse_entities(&normalize_attribute_whitespace(value.as_str()))?.into_owned();
        let pending = match self.pending.as_mut() {
            Some(pending) => pending,
            None => return Ok(()),
        };
        if prefix.is_empty() && local == "xmlns" {
            pending.prefixes.push((String::new(), value));
        } else if prefix == "xmlns" {
            let invalid = local == "xmlns"
                || value.is_empty()
                || (local == "xml") != (value == XML_NAMESPACE);
            if invalid {
                return Err(ParseError::InvalidNamespaceDeclaration(raw_name(prefix, local)).into());
            }
            pending.prefixes.push((local.to_string(), value));
        } else {
            pending.attributes.push((prefix, local, value));
        }
        Ok(())
    }

    // the start tag is complete: resolve names and add the element to the
    // tree. Its declarations stay in scope until the element is closed.
    fn open_element(&mut self, etree: &mut Etree) -> Result<(), Error> {
        let pending = match self.pending.take() {
            Some(pending) => pending,
            None => return Err(ParseError::NoRootElement.into()),
        };
        self.scopes.push(pending.prefixes.clone());
        let mut data = ElementData::new(self.resolve(pending.prefix, pending.local, false)?);
        for (prefix, local, value) in pending.attributes {
            let name = self.resolve(prefix, local, true)?;
            if data.attrib.insert(name, value).is_some() {
                return Err(ParseError::DuplicateAttribute(raw_name(prefix, local)).into());
            }
        }
        data.prefixes = pending.prefixes;
        let element = etree.new_element_data(data);
        match self.open.last() {
            Some(parent) => parent
                .element
                .get()
                .checked_append(element.get(), etree.arena_mut())?,
            None => self.root = Some(element),
        }
        self.open.push(OpenElement {
            element,
            prefix: pending.prefix,
            local: pending.local,
        });
        Ok(())
    }

    fn close_element(&mut self, prefix: &str, local: &str) -> Result<(), Error> {
        let open = match self.open.pop() {
            Some(open) => open,
            None => {
                return Err(ParseError::InvalidCloseTag(String::new(), raw_name(prefix, local)).into())
            }
        };
        self.scopes.pop();
        if open.prefix != prefix || open.local != local {
            return Err(ParseError::InvalidCloseTag(
                raw_name(open.prefix, open.local),
                raw_name(prefix, local),
            )
            .into());
        }
        Ok(())
    }

    fn element_end(&mut self, etree: &mut Etree, end: ElementEnd<'a>) -> Result<(), Error> {
        match end {
            ElementEnd::Open => {
                self.open_element(etree)?;
            }
            ElementEnd::Empty => {
                self.open_element(etree)?;
                self.open.pop();
                self.scopes.pop();
            }
            ElementEnd::Close(prefix, local) => {
                self.close_element(prefix.as_str(), local.as_str())?;
            }
        }
        Ok(())
    }

    // text goes into the text of the current element until it has children,
    // after that into the tail of its last child
    fn text(&mut self, etree: &mut Etree, text: &str) -> Result<(), Error> {
        let current = match self.open.last() {
            Some(open) => open.element,
            None => {
                if text.trim().is_empty() {
                    return Ok(());
                }
                return Err(ParseError::TextOutsideRoot.into());
            }
        };
        let target = match etree.last_child(current) {
            Some(last_child) => &mut etree.data_mut(last_child).tail,
            None => &mut etree.data_mut(current).text,
        };
        target.push_str(text);
        Ok(())
    }

    fn build(&mut self, etree: &mut Etree, xml: &'a str) -> Result<Element, Error> {
        for token in Tokenizer::from(xml) {
            match token? {
                Token::ElementStart { prefix, local, .. } => self.element_start(prefix, local)?,
                Token::Attribute {
                    prefix,
                    local,
                    value,
                    ..
                } => self.attribute(prefix, local, value)?,
                Token::ElementEnd { end, .. } => self.element_end(etree, end)?,
                Token::Text { text } => {
                    let text = parse_entities(text.as_str())?;
                    self.text(etree, &text)?
                }
                Token::Cdata { text, .. } => self.text(etree, text.as_str())?,
                Token::DtdStart { .. }
                | Token::EmptyDtd { .. }
                | Token::EntityDeclaration { .. }
                | Token::DtdEnd { .. } => return Err(ParseError::DtdUnsupported.into()),
                Token::Declaration { .. }
                | Token::ProcessingInstruction { .. }
                | Token::Comment { .. } => {}
            }
        }
        if let Some(pending) = &self.pending {
            return Err(ParseError::UnclosedTag(raw_name(pending.prefix, pending.local)).into());
        }
        if let Some(open) = self.open.last() {
            return Err(ParseError::UnclosedTag(raw_name(open.prefix, open.local)).into());
        }
        self.root.ok_or_else(|| ParseError::NoRootElement.into())
    }
}

/// ## Parsing
///
/// Parsed elements keep the namespace declarations made on them, so they are
/// written again when the tree is serialized. Comments, processing
/// instructions and the XML declaration are dropped. Document type
/// declarations are rejected.
impl Etree {
    /// Parse XML text into a new detached root element.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let root = etree.fromstring(r#"<a xmlns:x="urn:x"><x:b x:c="1">text</x:b>tail</a>"#)?;
    /// let b = etree.child(root, "{urn:x}b").unwrap();
    /// assert_eq!(etree.text(b), "text");
    /// assert_eq!(etree.tail(b), "tail");
    /// assert_eq!(etree.get(b, "{urn:x}c"), "1");
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn fromstring(&mut self, xml: &str) -> Result<Element, Error> {
        let mut builder = TreeBuilder::new();
        match builder.build(self, xml) {
            Ok(root) => {
                trace!(elements = self.iter(root).count(), "parsed tree");
                Ok(root)
            }
            Err(err) => {
                // drop what was built so far
                if let Some(root) = builder.root {
                    root.get().remove_subtree(self.arena_mut());
                }
                trace!(error = %err, "parse failed");
                Err(err)
            }
        }
    }

    /// Parse XML text into a [`Tree`].
    pub fn parse_tree(&mut self, xml: &str) -> Result<Tree, Error> {
        Ok(Tree::new(self.fromstring(xml)?))
    }

    /// Parse XML bytes into a new detached root element.
    ///
    /// The encoding is detected from a byte order mark or the XML
    /// declaration, and defaults to UTF-8.
    pub fn fromstring_bytes(&mut self, bytes: &[u8]) -> Result<Element, Error> {
        let encoding = encoding(bytes)
            .ok_or_else(|| Error::Encoding("cannot detect encoding".to_string()))?;
        let (xml, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(Error::Encoding(format!(
                "input is not valid {}",
                encoding.name()
            )));
        }
        self.fromstring(&xml)
    }
}
