// When we render an element or attribute name, we need to render it with the
// right prefix. This keeps a stack of the prefix declarations in scope while
// walking the tree, so we never have to wander up the tree for a lookup.

use std::borrow::Cow;

use ahash::HashSet;
use tracing::debug;

use crate::element::Element;
use crate::etree::Etree;
use crate::qname::{is_ncname, QName, XML_NAMESPACE};

use super::DEFAULT_PREFIX_STEM;

pub(crate) type Declarations<'a> = Vec<(Cow<'a, str>, Cow<'a, str>)>;

pub(crate) struct FullnameSerializer<'a> {
    stack: Vec<Declarations<'a>>,
}

impl<'a> FullnameSerializer<'a> {
    /// A serializer that starts out with the given declarations in scope.
    /// The `xml` prefix is always in scope.
    pub(crate) fn new(in_scope: Declarations<'a>) -> Self {
        Self {
            stack: vec![
                vec![(Cow::Borrowed("xml"), Cow::Borrowed(XML_NAMESPACE))],
                in_scope,
            ],
        }
    }

    pub(crate) fn push(&mut self, declarations: Declarations<'a>) {
        self.stack.push(declarations);
    }

    pub(crate) fn pop(&mut self) {
        self.stack.pop();
    }

    // all declarations in scope, innermost first
    fn declarations(&self) -> Vec<(&str, &str)> {
        let mut declarations = Vec::new();
        for frame in self.stack.iter().rev() {
            for (prefix, uri) in frame.iter().rev() {
                declarations.push((&**prefix, &**uri));
            }
        }
        declarations
    }

    /// The namespace currently bound to a prefix. An undeclared default
    /// namespace (`xmlns=""`) is no namespace.
    pub(crate) fn namespace_by_prefix(&self, prefix: &str) -> Option<&str> {
        for frame in self.stack.iter().rev() {
            if let Some((_, uri)) = frame.iter().rev().find(|(p, _)| p == prefix) {
                return (!uri.is_empty()).then_some(&**uri);
            }
        }
        None
    }

    // prefixes bound to the namespace that are not shadowed by an inner
    // declaration, innermost first
    fn prefixes_by_namespace(&self, namespace: &str) -> Vec<&str> {
        self.declarations()
            .into_iter()
            .filter(|(prefix, uri)| {
                *uri == namespace && self.namespace_by_prefix(prefix) == Some(namespace)
            })
            .map(|(prefix, _)| prefix)
            .collect()
    }

    // prefer the empty prefix, and if that isn't there, the most recently
    // defined prefix
    fn element_prefix(&self, namespace: &str) -> Option<&str> {
        if self.namespace_by_prefix("") == Some(namespace) {
            Some("")
        } else {
            self.prefixes_by_namespace(namespace).into_iter().next()
        }
    }

    // attributes cannot be unprefixed and still in a namespace
    fn attribute_prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes_by_namespace(namespace)
            .into_iter()
            .find(|prefix| !prefix.is_empty())
    }

    /// Whether a name without namespace would be put into a default
    /// namespace by the declarations in scope.
    pub(crate) fn default_namespace_bound(&self) -> bool {
        self.namespace_by_prefix("").is_some()
    }

    /// The rendered element name, or `None` if no prefix is in scope for
    /// its namespace.
    pub(crate) fn element_fullname<'q>(&self, qname: &'q QName) -> Option<Cow<'q, str>> {
        match qname.namespace() {
            None => Some(Cow::Borrowed(qname.local())),
            Some(namespace) => Some(prefixed(self.element_prefix(namespace)?, qname)),
        }
    }

    /// The rendered attribute name, or `None` if no prefix is in scope for
    /// its namespace.
    pub(crate) fn attribute_fullname<'q>(&self, qname: &'q QName) -> Option<Cow<'q, str>> {
        match qname.namespace() {
            None => Some(Cow::Borrowed(qname.local())),
            Some(namespace) => Some(prefixed(self.attribute_prefix(namespace)?, qname)),
        }
    }
}

fn prefixed<'q>(prefix: &str, qname: &'q QName) -> Cow<'q, str> {
    if prefix.is_empty() {
        Cow::Borrowed(qname.local())
    } else {
        Cow::Owned(format!("{}:{}", prefix, qname.local()))
    }
}

/// The declarations in scope for `element` coming from its ancestors, outer
/// declarations first. They are used for resolution but are not rendered.
pub(crate) fn ancestor_declarations(etree: &Etree, element: Element) -> Declarations<'_> {
    let mut ancestors = etree.ancestors(element).collect::<Vec<_>>();
    ancestors.reverse();
    ancestors
        .into_iter()
        .flat_map(|ancestor| etree.namespace_declarations(ancestor))
        .map(|(prefix, uri)| (Cow::Borrowed(prefix), Cow::Borrowed(uri)))
        .collect()
}

/// The declarations to render on an element, given the scope of its parent.
///
/// These are the declarations made on the element itself, except that a
/// default namespace is undeclared with `xmlns=""` when the element has no
/// namespace but would otherwise inherit or declare one.
pub(crate) fn element_declarations<'a>(
    etree: &'a Etree,
    element: Element,
    fullname_serializer: &FullnameSerializer<'_>,
) -> Declarations<'a> {
    let unnamespaced = etree.qname(element).namespace().is_none();
    let mut declarations: Declarations<'a> = etree
        .namespace_declarations(element)
        .filter(|(prefix, uri)| !(*prefix == "xml" && *uri == XML_NAMESPACE))
        .filter(|(prefix, uri)| !(unnamespaced && prefix.is_empty() && !uri.is_empty()))
        .map(|(prefix, uri)| (Cow::Borrowed(prefix), Cow::Borrowed(uri)))
        .collect();
    let declares_default = declarations.iter().any(|(prefix, _)| prefix.is_empty());
    let inherits_default = fullname_serializer.default_namespace_bound();
    let declared_default_dropped = unnamespaced
        && etree
            .namespace_declarations(element)
            .any(|(prefix, uri)| prefix.is_empty() && !uri.is_empty());
    if unnamespaced && !declares_default && (inherits_default || declared_default_dropped) {
        declarations.push((Cow::Borrowed(""), Cow::Borrowed("")));
    }
    declarations
}

// prefixes starting with xml are reserved
fn is_prefix_stem(stem: &str) -> bool {
    is_ncname(stem) && !stem.to_ascii_lowercase().starts_with("xml")
}

/// Allocate prefixes for all namespaces used in the subtree of `root` that
/// have no prefix in scope where they are used.
///
/// Prefixes are named `{stem}0`, `{stem}1`, ... in order of first use, where
/// an element's own namespace comes before those of its attributes. A prefix
/// already declared in the subtree or its ancestors is skipped. The result is
/// to be declared on `root`.
pub(crate) fn allocate_prefixes<'a>(
    etree: &'a Etree,
    root: Element,
    stem: &str,
) -> Declarations<'a> {
    let stem = if is_prefix_stem(stem) {
        stem
    } else {
        debug!(stem, "unusable prefix stem, using default");
        DEFAULT_PREFIX_STEM
    };
    let in_scope = ancestor_declarations(etree, root);
    let mut taken: HashSet<&str> = in_scope.iter().map(|(prefix, _)| &**prefix).collect();
    taken.insert("xml");
    taken.insert("xmlns");

    let mut fullname_serializer = FullnameSerializer::new(in_scope.clone());
    let mut missing: Vec<&'a str> = Vec::new();
    for edge in root.get().traverse(etree.arena()) {
        match edge {
            indextree::NodeEdge::Start(node_id) => {
                let element = Element::new(node_id);
                let declarations = element_declarations(etree, element, &fullname_serializer);
                fullname_serializer.push(declarations);
                for (prefix, _) in etree.namespace_declarations(element) {
                    taken.insert(prefix);
                }
                let qname = etree.qname(element);
                if fullname_serializer.element_fullname(qname).is_none() {
                    add_missing(&mut missing, qname);
                }
                for (name, _) in etree.attrib(element) {
                    if fullname_serializer.attribute_fullname(name).is_none() {
                        add_missing(&mut missing, name);
                    }
                }
            }
            indextree::NodeEdge::End(_) => {
                fullname_serializer.pop();
            }
        }
    }

    let mut counter = 0usize;
    let mut allocated = Declarations::new();
    for namespace in missing {
        let prefix = loop {
            let candidate = format!("{}{}", stem, counter);
            counter += 1;
            if !taken.contains(candidate.as_str()) {
                break candidate;
            }
        };
        debug!(prefix = %prefix, namespace, "allocated namespace prefix");
        allocated.push((Cow::Owned(prefix), Cow::Borrowed(namespace)));
    }
    allocated
}

fn add_missing<'a>(missing: &mut Vec<&'a str>, qname: &'a QName) {
    if let Some(namespace) = qname.namespace() {
        if !missing.contains(&namespace) {
            missing.push(namespace);
        }
    }
}
