use crate::element::{Element, Tree};
use crate::etree::Etree;
use crate::qname::{QName, ToQName};

/// ## Navigation
impl Etree {
    /// Get the parent element.
    ///
    /// Returns [`None`] for detached elements and tree roots.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let root = etree.fromstring("<p><em/></p>")?;
    /// let em = etree.child(root, "em").unwrap();
    /// assert_eq!(etree.parent(em), Some(root));
    /// assert_eq!(etree.parent(root), None);
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn parent(&self, element: Element) -> Option<Element> {
        self.arena()[element.get()].parent().map(Element::new)
    }

    /// Iterate over the direct children in document order.
    pub fn children(&self, element: Element) -> impl Iterator<Item = Element> + '_ {
        element.get().children(self.arena()).map(Element::new)
    }

    /// The number of direct children.
    pub fn child_count(&self, element: Element) -> usize {
        self.children(element).count()
    }

    /// The first child, if any.
    pub fn first_child(&self, element: Element) -> Option<Element> {
        self.arena()[element.get()].first_child().map(Element::new)
    }

    /// The last child, if any.
    pub fn last_child(&self, element: Element) -> Option<Element> {
        self.arena()[element.get()].last_child().map(Element::new)
    }

    /// The sibling immediately before this element.
    pub fn previous_sibling(&self, element: Element) -> Option<Element> {
        self.arena()[element.get()]
            .previous_sibling()
            .map(Element::new)
    }

    /// The sibling immediately after this element.
    pub fn next_sibling(&self, element: Element) -> Option<Element> {
        self.arena()[element.get()].next_sibling().map(Element::new)
    }

    /// Iterate over the ancestors of an element, nearest first. The element
    /// itself is not included.
    pub fn ancestors(&self, element: Element) -> impl Iterator<Item = Element> + '_ {
        element
            .get()
            .ancestors(self.arena())
            .skip(1)
            .map(Element::new)
    }

    /// Iterate over an element and all its descendants in document order.
    pub fn iter(&self, element: Element) -> impl Iterator<Item = Element> + '_ {
        element.get().descendants(self.arena()).map(Element::new)
    }

    /// Return `true` if `ancestor` is a proper ancestor of `element`.
    pub fn is_ancestor(&self, ancestor: Element, element: Element) -> bool {
        self.ancestors(element).any(|a| a == ancestor)
    }

    /// The tree this element is part of, rooted at its topmost ancestor.
    pub fn getroottree(&self, element: Element) -> Tree {
        Tree::new(self.ancestors(element).last().unwrap_or(element))
    }

    /// The first direct child with the given name.
    ///
    /// A name that cannot be parsed matches nothing.
    pub fn child(&self, element: Element, key: impl ToQName) -> Option<Element> {
        let key = key.to_qname().ok()?;
        self.children(element)
            .find(|&child| self.data(child).qname == *key)
    }

    /// Find the first element matching a path.
    ///
    /// A path is a `/`-separated list of child names, each `local` or
    /// `{uri}local`. A `/` inside braces belongs to the namespace URI. The
    /// segment `*` matches any child and `.` stays on the current element.
    /// Matches are returned in document order of the steps taken.
    ///
    /// Paths with an empty segment match nothing. That includes the empty
    /// path, absolute paths like `/a` and `a//b`.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let root = etree.fromstring(
    ///     r#"<a xmlns:x="http://example.com/x"><b><x:c>1</x:c></b></a>"#,
    /// )?;
    /// let c = etree.find(root, "b/{http://example.com/x}c").unwrap();
    /// assert_eq!(etree.text(c), "1");
    /// assert!(etree.find(root, "b/c").is_none());
    /// # Ok::<(), etree::Error>(())
    /// ```
    pub fn find(&self, element: Element, path: &str) -> Option<Element> {
        self.findall(element, path).into_iter().next()
    }

    /// Find all elements matching a path, in document order of the steps
    /// taken. See [`Etree::find`].
    pub fn findall(&self, element: Element, path: &str) -> Vec<Element> {
        let Some(steps) = parse_path(path) else {
            return Vec::new();
        };
        let mut current = vec![element];
        for step in steps {
            current = match step {
                Step::Current => current,
                Step::Any => current
                    .into_iter()
                    .flat_map(|e| self.children(e))
                    .collect(),
                Step::Name(name) => current
                    .into_iter()
                    .flat_map(|e| self.children(e))
                    .filter(|&child| self.data(child).qname == name)
                    .collect(),
            };
            if current.is_empty() {
                break;
            }
        }
        current
    }
}

enum Step {
    Current,
    Any,
    Name(QName),
}

// split on '/' outside of braces
fn split_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in path.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                segments.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&path[start..]);
    segments
}

fn parse_path(path: &str) -> Option<Vec<Step>> {
    split_path(path)
        .into_iter()
        .map(|segment| match segment {
            "" => None,
            "." => Some(Step::Current),
            "*" => Some(Step::Any),
            _ => QName::parse(segment).ok().map(Step::Name),
        })
        .collect()
}
