use tracing::{debug, instrument};

use crate::element::Element;
use crate::error::Error;
use crate::etree::Etree;

/// ## Manipulation
///
/// Changing the tree structure. The structure is always a forest: an element
/// can never become its own descendant, and each element has at most one
/// parent.
///
/// Moving an element carries its subtree along, together with its text and
/// tail. Only [`Etree::remove`] leaves a tail behind in the parent's content.
impl Etree {
    /// Append a child to the end of the children of `parent`.
    ///
    /// If `child` already has a parent it is unlinked there first, so
    /// appending a child to its own parent moves it to the end. Text and tail
    /// are never changed.
    ///
    /// Returns [`Error::CyclicalTree`] if `child` is `parent` or one of its
    /// ancestors; the tree is unchanged in that case.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let root = etree.new_element("root")?;
    /// let child = etree.new_element("child")?;
    /// etree.append(root, child)?;
    /// etree.append(root, child)?;
    /// assert_eq!(etree.child_count(root), 1);
    /// assert!(etree.append(child, root).is_err());
    /// # Ok::<(), etree::Error>(())
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn append(&mut self, parent: Element, child: Element) -> Result<(), Error> {
        self.cycle_check(parent, child)?;
        child.get().detach(self.arena_mut());
        parent.get().checked_append(child.get(), self.arena_mut())?;
        Ok(())
    }

    /// Insert a child at position `index` among the children of `parent`.
    ///
    /// The index is counted after `child` has been unlinked from its current
    /// place, and is clamped to the number of children.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, parent: Element, index: usize, child: Element) -> Result<(), Error> {
        self.cycle_check(parent, child)?;
        child.get().detach(self.arena_mut());
        let reference = self.children(parent).nth(index);
        match reference {
            Some(reference) => reference
                .get()
                .checked_insert_before(child.get(), self.arena_mut())?,
            None => parent.get().checked_append(child.get(), self.arena_mut())?,
        }
        Ok(())
    }

    /// Append several children in order.
    pub fn extend(
        &mut self,
        parent: Element,
        children: impl IntoIterator<Item = Element>,
    ) -> Result<(), Error> {
        for child in children {
            self.append(parent, child)?;
        }
        Ok(())
    }

    /// Remove an element from its parent.
    ///
    /// The element and its subtree become a detached tree that can be
    /// appended elsewhere. Removing an element without parent does nothing.
    ///
    /// If the element has a tail and siblings, the tail stays in the
    /// parent's content: it is added to the tail of the previous sibling, or
    /// to the parent's text if the element was the first child. An only
    /// child keeps its tail.
    ///
    /// ```rust
    /// let mut etree = etree::Etree::new();
    /// let root = etree.fromstring("<p><a/>A<b/>B</p>")?;
    /// let b = etree.child(root, "b").unwrap();
    /// etree.remove(b);
    /// assert_eq!(etree.tostring(root), "<p><a/>AB</p>");
    /// assert_eq!(etree.tail(b), "");
    /// # Ok::<(), etree::Error>(())
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, element: Element) {
        self.detach_merging_tail(element);
    }

    /// Remove `child` from `parent`.
    ///
    /// Does nothing if `child` is not a direct child of `parent`.
    pub fn remove_child(&mut self, parent: Element, child: Element) {
        if self.parent(child) == Some(parent) {
            self.detach_merging_tail(child);
        }
    }

    fn cycle_check(&self, parent: Element, child: Element) -> Result<(), Error> {
        if parent == child || self.is_ancestor(child, parent) {
            debug!(?parent, ?child, "rejected cyclical append");
            return Err(Error::CyclicalTree);
        }
        Ok(())
    }

    fn detach_merging_tail(&mut self, element: Element) {
        let Some(parent) = self.parent(element) else {
            return;
        };
        let previous = self.previous_sibling(element);
        let has_siblings = previous.is_some() || self.next_sibling(element).is_some();
        if has_siblings && !self.tail(element).is_empty() {
            let tail = std::mem::take(&mut self.data_mut(element).tail);
            match previous {
                Some(previous) => self.data_mut(previous).tail.push_str(&tail),
                None => self.data_mut(parent).text.push_str(&tail),
            }
        }
        element.get().detach(self.arena_mut());
    }
}
