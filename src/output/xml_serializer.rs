use std::borrow::Cow;

use indextree::NodeEdge;

use crate::element::Element;
use crate::entity::{serialize_attribute, serialize_text};
use crate::etree::Etree;
use crate::qname::QName;

use super::fullname::{allocate_prefixes, ancestor_declarations, Declarations};
use super::{element_declarations, FullnameSerializer, Parameters};

pub(crate) struct XmlSerializer<'a> {
    etree: &'a Etree,
    top: Element,
    parameters: &'a Parameters,
    fullname_serializer: FullnameSerializer<'a>,
    // generated prefixes, declared on the top element
    allocated: Declarations<'a>,
}

impl<'a> XmlSerializer<'a> {
    pub(crate) fn new(etree: &'a Etree, top: Element, parameters: &'a Parameters) -> Self {
        let allocated = allocate_prefixes(etree, top, &parameters.prefix_stem);
        let fullname_serializer = FullnameSerializer::new(ancestor_declarations(etree, top));
        Self {
            etree,
            top,
            parameters,
            fullname_serializer,
            allocated,
        }
    }

    pub(crate) fn serialize(mut self, out: &mut String) {
        if self.parameters.declaration {
            out.push_str("<?xml version=\"1.0\"?>\n");
        }
        let etree = self.etree;
        for edge in self.top.get().traverse(etree.arena()) {
            match edge {
                NodeEdge::Start(node_id) => self.start_tag(Element::new(node_id), out),
                NodeEdge::End(node_id) => self.end_tag(Element::new(node_id), out),
            }
        }
        if self.parameters.trailing_newline {
            out.push('\n');
        }
    }

    fn has_content(&self, element: Element) -> bool {
        !self.etree.text(element).is_empty() || self.etree.first_child(element).is_some()
    }

    fn start_tag(&mut self, element: Element, out: &mut String) {
        let mut declarations =
            element_declarations(self.etree, element, &self.fullname_serializer);
        if element == self.top {
            declarations.append(&mut self.allocated);
        }
        let mut rendered_declarations = String::new();
        for (prefix, uri) in &declarations {
            let uri = serialize_attribute(uri);
            if prefix.is_empty() {
                rendered_declarations.push_str(&format!(" xmlns=\"{}\"", uri));
            } else {
                rendered_declarations.push_str(&format!(" xmlns:{}=\"{}\"", prefix, uri));
            }
        }
        self.fullname_serializer.push(declarations);

        out.push('<');
        out.push_str(&self.element_fullname(self.etree.qname(element)));
        out.push_str(&rendered_declarations);
        for (name, value) in self.etree.attrib(element) {
            out.push(' ');
            out.push_str(&self.attribute_fullname(name));
            out.push_str("=\"");
            out.push_str(&serialize_attribute(value));
            out.push('"');
        }
        if self.has_content(element) {
            out.push('>');
            out.push_str(&serialize_text(self.etree.text(element)));
        } else {
            out.push_str("/>");
        }
    }

    fn end_tag(&mut self, element: Element, out: &mut String) {
        if self.has_content(element) {
            out.push_str("</");
            out.push_str(&self.element_fullname(self.etree.qname(element)));
            out.push('>');
        }
        self.fullname_serializer.pop();
        if element != self.top || self.parameters.with_tail {
            out.push_str(&serialize_text(self.etree.tail(element)));
        }
    }

    // every namespace in the subtree has a prefix once allocate_prefixes has
    // run, so a missing one is a bug in the allocation
    fn element_fullname<'q>(&self, qname: &'q QName) -> Cow<'q, str> {
        self.fullname_serializer
            .element_fullname(qname)
            .unwrap_or_else(|| unreachable!("no prefix allocated for element {}", qname))
    }

    fn attribute_fullname<'q>(&self, qname: &'q QName) -> Cow<'q, str> {
        self.fullname_serializer
            .attribute_fullname(qname)
            .unwrap_or_else(|| unreachable!("no prefix allocated for attribute {}", qname))
    }
}
