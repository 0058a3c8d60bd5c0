use rstest::rstest;

use etree::{Etree, QName};

#[test]
fn test_qname() {
    let mut etree = Etree::new();
    let e = etree.new_element("x").unwrap();
    assert_eq!(etree.qname(e), "x");
}

#[test]
fn test_qname_namespaced() {
    let mut etree = Etree::new();
    let e = etree.new_element("{urn:woah}x").unwrap();
    assert_eq!(etree.qname(e), "{urn:woah}x");
    assert_eq!(etree.qname(e).namespace(), Some("urn:woah"));
}

#[test]
fn test_new_element_from_qname() {
    let mut etree = Etree::new();
    let qname = QName::new(Some("urn:x"), "a").unwrap();
    let e = etree.new_element(&qname).unwrap();
    assert_eq!(etree.qname(e), &qname);
}

#[test]
fn test_new_element_malformed() {
    let mut etree = Etree::new();
    assert!(matches!(
        etree.new_element("{urn:x"),
        Err(etree::Error::MalformedQName(_))
    ));
}

#[test]
fn test_set_qname() {
    let mut etree = Etree::new();
    let e = etree.new_element("x").unwrap();
    etree.set_qname(e, "y").unwrap();
    assert_eq!(etree.qname(e), "y");
}

#[test]
fn test_set_qname_namespaced() {
    let mut etree = Etree::new();
    let e = etree.new_element("x").unwrap();
    etree.set_qname(e, "{x}y").unwrap();
    assert_eq!(etree.qname(e), "{x}y");
}

#[test]
fn test_tag() {
    let mut etree = Etree::new();
    let e = etree.new_element("x").unwrap();
    assert_eq!(etree.tag(e), "x");
}

#[test]
fn test_set_tag() {
    let mut etree = Etree::new();
    let e = etree.new_element("x").unwrap();
    etree.set_tag(e, "y").unwrap();
    assert_eq!(etree.tag(e), "y");
    assert_eq!(etree.ns(e), "");
}

#[test]
fn test_set_tag_keeps_namespace() {
    let mut etree = Etree::new();
    let e = etree.new_element("{x}y").unwrap();
    etree.set_tag(e, "z").unwrap();
    assert_eq!(etree.tag(e), "z");
    assert_eq!(etree.ns(e), "x");
}

#[test]
fn test_text() {
    let mut etree = Etree::new();
    let e = etree.fromstring("<name>David</name>").unwrap();
    assert_eq!(etree.text(e), "David");
}

#[test]
fn test_set_text() {
    let mut etree = Etree::new();
    let e = etree.fromstring("<name/>").unwrap();
    etree.set_text(e, "David");
    assert_eq!(etree.tostring(e), "<name>David</name>");
}

#[test]
fn test_set_text_empty() {
    let mut etree = Etree::new();
    let e = etree.fromstring("<name>David</name>").unwrap();
    etree.set_text(e, "");
    assert_eq!(etree.tostring(e), "<name/>");
}

#[test]
fn test_tail() {
    let mut etree = Etree::new();
    let root = etree.fromstring("<a><b/>after</a>").unwrap();
    let b = etree.child(root, "b").unwrap();
    assert_eq!(etree.tail(b), "after");
    etree.set_tail(b, "changed");
    assert_eq!(etree.tostring(root), "<a><b/>changed</a>");
}

#[test]
fn test_deepcopy() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring(r#"<a xmlns:x="urn:x"><x:b x:c="1">text</x:b>tail</a>"#)
        .unwrap();
    let copy = etree.deepcopy(root);
    assert_ne!(copy, root);
    assert_eq!(etree.tostring(copy), etree.tostring(root));
    let b_copy = etree.child(copy, "{urn:x}b").unwrap();
    etree.set_text(b_copy, "changed");
    let b = etree.child(root, "{urn:x}b").unwrap();
    assert_eq!(etree.text(b), "text");
}

#[test]
fn test_deepcopy_subelement_is_detached() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring(r#"<a xmlns:x="urn:x"><x:b/></a>"#)
        .unwrap();
    let b = etree.child(root, "{urn:x}b").unwrap();
    let copy = etree.deepcopy(b);
    assert_eq!(etree.parent(copy), None);
    assert_eq!(etree.tostring(copy), r#"<ns0:b xmlns:ns0="urn:x"/>"#);
}

#[test]
fn test_declare_namespace() {
    let mut etree = Etree::new();
    let root = etree.new_element("{urn:x}root").unwrap();
    etree.declare_namespace(root, "x", "urn:x").unwrap();
    etree.sub_element(root, "{urn:x}child").unwrap();
    assert_eq!(
        etree.tostring(root),
        r#"<x:root xmlns:x="urn:x"><x:child/></x:root>"#
    );
}

#[test]
fn test_declare_default_namespace() {
    let mut etree = Etree::new();
    let root = etree.new_element("{urn:x}root").unwrap();
    etree.declare_namespace(root, "", "urn:x").unwrap();
    etree.sub_element(root, "{urn:x}child").unwrap();
    etree.sub_element(root, "plain").unwrap();
    assert_eq!(
        etree.tostring(root),
        r#"<root xmlns="urn:x"><child/><plain xmlns=""/></root>"#
    );
}

#[rstest]
#[case("a b")]
#[case("a<b")]
#[case("x:y")]
#[case("1a")]
#[case("{urn:x}a=b")]
fn test_new_element_not_a_name(#[case] name: &str) {
    let mut etree = Etree::new();
    assert!(matches!(
        etree.new_element(name),
        Err(etree::Error::MalformedQName(_))
    ));
}

#[rstest]
#[case("p\"q")]
#[case("p=q")]
#[case("p<q")]
#[case("p q")]
#[case("1p")]
#[case("p:q")]
fn test_declare_prefix_not_a_name(#[case] prefix: &str) {
    let mut etree = Etree::new();
    let root = etree.new_element("{urn:x}a").unwrap();
    assert!(matches!(
        etree.declare_namespace(root, prefix, "urn:x"),
        Err(etree::Error::InvalidPrefix(_))
    ));
    assert_eq!(etree.tostring(root), r#"<ns0:a xmlns:ns0="urn:x"/>"#);
}

#[test]
fn test_declare_invalid_prefix() {
    let mut etree = Etree::new();
    let root = etree.new_element("root").unwrap();
    assert!(matches!(
        etree.declare_namespace(root, "xmlns", "urn:x"),
        Err(etree::Error::InvalidPrefix(_))
    ));
    assert!(matches!(
        etree.declare_namespace(root, "x", ""),
        Err(etree::Error::InvalidPrefix(_))
    ));
    assert_eq!(etree.namespace_declarations(root).count(), 0);
}

#[test]
fn test_undeclare_namespace() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring(r#"<x:root xmlns:x="urn:x"/>"#)
        .unwrap();
    assert!(etree.undeclare_namespace(root, "x"));
    assert!(!etree.undeclare_namespace(root, "x"));
    assert_eq!(etree.tostring(root), r#"<ns0:root xmlns:ns0="urn:x"/>"#);
}

#[test]
fn test_namespaces_in_scope() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring(r#"<a xmlns="urn:d" xmlns:x="urn:x"><b xmlns:x="urn:y" xmlns=""/></a>"#)
        .unwrap();
    let b = etree.first_child(root).unwrap();
    assert_eq!(
        etree.namespaces_in_scope(root),
        vec![("", "urn:d"), ("x", "urn:x")]
    );
    assert_eq!(etree.namespaces_in_scope(b), vec![("x", "urn:y")]);
}
