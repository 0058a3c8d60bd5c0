use etree::{QName, XML_NAMESPACE};

#[test]
fn test_tostring_no_namespace() {
    let qname = QName::parse("nons").unwrap();
    assert_eq!(qname.to_string(), "nons");
}

#[test]
fn test_tostring_namespace() {
    let qname = QName::parse("{urn:foo}nons").unwrap();
    assert_eq!(qname.to_string(), "{urn:foo}nons");
}

#[test]
fn test_from_str() {
    let qname: QName = "{urn:foo}a".parse().unwrap();
    assert_eq!(qname, QName::new(Some("urn:foo"), "a").unwrap());
    assert!("{urn:foo".parse::<QName>().is_err());
}

#[test]
fn test_empty_namespace_is_no_namespace() {
    let qname = QName::new(Some(""), "a").unwrap();
    assert_eq!(qname.namespace(), None);
    assert_eq!(qname.ns(), "");
    assert_eq!(qname, "a");
}

#[test]
fn test_compare_with_str() {
    let qname = QName::new(Some(XML_NAMESPACE), "lang").unwrap();
    assert_eq!(qname, "{http://www.w3.org/XML/1998/namespace}lang");
    assert_ne!(qname, "lang");
    assert_ne!(qname, "{broken");
}

#[test]
fn test_equality_is_structural() {
    let a = QName::parse("{urn:x}a").unwrap();
    let b = QName::new(Some("urn:x"), "a").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, QName::parse("{urn:y}a").unwrap());
    assert_ne!(a, QName::parse("a").unwrap());
}
