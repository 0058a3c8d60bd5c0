use rstest::rstest;

use etree::{Error, Etree, ParseError};

fn parse_error(xml: &str) -> ParseError {
    let mut etree = Etree::new();
    match etree.fromstring(xml) {
        Err(Error::Parse(err)) => err,
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_nested() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring("<a>one<b>two<c/>three</b>four</a>")
        .unwrap();
    assert_eq!(etree.text(root), "one");
    let b = etree.child(root, "b").unwrap();
    assert_eq!(etree.text(b), "two");
    assert_eq!(etree.tail(b), "four");
    let c = etree.child(b, "c").unwrap();
    assert_eq!(etree.tail(c), "three");
}

#[test]
fn test_parse_whitespace_around_root() {
    let mut etree = Etree::new();
    let root = etree.fromstring("\n  <a/>\n").unwrap();
    assert_eq!(etree.tag(root), "a");
    assert_eq!(etree.tail(root), "");
}

#[test]
fn test_parse_default_namespace() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring(r#"<a xmlns="urn:d" b="1"><c/></a>"#)
        .unwrap();
    assert_eq!(etree.qname(root), "{urn:d}a");
    // unprefixed attributes are in no namespace
    assert_eq!(etree.get(root, "b"), "1");
    let c = etree.first_child(root).unwrap();
    assert_eq!(etree.qname(c), "{urn:d}c");
}

#[test]
fn test_parse_undeclared_default_namespace() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring(r#"<a xmlns="urn:d"><c xmlns=""/></a>"#)
        .unwrap();
    let c = etree.first_child(root).unwrap();
    assert_eq!(etree.qname(c), "c");
}

#[test]
fn test_parse_entities_in_attribute() {
    let mut etree = Etree::new();
    let root = etree
        .fromstring(r#"<a b="&lt;&amp;&gt;&quot;&apos;&#65;"/>"#)
        .unwrap();
    assert_eq!(etree.get(root, "b"), "<&>\"'A");
}

#[test]
fn test_parse_attribute_whitespace_normalized() {
    let mut etree = Etree::new();
    let root = etree.fromstring("<a b=\"x\ny\tz\"/>").unwrap();
    assert_eq!(etree.get(root, "b"), "x y z");
}

#[test]
fn test_parse_bytes_utf8() {
    let mut etree = Etree::new();
    let root = etree.fromstring_bytes("<a>caf\u{e9}</a>".as_bytes()).unwrap();
    assert_eq!(etree.text(root), "caf\u{e9}");
}

#[test]
fn test_parse_bytes_latin1() {
    let mut etree = Etree::new();
    let mut bytes = b"<?xml version=\"1.0\" encoding=\"iso-8859-1\"?><a>caf".to_vec();
    bytes.push(0xe9);
    bytes.extend_from_slice(b"</a>");
    let root = etree.fromstring_bytes(&bytes).unwrap();
    assert_eq!(etree.text(root), "caf\u{e9}");
}

#[test]
fn test_parse_bytes_invalid_utf8() {
    let mut etree = Etree::new();
    let err = etree
        .fromstring_bytes(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><a>\xff\xfd</a>")
        .unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));
}

#[test]
fn test_invalid_close_tag() {
    let err = parse_error("<doc><a></b></doc>");
    assert!(matches!(
        err,
        ParseError::InvalidCloseTag(open, close) if open == "a" && close == "b"
    ));
}

#[test]
fn test_invalid_close_tag_prefix() {
    let err = parse_error(r#"<doc xmlns:a="urn:a"></a:doc>"#);
    assert!(matches!(err, ParseError::InvalidCloseTag(..)));
}

#[test]
fn test_unknown_prefix() {
    let err = parse_error("<doc><a:p/></doc>");
    assert!(matches!(err, ParseError::UnknownPrefix(prefix) if prefix == "a"));
}

#[test]
fn test_unknown_attribute_prefix() {
    let err = parse_error(r#"<doc a:b="1"/>"#);
    assert!(matches!(err, ParseError::UnknownPrefix(prefix) if prefix == "a"));
}

#[test]
fn test_prefix_out_of_scope() {
    let err = parse_error(r#"<doc><a xmlns:x="urn:x"/><x:b/></doc>"#);
    assert!(matches!(err, ParseError::UnknownPrefix(prefix) if prefix == "x"));
}

#[test]
fn test_duplicate_attribute() {
    let err = parse_error(r#"<doc xmlns:x="urn:a" xmlns:y="urn:a" x:b="1" y:b="2"/>"#);
    assert!(matches!(err, ParseError::DuplicateAttribute(name) if name == "y:b"));
}

#[test]
fn test_unclosed_tag() {
    let err = parse_error("<doc><a>");
    assert!(matches!(
        &err,
        ParseError::UnclosedTag(name) if name == "a"
    ) || matches!(err, ParseError::XmlParser(_)));
}

#[rstest]
#[case("")]
#[case("  ")]
#[case("<!-- only a comment -->")]
fn test_no_root_element(#[case] xml: &str) {
    assert!(matches!(parse_error(xml), ParseError::NoRootElement));
}

#[rstest]
#[case("<a/><b/>")]
#[case("<a></a><b></b>")]
fn test_multiple_root_elements(#[case] xml: &str) {
    // the tokenizer may reject the second element before we see it
    assert!(matches!(
        parse_error(xml),
        ParseError::MultipleRootElements | ParseError::XmlParser(_)
    ));
}

#[test]
fn test_text_outside_root() {
    assert!(matches!(
        parse_error("<a/>text"),
        ParseError::TextOutsideRoot | ParseError::XmlParser(_)
    ));
}

#[test]
fn test_dtd_unsupported() {
    assert!(matches!(
        parse_error(r#"<!DOCTYPE a [<!ENTITY e "x">]><a>&e;</a>"#),
        ParseError::DtdUnsupported
    ));
}

#[test]
fn test_unknown_entity() {
    assert!(matches!(
        parse_error("<a>&nbsp;</a>"),
        ParseError::InvalidEntity(entity) if entity == "nbsp"
    ));
}

#[rstest]
#[case(r#"<a xmlns:xmlns="urn:x"/>"#)]
#[case(r#"<a xmlns:x=""/>"#)]
#[case(r#"<a xmlns:xml="urn:x"/>"#)]
fn test_invalid_namespace_declaration(#[case] xml: &str) {
    assert!(matches!(
        parse_error(xml),
        ParseError::InvalidNamespaceDeclaration(_)
    ));
}

#[test]
fn test_unfinished_start_tag() {
    assert!(matches!(
        parse_error("<a"),
        ParseError::UnclosedTag(name) if name == "a"
    ));
}

#[rstest]
#[case("<a b='1'", "a")]
#[case("<doc><x:a xmlns:x='urn:x'", "x:a")]
fn test_unfinished_start_tag_with_content(#[case] xml: &str, #[case] expected: &str) {
    // the tokenizer may stop with its own error instead
    let err = parse_error(xml);
    assert!(matches!(
        &err,
        ParseError::UnclosedTag(name) if name == expected
    ) || matches!(err, ParseError::XmlParser(_)));
}

#[test]
fn test_tokenizer_error() {
    assert!(matches!(parse_error("<a b=1/>"), ParseError::XmlParser(_)));
}

#[test]
fn test_error_display() {
    let mut etree = Etree::new();
    let err = etree.fromstring("<doc><a:p/></doc>").unwrap_err();
    assert_eq!(err.to_string(), "parse error: unknown prefix: a");
    assert!(err.parse_error().is_some());
}
