use std::borrow::Cow;

use crate::error::ParseError;

pub(crate) fn parse_entities(content: &str) -> Result<Cow<'_, str>, ParseError> {
    if !content.contains('&') {
        return Ok(Cow::Borrowed(content));
    }
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            let mut entity = String::new();
            let mut is_complete = false;
            for c in chars.by_ref() {
                if c == ';' {
                    is_complete = true;
                    break;
                }
                entity.push(c);
            }
            if !is_complete {
                return Err(ParseError::UnclosedEntity(entity));
            }
            match entity.as_str() {
                "amp" => result.push('&'),
                "apos" => result.push('\''),
                "gt" => result.push('>'),
                "lt" => result.push('<'),
                "quot" => result.push('"'),
                _ => result.push(parse_char_reference(&entity)?),
            }
        } else {
            result.push(c);
        }
    }
    Ok(Cow::Owned(result))
}

fn parse_char_reference(entity: &str) -> Result<char, ParseError> {
    let invalid = || ParseError::InvalidEntity(entity.to_string());
    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).map_err(|_| invalid())?
    } else if let Some(decimal) = entity.strip_prefix('#') {
        decimal.parse::<u32>().map_err(|_| invalid())?
    } else {
        return Err(invalid());
    };
    char::from_u32(code).ok_or_else(invalid)
}

// literal whitespace in attribute values becomes a space; character
// references to whitespace survive, so run this before parse_entities
pub(crate) fn normalize_attribute_whitespace(value: &str) -> Cow<'_, str> {
    if value.contains(['\t', '\n', '\r']) {
        Cow::Owned(value.replace("\r\n", " ").replace(['\t', '\n', '\r'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

pub(crate) fn serialize_text(content: &str) -> Cow<'_, str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

pub(crate) fn serialize_attribute(content: &str) -> Cow<'_, str> {
    escape(content, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\t' => Some("&#9;"),
        '\n' => Some("&#10;"),
        '\r' => Some("&#13;"),
        _ => None,
    })
}

fn escape(content: &str, replacement: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !content.chars().any(|c| replacement(c).is_some()) {
        return Cow::Borrowed(content);
    }
    let mut result = String::with_capacity(content.len() + 8);
    for c in content.chars() {
        match replacement(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(parse_entities("A &amp; B").unwrap(), "A & B");
    }

    #[test]
    fn test_parse_multiple() {
        assert_eq!(
            parse_entities("&amp;&apos;&gt;&lt;&quot;").unwrap(),
            "&'><\""
        );
    }

    #[test]
    fn test_parse_char_references() {
        assert_eq!(parse_entities("&#65;&#x42;&#10;").unwrap(), "AB\n");
    }

    #[test]
    fn test_parse_unknown_entity() {
        let err = parse_entities("&unknown;");
        if let Err(ParseError::InvalidEntity(entity)) = err {
            assert_eq!(entity, "unknown");
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_parse_unfinished_entity() {
        let err = parse_entities("&amp");
        if let Err(ParseError::UnclosedEntity(entity)) = err {
            assert_eq!(entity, "amp");
        } else {
            unreachable!();
        }
    }

    #[test]
    fn test_parse_no_entities() {
        let text = "hello";
        let result = parse_entities(text).unwrap();
        // this is the same slice
        assert!(std::ptr::eq(text, result.as_ref()));
    }

    #[test]
    fn test_normalize_attribute_whitespace() {
        assert_eq!(normalize_attribute_whitespace("a\r\nb\tc"), "a b c");
        assert_eq!(
            parse_entities(&normalize_attribute_whitespace("a&#10;b")).unwrap(),
            "a\nb"
        );
    }

    #[test]
    fn test_serialize_text() {
        assert_eq!(serialize_text("A & B <c> \"d\""), "A &amp; B &lt;c&gt; \"d\"");
        assert_eq!(serialize_text("a\r\nb\n"), "a&#13;\nb\n");
    }

    #[test]
    fn test_serialize_attribute() {
        assert_eq!(
            serialize_attribute("<\"a\" & b>\n"),
            "&lt;&quot;a&quot; &amp; b&gt;&#10;"
        );
    }

    #[test]
    fn test_serialize_no_entities() {
        let text = "hello";
        let result = serialize_text(text);
        // this is the same slice
        assert!(std::ptr::eq(text, result.as_ref()));
    }
}
