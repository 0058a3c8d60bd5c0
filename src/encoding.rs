use encoding_rs::{Encoding, UTF_8};
use xhtmlchardet::detect;

// the encoding of XML bytes, from the byte order mark or the encoding in the
// XML declaration; without either this is UTF-8. `None` if the detected
// label is not an encoding we know.
pub(crate) fn encoding(data: &[u8]) -> Option<&'static Encoding> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = detect(&mut cursor, None).ok()?;
    match charsets.first() {
        Some(label) => Encoding::for_label(label.as_bytes()),
        None => Some(UTF_8),
    }
}
