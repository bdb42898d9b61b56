//! Named character references.

/// Entity names this extractor understands, with their replacement text.
static ENTITIES: [(&str, &str); 8] = [
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("copy", "\u{00A9}"),
    ("ndash", "\u{2013}"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{00A0}"),
];

pub fn lookup(name: &str) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
}

/// Appends the resolution of `&name;` to `out`. Unknown names are written back
/// as the original `&name;` sequence.
pub fn push_resolved(name: &str, out: &mut String) {
    match lookup(name) {
        Some(text) => out.push_str(text),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
    }
}
