//! Tag reference

use crate::Tag;

/// One line per tag: its grammar name and whether the walker dispatches on it.
pub fn list_tags() -> String {
    let mut out = String::new();
    for tag in Tag::ALL {
        let role = if tag.is_literal() {
            "literal"
        } else {
            match tag {
                Tag::Where => "root marker",
                Tag::InList | Tag::Column | Tag::Identifier => "operand",
                _ => "operator",
            }
        };
        out.push_str(&format!("{:<12} {}\n", tag.name(), role));
    }
    out
}
