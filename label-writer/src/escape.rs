//! Keeps payloads from being read as command syntax.

/// Characters that would end or corrupt a ZPL field.
fn is_zpl_reserved(ch: char) -> bool {
    matches!(ch, '^' | '~' | '_') || ch.is_ascii_control()
}

/// Whether `data` has to go through `^FH_`.
pub fn needs_field_hex(data: &str) -> bool {
    data.chars().any(is_zpl_reserved)
}

/// Rewrites reserved characters as `_XX` for use after `^FH_`.
pub fn escape_field_hex(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for ch in data.chars() {
        match is_zpl_reserved(ch) {
            true => {
                out.push_str(&format!("_{:02X}", ch as u32));
            }
            false => out.push(ch),
        }
    }
    out
}

/// Body of a double quoted PGL string literal.
pub fn escape_pgl_string(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for ch in data.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ch => out.push(ch),
        }
    }
    out
}
