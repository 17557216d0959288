//! Small HTML helpers shared by pages and SEO output.

/// Escape text for element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// ` nonce="…"` when a nonce is present, empty otherwise.
pub fn nonce_attr(nonce: Option<&str>) -> String {
    match nonce {
        Some(n) => format!(" nonce=\"{}\"", escape(n)),
        None => String::new(),
    }
}
