// src/core/html.rs
//
// Case-insensitive block scanning over raw HTML. No DOM; callers slice down to a
// known container first, then walk the tags they care about inside it.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Inner text of the first element whose opener contains `open_pat`, up to `close_pat`.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let o = lc.find(&to_lower(open_pat))?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&to_lower(close_pat))?;
    Some(&s[after..after + cr])
}

/// (start, end) of the next `o ... c` block at or after `from`, end exclusive.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let start = lc.get(from..)?.find(&to_lower(o))? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&to_lower(c))?;
    Some((start, open_end + end_rel + c.len()))
}

/// Every `o ... c` block in `s`, in order.
pub fn tag_blocks<'a>(s: &'a str, o: &str, c: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((bs, be)) = next_tag_block_ci(s, o, c, pos) {
        out.push(&s[bs..be]);
        pos = be;
    }
    out
}

/// Opening tag text, `<` to `>` inclusive.
pub fn open_tag(block: &str) -> &str {
    match block.find('>') {
        Some(end) => &block[..=end],
        None => block,
    }
}

/// Quoted attribute value from an opening tag: `attr_value(r#"<a href="x">"#, "href")`.
pub fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let lc = to_lower(tag);
    let needle = join!(&to_lower(name), "=");
    let mut from = 0usize;
    while let Some(rel) = lc[from..].find(&needle) {
        let at = from + rel;
        // must start a word: `data-href=` is not `href=`
        let boundary = at == 0 || lc[..at].ends_with(|c: char| c.is_whitespace());
        let value_start = at + needle.len();
        if boundary {
            let rest = &tag[value_start..];
            let quote = rest.chars().next()?;
            if quote == '"' || quote == '\'' {
                let end = rest[1..].find(quote)?;
                return Some(&rest[1..1 + end]);
            }
            let end = rest.find(|c: char| c.is_whitespace() || c == '>').unwrap_or(rest.len());
            return Some(&rest[..end]);
        }
        from = value_start;
    }
    None
}

/// Visible text of an HTML fragment: tags dropped, entities and whitespace normalized.
pub fn text_of(fragment: &str) -> String {
    strip_tags(normalize_entities(fragment))
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}
