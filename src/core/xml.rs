// src/core/xml.rs
//
// Just enough XML for pdftohtml's pdf2xml output: flat element scanning,
// attribute lookup, inner content. No namespaces, no DTD handling.

/// One element occurrence in a source string (byte offsets into it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    /// Start of `<name`
    pub start: usize,
    /// One past the `>` that closes the opener
    pub open_end: usize,
    /// One past the closing `</name>` (or the `/>` for self-closing tags)
    pub end: usize,
    pub self_closing: bool,
}

impl<'a> Tag<'a> {
    pub fn opener(&self, s: &'a str) -> &'a str {
        &s[self.start..self.open_end]
    }

    /// Raw content between opener and closer; empty for self-closing tags.
    pub fn inner(&self, s: &'a str) -> &'a str {
        if self.self_closing {
            return "";
        }
        let close_len = self.name.len() + 3; // "</" + name + ">"
        &s[self.open_end..self.end - close_len]
    }
}

/// Position of the `>` ending the opener starting at `from`, skipping quoted values.
fn opener_end(s: &str, from: usize) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = from;
    let mut quote: Option<u8> = None;
    while i < b.len() {
        match (quote, b[i]) {
            (Some(q), c) if c == q => quote = None,
            (None, b'"') | (None, b'\'') => quote = Some(b[i]),
            (None, b'>') => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Next element opener at or after `from`, skipping closers, comments,
/// declarations and processing instructions.
pub fn next_tag(s: &str, from: usize) -> Option<Tag<'_>> {
    let mut pos = from;
    loop {
        let lt = s.get(pos..)?.find('<')? + pos;
        let rest = &s[lt + 1..];

        if rest.starts_with("!--") {
            pos = s[lt..].find("-->").map(|e| lt + e + 3)?;
            continue;
        }
        if rest.starts_with('/') || rest.starts_with('?') || rest.starts_with('!') {
            pos = opener_end(s, lt)? + 1;
            continue;
        }

        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        if name_len == 0 {
            pos = lt + 1;
            continue;
        }
        let name = &rest[..name_len];
        let gt = opener_end(s, lt)?;
        let open_end = gt + 1;

        if s[..gt].ends_with('/') {
            return Some(Tag { name, start: lt, open_end, end: open_end, self_closing: true });
        }

        let end = matching_close(s, name, open_end)?;
        return Some(Tag { name, start: lt, open_end, end, self_closing: false });
    }
}

/// End offset of the `</name>` balancing an opener whose content starts at `from`.
fn matching_close(s: &str, name: &str, from: usize) -> Option<usize> {
    let open_pat = join!("<", name);
    let close_pat = join!("</", name, ">");
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let close = s.get(pos..)?.find(&close_pat)? + pos;
        // nested same-name openers before this closer
        let mut scan = pos;
        while let Some(o) = s[scan..close].find(&open_pat).map(|o| o + scan) {
            let after = s.as_bytes().get(o + open_pat.len()).copied();
            if matches!(after, Some(b' ') | Some(b'>') | Some(b'\t') | Some(b'\n') | Some(b'\r')) {
                depth += 1;
            }
            scan = o + open_pat.len();
        }
        depth -= 1;
        if depth == 0 {
            return Some(close + close_pat.len());
        }
        pos = close + close_pat.len();
    }
}

/// Direct children of `inner` (already sliced content of some element).
pub fn children(inner: &str) -> Vec<Tag<'_>> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some(tag) = next_tag(inner, pos) {
        pos = tag.end;
        out.push(tag);
    }
    out
}

/// Value of `name="…"` (or single-quoted) inside an opener.
pub fn attr<'a>(opener: &'a str, name: &str) -> Option<&'a str> {
    let b = opener.as_bytes();
    let mut search = 0usize;
    while let Some(rel) = opener.get(search..)?.find(name) {
        let at = search + rel;
        search = at + name.len();

        let boundary = at > 0 && b[at - 1].is_ascii_whitespace();
        if !boundary {
            continue;
        }
        let rest = opener[search..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else { continue };
        let rest = rest.trim_start();
        let quote = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => continue,
        };
        let val = &rest[1..];
        let close = val.find(quote)?;
        return Some(&val[..close]);
    }
    None
}

/// Drop every `<…>` from the content, keeping text in document order.
pub fn strip_tags(s: &str) -> String {
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
    out
}
