// src/document.rs
//
// pdf2xml pages as flat, positioned element lists. Only <text> and <image>
// survive loading; their order is document order and is what every
// resume cursor in `specs` indexes into.

use std::fs;
use std::path::Path;

use crate::core::sanitize::{decode_entities, normalize_ws};
use crate::core::xml::{self, Tag};
use crate::error::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Image,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Effective text: the emphasised inner value when the source wrapped it
    /// (`<text><b>…</b></text>`), else the element's own text. Empty for images.
    pub text: String,
    /// Image file reference, as written by pdftohtml.
    pub src: Option<String>,
}

impl Element {
    pub fn text(left: i32, top: i32, width: i32, height: i32, text: &str) -> Self {
        Self { kind: ElementKind::Text, left, top, width, height, text: s!(text), src: None }
    }

    pub fn image(left: i32, top: i32, width: i32, height: i32, src: &str) -> Self {
        Self { kind: ElementKind::Image, left, top, width, height, text: s!(), src: Some(s!(src)) }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn new(number: u32, elements: Vec<Element>) -> Self {
        Self { number, elements }
    }

    /// Text elements from `from` on, with their page indices.
    pub fn texts_from(&self, from: usize) -> impl Iterator<Item = (usize, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .skip(from)
            .filter(|(_, e)| e.is_text())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub pages: Vec<Page>,
}

pub fn load(path: &Path) -> Result<Document, ParseError> {
    let text = fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_document(&text)
}

pub fn parse_document(src: &str) -> Result<Document, ParseError> {
    let root = xml::next_tag(src, 0).ok_or_else(|| ParseError::Xml(s!("no root element")))?;
    if root.name != "pdf2xml" {
        return Err(ParseError::Xml(format!("unexpected root <{}>", root.name)));
    }
    let body = root.inner(src);

    let mut pages = Vec::new();
    for tag in xml::children(body).into_iter().filter(|t| t.name == "page") {
        let number = xml::attr(tag.opener(body), "number")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(pages.len() as u32 + 1);
        pages.push(parse_page(number, tag.inner(body))?);
    }
    logd!("pdf2xml: {} page(s)", pages.len());
    Ok(Document { pages })
}

fn parse_page(number: u32, body: &str) -> Result<Page, ParseError> {
    let mut elements = Vec::new();
    for tag in xml::children(body) {
        let kind = match tag.name {
            "text" => ElementKind::Text,
            "image" => ElementKind::Image,
            _ => continue, // fontspec, a, …
        };
        let index = elements.len();
        let opener = tag.opener(body);
        let num = |attr: &'static str| -> Result<i32, ParseError> {
            xml::attr(opener, attr)
                .and_then(|v| v.trim().parse().ok())
                .ok_or(ParseError::Attribute { index, attr })
        };

        let (left, top, width, height) = (num("left")?, num("top")?, num("width")?, num("height")?);
        let (text, src) = match kind {
            ElementKind::Text => (effective_text(&tag, body), None),
            ElementKind::Image => (s!(), xml::attr(opener, "src").map(decode_entities)),
        };
        elements.push(Element { kind, left, top, width, height, text, src });
    }
    Ok(Page { number, elements })
}

/// A lone child element with nothing but whitespace around it carries the
/// real value (bold/italic emphasis); anything else is flattened.
fn effective_text(tag: &Tag<'_>, body: &str) -> String {
    let inner = tag.inner(body);
    let kids = xml::children(inner);
    let raw = match kids.as_slice() {
        [only] => {
            let outside = join!(&inner[..only.start], &inner[only.end..]);
            if outside.trim().is_empty() {
                xml::strip_tags(only.inner(inner))
            } else {
                xml::strip_tags(inner)
            }
        }
        _ => xml::strip_tags(inner),
    };
    normalize_ws(&decode_entities(&raw))
}
