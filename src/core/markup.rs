// src/core/markup.rs
// Lenient tag-level document model for HTML pages and the XML control file.
//
// The source is split into a flat node list (start tags, end tags, text and
// "other" markup such as comments or doctypes). Every node keeps its raw
// text, so serializing an untouched document gives back the exact input.
// Only tags whose attributes are changed get re-rendered.
//
// Tag and attribute names match case-insensitively on ASCII.

use super::html::to_lower;

/// Elements that never have a closing tag in HTML.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    /// Raw value as written in the source (entities not decoded).
    pub value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Start {
        /// Lowercased tag name.
        name: String,
        attrs: Vec<Attr>,
        self_closing: bool,
        raw: String,
    },
    End {
        name: String,
        raw: String,
    },
    Text(String),
    /// Comments, doctypes, processing instructions, CDATA.
    Other(String),
}

impl Node {
    fn raw(&self) -> &str {
        match self {
            Node::Start { raw, .. } | Node::End { raw, .. } => raw,
            Node::Text(s) | Node::Other(s) => s,
        }
    }
}

/// Handle to an element: the position of its start tag in the node list.
///
/// Handles are invalidated by insertions before them, so look elements up
/// again after mutating the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

/// Borrowed view of an element's start tag.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    pub name: &'a str,
    pub attrs: &'a [Attr],
}

impl<'a> Element<'a> {
    pub fn is(&self, tag: &str) -> bool {
        self.name.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Attribute value equals `value`, ignoring ASCII case.
    pub fn attr_is(&self, name: &str, value: &str) -> bool {
        self.attr(name).is_some_and(|v| v.eq_ignore_ascii_case(value))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn parse(src: &str) -> Self {
        Self { nodes: tokenize(src) }
    }

    /// Serialize back to markup.
    pub fn html(&self) -> String {
        let mut out = String::with_capacity(self.nodes.iter().map(|n| n.raw().len()).sum());
        for n in &self.nodes {
            out.push_str(n.raw());
        }
        out
    }

    pub fn element(&self, el: ElementRef) -> Option<Element<'_>> {
        match self.nodes.get(el.0)? {
            Node::Start { name, attrs, .. } => Some(Element { name, attrs }),
            _ => None,
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementRef, Element<'_>)> {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Node::Start { name, attrs, .. } => Some((ElementRef(i), Element { name, attrs })),
            _ => None,
        })
    }

    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ElementRef> + 'a {
        self.elements().filter(move |(_, e)| e.is(tag)).map(|(r, _)| r)
    }

    pub fn find_first<F>(&self, pred: F) -> Option<ElementRef>
    where
        F: Fn(&Element<'_>) -> bool,
    {
        self.elements().find(|(_, e)| pred(e)).map(|(r, _)| r)
    }

    /// Last element in document order matching `pred`.
    pub fn find_last<F>(&self, pred: F) -> Option<ElementRef>
    where
        F: Fn(&Element<'_>) -> bool,
    {
        self.elements().filter(|(_, e)| pred(e)).map(|(r, _)| r).last()
    }

    /// Elements strictly inside `parent`, in document order.
    pub fn descendants(&self, parent: ElementRef) -> impl Iterator<Item = (ElementRef, Element<'_>)> {
        let end = self.end_of(parent);
        self.elements().filter(move |(r, _)| r.0 > parent.0 && r.0 < end)
    }

    pub fn attr(&self, el: ElementRef, name: &str) -> Option<&str> {
        self.element(el)?.attr(name)
    }

    /// Set (or add) an attribute and re-render the start tag.
    /// Returns false when `el` is not an element.
    pub fn set_attr(&mut self, el: ElementRef, name: &str, value: &str) -> bool {
        let Some(Node::Start { name: tag, attrs, self_closing, raw }) = self.nodes.get_mut(el.0) else {
            return false;
        };
        match attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
            Some(a) => a.value = Some(s!(value)),
            None => attrs.push(Attr { name: s!(name), value: Some(s!(value)) }),
        }
        *raw = render_start(tag, attrs, *self_closing);
        true
    }

    /// Concatenated text content of an element, tags stripped.
    pub fn text(&self, el: ElementRef) -> String {
        let end = self.end_of(el);
        let mut out = s!();
        for n in self.nodes.iter().take(end).skip(el.0 + 1) {
            if let Node::Text(t) = n {
                out.push_str(t);
            }
        }
        out
    }

    /// Insert parsed `fragment` as following sibling(s) of `el`.
    pub fn insert_after(&mut self, el: ElementRef, fragment: &str) {
        let at = self.end_of(el) + 1;
        self.splice_in(at.min(self.nodes.len()), fragment);
    }

    /// Append `fragment` as the last children of `<body>`. Falls back to
    /// before `</html>`, then to the end of the document.
    pub fn append_to_body(&mut self, fragment: &str) {
        let close = |tag: &str| {
            self.nodes
                .iter()
                .rposition(|n| matches!(n, Node::End { name, .. } if name == tag))
        };
        let at = close("body").or_else(|| close("html")).unwrap_or(self.nodes.len());
        self.splice_in(at, fragment);
    }

    fn splice_in(&mut self, at: usize, fragment: &str) {
        let new_nodes = tokenize(fragment);
        self.nodes.splice(at..at, new_nodes);
    }

    /// Index of the last node belonging to `el` (its end tag, or the start tag
    /// itself for void/self-closing/unclosed elements).
    fn end_of(&self, el: ElementRef) -> usize {
        let Some(Node::Start { name, self_closing, .. }) = self.nodes.get(el.0) else {
            return el.0;
        };
        if *self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            return el.0;
        }
        let mut depth = 0usize;
        for (i, n) in self.nodes.iter().enumerate().skip(el.0 + 1) {
            match n {
                Node::Start { name: n2, self_closing: false, .. } if n2 == name => depth += 1,
                Node::End { name: n2, .. } if n2 == name => {
                    if depth == 0 {
                        return i;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        el.0
    }
}

fn render_start(tag: &str, attrs: &[Attr], self_closing: bool) -> String {
    let mut out = join!("<", tag);
    for a in attrs {
        out.push(' ');
        out.push_str(&a.name);
        if let Some(v) = &a.value {
            out.push_str("=\"");
            out.push_str(&v.replace('"', "&quot;"));
            out.push('"');
        }
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}

/* ---------------- Tokenizer ---------------- */

fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Position just past the `>` closing a tag that starts at `from`,
/// skipping quoted attribute values.
fn tag_end(s: &str, from: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

fn find_from(s: &str, from: usize, pat: &str) -> Option<usize> {
    s.get(from..)?.find(pat).map(|i| i + from)
}

fn tokenize(src: &str) -> Vec<Node> {
    let bytes = src.as_bytes();
    let mut nodes = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    let flush_text = |nodes: &mut Vec<Node>, from: usize, to: usize| {
        if to > from {
            nodes.push(Node::Text(s!(&src[from..to])));
        }
    };

    while let Some(lt) = find_from(src, i, "<") {
        let rest = &src[lt..];
        let next = bytes.get(lt + 1).copied();

        // Comments, CDATA, doctype, processing instructions
        let other_end = if rest.starts_with("<!--") {
            Some(find_from(src, lt + 4, "-->").map_or(src.len(), |e| e + 3))
        } else if rest.starts_with("<![CDATA[") {
            Some(find_from(src, lt + 9, "]]>").map_or(src.len(), |e| e + 3))
        } else if matches!(next, Some(b'!' | b'?')) {
            Some(find_from(src, lt, ">").map_or(src.len(), |e| e + 1))
        } else {
            None
        };
        if let Some(end) = other_end {
            flush_text(&mut nodes, text_start, lt);
            nodes.push(Node::Other(s!(&src[lt..end])));
            i = end;
            text_start = end;
            continue;
        }

        // End tag
        if next == Some(b'/') && bytes.get(lt + 2).is_some_and(|b| b.is_ascii_alphabetic()) {
            let Some(end) = tag_end(src, lt) else { break };
            let name_end = (lt + 2..end).find(|&k| !is_name_char(bytes[k])).unwrap_or(end);
            flush_text(&mut nodes, text_start, lt);
            nodes.push(Node::End {
                name: to_lower(&src[lt + 2..name_end]),
                raw: s!(&src[lt..end]),
            });
            i = end;
            text_start = end;
            continue;
        }

        // Start tag
        if next.is_some_and(|b| b.is_ascii_alphabetic()) {
            let Some(end) = tag_end(src, lt) else { break };
            let name_end = (lt + 1..end).find(|&k| !is_name_char(bytes[k])).unwrap_or(end);
            let name = to_lower(&src[lt + 1..name_end]);
            let inner = &src[name_end..end - 1];
            let self_closing = inner.trim_end().ends_with('/');
            let attrs = parse_attrs(inner.trim_end().trim_end_matches('/'));

            flush_text(&mut nodes, text_start, lt);
            let raw_text = !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str());
            nodes.push(Node::Start { name: name.clone(), attrs, self_closing, raw: s!(&src[lt..end]) });
            i = end;
            text_start = end;

            if raw_text {
                // Content runs to the matching close tag, verbatim.
                let close_pat = join!("</", &name);
                let lc = to_lower(&src[end..]);
                let content_end = lc.find(&close_pat).map_or(src.len(), |k| k + end);
                flush_text(&mut nodes, end, content_end);
                // The main loop picks up the end tag.
                i = content_end;
                text_start = content_end;
            }
            continue;
        }

        // Stray '<' is text
        i = lt + 1;
    }

    flush_text(&mut nodes, text_start, src.len());
    nodes
}

fn parse_attrs(s: &str) -> Vec<Attr> {
    let bytes = s.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;
    let n = bytes.len();

    while i < n {
        while i < n && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= n {
            break;
        }
        let name_start = i;
        while i < n && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'/') {
            i += 1;
        }
        let name = s!(&s[name_start..i]);
        while i < n && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i < n && bytes[i] == b'=' {
            i += 1;
            while i < n && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let value = if i < n && (bytes[i] == b'"' || bytes[i] == b'\'') {
                let q = bytes[i];
                let v_start = i + 1;
                let v_end = (v_start..n).find(|&k| bytes[k] == q).unwrap_or(n);
                i = (v_end + 1).min(n);
                &s[v_start..v_end]
            } else {
                let v_start = i;
                while i < n && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &s[v_start..i]
            };
            attrs.push(Attr { name, value: Some(s!(value)) });
        } else if !name.is_empty() {
            attrs.push(Attr { name, value: None });
        }
    }
    attrs
}
