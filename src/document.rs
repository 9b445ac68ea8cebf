// ABOUTME: Lenient feed tokenization and the split into channel/image/item views.
// ABOUTME: Hosts the element tree plus the find/find_all/text/attr lookup helpers.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::ParseError;

/// A single element recovered from the feed text.
///
/// Names and attribute keys are stored ASCII-lowercased, so `<pubDate>` and
/// `<PUBDATE>` are the same element; namespace prefixes are part of the name
/// (`itunes:author` is one opaque string, never resolved through a URI).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
}

/// The two parsed views of one feed document plus its item subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitDocument {
    /// Channel view: the document with every `<item>` and `<image>` subtree
    /// removed, so channel-level lookups cannot collide with item tags.
    pub channel: Element,
    /// The first `<image>` element found outside any `<item>`.
    pub feed_image: Option<Element>,
    /// Every `<item>` subtree of the full view, in document order.
    pub items: Vec<Element>,
}

/// Splits raw feed text into the channel view and the item subtrees.
///
/// Tokenization is lenient: mismatched or unclosed tags are tolerated and
/// whatever tree was recovered up to a tokenizer failure is surfaced. The only
/// hard failures are an empty input and a failure before anything was
/// recovered.
pub fn split(feed_text: &str) -> Result<SplitDocument, ParseError> {
    if feed_text.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let full = parse_tree(feed_text)?;

    let mut items = Vec::new();
    let mut images = Vec::new();
    let channel = strip_subtrees(full, &mut items, &mut images);

    Ok(SplitDocument {
        channel,
        feed_image: images.into_iter().next(),
        items,
    })
}

impl Element {
    fn document() -> Element {
        Element {
            name: String::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The lowercased element name, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the named attribute (lowercased key), if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First descendant element with the given (lowercased) name, in
    /// depth-first document order. The receiver itself never matches.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        for node in &self.children {
            if let Node::Element(el) = node {
                if el.name == tag {
                    return Some(el);
                }
                if let Some(found) = el.find(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Every descendant element with the given name, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_matches(tag, &mut out);
        out
    }

    fn collect_matches<'a>(&'a self, tag: &str, out: &mut Vec<&'a Element>) {
        for node in &self.children {
            if let Node::Element(el) = node {
                if el.name == tag {
                    out.push(el);
                }
                el.collect_matches(tag, out);
            }
        }
    }

    /// Concatenated text content of the subtree, edge-trimmed.
    ///
    /// An element with no text yields `None`, never the empty string; the
    /// record types rely on that to keep "absent" distinct from "empty".
    pub fn text(&self) -> Option<String> {
        let mut out = String::new();
        self.collect_text(&mut out);
        let trimmed = out.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// Text of the first matching descendant: the lookup combinator every
    /// scalar field extraction goes through.
    pub fn find_text(&self, tag: &str) -> Option<String> {
        self.find(tag).and_then(|el| el.text())
    }

    /// Attribute of the first matching descendant.
    pub fn find_attr(&self, tag: &str, attr: &str) -> Option<String> {
        self.find(tag).and_then(|el| el.attr(attr)).map(str::to_string)
    }
}

/// Builds the full element tree from one lenient tokenizer pass.
fn parse_tree(feed_text: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(feed_text);
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<Element> = vec![Element::document()];
    let mut recovered = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                recovered = true;
                stack.push(open_element(&reader, e));
            }
            Ok(Event::Empty(ref e)) => {
                recovered = true;
                let el = open_element(&reader, e);
                push_node(&mut stack, Node::Element(el));
            }
            Ok(Event::Text(ref e)) => {
                let text = e.decode().map(|t| t.into_owned()).unwrap_or_default();
                if !text.is_empty() {
                    push_node(&mut stack, Node::Text(text));
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e).into_owned();
                if !text.is_empty() {
                    push_node(&mut stack, Node::Text(text));
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                push_node(&mut stack, Node::Text(resolve_reference(e)));
            }
            Ok(Event::End(_)) => {
                // check_end_names is off, so any end tag closes one level.
                if stack.len() > 1 {
                    let el = stack.pop().expect("stack is non-empty");
                    push_node(&mut stack, Node::Element(el));
                }
            }
            Ok(Event::Eof) => break,
            Err(err) if !recovered => return Err(ParseError::parse(err)),
            Err(_) => break,
            Ok(_) => {}
        }
    }

    // Unclosed elements at EOF are kept with whatever they contained.
    while stack.len() > 1 {
        let el = stack.pop().expect("stack is non-empty");
        push_node(&mut stack, Node::Element(el));
    }
    Ok(stack.pop().expect("document node remains"))
}

fn open_element(reader: &Reader<&[u8]>, start: &BytesStart) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut attrs = Vec::new();
    for attr in start.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
        attrs.push((key, value));
    }
    Element {
        name,
        attrs,
        children: Vec::new(),
    }
}

fn push_node(stack: &mut Vec<Element>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Resolves a general reference to text: the five predefined entities and
/// numeric character references. Anything else is kept literally.
fn resolve_reference(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    match name.as_ref() {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        n => {
            if let Some(num) = n.strip_prefix('#') {
                let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                };
                if let Some(c) = code.and_then(char::from_u32) {
                    return c.to_string();
                }
            }
            format!("&{n};")
        }
    }
}

/// Detaches every `<item>` and `<image>` subtree, returning the stripped tree.
/// Detached subtrees are collected whole, so nothing inside an item is ever
/// visible to channel-level lookups.
fn strip_subtrees(element: Element, items: &mut Vec<Element>, images: &mut Vec<Element>) -> Element {
    let Element {
        name,
        attrs,
        children,
    } = element;
    let mut kept = Vec::with_capacity(children.len());
    for node in children {
        match node {
            Node::Element(el) if el.name == "item" => items.push(el),
            Node::Element(el) if el.name == "image" => images.push(el),
            Node::Element(el) => kept.push(Node::Element(strip_subtrees(el, items, images))),
            text => kept.push(text),
        }
    }
    Element {
        name,
        attrs,
        children: kept,
    }
}
