// src/api/xml.rs
//! Smartping XML → nested `Map`.
//!
//! The API never uses attributes; all data is element text. A tag seen once under a
//! parent is stored as `Field::One`; a second occurrence promotes it to `Field::Many`,
//! keeping document order. Callers that iterate use `Map::all`, which treats both
//! shapes as a slice.
//!
//! A childless element decodes to its text, which may be empty or a single newline.
//! The API answers "nothing found" with `<liste>\n</liste>`; `Node::is_blank` is the
//! check for that, distinct from a tag being absent.

use std::slice;

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Map(Map),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field {
    One(Node),
    Many(Vec<Node>),
}

/// Tag → field, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Map {
    entries: Vec<(String, Field)>,
}

impl Node {
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(t) => Some(t),
            Node::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(m) => Some(m),
            Node::Text(_) => None,
        }
    }

    /// Whitespace-only leaf ("no data" answer).
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }

    pub fn to_json(&self) -> Value {
        match self {
            Node::Text(t) => Value::String(t.clone()),
            Node::Map(m) => m.to_json(),
        }
    }
}

impl Field {
    pub fn as_slice(&self) -> &[Node] {
        match self {
            Field::One(node) => slice::from_ref(node),
            Field::Many(nodes) => nodes,
        }
    }

    pub fn first(&self) -> &Node {
        match self {
            Field::One(node) => node,
            Field::Many(nodes) => &nodes[0], // Many is only built from two or more nodes
        }
    }

    fn push(&mut self, node: Node) {
        let prev = std::mem::replace(self, Field::Many(Vec::new()));
        *self = match prev {
            Field::One(first) => Field::Many(vec![first, node]),
            Field::Many(mut nodes) => {
                nodes.push(node);
                Field::Many(nodes)
            }
        };
    }

    fn to_json(&self) -> Value {
        match self {
            Field::One(node) => node.to_json(),
            Field::Many(nodes) => Value::Array(nodes.iter().map(Node::to_json).collect()),
        }
    }
}

impl Map {
    pub fn new() -> Self { Self::default() }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, tag: &str) -> Option<&Field> {
        self.entries.iter().find(|(k, _)| k == tag).map(|(_, f)| f)
    }

    /// Every occurrence of `tag`, whatever its shape. Empty when absent.
    pub fn all(&self, tag: &str) -> &[Node] {
        self.get(tag).map(Field::as_slice).unwrap_or(&[])
    }

    /// Maps among the occurrences of `tag`; stray text leaves are skipped.
    pub fn maps<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Map> + 'a {
        self.all(tag).iter().filter_map(Node::as_map)
    }

    pub fn node(&self, tag: &str) -> Option<&Node> {
        self.get(tag).map(Field::first)
    }

    /// Text of the first `tag` leaf.
    pub fn text(&self, tag: &str) -> Option<&str> {
        self.node(tag).and_then(Node::text)
    }

    /// Text of `tag`, `None` when absent or whitespace-only.
    pub fn value(&self, tag: &str) -> Option<&str> {
        self.text(tag).map(str::trim).filter(|t| !t.is_empty())
    }

    /// Walk `path` through first occurrences: `["liste", "equipe"]`.
    pub fn path(&self, path: &[&str]) -> Option<&Node> {
        let (last, init) = path.split_last()?;
        let mut map = self;
        for tag in init {
            map = map.node(tag)?.as_map()?;
        }
        map.node(last)
    }

    /// Like `path`, but yields every occurrence at the last step.
    pub fn path_all(&self, path: &[&str]) -> &[Node] {
        let Some((last, init)) = path.split_last() else { return &[] };
        let mut map = self;
        for tag in init {
            match map.node(tag).and_then(Node::as_map) {
                Some(m) => map = m,
                None => return &[],
            }
        }
        map.all(last)
    }

    /// Single-occurrence text leaves as (tag, text) pairs, in document order.
    pub fn leaves(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, f)| match f {
                Field::One(Node::Text(t)) => Some((k.clone(), t.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Add a child; a repeated tag turns into a sequence.
    pub fn insert(&mut self, tag: String, node: Node) {
        match self.entries.iter_mut().find(|(k, _)| *k == tag) {
            Some((_, field)) => field.push(node),
            None => self.entries.push((tag, Field::One(node))),
        }
    }

    pub fn to_json(&self) -> Value {
        let obj = self
            .entries
            .iter()
            .map(|(k, f)| (k.clone(), f.to_json()))
            .collect::<serde_json::Map<_, _>>();
        Value::Object(obj)
    }
}

/* ---------------- Decoding ---------------- */

struct Frame {
    tag: String,
    children: Map,
    text: String,
}

impl Frame {
    fn open(tag: String) -> Self {
        Self { tag, children: Map::new(), text: s!() }
    }

    fn close(self) -> (String, Node) {
        let node = if self.children.is_empty() {
            Node::Text(self.text)
        } else {
            Node::Map(self.children)
        };
        (self.tag, node)
    }
}

fn attach(stack: &mut [Frame], root: &mut Map, tag: String, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.insert(tag, node),
        None => root.insert(tag, node),
    }
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Decode a whole document into `{root_tag: value}`.
pub fn decode(xml: &str) -> Result<Map, Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = Map::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Frame::open(tag_name(e.name().as_ref()))),
            Event::Empty(e) => {
                let tag = tag_name(e.name().as_ref());
                attach(&mut stack, &mut root, tag, Node::Text(s!()));
            }
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    let text = e.unescape().map_err(quick_xml::Error::from)?;
                    top.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::parse("closing tag without an opening one"))?;
                let (tag, node) = frame.close();
                attach(&mut stack, &mut root, tag, node);
            }
            Event::Eof => break,
            _ => {} // declaration, comments, processing instructions
        }
    }

    if let Some(open) = stack.last() {
        return Err(Error::parse(format!("document ends inside <{}>", open.tag)));
    }
    if root.is_empty() {
        return Err(Error::parse("document has no root element"));
    }
    Ok(root)
}
