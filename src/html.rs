//! A small HTML tree builder for CMS-rendered markup.
//!
//! WordPress hands us post bodies and titles as rendered HTML. We only need
//! to walk element structure and read text, so this parses into a flat arena
//! of nodes (element name or text) with parent/child links. Attributes are
//! skipped entirely.
//!
//! The parser is forgiving in the ways real post markup needs:
//!
//! - tag names are case-insensitive
//! - comments, doctypes and processing instructions are dropped
//! - `script`/`style` bodies are dropped
//! - void elements (`br`, `img`, …) never take children
//! - a block-level start tag closes an open `<p>`; `<li>` closes an open `<li>`
//! - end tags with no matching open element are ignored
//! - character references are decoded in text

/// Index of a node in a [`Document`].
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Document,
    Element(String),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// A parsed fragment. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Start tags that implicitly close an open paragraph.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

const RAW_TEXT: &[&str] = &["script", "style"];

impl Document {
    pub const ROOT: NodeId = 0;

    pub fn parse(input: &str) -> Self {
        let mut doc = Document {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        };
        let mut open: Vec<NodeId> = vec![Self::ROOT];
        let mut rest = input;

        while !rest.is_empty() {
            let Some(lt) = rest.find('<') else {
                doc.push_text(&open, rest);
                break;
            };
            if lt > 0 {
                doc.push_text(&open, &rest[..lt]);
                rest = &rest[lt..];
            }

            if let Some(after) = rest.strip_prefix("<!--") {
                rest = after.find("-->").map(|i| &after[i + 3..]).unwrap_or("");
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                rest = rest.find('>').map(|i| &rest[i + 1..]).unwrap_or("");
            } else if let Some(after) = rest.strip_prefix("</") {
                let (name, remaining) = read_tag_name(after);
                rest = skip_past_tag(remaining);
                if !name.is_empty() {
                    close_element(&doc, &mut open, &name);
                }
            } else {
                let (name, remaining) = read_tag_name(&rest[1..]);
                if name.is_empty() {
                    // A bare `<` in text.
                    doc.push_text(&open, "<");
                    rest = &rest[1..];
                    continue;
                }
                let self_closing = tag_is_self_closing(remaining);
                rest = skip_past_tag(remaining);

                if RAW_TEXT.contains(&name.as_str()) {
                    let close = format!("</{}", name);
                    rest = find_ci(rest, &close)
                        .map(|i| skip_past_tag(&rest[i + close.len()..]))
                        .unwrap_or("");
                    continue;
                }

                if CLOSES_PARAGRAPH.contains(&name.as_str()) && has_open(&doc, &open, "p") {
                    close_element(&doc, &mut open, "p");
                }
                if name == "li" {
                    close_open_list_item(&doc, &mut open);
                }

                let parent = *open.last().unwrap_or(&Self::ROOT);
                let id = doc.push(NodeKind::Element(name.clone()), parent);
                if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
                    open.push(id);
                }
            }
        }
        doc
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Lowercase tag name, or `None` for text and the root.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element(name) => Some(name),
            _ => None,
        }
    }

    /// All elements named `name`, in document order.
    pub fn elements_named(&self, name: &str) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|&id| self.element_name(id) == Some(name))
            .collect()
    }

    /// All descendants of `id` named `name`, in document order.
    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&d| self.element_name(d) == Some(name))
            .collect()
    }

    /// Every node below `id`, in document order. Walks with an explicit
    /// stack, so nesting depth is bounded by memory rather than the call stack.
    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            order.push(next);
            stack.extend(self.nodes[next].children.iter().rev());
        }
        order
    }

    /// The next sibling of `id` that is an element, skipping text nodes.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|&s| matches!(self.nodes[s].kind, NodeKind::Element(_)))
    }

    /// Concatenated text of `id` and all its descendants.
    pub fn text(&self, id: NodeId) -> String {
        std::iter::once(id)
            .chain(self.descendants(id))
            .filter_map(|n| match &self.nodes[n].kind {
                NodeKind::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, kind: NodeKind, parent: NodeId) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    fn push_text(&mut self, open: &[NodeId], raw: &str) {
        let parent = *open.last().unwrap_or(&Self::ROOT);
        let text = decode_entities(raw);
        // Runs split by a comment or stray tag stay one text node.
        let last = self.nodes[parent].children.last().copied();
        if let Some(last) = last {
            if let NodeKind::Text(existing) = &mut self.nodes[last].kind {
                existing.push_str(&text);
                return;
            }
        }
        self.push(NodeKind::Text(text), parent);
    }
}

fn read_tag_name(s: &str) -> (String, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(s.len());
    (s[..end].to_ascii_lowercase(), &s[end..])
}

/// Advance past the closing `>` of a tag, honouring quoted attribute values.
fn skip_past_tag(s: &str) -> &str {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return &s[i + 1..],
            _ => {}
        }
    }
    ""
}

fn tag_is_self_closing(s: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut prev = ' ';
    for c in s.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return prev == '/',
            _ => {}
        }
        prev = c;
    }
    false
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(&needle.to_ascii_lowercase())
}

fn has_open(doc: &Document, open: &[NodeId], name: &str) -> bool {
    open.iter().any(|&id| doc.element_name(id) == Some(name))
}

/// Pop open elements up to and including the innermost `name`.
fn close_element(doc: &Document, open: &mut Vec<NodeId>, name: &str) {
    if let Some(pos) = open.iter().rposition(|&id| doc.element_name(id) == Some(name)) {
        open.truncate(pos);
    }
}

/// Close an `<li>` left open in the innermost list.
fn close_open_list_item(doc: &Document, open: &mut Vec<NodeId>) {
    for pos in (1..open.len()).rev() {
        match doc.element_name(open[pos]) {
            Some("li") => {
                open.truncate(pos);
                return;
            }
            Some("ul" | "ol") => return,
            _ => {}
        }
    }
}

/// Decode HTML character references: numeric ones (`&#8217;`, `&#x2019;`)
/// and the full HTML5 named set (`&rsquo;`, `&eacute;`, `&euro;`, …).
/// Unknown names are left as written.
pub fn decode_entities(s: &str) -> String {
    htmlize::unescape(s).into_owned()
}

/// Plain text of an HTML fragment (tags removed, references decoded).
pub fn text_content(html: &str) -> String {
    let doc = Document::parse(html);
    doc.text(Document::ROOT)
}
