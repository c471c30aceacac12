//! Generic tree: the untyped, serializable form of a program.
//!
//! A tree is either a leaf carrying text or a tagged node with ordered
//! children. Any tree can be constructed; only decoding checks that tags and
//! arities make sense:
//!
//! ```text
//! (Lit 8)          literal, one leaf child parsing as i64
//! (Neg e)          negation, one child
//! (Add e1 e2)      addition, two children
//! (Mul e1 e2)      multiplication, two children (extended tier only)
//! ```
//!
//! Two external forms are supported: s-expression text (`Display` and
//! `reader`) and JSON through serde.

pub mod build;
pub mod decode;
pub mod reader;

use serde::{Deserialize, Serialize};

pub use build::{build, Build};
pub use decode::{decode, decode_mul, Base, DecodeError, DecodeOptions, Decoder, Tier, WithMul};
pub use reader::{parse_tree, SourceMap};

use decode::DEFAULT_MAX_DEPTH;

pub const LIT: &str = "Lit";
pub const NEG: &str = "Neg";
pub const ADD: &str = "Add";
pub const MUL: &str = "Mul";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tree {
    Leaf(String),
    Node { tag: String, children: Vec<Tree> },
}

impl Tree {
    pub fn leaf(text: impl Into<String>) -> Self {
        Tree::Leaf(text.into())
    }

    pub fn node(tag: impl Into<String>, children: Vec<Tree>) -> Self {
        Tree::Node {
            tag: tag.into(),
            children,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Tree::Leaf(_) => None,
            Tree::Node { tag, .. } => Some(tag),
        }
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Node { children, .. } => children,
        }
    }

    /// Look up the subtree at a child-index path (as carried by `DecodeError`).
    pub fn at(&self, path: &[usize]) -> Option<&Tree> {
        path.iter()
            .try_fold(self, |tree, &index| tree.children().get(index))
    }

    /// Number of leaves and nodes.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            count += 1;
            stack.extend(tree.children());
        }
        count
    }

    /// Parse the s-expression form. Errors carry source spans.
    pub fn parse(source: &str) -> Result<Tree, Vec<crate::diagnostic::Diagnostic>> {
        parse_tree(source).map(|(tree, _)| tree)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Read the JSON form, accepting the same nesting as a default `Decoder`.
    pub fn from_json(json: &str) -> serde_json::Result<Tree> {
        Tree::from_json_with_max_depth(json, DEFAULT_MAX_DEPTH)
    }

    /// Read the JSON form, rejecting trees more than `max_depth` nodes deep
    /// before any recursive deserialization starts.
    pub fn from_json_with_max_depth(json: &str, max_depth: usize) -> serde_json::Result<Tree> {
        let limit = max_depth
            .saturating_mul(JSON_LEVELS_PER_NODE)
            .saturating_add(1);
        if json_nesting(json) > limit {
            return Err(<serde_json::Error as serde::de::Error>::custom(format!(
                "tree nesting exceeds {} levels",
                max_depth
            )));
        }
        let mut de = serde_json::Deserializer::from_str(json);
        de.disable_recursion_limit();
        let tree = Tree::deserialize(&mut de)?;
        de.end()?;
        Ok(tree)
    }
}

/// `{"Node": {"tag": .., "children": [ .. ]}}`: three JSON levels per node.
const JSON_LEVELS_PER_NODE: usize = 3;

/// Deepest bracket nesting in `json`, ignoring brackets inside strings.
fn json_nesting(json: &str) -> usize {
    let (mut depth, mut deepest) = (0usize, 0usize);
    let (mut in_string, mut escaped) = (false, false);
    for b in json.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

/// Children are moved onto a heap stack, so dropping a deep tree does not
/// recurse.
impl Drop for Tree {
    fn drop(&mut self) {
        let Tree::Node { children, .. } = self else {
            return;
        };
        let mut stack = std::mem::take(children);
        while let Some(mut tree) = stack.pop() {
            if let Tree::Node { children, .. } = &mut tree {
                stack.append(children);
            }
        }
    }
}

/// Leaves and tags print bare unless they would not read back as one atom.
fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text
            .bytes()
            .any(|b| b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b'"' | b';' | b'\\'))
}

fn write_atom(f: &mut std::fmt::Formatter<'_>, text: &str) -> std::fmt::Result {
    if !needs_quotes(text) {
        return f.write_str(text);
    }
    f.write_str("\"")?;
    for ch in text.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            _ => write!(f, "{}", ch)?,
        }
    }
    f.write_str("\"")
}

enum Step<'a> {
    Tree(&'a Tree),
    Space,
    Close,
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut stack = vec![Step::Tree(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Tree(Tree::Leaf(text)) => write_atom(f, text)?,
                Step::Tree(Tree::Node { tag, children }) => {
                    f.write_str("(")?;
                    write_atom(f, tag)?;
                    stack.push(Step::Close);
                    for child in children.iter().rev() {
                        stack.push(Step::Tree(child));
                        stack.push(Step::Space);
                    }
                }
                Step::Space => f.write_str(" ")?,
                Step::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}
