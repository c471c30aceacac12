//! Tree decoding: replay a generic tree against any interpretation.
//!
//! Decoding is split into tiers. A tier recognizes a set of tags and decodes
//! their children through the *outermost* tier, so tiers compose by
//! wrapping:
//!
//! ```text
//! Base              Lit, Neg, Add
//! WithMul<Base>     Mul, then everything Base knows
//! ```
//!
//! Children of an `Add` inside a `WithMul<Base>` decoder may themselves be
//! `Mul` nodes, because recursion always restarts at the top tier. Adding an
//! operator means writing one more wrapping tier; `Base` is never edited.
//!
//! Decoding is all-or-nothing: the first malformed node aborts the whole
//! decode and no partial result escapes.

#[cfg(test)]
mod tests;

use tracing::{debug, trace};

use super::{Tree, ADD, LIT, MUL, NEG};
use crate::algebra::{ExpSym, MulSym};
use crate::diagnostic::Diagnostic;
use crate::span::Span;

use super::reader::SourceMap;

/// Default bound on nesting depth, counted in decoded nodes.
pub const DEFAULT_MAX_DEPTH: usize = 512;

// ─── Errors ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Node tag not recognized by the active tier.
    UnknownTag {
        tag: String,
        expected: Vec<&'static str>,
    },
    /// Recognized tag with the wrong number of children.
    Arity {
        tag: String,
        expected: usize,
        found: usize,
    },
    /// `Lit` payload that does not parse as an `i64`.
    BadLiteral { text: String },
    /// A leaf where an expression node was required.
    ExpectedNode { leaf: String },
    /// A node where the `Lit` payload leaf was required.
    ExpectedLeaf { tag: String },
    /// Nesting deeper than `DecodeOptions::max_depth`.
    TooDeep { limit: usize },
}

/// A decode failure and the child-index path of the offending subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub path: Vec<usize>,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, path: Vec<usize>) -> Self {
        Self { kind, path }
    }

    /// Turn into a diagnostic, located through `map` when the tree was read
    /// from text.
    pub fn to_diagnostic(&self, map: Option<&SourceMap>) -> Diagnostic {
        let span = map
            .and_then(|m| m.span_of(&self.path))
            .unwrap_or_else(Span::dummy);
        let mut diag = Diagnostic::error(self.to_string(), span);
        match &self.kind {
            DecodeErrorKind::UnknownTag { expected, .. } => {
                diag = diag.with_help(format!("expected one of: {}", expected.join(", ")));
            }
            DecodeErrorKind::Arity { tag, expected, .. } => {
                diag = diag.with_note(format!(
                    "`{}` takes {} operand{}",
                    tag,
                    expected,
                    if *expected == 1 { "" } else { "s" }
                ));
            }
            DecodeErrorKind::BadLiteral { .. } => {
                diag = diag.with_note(format!(
                    "literals are signed 64-bit integers ({}..={})",
                    i64::MIN,
                    i64::MAX
                ));
            }
            DecodeErrorKind::TooDeep { .. } => {
                diag = diag.with_help("raise the depth limit with --max-depth".to_string());
            }
            DecodeErrorKind::ExpectedNode { .. } | DecodeErrorKind::ExpectedLeaf { .. } => {}
        }
        diag
    }
}

/// Renders a path as `/1/0`; the root is `/`.
pub fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.iter().map(|i| format!("/{}", i)).collect()
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = format_path(&self.path);
        match &self.kind {
            DecodeErrorKind::UnknownTag { tag, .. } => {
                write!(f, "unknown tag `{}` at {}", tag, at)
            }
            DecodeErrorKind::Arity {
                tag,
                expected,
                found,
            } => write!(
                f,
                "`{}` expects {} children, found {} at {}",
                tag, expected, found, at
            ),
            DecodeErrorKind::BadLiteral { text } => {
                write!(f, "invalid integer literal `{}` at {}", text, at)
            }
            DecodeErrorKind::ExpectedNode { leaf } => {
                write!(f, "expected an expression node, found leaf `{}` at {}", leaf, at)
            }
            DecodeErrorKind::ExpectedLeaf { tag } => {
                write!(f, "expected a literal leaf, found node `{}` at {}", tag, at)
            }
            DecodeErrorKind::TooDeep { limit } => {
                write!(f, "tree nesting exceeds {} levels at {}", limit, at)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

// ─── Options ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested expression nodes, root included.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ─── Tiers ─────────────────────────────────────────────────────────

/// One layer of the decoder.
///
/// `decode_node` handles a single node. It must decode operands with
/// `Cursor::child`, which dispatches back to the top tier `T`.
pub trait Tier<S: ExpSym> {
    fn decode_node<T: Tier<S>>(
        &self,
        cx: &mut Cursor<'_, T, S>,
        tag: &str,
        children: &[Tree],
    ) -> Result<S::Repr, DecodeError>;

    /// Tags this tier (and the tiers it wraps) recognize.
    fn known_tags(&self, tags: &mut Vec<&'static str>);
}

/// Decodes `Lit`, `Neg` and `Add`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base;

impl<S: ExpSym> Tier<S> for Base {
    fn decode_node<T: Tier<S>>(
        &self,
        cx: &mut Cursor<'_, T, S>,
        tag: &str,
        children: &[Tree],
    ) -> Result<S::Repr, DecodeError> {
        match tag {
            LIT => {
                let n = cx.literal(children)?;
                Ok(cx.sym().lit(n))
            }
            NEG => {
                let [e] = cx.operands::<1>(NEG, children)?;
                let e = cx.child(0, e)?;
                Ok(cx.sym().neg(e))
            }
            ADD => {
                let [e1, e2] = cx.operands::<2>(ADD, children)?;
                let e1 = cx.child(0, e1)?;
                let e2 = cx.child(1, e2)?;
                Ok(cx.sym().add(e1, e2))
            }
            _ => Err(cx.unknown_tag(tag)),
        }
    }

    fn known_tags(&self, tags: &mut Vec<&'static str>) {
        tags.extend([LIT, NEG, ADD]);
    }
}

/// Adds `Mul` on top of an inner tier; every other tag goes to the inner tier.
#[derive(Clone, Copy, Debug, Default)]
pub struct WithMul<I = Base>(pub I);

impl<S: MulSym, I: Tier<S>> Tier<S> for WithMul<I> {
    fn decode_node<T: Tier<S>>(
        &self,
        cx: &mut Cursor<'_, T, S>,
        tag: &str,
        children: &[Tree],
    ) -> Result<S::Repr, DecodeError> {
        if tag != MUL {
            return self.0.decode_node(cx, tag, children);
        }
        let [e1, e2] = cx.operands::<2>(MUL, children)?;
        let e1 = cx.child(0, e1)?;
        let e2 = cx.child(1, e2)?;
        Ok(cx.sym().mul(e1, e2))
    }

    fn known_tags(&self, tags: &mut Vec<&'static str>) {
        self.0.known_tags(tags);
        tags.push(MUL);
    }
}

// ─── Cursor ────────────────────────────────────────────────────────

/// Decoding state threaded through the tiers: the top tier, the target
/// interpretation and the path to the node being decoded.
pub struct Cursor<'a, T, S> {
    top: &'a T,
    sym: &'a S,
    max_depth: usize,
    path: Vec<usize>,
}

impl<'a, T: Tier<S>, S: ExpSym> Cursor<'a, T, S> {
    fn new(top: &'a T, sym: &'a S, max_depth: usize) -> Self {
        Self {
            top,
            sym,
            max_depth,
            path: Vec::new(),
        }
    }

    pub fn sym(&self) -> &'a S {
        self.sym
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Decode operand `index` of the current node through the top tier.
    pub fn child(&mut self, index: usize, tree: &Tree) -> Result<S::Repr, DecodeError> {
        self.path.push(index);
        let result = self.decode(tree);
        self.path.pop();
        result
    }

    fn decode(&mut self, tree: &Tree) -> Result<S::Repr, DecodeError> {
        if self.path.len() >= self.max_depth {
            return Err(self.error(DecodeErrorKind::TooDeep {
                limit: self.max_depth,
            }));
        }
        match tree {
            Tree::Leaf(text) => Err(self.error(DecodeErrorKind::ExpectedNode {
                leaf: text.clone(),
            })),
            Tree::Node { tag, children } => {
                let top = self.top;
                top.decode_node(self, tag, children)
            }
        }
    }

    /// Error located at the current node.
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.path.clone())
    }

    fn error_at(&self, index: usize, kind: DecodeErrorKind) -> DecodeError {
        let mut path = self.path.clone();
        path.push(index);
        DecodeError::new(kind, path)
    }

    pub fn unknown_tag(&self, tag: &str) -> DecodeError {
        let mut expected = Vec::new();
        self.top.known_tags(&mut expected);
        self.error(DecodeErrorKind::UnknownTag {
            tag: tag.to_string(),
            expected,
        })
    }

    /// Check that the node has exactly `N` children.
    pub fn operands<'t, const N: usize>(
        &self,
        tag: &str,
        children: &'t [Tree],
    ) -> Result<&'t [Tree; N], DecodeError> {
        children.try_into().map_err(|_| {
            self.error(DecodeErrorKind::Arity {
                tag: tag.to_string(),
                expected: N,
                found: children.len(),
            })
        })
    }

    /// Parse the single leaf child of a `Lit` node.
    pub fn literal(&self, children: &[Tree]) -> Result<i64, DecodeError> {
        let [payload] = self.operands::<1>(LIT, children)?;
        match payload {
            Tree::Leaf(text) => text.parse::<i64>().map_err(|_| {
                self.error_at(0, DecodeErrorKind::BadLiteral { text: text.clone() })
            }),
            Tree::Node { tag, .. } => {
                Err(self.error_at(0, DecodeErrorKind::ExpectedLeaf { tag: tag.clone() }))
            }
        }
    }
}

// ─── Decoder ───────────────────────────────────────────────────────

/// A tier plus decoding options. The interpretation is supplied per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decoder<T> {
    tier: T,
    options: DecodeOptions,
}

impl Decoder<Base> {
    pub fn base() -> Self {
        Self::new(Base)
    }
}

impl Decoder<WithMul> {
    pub fn with_mul() -> Self {
        Self::new(WithMul(Base))
    }
}

impl<T> Decoder<T> {
    pub fn new(tier: T) -> Self {
        Self {
            tier,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn tier(&self) -> &T {
        &self.tier
    }

    /// Replay `tree` against `sym`.
    pub fn decode<S: ExpSym>(&self, tree: &Tree, sym: &S) -> Result<S::Repr, DecodeError>
    where
        T: Tier<S>,
    {
        trace!(
            target: "tagless::decode",
            tag = tree.tag().unwrap_or("<leaf>"),
            max_depth = self.options.max_depth,
            "Decoding tree"
        );
        let mut cx = Cursor::new(&self.tier, sym, self.options.max_depth);
        let result = cx.decode(tree);
        if let Err(err) = &result {
            debug!(target: "tagless::decode", path = %format_path(&err.path), %err, "Decode failed");
        }
        result
    }
}

/// Decode with the base tier (`Lit`, `Neg`, `Add`).
pub fn decode<S: ExpSym>(tree: &Tree, sym: &S) -> Result<S::Repr, DecodeError> {
    Decoder::base().decode(tree, sym)
}

/// Decode with the extended tier (`Mul` as well).
pub fn decode_mul<S: MulSym>(tree: &Tree, sym: &S) -> Result<S::Repr, DecodeError> {
    Decoder::with_mul().decode(tree, sym)
}
