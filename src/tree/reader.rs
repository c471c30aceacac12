//! S-expression reader for generic trees.
//!
//! ```text
//! tree  := atom | "(" head tree* ")"
//! head  := atom
//! atom  := bare | string
//! bare  := any run of bytes other than whitespace, ( ) " ;
//! ```
//!
//! `;` starts a comment that runs to the end of the line. Strings use `\"`,
//! `\\`, `\n` and `\t` escapes. Parsing is iterative, so nesting depth is
//! bounded only by memory; depth limits are the decoder's business.
//!
//! Besides the tree, the reader returns a `SourceMap` from child-index
//! paths to spans, which lets decode errors point at the source text. It
//! keeps one preorder entry per subtree, so it grows linearly with input.

use tracing::debug;

use super::Tree;
use crate::diagnostic::Diagnostic;
use crate::span::{Span, Spanned};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    LParen,
    RParen,
    /// Bare or quoted atom, already unescaped.
    Atom(String),
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::Atom(text) => format!("atom `{}`", text),
            Token::Eof => "end of input".to_string(),
        }
    }
}

// ─── Lexer ─────────────────────────────────────────────────────────

struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source: source.as_bytes(),
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    fn tokenize(mut self) -> (Vec<Spanned<Token>>, Vec<Diagnostic>) {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.node == Token::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    fn next_token(&mut self) -> Spanned<Token> {
        self.skip_whitespace_and_comments();

        let start = self.pos;
        let Some(&ch) = self.source.get(self.pos) else {
            return self.make_token(Token::Eof, start, start);
        };

        match ch {
            b'(' => {
                self.pos += 1;
                self.make_token(Token::LParen, start, self.pos)
            }
            b')' => {
                self.pos += 1;
                self.make_token(Token::RParen, start, self.pos)
            }
            b'"' => self.scan_string(),
            _ => self.scan_bare(),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.source.get(self.pos) {
            if ch.is_ascii_whitespace() {
                self.pos += 1;
            } else if ch == b';' {
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    fn scan_bare(&mut self) -> Spanned<Token> {
        let start = self.pos;
        while let Some(&ch) = self.source.get(self.pos) {
            if ch.is_ascii_whitespace() || matches!(ch, b'(' | b')' | b'"' | b';') {
                break;
            }
            self.pos += 1;
        }
        // Stops only at ASCII bytes, so the slice is on char boundaries.
        let text = String::from_utf8_lossy(&self.source[start..self.pos]).into_owned();
        self.make_token(Token::Atom(text), start, self.pos)
    }

    fn scan_string(&mut self) -> Spanned<Token> {
        let start = self.pos;
        self.pos += 1; // opening quote
        let mut bytes = Vec::new();
        loop {
            let Some(&ch) = self.source.get(self.pos) else {
                self.diagnostics.push(
                    Diagnostic::error(
                        "unterminated string".to_string(),
                        Span::from_offsets(start, self.pos),
                    )
                    .with_help("close the string with `\"`".to_string()),
                );
                break;
            };
            self.pos += 1;
            match ch {
                b'"' => break,
                b'\\' => {
                    let esc_start = self.pos - 1;
                    match self.source.get(self.pos) {
                        Some(b'"') => bytes.push(b'"'),
                        Some(b'\\') => bytes.push(b'\\'),
                        Some(b'n') => bytes.push(b'\n'),
                        Some(b't') => bytes.push(b'\t'),
                        other => {
                            let end = if other.is_some() { self.pos + 1 } else { self.pos };
                            self.diagnostics.push(
                                Diagnostic::error(
                                    "invalid escape sequence".to_string(),
                                    Span::from_offsets(esc_start, end),
                                )
                                .with_note("supported escapes: \\\" \\\\ \\n \\t".to_string()),
                            );
                        }
                    }
                    if self.pos < self.source.len() {
                        self.pos += 1;
                    }
                }
                _ => bytes.push(ch),
            }
        }
        let text = String::from_utf8_lossy(&bytes).into_owned();
        self.make_token(Token::Atom(text), start, self.pos)
    }

    fn make_token(&self, token: Token, start: usize, end: usize) -> Spanned<Token> {
        Spanned::new(token, Span::from_offsets(start, end))
    }
}

// ─── Source map ────────────────────────────────────────────────────

/// One subtree in preorder: its span, how many entries it covers (itself
/// included) and how many children it has.
#[derive(Clone, Copy, Debug)]
struct Entry {
    span: Span,
    size: usize,
    arity: usize,
}

/// Spans of every subtree, stored in preorder and addressed by child-index
/// path from the root.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<Entry>,
}

impl SourceMap {
    /// Span of the subtree at `path`, or of its nearest recorded ancestor.
    pub fn span_of(&self, path: &[usize]) -> Option<Span> {
        let mut index = 0;
        let mut entry = self.entries.first()?;
        for &step in path {
            if step >= entry.arity {
                break;
            }
            // First child follows its parent; later siblings skip whole subtrees.
            let mut child = index + 1;
            for _ in 0..step {
                child += self.entries[child].size;
            }
            index = child;
            entry = &self.entries[index];
        }
        Some(entry.span)
    }

    /// Reserve the preorder slot of a subtree that starts here.
    fn open(&mut self) -> usize {
        self.entries.push(Entry {
            span: Span::dummy(),
            size: 0,
            arity: 0,
        });
        self.entries.len() - 1
    }

    /// Fill in the slot once every descendant has been recorded.
    fn close(&mut self, index: usize, span: Span, arity: usize) {
        let size = self.entries.len() - index;
        self.entries[index] = Entry { span, size, arity };
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─── Parser ────────────────────────────────────────────────────────

/// An open `(` whose children are still being read.
struct Frame {
    tag: String,
    children: Vec<Tree>,
    open: Span,
    slot: usize,
}

struct Parser {
    tokens: Vec<Spanned<Token>>,
    pos: usize,
    stack: Vec<Frame>,
    map: SourceMap,
}

impl Parser {
    fn new(tokens: Vec<Spanned<Token>>) -> Self {
        Self {
            tokens,
            pos: 0,
            stack: Vec::new(),
            map: SourceMap::default(),
        }
    }

    fn advance(&mut self) -> Spanned<Token> {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    /// Attach a finished subtree to the enclosing frame, or return it as
    /// the root when no frame is open.
    fn finish(&mut self, tree: Tree) -> Option<Tree> {
        match self.stack.last_mut() {
            Some(top) => {
                top.children.push(tree);
                None
            }
            None => Some(tree),
        }
    }

    fn parse(mut self) -> Result<(Tree, SourceMap), Diagnostic> {
        let root = loop {
            let tok = self.advance();
            let done = match tok.node {
                Token::Atom(text) => {
                    let slot = self.map.open();
                    self.map.close(slot, tok.span, 0);
                    self.finish(Tree::Leaf(text))
                }
                Token::LParen => {
                    let head = self.advance();
                    let tag = match head.node {
                        Token::Atom(tag) => tag,
                        other => {
                            return Err(Diagnostic::error(
                                format!("expected a node tag, found {}", other.describe()),
                                head.span,
                            )
                            .with_help(
                                "every node starts with its tag, as in `(Lit 8)`".to_string(),
                            ));
                        }
                    };
                    let slot = self.map.open();
                    self.stack.push(Frame {
                        tag,
                        children: Vec::new(),
                        open: tok.span,
                        slot,
                    });
                    None
                }
                Token::RParen => {
                    let Some(frame) = self.stack.pop() else {
                        return Err(Diagnostic::error("unbalanced `)`".to_string(), tok.span));
                    };
                    let span = frame.open.merge(tok.span);
                    self.map.close(frame.slot, span, frame.children.len());
                    self.finish(Tree::node(frame.tag, frame.children))
                }
                Token::Eof => {
                    return Err(match self.stack.last() {
                        Some(frame) => Diagnostic::error("unclosed `(`".to_string(), frame.open)
                            .with_note(format!(
                                "node `{}` was still open at end of input",
                                frame.tag
                            )),
                        None => Diagnostic::error("empty input".to_string(), tok.span)
                            .with_help("expected a tree such as `(Lit 8)`".to_string()),
                    });
                }
            };
            if let Some(tree) = done {
                break tree;
            }
        };

        let trailing = self.advance();
        if trailing.node != Token::Eof {
            return Err(Diagnostic::error(
                format!("unexpected {} after the tree", trailing.node.describe()),
                trailing.span,
            )
            .with_note("input must contain exactly one tree".to_string()));
        }
        Ok((root, self.map))
    }
}

/// Parse s-expression text into a tree and its source map.
pub fn parse_tree(source: &str) -> Result<(Tree, SourceMap), Vec<Diagnostic>> {
    let (tokens, lex_errors) = Lexer::new(source).tokenize();
    if !lex_errors.is_empty() {
        debug!(target: "tagless::reader", errors = lex_errors.len(), "Lexing failed");
        return Err(lex_errors);
    }
    Parser::new(tokens).parse().map_err(|diag| {
        debug!(target: "tagless::reader", message = %diag.message, "Parsing failed");
        vec![diag]
    })
}
