//! Recursive descent parser turning selector tokens into a `SelectorNode` tree.
//!
//! ```text
//! selectorList  := conjunction (',' conjunction)*
//! conjunction   := scopeSelector ('|' scopeSelector)*
//! scopeSelector := [priority] ['^'] atom* ('-' scopeSelector)*
//! atom          := '(' selectorList ')' | LITERAL
//! ```
//!
//! Parsing never fails outright: whatever can be understood is kept and the rest is reported.
//! Groups and exclusions nest at most [`MAX_SCOPE_DEPTH`] levels deep.
//!
//! [`MAX_SCOPE_DEPTH`]: ../matching/constant.MAX_SCOPE_DEPTH.html
use tracing::warn;

use crate::matching::{Priority, ScopeSelector, SelectorNode, MAX_SCOPE_DEPTH};
use super::lexer::{tokenize, SpannedToken, Token};

/// Problems found while reading a selector.
///
/// The weighers only log these; [`SelectorNode::from_str`] turns them into hard errors.
///
/// [`SelectorNode::from_str`]: ../matching/enum.SelectorNode.html#method.from_str
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SelectorError {
    #[error("Empty scope selector")]
    Empty,
    #[error("Unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },
    #[error("Unexpected token at offset {offset}, the rest of the selector was ignored")]
    UnconsumedTokens { offset: usize },
    #[error("Unclosed parenthesis opened at offset {offset}")]
    UnclosedParen { offset: usize },
    #[error("Selector nested too deeply at offset {offset}, the rest of the selector was ignored")]
    TooDeep { offset: usize },
}

/// The outcome of [`parse_selector`]: the tree built, if any, and everything that was skipped.
///
/// [`parse_selector`]: fn.parse_selector.html
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// `None` when nothing usable was found, which weighs as "matches nothing".
    pub node: Option<SelectorNode>,
    pub errors: Vec<SelectorError>,
}

/// Parses selector text, recovering from malformed input.
///
/// Each problem is logged as a warning together with the selector text.
///
/// # Examples
///
/// ```
/// use tmselect::parsing::parse_selector;
/// let parsed = parse_selector("source.js meta.tag - string )");
/// assert!(parsed.node.is_some());
/// assert_eq!(parsed.errors.len(), 1);
/// assert!(parse_selector("").node.is_none());
/// ```
pub fn parse_selector(text: &str) -> ParsedSelector {
    let parsed = parse_selector_quietly(text);
    for error in &parsed.errors {
        warn!(selector = text, %error, "cannot fully parse scope selector");
    }
    parsed
}

pub(crate) fn parse_selector_quietly(text: &str) -> ParsedSelector {
    let (tokens, mut errors) = tokenize(text);
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: text.len(),
        depth: 0,
        too_deep: false,
        errors: Vec::new(),
    };
    let node = parser.selector_list();
    if parser.pos < parser.tokens.len() {
        parser.errors.push(SelectorError::UnconsumedTokens { offset: parser.offset() });
    }
    errors.append(&mut parser.errors);
    errors.sort_by_key(error_offset);
    ParsedSelector { node, errors }
}

fn error_offset(error: &SelectorError) -> usize {
    match *error {
        SelectorError::Empty => 0,
        SelectorError::UnexpectedCharacter { offset, .. } |
        SelectorError::UnconsumedTokens { offset } |
        SelectorError::UnclosedParen { offset } |
        SelectorError::TooDeep { offset } => offset,
    }
}

struct Parser<'s> {
    tokens: Vec<SpannedToken<'s>>,
    pos: usize,
    end: usize,
    depth: usize,
    /// Set once nesting went past the limit and the remaining tokens were dropped.
    too_deep: bool,
    errors: Vec<SelectorError>,
}

impl<'s> Parser<'s> {
    fn peek(&self) -> Option<Token<'s>> {
        self.tokens.get(self.pos).map(|&(token, _)| token)
    }

    /// Byte offset of the next token, or the end of the text.
    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |(_, span)| span.start)
    }

    fn eat(&mut self, token: Token<'_>) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Runs `parse` one nesting level down. Past the limit, the rest of the tokens are dropped
    /// instead, with a diagnostic pointing at `offset`.
    fn descend<F>(&mut self, offset: usize, parse: F) -> Option<SelectorNode>
        where F: FnOnce(&mut Parser<'s>) -> Option<SelectorNode>
    {
        if self.depth >= MAX_SCOPE_DEPTH {
            self.errors.push(SelectorError::TooDeep { offset });
            self.too_deep = true;
            self.pos = self.tokens.len();
            return None;
        }
        self.depth += 1;
        let node = parse(self);
        self.depth -= 1;
        node
    }

    fn selector_list(&mut self) -> Option<SelectorNode> {
        let mut alternatives: Vec<SelectorNode> = self.conjunction().into_iter().collect();
        while self.eat(Token::Comma) {
            alternatives.extend(self.conjunction());
        }
        collapse(alternatives, SelectorNode::SelectorList)
    }

    fn conjunction(&mut self) -> Option<SelectorNode> {
        let mut alternatives: Vec<SelectorNode> = self.scope_selector().into_iter().collect();
        while self.eat(Token::Pipe) {
            alternatives.extend(self.scope_selector());
        }
        collapse(alternatives, SelectorNode::Conjunction)
    }

    /// An exclusion is a full scope selector with exclusions of its own, so `a - b - c` reads as
    /// `a` excluding (`b` excluding `c`).
    fn scope_selector(&mut self) -> Option<SelectorNode> {
        let priority = match self.peek() {
            Some(Token::Priority(priority)) => {
                self.pos += 1;
                priority
            }
            _ => Priority::Normal,
        };
        let anchored = self.eat(Token::Caret);

        let mut segments = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Literal(text)) => {
                    self.pos += 1;
                    segments.push(SelectorNode::Selector(text.to_owned()));
                }
                Some(Token::LParen) => {
                    let open = self.offset();
                    self.pos += 1;
                    let group = self.descend(open, |parser| parser.selector_list());
                    if !self.eat(Token::RParen) && !self.too_deep {
                        self.errors.push(SelectorError::UnclosedParen { offset: open });
                    }
                    segments.extend(group);
                }
                _ => break,
            }
        }

        let mut exclusions = Vec::new();
        loop {
            let minus = self.offset();
            if !self.eat(Token::Minus) {
                break;
            }
            exclusions.extend(self.descend(minus, |parser| parser.scope_selector()));
        }

        // nothing but operators, like `^` or `()`
        if segments.is_empty() && exclusions.is_empty() {
            return None;
        }
        Some(SelectorNode::ScopeSelector(ScopeSelector::new(segments, exclusions, anchored, priority)))
    }
}

/// A single alternative stands for itself rather than a one-element list.
fn collapse<F>(mut alternatives: Vec<SelectorNode>, wrap: F) -> Option<SelectorNode>
    where F: FnOnce(Vec<SelectorNode>) -> SelectorNode
{
    match alternatives.len() {
        0 => None,
        1 => alternatives.pop(),
        _ => Some(wrap(alternatives)),
    }
}
