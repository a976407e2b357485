//! Splits selector text into tokens for the selector parser.
use std::ops::Range;

use logos::Logos;

use crate::matching::Priority;
use super::SelectorError;

/// A lexical element of a scope selector.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum Token<'s> {
    #[token(",")]
    Comma,
    #[token("|")]
    Pipe,
    #[token("-")]
    Minus,
    #[token("^")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // `L:` / `R:` / `B:` prefixes, as in Sublime Text color schemes
    #[regex(r"[LRB]:", |lex| match lex.slice().as_bytes()[0] {
        b'L' => Priority::High,
        b'R' => Priority::Low,
        _ => Priority::Normal,
    })]
    Priority(Priority),

    /// A scope name such as `string.quoted` or `punctuation.separator.key-value`.
    #[regex(r"[^\s,|^()\-:][^\s,|^():]*", |lex| lex.slice())]
    Literal(&'s str),
}

/// A token together with its byte range in the selector text.
pub type SpannedToken<'s> = (Token<'s>, Range<usize>);

/// Tokenizes selector text.
///
/// Characters that cannot start any token are skipped and reported as
/// [`SelectorError::UnexpectedCharacter`], so a single stray character doesn't throw away an
/// otherwise usable selector.
///
/// # Examples
///
/// ```
/// use tmselect::parsing::{tokenize, Token};
/// let (tokens, errors) = tokenize("L:source.js -comment");
/// let kinds: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
/// assert_eq!(kinds, vec![
///     Token::Priority(tmselect::matching::Priority::High),
///     Token::Literal("source.js"),
///     Token::Minus,
///     Token::Literal("comment"),
/// ]);
/// assert!(errors.is_empty());
/// ```
pub fn tokenize(text: &str) -> (Vec<SpannedToken<'_>>, Vec<SelectorError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or_default();
                errors.push(SelectorError::UnexpectedCharacter { character, offset: span.start });
            }
        }
    }

    (tokens, errors)
}
