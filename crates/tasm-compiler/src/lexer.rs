//! Lexer for one line of assembly.
//!
//! Tokens carry byte spans relative to the line; text is sliced from the line
//! only when needed. Consecutive unrecognised characters coalesce into a single
//! `Garbage` token.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    /// `:name`, a definition at line start and a reference elsewhere.
    /// The name may be empty so the parser can report it.
    #[regex(r":[A-Za-z0-9_]*")]
    Label,

    /// `x3`, or `fx3` for float registers.
    #[regex(r"[fF]?[xX][0-9]+", priority = 5)]
    Register,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[+-]?[0-9]+")]
    Int,

    #[regex(r"[+-]?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    /// Closing quote is optional here so a missing one becomes a parse error.
    /// `'''` is the quote byte itself.
    #[token("'''")]
    #[regex(r"'[^'\n]*'?", allow_greedy = true)]
    Char,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r";[^\n]*", allow_greedy = true)]
    Comment,

    /// Coalesced unrecognised input.
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'src>(&self, line: &'src str) -> &'src str {
        &line[self.span.clone()]
    }
}

/// Tokenize one line, dropping whitespace and comments.
pub fn lex(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(line);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..lexer.span().start,
                    });
                }
                if !kind.is_trivia() {
                    tokens.push(Token {
                        kind,
                        span: lexer.span(),
                    });
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..line.len(),
                    });
                }
                break;
            }
        }
    }

    tokens
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod lexer_tests;
