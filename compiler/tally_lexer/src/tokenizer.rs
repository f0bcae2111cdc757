//! Lazy tokenizer built on logos.
//!
//! logos only splits the input; classification of word runs into
//! identifiers, numbers, and invalid words happens in [`classify_word`] so the
//! word boundary stays exactly "maximal run of non-delimiters".

use logos::Logos;

use crate::{Span, Token, TokenKind, TokenList};

/// Raw token from logos (before word classification).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum RawToken {
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Everything up to the next delimiter.
    #[regex(r"[^ \t*+\-/()\[\]]+")]
    Word,
}

/// Forward-only token iterator over one expression.
///
/// Restart by creating a new tokenizer; there is no rewind.
pub struct Tokenizer<'src> {
    lexer: logos::Lexer<'src, RawToken>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Tokenizer {
            lexer: RawToken::lexer(source),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let raw = self.lexer.next()?;
        let span = Span::from_range(self.lexer.span());
        let kind = match raw {
            Ok(RawToken::Plus) => TokenKind::Plus,
            Ok(RawToken::Minus) => TokenKind::Minus,
            Ok(RawToken::Star) => TokenKind::Star,
            Ok(RawToken::Slash) => TokenKind::Slash,
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::LBracket) => TokenKind::LBracket,
            Ok(RawToken::RBracket) => TokenKind::RBracket,
            Ok(RawToken::Word) => classify_word(self.lexer.slice()),
            Err(()) => TokenKind::Invalid,
        };
        Some(Token::new(kind, span))
    }
}

/// Tokenize `source` into a `TokenList`.
pub fn tokenize(source: &str) -> TokenList {
    Tokenizer::new(source).collect()
}

fn classify_word(word: &str) -> TokenKind {
    if word.bytes().all(|b| b.is_ascii_alphabetic()) {
        return TokenKind::Ident;
    }
    if is_decimal_literal(word) {
        if let Ok(value) = word.parse::<f64>() {
            return TokenKind::Number(value);
        }
    }
    TokenKind::Invalid
}

/// Digits with at most one `.` and at least one digit.
fn is_decimal_literal(word: &str) -> bool {
    let mut digits = 0usize;
    let mut dots = 0usize;
    for b in word.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}
