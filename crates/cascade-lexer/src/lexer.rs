// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use cascade_ast::token::{NumberSuffix, Token, TokenKind};
use cascade_ast::{LineMap, Span};
use logos::Logos;

/// Raw token type for logos - literal values are built in a second pass.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    // === Two-character operators ===
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token(">=")]
    GtEq,
    #[token("<=")]
    LtEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("^=")]
    CaretEq,
    #[token("%=")]
    PercentEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("^^")]
    CaretCaret,
    #[token("->")]
    Arrow,
    #[token("<-")]
    LeftArrow,

    // === Single-character operators ===
    #[token("_", priority = 5)]
    Underscore,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("-")]
    Minus,
    #[token("^")]
    Caret,
    #[token("%")]
    Percent,
    #[token("/")]
    Slash,
    #[token("?")]
    Question,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("\\")]
    Backslash,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("!")]
    Bang,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,

    // === Comments (skip them) ===
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    // === Literals ===
    // Maximal digit/dot run; more than one dot is rejected in number_token.
    #[regex(r"[0-9][0-9.]*|\.[0-9][0-9.]*")]
    Number,

    // No escape sequences: a string ends at the next quote.
    #[regex(r#""[^"]*""#)]
    String,

    #[regex(r#""[^"]*"#)]
    UnterminatedString,

    // === Identifier (keywords resolved afterwards) ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The lexer for Cascade source code.
pub struct Lexer<'a> {
    source: &'a str,
    lines: LineMap,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lines: LineMap::new(source),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// Unexpected characters are recorded and skipped. A malformed string or
    /// number aborts the whole pass and yields no tokens.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut logos_lexer = RawToken::lexer(self.source);

        while let Some(result) = logos_lexer.next() {
            if self.errors.len() >= MAX_ERRORS {
                break;
            }

            let mut span = logos_lexer.span();

            let kind = match result {
                Ok(RawToken::Number) => {
                    let suffix = suffix_at(self.source, span.end);
                    if suffix.is_some() {
                        logos_lexer.bump(1);
                        span.end += 1;
                    }
                    match number_token(logos_lexer.slice(), suffix, span.start, span.end) {
                        Ok(kind) => kind,
                        Err(e) => return self.abort(e),
                    }
                }
                Ok(RawToken::UnterminatedString) => {
                    return self.abort(LexError::unterminated_string(span.start, span.end));
                }
                Ok(raw) => convert_token(raw, logos_lexer.slice()),
                Err(()) => {
                    let ch = self.source[span.start..].chars().next().unwrap_or('?');
                    self.errors.push(LexError::unexpected_char(ch, span.start));
                    continue;
                }
            };

            tokens.push(Token {
                kind,
                span: Span::new(span.start, span.end),
                line: self.lines.line_of(span.start),
            });
        }

        let end = tokens.last().map_or(0, |tok| tok.span.end);
        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(end, end),
            line: self.lines.line_of(end),
        });

        LexResult {
            tokens,
            errors: std::mem::take(&mut self.errors),
        }
    }

    fn abort(&mut self, fatal: LexError) -> LexResult {
        self.errors.push(fatal);
        LexResult {
            tokens: Vec::new(),
            errors: std::mem::take(&mut self.errors),
        }
    }
}

/// Convert a raw logos token to our TokenKind.
fn convert_token(raw: RawToken, slice: &str) -> TokenKind {
    match raw {
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::CaretEq => TokenKind::CaretEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::CaretCaret => TokenKind::CaretCaret,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::LeftArrow => TokenKind::LeftArrow,

        RawToken::Underscore => TokenKind::Underscore,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Star => TokenKind::Star,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Question => TokenKind::Question,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Backslash => TokenKind::Backslash,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Bang => TokenKind::Bang,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semi => TokenKind::Semi,

        RawToken::String => TokenKind::String(slice[1..slice.len() - 1].to_string()),
        RawToken::Ident => {
            TokenKind::keyword(slice).unwrap_or_else(|| TokenKind::Ident(slice.to_string()))
        }

        // Handled in tokenize; comments never reach here.
        RawToken::Number | RawToken::UnterminatedString | RawToken::LineComment => {
            TokenKind::Ident(slice.to_string())
        }
    }
}

/// Suffix letter directly after a number, unless it starts an identifier.
fn suffix_at(source: &str, pos: usize) -> Option<NumberSuffix> {
    let mut rest = source[pos..].chars();
    let suffix = NumberSuffix::from_char(rest.next()?)?;
    match rest.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => None,
        _ => Some(suffix),
    }
}

fn number_token(
    slice: &str,
    suffix: Option<NumberSuffix>,
    start: usize,
    end: usize,
) -> Result<TokenKind, LexError> {
    let digits = match suffix {
        Some(_) => &slice[..slice.len() - 1],
        None => slice,
    };
    if digits.matches('.').count() > 1 {
        return Err(LexError::malformed_number(start, end));
    }
    Ok(TokenKind::Number {
        text: digits.to_string(),
        suffix,
    })
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    /// Returns true if lexing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Which rule a lexer error broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedChar,
    UnterminatedString,
    MalformedNumber,
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        Self {
            kind: LexErrorKind::UnexpectedChar,
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("unexpected character '{}'", ch),
            hint: None,
        }
    }

    fn unterminated_string(start: usize, end: usize) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedString,
            span: Span::new(start, end),
            message: "unterminated string".to_string(),
            hint: Some("add a closing '\"'".to_string()),
        }
    }

    fn malformed_number(start: usize, end: usize) -> Self {
        Self {
            kind: LexErrorKind::MalformedNumber,
            span: Span::new(start, end),
            message: "malformed number".to_string(),
            hint: Some("a number may contain at most one '.' followed by digits".to_string()),
        }
    }

    /// Fatal errors abort the pass instead of being skipped.
    pub fn is_fatal(&self) -> bool {
        self.kind != LexErrorKind::UnexpectedChar
    }
}
