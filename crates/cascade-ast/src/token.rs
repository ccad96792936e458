// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use crate::expr::{AssignOp, BinOp, Modifier, StandardType};
use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based source line of the token start.
    pub line: usize,
}

/// Type suffix written directly after a number (`12L`, `0.5D`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberSuffix {
    Int,
    Long,
    Float,
    Double,
}

impl NumberSuffix {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(NumberSuffix::Int),
            'L' => Some(NumberSuffix::Long),
            'F' => Some(NumberSuffix::Float),
            'D' => Some(NumberSuffix::Double),
            _ => None,
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Literals
    /// Raw digits, parsed once the suffix is known.
    Number { text: String, suffix: Option<NumberSuffix> },
    /// String contents without the quotes.
    String(String),
    Bool(bool),
    Null,

    Ident(String),

    // Control keywords
    If,
    ElseIf,
    Else,
    While,
    For,
    Post,
    Return,
    Break,
    Continue,
    Exit,
    New,
    Of,
    Ensure,
    Delete,

    // Type keywords
    TyString,
    TyFloat,
    TyDouble,
    TyBool,
    TyInt,
    TyLong,
    TyVoid,
    TyClass,
    TyObject,
    TyConstruct,
    TyDynamic,

    // Modifier keywords
    Const,
    Static,
    Public,
    Private,
    Protected,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Eq,
    EqEq,
    BangEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AmpAmp,
    PipePipe,
    CaretCaret,
    Bang,
    Question,
    Amp,
    Pipe,
    Backslash,
    Underscore,
    Dot,
    Arrow,     // ->
    LeftArrow, // <-
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    CaretEq,

    // Delimiters
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Semi,
    Comma,

    Eof,
}

impl TokenKind {
    /// Human-readable name used in parse errors.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Number { .. } => "a number",
            TokenKind::String(_) => "a string",
            TokenKind::Bool(_) => "'true' or 'false'",
            TokenKind::Null => "'null'",
            TokenKind::Ident(_) => "a name",

            TokenKind::If => "'if'",
            TokenKind::ElseIf => "'elseif'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::For => "'for'",
            TokenKind::Post => "'post'",
            TokenKind::Return => "'return'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Exit => "'exit'",
            TokenKind::New => "'new'",
            TokenKind::Of => "'of'",
            TokenKind::Ensure => "'ensure'",
            TokenKind::Delete => "'delete'",

            TokenKind::TyString => "'string'",
            TokenKind::TyFloat => "'float'",
            TokenKind::TyDouble => "'double'",
            TokenKind::TyBool => "'bool'",
            TokenKind::TyInt => "'int'",
            TokenKind::TyLong => "'long'",
            TokenKind::TyVoid => "'void'",
            TokenKind::TyClass => "'class'",
            TokenKind::TyObject => "'object'",
            TokenKind::TyConstruct => "'construct'",
            TokenKind::TyDynamic => "'dynamic'",

            TokenKind::Const => "'const'",
            TokenKind::Static => "'static'",
            TokenKind::Public => "'public'",
            TokenKind::Private => "'private'",
            TokenKind::Protected => "'protected'",

            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Caret => "'^'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::CaretCaret => "'^^'",
            TokenKind::Bang => "'!'",
            TokenKind::Question => "'?'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Backslash => "'\\'",
            TokenKind::Underscore => "'_'",
            TokenKind::Dot => "'.'",
            TokenKind::Arrow => "'->'",
            TokenKind::LeftArrow => "'<-'",
            TokenKind::PlusEq => "'+='",
            TokenKind::MinusEq => "'-='",
            TokenKind::StarEq => "'*='",
            TokenKind::SlashEq => "'/='",
            TokenKind::PercentEq => "'%='",
            TokenKind::CaretEq => "'^='",

            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Semi => "';'",
            TokenKind::Comma => "','",

            TokenKind::Eof => "end of file",
        }
    }

    /// Keyword lookup for an identifier-shaped word.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        Some(match word {
            "if" => TokenKind::If,
            "elseif" => TokenKind::ElseIf,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "post" => TokenKind::Post,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "exit" => TokenKind::Exit,
            "new" => TokenKind::New,
            "of" => TokenKind::Of,
            "ensure" => TokenKind::Ensure,
            "delete" => TokenKind::Delete,
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            "null" => TokenKind::Null,
            "string" => TokenKind::TyString,
            "float" => TokenKind::TyFloat,
            "double" => TokenKind::TyDouble,
            "bool" => TokenKind::TyBool,
            "int" => TokenKind::TyInt,
            "long" => TokenKind::TyLong,
            "void" => TokenKind::TyVoid,
            "class" => TokenKind::TyClass,
            "object" => TokenKind::TyObject,
            "construct" => TokenKind::TyConstruct,
            "dynamic" => TokenKind::TyDynamic,
            "const" => TokenKind::Const,
            "static" => TokenKind::Static,
            "public" => TokenKind::Public,
            "private" => TokenKind::Private,
            "protected" => TokenKind::Protected,
            _ => return None,
        })
    }

    // ------------------------------------------------------------------------
    // Category sets
    // ------------------------------------------------------------------------

    /// Standard type named by a type keyword.
    pub fn standard_type(&self) -> Option<StandardType> {
        Some(match self {
            TokenKind::TyString => StandardType::String,
            TokenKind::TyFloat => StandardType::Float,
            TokenKind::TyDouble => StandardType::Double,
            TokenKind::TyBool => StandardType::Boolean,
            TokenKind::TyInt => StandardType::Integer,
            TokenKind::TyLong => StandardType::Long,
            TokenKind::TyVoid => StandardType::Void,
            TokenKind::TyClass => StandardType::Class,
            TokenKind::TyObject => StandardType::Object,
            TokenKind::TyConstruct => StandardType::Construct,
            TokenKind::TyDynamic => StandardType::Dynamic,
            _ => return None,
        })
    }

    pub fn is_type_keyword(&self) -> bool {
        self.standard_type().is_some()
    }

    pub fn modifier(&self) -> Option<Modifier> {
        Some(match self {
            TokenKind::Const => Modifier::Const,
            TokenKind::Static => Modifier::Static,
            TokenKind::Public => Modifier::Public,
            TokenKind::Private => Modifier::Private,
            TokenKind::Protected => Modifier::Protected,
            _ => return None,
        })
    }

    pub fn is_modifier(&self) -> bool {
        self.modifier().is_some()
    }

    pub fn is_exit_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Return | TokenKind::Break | TokenKind::Continue | TokenKind::Exit
        )
    }

    pub fn is_unary_operator(&self) -> bool {
        matches!(self, TokenKind::Bang | TokenKind::Minus)
    }

    pub fn assign_op(&self) -> Option<AssignOp> {
        Some(match self {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::Add,
            TokenKind::MinusEq => AssignOp::Sub,
            TokenKind::StarEq => AssignOp::Mul,
            TokenKind::SlashEq => AssignOp::Div,
            TokenKind::PercentEq => AssignOp::Mod,
            TokenKind::CaretEq => AssignOp::Pow,
            _ => return None,
        })
    }

    pub fn is_assignment_operator(&self) -> bool {
        self.assign_op().is_some()
    }

    /// Arithmetic operator a compound assignment token stands for.
    pub fn compound_base_operator(&self) -> Option<BinOp> {
        self.assign_op().and_then(AssignOp::base_op)
    }
}
