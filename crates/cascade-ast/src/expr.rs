// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression AST nodes.

use crate::stmt::Stmt;
use crate::Span;

/// An expression in the AST.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// True for nodes that name a storage location (`x`, `a.b`, `a[k]`).
    pub fn is_access_point(&self) -> bool {
        matches!(self.kind, ExprKind::Ident(_) | ExprKind::Member { .. })
    }
}

/// The kind of expression.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    /// Integer literal
    Int(i32),
    /// Long literal (`L` suffix)
    Long(i64),
    /// Float literal
    Float(f32),
    /// Double literal (`D` suffix)
    Double(f64),
    /// String literal
    String(String),
    /// Boolean literal
    Bool(bool),
    /// `null`
    Null,
    /// Identifier
    Ident(String),
    /// Binary operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Unary operation
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `cond ? a : b`
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// Plain or compound assignment
    Assign {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `object.name` or `object[expr]`
    Member {
        object: Box<Expr>,
        key: MemberKey,
    },
    /// Function call
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `new Class, ctor(args)`
    Construct {
        class: Box<Expr>,
        constructor: MemberKey,
        args: Vec<Expr>,
    },
    /// Function literal produced by `type name(params) { body }`
    Function(FunctionExpr),
    /// Class body with optional superclass
    Class {
        members: Vec<MemberDecl>,
        superclass: Option<Box<Expr>>,
    },
    /// Object literal `{ members }`
    Object { members: Vec<MemberDecl> },
}

/// Key of a member access or member declaration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKey {
    /// `.name` or a bare identifier key
    Name(String),
    /// `[expr]`, converted to a string at runtime
    Computed(Box<Expr>),
}

impl MemberKey {
    pub fn is_computed(&self) -> bool {
        matches!(self, MemberKey::Computed(_))
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionExpr {
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    pub body: Vec<Stmt>,
}

/// A function parameter: `type name [= default]`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub ty: TypeExpr,
    pub name: String,
    /// Evaluated per call when the argument is missing or null.
    pub default: Option<Expr>,
    pub span: Span,
}

/// A member inside a class or object body.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberDecl {
    pub modifiers: Vec<Modifier>,
    pub ty: TypeExpr,
    pub key: MemberKey,
    pub value: Expr,
    pub span: Span,
}

/// Syntactic type: `int`, `object:Point?`, `dynamic:[a, b]`.
///
/// Meta entries stay unevaluated until the interpreter resolves them.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeExpr {
    pub standard: StandardType,
    pub meta: Vec<Expr>,
    pub nullable: bool,
    pub span: Span,
}

impl TypeExpr {
    pub fn plain(standard: StandardType, span: Span) -> Self {
        Self {
            standard,
            meta: Vec::new(),
            nullable: false,
            span,
        }
    }
}

/// Coarse runtime type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StandardType {
    Function,
    HostFunction,
    Object,
    Class,
    Construct,
    Dynamic,
    Float,
    Double,
    Integer,
    Long,
    String,
    Boolean,
    Void,
}

impl StandardType {
    pub fn name(self) -> &'static str {
        match self {
            StandardType::Function => "function",
            StandardType::HostFunction => "host function",
            StandardType::Object => "object",
            StandardType::Class => "class",
            StandardType::Construct => "construct",
            StandardType::Dynamic => "dynamic",
            StandardType::Float => "float",
            StandardType::Double => "double",
            StandardType::Integer => "int",
            StandardType::Long => "long",
            StandardType::String => "string",
            StandardType::Boolean => "bool",
            StandardType::Void => "void",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            StandardType::Integer | StandardType::Long | StandardType::Float | StandardType::Double
        )
    }
}

impl std::fmt::Display for StandardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    Const,
    Static,
    Public,
    Private,
    Protected,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Xor,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Xor => "^^",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

/// Assignment operators. Compound forms desugar to a binary op plus `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl AssignOp {
    pub fn base_op(self) -> Option<BinOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::Add => Some(BinOp::Add),
            AssignOp::Sub => Some(BinOp::Sub),
            AssignOp::Mul => Some(BinOp::Mul),
            AssignOp::Div => Some(BinOp::Div),
            AssignOp::Mod => Some(BinOp::Mod),
            AssignOp::Pow => Some(BinOp::Pow),
        }
    }
}
