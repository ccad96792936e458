// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement AST nodes.

use crate::expr::{Expr, MemberKey, Modifier, TypeExpr};
use crate::Span;

/// A parsed source file.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A statement in the AST.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of statement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// Expression statement
    Expr(Expr),
    /// `[mods] type target value`
    VarDecl {
        modifiers: Vec<Modifier>,
        ty: TypeExpr,
        target: DeclTarget,
        value: Expr,
    },
    /// `if c {..} elseif c {..} else {..}`
    If {
        clauses: Vec<IfClause>,
        else_body: Option<Vec<Stmt>>,
    },
    /// `while c {..}`
    While { cond: Expr, body: Vec<Stmt> },
    /// `post {..} while c`
    PostWhile { body: Vec<Stmt>, cond: Expr },
    /// `for decl -> target, step {..}`
    For {
        decl: Box<Stmt>,
        target: Expr,
        step: Expr,
        body: Vec<Stmt>,
    },
    /// `ensure access.point`
    Ensure(Expr),
    /// `delete access.point`
    Delete(Expr),
    /// `return`, `break`, `continue` or `exit`
    Exit { kind: ExitKind, value: Option<Expr> },
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfClause {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}

/// Where a declaration stores its value.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclTarget {
    /// `int x`
    Name(String),
    /// `int ["x"]`, accepted at top level only
    Literal(Expr),
    /// `int obj.x` or `int obj[k]`
    Member { object: Expr, key: MemberKey },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitKind {
    Return,
    Break,
    Continue,
    Exit,
}

impl ExitKind {
    /// Scope context the statement unwinds to.
    pub fn target(self) -> ExitTarget {
        match self {
            ExitKind::Return => ExitTarget::Function,
            ExitKind::Break | ExitKind::Continue => ExitTarget::Loop,
            ExitKind::Exit => ExitTarget::Program,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ExitKind::Return => "return",
            ExitKind::Break => "break",
            ExitKind::Continue => "continue",
            ExitKind::Exit => "exit",
        }
    }

    pub fn takes_value(self) -> bool {
        matches!(self, ExitKind::Return | ExitKind::Exit)
    }
}

/// Scope context an exit statement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitTarget {
    Program,
    Function,
    Loop,
}

impl std::fmt::Display for ExitTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExitTarget::Program => "program",
            ExitTarget::Function => "function",
            ExitTarget::Loop => "loop",
        })
    }
}
