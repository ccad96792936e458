// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The recursive-descent parser.

use cascade_ast::expr::{
    BinOp, Expr, ExprKind, FunctionExpr, MemberDecl, MemberKey, Modifier, Param, StandardType,
    TypeExpr, UnaryOp,
};
use cascade_ast::stmt::{DeclTarget, ExitKind, IfClause, Program, Stmt, StmtKind};
use cascade_ast::token::{NumberSuffix, Token, TokenKind};
use cascade_ast::Span;

/// Highest binary precedence level (`^`).
const MAX_BINARY_LEVEL: u8 = 7;

/// The parser for Cascade source code.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Nesting depth of `{ }` bodies; 0 at program top level.
    depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind != TokenKind::Eof).unwrap_or(true) {
            let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
            let line = tokens.last().map(|t| t.line).unwrap_or(1);
            tokens.push(Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
                line,
            });
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if !self.at_end() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(idx) => self.tokens[idx].span.end,
            None => self.current().span.start,
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(
                kind.display_name(),
                self.current_kind(),
                self.current().span,
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::expected(
                "a name",
                self.current_kind(),
                self.current().span,
            )),
        }
    }

    // =========================================================================
    // Program
    // =========================================================================

    /// Parse the whole token stream. The first error wins and leaves an
    /// empty program behind.
    pub fn parse(&mut self) -> ParseResult {
        match self.parse_program() {
            Ok(program) => ParseResult {
                program,
                errors: Vec::new(),
            },
            Err(error) => ParseResult {
                program: Program::default(),
                errors: vec![error],
            },
        }
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let start = self.current().span.start;
        let mut body = Vec::new();
        while !self.at_end() {
            body.push(self.parse_stmt()?);
        }
        Ok(Program {
            body,
            span: Span::new(start, self.current().span.end),
        })
    }

    // =========================================================================
    // Shared pieces: modifiers, types, keys, values
    // =========================================================================

    fn parse_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while let Some(modifier) = self.current_kind().modifier() {
            self.advance();
            modifiers.push(modifier);
        }
        modifiers
    }

    /// `type [':' meta | ':[' meta, ... ']'] ['?']`
    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let standard = match self.current_kind().standard_type() {
            Some(standard) => standard,
            None => {
                return Err(ParseError::expected(
                    "type",
                    self.current_kind(),
                    self.current().span,
                ))
            }
        };
        self.advance();

        let mut meta = Vec::new();
        if self.check(&TokenKind::Colon) {
            if standard == StandardType::Class {
                return Err(ParseError::new(
                    "classes can not have meta types",
                    self.current().span,
                ));
            }
            self.advance();
            if self.match_token(&TokenKind::LBracket) {
                loop {
                    meta.push(self.parse_access_chain()?);
                    if !self.match_token(&TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(&TokenKind::RBracket)?;
            } else {
                meta.push(self.parse_access_chain()?);
            }
        }

        let nullable = self.match_token(&TokenKind::Question);
        Ok(TypeExpr {
            standard,
            meta,
            nullable,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// Member key: an identifier or `[expr]`.
    fn parse_member_key(&mut self) -> Result<MemberKey, ParseError> {
        if self.match_token(&TokenKind::LBracket) {
            let key = self.parse_expr()?;
            self.expect(&TokenKind::RBracket)?;
            return Ok(MemberKey::Computed(Box::new(key)));
        }
        match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(MemberKey::Name(name))
            }
            TokenKind::Number { .. } | TokenKind::String(_) | TokenKind::Bool(_) | TokenKind::Null => {
                Err(ParseError::new(
                    format!(
                        "{} used as a key must be surrounded by brackets",
                        self.current_kind().display_name()
                    ),
                    self.current().span,
                )
                .with_hint("write the key as [\"name\"]"))
            }
            _ => Err(ParseError::expected(
                "a name",
                self.current_kind(),
                self.current().span,
            )),
        }
    }

    /// What follows a declared name. Returns the value expression and the
    /// type the declaration ends up with.
    fn parse_value_to_set(&mut self, ty: TypeExpr) -> Result<(Expr, TypeExpr), ParseError> {
        match self.current_kind() {
            TokenKind::Eq => {
                self.advance();
                Ok((self.parse_expr()?, ty))
            }
            TokenKind::LParen => {
                let span = ty.span;
                if ty.standard == StandardType::Construct {
                    if !ty.meta.is_empty() {
                        return Err(ParseError::new(
                            "constructs can not have a meta return type",
                            span,
                        ));
                    }
                    let function = self.parse_function(TypeExpr::plain(StandardType::Void, span))?;
                    Ok((function, TypeExpr::plain(StandardType::Construct, span)))
                } else {
                    let function = self.parse_function(ty)?;
                    Ok((function, TypeExpr::plain(StandardType::Function, span)))
                }
            }
            TokenKind::LBrace => {
                if ty.standard != StandardType::Class {
                    return Err(ParseError::new(
                        format!("a '{}' can not be declared with a class body", ty.standard),
                        self.current().span,
                    )
                    .with_hint("declare classes with 'class', or assign an object with '= { ... }'"));
                }
                let start = self.current().span.start;
                let members = self.parse_member_list()?;
                let superclass = if self.match_token(&TokenKind::Of) {
                    let superclass = self.parse_access_chain()?;
                    if !superclass.is_access_point() {
                        return Err(ParseError::new(
                            "expected a class name or member access after 'of'",
                            superclass.span,
                        ));
                    }
                    Some(Box::new(superclass))
                } else {
                    None
                };
                let class = ExprKind::Class {
                    members,
                    superclass,
                };
                Ok((Expr::new(class, Span::new(start, self.prev_end())), ty))
            }
            _ => {
                let at = self.prev_end();
                Ok((Expr::new(ExprKind::Null, Span::new(at, at)), ty))
            }
        }
    }

    fn parse_function(&mut self, return_type: TypeExpr) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let params = self.parse_params()?;
        let body = self.parse_body()?;
        let function = FunctionExpr {
            params,
            return_type,
            body,
        };
        Ok(Expr::new(
            ExprKind::Function(function),
            Span::new(start, self.prev_end()),
        ))
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let start = self.current().span.start;
            let ty = self.parse_type()?;
            let name = self.expect_ident()?;
            let default = if self.match_token(&TokenKind::Eq) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            params.push(Param {
                ty,
                name,
                default,
                span: Span::new(start, self.prev_end()),
            });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// `{ [mods] type key value, ... }` shared by classes and object literals.
    fn parse_member_list(&mut self) -> Result<Vec<MemberDecl>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let start = self.current().span.start;
            let modifiers = self.parse_modifiers();
            let ty = self.parse_type()?;
            let key = self.parse_member_key()?;
            let (value, ty) = self.parse_value_to_set(ty)?;
            members.push(MemberDecl {
                modifiers,
                ty,
                key,
                value,
                span: Span::new(start, self.prev_end()),
            });
            if !self.match_token(&TokenKind::Comma) {
                self.match_token(&TokenKind::Semi);
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(members)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        self.depth += 1;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::RBrace)?;
        self.depth -= 1;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span.start;
        let leading = self.current_kind().clone();
        let kind = match leading {
            TokenKind::If => self.parse_if_stmt()?,
            TokenKind::While => self.parse_while_stmt()?,
            TokenKind::Post => self.parse_post_while_stmt()?,
            TokenKind::For => self.parse_for_stmt()?,
            TokenKind::Ensure => {
                self.advance();
                StmtKind::Ensure(self.parse_access_point()?)
            }
            TokenKind::Delete => {
                self.advance();
                StmtKind::Delete(self.parse_access_point()?)
            }
            ref k if k.is_exit_keyword() => self.parse_exit_stmt()?,
            ref k if k.is_type_keyword() || k.is_modifier() => self.parse_var_decl()?,
            _ => StmtKind::Expr(self.parse_expr()?),
        };
        let stmt = Stmt::new(kind, Span::new(start, self.prev_end()));
        self.match_token(&TokenKind::Semi);
        Ok(stmt)
    }

    fn parse_var_decl(&mut self) -> Result<StmtKind, ParseError> {
        let modifiers = self.parse_modifiers();
        let ty = self.parse_type()?;
        let target = self.parse_decl_target()?;
        let (value, ty) = self.parse_value_to_set(ty)?;
        Ok(StmtKind::VarDecl {
            modifiers,
            ty,
            target,
            value,
        })
    }

    fn parse_decl_target(&mut self) -> Result<DeclTarget, ParseError> {
        if self.check(&TokenKind::LBracket) {
            let bracket = self.current().span;
            if self.depth > 0 {
                return Err(ParseError::new(
                    "a bracketed key can only be declared at program top level",
                    bracket,
                )
                .with_hint("declare the member on an object instead, e.g. obj[\"key\"]"));
            }
            self.advance();
            let key = self.parse_primary()?;
            if !is_literal(&key.kind) {
                return Err(ParseError::new("expected a literal key inside '[ ]'", key.span));
            }
            self.expect(&TokenKind::RBracket)?;
            return Ok(DeclTarget::Literal(key));
        }

        let point = self.parse_access_point()?;
        match point.kind {
            ExprKind::Ident(name) => Ok(DeclTarget::Name(name)),
            ExprKind::Member { object, key } => Ok(DeclTarget::Member {
                object: *object,
                key,
            }),
            _ => Err(ParseError::new("expected a name to declare", point.span)),
        }
    }

    fn parse_if_stmt(&mut self) -> Result<StmtKind, ParseError> {
        let mut clauses = Vec::new();
        loop {
            // `if` or `elseif`
            self.advance();
            let cond = self.parse_expr()?;
            let body = self.parse_body()?;
            clauses.push(IfClause { cond, body });
            if !self.check(&TokenKind::ElseIf) {
                break;
            }
        }
        let else_body = if self.match_token(&TokenKind::Else) {
            Some(self.parse_body()?)
        } else {
            None
        };
        Ok(StmtKind::If { clauses, else_body })
    }

    fn parse_while_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::While)?;
        let cond = self.parse_expr()?;
        let body = self.parse_body()?;
        Ok(StmtKind::While { cond, body })
    }

    fn parse_post_while_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::Post)?;
        let body = self.parse_body()?;
        self.expect(&TokenKind::While)?;
        let cond = self.parse_expr()?;
        Ok(StmtKind::PostWhile { body, cond })
    }

    /// `for <decl> -> target, step { body }`
    fn parse_for_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::For)?;
        let start = self.current().span.start;
        if !(self.current_kind().is_type_keyword() || self.current_kind().is_modifier()) {
            return Err(ParseError::expected(
                "loop variable declaration",
                self.current_kind(),
                self.current().span,
            ));
        }
        let decl = self.parse_var_decl()?;
        let decl_span = Span::new(start, self.prev_end());
        if !matches!(decl, StmtKind::VarDecl { target: DeclTarget::Name(_), .. }) {
            return Err(ParseError::new("a for loop variable must be a plain name", decl_span)
                .with_hint("declare the counter as `int i = 0`"));
        }
        let decl = Stmt::new(decl, decl_span);
        self.expect(&TokenKind::Arrow)?;
        let target = self.parse_expr()?;
        self.expect(&TokenKind::Comma)?;
        let step = self.parse_expr()?;
        let body = self.parse_body()?;
        Ok(StmtKind::For {
            decl: Box::new(decl),
            target,
            step,
            body,
        })
    }

    fn parse_exit_stmt(&mut self) -> Result<StmtKind, ParseError> {
        let kind = match self.advance().kind {
            TokenKind::Return => ExitKind::Return,
            TokenKind::Break => ExitKind::Break,
            TokenKind::Continue => ExitKind::Continue,
            _ => ExitKind::Exit,
        };
        let ends_here = matches!(
            self.current_kind(),
            TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
        );
        let value = if kind.takes_value() && !ends_here {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(StmtKind::Exit { kind, value })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Right-associative, so `a = b = 3` chains.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_ternary()?;
        let op = match self.current_kind().assign_op() {
            Some(op) => op,
            None => return Ok(target),
        };
        let op_span = self.advance().span;
        if !target.is_access_point() {
            return Err(ParseError::new("invalid assignment target", op_span)
                .with_hint("only variables and members can be assigned"));
        }
        let value = self.parse_assignment()?;
        let span = target.span.to(value.span);
        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        ))
    }

    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_binary(1)?;
        if !self.match_token(&TokenKind::Question) {
            return Ok(cond);
        }
        let then_branch = self.parse_expr()?;
        self.expect(&TokenKind::Colon)?;
        let else_branch = self.parse_expr()?;
        let span = cond.span.to(else_branch.span);
        Ok(Expr::new(
            ExprKind::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        ))
    }

    /// Left-associative climber shared by every binary level.
    fn parse_binary(&mut self, level: u8) -> Result<Expr, ParseError> {
        if level > MAX_BINARY_LEVEL {
            return self.parse_unary();
        }
        let mut left = self.parse_binary(level + 1)?;
        while let Some((op, op_level)) = binary_op(self.current_kind()) {
            if op_level != level {
                break;
            }
            self.advance();
            let right = self.parse_binary(level + 1)?;
            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_construct(),
        };
        let start = self.advance().span.start;
        let operand = self.parse_unary()?;
        let span = Span::new(start, operand.span.end);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `new Class, ctor(args)`
    fn parse_construct(&mut self) -> Result<Expr, ParseError> {
        if !self.check(&TokenKind::New) {
            return self.parse_postfix();
        }
        let start = self.advance().span.start;
        let class = self.parse_postfix()?;
        self.expect(&TokenKind::Comma)?;
        let constructor = self.parse_member_key()?;
        let args = self.parse_args()?;
        Ok(Expr::new(
            ExprKind::Construct {
                class: Box::new(class),
                constructor,
                args,
            },
            Span::new(start, self.prev_end()),
        ))
    }

    /// Calls and member accesses, chained freely.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_object()?;
        loop {
            match self.current_kind() {
                TokenKind::Dot | TokenKind::LBracket => expr = self.parse_member_suffix(expr)?,
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    let span = Span::new(expr.span.start, self.prev_end());
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Member accesses only; used where a call can't appear.
    fn parse_access_chain(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_object()?;
        while self.check(&TokenKind::Dot) || self.check(&TokenKind::LBracket) {
            expr = self.parse_member_suffix(expr)?;
        }
        Ok(expr)
    }

    fn parse_access_point(&mut self) -> Result<Expr, ParseError> {
        let point = self.parse_access_chain()?;
        if !point.is_access_point() {
            return Err(ParseError::new(
                "expected a name or member access",
                point.span,
            ));
        }
        Ok(point)
    }

    fn parse_member_suffix(&mut self, object: Expr) -> Result<Expr, ParseError> {
        let key = if self.match_token(&TokenKind::Dot) {
            MemberKey::Name(self.expect_ident()?)
        } else {
            self.expect(&TokenKind::LBracket)?;
            let key = self.parse_expr()?;
            self.expect(&TokenKind::RBracket)?;
            MemberKey::Computed(Box::new(key))
        };
        let span = Span::new(object.span.start, self.prev_end());
        Ok(Expr::new(
            ExprKind::Member {
                object: Box::new(object),
                key,
            },
            span,
        ))
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            args.push(self.parse_expr()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_object(&mut self) -> Result<Expr, ParseError> {
        if !self.check(&TokenKind::LBrace) {
            return self.parse_primary();
        }
        let start = self.current().span.start;
        let members = self.parse_member_list()?;
        Ok(Expr::new(
            ExprKind::Object { members },
            Span::new(start, self.prev_end()),
        ))
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();
        let kind = match token.kind {
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::Number { text, suffix } => number_literal(&text, suffix, token.span)?,
            TokenKind::String(s) => ExprKind::String(s),
            TokenKind::Bool(b) => ExprKind::Bool(b),
            TokenKind::Null => ExprKind::Null,
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            other => return Err(ParseError::expected("expression", &other, token.span)),
        };
        self.advance();
        Ok(Expr::new(kind, token.span))
    }
}

/// Binary operator and its precedence level, lowest first.
fn binary_op(kind: &TokenKind) -> Option<(BinOp, u8)> {
    Some(match kind {
        TokenKind::PipePipe => (BinOp::Or, 1),
        TokenKind::CaretCaret => (BinOp::Xor, 1),
        TokenKind::AmpAmp => (BinOp::And, 2),
        TokenKind::EqEq => (BinOp::Eq, 3),
        TokenKind::BangEq => (BinOp::Ne, 3),
        TokenKind::Lt => (BinOp::Lt, 4),
        TokenKind::LtEq => (BinOp::Le, 4),
        TokenKind::Gt => (BinOp::Gt, 4),
        TokenKind::GtEq => (BinOp::Ge, 4),
        TokenKind::Plus => (BinOp::Add, 5),
        TokenKind::Minus => (BinOp::Sub, 5),
        TokenKind::Star => (BinOp::Mul, 6),
        TokenKind::Slash => (BinOp::Div, 6),
        TokenKind::Percent => (BinOp::Mod, 6),
        TokenKind::Caret => (BinOp::Pow, MAX_BINARY_LEVEL),
        _ => return None,
    })
}

fn is_literal(kind: &ExprKind) -> bool {
    matches!(
        kind,
        ExprKind::Int(_)
            | ExprKind::Long(_)
            | ExprKind::Float(_)
            | ExprKind::Double(_)
            | ExprKind::String(_)
            | ExprKind::Bool(_)
            | ExprKind::Null
    )
}

/// Build a numeric literal once its suffix is known. Unsuffixed numbers
/// are `int` without a dot and `float` with one.
fn number_literal(text: &str, suffix: Option<NumberSuffix>, span: Span) -> Result<ExprKind, ParseError> {
    let has_dot = text.contains('.');
    let (kind, type_name) = match suffix {
        Some(NumberSuffix::Int) => (text.parse().ok().map(ExprKind::Int), "int"),
        Some(NumberSuffix::Long) => (text.parse().ok().map(ExprKind::Long), "long"),
        Some(NumberSuffix::Float) => (text.parse().ok().map(ExprKind::Float), "float"),
        Some(NumberSuffix::Double) => (text.parse().ok().map(ExprKind::Double), "double"),
        None if has_dot => (text.parse().ok().map(ExprKind::Float), "float"),
        None => (text.parse().ok().map(ExprKind::Int), "int"),
    };
    kind.ok_or_else(|| {
        let error = ParseError::new(format!("'{}' is not a valid {} literal", text, type_name), span);
        if has_dot {
            error.with_hint("only 'F' and 'D' numbers may contain '.'")
        } else {
            error.with_hint("use the 'L' suffix for large integers")
        }
    })
}

/// Result of parsing: the program plus at most one error.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            span,
            message: message.into(),
            hint: None,
        }
    }

    fn expected(expected: &str, found: &TokenKind, span: Span) -> Self {
        let message = format_expected_message(expected, found);
        let hint = crate::hints::for_expected(expected, found).map(String::from);
        Self { span, message, hint }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: &TokenKind) -> String {
    match expected {
        "'{'" => format!("expected '{{' to start a body, found {}", found.display_name()),
        "'}'" => format!("expected '}}' to close the body, found {}", found.display_name()),
        "')'" if matches!(found, TokenKind::Eof) => "unclosed '(' - missing ')'".to_string(),
        "']'" if matches!(found, TokenKind::Eof) => "unclosed '[' - missing ']'".to_string(),
        "a name" => format!("expected a name, found {}", found.display_name()),
        _ => format!("expected {}, found {}", expected, found.display_name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_literal_kinds() {
        let span = Span::new(0, 1);
        assert!(matches!(number_literal("7", None, span), Ok(ExprKind::Int(7))));
        assert!(matches!(number_literal("7", Some(NumberSuffix::Long), span), Ok(ExprKind::Long(7))));
        assert!(matches!(number_literal("0.5", None, span), Ok(ExprKind::Float(f)) if f == 0.5));
        assert!(matches!(number_literal("2", Some(NumberSuffix::Double), span), Ok(ExprKind::Double(d)) if d == 2.0));
    }

    #[test]
    fn number_literal_out_of_range() {
        let err = number_literal("3000000000", None, Span::new(0, 10)).unwrap_err();
        assert!(err.message.contains("not a valid int"));
        assert!(err.hint.is_some());
        assert!(number_literal("1.5", Some(NumberSuffix::Int), Span::new(0, 3)).is_err());
    }

    #[test]
    fn empty_token_stream_gets_eof() {
        let result = Parser::new(Vec::new()).parse();
        assert!(result.is_ok());
        assert!(result.program.body.is_empty());
    }
}
