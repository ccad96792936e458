// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement execution.

use cascade_ast::expr::{BinOp, Expr, ExprKind};
use cascade_ast::stmt::{DeclTarget, ExitKind, IfClause, Stmt, StmtKind};

use crate::env::{Domain, ExitSignal, ScopeContext};
use crate::value::{Member, Value};

use super::{at, Interpreter, RuntimeDiagnostic, RuntimeError};

/// What a loop does after its body finished a pass.
enum LoopFlow {
    Next,
    Break,
    /// An exit aimed past the loop; leave it inactive.
    Leave,
}

fn loop_flow(scope: &Domain) -> LoopFlow {
    if scope.is_active() {
        return LoopFlow::Next;
    }
    match scope.take_signal() {
        Some(ExitSignal { kind: ExitKind::Continue, .. }) => {
            scope.reactivate();
            LoopFlow::Next
        }
        Some(ExitSignal { kind: ExitKind::Break, .. }) => {
            scope.reactivate();
            LoopFlow::Break
        }
        _ => LoopFlow::Leave,
    }
}

impl Interpreter {
    /// Run statements in order until one deactivates `domain`.
    pub(super) fn exec_block(&mut self, domain: &Domain, stmts: &[Stmt]) -> Result<(), RuntimeDiagnostic> {
        for stmt in stmts {
            self.exec_stmt(domain, stmt)?;
            if !domain.is_active() {
                break;
            }
        }
        Ok(())
    }

    pub(super) fn exec_stmt(&mut self, domain: &Domain, stmt: &Stmt) -> Result<(), RuntimeDiagnostic> {
        match &stmt.kind {
            StmtKind::Expr(expr) => {
                self.eval_expr(domain, expr)?;
            }

            StmtKind::VarDecl {
                modifiers,
                ty,
                target,
                value,
            } => {
                let value = self.eval_expr(domain, value)?;
                let ty = self.eval_type(domain, ty)?;
                self.declare(domain, target, modifiers.clone(), ty, value, stmt.span)?;
            }

            StmtKind::If { clauses, else_body } => self.exec_if(domain, clauses, else_body.as_deref())?,

            StmtKind::While { cond, body } => {
                let scope = domain.child(ScopeContext::Loop);
                loop {
                    if !self.eval_condition(domain, cond)? {
                        break;
                    }
                    self.exec_block(&scope, body)?;
                    match loop_flow(&scope) {
                        LoopFlow::Next => {}
                        LoopFlow::Break => break,
                        LoopFlow::Leave => return Ok(()),
                    }
                }
            }

            StmtKind::PostWhile { body, cond } => {
                let scope = domain.child(ScopeContext::Loop);
                loop {
                    self.exec_block(&scope, body)?;
                    match loop_flow(&scope) {
                        LoopFlow::Next => {}
                        LoopFlow::Break => break,
                        LoopFlow::Leave => return Ok(()),
                    }
                    if !self.eval_condition(domain, cond)? {
                        break;
                    }
                }
            }

            StmtKind::For {
                decl,
                target,
                step,
                body,
            } => self.exec_for(domain, decl, target, step, body)?,

            StmtKind::Ensure(point) => self.exec_ensure(domain, point)?,

            StmtKind::Delete(point) => self.exec_delete(domain, point)?,

            StmtKind::Exit { kind, value } => {
                let value = match value {
                    Some(expr) => self.eval_expr(domain, expr)?,
                    None => Value::Null,
                };
                let context = kind.target();
                if !domain.has_context(context) {
                    return Err(RuntimeDiagnostic::new(
                        RuntimeError::ExitOutsideContext {
                            keyword: kind.keyword(),
                            context,
                        },
                        stmt.span,
                    ));
                }
                domain.exit(*kind, value);
            }
        }
        Ok(())
    }

    fn exec_if(
        &mut self,
        domain: &Domain,
        clauses: &[IfClause],
        else_body: Option<&[Stmt]>,
    ) -> Result<(), RuntimeDiagnostic> {
        for clause in clauses {
            if self.eval_condition(domain, &clause.cond)? {
                let scope = domain.child(ScopeContext::IfClause);
                return self.exec_block(&scope, &clause.body);
            }
        }
        if let Some(body) = else_body {
            let scope = domain.child(ScopeContext::IfClause);
            self.exec_block(&scope, body)?;
        }
        Ok(())
    }

    /// `for int i = a -> b, step { .. }`: counts toward `b`, which is
    /// re-evaluated before every pass, adding `step` after each one.
    fn exec_for(
        &mut self,
        domain: &Domain,
        decl: &Stmt,
        target: &Expr,
        step: &Expr,
        body: &[Stmt],
    ) -> Result<(), RuntimeDiagnostic> {
        let StmtKind::VarDecl {
            modifiers,
            ty,
            target: DeclTarget::Name(name),
            value,
        } = &decl.kind
        else {
            return Err(RuntimeDiagnostic::new(RuntimeError::InvalidLoopCounter, decl.span));
        };

        let scope = domain.child(ScopeContext::Loop);
        let initial = self.eval_expr(&scope, value)?;
        let ty = self.eval_type(&scope, ty)?;
        let counter = Member::new(modifiers.clone(), ty, initial).map_err(at(decl.span))?;
        scope.declare_local(name, counter);

        let read_counter = |scope: &Domain| {
            scope
                .lookup(name)
                .ok_or_else(|| RuntimeDiagnostic::new(RuntimeError::UndefinedVariable(name.clone()), decl.span))
        };

        let first_bound = self.eval_expr(&scope, target)?;
        let ascending = Self::eval_binop(BinOp::Le, read_counter(&scope)?, first_bound.clone())
            .map(|v| matches!(v, Value::Bool(true)))
            .map_err(at(target.span))?;
        let keep_going = if ascending { BinOp::Lt } else { BinOp::Gt };
        let mut limit = Some(first_bound);

        loop {
            let bound = match limit.take() {
                Some(value) => value,
                None => self.eval_expr(&scope, target)?,
            };
            let current = read_counter(&scope)?;
            let proceed = Self::eval_binop(keep_going, current, bound).map_err(at(target.span))?;
            if !matches!(proceed, Value::Bool(true)) {
                break;
            }

            self.exec_block(&scope, body)?;
            match loop_flow(&scope) {
                LoopFlow::Next => {}
                LoopFlow::Break => break,
                LoopFlow::Leave => return Ok(()),
            }

            let increment = self.eval_expr(&scope, step)?;
            let next = Self::eval_binop(BinOp::Add, read_counter(&scope)?, increment).map_err(at(step.span))?;
            scope.assign(name, next).map_err(at(step.span))?;
        }
        Ok(())
    }

    fn exec_ensure(&mut self, domain: &Domain, point: &Expr) -> Result<(), RuntimeDiagnostic> {
        match &point.kind {
            ExprKind::Ident(name) => match domain.resolve(name) {
                Some(_) => Ok(()),
                None => Err(RuntimeDiagnostic::new(RuntimeError::EnsureFailed(name.clone()), point.span)),
            },
            ExprKind::Member { object, key } => self.with_member_target(domain, object, key, point.span, |members, key| {
                if members.contains(key) {
                    Ok(())
                } else {
                    Err(RuntimeError::EnsureFailed(key.to_string()))
                }
            }),
            _ => Err(RuntimeDiagnostic::new(
                RuntimeError::ExpectedKind {
                    expected: "name or member",
                    found: "expression",
                },
                point.span,
            )),
        }
    }

    fn exec_delete(&mut self, domain: &Domain, point: &Expr) -> Result<(), RuntimeDiagnostic> {
        match &point.kind {
            ExprKind::Ident(name) => domain.delete(name).map_err(at(point.span)),
            ExprKind::Member { object, key } => {
                self.with_member_target(domain, object, key, point.span, |members, key| members.delete(key))
            }
            _ => Err(RuntimeDiagnostic::new(
                RuntimeError::ExpectedKind {
                    expected: "name or member",
                    found: "expression",
                },
                point.span,
            )),
        }
    }
}
