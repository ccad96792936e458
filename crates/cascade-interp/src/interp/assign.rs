// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Declaration and assignment.

use cascade_ast::expr::{AssignOp, Expr, ExprKind, Modifier};
use cascade_ast::stmt::DeclTarget;
use cascade_ast::Span;

use crate::env::Domain;
use crate::value::{RuntimeType, Value};

use super::{at, Interpreter, RuntimeDiagnostic, RuntimeError};

impl Interpreter {
    /// Store a declaration in the scope chain or in a container.
    pub(super) fn declare(
        &mut self,
        domain: &Domain,
        target: &DeclTarget,
        modifiers: Vec<Modifier>,
        ty: RuntimeType,
        value: Value,
        span: Span,
    ) -> Result<(), RuntimeDiagnostic> {
        match target {
            DeclTarget::Name(name) => domain.declare(name, modifiers, ty, value).map_err(at(span)),
            DeclTarget::Literal(key) => {
                let key_value = self.eval_expr(domain, key)?;
                let name = key_value.as_member_key().ok_or_else(|| {
                    RuntimeDiagnostic::new(RuntimeError::InvalidMemberKey(key_value.type_name()), key.span)
                })?;
                domain.declare(&name, modifiers, ty, value).map_err(at(span))
            }
            DeclTarget::Member { object, key } => self.with_member_target(domain, object, key, span, |members, key| {
                members.declare(key, modifiers, ty, value)
            }),
        }
    }

    /// Plain and compound assignment. The target must already exist.
    pub(super) fn eval_assign(
        &mut self,
        domain: &Domain,
        op: AssignOp,
        target: &Expr,
        value: &Expr,
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let value = self.eval_expr(domain, value)?;
        match &target.kind {
            ExprKind::Ident(name) => {
                let value = match op.base_op() {
                    Some(bin) => {
                        let current = domain.lookup(name).ok_or_else(|| {
                            RuntimeDiagnostic::new(RuntimeError::UndefinedVariable(name.clone()), target.span)
                        })?;
                        Self::eval_binop(bin, current, value).map_err(at(span))?
                    }
                    None => value,
                };
                domain.assign(name, value).map_err(at(span))
            }
            ExprKind::Member { object, key } => self.with_member_target(domain, object, key, span, |members, key| {
                let value = match op.base_op() {
                    Some(bin) => {
                        let current = members
                            .get(key)
                            .ok_or_else(|| RuntimeError::NoSuchMember(key.to_string()))?;
                        Self::eval_binop(bin, current, value)?
                    }
                    None => value,
                };
                members.assign(key, value)
            }),
            _ => Err(RuntimeDiagnostic::new(
                RuntimeError::ExpectedKind {
                    expected: "name or member",
                    found: "expression",
                },
                target.span,
            )),
        }
    }
}
