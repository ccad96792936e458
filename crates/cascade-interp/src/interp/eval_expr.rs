// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression evaluation.

use std::rc::Rc;

use cascade_ast::expr::{Expr, ExprKind, FunctionExpr, MemberDecl, MemberKey, TypeExpr};
use cascade_ast::Span;
use indexmap::IndexMap;

use crate::env::Domain;
use crate::value::{ClassValue, FunctionValue, Member, MemberMap, ObjectValue, ParamSpec, RuntimeType, Value};

use super::{at, Interpreter, RuntimeDiagnostic, RuntimeError, STACK_GROW_SIZE, STACK_RED_ZONE};

impl Interpreter {
    /// Evaluate an expression, growing the stack when deep script recursion
    /// runs low on it.
    pub(super) fn eval_expr(&mut self, domain: &Domain, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_expr_inner(domain, expr))
    }

    fn eval_expr_inner(&mut self, domain: &Domain, expr: &Expr) -> Result<Value, RuntimeDiagnostic> {
        match &expr.kind {
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Long(n) => Ok(Value::Long(*n)),
            ExprKind::Float(n) => Ok(Value::Float(*n)),
            ExprKind::Double(n) => Ok(Value::Double(*n)),
            ExprKind::String(s) => Ok(Value::String(s.clone())),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Null => Ok(Value::Null),

            ExprKind::Ident(name) => domain
                .lookup(name)
                .ok_or_else(|| RuntimeDiagnostic::new(RuntimeError::UndefinedVariable(name.clone()), expr.span)),

            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(domain, left)?;
                let right = self.eval_expr(domain, right)?;
                Self::eval_binop(*op, left, right).map_err(at(expr.span))
            }

            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(domain, operand)?;
                Self::eval_unary(*op, value).map_err(at(expr.span))
            }

            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(domain, cond)? {
                    self.eval_expr(domain, then_branch)
                } else {
                    self.eval_expr(domain, else_branch)
                }
            }

            ExprKind::Assign { op, target, value } => self.eval_assign(domain, *op, target, value, expr.span),

            ExprKind::Member { object, key } => self.with_member_target(domain, object, key, expr.span, |members, key| {
                members
                    .get(key)
                    .ok_or_else(|| RuntimeError::NoSuchMember(key.to_string()))
            }),

            ExprKind::Call { callee, args } => self.eval_call(domain, callee, args, expr.span),

            ExprKind::Construct {
                class,
                constructor,
                args,
            } => self.eval_construct(domain, class, constructor, args, expr.span),

            ExprKind::Function(func) => self.eval_function(domain, func),

            ExprKind::Class { members, superclass } => {
                let superclass = match superclass {
                    Some(expr) => match self.eval_expr(domain, expr)? {
                        Value::Class(class) => Some(class),
                        other => {
                            return Err(RuntimeDiagnostic::new(
                                RuntimeError::ExpectedKind {
                                    expected: "class",
                                    found: other.type_name(),
                                },
                                expr.span,
                            ))
                        }
                    },
                    None => None,
                };
                let members = self.eval_member_list(domain, members)?;
                Ok(Value::Class(Rc::new(ClassValue {
                    superclass,
                    members: MemberMap::new(members),
                })))
            }

            ExprKind::Object { members } => {
                let members = self.eval_member_list(domain, members)?;
                Ok(Value::Object(Rc::new(ObjectValue {
                    members: MemberMap::new(members),
                    meta: Vec::new(),
                })))
            }
        }
    }

    /// Evaluate a condition that must produce a boolean.
    pub(super) fn eval_condition(&mut self, domain: &Domain, expr: &Expr) -> Result<bool, RuntimeDiagnostic> {
        match self.eval_expr(domain, expr)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeDiagnostic::new(
                RuntimeError::ExpectedKind {
                    expected: "bool",
                    found: other.type_name(),
                },
                expr.span,
            )),
        }
    }

    /// Resolve a syntactic type; meta entries are evaluated in `domain`.
    pub(super) fn eval_type(&mut self, domain: &Domain, ty: &TypeExpr) -> Result<RuntimeType, RuntimeDiagnostic> {
        let meta = ty
            .meta
            .iter()
            .map(|entry| self.eval_expr(domain, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuntimeType {
            standard: ty.standard,
            meta,
            nullable: ty.nullable,
        })
    }

    pub(super) fn eval_member_key(&mut self, domain: &Domain, key: &MemberKey) -> Result<String, RuntimeDiagnostic> {
        match key {
            MemberKey::Name(name) => Ok(name.clone()),
            MemberKey::Computed(expr) => {
                let value = self.eval_expr(domain, expr)?;
                value
                    .as_member_key()
                    .ok_or_else(|| RuntimeDiagnostic::new(RuntimeError::InvalidMemberKey(value.type_name()), expr.span))
            }
        }
    }

    /// Evaluate `object` and `key`, then run `f` on the container's members.
    pub(super) fn with_member_target<T>(
        &mut self,
        domain: &Domain,
        object: &Expr,
        key: &MemberKey,
        span: Span,
        f: impl FnOnce(&MemberMap, &str) -> Result<T, RuntimeError>,
    ) -> Result<T, RuntimeDiagnostic> {
        let container = self.eval_expr(domain, object)?;
        let key = self.eval_member_key(domain, key)?;
        let members = container
            .members()
            .ok_or_else(|| RuntimeDiagnostic::new(RuntimeError::NotAContainer(container.type_name()), object.span))?;
        f(members, &key).map_err(at(span))
    }

    fn eval_member_list(
        &mut self,
        domain: &Domain,
        decls: &[MemberDecl],
    ) -> Result<IndexMap<String, Member>, RuntimeDiagnostic> {
        let mut members = IndexMap::new();
        for decl in decls {
            let key = self.eval_member_key(domain, &decl.key)?;
            if members.contains_key(&key) {
                return Err(RuntimeDiagnostic::new(RuntimeError::DuplicateMember(key), decl.span));
            }
            let ty = self.eval_type(domain, &decl.ty)?;
            let value = self.eval_expr(domain, &decl.value)?;
            let member = Member::new(decl.modifiers.clone(), ty, value).map_err(at(decl.span))?;
            members.insert(key, member);
        }
        Ok(members)
    }

    /// Parameter and return types are fixed here; defaults wait for each call.
    fn eval_function(&mut self, domain: &Domain, func: &FunctionExpr) -> Result<Value, RuntimeDiagnostic> {
        let mut params = Vec::with_capacity(func.params.len());
        for param in &func.params {
            params.push(ParamSpec {
                name: param.name.clone(),
                ty: self.eval_type(domain, &param.ty)?,
                default: param.default.clone(),
            });
        }
        let return_type = self.eval_type(domain, &func.return_type)?;
        Ok(Value::Function(Rc::new(FunctionValue {
            params,
            return_type,
            body: func.body.clone(),
            closure: domain.clone(),
        })))
    }
}
