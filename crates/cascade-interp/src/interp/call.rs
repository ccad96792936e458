// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Function calls and object construction.

use std::rc::Rc;

use cascade_ast::expr::{Expr, MemberKey, Modifier};
use cascade_ast::Span;

use crate::env::{Domain, ScopeContext};
use crate::value::{
    types_match, FunctionValue, HostFunction, Member, MemberMap, ObjectValue, ParamSpec, Value,
};

use super::{at, Interpreter, RuntimeDiagnostic, RuntimeError, MAX_CALL_DEPTH};

impl Interpreter {
    /// Arguments are evaluated before the callee.
    pub(super) fn eval_call(
        &mut self,
        domain: &Domain,
        callee: &Expr,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let args = self.eval_args(domain, args)?;
        match self.eval_expr(domain, callee)? {
            Value::Function(func) => self.call_function(domain, &func, args, Vec::new(), span),
            Value::HostFunction(func) => self.call_host(domain, &func, args, span),
            other => Err(RuntimeDiagnostic::new(
                RuntimeError::ExpectedKind {
                    expected: "function",
                    found: other.type_name(),
                },
                callee.span,
            )),
        }
    }

    fn eval_args(&mut self, domain: &Domain, args: &[Expr]) -> Result<Vec<Value>, RuntimeDiagnostic> {
        args.iter().map(|arg| self.eval_expr(domain, arg)).collect()
    }

    /// Call a script function in a fresh function scope under its closure.
    /// `bindings` are extra locals, such as `self` for constructors.
    pub(crate) fn call_function(
        &mut self,
        caller: &Domain,
        func: &FunctionValue,
        args: Vec<Value>,
        bindings: Vec<(&str, Member)>,
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeDiagnostic::new(RuntimeError::CallDepthExceeded(MAX_CALL_DEPTH), span));
        }
        let local = func.closure.child(ScopeContext::Function);
        self.bind_params(caller, &local, &func.params, args, span)?;
        for (name, member) in bindings {
            local.declare_local(name, member);
        }

        self.call_depth += 1;
        let outcome = self.exec_block(&local, &func.body);
        self.call_depth -= 1;
        outcome?;

        let result = match local.take_signal() {
            Some(signal) => signal.value,
            // Deactivated without a `return`: a program exit passed through.
            None if !local.is_active() => return Err(RuntimeDiagnostic::new(RuntimeError::Halted, span)),
            None => Value::Null,
        };
        let actual = result.runtime_type();
        if !types_match(&func.return_type, &actual) {
            return Err(RuntimeDiagnostic::new(
                RuntimeError::ReturnTypeMismatch {
                    expected: func.return_type.to_string(),
                    actual: actual.to_string(),
                },
                span,
            ));
        }
        Ok(result)
    }

    fn call_host(
        &mut self,
        caller: &Domain,
        func: &HostFunction,
        args: Vec<Value>,
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let local = caller.child(ScopeContext::Function);
        self.bind_params(caller, &local, &func.params, args, span)?;
        (func.handler)(self, &local).map_err(at(span))
    }

    /// Bind arguments positionally. A missing or null argument falls back to
    /// the parameter's default, evaluated in the caller's scope.
    fn bind_params(
        &mut self,
        caller: &Domain,
        local: &Domain,
        params: &[ParamSpec],
        args: Vec<Value>,
        span: Span,
    ) -> Result<(), RuntimeDiagnostic> {
        if args.len() > params.len() {
            return Err(RuntimeDiagnostic::new(
                RuntimeError::ArityMismatch {
                    expected: params.len(),
                    got: args.len(),
                },
                span,
            ));
        }
        let mut args = args.into_iter();
        for (index, param) in params.iter().enumerate() {
            let value = match args.next() {
                Some(value) if !matches!(value, Value::Null) => value,
                _ => match &param.default {
                    Some(default) => self.eval_expr(caller, default)?,
                    None => Value::Null,
                },
            };
            let member = Member::new(Vec::new(), param.ty.clone(), value).map_err(|err| {
                let err = match err {
                    RuntimeError::TypeMismatch { expected, actual } => RuntimeError::ParamTypeMismatch {
                        index: index + 1,
                        expected,
                        actual,
                    },
                    other => other,
                };
                RuntimeDiagnostic::new(err, span)
            })?;
            local.declare_local(&param.name, member);
        }
        Ok(())
    }

    /// `new Class, ctor(args)`: copy the class chain's members into a fresh
    /// object, run the constructor with a constant `self`, return the object.
    pub(super) fn eval_construct(
        &mut self,
        domain: &Domain,
        class_expr: &Expr,
        constructor: &MemberKey,
        args: &[Expr],
        span: Span,
    ) -> Result<Value, RuntimeDiagnostic> {
        let class = match self.eval_expr(domain, class_expr)? {
            Value::Class(class) => class,
            other => {
                return Err(RuntimeDiagnostic::new(
                    RuntimeError::ExpectedKind {
                        expected: "class",
                        found: other.type_name(),
                    },
                    class_expr.span,
                ))
            }
        };
        let args = self.eval_args(domain, args)?;
        let name = self.eval_member_key(domain, constructor)?;

        let members = class.flattened_members();
        let ctor = match members.get(&name).map(|member| member.value.clone()) {
            Some(Value::Function(func)) => func,
            Some(_) => return Err(RuntimeDiagnostic::new(RuntimeError::NotAConstructor(name), span)),
            None => return Err(RuntimeDiagnostic::new(RuntimeError::NoSuchConstructor(name), span)),
        };

        let object = Value::Object(Rc::new(ObjectValue {
            members: MemberMap::new(members),
            meta: vec![Value::Class(class)],
        }));
        let this = Member {
            modifiers: vec![Modifier::Const],
            ty: object.runtime_type(),
            value: object.clone(),
        };
        self.call_function(domain, &ctor, args, vec![("self", this)], span)?;
        Ok(object)
    }
}
