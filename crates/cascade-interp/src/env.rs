// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Scope chain ("domains") for variable bindings and non-local exits.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use cascade_ast::expr::Modifier;
use cascade_ast::stmt::{ExitKind, ExitTarget};
use indexmap::IndexMap;

use crate::interp::RuntimeError;
use crate::value::{Member, RuntimeType, Value};

/// What kind of block a scope belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeContext {
    Program,
    Function,
    Loop,
    IfClause,
}

impl ScopeContext {
    fn handles(self, target: ExitTarget) -> bool {
        matches!(
            (self, target),
            (ScopeContext::Program, ExitTarget::Program)
                | (ScopeContext::Function, ExitTarget::Function)
                | (ScopeContext::Loop, ExitTarget::Loop)
        )
    }
}

/// A pending `return`/`break`/`continue`/`exit`, stored on the scope that consumes it.
#[derive(Debug, Clone)]
pub struct ExitSignal {
    pub kind: ExitKind,
    pub value: Value,
}

struct Scope {
    members: RefCell<IndexMap<String, Member>>,
    parent: Option<Domain>,
    context: ScopeContext,
    active: Cell<bool>,
    signal: RefCell<Option<ExitSignal>>,
}

/// A handle to one scope in the chain. Cloning shares the scope.
#[derive(Clone)]
pub struct Domain {
    scope: Rc<Scope>,
}

impl Domain {
    /// The program root.
    pub fn root() -> Self {
        Self::with_parent(None, ScopeContext::Program)
    }

    /// A child scope whose lookups fall through to `self`.
    pub fn child(&self, context: ScopeContext) -> Self {
        Self::with_parent(Some(self.clone()), context)
    }

    fn with_parent(parent: Option<Domain>, context: ScopeContext) -> Self {
        Self {
            scope: Rc::new(Scope {
                members: RefCell::new(IndexMap::new()),
                parent,
                context,
                active: Cell::new(true),
                signal: RefCell::new(None),
            }),
        }
    }

    pub fn context(&self) -> ScopeContext {
        self.scope.context
    }

    pub fn parent(&self) -> Option<&Domain> {
        self.scope.parent.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.scope.active.get()
    }

    pub fn reactivate(&self) {
        self.scope.active.set(true);
    }

    /// Names bound directly in this scope.
    pub fn local_names(&self) -> Vec<String> {
        self.scope.members.borrow().keys().cloned().collect()
    }

    /// The nearest scope, starting here, that binds `name`.
    pub fn resolve(&self, name: &str) -> Option<Domain> {
        let mut current = Some(self);
        while let Some(domain) = current {
            if domain.scope.members.borrow().contains_key(name) {
                return Some(domain.clone());
            }
            current = domain.parent();
        }
        None
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        let owner = self.resolve(name)?;
        let members = owner.scope.members.borrow();
        let value = members.get(name).map(|m| m.value.clone());
        value
    }

    /// Declare `name`. A name that already resolves somewhere in the chain
    /// is reset in place instead of being shadowed.
    pub fn declare(&self, name: &str, modifiers: Vec<Modifier>, ty: RuntimeType, value: Value) -> Result<(), RuntimeError> {
        if let Some(owner) = self.resolve(name) {
            let mut members = owner.scope.members.borrow_mut();
            if let Some(existing) = members.get_mut(name) {
                return existing.reset(modifiers, ty, value);
            }
        }
        self.declare_local(name, Member::new(modifiers, ty, value)?);
        Ok(())
    }

    /// Bind directly in this scope, replacing any local binding.
    pub fn declare_local(&self, name: &str, member: Member) {
        self.scope.members.borrow_mut().insert(name.to_string(), member);
    }

    pub fn assign(&self, name: &str, value: Value) -> Result<Value, RuntimeError> {
        let owner = self
            .resolve(name)
            .ok_or_else(|| RuntimeError::AssignToUndeclared(name.to_string()))?;
        let mut members = owner.scope.members.borrow_mut();
        let member = members
            .get_mut(name)
            .ok_or_else(|| RuntimeError::AssignToUndeclared(name.to_string()))?;
        member.assign(name, value.clone())?;
        Ok(value)
    }

    /// Remove the nearest binding of `name`. A miss is an error at any depth.
    pub fn delete(&self, name: &str) -> Result<(), RuntimeError> {
        let owner = self
            .resolve(name)
            .ok_or_else(|| RuntimeError::DeleteMissing(name.to_string()))?;
        owner.scope.members.borrow_mut().shift_remove(name);
        Ok(())
    }

    /// Whether an exit aimed at `target` has a scope to land in.
    /// Loop exits never cross a function boundary.
    pub fn has_context(&self, target: ExitTarget) -> bool {
        let mut current = Some(self);
        while let Some(domain) = current {
            if domain.context().handles(target) {
                return true;
            }
            if target == ExitTarget::Loop && domain.context() == ScopeContext::Function {
                return false;
            }
            current = domain.parent();
        }
        false
    }

    /// Deactivate every scope from here up to and including the one that
    /// handles the signal, and leave the signal there.
    pub fn exit(&self, kind: ExitKind, value: Value) {
        if let Some(handler) = self.unwind(kind.target()) {
            *handler.scope.signal.borrow_mut() = Some(ExitSignal { kind, value });
        }
    }

    /// Deactivate scopes up to the handler of `target` without leaving a signal.
    pub fn unwind(&self, target: ExitTarget) -> Option<Domain> {
        let mut current = Some(self);
        while let Some(domain) = current {
            domain.scope.active.set(false);
            if domain.context().handles(target) {
                return Some(domain.clone());
            }
            current = domain.parent();
        }
        None
    }

    pub fn take_signal(&self) -> Option<ExitSignal> {
        self.scope.signal.borrow_mut().take()
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("context", &self.context())
            .field("active", &self.is_active())
            .field("names", &self.local_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_ast::expr::StandardType;

    fn int() -> RuntimeType {
        RuntimeType::plain(StandardType::Integer)
    }

    #[test]
    fn lookup_walks_outward() {
        let root = Domain::root();
        root.declare("x", vec![], int(), Value::Int(1)).unwrap();
        let inner = root.child(ScopeContext::Loop).child(ScopeContext::IfClause);
        assert!(matches!(inner.lookup("x"), Some(Value::Int(1))));
        assert!(inner.lookup("y").is_none());
    }

    #[test]
    fn redeclaration_resets_the_outer_slot() {
        let root = Domain::root();
        root.declare("x", vec![Modifier::Const], int(), Value::Int(1)).unwrap();
        let inner = root.child(ScopeContext::Function);
        inner.declare("x", vec![], RuntimeType::plain(StandardType::String), Value::String("s".into())).unwrap();
        assert!(inner.local_names().is_empty());
        assert!(matches!(root.lookup("x"), Some(Value::String(_))));
        root.assign("x", Value::String("t".into())).unwrap();
    }

    #[test]
    fn assignment_needs_a_declaration() {
        let root = Domain::root();
        let err = root.assign("missing", Value::Int(1)).unwrap_err();
        assert!(matches!(err, RuntimeError::AssignToUndeclared(_)));
    }

    #[test]
    fn delete_miss_is_fatal_at_any_depth() {
        let root = Domain::root();
        let inner = root.child(ScopeContext::Loop);
        assert!(matches!(inner.delete("nope"), Err(RuntimeError::DeleteMissing(_))));
        assert!(matches!(root.delete("nope"), Err(RuntimeError::DeleteMissing(_))));

        root.declare("x", vec![], int(), Value::Int(1)).unwrap();
        inner.delete("x").unwrap();
        assert!(root.lookup("x").is_none());
    }

    #[test]
    fn exit_deactivates_through_the_handler() {
        let root = Domain::root();
        let func = root.child(ScopeContext::Function);
        let branch = func.child(ScopeContext::IfClause).child(ScopeContext::IfClause);
        assert!(branch.has_context(ExitTarget::Function));

        branch.exit(ExitKind::Return, Value::Int(7));
        assert!(!branch.is_active());
        assert!(!func.is_active());
        assert!(root.is_active());
        let signal = func.take_signal().unwrap();
        assert_eq!(signal.kind, ExitKind::Return);
        assert!(matches!(signal.value, Value::Int(7)));
    }

    #[test]
    fn loop_exits_stop_at_functions() {
        let root = Domain::root();
        let body = root.child(ScopeContext::Loop).child(ScopeContext::Function);
        assert!(!body.has_context(ExitTarget::Loop));
        assert!(!root.has_context(ExitTarget::Loop));
        assert!(body.has_context(ExitTarget::Program));
    }
}
