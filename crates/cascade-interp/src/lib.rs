// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tree-walk interpreter for the Cascade language.
//!
//! Executes the AST directly against a chain of scopes, with host objects
//! (`Console`, `io`, `file`) bound into the global scope.

mod value;
mod env;
mod interp;
mod stdlib;

pub use env::{Domain, ExitSignal, ScopeContext};
pub use interp::{Interpreter, RuntimeDiagnostic, RuntimeError};
pub use value::{
    types_match, ClassValue, FunctionValue, HostFn, HostFunction, Member, MemberMap, ObjectValue, ParamSpec,
    RuntimeType, Value,
};
