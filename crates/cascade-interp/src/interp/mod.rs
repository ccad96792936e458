// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The interpreter implementation.
//!
//! This is a tree-walk interpreter that evaluates the AST directly against a
//! chain of [`Domain`] scopes. Non-local exits do not unwind the Rust stack:
//! an exit statement deactivates scopes and every block checks its own scope
//! after each statement.

use std::io::Write;
use std::sync::{Arc, Mutex};

mod assign;
mod call;
mod eval_expr;
mod exec_stmt;
mod operators;

use cascade_ast::expr::StandardType;
use cascade_ast::stmt::{ExitTarget, Program};
use cascade_ast::Span;

use crate::env::Domain;
use crate::value::{Member, RuntimeType, Value};

/// Nested calls allowed before evaluation gives up.
const MAX_CALL_DEPTH: usize = 200;

/// Remaining stack below which evaluation switches to a fresh segment.
const STACK_RED_ZONE: usize = 128 * 1024;
/// Size of each extra stack segment.
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// The tree-walk interpreter.
pub struct Interpreter {
    /// Program root. Host objects live here.
    global: Domain,
    /// Script function calls currently on the stack.
    call_depth: usize,
    /// Optional output buffer for capturing stdout (used in tests).
    output_buffer: Option<Arc<Mutex<String>>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(None)
    }

    /// Returns interpreter and output buffer reference.
    pub fn with_captured_output() -> (Self, Arc<Mutex<String>>) {
        let buffer = Arc::new(Mutex::new(String::new()));
        (Self::with_output(Some(buffer.clone())), buffer)
    }

    fn with_output(output_buffer: Option<Arc<Mutex<String>>>) -> Self {
        let mut interp = Self {
            global: Domain::root(),
            call_depth: 0,
            output_buffer,
        };
        interp.install_host_objects();
        interp
    }

    /// The program root scope.
    pub fn global(&self) -> &Domain {
        &self.global
    }

    /// Bind a constant, object-typed global before the program runs.
    pub fn register_global(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let member = Member::constant(RuntimeType::plain(StandardType::Object), value)?;
        self.global.declare_local(name, member);
        Ok(())
    }

    /// Run a program in the global scope. The result is the value passed
    /// to a top-level `exit`, or null when the program runs off its end.
    pub fn run(&mut self, program: &Program) -> Result<Value, RuntimeDiagnostic> {
        let global = self.global.clone();
        let outcome = self.exec_block(&global, &program.body);
        self.call_depth = 0;
        match outcome {
            Ok(()) => {}
            Err(diag) if matches!(diag.error, RuntimeError::Halted) => {}
            Err(diag) => {
                global.reactivate();
                return Err(diag);
            }
        }
        let result = global.take_signal().map(|signal| signal.value).unwrap_or(Value::Null);
        global.reactivate();
        Ok(result)
    }

    pub(crate) fn write_output(&self, s: &str) -> Result<(), RuntimeError> {
        if let Some(buf) = &self.output_buffer {
            if let Ok(mut buf) = buf.lock() {
                buf.push_str(s);
            }
            return Ok(());
        }
        // Flushed so prompts appear before a read.
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(s.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| RuntimeError::Host(format!("writing to stdout: {}", e)))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// A runtime error.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),

    #[error("cannot assign to `{0}` before it is declared")]
    AssignToUndeclared(String),

    #[error("cannot delete `{0}`; no such variable or member")]
    DeleteMissing(String),

    #[error("ensure failed; `{0}` does not exist")]
    EnsureFailed(String),

    #[error("member `{0}` does not exist")]
    NoSuchMember(String),

    #[error("a value of type `{0}` has no members")]
    NotAContainer(&'static str),

    #[error("member `{0}` is declared more than once")]
    DuplicateMember(String),

    #[error("a value of type `{0}` can not be used as a member key")]
    InvalidMemberKey(&'static str),

    #[error("class has no constructor `{0}`")]
    NoSuchConstructor(String),

    #[error("`{0}` is not a constructor")]
    NotAConstructor(String),

    #[error("cannot store a value of type `{actual}` where `{expected}` is declared")]
    TypeMismatch { expected: String, actual: String },

    #[error("parameter {index} expects `{expected}`, got `{actual}`")]
    ParamTypeMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("function should return `{expected}`, returned `{actual}`")]
    ReturnTypeMismatch { expected: String, actual: String },

    #[error("expected a {expected} value, found {found}")]
    ExpectedKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("cannot assign to constant `{0}`")]
    ConstAssignment(String),

    #[error("expected at most {expected} argument{}, got {got}", if *.expected == 1 { "" } else { "s" })]
    ArityMismatch { expected: usize, got: usize },

    #[error("cannot apply `{op}` to {left} and {right}")]
    InvalidOperands {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("cannot apply `{op}` to {operand}")]
    InvalidOperand {
        op: &'static str,
        operand: &'static str,
    },

    #[error("division by zero; check divisor before dividing")]
    DivisionByZero,

    #[error("`{keyword}` used outside of a {context}")]
    ExitOutsideContext {
        keyword: &'static str,
        context: ExitTarget,
    },

    #[error("a for loop must declare a named counter")]
    InvalidLoopCounter,

    #[error("maximum call depth of {0} exceeded")]
    CallDepthExceeded(usize),

    #[error("'{0}' is not a valid file path")]
    InvalidFilePath(String),

    #[error("{0}")]
    Host(String),

    // Control flow (not an actual error)
    /// A program `exit` crossed a function call.
    #[error("program exited")]
    Halted,
}

/// Runtime error with source location for diagnostic display.
#[derive(Debug)]
pub struct RuntimeDiagnostic {
    pub error: RuntimeError,
    pub span: Span,
}

impl RuntimeDiagnostic {
    pub fn new(error: RuntimeError, span: Span) -> Self {
        Self { error, span }
    }
}

impl std::fmt::Display for RuntimeDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for RuntimeDiagnostic {}

/// Attach a span to a bare runtime error.
pub(crate) fn at(span: Span) -> impl Fn(RuntimeError) -> RuntimeDiagnostic {
    move |error| RuntimeDiagnostic::new(error, span)
}
