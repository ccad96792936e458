// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Host objects bound into the global scope.
//!
//! Each object is a constant global whose members are constant host
//! functions. Arguments arrive bound by parameter name in the call scope.

mod console;
mod file;
mod io;

use std::rc::Rc;

use cascade_ast::expr::{Expr, ExprKind, Modifier, StandardType};
use cascade_ast::Span;
use indexmap::IndexMap;

use crate::env::Domain;
use crate::interp::{Interpreter, RuntimeError};
use crate::value::{HostFn, HostFunction, Member, MemberMap, ObjectValue, ParamSpec, RuntimeType, Value};

impl Interpreter {
    pub(crate) fn install_host_objects(&mut self) {
        self.bind_host_object("Console", console::members());
        self.bind_host_object("io", io::members());
        self.bind_host_object("file", file::members());
    }

    fn bind_host_object(&mut self, name: &str, members: IndexMap<String, Member>) {
        let object = Value::Object(Rc::new(ObjectValue {
            members: MemberMap::new(members),
            meta: Vec::new(),
        }));
        let member = Member {
            modifiers: vec![Modifier::Const],
            ty: RuntimeType::plain(StandardType::Object),
            value: object,
        };
        self.global().declare_local(name, member);
    }

    /// Read a bound argument as text.
    pub(crate) fn expect_string(&self, domain: &Domain, param: &str) -> Result<String, RuntimeError> {
        match domain.lookup(param) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(RuntimeError::ExpectedKind {
                expected: "string",
                found: other.type_name(),
            }),
            None => Err(RuntimeError::UndefinedVariable(param.to_string())),
        }
    }
}

/// Builds the member table of one host object.
struct HostObject {
    members: IndexMap<String, Member>,
}

impl HostObject {
    fn new() -> Self {
        Self {
            members: IndexMap::new(),
        }
    }

    fn method(mut self, name: &'static str, params: Vec<ParamSpec>, handler: HostFn) -> Self {
        let func = Value::HostFunction(Rc::new(HostFunction { name, params, handler }));
        self.members.insert(
            name.to_string(),
            Member {
                modifiers: vec![Modifier::Const],
                ty: RuntimeType::plain(StandardType::HostFunction),
                value: func,
            },
        );
        self
    }

    fn build(self) -> IndexMap<String, Member> {
        self.members
    }
}

fn param(name: &str, standard: StandardType) -> ParamSpec {
    ParamSpec {
        name: name.to_string(),
        ty: RuntimeType::plain(standard),
        default: None,
    }
}

fn param_or(name: &str, standard: StandardType, default: ExprKind) -> ParamSpec {
    ParamSpec {
        default: Some(Expr::new(default, Span::default())),
        ..param(name, standard)
    }
}

/// One line from stdin without its line terminator. End of input reads as "".
fn read_line() -> Result<String, RuntimeError> {
    use std::io::BufRead;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| RuntimeError::Host(format!("failed to read from stdin: {}", e)))?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
