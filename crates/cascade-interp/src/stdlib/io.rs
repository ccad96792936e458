// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The `io` object.

use cascade_ast::expr::{ExprKind, StandardType};
use indexmap::IndexMap;

use crate::env::Domain;
use crate::interp::{Interpreter, RuntimeError};
use crate::value::{Member, Value};

use super::{param, param_or, read_line, HostObject};

pub(super) fn members() -> IndexMap<String, Member> {
    HostObject::new()
        .method(
            "write",
            vec![
                param("text", StandardType::Dynamic),
                param_or("newLine", StandardType::Boolean, ExprKind::Bool(false)),
            ],
            write,
        )
        .method("read", Vec::new(), read)
        .build()
}

fn write(interp: &mut Interpreter, domain: &Domain) -> Result<Value, RuntimeError> {
    let text = domain.lookup("text").unwrap_or(Value::Null);
    let newline = matches!(domain.lookup("newLine"), Some(Value::Bool(true)));
    if newline {
        interp.write_output(&format!("{}\n", text))?;
    } else {
        interp.write_output(&text.to_string())?;
    }
    Ok(Value::Null)
}

fn read(_interp: &mut Interpreter, _domain: &Domain) -> Result<Value, RuntimeError> {
    read_line().map(Value::String)
}
