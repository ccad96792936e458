// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The `Console` object.

use cascade_ast::expr::StandardType;
use indexmap::IndexMap;

use crate::env::Domain;
use crate::interp::{Interpreter, RuntimeError};
use crate::value::{Member, Value};

use super::{param, read_line, HostObject};

pub(super) fn members() -> IndexMap<String, Member> {
    HostObject::new()
        .method("Write", vec![param("text", StandardType::Dynamic)], write)
        .method("Read", Vec::new(), read)
        .build()
}

fn write(interp: &mut Interpreter, domain: &Domain) -> Result<Value, RuntimeError> {
    let text = domain.lookup("text").unwrap_or(Value::Null);
    interp.write_output(&format!("{}\n", text))?;
    Ok(Value::Null)
}

fn read(_interp: &mut Interpreter, _domain: &Domain) -> Result<Value, RuntimeError> {
    read_line().map(Value::String)
}
