// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The `file` object. Both methods require the file to exist already.

use std::path::Path;

use cascade_ast::expr::StandardType;
use indexmap::IndexMap;

use crate::env::Domain;
use crate::interp::{Interpreter, RuntimeError};
use crate::value::{Member, Value};

use super::{param, HostObject};

pub(super) fn members() -> IndexMap<String, Member> {
    HostObject::new()
        .method("read", vec![param("filePath", StandardType::String)], read)
        .method(
            "write",
            vec![
                param("filePath", StandardType::String),
                param("contents", StandardType::String),
            ],
            write,
        )
        .build()
}

fn existing_file(path: String) -> Result<String, RuntimeError> {
    if Path::new(&path).is_file() {
        Ok(path)
    } else {
        Err(RuntimeError::InvalidFilePath(path))
    }
}

fn read(interp: &mut Interpreter, domain: &Domain) -> Result<Value, RuntimeError> {
    let path = existing_file(interp.expect_string(domain, "filePath")?)?;
    std::fs::read_to_string(&path)
        .map(Value::String)
        .map_err(|e| RuntimeError::Host(format!("failed to read '{}': {}", path, e)))
}

fn write(interp: &mut Interpreter, domain: &Domain) -> Result<Value, RuntimeError> {
    let path = existing_file(interp.expect_string(domain, "filePath")?)?;
    let contents = interp.expect_string(domain, "contents")?;
    std::fs::write(&path, contents)
        .map_err(|e| RuntimeError::Host(format!("failed to write '{}': {}", path, e)))?;
    Ok(Value::Null)
}
