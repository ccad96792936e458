// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tool commands: explain.

use std::process;

use cascade_diagnostics::codes::ErrorCodeRegistry;
use colored::Colorize;

use crate::output;

pub fn cmd_explain(code: &str) {
    let registry = ErrorCodeRegistry::default();
    let code = code.to_ascii_uppercase();

    match registry.get(&code) {
        Some(info) => {
            println!("{}[{}]: {}", "error".red().bold(), info.code.red().bold(), info.title.bold());
            println!();
            println!("  Category: {}", info.category);
            println!();
            println!("  {}", info.explanation);
            println!();
            println!("  Run `cascade run <file>` to see this error in context.");
        }
        None => {
            eprintln!("{}: unknown error code `{}`", output::error_label(), code);
            eprintln!();
            eprintln!("Error codes use the format E0NNN, e.g. E0200 or E0300.");
            process::exit(1);
        }
    }
}
