// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Execution command: run.

use std::process;
use std::time::Instant;

use cascade_diagnostics::ToDiagnostic;

use super::phase::{lex_or_exit, load_source, parse_or_exit};
use crate::{output, show_diagnostics, Format, Options};

pub fn cmd_run(path: &str, options: Options) {
    let source = load_source(path);
    let tokens = lex_or_exit(&source, path, options);
    let program = parse_or_exit(tokens, &source, path, options);

    let mut interp = cascade_interp::Interpreter::new();
    let started = Instant::now();
    let result = interp.run(&program);
    if options.time {
        eprintln!("{}", output::timing("run", started.elapsed()));
    }

    if let Err(diag) = result {
        show_diagnostics(&[diag.to_diagnostic()], &source, path, "run", options.format);
        if options.format == Format::Human {
            eprintln!("{}", output::banner_fail("Runtime", 0));
        }
        process::exit(1);
    }
}
