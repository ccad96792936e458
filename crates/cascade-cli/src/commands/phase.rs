// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Front-end stages and the commands that inspect them: lex, parse.

use std::path::Path;
use std::process;
use std::time::Instant;

use cascade_ast::stmt::Program;
use cascade_ast::token::Token;
use cascade_diagnostics::{Diagnostic, ToDiagnostic};

use crate::{output, show_diagnostics, Format, Options};

/// Read a `.cascade` file, exiting with an error for any other extension.
pub fn load_source(path: &str) -> String {
    if Path::new(path).extension().and_then(|ext| ext.to_str()) != Some("cascade") {
        eprintln!(
            "{}: {} is not a Cascade source file; expected a `.cascade` extension",
            output::error_label(),
            output::file_path(path)
        );
        process::exit(1);
    }
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), output::file_path(path), e);
            process::exit(1);
        }
    }
}

/// Tokenize, or report the lexer's diagnostics and exit.
pub fn lex_or_exit(source: &str, path: &str, options: Options) -> Vec<Token> {
    let started = Instant::now();
    let result = cascade_lexer::Lexer::new(source).tokenize();
    if options.time {
        eprintln!("{}", output::timing("lex", started.elapsed()));
    }

    if !result.is_ok() {
        let diags: Vec<Diagnostic> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
        fail_stage(&diags, source, path, "lex", options.format);
    }
    result.tokens
}

/// Parse, or report the parse error and exit.
pub fn parse_or_exit(tokens: Vec<Token>, source: &str, path: &str, options: Options) -> Program {
    let started = Instant::now();
    let result = cascade_parser::Parser::new(tokens).parse();
    if options.time {
        eprintln!("{}", output::timing("parse", started.elapsed()));
    }

    if !result.is_ok() {
        let diags: Vec<Diagnostic> = result.errors.iter().map(|e| e.to_diagnostic()).collect();
        fail_stage(&diags, source, path, "parse", options.format);
    }
    result.program
}

fn fail_stage(diags: &[Diagnostic], source: &str, path: &str, phase: &str, format: Format) -> ! {
    show_diagnostics(diags, source, path, phase, format);
    if format == Format::Human {
        eprintln!("{}", output::banner_fail(&capitalized(phase), diags.len()));
    }
    process::exit(1);
}

fn capitalized(phase: &str) -> String {
    let mut chars = phase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn cmd_lex(path: &str, options: Options) {
    let source = load_source(path);
    let tokens = lex_or_exit(&source, path, options);

    match options.format {
        Format::Human => {
            println!("{}\n", output::heading(&format!("Tokens ({})", tokens.len())));
            for tok in &tokens {
                println!("{:>4} {:>5}:{:<5} {:?}", tok.line, tok.span.start, tok.span.end, tok.kind);
            }
            println!("\n{}", output::banner_ok("Lex"));
        }
        Format::Json => print_json(&tokens),
    }
}

pub fn cmd_parse(path: &str, options: Options) {
    let source = load_source(path);
    let tokens = lex_or_exit(&source, path, options);
    let program = parse_or_exit(tokens, &source, path, options);

    match options.format {
        Format::Human => {
            println!("{}\n", output::heading(&format!("AST ({} statements)", program.body.len())));
            for (i, stmt) in program.body.iter().enumerate() {
                println!("--- Statement {} ---", i + 1);
                println!("{:#?}", stmt);
                println!();
            }
            println!("{}", output::banner_ok("Parse"));
        }
        Format::Json => print_json(&program),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{}: serializing output: {}", output::error_label(), e);
            process::exit(1);
        }
    }
}
