// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use crate::output;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_usage() {
    println!(
        "{} {} - a small scripting language with classes and typed slots",
        output::title("Cascade"),
        output::version(VERSION)
    );
    println!();
    println!(
        "{}: {} {} {}",
        output::section_header("Usage"),
        output::command("cascade"),
        output::arg("<command>"),
        output::arg("[args]")
    );
    println!();
    println!("{}", output::section_header("Commands:"));
    println!("  {} {}      Run a program", output::command("run"), output::arg("<file>"));
    println!("  {} {}      Print the tokens of a file", output::command("lex"), output::arg("<file>"));
    println!("  {} {}    Print the syntax tree of a file", output::command("parse"), output::arg("<file>"));
    println!("  {} {}  Explain an error code", output::command("explain"), output::arg("<code>"));
    println!("  {}             Show this help", output::command("help"));
    println!("  {}          Show version", output::command("version"));
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {} {}  Diagnostic output (default: human)", output::arg("--format"), output::arg("human|json"));
    println!("  {}                 Print how long each stage took", output::arg("--time"));
    println!();
    println!("Source files must use the {} extension.", output::arg(".cascade"));
}

pub fn print_command_usage(command: &str) {
    let args = match command {
        "explain" => "<code>",
        _ => "<file.cascade> [--format human|json] [--time]",
    };
    eprintln!(
        "{}: {} {} {}",
        output::section_header("Usage"),
        output::command("cascade"),
        output::command(command),
        output::arg(args)
    );
}
