// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Cascade CLI: runs programs and inspects the lexer and parser stages.

mod commands;
mod help;
mod output;

use std::env;
use std::process;

use cascade_diagnostics::formatter::DiagnosticFormatter;
use cascade_diagnostics::json;
use cascade_diagnostics::Diagnostic;

/// How diagnostics are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

/// Flags shared by `run`, `lex` and `parse`.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub format: Format,
    pub time: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format: Format::Human,
            time: false,
        }
    }
}

fn main() {
    output::init();
    let args: Vec<String> = env::args().skip(1).collect();

    let Some(command) = args.first() else {
        help::print_usage();
        return;
    };

    match command.as_str() {
        "run" | "lex" | "parse" => {
            let (path, options) = match parse_file_args(&args[1..]) {
                Ok(parsed) => parsed,
                Err(msg) => {
                    eprintln!("{}: {}", output::error_label(), msg);
                    help::print_command_usage(command);
                    process::exit(1);
                }
            };
            match command.as_str() {
                "run" => commands::run::cmd_run(&path, options),
                "lex" => commands::phase::cmd_lex(&path, options),
                _ => commands::phase::cmd_parse(&path, options),
            }
        }
        "explain" => match args.get(1) {
            Some(code) => commands::tools::cmd_explain(code),
            None => {
                help::print_command_usage("explain");
                process::exit(1);
            }
        },
        "help" | "--help" | "-h" => help::print_usage(),
        "version" | "--version" | "-V" => println!("cascade {}", help::VERSION),
        other if other.ends_with(".cascade") => commands::run::cmd_run(other, Options::default()),
        other => {
            eprintln!("{}: unknown command `{}`", output::error_label(), other);
            eprintln!();
            help::print_usage();
            process::exit(1);
        }
    }
}

/// Split `<file> [--format human|json] [--time]` into a path and options.
fn parse_file_args(args: &[String]) -> Result<(String, Options), String> {
    let mut options = Options::default();
    let mut path: Option<String> = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--time" => options.time = true,
            "--format" => {
                options.format = match iter.next().map(String::as_str) {
                    Some("human") => Format::Human,
                    Some("json") => Format::Json,
                    Some(other) => return Err(format!("unknown format `{}`; expected human or json", other)),
                    None => return Err("`--format` needs a value".to_string()),
                };
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{}`", flag)),
            file => {
                if path.is_some() {
                    return Err(format!("unexpected argument `{}`", file));
                }
                path = Some(file.to_string());
            }
        }
    }

    path.map(|p| (p, options)).ok_or_else(|| "missing source file".to_string())
}

/// Print one stage's diagnostics, as colored text on stderr or a JSON report on stdout.
pub fn show_diagnostics(diagnostics: &[Diagnostic], source: &str, path: &str, phase: &str, format: Format) {
    match format {
        Format::Human => {
            let formatter = DiagnosticFormatter::new(source).with_file_name(path);
            for diag in diagnostics {
                eprintln!("{}", formatter.format(diag));
            }
        }
        Format::Json => {
            let report = json::to_json_report(diagnostics, source, path, phase);
            println!("{}", json::to_json_string(&report));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn file_args_with_flags() {
        let (path, options) = parse_file_args(&args(&["main.cascade", "--format", "json", "--time"])).unwrap();
        assert_eq!(path, "main.cascade");
        assert_eq!(options.format, Format::Json);
        assert!(options.time);
    }

    #[test]
    fn file_args_errors() {
        assert!(parse_file_args(&args(&[])).is_err());
        assert!(parse_file_args(&args(&["a.cascade", "--format"])).is_err());
        assert!(parse_file_args(&args(&["a.cascade", "--format", "xml"])).is_err());
        assert!(parse_file_args(&args(&["a.cascade", "--verbose"])).is_err());
        assert!(parse_file_args(&args(&["a.cascade", "b.cascade"])).is_err());
    }
}
