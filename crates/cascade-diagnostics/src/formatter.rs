// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! ```text
//! error[E0300]: cannot store a value of type `string` where `int` is declared
//!   --> main.cascade:2:9
//!    |
//!  2 | int x = "seven"
//!    | ^^^^^^^^^^^^^^^ expected `int`
//!    |
//!    = note: declare the slot `dynamic` to accept any value, or add `?` to allow null
//! ```

use std::collections::BTreeMap;

use cascade_ast::LineMap;
use colored::Colorize;

use crate::{Diagnostic, LabelStyle, Severity};

/// Formats diagnostics against one source file.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// One source line with the labels that start on it.
struct AnnotatedLine<'d> {
    line_num: usize,
    text: String,
    marks: Vec<Mark<'d>>,
}

/// A label resolved to 1-based columns on its line.
struct Mark<'d> {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<&'d str>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        self.format_header(&mut out, diagnostic);

        let lines = self.annotated_lines(diagnostic);
        let gutter = lines
            .last()
            .map(|l| l.line_num.to_string().len())
            .unwrap_or(1)
            .max(2);

        if let Some(span) = diagnostic.primary_span() {
            let (line, col) = self.line_map.offset_to_line_col(span.start);
            out.push_str(&format!(
                "{}{} {}:{}:{}\n",
                " ".repeat(gutter - 1),
                "-->".blue(),
                self.file_name.unwrap_or("<source>"),
                line,
                col
            ));
            out.push_str(&format!("{} {}\n", " ".repeat(gutter + 1), "|".blue()));
        }

        let mut prev: Option<usize> = None;
        for line in &lines {
            if matches!(prev, Some(p) if line.line_num > p + 1) {
                out.push_str(&format!("{} {}\n", " ".repeat(gutter), "...".blue()));
            }
            out.push_str(&format!(
                "{:>width$} {} {}\n",
                line.line_num.to_string().blue().bold(),
                "|".blue(),
                line.text,
                width = gutter + 1,
            ));
            self.format_marks(&mut out, line, gutter);
            prev = Some(line.line_num);
        }

        self.format_footer(&mut out, diagnostic, gutter, !lines.is_empty());
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity = match diagnostic.severity {
            Severity::Error => diagnostic.severity.name().red().bold(),
            Severity::Warning => diagnostic.severity.name().yellow().bold(),
            Severity::Note => diagnostic.severity.name().blue().bold(),
        };
        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code.0.as_str().red().bold(),
                diagnostic.message.as_str().bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity, diagnostic.message.as_str().bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter: usize, had_source: bool) {
        if diagnostic.notes.is_empty() && diagnostic.help.is_none() {
            return;
        }
        if had_source {
            out.push_str(&format!("{} {}\n", " ".repeat(gutter + 1), "|".blue()));
        }
        for note in &diagnostic.notes {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter + 1),
                "=".cyan(),
                "note".cyan().bold(),
                note
            ));
        }
        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter + 1),
                "=".cyan(),
                "help".cyan().bold(),
                help
            ));
        }
    }

    fn annotated_lines<'d>(&self, diagnostic: &'d Diagnostic) -> Vec<AnnotatedLine<'d>> {
        let mut lines: BTreeMap<usize, AnnotatedLine<'d>> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line_num, col_start) = self.line_map.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.line_map.offset_to_line_col(label.span.end);
            let Some(text) = self.line_map.line_text(self.source, line_num) else {
                continue;
            };

            // Multi-line spans are underlined to the end of their first line.
            let col_end = if end_line == line_num { col_end } else { text.len() + 1 };

            lines
                .entry(line_num)
                .or_insert_with(|| AnnotatedLine {
                    line_num,
                    text: text.to_string(),
                    marks: Vec::new(),
                })
                .marks
                .push(Mark {
                    col_start,
                    col_end: col_end.max(col_start + 1),
                    style: label.style,
                    message: label.message.as_deref(),
                });
        }

        lines.into_values().collect()
    }

    fn format_marks(&self, out: &mut String, line: &AnnotatedLine<'_>, gutter: usize) {
        let width = line.text.len() + 2;
        let mut underline = vec![' '; width];
        let mut marks: Vec<&Mark<'_>> = line.marks.iter().collect();
        // Primary marks are drawn last so they win where labels overlap.
        marks.sort_by_key(|m| (m.style == LabelStyle::Primary, m.col_start));

        for mark in &marks {
            let ch = match mark.style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            for slot in underline.iter_mut().take((mark.col_end - 1).min(width)).skip(mark.col_start - 1) {
                *slot = ch;
            }
        }

        let drawn: String = underline.into_iter().collect::<String>().trim_end().to_string();
        if drawn.is_empty() {
            return;
        }
        let colored_underline = color_underline(&drawn);
        let pad = " ".repeat(gutter + 1);

        let messages: Vec<&Mark<'_>> = marks.iter().copied().filter(|m| m.message.is_some()).collect();
        match messages.as_slice() {
            [] => out.push_str(&format!("{} {} {}\n", pad, "|".blue(), colored_underline)),
            [only] => out.push_str(&format!(
                "{} {} {} {}\n",
                pad,
                "|".blue(),
                colored_underline,
                style_message(only.style, only.message.unwrap_or(""))
            )),
            many => {
                out.push_str(&format!("{} {} {}\n", pad, "|".blue(), colored_underline));
                for mark in many.iter().rev() {
                    out.push_str(&format!(
                        "{} {} {}{}\n",
                        pad,
                        "|".blue(),
                        " ".repeat(mark.col_start - 1),
                        style_message(mark.style, mark.message.unwrap_or(""))
                    ));
                }
            }
        }
    }
}

fn style_message(style: LabelStyle, msg: &str) -> String {
    match style {
        LabelStyle::Primary => msg.red().bold().to_string(),
        LabelStyle::Secondary => msg.blue().to_string(),
    }
}

/// Color runs of `^` red and runs of `-` blue.
fn color_underline(s: &str) -> String {
    let mut out = String::new();
    let mut run = String::new();
    let mut run_char: Option<char> = None;

    for ch in s.chars() {
        if Some(ch) != run_char && !run.is_empty() {
            out.push_str(&paint(&run, run_char));
            run.clear();
        }
        run.push(ch);
        run_char = Some(ch);
    }
    out.push_str(&paint(&run, run_char));
    out
}

fn paint(run: &str, ch: Option<char>) -> String {
    match ch {
        Some('^') => run.red().bold().to_string(),
        Some('-') => run.blue().to_string(),
        _ => run.to_string(),
    }
}
