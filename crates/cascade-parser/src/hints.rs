// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error hints - suggestions for fixing common mistakes.
//!
//! Kept separate from the main parser to avoid clutter.

use cascade_ast::token::TokenKind;

/// Get a hint for an "expected X" error based on what was found instead.
pub fn for_expected(expected: &str, found: &TokenKind) -> Option<&'static str> {
    match (expected, found) {
        // Block hints
        ("'{'", TokenKind::Colon) => Some("bodies use braces, not ':'"),
        ("'{'", _) => Some("bodies start with '{'"),
        ("'}'", TokenKind::Eof) => Some("every '{' needs a matching '}'"),
        ("'}'", _) => Some("separate members with ',' or ';'"),

        // Parentheses hints
        ("')'", TokenKind::Eof) => Some("add ')' to close the parenthesis"),
        ("')'", _) => Some("separate arguments and parameters with ','"),
        ("']'", TokenKind::Eof) => Some("add ']' to close the bracket"),

        // Loop hints
        ("'->'", _) => Some("syntax: for int i = 0 -> 10, 1 { ... }"),
        ("','", _) => Some("separate the class and its constructor with ','"),
        ("'while'", _) => Some("a 'post' body must be followed by 'while <condition>'"),

        // Ternary hints
        ("':'", _) => Some("a ternary needs both branches: cond ? a : b"),

        // Expression hints
        ("expression", TokenKind::Semi) => Some("statement is incomplete"),
        ("expression", TokenKind::Eof) => Some("the file ended in the middle of an expression"),
        ("expression", TokenKind::RBrace) => Some("statement is incomplete"),
        ("expression", k) if k.is_type_keyword() => {
            Some("declarations can't be used as values")
        }
        ("expression", _) => Some("try a value, variable, or function call"),

        // Name hints
        ("a name", TokenKind::Number { .. }) => Some("names can't start with a number"),
        ("a name", k) if k.is_type_keyword() || k.is_modifier() => {
            Some("keywords can't be used as names")
        }
        ("a name", _) => Some("names start with a letter or '_'"),

        // Type hints
        ("type", TokenKind::Ident(_)) => {
            Some("classes are referenced as meta: object:ClassName")
        }
        ("type", _) => Some("try a type like 'int', 'string', or 'dynamic'"),

        ("loop variable declaration", _) => Some("start the loop with a typed variable: for int i = 0 -> ..."),

        _ => None,
    }
}
