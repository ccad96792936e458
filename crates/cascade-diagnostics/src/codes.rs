// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps codes (E0001, E0300, ...) to titles, categories and a short
//! explanation. Used by `cascade explain <code>` and the JSON report.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Resolution,
    Type,
    Operator,
    ControlFlow,
    Host,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCategory::Lexical => "Lexical",
            ErrorCategory::Syntax => "Syntax",
            ErrorCategory::Resolution => "Resolution",
            ErrorCategory::Type => "Type",
            ErrorCategory::Operator => "Operator",
            ErrorCategory::ControlFlow => "Control flow",
            ErrorCategory::Host => "Host",
        };
        f.write_str(name)
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr, $explanation:literal)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
                explanation: $explanation,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer (E00xx)
                "E0001" => ("unexpected character", Lexical,
                    "The character is not part of any token. It is skipped and lexing continues, but the file will not run."),
                "E0002" => ("unterminated string literal", Lexical,
                    "A string was opened with '\"' and never closed. Lexing stops at this point."),
                "E0003" => ("malformed number", Lexical,
                    "A number may contain at most one '.', and it must be followed by digits."),

                // Parser (E01xx)
                "E0100" => ("invalid syntax", Syntax,
                    "The parser found a token it did not expect. Parsing stops at the first error."),

                // Names and members (E02xx)
                "E0200" => ("undefined variable", Resolution,
                    "No scope between the current one and the global scope declares this name."),
                "E0201" => ("assignment to undeclared name", Resolution,
                    "Plain assignment only updates existing names. Declare the name with a type first."),
                "E0202" => ("delete of a missing name", Resolution,
                    "`delete` removes an existing variable or member. Nothing by this name exists."),
                "E0203" => ("ensure failed", Resolution,
                    "`ensure` stops the program when the named variable or member does not exist."),
                "E0204" => ("no such member", Resolution,
                    "The object or class has no member with this key."),
                "E0205" => ("duplicate member", Resolution,
                    "A class or object literal declares the same key twice."),
                "E0206" => ("no such constructor", Resolution,
                    "`new Class, name(...)` needs a member `name` on the class or one of its superclasses."),
                "E0207" => ("not a constructor", Resolution,
                    "The member named in a `new` expression is not a function."),

                // Types (E03xx)
                "E0300" => ("mismatched types", Type,
                    "The value's type does not match the declared type of the slot it is stored in."),
                "E0301" => ("parameter type mismatch", Type,
                    "An argument does not match the declared type of its parameter."),
                "E0302" => ("return type mismatch", Type,
                    "A function returned a value that does not match its declared return type."),
                "E0303" => ("wrong kind of value", Type,
                    "The operation needs a specific kind of value, such as a bool condition or a callable function."),
                "E0304" => ("assignment to constant", Type,
                    "Members declared `const` cannot be assigned. Redeclaring the name replaces it."),
                "E0305" => ("too many arguments", Type,
                    "A call passed more arguments than the function declares parameters."),
                "E0306" => ("not a member container", Type,
                    "Only objects and classes have members."),
                "E0307" => ("invalid member key", Type,
                    "Computed member keys must be strings, numbers or bools."),

                // Operators (E04xx)
                "E0400" => ("invalid operands", Operator,
                    "The binary operator is not defined for these operand types."),
                "E0401" => ("invalid operand", Operator,
                    "The unary operator is not defined for this operand type."),
                "E0402" => ("division by zero", Operator,
                    "Integer division or remainder by zero. Floating point division yields infinity instead."),

                // Control flow (E05xx)
                "E0500" => ("exit outside of its context", ControlFlow,
                    "`return` needs an enclosing function. `break` and `continue` need an enclosing loop in the same function."),
                "E0501" => ("invalid loop counter", ControlFlow,
                    "A `for` loop must declare a plain named counter."),
                "E0502" => ("call depth exceeded", ControlFlow,
                    "Function calls nested too deeply, usually because of unbounded recursion."),
                "E0503" => ("program exited", ControlFlow,
                    "An `exit` stopped the program while a host call was in progress."),

                // Host objects (E06xx)
                "E0600" => ("invalid file path", Host,
                    "`file.read` and `file.write` require a path to an existing file."),
                "E0601" => ("host failure", Host,
                    "A host object failed while performing I/O."),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    /// All codes in ascending order.
    pub fn all(&self) -> Vec<&ErrorCodeInfo> {
        let mut infos: Vec<&ErrorCodeInfo> = self.codes.values().collect();
        infos.sort_by_key(|info| info.code);
        infos
    }
}
