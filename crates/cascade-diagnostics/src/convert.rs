// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from stage error types to `Diagnostic`.

use cascade_ast::stmt::ExitTarget;
use cascade_interp::{RuntimeDiagnostic, RuntimeError};
use cascade_lexer::{LexError, LexErrorKind};
use cascade_parser::ParseError;

use crate::{Diagnostic, ToDiagnostic};

impl ToDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let (code, label) = match self.kind {
            LexErrorKind::UnexpectedChar => ("E0001", "not part of any token"),
            LexErrorKind::UnterminatedString => ("E0002", "string starts here"),
            LexErrorKind::MalformedNumber => ("E0003", "invalid number"),
        };
        let mut diag = Diagnostic::error(&self.message)
            .with_code(code)
            .with_primary(self.span, label);
        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }
        diag
    }
}

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(&self.message)
            .with_code("E0100")
            .with_primary(self.span, "here");
        if let Some(ref hint) = self.hint {
            diag = diag.with_help(hint.as_str());
        }
        diag
    }
}

impl ToDiagnostic for RuntimeDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic {
        use RuntimeError::*;

        let base = Diagnostic::error(self.error.to_string());
        let span = self.span;
        match &self.error {
            UndefinedVariable(_) => base
                .with_code("E0200")
                .with_primary(span, "not found in this scope")
                .with_help("declare it first, e.g. `dynamic name = ...`"),

            AssignToUndeclared(_) => base
                .with_code("E0201")
                .with_primary(span, "no declaration in scope")
                .with_help("add a type to declare it, e.g. `int x = 1`"),

            DeleteMissing(_) => base.with_code("E0202").with_primary(span, "nothing to delete"),

            EnsureFailed(_) => base.with_code("E0203").with_primary(span, "required here"),

            NoSuchMember(_) => base.with_code("E0204").with_primary(span, "unknown member"),

            DuplicateMember(_) => base.with_code("E0205").with_primary(span, "declared again here"),

            NoSuchConstructor(_) => base.with_code("E0206").with_primary(span, "constructor not found"),

            NotAConstructor(_) => base
                .with_code("E0207")
                .with_primary(span, "not a function")
                .with_help("declare the constructor as `construct name(...) { ... }`"),

            TypeMismatch { expected, .. } => base
                .with_code("E0300")
                .with_primary(span, format!("expected `{}`", expected))
                .with_note("declare the slot `dynamic` to accept any value, or add `?` to allow null"),

            ParamTypeMismatch { expected, .. } => base
                .with_code("E0301")
                .with_primary(span, format!("expected `{}`", expected)),

            ReturnTypeMismatch { expected, .. } => base
                .with_code("E0302")
                .with_primary(span, format!("declared to return `{}`", expected)),

            ExpectedKind { expected, .. } => base
                .with_code("E0303")
                .with_primary(span, format!("expected {}", expected)),

            ConstAssignment(_) => base
                .with_code("E0304")
                .with_primary(span, "assignment to a constant")
                .with_help("redeclare the name without `const` to replace it"),

            ArityMismatch { .. } => base.with_code("E0305").with_primary(span, "too many arguments"),

            NotAContainer(_) => base.with_code("E0306").with_primary(span, "has no members"),

            InvalidMemberKey(_) => base.with_code("E0307").with_primary(span, "invalid key"),

            InvalidOperands { .. } => base.with_code("E0400").with_primary(span, "unsupported operands"),

            InvalidOperand { .. } => base.with_code("E0401").with_primary(span, "unsupported operand"),

            DivisionByZero => base.with_code("E0402").with_primary(span, "divisor is zero"),

            ExitOutsideContext { keyword, context } => {
                let help = match context {
                    ExitTarget::Function => format!("`{}` can only be used inside a function body", keyword),
                    ExitTarget::Loop => format!("`{}` can only be used inside a loop in the same function", keyword),
                    ExitTarget::Program => format!("`{}` can only be used inside a program", keyword),
                };
                base.with_code("E0500")
                    .with_primary(span, format!("no enclosing {}", context))
                    .with_help(help)
            }

            InvalidLoopCounter => base.with_code("E0501").with_primary(span, "counter must be a name"),

            CallDepthExceeded(_) => base
                .with_code("E0502")
                .with_primary(span, "called here")
                .with_note("check for recursion without a base case"),

            Halted => base.with_code("E0503").with_primary(span, "exited here"),

            InvalidFilePath(_) => base
                .with_code("E0600")
                .with_primary(span, "file does not exist")
                .with_note("`file.write` only overwrites files that already exist"),

            Host(_) => base.with_code("E0601").with_primary(span, "host call failed"),
        }
    }
}
