// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Cascade language.
//!
//! Transforms a token stream into an abstract syntax tree.

mod hints;
mod parser;

pub use parser::{ParseError, ParseResult, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_ast::expr::{AssignOp, BinOp, Expr, ExprKind, MemberKey, StandardType, UnaryOp};
    use cascade_ast::stmt::{DeclTarget, ExitKind, Stmt, StmtKind};

    fn parse(src: &str) -> ParseResult {
        let lex_result = cascade_lexer::Lexer::new(src).tokenize();
        assert!(lex_result.is_ok(), "Lex errors: {:?}", lex_result.errors);
        Parser::new(lex_result.tokens).parse()
    }

    fn parse_ok(src: &str) -> Vec<Stmt> {
        let result = parse(src);
        assert!(result.is_ok(), "Parse errors: {:?}", result.errors);
        result.program.body
    }

    fn parse_err(src: &str) -> ParseError {
        let mut result = parse(src);
        assert!(result.program.body.is_empty());
        assert_eq!(result.errors.len(), 1, "expected exactly one error");
        result.errors.remove(0)
    }

    fn expr(src: &str) -> Expr {
        match parse_ok(src).remove(0).kind {
            StmtKind::Expr(e) => e,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn multiplication_binds_tighter() {
        let e = expr("1 + 2 * 3");
        let ExprKind::Binary { op, left, right } = e.kind else { panic!() };
        assert_eq!(op, BinOp::Add);
        assert!(matches!(left.kind, ExprKind::Int(1)));
        assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
        assert_eq!(e.span.start, 0);
        assert_eq!(e.span.end, 9);
    }

    #[test]
    fn binary_levels_are_left_associative() {
        let e = expr("8 - 4 - 2");
        let ExprKind::Binary { op: BinOp::Sub, left, .. } = e.kind else { panic!() };
        assert!(matches!(left.kind, ExprKind::Binary { op: BinOp::Sub, .. }));

        let e = expr("a % 2 == 0 || b ^^ c && d");
        let ExprKind::Binary { op: BinOp::Xor, left, right } = e.kind else { panic!() };
        assert!(matches!(left.kind, ExprKind::Binary { op: BinOp::Or, .. }));
        assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::And, .. }));
    }

    #[test]
    fn assignment_chains_to_the_right() {
        let e = expr("a = b = 3");
        let ExprKind::Assign { op, target, value } = e.kind else { panic!() };
        assert_eq!(op, AssignOp::Assign);
        assert!(matches!(target.kind, ExprKind::Ident(ref n) if n == "a"));
        assert!(matches!(value.kind, ExprKind::Assign { .. }));

        let e = expr("total ^= 2");
        assert!(matches!(e.kind, ExprKind::Assign { op: AssignOp::Pow, .. }));
    }

    #[test]
    fn assignment_needs_access_point() {
        let err = parse_err("1 = 2");
        assert_eq!(err.message, "invalid assignment target");
    }

    #[test]
    fn ternary_and_unary() {
        let e = expr("x ? 1 : 2");
        assert!(matches!(e.kind, ExprKind::Ternary { .. }));

        let e = expr("!true");
        assert!(matches!(e.kind, ExprKind::Unary { op: UnaryOp::Not, .. }));

        let e = expr("-a * 2");
        let ExprKind::Binary { op: BinOp::Mul, left, .. } = e.kind else { panic!() };
        assert!(matches!(left.kind, ExprKind::Unary { op: UnaryOp::Neg, .. }));
    }

    #[test]
    fn postfix_chain() {
        let e = expr("a.b(1).c[2]()");
        let ExprKind::Call { callee, args } = e.kind else { panic!() };
        assert!(args.is_empty());
        let ExprKind::Member { object, key } = callee.kind else { panic!() };
        assert!(key.is_computed());
        let ExprKind::Member { object, key: MemberKey::Name(c) } = object.kind else { panic!() };
        assert_eq!(c, "c");
        assert!(matches!(object.kind, ExprKind::Call { ref args, .. } if args.len() == 1));
    }

    #[test]
    fn literal_kinds() {
        assert!(matches!(expr("12").kind, ExprKind::Int(12)));
        assert!(matches!(expr("12L").kind, ExprKind::Long(12)));
        assert!(matches!(expr("1.5").kind, ExprKind::Float(_)));
        assert!(matches!(expr("1.5D").kind, ExprKind::Double(_)));
        assert!(matches!(expr("\"hi\"").kind, ExprKind::String(ref s) if s == "hi"));
        assert!(matches!(expr("null").kind, ExprKind::Null));
    }

    #[test]
    fn variable_declaration() {
        let stmts = parse_ok("const int x = 2 + 3 * 4;");
        let StmtKind::VarDecl { modifiers, ty, target, value } = &stmts[0].kind else { panic!() };
        assert_eq!(modifiers.len(), 1);
        assert_eq!(ty.standard, StandardType::Integer);
        assert!(matches!(target, DeclTarget::Name(n) if n == "x"));
        assert!(matches!(value.kind, ExprKind::Binary { op: BinOp::Add, .. }));
        assert_eq!(stmts[0].span.end, 23);
    }

    #[test]
    fn declaration_without_value_is_null() {
        let stmts = parse_ok("string? name");
        let StmtKind::VarDecl { ty, value, .. } = &stmts[0].kind else { panic!() };
        assert!(ty.nullable);
        assert!(matches!(value.kind, ExprKind::Null));
    }

    #[test]
    fn type_meta() {
        let stmts = parse_ok("object:Point p; dynamic:[a.b, c]? q");
        let StmtKind::VarDecl { ty, .. } = &stmts[0].kind else { panic!() };
        assert_eq!(ty.meta.len(), 1);
        let StmtKind::VarDecl { ty, .. } = &stmts[1].kind else { panic!() };
        assert_eq!(ty.meta.len(), 2);
        assert!(ty.nullable);
        assert!(matches!(ty.meta[0].kind, ExprKind::Member { .. }));
    }

    #[test]
    fn function_declaration_becomes_function_type() {
        let stmts = parse_ok("int add(int a, int b = 1) { return a + b }");
        let StmtKind::VarDecl { ty, value, .. } = &stmts[0].kind else { panic!() };
        assert_eq!(ty.standard, StandardType::Function);
        let ExprKind::Function(f) = &value.kind else { panic!() };
        assert_eq!(f.return_type.standard, StandardType::Integer);
        assert_eq!(f.params.len(), 2);
        assert!(f.params[0].default.is_none());
        assert!(f.params[1].default.is_some());
        assert!(matches!(f.body[0].kind, StmtKind::Exit { kind: ExitKind::Return, value: Some(_) }));
    }

    #[test]
    fn construct_returns_void() {
        let stmts = parse_ok("construct init(int x = 5) { }");
        let StmtKind::VarDecl { ty, value, .. } = &stmts[0].kind else { panic!() };
        assert_eq!(ty.standard, StandardType::Construct);
        let ExprKind::Function(f) = &value.kind else { panic!() };
        assert_eq!(f.return_type.standard, StandardType::Void);
    }

    #[test]
    fn construct_meta_rejected() {
        let err = parse_err("construct:Point init() { }");
        assert_eq!(err.message, "constructs can not have a meta return type");
    }

    #[test]
    fn class_with_superclass() {
        let src = "class Child { int x = 2, construct init() { } } of Base";
        let stmts = parse_ok(src);
        let StmtKind::VarDecl { ty, value, .. } = &stmts[0].kind else { panic!() };
        assert_eq!(ty.standard, StandardType::Class);
        let ExprKind::Class { members, superclass } = &value.kind else { panic!() };
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].ty.standard, StandardType::Construct);
        assert!(matches!(superclass.as_deref().map(|s| &s.kind), Some(ExprKind::Ident(n)) if n == "Base"));
    }

    #[test]
    fn class_meta_rejected() {
        let err = parse_err("class:Base Child { }");
        assert_eq!(err.message, "classes can not have meta types");
    }

    #[test]
    fn body_requires_class_type() {
        let err = parse_err("int x { }");
        assert!(err.message.contains("class body"));
    }

    #[test]
    fn object_literal_members() {
        let src = "object o = { int a = 1; string [\"b\"] = \"x\", bool c }";
        let stmts = parse_ok(src);
        let StmtKind::VarDecl { value, .. } = &stmts[0].kind else { panic!() };
        let ExprKind::Object { members } = &value.kind else { panic!() };
        assert_eq!(members.len(), 3);
        assert!(members[1].key.is_computed());
        assert!(matches!(members[2].value.kind, ExprKind::Null));
    }

    #[test]
    fn bare_literal_key_rejected() {
        let err = parse_err("object o = { int \"a\" = 1 }");
        assert!(err.message.contains("surrounded by brackets"));
        assert!(err.hint.is_some());
    }

    #[test]
    fn bracketed_literal_declaration_only_at_top_level() {
        let stmts = parse_ok("int [\"answer\"] = 42");
        let StmtKind::VarDecl { target, .. } = &stmts[0].kind else { panic!() };
        assert!(matches!(target, DeclTarget::Literal(_)));

        let err = parse_err("if true { int [\"answer\"] = 42 }");
        assert!(err.message.contains("top level"));
    }

    #[test]
    fn member_declaration_target() {
        let stmts = parse_ok("int point.x = 3");
        let StmtKind::VarDecl { target, .. } = &stmts[0].kind else { panic!() };
        assert!(matches!(target, DeclTarget::Member { key: MemberKey::Name(n), .. } if n == "x"));
    }

    #[test]
    fn construct_expression() {
        let e = expr("new shapes.Point, init(1, 2)");
        let ExprKind::Construct { class, constructor, args } = e.kind else { panic!() };
        assert!(matches!(class.kind, ExprKind::Member { .. }));
        assert!(matches!(constructor, MemberKey::Name(ref n) if n == "init"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn control_flow_statements() {
        let src = "if a { } elseif b { } elseif c { } else { x = 1 }\n\
                   while i < 3 { i += 1; continue }\n\
                   post { break } while false\n\
                   for int i = 0 -> 10, 2 { }";
        let stmts = parse_ok(src);
        let StmtKind::If { clauses, else_body } = &stmts[0].kind else { panic!() };
        assert_eq!(clauses.len(), 3);
        assert_eq!(else_body.as_ref().map(Vec::len), Some(1));

        let StmtKind::While { body, .. } = &stmts[1].kind else { panic!() };
        assert!(matches!(body[1].kind, StmtKind::Exit { kind: ExitKind::Continue, value: None }));

        assert!(matches!(stmts[2].kind, StmtKind::PostWhile { .. }));

        let StmtKind::For { decl, target, step, .. } = &stmts[3].kind else { panic!() };
        assert!(matches!(decl.kind, StmtKind::VarDecl { .. }));
        assert!(matches!(target.kind, ExprKind::Int(10)));
        assert!(matches!(step.kind, ExprKind::Int(2)));
    }

    #[test]
    fn exit_values_are_optional() {
        let stmts = parse_ok("int f() { return; }\nexit 3");
        let StmtKind::VarDecl { value, .. } = &stmts[0].kind else { panic!() };
        let ExprKind::Function(f) = &value.kind else { panic!() };
        assert!(matches!(f.body[0].kind, StmtKind::Exit { kind: ExitKind::Return, value: None }));
        assert!(matches!(stmts[1].kind, StmtKind::Exit { kind: ExitKind::Exit, value: Some(_) }));

        let stmts = parse_ok("exit");
        assert!(matches!(stmts[0].kind, StmtKind::Exit { value: None, .. }));
    }

    #[test]
    fn ensure_and_delete_take_access_points() {
        let stmts = parse_ok("ensure a.b; delete x");
        assert!(matches!(stmts[0].kind, StmtKind::Ensure(_)));
        assert!(matches!(stmts[1].kind, StmtKind::Delete(_)));

        let err = parse_err("delete 4");
        assert_eq!(err.message, "expected a name or member access");
    }

    #[test]
    fn first_error_wins() {
        let result = parse("int x = ;\nint y = ;");
        assert!(result.program.body.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].span.start, 8);
        assert_eq!(result.errors[0].hint.as_deref(), Some("statement is incomplete"));
    }

    #[test]
    fn unclosed_body() {
        let err = parse_err("while true { x = 1");
        assert!(err.message.contains("'}'"));
        assert_eq!(err.hint.as_deref(), Some("every '{' needs a matching '}'"));
    }

    #[test]
    fn for_loop_needs_a_named_counter() {
        let err = parse_err("for int obj.i = 0 -> 3, 1 { }");
        assert_eq!(err.message, "a for loop variable must be a plain name");
        assert!(err.hint.is_some());
    }
}
