// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Whole-program tests: source text through lexer, parser and interpreter.

use cascade_ast::stmt::{ExitTarget, Program};
use cascade_interp::{Interpreter, RuntimeDiagnostic, RuntimeError, Value};
use cascade_lexer::Lexer;
use cascade_parser::Parser;

fn program(src: &str) -> Program {
    let lexed = Lexer::new(src).tokenize();
    assert!(lexed.is_ok(), "lex errors: {:?}", lexed.errors);
    let parsed = Parser::new(lexed.tokens).parse();
    assert!(parsed.is_ok(), "parse errors: {:?}", parsed.errors);
    parsed.program
}

fn run(src: &str) -> (Result<Value, RuntimeDiagnostic>, String) {
    let (mut interp, output) = Interpreter::with_captured_output();
    let result = interp.run(&program(src));
    let text = output.lock().unwrap().clone();
    (result, text)
}

fn run_ok(src: &str) -> (Value, String) {
    match run(src) {
        (Ok(value), output) => (value, output),
        (Err(diag), _) => panic!("runtime error: {} at {:?}", diag, diag.span),
    }
}

fn output_of(src: &str) -> String {
    run_ok(src).1
}

fn run_err(src: &str) -> RuntimeDiagnostic {
    match run(src).0 {
        Ok(value) => panic!("expected a runtime error, got {:?}", value),
        Err(diag) => diag,
    }
}

#[test]
fn precedence_is_respected() {
    let (value, _) = run_ok("int x = 2 + 3 * 4;\nexit x");
    assert!(matches!(value, Value::Int(14)));
}

#[test]
fn string_concatenation_coerces_numbers() {
    let (value, _) = run_ok("string s = \"a\" + 1;\nexit s");
    assert!(matches!(value, Value::String(ref s) if s == "a1"));
}

#[test]
fn logical_not() {
    let (value, _) = run_ok("bool b = !true;\nexit b");
    assert!(matches!(value, Value::Bool(false)));
}

#[test]
fn program_without_exit_yields_null() {
    let (value, _) = run_ok("int x = 1");
    assert!(matches!(value, Value::Null));
}

#[test]
fn console_and_io_output() {
    let out = output_of(
        r#"
Console.Write("hi")
Console.Write(1 + 2)
io.write("a")
io.write("b", true)
io.write(2.5)
"#,
    );
    assert_eq!(out, "hi\n3\nab\n2.5");
}

#[test]
fn construct_falls_back_to_default_parameter() {
    let out = output_of(
        r#"
class Point {
    int x = 0
    int y = 0
    construct init(int a, int b = 5) {
        self.x = a
        self.y = b
    }
}
object:Point p = new Point, init(3)
Console.Write(p.x)
Console.Write(p.y)
"#,
    );
    assert_eq!(out, "3\n5\n");
}

#[test]
fn defaults_are_evaluated_per_call_in_the_caller() {
    let out = output_of(
        r#"
int fallback = 1
int pick(int v = fallback) { return v }
Console.Write(pick())
fallback = 2
Console.Write(pick())
Console.Write(pick(9))
Console.Write(pick(null))
"#,
    );
    assert_eq!(out, "1\n2\n9\n2\n");
}

#[test]
fn subclass_members_override_and_object_remembers_class() {
    let src = r#"
class Base {
    int x = 1
    int y = 2
    construct make() { }
}
class Child {
    int x = 10
} of Base
object:Child c = new Child, make()
object:Base other = c
Console.Write(c.x)
Console.Write(c.y)
"#;
    let (mut interp, output) = Interpreter::with_captured_output();
    interp.run(&program(src)).unwrap();
    assert_eq!(*output.lock().unwrap(), "10\n2\n");

    let Some(Value::Object(obj)) = interp.global().lookup("c") else {
        panic!("c is not an object");
    };
    let Some(Value::Class(child)) = interp.global().lookup("Child") else {
        panic!("Child is not a class");
    };
    assert!(matches!(&obj.meta[..], [Value::Class(class)] if std::rc::Rc::ptr_eq(class, &child)));
}

#[test]
fn constructor_may_be_inherited_or_computed() {
    let out = output_of(
        r#"
class Base {
    int x = 1
    construct make(int v) { self.x = v }
}
class Child { } of Base
object:Child c = new Child, ["ma" + "ke"](4)
Console.Write(c.x)
"#,
    );
    assert_eq!(out, "4\n");
}

#[test]
fn return_inside_nested_ifs() {
    let out = output_of(
        r#"
int classify(int n) {
    if n > 10 {
        if n > 100 {
            return 3
        }
        return 2
    }
    return 1
}
Console.Write(classify(500))
Console.Write(classify(50))
Console.Write(classify(5))
"#,
    );
    assert_eq!(out, "3\n2\n1\n");
}

#[test]
fn break_outside_a_loop_is_fatal() {
    let diag = run_err("int x = 1\nbreak");
    assert!(matches!(
        diag.error,
        RuntimeError::ExitOutsideContext { keyword: "break", context: ExitTarget::Loop }
    ));
    assert_eq!(diag.span.start, 10);
}

#[test]
fn break_does_not_escape_a_function() {
    let diag = run_err(
        r#"
while true {
    int f() { break }
    f()
}
"#,
    );
    assert!(matches!(diag.error, RuntimeError::ExitOutsideContext { keyword: "break", .. }));
}

#[test]
fn return_at_top_level_is_fatal() {
    let diag = run_err("return 1");
    assert!(matches!(
        diag.error,
        RuntimeError::ExitOutsideContext { keyword: "return", context: ExitTarget::Function }
    ));
}

#[test]
fn exit_inside_a_function_stops_the_program() {
    let (value, out) = run_ok(
        r#"
int stop() { exit 7 }
stop()
Console.Write("unreachable")
"#,
    );
    assert!(matches!(value, Value::Int(7)));
    assert_eq!(out, "");
}

#[test]
fn type_matching_rules() {
    let out = output_of(
        r#"
dynamic d = 1
d = "now text"
Console.Write(d)
string? maybe = null
Console.Write(maybe)
int helper() { return 1 }
construct c = helper
"#,
    );
    assert_eq!(out, "now text\nnull\n");

    let diag = run_err("int n = null");
    assert!(matches!(
        diag.error,
        RuntimeError::TypeMismatch { ref expected, ref actual } if expected == "int" && actual == "void"
    ));
    assert!(matches!(run_err("string s = 1").error, RuntimeError::TypeMismatch { .. }));
    assert!(matches!(run_err("int x = 1\nx = 2L").error, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn meta_lists_must_line_up() {
    let diag = run_err(
        r#"
class Point { }
object:Point p = { int a = 1 }
"#,
    );
    assert!(matches!(diag.error, RuntimeError::TypeMismatch { ref expected, .. } if expected == "object:class"));
}

#[test]
fn loop_body_scope_is_shared_across_iterations() {
    let src = r#"
int i = 0
while i < 2 {
    if i == 1 {
        Console.Write(marker)
    }
    int marker = i + 10
    i += 1
}
ensure marker
"#;
    let (result, out) = run(src);
    assert_eq!(out, "10\n");
    let diag = result.unwrap_err();
    assert!(matches!(diag.error, RuntimeError::EnsureFailed(ref name) if name == "marker"));
}

#[test]
fn for_loop_counts_toward_target() {
    let out = output_of(
        r#"
for int i = 0 -> 5, 2 {
    Console.Write(i)
}
for int j = 3 -> 0, -1 {
    Console.Write(j)
}
"#,
    );
    assert_eq!(out, "0\n2\n4\n3\n2\n1\n");
}

#[test]
fn for_loop_reevaluates_target_and_keeps_counter_local() {
    let src = r#"
int limit = 3
for int i = 0 -> limit, 1 {
    if i == 1 { continue }
    if i == 0 { limit = 5 }
    if i == 4 { break }
    Console.Write(i)
}
ensure i
"#;
    let (result, out) = run(src);
    assert_eq!(out, "0\n2\n3\n");
    assert!(matches!(result.unwrap_err().error, RuntimeError::EnsureFailed(_)));
}

#[test]
fn while_and_post_while() {
    let out = output_of(
        r#"
int i = 0
while true {
    i += 1
    if i == 2 { continue }
    if i > 4 { break }
    Console.Write(i)
}
post {
    Console.Write("once")
} while false
"#,
    );
    assert_eq!(out, "1\n3\n4\nonce\n");
}

#[test]
fn delete_removes_and_misses_are_fatal() {
    assert!(matches!(run_err("int x = 1\ndelete x\nensure x").error, RuntimeError::EnsureFailed(_)));
    assert!(matches!(run_err("delete nothing").error, RuntimeError::DeleteMissing(_)));

    let diag = run_err(
        r#"
int f() {
    delete nothing
    return 1
}
f()
"#,
    );
    assert!(matches!(diag.error, RuntimeError::DeleteMissing(ref name) if name == "nothing"));

    let (value, _) = run_ok("object o = { int a = 1, int b = 2 }\ndelete o.a\nexit o.b");
    assert!(matches!(value, Value::Int(2)));
}

#[test]
fn const_members_reject_assignment() {
    let diag = run_err("const int x = 1\nx = 2");
    assert!(matches!(diag.error, RuntimeError::ConstAssignment(ref name) if name == "x"));

    let (value, _) = run_ok("const int x = 1\nint x = 2\nx = 3\nexit x");
    assert!(matches!(value, Value::Int(3)));
}

#[test]
fn compound_assignment() {
    let (value, _) = run_ok("int x = 5\nx += 2\nx *= 3\nexit x");
    assert!(matches!(value, Value::Int(21)));

    let (value, _) = run_ok("object o = { int n = 1 }\no.n += 4\nexit o.n");
    assert!(matches!(value, Value::Int(5)));

    assert!(matches!(run_err("y += 1").error, RuntimeError::UndefinedVariable(_)));
}

#[test]
fn computed_member_keys() {
    let (value, _) = run_ok("object o = { int [\"a\" + 1] = 3 }\nexit o[\"a1\"]");
    assert!(matches!(value, Value::Int(3)));

    let (value, _) = run_ok("object o = { string [1] = \"one\" }\nexit o[1]");
    assert!(matches!(value, Value::String(ref s) if s == "one"));

    let diag = run_err("object o = { }\nexit o[null]");
    assert!(matches!(diag.error, RuntimeError::InvalidMemberKey("void")));
}

#[test]
fn top_level_literal_declaration() {
    let (value, _) = run_ok("int [\"answer\"] = 42\nexit answer");
    assert!(matches!(value, Value::Int(42)));
}

#[test]
fn member_declaration_on_containers() {
    let (value, _) = run_ok("object o = { }\nint o.count = 2\nint o[\"count\"] = 3\nexit o.count");
    assert!(matches!(value, Value::Int(3)));
}

#[test]
fn missing_members_and_variables() {
    let diag = run_err("int x = 1\nConsole.Write(y)");
    assert!(matches!(diag.error, RuntimeError::UndefinedVariable(ref name) if name == "y"));
    assert_eq!((diag.span.start, diag.span.end), (24, 25));

    assert!(matches!(run_err("object o = { }\nexit o.nope").error, RuntimeError::NoSuchMember(_)));
    assert!(matches!(run_err("int x = 1\nexit x.y").error, RuntimeError::NotAContainer("int")));
    assert!(matches!(run_err("z = 1").error, RuntimeError::AssignToUndeclared(_)));
    assert!(matches!(
        run_err("object o = { int a = 1, int a = 2 }").error,
        RuntimeError::DuplicateMember(_)
    ));
}

#[test]
fn function_call_checks() {
    let diag = run_err("int f() { return \"x\" }\nf()");
    assert!(matches!(diag.error, RuntimeError::ReturnTypeMismatch { .. }));

    let diag = run_err("int f(int a) { return a }\nf(1, 2)");
    assert!(matches!(diag.error, RuntimeError::ArityMismatch { expected: 1, got: 2 }));

    let diag = run_err("int f(int a) { return a }\nf(\"x\")");
    assert!(matches!(diag.error, RuntimeError::ParamTypeMismatch { index: 1, .. }));

    let diag = run_err("int x = 1\nx()");
    assert!(matches!(diag.error, RuntimeError::ExpectedKind { expected: "function", found: "int" }));
}

#[test]
fn functions_capture_their_defining_scope() {
    let out = output_of(
        r#"
dynamic make() {
    int hidden = 41
    int inner() { return hidden + 1 }
    return inner
}
dynamic f = make()
Console.Write(f())
"#,
    );
    assert_eq!(out, "42\n");
}

#[test]
fn recursion() {
    let (value, _) = run_ok(
        r#"
int fact(int n) {
    if n <= 1 { return 1 }
    return n * fact(n - 1)
}
exit fact(10)
"#,
    );
    assert!(matches!(value, Value::Int(3628800)));
}

#[test]
fn deep_recursion_stops_at_the_call_limit() {
    const COUNTDOWN: &str = "int f(int n) { if n <= 0 { return 0 } return f(n - 1) }\n";

    // Run on a small thread so the limit, not the stack, ends the recursion.
    let handle = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            let (value, _) = run_ok(&format!("{}exit f(199)", COUNTDOWN));
            assert!(matches!(value, Value::Int(0)));

            let diag = run_err(&format!("{}exit f(1000)", COUNTDOWN));
            assert!(matches!(diag.error, RuntimeError::CallDepthExceeded(200)), "{:?}", diag.error);
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn equality_and_ternary() {
    let (value, _) = run_ok("object a = { }\nobject b = a\nexit a == b ? \"same\" : \"different\"");
    assert!(matches!(value, Value::String(ref s) if s == "same"));

    let (value, _) = run_ok("exit { } == { }");
    assert!(matches!(value, Value::Bool(false)));

    let diag = run_err("int x = 1 ? 2 : 3");
    assert!(matches!(diag.error, RuntimeError::ExpectedKind { expected: "bool", found: "int" }));
}

#[test]
fn division_by_zero_is_fatal() {
    assert!(matches!(run_err("int x = 1 / 0").error, RuntimeError::DivisionByZero));
    let (value, _) = run_ok("exit 1.0 / 0.0");
    assert!(matches!(value, Value::Float(n) if n.is_infinite()));
}

#[test]
fn file_read_and_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "old").unwrap();

    let src = format!(
        "string p = \"{}\"\nConsole.Write(file.read(p))\nfile.write(p, \"new contents\")\nConsole.Write(file.read(p))",
        path.display()
    );
    assert_eq!(output_of(&src), "old\nnew contents\n");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "new contents");
}

#[test]
fn missing_files_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    let diag = run_err(&format!("file.read(\"{}\")", path.display()));
    assert!(matches!(diag.error, RuntimeError::InvalidFilePath(_)));
    assert_eq!(diag.error.to_string(), format!("'{}' is not a valid file path", path.display()));

    let diag = run_err(&format!("file.write(\"{}\", \"x\")", path.display()));
    assert!(matches!(diag.error, RuntimeError::InvalidFilePath(_)));
    assert!(!path.exists());
}

#[test]
fn registered_globals_are_constant_objects() {
    let (mut interp, output) = Interpreter::with_captured_output();
    let value = Interpreter::new()
        .run(&program("object config = { int level = 3 }\nexit config"))
        .unwrap();

    interp.register_global("settings", value).unwrap();
    interp.run(&program("Console.Write(settings.level)")).unwrap();
    assert_eq!(*output.lock().unwrap(), "3\n");

    let err = interp.register_global("bad", Value::Int(1)).unwrap_err();
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
    let diag = interp.run(&program("settings = null")).unwrap_err();
    assert!(matches!(diag.error, RuntimeError::ConstAssignment(_)));
}
