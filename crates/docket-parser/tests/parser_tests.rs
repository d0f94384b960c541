use docket_parser::{parse, ParseError, ParseOptions};
use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;

#[test]
fn keeps_comments_with_attachment_offsets() {
    let allocator = Allocator::default();
    let source = "/**\n * Adds.\n */\nexport function add(a, b) { return a + b; }\n";
    let parsed = parse(&allocator, source, ParseOptions::from_path("pkg/index.js"))
        .expect("valid source should parse");

    let program = parsed.ast();
    assert_eq!(program.body.len(), 1);
    let Statement::ExportNamedDeclaration(export) = &program.body[0] else {
        panic!("expected an export declaration");
    };

    let comment = &program.comments[0];
    assert!(comment.is_block());
    assert_eq!(comment.attached_to, export.span.start);
    assert!(parsed.slice(comment.content_span()).starts_with('*'));
}

#[test]
fn accepts_typescript_and_decorators() {
    let allocator = Allocator::default();
    let source = r#"
        @sealed
        export class Box<T> {
            #value?: T;
            static count = 1_000;
            get value() { return this.#value ?? null; }
        }
        export const load = () => import("./mod");
    "#;
    let parsed = parse(&allocator, source, ParseOptions::from_path("box.ts"));
    assert!(parsed.is_ok());
}

#[test]
fn reports_syntax_errors_without_panicking() {
    let allocator = Allocator::default();
    let result = parse(&allocator, "function (", ParseOptions::from_path("broken.js"));

    match result {
        Err(ParseError::Syntax { diagnostics }) => assert!(!diagnostics.is_empty()),
        Err(ParseError::Aborted { .. }) => {}
        Ok(_) => panic!("broken source must not parse"),
    }
}

#[test]
fn allow_errors_returns_partial_program() {
    let allocator = Allocator::default();
    let options = ParseOptions::from_path("broken.js").allow_errors(true);
    if let Ok(parsed) = parse(&allocator, "let a = 1;\nlet = ;", options) {
        assert!(parsed.has_errors());
    }
}
