use std::path::Path;

use docket_docs::{
    AstExtractor, DocExtractor, DocKind, DocRecord, Locale, MarkdownRenderer, ParamItem,
};

fn record(kind: DocKind, name: &str) -> DocRecord {
    DocRecord {
        kind,
        name: name.to_string(),
        ..DocRecord::default()
    }
}

#[test]
fn renders_extracted_function() {
    let source = r#"
        /**
         * Adds two numbers.
         * @param {number} a first
         * @param {number} b second
         * @returns {number} sum
         */
        export function add(a, b) { return a + b; }
    "#;
    let docs = AstExtractor::default().extract(Path::new("pkg/index.js"), source);
    let records: Vec<&DocRecord> = docs.records.iter().collect();

    let rendered = MarkdownRenderer::default().render("pkg", &records);
    insta::assert_snapshot!(rendered.content, @r"
    # pkg

    ## add

    Adds two numbers.

    #### Params

    - `a` *number*

        first

    - `b` *number*

        second

    #### Returns

    - *number*

        sum
    ");
}

#[test]
fn file_records_sort_first() {
    let mut file = record(DocKind::File, "zzz");
    file.desc = Some("About the module.".to_string());
    let block = record(DocKind::Block, "aaa");

    let rendered = MarkdownRenderer::default().render("m", &[&block, &file]);
    let about = rendered.content.find("About the module.").unwrap();
    let heading = rendered.content.find("## aaa").unwrap();
    assert!(about < heading);
    assert!(!rendered.content.contains("## zzz"));
}

#[test]
fn blocks_sort_by_display_name() {
    let mut aliased = record(DocKind::Block, "zeta");
    aliased.alias = Some("alpha".to_string());
    let plain = record(DocKind::Block, "beta");

    let rendered = MarkdownRenderer::default().render("m", &[&plain, &aliased]);
    assert_eq!(rendered.content, "# m\n\n## alpha\n\n## beta\n");
}

#[test]
fn file_alias_becomes_the_title() {
    let mut file = record(DocKind::File, "index");
    file.alias = Some("Form Controls".to_string());

    let rendered = MarkdownRenderer::default().render("forms", &[&file]);
    assert!(rendered.content.starts_with("# Form Controls\n"));

    let rendered = MarkdownRenderer::default().render("forms", &[&record(DocKind::Block, "x")]);
    assert!(rendered.content.starts_with("# forms\n"));
}

#[test]
fn params_render_types_defaults_and_multiline_desc() {
    let mut block = record(DocKind::Block, "pick");
    block.params = vec![
        ParamItem::new("items").with_type("Array<T>").with_desc("Source list.\nNever mutated."),
        ParamItem {
            types: vec!["number".to_string(), "string".to_string()],
            ..ParamItem::new("key").with_default("0")
        },
    ];

    let rendered = MarkdownRenderer::default().render("m", &[&block]);
    assert!(rendered.content.contains(
        "- `items` *Array\\<T\\>*\n\n    Source list.\n    Never mutated."
    ));
    assert!(rendered
        .content
        .contains("- `key` *number | string* (optional) Default: `0`"));
}

#[test]
fn examples_are_emitted_verbatim() {
    let mut block = record(DocKind::Block, "run");
    block.examples = vec!["```js\nrun();\n```".to_string()];

    let rendered = MarkdownRenderer::default().render("m", &[&block]);
    assert!(rendered.content.ends_with("#### Examples\n\n```js\nrun();\n```\n"));
}

#[test]
fn locale_strings_label_sections() {
    let locale = Locale {
        params: "Parameter".to_string(),
        returns: "Rückgabe".to_string(),
        example: "Beispiel".to_string(),
        optional: "optional".to_string(),
        default_as: "Standard:".to_string(),
    };
    let mut block = record(DocKind::Block, "f");
    block.params = vec![ParamItem::new("x").with_default("1")];
    block.returns = Some(ParamItem::default().with_type("void"));
    block.examples = vec!["```js\nf();\n```".to_string()];

    let rendered = MarkdownRenderer::new(locale).render("m", &[&block]);
    assert!(rendered.content.contains("#### Parameter"));
    assert!(rendered.content.contains("#### Rückgabe"));
    assert!(rendered.content.contains("#### Beispiel"));
    assert!(rendered.content.contains("Standard: `1`"));
}
