//! Property-based tests for the tag parser and the aggregation store.

use std::collections::HashMap;

use docket_docs::{parse_comment, AggregationStore, DocRecord, FileId, RawComment};
use proptest::prelude::*;

/// One line of a doc comment body.
fn comment_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z ,.]{0,30}",
        ("[a-z]{1,8}", "[a-z]{1,6}", "[a-z ]{0,20}")
            .prop_map(|(ty, name, desc)| format!("@param {{{ty}}} {name} {desc}")),
        ("[a-z]{1,6}", "[0-9]{1,3}").prop_map(|(name, value)| format!("@param [{name}={value}]")),
        "[a-z ]{0,20}".prop_map(|desc| format!("@returns {{number}} {desc}")),
        "[a-z]{1,10}".prop_map(|code| format!("@example\n{code}();")),
        Just("@file".to_string()),
        "[a-z]{1,8}".prop_map(|tag| format!("@{tag} ignored")),
        Just(String::new()),
    ]
}

fn comment_text() -> impl Strategy<Value = String> {
    prop::collection::vec(comment_line(), 0..12).prop_map(|lines| {
        let mut text = String::from("*\n");
        for line in lines.iter().flat_map(|line| line.lines()) {
            text.push_str(" * ");
            text.push_str(line);
            text.push('\n');
        }
        text.push(' ');
        text
    })
}

#[derive(Debug, Clone)]
enum StoreOp {
    Upsert { file: u8, module: u8, records: usize },
    Remove { file: u8 },
    Flush,
}

fn store_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (0u8..6, 0u8..3, 0usize..3).prop_map(|(file, module, records)| StoreOp::Upsert {
            file,
            module,
            records
        }),
        (0u8..8).prop_map(|file| StoreOp::Remove { file }),
        Just(StoreOp::Flush),
    ]
}

fn records(count: usize) -> Vec<DocRecord> {
    (0..count)
        .map(|i| DocRecord {
            name: format!("r{i}"),
            ..DocRecord::default()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Re-parsing the same comment yields the same record.
    #[test]
    fn prop_parse_is_idempotent(text in comment_text()) {
        let comment = RawComment::block(&text);
        let first = parse_comment(&comment, None);
        let again = parse_comment(&comment, None);
        match (first, again) {
            (Ok(first), Ok(again)) => prop_assert_eq!(first, again),
            (Err(first), Err(again)) => prop_assert_eq!(first.to_string(), again.to_string()),
            (first, again) => prop_assert!(false, "diverged: {:?} vs {:?}", first, again),
        }
    }

    /// Arbitrary text never panics the parser.
    #[test]
    fn prop_parse_accepts_any_text(text in "\\PC{0,200}") {
        let _ = parse_comment(&RawComment::block(&text), None);
    }

    /// The store matches a naive model after any sequence of operations.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(store_op(), 0..40)) {
        let mut store = AggregationStore::new();
        let mut model: HashMap<FileId, (String, usize)> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Upsert { file, module, records: count } => {
                    let id = FileId::new(format!("f{file}"));
                    let module = format!("m{module}");
                    store.upsert(&id, &module, records(count));
                    if count == 0 {
                        model.remove(&id);
                    } else {
                        model.insert(id, (module, count));
                    }
                }
                StoreOp::Remove { file } => {
                    let id = FileId::new(format!("f{file}"));
                    store.remove(&id);
                    model.remove(&id);
                }
                StoreOp::Flush => {
                    store.take_dirty_modules();
                }
            }

            for (id, (module, count)) in &model {
                prop_assert_eq!(store.module_of(id), Some(module.as_str()));
                let bucket = store.module(module).expect("module of a live file");
                prop_assert!(bucket.file_ids().contains(id));
                prop_assert!(bucket.len() >= *count);
            }
            for name in store.module_names() {
                let bucket = store.module(name).expect("listed module");
                prop_assert!(!bucket.is_empty());
                for id in bucket.file_ids() {
                    prop_assert_eq!(model.get(&id).map(|(m, _)| m.as_str()), Some(name));
                }
            }
        }
    }

    /// Removing a file nobody inserted leaves nothing dirty.
    #[test]
    fn prop_unknown_removal_is_silent(file in 0u8..50) {
        let mut store = AggregationStore::new();
        store.upsert(&FileId::new("known"), "m", records(1));
        store.take_dirty_modules();

        store.remove(&FileId::new(format!("unknown{file}")));
        prop_assert!(store.take_dirty_modules().is_empty());
        prop_assert_eq!(store.module_of(&FileId::new("known")), Some("m"));
    }
}
