//! Field-by-field merge of seeded facts and comment text.
//!
//! | field      | winner                                                   |
//! |------------|----------------------------------------------------------|
//! | `name`     | `@name` tag, else the seed                               |
//! | `params`   | seed order first, comment-only params appended in order  |
//! | `types`    | seed when non-empty, else comment                        |
//! | `optional` | seed OR comment                                          |
//! | `default`  | seed when set, else comment                              |
//! | `desc`     | comment (a seed cannot describe anything)                |
//! | `returns`  | merged like a parameter                                  |

use crate::jsdoc::ParsedJsDoc;
use crate::model::{DocRecord, DocSeed, ParamItem};

/// Combine what the source says with what the comment says.
pub fn merge_seed(seed: Option<&DocSeed>, parsed: ParsedJsDoc) -> DocRecord {
    let ParsedJsDoc {
        kind,
        name,
        alias,
        desc,
        params: comment_params,
        returns: comment_returns,
        examples,
    } = parsed;

    let (seed_name, mut params, seed_returns) = match seed {
        Some(seed) => (seed.name.clone(), seed.params.clone(), seed.returns.clone()),
        None => (None, Vec::new(), None),
    };
    let seeded = params.len();

    for param in comment_params {
        let slot = params[..seeded]
            .iter_mut()
            .find(|existing| !existing.name.is_empty() && existing.name == param.name);
        match slot {
            Some(existing) => *existing = merge_param(existing, param),
            None => params.push(param),
        }
    }

    let returns = match (seed_returns, comment_returns) {
        (Some(seeded), Some(comment)) => Some(merge_param(&seeded, comment)),
        (seeded, comment) => seeded.or(comment),
    };

    DocRecord {
        kind,
        name: name.or(seed_name).unwrap_or_default(),
        alias,
        desc,
        params,
        returns,
        examples,
    }
}

/// Seed value wins wherever the seed has one.
pub fn merge_param(seed: &ParamItem, comment: ParamItem) -> ParamItem {
    ParamItem {
        name: if seed.name.is_empty() {
            comment.name
        } else {
            seed.name.clone()
        },
        types: if seed.types.is_empty() {
            comment.types
        } else {
            seed.types.clone()
        },
        optional: seed.optional || comment.optional,
        default: seed.default.clone().or(comment.default),
        desc: comment.desc.or_else(|| seed.desc.clone()),
    }
}

/// Fold a repeated `@param`/`@returns` into the first occurrence.
pub fn fold_duplicate(first: &mut ParamItem, again: ParamItem) {
    if first.types.is_empty() {
        first.types = again.types;
    }
    first.optional |= again.optional;
    if first.default.is_none() {
        first.default = again.default;
    }
    first.desc = match (first.desc.take(), again.desc) {
        (Some(a), Some(b)) => Some(format!("{a}\n{b}")),
        (a, b) => a.or(b),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocKind;

    fn parsed_with(params: Vec<ParamItem>) -> ParsedJsDoc {
        ParsedJsDoc {
            params,
            ..ParsedJsDoc::default()
        }
    }

    #[test]
    fn seed_type_beats_comment_type() {
        let seed = ParamItem::new("x").with_type("number");
        let comment = ParamItem::new("x").with_type("string").with_desc("desc");
        let merged = merge_param(&seed, comment);
        assert_eq!(merged.types, ["number"]);
        assert_eq!(merged.desc.as_deref(), Some("desc"));
    }

    #[test]
    fn comment_fills_what_the_seed_lacks() {
        let seed = ParamItem::new("x");
        let comment = ParamItem::new("x").with_type("string").with_default("'a'");
        let merged = merge_param(&seed, comment);
        assert_eq!(merged.types, ["string"]);
        assert!(merged.optional);
        assert_eq!(merged.default.as_deref(), Some("'a'"));
    }

    #[test]
    fn params_keep_seed_order_and_append_unknown() {
        let seed = DocSeed {
            name: Some("f".to_string()),
            params: vec![ParamItem::new("a"), ParamItem::new("b")],
            returns: None,
        };
        let parsed = parsed_with(vec![
            ParamItem::new("options").with_desc("bag"),
            ParamItem::new("b").with_desc("second"),
        ]);
        let record = merge_seed(Some(&seed), parsed);
        let names: Vec<_> = record.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "options"]);
        assert_eq!(record.params[1].desc.as_deref(), Some("second"));
    }

    #[test]
    fn name_tag_overrides_seed_name() {
        let seed = DocSeed::named("internalName");
        let parsed = ParsedJsDoc {
            name: Some("publicName".to_string()),
            kind: DocKind::Block,
            ..ParsedJsDoc::default()
        };
        assert_eq!(merge_seed(Some(&seed), parsed).name, "publicName");
    }

    #[test]
    fn returns_merge_like_params() {
        let seed = DocSeed {
            returns: Some(ParamItem::default().with_type("Promise<User>")),
            ..DocSeed::default()
        };
        let parsed = ParsedJsDoc {
            returns: Some(ParamItem::default().with_type("object").with_desc("the user")),
            ..ParsedJsDoc::default()
        };
        let returns = merge_seed(Some(&seed), parsed).returns.unwrap();
        assert_eq!(returns.types, ["Promise<User>"]);
        assert_eq!(returns.desc.as_deref(), Some("the user"));
    }

    #[test]
    fn without_seed_the_comment_stands_alone() {
        let parsed = parsed_with(vec![ParamItem::new("a")]);
        let record = merge_seed(None, parsed);
        assert_eq!(record.name, "");
        assert_eq!(record.params, [ParamItem::new("a")]);
    }
}
