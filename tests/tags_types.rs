//! Integration tests for tag and type aggregation.

use errlink::{Error, ResultTagExt, has_type, lookup_tag, tag, tags, types, wrap};

fn value(err: &Error, key: &str) -> Option<String> {
    lookup_tag(err, key).map(|v| v.to_string())
}

// ============================================================================
// Tags
// ============================================================================

#[test]
fn tags_merge_across_chain() {
    let root = Error::new("root");
    let interim1 = wrap(root.clone(), "interim1").add_tag("tag1", "value1");
    let interim2 = wrap(interim1.clone(), "interim2").add_tag("tag2", "value2");
    let err = wrap(interim2.clone(), "error");

    let rendered = |e: &Error| -> Vec<(String, String)> {
        tags(e)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    let both = vec![
        ("tag1".to_string(), "value1".to_string()),
        ("tag2".to_string(), "value2".to_string()),
    ];
    assert_eq!(rendered(&err), both);
    assert_eq!(rendered(&interim2), both);
    assert_eq!(rendered(&interim1), both[..1]);
    assert!(tags(&root).is_empty());

    assert_eq!(value(&root, "tag1"), None);
    assert_eq!(value(&interim1, "tag1").as_deref(), Some("value1"));
    assert_eq!(value(&interim2, "tag1").as_deref(), Some("value1"));
    assert_eq!(value(&err, "tag1").as_deref(), Some("value1"));
    assert_eq!(value(&root, "tag2"), None);
    assert_eq!(value(&interim1, "tag2"), None);
    assert_eq!(value(&interim2, "tag2").as_deref(), Some("value2"));
    assert_eq!(value(&err, "tag2").as_deref(), Some("value2"));
}

#[test]
fn outer_tag_overrides_inner() {
    let r = Error::new("root");
    let i1 = wrap(r, "a").add_tag("k", "v1");
    let i2 = wrap(i1.clone(), "b").add_tag("k", "v2");

    assert_eq!(value(&i2, "k").as_deref(), Some("v2"));
    assert_eq!(tags(&i2)["k"].to_string(), "v2");
    assert_eq!(value(&i1, "k").as_deref(), Some("v1"));
    assert_eq!(tags(&i1)["k"].to_string(), "v1");
}

#[test]
fn tag_on_root_is_found_from_top() {
    let root = Error::new("root").add_tag("origin", "db");
    let top = wrap(wrap(root, "a"), "b");
    assert_eq!(value(&top, "origin").as_deref(), Some("db"));
}

#[test]
fn typed_tag_values_downcast() {
    #[derive(Debug, PartialEq)]
    struct UserId(u64);

    impl std::fmt::Display for UserId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "user#{}", self.0)
        }
    }

    let err = wrap(Error::new("denied"), "checking access").add_tags([
        tag("user", UserId(7)),
        tag("attempts", 3u8),
    ]);

    let user = err.lookup_tag("user").unwrap();
    assert_eq!(user.downcast_ref::<UserId>(), Some(&UserId(7)));
    assert_eq!(user.to_string(), "user#7");
    assert!(user.type_name().ends_with("UserId"));
    assert_eq!(err.lookup_tag("attempts").unwrap().downcast_ref::<u8>(), Some(&3));
    assert!(err.lookup_tag("attempts").unwrap().downcast_ref::<u64>().is_none());
}

#[test]
fn owned_keys() {
    let key = format!("shard_{}", 2);
    let err = Error::new("e").add_tag(key, "down");
    assert_eq!(value(&err, "shard_2").as_deref(), Some("down"));
}

#[test]
fn result_tag_ext_tags_the_error() {
    let res: Result<(), Error> = Err(Error::new("e"));
    let err = res
        .add_tag("a", 1)
        .add_tags([tag("b", 2)])
        .add_types(["t"])
        .unwrap_err();
    assert_eq!(err.tags().len(), 2);
    assert_eq!(err.types(), ["t"]);
}

// ============================================================================
// Types
// ============================================================================

#[test]
fn types_accumulate_root_first() {
    let root = Error::new("root");
    let interim1 = wrap(root.clone(), "interim1").add_types(["t1", "t11"]);
    let interim2 = wrap(interim1.clone(), "interim2").add_types(["t2", "t22"]);
    let err = wrap(interim2.clone(), "error");

    assert_eq!(types(&err), ["t1", "t11", "t2", "t22"]);
    assert_eq!(types(&interim2), ["t1", "t11", "t2", "t22"]);
    assert_eq!(types(&interim1), ["t1", "t11"]);
    assert!(types(&root).is_empty());

    for t in ["t1", "t11", "t2", "t22"] {
        assert!(has_type(&err, t));
        assert!(has_type(&interim2, t));
        assert!(!has_type(&root, t));
    }
    assert!(has_type(&interim1, "t1"));
    assert!(has_type(&interim1, "t11"));
    assert!(!has_type(&interim1, "t2"));
    assert!(!has_type(&interim1, "t22"));
}

#[test]
fn types_are_not_deduplicated() {
    let i1 = wrap(Error::new("root"), "a").add_types(["x"]);
    let i2 = wrap(i1, "b").add_types(["x"]);
    assert_eq!(types(&i2), ["x", "x"]);
    assert!(has_type(&i2, "x"));
}

#[test]
fn root_types_come_first() {
    let root = Error::new("root").add_types(["root"]);
    let top = wrap(root, "top").add_types(["top"]);
    assert_eq!(top.types(), ["root", "top"]);
}

#[test]
fn new_has_no_tags_or_types() {
    let err = Error::new("m");
    assert!(types(&err).is_empty());
    assert!(tags(&err).is_empty());
    assert!(!has_type(&err, ""));
    assert!(lookup_tag(&err, "").is_none());
}
