//! Worst-case scenarios for errlink usage patterns.
//!
//! These tests explore edge cases and problematic patterns to ensure
//! the library behaves correctly under stress and misuse.

use errlink::{Error, ResultExt, has_type, lookup_tag, root_cause, same, tags, types, with_stack, wrap};

// ============================================================================
// Deep chains
// ============================================================================

fn deep(depth: usize) -> (Error, Error) {
    let root = Error::new("root").add_tag("level", 0usize);
    let mut err = root.clone();
    for level in 1..=depth {
        err = wrap(err, "ctx").add_tag("level", level).add_types(["layer"]);
    }
    (root, err)
}

#[test]
fn deep_chain_traversal() {
    let (root, top) = deep(300);
    assert!(same(root_cause(&top), &root));
    assert_eq!(top.links().count(), 300 * 2 + 1);
    assert_eq!(top.stacks().count(), 300 + 1);
    assert_eq!(types(&top).len(), 300);
    assert_eq!(tags(&top)["level"].downcast_ref::<usize>(), Some(&300));
    assert_eq!(lookup_tag(&top, "level").unwrap().downcast_ref::<usize>(), Some(&300));
}

#[test]
fn very_deep_chain_drops_without_overflow() {
    let mut err = Error::new("root");
    for _ in 0..100_000 {
        err = wrap(err, "ctx");
    }
    assert_eq!(err.links().count(), 100_000 * 2 + 1);
    assert_eq!(root_cause(&err).to_string(), "root");
    drop(err);
}

#[test]
fn very_deep_with_stack_chain_drops_without_overflow() {
    let mut err: Result<(), Error> = Err(Error::new("root").add_types(["io"]));
    for _ in 0..100_000 {
        err = err.with_stack();
    }
    let err = err.unwrap_err();
    assert!(has_type(&err, "io"));
    drop(err);
}

#[test]
fn deep_chain_plain_rendering() {
    let (_, top) = deep(200);
    let plain = top.to_string();
    assert!(plain.starts_with("ctx: ctx: "));
    assert!(plain.ends_with(": root"));
    assert_eq!(plain.matches("ctx").count(), 200);
}

#[test]
fn deep_chain_detailed_rendering() {
    let (_, top) = deep(100);
    let detailed = format!("{:#}", top);
    assert!(detailed.lines().filter(|l| l.starts_with("    at ")).count() >= 101);
}

// ============================================================================
// Odd inputs
// ============================================================================

#[test]
fn empty_messages() {
    let err = wrap(Error::new(""), "");
    assert_eq!(err.to_string(), ": ");
    assert_eq!(err.quoted().to_string(), "\": \"");
}

#[test]
fn stacked_stacks_add_nothing_to_messages() {
    let err = with_stack(with_stack(with_stack(Error::new("root"))));
    assert_eq!(err.to_string(), "root");
    assert_eq!(err.stacks().count(), 4);
}

#[test]
fn empty_tag_key_and_type() {
    let err = Error::new("e").add_tag("", "blank").add_types([""]);
    assert_eq!(lookup_tag(&err, "").unwrap().to_string(), "blank");
    assert!(has_type(&err, ""));
    assert_eq!(types(&err), [""]);
}

#[test]
fn unicode_messages_and_tags() {
    let err = wrap(Error::new("ошибка"), "错误").add_tag("emoji", "🦀");
    assert_eq!(err.to_string(), "错误: ошибка");
    assert!(format!("{:#}", err).contains("emoji=🦀"));
}

// ============================================================================
// Aliasing
// ============================================================================

#[test]
fn tagging_a_clone_does_not_touch_the_chain() {
    let inner = wrap(Error::new("root"), "inner");
    let outer = wrap(inner.clone(), "outer");

    // inner is shared with outer, so this detaches a copy
    let retagged = inner.add_tag("late", true);
    assert!(lookup_tag(&retagged, "late").is_some());
    assert!(lookup_tag(&outer, "late").is_none());
}

#[test]
fn same_error_wrapped_twice() {
    let root = Error::new("root");
    let a = wrap(root.clone(), "a");
    let b = wrap(root.clone(), "b");
    assert!(same(root_cause(&a), root_cause(&b)));
    assert_eq!(a.to_string(), "a: root");
    assert_eq!(b.to_string(), "b: root");
}

#[test]
fn rewrapping_in_a_loop_keeps_ok() {
    let mut result: Result<u32, Error> = Ok(1);
    for _ in 0..10 {
        result = result.wrap("never");
    }
    assert_eq!(result.unwrap(), 1);
}
