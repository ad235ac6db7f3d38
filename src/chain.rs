//! Walking a chain: unwrapping, root cause, tag and type aggregation.
//!
//! Every function here accepts any `core::error::Error`, not just [`Error`]. Errors from
//! other crates are handled by capability: `source()` is followed when unwrapping, and
//! anything that isn't an [`Error`] counts as a terminal with no tags and no types.

use alloc::vec::Vec;
use core::error::Error as StdError;
use core::iter::FusedIterator;

use crate::error::Error;
use crate::link::Cause;
use crate::stack::Stack;
use crate::tag::{TagMap, TagValue};

#[inline]
fn as_link<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    err.downcast_ref::<Error>()
}

// ============================================================================
// Cause / RootCause
// ============================================================================

/// The cause one level below `err`, or `None` at the end of the chain.
#[inline]
pub fn unwrap<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// Follow [`unwrap`] until it returns `None` and return the last error seen.
///
/// ```rust
/// use errlink::{Error, root_cause, same, wrap};
///
/// let root = Error::new("root");
/// let top = wrap(wrap(root.clone(), "interim"), "test");
/// assert!(same(root_cause(&top), &root));
/// assert!(same(root_cause(root_cause(&top)), &root));
/// ```
pub fn root_cause<'a>(mut err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    while let Some(cause) = unwrap(err) {
        err = cause;
    }
    err
}

/// Whether `a` and `b` are the same error value.
///
/// Two [`Error`] handles are the same when they point at the same link. Any other pair
/// is compared by address.
pub fn same(a: &(dyn StdError + 'static), b: &(dyn StdError + 'static)) -> bool {
    match (as_link(a), as_link(b)) {
        (Some(a), Some(b)) => Error::ptr_eq(a, b),
        _ => core::ptr::addr_eq(a as *const dyn StdError, b as *const dyn StdError),
    }
}

// ============================================================================
// Tags
// ============================================================================

/// Tags merged across the chain below `err`.
///
/// Lists are applied root first, so a tag on an outer link replaces an inner tag with
/// the same key. Errors from other crates contribute nothing.
pub fn tags<'a>(err: &'a (dyn StdError + 'static)) -> TagMap<'a> {
    let mut merged = TagMap::new();
    let Some(outer) = as_link(err) else {
        return merged;
    };
    let links: Vec<&Error> = outer.links().collect();
    for link in links.into_iter().rev() {
        for tag in link.own_tags() {
            merged.insert(tag.key(), tag.value());
        }
    }
    merged
}

/// Find `key` on `err`'s own tags first, then on each cause in turn.
pub fn lookup_tag<'a>(err: &'a (dyn StdError + 'static), key: &str) -> Option<&'a TagValue> {
    as_link(err)?
        .links()
        .find_map(|link| link.link.notes().find_tag(key))
        .map(|tag| tag.value())
}

// ============================================================================
// Types
// ============================================================================

/// Type markers across the chain below `err`, root first, duplicates kept.
pub fn types<'a>(err: &'a (dyn StdError + 'static)) -> Vec<&'a str> {
    let Some(outer) = as_link(err) else {
        return Vec::new();
    };
    let links: Vec<&Error> = outer.links().collect();
    links
        .into_iter()
        .rev()
        .flat_map(|link| link.link.notes().types())
        .map(|t| &**t)
        .collect()
}

/// Whether `ty` is attached to `err` or any cause below it.
pub fn has_type(err: &(dyn StdError + 'static), ty: &str) -> bool {
    as_link(err).is_some_and(|outer| outer.links().any(|link| link.link.notes().has_type(ty)))
}

// ============================================================================
// Links - iterator over chain links
// ============================================================================

/// Iterator over the links of a chain, outermost first.
///
/// Stops at the Fundamental link or just before a foreign cause.
/// Created by [`Error::links`].
#[derive(Clone)]
pub struct Links<'a> {
    next: Option<&'a Error>,
}

impl<'a> Links<'a> {
    pub(crate) fn new(start: &'a Error) -> Self {
        Self { next: Some(start) }
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.link.cause().and_then(Cause::as_chain);
        Some(current)
    }
}

impl FusedIterator for Links<'_> {}

/// Iterator over every stack captured in a chain, outermost first.
///
/// Created by [`Error::stacks`].
#[derive(Clone)]
pub struct Stacks<'a> {
    links: Links<'a>,
}

impl<'a> Stacks<'a> {
    pub(crate) fn new(start: &'a Error) -> Self {
        Self {
            links: Links::new(start),
        }
    }
}

impl<'a> Iterator for Stacks<'a> {
    type Item = &'a Stack;

    fn next(&mut self) -> Option<Self::Item> {
        self.links.find_map(Error::stack)
    }
}

impl FusedIterator for Stacks<'_> {}
