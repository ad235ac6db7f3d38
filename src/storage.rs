//! Per-link storage for tags and types.
//!
//! Every link owns two append-only lists. Most links carry none, and the ones that do
//! rarely carry more than a couple, so the inline features trade a few bytes per link
//! for skipping the heap entirely in the common case.

use alloc::borrow::Cow;
#[cfg(not(all(feature = "tinyvec-inline", feature = "smallvec-inline")))]
use alloc::vec::Vec;

use crate::tag::Tag;

/// A type marker attached to a link.
pub(crate) type TypeName = Cow<'static, str>;

// ============================================================================
// TypeVec - configurable storage for type markers
// ============================================================================

/// Type markers with 2 inline slots (tinyvec-inline).
#[cfg(feature = "tinyvec-inline")]
pub(crate) type TypeVec = tinyvec::TinyVec<[TypeName; 2]>;

/// Heap-allocated type markers (default).
#[cfg(not(feature = "tinyvec-inline"))]
pub(crate) type TypeVec = Vec<TypeName>;

// ============================================================================
// TagVec - configurable storage for tags
// ============================================================================

/// Tags with 2 inline slots (smallvec-inline).
#[cfg(feature = "smallvec-inline")]
pub(crate) type TagVec = smallvec::SmallVec<[Tag; 2]>;

/// Heap-allocated tags (default).
#[cfg(not(feature = "smallvec-inline"))]
pub(crate) type TagVec = Vec<Tag>;

// ============================================================================
// Annotations - the mutable half of a link
// ============================================================================

/// Tags and types owned by a single link, in insertion order.
#[derive(Clone, Default)]
pub(crate) struct Annotations {
    tags: TagVec,
    types: TypeVec,
}

impl Annotations {
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[inline]
    pub(crate) fn types(&self) -> &[TypeName] {
        &self.types
    }

    pub(crate) fn push_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        self.tags.extend(tags);
    }

    pub(crate) fn push_types(&mut self, types: impl IntoIterator<Item = TypeName>) {
        self.types.extend(types);
    }

    /// First tag with `key` on this link only.
    pub(crate) fn find_tag(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.key() == key)
    }

    pub(crate) fn has_type(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t == ty)
    }
}
