//! Key/value tags attached to chain links.
//!
//! A [`Tag`] pairs a string key with a type-erased [`TagValue`]. Values keep their
//! concrete type, so callers can get them back with [`TagValue::downcast_ref`], and
//! render through `Display` in the detailed trace.

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

// ============================================================================
// AnyDisplay - Any + Display in a single trait object
// ============================================================================

/// Trait combining `Any` and `Display` for type-erased tag values.
///
/// Implemented for every `'static + Display + Send + Sync` type.
pub trait AnyDisplay: Any + fmt::Display + Send + Sync {
    /// Get a reference to self as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get the type name for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T: Any + fmt::Display + Send + Sync> AnyDisplay for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

// ============================================================================
// TagValue
// ============================================================================

/// The value half of a [`Tag`].
///
/// Cheap to clone: the value is shared, never copied.
///
/// ```rust
/// use errlink::TagValue;
///
/// let v = TagValue::new(42u32);
/// assert_eq!(v.to_string(), "42");
/// assert_eq!(v.downcast_ref::<u32>(), Some(&42));
/// assert_eq!(v.downcast_ref::<i64>(), None);
/// ```
#[derive(Clone)]
pub struct TagValue(Arc<dyn AnyDisplay>);

impl TagValue {
    pub fn new<T: AnyDisplay>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Try to get the value back as its original type.
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        // (*self.0) so as_any dispatches on the trait object, not the Arc
        (*self.0).as_any().downcast_ref()
    }

    /// Name of the stored value's type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (*self.0).type_name()
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

// Tag values are only guaranteed to be Display.
impl fmt::Debug for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &*self.0)
    }
}

// ============================================================================
// Tag
// ============================================================================

/// A single key/value annotation on a chain link.
///
/// Keys need not be unique. When tags are merged across a chain, the link closest to
/// the caller wins.
#[derive(Clone)]
pub struct Tag {
    key: Cow<'static, str>,
    value: TagValue,
}

impl Tag {
    pub fn new<T: AnyDisplay>(key: impl Into<Cow<'static, str>>, value: T) -> Self {
        Self {
            key: key.into(),
            value: TagValue::new(value),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &TagValue {
        &self.value
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Shorthand for [`Tag::new`].
///
/// ```rust
/// use errlink::{Error, tag};
///
/// let err = Error::new("denied").add_tags([tag("user", 7), tag("role", "guest")]);
/// assert_eq!(err.own_tags().len(), 2);
/// ```
#[inline]
pub fn tag<T: AnyDisplay>(key: impl Into<Cow<'static, str>>, value: T) -> Tag {
    Tag::new(key, value)
}

/// Tags merged across a chain, keyed by tag key.
///
/// Borrowed from the chain it was built from.
pub type TagMap<'a> = BTreeMap<&'a str, &'a TagValue>;
