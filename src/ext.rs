//! Extension traits for building chains straight from `Result`s.
//!
//! - [`ResultExt`]: `.wrap()`, `.wrap_with()` and `.with_stack()` on any `Result<T, E>`
//!   whose error implements `core::error::Error`
//! - [`ResultTagExt`]: `.add_tag()`, `.add_tags()` and `.add_types()` on `Result<T, Error>`
//!
//! `Ok` is the "no error" value: every method returns it untouched.

use alloc::borrow::Cow;
use core::error::Error as StdError;

use crate::error::Error;
use crate::tag::{AnyDisplay, Tag};

// ============================================================================
// ResultExt - wrapping
// ============================================================================

/// Wrap the error of a `Result`, recording the caller's location.
///
/// ```rust
/// use errlink::{Error, ResultExt};
///
/// fn read_config() -> Result<String, std::io::Error> {
///     Err(std::io::Error::other("permission denied"))
/// }
///
/// fn init() -> Result<String, Error> {
///     read_config().wrap("loading config")
/// }
///
/// assert_eq!(init().unwrap_err().to_string(), "loading config: permission denied");
///
/// let ok: Result<u8, std::io::Error> = Ok(7);
/// assert_eq!(ok.wrap("never used").unwrap(), 7);
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with a message and a stack.
    #[track_caller]
    fn wrap(self, message: impl Into<Cow<'static, str>>) -> Result<T, Error>;

    /// Like [`wrap`](Self::wrap), but the message is only built on `Err`.
    #[track_caller]
    fn wrap_with<M: Into<Cow<'static, str>>>(self, f: impl FnOnce() -> M) -> Result<T, Error>;

    /// Wrap the error with a stack only.
    #[track_caller]
    fn with_stack(self) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[track_caller]
    #[inline]
    fn wrap(self, message: impl Into<Cow<'static, str>>) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::wrap(e, message)),
        }
    }

    #[track_caller]
    #[inline]
    fn wrap_with<M: Into<Cow<'static, str>>>(self, f: impl FnOnce() -> M) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::wrap(e, f())),
        }
    }

    #[track_caller]
    #[inline]
    fn with_stack(self) -> Result<T, Error> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(Error::with_stack(e)),
        }
    }
}

// ============================================================================
// ResultTagExt - tagging
// ============================================================================

/// Tag the error of a `Result<T, Error>` in place.
///
/// ```rust
/// use errlink::{Error, ResultExt, ResultTagExt};
///
/// fn lookup(id: u64) -> Result<(), Error> {
///     Err(Error::new("no such user"))
/// }
///
/// let err = lookup(42)
///     .wrap("handling request")
///     .add_tag("user_id", 42u64)
///     .add_types(["not_found"])
///     .unwrap_err();
///
/// assert_eq!(err.lookup_tag("user_id").and_then(|v| v.downcast_ref::<u64>()), Some(&42));
/// assert!(err.has_type("not_found"));
/// ```
pub trait ResultTagExt<T> {
    fn add_tag<V: AnyDisplay>(self, key: impl Into<Cow<'static, str>>, value: V) -> Self;

    fn add_tags(self, tags: impl IntoIterator<Item = Tag>) -> Self;

    fn add_types<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>;
}

impl<T> ResultTagExt<T> for Result<T, Error> {
    #[inline]
    fn add_tag<V: AnyDisplay>(self, key: impl Into<Cow<'static, str>>, value: V) -> Self {
        self.map_err(|e| e.add_tag(key, value))
    }

    #[inline]
    fn add_tags(self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.map_err(|e| e.add_tags(tags))
    }

    #[inline]
    fn add_types<I, S>(self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.map_err(|e| e.add_types(types))
    }
}
