//! # errlink - Chained errors with stacks, tags and types
//!
//! Build a chain of errors from the root cause outwards, capture where each link was
//! made, hang key/value tags and type markers on any link, and get it all back later.
//!
//! ```text
//! saving profile: disk full user=42
//!     at src/profile.rs:88:9
//! saving profile
//! disk full types=io
//!     at src/profile.rs:80:9
//! ```
//!
//! ## Try It Now
//!
//! ```rust
//! use errlink::{Error, ResultExt, ResultTagExt};
//!
//! fn write_profile() -> Result<(), Error> {
//!     Err(Error::new("disk full").add_types(["io"]))
//! }
//!
//! fn save(user: u64) -> Result<(), Error> {
//!     write_profile().wrap("saving profile").add_tag("user", user)
//! }
//!
//! let err = save(42).unwrap_err();
//! assert_eq!(err.to_string(), "saving profile: disk full");
//! assert_eq!(err.root_cause().to_string(), "disk full");
//! assert_eq!(err.types(), ["io"]);
//! println!("{:#}", err); // every link, with tags, types and stacks
//! ```
//!
//! ## The Chain
//!
//! Every [`Error`] handle points at one of three kinds of link:
//!
//! | [`LinkKind`] | Own message | Own stack | Cause |
//! |--------------|-------------|-----------|-------|
//! | `Fundamental` | ✅ | ✅ | none, it is the root |
//! | `Message` | ✅ | ❌ | any error |
//! | `Stack` | ❌ (shows its cause's) | ✅ | any error |
//!
//! ## Building a Chain
//!
//! | Function | Creates |
//! |----------|---------|
//! | [`Error::new(msg)`](Error::new), [`errorf!`] | `Fundamental` |
//! | [`wrap(cause, msg)`](wrap()), [`wrapf!`], [`.wrap(msg)`](ResultExt::wrap) | `Message` around the cause, then `Stack` around that |
//! | [`with_stack(cause)`](with_stack()), [`.with_stack()`](ResultExt::with_stack) | `Stack` around the cause |
//!
//! The cause can be any `core::error::Error + Send + Sync + 'static`. Errors from other
//! crates become opaque terminals: they have no tags or types, but their `source()`
//! chain is still followed by [`unwrap()`] and [`root_cause()`].
//!
//! Tags and types go on the link you just created:
//! [`add_tag`](Error::add_tag), [`add_tags`](Error::add_tags),
//! [`add_types`](Error::add_types) (or the [`ResultTagExt`] forms on a `Result`).
//!
//! ## Reading a Chain
//!
//! | Function | Result |
//! |----------|--------|
//! | [`unwrap(err)`](unwrap()) | the cause one level down |
//! | [`root_cause(err)`](root_cause()) | the deepest cause |
//! | [`tags(err)`](tags()) | all tags, outer links overriding inner ones |
//! | [`lookup_tag(err, key)`](lookup_tag()) | nearest tag with that key |
//! | [`types(err)`](types()) | all types, root first, duplicates kept |
//! | [`has_type(err, ty)`](has_type()) | whether any link carries the type |
//!
//! All of them take `&dyn core::error::Error`, so they work on anything, including an
//! `anyhow::Error` via `&*err`.
//!
//! ## Cargo Features
//!
//! - `backtrace`: capture a full backtrace next to each call site (needs `std`)
//! - `tracing`: `Error::report()` emits a structured `tracing` event
//! - `tinyvec-inline`, `smallvec-inline`: keep small type/tag lists off the heap

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

mod chain;
mod error;
mod ext;
mod format;
mod link;
pub mod prelude;
#[cfg(feature = "tracing")]
mod report;
mod stack;
mod storage;
mod tag;

pub use chain::{Links, Stacks, has_type, lookup_tag, root_cause, same, tags, types, unwrap};
pub use error::{Error, new, with_stack, wrap};
pub use ext::{ResultExt, ResultTagExt};
pub use format::{Style, Styled};
pub use link::LinkKind;
pub use stack::{DEFAULT_INDENT, Stack};
pub use tag::{AnyDisplay, Tag, TagMap, TagValue, tag};

#[doc(hidden)]
pub mod __private {
    pub use alloc::format;
}

/// Create a root error from a format string.
///
/// ```rust
/// let err = errlink::errorf!("user {} not found", 42);
/// assert_eq!(err.to_string(), "user 42 not found");
/// assert_eq!(err.kind(), errlink::LinkKind::Fundamental);
/// ```
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Error::new($crate::__private::format!($($arg)*))
    };
}

/// Wrap an error with a formatted message.
///
/// ```rust
/// let root = errlink::Error::new("timeout");
/// let err = errlink::wrapf!(root, "fetching {}", "/index.html");
/// assert_eq!(err.to_string(), "fetching /index.html: timeout");
/// ```
#[macro_export]
macro_rules! wrapf {
    ($cause:expr, $($arg:tt)*) => {
        $crate::Error::wrap($cause, $crate::__private::format!($($arg)*))
    };
}
