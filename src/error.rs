//! The [`Error`] handle and the functions that build chains.

use alloc::borrow::Cow;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::error::Error as StdError;

use crate::chain::{self, Links, Stacks};
use crate::link::{Cause, Link, LinkKind};
use crate::stack::Stack;
use crate::storage::Annotations;
use crate::tag::{AnyDisplay, Tag, TagMap, TagValue};

// ============================================================================
// Error - shared handle to a link
// ============================================================================

/// A link in an error chain.
///
/// `Error` is a cheap, clonable handle. The outermost handle keeps every link below it
/// alive, and clones alias the same link.
///
/// ## Building a chain
///
/// ```rust
/// use errlink::{Error, wrap};
///
/// let root = Error::new("root");
/// let mid = wrap(root, "interim").add_tag("attempt", 3);
/// let top = wrap(mid, "test").add_types(["retryable"]);
///
/// assert_eq!(top.to_string(), "test: interim: root");
/// assert_eq!(top.lookup_tag("attempt").map(|v| v.to_string()).as_deref(), Some("3"));
/// assert!(top.has_type("retryable"));
/// ```
///
/// ## Tagging is copy-on-write
///
/// Tags and types are appended in place while a handle is the only one pointing at its
/// link. If the link is shared, the mutating handle detaches a private copy first, so
/// other holders never see the change.
///
/// ```rust
/// use errlink::Error;
///
/// let err = Error::new("boom");
/// let alias = err.clone();
/// let tagged = err.add_tag("k", "v");
///
/// assert!(alias.tags().is_empty());
/// assert_eq!(tagged.tags().len(), 1);
/// ```
#[derive(Clone)]
pub struct Error {
    pub(crate) link: Arc<Link>,
}

impl Error {
    fn from_link(link: Link) -> Self {
        Self {
            link: Arc::new(link),
        }
    }

    /// Create a root error with the caller's stack.
    #[track_caller]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from_link(Link::Fundamental {
            message: message.into(),
            stack: Stack::capture(),
            notes: Annotations::new(),
        })
    }

    /// Wrap `cause` with a message and the caller's stack.
    ///
    /// Two links are created: a message link around `cause`, and a stack link around
    /// that. The stack link is returned, so tags added to the result sit next to the
    /// stack that was captured here.
    #[track_caller]
    pub fn wrap<E>(cause: E, message: impl Into<Cow<'static, str>>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let context = Self::from_link(Link::Message {
            cause: Some(Cause::from_error(cause)),
            message: message.into(),
            notes: Annotations::new(),
        });
        Self::from_link(Link::Stack {
            cause: Some(Cause::Chain(context)),
            stack: Stack::capture(),
            notes: Annotations::new(),
        })
    }

    /// Wrap `cause` with just the caller's stack.
    #[track_caller]
    pub fn with_stack<E>(cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_link(Link::Stack {
            cause: Some(Cause::from_error(cause)),
            stack: Stack::capture(),
            notes: Annotations::new(),
        })
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    fn link_mut(&mut self) -> &mut Link {
        Arc::make_mut(&mut self.link)
    }

    /// Append one tag to this link.
    pub fn add_tag<T: AnyDisplay>(self, key: impl Into<Cow<'static, str>>, value: T) -> Self {
        self.add_tags([Tag::new(key, value)])
    }

    /// Append tags to this link, keeping their order.
    pub fn add_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.link_mut().notes_mut().push_tags(tags);
        self
    }

    /// Append type markers to this link, keeping their order.
    pub fn add_types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        self.link_mut()
            .notes_mut()
            .push_types(types.into_iter().map(Into::into));
        self
    }

    // ========================================================================
    // This link only
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> LinkKind {
        self.link.kind()
    }

    /// This link's own message. `None` for stack links, which show their cause's.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.link.message()
    }

    /// This link's own stack. `None` for message links.
    #[inline]
    pub fn stack(&self) -> Option<&Stack> {
        self.link.stack()
    }

    #[inline]
    pub fn own_tags(&self) -> &[Tag] {
        self.link.notes().tags()
    }

    pub fn own_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.link.notes().types().iter().map(|t| &**t)
    }

    /// Whether two handles point at the same link.
    #[inline]
    pub fn ptr_eq(this: &Error, other: &Error) -> bool {
        Arc::ptr_eq(&this.link, &other.link)
    }

    // ========================================================================
    // Whole chain
    // ========================================================================

    /// The cause one level down, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.link.cause().map(Cause::as_dyn)
    }

    /// The deepest cause reachable from this link, or the link itself.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        chain::root_cause(self)
    }

    /// Links from this one down, stopping before any foreign cause.
    pub fn links(&self) -> Links<'_> {
        Links::new(self)
    }

    /// Every captured stack, outermost first.
    pub fn stacks(&self) -> Stacks<'_> {
        Stacks::new(self)
    }

    /// Tags merged across the chain. Links closer to this one win.
    pub fn tags(&self) -> TagMap<'_> {
        chain::tags(self)
    }

    pub fn lookup_tag(&self, key: &str) -> Option<&TagValue> {
        chain::lookup_tag(self, key)
    }

    /// Types across the chain, root first, duplicates kept.
    pub fn types(&self) -> Vec<&str> {
        chain::types(self)
    }

    pub fn has_type(&self, ty: &str) -> bool {
        chain::has_type(self, ty)
    }
}

// Unlink uniquely owned links one at a time, so dropping a deep chain doesn't recurse
impl Drop for Error {
    fn drop(&mut self) {
        let mut next = Arc::get_mut(&mut self.link).and_then(Link::take_chain);
        while let Some(mut err) = next {
            next = Arc::get_mut(&mut err.link).and_then(Link::take_chain);
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause()
    }
}

// ============================================================================
// Free-function constructors
// ============================================================================

/// Create a root error. Same as [`Error::new`].
#[track_caller]
#[inline]
pub fn new(message: impl Into<Cow<'static, str>>) -> Error {
    Error::new(message)
}

/// Wrap `cause` with a message and a stack. Same as [`Error::wrap`].
///
/// ```rust
/// use errlink::{LinkKind, unwrap, wrap};
///
/// let io = std::io::Error::other("disk full");
/// let err = wrap(io, "saving profile");
///
/// assert_eq!(err.to_string(), "saving profile: disk full");
/// assert_eq!(err.kind(), LinkKind::Stack);
/// // one level down is the message link, two levels down the original error
/// let message = unwrap(&err).unwrap();
/// assert_eq!(message.to_string(), "saving profile: disk full");
/// assert_eq!(unwrap(message).unwrap().to_string(), "disk full");
/// ```
#[track_caller]
#[inline]
pub fn wrap<E>(cause: E, message: impl Into<Cow<'static, str>>) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    Error::wrap(cause, message)
}

/// Wrap `cause` with a stack only. Same as [`Error::with_stack`].
#[track_caller]
#[inline]
pub fn with_stack<E>(cause: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    Error::with_stack(cause)
}
