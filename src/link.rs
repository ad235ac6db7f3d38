//! The three link variants a chain is built from.
//!
//! Links are never exposed directly. [`Error`] is a shared handle to one, and the
//! introspection methods on it report which variant sits behind the handle.

use alloc::borrow::Cow;
use alloc::sync::Arc;
use core::any::Any;
use core::error::Error as StdError;

use crate::error::Error;
use crate::stack::Stack;
use crate::storage::Annotations;

// ============================================================================
// LinkKind - public view of the variant
// ============================================================================

/// Which kind of link an [`Error`] handle points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Root of a chain: message and stack, no cause.
    Fundamental,
    /// Context text around a cause. Carries no stack.
    Message,
    /// A stack snapshot around a cause. Carries no message of its own.
    Stack,
}

// ============================================================================
// Cause
// ============================================================================

/// What a non-terminal link points at.
#[derive(Clone)]
pub(crate) enum Cause {
    /// Another link of this crate.
    Chain(Error),
    /// Any other error. Opaque for tags and types, traversable through `source()`.
    Foreign(Arc<dyn StdError + Send + Sync>),
}

impl Cause {
    /// Sort an arbitrary error into a chain link or a foreign cause.
    pub(crate) fn from_error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let mut slot = Some(err);
        let any: &mut dyn Any = &mut slot;
        if let Some(chained) = any.downcast_mut::<Option<Error>>().and_then(Option::take) {
            return Cause::Chain(chained);
        }
        match slot {
            Some(foreign) => Cause::Foreign(Arc::new(foreign)),
            None => unreachable!("slot is only emptied when the cause is an Error"),
        }
    }

    #[inline]
    pub(crate) fn as_dyn(&self) -> &(dyn StdError + 'static) {
        match self {
            Cause::Chain(err) => err,
            Cause::Foreign(err) => &**err,
        }
    }

    #[inline]
    pub(crate) fn as_chain(&self) -> Option<&Error> {
        match self {
            Cause::Chain(err) => Some(err),
            Cause::Foreign(_) => None,
        }
    }
}

// ============================================================================
// Link
// ============================================================================

/// One node of a chain.
///
/// Message, cause and stack never change after construction. Only `notes` grows.
///
/// `cause` is `Some` for as long as the link is reachable. It is emptied only while a
/// chain is being torn down, see [`Link::take_chain`].
#[derive(Clone)]
pub(crate) enum Link {
    Fundamental {
        message: Cow<'static, str>,
        stack: Stack,
        notes: Annotations,
    },
    Message {
        cause: Option<Cause>,
        message: Cow<'static, str>,
        notes: Annotations,
    },
    Stack {
        cause: Option<Cause>,
        stack: Stack,
        notes: Annotations,
    },
}

impl Link {
    pub(crate) fn kind(&self) -> LinkKind {
        match self {
            Link::Fundamental { .. } => LinkKind::Fundamental,
            Link::Message { .. } => LinkKind::Message,
            Link::Stack { .. } => LinkKind::Stack,
        }
    }

    pub(crate) fn cause(&self) -> Option<&Cause> {
        match self {
            Link::Fundamental { .. } => None,
            Link::Message { cause, .. } | Link::Stack { cause, .. } => cause.as_ref(),
        }
    }

    /// Detach the next chain link so it can be dropped by the caller.
    ///
    /// Foreign causes stay in place.
    pub(crate) fn take_chain(&mut self) -> Option<Error> {
        let slot = match self {
            Link::Fundamental { .. } => return None,
            Link::Message { cause, .. } | Link::Stack { cause, .. } => cause,
        };
        match slot.take()? {
            Cause::Chain(next) => Some(next),
            foreign => {
                *slot = Some(foreign);
                None
            }
        }
    }

    /// The link's own message. Stack links delegate theirs, so they have none.
    pub(crate) fn message(&self) -> Option<&str> {
        match self {
            Link::Fundamental { message, .. } | Link::Message { message, .. } => Some(message),
            Link::Stack { .. } => None,
        }
    }

    pub(crate) fn stack(&self) -> Option<&Stack> {
        match self {
            Link::Fundamental { stack, .. } | Link::Stack { stack, .. } => Some(stack),
            Link::Message { .. } => None,
        }
    }

    pub(crate) fn notes(&self) -> &Annotations {
        match self {
            Link::Fundamental { notes, .. }
            | Link::Message { notes, .. }
            | Link::Stack { notes, .. } => notes,
        }
    }

    pub(crate) fn notes_mut(&mut self) -> &mut Annotations {
        match self {
            Link::Fundamental { notes, .. }
            | Link::Message { notes, .. }
            | Link::Stack { notes, .. } => notes,
        }
    }
}
