//! Stack snapshots captured when a link is created.
//!
//! A [`Stack`] always records the caller's source location through `#[track_caller]`,
//! which costs nothing beyond a pointer copy. With the `backtrace` feature it also
//! captures the full unresolved call stack; symbols are resolved only when the snapshot
//! is rendered.

use core::fmt;
use core::panic::Location;

#[cfg(feature = "backtrace")]
use alloc::sync::Arc;

/// Indentation used for stack lines when the caller doesn't pick one.
pub const DEFAULT_INDENT: usize = 4;

/// An immutable snapshot of where a link was created.
///
/// ## Example
///
/// ```rust
/// use errlink::Stack;
///
/// #[track_caller]
/// fn here() -> Stack {
///     Stack::capture()
/// }
///
/// let stack = here();
/// assert_eq!(stack.location().line(), line!() - 1);
/// ```
#[derive(Clone)]
pub struct Stack {
    location: &'static Location<'static>,
    #[cfg(feature = "backtrace")]
    backtrace: Arc<backtrace::Backtrace>,
}

impl Stack {
    /// Capture the caller's location (and full backtrace with the `backtrace` feature).
    #[track_caller]
    #[inline]
    pub fn capture() -> Self {
        Self {
            location: Location::caller(),
            #[cfg(feature = "backtrace")]
            backtrace: Arc::new(backtrace::Backtrace::new_unresolved()),
        }
    }

    /// The call site that created the link.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// The unresolved backtrace captured alongside the location.
    #[cfg(feature = "backtrace")]
    #[inline]
    pub fn backtrace(&self) -> &backtrace::Backtrace {
        &self.backtrace
    }

    /// Write the snapshot to `sink`, one frame per line, each line starting with a
    /// newline followed by `indent` spaces.
    pub fn render(&self, sink: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        let loc = self.location;
        write!(
            sink,
            "\n{:indent$}at {}:{}:{}",
            "",
            loc.file(),
            loc.line(),
            loc.column(),
            indent = indent
        )?;
        #[cfg(feature = "backtrace")]
        self.render_backtrace(sink, indent)?;
        Ok(())
    }

    #[cfg(feature = "backtrace")]
    fn render_backtrace(&self, sink: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        // Resolving needs &mut, and the captured frames are shared
        let mut resolved = (*self.backtrace).clone();
        resolved.resolve();
        for frame in resolved.frames() {
            for symbol in frame.symbols() {
                match symbol.name() {
                    Some(name) => write!(sink, "\n{:indent$}  {:#}", "", name, indent = indent)?,
                    None => write!(sink, "\n{:indent$}  <unknown>", "", indent = indent)?,
                }
                if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                    write!(
                        sink,
                        "\n{:indent$}      at {}:{}",
                        "",
                        file.display(),
                        line,
                        indent = indent
                    )?;
                }
            }
        }
        Ok(())
    }
}

/// Renders like the detailed trace, indented by the precision (default 4).
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = f.precision().unwrap_or(DEFAULT_INDENT);
        self.render(f, indent)
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = self.location;
        write!(f, "Stack({}:{}:{})", loc.file(), loc.line(), loc.column())
    }
}
