//! Rendering a chain as text.
//!
//! | Directive | Style | Output |
//! |-----------|-------|--------|
//! | `{}` | [`Style::Plain`] | `test: interim: root` |
//! | [`err.quoted()`](Error::quoted) | [`Style::Quoted`] | `"test: interim: root"` |
//! | `{:#}`, `{:?}` | [`Style::Detailed`] | one block per link, with tags, types and stacks |
//!
//! A precision (`{:#.2}`) sets how many spaces stack lines are indented by.

use alloc::string::String;
use core::error::Error as StdError;
use core::fmt;

use crate::error::Error;
use crate::link::{Cause, Link};
use crate::stack::DEFAULT_INDENT;

/// How to render a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Messages joined with `": "`, outermost first.
    #[default]
    Plain,
    /// The plain rendering as an escaped, double-quoted string.
    Quoted,
    /// One block per link, outermost first: message, tags, types, then the stack.
    Detailed,
}

// ============================================================================
// Rendering entry points on Error
// ============================================================================

impl Error {
    /// Write this chain to `sink` in the given style.
    ///
    /// `indent` is the number of spaces before each stack line (default 4). Only the
    /// detailed style prints stacks.
    ///
    /// ```rust
    /// use errlink::{Error, Style, wrap};
    ///
    /// let err = wrap(Error::new("root"), "outer");
    /// let mut out = String::new();
    /// err.render(&mut out, Style::Quoted, None).unwrap();
    /// assert_eq!(out, "\"outer: root\"");
    /// ```
    pub fn render(
        &self,
        sink: &mut dyn fmt::Write,
        style: Style,
        indent: Option<usize>,
    ) -> fmt::Result {
        match style {
            Style::Plain => write_plain(self, sink),
            Style::Quoted => {
                let mut plain = String::new();
                write_plain(self, &mut plain)?;
                write!(sink, "{:?}", plain)
            }
            Style::Detailed => write_detailed(self, sink, indent.unwrap_or(DEFAULT_INDENT)),
        }
    }

    /// Display adapter for any [`Style`].
    pub fn styled(&self, style: Style) -> Styled<'_> {
        Styled {
            err: self,
            style,
            indent: None,
        }
    }

    /// Display adapter for the quoted style.
    pub fn quoted(&self) -> Styled<'_> {
        self.styled(Style::Quoted)
    }

    /// Display adapter for the detailed style with stack lines indented by `indent`.
    pub fn detailed(&self, indent: usize) -> Styled<'_> {
        self.styled(Style::Detailed).indent(indent)
    }
}

/// A chain paired with a rendering style. Created by [`Error::styled`].
#[derive(Clone, Copy)]
pub struct Styled<'a> {
    err: &'a Error,
    style: Style,
    indent: Option<usize>,
}

impl Styled<'_> {
    /// Indent stack lines by `indent` spaces. Overrides any precision in the directive.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }
}

impl fmt::Display for Styled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = self.indent.or(f.precision());
        self.err.render(f, self.style, indent)
    }
}

// ============================================================================
// Display / Debug
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let indent = f.precision();
            self.render(f, Style::Detailed, indent)
        } else {
            write_plain(self, f)
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = f.precision();
        self.render(f, Style::Detailed, indent)
    }
}

// ============================================================================
// Plain
// ============================================================================

fn write_plain(err: &Error, sink: &mut dyn fmt::Write) -> fmt::Result {
    let mut link = &*err.link;
    loop {
        let cause = match link {
            Link::Fundamental { message, .. } => return sink.write_str(message),
            Link::Message { message, cause, .. } => {
                write!(sink, "{}: ", message)?;
                cause
            }
            Link::Stack { cause, .. } => cause,
        };
        match cause {
            Some(Cause::Chain(next)) => link = &*next.link,
            Some(Cause::Foreign(foreign)) => return write!(sink, "{}", foreign),
            None => return Ok(()),
        }
    }
}

fn write_cause_plain(cause: &Cause, sink: &mut dyn fmt::Write) -> fmt::Result {
    match cause {
        Cause::Chain(err) => write_plain(err, sink),
        Cause::Foreign(foreign) => write!(sink, "{}", foreign),
    }
}

// ============================================================================
// Detailed
// ============================================================================

fn write_detailed(err: &Error, sink: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
    let mut current = err;
    loop {
        write_block(current, sink, indent)?;
        match current.link.cause() {
            None => return Ok(()),
            Some(Cause::Chain(next)) => {
                sink.write_char('\n')?;
                current = next;
            }
            Some(Cause::Foreign(foreign)) => {
                sink.write_char('\n')?;
                return write_foreign(&**foreign, sink, indent);
            }
        }
    }
}

/// One link: header, own tags, own types, own stack.
fn write_block(err: &Error, sink: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
    match &*err.link {
        Link::Fundamental { message, .. } | Link::Message { message, .. } => {
            sink.write_str(message)?
        }
        // No message of its own: show what it wraps
        Link::Stack { cause, .. } => {
            if let Some(cause) = cause {
                write_cause_plain(cause, sink)?
            }
        }
    }

    for tag in err.own_tags() {
        write!(sink, " {}={}", tag.key(), tag.value())?;
    }

    let mut types = err.own_types();
    if let Some(first) = types.next() {
        write!(sink, " types={}", first)?;
        for ty in types {
            write!(sink, ",{}", ty)?;
        }
    }

    if let Some(stack) = err.stack() {
        stack.render(sink, indent)?;
    }
    Ok(())
}

fn write_foreign(err: &(dyn StdError + 'static), sink: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
    write!(sink, "{}", err)?;
    let mut source = err.source();
    while let Some(src) = source {
        write!(sink, "\n{:indent$}caused by: {}", "", src, indent = indent)?;
        source = src.source();
    }
    Ok(())
}
