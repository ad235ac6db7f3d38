//! Emitting a chain as a `tracing` event.

use crate::error::Error;

impl Error {
    /// Emit one `ERROR` event describing the whole chain.
    ///
    /// The plain rendering, root cause, merged types and merged tags go into structured
    /// fields. The message is the detailed rendering, stacks included.
    ///
    /// ```rust
    /// use errlink::{Error, wrap};
    ///
    /// let err = wrap(Error::new("connection reset"), "syncing inbox").add_tag("account", 12);
    /// err.report();
    /// ```
    pub fn report(&self) {
        let tags = self.tags();
        let types = self.types();
        tracing::error!(
            error = %self,
            root_cause = %self.root_cause(),
            types = ?types,
            tags = ?tags,
            "{:#}",
            self
        );
    }
}
