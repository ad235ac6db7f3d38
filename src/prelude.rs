//! Convenient re-exports for common usage.
//!
//! ## Usage
//!
//! ```rust
//! use errlink::prelude::*;
//!
//! fn inner() -> Result<(), Error> {
//!     Err(Error::new("missing key"))
//! }
//!
//! fn outer() -> Result<(), Error> {
//!     inner().wrap("reading settings").add_types(["config"])?;
//!     Ok(())
//! }
//!
//! assert!(outer().unwrap_err().has_type("config"));
//! ```

pub use crate::Error;
pub use crate::ResultExt;
pub use crate::ResultTagExt;
pub use crate::{errorf, wrap, wrapf};
