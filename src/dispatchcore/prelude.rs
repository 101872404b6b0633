//! Prelude module: `dispatchcore::prelude` re-exports all `ggsdl::dispatchcore` items.
//!
//! # Examples
//! Import all the exports.
//!
//! ```rust
//! use ggsdl::dispatchcore::prelude::*;
//! ```
//!

// re-exports
pub use crate::dispatchcore::dispatcher::*;
pub use crate::dispatchcore::events::*;
pub use crate::dispatchcore::slots::*;
pub use crate::dispatchcore::table::*;
pub use crate::dispatchcore::typelist::*;
