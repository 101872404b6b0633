//! Prelude module: `resourcecore::prelude` re-exports all `ggsdl::resourcecore` items.
//!
//! # Examples
//! Import all the exports.
//!
//! ```rust
//! use ggsdl::resourcecore::prelude::*;
//! ```
//!

// re-exports
pub use crate::resourcecore::audio::*;
pub use crate::resourcecore::cursors::*;
pub use crate::resourcecore::fonts::*;
pub use crate::resourcecore::input::*;
pub use crate::resourcecore::objects::*;
pub use crate::resourcecore::pixels::*;
pub use crate::resourcecore::rendering::*;
pub use crate::resourcecore::surfaces::*;
pub use crate::resourcecore::windows::*;
