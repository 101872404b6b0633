//! `ggsdl::resourcecore` module is a core that wraps native resources of SDL and its satellite libraries.
//!
//! Every resource kind is an instance of [`BasicResource`](crate::ownership::BasicResource):
//! submodules declare a kind marker together with `X` owner and `XHandle` handle aliases,
//! write every operation once for both of them and add owner-only extensions where
//! ownership matters (creating dependent resources that must not outlive the owner).
//!
//! # Prelude
//! `ggsdl::resourcecore` prelude can be imported with `use ggsdl::resourcecore::prelude::*`.
//!
//! # Usage
//! ```rust
//! # use ggsdl::resourcecore::prelude::*;
//! let surface: Surface = Surface::new(8, 8, PixelFormat::RGBA32).expect("Memory should be available");
//! let handle: SurfaceHandle = surface.handle();
//! handle.fill_rect(None, Color::WHITE).expect("Handle is valid");
//! let copy: Surface = handle.duplicate().expect("Memory should be available");
//! assert_eq!(copy.width().expect("Surface is valid"), 8);
//! ```
//!

// submodules and public re-exports
pub mod audio;
pub mod cursors;
pub mod fonts;
pub mod input;
pub mod objects;
pub mod pixels;
pub mod rendering;
pub mod surfaces;
pub mod windows;

// prelude
pub mod prelude;
