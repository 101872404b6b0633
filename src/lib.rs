//! # GGSdl
//!
//! **GGSdl** - ownership-polymorphic bindings to SDL2 and its satellite libraries
//! (SDL_image, SDL_ttf, SDL_mixer) written in Rust.
//!
//! Every native resource comes in two flavours that share one body:
//! an owner, which releases the resource when dropped, and a handle, which only references it
//! (see [`ownership`]). Events and other per-type data are routed through
//! compile-time type tables (see [`dispatchcore`]).
//!

#![warn(missing_docs, clippy::missing_docs_in_private_items)] // `missing_docs`
#![warn(unused_import_braces, unused_qualifications, unused_results)] // `unused_*`
#![warn(trivial_casts, trivial_numeric_casts)] // `casts`
#![warn(missing_copy_implementations, missing_debug_implementations)] // `missing_*_implementations`
#![warn(variant_size_differences, unreachable_pub)]

// crates
extern crate bitflags;
extern crate log;
extern crate seq_macro;
extern crate thiserror;

extern crate sdl2;

extern crate serde;
extern crate serde_cbor;

// utils
mod ffi;
mod ggsdl;
pub use crate::ggsdl::*;

pub mod config;
pub mod error;
pub mod hints;
pub mod ownership;

// cores
pub mod dispatchcore;
pub mod resourcecore;
