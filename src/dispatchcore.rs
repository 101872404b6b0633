//! `ggsdl::dispatchcore` module is a core that maps compile-time types to runtime slots.
//!
//! Every type of a closed type list (tuple of up to 16 types) owns one slot;
//! index of that slot is computed by trait selection at compile time, so lookups
//! are plain array indexing without hashing or runtime type identification.
//!
//! # Prelude
//! `ggsdl::dispatchcore` prelude can be imported with `use ggsdl::dispatchcore::prelude::*`.
//!
//! # Usage
//! [`TypeTable`] is a cache that stores one value per type (for example, one rendered
//! texture per kind of label). [`EventDispatcher`] stores one handler per event type and routes
//! runtime events (SDL events by default) to them:
//! ```rust
//! # use ggsdl::dispatchcore::prelude::*;
//! # use sdl2::event::Event;
//! let mut dispatcher: EventDispatcher<(Quit, KeyDown, MouseWheel)> = EventDispatcher::new();
//! let _ = dispatcher.bind(|wheel: MouseWheel| println!("scrolled by {}", wheel.y));
//!
//! assert_eq!(dispatcher.dispatch(&Event::Quit { timestamp: 0 }), Dispatch::Unbound);
//! assert_eq!(dispatcher.dispatch(&Event::AppTerminating { timestamp: 0 }), Dispatch::Ignored);
//! ```
//!

// submodules and public re-exports
pub mod dispatcher;
pub mod events;
pub mod slots;
pub mod table;
pub mod typelist;

pub use self::{
    dispatcher::{Dispatch, EventDispatcher, EventList, Handler},
    events::EventType,
    slots::Slots,
    table::TypeTable,
    typelist::{Index, Position, TypeList},
};

// prelude
pub mod prelude;
