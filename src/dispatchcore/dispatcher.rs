//! `dispatchcore::dispatcher` submodule implements [`EventDispatcher`] -
//! a table of handlers that is indexed by event types.
//!

use super::{
    events::EventType,
    slots::Slots,
    typelist::{Position, TypeList},
};
use log::trace;
use sdl2::{event::Event as SdlEvent, EventPump};
use seq_macro::seq;
use std::{any::type_name, collections::VecDeque, fmt, marker::PhantomData};

/// [`Dispatch`] enum describes what has happened to one dispatched event.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dispatch {
    /// Event matched a type from the list, and its handler was invoked.
    ///
    Handled,
    /// Event matched a type from the list, but no handler is bound for that type.
    ///
    Unbound,
    /// Event did not match any type from the list.
    ///
    Ignored,
}
impl Dispatch {
    /// Returns whether a handler was invoked.
    ///
    pub fn is_handled(self) -> bool {
        self == Dispatch::Handled
    }
}

/// Type alias for handlers that are stored in [`EventDispatcher`].
///
pub type Handler<E> = Box<dyn FnMut(E)>;

/// Invokes handler that is stored at `index` (if any).
///
fn invoke<E: 'static>(handlers: &mut Slots, index: usize, event: E) -> Dispatch {
    match handlers.downcast_mut::<Handler<E>>(index) {
        Some(handler) => {
            handler(event);
            Dispatch::Handled
        }
        None => Dispatch::Unbound,
    }
}

/// [`EventList`] trait is implemented for tuples of up to 16 [`EventType`]s.
///
/// Dispatching tests candidates in declaration order and stops at the first one that matches,
/// so at most one handler is invoked per event even if several types would match.
///
pub trait EventList<S>: TypeList {
    /// Finds the first type that matches `source` and invokes its handler.
    ///
    /// Handler of the type at position `N` is expected in slot `N`.
    ///
    fn dispatch(source: &S, handlers: &mut Slots) -> Dispatch;
}
/// `impl_event_list` macro implements [`EventList`] trait for tuples.
///
macro_rules! impl_event_list {
    ($($t:ident => $index:tt),* $(,)?) => {
        impl<S, $($t: EventType<S>,)*> EventList<S> for ($($t,)*) {
            fn dispatch(source: &S, handlers: &mut Slots) -> Dispatch {
                $(
                    if let Some(event) = <$t as EventType<S>>::extract(source) {
                        return invoke::<$t>(handlers, $index, event);
                    }
                )*
                let _ = (source, handlers);
                Dispatch::Ignored
            }
        }
    };
}
seq!(SIZE in 0..=16 {
    #(seq!(N in 0..SIZE { impl_event_list!(#(T~N => N,)*); });)*
});

/// [`EventDispatcher`] struct binds at most one handler to each event type of the list `L`
/// and routes runtime events of type `S` to them.
///
/// Set of event types is closed and fixed at compile time; slot of every type is
/// computed at compile time too (see [`typelist`](super::typelist) submodule).
/// Events that do not match any type of the list are skipped silently.
///
/// Source defaults to `sdl2::event::Event`.
///
/// # Example
/// ```rust
/// # use ggsdl::dispatchcore::{EventDispatcher, events::{Quit, KeyDown}};
/// # use sdl2::event::Event;
/// # use std::{cell::Cell, rc::Rc};
/// let quit: Rc<Cell<bool>> = Rc::new(Cell::new(false));
/// let mut dispatcher: EventDispatcher<(Quit, KeyDown)> = EventDispatcher::new();
///
/// let flag: Rc<Cell<bool>> = Rc::clone(&quit);
/// let _ = dispatcher.bind(move |_: Quit| flag.set(true));
///
/// dispatcher.push(Event::Quit { timestamp: 0 });
/// assert_eq!(dispatcher.poll(), 1);
/// assert!(quit.get());
/// ```
///
pub struct EventDispatcher<L: EventList<S>, S = SdlEvent> {
    /// Bound handlers.
    ///
    handlers: Slots,
    /// Events that are waiting to be dispatched.
    ///
    queue: VecDeque<S>,
    /// Event list marker.
    ///
    list: PhantomData<fn() -> L>,
}
impl<L: EventList<S>, S> EventDispatcher<L, S> {
    /// Creates [`EventDispatcher`] with no bound handlers.
    ///
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Slots::with_len(L::LEN),
            queue: VecDeque::new(),
            list: PhantomData,
        }
    }

    /// Binds handler to the event type `E`.
    ///
    /// Previous handler of `E` is replaced (and dropped); returns whether there was one.
    ///
    pub fn bind<E: EventType<S>, I>(&mut self, handler: impl FnMut(E) + 'static) -> bool
    where
        L: Position<E, I>,
    {
        let handler: Handler<E> = Box::new(handler);
        self.handlers
            .set(<L as Position<E, I>>::INDEX, Box::new(handler))
            .is_some()
    }
    /// Removes handler of the event type `E`, returning whether there was one.
    ///
    pub fn unbind<E: EventType<S>, I>(&mut self) -> bool
    where
        L: Position<E, I>,
    {
        self.handlers
            .take(<L as Position<E, I>>::INDEX)
            .is_some()
    }
    /// Returns whether handler is bound to the event type `E`.
    ///
    pub fn is_bound<E: EventType<S>, I>(&self) -> bool
    where
        L: Position<E, I>,
    {
        self.handlers.is_occupied(<L as Position<E, I>>::INDEX)
    }
    /// Removes every handler.
    ///
    /// Queued events are kept.
    ///
    pub fn reset(&mut self) {
        self.handlers.clear();
    }

    /// Returns number of bound handlers.
    ///
    pub fn bound_count(&self) -> usize {
        self.handlers.occupied()
    }
    /// Returns number of event types in the list.
    ///
    pub fn capacity(&self) -> usize {
        L::LEN
    }

    /// Routes one event to its handler.
    ///
    pub fn dispatch(&mut self, event: &S) -> Dispatch {
        let result: Dispatch = L::dispatch(event, &mut self.handlers);
        trace!(
            "dispatched `{source}` event: {result:?}",
            source = type_name::<S>()
        );
        result
    }

    /// Queues event to be dispatched by the next [`EventDispatcher::poll`].
    ///
    pub fn push(&mut self, event: S) {
        self.queue.push_back(event);
    }
    /// Returns number of queued events.
    ///
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
    /// Dispatches every queued event in order, returning how many handlers were invoked.
    ///
    /// Queue is empty when this function returns.
    ///
    pub fn poll(&mut self) -> usize {
        let mut handled: usize = 0;
        while let Some(event) = self.queue.pop_front() {
            if self.dispatch(&event).is_handled() {
                handled += 1;
            }
        }
        handled
    }
}
impl<L: EventList<SdlEvent>> EventDispatcher<L, SdlEvent> {
    /// Drains SDL event queue and dispatches every event, returning how many handlers were invoked.
    ///
    /// Events that were queued by [`EventDispatcher::push`] are dispatched first.
    ///
    pub fn poll_events(&mut self, pump: &mut EventPump) -> usize {
        let mut handled: usize = self.poll();
        for event in pump.poll_iter() {
            if self.dispatch(&event).is_handled() {
                handled += 1;
            }
        }
        handled
    }
    /// Waits for one SDL event (at most `timeout_ms` milliseconds) and dispatches it.
    ///
    /// Returns `None` if the timeout has passed without events.
    ///
    pub fn wait_event(&mut self, pump: &mut EventPump, timeout_ms: u32) -> Option<Dispatch> {
        pump.wait_event_timeout(timeout_ms)
            .map(|event| self.dispatch(&event))
    }
}
impl<L: EventList<S>, S> Default for EventDispatcher<L, S> {
    fn default() -> Self {
        EventDispatcher::new()
    }
}
impl<L: EventList<S>, S> fmt::Debug for EventDispatcher<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers)
            .field("pending", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dispatch, EventDispatcher};
    use crate::dispatchcore::events::{EventType, KeyDown, Quit};
    use sdl2::{
        event::Event as SdlEvent,
        keyboard::{Keycode, Mod, Scancode},
    };
    use std::{cell::RefCell, rc::Rc};

    #[derive(Clone, Debug, PartialEq)]
    enum Source {
        Alpha(u32),
        Beta(&'static str),
        Gamma,
        Unknown,
    }

    #[derive(Debug, PartialEq)]
    struct Alpha(u32);
    impl EventType<Source> for Alpha {
        fn extract(source: &Source) -> Option<Self> {
            match source {
                Source::Alpha(value) => Some(Alpha(*value)),
                _ => None,
            }
        }
    }
    #[derive(Debug, PartialEq)]
    struct Beta(&'static str);
    impl EventType<Source> for Beta {
        fn extract(source: &Source) -> Option<Self> {
            match source {
                Source::Beta(text) => Some(Beta(*text)),
                _ => None,
            }
        }
    }
    #[derive(Debug, PartialEq)]
    struct Gamma;
    impl EventType<Source> for Gamma {
        fn extract(source: &Source) -> Option<Self> {
            matches!(source, Source::Gamma).then_some(Gamma)
        }
    }
    /// Matches every event.
    ///
    #[derive(Debug, PartialEq)]
    struct Everything(Source);
    impl EventType<Source> for Everything {
        fn extract(source: &Source) -> Option<Self> {
            Some(Everything(source.clone()))
        }
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder<E: std::fmt::Debug>(log: &Log, name: &'static str) -> impl FnMut(E) + 'static {
        let log: Log = Rc::clone(log);
        move |event: E| log.borrow_mut().push(format!("{name}: {event:?}"))
    }

    #[test]
    fn only_matching_handler_is_invoked() {
        let log: Log = Log::default();
        let mut dispatcher: EventDispatcher<(Alpha, Beta, Gamma), Source> = EventDispatcher::new();
        assert_eq!(dispatcher.capacity(), 3);
        assert!(!dispatcher.bind(recorder::<Alpha>(&log, "alpha")));
        assert!(!dispatcher.bind(recorder::<Beta>(&log, "beta")));
        assert!(!dispatcher.bind(recorder::<Gamma>(&log, "gamma")));
        assert_eq!(dispatcher.bound_count(), 3);

        assert_eq!(dispatcher.dispatch(&Source::Beta("hello")), Dispatch::Handled);
        assert_eq!(*log.borrow(), vec![String::from("beta: Beta(\"hello\")")]);
    }

    #[test]
    fn first_match_wins() {
        let log: Log = Log::default();
        let mut dispatcher: EventDispatcher<(Alpha, Everything), Source> = EventDispatcher::default();
        let _ = dispatcher.bind(recorder::<Alpha>(&log, "alpha"));
        let _ = dispatcher.bind(recorder::<Everything>(&log, "everything"));

        dispatcher.push(Source::Alpha(1));
        dispatcher.push(Source::Gamma);
        assert_eq!(dispatcher.pending(), 2);
        assert_eq!(dispatcher.poll(), 2);
        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(
            *log.borrow(),
            vec![
                String::from("alpha: Alpha(1)"),
                String::from("everything: Everything(Gamma)"),
            ]
        );
    }

    #[test]
    fn rebind_replaces() {
        let log: Log = Log::default();
        let mut dispatcher: EventDispatcher<(Alpha, Beta), Source> = EventDispatcher::new();
        assert!(!dispatcher.bind(recorder::<Alpha>(&log, "first")));
        assert!(dispatcher.bind(recorder::<Alpha>(&log, "second")));
        assert_eq!(dispatcher.bound_count(), 1);

        dispatcher.push(Source::Alpha(5));
        dispatcher.push(Source::Alpha(6));
        assert_eq!(dispatcher.poll(), 2);
        assert_eq!(
            *log.borrow(),
            vec![String::from("second: Alpha(5)"), String::from("second: Alpha(6)")]
        );
    }

    #[test]
    fn unknown_and_unbound_events_are_skipped() {
        let log: Log = Log::default();
        let mut dispatcher: EventDispatcher<(Alpha, Beta), Source> = EventDispatcher::new();
        let _ = dispatcher.bind(recorder::<Alpha>(&log, "alpha"));

        assert_eq!(dispatcher.dispatch(&Source::Unknown), Dispatch::Ignored);
        assert_eq!(dispatcher.dispatch(&Source::Gamma), Dispatch::Ignored);
        assert_eq!(dispatcher.dispatch(&Source::Beta("unbound")), Dispatch::Unbound);
        assert!(log.borrow().is_empty());

        assert!(dispatcher.is_bound::<Alpha, _>());
        assert!(dispatcher.unbind::<Alpha, _>());
        assert!(!dispatcher.unbind::<Alpha, _>());
        assert_eq!(dispatcher.dispatch(&Source::Alpha(0)), Dispatch::Unbound);

        let _ = dispatcher.bind(recorder::<Alpha>(&log, "alpha"));
        let _ = dispatcher.bind(recorder::<Beta>(&log, "beta"));
        dispatcher.reset();
        assert_eq!(dispatcher.bound_count(), 0);
        dispatcher.push(Source::Alpha(0));
        dispatcher.push(Source::Beta("beta"));
        assert_eq!(dispatcher.poll(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn empty_list_ignores_everything() {
        let mut dispatcher: EventDispatcher<(), Source> = EventDispatcher::new();
        assert_eq!(dispatcher.capacity(), 0);
        assert_eq!(dispatcher.dispatch(&Source::Alpha(0)), Dispatch::Ignored);
    }

    #[test]
    fn key_press_without_handler() {
        let quits: Log = Log::default();
        let mut dispatcher: EventDispatcher<(Quit, KeyDown)> = EventDispatcher::new();
        let _ = dispatcher.bind(recorder::<Quit>(&quits, "quit"));

        dispatcher.push(SdlEvent::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(Keycode::Space),
            scancode: Some(Scancode::Space),
            keymod: Mod::NOMOD,
            repeat: false,
        });
        assert_eq!(dispatcher.poll(), 0);
        assert!(quits.borrow().is_empty());
    }

    #[test]
    fn second_quit_handler_replaces_first() {
        let first: Log = Log::default();
        let second: Log = Log::default();
        let mut dispatcher: EventDispatcher<(Quit, KeyDown)> = EventDispatcher::new();
        let _ = dispatcher.bind(recorder::<Quit>(&first, "first"));
        let _ = dispatcher.bind(recorder::<Quit>(&second, "second"));

        dispatcher.push(SdlEvent::Quit { timestamp: 10 });
        assert_eq!(dispatcher.poll(), 1);
        assert!(first.borrow().is_empty());
        assert_eq!(
            *second.borrow(),
            vec![String::from("second: Quit { timestamp: 10 }")]
        );
    }
}
