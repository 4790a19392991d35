use super::{Event, Key};

/// Reaction produced by an event handler.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Reaction {
    /// Nothing to do; the loop continues.
    None,
    /// Ask the window layer to close (it owns any confirmation policy).
    RequestClose,
}

type KeyHandler = Box<dyn FnMut(Key) -> Reaction>;
type OtherHandler = Box<dyn FnMut() -> Reaction>;

/// Explicit dispatch table keyed by event kind.
///
/// Replaces a process-wide window procedure: the frame loop owns no
/// handling policy of its own and routes each drained event through this
/// table. `Quit` is not dispatched — it is terminal and handled by the loop
/// driver itself.
#[derive(Default)]
pub struct EventDispatch {
    on_key_down: Option<KeyHandler>,
    on_other: Option<OtherHandler>,
}

impl EventDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key_down(mut self, handler: impl FnMut(Key) -> Reaction + 'static) -> Self {
        self.on_key_down = Some(Box::new(handler));
        self
    }

    pub fn on_other(mut self, handler: impl FnMut() -> Reaction + 'static) -> Self {
        self.on_other = Some(Box::new(handler));
        self
    }

    /// Routes one event to its handler. Events without a registered handler
    /// produce no reaction.
    pub fn dispatch(&mut self, event: &Event) -> Reaction {
        match event {
            Event::Quit => Reaction::None,
            Event::KeyDown(key) => match self.on_key_down.as_mut() {
                Some(handler) => handler(*key),
                None => Reaction::None,
            },
            Event::Other => match self.on_other.as_mut() {
                Some(handler) => handler(),
                None => Reaction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_events_route_to_the_key_handler() {
        let mut dispatch = EventDispatch::new().on_key_down(|key| {
            if key == Key::Escape {
                Reaction::RequestClose
            } else {
                Reaction::None
            }
        });

        assert_eq!(
            dispatch.dispatch(&Event::KeyDown(Key::Escape)),
            Reaction::RequestClose
        );
        assert_eq!(
            dispatch.dispatch(&Event::KeyDown(Key::Space)),
            Reaction::None
        );
    }

    #[test]
    fn unhandled_kinds_produce_no_reaction() {
        let mut dispatch = EventDispatch::new();
        assert_eq!(dispatch.dispatch(&Event::Other), Reaction::None);
        assert_eq!(
            dispatch.dispatch(&Event::KeyDown(Key::Enter)),
            Reaction::None
        );
    }

    #[test]
    fn quit_is_never_routed_to_handlers() {
        let mut dispatch = EventDispatch::new()
            .on_key_down(|_| Reaction::RequestClose)
            .on_other(|| Reaction::RequestClose);
        assert_eq!(dispatch.dispatch(&Event::Quit), Reaction::None);
    }
}
