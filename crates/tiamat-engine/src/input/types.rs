/// Keyboard key identifier.
///
/// Intentionally minimal: the harness only routes a handful of keys. The
/// runtime maps platform keycodes into these variants and falls back to
/// `Key::Unknown` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Unknown(u32),
}

/// OS-level event drained by the frame loop, one per loop iteration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Event {
    /// Terminal: moves the loop to its Terminated state.
    Quit,
    /// A key was pressed. The designated exit key is routed back to the
    /// window layer as a close request, never a direct quit.
    KeyDown(Key),
    /// Any other translated event; dispatched but otherwise ignored.
    Other,
}
