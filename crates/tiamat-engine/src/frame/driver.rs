use std::collections::VecDeque;

use crate::input::{Event, EventDispatch, Reaction};

use super::{ClearPulse, DrawRange, FramePlan};

/// Frame-loop state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Waiting on OS input.
    Idle,
    /// One frame in flight.
    Rendering,
    /// Terminal; all resources are torn down after this.
    Terminated,
}

/// What the caller should do after one pump.
pub enum Pump {
    /// One pending event was drained and dispatched; pump again.
    Handled(Reaction),
    /// No event was pending: render this plan, then call
    /// [`LoopDriver::finish_frame`].
    Render(FramePlan),
    /// A quit event arrived (or already had); tear down.
    Shutdown,
}

/// The loop's decision core, independent of any window system.
///
/// Each pump drains exactly one pending event, or — when none is pending —
/// transitions Idle to Rendering and emits one frame plan: advanced clear
/// channels first, then the scene's draw ranges in order.
pub struct LoopDriver {
    state: LoopState,
    pulse: ClearPulse,
    draws: Vec<DrawRange>,
}

impl LoopDriver {
    pub fn new(pulse: ClearPulse, draws: Vec<DrawRange>) -> Self {
        Self {
            state: LoopState::Idle,
            pulse,
            draws,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn pump(&mut self, pending: &mut VecDeque<Event>, dispatch: &mut EventDispatch) -> Pump {
        if self.state == LoopState::Terminated {
            return Pump::Shutdown;
        }

        match pending.pop_front() {
            Some(Event::Quit) => {
                self.state = LoopState::Terminated;
                Pump::Shutdown
            }
            Some(event) => {
                self.state = LoopState::Idle;
                Pump::Handled(dispatch.dispatch(&event))
            }
            None => {
                self.state = LoopState::Rendering;
                let rgb = self.pulse.step();
                Pump::Render(FramePlan::build(rgb, &self.draws))
            }
        }
    }

    /// Marks the in-flight frame as presented. Mid-frame cancellation is
    /// not supported; quit is observed at pump granularity only.
    pub fn finish_frame(&mut self) {
        if self.state == LoopState::Rendering {
            self.state = LoopState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameCmd;
    use crate::input::Key;

    fn two_quad_driver() -> LoopDriver {
        LoopDriver::new(
            ClearPulse::new([0.1, 0.2, 0.3]),
            vec![DrawRange::new(0, 6), DrawRange::new(6, 6)],
        )
    }

    // ── rendering iterations ──────────────────────────────────────────────

    #[test]
    fn empty_queue_produces_one_frame_plan() {
        let mut driver = two_quad_driver();
        let mut pending = VecDeque::new();
        let mut dispatch = EventDispatch::new();

        match driver.pump(&mut pending, &mut dispatch) {
            Pump::Render(plan) => {
                assert!(matches!(plan.cmds[0], FrameCmd::ClearTargets { .. }));
                assert_eq!(driver.state(), LoopState::Rendering);
                driver.finish_frame();
                assert_eq!(driver.state(), LoopState::Idle);
            }
            _ => panic!("expected a render tick"),
        }
    }

    #[test]
    fn two_quad_scene_issues_exactly_two_draws() {
        // Suspicious-duplicate guard: a third range covering one of these
        // spans again would draw the same quad twice to no visible effect.
        // Exactly two draws for two quads is the contract.
        let mut driver = two_quad_driver();
        let mut pending = VecDeque::new();
        let mut dispatch = EventDispatch::new();

        let Pump::Render(plan) = driver.pump(&mut pending, &mut dispatch) else {
            panic!("expected a render tick");
        };

        let draws: Vec<_> = plan.draws().collect();
        assert_eq!(draws.len(), 2);
        assert_eq!((draws[0].first_index, draws[0].end()), (0, 6));
        assert_eq!((draws[1].first_index, draws[1].end()), (6, 12));
        // Depth-stencil clear is the plan's first command, before both.
        assert!(matches!(plan.cmds[0], FrameCmd::ClearTargets { .. }));
    }

    #[test]
    fn clear_channels_advance_between_frames() {
        let mut driver = two_quad_driver();
        let mut pending = VecDeque::new();
        let mut dispatch = EventDispatch::new();

        let Pump::Render(first) = driver.pump(&mut pending, &mut dispatch) else {
            panic!("expected a render tick");
        };
        driver.finish_frame();
        let Pump::Render(second) = driver.pump(&mut pending, &mut dispatch) else {
            panic!("expected a render tick");
        };

        assert_ne!(first.clear_rgb(), second.clear_rgb());
    }

    // ── event draining ────────────────────────────────────────────────────

    #[test]
    fn one_event_is_drained_per_pump() {
        let mut driver = two_quad_driver();
        let mut pending: VecDeque<Event> =
            [Event::Other, Event::KeyDown(Key::Space)].into_iter().collect();
        let mut dispatch = EventDispatch::new();

        assert!(matches!(
            driver.pump(&mut pending, &mut dispatch),
            Pump::Handled(_)
        ));
        assert_eq!(pending.len(), 1);
        assert_eq!(driver.state(), LoopState::Idle);
    }

    #[test]
    fn handler_reactions_are_surfaced() {
        let mut driver = two_quad_driver();
        let mut pending: VecDeque<Event> = [Event::KeyDown(Key::Escape)].into_iter().collect();
        let mut dispatch = EventDispatch::new().on_key_down(|key| {
            if key == Key::Escape {
                Reaction::RequestClose
            } else {
                Reaction::None
            }
        });

        match driver.pump(&mut pending, &mut dispatch) {
            Pump::Handled(reaction) => assert_eq!(reaction, Reaction::RequestClose),
            _ => panic!("expected the event to be handled"),
        }
    }

    // ── termination ───────────────────────────────────────────────────────

    #[test]
    fn quit_before_any_render_skips_rendering_entirely() {
        let mut driver = two_quad_driver();
        let mut pending: VecDeque<Event> = [Event::Quit].into_iter().collect();
        let mut dispatch = EventDispatch::new();

        assert!(matches!(
            driver.pump(&mut pending, &mut dispatch),
            Pump::Shutdown
        ));
        assert_eq!(driver.state(), LoopState::Terminated);
    }

    #[test]
    fn terminated_is_terminal() {
        let mut driver = two_quad_driver();
        let mut pending: VecDeque<Event> = [Event::Quit].into_iter().collect();
        let mut dispatch = EventDispatch::new();

        driver.pump(&mut pending, &mut dispatch);
        // Even with an empty queue, no further render ticks happen.
        assert!(matches!(
            driver.pump(&mut pending, &mut dispatch),
            Pump::Shutdown
        ));
        assert_eq!(driver.state(), LoopState::Terminated);
    }

    #[test]
    fn quit_behind_other_events_still_terminates() {
        let mut driver = two_quad_driver();
        let mut pending: VecDeque<Event> =
            [Event::Other, Event::Quit].into_iter().collect();
        let mut dispatch = EventDispatch::new();

        assert!(matches!(
            driver.pump(&mut pending, &mut dispatch),
            Pump::Handled(_)
        ));
        assert!(matches!(
            driver.pump(&mut pending, &mut dispatch),
            Pump::Shutdown
        ));
    }
}
