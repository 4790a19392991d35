/// One animated clear-color channel: a value in [0, 1] advanced by a fixed
/// velocity whose sign flips at the inclusive bounds (ping-pong).
#[derive(Debug, Copy, Clone)]
struct Channel {
    value: f32,
    velocity: f32,
    direction: f32,
}

impl Channel {
    fn step(&mut self) -> f32 {
        self.value += self.direction * self.velocity;
        // Inclusive bounds: the flip happens on the step that reaches or
        // crosses an edge, so overshoot is at most one velocity step.
        if self.value >= 1.0 || self.value <= 0.0 {
            self.direction = -self.direction;
        }
        self.value
    }
}

/// The three animated clear channels. Pure CPU state, recomputed every
/// frame, with no GPU-side persistent representation; alpha is fixed at 1.0
/// by the frame plan.
#[derive(Debug, Clone)]
pub struct ClearPulse {
    channels: [Channel; 3],
}

impl ClearPulse {
    /// Starts all channels at 0, moving upward with the given velocities.
    pub fn new(velocities: [f32; 3]) -> Self {
        Self {
            channels: velocities.map(|velocity| Channel {
                value: 0.0,
                velocity,
                direction: 1.0,
            }),
        }
    }

    /// Advances all channels by one frame and returns the resulting RGB.
    pub fn step(&mut self) -> [f32; 3] {
        [
            self.channels[0].step(),
            self.channels[1].step(),
            self.channels[2].step(),
        ]
    }
}

impl Default for ClearPulse {
    fn default() -> Self {
        // Slow, mutually prime-ish per-frame velocities so the fade stays
        // visible and the channels drift out of phase.
        Self::new([0.00005, 0.00002, 0.00001])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(velocity: f32) -> ClearPulse {
        ClearPulse::new([velocity, 0.0, 0.0])
    }

    // ── bounce behavior ───────────────────────────────────────────────────

    #[test]
    fn rises_from_zero_by_velocity_steps() {
        let mut pulse = single(0.25);
        assert_eq!(pulse.step()[0], 0.25);
        assert_eq!(pulse.step()[0], 0.5);
        assert_eq!(pulse.step()[0], 0.75);
    }

    #[test]
    fn strictly_decreases_after_crossing_one() {
        let mut pulse = single(0.4);
        let mut value = pulse.step()[0];
        while value < 1.0 {
            value = pulse.step()[0];
        }
        let mut prev = value;
        for _ in 0..3 {
            let next = pulse.step()[0];
            assert!(next < prev, "expected descent after the upper bound");
            prev = next;
        }
    }

    #[test]
    fn strictly_increases_after_crossing_zero() {
        let mut pulse = single(0.4);
        // Ride the wave through one full descent.
        let mut value = pulse.step()[0];
        while value < 1.0 {
            value = pulse.step()[0];
        }
        while value > 0.0 {
            value = pulse.step()[0];
        }
        let mut prev = value;
        for _ in 0..3 {
            let next = pulse.step()[0];
            assert!(next > prev, "expected ascent after the lower bound");
            prev = next;
        }
    }

    #[test]
    fn overshoot_is_bounded_by_one_step() {
        let velocity = 0.37;
        let mut pulse = single(velocity);
        for _ in 0..1000 {
            let value = pulse.step()[0];
            assert!(value >= -velocity - 1e-6);
            assert!(value <= 1.0 + velocity + 1e-6);
        }
    }
}
