/// One contiguous span of the shared index buffer, drawn with a single
/// indexed call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawRange {
    pub first_index: u32,
    pub index_count: u32,
}

impl DrawRange {
    pub const fn new(first_index: u32, index_count: u32) -> Self {
        Self {
            first_index,
            index_count,
        }
    }

    /// End of the span, exclusive.
    pub fn end(&self) -> u32 {
        self.first_index + self.index_count
    }
}

/// A single command of a frame, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCmd {
    /// Clear the render target to (r, g, b, 1.0) and the depth-stencil
    /// target to depth 1.0 / stencil 0. Always precedes every draw.
    ClearTargets { rgb: [f32; 3] },
    /// Indexed draw over the bound geometry. Draw order decides overwrite
    /// order for same-depth fragments; the depth test makes final
    /// visibility order-independent for differing depths.
    DrawIndexed(DrawRange),
}

/// Everything one frame issues, in fixed order: clear, then the scene's
/// draw ranges, then present (implicit in execution).
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub cmds: Vec<FrameCmd>,
}

impl FramePlan {
    pub fn build(rgb: [f32; 3], draws: &[DrawRange]) -> Self {
        let mut cmds = Vec::with_capacity(1 + draws.len());
        cmds.push(FrameCmd::ClearTargets { rgb });
        cmds.extend(draws.iter().copied().map(FrameCmd::DrawIndexed));
        Self { cmds }
    }

    /// The clear color of this frame.
    pub fn clear_rgb(&self) -> [f32; 3] {
        match self.cmds.first() {
            Some(FrameCmd::ClearTargets { rgb }) => *rgb,
            _ => [0.0, 0.0, 0.0],
        }
    }

    /// Iterator over the indexed draws, in issue order.
    pub fn draws(&self) -> impl Iterator<Item = DrawRange> + '_ {
        self.cmds.iter().filter_map(|cmd| match cmd {
            FrameCmd::DrawIndexed(range) => Some(*range),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_always_precedes_every_draw() {
        let plan = FramePlan::build([0.1, 0.2, 0.3], &[DrawRange::new(0, 6)]);
        assert!(matches!(plan.cmds[0], FrameCmd::ClearTargets { .. }));
        assert!(plan.cmds[1..]
            .iter()
            .all(|cmd| matches!(cmd, FrameCmd::DrawIndexed(_))));
    }

    #[test]
    fn draws_preserve_issue_order() {
        let ranges = [DrawRange::new(6, 6), DrawRange::new(0, 6)];
        let plan = FramePlan::build([0.0; 3], &ranges);
        let collected: Vec<_> = plan.draws().collect();
        assert_eq!(collected, ranges);
    }

    #[test]
    fn clear_rgb_round_trips() {
        let plan = FramePlan::build([0.5, 0.25, 1.0], &[]);
        assert_eq!(plan.clear_rgb(), [0.5, 0.25, 1.0]);
    }
}
