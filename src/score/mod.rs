use serde::Deserialize;

/// Points ladder for finishing positions. Position 1 earns `ladder[0]`, and any
/// position past the end of the ladder earns 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoreTable {
    ladder: Vec<u32>,
}

impl Default for ScoreTable {
    /// The fixed season ladder: 1st = 10 points down to 10th = 1 point.
    fn default() -> Self {
        ScoreTable {
            ladder: (1..=10).rev().collect(),
        }
    }
}

impl ScoreTable {
    /// Points for a 1-based finishing position. Position 0 and positions past
    /// the ladder score 0; the overflow rule is explicit here, not a
    /// lookup-miss fallback.
    pub fn points_for(&self, position: u32) -> u32 {
        match position {
            0 => 0,
            p => self
                .ladder
                .get(p as usize - 1)
                .copied()
                .unwrap_or(0),
        }
    }
}
