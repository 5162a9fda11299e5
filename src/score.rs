//! Score accumulator
//!
//! The simulation only ever adds to it; the UI reads the total.

use serde::{Deserialize, Serialize};

/// Running score for the current attempt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    total: u32,
}

impl Score {
    pub fn new() -> Self {
        Self { total: 0 }
    }

    /// Award points
    pub fn add_score(&mut self, amount: u32) {
        self.total = self.total.saturating_add(amount);
        log::info!("Score: {}", self.total);
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Back to zero (restart)
    pub fn reset(&mut self) {
        self.total = 0;
    }

    /// HUD label
    pub fn label(&self) -> String {
        format!("Score: {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_and_resets() {
        let mut score = Score::new();
        assert_eq!(score.label(), "Score: 0");
        score.add_score(100);
        score.add_score(250);
        assert_eq!(score.total(), 350);
        assert_eq!(score.label(), "Score: 350");
        score.reset();
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn test_saturates() {
        let mut score = Score::new();
        score.add_score(u32::MAX);
        score.add_score(1);
        assert_eq!(score.total(), u32::MAX);
    }
}
