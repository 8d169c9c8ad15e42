//! Append-only history of test-session accuracy scores.

/// Ordered record of accuracy fractions in `[0, 1]`, one per completed
/// test session. Scores are only ever appended; the whole history is
/// cleared when the owning network is reset.
#[derive(Debug, Clone, Default)]
pub struct Performance {
    scores: Vec<f64>,
}

impl Performance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one accuracy fraction.
    pub fn push(&mut self, score: f64) {
        self.scores.push(score);
    }

    /// Scores in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Best score ever recorded, 0.0 when the history is empty.
    pub fn best(&self) -> f64 {
        self.scores.iter().copied().fold(0.0, f64::max)
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_is_zero_when_empty() {
        assert_eq!(Performance::new().best(), 0.0);
    }

    #[test]
    fn best_is_maximum_ever_pushed() {
        let mut perf = Performance::new();
        perf.push(0.42);
        perf.push(0.91);
        perf.push(0.73);
        assert_eq!(perf.best(), 0.91);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut perf = Performance::new();
        perf.push(0.5);
        perf.push(0.25);
        perf.push(0.75);
        let collected: Vec<f64> = perf.iter().collect();
        assert_eq!(collected, vec![0.5, 0.25, 0.75]);
    }

    #[test]
    fn clear_empties_the_history() {
        let mut perf = Performance::new();
        perf.push(0.8);
        perf.clear();
        assert!(perf.is_empty());
        assert_eq!(perf.best(), 0.0);
    }
}
