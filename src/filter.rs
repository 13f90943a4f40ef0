use crate::domain::Severity;

/// Decides whether an entry's severity qualifies for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFilter {
    levels: Vec<Severity>,
}

impl LevelFilter {
    /// Qualify every severity ranked at or above `level`.
    pub fn threshold(level: Severity) -> Self {
        Self {
            levels: level.threshold().to_vec(),
        }
    }

    /// Qualify exactly `level`; weaker and stronger severities are suppressed.
    pub fn exact(level: Severity) -> Self {
        Self {
            levels: vec![level],
        }
    }

    pub fn is_qualifying(&self, level: Severity) -> bool {
        self.levels.contains(&level)
    }

    pub fn levels(&self) -> &[Severity] {
        &self.levels
    }
}

impl Default for LevelFilter {
    // The hook's default qualifying set is the single Warn severity.
    fn default() -> Self {
        Self::exact(Severity::Warn)
    }
}
