use std::fmt;
use std::time::Duration;

/// Detailed evaluation report returned by
/// [`Rule::satisfied_detailed()`](super::Rule::satisfied_detailed).
///
/// Contains the result, every key looked up in the order the lookups
/// happened (repeats included), and the wall-clock duration of the evaluation.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    satisfied: bool,
    lookups: Vec<String>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(satisfied: bool, lookups: Vec<String>, duration: Duration) -> Self {
        Self {
            satisfied,
            lookups,
            duration,
        }
    }

    /// Same answer as [`Rule::satisfied()`](super::Rule::satisfied).
    #[must_use]
    pub fn satisfied(&self) -> bool {
        self.satisfied
    }

    /// Keys passed to the read capability, in call order.
    #[must_use]
    pub fn lookups(&self) -> &[String] {
        &self.lookups
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Satisfied: {}", self.satisfied)?;
        if self.lookups.is_empty() {
            writeln!(f, "Lookups: (none)")?;
        } else {
            writeln!(f, "Lookups: {}", self.lookups.join(", "))?;
        }
        write!(f, "Duration: {:?}", self.duration)
    }
}
