//! Lifecycle of a single data category within one pipeline run.
//!
//! ```text
//! NotAttempted ──► Fetching(s) ──► Sufficient(s)            (terminal)
//!      │                │
//!      │                └────────► Insufficient(s) ──► Fetching(next)
//!      │                                  │
//!      └──────────────────────────────────┴──────────► Synthesized  (terminal)
//! ```

use crate::types::source::{DataCategory, SourceId};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "source", rename_all = "snake_case")]
pub enum CategoryState {
    NotAttempted,
    Fetching(SourceId),
    Sufficient(SourceId),
    Insufficient(SourceId),
    Synthesized,
}

impl CategoryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CategoryState::Sufficient(_) | CategoryState::Synthesized)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn permits(&self, next: &CategoryState) -> bool {
        use CategoryState::*;
        match (self, next) {
            (NotAttempted, Fetching(_)) | (NotAttempted, Synthesized) => true,
            (Fetching(a), Sufficient(b)) | (Fetching(a), Insufficient(b)) => a == b,
            (Insufficient(_), Fetching(_)) | (Insufficient(_), Synthesized) => true,
            _ => false,
        }
    }
}

/// How a single source attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// The request failed or the payload could not be read at all.
    Unavailable { reason: String },
    /// The payload was read but too few entries survived validation.
    Insufficient { valid: usize, discarded: usize },
    Sufficient { valid: usize, discarded: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub source: SourceId,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Everything that happened while resolving one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTrace {
    pub category: DataCategory,
    pub history: Vec<CategoryState>,
    pub attempts: Vec<Attempt>,
}

/// Records the state history of one category.
#[derive(Debug, Clone)]
pub(crate) struct CategoryTracker {
    category: DataCategory,
    history: Vec<CategoryState>,
}

impl CategoryTracker {
    pub(crate) fn new(category: DataCategory) -> Self {
        Self {
            category,
            history: vec![CategoryState::NotAttempted],
        }
    }

    pub(crate) fn state(&self) -> CategoryState {
        self.history
            .last()
            .copied()
            .unwrap_or(CategoryState::NotAttempted)
    }

    pub(crate) fn advance(&mut self, next: CategoryState) {
        let current = self.state();
        debug_assert!(
            current.permits(&next),
            "illegal transition for {}: {:?} -> {:?}",
            self.category,
            current,
            next
        );
        debug!("{}: {:?} -> {:?}", self.category, current, next);
        self.history.push(next);
    }

    pub(crate) fn finish(self, attempts: Vec<Attempt>) -> CategoryTrace {
        CategoryTrace {
            category: self.category,
            history: self.history,
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CategoryState::*;

    const A: SourceId = SourceId::GiewsEarthObservation;
    const B: SourceId = SourceId::ClimateKnowledgePortal;

    #[test]
    fn test_legal_transitions() {
        assert!(NotAttempted.permits(&Fetching(A)));
        assert!(NotAttempted.permits(&Synthesized));
        assert!(Fetching(A).permits(&Sufficient(A)));
        assert!(Fetching(A).permits(&Insufficient(A)));
        assert!(Insufficient(A).permits(&Fetching(B)));
        assert!(Insufficient(A).permits(&Synthesized));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for terminal in [Sufficient(A), Synthesized] {
            assert!(terminal.is_terminal());
            for next in [NotAttempted, Fetching(B), Sufficient(B), Insufficient(B), Synthesized] {
                assert!(!terminal.permits(&next));
            }
        }
    }

    #[test]
    fn test_outcome_must_match_fetched_source() {
        assert!(!Fetching(A).permits(&Sufficient(B)));
        assert!(!Fetching(A).permits(&Fetching(B)));
        assert!(!NotAttempted.permits(&Sufficient(A)));
    }

    #[test]
    fn test_tracker_history() {
        let mut tracker = CategoryTracker::new(DataCategory::MonthlyClimate);
        tracker.advance(Fetching(A));
        tracker.advance(Insufficient(A));
        tracker.advance(Fetching(B));
        tracker.advance(Sufficient(B));
        assert_eq!(tracker.state(), Sufficient(B));
        let trace = tracker.finish(Vec::new());
        assert_eq!(trace.category, DataCategory::MonthlyClimate);
        assert_eq!(
            trace.history,
            vec![NotAttempted, Fetching(A), Insufficient(A), Fetching(B), Sufficient(B)]
        );
    }

    #[test]
    fn test_attempt_serialization() {
        let attempt = Attempt {
            source: A,
            outcome: AttemptOutcome::Insufficient {
                valid: 11,
                discarded: 1,
            },
        };
        assert_eq!(
            serde_json::to_value(&attempt).unwrap(),
            serde_json::json!({
                "source": "giews_earth_observation",
                "outcome": "insufficient",
                "valid": 11,
                "discarded": 1
            })
        );
    }
}
