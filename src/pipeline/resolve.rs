//! Tries a category's sources in priority order and falls back when none
//! of them yields a sufficient result.

use crate::pipeline::state::{
    Attempt, AttemptOutcome, CategoryState, CategoryTrace, CategoryTracker,
};
use crate::pipeline::sufficiency::Evaluation;
use crate::sources::error::SourceError;
use crate::types::provenance::Provenance;
use crate::types::source::{DataCategory, SourceId};
use log::{debug, info, warn};
use std::future::Future;

/// The settled value of one category and how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub provenance: Provenance,
    pub trace: CategoryTrace,
}

impl<T> Resolved<T> {
    /// Maps the resolved value, keeping its provenance and history.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            provenance: self.provenance,
            trace: self.trace,
        }
    }
}

/// Resolves `category` by fetching from each of its sources in turn.
///
/// The first source whose result `evaluate` accepts wins outright; results of
/// different sources are never merged. A fetch error only moves on to the next
/// source. When every source has been tried, `fallback` supplies the value.
pub async fn resolve<R, T, Fetch, Fut, Eval, Fallback>(
    category: DataCategory,
    mut fetch: Fetch,
    mut evaluate: Eval,
    fallback: Fallback,
) -> Resolved<T>
where
    Fetch: FnMut(SourceId) -> Fut,
    Fut: Future<Output = Result<R, SourceError>>,
    Eval: FnMut(R) -> Evaluation<T>,
    Fallback: FnOnce() -> (T, Provenance),
{
    let mut tracker = CategoryTracker::new(category);
    let mut attempts = Vec::new();

    for &source in category.priority() {
        tracker.advance(CategoryState::Fetching(source));

        let outcome = match fetch(source).await {
            Ok(raw) => match evaluate(raw) {
                Evaluation::Sufficient {
                    value,
                    valid,
                    discarded,
                } => {
                    info!(
                        "{}: using {} ({} entries, {} discarded)",
                        category, source, valid, discarded
                    );
                    tracker.advance(CategoryState::Sufficient(source));
                    attempts.push(Attempt {
                        source,
                        outcome: AttemptOutcome::Sufficient { valid, discarded },
                    });
                    return Resolved {
                        value,
                        provenance: Provenance::External { source },
                        trace: tracker.finish(attempts),
                    };
                }
                Evaluation::Insufficient { valid, discarded } => {
                    info!(
                        "{}: {} returned insufficient data ({} valid, {} discarded)",
                        category, source, valid, discarded
                    );
                    AttemptOutcome::Insufficient { valid, discarded }
                }
            },
            Err(e) => {
                warn!("{}: {} unavailable: {}", category, source, e);
                AttemptOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        tracker.advance(CategoryState::Insufficient(source));
        attempts.push(Attempt { source, outcome });
    }

    let (value, provenance) = fallback();
    debug!("{}: falling back to {:?}", category, provenance);
    tracker.advance(CategoryState::Synthesized);
    Resolved {
        value,
        provenance,
        trace: tracker.finish(attempts),
    }
}

/// Settles a category that has no external source with a fixed value.
pub fn settle<T>(category: DataCategory, value: T, provenance: Provenance) -> Resolved<T> {
    debug_assert!(category.priority().is_empty());
    let mut tracker = CategoryTracker::new(category);
    tracker.advance(CategoryState::Synthesized);
    Resolved {
        value,
        provenance,
        trace: tracker.finish(Vec::new()),
    }
}
