//! Provenance tag for values returned by total operations.

use serde::Serialize;

// == Sourced ==
/// A value tagged with where it came from.
///
/// Client operations never fail; when the upstream is unusable they return
/// their documented substitute as `Fallback`, so callers that care can tell
/// synthetic data from real data without an error path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "data", rename_all = "snake_case")]
pub enum Sourced<T> {
    /// Produced by the upstream (fresh or from cache)
    Live(T),
    /// Produced by the local fallback
    Fallback(T),
}

impl<T> Sourced<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Sourced::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Sourced::Live(v) | Sourced::Fallback(v) => v,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Sourced::Live(v) | Sourced::Fallback(v) => v,
        }
    }

    pub fn source_label(&self) -> &'static str {
        match self {
            Sourced::Live(_) => "live",
            Sourced::Fallback(_) => "fallback",
        }
    }
}
