//! Requests handed to the executor and the results it sends back.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::TargetError;

/// Correlates a dispatched request with its asynchronous completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The bulk operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Copy,
    Move,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str("copy"),
            Self::Move => f.write_str("move"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// One bulk operation over absolute source paths.
///
/// Copy and move place each target under `destination` with its original
/// file name; delete ignores `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    id: RequestId,
    kind: OperationKind,
    targets: Vec<PathBuf>,
    destination: Option<PathBuf>,
}

impl OperationRequest {
    pub fn copy(id: RequestId, targets: Vec<PathBuf>, destination: PathBuf) -> Self {
        Self {
            id,
            kind: OperationKind::Copy,
            targets,
            destination: Some(destination),
        }
    }

    pub fn move_to(id: RequestId, targets: Vec<PathBuf>, destination: PathBuf) -> Self {
        Self {
            id,
            kind: OperationKind::Move,
            targets,
            destination: Some(destination),
        }
    }

    pub fn delete(id: RequestId, targets: Vec<PathBuf>) -> Self {
        Self {
            id,
            kind: OperationKind::Delete,
            targets,
            destination: None,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }
}

/// Aggregate outcome of a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every target succeeded (also the outcome of an empty request).
    Success,
    /// At least one target failed and at least one succeeded.
    PartialFailure,
    /// Every target failed.
    Failure,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::PartialFailure => f.write_str("partial failure"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// A target that failed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    pub path: PathBuf,
    pub error: TargetError,
}

/// Per-target results of a bulk operation, sorted by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    outcome: Outcome,
    succeeded: Vec<PathBuf>,
    failed: Vec<TargetFailure>,
}

impl OperationResult {
    /// Aggregates per-target results. Both lists are sorted by path, so
    /// the result does not depend on processing order.
    pub fn from_parts(mut succeeded: Vec<PathBuf>, mut failed: Vec<TargetFailure>) -> Self {
        succeeded.sort();
        failed.sort_by(|a, b| a.path.cmp(&b.path));

        let outcome = match (succeeded.is_empty(), failed.is_empty()) {
            (_, true) => Outcome::Success,
            (false, false) => Outcome::PartialFailure,
            (true, false) => Outcome::Failure,
        };
        Self {
            outcome,
            succeeded,
            failed,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn succeeded(&self) -> &[PathBuf] {
        &self.succeeded
    }

    pub fn failed(&self) -> &[TargetFailure] {
        &self.failed
    }

    /// `true` unless every target failed.
    pub fn any_succeeded(&self) -> bool {
        self.outcome != Outcome::Failure
    }
}

/// Completion message delivered on the result channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    pub id: RequestId,
    pub kind: OperationKind,
    pub result: OperationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(path: &str) -> TargetFailure {
        TargetFailure {
            path: PathBuf::from(path),
            error: TargetError::Collision,
        }
    }

    #[test]
    fn all_succeeded_is_success() {
        let result = OperationResult::from_parts(vec![PathBuf::from("/a")], vec![]);
        assert_eq!(result.outcome(), Outcome::Success);
        assert!(result.any_succeeded());
    }

    #[test]
    fn empty_result_is_success() {
        let result = OperationResult::from_parts(vec![], vec![]);
        assert_eq!(result.outcome(), Outcome::Success);
    }

    #[test]
    fn mixed_is_partial_failure() {
        let result = OperationResult::from_parts(vec![PathBuf::from("/a")], vec![failure("/b")]);
        assert_eq!(result.outcome(), Outcome::PartialFailure);
        assert!(result.any_succeeded());
    }

    #[test]
    fn all_failed_is_failure() {
        let result = OperationResult::from_parts(vec![], vec![failure("/a")]);
        assert_eq!(result.outcome(), Outcome::Failure);
        assert!(!result.any_succeeded());
    }

    #[test]
    fn aggregation_is_order_independent() {
        let forward = OperationResult::from_parts(
            vec![PathBuf::from("/a"), PathBuf::from("/c")],
            vec![failure("/b"), failure("/d")],
        );
        let reversed = OperationResult::from_parts(
            vec![PathBuf::from("/c"), PathBuf::from("/a")],
            vec![failure("/d"), failure("/b")],
        );
        assert_eq!(forward, reversed);
    }

    #[test]
    fn request_id_display() {
        assert_eq!(RequestId::new(7).to_string(), "#7");
    }

    #[test]
    fn delete_request_has_no_destination() {
        let request = OperationRequest::delete(RequestId::new(1), vec![PathBuf::from("/x")]);
        assert_eq!(request.kind(), OperationKind::Delete);
        assert!(request.destination().is_none());
    }
}
