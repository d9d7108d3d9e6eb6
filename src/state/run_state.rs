/// Run state definitions for tracking export progress
///
/// A run moves through metadata resolution, count probing and one export
/// phase per non-empty resource type before finishing.
use std::fmt;

/// Represents the current state of an export run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunState {
    // ===== Active States =====
    /// Fetching the capability statement
    ResolvingMetadata,

    /// Issuing `_summary=count` probes for every supported type
    ProbingCounts,

    /// Paging through one resource type
    Exporting(String),

    // ===== Terminal States =====
    /// Every non-empty type was exported
    Done,

    /// A component returned an error and the run was aborted
    Failed,
}

impl RunState {
    /// Returns true if this is a terminal state (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if moving from this state to `next` is a legal transition
    ///
    /// Any active state may fail. Exporting states may follow probing or one
    /// another, and only an exporting or probing state may finish.
    pub fn can_transition_to(&self, next: &RunState) -> bool {
        match (self, next) {
            (from, _) if from.is_terminal() => false,
            (_, Self::Failed) => true,
            (Self::ResolvingMetadata, Self::ProbingCounts) => true,
            (Self::ProbingCounts, Self::Exporting(_)) => true,
            (Self::ProbingCounts, Self::Done) => true,
            (Self::Exporting(_), Self::Exporting(_)) => true,
            (Self::Exporting(_), Self::Done) => true,
            _ => false,
        }
    }

    /// Returns the resource type being exported, if any
    pub fn resource_type(&self) -> Option<&str> {
        match self {
            Self::Exporting(resource_type) => Some(resource_type.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolvingMetadata => write!(f, "resolving metadata"),
            Self::ProbingCounts => write!(f, "probing counts"),
            Self::Exporting(resource_type) => write!(f, "exporting {}", resource_type),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
