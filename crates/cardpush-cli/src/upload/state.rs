//! Import run state

/// Lifecycle of one import run
///
/// `Done` and `Failed` are terminal. A failed run is resumed by starting a
/// new one with `start_index` set to the failed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Extracting,
    GeneratingIds,
    /// About to upload the item at this 0-based index
    Uploading(usize),
    Done,
    /// The item at this 0-based index was not uploaded
    Failed(usize),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed(_))
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "not started"),
            RunState::Extracting => write!(f, "extracting records"),
            RunState::GeneratingIds => write!(f, "generating identifiers"),
            RunState::Uploading(index) => write!(f, "uploading #{}", index + 1),
            RunState::Done => write!(f, "done"),
            RunState::Failed(index) => write!(f, "failed at #{}", index + 1),
        }
    }
}
