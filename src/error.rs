use core::fmt;

/// Recoverable misuse of the sandbox. None of these leave the grid or a running search in an
/// inconsistent state; the offending call is simply not carried out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// An algorithm was selected while the start or the end cell was unset.
    MissingEndpoints,
    /// A role label other than `Block`, `Start` or `End` was given.
    UnknownRole(String),
    /// An algorithm label that does not name one of the available solvers was given.
    UnknownAlgorithm(String),
    /// The best path was requested before the search reached the end cell.
    PathNotReady,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UsageError::MissingEndpoints => {
                write!(f, "both a start and an end cell must be set before searching")
            }
            UsageError::UnknownRole(role) => write!(f, "no such cell role: {role:?}"),
            UsageError::UnknownAlgorithm(name) => write!(f, "no such algorithm: {name:?}"),
            UsageError::PathNotReady => write!(f, "the search has not reached the end cell"),
        }
    }
}

impl std::error::Error for UsageError {}
