/// A single diagnostic line produced while syncing or validating.
///
/// Operations collect these instead of printing, so the CLI can route
/// them to stdout/stderr and tests can assert on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Progress message ("Syncing ui...", totals).
    Info(String),
    /// One file transferred or one import resolved.
    Success(String),
    /// Something noteworthy that did not fail a transfer.
    Warning(String),
    /// A transfer, listing or lookup that failed.
    Error(String),
}

impl Feedback {
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error(msg.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    /// Errors and warnings go to stderr; everything else to stdout.
    pub fn is_problem(&self) -> bool {
        self.is_error() || self.is_warning()
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Success(msg) | Self::Warning(msg) | Self::Error(msg) => msg,
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info(msg) => write!(f, "{msg}"),
            Self::Success(msg) => write!(f, "✓ {msg}"),
            Self::Warning(msg) => write!(f, "warning: {msg}"),
            Self::Error(msg) => write!(f, "✗ {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problems_are_errors_and_warnings() {
        assert!(Feedback::error("boom").is_problem());
        assert!(Feedback::warning("hmm").is_problem());
        assert!(!Feedback::info("syncing").is_problem());
        assert!(!Feedback::success("fetched a.css").is_problem());
    }

    #[test]
    fn display_marks_outcome() {
        assert_eq!(Feedback::info("Syncing ui...").to_string(), "Syncing ui...");
        assert_eq!(Feedback::success("Fetched ui/a.css").to_string(), "✓ Fetched ui/a.css");
        assert_eq!(Feedback::warning("truncated").to_string(), "warning: truncated");
        assert_eq!(Feedback::error("Failed").to_string(), "✗ Failed");
    }

    #[test]
    fn message_strips_marker() {
        assert_eq!(Feedback::error("Failed").message(), "Failed");
    }
}
