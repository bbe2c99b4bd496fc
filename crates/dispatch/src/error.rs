/// Reply sent when the leading token of a message is empty.
pub const NOT_UNDERSTOOD: &str = "I don't understand that.";

/// Reply sent when no command and no raw middleware handled the message.
pub fn not_recognized(token: &str) -> String {
    format!("I don't recognize \"{token}\".")
}

/// Crate-wide result type for dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A command name collided (case-insensitively) with an existing one.
    #[error("command already registered: {name}")]
    DuplicateCommand { name: String },

    /// A handler or middleware step failed while dispatching. The display
    /// text is the only fault detail callers ever see.
    #[error("Something went wrong.")]
    Failed,

    /// Every response handle was dropped without responding. Shown to
    /// users like [`Error::Failed`].
    #[error("Something went wrong.")]
    NoResponse,
}

impl Error {
    #[must_use]
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }
}
