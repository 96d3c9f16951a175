use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    /// The classifier result did not contain the expected candidate label.
    /// Treated as a hard error, never silently defaulted.
    #[error("candidate label '{label}' missing from classification result")]
    MissingLabel { label: String },
}
