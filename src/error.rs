/// Errors surfaced by the generate-and-render flow.
///
/// Precondition failures (`MissingTrimester`, `InvalidTrimester`,
/// `MissingFile`) abort before any request is sent. The remaining variants
/// describe a request that was sent and failed; they are shown to the user
/// as `Error: <message>` and leave the dashboard ready for another attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// No trimester radio button is checked.
    MissingTrimester,
    /// The checked trimester value is not one the backend understands.
    InvalidTrimester(String),
    /// No upload file was chosen.
    MissingFile,
    /// The backend answered with a non-success status code.
    HttpStatus(u16),
    /// The request never produced a response.
    Network(String),
    /// The response body was not the expected metrics JSON.
    Decode(String),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTrimester => write!(f, "Please select a trimester first!"),
            Self::InvalidTrimester(value) => write!(f, "Unknown trimester: {value}"),
            Self::MissingFile => write!(f, "Please upload your GA Input Excel file first!"),
            Self::HttpStatus(_) => write!(f, "Failed to generate schedule!"),
            Self::Network(msg) => write!(f, "{msg}"),
            Self::Decode(msg) => write!(f, "invalid metrics response: {msg}"),
        }
    }
}

impl std::error::Error for GenerateError {}
