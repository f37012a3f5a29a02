//! Classification of external command outcomes.

/// Marker that `landscape-config` prints on failure, sometimes with a zero
/// exit code. Matched case-sensitively anywhere in the output.
pub const FAILURE_MARKER: &str = "Failure";

/// Outcome of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// `true` only if the command ran, exited zero, and printed no failure
    /// marker.
    pub success: bool,
    /// Combined stdout and stderr text.
    pub output: String,
    /// Exit code, if the process ran and was not killed by a signal.
    pub exit_code: Option<i32>,
}

impl ProcessResult {
    /// Classify a finished process.
    #[must_use]
    pub fn classify(exit_success: bool, exit_code: Option<i32>, output: String) -> Self {
        let success = exit_success && !output.contains(FAILURE_MARKER);
        Self {
            success,
            output,
            exit_code,
        }
    }

    /// A process that could not be started.
    #[must_use]
    pub fn spawn_failed(reason: String) -> Self {
        Self {
            success: false,
            output: reason,
            exit_code: None,
        }
    }
}

/// Join stdout and stderr into the single text stream that is inspected.
#[must_use]
pub fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(stderr));
    text
}
