use std::process::ExitCode;

/// Process outcome of a keysync command.
///
/// | command  | `Failure` (1) when                                  |
/// |----------|-----------------------------------------------------|
/// | `scan`   | hardcoded text was found or a file failed to parse  |
/// | `sync`   | code uses keys the catalog lacks, or a parse failed |
/// | `health` | the score is below the threshold                    |
/// | `init`   | `.keysyncrc.json` already exists                    |
///
/// Anything that stops a command from finishing (invalid config, unreadable
/// messages directory, bad arguments) is `Error` (2).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Status of a command that ran to completion.
    pub fn from_findings(failed: bool) -> Self {
        if failed {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
