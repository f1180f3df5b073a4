//! Process exit codes reported by the CLI.
//!
//! The exit code is the only structured error signal callers get, so each
//! category keeps a fixed numeric value.

/// Exit status categories of a CLI invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    /// The command completed.
    Success,
    /// An error not described by any other category.
    GenericError,
    /// Reading or writing a local file failed, or a remote file could not be downloaded.
    IoError,
    /// The user supplied invalid input or configuration.
    ClientError,
    /// The webservice rejected the request.
    ApiError,
    /// The command was valid but could not be carried out, e.g. publishing a published entry.
    CommandError,
    /// The requested entry or local file does not exist.
    EntryNotFound,
    /// The webservice could not be reached.
    ConnectionError,
}

impl ExitCode {
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::GenericError => 1,
            Self::IoError => 3,
            Self::ClientError => 4,
            Self::ApiError => 6,
            Self::CommandError => 10,
            Self::EntryNotFound => 12,
            Self::ConnectionError => 150,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExitCode;

    #[test]
    fn categories_keep_their_numeric_values() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::GenericError.code(), 1);
        assert_eq!(ExitCode::IoError.code(), 3);
        assert_eq!(ExitCode::ClientError.code(), 4);
        assert_eq!(ExitCode::ApiError.code(), 6);
        assert_eq!(ExitCode::CommandError.code(), 10);
        assert_eq!(ExitCode::EntryNotFound.code(), 12);
        assert_eq!(ExitCode::ConnectionError.code(), 150);
    }
}
