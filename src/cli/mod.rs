//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `order` | Compute the recommended order for a request |
//! | `check` | Validate a request and check for cycles |
//! | `graph` | Show dependencies, dependents and in-degrees |
//! | `strategies` | List tie-break strategies |
//! | `init` | Write a default `.ordo.toml` |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Exit Codes
//!
//! `0` on success, `3` for invalid input, `4` for a dependency cycle and `1`
//! for anything else.

mod app;
mod output;
mod order;
mod inspect;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};

use crate::domain::{FailureKind, OrderingError};
use crate::storage::RequestError;

/// Maps an error returned by [`run`] to a process exit code
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<OrderingError>() {
        return e.kind().exit_code();
    }
    if err.downcast_ref::<RequestError>().is_some() {
        return FailureKind::InvalidInput.exit_code();
    }
    FailureKind::Internal.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InputError;
    use anyhow::Context;

    #[test]
    fn exit_codes_follow_failure_kind() {
        let invalid = anyhow::Error::new(OrderingError::from(InputError::NoTasks));
        assert_eq!(exit_code(&invalid), 3);

        let cycle = anyhow::Error::new(OrderingError::UnsatisfiableGraph {
            cycle: vec!["A".into(), "B".into(), "A".into()],
        });
        assert_eq!(exit_code(&cycle), 4);

        assert_eq!(exit_code(&anyhow::anyhow!("disk on fire")), 1);
    }

    #[test]
    fn exit_code_sees_through_context() {
        let parse: Result<(), RequestError> = Err(RequestError::Parse {
            format: "JSON",
            message: "expected value".into(),
        });
        let err = parse.context("Invalid request file: x.json").unwrap_err();
        assert_eq!(exit_code(&err), 3);
    }
}
