//! Process exit codes.
//!
//! - 0: success
//! - 1: any error
//! - 2: corrupted index or relational data; the database needs a rebuild

use lexigraph_resolver::ResolverError;
use lexigraph_storage::StorageError;

/// Exit codes returned by the `lexigraph` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CliExitCode {
    Success = 0,
    Error = 1,
    Corruption = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

/// True when any error in the chain reports corrupted stored data.
pub fn is_corruption_indicator(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        if let Some(storage) = cause.downcast_ref::<StorageError>() {
            return matches!(storage, StorageError::CorruptedData { .. });
        }
        matches!(
            cause.downcast_ref::<ResolverError>(),
            Some(ResolverError::Storage(StorageError::CorruptedData { .. }))
        )
    })
}

pub fn exit_code_for_error(err: &anyhow::Error) -> CliExitCode {
    if is_corruption_indicator(err) {
        CliExitCode::Corruption
    } else {
        CliExitCode::Error
    }
}
