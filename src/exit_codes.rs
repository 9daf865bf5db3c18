//! Exit code constants for the autoserver CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config file, invalid state)
//! - 2: Configuration error (missing template, unresolved placeholder)
//! - 3: Filesystem failure (permission denied, missing parent, disk full)
//! - 4: External command failure (git, virtualenv, sudo)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config file, or invalid state.
pub const USER_ERROR: i32 = 1;

/// Template configuration error: missing template source or unresolved placeholder.
pub const CONFIGURATION_FAILURE: i32 = 2;

/// Filesystem failure while writing an artifact or link.
pub const FILESYSTEM_FAILURE: i32 = 3;

/// An external tool could not be run or exited unsuccessfully.
pub const COMMAND_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            CONFIGURATION_FAILURE,
            FILESYSTEM_FAILURE,
            COMMAND_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
