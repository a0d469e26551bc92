//! Exit codes of the `certloc` binary.
//!
//! Library errors supply their own codes through `exit_code()`:
//! 1 = key, OID or CSCA not found, 2 = invalid input or config,
//! 3 = remote SKI-PEM fetch failed.

pub const SUCCESS: i32 = 0;
pub const INVALID_INPUT: i32 = 2; // Anything not raised by the libraries (I/O, JSON)
