//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// CPG used when scenarios create volumes.
pub const CPG_NAME: &str = "SSD_r6";

/// Volume set used by QoS and membership scenarios.
pub const SET_NAME: &str = "vvset-test";

/// Remote-copy group used by janitor scenarios.
pub const GROUP_NAME: &str = "rcg-test";
