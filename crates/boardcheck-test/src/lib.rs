//! boardcheck-test - Regression test framework for boardcheck
//!
//! Every `tests/*_reg.rs` suite in the workspace drives a [`RegParams`],
//! which numbers each check, records failures instead of panicking on the
//! first one, and reports them all from [`RegParams::cleanup`]. Three modes
//! are supported:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run checks without golden comparison
//!
//! # Usage
//!
//! ```ignore
//! use boardcheck_test::RegParams;
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(3.0, labeling.num_labels() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // boardcheck-test is at crates/boardcheck-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
