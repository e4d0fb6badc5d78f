//! Detection of external runtimes that some tests depend on.

use std::process::Command;

/// Whether a `node` executable is on `PATH`.
///
/// Tests that evaluate JavaScript config modules return early when this is
/// `false`.
pub fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}
