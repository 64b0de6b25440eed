//! Test driver for anyarg-demo integration tests.
//!
//! Runs the binary with a given argv and environment, with stdin closed,
//! and captures stdout and stderr for assertions.

use std::process::{Command, Stdio};

/// Output captured from a completed run.
pub struct SessionOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl SessionOutput {
    /// Assert the exit code, showing both streams on failure.
    pub fn expect_exit(self, expected_code: i32) -> SessionOutput {
        assert_eq!(
            self.code, expected_code,
            "expected exit code {expected_code}, got {}\nstdout:\n{}\nstderr:\n{}",
            self.code, self.stdout, self.stderr
        );
        self
    }
}

/// Run `binary` with `args` (not including argv[0]) and extra `env`.
///
/// `RUST_LOG` is cleared unless `env` sets it, so stderr only carries what
/// the program itself prints.
pub fn run(binary: &str, args: &[&str], env: &[(&str, &str)]) -> std::io::Result<SessionOutput> {
    let mut cmd = Command::new(binary);
    cmd.args(args);
    cmd.env_remove("RUST_LOG");
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.stdin(Stdio::null());

    let output = cmd.output()?;
    Ok(SessionOutput {
        code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}
