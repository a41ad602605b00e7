use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Run a generated script with `sh`, pointing TMPDIR at a private scratch
/// directory so leaked temp directories can be detected afterwards. Stdin is
/// closed: the generated script must not depend on a live stream.
#[allow(dead_code)]
pub fn run_sh(script: &str) -> (Output, TempDir) {
    let scratch = TempDir::new().expect("create scratch dir");
    let script_dir = TempDir::new().expect("create script dir");
    let path = script_dir.path().join("generated.sh");
    std::fs::write(&path, script).expect("write generated script");
    let output = Command::new("sh")
        .arg(&path)
        .env("TMPDIR", scratch.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("run sh");
    (output, scratch)
}

/// Pipe the script text into `sh` via stdin, the way `bashify ... | sh` would.
#[allow(dead_code)]
pub fn run_sh_piped(script: &str) -> (Output, TempDir) {
    let scratch = TempDir::new().expect("create scratch dir");
    let mut child = Command::new("sh")
        .env("TMPDIR", scratch.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn sh");
    child
        .stdin
        .as_mut()
        .expect("piped stdin")
        .write_all(script.as_bytes())
        .expect("write script to sh stdin");
    let output = child.wait_with_output().expect("wait for sh");
    (output, scratch)
}

/// Assert the scratch TMPDIR ended up empty, i.e. the cleanup trap ran.
#[allow(dead_code)]
pub fn assert_no_leftover(scratch: &TempDir) {
    let leftovers: Vec<_> = std::fs::read_dir(scratch.path())
        .expect("read scratch dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert!(
        leftovers.is_empty(),
        "generated script leaked temp entries: {leftovers:?}"
    );
}
