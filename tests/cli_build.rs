//! Drive the built bashify binary the way a user would and check the
//! generated output, exit codes, and no-partial-output guarantee.

use std::io::Write;
use std::process::{Command, Stdio};

mod common;
use common::{assert_no_leftover, run_sh};

fn bashify() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bashify"))
}

fn write_script(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).expect("write input script");
    path
}

#[test]
fn test_cli_emits_all_sections_and_invocation() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "run.sh", "#!/bin/sh\necho ok\n");
    let out = bashify()
        .arg(&script)
        .args(["--", "a b"])
        .output()
        .expect("run bashify");
    assert!(
        out.status.success(),
        "bashify exited non-zero: {:?}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stderr)
    );
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.starts_with("#!/bin/sh\n"));
    assert!(text.contains("# SECTION: INIT"));
    assert!(text.contains("# SECTION: FILES"));
    assert!(text.contains("# SECTION: COMMANDS"));
    assert!(text.contains("chmod 700 run.sh"));
    assert!(text.contains("./run.sh 'a b'"), "args must be shell-escaped");
}

#[test]
fn test_cli_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "run.sh", "#!/bin/sh\necho ok\n");
    let first = bashify().arg(&script).output().unwrap();
    let second = bashify().arg(&script).output().unwrap();
    assert!(first.status.success() && second.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "run.sh", "#!/bin/sh\necho ok\n");
    let target = dir.path().join("bundle.sh");
    let out = bashify()
        .args(["--output"])
        .arg(&target)
        .arg(&script)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(out.stdout.is_empty(), "script goes to the file, not stdout");
    let written = std::fs::read_to_string(&target).unwrap();
    assert!(written.contains("# SECTION: COMMANDS"));
}

#[test]
fn test_cli_missing_input_fails_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("bundle.sh");
    let out = bashify()
        .args(["--output"])
        .arg(&target)
        .arg(dir.path().join("nope.sh"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&out.stderr).contains("cannot read"),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(!target.exists(), "no partial output on build failure");
}

#[test]
fn test_cli_rejects_unsafe_extra_file_dest() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "run.sh", "#!/bin/sh\n");
    let data = write_script(&dir, "data.txt", "x");
    let out = bashify()
        .arg("--file")
        .arg(format!("{}:../evil", data.display()))
        .arg(&script)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid destination path"));
}

#[test]
fn test_cli_embeds_extra_file_under_dest() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "run.sh", "#!/bin/sh\ncat input/data.txt\n");
    let data = write_script(&dir, "data.txt", "payload\n");
    let out = bashify()
        .arg("--file")
        .arg(format!("{}:input/data.txt", data.display()))
        .arg(&script)
        .output()
        .unwrap();
    assert!(out.status.success());
    let (run, scratch) = run_sh(&String::from_utf8_lossy(&out.stdout));
    assert!(run.status.success(), "stderr: {}", String::from_utf8_lossy(&run.stderr));
    assert_eq!(run.stdout, b"payload\n");
    assert_no_leftover(&scratch);
}

#[test]
fn test_cli_stdin_capture_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "filter.sh", "#!/bin/sh\ncat\n");
    let mut child = bashify()
        .arg("--stdin")
        .arg(&script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn bashify");
    child
        .stdin
        .as_mut()
        .expect("piped stdin")
        .write_all(b"X\n")
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait for bashify");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    // The generated script must replay the captured bytes with stdin closed.
    let (run, scratch) = run_sh(&String::from_utf8_lossy(&out.stdout));
    assert!(run.status.success(), "stderr: {}", String::from_utf8_lossy(&run.stderr));
    assert_eq!(run.stdout, b"X\n");
    assert_no_leftover(&scratch);
}

#[test]
fn test_cli_verbose_reports_build_summary() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "run.sh", "#!/bin/sh\n");
    let out = bashify()
        .args(["--verbose", "--color", "never"])
        .arg(&script)
        .output()
        .unwrap();
    assert!(out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(
        err.contains("bashify: embedded 1 file(s), 1 command(s)"),
        "stderr: {err}"
    );
}
