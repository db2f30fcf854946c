// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
mod common;

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use common::{flat_header, write_temp};

const MISSING_ALLOW: &str = "/nonexistent/allow.list";
const MISSING_DENY: &str = "/nonexistent/deny.list";

fn hdlist_bins() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hdlist_bins"));
    command.env_remove("RUST_LOG");
    command
}

fn run(archives: &[&Path]) -> Output {
    hdlist_bins()
        .arg(MISSING_ALLOW)
        .arg(MISSING_DENY)
        .args(archives)
        .output()
        .expect("Should run hdlist_bins")
}

fn stdout(output: &Output) -> &str {
    std::str::from_utf8(&output.stdout).unwrap()
}

#[test]
fn test_unopenable_archive_stops_the_run() {
    let first = write_temp(&flat_header("pkgA", &[("/usr/bin/tool1", 0o100755)]));
    let last = write_temp(&flat_header("pkgB", &[("/usr/bin/tool2", 0o100755)]));
    let missing = Path::new("/nonexistent/hdlist");

    let output = run(&[first.path(), missing, last.path()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "pkgA /usr/bin/tool1\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("hdlist_bins: cannot open file /nonexistent/hdlist: "),
        "Unexpected diagnostic: {stderr}"
    );
}

#[test]
fn test_dash_reads_standard_input_in_order() {
    let last = write_temp(&flat_header("pkgB", &[("/usr/bin/tool2", 0o100755)]));

    let mut child = hdlist_bins()
        .arg(MISSING_ALLOW)
        .arg(MISSING_DENY)
        .arg("-")
        .arg(last.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Should start hdlist_bins");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(&flat_header("pkgS", &[("/sbin/x", 0o100755)]))
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "pkgS /sbin/x\npkgB /usr/bin/tool2\n");
}

#[test]
fn test_too_few_arguments() {
    let output = hdlist_bins()
        .arg(MISSING_ALLOW)
        .arg(MISSING_DENY)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_no_matches_is_success() {
    let archive = write_temp(&flat_header("docs", &[("/usr/share/doc/x", 0o100644)]));

    let output = run(&[archive.path()]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_name_lists_on_command_line() {
    let archive = write_temp(&flat_header(
        "net-tools",
        &[("/bin/netstat", 0o100755), ("/sbin/route", 0o100755)],
    ));
    let allow = write_temp(b"netstat route\n");
    let deny = write_temp(b"route\n");

    let output = hdlist_bins()
        .arg(allow.path())
        .arg(deny.path())
        .arg(archive.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "net-tools /bin/netstat\n");
}
