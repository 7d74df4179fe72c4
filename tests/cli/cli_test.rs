//! End-to-end tests of the `tbvaccine` binary.

use assert_cmd::Command;

const INPUT: &str = "\
server starting
Traceback (most recent call last):
  File \"/home/dev/project/server.py\", line 12, in <module>
    serve()
  File \"/usr/lib/python3.12/socket.py\", line 233, in bind
    return self._sock.bind(addr)
OSError: [Errno 98] Address already in use
";

fn tbvaccine(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tbvaccine").expect("binary builds");
    // Keep any user config out of the way.
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn colorizes_stdin_onto_stderr() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = tbvaccine(&home)
        .args(["--dir", "/home/dev/project", "--no-highlight"])
        .write_stdin(INPUT)
        .output()
        .expect("run binary");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = stderr_of(&output);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines[0], "server starting");
    assert_eq!(lines[1], "\x1b[0;34mTraceback (most recent call last):\x1b[m");
    assert!(lines[2].contains("\x1b[1;36mserver.py\x1b[m"));
    assert_eq!(lines[3], "\x1b[1;31m>\x1b[m   serve()");
    assert_eq!(
        lines[4],
        "  File \"/usr/lib/python3.12/socket.py\", line 233, in bind"
    );
    assert_eq!(lines[5], "    return self._sock.bind(addr)");
    assert_eq!(
        lines[6],
        "\x1b[1;31mOSError\x1b[m: \x1b[0;32m[Errno 98] Address already in use\x1b[m"
    );
}

#[test]
fn dont_isolate_styles_library_frames() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = tbvaccine(&home)
        .args(["--dir", "/home/dev/project", "--no-highlight", "-i"])
        .write_stdin(INPUT)
        .output()
        .expect("run binary");

    assert!(output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("\x1b[1;36msocket.py\x1b[m"));
    assert!(stderr.contains("\n    serve()\n"));
}

#[test]
fn config_file_is_honoured_and_flags_override_it() {
    let home = tempfile::tempdir().expect("tempdir");
    let config_path = home.path().join("custom.toml");
    std::fs::write(
        &config_path,
        "[processor]\ncode_dir = \"/usr/lib\"\n\n[highlight]\nenabled = false\n",
    )
    .expect("write config");

    let output = tbvaccine(&home)
        .arg("--config")
        .arg(&config_path)
        .write_stdin(INPUT)
        .output()
        .expect("run binary");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("\x1b[1;36msocket.py\x1b[m"));
    assert!(stderr.contains("  File \"/home/dev/project/server.py\", line 12, in <module>\n"));

    let output = tbvaccine(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["--dir", "/home/dev/project"])
        .write_stdin(INPUT)
        .output()
        .expect("run binary");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("\x1b[1;36mserver.py\x1b[m"));
}

#[test]
fn invalid_config_fails() {
    let home = tempfile::tempdir().expect("tempdir");
    let config_path = home.path().join("bad.toml");
    std::fs::write(&config_path, "[processor]\nmax_variable_line_length = 0\n")
        .expect("write config");

    tbvaccine(&home)
        .arg("--config")
        .arg(&config_path)
        .write_stdin("")
        .assert()
        .failure();
}

#[test]
fn version_flag_prints_version() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = tbvaccine(&home)
        .arg("--version")
        .output()
        .expect("run binary");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
