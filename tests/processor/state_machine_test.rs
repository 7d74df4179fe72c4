//! Mode transitions and line classification across a stream.

use tbvaccine::Mode;

use super::{processor, run};

#[test]
fn plain_lines_pass_through_with_newline() {
    let mut p = processor();
    for line in [
        "starting worker",
        "    indented but idle",
        "ValueError: not in a traceback",
        "|     not a variable either",
        r#"  File "x.py", line 1, in f"#,
    ] {
        assert_eq!(p.process_line(line), format!("{line}\n"));
        assert_eq!(p.mode(), Mode::Idle);
    }
}

#[test]
fn three_line_traceback_cycles_modes() {
    let mut p = processor();
    assert_eq!(p.mode(), Mode::Idle);

    let start = p.process_line("Traceback (most recent call last):");
    assert_eq!(start, "\x1b[0;34mTraceback (most recent call last):\x1b[m\n");
    assert_eq!(p.mode(), Mode::InTraceback);

    p.process_line(r#"  File "foo.py", line 3, in bar"#);
    assert_eq!(p.mode(), Mode::InTraceback);

    let summary = p.process_line("ValueError: oops");
    assert_eq!(p.mode(), Mode::Idle);
    assert!(summary.contains("\x1b[1;31mValueError\x1b[m"));
    assert!(summary.contains("\x1b[0;32moops\x1b[m"));
    assert_eq!(summary, "\x1b[1;31mValueError\x1b[m: \x1b[0;32moops\x1b[m\n");
}

#[test]
fn unrecognised_lines_inside_traceback_keep_mode() {
    let mut p = processor();
    p.process_line("Traceback (most recent call last):");
    let out = p.process_line("something unexpected");
    assert_eq!(out, "something unexpected\n");
    assert_eq!(p.mode(), Mode::InTraceback);

    let malformed = r#"  File "broken.py, line 3, in bar"#;
    assert_eq!(p.process_line(malformed), format!("{malformed}\n"));
    assert_eq!(p.mode(), Mode::InTraceback);
    assert_eq!(p.current_file(), None);
}

#[test]
fn empty_lines_vanish_in_either_mode() {
    let mut p = processor();
    assert_eq!(p.process_line("\n"), "");
    p.process_line("Traceback (most recent call last):");
    assert_eq!(p.process_line("\r\n"), "");
    assert_eq!(p.mode(), Mode::InTraceback);
}

#[test]
fn chained_tracebacks_restart_cleanly() {
    let mut p = processor();
    let outputs = run(
        &mut p,
        &[
            "Traceback (most recent call last):",
            r#"  File "/home/dev/project/app.py", line 10, in load"#,
            "    return cache[key]",
            "KeyError: 'user'",
            "",
            "During handling of the above exception, another exception occurred:",
            "",
            "Traceback (most recent call last):",
            "    orphan_code_line()",
            r#"  File "/usr/lib/python3.12/json/__init__.py", line 346, in loads"#,
            "    return _default_decoder.decode(s)",
            "json.decoder.JSONDecodeError: Expecting value: line 1 column 1 (char 0)",
        ],
    );

    assert_eq!(outputs[2], "\x1b[1;31m>\x1b[m   return cache[key]\n");
    assert_eq!(
        outputs[3],
        "\x1b[1;31mKeyError\x1b[m: \x1b[0;32m'user'\x1b[m\n"
    );
    assert_eq!(
        outputs[5],
        "During handling of the above exception, another exception occurred:\n"
    );
    assert_eq!(
        outputs[7],
        "\x1b[0;34mTraceback (most recent call last):\x1b[m\n"
    );
    // No header seen yet in the second block: the first block's file must not apply.
    assert_eq!(outputs[8], "    orphan_code_line()\n");
    assert_eq!(
        outputs[9],
        "  File \"/usr/lib/python3.12/json/__init__.py\", line 346, in loads\n"
    );
    assert_eq!(outputs[10], "    return _default_decoder.decode(s)\n");
    assert!(outputs[11].starts_with("\x1b[1;31mjson.decoder.JSONDecodeError\x1b[m: "));
    assert_eq!(p.mode(), Mode::Idle);
}
