use pretty_assertions::assert_eq;
use r4_diagnostic::emitter::ColorMode;
use r4_eval::{MemoryResolver, SessionConfig};

use super::*;

fn session() -> Session<MemoryResolver> {
    let mut fs = MemoryResolver::new();
    fs.mkdir("/tmp").unwrap();
    fs.write_file("/b", b"bee").unwrap();
    Session::new(fs, SessionConfig::default()).unwrap()
}

fn emitter() -> TerminalEmitter<Vec<u8>> {
    TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
}

#[test]
fn script_runs_every_line() {
    let mut session = session();
    let mut emitter = emitter();
    let script = "\"/tmp/x\" <- b\n\n/tmp/x <<- `!`\n";

    let summary = run_script(&mut session, script, "demo.r4", &mut emitter);

    assert_eq!(summary, RunSummary { statements: 2, failures: 0 });
    assert_eq!(session.resolver().read_file("/tmp/x").unwrap(), b"bee!");
    assert!(emitter.into_inner().is_empty());
}

#[test]
fn failures_are_reported_and_skipped() {
    let mut session = session();
    let mut emitter = emitter();
    let script = "a <- b c\n\"/tmp/y\" <- b\n";

    let summary = run_script(&mut session, script, "demo.r4", &mut emitter);

    assert_eq!(summary, RunSummary { statements: 2, failures: 1 });
    assert!(!summary.is_success());
    assert_eq!(session.resolver().read_file("/tmp/y").unwrap(), b"bee");
    let report = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(report.starts_with("error[E1001]"), "{report}");
    assert!(report.contains("demo.r4:1, offset 7"), "{report}");
    assert!(report.contains("a <- b c"), "{report}");
}

#[test]
fn repl_prompts_with_the_working_cursor() {
    let mut session = session();
    let mut emitter = emitter();
    let mut prompt = Vec::new();

    let summary = repl(&mut session, &b"[/tmp]\n/tmp\n"[..], &mut prompt, &mut emitter).unwrap();

    assert_eq!(summary.statements, 2);
    assert_eq!(String::from_utf8(prompt).unwrap(), ".> .> /tmp> \n");
}

#[test]
fn repl_reports_against_stdin_lines() {
    let mut session = session();
    let mut emitter = emitter();

    let summary = repl(&mut session, &b"\n`open\n"[..], Vec::new(), &mut emitter).unwrap();

    assert_eq!(summary, RunSummary { statements: 1, failures: 1 });
    let report = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(report.contains("<stdin>:2"), "{report}");
}
