use pretty_assertions::assert_eq;

use super::*;

fn parse(args: &[&str]) -> Result<Command, UsageError> {
    let args: Vec<String> = args.iter().map(|&s| s.to_owned()).collect();
    parse_args(&args)
}

fn options(args: &[&str]) -> Options {
    match parse(args).unwrap() {
        Command::Run(options) => options,
        other => panic!("expected a run, got {other:?}"),
    }
}

#[test]
fn no_arguments_reads_stdin() {
    assert_eq!(options(&[]), Options::default());
}

#[test]
fn statements_alone_skip_stdin() {
    let opts = options(&["-e", "a <- b", "-e", "c <- d"]);
    assert_eq!(opts.statements, vec!["a <- b".to_owned(), "c <- d".to_owned()]);
    assert_eq!(opts.input, Input::None);
}

#[test]
fn statements_then_script() {
    let opts = options(&["-e", "a <- b", "run.r4"]);
    assert_eq!(opts.input, Input::File(PathBuf::from("run.r4")));

    let opts = options(&["-e", "a <- b", "-"]);
    assert_eq!(opts.input, Input::Stdin);
}

#[test]
fn valued_flags() {
    let opts = options(&["--root=/srv", "--buffer-size=16", "--color=never", "--stats"]);
    assert_eq!(opts.root, Some(PathBuf::from("/srv")));
    assert_eq!(opts.buffer_size, Some(16));
    assert_eq!(opts.color, ColorMode::Never);
    assert!(opts.stats);
}

#[test]
fn bad_flags_are_usage_errors() {
    assert!(parse(&["--buffer-size=0"]).is_err());
    assert!(parse(&["--buffer-size=lots"]).is_err());
    assert!(parse(&["--color=sometimes"]).is_err());
    assert!(parse(&["--frobnicate"]).is_err());
    assert!(parse(&["-e"]).is_err());
    assert!(parse(&["a.r4", "b.r4"]).is_err());
}

#[test]
fn explain_and_friends() {
    assert_eq!(parse(&["--explain", "E1004"]).unwrap(), Command::Explain("E1004".to_owned()));
    assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
    assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    assert!(parse(&["--explain"]).is_err());
}
