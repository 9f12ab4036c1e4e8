use super::*;

fn analyze_args(argv: &[&str]) -> AnalyzeArgs {
    let cli = Cli::try_parse_from(argv).expect("expected valid cli args");
    match cli.command {
        Some(Commands::Analyze(args)) => args,
        other => panic!("expected analyze command, got: {other:?}"),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["profilescan"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn analyze_defaults() {
    let args = analyze_args(&["profilescan", "analyze", "@instagram", "nasa"]);
    assert_eq!(args.handles, vec!["@instagram", "nasa"]);
    assert!(args.file.is_none());
    assert_eq!(args.format, OutputFormat::Table);
    assert_eq!(args.sort_by, SortKey::Followers);
    assert!(!args.asc);
    assert!(args.output.is_none());
}

#[test]
fn analyze_accepts_format_sort_and_output() {
    let args = analyze_args(&[
        "profilescan",
        "analyze",
        "natgeo",
        "--format",
        "csv",
        "--sort-by",
        "engagement-rate",
        "--asc",
        "-o",
        "out.csv",
    ]);
    assert_eq!(args.format, OutputFormat::Csv);
    assert_eq!(args.sort_by, SortKey::EngagementRate);
    assert!(args.asc);
    assert_eq!(args.output, Some(PathBuf::from("out.csv")));
}

#[test]
fn analyze_accepts_file_without_positional_handles() {
    let args = analyze_args(&["profilescan", "analyze", "--file", "handles.txt"]);
    assert!(args.handles.is_empty());
    assert_eq!(args.file, Some(PathBuf::from("handles.txt")));
}

#[test]
fn analyze_rejects_unknown_format() {
    let result = Cli::try_parse_from(["profilescan", "analyze", "nasa", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn analyze_rejects_unknown_sort_key() {
    let result = Cli::try_parse_from(["profilescan", "analyze", "nasa", "--sort-by", "likes"]);
    assert!(result.is_err());
}
