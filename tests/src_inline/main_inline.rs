use super::*;
use std::path::Path;

#[test]
fn test_parse_run_command() {
    let cli = Cli::try_parse_from([
        "kira-liverqc",
        "run",
        "--input",
        "page1.txt",
        "page2.txt",
        "--overrides",
        "user.json",
        "--out",
        "out",
        "--verbose",
    ])
    .unwrap();
    assert!(cli.verbose);
    let Command::Run(args) = cli.command else {
        panic!("expected run");
    };
    assert_eq!(
        args.inputs,
        vec![PathBuf::from("page1.txt"), PathBuf::from("page2.txt")]
    );
    assert_eq!(args.overrides.as_deref(), Some(Path::new("user.json")));
    assert_eq!(args.config, None);
    assert_eq!(args.out, PathBuf::from("out"));
}

#[test]
fn test_run_requires_out() {
    assert!(Cli::try_parse_from(["kira-liverqc", "run", "--input", "a.txt"]).is_err());
}

#[test]
fn test_parse_extract_command() {
    let cli = Cli::try_parse_from(["kira-liverqc", "extract", "--input", "a.txt"]).unwrap();
    assert!(!cli.verbose);
    assert!(matches!(cli.command, Command::Extract(ref args)
        if args.inputs.len() == 1 && args.config.is_none()));

    let cli = Cli::try_parse_from([
        "kira-liverqc",
        "extract",
        "--input",
        "a.txt",
        "--config",
        "profile.toml",
    ])
    .unwrap();
    let Command::Extract(args) = cli.command else {
        panic!("expected extract");
    };
    assert_eq!(args.config.as_deref(), Some(Path::new("profile.toml")));
}

#[test]
fn test_run_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.txt");
    std::fs::write(&input, "Age: 50\nAST 40 U/L 5 - 40\nALT 25 U/L\nPlatelets 200 x10^9/L\n")
        .unwrap();
    let config = dir.path().join("profile.toml");
    std::fs::write(&config, "assume_no_diabetes_when_absent = false\n").unwrap();
    let out = dir.path().join("out");

    let args = RunArgs {
        inputs: vec![input],
        overrides: None,
        config: Some(config),
        out: out.clone(),
    };
    run_scoring(&args).unwrap();
    for file in ["summary.json", "scores.tsv", "report.txt"] {
        assert!(out.join(file).is_file(), "{file} missing");
    }
}

#[test]
fn test_run_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        inputs: vec![dir.path().join("missing.txt")],
        overrides: None,
        config: None,
        out: dir.path().join("out"),
    };
    assert!(matches!(
        run_scoring(&args),
        Err(RunError::Input(InputError::Io { .. }))
    ));
}

#[test]
fn test_run_survives_negative_override() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.txt");
    std::fs::write(&input, "Age: 50\nAST 40 U/L 5 - 40\nALT 25 U/L\nPlatelets 200 x10^9/L\n")
        .unwrap();
    let overrides = dir.path().join("user.json");
    std::fs::write(&overrides, r#"{"albumin": -1}"#).unwrap();
    let out = dir.path().join("out");

    let args = RunArgs {
        inputs: vec![input],
        overrides: Some(overrides),
        config: None,
        out: out.clone(),
    };
    run_scoring(&args).unwrap();
    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["rejected_overrides"][0]["field"], "albumin");
    assert!(summary["scores"][1]["value"].is_number());
}
