use clap::Parser;

use skillpath::cli::{Cli, Commands, OutputFormat};

#[test]
fn recommend_parses_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "skillpath",
        "recommend",
        "--catalog",
        "skills.yaml",
        "--learner",
        "ana.json",
        "-n",
        "5",
        "-O",
        "json",
        "-vv",
    ])
    .unwrap();

    assert_eq!(cli.output_format, OutputFormat::Json);
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Commands::Recommend(args) => {
            assert_eq!(args.count, Some(5));
            assert_eq!(args.learner.to_str(), Some("ana.json"));
        }
        other => panic!("expected recommend, got {other:?}"),
    }
}

#[test]
fn pathway_takes_goal_positionally() {
    let cli = Cli::try_parse_from([
        "skillpath",
        "pathway",
        "coaching",
        "--catalog",
        "skills.yaml",
        "--learner",
        "ana.json",
    ])
    .unwrap();

    assert_eq!(cli.output_format, OutputFormat::Human);
    match cli.command {
        Commands::Pathway(args) => assert_eq!(args.goal, "coaching"),
        other => panic!("expected pathway, got {other:?}"),
    }
}

#[test]
fn apply_parses_rfc3339_timestamp() {
    let cli = Cli::try_parse_from([
        "skillpath",
        "apply",
        "--catalog",
        "skills.yaml",
        "--learner",
        "ana.json",
        "--events",
        "events.jsonl",
        "--at",
        "2024-05-01T08:30:00Z",
        "--write",
    ])
    .unwrap();

    match cli.command {
        Commands::Apply(args) => {
            assert!(args.write);
            assert_eq!(
                args.at.map(|at| at.to_rfc3339()),
                Some("2024-05-01T08:30:00+00:00".to_string())
            );
        }
        other => panic!("expected apply, got {other:?}"),
    }
}

#[test]
fn new_learner_collects_repeated_goals() {
    let cli = Cli::try_parse_from([
        "skillpath",
        "new-learner",
        "ana",
        "--goal",
        "coaching",
        "--goal",
        "delegation",
        "-q",
    ])
    .unwrap();

    assert!(cli.quiet);
    match cli.command {
        Commands::NewLearner(args) => {
            assert_eq!(args.id, "ana");
            assert_eq!(args.goals, vec!["coaching", "delegation"]);
            assert!(args.out.is_none());
        }
        other => panic!("expected new-learner, got {other:?}"),
    }
}

#[test]
fn unknown_output_format_is_rejected() {
    assert!(Cli::try_parse_from(["skillpath", "-O", "xml", "new-learner", "ana"]).is_err());
}
