use clap::Parser;
use std::path::PathBuf;

use ideagauge::cli::{Cli, Commands};

#[test]
fn test_parse_analyze_text() {
    let cli = Cli::try_parse_from(["ideagauge", "analyze", "A dog walking app", "--save"]).unwrap();

    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(args.text.as_deref(), Some("A dog walking app"));
            assert!(args.save);
            assert!(!args.chat);
            assert!(args.file.is_none());
        }
        _ => panic!("Wrong command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_analyze_file_with_global_flags() {
    let cli = Cli::try_parse_from([
        "ideagauge",
        "analyze",
        "--file",
        "idea.txt",
        "--json",
        "--config",
        "alt.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
    match cli.command {
        Commands::Analyze(args) => assert_eq!(args.file, Some(PathBuf::from("idea.txt"))),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_analyze_requires_text_or_file() {
    assert!(Cli::try_parse_from(["ideagauge", "analyze"]).is_err());
    assert!(Cli::try_parse_from(["ideagauge", "analyze", "idea", "--file", "x.txt"]).is_err());
}

#[test]
fn test_parse_chat_and_research() {
    let cli = Cli::try_parse_from(["ideagauge", "chat", "1a2b", "How do I get to 85%?"]).unwrap();
    match cli.command {
        Commands::Chat(args) => {
            assert_eq!(args.id, "1a2b");
            assert_eq!(args.message, "How do I get to 85%?");
        }
        _ => panic!("Wrong command"),
    }

    let cli = Cli::try_parse_from(["ideagauge", "research", "1a2b", "--save"]).unwrap();
    match cli.command {
        Commands::Research(args) => assert!(args.save),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_list_default_limit() {
    let cli = Cli::try_parse_from(["ideagauge", "list"]).unwrap();
    match cli.command {
        Commands::List(args) => assert_eq!(args.limit, 20),
        _ => panic!("Wrong command"),
    }
}
