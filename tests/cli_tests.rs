use std::path::PathBuf;

use clap::Parser;
use zolldo::{
    repository::{Filter, SortKey},
    Cli, Cmd,
};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("zolldo").chain(args.iter().copied()))
}

#[test]
fn add_accepts_underscored_flags() {
    let cli = parse(&["add", "--title", "Buy milk", "--due_date", "2025-01-01", "--description", "2L"]).unwrap();
    match cli.cmd {
        Cmd::Add { title, due_date, description, id } => {
            assert_eq!(title, "Buy milk");
            assert!(due_date.is_some());
            assert_eq!(description.as_deref(), Some("2L"));
            assert_eq!(id, None);
        }
        other => panic!("Expected Add, got: {:?}", other),
    }
}

#[test]
fn add_rejects_malformed_due_date() {
    assert!(parse(&["add", "--title", "x", "--due_date", "someday"]).is_err());
}

#[test]
fn list_defaults_to_id_order_without_filter() {
    let cli = parse(&["list"]).unwrap();
    match cli.cmd {
        Cmd::List { sort_by, filter_by, reverse } => {
            assert_eq!(sort_by, SortKey::Id);
            assert_eq!(filter_by, None);
            assert!(!reverse);
        }
        other => panic!("Expected List, got: {:?}", other),
    }
}

#[test]
fn list_parses_sort_and_filter_names() {
    let cli = parse(&["list", "--sort_by", "due_date", "--filter_by", "overdue", "--reverse"]).unwrap();
    match cli.cmd {
        Cmd::List { sort_by, filter_by, reverse } => {
            assert_eq!(sort_by, SortKey::DueDate);
            assert_eq!(filter_by, Some(Filter::Overdue));
            assert!(reverse);
        }
        other => panic!("Expected List, got: {:?}", other),
    }
    assert!(parse(&["list", "--sort_by", "priority"]).is_err());
}

#[test]
fn update_requires_positive_id() {
    assert!(parse(&["update", "--title", "x"]).is_err());
    assert!(parse(&["update", "--id", "0"]).is_err());
    let cli = parse(&["update", "--id", "3", "--completed"]).unwrap();
    assert!(matches!(cli.cmd, Cmd::Update { id: 3, completed: true, .. }));
}

#[test]
fn delete_needs_exactly_one_target() {
    assert!(parse(&["delete"]).is_err());
    assert!(parse(&["delete", "--id", "1", "--all"]).is_err());
    assert!(parse(&["delete", "--id", "1", "--yes"]).is_err());
    assert!(matches!(
        parse(&["delete", "--all", "--yes"]).unwrap().cmd,
        Cmd::Delete { id: None, all: true, yes: true }
    ));
}

#[test]
fn data_file_flag_overrides_default() {
    let cli = parse(&["--data-file", "/tmp/elsewhere.json", "gui"]).unwrap();
    assert_eq!(cli.data_file, PathBuf::from("/tmp/elsewhere.json"));
    assert!(matches!(cli.cmd, Cmd::Gui));
}
