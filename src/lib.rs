pub mod app;
pub mod commands;
pub mod error;
pub mod persistence;
pub mod repository;
pub mod task;

pub use error::{Error, Result};

use chrono::{DateTime, Utc};
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

use crate::repository::{Filter, SortKey};

/// CLI shared between main and tests
#[derive(Parser, Debug)]
#[command(name = "zolldo", version, about = "A lightweight todo-list application CLI")]
pub struct Cli {
    /// Task file to read and write
    #[arg(
        long,
        global = true,
        env = "ZOLLDO_DATA_FILE",
        default_value = persistence::DEFAULT_FILE_NAME
    )]
    pub data_file: PathBuf,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Add a new to-do task
    Add {
        /// Title of the task
        #[arg(long)]
        title: String,
        /// Due date (any ISO date-time such as 1970-01-01 or 1970-01-01T00:00)
        #[arg(long = "due_date", visible_alias = "due-date", value_parser = task::parse_due_date)]
        due_date: Option<DateTime<Utc>>,
        /// Description of the task
        #[arg(long)]
        description: Option<String>,
        /// Use this id instead of the next free one
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        id: Option<u64>,
    },
    /// List tasks
    List {
        /// Field to sort by (ties are broken by id)
        #[arg(long = "sort_by", visible_alias = "sort-by", value_enum, default_value_t)]
        sort_by: SortKey,
        /// Only show tasks in this state
        #[arg(long = "filter_by", visible_alias = "filter-by", value_enum)]
        filter_by: Option<Filter>,
        /// Reverse the order of tasks displayed
        #[arg(long)]
        reverse: bool,
    },
    /// Update a task
    Update {
        /// Id of the task to update
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        id: u64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New due date
        #[arg(long = "due_date", visible_alias = "due-date", value_parser = task::parse_due_date)]
        due_date: Option<DateTime<Utc>>,
        /// Mark the task as completed
        #[arg(long)]
        completed: bool,
    },
    /// Delete one task or all of them
    #[command(group(ArgGroup::new("target").required(true).args(["id", "all"])))]
    Delete {
        /// Id of the task to delete
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        id: Option<u64>,
        /// Delete all tasks
        #[arg(long)]
        all: bool,
        /// Skip the confirmation prompt for --all
        #[arg(short, long, requires = "all")]
        yes: bool,
    },
    /// Launch the interactive terminal interface
    Gui,
}
