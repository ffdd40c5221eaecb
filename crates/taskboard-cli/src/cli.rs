//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use taskboard_core::{parse_due_date, Priority, TaskState};
use taskboard_report::ReportFormat;

#[derive(Debug, Parser)]
#[command(name = "taskboard")]
#[command(version, about = "Local kanban task board")]
pub struct Cli {
    /// JSON document holding all users and projects
    #[arg(long, global = true, env = "TASKBOARD_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project to act on (id, id prefix or name); defaults to the open project
    #[arg(long, short, global = true)]
    pub project: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Manage columns of the current project
    Column {
        #[command(subcommand)]
        command: ColumnCommand,
    },
    /// Manage tasks of the current project
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Show statistics for the current project
    Stats,
    /// List overdue tasks of the current project
    Overdue,
    /// Export a report of the current project
    Report {
        /// text, csv, markdown or json
        #[arg(long, short, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Write to this file instead of stdout; a directory gets `<project>.<ext>`
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a user
    Add { name: String, email: String },
    /// List users
    List,
    /// Delete a user (id, id prefix or email)
    Delete { user: String },
    /// Make a user the current user
    Select { user: String },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project with the default columns and open it
    Create {
        name: String,
        #[arg(long, short)]
        description: Option<String>,
        /// Owner (id, id prefix or email); defaults to the current user
        #[arg(long)]
        owner: Option<String>,
    },
    /// List projects
    List,
    /// Make a project the current project
    Open { project: String },
    /// Delete a project and all its tasks
    Delete { project: String },
    /// Show the board of the current project
    Show,
    /// Add a user to the current project's members
    AddMember { user: String },
    /// Remove a user from the current project's members
    RemoveMember { user: String },
}

#[derive(Debug, Subcommand)]
pub enum ColumnCommand {
    /// Append a column
    Add { name: String },
    /// Rename a column (id, id prefix or name)
    Rename { column: String, name: String },
    /// Delete a column and every task in it
    Delete { column: String },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Create a task
    Add(TaskAddArgs),
    /// Change task fields
    Update(TaskUpdateArgs),
    /// Move a task to another column
    Move { task: String, column: String },
    /// Delete a task
    Delete { task: String },
    /// Add a label
    Label { task: String, label: String },
    /// Remove a label
    Unlabel { task: String, label: String },
    /// Search titles and descriptions, ignoring case
    Search { term: String },
}

#[derive(Debug, Args)]
pub struct TaskAddArgs {
    pub title: String,
    #[arg(long, short)]
    pub description: Option<String>,
    #[arg(long, default_value_t = Priority::Medium)]
    pub priority: Priority,
    /// Column (id, id prefix or name); defaults to the first column
    #[arg(long, short)]
    pub column: Option<String>,
    #[arg(long, short)]
    pub assignee: Option<String>,
    /// Due date, YYYY-MM-DD
    #[arg(long, value_parser = parse_due_date)]
    pub due: Option<NaiveDate>,
    #[arg(long = "label", short)]
    pub labels: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TaskUpdateArgs {
    pub task: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, short)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub state: Option<TaskState>,
    #[arg(long, short, conflicts_with = "unassign")]
    pub assignee: Option<String>,
    #[arg(long)]
    pub unassign: bool,
    /// Due date, YYYY-MM-DD
    #[arg(long, value_parser = parse_due_date, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,
    #[arg(long)]
    pub clear_due: bool,
}
