//! End-to-end tests driving the command-line front end
//!
//! Every command runs against a document in a temporary directory and its
//! output is captured in memory.

use clap::Parser;
use pretty_assertions::assert_eq;
use taskboard_cli::{run, App, Cli};
use taskboard_core::{Priority, TaskId, TaskState};
use taskboard_storage::StorageManager;
use taskboard_test_utils::{fixed_today, seeded_project, TestDataDir};

fn exec(dir: &TestDataDir, args: &[&str]) -> anyhow::Result<String> {
    let data_file = dir.data_file().to_string_lossy().into_owned();
    let mut argv = vec!["taskboard", "--data-file", data_file.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn ok(dir: &TestDataDir, args: &[&str]) -> String {
    exec(dir, args).unwrap_or_else(|e| panic!("{args:?} failed: {e:#}"))
}

/// Ana creates Demo and an urgent task that lands in Pending
#[test]
fn end_to_end_through_commands() {
    let dir = TestDataDir::new();
    ok(&dir, &["user", "add", "Ana", "ana@x.com"]);
    ok(&dir, &["user", "select", "ana@x.com"]);
    let created = ok(&dir, &["project", "create", "Demo", "-d", "Kanban demo"]);
    assert!(created.starts_with("Created project Demo ("));
    ok(&dir, &["task", "add", "Write spec", "--priority", "urgent", "-l", "docs"]);

    let storage = StorageManager::new(dir.data_file());
    let projects = storage.load_projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(storage.load_users().len(), 1);

    let demo = &projects[0];
    let ana = &storage.load_users()[0];
    assert_eq!(demo.owner(), Some(ana.id()));
    assert!(demo.is_member(ana.id()));

    let pending = demo.column_by_name("Pending").unwrap();
    assert_eq!(pending.task_count(), 1);
    let task = &pending.tasks()[0];
    assert_eq!(task.priority(), Priority::Urgent);
    assert_eq!(task.state(), TaskState::Pending);
    assert_eq!(task.labels().collect::<Vec<_>>(), ["docs"]);

    let board = ok(&dir, &["project", "show"]);
    assert!(board.contains("| !! Write spec\n"));
}

/// Duplicate emails are refused and nothing is written
#[test]
fn duplicate_email_is_an_error() {
    let dir = TestDataDir::new();
    ok(&dir, &["user", "add", "Ana", "ana@x.com"]);
    let err = exec(&dir, &["user", "add", "Ana Two", "ana@x.com"]).unwrap_err();
    assert!(err.to_string().contains("already registered"));
    assert_eq!(StorageManager::new(dir.data_file()).load_users().len(), 1);
}

/// Project commands need a selection or --project
#[test]
fn project_selection_required() {
    let dir = TestDataDir::new();
    let err = exec(&dir, &["stats"]).unwrap_err();
    assert!(err.to_string().contains("no project selected"));

    ok(&dir, &["project", "create", "Alpha"]);
    ok(&dir, &["project", "create", "Beta"]);
    ok(&dir, &["task", "add", "Only in beta"]);
    ok(&dir, &["--project", "alpha", "task", "add", "Only in alpha"]);

    let storage = StorageManager::new(dir.data_file());
    let counts: Vec<_> = storage
        .load_projects()
        .iter()
        .map(|p| (p.name().to_string(), p.task_count()))
        .collect();
    assert_eq!(counts, [("Alpha".to_string(), 1), ("Beta".to_string(), 1)]);
}

/// Tasks move, update, get labelled and are found by search
#[test]
fn task_lifecycle() {
    let dir = TestDataDir::new();
    ok(&dir, &["project", "create", "Demo"]);
    let created = ok(&dir, &["task", "add", "Fix login", "-d", "OAuth callback"]);
    let id = created.trim().trim_start_matches("Created task ").to_string();
    let prefix = &id[..8];

    ok(&dir, &["task", "move", prefix, "in progress"]);
    ok(&dir, &["task", "update", prefix, "--state", "done", "--assignee", "bruno", "--due", "2025-01-31"]);
    ok(&dir, &["task", "label", prefix, "auth"]);
    assert_eq!(ok(&dir, &["task", "label", prefix, "auth"]), "Label unchanged\n");

    let hits = ok(&dir, &["task", "search", "OAUTH"]);
    assert!(hits.starts_with("1. Fix login (in 'In Progress')\n"));
    assert!(hits.contains("| Medium | Completed\n"));
    assert_eq!(ok(&dir, &["task", "search", "logout"]), "No tasks match 'logout'\n");
    assert!(exec(&dir, &["task", "search", "  "]).is_err());

    let storage = StorageManager::new(dir.data_file());
    let project = &storage.load_projects()[0];
    let (column, task) = project.locate_task(&TaskId::from(id.as_str())).unwrap();
    assert_eq!(column.name(), "In Progress");
    assert_eq!(task.assignee(), Some("bruno"));
    assert_eq!(task.state(), TaskState::Completed);

    ok(&dir, &["task", "update", prefix, "--unassign", "--clear-due"]);
    ok(&dir, &["task", "delete", prefix]);
    assert_eq!(StorageManager::new(dir.data_file()).load_projects()[0].task_count(), 0);
}

/// Columns are added, renamed, and deleted with their tasks
#[test]
fn column_commands() {
    let dir = TestDataDir::new();
    ok(&dir, &["project", "create", "Demo"]);
    assert_eq!(ok(&dir, &["column", "add", "Review"]), "Added column Review (order 3)\n");
    ok(&dir, &["task", "add", "Check PR", "--column", "review"]);
    ok(&dir, &["column", "rename", "Review", "QA"]);
    assert_eq!(ok(&dir, &["column", "delete", "qa"]), "Deleted column and 1 tasks\n");
    assert!(exec(&dir, &["column", "delete", "qa"]).is_err());

    let project = &StorageManager::new(dir.data_file()).load_projects()[0];
    assert_eq!(project.columns().len(), 3);
    assert_eq!(project.task_count(), 0);
}

/// Deleting the open project clears the selection
#[test]
fn deleting_open_project_clears_selection() {
    let dir = TestDataDir::new();
    ok(&dir, &["project", "create", "Demo"]);
    ok(&dir, &["project", "delete", "demo"]);
    let storage = StorageManager::new(dir.data_file());
    assert_eq!(storage.load_session().current_project, None);
    assert!(exec(&dir, &["project", "show"]).is_err());
}

/// Reports render for the selected project and can go to a file
#[test]
fn report_to_file() {
    let dir = TestDataDir::new();
    ok(&dir, &["project", "create", "Demo"]);
    ok(&dir, &["task", "add", "Write \"spec\""]);

    let out_path = dir.path().join("demo.csv");
    let out = ok(&dir, &["report", "--format", "csv", "-o", out_path.to_str().unwrap()]);
    assert!(out.starts_with("Wrote csv report to "));
    let csv = std::fs::read_to_string(&out_path).unwrap();
    assert!(csv.contains(",\"Write \"\"spec\"\"\",\"\",Medium,Pending,,"));

    let out = ok(&dir, &["report", "-f", "md", "-o", dir.path().to_str().unwrap()]);
    assert!(out.trim_end().ends_with("demo.md"));
    assert!(std::fs::read_to_string(dir.path().join("demo.md")).unwrap().starts_with("# Demo\n"));

    let md = ok(&dir, &["report", "-f", "md"]);
    assert!(md.starts_with("# Demo\n"));
    let json: serde_json::Value = serde_json::from_str(&ok(&dir, &["report", "-f", "json"])).unwrap();
    assert_eq!(json["nombre"], "Demo");
}

/// Stats and overdue views use the injected date
#[test]
fn stats_and_overdue_via_app() {
    let dir = TestDataDir::new();
    let storage = StorageManager::new(dir.data_file());
    let project = seeded_project();
    storage.save_project(&project).unwrap();

    let mut app = App::new(storage, Vec::new())
        .with_project(Some(project.id().to_string()))
        .with_today(fixed_today());
    app.dispatch(taskboard_cli::Command::Overdue).unwrap();
    app.dispatch(taskboard_cli::Command::Stats).unwrap();
    let out = String::from_utf8(app.into_output()).unwrap();

    assert!(out.starts_with("OVERDUE TASKS: Demo (2)\n"));
    assert!(out.contains("  Pending: 3 (37%)\n"));
    assert!(out.contains("  Blocked: 1 (12%)\n"));
}

/// Config file supplies the data path when no flag is given
#[test]
fn config_file_sets_data_path() {
    let dir = TestDataDir::new();
    let data = dir.path().join("from-config.json");
    let config = dir.path().join("taskboard.toml");
    std::fs::write(&config, format!("data_file = {:?}\n", data.to_string_lossy())).unwrap();

    let cli = Cli::try_parse_from(["taskboard", "--config", config.to_str().unwrap(), "user", "list"]).unwrap();
    let resolved = taskboard_cli::storage_config(&cli).unwrap();
    if std::env::var_os("TASKBOARD_DATA_FILE").is_none() {
        assert_eq!(resolved.data_file, data);
    }

    let cli = Cli::try_parse_from([
        "taskboard", "--config", config.to_str().unwrap(), "--data-file", "elsewhere.json", "user", "list",
    ])
    .unwrap();
    assert_eq!(taskboard_cli::storage_config(&cli).unwrap().data_file, std::path::PathBuf::from("elsewhere.json"));
}
