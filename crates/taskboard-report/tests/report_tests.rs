//! Integration tests for report generation over the seeded project

use pretty_assertions::assert_eq;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use taskboard_core::{Project, Record};
use taskboard_report::{
    csv_export, markdown_export, overdue_listing, render_board, statistics_screen, text_report,
    ReportFormat, CSV_HEADER,
};
use taskboard_test_utils::{fixed_today, seeded_project};

/// Percentages on the statistics screen truncate instead of rounding
#[test]
fn statistics_screen_truncates_percentages() {
    let screen = statistics_screen(&seeded_project(), fixed_today());
    let expected = "\
STATISTICS: Demo

Total tasks: 8

BY STATE:
  Pending: 3 (37%)
  In Progress: 2 (25%)
  Completed: 2 (25%)
  Blocked: 1 (12%)

BY PRIORITY:
  Urgent: 2 (25%)
  High: 2 (25%)
  Medium: 3 (37%)
  Low: 1 (12%)

ASSIGNMENT:
  Assigned: 5 (62%)
  Unassigned: 3 (37%)

BY COLUMN:
  Pending: 3 tasks
  In Progress: 3 tasks
  Completed: 2 tasks
";
    assert_eq!(screen, expected);
}

/// Text report lists every section, overdue tasks included
#[test]
fn text_report_sections() {
    let report = text_report(&seeded_project(), fixed_today());
    assert!(report.starts_with(&format!("{}\nPROJECT REPORT: Demo\n", "=".repeat(60))));
    assert!(report.contains("Description: Seeded board\n"));

    let body = &report[report.find("GENERAL STATISTICS:").unwrap()..];
    let expected = "\
GENERAL STATISTICS:
  Total tasks: 8
  Total columns: 3
  Progress: 25.0%

BY STATE:
  Pending: 3
  In Progress: 2
  Completed: 2
  Blocked: 1

BY PRIORITY:
  Low: 1
  Medium: 3
  High: 2
  Urgent: 2

TASK ASSIGNMENT:
  ana: 3
  bruno: 2
  Unassigned: 3

OVERDUE TASKS:
  - Fix login (due: 2025-03-09)
  - Blocked on API (due: 2025-03-09)

DISTRIBUTION BY COLUMN:
  Pending:
    * Write spec [Urgent]
    * Fix login [High]
    * Update docs [Low]
  In Progress:
    * Build API [Urgent]
    * Design UI [Medium]
    * Blocked on API [High]
  Completed:
    * Set up repo [Medium]
    * Kickoff [Medium]

============================================================
";
    assert_eq!(body, expected);
}

/// CSV has one row per task with a fixed column count
#[test]
fn csv_rows_match_tasks() {
    let mut project = seeded_project();
    let id = project.columns()[0].tasks()[0].id().clone();
    project.task_mut(&id).unwrap().add_label("docs");
    project.task_mut(&id).unwrap().add_label("q1");

    let csv = csv_export(&project);
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 9);
    assert!(lines[1].starts_with(&format!("{},\"Write spec\",\"First draft\",Urgent,Pending,ana,", id)));
    assert!(lines[1].ends_with(",docs|q1"));
    for line in &lines[1..] {
        assert_eq!(line.matches(',').count(), 7, "{line}");
    }
}

fn headings(markdown: &str, wanted: HeadingLevel) -> Vec<String> {
    let mut found = Vec::new();
    let mut current: Option<String> = None;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) if level == wanted => current = Some(String::new()),
            Event::Text(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => found.extend(current.take()),
            _ => {}
        }
    }
    found
}

/// Markdown groups tasks under one heading per column and marks empty ones
#[test]
fn markdown_structure() {
    let mut project = seeded_project();
    project.add_column("Archive").unwrap();
    let md = markdown_export(&project);

    assert_eq!(headings(&md, HeadingLevel::H1), ["Demo"]);
    assert_eq!(
        headings(&md, HeadingLevel::H2),
        ["Pending", "In Progress", "Completed", "Archive"]
    );

    let items = Parser::new(&md)
        .filter(|e| matches!(e, Event::Start(Tag::Item)))
        .count();
    // 8 tasks, plus nested description/assignee bullets
    assert_eq!(items, 8 + 1 + 5);

    let emphasized: Vec<_> = Parser::new(&md)
        .skip_while(|e| !matches!(e, Event::Start(Tag::Emphasis)))
        .skip(1)
        .take(1)
        .collect();
    assert_eq!(emphasized, [Event::Text("(empty)".into())]);
    assert!(md.contains("- **Write spec** (Urgent, Pending)\n  - First draft\n  - Assigned to: ana\n"));
}

/// Board lists columns in order with priority markers
#[test]
fn board_rendering() {
    let board = render_board(&seeded_project());
    let headers: Vec<_> = board.lines().filter(|l| l.starts_with("+- ")).collect();
    assert_eq!(
        headers,
        ["+- Pending (3 tasks)", "+- In Progress (3 tasks)", "+- Completed (2 tasks)"]
    );
    assert!(board.contains("| !! Write spec\n"));
    assert!(board.contains("| [L] Update docs\n"));
    assert_eq!(board.matches("Assigned: Unassigned").count(), 3);
}

/// Overdue listing names the column and assignee
#[test]
fn overdue_listing_for_seeded_project() {
    let listing = overdue_listing(&seeded_project(), fixed_today());
    assert_eq!(
        listing,
        "OVERDUE TASKS: Demo (2)\n  \
         - Fix login [High] in 'Pending' (due: 2025-03-09, bruno)\n  \
         - Blocked on API [High] in 'In Progress' (due: 2025-03-09, bruno)\n"
    );
}

/// JSON format reproduces the project record
#[test]
fn json_format_round_trips() {
    let project = seeded_project();
    let json = ReportFormat::Json.render(&project, fixed_today()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(Project::from_record(&value).unwrap(), project);
}

proptest::proptest! {
    /// Quotes and commas in titles never change the row's field layout
    #[test]
    fn csv_escapes_any_title(title in "t[a-z ,\"]{0,15}x") {
        let mut project = seeded_project();
        let pending = project.columns()[0].id().clone();
        project.add_task(&pending, taskboard_core::Task::new(title.clone()).unwrap());

        let csv = csv_export(&project);
        let escaped = format!(",\"{}\",", title.replace('"', "\"\""));
        proptest::prop_assert!(csv.contains(&escaped));
        proptest::prop_assert_eq!(csv.lines().count(), 10);
    }
}
