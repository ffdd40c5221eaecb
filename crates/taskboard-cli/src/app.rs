//! Command handlers
//!
//! Each handler loads what it needs from storage, applies one mutation and
//! saves the touched entity before printing. Output goes to any writer so
//! the handlers can be driven from tests.

use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use taskboard_core::{ColumnId, Project, Task, TaskId, TaskUpdate, User, UserId};
use taskboard_report::{overdue_listing, render_board, statistics_screen};
use taskboard_storage::{Session, StorageManager};

use crate::cli::{
    ColumnCommand, Command, ProjectCommand, TaskAddArgs, TaskCommand, TaskUpdateArgs, UserCommand,
};
use crate::resolve::resolve;

/// Front-end state for one invocation
pub struct App<W: Write> {
    storage: StorageManager,
    session: Session,
    project_ref: Option<String>,
    today: NaiveDate,
    out: W,
}

impl<W: Write> App<W> {
    /// Create app over `storage`, loading the persisted selection
    pub fn new(storage: StorageManager, out: W) -> Self {
        let session = storage.load_session();
        Self {
            storage,
            session,
            project_ref: None,
            today: taskboard_core::time::today(),
            out,
        }
    }

    /// With explicit project reference instead of the open project
    #[must_use]
    pub fn with_project(mut self, reference: Option<String>) -> Self {
        self.project_ref = reference;
        self
    }

    /// With fixed "today" for overdue checks
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Consume app, returning the writer
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run one command
    ///
    /// # Errors
    /// Returns validation, lookup and storage failures with context
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::User { command } => self.user(command),
            Command::Project { command } => self.project(command),
            Command::Column { command } => self.column(command),
            Command::Task { command } => self.task(command),
            Command::Stats => {
                let project = self.current_project()?;
                write!(self.out, "{}", statistics_screen(&project, self.today))?;
                Ok(())
            }
            Command::Overdue => {
                let project = self.current_project()?;
                write!(self.out, "{}", overdue_listing(&project, self.today))?;
                Ok(())
            }
            Command::Report { format, output } => {
                let project = self.current_project()?;
                let rendered = format.render(&project, self.today)?;
                match output {
                    Some(path) => {
                        let path = if path.is_dir() {
                            path.join(format.file_name(project.name()))
                        } else {
                            path
                        };
                        std::fs::write(&path, &rendered)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        writeln!(self.out, "Wrote {format} report to {}", path.display())?;
                    }
                    None => write!(self.out, "{rendered}")?,
                }
                Ok(())
            }
        }
    }

    // Users

    fn user(&mut self, command: UserCommand) -> Result<()> {
        match command {
            UserCommand::Add { name, email } => {
                let user = User::new(name, email)?;
                self.storage.save_user(&user)?;
                writeln!(self.out, "Created user {} ({})", user.name(), user.id())?;
            }
            UserCommand::List => {
                let users = self.storage.load_users();
                if users.is_empty() {
                    writeln!(self.out, "No users registered")?;
                }
                for (i, user) in users.iter().enumerate() {
                    let marker = if self.session.current_user.as_ref() == Some(user.id()) {
                        " *"
                    } else {
                        ""
                    };
                    writeln!(
                        self.out,
                        "{}. {:<20} | {:<25} | {}{marker}",
                        i + 1,
                        user.name(),
                        user.email(),
                        user.id().short()
                    )?;
                }
            }
            UserCommand::Delete { user } => {
                let user = self.find_user(&user)?;
                self.storage.delete_user(user.id())?;
                self.session.forget_user(user.id());
                writeln!(self.out, "Deleted user {}", user.name())?;
            }
            UserCommand::Select { user } => {
                let user = self.find_user(&user)?;
                self.session.current_user = Some(user.id().clone());
                self.storage.save_session(&self.session)?;
                writeln!(self.out, "Current user: {}", user.name())?;
            }
        }
        Ok(())
    }

    fn find_user(&self, reference: &str) -> Result<User> {
        let users = self.storage.load_users();
        let user = resolve("user", reference, &users, |u| u.id().as_str(), User::email)?;
        Ok(user.clone())
    }

    // Projects

    fn project(&mut self, command: ProjectCommand) -> Result<()> {
        match command {
            ProjectCommand::Create {
                name,
                description,
                owner,
            } => {
                let owner: Option<UserId> = match owner {
                    Some(reference) => Some(self.find_user(&reference)?.id().clone()),
                    None => self.session.current_user.clone(),
                };
                let mut project = Project::new(name)?;
                if let Some(description) = description {
                    project = project.with_description(description);
                }
                if let Some(owner) = owner {
                    project.add_member(owner.clone());
                    project = project.with_owner(owner);
                }
                self.storage.save_project(&project)?;
                self.session.current_project = Some(project.id().clone());
                self.storage.save_session(&self.session)?;
                writeln!(self.out, "Created project {} ({})", project.name(), project.id())?;
            }
            ProjectCommand::List => {
                let projects = self.storage.load_projects();
                if projects.is_empty() {
                    writeln!(self.out, "No projects")?;
                }
                for (i, project) in projects.iter().enumerate() {
                    let marker = if self.session.current_project.as_ref() == Some(project.id()) {
                        " *"
                    } else {
                        ""
                    };
                    writeln!(
                        self.out,
                        "{}. {:<25} | {} tasks | {} columns | {}{marker}",
                        i + 1,
                        project.name(),
                        project.task_count(),
                        project.columns().len(),
                        project.id().short()
                    )?;
                }
            }
            ProjectCommand::Open { project } => {
                let project = self.find_project(&project)?;
                self.session.current_project = Some(project.id().clone());
                self.storage.save_session(&self.session)?;
                writeln!(self.out, "Opened project {}", project.name())?;
            }
            ProjectCommand::Delete { project } => {
                let project = self.find_project(&project)?;
                self.storage.delete_project(project.id())?;
                self.session.forget_project(project.id());
                writeln!(
                    self.out,
                    "Deleted project {} and its {} tasks",
                    project.name(),
                    project.task_count()
                )?;
            }
            ProjectCommand::Show => {
                let project = self.current_project()?;
                write!(self.out, "{}", render_board(&project))?;
            }
            ProjectCommand::AddMember { user } => {
                let user = self.find_user(&user)?;
                let mut project = self.current_project()?;
                if project.add_member(user.id().clone()) {
                    self.storage.save_project(&project)?;
                    writeln!(self.out, "Added {} to {}", user.name(), project.name())?;
                } else {
                    writeln!(self.out, "{} is already a member", user.name())?;
                }
            }
            ProjectCommand::RemoveMember { user } => {
                let user = self.find_user(&user)?;
                let mut project = self.current_project()?;
                if project.remove_member(user.id()) {
                    self.storage.save_project(&project)?;
                    writeln!(self.out, "Removed {} from {}", user.name(), project.name())?;
                } else {
                    writeln!(self.out, "{} is not a member", user.name())?;
                }
            }
        }
        Ok(())
    }

    fn find_project(&self, reference: &str) -> Result<Project> {
        let projects = self.storage.load_projects();
        let project = resolve(
            "project",
            reference,
            &projects,
            |p| p.id().as_str(),
            Project::name,
        )?;
        Ok(project.clone())
    }

    fn current_project(&self) -> Result<Project> {
        if let Some(reference) = &self.project_ref {
            return self.find_project(reference);
        }
        let Some(id) = &self.session.current_project else {
            bail!("no project selected; pass --project or run `project open`");
        };
        self.storage
            .load_project(id)
            .with_context(|| format!("open project {id} no longer exists"))
    }

    // Columns

    fn column(&mut self, command: ColumnCommand) -> Result<()> {
        let mut project = self.current_project()?;
        match command {
            ColumnCommand::Add { name } => {
                let column = project.add_column(name)?;
                let (name, order) = (column.name().to_string(), column.order());
                self.storage.save_project(&project)?;
                writeln!(self.out, "Added column {name} (order {order})")?;
            }
            ColumnCommand::Rename { column, name } => {
                let id = find_column(&project, &column)?;
                let column = project
                    .column_mut(&id)
                    .with_context(|| format!("column {id} vanished"))?;
                let old = column.name().to_string();
                column.rename(name)?;
                let new = column.name().to_string();
                self.storage.save_project(&project)?;
                writeln!(self.out, "Renamed column {old} to {new}")?;
            }
            ColumnCommand::Delete { column } => {
                let id = find_column(&project, &column)?;
                let tasks = project.column(&id).map_or(0, |c| c.task_count());
                project.remove_column(&id);
                self.storage.save_project(&project)?;
                writeln!(self.out, "Deleted column and {tasks} tasks")?;
            }
        }
        Ok(())
    }

    // Tasks

    fn task(&mut self, command: TaskCommand) -> Result<()> {
        let mut project = self.current_project()?;
        match command {
            TaskCommand::Add(args) => self.add_task(&mut project, args)?,
            TaskCommand::Update(args) => self.update_task(&mut project, args)?,
            TaskCommand::Move { task, column } => {
                let id = find_task(&project, &task)?;
                let to = find_column(&project, &column)?;
                if !project.move_task(&id, &to) {
                    bail!("could not move task {id}");
                }
                self.storage.save_project(&project)?;
                let name = project.column(&to).map(|c| c.name().to_string()).unwrap_or_default();
                writeln!(self.out, "Moved task {} to {name}", id.short())?;
            }
            TaskCommand::Delete { task } => {
                let id = find_task(&project, &task)?;
                let removed = project
                    .remove_task(&id)
                    .with_context(|| format!("task {id} vanished"))?;
                self.storage.save_project(&project)?;
                writeln!(self.out, "Deleted task {}", removed.title())?;
            }
            TaskCommand::Label { task, label } => {
                let id = find_task(&project, &task)?;
                let added = project.task_mut(&id).is_some_and(|t| t.add_label(&label));
                if added {
                    self.storage.save_project(&project)?;
                    writeln!(self.out, "Labelled {} with {}", id.short(), label.trim())?;
                } else {
                    writeln!(self.out, "Label unchanged")?;
                }
            }
            TaskCommand::Unlabel { task, label } => {
                let id = find_task(&project, &task)?;
                let removed = project.task_mut(&id).is_some_and(|t| t.remove_label(&label));
                if removed {
                    self.storage.save_project(&project)?;
                    writeln!(self.out, "Removed label {} from {}", label.trim(), id.short())?;
                } else {
                    writeln!(self.out, "Label unchanged")?;
                }
            }
            TaskCommand::Search { term } => {
                let hits = project.search_tasks(&term)?;
                if hits.is_empty() {
                    writeln!(self.out, "No tasks match '{}'", term.trim())?;
                }
                for (i, (column, task)) in hits.iter().enumerate() {
                    writeln!(self.out, "{}. {} (in '{}')", i + 1, task.title(), column.name())?;
                    writeln!(
                        self.out,
                        "   ID: {}... | {} | {}",
                        task.id().short(),
                        task.priority(),
                        task.state()
                    )?;
                }
            }
        }
        Ok(())
    }

    fn add_task(&mut self, project: &mut Project, args: TaskAddArgs) -> Result<()> {
        let column = match &args.column {
            Some(reference) => find_column(project, reference)?,
            None => project
                .sorted_columns()
                .first()
                .map(|c| c.id().clone())
                .context("project has no columns; add one with `column add`")?,
        };

        let mut task = Task::new(args.title)?.with_priority(args.priority);
        if let Some(description) = args.description {
            task = task.with_description(description);
        }
        if let Some(assignee) = args.assignee {
            task = task.with_assignee(assignee);
        }
        if let Some(due) = args.due {
            task = task.with_due_date(due);
        }
        for label in &args.labels {
            task.add_label(label);
        }

        let id = task.id().clone();
        if !project.add_task(&column, task) {
            bail!("could not add task to column {column}");
        }
        self.storage.save_project(project)?;
        writeln!(self.out, "Created task {id}")?;
        Ok(())
    }

    fn update_task(&mut self, project: &mut Project, args: TaskUpdateArgs) -> Result<()> {
        let id = find_task(project, &args.task)?;
        let mut update = TaskUpdate {
            title: args.title,
            description: args.description,
            priority: args.priority,
            state: args.state,
            ..TaskUpdate::default()
        };
        if args.unassign {
            update = update.unassign();
        } else if let Some(assignee) = args.assignee {
            update = update.assignee(assignee);
        }
        if args.clear_due {
            update = update.clear_due_date();
        } else if let Some(due) = args.due {
            update = update.due_date(due);
        }

        let task = project
            .task_mut(&id)
            .with_context(|| format!("task {id} vanished"))?;
        task.update(update)?;
        let title = task.title().to_string();
        self.storage.save_project(project)?;
        writeln!(self.out, "Updated task {title}")?;
        Ok(())
    }
}

fn find_column(project: &Project, reference: &str) -> Result<ColumnId> {
    let columns = project.sorted_columns();
    let column = resolve(
        "column",
        reference,
        columns.iter().copied(),
        |c| c.id().as_str(),
        |c| c.name(),
    )?;
    Ok(column.id().clone())
}

fn find_task(project: &Project, reference: &str) -> Result<TaskId> {
    let task = resolve(
        "task",
        reference,
        project.all_tasks(),
        |t| t.id().as_str(),
        Task::title,
    )?;
    Ok(task.id().clone())
}

