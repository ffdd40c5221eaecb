//! Taskboard Report - read-only views over a project
//!
//! Every function here is a pure string builder over a [`Project`] and its
//! derived statistics:
//! - [`text_report`]: full plain-text report with an overdue section
//! - [`statistics_screen`]: counts with truncated percentages
//! - [`render_board`]: columns and tasks as a kanban board
//! - [`csv_export`], [`markdown_export`], [`json_export`]
//!
//! [`Project`]: taskboard_core::Project

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod board;
pub mod error;
pub mod export;
pub mod format;
pub mod text;

pub use board::{priority_marker, render_board};
pub use error::ReportError;
pub use export::{csv_export, json_export, markdown_export, CSV_HEADER, LABEL_SEPARATOR};
pub use format::ReportFormat;
pub use text::{overdue_listing, statistics_screen, text_report};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
