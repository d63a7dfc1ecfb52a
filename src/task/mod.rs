//! Build tasks.
//!
//! Each task reads one source glob, applies its transformation and writes
//! into the distribution directory. Tasks communicate only through the
//! filesystem: a task returns a [`TaskReport`] as its completion signal and
//! never triggers a reload itself - the watch coordinator decides that.

pub mod html;
pub mod image;
mod minify;
pub mod script;
pub mod style;

pub use minify::{minify_css, minify_js};

use std::path::PathBuf;

use anyhow::Result;

use crate::config::SiteConfig;

/// The four pipeline tasks, one per source glob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKind {
    Html,
    Style,
    Script,
    Image,
}

impl TaskKind {
    /// All tasks in pipeline order (html first).
    pub const ALL: [TaskKind; 4] = [
        TaskKind::Html,
        TaskKind::Style,
        TaskKind::Script,
        TaskKind::Image,
    ];

    /// Short name for log output.
    pub const fn label(self) -> &'static str {
        match self {
            TaskKind::Html => "html",
            TaskKind::Style => "style",
            TaskKind::Script => "script",
            TaskKind::Image => "image",
        }
    }

    /// Run this task against the given config.
    pub fn run(self, config: &SiteConfig) -> Result<TaskReport> {
        match self {
            TaskKind::Html => html::run(config),
            TaskKind::Style => style::run(config),
            TaskKind::Script => script::run(config),
            TaskKind::Image => image::run(config),
        }
    }
}

/// Completion signal of a task: what it was and what it wrote.
#[derive(Debug)]
pub struct TaskReport {
    pub kind: TaskKind,
    /// Files written into the distribution directory.
    pub outputs: Vec<PathBuf>,
}

impl TaskReport {
    pub fn new(kind: TaskKind, outputs: Vec<PathBuf>) -> Self {
        Self { kind, outputs }
    }
}
