//! Pure debouncer: timing and task-level deduplication.
//!
//! Raw notify events are collapsed into a set of dirty task kinds; a burst
//! of saves in one directory costs exactly one rebuild of that task.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::task::TaskKind;

pub(super) const DEBOUNCE_MS: u64 = 300;
pub(super) const REBUILD_COOLDOWN_MS: u64 = 800;

pub(super) struct Debouncer {
    /// Dirty tasks (dedup is free via set semantics); BTreeSet keeps
    /// pipeline order on drain.
    dirty: BTreeSet<TaskKind>,
    last_event: Option<Instant>,
    last_build: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new() -> Self {
        Self {
            dirty: BTreeSet::new(),
            last_event: None,
            last_build: None,
        }
    }

    /// Mark a task dirty and restart the debounce window.
    pub(super) fn mark(&mut self, kind: TaskKind) {
        self.dirty.insert(kind);
        self.last_event = Some(Instant::now());
    }

    /// Take the dirty set if debounce + cooldown elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<Vec<TaskKind>> {
        if !self.is_ready() {
            return None;
        }

        let dirty: Vec<_> = std::mem::take(&mut self.dirty).into_iter().collect();
        self.last_event = None;

        if dirty.is_empty() {
            return None;
        }

        self.last_build = Some(Instant::now());
        Some(dirty)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };

        if last_event.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
            return false;
        }

        if let Some(last_build) = self.last_build
            && last_build.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS)
        {
            return false;
        }

        !self.dirty.is_empty()
    }

    /// Precise sleep duration until next possible ready time.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        let debounce_remaining =
            Duration::from_millis(DEBOUNCE_MS).saturating_sub(last_event.elapsed());

        let cooldown_remaining = self
            .last_build
            .map(|t| Duration::from_millis(REBUILD_COOLDOWN_MS).saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        debounce_remaining
            .max(cooldown_remaining)
            .max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_debouncer_never_ready() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.is_ready());
        assert!(debouncer.take_if_ready().is_none());
    }

    #[test]
    fn test_fresh_event_not_ready_yet() {
        let mut debouncer = Debouncer::new();
        debouncer.mark(TaskKind::Style);
        // Within the debounce window nothing is taken
        assert!(debouncer.take_if_ready().is_none());
        assert_eq!(debouncer.dirty.len(), 1);
    }

    #[test]
    fn test_dedup_same_task() {
        let mut debouncer = Debouncer::new();
        debouncer.mark(TaskKind::Script);
        debouncer.mark(TaskKind::Script);
        debouncer.mark(TaskKind::Script);
        assert_eq!(debouncer.dirty.len(), 1);
    }

    #[test]
    fn test_drain_keeps_pipeline_order() {
        let mut debouncer = Debouncer::new();
        debouncer.mark(TaskKind::Image);
        debouncer.mark(TaskKind::Html);
        debouncer.mark(TaskKind::Style);
        // Force the window to have elapsed
        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 1));

        let dirty = debouncer.take_if_ready().unwrap();
        assert_eq!(dirty, vec![TaskKind::Html, TaskKind::Style, TaskKind::Image]);
        assert!(debouncer.dirty.is_empty());
    }

    #[test]
    fn test_cooldown_blocks_immediate_rebuild() {
        let mut debouncer = Debouncer::new();
        debouncer.mark(TaskKind::Html);
        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 1));
        assert!(debouncer.take_if_ready().is_some());

        // A new event right after a build waits for the cooldown
        debouncer.mark(TaskKind::Html);
        debouncer.last_event = Some(Instant::now() - Duration::from_millis(DEBOUNCE_MS + 1));
        assert!(!debouncer.is_ready());
    }

    #[test]
    fn test_sleep_duration_idle_is_long() {
        let debouncer = Debouncer::new();
        assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));
    }
}
