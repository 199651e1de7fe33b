//! Cancellable delayed and repeating actions on a virtual clock.
//!
//! The scheduler owns no threads. Time only moves when the owner calls
//! [`Scheduler::pop_due`] with a target instant, which makes firing order
//! fully deterministic: earliest due time first, ties in scheduling order.
//!
//! Every task is bound to the [`Mode`] that created it so the owner can
//! cancel a whole surface's pending work when that surface is dismissed.

use serde::{Deserialize, Serialize};

use super::mode::Mode;

/// Opaque handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Work the conversation controller performs when a task fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduledAction {
    /// Append a scripted bot line to the scope's transcript.
    BotReply { text: String },
    /// End the slider confirmation dwell.
    RevealTranscript,
    /// One second of voice recording elapsed.
    RecordingTick,
    /// Ask the host to scroll the scope's transcript to the bottom.
    ScrollToBottom,
}

#[derive(Debug, Clone)]
struct PendingTask {
    handle: TaskHandle,
    due_ms: u64,
    /// Tie-breaker; refreshed whenever a repeating task is re-armed.
    seq: u64,
    period_ms: Option<u64>,
    scope: Mode,
    action: ScheduledAction,
}

/// A task that came due during [`Scheduler::pop_due`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTask {
    pub handle: TaskHandle,
    pub scope: Mode,
    pub action: ScheduledAction,
    pub fired_at_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_handle: u64,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Current virtual time in milliseconds since the scheduler was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_in_scope(&self, scope: Mode) -> usize {
        self.pending.iter().filter(|t| t.scope == scope).count()
    }

    /// Due time of the earliest pending task.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.due_ms).min()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn schedule_once(&mut self, delay_ms: u64, scope: Mode, action: ScheduledAction) -> TaskHandle {
        self.insert(delay_ms, None, scope, action)
    }

    /// Schedule a task that fires every `period_ms` until cancelled.
    ///
    /// A zero period is treated as 1ms so that `pop_due` always terminates.
    pub fn schedule_repeating(
        &mut self,
        period_ms: u64,
        scope: Mode,
        action: ScheduledAction,
    ) -> TaskHandle {
        let period = period_ms.max(1);
        self.insert(period, Some(period), scope, action)
    }

    /// Cancel a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every task bound to `scope`, returning their handles.
    pub fn cancel_scope(&mut self, scope: Mode) -> Vec<TaskHandle> {
        let mut cancelled = Vec::new();
        self.pending.retain(|t| {
            if t.scope == scope {
                cancelled.push(t.handle);
                false
            } else {
                true
            }
        });
        cancelled
    }

    pub fn cancel_all(&mut self) -> Vec<TaskHandle> {
        self.pending.drain(..).map(|t| t.handle).collect()
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock
    /// to its due time. Repeating tasks are re-armed one period later.
    ///
    /// Once nothing else is due the clock is moved to `until_ms` and `None`
    /// is returned.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<FiredTask> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i);

        let Some(idx) = idx else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let fired_at = self.pending[idx].due_ms.max(self.now_ms);
        self.now_ms = fired_at;

        let task = match self.pending[idx].period_ms {
            Some(period) => {
                let seq = self.bump_seq();
                let task = &mut self.pending[idx];
                task.due_ms = fired_at + period;
                task.seq = seq;
                task.clone()
            }
            None => self.pending.swap_remove(idx),
        };

        Some(FiredTask {
            handle: task.handle,
            scope: task.scope,
            action: task.action,
            fired_at_ms: fired_at,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn insert(
        &mut self,
        delay_ms: u64,
        period_ms: Option<u64>,
        scope: Mode,
        action: ScheduledAction,
    ) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        let seq = self.bump_seq();
        self.pending.push(PendingTask {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            period_ms,
            scope,
            action,
        });
        handle
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, until: u64) -> Vec<FiredTask> {
        std::iter::from_fn(|| s.pop_due(until)).collect()
    }

    #[test]
    fn once_fires_exactly_once_at_due_time() {
        let mut s = Scheduler::new();
        let h = s.schedule_once(500, Mode::Tap, ScheduledAction::RevealTranscript);

        assert!(drain(&mut s, 499).is_empty());
        assert_eq!(s.now_ms(), 499);

        let fired = drain(&mut s, 500);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, h);
        assert_eq!(fired[0].fired_at_ms, 500);
        assert!(!s.is_pending(h));
        assert!(drain(&mut s, 10_000).is_empty());
    }

    #[test]
    fn repeating_fires_every_period() {
        let mut s = Scheduler::new();
        s.schedule_repeating(1000, Mode::Yap, ScheduledAction::RecordingTick);
        let fired = drain(&mut s, 5000);
        let times: Vec<u64> = fired.iter().map(|f| f.fired_at_ms).collect();
        assert_eq!(times, vec![1000, 2000, 3000, 4000, 5000]);
        assert_eq!(s.pending_count(), 1);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        let a = s.schedule_once(100, Mode::Tap, ScheduledAction::ScrollToBottom);
        let b = s.schedule_once(100, Mode::Type, ScheduledAction::ScrollToBottom);
        let fired = drain(&mut s, 100);
        assert_eq!(fired.iter().map(|f| f.handle).collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut s = Scheduler::new();
        let h = s.schedule_once(10, Mode::Idle, ScheduledAction::RevealTranscript);
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert!(drain(&mut s, 100).is_empty());
    }

    #[test]
    fn cancel_scope_only_touches_that_scope() {
        let mut s = Scheduler::new();
        s.schedule_once(10, Mode::Tap, ScheduledAction::ScrollToBottom);
        s.schedule_repeating(10, Mode::Tap, ScheduledAction::RecordingTick);
        let keep = s.schedule_once(10, Mode::Yap, ScheduledAction::ScrollToBottom);

        assert_eq!(s.cancel_scope(Mode::Tap).len(), 2);
        assert_eq!(s.pending_count(), 1);
        assert!(s.is_pending(keep));
    }

    #[test]
    fn zero_period_still_advances() {
        let mut s = Scheduler::new();
        s.schedule_repeating(0, Mode::Yap, ScheduledAction::RecordingTick);
        assert_eq!(drain(&mut s, 3).len(), 3);
    }
}
