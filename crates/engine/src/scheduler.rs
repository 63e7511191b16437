// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run admission and cancellation.
//!
//! The active run table maps `(concurrency key, pipeline kind)` to at most
//! one running run. Each slot has its own lock; the table lock is only held
//! long enough to find or create a slot, so triggers for unrelated branches
//! never wait on each other.

use parking_lot::Mutex;
use rl_core::{
    ConcurrencyKey, IdGen, KeyPolicy, Outcome, PipelineKind, RunHandle, RunId, RunStatus,
    TriggerEvent, UuidIdGen,
};
use std::collections::HashMap;
use std::sync::Arc;

type SlotKey = (ConcurrencyKey, PipelineKind);

#[derive(Debug, Default)]
struct Slot {
    current: Option<RunHandle>,
}

/// Result of [`RunScheduler::submit`].
#[derive(Debug, Clone)]
pub struct Admission {
    /// The newly admitted run, now `Running`
    pub handle: RunHandle,
    /// The run it replaced, already moved to `Cancelled`.
    /// The caller owes the executor a cancellation signal for it.
    pub superseded: Option<RunHandle>,
}

/// Result of [`RunScheduler::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The run was current for its slot; it left the table with this status
    Recorded(RunStatus),
    /// The run had been superseded or already completed; nothing changed
    Discarded,
}

/// Admits, tracks and cancels runs.
///
/// Last submission wins: submitting for an occupied slot cancels the
/// occupant. Instances are independent; the daemon owns exactly one.
#[derive(Debug)]
pub struct RunScheduler<G: IdGen = UuidIdGen> {
    policy: KeyPolicy,
    id_gen: G,
    slots: Mutex<HashMap<SlotKey, Arc<Mutex<Slot>>>>,
}

impl Default for RunScheduler<UuidIdGen> {
    fn default() -> Self {
        Self::new(KeyPolicy::default(), UuidIdGen)
    }
}

impl<G: IdGen> RunScheduler<G> {
    pub fn new(policy: KeyPolicy, id_gen: G) -> Self {
        Self {
            policy,
            id_gen,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> &KeyPolicy {
        &self.policy
    }

    /// Admit a run of `pipeline` for `trigger`, superseding the slot's
    /// current run if there is one.
    pub fn submit(&self, trigger: &TriggerEvent, pipeline: PipelineKind) -> Admission {
        let key = self.policy.key_for(trigger, pipeline);
        let slot = self.slot((key.clone(), pipeline));
        let mut slot = slot.lock();

        let handle = RunHandle::new(
            RunId::new(self.id_gen.next()),
            key,
            pipeline,
            trigger.clone(),
        );
        let superseded = slot.current.replace(handle.clone());
        if let Some(previous) = &superseded {
            previous.finish(RunStatus::Cancelled);
            tracing::info!(
                run_id = %previous.id(),
                superseded_by = %handle.id(),
                key = %handle.key(),
                pipeline = %pipeline,
                "superseded run"
            );
        }
        tracing::info!(
            run_id = %handle.id(),
            key = %handle.key(),
            pipeline = %pipeline,
            trigger = %trigger,
            "admitted run"
        );

        Admission { handle, superseded }
    }

    /// Record the outcome of a run.
    ///
    /// Only the slot's current run can complete. Late results from
    /// superseded runs, repeated completions and unknown handles are
    /// discarded without touching the table.
    pub fn complete(&self, handle: &RunHandle, outcome: Outcome) -> Completion {
        let slot_key = (handle.key().clone(), handle.pipeline());
        let Some(slot) = self.slots.lock().get(&slot_key).cloned() else {
            return Completion::Discarded;
        };

        let completion = {
            let mut slot = slot.lock();
            match &slot.current {
                Some(current) if current == handle => {
                    slot.current = None;
                    let status = RunStatus::from(outcome);
                    handle.finish(status);
                    Completion::Recorded(status)
                }
                _ => Completion::Discarded,
            }
        };
        drop(slot);

        match completion {
            Completion::Recorded(status) => {
                tracing::info!(run_id = %handle.id(), key = %handle.key(), %status, "run completed");
                self.prune(&slot_key);
            }
            Completion::Discarded => {
                tracing::debug!(run_id = %handle.id(), key = %handle.key(), ?outcome, "discarded stale completion");
            }
        }
        completion
    }

    /// Current run for a slot, if any.
    pub fn active(&self, key: &ConcurrencyKey, pipeline: PipelineKind) -> Option<RunHandle> {
        let slot = self.slots.lock().get(&(key.clone(), pipeline)).cloned()?;
        let current = slot.lock().current.clone();
        current
    }

    /// Snapshot of every running run, ordered by key then pipeline.
    pub fn active_runs(&self) -> Vec<RunHandle> {
        let mut runs: Vec<RunHandle> = self
            .slot_snapshot()
            .iter()
            .filter_map(|slot| slot.lock().current.clone())
            .collect();
        runs.sort_by(|a, b| (a.key(), a.pipeline()).cmp(&(b.key(), b.pipeline())));
        runs
    }

    pub fn active_count(&self) -> usize {
        self.slot_snapshot()
            .iter()
            .filter(|slot| slot.lock().current.is_some())
            .count()
    }

    /// Cancel every running run and empty the table (shutdown).
    ///
    /// Returns the cancelled runs so the caller can signal the executor.
    pub fn drain(&self) -> Vec<RunHandle> {
        let drained: Vec<RunHandle> = self
            .slot_snapshot()
            .iter()
            .filter_map(|slot| slot.lock().current.take())
            .inspect(|run| {
                run.finish(RunStatus::Cancelled);
            })
            .collect();
        self.slots
            .lock()
            .retain(|_, slot| Arc::strong_count(slot) > 1 || slot.lock().current.is_some());
        if !drained.is_empty() {
            tracing::info!(count = drained.len(), "drained active runs");
        }
        drained
    }

    fn slot(&self, key: SlotKey) -> Arc<Mutex<Slot>> {
        Arc::clone(self.slots.lock().entry(key).or_default())
    }

    fn slot_snapshot(&self) -> Vec<Arc<Mutex<Slot>>> {
        self.slots.lock().values().cloned().collect()
    }

    /// Drop an empty slot nobody else is holding.
    ///
    /// Clones of a slot are only taken under the table lock, so a strong
    /// count of one while holding that lock means no submit is in flight.
    fn prune(&self, slot_key: &SlotKey) {
        let mut slots = self.slots.lock();
        let idle = slots
            .get(slot_key)
            .is_some_and(|slot| Arc::strong_count(slot) == 1 && slot.lock().current.is_none());
        if idle {
            slots.remove(slot_key);
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
