// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime tests

mod completion;
mod shutdown;
mod triggers;

use super::*;
use rl_adapters::{ExecutorCall, FakeExecutor, FakeReporter};
use rl_core::test_support::trigger;
use rl_core::{Outcome, PipelineKind, RunId, RunStatus, SequentialIdGen, TriggerEvent};

type TestRuntime = Runtime<FakeExecutor, FakeReporter, SequentialIdGen>;

struct TestContext {
    runtime: TestRuntime,
    event_rx: mpsc::Receiver<Event>,
    executor: FakeExecutor,
    reporter: FakeReporter,
}

fn setup() -> TestContext {
    setup_with_config(PipelineConfig::default())
}

fn setup_with_config(config: PipelineConfig) -> TestContext {
    let executor = FakeExecutor::new();
    let reporter = FakeReporter::new();
    let (event_tx, event_rx) = mpsc::channel(100);
    let runtime = Runtime::new(
        RuntimeDeps {
            executor: executor.clone(),
            reporter: reporter.clone(),
        },
        config,
        SequentialIdGen::default(),
        event_tx,
    );
    TestContext {
        runtime,
        event_rx,
        executor,
        reporter,
    }
}

fn build_only(t: TriggerEvent) -> Event {
    Event::TriggerReceived {
        trigger: t,
        pipelines: vec![PipelineKind::BuildTest],
    }
}

impl TestContext {
    /// Submit a build-test trigger and return the new run's id
    async fn push(&self, branch: &str, commit: &str) -> RunId {
        let follow_up = self
            .runtime
            .handle_event(build_only(trigger(branch, commit)))
            .await
            .unwrap();
        assert!(follow_up.is_empty());
        let Some(ExecutorCall::Start { run_id, .. }) = self.executor.calls().pop() else {
            panic!("expected a start call");
        };
        run_id
    }

    /// Let the fake executor finish a run and feed the result back in
    async fn finish(&mut self, run_id: &RunId, outcome: Outcome) {
        assert!(self.executor.finish(run_id.as_str(), outcome).await);
        let event = self.event_rx.recv().await.unwrap();
        let follow_up = self.runtime.handle_event(event).await.unwrap();
        assert!(follow_up.is_empty());
    }
}
