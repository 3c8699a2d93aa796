//! Run session: spawns aggregation runs and delivers their notifications.
//!
//! Each run reports through its own channel: zero or more
//! [`RunEvent::Progress`] followed by exactly one terminal event. Starting a
//! new run cancels the previous one; a superseded run stops at its next
//! request boundary and delivers nothing further.

use std::sync::{Arc, Mutex};

use gather_core::{FetchError, RunToken};
use tokio::sync::mpsc;

use crate::aggregate::{Aggregator, Progress};
use crate::api::WikiApi;
use crate::schema::Collection;

/// Notification from a running aggregation
#[derive(Debug)]
pub enum RunEvent {
    Progress(Progress),
    Failed(FetchError),
    Completed(Vec<Collection>),
}

impl RunEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress(_))
    }
}

/// Where a run stands, as seen by its listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    FetchingCollections,
    /// `index` is 1-based
    FetchingPages { index: usize, total: usize },
    Done,
    Failed,
}

impl RunState {
    /// State after observing `event`. `Done` and `Failed` absorb everything.
    pub fn advance(self, event: &RunEvent) -> RunState {
        if self.is_terminal() {
            return self;
        }
        match event {
            RunEvent::Progress(Progress::FetchingCollections { .. })
            | RunEvent::Progress(Progress::CollectionsFound { .. }) => Self::FetchingCollections,
            RunEvent::Progress(Progress::FetchingPages { index, total, .. }) => {
                Self::FetchingPages {
                    index: *index,
                    total: *total,
                }
            }
            RunEvent::Failed(_) => Self::Failed,
            RunEvent::Completed(_) => Self::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Listener side of one run
pub struct RunHandle {
    token: RunToken,
    events: mpsc::UnboundedReceiver<RunEvent>,
    state: RunState,
}

impl RunHandle {
    /// Next notification; `None` once the run is over or was superseded.
    pub async fn next_event(&mut self) -> Option<RunEvent> {
        let event = self.events.recv().await?;
        self.state = self.state.advance(&event);
        Some(event)
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Token that cancels this run
    pub fn token(&self) -> &RunToken {
        &self.token
    }
}

/// Starts runs against one wiki; only the latest run is live.
pub struct Session<A> {
    aggregator: Arc<Aggregator<A>>,
    active: Arc<Mutex<Option<RunToken>>>,
}

/// Send `event` unless `token` was cancelled. The check and the send happen
/// under the session lock, which is also held while a run is superseded.
fn deliver(
    active: &Mutex<Option<RunToken>>,
    token: &RunToken,
    tx: &mpsc::UnboundedSender<RunEvent>,
    event: RunEvent,
) -> bool {
    let _guard = active.lock().expect("session lock poisoned");
    if token.is_cancelled() {
        return false;
    }
    let _ = tx.send(event);
    true
}

impl<A: WikiApi + 'static> Session<A> {
    pub fn new(aggregator: Aggregator<A>) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            active: Arc::new(Mutex::new(None)),
        }
    }

    pub fn aggregator(&self) -> &Aggregator<A> {
        &self.aggregator
    }

    /// Spawn a run for `user` on the current tokio runtime.
    pub fn start(&self, user: impl Into<String>) -> RunHandle {
        let user = user.into();
        let token = RunToken::new();
        self.replace_active(Some(token.clone()));

        let (tx, rx) = mpsc::unbounded_channel();
        let aggregator = Arc::clone(&self.aggregator);
        let active = Arc::clone(&self.active);
        let run_token = token.clone();
        tokio::spawn(async move {
            let progress_tx = tx.clone();
            let progress_active = Arc::clone(&active);
            let progress_token = run_token.clone();
            let result = aggregator
                .run(&user, &run_token, move |p| {
                    deliver(
                        &progress_active,
                        &progress_token,
                        &progress_tx,
                        RunEvent::Progress(p),
                    );
                })
                .await;

            let event = match result {
                Ok(collections) => RunEvent::Completed(collections),
                Err(e) => RunEvent::Failed(e),
            };
            if !deliver(&active, &run_token, &tx, event) {
                log::debug!("run for {user} cancelled, dropping result");
            }
        });

        RunHandle {
            token,
            events: rx,
            state: RunState::Idle,
        }
    }

    /// Cancel the live run, if any
    pub fn cancel(&self) {
        self.replace_active(None);
    }

    /// Swap the live run, cancelling the previous one while the lock is held
    fn replace_active(&self, token: Option<RunToken>) {
        let mut active = self.active.lock().expect("session lock poisoned");
        if let Some(previous) = std::mem::replace(&mut *active, token) {
            log::debug!("superseding previous run");
            previous.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use std::time::Duration;

    fn session() -> Session<FakeApi> {
        let mut birds = Collection::new(1, "Birds");
        birds.count = 2;
        let mut api = FakeApi::new(vec![vec![birds]]).with_pages(1, vec![vec!["Robin", "Owl"]]);
        api.delay = Duration::from_millis(5);
        Session::new(Aggregator::new(api))
    }

    async fn drain(handle: &mut RunHandle) -> Vec<RunEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.next_event().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn progress_then_single_terminal_event() {
        let session = session();
        let mut handle = session.start("Alice");

        let events = drain(&mut handle).await;

        assert_eq!(events.len(), 4);
        assert!(events[..3].iter().all(|e| !e.is_terminal()));
        match &events[3] {
            RunEvent::Completed(collections) => assert_eq!(collections[0].pages.len(), 2),
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(handle.state(), RunState::Done);
    }

    #[tokio::test]
    async fn failure_is_terminal() {
        let mut api = FakeApi::new(vec![vec![Collection::new(9, "Broken")]]);
        api.fail_pages_of = Some(9);
        let session = Session::new(Aggregator::new(api));
        let mut handle = session.start("Alice");

        let events = drain(&mut handle).await;

        assert!(matches!(events.last(), Some(RunEvent::Failed(_))));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
        assert_eq!(handle.state(), RunState::Failed);
    }

    #[tokio::test]
    async fn new_run_supersedes_old() {
        let session = session();
        let mut first = session.start("Alice");
        let mut second = session.start("Bob");

        assert!(first.token().is_cancelled());
        assert!(drain(&mut first).await.is_empty());
        assert!(matches!(
            drain(&mut second).await.last(),
            Some(RunEvent::Completed(_))
        ));
    }

    #[tokio::test]
    async fn run_superseded_mid_flight_stops_at_next_request() {
        let mut birds = Collection::new(1, "Birds");
        birds.count = 1;
        let mut trees = Collection::new(2, "Trees");
        trees.count = 1;
        let mut api = FakeApi::new(vec![vec![birds, trees]])
            .with_pages(1, vec![vec!["Robin"]])
            .with_pages(2, vec![vec!["Oak"]]);
        api.delay = Duration::from_millis(20);
        let session = Session::new(Aggregator::new(api));

        let mut first = session.start("Alice");
        loop {
            match first.next_event().await {
                Some(RunEvent::Progress(Progress::FetchingPages { index: 1, .. })) => break,
                Some(event) => assert!(!event.is_terminal(), "finished early: {event:?}"),
                None => panic!("first run ended before fetching pages"),
            }
        }
        assert_eq!(first.state(), RunState::FetchingPages { index: 1, total: 2 });

        let mut second = session.start("Bob");
        assert!(drain(&mut first).await.is_empty());
        assert!(matches!(
            drain(&mut second).await.last(),
            Some(RunEvent::Completed(_))
        ));

        let calls = session.aggregator().api().calls();
        let count = |entry: &str| calls.iter().filter(|c| *c == entry).count();
        assert_eq!(count("start:lists:Alice"), 1);
        assert_eq!(count("start:lists:Bob"), 1);
        // Alice's in-flight request for Birds completes, Trees is never requested
        assert_eq!(count("start:pages:1"), 2);
        assert_eq!(count("start:pages:2"), 1);
    }

    #[tokio::test]
    async fn explicit_cancel_silences_run() {
        let session = session();
        let mut handle = session.start("Alice");
        session.cancel();
        assert!(drain(&mut handle).await.is_empty());
        assert_eq!(handle.state(), RunState::Idle);
    }

    #[test]
    fn delivery_checks_token_under_session_lock() {
        let active = Mutex::new(None);
        let token = RunToken::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        assert!(deliver(&active, &token, &tx, RunEvent::Completed(vec![])));
        token.cancel();
        assert!(!deliver(&active, &token, &tx, RunEvent::Completed(vec![])));

        assert!(matches!(rx.try_recv(), Ok(RunEvent::Completed(_))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn state_machine_transitions() {
        let state = RunState::Idle.advance(&RunEvent::Progress(Progress::FetchingCollections {
            user: "a".to_string(),
            domain: "d".to_string(),
        }));
        assert_eq!(state, RunState::FetchingCollections);

        let state = state.advance(&RunEvent::Progress(Progress::FetchingPages {
            index: 1,
            total: 3,
            label: "x".to_string(),
        }));
        assert_eq!(state, RunState::FetchingPages { index: 1, total: 3 });

        let state = state.advance(&RunEvent::Completed(vec![]));
        assert_eq!(state, RunState::Done);
        assert_eq!(state.advance(&RunEvent::Failed(FetchError::Cancelled)), RunState::Done);
    }
}
