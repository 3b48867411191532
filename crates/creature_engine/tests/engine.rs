use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};

use creature_core::{update, CollectionStore, Creature, Effect, Msg, StoreConfig};
use creature_engine::{
    CreatureRecord, EngineEvent, EngineHandle, FailureKind, FetchError, PagingSource,
};
use tokio::sync::Notify;

const WAIT: Duration = Duration::from_secs(5);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(creature_logging::initialize_for_tests);
}

/// Source that replays scripted outcomes and records every call.
struct ScriptedSource {
    calls: Mutex<Vec<(u64, u32)>>,
    outcomes: Mutex<Vec<Result<Vec<CreatureRecord>, FetchError>>>,
    gate: Option<Arc<Notify>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedSource {
    fn new(outcomes: Vec<Result<Vec<CreatureRecord>, FetchError>>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcomes: Mutex::new(outcomes.into_iter().rev().collect()),
            gate: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn calls(&self) -> Vec<(u64, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PagingSource for ScriptedSource {
    async fn fetch_page(&self, offset: u64, limit: u32) -> Result<Vec<CreatureRecord>, FetchError> {
        self.calls.lock().unwrap().push((offset, limit));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn records(ids: std::ops::RangeInclusive<u32>) -> Vec<CreatureRecord> {
    ids.map(|id| CreatureRecord {
        id,
        name: format!("c{id}"),
        height: 1,
        weight: 1,
        image_url: String::new(),
    })
    .collect()
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { page, result } => match result {
            Ok(records) => Msg::PageLoaded {
                page,
                creatures: records
                    .into_iter()
                    .map(|r| Creature::new(r.id, r.name, r.height, r.weight, r.image_url))
                    .collect(),
            },
            Err(err) => Msg::PageFailed {
                page,
                reason: err.to_string(),
            },
        },
    }
}

/// Dispatches `msg` and hands every fetch effect to the engine.
fn dispatch(store: CollectionStore, engine: &EngineHandle, msg: Msg) -> CollectionStore {
    let (store, effects) = update(store, msg);
    for effect in effects {
        match effect {
            Effect::FetchPage(request) => {
                engine.fetch_page(request.page, request.offset, request.limit)
            }
        }
    }
    store
}

#[test]
fn engine_reports_each_fetch_as_event() {
    init_logging();
    let source = Arc::new(ScriptedSource::new(vec![Ok(records(1..=2))]));
    let engine = EngineHandle::with_source(source.clone());

    engine.fetch_page(0, 0, 20);
    let event = engine.recv_timeout(WAIT).expect("event");

    assert_eq!(
        event,
        EngineEvent::PageFetched {
            page: 0,
            result: Ok(records(1..=2)),
        }
    );
    assert_eq!(source.calls(), vec![(0, 20)]);
}

#[test]
fn rapid_load_requests_reach_source_once() {
    init_logging();
    let gate = Arc::new(Notify::new());
    let source = Arc::new(ScriptedSource::new(vec![Ok(records(1..=20))]).gated(gate.clone()));
    let engine = EngineHandle::with_source(source.clone());

    let mut store = CollectionStore::new(StoreConfig::new(20, 5));
    store = dispatch(store, &engine, Msg::LoadNextPage);
    for index in 0..10 {
        store = dispatch(store, &engine, Msg::RowWillDisplay { index });
        store = dispatch(store, &engine, Msg::LoadNextPage);
    }

    gate.notify_one();
    let event = engine.recv_timeout(WAIT).expect("event");
    let store = dispatch(store, &engine, to_msg(event));

    assert!(engine.recv_timeout(Duration::from_millis(100)).is_none());
    assert_eq!(source.calls(), vec![(0, 20)]);
    assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 1);
    assert_eq!(store.state().creatures().len(), 20);
    assert_eq!(store.state().cursor(), 1);
}

#[test]
fn failed_fetch_then_retry_behaves_as_if_nothing_happened() {
    init_logging();
    let source = Arc::new(ScriptedSource::new(vec![
        Err(FetchError::new(FailureKind::Network, "connection reset")),
        Ok(records(1..=20)),
    ]));
    let engine = EngineHandle::with_source(source.clone());

    let store = dispatch(CollectionStore::default(), &engine, Msg::LoadNextPage);
    let event = engine.recv_timeout(WAIT).expect("failure event");
    let store = dispatch(store, &engine, to_msg(event));
    assert_eq!(store.state().creatures().len(), 0);
    assert_eq!(store.state().cursor(), 0);
    assert!(!store.state().is_loading());

    let store = dispatch(store, &engine, Msg::LoadNextPage);
    let event = engine.recv_timeout(WAIT).expect("success event");
    let store = dispatch(store, &engine, to_msg(event));

    assert_eq!(source.calls(), vec![(0, 20), (0, 20)]);
    assert_eq!(store.state().creatures().len(), 20);
    assert_eq!(store.state().cursor(), 1);
}

#[test]
fn dropping_handle_mid_fetch_discards_result() {
    init_logging();
    let started = Arc::new(AtomicBool::new(false));
    let finished = Arc::new(AtomicBool::new(false));
    let dropped = Arc::new(AtomicBool::new(false));
    let source = Arc::new(StalledSource {
        started: started.clone(),
        finished: finished.clone(),
        dropped: dropped.clone(),
    });
    let engine = EngineHandle::with_source(source);

    engine.fetch_page(0, 0, 20);
    assert!(wait_until(|| started.load(Ordering::SeqCst)), "fetch never started");
    drop(engine);

    // Runtime shutdown drops the pending fetch without ever completing it.
    assert!(wait_until(|| dropped.load(Ordering::SeqCst)), "fetch was not dropped");
    assert!(!finished.load(Ordering::SeqCst));
}

#[test]
fn panicking_source_reports_failure_and_releases_guard() {
    init_logging();
    let engine = EngineHandle::with_source(Arc::new(PanickingSource));

    let store = dispatch(CollectionStore::default(), &engine, Msg::LoadNextPage);
    assert!(store.state().is_loading());

    let event = engine.recv_timeout(WAIT).expect("failure event after panic");
    match &event {
        EngineEvent::PageFetched { page, result } => {
            assert_eq!(*page, 0);
            assert_eq!(
                result.as_ref().map_err(|err| err.kind.clone()),
                Err(FailureKind::Network)
            );
        }
    }
    let store = dispatch(store, &engine, to_msg(event));
    assert!(!store.state().is_loading());
    assert_eq!(store.state().cursor(), 0);

    let (_store, effects) = update(store, Msg::LoadNextPage);
    assert_eq!(effects.len(), 1);
}

fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while !condition() {
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    true
}

/// Never resolves; records whether its future was dropped before finishing.
struct StalledSource {
    started: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    dropped: Arc<AtomicBool>,
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl PagingSource for StalledSource {
    async fn fetch_page(&self, _offset: u64, _limit: u32) -> Result<Vec<CreatureRecord>, FetchError> {
        let _guard = SetOnDrop(self.dropped.clone());
        self.started.store(true, Ordering::SeqCst);
        std::future::pending::<()>().await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

struct PanickingSource;

#[async_trait::async_trait]
impl PagingSource for PanickingSource {
    async fn fetch_page(&self, offset: u64, _limit: u32) -> Result<Vec<CreatureRecord>, FetchError> {
        panic!("source exploded at offset {offset}");
    }
}
