//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use oracle_tictactoe::{
    MoveOracle, OracleError, OracleErrorKind, OraclePurpose, OracleRequest, StatsStorage,
    StorageError,
};
use tokio::sync::{Notify, mpsc};

/// Oracle that replays queued move answers and returns fixed commentary.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    moves: Mutex<VecDeque<Result<String, OracleError>>>,
    commentary: Option<String>,
    requests: Mutex<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    /// Moves are answered in order; once exhausted, move requests fail.
    pub fn new(moves: Vec<Result<String, OracleError>>, commentary: Option<&str>) -> Self {
        Self {
            moves: Mutex::new(moves.into()),
            commentary: commentary.map(str::to_string),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Oracle that proposes these texts as moves and says `"gg"` otherwise.
    pub fn moves(texts: &[&str]) -> Self {
        Self::new(
            texts.iter().map(|t| Ok(t.to_string())).collect(),
            Some("gg"),
        )
    }

    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn move_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.purpose == OraclePurpose::Move)
            .count()
    }
}

#[async_trait::async_trait]
impl MoveOracle for ScriptedOracle {
    async fn request_text(&self, request: &OracleRequest) -> Result<String, OracleError> {
        self.requests.lock().unwrap().push(request.clone());
        match request.purpose {
            OraclePurpose::Move => self.moves.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(OracleError::new(OracleErrorKind::Service, "script exhausted"))
            }),
            OraclePurpose::Commentary => self
                .commentary
                .clone()
                .ok_or_else(|| OracleError::new(OracleErrorKind::Service, "no commentary")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Oracle whose move answers wait until the test releases them.
///
/// Each move request reports its generation on `started` and then blocks on
/// `release`. Commentary answers immediately.
#[derive(Debug)]
pub struct GatedOracle {
    reply: String,
    started: mpsc::UnboundedSender<u64>,
    release: Notify,
}

impl GatedOracle {
    pub fn new(reply: &str) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (started, rx) = mpsc::unbounded_channel();
        (
            Self {
                reply: reply.to_string(),
                started,
                release: Notify::new(),
            },
            rx,
        )
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait::async_trait]
impl MoveOracle for GatedOracle {
    async fn request_text(&self, request: &OracleRequest) -> Result<String, OracleError> {
        if request.purpose == OraclePurpose::Commentary {
            return Ok("hello".to_string());
        }
        let _ = self.started.send(request.generation);
        self.release.notified().await;
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "gated"
    }
}

/// Oracle that never answers.
#[derive(Debug, Default)]
pub struct SilentOracle;

#[async_trait::async_trait]
impl MoveOracle for SilentOracle {
    async fn request_text(&self, _request: &OracleRequest) -> Result<String, OracleError> {
        std::future::pending().await
    }

    fn name(&self) -> &str {
        "silent"
    }
}

/// Storage whose first `failures` writes fail.
#[derive(Debug)]
pub struct FlakyStorage {
    failures: AtomicUsize,
    writes: AtomicUsize,
    inner: oracle_tictactoe::MemoryStorage,
}

impl FlakyStorage {
    pub fn new(failures: usize) -> Self {
        Self {
            failures: AtomicUsize::new(failures),
            writes: AtomicUsize::new(0),
            inner: oracle_tictactoe::MemoryStorage::new(),
        }
    }

    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StatsStorage for FlakyStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(StorageError::new("disk full"));
        }
        self.inner.write(key, bytes)
    }
}

/// Storage that always fails to read.
#[derive(Debug, Default)]
pub struct BrokenStorage;

impl StatsStorage for BrokenStorage {
    fn read(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Err(StorageError::new("unreadable"))
    }

    fn write(&self, _key: &str, _bytes: &[u8]) -> Result<(), StorageError> {
        Err(StorageError::new("unwritable"))
    }
}

/// Storage whose writes block until the test answers on `entered`.
///
/// Each write reports on `entered`, then waits up to two seconds for a
/// `release` signal. A write that runs on the async runtime thread starves
/// the task that would release it, so the wait times out and the write fails.
#[derive(Debug)]
pub struct GatedStorage {
    inner: oracle_tictactoe::MemoryStorage,
    entered: mpsc::UnboundedSender<()>,
    release: Mutex<std::sync::mpsc::Receiver<()>>,
}

impl GatedStorage {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<()>, std::sync::mpsc::Sender<()>) {
        let (entered, entered_rx) = mpsc::unbounded_channel();
        let (release_tx, release) = std::sync::mpsc::channel();
        (
            Self {
                inner: oracle_tictactoe::MemoryStorage::new(),
                entered,
                release: Mutex::new(release),
            },
            entered_rx,
            release_tx,
        )
    }
}

impl StatsStorage for GatedStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let _ = self.entered.send(());
        self.release
            .lock()
            .unwrap()
            .recv_timeout(std::time::Duration::from_secs(2))
            .map_err(|_| StorageError::new("write never released"))?;
        self.inner.write(key, bytes)
    }
}
