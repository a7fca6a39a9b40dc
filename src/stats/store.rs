//! Stats store: read-modify-write over a storage port, with change notification.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::stats::{GameOutcome, MemoryStorage, StatsRecord, StatsStorage, StorageError};

/// Storage key of the stats record.
pub const STATS_KEY: &str = "tictactoe-stats";

const CHANNEL_CAPACITY: usize = 16;

/// Signal fired after every write to the stats record. Carries no data;
/// observers re-read the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatsChanged;

impl StatsChanged {
    /// Name of the signal.
    pub const NAME: &'static str = "tictactoe-stats-updated";
}

/// Shared handle to the durable stats record.
///
/// Cloning is cheap; all clones see the same storage and the same observers.
/// Writes from this process are serialized. Writes from other processes
/// sharing the storage are not coordinated: the last writer wins.
#[derive(Debug, Clone)]
pub struct StatsStore {
    storage: Arc<dyn StatsStorage>,
    write_lock: Arc<Mutex<()>>,
    notifier: broadcast::Sender<StatsChanged>,
}

impl StatsStore {
    /// Creates a store over `storage`.
    #[instrument(skip(storage))]
    pub fn new(storage: Arc<dyn StatsStorage>) -> Self {
        info!(?storage, "Creating StatsStore");
        let (notifier, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
            notifier,
        }
    }

    /// Creates a store backed by [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Returns the current record, or the zero record if nothing usable is stored.
    #[instrument(skip(self))]
    pub fn read(&self) -> StatsRecord {
        match self.storage.read(STATS_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "Stored stats unreadable, treating as empty");
                    StatsRecord::zero()
                }
            },
            Ok(None) => {
                debug!("No stats stored yet");
                StatsRecord::zero()
            }
            Err(e) => {
                warn!(error = %e, "Stats read failed, treating as empty");
                StatsRecord::zero()
            }
        }
    }

    /// Counts one finished game and notifies observers.
    #[instrument(skip(self))]
    pub fn record_result(&self, outcome: GameOutcome) -> StatsRecord {
        let updated = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            let updated = self.read().with_outcome(outcome, Utc::now());
            self.persist(&updated);
            updated
        };

        info!(
            outcome = %outcome,
            total = updated.total_games(),
            player_wins = updated.player_wins(),
            opponent_wins = updated.opponent_wins(),
            draws = updated.draws(),
            "Game result recorded"
        );
        self.notify();
        updated
    }

    /// Clears all counters and notifies observers.
    #[instrument(skip(self))]
    pub fn reset(&self) -> StatsRecord {
        let zero = StatsRecord::zero();
        {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.persist(&zero);
        }
        info!("Stats reset");
        self.notify();
        zero
    }

    /// Registers an observer.
    pub fn subscribe(&self) -> StatsSubscription {
        StatsSubscription {
            store: self.clone(),
            receiver: self.notifier.subscribe(),
        }
    }

    /// Tells observers the record was changed by someone else (another
    /// process writing the same storage).
    #[instrument(skip(self))]
    pub fn notify_external_change(&self) {
        debug!("External stats change reported");
        self.notify();
    }

    /// Writes `record`, retrying once. A second failure is logged and dropped.
    fn persist(&self, record: &StatsRecord) {
        let bytes = match serde_json::to_vec(record) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to encode stats record");
                return;
            }
        };

        let attempt = || -> Result<(), StorageError> { self.storage.write(STATS_KEY, &bytes) };
        if let Err(first) = attempt() {
            debug!(error = %first, "Stats write failed, retrying");
            if let Err(second) = attempt() {
                warn!(error = %second, "Stats write lost");
            }
        }
    }

    fn notify(&self) {
        match self.notifier.send(StatsChanged) {
            Ok(receivers) => debug!(signal = StatsChanged::NAME, receivers, "Stats change sent"),
            Err(_) => debug!(signal = StatsChanged::NAME, "No stats observers"),
        }
    }
}

/// Observer handle returned by [`StatsStore::subscribe`].
#[derive(Debug)]
pub struct StatsSubscription {
    store: StatsStore,
    receiver: broadcast::Receiver<StatsChanged>,
}

impl StatsSubscription {
    /// Waits for the next change signal and returns the freshly read record.
    ///
    /// Missed signals collapse into one wake-up. The subscription holds a
    /// store handle, which keeps the channel open, so in practice this always
    /// yields a record.
    pub async fn changed(&mut self) -> Option<StatsRecord> {
        match self.receiver.recv().await {
            Ok(StatsChanged) => Some(self.store.read()),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "Stats observer lagged");
                Some(self.store.read())
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }

    /// Like [`changed`](Self::changed) but returns immediately with `None`
    /// when no signal is pending.
    pub fn try_changed(&mut self) -> Option<StatsRecord> {
        match self.receiver.try_recv() {
            Ok(StatsChanged) | Err(broadcast::error::TryRecvError::Lagged(_)) => {
                Some(self.store.read())
            }
            Err(_) => None,
        }
    }
}
