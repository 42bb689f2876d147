//! SQLite-backed append-only tick store.

use crate::{Result, StorageError};
use directories::ProjectDirs;
use parking_lot::Mutex;
use quantpair_types::Tick;
use rusqlite::{Connection, Row, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS ticks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symbol TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        price REAL NOT NULL,
        qty REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_ticks_symbol_timestamp
    ON ticks(symbol, timestamp);
";

const INSERT_TICK: &str = "INSERT INTO ticks (symbol, timestamp, price, qty) VALUES (?1, ?2, ?3, ?4)";

/// Destination for ticks produced by ingestion.
///
/// Implementations must be safe to call concurrently from many connection
/// tasks and must never leave a partially written record behind.
pub trait TickSink: Send + Sync + 'static {
    /// Durably appends one tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick could not be persisted.
    fn insert(&self, tick: &Tick) -> Result<()>;
}

/// Per-symbol aggregate over stored ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSummary {
    /// The symbol.
    pub symbol: String,
    /// Number of stored ticks.
    pub count: u64,
    /// Earliest tick timestamp (ms).
    pub first_timestamp: i64,
    /// Latest tick timestamp (ms).
    pub last_timestamp: i64,
}

/// Durable, append-only store of trade ticks.
///
/// Inserts are serialized through a single writer connection. Reads use their
/// own connection; with the WAL journal they observe the latest committed
/// prefix of inserts and are not blocked by writers.
#[derive(Debug)]
pub struct TickStore {
    path: PathBuf,
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

impl TickStore {
    /// How long a connection waits on a locked database before failing.
    pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Database file name used under the default data directory.
    pub const DEFAULT_FILE_NAME: &'static str = "ticks.db";

    /// Opens the store at `path`, creating the file and schema if absent.
    ///
    /// Existing data is never erased.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or database cannot be created
    /// or the schema cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let writer = open_connection(&path)?;
        let store = Self {
            reader: Mutex::new(open_connection(&path)?),
            writer: Mutex::new(writer),
            path,
        };
        store.init()?;

        debug!(path = %store.path.display(), "tick store opened");
        Ok(store)
    }

    /// Returns the default database path.
    ///
    /// Uses the platform data directory:
    /// - Linux: `~/.local/share/quantpair/ticks.db`
    /// - macOS: `~/Library/Application Support/quantpair/ticks.db`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\quantpair\ticks.db`
    ///
    /// Falls back to `~/.quantpair/ticks.db`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "quantpair")
            .map_or_else(dirs_fallback, |proj_dirs| proj_dirs.data_dir().to_path_buf())
            .join(Self::DEFAULT_FILE_NAME)
    }

    /// Returns the database path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the schema exists. Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema statements fail.
    pub fn init(&self) -> Result<()> {
        self.writer.lock().execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Durably appends one tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the tick is invalid or the write fails.
    pub fn insert(&self, tick: &Tick) -> Result<()> {
        tick.validate()?;

        let conn = self.writer.lock();
        let mut stmt = conn.prepare_cached(INSERT_TICK)?;
        stmt.execute(params![tick.symbol, tick.timestamp, tick.price, tick.qty])?;
        Ok(())
    }

    /// Appends many ticks in one transaction.
    ///
    /// Either all ticks are written or none are.
    ///
    /// # Errors
    ///
    /// Returns an error if any tick is invalid or the transaction fails.
    pub fn insert_batch(&self, ticks: &[Tick]) -> Result<usize> {
        for tick in ticks {
            tick.validate()?;
        }

        let mut conn = self.writer.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_TICK)?;
            for tick in ticks {
                stmt.execute(params![tick.symbol, tick.timestamp, tick.price, tick.qty])?;
            }
        }
        tx.commit()?;
        Ok(ticks.len())
    }

    /// Returns every stored tick in insertion order.
    ///
    /// The result is not globally time-sorted: ticks of different symbols
    /// interleave as they were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_all(&self) -> Result<Vec<Tick>> {
        let conn = self.reader.lock();
        let mut stmt =
            conn.prepare_cached("SELECT symbol, timestamp, price, qty FROM ticks ORDER BY id")?;
        let ticks = stmt
            .query_map([], row_to_tick)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ticks)
    }

    /// Returns ticks of one symbol with `from_ms <= timestamp < to_ms`.
    ///
    /// Ordered by timestamp, ties by insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_range(&self, symbol: &str, from_ms: i64, to_ms: i64) -> Result<Vec<Tick>> {
        let conn = self.reader.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT symbol, timestamp, price, qty FROM ticks
             WHERE symbol = ?1 AND timestamp >= ?2 AND timestamp < ?3
             ORDER BY timestamp, id",
        )?;
        let ticks = stmt
            .query_map(params![symbol, from_ms, to_ms], row_to_tick)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ticks)
    }

    /// Returns the total number of stored ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<u64> {
        let conn = self.reader.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM ticks", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Returns tick count and time span per symbol, ordered by symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn symbol_summaries(&self) -> Result<Vec<SymbolSummary>> {
        let conn = self.reader.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT symbol, COUNT(*), MIN(timestamp), MAX(timestamp)
             FROM ticks GROUP BY symbol ORDER BY symbol",
        )?;
        let summaries = stmt
            .query_map([], |row| {
                let count: i64 = row.get(1)?;
                Ok(SymbolSummary {
                    symbol: row.get(0)?,
                    count: u64::try_from(count).unwrap_or_default(),
                    first_timestamp: row.get(2)?,
                    last_timestamp: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    /// Deletes ticks older than `cutoff_ms` and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn prune_before(&self, cutoff_ms: i64) -> Result<usize> {
        let removed = self
            .writer
            .lock()
            .execute("DELETE FROM ticks WHERE timestamp < ?1", params![cutoff_ms])?;
        info!(cutoff_ms, removed, "pruned ticks");
        Ok(removed)
    }
}

impl TickSink for TickStore {
    fn insert(&self, tick: &Tick) -> Result<()> {
        Self::insert(self, tick)
    }
}

fn open_connection(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).map_err(|e| StorageError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    conn.busy_timeout(TickStore::BUSY_TIMEOUT)?;
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}

fn row_to_tick(row: &Row<'_>) -> rusqlite::Result<Tick> {
    Ok(Tick {
        symbol: row.get(0)?,
        timestamp: row.get(1)?,
        price: row.get(2)?,
        qty: row.get(3)?,
    })
}

/// Fallback for determining the data directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".quantpair")
}
