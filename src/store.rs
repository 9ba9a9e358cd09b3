use crate::catalog::WordCatalog;
use crate::daily::{DateKey, select_word};
use crate::session::{GameSession, MAX_ATTEMPTS};
use crate::{debug_log, warn_log};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

pub const LAST_PLAYED_KEY: &str = "last_played";
pub const SESSION_KEY: &str = "session";
pub const STATS_KEY: &str = "statistics";

/// Client-local key-value storage, the only durable surface the game uses.
/// Writes are best-effort: a failing backend degrades to a fresh game, it
/// never aborts play.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store, used by tests and `--date` experiments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// One file per key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Per-user data directory, with a temp-dir fallback for platforms
    /// where `dirs` reports none.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("the-word")
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn_log!("cannot create data dir {}: {e}", self.dir.display());
            return;
        }
        if let Err(e) = fs::write(self.path(key), value) {
            warn_log!("cannot write {key}: {e}");
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path(key));
    }
}

/// Cumulative play counters. Updated exactly once per finished game and
/// kept indefinitely across days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Wins by attempt count; index 0 holds one-guess wins.
    pub win_distribution: [u32; MAX_ATTEMPTS],
}

impl Statistics {
    fn record_win(&mut self, attempts: usize) {
        self.games_played += 1;
        self.games_won += 1;
        self.current_streak += 1;
        self.max_streak = self.max_streak.max(self.current_streak);
        if (1..=MAX_ATTEMPTS).contains(&attempts) {
            self.win_distribution[attempts - 1] += 1;
        }
    }

    fn record_loss(&mut self) {
        self.games_played += 1;
        self.current_streak = 0;
    }

    pub fn wins_in(&self, attempts: usize) -> u32 {
        self.win_distribution[attempts - 1]
    }
}

/// Today's puzzle was already started and finished or superseded; only the
/// persisted session for the day may be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyPlayedToday(pub DateKey);

impl fmt::Display for AlreadyPlayedToday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "already played on {}; come back tomorrow", self.0)
    }
}

impl std::error::Error for AlreadyPlayedToday {}

/// Bridge between the session state machine and a `KvStore`.
///
/// Three records: the last-played date, the current session, and the
/// cumulative statistics. Stale or unparseable records are discarded on
/// load so they can never block a new day's game.
pub struct GameStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> GameStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    fn last_played(&self) -> Option<DateKey> {
        let raw = self.kv.get(LAST_PLAYED_KEY)?;
        let parsed = DateKey::parse(raw.trim());
        if parsed.is_none() {
            warn_log!("unparseable last-played date {raw:?}");
        }
        parsed
    }

    fn stored_session(&self) -> Option<GameSession> {
        let raw = self.kv.get(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn_log!("discarding unparseable session record: {e}");
                None
            }
        }
    }

    /// Persists the session and, when it just finished, folds the outcome
    /// into the statistics. Re-saving an already finished session leaves
    /// the counters alone.
    pub fn save(&mut self, session: &GameSession) {
        let previously_over = self
            .stored_session()
            .map(|prev| prev.played_date() == session.played_date() && prev.is_over())
            .unwrap_or(false);

        match serde_json::to_string(session) {
            Ok(json) => self.kv.set(SESSION_KEY, &json),
            Err(e) => {
                warn_log!("cannot serialize session: {e}");
                return;
            }
        }
        self.kv.set(LAST_PLAYED_KEY, &session.played_date().to_string());

        if session.is_over() && !previously_over {
            let mut stats = self.statistics();
            if session.is_won() {
                stats.record_win(session.guesses().len());
            } else {
                stats.record_loss();
            }
            match serde_json::to_string(&stats) {
                Ok(json) => self.kv.set(STATS_KEY, &json),
                Err(e) => warn_log!("cannot serialize statistics: {e}"),
            }
        }
    }

    /// Restores today's session, if any. Records from another day are
    /// cleared; corrupt records are cleared and treated as absent.
    pub fn load(&mut self, today: DateKey) -> Option<GameSession> {
        let last = match self.last_played() {
            Some(date) => date,
            None => {
                if self.kv.get(LAST_PLAYED_KEY).is_some() {
                    self.kv.remove(LAST_PLAYED_KEY);
                    self.kv.remove(SESSION_KEY);
                }
                return None;
            }
        };
        if last != today {
            debug_log!("stale session from {last}, clearing");
            self.kv.remove(SESSION_KEY);
            return None;
        }
        match self.stored_session() {
            Some(session) if session.played_date() == today => Some(session),
            _ => {
                // Missing, corrupt, or mismatched: discard the day's claim
                // so a fresh game can start.
                self.kv.remove(SESSION_KEY);
                self.kv.remove(LAST_PLAYED_KEY);
                None
            }
        }
    }

    /// Starts a brand-new session for the day. Rejected once the day has
    /// been claimed; resuming goes through `load`/`open_daily` instead.
    pub fn new_daily(
        &mut self,
        today: DateKey,
        catalog: &WordCatalog,
    ) -> Result<GameSession, AlreadyPlayedToday> {
        if self.last_played() == Some(today) {
            return Err(AlreadyPlayedToday(today));
        }
        let target = select_word(today, catalog).to_string();
        let session = GameSession::new(target, today);
        self.save(&session);
        Ok(session)
    }

    /// The resume-or-create flow: today's persisted session when present,
    /// otherwise a freshly initialized and saved one.
    pub fn open_daily(
        &mut self,
        today: DateKey,
        catalog: &WordCatalog,
    ) -> Result<GameSession, AlreadyPlayedToday> {
        if let Some(session) = self.load(today) {
            debug_log!("resuming session for {today}");
            return Ok(session);
        }
        self.new_daily(today, catalog)
    }

    pub fn statistics(&self) -> Statistics {
        let Some(raw) = self.kv.get(STATS_KEY) else {
            return Statistics::default();
        };
        match serde_json::from_str(&raw) {
            Ok(stats) => stats,
            Err(e) => {
                warn_log!("discarding unparseable statistics record: {e}");
                Statistics::default()
            }
        }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn kv_mut(&mut self) -> &mut S {
        &mut self.kv
    }
}
