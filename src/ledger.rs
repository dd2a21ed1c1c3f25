//! Reward ledger: persistent per-user point totals and play history
//!
//! Mirrors the document shapes of the hosted backend this app syncs with
//! (`users` and `game_history` collections). On wasm the ledger lives in
//! LocalStorage behind a versionless JSON envelope, the same way settings
//! are kept; on native it is in-memory only.

use serde::{Deserialize, Serialize};

/// Account role, controls leaderboard visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// One user document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub uid: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub points: u64,
    pub games_played: u32,
}

/// One immutable play-history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub user_id: String,
    /// Game name, e.g. "Neon Snake"
    pub game: String,
    pub score: u32,
    pub points_earned: u64,
    /// Client clock, unix milliseconds
    pub played_at: f64,
}

/// Ledger failures. All surface as non-fatal notices; gameplay never
/// blocks on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    UnknownUser(String),
    Storage(String),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::UnknownUser(uid) => write!(f, "no user record for {uid}"),
            LedgerError::Storage(msg) => write!(f, "ledger storage error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// The boundary to the persistent points store.
///
/// Point increments are read-modify-write through `user_points` +
/// `set_user_points`, matching the backend contract: two sessions settling
/// for the same user concurrently are not linearizable. A documented
/// limitation of the contract, not something this crate papers over.
pub trait RewardLedger {
    fn user_points(&self, uid: &str) -> Result<u64, LedgerError>;
    fn set_user_points(&mut self, uid: &str, points: u64) -> Result<(), LedgerError>;
    fn increment_games_played(&mut self, uid: &str) -> Result<(), LedgerError>;
    fn append_history(&mut self, record: HistoryRecord) -> Result<(), LedgerError>;
    /// All user documents, for the leaderboard feed
    fn users(&self) -> Result<Vec<UserRecord>, LedgerError>;
}

/// LocalStorage/in-memory ledger implementation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalLedger {
    users: Vec<UserRecord>,
    history: Vec<HistoryRecord>,
}

impl LocalLedger {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "playpoints_ledger";

    pub fn new() -> Self {
        Self::default()
    }

    /// Create the user document if absent (first sign-in), like the signup
    /// flow seeding `points: 0`.
    pub fn ensure_user(&mut self, uid: &str, username: &str, email: &str, role: Role) {
        if self.users.iter().any(|u| u.uid == uid) {
            return;
        }
        self.users.push(UserRecord {
            uid: uid.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role,
            points: 0,
            games_played: 0,
        });
    }

    pub fn user(&self, uid: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.uid == uid)
    }

    /// Stored history entries, append order. Test-only: the app writes
    /// history but never reads it back (no activity view in scope).
    #[cfg(test)]
    pub(crate) fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    fn user_mut(&mut self, uid: &str) -> Result<&mut UserRecord, LedgerError> {
        self.users
            .iter_mut()
            .find(|u| u.uid == uid)
            .ok_or_else(|| LedgerError::UnknownUser(uid.to_string()))
    }

    /// Load the ledger from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(json) = crate::platform::storage_get(Self::STORAGE_KEY) {
            if let Ok(ledger) = serde_json::from_str::<LocalLedger>(&json) {
                log::info!(
                    "Loaded ledger: {} users, {} history entries",
                    ledger.users.len(),
                    ledger.history.len()
                );
                return ledger;
            }
        }
        log::info!("No ledger found, starting fresh");
        Self::new()
    }

    /// Save the ledger to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            crate::platform::storage_set(Self::STORAGE_KEY, &json);
            log::info!("Ledger saved ({} users)", self.users.len());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

impl RewardLedger for LocalLedger {
    fn user_points(&self, uid: &str) -> Result<u64, LedgerError> {
        self.user(uid)
            .map(|u| u.points)
            .ok_or_else(|| LedgerError::UnknownUser(uid.to_string()))
    }

    fn set_user_points(&mut self, uid: &str, points: u64) -> Result<(), LedgerError> {
        self.user_mut(uid)?.points = points;
        Ok(())
    }

    fn increment_games_played(&mut self, uid: &str) -> Result<(), LedgerError> {
        let user = self.user_mut(uid)?;
        user.games_played += 1;
        Ok(())
    }

    fn append_history(&mut self, record: HistoryRecord) -> Result<(), LedgerError> {
        self.history.push(record);
        Ok(())
    }

    fn users(&self) -> Result<Vec<UserRecord>, LedgerError> {
        Ok(self.users.clone())
    }
}
