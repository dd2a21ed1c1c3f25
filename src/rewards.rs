//! Score-to-points settlement
//!
//! Runs once per session, after the game-over tick and off the tick path.
//! Converts the final score into persisted PlayPoints (1 point per score
//! point) and appends a history entry. The history write is an independent
//! failure domain: if it fails, the point increment stands.

use crate::consts::GAME_NAME;
use crate::ledger::{HistoryRecord, LedgerError, RewardLedger};

/// Result of settling one finished session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Score was zero; nothing persisted
    NoReward,
    /// Points and games-played were written
    Settled {
        points_earned: u64,
        total_points: u64,
        /// False when the history append failed (non-fatal)
        history_saved: bool,
    },
    /// The user-record update failed. The earned points stay computed in
    /// memory and the player may simply start a new game.
    Failed {
        points_earned: u64,
        error: LedgerError,
    },
}

impl SettleOutcome {
    /// Toast line for the frontend
    pub fn notice(&self) -> String {
        match self {
            SettleOutcome::NoReward => "Game Over! Try again to earn points.".to_string(),
            SettleOutcome::Settled { points_earned, .. } => {
                format!("Game Over! You earned {points_earned} PlayPoints!")
            }
            SettleOutcome::Failed { error, .. } => format!("Error saving score: {error}"),
        }
    }
}

/// Persist the reward for a finished session.
///
/// The user-record update is read-modify-write (see `RewardLedger` on why
/// concurrent sessions are not linearizable). Points and the games-played
/// counter form one update; history is appended after and never rolls the
/// update back.
pub fn settle_session(
    ledger: &mut dyn RewardLedger,
    uid: &str,
    final_score: u32,
    played_at: f64,
) -> SettleOutcome {
    if final_score == 0 {
        return SettleOutcome::NoReward;
    }
    let points_earned = final_score as u64;

    let total_points = match apply_user_update(ledger, uid, points_earned) {
        Ok(total) => total,
        Err(error) => {
            log::error!("failed to settle {points_earned} points for {uid}: {error}");
            return SettleOutcome::Failed {
                points_earned,
                error,
            };
        }
    };

    let history_saved = match ledger.append_history(HistoryRecord {
        user_id: uid.to_string(),
        game: GAME_NAME.to_string(),
        score: final_score,
        points_earned,
        played_at,
    }) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("history append failed for {uid} (points already written): {e}");
            false
        }
    };

    log::info!("settled {points_earned} points for {uid}, total now {total_points}");
    SettleOutcome::Settled {
        points_earned,
        total_points,
        history_saved,
    }
}

fn apply_user_update(
    ledger: &mut dyn RewardLedger,
    uid: &str,
    points_earned: u64,
) -> Result<u64, LedgerError> {
    let total = ledger.user_points(uid)? + points_earned;
    ledger.set_user_points(uid, total)?;
    ledger.increment_games_played(uid)?;
    Ok(total)
}
