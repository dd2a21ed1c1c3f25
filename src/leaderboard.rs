//! Leaderboard view over the reward ledger
//!
//! A derived, ranked top-10 of user records sorted by points descending.
//! Admin accounts are hidden from players. This crate is one writer of the
//! `points` values it reads; the ordering itself is recomputed from the
//! ledger feed whenever it changes.

use serde::{Deserialize, Serialize};

use crate::ledger::{Role, UserRecord};

/// Maximum number of rows shown
pub const MAX_LEADERBOARD_ROWS: usize = 10;

/// Points per level step
const POINTS_PER_LEVEL: u64 = 1000;

/// Level badge for a point total (level 1 at 0 points)
pub fn level_for(points: u64) -> u32 {
    (points / POINTS_PER_LEVEL) as u32 + 1
}

/// One ranked leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-indexed rank
    pub rank: usize,
    pub username: String,
    pub email: String,
    pub points: u64,
    pub level: u32,
}

/// Ranked top-10 view
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Build the view from the ledger's user feed: players only (admins
    /// hidden), points descending, capped at `MAX_LEADERBOARD_ROWS`.
    pub fn from_users(users: &[UserRecord]) -> Self {
        let mut players: Vec<&UserRecord> =
            users.iter().filter(|u| u.role != Role::Admin).collect();
        // Username as tie-break keeps equal-point orders stable across loads
        players.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| a.username.cmp(&b.username))
        });

        let rows = players
            .into_iter()
            .take(MAX_LEADERBOARD_ROWS)
            .enumerate()
            .map(|(i, u)| LeaderboardRow {
                rank: i + 1,
                username: u.username.clone(),
                email: u.email.clone(),
                points: u.points,
                level: level_for(u.points),
            })
            .collect();

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rank of the signed-in user (matched by email), used to mark their
    /// row with "(You)".
    pub fn rank_of(&self, email: &str) -> Option<usize> {
        self.rows.iter().find(|r| r.email == email).map(|r| r.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, points: u64, role: Role) -> UserRecord {
        UserRecord {
            uid: name.to_string(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            role,
            points,
            games_played: 0,
        }
    }

    #[test]
    fn test_sorted_by_points_descending() {
        let users = vec![
            user("carol", 50, Role::User),
            user("alice", 300, Role::User),
            user("bob", 120, Role::User),
        ];
        let board = Leaderboard::from_users(&users);

        let names: Vec<&str> = board.rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(board.rows[0].rank, 1);
        assert_eq!(board.rows[2].rank, 3);
        assert_eq!(board.rows[0].points, 300);
    }

    #[test]
    fn test_admins_are_hidden() {
        let users = vec![
            user("root", 9999, Role::Admin),
            user("alice", 10, Role::User),
        ];
        let board = Leaderboard::from_users(&users);

        assert_eq!(board.rows.len(), 1);
        assert_eq!(board.rows[0].username, "alice");
        assert_eq!(board.rows[0].rank, 1);
    }

    #[test]
    fn test_capped_at_ten_rows() {
        let users: Vec<UserRecord> = (0..15)
            .map(|i| user(&format!("p{i:02}"), i * 10, Role::User))
            .collect();
        let board = Leaderboard::from_users(&users);

        assert_eq!(board.rows.len(), MAX_LEADERBOARD_ROWS);
        // The five lowest scorers fell off
        assert_eq!(board.rows.last().unwrap().points, 50);
    }

    #[test]
    fn test_equal_points_tie_break_is_stable() {
        let users = vec![
            user("zed", 100, Role::User),
            user("amy", 100, Role::User),
        ];
        let board = Leaderboard::from_users(&users);
        assert_eq!(board.rows[0].username, "amy");
        assert_eq!(board.rows[1].username, "zed");
    }

    #[test]
    fn test_levels() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(999), 1);
        assert_eq!(level_for(1000), 2);
        assert_eq!(level_for(5321), 6);
    }

    #[test]
    fn test_rank_of_current_user() {
        let users = vec![
            user("alice", 300, Role::User),
            user("bob", 120, Role::User),
        ];
        let board = Leaderboard::from_users(&users);
        assert_eq!(board.rank_of("bob@example.com"), Some(2));
        assert_eq!(board.rank_of("ghost@example.com"), None);
    }
}
