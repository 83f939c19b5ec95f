//! Per-game high score list
//!
//! Persisted to LocalStorage under `<game_id>_highscores`, tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::consts::HIGHSCORES_SUFFIX;
use crate::storage::{KeyValueStore, load_json, save_json};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Level, wave or length reached (game-defined)
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard for one game
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn storage_key(game_id: &str) -> String {
        format!("{game_id}{HIGHSCORES_SUFFIX}")
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load a game's high scores, starting fresh when none are stored
    pub fn load(store: &dyn KeyValueStore, game_id: &str) -> Self {
        match load_json::<HighScores>(store, &Self::storage_key(game_id)) {
            Some(mut scores) => {
                // Hand-edited storage may be unsorted or oversized
                scores
                    .entries
                    .sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores for {}", scores.entries.len(), game_id);
                scores
            }
            None => {
                log::info!("No high scores found for {}, starting fresh", game_id);
                Self::new()
            }
        }
    }

    /// Save a game's high scores
    pub fn save(&self, store: &dyn KeyValueStore, game_id: &str) {
        match save_json(store, &Self::storage_key(game_id), self) {
            Ok(()) => log::info!(
                "High scores saved for {} ({} entries)",
                game_id,
                self.entries.len()
            ),
            Err(e) => log::warn!("Failed to save high scores for {}: {:#}", game_id, e),
        }
    }
}

/// Format a timestamp relative to `now_ms` for the leaderboard table
pub fn format_age(now_ms: f64, timestamp: f64) -> String {
    let diff_mins = (now_ms - timestamp).max(0.0) / 60_000.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            let (year, month, day) = civil_from_days((timestamp / 86_400_000.0).floor() as i64);
            format!("{}/{}/{:02}", month, day, year.rem_euclid(100))
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

/// Days since the Unix epoch to a (year, month, day) UTC date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
