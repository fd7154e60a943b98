//! Challenge catalog and per-challenge progress.
//!
//! The catalog is static: it is seeded exactly once, when the backing table
//! is empty at startup, and never mutated afterwards. Progress records are
//! upserted by replace, one logical record per challenge id.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{StoreError, StoreResult};

/// Challenge difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub points: i64,
    pub requirements: String,
    pub track: String,
    pub created_at: DateTime<Utc>,
}

/// A challenge joined with the caller's progress. Challenges without a
/// progress record report `completed = false, score = 0`.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeStatus {
    #[serde(flatten)]
    pub challenge: Challenge,
    pub completed: bool,
    pub score: i64,
}

struct SeedChallenge {
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    category: &'static str,
    points: i64,
    requirements: &'static str,
    track: &'static str,
}

const CATALOG: &[SeedChallenge] = &[
    SeedChallenge {
        title: "Weather Novice",
        description: "Get started with basic weather tracking",
        difficulty: Difficulty::Easy,
        category: "Basics",
        points: 100,
        requirements: "Complete first weather search",
        track: "Getting Started",
    },
    SeedChallenge {
        title: "City Explorer",
        description: "Search weather in 3 different cities",
        difficulty: Difficulty::Easy,
        category: "Search",
        points: 200,
        requirements: "3 unique cities",
        track: "Getting Started",
    },
    SeedChallenge {
        title: "Weather Patterns",
        description: "Find cities with 3 different weather conditions",
        difficulty: Difficulty::Medium,
        category: "Weather",
        points: 300,
        requirements: "3 unique conditions",
        track: "Weather Expert",
    },
    SeedChallenge {
        title: "Global Navigator",
        description: "Check weather in 3 different continents",
        difficulty: Difficulty::Medium,
        category: "Geography",
        points: 400,
        requirements: "3 continents",
        track: "Weather Expert",
    },
    SeedChallenge {
        title: "Weather Master",
        description: "Complete all challenges in the Weather Expert track",
        difficulty: Difficulty::Hard,
        category: "Achievement",
        points: 500,
        requirements: "All previous challenges",
        track: "Weather Expert",
    },
];

/// SQLite-backed challenge catalog and progress storage.
pub struct ChallengeStore {
    conn: Connection,
}

impl ChallengeStore {
    /// Open or create the database at the given path, seeding the catalog
    /// if the table is empty.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        store.seed_catalog()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        store.seed_catalog()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS weather_challenges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL,
                difficulty TEXT NOT NULL,
                category TEXT NOT NULL,
                points INTEGER NOT NULL,
                requirements TEXT NOT NULL,
                track TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS user_progress (
                challenge_id INTEGER PRIMARY KEY,
                completed INTEGER NOT NULL DEFAULT 0,
                score INTEGER NOT NULL DEFAULT 0,
                completed_at TEXT
            );",
        )?;
        Ok(())
    }

    /// Seed the static catalog. Gated on an empty table so it runs once at
    /// first startup; `INSERT OR IGNORE` keeps it idempotent under races.
    fn seed_catalog(&self) -> StoreResult<()> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM weather_challenges", [], |row| {
                    row.get(0)
                })?;
        if count > 0 {
            return Ok(());
        }

        tracing::info!("Seeding challenge catalog");
        let now = Utc::now();
        for c in CATALOG {
            self.conn.execute(
                "INSERT OR IGNORE INTO weather_challenges
                 (title, description, difficulty, category, points, requirements, track, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    c.title,
                    c.description,
                    c.difficulty.as_str(),
                    c.category,
                    c.points,
                    c.requirements,
                    c.track,
                    now,
                ],
            )?;
        }
        Ok(())
    }

    /// List all challenges grouped by track, each group ordered by
    /// ascending points, joined with the caller's progress.
    pub fn list_by_track(&self) -> StoreResult<BTreeMap<String, Vec<ChallengeStatus>>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.title, c.description, c.difficulty, c.category, c.points,
                    c.requirements, c.track, c.created_at,
                    COALESCE(p.completed, 0), COALESCE(p.score, 0)
             FROM weather_challenges c
             LEFT JOIN user_progress p ON p.challenge_id = c.id
             ORDER BY c.track, c.points ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let difficulty: String = row.get(3)?;
            let difficulty = Difficulty::parse(&difficulty).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    Type::Text,
                    format!("unknown difficulty: {difficulty}").into(),
                )
            })?;

            Ok(ChallengeStatus {
                challenge: Challenge {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    difficulty,
                    category: row.get(4)?,
                    points: row.get(5)?,
                    requirements: row.get(6)?,
                    track: row.get(7)?,
                    created_at: row.get(8)?,
                },
                completed: row.get(9)?,
                score: row.get(10)?,
            })
        })?;

        let mut tracks: BTreeMap<String, Vec<ChallengeStatus>> = BTreeMap::new();
        for status in rows {
            let status = status?;
            tracks
                .entry(status.challenge.track.clone())
                .or_default()
                .push(status);
        }
        Ok(tracks)
    }

    /// Upsert the progress record for a challenge. `completed_at` is set to
    /// now when the challenge is completed, cleared otherwise.
    ///
    /// # Errors
    /// `InvalidInput` when `challenge_id` is not a positive id.
    pub fn update_progress(
        &self,
        challenge_id: i64,
        completed: bool,
        score: i64,
    ) -> StoreResult<()> {
        if challenge_id <= 0 {
            return Err(StoreError::invalid_input("challenge_id is required"));
        }

        let completed_at: Option<DateTime<Utc>> = completed.then(Utc::now);
        self.conn.execute(
            "INSERT OR REPLACE INTO user_progress (challenge_id, completed, score, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![challenge_id, completed, score, completed_at],
        )?;

        tracing::debug!(challenge_id, completed, score, "Progress updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ChallengeStore {
        ChallengeStore::in_memory().unwrap()
    }

    #[test]
    fn test_catalog_seeds_once() {
        let store = store();
        let tracks = store.list_by_track().unwrap();

        let total: usize = tracks.values().map(Vec::len).sum();
        assert_eq!(total, 5);
        assert_eq!(tracks.len(), 2);
        assert!(tracks.contains_key("Getting Started"));
        assert!(tracks.contains_key("Weather Expert"));

        // Re-running the seed against a populated table is a no-op.
        store.seed_catalog().unwrap();
        let total_after: usize = store.list_by_track().unwrap().values().map(Vec::len).sum();
        assert_eq!(total_after, 5);
    }

    #[test]
    fn test_tracks_ordered_by_ascending_points() {
        let store = store();
        let tracks = store.list_by_track().unwrap();

        for group in tracks.values() {
            let points: Vec<i64> = group.iter().map(|c| c.challenge.points).collect();
            let mut sorted = points.clone();
            sorted.sort_unstable();
            assert_eq!(points, sorted);
        }
    }

    #[test]
    fn test_missing_progress_defaults_to_zero() {
        let store = store();
        let tracks = store.list_by_track().unwrap();

        for status in tracks.values().flatten() {
            assert!(!status.completed);
            assert_eq!(status.score, 0);
        }
    }

    #[test]
    fn test_update_progress_round_trip() {
        let store = store();
        store.update_progress(3, true, 300).unwrap();

        let tracks = store.list_by_track().unwrap();
        let status = tracks
            .values()
            .flatten()
            .find(|c| c.challenge.id == 3)
            .unwrap();
        assert!(status.completed);
        assert_eq!(status.score, 300);

        // Upsert replaces rather than accumulating.
        store.update_progress(3, false, 50).unwrap();
        let tracks = store.list_by_track().unwrap();
        let status = tracks
            .values()
            .flatten()
            .find(|c| c.challenge.id == 3)
            .unwrap();
        assert!(!status.completed);
        assert_eq!(status.score, 50);
    }

    #[test]
    fn test_update_progress_requires_challenge_id() {
        let store = store();
        assert!(matches!(
            store.update_progress(0, true, 10),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            store.update_progress(-4, true, 10),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reopen_keeps_catalog_and_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stratus.db");

        {
            let store = ChallengeStore::open(&path).unwrap();
            store.update_progress(2, true, 200).unwrap();
        }

        // A second open must not re-seed or lose progress.
        let store = ChallengeStore::open(&path).unwrap();
        let tracks = store.list_by_track().unwrap();
        let total: usize = tracks.values().map(Vec::len).sum();
        assert_eq!(total, 5);

        let status = tracks
            .values()
            .flatten()
            .find(|c| c.challenge.id == 2)
            .unwrap();
        assert!(status.completed);
        assert_eq!(status.score, 200);
    }

    #[test]
    fn test_completed_at_tracks_completion() {
        let store = store();

        store.update_progress(1, true, 100).unwrap();
        let completed_at: Option<DateTime<Utc>> = store
            .conn
            .query_row(
                "SELECT completed_at FROM user_progress WHERE challenge_id = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(completed_at.is_some());

        store.update_progress(1, false, 100).unwrap();
        let completed_at: Option<DateTime<Utc>> = store
            .conn
            .query_row(
                "SELECT completed_at FROM user_progress WHERE challenge_id = 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(completed_at.is_none());
    }
}
