use chrono::{DateTime, Local};
use rusqlite::{params, Connection, Result};
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::session::GameSummary;

/// One stored play, as read back for the History screen.
#[derive(Debug, Clone)]
pub struct PlayRow {
    pub played_at: DateTime<Local>,
    pub game: String,
    pub group: u8,
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub score: u32,
    pub best_streak: u32,
}

/// Local play history under the platform state dir.
#[derive(Debug)]
pub struct HistoryDb {
    conn: Connection,
}

impl HistoryDb {
    /// Open the database and create the table if needed.
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("vokab_history.db"));
        Self::open(&db_path)
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        let conn = Connection::open(db_path)?;

        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS plays (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                played_at TEXT NOT NULL,
                game TEXT NOT NULL,
                group_idx INTEGER NOT NULL,
                total INTEGER NOT NULL,
                correct INTEGER NOT NULL,
                wrong INTEGER NOT NULL,
                score INTEGER NOT NULL,
                best_streak INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_plays_played_at ON plays(played_at)",
            [],
        )?;

        Ok(HistoryDb { conn })
    }

    pub fn record_play(&self, summary: &GameSummary) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO plays
            (played_at, game, group_idx, total, correct, wrong, score, best_streak)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                summary.played_at.to_rfc3339(),
                summary.game.to_string(),
                summary.group,
                summary.total,
                summary.correct,
                summary.wrong,
                summary.score,
                summary.best_streak,
            ],
        )?;
        Ok(())
    }

    /// Most recent plays, newest first.
    pub fn recent_plays(&self, limit: usize) -> Result<Vec<PlayRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT played_at, game, group_idx, total, correct, wrong, score, best_streak
            FROM plays
            ORDER BY played_at DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map([limit], |row| {
            let played_at_str: String = row.get(0)?;
            let played_at = DateTime::parse_from_rfc3339(&played_at_str)
                .map_err(|_| {
                    rusqlite::Error::InvalidColumnType(
                        0,
                        "played_at".to_string(),
                        rusqlite::types::Type::Text,
                    )
                })?
                .with_timezone(&Local);

            Ok(PlayRow {
                played_at,
                game: row.get(1)?,
                group: row.get(2)?,
                total: row.get::<_, i64>(3)? as usize,
                correct: row.get::<_, i64>(4)? as usize,
                wrong: row.get::<_, i64>(5)? as usize,
                score: row.get::<_, i64>(6)? as u32,
                best_streak: row.get::<_, i64>(7)? as u32,
            })
        })?;

        let mut plays = Vec::new();
        for play in rows {
            plays.push(play?);
        }
        Ok(plays)
    }
}

/// Append one summary row to the CSV session log, writing the header
/// only when the file is new.
pub fn append_session_log(path: &Path, summary: &GameSummary) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let needs_header = !path.exists();

    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if needs_header {
        writer.write_record([
            "date",
            "game",
            "group",
            "total",
            "correct",
            "wrong",
            "score",
            "best_streak",
        ])?;
    }
    writer.write_record([
        summary.played_at.format("%c").to_string(),
        summary.game.to_string(),
        summary.group.to_string(),
        summary.total.to_string(),
        summary.correct.to_string(),
        summary.wrong.to_string(),
        summary.score.to_string(),
        summary.best_streak.to_string(),
    ])?;
    writer.flush()
}

/// Record a finished session everywhere it belongs. Best effort: result
/// presentation never waits on, or fails because of, local bookkeeping.
pub fn record_summary(summary: &GameSummary) {
    match HistoryDb::new() {
        Ok(db) => {
            if let Err(e) = db.record_play(summary) {
                log::warn!("history insert failed: {e}");
            }
        }
        Err(e) => log::warn!("history db unavailable: {e}"),
    }
    if let Some(path) = AppDirs::session_log_path() {
        if let Err(e) = append_session_log(&path, summary) {
            log::warn!("session log append failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameKind;
    use tempfile::tempdir;

    fn summary(score: u32) -> GameSummary {
        GameSummary {
            played_at: Local::now(),
            game: GameKind::Sprint,
            group: 3,
            total: 12,
            correct: 9,
            wrong: 3,
            score,
            best_streak: 5,
        }
    }

    #[test]
    fn record_and_read_back_plays() {
        let dir = tempdir().unwrap();
        let db = HistoryDb::open(&dir.path().join("history.db")).unwrap();

        db.record_play(&summary(90)).unwrap();
        db.record_play(&summary(120)).unwrap();

        let plays = db.recent_plays(10).unwrap();
        assert_eq!(plays.len(), 2);
        assert_eq!(plays[0].game, "sprint");
        assert_eq!(plays[0].group, 3);
        assert_eq!(plays[0].total, 12);
        assert_eq!(plays[0].correct, 9);
    }

    #[test]
    fn recent_plays_respects_limit() {
        let dir = tempdir().unwrap();
        let db = HistoryDb::open(&dir.path().join("history.db")).unwrap();
        for i in 0..5 {
            db.record_play(&summary(i * 10)).unwrap();
        }
        assert_eq!(db.recent_plays(3).unwrap().len(), 3);
    }

    #[test]
    fn session_log_writes_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sessions.csv");

        append_session_log(&path, &summary(50)).unwrap();
        append_session_log(&path, &summary(70)).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,game,group"));
        assert_eq!(
            contents.matches("date,game,group").count(),
            1,
            "header must be written once"
        );
        assert!(lines[1].contains("sprint"));
    }
}
