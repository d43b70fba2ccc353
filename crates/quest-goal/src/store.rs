// store.rs — Snapshot codec and file-backed store for a GoalTracker.
//
// A snapshot is a single JSON document: tracker-level fields plus one
// record per goal, each carrying an explicit `"type"` discriminator.
// History is deliberately absent — it is session-local state.
//
// Decoding has partial-failure semantics: a goal record that is missing
// fields or carries an unknown discriminator is skipped with a warning
// and counted, never fatal to the rest of the load. Only an unreadable
// outer document is a hard Format error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuestError;
use crate::goal::Goal;
use crate::tracker::GoalTracker;

/// The result of decoding a snapshot: the rebuilt tracker plus the
/// number of malformed goal records that had to be skipped.
pub struct Snapshot {
    pub tracker: GoalTracker,
    pub skipped: usize,
}

#[derive(Serialize)]
struct SnapshotDoc<'a> {
    total_points: u64,
    goals: &'a [Goal],
}

#[derive(Deserialize)]
struct RawSnapshotDoc {
    #[serde(default)]
    total_points: u64,
    #[serde(default)]
    goals: Vec<serde_json::Value>,
}

/// Serialize a tracker snapshot to pretty-printed JSON.
pub fn encode(tracker: &GoalTracker) -> Result<String, QuestError> {
    let doc = SnapshotDoc {
        total_points: tracker.total_score(),
        goals: tracker.goals(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Rebuild a tracker from snapshot text.
///
/// Each goal record is decoded independently so one bad record cannot
/// abort the load; the caller gets a count of what was skipped.
pub fn decode(text: &str) -> Result<Snapshot, QuestError> {
    let raw: RawSnapshotDoc = serde_json::from_str(text)?;

    let mut goals = Vec::with_capacity(raw.goals.len());
    let mut skipped = 0;
    for record in raw.goals {
        let goal = match serde_json::from_value::<Goal>(record) {
            Ok(goal) => goal,
            Err(err) => {
                tracing::warn!("skipping malformed goal record: {err}");
                skipped += 1;
                continue;
            }
        };
        // Structurally valid records can still violate domain invariants
        // (zero target, overfull counter); those are just as malformed
        // and get the same skip treatment.
        if let Err(err) = goal.validate() {
            tracing::warn!("skipping malformed goal record: {err}");
            skipped += 1;
            continue;
        }
        goals.push(goal);
    }

    Ok(Snapshot {
        tracker: GoalTracker::from_snapshot(goals, raw.total_points),
        skipped,
    })
}

/// A snapshot file at a fixed path.
///
/// Saving and loading are explicit, user-triggered operations — the
/// tracker itself never touches the file system.
pub struct GoalFile {
    path: PathBuf,
}

impl GoalFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a snapshot of the tracker (creates or overwrites).
    pub fn save(&self, tracker: &GoalTracker) -> Result<(), QuestError> {
        let text = encode(tracker)?;
        fs::write(&self.path, text).map_err(|source| QuestError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), goals = tracker.len(), "snapshot saved");
        Ok(())
    }

    /// Read and decode the snapshot at this path.
    ///
    /// A missing file is a `NotFound` error; callers are expected to
    /// treat it as non-fatal and continue with an empty tracker.
    pub fn load(&self) -> Result<Snapshot, QuestError> {
        if !self.path.exists() {
            return Err(QuestError::NotFound {
                path: self.path.display().to_string(),
            });
        }
        let text = fs::read_to_string(&self.path).map_err(|source| QuestError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let snapshot = decode(&text)?;
        tracing::info!(
            path = %self.path.display(),
            goals = snapshot.tracker.len(),
            skipped = snapshot.skipped,
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::Priority;
    use tempfile::tempdir;

    fn sample_tracker() -> GoalTracker {
        let mut tracker = GoalTracker::new();
        tracker.add_goal(Goal::simple(
            "Read scriptures",
            10,
            "Spiritual",
            Priority::High,
        ));
        tracker.add_goal(Goal::eternal("Exercise", 5, "Health", Priority::Medium));
        tracker.add_goal(
            Goal::checklist("Attend temple", 10, "Spiritual", Priority::High, 4).unwrap(),
        );
        tracker
    }

    #[test]
    fn encode_decode_round_trip_preserves_goals() {
        let mut tracker = sample_tracker();
        tracker.record_event(2).unwrap();
        tracker.record_event(2).unwrap();

        let text = encode(&tracker).unwrap();
        let snapshot = decode(&text).unwrap();

        assert_eq!(snapshot.skipped, 0);
        assert_eq!(snapshot.tracker.goals(), tracker.goals());
        assert_eq!(snapshot.tracker.total_score(), tracker.total_score());
        // Mid-flight checklist progress survives the trip.
        assert_eq!(
            snapshot.tracker.goal(2).unwrap().checklist_progress(),
            Some((2, 4))
        );
    }

    #[test]
    fn history_is_not_persisted() {
        let mut tracker = sample_tracker();
        tracker.record_event(0).unwrap();
        assert_eq!(tracker.history().len(), 1);

        let text = encode(&tracker).unwrap();
        assert!(!text.contains("history"));

        let snapshot = decode(&text).unwrap();
        assert!(snapshot.tracker.history().is_empty());
    }

    #[test]
    fn record_with_missing_fields_is_skipped_and_counted() {
        let text = r#"{
            "total_points": 0,
            "goals": [
                {"type": "checklist", "name": "Too few fields"},
                {"type": "simple", "name": "Valid", "points": 5,
                 "category": "Misc", "priority": "low"}
            ]
        }"#;

        let snapshot = decode(text).unwrap();
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.tracker.len(), 1);
        assert_eq!(snapshot.tracker.goal(0).unwrap().name, "Valid");
    }

    #[test]
    fn unknown_discriminator_is_skipped_not_fatal() {
        let text = r#"{
            "goals": [
                {"type": "negative", "name": "Bad habit", "points": 5,
                 "category": "Misc", "priority": "low"},
                {"type": "eternal", "name": "Exercise", "points": 5,
                 "category": "Health", "priority": "medium"}
            ]
        }"#;

        let snapshot = decode(text).unwrap();
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.tracker.len(), 1);
        assert_eq!(snapshot.tracker.goal(0).unwrap().name, "Exercise");
    }

    #[test]
    fn zero_target_checklist_record_is_skipped() {
        let text = r#"{
            "goals": [
                {"type": "checklist", "name": "Broken", "points": 5,
                 "category": "Misc", "priority": "low",
                 "required_times": 0, "times_completed": 0},
                {"type": "simple", "name": "Valid", "points": 5,
                 "category": "Misc", "priority": "low"}
            ]
        }"#;

        let snapshot = decode(text).unwrap();
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.tracker.len(), 1);
        // Rendering the survivors must not panic.
        for goal in snapshot.tracker.goals() {
            let _ = goal.to_string();
        }
    }

    #[test]
    fn overfull_checklist_record_is_skipped() {
        let text = r#"{
            "goals": [
                {"type": "checklist", "name": "Overfull", "points": 5,
                 "category": "Misc", "priority": "low",
                 "required_times": 4, "times_completed": 7},
                {"type": "eternal", "name": "Valid", "points": 5,
                 "category": "Health", "priority": "medium"}
            ]
        }"#;

        let snapshot = decode(text).unwrap();
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.tracker.len(), 1);
        assert_eq!(snapshot.tracker.goal(0).unwrap().name, "Valid");
        for goal in snapshot.tracker.goals() {
            let _ = goal.to_string();
        }
    }

    #[test]
    fn unreadable_document_is_a_format_error() {
        assert!(matches!(
            decode("not json at all"),
            Err(QuestError::Format(_))
        ));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let file = GoalFile::new(dir.path().join("goals.json"));

        let mut tracker = sample_tracker();
        tracker.record_event(0).unwrap();
        file.save(&tracker).unwrap();

        let snapshot = file.load().unwrap();
        assert_eq!(snapshot.skipped, 0);
        assert_eq!(snapshot.tracker.goals(), tracker.goals());
        assert_eq!(snapshot.tracker.total_score(), 10);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let file = GoalFile::new(dir.path().join("nope.json"));
        assert!(matches!(file.load(), Err(QuestError::NotFound { .. })));
    }

    #[test]
    fn save_to_unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        // A directory component that does not exist.
        let file = GoalFile::new(dir.path().join("missing-dir").join("goals.json"));
        let result = file.save(&GoalTracker::new());
        assert!(matches!(result, Err(QuestError::Io { .. })));
    }
}
