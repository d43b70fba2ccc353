// tracker.rs — GoalTracker: the aggregate owning goals, score, and history.
//
// The tracker is the sole owner and sole writer of the goal sequence.
// Every index-based operation bounds-checks before mutating, so callers
// can hand user-supplied indices straight through (after translating the
// 1-based user surface to 0-based).
//
// History is an append-only, session-local log. It is never rewritten —
// deleting a goal leaves the entries that mention it untouched — and it
// is never persisted.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::QuestError;
use crate::goal::{EventOutcome, Goal, Priority};

/// One recorded event: when it happened, which goal, and the reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub goal_name: String,
    pub points: u32,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: recorded '{}' and earned {} points",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.goal_name,
            self.points
        )
    }
}

/// What a successful `record_event` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub goal_name: String,
    pub outcome: EventOutcome,
    /// Points awarded by this event: the goal's reward for point-earning
    /// outcomes, zero for the already-complete no-op.
    pub points_awarded: u32,
}

/// The aggregate owning the ordered goal sequence, the running point
/// total, and the session history log.
#[derive(Debug, Default)]
pub struct GoalTracker {
    goals: Vec<Goal>,
    total_points: u64,
    history: Vec<HistoryEntry>,
}

impl GoalTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from a persisted snapshot. History always
    /// starts empty — it is process-lifetime-only state.
    pub fn from_snapshot(goals: Vec<Goal>, total_points: u64) -> Self {
        Self {
            goals,
            total_points,
            history: Vec::new(),
        }
    }

    /// Append a goal. No de-duplication: two goals may share a name.
    pub fn add_goal(&mut self, goal: Goal) {
        tracing::debug!(name = %goal.name, kind = goal.kind_name(), "goal added");
        self.goals.push(goal);
    }

    /// Record one event against the goal at `index`.
    ///
    /// Points are added to the running total (and a history entry
    /// appended) only when the goal reports a point-earning outcome.
    /// Recording an already-complete goal is a reported no-op that
    /// leaves the score and the history untouched.
    pub fn record_event(&mut self, index: usize) -> Result<EventRecord, QuestError> {
        let len = self.goals.len();
        let goal = self
            .goals
            .get_mut(index)
            .ok_or(QuestError::Index { index, len })?;

        let outcome = goal.record();
        let points_awarded = if outcome.earns_points() { goal.points } else { 0 };
        let goal_name = goal.name.clone();

        if outcome.earns_points() {
            self.total_points += u64::from(points_awarded);
            self.history.push(HistoryEntry {
                timestamp: Utc::now(),
                goal_name: goal_name.clone(),
                points: points_awarded,
            });
        }

        Ok(EventRecord {
            goal_name,
            outcome,
            points_awarded,
        })
    }

    /// Overwrite the editable fields of the goal at `index`.
    pub fn edit_goal(
        &mut self,
        index: usize,
        name: impl Into<String>,
        points: u32,
        category: impl Into<String>,
        priority: Priority,
    ) -> Result<(), QuestError> {
        let len = self.goals.len();
        let goal = self
            .goals
            .get_mut(index)
            .ok_or(QuestError::Index { index, len })?;
        goal.edit(name, points, category, priority);
        Ok(())
    }

    /// Remove and return the goal at `index`. The remaining goals keep
    /// their relative order; history entries for the deleted goal stay.
    pub fn delete_goal(&mut self, index: usize) -> Result<Goal, QuestError> {
        let len = self.goals.len();
        if index >= len {
            return Err(QuestError::Index { index, len });
        }
        Ok(self.goals.remove(index))
    }

    /// The goal sequence in insertion order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The goal at `index`, if in range.
    pub fn goal(&self, index: usize) -> Option<&Goal> {
        self.goals.get(index)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Goals grouped by category, with each goal paired with its
    /// position in the underlying sequence (for 1-based display).
    ///
    /// Categories appear in the order their first goal appears in the
    /// sequence — stable grouping, not alphabetical. The returned
    /// structure borrows the tracker, so iteration is restartable.
    pub fn goals_by_category(&self) -> Vec<(&str, Vec<(usize, &Goal)>)> {
        let mut groups: Vec<(&str, Vec<(usize, &Goal)>)> = Vec::new();
        for (index, goal) in self.goals.iter().enumerate() {
            match groups.iter_mut().find(|(cat, _)| *cat == goal.category) {
                Some((_, members)) => members.push((index, goal)),
                None => groups.push((goal.category.as_str(), vec![(index, goal)])),
            }
        }
        groups
    }

    /// The running point total across all recorded events.
    pub fn total_score(&self) -> u64 {
        self.total_points
    }

    /// The session history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn recording_a_simple_goal_completes_it_and_scores() {
        let mut tracker = GoalTracker::new();
        tracker.add_goal(Goal::simple(
            "Read scriptures",
            10,
            "Spiritual",
            Priority::High,
        ));

        let record = tracker.record_event(0).unwrap();
        assert_eq!(record.outcome, EventOutcome::Completed);
        assert_eq!(record.points_awarded, 10);
        assert!(tracker.goal(0).unwrap().is_complete());
        assert_eq!(tracker.total_score(), 10);
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn checklist_scenario_scores_every_counted_event() {
        let mut tracker = GoalTracker::new();
        tracker.add_goal(Goal::checklist("Attend temple", 10, "Spiritual", Priority::High, 4).unwrap());

        tracker.record_event(0).unwrap();
        tracker.record_event(0).unwrap();
        assert!(!tracker.goal(0).unwrap().is_complete());
        assert_eq!(tracker.goal(0).unwrap().progress_percent(), 50);

        tracker.record_event(0).unwrap();
        let last = tracker.record_event(0).unwrap();
        assert_eq!(last.outcome, EventOutcome::Completed);
        assert!(tracker.goal(0).unwrap().is_complete());
        assert_eq!(tracker.total_score(), 40);
    }

    #[test]
    fn already_complete_goal_earns_nothing_further() {
        let mut tracker = GoalTracker::new();
        tracker.add_goal(Goal::simple("Done once", 10, "Misc", Priority::Low));

        tracker.record_event(0).unwrap();
        let repeat = tracker.record_event(0).unwrap();
        assert_eq!(repeat.outcome, EventOutcome::AlreadyComplete);
        assert_eq!(repeat.points_awarded, 0);
        assert_eq!(tracker.total_score(), 10);
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn out_of_range_record_leaves_tracker_untouched() {
        let mut tracker = sample_tracker();
        let result = tracker.record_event(3);
        assert!(matches!(result, Err(QuestError::Index { index: 3, len: 3 })));
        assert_eq!(tracker.total_score(), 0);
        assert_eq!(tracker.len(), 3);
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn edit_and_delete_bounds_check() {
        let mut tracker = sample_tracker();
        assert!(matches!(
            tracker.edit_goal(9, "x", 1, "y", Priority::Low),
            Err(QuestError::Index { .. })
        ));
        assert!(matches!(
            tracker.delete_goal(9),
            Err(QuestError::Index { .. })
        ));
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn delete_preserves_order_and_history() {
        let mut tracker = sample_tracker();
        tracker.record_event(0).unwrap();
        let before: Vec<HistoryEntry> = tracker.history().to_vec();

        let removed = tracker.delete_goal(0).unwrap();
        assert_eq!(removed.name, "Read scriptures");
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.goal(0).unwrap().name, "Exercise");
        assert_eq!(tracker.goal(1).unwrap().name, "Attend temple");

        // History still mentions the deleted goal, verbatim.
        assert_eq!(tracker.history(), before.as_slice());
        assert_eq!(tracker.history()[0].goal_name, "Read scriptures");
    }

    #[test]
    fn grouping_is_stable_first_seen_order() {
        let tracker = sample_tracker();
        let groups = tracker.goals_by_category();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Spiritual");
        assert_eq!(groups[1].0, "Health");

        // Spiritual holds goals 0 and 2, in sequence order.
        let spiritual: Vec<usize> = groups[0].1.iter().map(|(i, _)| *i).collect();
        assert_eq!(spiritual, vec![0, 2]);
    }

    #[test]
    fn grouping_is_restartable() {
        let tracker = sample_tracker();
        let first = tracker.goals_by_category();
        let second = tracker.goals_by_category();
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].0, second[0].0);
    }

    #[test]
    fn eternal_goal_scores_on_every_event() {
        let mut tracker = GoalTracker::new();
        tracker.add_goal(Goal::eternal("Exercise", 5, "Health", Priority::Medium));
        for _ in 0..3 {
            tracker.record_event(0).unwrap();
        }
        assert_eq!(tracker.total_score(), 15);
        assert_eq!(tracker.history().len(), 3);
    }
}
