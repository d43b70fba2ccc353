// goal.rs — Goal: the three goal variants and their completion rules.
//
// A Goal is a trackable objective with a point reward, a category label,
// a priority, and a variant-specific completion rule:
//   Simple    — done after one recorded event
//   Eternal   — never done; every event is independently rewarded
//   Checklist — done after a fixed number of recorded events
//
// The variant set is closed: decode-time dispatch is an exhaustive match
// on the tagged enum, never a string lookup that can escape as a panic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuestError;

/// How urgent a goal is. Purely informational metadata — priority does
/// not affect ordering or scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Priority {
    type Err = QuestError;

    /// Accepts the level name (case-insensitive) or the menu digit 1/2/3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" | "1" => Ok(Priority::High),
            "medium" | "med" | "m" | "2" => Ok(Priority::Medium),
            "low" | "l" | "3" => Ok(Priority::Low),
            other => Err(QuestError::Validation(format!(
                "unknown priority {other:?} (expected high, medium, or low)"
            ))),
        }
    }
}

/// The variant-specific part of a goal.
///
/// The `#[serde(tag = "type")]` attribute makes this serialize with an
/// explicit type discriminator — `"type": "checklist"` — alongside the
/// variant's own fields. Combined with `#[serde(flatten)]` on [`Goal`],
/// each persisted record is a single flat object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalKind {
    /// One-shot goal: complete after the first recorded event.
    Simple {
        #[serde(default)]
        complete: bool,
    },

    /// Never-ending goal: every event earns points, none completes it.
    Eternal,

    /// Repetition goal: complete after `required_times` recorded events.
    Checklist {
        required_times: u32,
        #[serde(default)]
        times_completed: u32,
    },
}

/// What a single recorded event did to the goal.
///
/// `AlreadyComplete` is a reported no-op, not an error — recording a
/// finished goal leaves it (and the tracker's score) untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event completed the goal (or the goal completes per event).
    Completed,
    /// A checklist goal crossed the halfway mark with this event.
    Halfway,
    /// The event was counted but the goal is not yet complete.
    Recorded,
    /// The goal was already complete; nothing changed.
    AlreadyComplete,
}

impl EventOutcome {
    /// Whether this outcome earns the goal's point reward.
    pub fn earns_points(self) -> bool {
        !matches!(self, EventOutcome::AlreadyComplete)
    }
}

/// A trackable objective with a reward value and a completion rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub name: String,
    pub points: u32,
    pub category: String,
    pub priority: Priority,
    #[serde(flatten)]
    pub kind: GoalKind,
}

impl Goal {
    /// Create a simple (one-shot) goal.
    pub fn simple(
        name: impl Into<String>,
        points: u32,
        category: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            name: name.into(),
            points,
            category: category.into(),
            priority,
            kind: GoalKind::Simple { complete: false },
        }
    }

    /// Create an eternal (never-completing) goal.
    pub fn eternal(
        name: impl Into<String>,
        points: u32,
        category: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            name: name.into(),
            points,
            category: category.into(),
            priority,
            kind: GoalKind::Eternal,
        }
    }

    /// Create a checklist goal. `required_times` must be at least 1.
    pub fn checklist(
        name: impl Into<String>,
        points: u32,
        category: impl Into<String>,
        priority: Priority,
        required_times: u32,
    ) -> Result<Self, QuestError> {
        let goal = Self {
            name: name.into(),
            points,
            category: category.into(),
            priority,
            kind: GoalKind::Checklist {
                required_times,
                times_completed: 0,
            },
        };
        goal.validate()?;
        Ok(goal)
    }

    /// Check the variant invariants that the type system alone cannot
    /// enforce: a checklist target is at least 1 and its counter never
    /// exceeds the target. Decoded records must pass this before they
    /// are admitted into a tracker.
    pub fn validate(&self) -> Result<(), QuestError> {
        if let GoalKind::Checklist {
            required_times,
            times_completed,
        } = self.kind
        {
            if required_times == 0 {
                return Err(QuestError::Validation(
                    "a checklist goal must require at least one completion".to_string(),
                ));
            }
            if times_completed > required_times {
                return Err(QuestError::Validation(format!(
                    "times completed ({times_completed}) exceeds the required count ({required_times})"
                )));
            }
        }
        Ok(())
    }

    /// Record one event against this goal and report what happened.
    ///
    /// Checklist counters saturate at `required_times`; once a goal is
    /// complete, further events are reported as no-ops.
    pub fn record(&mut self) -> EventOutcome {
        match &mut self.kind {
            GoalKind::Simple { complete } => {
                if *complete {
                    EventOutcome::AlreadyComplete
                } else {
                    *complete = true;
                    EventOutcome::Completed
                }
            }
            GoalKind::Eternal => EventOutcome::Recorded,
            GoalKind::Checklist {
                required_times,
                times_completed,
            } => {
                if *times_completed >= *required_times {
                    return EventOutcome::AlreadyComplete;
                }
                *times_completed += 1;
                if *times_completed == *required_times {
                    EventOutcome::Completed
                } else if *times_completed == *required_times / 2 {
                    // Integer division: odd targets report halfway at the floor.
                    EventOutcome::Halfway
                } else {
                    EventOutcome::Recorded
                }
            }
        }
    }

    /// Overwrite the editable fields. Completion state and checklist
    /// counters are never touched by an edit.
    pub fn edit(
        &mut self,
        name: impl Into<String>,
        points: u32,
        category: impl Into<String>,
        priority: Priority,
    ) {
        self.name = name.into();
        self.points = points;
        self.category = category.into();
        self.priority = priority;
    }

    /// Whether the goal has reached its terminal complete state.
    /// Eternal goals never do.
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            GoalKind::Simple { complete } => *complete,
            GoalKind::Eternal => false,
            GoalKind::Checklist {
                required_times,
                times_completed,
            } => times_completed == required_times,
        }
    }

    /// Progress toward completion as a percentage. Binary (0 or 100)
    /// for simple and eternal goals; proportional for checklists.
    pub fn progress_percent(&self) -> u32 {
        match &self.kind {
            GoalKind::Checklist {
                required_times,
                times_completed,
            } => {
                // Widened so the multiply cannot overflow for large targets.
                (u64::from(*times_completed) * 100 / u64::from(*required_times)) as u32
            }
            _ => {
                if self.is_complete() {
                    100
                } else {
                    0
                }
            }
        }
    }

    /// The `times_completed / required_times` fraction, for checklist
    /// goals only.
    pub fn checklist_progress(&self) -> Option<(u32, u32)> {
        match self.kind {
            GoalKind::Checklist {
                required_times,
                times_completed,
            } => Some((times_completed, required_times)),
            _ => None,
        }
    }

    /// A 10-segment progress bar: one segment filled per full 10%.
    pub fn progress_bar(&self) -> String {
        let filled = (self.progress_percent() / 10) as usize;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
    }

    /// The discriminator name used in persisted records.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            GoalKind::Simple { .. } => "simple",
            GoalKind::Eternal => "eternal",
            GoalKind::Checklist { .. } => "checklist",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} points [{}] (priority: {})",
            self.name, self.points, self.category, self.priority
        )?;
        if let Some((done, required)) = self.checklist_progress() {
            write!(f, " {}/{} {}", done, required, self.progress_bar())?;
        }
        if self.is_complete() {
            write!(f, " (Completed)")
        } else {
            write!(f, " (Progress: {}%)", self.progress_percent())
        }
    }
}
