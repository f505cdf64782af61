//! Goal progress.
//!
//! Goal values are free text (`"24kg x12"`, `"Reduce to 40kg assist"`).
//! Progress is judged on the first number in each string only; no unit
//! parsing is attempted.

use crate::{Goal, GoalsByGroup, ProgressUpdate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// First number, with optional fractional part and optional leading digits
static LEADING_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\d*\.?\d+").ok());

/// Extract the first number in a free-text value
///
/// `"24kg x12"` → 24, `"32.5kg per side"` → 32.5, `".5kg"` → 0.5. Returns 0
/// when the string holds no digits.
pub fn extract_leading_number(value: &str) -> f64 {
    LEADING_NUMBER
        .as_ref()
        .and_then(|re| re.find(value))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Where a goal stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GoalStatus {
    Achieved,
    InProgress,
    /// No parseable current value
    NotStarted,
}

impl GoalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Achieved => "achieved",
            GoalStatus::InProgress => "in progress",
            GoalStatus::NotStarted => "not started",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a goal from its current and target strings
///
/// Achieved needs a positive target and a current value at or above it.
/// Otherwise any positive current value counts as in progress.
pub fn classify_goal(current: &str, target: &str) -> GoalStatus {
    let cur = extract_leading_number(current);
    let tgt = extract_leading_number(target);

    if tgt > 0.0 && cur >= tgt {
        GoalStatus::Achieved
    } else if cur > 0.0 {
        GoalStatus::InProgress
    } else {
        GoalStatus::NotStarted
    }
}

/// Progress counts across every goal group
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GoalsProgress {
    pub total: usize,
    pub achieved: usize,
    pub in_progress: usize,
    /// Achieved share, rounded to a whole percent
    pub pct: u32,
}

impl GoalsProgress {
    pub fn from_goals<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Self {
        let mut progress = GoalsProgress::default();
        for goal in goals {
            progress.total += 1;
            match classify_goal(&goal.current, &goal.target) {
                GoalStatus::Achieved => progress.achieved += 1,
                GoalStatus::InProgress => progress.in_progress += 1,
                GoalStatus::NotStarted => {}
            }
        }
        if progress.total > 0 {
            progress.pct = (progress.achieved as f64 / progress.total as f64 * 100.0).round() as u32;
        }
        progress
    }
}

/// Flatten all groups and count achieved / in-progress goals
pub fn compute_goals_progress(goals: &GoalsByGroup) -> GoalsProgress {
    GoalsProgress::from_goals(goals.values().flatten())
}

/// Most recent logged value for an exercise
///
/// Matches the exercise name exactly. When two updates share a timestamp the
/// one logged first wins.
pub fn latest_progress<'a>(log: &'a [ProgressUpdate], exercise: &str) -> Option<&'a str> {
    log.iter()
        .filter(|p| p.exercise == exercise)
        .fold(None, |best: Option<&ProgressUpdate>, p| match best {
            Some(b) if b.date >= p.date => Some(b),
            _ => Some(p),
        })
        .map(|p| p.value.as_str())
}

/// The value to display as a goal's current: latest progress, else the seed
pub fn effective_current<'a>(goal: &'a Goal, log: &'a [ProgressUpdate]) -> &'a str {
    latest_progress(log, &goal.exercise).unwrap_or(&goal.current)
}
