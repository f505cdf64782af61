//! Core domain types for Recomp.
//!
//! This module defines the records every engine reads:
//! - Workouts with their per-muscle intensity maps
//! - Weigh-ins (body weight and body fat)
//! - Strength goals grouped by muscle group
//! - The append-only progress log
//!
//! Field names on the wire match the dashboard's export file, so a file
//! exported by the original tool imports unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Workouts
// ============================================================================

/// Lowercase muscle key → intensity (1 light, 2 moderate, 3 heavy)
pub type IntensityMap = BTreeMap<String, i32>;

/// A logged training session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: i64,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Free-text category ("Upper Body", "Pilates", "Cardio", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Display-only muscle list. Never scored.
    #[serde(default)]
    pub muscles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// The sole scoring input. Absent for sessions that carry no load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<IntensityMap>,
}

impl Workout {
    /// Create a workout with no muscles, notes or intensity
    pub fn new(id: i64, date: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            kind: kind.into(),
            muscles: Vec::new(),
            notes: None,
            intensity: None,
        }
    }

    /// Builder-style helper to attach an intensity map
    pub fn with_intensity<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, i32)>,
        K: Into<String>,
    {
        self.intensity = Some(entries.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }
}

// ============================================================================
// Body metrics
// ============================================================================

/// A single weigh-in. At most one per date.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeighIn {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Kilograms
    pub weight: f64,
    /// Body-fat percentage. Manual entries may omit it.
    #[serde(default)]
    pub bf: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

impl WeighIn {
    pub fn new(date: impl Into<String>, weight: f64, bf: Option<f64>) -> Self {
        Self {
            date: date.into(),
            weight,
            bf,
            note: None,
        }
    }
}

// ============================================================================
// Goals
// ============================================================================

/// A strength target for one exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique within its group; used as a lookup key by progress and preferences
    pub exercise: String,
    /// Free text such as `"24kg x12"`
    pub current: String,
    pub target: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub status: String,
    /// Lower is higher priority; `None` sorts after every ranked goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

/// Muscle-group key (`chest`, `back`, ...) → goals
pub type GoalsByGroup = BTreeMap<String, Vec<Goal>>;

/// Display order of the goal groups
pub const GOAL_GROUPS: [&str; 6] = ["chest", "back", "legs", "shoulders", "triceps", "biceps"];

/// Sort a group's goals rank-ascending with unranked goals last.
///
/// The sort is stable, so unranked goals and rank ties keep their order.
pub fn sort_goals_by_rank(goals: &mut [Goal]) {
    goals.sort_by_key(|g| (g.rank.is_none(), g.rank.unwrap_or(0)));
}

// ============================================================================
// Progress log
// ============================================================================

/// A timestamped update toward a goal's current value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressUpdate {
    pub date: DateTime<Utc>,
    pub exercise: String,
    pub value: String,
}

// ============================================================================
// Muscles
// ============================================================================

/// The closed muscle vocabulary used by the detailed load analysis
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Muscle {
    Chest,
    Back,
    Legs,
    Shoulders,
    Biceps,
    Triceps,
    Abs,
}

impl Muscle {
    /// All muscles in analysis order
    pub const ALL: [Muscle; 7] = [
        Muscle::Chest,
        Muscle::Back,
        Muscle::Legs,
        Muscle::Shoulders,
        Muscle::Biceps,
        Muscle::Triceps,
        Muscle::Abs,
    ];

    /// Scan order used when picking the least-trained muscle
    pub const BALANCE_ORDER: [Muscle; 7] = [
        Muscle::Chest,
        Muscle::Back,
        Muscle::Legs,
        Muscle::Shoulders,
        Muscle::Triceps,
        Muscle::Biceps,
        Muscle::Abs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Muscle::Chest => "Chest",
            Muscle::Back => "Back",
            Muscle::Legs => "Legs",
            Muscle::Shoulders => "Shoulders",
            Muscle::Biceps => "Biceps",
            Muscle::Triceps => "Triceps",
            Muscle::Abs => "Abs",
        }
    }

    /// Match an already title-cased muscle name. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Muscle> {
        Muscle::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_json_field_names() {
        let json = r#"{"id": 3, "date": "2025-12-04", "type": "Upper Body",
            "muscles": ["Chest"], "intensity": {"chest": 3, "back": 3}}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert_eq!(workout.kind, "Upper Body");
        assert_eq!(workout.notes, None);
        assert_eq!(workout.intensity.as_ref().unwrap()["chest"], 3);

        let out = serde_json::to_value(&workout).unwrap();
        assert_eq!(out["type"], "Upper Body");
        assert!(out.get("notes").is_none());
    }

    #[test]
    fn test_workout_without_muscles_or_intensity() {
        let json = r#"{"id": 16, "date": "2026-01-03", "type": "Cardio", "notes": "Cycling"}"#;
        let workout: Workout = serde_json::from_str(json).unwrap();
        assert!(workout.muscles.is_empty());
        assert!(workout.intensity.is_none());
    }

    #[test]
    fn test_weigh_in_null_bf() {
        let json = r#"{"date": "2026-02-01", "weight": 72.0, "bf": null, "note": "Manual Entry"}"#;
        let weigh_in: WeighIn = serde_json::from_str(json).unwrap();
        assert_eq!(weigh_in.bf, None);
        assert_eq!(weigh_in.note.as_deref(), Some("Manual Entry"));
    }

    #[test]
    fn test_sort_goals_by_rank_keeps_unranked_order() {
        let goal = |name: &str, rank: Option<u32>| Goal {
            exercise: name.into(),
            current: String::new(),
            target: String::new(),
            focus: String::new(),
            status: String::new(),
            rank,
        };
        let mut goals = vec![
            goal("Push-Ups", None),
            goal("Pec Deck", Some(19)),
            goal("Cable Fly", None),
            goal("Incline Press", Some(3)),
        ];
        sort_goals_by_rank(&mut goals);
        let names: Vec<_> = goals.iter().map(|g| g.exercise.as_str()).collect();
        assert_eq!(names, ["Incline Press", "Pec Deck", "Push-Ups", "Cable Fly"]);
    }

    #[test]
    fn test_muscle_from_name_is_case_sensitive() {
        assert_eq!(Muscle::from_name("Chest"), Some(Muscle::Chest));
        assert_eq!(Muscle::from_name("chest"), None);
        assert_eq!(Muscle::from_name("Glutes"), None);
    }
}
