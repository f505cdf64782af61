//! Top-25 hypertrophy exercise catalogue.
//!
//! A fixed ranking of exercises in three tiers, each tagged with a body part
//! by keyword and marked when the user already tracks it (as a goal or in
//! the progress log).

use crate::{GoalsByGroup, ProgressUpdate};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Cached catalogue - built once on first use
static TOP25: Lazy<Vec<TopExercise>> = Lazy::new(build_catalogue);

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Tier {
    S,
    A,
    B,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
        }
    }

    pub fn from_label(label: &str) -> Option<Tier> {
        match label.trim().to_ascii_uppercase().as_str() {
            "S" => Some(Tier::S),
            "A" => Some(Tier::A),
            "B" => Some(Tier::B),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Keyword-derived body part of a catalogue entry
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Legs,
    Back,
    Chest,
    Biceps,
    Triceps,
    Shoulders,
    Core,
    General,
}

/// Keyword rules checked in order; the first hit wins
const TAG_RULES: [(BodyPart, &[&str]); 7] = [
    (BodyPart::Legs, &["squat", "leg", "lunge", "calf", "hip", "rdl", "deadlift"]),
    (BodyPart::Back, &["pull", "row", "chin", "lat", "shrug"]),
    (BodyPart::Chest, &["chest", "press", "fly", "dip"]),
    (BodyPart::Biceps, &["curl", "bicep"]),
    (BodyPart::Triceps, &["tricep", "skull", "extension"]),
    (BodyPart::Shoulders, &["raise", "face", "ohp", "shoulder"]),
    (BodyPart::Core, &["plank", "abs"]),
];

impl BodyPart {
    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Legs => "Legs",
            BodyPart::Back => "Back",
            BodyPart::Chest => "Chest",
            BodyPart::Biceps => "Biceps",
            BodyPart::Triceps => "Triceps",
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Core => "Core",
            BodyPart::General => "General",
        }
    }

    /// Case-insensitive
    pub fn from_name(name: &str) -> Option<BodyPart> {
        let name = name.trim();
        TAG_RULES
            .iter()
            .map(|(part, _)| *part)
            .chain(std::iter::once(BodyPart::General))
            .find(|part| part.name().eq_ignore_ascii_case(name))
    }

    /// Tag an exercise from its name and rationale
    ///
    /// Plain substring matching on the lowercased text, so "Lateral" counts
    /// as "lat" and lands in Back.
    pub fn tag(name: &str, rationale: &str) -> BodyPart {
        let text = format!("{} {}", name, rationale).to_lowercase();
        TAG_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
            .map_or(BodyPart::General, |(part, _)| *part)
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One ranked catalogue entry
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TopExercise {
    pub rank: u32,
    pub name: &'static str,
    pub tier: Tier,
    pub rationale: &'static str,
    pub focus: &'static str,
    pub equipment: &'static str,
    pub body_part: BodyPart,
}

/// The catalogue in rank order
pub fn top25() -> &'static [TopExercise] {
    &TOP25
}

fn entry(
    rank: u32,
    name: &'static str,
    tier: Tier,
    rationale: &'static str,
    focus: &'static str,
    equipment: &'static str,
) -> TopExercise {
    TopExercise {
        rank,
        name,
        tier,
        rationale,
        focus,
        equipment,
        body_part: BodyPart::tag(name, rationale),
    }
}

fn build_catalogue() -> Vec<TopExercise> {
    use Tier::*;
    vec![
        entry(1, "Squat Variations", S, "King of leg builders.", "Leg Mass & Strength", "Barbell / Safety Bar"),
        entry(2, "Pull-Ups / Chin-Ups", S, "Best lat builder.", "Vertical Pull", "Bodyweight / Weighted"),
        entry(3, "Incline Press", S, "Upper chest shelf.", "Upper Chest", "Barbell / Dumbbell"),
        entry(4, "RDL", S, "Posterior chain & stretch.", "Posterior Chain", "Barbell"),
        entry(5, "Supported T-Bar Row", S, "Back thickness + stability.", "Back Thickness", "Machine / Landmine"),
        entry(6, "Cable Lateral Raise", A, "Constant tension side delt.", "Side Delts", "Cable"),
        entry(7, "Preacher Curls", A, "Biceps isolation / stretch.", "Biceps Peak", "EZ Bar / DB"),
        entry(8, "Overhead Extension", A, "Long head triceps.", "Triceps Long Head", "Cable / DB"),
        entry(9, "Leg Extension", A, "Rectus femoris isolation.", "Quad Isolation", "Machine"),
        entry(10, "Seated Leg Curl", A, "Hamstring stretch.", "Hamstrings", "Machine"),
        entry(11, "Chest Fly (Cable)", A, "Loaded stretch at bottom.", "Pec Stretch", "Cable"),
        entry(12, "Lateral Pulldown", A, "Vertical pull, great load.", "Lats Width", "Machine"),
        entry(13, "Bench Press", A, "Classic chest builder.", "Chest Strength", "Barbell"),
        entry(14, "Bulgarian Split Squat", A, "Unilateral stability.", "Unilateral Legs", "Dumbbell"),
        entry(15, "Face Pulls", A, "Rear delt & rotator cuff.", "Rear Delts", "Cable"),
        entry(16, "Dips", B, "Chest/Triceps compound.", "Chest & Triceps", "Bodyweight / Weighted"),
        entry(17, "OHP (Barbell)", B, "Compound vertical press.", "Vertical Push", "Barbell"),
        entry(18, "Hip Thrust", B, "Glute isolation.", "Glutes", "Barbell / Machine"),
        entry(19, "Lunges", B, "Dynamic leg movement.", "Leg Dynamics", "Dumbbell"),
        entry(20, "Calf Raises", B, "Essential isolation.", "Calves", "Machine"),
        entry(21, "Skull Crushers", B, "Triceps mass.", "Triceps Mass", "Barbell / EZ Bar"),
        entry(22, "Hammer Curls", B, "Brachialis thickness.", "Brachialis", "Dumbbell"),
        entry(23, "Cable Crossover", B, "Chest definition.", "Chest Detail", "Cable"),
        entry(24, "Shrugs", B, "Traps isolation.", "Upper Traps", "Dumbbell / Barbell"),
        entry(25, "Plank", B, "Core stability.", "Core Stability", "Bodyweight"),
    ]
}

// ============================================================================
// Logged exercises
// ============================================================================

/// Lowercased names of every exercise the user tracks
///
/// Goal exercises across all groups plus every exercise in the progress log.
pub fn logged_exercises(goals: &GoalsByGroup, progress: &[ProgressUpdate]) -> HashSet<String> {
    goals
        .values()
        .flatten()
        .map(|g| g.exercise.to_lowercase())
        .chain(progress.iter().map(|p| p.exercise.to_lowercase()))
        .collect()
}

/// Whole-name match, case-insensitive. "Hammer Curl" does not match
/// "Hammer Curls".
pub fn is_logged(exercise: &TopExercise, logged: &HashSet<String>) -> bool {
    logged.contains(&exercise.name.to_lowercase())
}

// ============================================================================
// Filtering
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Top25Sort {
    #[default]
    Rank,
    /// Body-part name ascending, rank order within a part
    BodyPart,
}

/// View filters. `None` means "All".
#[derive(Clone, Debug, Default)]
pub struct Top25Filter {
    /// Case-insensitive substring of the exercise name
    pub search: String,
    pub tier: Option<Tier>,
    pub body_part: Option<BodyPart>,
    pub sort: Top25Sort,
}

impl Top25Filter {
    pub fn matches(&self, exercise: &TopExercise) -> bool {
        let search = self.search.trim().to_lowercase();
        (search.is_empty() || exercise.name.to_lowercase().contains(&search))
            && self.tier.map_or(true, |t| t == exercise.tier)
            && self.body_part.map_or(true, |p| p == exercise.body_part)
    }
}

/// Catalogue entries passing the filter, in the requested order
pub fn filter_top25(filter: &Top25Filter) -> Vec<&'static TopExercise> {
    let mut shown: Vec<&TopExercise> = top25().iter().filter(|e| filter.matches(e)).collect();
    match filter.sort {
        Top25Sort::Rank => shown.sort_by_key(|e| e.rank),
        Top25Sort::BodyPart => shown.sort_by(|a, b| a.body_part.name().cmp(b.body_part.name())),
    }
    shown
}

/// Body parts that occur in the catalogue, sorted by name
pub fn catalogue_body_parts() -> Vec<BodyPart> {
    let mut parts: Vec<BodyPart> = Vec::new();
    for exercise in top25() {
        if !parts.contains(&exercise.body_part) {
            parts.push(exercise.body_part);
        }
    }
    parts.sort_by_key(|p| p.name());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::{TimeZone, Utc};

    fn ranks(shown: &[&TopExercise]) -> Vec<u32> {
        shown.iter().map(|e| e.rank).collect()
    }

    #[test]
    fn test_catalogue_shape() {
        let all = top25();
        assert_eq!(all.len(), 25);
        assert!(all.iter().enumerate().all(|(i, e)| e.rank == i as u32 + 1));
        assert_eq!(all.iter().filter(|e| e.tier == Tier::S).count(), 5);
        assert_eq!(all.iter().filter(|e| e.tier == Tier::A).count(), 10);
        assert_eq!(all.iter().filter(|e| e.tier == Tier::B).count(), 10);
    }

    #[test]
    fn test_tag_first_rule_wins() {
        assert_eq!(BodyPart::tag("Squat Variations", "King of leg builders."), BodyPart::Legs);
        // "extension" would be triceps, but "leg" is checked first
        assert_eq!(BodyPart::tag("Leg Extension", ""), BodyPart::Legs);
        // "Lateral" contains "lat"
        assert_eq!(BodyPart::tag("Cable Lateral Raise", ""), BodyPart::Back);
        assert_eq!(BodyPart::tag("Dips", "Chest/Triceps compound."), BodyPart::Chest);
        assert_eq!(BodyPart::tag("Skull Crushers", "Triceps mass."), BodyPart::Triceps);
        assert_eq!(BodyPart::tag("Plank", "Core stability."), BodyPart::Core);
        assert_eq!(BodyPart::tag("Farmer Carry", "Grip."), BodyPart::General);
    }

    #[test]
    fn test_catalogue_tags() {
        let count = |part: BodyPart| top25().iter().filter(|e| e.body_part == part).count();
        assert_eq!(count(BodyPart::Legs), 8);
        assert_eq!(count(BodyPart::Back), 7);
        assert_eq!(count(BodyPart::Chest), 6);
        assert_eq!(count(BodyPart::Triceps), 2);
        assert_eq!(count(BodyPart::Biceps), 1);
        assert_eq!(count(BodyPart::Core), 1);
        assert_eq!(count(BodyPart::Shoulders), 0);

        assert_eq!(
            catalogue_body_parts(),
            [
                BodyPart::Back,
                BodyPart::Biceps,
                BodyPart::Chest,
                BodyPart::Core,
                BodyPart::Legs,
                BodyPart::Triceps
            ]
        );
    }

    #[test]
    fn test_logged_against_seed_goals() {
        let logged = logged_exercises(seed::seed_goals(), &[]);
        let hits: Vec<u32> = top25()
            .iter()
            .filter(|e| is_logged(e, &logged))
            .map(|e| e.rank)
            .collect();
        // Leg Extension, Dips, Calf Raises. "Hammer Curl" is not "Hammer Curls".
        assert_eq!(hits, [9, 16, 20]);
    }

    #[test]
    fn test_logged_includes_progress_log() {
        let progress = vec![ProgressUpdate {
            date: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
            exercise: "PLANK".into(),
            value: "90s".into(),
        }];
        let logged = logged_exercises(&GoalsByGroup::new(), &progress);
        assert!(is_logged(&top25()[24], &logged));
        assert!(!is_logged(&top25()[0], &logged));
    }

    #[test]
    fn test_filter_search_and_tier() {
        let filter = Top25Filter {
            search: "CURL".into(),
            ..Default::default()
        };
        assert_eq!(ranks(&filter_top25(&filter)), [7, 10, 22]);

        let filter = Top25Filter {
            search: "curl".into(),
            tier: Some(Tier::B),
            ..Default::default()
        };
        assert_eq!(ranks(&filter_top25(&filter)), [22]);

        let filter = Top25Filter {
            tier: Some(Tier::S),
            ..Default::default()
        };
        assert_eq!(ranks(&filter_top25(&filter)), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_filter_body_part_and_sort() {
        let filter = Top25Filter {
            body_part: Some(BodyPart::Triceps),
            ..Default::default()
        };
        assert_eq!(ranks(&filter_top25(&filter)), [8, 21]);

        let filter = Top25Filter {
            sort: Top25Sort::BodyPart,
            ..Default::default()
        };
        let shown = filter_top25(&filter);
        assert_eq!(shown.len(), 25);
        // Back first, rank order kept within the part
        assert_eq!(ranks(&shown[..7]), [2, 5, 6, 7, 12, 15, 24]);
        assert_eq!(shown[24].body_part, BodyPart::Triceps);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(Tier::from_label("a"), Some(Tier::A));
        assert_eq!(Tier::from_label("C"), None);
        assert_eq!(BodyPart::from_name("legs"), Some(BodyPart::Legs));
        assert_eq!(BodyPart::from_name("Glutes"), None);
    }
}
