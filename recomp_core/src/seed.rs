//! Seed dataset shipped with Recomp.
//!
//! Three months of training (Dec 2025 to Feb 2026), the matching weigh-ins
//! and the strength goals for six muscle groups. A fresh data directory and
//! `recomp reset` start from this.

use crate::types::*;
use crate::Periods;
use once_cell::sync::Lazy;

/// Cached seed data - built once and cloned into stores on demand
static SEED: Lazy<SeedData> = Lazy::new(build_seed_internal);

/// The full seed dataset
#[derive(Clone, Debug)]
pub struct SeedData {
    pub workouts: Vec<Workout>,
    pub weigh_ins: Vec<WeighIn>,
    pub goals: GoalsByGroup,
    pub periods: Periods,
}

/// Get a reference to the cached seed data
pub fn get_seed() -> &'static SeedData {
    &SEED
}

pub fn seed_workouts() -> &'static [Workout] {
    &SEED.workouts
}

pub fn seed_weigh_ins() -> &'static [WeighIn] {
    &SEED.weigh_ins
}

pub fn seed_goals() -> &'static GoalsByGroup {
    &SEED.goals
}

fn workout(
    id: i64,
    date: &str,
    kind: &str,
    muscles: &[&str],
    notes: Option<&str>,
    intensity: &[(&str, i32)],
) -> Workout {
    Workout {
        id,
        date: date.into(),
        kind: kind.into(),
        muscles: muscles.iter().map(|m| m.to_string()).collect(),
        notes: notes.map(str::to_string),
        intensity: if intensity.is_empty() {
            None
        } else {
            Some(intensity.iter().map(|(k, v)| (k.to_string(), *v)).collect())
        },
    }
}

fn weigh_in(date: &str, weight: f64, bf: f64, note: &str) -> WeighIn {
    WeighIn {
        date: date.into(),
        weight,
        bf: Some(bf),
        note: Some(note.into()),
    }
}

fn goal(exercise: &str, current: &str, target: &str, status: &str, rank: Option<u32>) -> Goal {
    Goal {
        exercise: exercise.into(),
        current: current.into(),
        target: target.into(),
        focus: String::new(),
        status: status.into(),
        rank,
    }
}

fn build_seed_internal() -> SeedData {
    SeedData {
        workouts: build_workouts(),
        weigh_ins: build_weigh_ins(),
        goals: build_goals(),
        periods: Periods::default(),
    }
}

fn build_workouts() -> Vec<Workout> {
    vec![
        workout(1, "2025-12-01", "Full Body", &["Back", "Legs", "Chest", "Shoulders", "Biceps", "Triceps"], Some("Start Point"), &[("back", 3), ("legs", 3), ("chest", 2), ("shoulders", 2), ("biceps", 1), ("triceps", 1)]),
        workout(2, "2025-12-03", "Pilates", &["Core", "Legs"], Some("Focus: Legs & Core"), &[]),
        workout(3, "2025-12-04", "Upper Body", &["Chest", "Back", "Shoulders", "Abs"], None, &[("chest", 3), ("back", 3), ("shoulders", 2), ("abs", 2)]),
        workout(4, "2025-12-08", "Full Body", &["Legs", "Chest", "Back", "Shoulders", "Biceps", "Triceps"], None, &[("legs", 3), ("chest", 2), ("back", 1), ("shoulders", 2), ("biceps", 1), ("triceps", 1)]),
        workout(5, "2025-12-10", "Push", &["Chest", "Legs", "Shoulders", "Triceps"], None, &[("chest", 3), ("legs", 1), ("shoulders", 3), ("triceps", 1)]),
        workout(6, "2025-12-12", "Pull", &["Back", "Legs", "Biceps", "Abs"], None, &[("back", 3), ("legs", 2), ("biceps", 2), ("abs", 2)]),
        workout(7, "2025-12-13", "Upper Body", &["Chest", "Shoulders", "Triceps"], None, &[("chest", 3), ("shoulders", 1), ("triceps", 1)]),
        workout(8, "2025-12-17", "Pilates", &["Core", "Legs"], Some("Focus: Legs & Core"), &[]),
        workout(9, "2025-12-18", "Lower Body", &["Legs"], None, &[("legs", 3)]),
        workout(10, "2025-12-24", "Pilates", &["Legs", "Glutes"], Some("Focus: Legs & Glutes"), &[]),
        workout(11, "2025-12-25", "Upper Body", &["Back", "Chest", "Shoulders", "Biceps", "Triceps"], None, &[("back", 3), ("chest", 2), ("shoulders", 1), ("biceps", 2), ("triceps", 1)]),
        workout(12, "2025-12-27", "Lower Body", &["Legs", "Shoulders", "Abs"], None, &[("legs", 3), ("shoulders", 2), ("abs", 3)]),
        workout(13, "2025-12-30", "Upper Body", &["Chest", "Back", "Abs"], None, &[("chest", 3), ("back", 3), ("abs", 1)]),
        workout(14, "2026-01-01", "Lower Body", &["Legs", "Shoulders", "Triceps", "Abs"], None, &[("legs", 3), ("shoulders", 2), ("triceps", 2), ("abs", 1)]),
        workout(15, "2026-01-02", "Pull", &["Back", "Chest", "Biceps", "Abs"], None, &[("back", 3), ("chest", 1), ("biceps", 2), ("abs", 2)]),
        workout(16, "2026-01-03", "Cardio", &[], Some("Cycling 20.81km"), &[]),
        workout(17, "2026-01-04", "Upper Body", &["Chest", "Legs", "Cardio"], None, &[("chest", 3), ("legs", 1)]),
        workout(18, "2026-01-06", "Cardio", &["Abs", "Cardio"], None, &[("abs", 3)]),
        workout(19, "2026-01-07", "Pilates", &["Full Body"], Some("Full Body"), &[]),
        workout(20, "2026-01-08", "Upper Body", &["Back", "Chest", "Shoulders", "Abs"], None, &[("back", 3), ("chest", 1), ("shoulders", 1), ("abs", 1)]),
        workout(21, "2026-01-10", "Lower Body", &["Legs", "Triceps", "Biceps", "Abs"], None, &[("legs", 3), ("triceps", 2), ("biceps", 2), ("abs", 2)]),
        workout(22, "2026-01-12", "Upper Body", &["Chest", "Back", "Shoulders", "Abs", "Cardio"], None, &[("chest", 3), ("back", 1), ("shoulders", 3), ("abs", 3)]),
        workout(23, "2026-01-14", "Pilates", &["Legs"], Some("Focus: Legs"), &[]),
        workout(24, "2026-01-16", "Cardio", &[], Some("Walking 12km"), &[]),
        workout(25, "2026-01-19", "Upper Body", &["Back", "Chest", "Shoulders", "Abs"], None, &[("back", 3), ("chest", 3), ("shoulders", 1), ("abs", 3)]),
        workout(26, "2026-01-22", "Upper + Lower", &["Legs", "Chest", "Triceps", "Abs"], None, &[("legs", 3), ("chest", 2), ("triceps", 3), ("abs", 3)]),
        workout(27, "2026-01-24", "Upper Body", &["Back", "Shoulders", "Biceps", "Abs"], None, &[("back", 3), ("shoulders", 2), ("biceps", 2), ("abs", 2)]),
        workout(28, "2026-01-26", "Lower + Upper", &["Legs", "Shoulders", "Biceps", "Triceps"], None, &[("legs", 3), ("shoulders", 1), ("biceps", 1), ("triceps", 1)]),
        workout(29, "2026-01-28", "Upper Body", &["Chest"], Some("Stopped early (fatigue)"), &[("chest", 2)]),
        workout(30, "2026-01-29", "Back + Legs", &["Back", "Legs", "Abs", "Shoulders"], None, &[("back", 3), ("legs", 2), ("abs", 2), ("shoulders", 1)]),
        workout(31, "2026-02-02", "Upper Body", &["Chest", "Back", "Shoulders", "Biceps", "Triceps", "Abs"], None, &[("chest", 1), ("back", 1), ("shoulders", 3), ("biceps", 1), ("triceps", 2), ("abs", 1)]),
        workout(32, "2026-02-07", "Cardio", &["Cardio", "Legs"], Some("Tennis ~2hours"), &[("legs", 1)]),
        workout(33, "2026-02-08", "Upper Body", &["Chest", "Back", "Biceps", "Abs", "Cardio"], None, &[("chest", 2), ("back", 2), ("biceps", 2), ("abs", 2)]),
    ]
}

fn build_weigh_ins() -> Vec<WeighIn> {
    vec![
        weigh_in("2025-12-01", 69.5, 15.4, "Start"),
        weigh_in("2025-12-08", 70.0, 15.1, ""),
        weigh_in("2025-12-17", 70.6, 14.7, ""),
        weigh_in("2025-12-25", 71.2, 14.9, ""),
        weigh_in("2026-01-04", 72.5, 15.2, ""),
        weigh_in("2026-01-08", 73.2, 15.0, ""),
        weigh_in("2026-01-12", 72.8, 14.8, ""),
        weigh_in("2026-01-19", 73.1, 14.5, ""),
        weigh_in("2026-01-26", 72.5, 14.2, "~14.2%"),
    ]
}

/// Within each group: ranked goals by rank, then the rest in their original order
fn build_goals() -> GoalsByGroup {
    let mut groups = GoalsByGroup::new();

    groups.insert(
        "chest".into(),
        vec![
            goal("Incline Dumbbell Press", "24kg x12", "26kg x10", "Primary focus and aiming to break a personal best for upper chest", Some(3)),
            goal("Incline Barbell Press", "15kg + bar x10", "20kg + bar x8", "Stable technique and aiming to increase load on upper chest fibers", Some(3)),
            goal("Flat Barbell Bench Press", "25kg + bar x9", "30kg + bar x8", "Good bar control and aiming to get closer to 30kg per side", Some(11)),
            goal("Chest Dips", "12 reps", "18 reps", "Good control and aiming for gradual rep volume improvement", Some(17)),
            goal("Pec Deck", "70kg x8", "75kg x10", "Strong peak contraction and aiming to increase volume with heavier weight", Some(19)),
            goal("Flat Dumbbell Press", "26kg x10", "28kg x8", "Strong strength base and aiming to enter the 28kg territory", None),
            goal("Machine Chest Press", "65kg x12", "75kg x8", "Stable mechanical loading and aiming to maximize strength output on the machine", None),
            goal("Cable Fly", "7.5kg x13", "10kg x10", "Precise technique and aiming to progress under continuous tension", None),
            goal("Push-Ups", "20 reps", "30 reps", "Good base level and aiming to increase volume as a finisher", None),
        ],
    );
    groups.insert(
        "back".into(),
        vec![
            goal("Pull-Ups", "20 reps", "25 reps", "Reached the original target and aiming to build higher endurance", Some(2)),
            goal("Assisted Pull-Ups", "50kg assist x10", "Reduce to 40kg assist", "Working on isolation and aiming to reduce assistance toward independent strength", Some(2)),
            goal("T-Bar Row", "40kg x11", "45kg x10", "Building back thickness and aiming to add weight without losing technique", Some(5)),
            goal("Cable Pullover", "17.5kg x10", "20kg x12", "Emphasis on stretch and aiming to improve end of session tension", Some(25)),
            goal("Lat Pulldown", "60kg x12", "65kg x10", "Good stretch and aiming to build strength at heavier loads", None),
            goal("Seated Cable Row", "70kg x8", "75kg x8", "High pulling strength and aiming to drive the session with heavier weight", None),
            goal("Chest-Supported Row", "65kg x10", "70kg x10", "Successful isolation and aiming to increase mechanical load", None),
            goal("Smith Machine Row", "25kg per side x12", "30kg per side x10", "Maximum stability and aiming for heavy work to increase thickness", None),
            goal("Inverted Rows", "15 reps", "20 reps", "Good muscular endurance and aiming to increase rep volume", None),
        ],
    );
    groups.insert(
        "legs".into(),
        vec![
            goal("Hack Squat", "30kg per side x8", "32.5kg per side x8", "Buildup strength at 30kg and aim to add weight gradually", Some(1)),
            goal("Romanian Deadlift (Smith)", "15kg per side x10", "17.5kg per side x10", "Good control with the heavy bar and aiming to increase continuous tension", Some(4)),
            goal("Leg Extension", "55kg x10", "60kg x10", "Consistent isolation work and aiming to reach 60kg for sharper quad development", Some(9)),
            goal("Leg Curl", "45kg x12", "50kg x10", "Strong work in seated or lying variations and aiming to solidify heavier loading", Some(10)),
            goal("Dumbbell Lunges", "10kg per hand x24 steps", "12kg per hand x20 steps", "Good stability and aiming to increase difficulty for glutes", Some(12)),
            goal("Calf Raises", "10kg per side x15", "15kg per side x12", "Emphasis on stretch and aiming to add weight for meaningful stimulus", Some(23)),
            goal("Leg Press", "100kg x12", "110kg x10", "Crossed the 100kg mark and aiming to build strength on the machine", None),
            goal("Adductors / Abductors", "40kg x15", "45kg x12", "Strengthening support muscles and aiming to continue moderate progressive overload", None),
            goal("Free Squat / Kettlebell Squat", "10kg x100 reps", "15kg x80 reps", "High endurance level and aiming to increase weight at high volume", None),
        ],
    );
    groups.insert(
        "shoulders".into(),
        vec![
            goal("Lateral Raises", "8kg x12", "10kg x10", "Emphasis on width and aiming to solidify 10kg with clean technique", Some(6)),
            goal("Dumbbell Shoulder Press", "18kg x15", "20kg x10", "High stability and aiming to move to 20kg dumbbells", Some(13)),
            goal("Machine Shoulder Press", "30kg x15", "35kg x12", "Isolated work and aiming to increase machine resistance", Some(13)),
            goal("Smith Machine Shoulder Press", "12.5kg per side x11", "15kg per side x8", "Stability challenge and aiming to build anterior deltoid strength", Some(13)),
            goal("Rear Delt Fly (Machine)", "15kg x11", "17.5kg x10", "Rear deltoid focus and aiming to improve proportions", Some(18)),
            goal("Front Plate Raise", "15kg x12", "17.5kg x10", "Good explosive strength and aiming to add front load progressively", None),
        ],
    );
    groups.insert(
        "triceps".into(),
        vec![
            goal("Overhead Triceps Extension", "15kg x9", "17.5kg x8", "Emphasis on stretch and aiming to improve strength in the lengthened position", Some(8)),
            goal("Dips", "20 reps", "25 reps", "Improving endurance and aiming to increase total accumulated work volume", Some(17)),
            goal("Cable Triceps Pushdown", "22.5kg x10", "25kg x10", "Strong pump and aiming to reach 25kg for higher loading", None),
        ],
    );
    groups.insert(
        "biceps".into(),
        vec![
            goal("Single-Arm Cable Curl", "10kg x10", "12.5kg x10", "Continuous tension and aiming to add controlled resistance", Some(15)),
            goal("Barbell Curl", "25kg x10", "27.5kg x8", "Good response to the weight and aiming to keep strength momentum", None),
            goal("Dumbbell Curl", "8kg x15", "10kg x12", "High rep volume and aiming to move to heavier loads", None),
            goal("Machine Curl", "20kg x15", "25kg x12", "Perfect isolation and aiming to increase tension at peak contraction", None),
            goal("Hammer Curl", "10kg x15", "12kg x12", "Forearm strengthening and aiming to increase max loading", None),
        ],
    );

    for goals in groups.values_mut() {
        sort_goals_by_rank(goals);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::calculate_load_scores;
    use std::collections::HashSet;

    #[test]
    fn test_seed_sizes() {
        let seed = get_seed();
        assert_eq!(seed.workouts.len(), 33);
        assert_eq!(seed.weigh_ins.len(), 9);
        assert_eq!(seed.goals.len(), GOAL_GROUPS.len());
        assert_eq!(seed.goals.values().map(Vec::len).sum::<usize>(), 41);
    }

    #[test]
    fn test_seed_workout_ids_unique() {
        let ids: HashSet<i64> = seed_workouts().iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), seed_workouts().len());
    }

    #[test]
    fn test_seed_intensity_values_in_range() {
        for workout in seed_workouts() {
            if let Some(intensity) = &workout.intensity {
                assert!(intensity.values().all(|v| (1..=3).contains(v)), "workout {}", workout.id);
            }
        }
    }

    #[test]
    fn test_seed_weigh_ins_sorted_and_unique() {
        let dates: Vec<&str> = seed_weigh_ins().iter().map(|w| w.date.as_str()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_seed_goal_groups_ranked_first() {
        for group in GOAL_GROUPS {
            let goals = &seed_goals()[group];
            let first_unranked = goals.iter().position(|g| g.rank.is_none()).unwrap_or(goals.len());
            assert!(goals[first_unranked..].iter().all(|g| g.rank.is_none()), "group {}", group);
        }
    }

    #[test]
    fn test_seed_december_scores() {
        let december: Vec<Workout> = seed_workouts()
            .iter()
            .filter(|w| w.date.starts_with("2025-12"))
            .cloned()
            .collect();
        let scores = calculate_load_scores(&december);
        assert_eq!(scores["Chest"], 18);
        assert_eq!(scores["Legs"], 15);
    }
}
