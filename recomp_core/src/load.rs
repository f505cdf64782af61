//! Muscle load scoring.
//!
//! Every workout may carry an intensity map (`{"chest": 3, "back": 1}`).
//! Summing those values per muscle over a set of workouts gives the load
//! score that drives the load, compare and home views:
//! - `calculate_load_scores`: open vocabulary, any key is scored
//! - `get_muscle_analysis`: closed seven-muscle vocabulary with
//!   per-intensity workout buckets
//! - `get_focus_muscles`: most and least loaded muscles
//!
//! The free-text `muscles` list on a workout is never consulted.

use crate::period::{filter_workouts_by_period, ALL};
use crate::{Muscle, Periods, Workout};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Muscle name → summed intensity
pub type LoadScores = BTreeMap<String, i64>;

/// `"chest"` → `"Chest"`. Only the first character changes.
pub fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Sum intensity per muscle across workouts
///
/// Workouts without an intensity map contribute nothing. Keys outside the
/// seven known muscles are still scored under their title-cased name.
pub fn calculate_load_scores(workouts: &[Workout]) -> LoadScores {
    let mut scores = LoadScores::new();

    for intensity in workouts.iter().filter_map(|w| w.intensity.as_ref()) {
        for (key, value) in intensity {
            *scores.entry(title_case(key)).or_insert(0) += i64::from(*value);
        }
    }

    scores
}

/// Total training volume across all muscles
pub fn total_load(scores: &LoadScores) -> i64 {
    scores.values().sum()
}

/// Most and least loaded muscles
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FocusMuscles {
    /// Up to two names, highest score first
    pub top: Vec<String>,
    /// Up to two names, lowest score first
    pub low: Vec<String>,
}

/// Pick the two most and two least loaded muscles
///
/// Scores are ranked descending; equal scores keep alphabetical order, so
/// the result is deterministic for a given input. `low` holds the bottom two
/// of that ranking reversed, which puts the least loaded muscle first.
pub fn get_focus_muscles(workouts: &[Workout]) -> FocusMuscles {
    let scores = calculate_load_scores(workouts);
    if scores.is_empty() {
        return FocusMuscles::default();
    }

    // BTreeMap iterates by name; the stable sort keeps that order for ties.
    let mut ranked: Vec<(String, i64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let top = ranked.iter().take(2).map(|(name, _)| name.clone()).collect();
    let low = ranked
        .iter()
        .rev()
        .take(2)
        .map(|(name, _)| name.clone())
        .collect();

    FocusMuscles { top, low }
}

// ============================================================================
// Detailed analysis
// ============================================================================

/// Qualitative label for a muscle's load points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LoadLevel {
    High,
    Optimal,
    Moderate,
    Low,
}

impl LoadLevel {
    pub const HIGH_MIN: i64 = 21;
    pub const OPTIMAL_MIN: i64 = 15;
    pub const MODERATE_MIN: i64 = 10;

    pub fn from_points(points: i64) -> Self {
        if points >= Self::HIGH_MIN {
            LoadLevel::High
        } else if points >= Self::OPTIMAL_MIN {
            LoadLevel::Optimal
        } else if points >= Self::MODERATE_MIN {
            LoadLevel::Moderate
        } else {
            LoadLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadLevel::High => "High",
            LoadLevel::Optimal => "Optimal",
            LoadLevel::Moderate => "Moderate",
            LoadLevel::Low => "Low",
        }
    }
}

impl fmt::Display for LoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Load breakdown for one muscle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MuscleLoad {
    pub points: i64,
    /// Workouts that touched this muscle at all
    pub sessions: u32,
    /// Workout ids at intensity 3, 2 and 1
    pub i3: Vec<i64>,
    pub i2: Vec<i64>,
    pub i1: Vec<i64>,
}

impl MuscleLoad {
    pub fn level(&self) -> LoadLevel {
        LoadLevel::from_points(self.points)
    }
}

/// One entry per muscle in [`Muscle::ALL`], always all seven
pub type MuscleAnalysis = BTreeMap<Muscle, MuscleLoad>;

/// Per-muscle points, session counts and intensity buckets
///
/// Intensity keys that do not title-case to one of the seven muscles are
/// dropped. Values outside 1..=3 still count toward points and sessions but
/// land in no bucket.
pub fn get_muscle_analysis(workouts: &[Workout]) -> MuscleAnalysis {
    let mut analysis: MuscleAnalysis = Muscle::ALL
        .into_iter()
        .map(|m| (m, MuscleLoad::default()))
        .collect();

    for workout in workouts {
        let Some(intensity) = workout.intensity.as_ref() else {
            continue;
        };

        for (key, value) in intensity {
            let Some(muscle) = Muscle::from_name(&title_case(key)) else {
                continue;
            };
            let Some(entry) = analysis.get_mut(&muscle) else {
                continue;
            };

            entry.points += i64::from(*value);
            entry.sessions += 1;
            match *value {
                3 => entry.i3.push(workout.id),
                2 => entry.i2.push(workout.id),
                1 => entry.i1.push(workout.id),
                _ => {}
            }
        }
    }

    analysis
}

// ============================================================================
// Period comparison and trends
// ============================================================================

/// Load of one muscle in two periods side by side
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeriodComparison {
    pub muscle: String,
    pub a: i64,
    pub b: i64,
}

impl PeriodComparison {
    pub fn delta(&self) -> i64 {
        self.b - self.a
    }
}

/// Compare load scores of two periods
///
/// Covers every muscle scored in either period, sorted by name. A muscle
/// missing from one side reads as 0 there.
pub fn compare_periods(workouts: &[Workout], period_a: &str, period_b: &str) -> Vec<PeriodComparison> {
    let loads_a = calculate_load_scores(&filter_workouts_by_period(workouts, period_a));
    let loads_b = calculate_load_scores(&filter_workouts_by_period(workouts, period_b));

    let muscles: BTreeSet<&String> = loads_a.keys().chain(loads_b.keys()).collect();
    muscles
        .into_iter()
        .map(|m| PeriodComparison {
            muscle: m.clone(),
            a: loads_a.get(m).copied().unwrap_or(0),
            b: loads_b.get(m).copied().unwrap_or(0),
        })
        .collect()
}

/// Direction of total volume against the previous period
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum VolumeDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Volume and focus movement of a period against the one before it
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrainingTrend {
    pub current_volume: i64,
    /// Previous month, when `period` is a month with a predecessor
    pub previous_period: Option<String>,
    pub previous_volume: Option<i64>,
    pub volume_delta: Option<i64>,
    pub direction: Option<VolumeDirection>,
    /// Highest scoring muscle; `None` when nothing scored above zero
    pub top_muscle: Option<(String, i64)>,
    /// Lowest scoring muscle of the fixed seven, missing counted as 0
    pub least_trained: (Muscle, i64),
    /// Muscle with the largest positive gain over the previous period
    pub focus_shift: Option<(String, i64)>,
}

/// Summarize how a period's training moved against the previous month
///
/// `workouts` is the full, unfiltered log; `periods` decides which month
/// counts as previous.
pub fn training_trend(workouts: &[Workout], period: &str, periods: &Periods) -> TrainingTrend {
    let scores = calculate_load_scores(&filter_workouts_by_period(workouts, period));
    let current_volume = total_load(&scores);

    let previous_period = if period == ALL {
        None
    } else {
        periods.previous(period).map(str::to_string)
    };
    let previous_scores = previous_period
        .as_deref()
        .map(|p| calculate_load_scores(&filter_workouts_by_period(workouts, p)));

    let previous_volume = previous_scores.as_ref().map(total_load);
    let volume_delta = previous_volume.map(|prev| current_volume - prev);
    let direction = volume_delta.map(|delta| match delta {
        d if d > 0 => VolumeDirection::Increasing,
        d if d < 0 => VolumeDirection::Decreasing,
        _ => VolumeDirection::Stable,
    });

    let mut top_muscle: Option<(String, i64)> = None;
    for (name, score) in &scores {
        let best = top_muscle.as_ref().map(|(_, s)| *s).unwrap_or(0);
        if *score > best {
            top_muscle = Some((name.clone(), *score));
        }
    }

    let mut least_trained = (Muscle::BALANCE_ORDER[0], i64::MAX);
    for muscle in Muscle::BALANCE_ORDER {
        let score = scores.get(muscle.name()).copied().unwrap_or(0);
        if score < least_trained.1 {
            least_trained = (muscle, score);
        }
    }

    let focus_shift = previous_scores.as_ref().and_then(|prev| {
        let mut best: Option<(String, i64)> = None;
        for (name, score) in &scores {
            let delta = score - prev.get(name).copied().unwrap_or(0);
            if delta > best.as_ref().map(|(_, d)| *d).unwrap_or(0) {
                best = Some((name.clone(), delta));
            }
        }
        best
    });

    TrainingTrend {
        current_volume,
        previous_period,
        previous_volume,
        volume_delta,
        direction,
        top_muscle,
        least_trained,
        focus_shift,
    }
}

/// Session counts by workout category
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorkoutMix {
    pub total: usize,
    /// Anything that is neither cardio nor pilates
    pub strength: usize,
    pub cardio: usize,
    pub pilates: usize,
}

impl WorkoutMix {
    pub fn from_workouts(workouts: &[Workout]) -> Self {
        let mut mix = WorkoutMix {
            total: workouts.len(),
            ..Default::default()
        };
        for workout in workouts {
            match workout.kind.as_str() {
                "Cardio" => mix.cardio += 1,
                "Pilates" => mix.pilates += 1,
                _ => mix.strength += 1,
            }
        }
        mix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> Vec<Workout> {
        vec![
            Workout::new(1, "2025-12-01", "Upper Body").with_intensity([("chest", 3), ("back", 1)]),
            Workout::new(2, "2025-12-03", "Push").with_intensity([("chest", 2)]),
        ]
    }

    #[test]
    fn test_load_scores_scenario() {
        let scores = calculate_load_scores(&scenario_a());
        assert_eq!(scores.len(), 2);
        assert_eq!(scores["Chest"], 5);
        assert_eq!(scores["Back"], 1);
    }

    #[test]
    fn test_load_scores_skip_workouts_without_intensity() {
        let mut workouts = scenario_a();
        workouts.push(Workout::new(3, "2025-12-04", "Pilates"));
        assert_eq!(calculate_load_scores(&workouts), calculate_load_scores(&scenario_a()));
        assert!(calculate_load_scores(&[]).is_empty());
    }

    #[test]
    fn test_load_scores_order_independent() {
        let mut workouts = crate::seed::seed_workouts().to_vec();
        let forward = calculate_load_scores(&workouts);
        workouts.reverse();
        assert_eq!(calculate_load_scores(&workouts), forward);
        workouts.rotate_left(7);
        assert_eq!(calculate_load_scores(&workouts), forward);
    }

    #[test]
    fn test_load_scores_keep_unknown_muscles() {
        let workouts =
            vec![Workout::new(1, "2026-01-01", "Lower Body").with_intensity([("glutes", 2)])];
        assert_eq!(calculate_load_scores(&workouts)["Glutes"], 2);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("chest"), "Chest");
        assert_eq!(title_case("lowerBack"), "LowerBack");
        assert_eq!(title_case("Abs"), "Abs");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_muscle_analysis_scenario() {
        let analysis = get_muscle_analysis(&scenario_a());
        assert_eq!(analysis.len(), 7);

        let chest = &analysis[&Muscle::Chest];
        assert_eq!(chest.points, 5);
        assert_eq!(chest.sessions, 2);
        assert_eq!(chest.i3, vec![1]);
        assert_eq!(chest.i2, vec![2]);
        assert!(chest.i1.is_empty());

        let back = &analysis[&Muscle::Back];
        assert_eq!(back.points, 1);
        assert_eq!(back.sessions, 1);
        assert!(back.i3.is_empty());
        assert!(back.i2.is_empty());
        assert_eq!(back.i1, vec![1]);
    }

    #[test]
    fn test_muscle_analysis_always_has_seven_zeroed_entries() {
        let analysis = get_muscle_analysis(&[]);
        assert_eq!(analysis.len(), 7);
        for muscle in Muscle::ALL {
            assert_eq!(analysis[&muscle], MuscleLoad::default());
        }
    }

    #[test]
    fn test_muscle_analysis_drops_unknown_and_tolerates_odd_values() {
        let workouts = vec![Workout::new(9, "2026-01-01", "Odd")
            .with_intensity([("glutes", 3), ("legs", 5), ("abs", 0)])];
        let analysis = get_muscle_analysis(&workouts);

        assert_eq!(analysis.len(), 7);
        let legs = &analysis[&Muscle::Legs];
        assert_eq!(legs.points, 5);
        assert_eq!(legs.sessions, 1);
        assert!(legs.i3.is_empty() && legs.i2.is_empty() && legs.i1.is_empty());

        let abs = &analysis[&Muscle::Abs];
        assert_eq!(abs.points, 0);
        assert_eq!(abs.sessions, 1);
    }

    #[test]
    fn test_focus_muscles() {
        let workouts = vec![Workout::new(1, "2026-01-01", "Full Body").with_intensity([
            ("chest", 3),
            ("back", 2),
            ("legs", 1),
            ("abs", 3),
        ])];
        let focus = get_focus_muscles(&workouts);
        // Ties break alphabetically: Abs before Chest
        assert_eq!(focus.top, vec!["Abs", "Chest"]);
        assert_eq!(focus.low, vec!["Legs", "Back"]);
    }

    #[test]
    fn test_focus_muscles_small_inputs() {
        assert_eq!(get_focus_muscles(&[]), FocusMuscles::default());

        let single = vec![Workout::new(1, "2026-01-01", "Push").with_intensity([("chest", 2)])];
        let focus = get_focus_muscles(&single);
        assert_eq!(focus.top, vec!["Chest"]);
        assert_eq!(focus.low, vec!["Chest"]);
    }

    #[test]
    fn test_load_level_thresholds() {
        assert_eq!(LoadLevel::from_points(30), LoadLevel::High);
        assert_eq!(LoadLevel::from_points(21), LoadLevel::High);
        assert_eq!(LoadLevel::from_points(20), LoadLevel::Optimal);
        assert_eq!(LoadLevel::from_points(15), LoadLevel::Optimal);
        assert_eq!(LoadLevel::from_points(14), LoadLevel::Moderate);
        assert_eq!(LoadLevel::from_points(10), LoadLevel::Moderate);
        assert_eq!(LoadLevel::from_points(9), LoadLevel::Low);
        assert_eq!(LoadLevel::from_points(0), LoadLevel::Low);
    }

    #[test]
    fn test_compare_periods() {
        let workouts = vec![
            Workout::new(1, "2025-12-01", "Push").with_intensity([("chest", 3)]),
            Workout::new(2, "2026-01-02", "Pull").with_intensity([("back", 2), ("chest", 1)]),
        ];
        let rows = compare_periods(&workouts, "2025-12", "2026-01");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].muscle, "Back");
        assert_eq!((rows[0].a, rows[0].b), (0, 2));
        assert_eq!(rows[1].muscle, "Chest");
        assert_eq!(rows[1].delta(), -2);
    }

    #[test]
    fn test_training_trend_against_previous_month() {
        let workouts = vec![
            Workout::new(1, "2025-12-01", "Push").with_intensity([("chest", 3), ("legs", 1)]),
            Workout::new(2, "2026-01-02", "Pull").with_intensity([("back", 3), ("legs", 3)]),
        ];
        let trend = training_trend(&workouts, "2026-01", &Periods::default());

        assert_eq!(trend.current_volume, 6);
        assert_eq!(trend.previous_period.as_deref(), Some("2025-12"));
        assert_eq!(trend.previous_volume, Some(4));
        assert_eq!(trend.volume_delta, Some(2));
        assert_eq!(trend.direction, Some(VolumeDirection::Increasing));
        assert_eq!(trend.top_muscle, Some(("Back".to_string(), 3)));
        assert_eq!(trend.least_trained, (Muscle::Chest, 0));
        assert_eq!(trend.focus_shift, Some(("Back".to_string(), 3)));
    }

    #[test]
    fn test_training_trend_for_all_has_no_comparison() {
        let trend = training_trend(crate::seed::seed_workouts(), ALL, &Periods::default());
        assert!(trend.previous_period.is_none());
        assert!(trend.direction.is_none());
        assert!(trend.focus_shift.is_none());
        assert!(trend.current_volume > 0);

        let first = training_trend(crate::seed::seed_workouts(), "2025-12", &Periods::default());
        assert!(first.previous_volume.is_none());
    }

    #[test]
    fn test_workout_mix() {
        let workouts = vec![
            Workout::new(1, "2026-01-01", "Upper Body"),
            Workout::new(2, "2026-01-02", "Cardio"),
            Workout::new(3, "2026-01-03", "Pilates"),
            Workout::new(4, "2026-01-04", "Cardio"),
        ];
        let mix = WorkoutMix::from_workouts(&workouts);
        assert_eq!(mix.total, 4);
        assert_eq!(mix.strength, 1);
        assert_eq!(mix.cardio, 2);
        assert_eq!(mix.pilates, 1);
    }
}
