//! Dashboard snapshot for one period.

use crate::goals::{compute_goals_progress, GoalsProgress};
use crate::load::{
    calculate_load_scores, get_focus_muscles, get_muscle_analysis, total_load, training_trend,
    FocusMuscles, LoadScores, MuscleAnalysis, TrainingTrend, WorkoutMix,
};
use crate::metrics::{period_deltas, CompositionTrend, PeriodDeltas};
use crate::AppStore;
use serde::Serialize;

/// Every engine's output for a single period
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: String,
    pub label: String,
    pub mix: WorkoutMix,
    pub scores: LoadScores,
    pub total_load: i64,
    pub focus: FocusMuscles,
    pub analysis: MuscleAnalysis,
    pub deltas: PeriodDeltas,
    /// `None` with fewer than two weigh-ins in the period
    pub composition: Option<CompositionTrend>,
    /// Goals are not period scoped
    pub goals: GoalsProgress,
    pub trend: TrainingTrend,
}

impl PeriodSummary {
    pub fn build(store: &AppStore, period: &str) -> Self {
        let workouts = store.workouts_in(period);
        let metrics = store.metrics_in(period);

        let scores = calculate_load_scores(&workouts);
        let deltas = period_deltas(&metrics);
        let composition = deltas
            .weight
            .map(|w| CompositionTrend::classify(w, deltas.bf.unwrap_or(0.0)));

        tracing::debug!(
            "Built summary for {}: {} workouts, {} weigh-ins",
            period,
            workouts.len(),
            metrics.len()
        );

        PeriodSummary {
            period: period.to_string(),
            label: store.periods.display_label(period).to_string(),
            mix: WorkoutMix::from_workouts(&workouts),
            total_load: total_load(&scores),
            focus: get_focus_muscles(&workouts),
            analysis: get_muscle_analysis(&workouts),
            scores,
            deltas,
            composition,
            goals: compute_goals_progress(&store.goals),
            trend: training_trend(&store.workouts, period, &store.periods),
        }
    }
}
