//! Body-metric deltas.
//!
//! Every function here expects the weigh-ins already sorted by date
//! ascending (see [`sort_chronologically`]); none of them re-sort.
//! Deltas are rounded to one decimal place, half away from zero.

use crate::WeighIn;
use serde::Serialize;
use std::fmt;

/// Which weigh-in field a delta is taken over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKey {
    Weight,
    BodyFat,
}

impl MetricKey {
    fn value(&self, metric: &WeighIn) -> Option<f64> {
        let value = match self {
            MetricKey::Weight => Some(metric.weight),
            MetricKey::BodyFat => metric.bf,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Round to one decimal place, half away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sort weigh-ins by date ascending
pub fn sort_chronologically(metrics: &mut [WeighIn]) {
    metrics.sort_by(|a, b| a.date.cmp(&b.date));
}

pub fn get_first_metric(metrics: &[WeighIn]) -> Option<&WeighIn> {
    metrics.first()
}

pub fn get_latest_metric(metrics: &[WeighIn]) -> Option<&WeighIn> {
    metrics.last()
}

/// Change in `key` between the first and the latest weigh-in
///
/// Returns 0 for an empty collection, a single weigh-in, or when either end
/// lacks the field.
pub fn calculate_delta(metrics: &[WeighIn], key: MetricKey) -> f64 {
    let (Some(start), Some(end)) = (get_first_metric(metrics), get_latest_metric(metrics)) else {
        return 0.0;
    };
    match (key.value(start), key.value(end)) {
        (Some(s), Some(e)) => round1(e - s),
        _ => 0.0,
    }
}

/// Lean mass in kilograms, rounded to one decimal
pub fn lean_mass(weight: f64, bf: f64) -> f64 {
    round1(weight * (1.0 - bf / 100.0))
}

fn lean_of(metric: &WeighIn) -> Option<f64> {
    metric.bf.map(|bf| lean_mass(metric.weight, bf))
}

/// Lean-mass change from the first to the latest weigh-in
///
/// Both ends are rounded before differencing, then the difference is
/// rounded again.
pub fn calculate_lean_delta(metrics: &[WeighIn]) -> f64 {
    let (Some(start), Some(end)) = (get_first_metric(metrics), get_latest_metric(metrics)) else {
        return 0.0;
    };
    match (lean_of(start), lean_of(end)) {
        (Some(s), Some(e)) => round1(e - s),
        _ => 0.0,
    }
}

/// Deltas and latest values shown for a period
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PeriodDeltas {
    /// `None` with fewer than two weigh-ins
    pub weight: Option<f64>,
    pub bf: Option<f64>,
    pub lean: Option<f64>,
    pub last_weight: Option<f64>,
    pub last_bf: Option<f64>,
    pub last_lean: Option<f64>,
}

/// Compute the home-view delta bundle for a sorted slice of weigh-ins
pub fn period_deltas(metrics: &[WeighIn]) -> PeriodDeltas {
    let Some(last) = get_latest_metric(metrics) else {
        return PeriodDeltas::default();
    };

    let mut deltas = PeriodDeltas {
        last_weight: Some(last.weight),
        last_bf: last.bf,
        ..Default::default()
    };
    if metrics.len() < 2 {
        return deltas;
    }

    deltas.weight = Some(calculate_delta(metrics, MetricKey::Weight));
    deltas.last_lean = lean_of(last);
    let first = &metrics[0];
    if first.bf.is_some() && last.bf.is_some() {
        deltas.bf = Some(calculate_delta(metrics, MetricKey::BodyFat));
        deltas.lean = Some(calculate_lean_delta(metrics));
    }
    deltas
}

/// Narrative reading of the weight and body-fat deltas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CompositionTrend {
    /// Weight down more than half a kilo
    EffectiveCut,
    /// Weight up more than half a kilo while body fat fell
    Recomposition,
    /// Weight up more than half a kilo
    LeanBulk,
    Maintenance,
}

impl CompositionTrend {
    pub fn classify(weight_delta: f64, bf_delta: f64) -> Self {
        if weight_delta < -0.5 {
            CompositionTrend::EffectiveCut
        } else if weight_delta > 0.5 && bf_delta < 0.0 {
            CompositionTrend::Recomposition
        } else if weight_delta > 0.5 {
            CompositionTrend::LeanBulk
        } else {
            CompositionTrend::Maintenance
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CompositionTrend::EffectiveCut => "Effective Cut",
            CompositionTrend::Recomposition => "Recomposition Gold",
            CompositionTrend::LeanBulk => "Lean Bulk",
            CompositionTrend::Maintenance => "Maintenance Phase",
        }
    }
}

impl fmt::Display for CompositionTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
