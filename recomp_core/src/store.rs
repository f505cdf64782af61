//! Application store.
//!
//! Owns every collection the dashboard reads and exposes the named edits the
//! front end is allowed to make. Each operation validates first and mutates
//! second, so a rejected edit leaves the store exactly as it was.

use crate::metrics::sort_chronologically;
use crate::period::{filter_metrics_by_period, filter_workouts_by_period};
use crate::seed::get_seed;
use crate::{Error, GoalsByGroup, Periods, ProgressUpdate, Result, WeighIn, Workout};
use chrono::{DateTime, NaiveDate, Utc};

/// All user-visible data
#[derive(Clone, Debug, PartialEq)]
pub struct AppStore {
    /// Kept newest first
    pub workouts: Vec<Workout>,
    /// Kept oldest first
    pub weigh_ins: Vec<WeighIn>,
    pub goals: GoalsByGroup,
    /// Append-only progress log
    pub progress: Vec<ProgressUpdate>,
    pub periods: Periods,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl AppStore {
    /// A store holding the built-in dataset
    pub fn seeded() -> Self {
        let seed = get_seed();
        let mut store = Self {
            workouts: seed.workouts.clone(),
            weigh_ins: seed.weigh_ins.clone(),
            goals: seed.goals.clone(),
            progress: Vec::new(),
            periods: seed.periods.clone(),
        };
        store.sort_workouts();
        sort_chronologically(&mut store.weigh_ins);
        store
    }

    /// A store with no records and the default periods
    pub fn empty() -> Self {
        Self {
            workouts: Vec::new(),
            weigh_ins: Vec::new(),
            goals: GoalsByGroup::new(),
            progress: Vec::new(),
            periods: Periods::default(),
        }
    }

    /// Drop every edit and go back to the built-in dataset
    pub fn reset(&mut self) {
        *self = Self::seeded();
        tracing::info!("Store reset to seed data");
    }

    // ------------------------------------------------------------------
    // Workouts
    // ------------------------------------------------------------------

    fn sort_workouts(&mut self) {
        self.workouts.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Replace the workout log wholesale
    pub fn replace_workouts(&mut self, workouts: Vec<Workout>) {
        tracing::debug!("Replacing {} workouts with {}", self.workouts.len(), workouts.len());
        self.workouts = workouts;
    }

    /// One past the largest id in use
    pub fn next_workout_id(&self) -> i64 {
        self.workouts.iter().map(|w| w.id).max().map_or(1, |max| max + 1)
    }

    pub fn add_workout(&mut self, workout: Workout) -> Result<()> {
        validate_date(&workout.date)?;
        if self.workouts.iter().any(|w| w.id == workout.id) {
            return Err(Error::Validation(format!(
                "A workout with id {} already exists",
                workout.id
            )));
        }
        tracing::info!("Added workout {} on {}", workout.id, workout.date);
        self.workouts.push(workout);
        self.sort_workouts();
        Ok(())
    }

    /// Replace the workout with the same id
    pub fn update_workout(&mut self, workout: Workout) -> Result<()> {
        validate_date(&workout.date)?;
        let slot = self
            .workouts
            .iter_mut()
            .find(|w| w.id == workout.id)
            .ok_or_else(|| Error::NotFound(format!("workout {}", workout.id)))?;
        *slot = workout;
        self.sort_workouts();
        Ok(())
    }

    pub fn delete_workout(&mut self, id: i64) -> Result<Workout> {
        let index = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| Error::NotFound(format!("workout {}", id)))?;
        tracing::info!("Deleted workout {}", id);
        Ok(self.workouts.remove(index))
    }

    // ------------------------------------------------------------------
    // Weigh-ins
    // ------------------------------------------------------------------

    /// Log a weigh-in. One per date.
    pub fn add_weigh_in(&mut self, weigh_in: WeighIn) -> Result<()> {
        validate_weigh_in(&weigh_in)?;
        if self.weigh_ins.iter().any(|m| m.date == weigh_in.date) {
            return Err(Error::Validation(
                "A weigh-in already exists for this date".into(),
            ));
        }
        tracing::info!("Added weigh-in for {}", weigh_in.date);
        self.weigh_ins.push(weigh_in);
        sort_chronologically(&mut self.weigh_ins);
        Ok(())
    }

    /// Replace the weigh-in logged on `original_date`
    ///
    /// The record may move to a new date as long as no other weigh-in sits
    /// there.
    pub fn edit_weigh_in(&mut self, original_date: &str, weigh_in: WeighIn) -> Result<()> {
        validate_weigh_in(&weigh_in)?;
        let index = self
            .weigh_ins
            .iter()
            .position(|m| m.date == original_date)
            .ok_or_else(|| Error::NotFound(format!("weigh-in on {}", original_date)))?;

        if weigh_in.date != original_date && self.weigh_ins.iter().any(|m| m.date == weigh_in.date) {
            return Err(Error::Validation(
                "A weigh-in already exists for this date".into(),
            ));
        }

        self.weigh_ins[index] = weigh_in;
        sort_chronologically(&mut self.weigh_ins);
        Ok(())
    }

    pub fn delete_weigh_in(&mut self, date: &str) -> Result<WeighIn> {
        let index = self
            .weigh_ins
            .iter()
            .position(|m| m.date == date)
            .ok_or_else(|| Error::NotFound(format!("weigh-in on {}", date)))?;
        tracing::info!("Deleted weigh-in for {}", date);
        Ok(self.weigh_ins.remove(index))
    }

    // ------------------------------------------------------------------
    // Progress and periods
    // ------------------------------------------------------------------

    /// Append a progress update for an exercise
    pub fn record_progress(&mut self, exercise: &str, value: &str, at: DateTime<Utc>) -> Result<()> {
        let exercise = exercise.trim();
        let value = value.trim();
        if exercise.is_empty() {
            return Err(Error::Validation("Exercise must not be empty".into()));
        }
        if value.is_empty() {
            return Err(Error::Validation("Progress value must not be empty".into()));
        }
        self.progress.push(ProgressUpdate {
            date: at,
            exercise: exercise.to_string(),
            value: value.to_string(),
        });
        tracing::info!("Recorded progress for {}: {}", exercise, value);
        Ok(())
    }

    pub fn delete_progress(&mut self, index: usize) -> Result<ProgressUpdate> {
        if index >= self.progress.len() {
            return Err(Error::NotFound(format!("progress entry {}", index)));
        }
        Ok(self.progress.remove(index))
    }

    pub fn add_period(&mut self, key: &str, label: Option<&str>) -> Result<()> {
        self.periods.add_period(key, label)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn workouts_in(&self, period: &str) -> Vec<Workout> {
        filter_workouts_by_period(&self.workouts, period)
    }

    /// Weigh-ins in a period, oldest first
    pub fn metrics_in(&self, period: &str) -> Vec<WeighIn> {
        let mut metrics = filter_metrics_by_period(&self.weigh_ins, period);
        sort_chronologically(&mut metrics);
        metrics
    }
}

fn validate_date(date: &str) -> Result<()> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| Error::Validation(format!("Date must be YYYY-MM-DD, got {:?}", date)))
}

fn validate_weigh_in(weigh_in: &WeighIn) -> Result<()> {
    validate_date(&weigh_in.date)?;
    if !weigh_in.weight.is_finite() || weigh_in.weight <= 0.0 {
        return Err(Error::Validation("Weight must be a positive number".into()));
    }
    if let Some(bf) = weigh_in.bf {
        if !bf.is_finite() || !(0.0..100.0).contains(&bf) {
            return Err(Error::Validation(
                "Body fat must be between 0 and 100".into(),
            ));
        }
    }
    Ok(())
}
