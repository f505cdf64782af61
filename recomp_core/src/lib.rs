#![forbid(unsafe_code)]

//! Core domain model and aggregation logic for Recomp.
//!
//! This crate provides:
//! - Domain types (workouts, weigh-ins, goals, progress updates)
//! - Seed dataset
//! - Period filtering and the period registry
//! - Load scoring, metric deltas and goal progress
//! - Application store with validated edits
//! - Top-25 exercise catalogue
//! - Persistence (data file, JSON import/export, CSV, goal preferences)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod period;
pub mod load;
pub mod metrics;
pub mod goals;
pub mod seed;
pub mod preferences;
pub mod store;
pub mod export;
pub mod summary;
pub mod top25;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use period::{filter_metrics_by_period, filter_workouts_by_period, is_in_period, Periods, ALL};
pub use load::{calculate_load_scores, get_focus_muscles, get_muscle_analysis, LoadLevel};
pub use metrics::{calculate_delta, get_first_metric, get_latest_metric, MetricKey};
pub use goals::{classify_goal, compute_goals_progress, extract_leading_number, GoalStatus};
pub use preferences::{GoalPreferences, JsonFilePreferences, PreferencesSession, PreferencesStore};
pub use store::AppStore;
pub use export::{export_json, import_json, load_data_file, save_data_file};
pub use summary::PeriodSummary;
pub use top25::{filter_top25, Top25Filter};
