//! Data file format, import and export.
//!
//! The JSON document is the same one the dashboard's export button
//! produces: five top-level keys, each optional on import. The CLI keeps its
//! own state in this format too.

use crate::metrics::lean_mass;
use crate::{AppStore, Error, GoalsByGroup, Periods, ProgressUpdate, Result, WeighIn, Workout};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// File name offered for exports
pub const DEFAULT_EXPORT_FILE_NAME: &str = "recomp-pro-data.json";

/// Top-level export document
///
/// Every key is optional when reading. A key that is missing or `null`
/// leaves the corresponding collection alone on import.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DataExport {
    pub workouts: Option<Vec<Workout>>,
    pub weigh_ins: Option<Vec<WeighIn>>,
    pub goals: Option<GoalsByGroup>,
    pub current_progress: Option<Vec<ProgressUpdate>>,
    pub periods: Option<Periods>,
}

impl DataExport {
    pub fn from_store(store: &AppStore) -> Self {
        Self {
            workouts: Some(store.workouts.clone()),
            weigh_ins: Some(store.weigh_ins.clone()),
            goals: Some(store.goals.clone()),
            current_progress: Some(store.progress.clone()),
            periods: Some(store.periods.clone()),
        }
    }
}

/// Which collections an import replaced, with their new sizes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub workouts: Option<usize>,
    pub weigh_ins: Option<usize>,
    pub goals: Option<usize>,
    pub progress: Option<usize>,
    pub periods: Option<usize>,
}

impl ImportReport {
    /// True when the document held none of the known keys
    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }

    /// `(key, count)` for every replaced collection, in document order
    pub fn sections(&self) -> Vec<(&'static str, usize)> {
        [
            ("workouts", self.workouts),
            ("weighIns", self.weigh_ins),
            ("goals", self.goals),
            ("currentProgress", self.progress),
            ("periods", self.periods),
        ]
        .into_iter()
        .filter_map(|(key, count)| count.map(|c| (key, c)))
        .collect()
    }
}

/// Serialize the whole store as indented JSON
pub fn export_json(store: &AppStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(&DataExport::from_store(store))?)
}

/// Replace the collections present in `json`
///
/// The document is parsed in full before anything is touched; a parse or
/// shape error returns [`Error::Json`] with the store unchanged.
pub fn import_json(store: &mut AppStore, json: &str) -> Result<ImportReport> {
    let data: DataExport = serde_json::from_str(json)?;
    let mut report = ImportReport::default();

    if let Some(workouts) = data.workouts {
        report.workouts = Some(workouts.len());
        store.replace_workouts(workouts);
    }
    if let Some(weigh_ins) = data.weigh_ins {
        report.weigh_ins = Some(weigh_ins.len());
        store.weigh_ins = weigh_ins;
    }
    if let Some(goals) = data.goals {
        report.goals = Some(goals.values().map(Vec::len).sum());
        store.goals = goals;
    }
    if let Some(progress) = data.current_progress {
        report.progress = Some(progress.len());
        store.progress = progress;
    }
    if let Some(periods) = data.periods {
        report.periods = Some(periods.len());
        store.periods = periods;
    }

    tracing::info!("Imported data: {:?}", report.sections());
    Ok(report)
}

// ============================================================================
// Data file
// ============================================================================

/// Load the store from a data file
///
/// A missing file gives the seed dataset. An unreadable or corrupt file is
/// logged and also gives the seed dataset. Keys absent from the file keep
/// their seed values.
///
/// Use this for reads only. Edits go through [`update_data_file`], which
/// refuses to overwrite a file it cannot parse.
pub fn load_data_file(path: &Path) -> Result<AppStore> {
    match load_data_file_strict(path) {
        Ok(store) => Ok(store),
        Err(e) => {
            tracing::warn!("Unable to load data file {:?}: {}. Using seed data.", path, e);
            Ok(AppStore::seeded())
        }
    }
}

/// Load the store from a data file, propagating read and parse errors
///
/// A missing file still gives the seed dataset.
pub fn load_data_file_strict(path: &Path) -> Result<AppStore> {
    if !path.exists() {
        tracing::info!("No data file found, starting from seed data");
        return Ok(AppStore::seeded());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    if let Err(e) = reader.read_to_string(&mut contents) {
        let _ = file.unlock();
        return Err(e.into());
    }

    file.unlock()?;

    let mut store = AppStore::seeded();
    import_json(&mut store, &contents)?;
    tracing::debug!("Loaded data from {:?}", path);
    Ok(store)
}

/// Write the store to a data file atomically
///
/// The JSON goes to a locked temp file in the same directory, is synced,
/// then renamed over `path`.
pub fn save_data_file(path: &Path, store: &AppStore) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Other("data file path missing parent".into()))?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(export_json(store)?.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved data to {:?}", path);
    Ok(())
}

/// Load the data file, apply `f`, and save it back
///
/// Nothing is written when `f` fails or when the existing file cannot be
/// read or parsed.
pub fn update_data_file<F, T>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut AppStore) -> Result<T>,
{
    let mut store = load_data_file_strict(path)?;
    let out = f(&mut store)?;
    save_data_file(path, &store)?;
    Ok(out)
}

// ============================================================================
// CSV
// ============================================================================

/// A row in the workouts CSV
#[derive(Debug, Serialize)]
struct WorkoutRow {
    id: i64,
    date: String,
    #[serde(rename = "type")]
    kind: String,
    muscles: String,
    intensity: String,
    notes: Option<String>,
}

impl From<&Workout> for WorkoutRow {
    fn from(workout: &Workout) -> Self {
        let intensity = workout
            .intensity
            .iter()
            .flatten()
            .map(|(muscle, level)| format!("{}:{}", muscle, level))
            .collect::<Vec<_>>()
            .join(" ");
        WorkoutRow {
            id: workout.id,
            date: workout.date.clone(),
            kind: workout.kind.clone(),
            muscles: workout.muscles.join("; "),
            intensity,
            notes: workout.notes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WeighInRow {
    date: String,
    weight: f64,
    bf: Option<f64>,
    lean: Option<f64>,
    note: Option<String>,
}

impl From<&WeighIn> for WeighInRow {
    fn from(metric: &WeighIn) -> Self {
        WeighInRow {
            date: metric.date.clone(),
            weight: metric.weight,
            bf: metric.bf,
            lean: metric.bf.map(|bf| lean_mass(metric.weight, bf)),
            note: metric.note.clone(),
        }
    }
}

/// Write rows to a fresh CSV file with headers, synced to disk
fn write_csv<R: Serialize>(path: &Path, rows: impl IntoIterator<Item = R>) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} rows to {:?}", count, path);
    Ok(count)
}

/// Write workouts to a CSV file, one row per session
pub fn export_workouts_csv(path: &Path, workouts: &[Workout]) -> Result<usize> {
    write_csv(path, workouts.iter().map(WorkoutRow::from))
}

/// Write weigh-ins to a CSV file, with derived lean mass
pub fn export_weigh_ins_csv(path: &Path, weigh_ins: &[WeighIn]) -> Result<usize> {
    write_csv(path, weigh_ins.iter().map(WeighInRow::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn store_with_progress() -> AppStore {
        let mut store = AppStore::seeded();
        store
            .record_progress(
                "Pull-Ups",
                "23 reps",
                Utc.with_ymd_and_hms(2026, 2, 14, 7, 30, 0).unwrap(),
            )
            .unwrap();
        store.add_period("2026-03", None).unwrap();
        store
    }

    #[test]
    fn test_export_import_roundtrip() {
        let original = store_with_progress();
        let json = export_json(&original).unwrap();

        let mut restored = AppStore::empty();
        let report = import_json(&mut restored, &json).unwrap();
        assert_eq!(restored, original);
        assert_eq!(report.workouts, Some(33));
        assert_eq!(report.progress, Some(1));
        assert_eq!(report.periods, Some(5));
    }

    #[test]
    fn test_export_uses_camel_case_keys() {
        let json = export_json(&AppStore::seeded()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in ["workouts", "weighIns", "goals", "currentProgress", "periods"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value["workouts"][0].get("type").is_some());
        assert!(json.contains("\n  "));
    }

    #[test]
    fn test_partial_import_replaces_only_present_keys() {
        let mut store = AppStore::seeded();
        let goals_before = store.goals.clone();

        let json = r#"{
            "weighIns": [{"date": "2026-03-01", "weight": 73.0, "bf": 13.9}],
            "currentProgress": null
        }"#;
        let report = import_json(&mut store, json).unwrap();

        assert_eq!(store.weigh_ins.len(), 1);
        assert_eq!(store.weigh_ins[0].note, None);
        assert_eq!(store.goals, goals_before);
        assert_eq!(store.workouts.len(), 33);
        assert_eq!(report.sections(), vec![("weighIns", 1)]);
    }

    #[test]
    fn test_empty_collections_are_replaced() {
        let mut store = AppStore::seeded();
        import_json(&mut store, r#"{"workouts": []}"#).unwrap();
        assert!(store.workouts.is_empty());

        let report = import_json(&mut store, "{}").unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_failed_import_leaves_store_untouched() {
        let mut store = AppStore::seeded();
        let before = store.clone();

        for bad in [
            "not json",
            "[1, 2, 3]",
            r#"{"weighIns": [], "workouts": [{"id": "x"}]}"#,
        ] {
            assert!(matches!(import_json(&mut store, bad), Err(Error::Json(_))));
            assert_eq!(store, before);
        }
    }

    #[test]
    fn test_data_file_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("recomp.json");

        let store = store_with_progress();
        save_data_file(&path, &store).unwrap();
        assert_eq!(load_data_file(&path).unwrap(), store);
    }

    #[test]
    fn test_missing_or_corrupt_data_file_gives_seed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("recomp.json");
        assert_eq!(load_data_file(&path).unwrap(), AppStore::seeded());

        std::fs::write(&path, "{ truncated").unwrap();
        assert_eq!(load_data_file(&path).unwrap(), AppStore::seeded());
    }

    #[test]
    fn test_update_data_file_skips_save_on_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("recomp.json");

        update_data_file(&path, |store| store.delete_workout(store.workouts[0].id)).unwrap();
        assert_eq!(load_data_file(&path).unwrap().workouts.len(), 32);

        let err = update_data_file(&path, |store| store.delete_workout(-1));
        assert!(matches!(err, Err(Error::NotFound(_))));
        assert_eq!(load_data_file(&path).unwrap().workouts.len(), 32);
    }

    #[test]
    fn test_update_refuses_to_overwrite_corrupt_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("recomp.json");
        // Trailing comma: the user's only workout must survive the failed edit
        let corrupt = r#"{"workouts": [{"id": 900, "date": "2026-02-10", "type": "Legs"},]}"#;
        std::fs::write(&path, corrupt).unwrap();

        let err = update_data_file(&path, |store| store.add_period("2026-03", None));
        assert!(matches!(err, Err(Error::Json(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), corrupt);

        assert!(matches!(load_data_file_strict(&path), Err(Error::Json(_))));
        assert_eq!(load_data_file(&path).unwrap(), AppStore::seeded());
    }

    #[test]
    fn test_csv_exports() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = AppStore::seeded();

        let workouts_path = temp_dir.path().join("workouts.csv");
        let count = export_workouts_csv(&workouts_path, &store.workouts).unwrap();
        assert_eq!(count, 33);

        let mut reader = csv::Reader::from_path(&workouts_path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[2], "type");
        assert_eq!(reader.records().count(), 33);

        let metrics_path = temp_dir.path().join("weigh_ins.csv");
        export_weigh_ins_csv(&metrics_path, &store.weigh_ins).unwrap();
        let mut reader = csv::Reader::from_path(&metrics_path).unwrap();
        let first = reader.records().next().unwrap().unwrap();
        assert_eq!(&first[0], store.weigh_ins[0].date.as_str());
    }
}
