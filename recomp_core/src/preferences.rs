//! Goal display preferences.
//!
//! Per muscle group the user can reorder goals, hide them and tick them off
//! as achieved; per exercise they can override the target text. The muscle
//! order of the training-load view is kept here too. None of this touches
//! the goal records themselves, and the aggregation engines never see it.
//!
//! Persistence goes through the [`PreferencesStore`] port so the working
//! copy can be saved or discarded as a unit.

use crate::{Error, Goal, Muscle, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Group key → exercise names
pub type ExerciseLists = BTreeMap<String, Vec<String>>;

/// Muscle order of the training-load view before any customisation
pub const DEFAULT_LOAD_ORDER: [Muscle; 7] = Muscle::BALANCE_ORDER;

fn default_load_order() -> Vec<Muscle> {
    DEFAULT_LOAD_ORDER.to_vec()
}

/// Saved goal-view preferences
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalPreferences {
    /// Custom display order per group
    #[serde(default)]
    pub order: ExerciseLists,
    #[serde(default)]
    pub hidden: ExerciseLists,
    #[serde(default)]
    pub achieved: ExerciseLists,
    /// Exercise → custom target text
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
    /// Muscle order of the training-load view
    #[serde(default = "default_load_order")]
    pub load_order: Vec<Muscle>,
}

impl Default for GoalPreferences {
    fn default() -> Self {
        Self {
            order: ExerciseLists::new(),
            hidden: ExerciseLists::new(),
            achieved: ExerciseLists::new(),
            targets: BTreeMap::new(),
            load_order: default_load_order(),
        }
    }
}

impl GoalPreferences {
    /// Every goal of a group in the custom order, hidden ones included
    ///
    /// Listed exercises come first in that order and the rest follow in
    /// their original order.
    pub fn ordered_goals<'a>(&self, group: &str, goals: &'a [Goal]) -> Vec<&'a Goal> {
        let mut ordered: Vec<&Goal> = goals.iter().collect();
        if let Some(order) = self.order.get(group) {
            ordered.sort_by_key(|g| {
                order
                    .iter()
                    .position(|e| *e == g.exercise)
                    .unwrap_or(usize::MAX)
            });
        }
        ordered
    }

    /// Goals of a group as the user wants to see them: ordered, hidden
    /// exercises dropped
    pub fn displayed_goals<'a>(&self, group: &str, goals: &'a [Goal]) -> Vec<&'a Goal> {
        let hidden = self.hidden.get(group);
        self.ordered_goals(group, goals)
            .into_iter()
            .filter(|g| !hidden.is_some_and(|h| h.contains(&g.exercise)))
            .collect()
    }

    /// Swap an exercise with its displayed neighbour above. Returns whether
    /// anything moved.
    pub fn move_up(&mut self, group: &str, goals: &[Goal], exercise: &str) -> bool {
        self.swap_displayed(group, goals, exercise, -1)
    }

    pub fn move_down(&mut self, group: &str, goals: &[Goal], exercise: &str) -> bool {
        self.swap_displayed(group, goals, exercise, 1)
    }

    fn swap_displayed(&mut self, group: &str, goals: &[Goal], exercise: &str, step: isize) -> bool {
        let mut names: Vec<String> = self
            .displayed_goals(group, goals)
            .into_iter()
            .map(|g| g.exercise.clone())
            .collect();

        let Some(index) = names.iter().position(|n| n == exercise) else {
            return false;
        };
        let Some(other) = index.checked_add_signed(step).filter(|i| *i < names.len()) else {
            return false;
        };

        names.swap(index, other);
        self.order.insert(group.to_string(), names);
        true
    }

    pub fn hide(&mut self, group: &str, exercise: &str) {
        let hidden = self.hidden.entry(group.to_string()).or_default();
        if !hidden.iter().any(|e| e == exercise) {
            hidden.push(exercise.to_string());
        }
    }

    /// Flip the achieved tick. Returns the new state.
    pub fn toggle_achieved(&mut self, group: &str, exercise: &str) -> bool {
        let achieved = self.achieved.entry(group.to_string()).or_default();
        if let Some(pos) = achieved.iter().position(|e| e == exercise) {
            achieved.remove(pos);
            false
        } else {
            achieved.push(exercise.to_string());
            true
        }
    }

    pub fn is_achieved(&self, group: &str, exercise: &str) -> bool {
        self.achieved
            .get(group)
            .is_some_and(|list| list.iter().any(|e| e == exercise))
    }

    /// Override an exercise's target text. Blank values are rejected.
    pub fn set_target(&mut self, exercise: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::Validation("Target must not be empty".into()));
        }
        self.targets.insert(exercise.to_string(), value.to_string());
        Ok(())
    }

    pub fn target_for(&self, exercise: &str) -> Option<&str> {
        self.targets.get(exercise).map(String::as_str)
    }

    /// Undo hiding, reordering and target overrides for one group
    ///
    /// Achieved ticks are kept.
    pub fn restore_group(&mut self, group: &str, goals: &[Goal]) {
        self.hidden.remove(group);
        self.order.remove(group);
        for goal in goals {
            self.targets.remove(&goal.exercise);
        }
    }

    /// Muscles in the order the training-load view lists them
    ///
    /// Duplicates in the saved list are dropped and muscles missing from it
    /// are appended in default order, so every muscle appears exactly once.
    pub fn load_order(&self) -> Vec<Muscle> {
        let mut order: Vec<Muscle> = Vec::with_capacity(DEFAULT_LOAD_ORDER.len());
        for muscle in self.load_order.iter().chain(DEFAULT_LOAD_ORDER.iter()) {
            if !order.contains(muscle) {
                order.push(*muscle);
            }
        }
        order
    }

    /// Swap a muscle with its neighbour above. Returns whether anything moved.
    pub fn load_move_up(&mut self, muscle: Muscle) -> bool {
        self.swap_load(muscle, -1)
    }

    pub fn load_move_down(&mut self, muscle: Muscle) -> bool {
        self.swap_load(muscle, 1)
    }

    fn swap_load(&mut self, muscle: Muscle, step: isize) -> bool {
        let mut order = self.load_order();
        let Some(index) = order.iter().position(|m| *m == muscle) else {
            return false;
        };
        let Some(other) = index.checked_add_signed(step).filter(|i| *i < order.len()) else {
            return false;
        };

        order.swap(index, other);
        self.load_order = order;
        true
    }

    pub fn restore_load_order(&mut self) {
        self.load_order = default_load_order();
    }
}

// ============================================================================
// Persistence port
// ============================================================================

/// Where preferences are loaded from and saved to
pub trait PreferencesStore {
    fn load(&self) -> Result<GoalPreferences>;
    fn save(&mut self, prefs: &GoalPreferences) -> Result<()>;
}

/// JSON file store with file locking
///
/// Reads take a shared lock; writes go to a locked temp file that is
/// renamed over the original.
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesStore for JsonFilePreferences {
    /// Missing, unreadable or corrupt files load as defaults
    fn load(&self) -> Result<GoalPreferences> {
        let path = &self.path;
        if !path.exists() {
            tracing::info!("No preferences file found, using defaults");
            return Ok(GoalPreferences::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open preferences {:?}: {}. Using defaults.", path, e);
                return Ok(GoalPreferences::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock preferences {:?}: {}. Using defaults.", path, e);
            return Ok(GoalPreferences::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read preferences {:?}: {}. Using defaults.", path, e);
            return Ok(GoalPreferences::default());
        }

        file.unlock()?;

        match serde_json::from_str::<GoalPreferences>(&contents) {
            Ok(prefs) => {
                tracing::debug!("Loaded preferences from {:?}", path);
                Ok(prefs)
            }
            Err(e) => {
                tracing::warn!("Failed to parse preferences {:?}: {}. Using defaults.", path, e);
                Ok(GoalPreferences::default())
            }
        }
    }

    fn save(&mut self, prefs: &GoalPreferences) -> Result<()> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| Error::Other("preferences path missing parent".into()))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, prefs)?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store, handy for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    saved: Option<GoalPreferences>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for MemoryPreferences {
    fn load(&self) -> Result<GoalPreferences> {
        Ok(self.saved.clone().unwrap_or_default())
    }

    fn save(&mut self, prefs: &GoalPreferences) -> Result<()> {
        self.saved = Some(prefs.clone());
        Ok(())
    }
}

/// A working copy of the preferences plus the last saved snapshot
pub struct PreferencesSession<S: PreferencesStore> {
    store: S,
    saved: GoalPreferences,
    working: GoalPreferences,
}

impl<S: PreferencesStore> PreferencesSession<S> {
    pub fn open(store: S) -> Result<Self> {
        let saved = store.load()?;
        Ok(Self {
            store,
            working: saved.clone(),
            saved,
        })
    }

    pub fn prefs(&self) -> &GoalPreferences {
        &self.working
    }

    pub fn prefs_mut(&mut self) -> &mut GoalPreferences {
        &mut self.working
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.working != self.saved
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.working)?;
        self.saved = self.working.clone();
        Ok(())
    }

    /// Throw away every change since the last save
    pub fn discard(&mut self) {
        self.working = self.saved.clone();
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
