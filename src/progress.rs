//! Lesson progress persistence.
//!
//! Completion is tracked per difficulty level as a sorted list of per-level
//! lesson numbers plus a fixed total. The record is read once with a
//! hardcoded default when absent and written back wholesale as JSON on every
//! completion, mirroring a key-value store such as the browser's local
//! storage. Partial writes are not a concern: each write replaces the whole
//! record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/******************************************\
|==========================================|
|                  Levels                  |
|==========================================|
\******************************************/

/// Difficulty levels of the lesson catalogue
#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner, Intermediate, Advanced,
}

impl Level {
    /// Number of elements in the Level enum
    pub const NUM: usize = 3;
}

crate::impl_from_to_primitive!(Level);
crate::impl_enum_iter!(Level);

/// Lesson numbers are global across the catalogue; each level re-counts its
/// own lessons from 1. Beginner owns 1-6, intermediate 7-9, advanced 10+.
const BEGINNER_LESSONS: u32 = 6;
const INTERMEDIATE_LESSONS: u32 = 3;
const ADVANCED_LESSONS: u32 = 3;

impl Level {
    /// Splits a global lesson number into its level and per-level number
    pub fn locate(lesson: u32) -> (Level, u32) {
        if lesson <= BEGINNER_LESSONS {
            (Level::Beginner, lesson)
        } else if lesson <= BEGINNER_LESSONS + INTERMEDIATE_LESSONS {
            (Level::Intermediate, lesson - BEGINNER_LESSONS)
        } else {
            (
                Level::Advanced,
                lesson - BEGINNER_LESSONS - INTERMEDIATE_LESSONS,
            )
        }
    }
}

/******************************************\
|==========================================|
|             Progress Record              |
|==========================================|
\******************************************/

/// Completion state for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    /// Sorted, de-duplicated per-level lesson numbers
    pub completed: Vec<u32>,
    pub total_lessons: u32,
}

impl LevelProgress {
    fn with_total(total_lessons: u32) -> Self {
        Self {
            completed: Vec::new(),
            total_lessons,
        }
    }

    fn is_complete(&self) -> bool {
        self.completed.len() as u32 >= self.total_lessons
    }
}

/// The whole persisted progress record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgress {
    beginner: LevelProgress,
    intermediate: LevelProgress,
    advanced: LevelProgress,
}

impl Default for LessonProgress {
    /// The record used when nothing has been stored yet
    fn default() -> Self {
        Self {
            beginner: LevelProgress::with_total(BEGINNER_LESSONS),
            intermediate: LevelProgress::with_total(INTERMEDIATE_LESSONS),
            advanced: LevelProgress::with_total(ADVANCED_LESSONS),
        }
    }
}

impl LessonProgress {
    fn level(&self, level: Level) -> &LevelProgress {
        match level {
            Level::Beginner => &self.beginner,
            Level::Intermediate => &self.intermediate,
            Level::Advanced => &self.advanced,
        }
    }

    fn level_mut(&mut self, level: Level) -> &mut LevelProgress {
        match level {
            Level::Beginner => &mut self.beginner,
            Level::Intermediate => &mut self.intermediate,
            Level::Advanced => &mut self.advanced,
        }
    }

    /// Marks a global lesson number as completed
    ///
    /// Returns `true` if the lesson was newly recorded, `false` if it had
    /// already been completed. The completed list stays sorted.
    pub fn complete(&mut self, lesson: u32) -> bool {
        let (level, local) = Level::locate(lesson);
        let completed = &mut self.level_mut(level).completed;

        match completed.binary_search(&local) {
            Ok(_) => false,
            Err(pos) => {
                completed.insert(pos, local);
                true
            }
        }
    }

    /// Whether a global lesson number has been completed
    pub fn is_completed(&self, lesson: u32) -> bool {
        let (level, local) = Level::locate(lesson);
        self.level(level).completed.binary_search(&local).is_ok()
    }

    /// The completed per-level lesson numbers for a level
    pub fn completed(&self, level: Level) -> &[u32] {
        &self.level(level).completed
    }

    /// Completion percentage for a level, in `0.0..=100.0`
    pub fn percent(&self, level: Level) -> f64 {
        let progress = self.level(level);
        if progress.total_lessons == 0 {
            return 100.0;
        }

        (progress.completed.len() as f64 / progress.total_lessons as f64) * 100.0
    }

    /// Whether every lesson of a level has been completed
    pub fn is_level_complete(&self, level: Level) -> bool {
        self.level(level).is_complete()
    }

    /// Whether a level is available: the first level always is, each later
    /// level unlocks once the previous one is fully complete
    pub fn is_level_unlocked(&self, level: Level) -> bool {
        match level {
            Level::Beginner => true,
            Level::Intermediate => self.beginner.is_complete(),
            Level::Advanced => self.beginner.is_complete() && self.intermediate.is_complete(),
        }
    }
}

/******************************************\
|==========================================|
|             Store Interface              |
|==========================================|
\******************************************/

/// Wholesale key-value persistence seam for the progress record.
///
/// The host environment (browser local storage, a file, a test buffer)
/// stores the serialized record under a single key; reads and writes always
/// cover the whole record.
pub trait ProgressStore {
    /// Returns the stored record text, or `None` if nothing was stored yet
    fn read(&self) -> Option<String>;

    /// Replaces the stored record text
    fn write(&mut self, record: &str) -> Result<(), ProgressError>;
}

/// In-memory store, mainly for tests and headless use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore(Option<String>);

impl ProgressStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.0.clone()
    }

    fn write(&mut self, record: &str) -> Result<(), ProgressError> {
        self.0 = Some(record.to_string());
        Ok(())
    }
}

impl LessonProgress {
    /// Loads the record from a store, falling back to the default record if
    /// the store is empty
    pub fn load(store: &impl ProgressStore) -> Result<Self, ProgressError> {
        match store.read() {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Self::default()),
        }
    }

    /// Writes the whole record back to a store
    pub fn save(&self, store: &mut impl ProgressStore) -> Result<(), ProgressError> {
        let text = serde_json::to_string(self)?;
        store.write(&text)
    }
}

/******************************************\
|==========================================|
|             Progress Errors              |
|==========================================|
\******************************************/

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Malformed progress record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    #[error("Progress store is unavailable: {0}")]
    StoreUnavailable(String),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
