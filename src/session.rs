//! Workout session state
//!
//! Tracks which sets the lifter has ticked off for the selected week and day,
//! and turns a completed set into a rest request for the timer. Sessions are
//! saved as pretty-printed JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::error::SessionError;
use crate::models::{GeneratedExercise, TrainingDay};
use crate::timer::RestLabel;

/// Rest used when an exercise carries no rest time
pub const FALLBACK_REST_SECONDS: u32 = 90;

/// One set the lifter has ticked, with what they actually lifted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetCompletionRecord {
    /// Week-qualified exercise id
    pub exercise_id: String,
    pub week: u32,
    pub day: TrainingDay,
    /// 0-based
    pub set_index: u32,
    pub completed: bool,
    pub reps: Option<u32>,
    pub weight: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

/// Rest period to start after a completed set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestRequest {
    pub seconds: u32,
    pub label: RestLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub week: u32,
    pub day: TrainingDay,
    #[serde(default = "default_fallback_rest")]
    pub fallback_rest_seconds: u32,
    #[serde(default)]
    pub records: Vec<SetCompletionRecord>,
}

fn default_fallback_rest() -> u32 {
    FALLBACK_REST_SECONDS
}

impl WorkoutSession {
    pub fn new(week: u32, day: TrainingDay) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            week,
            day,
            fallback_rest_seconds: FALLBACK_REST_SECONDS,
            records: Vec::new(),
        }
    }

    pub fn with_fallback_rest(mut self, seconds: u32) -> Self {
        self.fallback_rest_seconds = seconds;
        self
    }

    /// Switch to another week or day; records of other days are kept
    pub fn select(&mut self, week: u32, day: TrainingDay) {
        self.week = week;
        self.day = day;
    }

    fn record_mut(&mut self, exercise_id: &str, set_index: u32) -> Option<&mut SetCompletionRecord> {
        self.records
            .iter_mut()
            .find(|r| r.exercise_id == exercise_id && r.set_index == set_index)
    }

    pub fn is_set_completed(&self, exercise_id: &str, set_index: u32) -> bool {
        self.records
            .iter()
            .any(|r| r.exercise_id == exercise_id && r.set_index == set_index && r.completed)
    }

    pub fn completed_sets(&self, exercise_id: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.exercise_id == exercise_id && r.completed)
            .count()
    }

    /// Flip a set's completion flag and return the new value
    pub fn toggle_set(&mut self, exercise_id: &str, set_index: u32) -> bool {
        let (week, day) = (self.week, self.day);

        let completed = match self.record_mut(exercise_id, set_index) {
            Some(record) => {
                record.completed = !record.completed;
                record.timestamp = Utc::now();
                record.completed
            }
            None => {
                self.records.push(SetCompletionRecord {
                    exercise_id: exercise_id.to_string(),
                    week,
                    day,
                    set_index,
                    completed: true,
                    reps: None,
                    weight: None,
                    timestamp: Utc::now(),
                });
                true
            }
        };

        tracing::debug!(exercise_id, set_index, completed, "Toggled set");
        completed
    }

    /// Mark a set completed with the reps and weight actually lifted
    pub fn log_set(
        &mut self,
        exercise: &GeneratedExercise,
        set_index: u32,
        reps: u32,
        weight: Decimal,
    ) -> Option<RestRequest> {
        let (week, day) = (self.week, self.day);
        let timestamp = Utc::now();

        match self.record_mut(&exercise.id, set_index) {
            Some(record) => {
                record.completed = true;
                record.reps = Some(reps);
                record.weight = Some(weight);
                record.timestamp = timestamp;
            }
            None => self.records.push(SetCompletionRecord {
                exercise_id: exercise.id.clone(),
                week,
                day,
                set_index,
                completed: true,
                reps: Some(reps),
                weight: Some(weight),
                timestamp,
            }),
        }

        tracing::info!(
            exercise = %exercise.name,
            set = set_index + 1,
            reps,
            weight = %weight,
            "Set logged"
        );

        self.rest_request(exercise, set_index)
    }

    /// Rest to start after `set_index`; none after the last set or an open set
    pub fn rest_request(&self, exercise: &GeneratedExercise, set_index: u32) -> Option<RestRequest> {
        if !self.is_set_completed(&exercise.id, set_index) {
            return None;
        }

        let set_number = set_index + 1;
        if set_number >= exercise.sets {
            tracing::debug!(exercise = %exercise.name, "Last set done, no rest");
            return None;
        }

        let seconds = if exercise.rest_seconds == 0 {
            self.fallback_rest_seconds
        } else {
            exercise.rest_seconds
        };

        Some(RestRequest {
            seconds,
            label: RestLabel::new(exercise.name.clone(), set_number, exercise.sets),
        })
    }

    /// Clear every record of the selected week and day
    pub fn reset_day(&mut self) -> usize {
        let (week, day) = (self.week, self.day);
        let before = self.records.len();
        self.records.retain(|r| !(r.week == week && r.day == day));
        before - self.records.len()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), SessionError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::File {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SessionError::File {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SessionError> {
        let content = fs::read_to_string(path).map_err(|source| SessionError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ProgramGenerator;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn deadlift() -> GeneratedExercise {
        ProgramGenerator::default()
            .generate_day(1, TrainingDay::Sunday)
            .unwrap()
            .exercise("w1_sun_1")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_toggle_set() {
        let mut session = WorkoutSession::new(1, TrainingDay::Sunday);
        assert!(!session.is_set_completed("w1_sun_1", 0));

        assert!(session.toggle_set("w1_sun_1", 0));
        assert!(session.is_set_completed("w1_sun_1", 0));
        assert_eq!(session.completed_sets("w1_sun_1"), 1);

        assert!(!session.toggle_set("w1_sun_1", 0));
        assert!(!session.is_set_completed("w1_sun_1", 0));
        assert_eq!(session.completed_sets("w1_sun_1"), 0);
    }

    #[test]
    fn test_rest_request_after_set() {
        let exercise = deadlift();
        let mut session = WorkoutSession::new(1, TrainingDay::Sunday);

        let request = session.log_set(&exercise, 0, 8, dec!(75)).unwrap();
        assert_eq!(request.seconds, 120);
        assert_eq!(request.label.set_number, 1);
        assert_eq!(request.label.total_sets, 5);
        assert_eq!(request.label.exercise, "Trap Bar Deadlift");
    }

    #[test]
    fn test_no_rest_after_last_set() {
        let exercise = deadlift();
        let mut session = WorkoutSession::new(1, TrainingDay::Sunday);
        assert!(session.log_set(&exercise, 4, 6, dec!(75)).is_none());
    }

    #[test]
    fn test_no_rest_for_open_set() {
        let exercise = deadlift();
        let session = WorkoutSession::new(1, TrainingDay::Sunday);
        assert!(session.rest_request(&exercise, 0).is_none());
    }

    #[test]
    fn test_fallback_rest() {
        let mut exercise = deadlift();
        exercise.rest_seconds = 0;
        let mut session = WorkoutSession::new(1, TrainingDay::Sunday).with_fallback_rest(100);

        let request = session.log_set(&exercise, 1, 8, dec!(75)).unwrap();
        assert_eq!(request.seconds, 100);
    }

    #[test]
    fn test_reset_day_keeps_other_days() {
        let mut session = WorkoutSession::new(1, TrainingDay::Sunday);
        session.toggle_set("w1_sun_1", 0);
        session.toggle_set("w1_sun_2", 0);

        session.select(1, TrainingDay::Tuesday);
        session.toggle_set("w1_tue_1", 0);

        assert_eq!(session.reset_day(), 1);
        assert!(!session.is_set_completed("w1_tue_1", 0));
        assert!(session.is_set_completed("w1_sun_1", 0));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sessions").join("today.json");

        let exercise = deadlift();
        let mut session = WorkoutSession::new(1, TrainingDay::Sunday);
        session.log_set(&exercise, 0, 8, dec!(77.5));

        session.save_to_file(&path).unwrap();
        let loaded = WorkoutSession::load_from_file(&path).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.records[0].weight, Some(dec!(77.5)));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();

        let missing = WorkoutSession::load_from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SessionError::File { .. })));

        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            WorkoutSession::load_from_file(&path),
            Err(SessionError::Malformed(_))
        ));
    }
}
