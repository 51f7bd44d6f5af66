//! Week program generation
//!
//! Combines the block schedule, the weight progression and the authored
//! catalog into concrete per-day prescriptions. Generation is pure: the same
//! week always yields the same program.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::{DayTemplate, ExerciseTemplate, ProgramCatalog};
use crate::error::ProgramError;
use crate::models::{
    GeneratedExercise, GeneratedWorkout, IntensityMethod, RepTarget, Tempo, TrainingDay,
    WeekProgram,
};
use crate::progression::compute_weight;
use crate::schedule::{self, Technique, WeekClassification, SCHEDULE};

/// Tempo prescription for a week
pub fn tempo_for(week: u32, is_deload: bool) -> Tempo {
    if is_deload {
        Tempo::Deload
    } else if week <= 5 {
        Tempo::Foundation
    } else {
        Tempo::Standard
    }
}

fn week_qualified(week: u32, template_id: &str) -> String {
    format!("w{}_{}", week, template_id)
}

/// One appearance of an exercise in the program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionPoint {
    pub week: u32,
    pub day: TrainingDay,
    pub weight: Decimal,
    pub sets: u32,
    pub reps: RepTarget,
    pub technique: Technique,
    pub is_deload: bool,
}

/// Aggregate workload of a week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekVolume {
    pub week_number: u32,
    pub total_sets: u32,
    /// Sets x reps, using the lower bound of rep ranges
    pub total_reps: u32,
    /// Sets x reps x weight, rounded to a whole unit
    pub total_load: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub total_weeks: u32,
    pub total_exercises: usize,
}

/// Program generator over an exercise catalog
#[derive(Debug, Clone, Default)]
pub struct ProgramGenerator {
    catalog: ProgramCatalog,
}

impl ProgramGenerator {
    pub fn new(catalog: ProgramCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }

    /// Generate every configured day of `week`
    pub fn generate_week(&self, week: u32) -> Result<WeekProgram, ProgramError> {
        let classification = schedule::classify_week(week)?;

        let workouts: Vec<GeneratedWorkout> = self
            .catalog
            .days
            .iter()
            .map(|day| self.build_workout(&classification, day))
            .collect();

        tracing::debug!(
            week,
            block = classification.block_index,
            technique = %classification.technique,
            deload = classification.is_deload,
            workouts = workouts.len(),
            "Generated week program"
        );

        Ok(WeekProgram {
            week_number: week,
            block_index: classification.block_index,
            technique: classification.technique,
            rpe_band: classification.rpe_band,
            is_deload: classification.is_deload,
            workouts,
        })
    }

    /// Generate a single day of `week`
    pub fn generate_day(&self, week: u32, day: TrainingDay) -> Result<GeneratedWorkout, ProgramError> {
        let classification = schedule::classify_week(week)?;
        let template = self.catalog.day(day).ok_or_else(|| ProgramError::UnknownDay {
            day: day.key().to_string(),
        })?;

        Ok(self.build_workout(&classification, template))
    }

    /// Generate a day identified by its key ("sunday", "mardi", "home", ...)
    pub fn generate_day_by_key(&self, week: u32, key: &str) -> Result<GeneratedWorkout, ProgramError> {
        let day: TrainingDay = key.parse()?;
        self.generate_day(week, day)
    }

    fn build_workout(&self, classification: &WeekClassification, template: &DayTemplate) -> GeneratedWorkout {
        let exercises: Vec<GeneratedExercise> = template
            .exercises
            .iter()
            .map(|exercise| self.build_exercise(classification, template, exercise))
            .collect();

        let mut techniques: Vec<IntensityMethod> = Vec::new();
        for method in exercises.iter().filter_map(|e| e.method) {
            if !techniques.contains(&method) {
                techniques.push(method);
            }
        }

        GeneratedWorkout {
            day: template.day,
            title: template.title.clone(),
            schedule_note: template.schedule_note.clone(),
            total_sets: exercises.iter().map(|e| e.sets).sum(),
            duration_minutes: template.duration_minutes,
            is_deload: classification.is_deload,
            techniques,
            exercises,
        }
    }

    fn build_exercise(
        &self,
        classification: &WeekClassification,
        day: &DayTemplate,
        template: &ExerciseTemplate,
    ) -> GeneratedExercise {
        let week = classification.week;
        let block = classification.block_index;

        let weight = compute_weight(
            template.base_weight,
            week,
            template.increment,
            template.frequency_weeks,
            classification.is_deload,
        );

        let technique_note = template.technique_note(block, classification.is_deload);
        let base_note = technique_note
            .map(|n| n.note.as_str())
            .unwrap_or_else(|| template.default_note_for_block(block));

        let partner = template
            .superset_partner
            .as_deref()
            .and_then(|id| day.exercise(id));
        let partner_name = partner.map(|p| p.name_for_block(block).to_string());

        let note = match &partner_name {
            Some(name) => format!("Superset with {} | {}", name, base_note),
            None => base_note.to_string(),
        };

        GeneratedExercise {
            id: week_qualified(week, &template.id),
            template_id: template.id.clone(),
            name: template.name_for_block(block).to_string(),
            category: template.category,
            muscles: template.muscles.clone(),
            sets: template.sets,
            reps: template.reps,
            weight,
            rest_seconds: template.rest_seconds,
            tempo: tempo_for(week, classification.is_deload),
            note,
            method: technique_note.map(|n| n.method),
            superset_with: partner.map(|p| week_qualified(week, &p.id)),
            superset_partner: partner_name,
            superset_group: template
                .superset_group
                .as_deref()
                .map(|group| week_qualified(week, group)),
        }
    }

    /// Every week and day on which `name` is prescribed
    pub fn exercise_progression(&self, name: &str) -> Vec<ProgressionPoint> {
        schedule::weeks()
            .filter_map(|week| self.generate_week(week).ok())
            .flat_map(|program| {
                let technique = program.technique;
                let is_deload = program.is_deload;
                let week = program.week_number;
                program.workouts.into_iter().flat_map(move |workout| {
                    let day = workout.day;
                    workout
                        .exercises
                        .into_iter()
                        .filter(|e| e.name == name)
                        .map(move |e| ProgressionPoint {
                            week,
                            day,
                            weight: e.weight,
                            sets: e.sets,
                            reps: e.reps,
                            technique,
                            is_deload,
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect()
    }

    /// Sorted unique exercise names across the whole program
    pub fn all_exercises(&self) -> Vec<String> {
        let names: BTreeSet<String> = schedule::weeks()
            .filter_map(|week| self.generate_week(week).ok())
            .flat_map(|program| program.workouts)
            .flat_map(|workout| workout.exercises)
            .map(|exercise| exercise.name)
            .collect();

        names.into_iter().collect()
    }

    pub fn week_volume(&self, week: u32) -> Result<WeekVolume, ProgramError> {
        let program = self.generate_week(week)?;

        let mut total_sets = 0;
        let mut total_reps = 0;
        let mut total_load = Decimal::ZERO;

        for exercise in program.workouts.iter().flat_map(|w| &w.exercises) {
            let reps = exercise.sets * exercise.reps.lower_bound();
            total_sets += exercise.sets;
            total_reps += reps;
            total_load += Decimal::from(reps) * exercise.weight;
        }

        Ok(WeekVolume {
            week_number: week,
            total_sets,
            total_reps,
            total_load: total_load
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .normalize(),
        })
    }

    /// Check the catalog and schedule for structural problems
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();

        let mut covered: Vec<u32> = SCHEDULE.iter().flat_map(|def| def.weeks.iter().copied()).collect();
        covered.sort_unstable();
        if !covered.iter().copied().eq(schedule::weeks()) {
            errors.push(format!(
                "Schedule does not cover weeks {}-{} exactly once",
                schedule::FIRST_WEEK,
                schedule::LAST_WEEK
            ));
        }

        for day in TrainingDay::ALL {
            match self.catalog.day(day) {
                None => errors.push(format!("{}: no workout template", day)),
                Some(template) if template.exercises.is_empty() => {
                    errors.push(format!("{}: no exercises", day))
                }
                Some(template) => errors.extend(validate_day(template)),
            }
        }

        let report = ValidationReport {
            is_valid: errors.is_empty(),
            total_weeks: schedule::weeks().count() as u32,
            total_exercises: self.all_exercises().len(),
            errors,
        };

        if !report.is_valid {
            tracing::warn!(errors = report.errors.len(), "Program validation failed");
        }

        report
    }
}

fn validate_day(template: &DayTemplate) -> Vec<String> {
    let mut errors = Vec::new();

    for exercise in &template.exercises {
        if exercise.sets == 0 {
            errors.push(format!("{} / {}: zero sets", template.day, exercise.id));
        }

        if let Some(partner_id) = &exercise.superset_partner {
            match template.exercise(partner_id) {
                None => errors.push(format!(
                    "{} / {}: superset partner {} not found",
                    template.day, exercise.id, partner_id
                )),
                Some(partner) if partner.superset_partner.as_deref() != Some(exercise.id.as_str()) => {
                    errors.push(format!(
                        "{} / {}: superset partner {} does not point back",
                        template.day, exercise.id, partner_id
                    ))
                }
                Some(_) => {}
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn generator() -> ProgramGenerator {
        ProgramGenerator::default()
    }

    #[test]
    fn test_generation_is_idempotent() {
        let generator = generator();
        for week in [1, 6, 13, 25, 26] {
            assert_eq!(
                generator.generate_week(week).unwrap(),
                generator.generate_week(week).unwrap()
            );
        }
    }

    #[test]
    fn test_week_out_of_range() {
        let generator = generator();
        assert!(matches!(
            generator.generate_week(0),
            Err(ProgramError::WeekOutOfRange { week: 0, .. })
        ));
        assert!(generator.generate_week(27).is_err());
        assert!(generator.generate_day(40, TrainingDay::Sunday).is_err());
    }

    #[test]
    fn test_unknown_day_key() {
        let generator = generator();
        let err = generator.generate_day_by_key(3, "saturday").unwrap_err();
        assert_eq!(
            err,
            ProgramError::UnknownDay {
                day: "saturday".to_string()
            }
        );
    }

    #[test]
    fn test_missing_day_template() {
        let catalog = ProgramCatalog::new(vec![]);
        let generator = ProgramGenerator::new(catalog);
        let err = generator.generate_day(1, TrainingDay::Friday).unwrap_err();
        assert_eq!(
            err,
            ProgramError::UnknownDay {
                day: "friday".to_string()
            }
        );
    }

    #[test]
    fn test_deload_week_heavy_day() {
        let workout = generator().generate_day(6, TrainingDay::Sunday).unwrap();
        assert!(workout.is_deload);

        let deadlift = workout.exercise("w6_sun_1").unwrap();
        // 75 + 1 * 5 = 80, 60% = 48
        assert_eq!(deadlift.weight, dec!(48));
        assert_eq!(deadlift.tempo.as_str(), "4-1-2");

        let goblet = workout.exercise("w6_sun_2").unwrap();
        // 25 + 2 * 2.5 = 30, 60% = 18
        assert_eq!(goblet.weight, dec!(18));

        let press = workout.exercise("w6_sun_4b").unwrap();
        // 35 + 2 * 2.5 = 40, 60% = 24
        assert_eq!(press.weight, dec!(24));

        for exercise in &workout.exercises {
            assert_eq!(exercise.tempo, Tempo::Deload);
            assert_eq!((exercise.weight * dec!(2)).fract(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_tempo_by_week() {
        assert_eq!(tempo_for(1, false), Tempo::Foundation);
        assert_eq!(tempo_for(5, false), Tempo::Foundation);
        assert_eq!(tempo_for(6, true), Tempo::Deload);
        assert_eq!(tempo_for(7, false), Tempo::Standard);
        assert_eq!(tempo_for(25, false), Tempo::Standard);
    }

    #[test]
    fn test_technique_notes_follow_block() {
        let generator = generator();

        let week8 = generator.generate_day(8, TrainingDay::Sunday).unwrap();
        let deadlift = week8.exercise("w8_sun_1").unwrap();
        assert_eq!(deadlift.method, Some(IntensityMethod::RestPause));
        assert!(deadlift.note.starts_with("Rest-Pause"));
        assert!(week8.techniques.contains(&IntensityMethod::RestPause));

        // Deload weeks fall back to the default note
        let week12 = generator.generate_day(12, TrainingDay::Sunday).unwrap();
        let deadlift = week12.exercise("w12_sun_1").unwrap();
        assert_eq!(deadlift.method, None);
        assert_eq!(deadlift.note, "King of the lifts, strict technique required");
        assert!(week12.techniques.is_empty());
    }

    #[test]
    fn test_superset_note_prefix_and_partner() {
        let workout = generator().generate_day(2, TrainingDay::Sunday).unwrap();
        let pulldown = workout.exercise("w2_sun_4a").unwrap();

        assert_eq!(pulldown.superset_with.as_deref(), Some("w2_sun_4b"));
        assert_eq!(pulldown.superset_partner.as_deref(), Some("Landmine Press"));
        assert_eq!(pulldown.note, "Superset with Landmine Press | Grip 1.5x shoulder width");

        let press = workout.exercise("w2_sun_4b").unwrap();
        assert_eq!(press.superset_group, pulldown.superset_group);
    }

    #[test]
    fn test_partner_label_follows_rotation() {
        let generator = generator();

        let block1 = generator.generate_day(2, TrainingDay::Sunday).unwrap();
        let pushdown = block1.exercise("w2_sun_6b").unwrap();
        assert_eq!(pushdown.superset_partner.as_deref(), Some("Incline Curl"));
        assert_eq!(block1.exercise("w2_sun_6a").unwrap().name, "Incline Curl");

        let block2 = generator.generate_day(8, TrainingDay::Sunday).unwrap();
        assert_eq!(block2.exercise("w8_sun_6a").unwrap().name, "Spider Curl");
    }

    #[test]
    fn test_workout_totals() {
        let workout = generator().generate_day(1, TrainingDay::Home).unwrap();
        assert_eq!(workout.total_sets, 3);
        assert_eq!(workout.duration_minutes, 5);

        let week = generator().generate_week(1).unwrap();
        let days: Vec<TrainingDay> = week.workouts.iter().map(|w| w.day).collect();
        assert_eq!(days, TrainingDay::ALL.to_vec());
        assert_eq!(week.total_sets(), week.workouts.iter().map(|w| w.total_sets).sum::<u32>());
    }

    #[test]
    fn test_exercise_progression() {
        let points = generator().exercise_progression("Trap Bar Deadlift");
        assert_eq!(points.len(), 26);
        assert_eq!(points[0].weight, dec!(75));
        assert_eq!(points[3].weight, dec!(80));
        assert!(points[5].is_deload);
        assert_eq!(points[5].weight, dec!(48));

        // Rotated exercise appears only in its blocks
        let incline = generator().exercise_progression("Incline Curl");
        assert!(incline.iter().all(|p| matches!(p.week, 1..=6 | 13..=18)));
        assert_eq!(incline.len(), 12);
    }

    #[test]
    fn test_all_exercises_sorted_and_unique() {
        let names = generator().all_exercises();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
        assert!(names.contains(&"Incline Curl".to_string()));
        assert!(names.contains(&"Spider Curl".to_string()));
        assert!(names.contains(&"Hammer Curl".to_string()));
    }

    #[test]
    fn test_week_volume_home_only() {
        let catalog = ProgramCatalog::new(vec![ProgramCatalog::standard()
            .day(TrainingDay::Home)
            .unwrap()
            .clone()]);
        let volume = ProgramGenerator::new(catalog).week_volume(1).unwrap();

        assert_eq!(volume.total_sets, 3);
        assert_eq!(volume.total_reps, 36);
        assert_eq!(volume.total_load, dec!(432));
    }

    #[test]
    fn test_week_volume_uses_range_lower_bound() {
        let generator = generator();
        let volume = generator.week_volume(1).unwrap();
        let week = generator.generate_week(1).unwrap();

        let expected_reps: u32 = week
            .workouts
            .iter()
            .flat_map(|w| &w.exercises)
            .map(|e| e.sets * e.reps.lower_bound())
            .sum();
        assert_eq!(volume.total_reps, expected_reps);
        assert_eq!(volume.total_sets, week.total_sets());
    }

    #[test]
    fn test_validate_standard_program() {
        let report = generator().validate();
        assert!(report.is_valid, "{:?}", report.errors);
        assert_eq!(report.total_weeks, 26);
        assert_eq!(report.total_exercises, generator().all_exercises().len());
    }

    #[test]
    fn test_validate_reports_broken_catalog() {
        let mut catalog = ProgramCatalog::standard();
        catalog.days.retain(|d| d.day != TrainingDay::Home);
        catalog.days[0].exercises[0].superset_partner = Some("missing".to_string());

        let report = ProgramGenerator::new(catalog).validate();
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("Home")));
        assert!(report.errors.iter().any(|e| e.contains("missing")));
    }
}
