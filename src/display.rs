//! Terminal rendering of programs and the rest clock

use colored::*;
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};

use crate::config::WeightUnit;
use crate::generator::{ProgressionPoint, WeekVolume};
use crate::models::{GeneratedWorkout, WeekProgram};
use crate::schedule::{self, block_focus, SCHEDULE};
use crate::superset::{group, ExerciseGroup, Groupable};

/// Seconds as `MM:SS`
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn format_weight(weight: Decimal, unit: WeightUnit) -> String {
    if weight.is_zero() {
        "bodyweight".to_string()
    } else {
        format!("{} {}", unit.from_kg(weight).normalize(), unit)
    }
}

fn block_letter(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    if index < 26 {
        letter.to_string()
    } else {
        format!("{}{}", letter, index / 26)
    }
}

/// Position labels: solo blocks get a letter, superset members a letter and
/// a number (A, B1, B2, C, ...)
pub fn position_labels<T: Groupable>(groups: &[ExerciseGroup<'_, T>]) -> Vec<String> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(index, group)| {
            let letter = block_letter(index);
            let superset = group.is_superset();
            (1..=group.len()).map(move |member| {
                if superset {
                    format!("{}{}", letter, member)
                } else {
                    letter.clone()
                }
            })
        })
        .collect()
}

#[derive(Tabled)]
struct ExerciseRow {
    #[tabled(rename = "#")]
    position: String,
    #[tabled(rename = "Exercise")]
    name: String,
    #[tabled(rename = "Sets x Reps")]
    volume: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Rest")]
    rest: String,
    #[tabled(rename = "Tempo")]
    tempo: String,
    #[tabled(rename = "Note")]
    note: String,
}

/// One workout as a heading plus an exercise table
pub fn render_workout(workout: &GeneratedWorkout, unit: WeightUnit) -> String {
    let groups = group(&workout.exercises);
    let labels = position_labels(&groups);

    let rows: Vec<ExerciseRow> = groups
        .iter()
        .flat_map(|g| g.items.iter())
        .zip(labels)
        .map(|(exercise, position)| ExerciseRow {
            position,
            name: exercise.name.clone(),
            volume: format!("{} x {}", exercise.sets, exercise.reps),
            weight: format_weight(exercise.weight, unit),
            rest: format_clock(exercise.rest_seconds),
            tempo: exercise.tempo.to_string(),
            note: exercise.note.clone(),
        })
        .collect();

    let mut heading = format!(
        "{} - {} ({} sets, ~{} min)",
        workout.day.to_string().bold(),
        workout.title,
        workout.total_sets,
        workout.duration_minutes
    );
    if workout.is_deload {
        heading.push_str(&format!(" {}", "DELOAD".yellow().bold()));
    }
    if let Some(note) = &workout.schedule_note {
        heading.push_str(&format!("\n  {}", note.dimmed()));
    }
    if !workout.techniques.is_empty() {
        let techniques: Vec<String> = workout.techniques.iter().map(|t| t.to_string()).collect();
        heading.push_str(&format!("\n  Techniques: {}", techniques.join(", ").cyan()));
    }

    format!("{}\n{}", heading, Table::new(rows).with(Style::rounded()))
}

/// A whole week: block header, then every workout
pub fn render_week(program: &WeekProgram, unit: WeightUnit) -> String {
    let mut out = format!(
        "{} {} | Block {} | {} | RPE {}",
        "Week".bold(),
        program.week_number.to_string().bold(),
        program.block_index,
        program.technique.to_string().green(),
        program.rpe_band
    );

    if let Some(focus) = block_focus(program.block_index) {
        out.push_str(&format!("\n{}: {}", focus.name.bold(), focus.description));
    }

    for workout in &program.workouts {
        out.push_str("\n\n");
        out.push_str(&render_workout(workout, unit));
    }

    out
}

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Weeks")]
    weeks: String,
    #[tabled(rename = "Block")]
    block: u8,
    #[tabled(rename = "Technique")]
    technique: String,
    #[tabled(rename = "RPE")]
    rpe: String,
    #[tabled(rename = "Deload")]
    deload: String,
}

fn week_span(weeks: &[u32]) -> String {
    match (weeks.first(), weeks.last()) {
        (Some(first), Some(last)) if first != last => format!("{}-{}", first, last),
        (Some(first), _) => first.to_string(),
        _ => String::new(),
    }
}

/// The periodization table
pub fn render_schedule() -> String {
    let rows: Vec<ScheduleRow> = SCHEDULE
        .iter()
        .map(|def| ScheduleRow {
            weeks: week_span(def.weeks),
            block: def.block_index,
            technique: def.technique.to_string(),
            rpe: def.rpe_band.to_string(),
            deload: if def.is_deload { "yes" } else { "no" }.to_string(),
        })
        .collect();

    format!(
        "{} ({}-{})\n{}",
        "26-week program".bold(),
        schedule::FIRST_WEEK,
        schedule::LAST_WEEK,
        Table::new(rows).with(Style::rounded())
    )
}

#[derive(Tabled)]
struct ProgressionRow {
    #[tabled(rename = "Week")]
    week: u32,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Sets x Reps")]
    volume: String,
    #[tabled(rename = "Technique")]
    technique: String,
}

pub fn render_progression(name: &str, points: &[ProgressionPoint], unit: WeightUnit) -> String {
    let rows: Vec<ProgressionRow> = points
        .iter()
        .map(|p| ProgressionRow {
            week: p.week,
            day: p.day.to_string(),
            weight: format_weight(p.weight, unit),
            volume: format!("{} x {}", p.sets, p.reps),
            technique: p.technique.to_string(),
        })
        .collect();

    format!("{}\n{}", name.bold(), Table::new(rows).with(Style::rounded()))
}

pub fn render_volume(volume: &WeekVolume, unit: WeightUnit) -> String {
    format!(
        "{} {}\n  Sets:  {}\n  Reps:  {}\n  Load:  {} {}",
        "Week".bold(),
        volume.week_number.to_string().bold(),
        volume.total_sets,
        volume.total_reps,
        unit.total_from_kg(volume.total_load).normalize(),
        unit
    )
}
