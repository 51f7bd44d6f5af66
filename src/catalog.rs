//! Authored exercise templates
//!
//! Three gym days plus a short home session. Templates are immutable data:
//! the generator reads them, it never writes them back.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{Category, IntensityMethod, RepTarget, TrainingDay};
use crate::superset::Groupable;

/// Lookup key for technique-specific notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteKey {
    pub block_index: u8,
    pub is_deload: bool,
}

/// Coaching note used in place of the default note for one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueNote {
    pub key: NoteKey,
    pub method: IntensityMethod,
    pub note: String,
}

/// Alternate exercise for some blocks (exercise rotation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameVariant {
    pub blocks: Vec<u8>,
    pub name: String,
    pub default_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTemplate {
    /// Day-unique identifier, e.g. `sun_4a`
    pub id: String,
    pub name: String,
    pub category: Category,
    pub muscles: Vec<String>,
    pub sets: u32,
    pub reps: RepTarget,
    pub base_weight: Decimal,
    /// Load added at each progression step
    pub increment: Decimal,
    /// Weeks per progression step
    pub frequency_weeks: u32,
    pub rest_seconds: u32,
    /// Template id of the superset partner on the same day
    pub superset_partner: Option<String>,
    /// Label shared by both members of the pair
    pub superset_group: Option<String>,
    pub default_note: String,
    pub technique_notes: Vec<TechniqueNote>,
    pub variants: Vec<NameVariant>,
}

impl ExerciseTemplate {
    pub fn new(id: &str, name: &str, category: Category) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            muscles: Vec::new(),
            sets: 3,
            reps: RepTarget::Fixed(10),
            base_weight: Decimal::ZERO,
            increment: Decimal::ZERO,
            frequency_weeks: 1,
            rest_seconds: 90,
            superset_partner: None,
            superset_group: None,
            default_note: String::new(),
            technique_notes: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn muscles(mut self, muscles: &[&str]) -> Self {
        self.muscles = muscles.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn volume(mut self, sets: u32, reps: impl Into<RepTarget>) -> Self {
        self.sets = sets;
        self.reps = reps.into();
        self
    }

    /// Base weight, plus `increment` every `frequency_weeks` weeks
    pub fn load(mut self, base_weight: Decimal, increment: Decimal, frequency_weeks: u32) -> Self {
        self.base_weight = base_weight;
        self.increment = increment;
        self.frequency_weeks = frequency_weeks;
        self
    }

    pub fn rest(mut self, seconds: u32) -> Self {
        self.rest_seconds = seconds;
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.default_note = note.to_string();
        self
    }

    pub fn superset_with(mut self, partner_id: &str) -> Self {
        let group = self.id.as_str().min(partner_id).to_string();
        self.superset_partner = Some(partner_id.to_string());
        self.superset_group = Some(group);
        self
    }

    /// Note for the loading weeks of `block_index`
    pub fn technique(mut self, block_index: u8, method: IntensityMethod, note: &str) -> Self {
        self.technique_notes.push(TechniqueNote {
            key: NoteKey {
                block_index,
                is_deload: false,
            },
            method,
            note: note.to_string(),
        });
        self
    }

    pub fn variant(mut self, blocks: &[u8], name: &str, default_note: &str) -> Self {
        self.variants.push(NameVariant {
            blocks: blocks.to_vec(),
            name: name.to_string(),
            default_note: default_note.to_string(),
        });
        self
    }

    pub fn technique_note(&self, block_index: u8, is_deload: bool) -> Option<&TechniqueNote> {
        let key = NoteKey {
            block_index,
            is_deload,
        };
        self.technique_notes.iter().find(|n| n.key == key)
    }

    fn variant_for(&self, block_index: u8) -> Option<&NameVariant> {
        self.variants.iter().find(|v| v.blocks.contains(&block_index))
    }

    /// Exercise name in `block_index`, after rotation
    pub fn name_for_block(&self, block_index: u8) -> &str {
        self.variant_for(block_index)
            .map(|v| v.name.as_str())
            .unwrap_or(&self.name)
    }

    pub fn default_note_for_block(&self, block_index: u8) -> &str {
        self.variant_for(block_index)
            .map(|v| v.default_note.as_str())
            .unwrap_or(&self.default_note)
    }
}

impl Groupable for ExerciseTemplate {
    fn superset_tag(&self) -> Option<&str> {
        self.superset_group.as_deref()
    }

    fn category(&self) -> Category {
        self.category
    }

    fn rest_seconds(&self) -> u32 {
        self.rest_seconds
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTemplate {
    pub day: TrainingDay,
    pub title: String,
    pub duration_minutes: u32,
    /// When the session happens, if not on the day itself
    pub schedule_note: Option<String>,
    pub exercises: Vec<ExerciseTemplate>,
}

impl DayTemplate {
    pub fn exercise(&self, id: &str) -> Option<&ExerciseTemplate> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

/// Ordered set of day templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramCatalog {
    pub days: Vec<DayTemplate>,
}

impl Default for ProgramCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProgramCatalog {
    pub fn new(days: Vec<DayTemplate>) -> Self {
        Self { days }
    }

    pub fn day(&self, day: TrainingDay) -> Option<&DayTemplate> {
        self.days.iter().find(|d| d.day == day)
    }

    /// The 26-week hypertrophy program: Sunday, Tuesday, Friday and home curls
    pub fn standard() -> Self {
        Self::new(vec![sunday(), tuesday(), friday(), home()])
    }
}

fn sunday() -> DayTemplate {
    use Category::*;
    use IntensityMethod::*;

    DayTemplate {
        day: TrainingDay::Sunday,
        title: "Back + Heavy Legs + Arms".to_string(),
        duration_minutes: 68,
        schedule_note: None,
        exercises: vec![
            ExerciseTemplate::new("sun_1", "Trap Bar Deadlift", Compound)
                .muscles(&["back", "legs", "glutes"])
                .volume(5, RepTarget::Range { min: 6, max: 8 })
                .load(dec!(75), dec!(5), 3)
                .rest(120)
                .note("King of the lifts, strict technique required")
                .technique(2, RestPause, "Rest-Pause on set 5: 6-8 reps, 20s, 2-3 reps")
                .technique(4, Cluster, "Clusters on set 5: 3 reps, 20s, 2 reps, 20s, 2 reps"),
            ExerciseTemplate::new("sun_2", "Goblet Squat", Compound)
                .muscles(&["quadriceps", "glutes"])
                .volume(4, 10)
                .load(dec!(25), dec!(2.5), 2)
                .rest(75)
                .note("Dumbbell held at the chest, controlled descent")
                .technique(3, DropSet, "Drop-set on set 4: 10 reps, -25%, 8-10 reps")
                .technique(4, Partials, "Set 4: 10 full reps, then 5 half reps in the top range"),
            ExerciseTemplate::new("sun_3", "Leg Press", Compound)
                .muscles(&["quadriceps", "glutes"])
                .volume(4, 10)
                .load(dec!(110), dec!(10), 2)
                .rest(75)
                .note("Feet shoulder-width apart, full range of motion")
                .technique(3, DropSet, "Drop-set on set 4: 10 reps, -25%, 10-12 reps")
                .technique(
                    4,
                    Cluster,
                    "Clusters on set 4: 4 reps, 20s, 3 reps, 20s, 3 reps, then 10 full reps and 8 quarter reps",
                ),
            ExerciseTemplate::new("sun_4a", "Lat Pulldown (wide grip)", Compound)
                .muscles(&["back"])
                .volume(4, 10)
                .load(dec!(60), dec!(2.5), 2)
                .rest(90)
                .superset_with("sun_4b")
                .note("Grip 1.5x shoulder width")
                .technique(3, DropSet, "Drop-set on set 4: 10 reps, -20%, 8-10 reps"),
            ExerciseTemplate::new("sun_4b", "Landmine Press", Compound)
                .muscles(&["chest", "shoulders"])
                .volume(4, 10)
                .load(dec!(35), dec!(2.5), 2)
                .rest(90)
                .superset_with("sun_4a")
                .note("Bar wedged in a corner or a landmine"),
            ExerciseTemplate::new("sun_5", "Rowing Machine (wide grip)", Compound)
                .muscles(&["back"])
                .volume(4, 10)
                .load(dec!(50), dec!(2.5), 2)
                .rest(75)
                .note("Hands wide, elbows out, pull to the lower chest")
                .technique(3, MyoReps, "Myo-reps on set 4: 10 reps, 5s, 4 mini-sets of 4 reps")
                .technique(4, MyoReps, "Myo-reps on set 4: 10 reps, 5s, 4 mini-sets of 4 reps"),
            ExerciseTemplate::new("sun_6a", "Spider Curl", Isolation)
                .muscles(&["biceps"])
                .volume(4, 12)
                .load(dec!(12), dec!(2.5), 3)
                .rest(75)
                .superset_with("sun_6b")
                .note("Spider curl on a preacher bench")
                .variant(&[1, 3], "Incline Curl", "Incline bench at 45 degrees")
                .technique(1, PauseReps, "2s pause with arms extended (full stretch)")
                .technique(3, MyoReps, "Myo-reps on set 4: 12 reps, 5s, 4 mini-sets of 4 reps")
                .technique(4, MyoReps, "Myo-reps on set 4: 12 reps, 5s, 4 mini-sets of 4 reps"),
            ExerciseTemplate::new("sun_6b", "Cable Pushdown", Isolation)
                .muscles(&["triceps"])
                .volume(3, 12)
                .load(dec!(20), dec!(2.5), 3)
                .rest(75)
                .superset_with("sun_6a")
                .note("Elbows pinned to your sides")
                .technique(4, MyoReps, "Myo-reps on set 3: 12 reps, 5s, 4 mini-sets of 4 reps"),
        ],
    }
}

fn tuesday() -> DayTemplate {
    use Category::*;
    use IntensityMethod::*;

    DayTemplate {
        day: TrainingDay::Tuesday,
        title: "Chest + Shoulders + Triceps".to_string(),
        duration_minutes: 70,
        schedule_note: None,
        exercises: vec![
            ExerciseTemplate::new("tue_1", "Dumbbell Press", Compound)
                .muscles(&["chest", "shoulders", "triceps"])
                .volume(5, 10)
                .load(dec!(22), dec!(2.5), 3)
                .rest(105)
                .note("Flat bench, dumbbells in natural rotation")
                .technique(2, RestPause, "Rest-Pause on set 5: 10 reps, 20s, 3-4 reps")
                .technique(3, DropSet, "Drop-set on set 5: 10 reps, -25%, 8-10 reps")
                .technique(4, Cluster, "Clusters on set 5: 4 reps, 15s, 3 reps, 15s, 3 reps"),
            ExerciseTemplate::new("tue_2", "Cable Fly (mid pulleys)", Isolation)
                .muscles(&["chest"])
                .volume(4, 12)
                .load(dec!(10), dec!(2.5), 3)
                .rest(60)
                .note("Pulleys at shoulder height, arms slightly bent")
                .technique(1, PauseReps, "2s pause with arms open (full chest stretch)")
                .technique(
                    3,
                    DropSet,
                    "Drop-set on set 4: 12 reps, -25%, 10-12 reps, then myo-reps: 12 reps, 5s, 5 mini-sets of 5 reps",
                )
                .technique(4, MyoReps, "Myo-reps on set 4: 12 reps, 5s, 5 mini-sets of 5 reps"),
            ExerciseTemplate::new("tue_3", "Light Leg Press", Compound)
                .muscles(&["quadriceps", "glutes"])
                .volume(3, 15)
                .load(dec!(80), dec!(10), 3)
                .rest(60)
                .note("Light leg activation, no excess fatigue"),
            ExerciseTemplate::new("tue_4a", "Rope Triceps Extension", Isolation)
                .muscles(&["triceps"])
                .volume(5, 12)
                .load(dec!(20), dec!(2.5), 3)
                .rest(75)
                .superset_with("tue_4b")
                .note("Rope on the high pulley, elbows fixed")
                .technique(3, DropSet, "Drop-set on set 5: 12 reps, -20%, 10-12 reps")
                .technique(4, MyoReps, "Myo-reps on set 5: 12 reps, 5s, 4 mini-sets of 4 reps"),
            ExerciseTemplate::new("tue_4b", "Lateral Raises", Isolation)
                .muscles(&["shoulders"])
                .volume(5, 15)
                .load(dec!(8), dec!(2.5), 4)
                .rest(75)
                .superset_with("tue_4a")
                .note("Elbows slightly bent, raise to horizontal")
                .technique(1, PauseReps, "1s pause with arms horizontal")
                .technique(3, DropSet, "Drop-set on set 5: 15 reps, -25%, 12-15 reps")
                .technique(4, MyoReps, "Myo-reps on set 5: 15 reps, 5s, 5 mini-sets of 5 reps"),
            ExerciseTemplate::new("tue_5", "Face Pull", Isolation)
                .muscles(&["shoulders", "back"])
                .volume(5, 15)
                .load(dec!(20), dec!(2.5), 3)
                .rest(60)
                .note("Rope on the high pulley, pull to the face, rotate out")
                .technique(1, PauseReps, "1s squeeze at the back")
                .technique(3, MyoReps, "Myo-reps on set 5: 15 reps, 5s, 5 mini-sets of 5 reps")
                .technique(4, MyoReps, "Myo-reps on set 5: 15 reps, 5s, 5 mini-sets of 5 reps"),
            ExerciseTemplate::new("tue_6", "Rowing Machine (close grip)", Compound)
                .muscles(&["back"])
                .volume(4, 12)
                .load(dec!(50), dec!(2.5), 2)
                .rest(75)
                .note("Hands shoulder-width, elbows close, pull to the navel"),
            ExerciseTemplate::new("tue_7", "Seated Overhead Extension (rope)", Isolation)
                .muscles(&["triceps"])
                .volume(4, 12)
                .load(dec!(15), dec!(2.5), 3)
                .rest(60)
                .note("Rope on the high pulley, seated, full triceps stretch")
                .technique(3, MyoReps, "Myo-reps on set 4: 12 reps, 5s, 4 mini-sets of 4 reps")
                .technique(4, MyoReps, "Myo-reps on set 4: 12 reps, 5s, 4 mini-sets of 4 reps"),
        ],
    }
}

fn friday() -> DayTemplate {
    use Category::*;
    use IntensityMethod::*;

    DayTemplate {
        day: TrainingDay::Friday,
        title: "Back + Light Legs + Arms + Shoulders".to_string(),
        duration_minutes: 73,
        schedule_note: None,
        exercises: vec![
            ExerciseTemplate::new("fri_1", "Landmine Row", Compound)
                .muscles(&["back"])
                .volume(5, 10)
                .load(dec!(55), dec!(2.5), 2)
                .rest(105)
                .note("Bar wedged, one hand, pull toward the hip")
                .technique(2, RestPause, "Rest-Pause on set 5: 10 reps, 20s, 3-4 reps")
                .technique(3, DropSet, "Drop-set on set 5: 10 reps, -20%, 8-10 reps")
                .technique(4, Cluster, "Clusters on set 5: 4 reps, 15s, 3 reps, 15s, 3 reps"),
            ExerciseTemplate::new("fri_2a", "Leg Curl", Isolation)
                .muscles(&["hamstrings"])
                .volume(5, 12)
                .load(dec!(40), dec!(5), 3)
                .rest(75)
                .superset_with("fri_2b")
                .note("Lying or seated depending on the machine")
                .technique(3, DropSet, "Drop-set on set 5: 12 reps, -25%, 10-12 reps")
                .technique(4, Partials, "Set 5: 12 full reps, then 6-8 partials in the top range"),
            ExerciseTemplate::new("fri_2b", "Leg Extension", Isolation)
                .muscles(&["quadriceps"])
                .volume(4, 15)
                .load(dec!(35), dec!(5), 3)
                .rest(75)
                .superset_with("fri_2a")
                .note("Full extension, 1s squeeze at the top")
                .technique(3, DropSet, "Drop-set on set 4: 15 reps, -25%, 12-15 reps")
                .technique(4, Partials, "Set 4: 15 full reps, then 10 partials over the last 30 degrees"),
            ExerciseTemplate::new("fri_3a", "Cable Fly", Isolation)
                .muscles(&["chest"])
                .volume(4, 15)
                .load(dec!(10), dec!(2.5), 3)
                .rest(60)
                .superset_with("fri_3b")
                .note("Mid pulleys, maximal stretch")
                .technique(3, MyoReps, "Myo-reps on set 4: 15 reps, 5s, 5 mini-sets of 5 reps")
                .technique(4, MyoReps, "Myo-reps on set 4: 15 reps, 5s, 5 mini-sets of 5 reps"),
            ExerciseTemplate::new("fri_3b", "Dumbbell Fly", Isolation)
                .muscles(&["chest"])
                .volume(4, 12)
                .load(dec!(10), dec!(2.5), 3)
                .rest(60)
                .superset_with("fri_3a")
                .note("Flat bench, full range of motion")
                .technique(1, PauseReps, "2s pause with arms open (chest stretch)")
                .technique(3, DropSet, "Drop-set on set 4: 12 reps, -25%, 10-12 reps")
                .technique(4, MyoReps, "Myo-reps on set 4: 12 reps, 5s, 4 mini-sets of 4 reps"),
            ExerciseTemplate::new("fri_4a", "EZ Bar Curl", Isolation)
                .muscles(&["biceps"])
                .volume(5, 12)
                .load(dec!(25), dec!(2.5), 3)
                .rest(75)
                .superset_with("fri_4b")
                .note("EZ bar, elbows fixed")
                .technique(1, PauseReps, "2s pause with arms extended (biceps stretch)")
                .technique(3, MyoReps, "Myo-reps on set 5: 12 reps, 5s, 4 mini-sets of 4 reps")
                .technique(4, MyoReps, "Myo-reps on set 5: 12 reps, 5s, 4 mini-sets of 4 reps"),
            ExerciseTemplate::new("fri_4b", "Overhead Extension", Isolation)
                .muscles(&["triceps"])
                .volume(3, 12)
                .load(dec!(15), dec!(2.5), 3)
                .rest(75)
                .superset_with("fri_4a")
                .note("Rope on the high pulley, seated, maximal stretch")
                .technique(4, MyoReps, "Myo-reps on set 3: 12 reps, 5s, 4 mini-sets of 4 reps"),
            ExerciseTemplate::new("fri_5", "Lateral Raises", Isolation)
                .muscles(&["shoulders"])
                .volume(3, 15)
                .load(dec!(8), dec!(2.5), 4)
                .rest(60)
                .note("Elbows slightly bent, raise to horizontal")
                .technique(4, MyoReps, "Myo-reps on set 3: 15 reps, 5s, 5 mini-sets of 5 reps"),
            ExerciseTemplate::new("fri_6", "Wrist Curl", Isolation)
                .muscles(&["forearms"])
                .volume(3, 20)
                .load(dec!(30), dec!(2.5), 4)
                .rest(45)
                .note("Seated, forearms on the thighs, flex the wrists"),
        ],
    }
}

fn home() -> DayTemplate {
    DayTemplate {
        day: TrainingDay::Home,
        title: "Home Hammer Curls".to_string(),
        duration_minutes: 5,
        schedule_note: Some("Tuesday and Thursday evenings".to_string()),
        exercises: vec![ExerciseTemplate::new("home_1", "Hammer Curl", Category::Isolation)
            .muscles(&["biceps", "forearms"])
            .volume(3, 12)
            .load(dec!(12), dec!(2.5), 3)
            .rest(60)
            .note("At home on Tuesday and Thursday evenings, neutral grip")],
    }
}
