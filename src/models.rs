use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProgramError;
use crate::schedule::{RpeBand, Technique};

/// Movement category used for display and superset pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Compound,
    Isolation,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Compound => write!(f, "compound"),
            Category::Isolation => write!(f, "isolation"),
        }
    }
}

/// Repetition target: a fixed count or an inclusive range such as "6-8"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepTarget {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

impl RepTarget {
    /// Lower bound of the target, used for volume estimates
    pub fn lower_bound(&self) -> u32 {
        match self {
            RepTarget::Fixed(reps) => *reps,
            RepTarget::Range { min, .. } => *min,
        }
    }
}

impl From<u32> for RepTarget {
    fn from(reps: u32) -> Self {
        RepTarget::Fixed(reps)
    }
}

impl fmt::Display for RepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTarget::Fixed(reps) => write!(f, "{}", reps),
            RepTarget::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

impl FromStr for RepTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("Invalid rep target: {}", s))
        };

        match s.split_once('-') {
            Some((min, max)) => {
                let (min, max) = (parse(min)?, parse(max)?);
                if min > max {
                    return Err(format!("Invalid rep range: {}", s));
                }
                Ok(RepTarget::Range { min, max })
            }
            None => Ok(RepTarget::Fixed(parse(s)?)),
        }
    }
}

/// Training days of the program, in their weekly order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingDay {
    Sunday,
    Tuesday,
    Friday,
    /// Short home session done on Tuesday and Thursday evenings
    Home,
}

impl TrainingDay {
    pub const ALL: [TrainingDay; 4] = [
        TrainingDay::Sunday,
        TrainingDay::Tuesday,
        TrainingDay::Friday,
        TrainingDay::Home,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TrainingDay::Sunday => "sunday",
            TrainingDay::Tuesday => "tuesday",
            TrainingDay::Friday => "friday",
            TrainingDay::Home => "home",
        }
    }
}

impl fmt::Display for TrainingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingDay::Sunday => write!(f, "Sunday"),
            TrainingDay::Tuesday => write!(f, "Tuesday"),
            TrainingDay::Friday => write!(f, "Friday"),
            TrainingDay::Home => write!(f, "Home"),
        }
    }
}

impl FromStr for TrainingDay {
    type Err = ProgramError;

    /// Accepts English day keys and the French keys older saves used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" | "dimanche" => Ok(TrainingDay::Sunday),
            "tuesday" | "tue" | "mardi" => Ok(TrainingDay::Tuesday),
            "friday" | "fri" | "vendredi" => Ok(TrainingDay::Friday),
            "home" | "maison" => Ok(TrainingDay::Home),
            _ => Err(ProgramError::UnknownDay { day: s.to_string() }),
        }
    }
}

/// Lifting tempo (eccentric-pause-concentric seconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tempo {
    /// 4-1-2, slow eccentrics during deload weeks
    Deload,
    /// 3-1-2, technique block
    Foundation,
    /// 2-1-2
    Standard,
}

impl Tempo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tempo::Deload => "4-1-2",
            Tempo::Foundation => "3-1-2",
            Tempo::Standard => "2-1-2",
        }
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete intensification method named by a technique note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntensityMethod {
    PauseReps,
    RestPause,
    DropSet,
    MyoReps,
    Cluster,
    Partials,
}

impl fmt::Display for IntensityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntensityMethod::PauseReps => write!(f, "Pause reps"),
            IntensityMethod::RestPause => write!(f, "Rest-Pause"),
            IntensityMethod::DropSet => write!(f, "Drop-set"),
            IntensityMethod::MyoReps => write!(f, "Myo-reps"),
            IntensityMethod::Cluster => write!(f, "Clusters"),
            IntensityMethod::Partials => write!(f, "Partials"),
        }
    }
}

/// Exercise prescription for one day of one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedExercise {
    /// Week-qualified identifier, e.g. `w6_sun_1`
    pub id: String,

    /// Identifier of the catalog template this was generated from
    pub template_id: String,

    pub name: String,

    pub category: Category,

    pub muscles: Vec<String>,

    pub sets: u32,

    pub reps: RepTarget,

    /// Working weight in the configured unit
    pub weight: Decimal,

    pub rest_seconds: u32,

    pub tempo: Tempo,

    /// Technique note, or the template's default coaching cue
    pub note: String,

    /// Method of the technique note, if one applied this week
    pub method: Option<IntensityMethod>,

    /// Week-qualified id of the superset partner
    pub superset_with: Option<String>,

    /// Display name of the superset partner
    pub superset_partner: Option<String>,

    /// Label shared by both members of a superset
    pub superset_group: Option<String>,
}

/// One training day of a generated week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedWorkout {
    pub day: TrainingDay,
    pub title: String,
    /// When the session happens, if not on the day itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_note: Option<String>,
    pub exercises: Vec<GeneratedExercise>,
    pub total_sets: u32,
    pub duration_minutes: u32,
    pub is_deload: bool,
    /// Distinct intensity methods used this day, in exercise order
    pub techniques: Vec<IntensityMethod>,
}

impl GeneratedWorkout {
    pub fn exercise(&self, id: &str) -> Option<&GeneratedExercise> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

/// Complete program for one week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekProgram {
    pub week_number: u32,
    pub block_index: u8,
    pub technique: Technique,
    pub rpe_band: RpeBand,
    pub is_deload: bool,
    /// Workouts in configured day order
    pub workouts: Vec<GeneratedWorkout>,
}

impl WeekProgram {
    pub fn workout(&self, day: TrainingDay) -> Option<&GeneratedWorkout> {
        self.workouts.iter().find(|w| w.day == day)
    }

    pub fn total_sets(&self) -> u32 {
        self.workouts.iter().map(|w| w.total_sets).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep_target_parsing() {
        assert_eq!("10".parse::<RepTarget>().unwrap(), RepTarget::Fixed(10));
        assert_eq!(
            "6-8".parse::<RepTarget>().unwrap(),
            RepTarget::Range { min: 6, max: 8 }
        );
        assert!("8-6".parse::<RepTarget>().is_err());
        assert!("six".parse::<RepTarget>().is_err());
    }

    #[test]
    fn test_rep_target_display_and_bounds() {
        let range = RepTarget::Range { min: 6, max: 8 };
        assert_eq!(range.to_string(), "6-8");
        assert_eq!(range.lower_bound(), 6);
        assert_eq!(RepTarget::Fixed(12).lower_bound(), 12);
    }

    #[test]
    fn test_training_day_parsing() {
        assert_eq!("Sunday".parse::<TrainingDay>().unwrap(), TrainingDay::Sunday);
        assert_eq!("mardi".parse::<TrainingDay>().unwrap(), TrainingDay::Tuesday);
        assert_eq!("maison".parse::<TrainingDay>().unwrap(), TrainingDay::Home);

        let err = "saturday".parse::<TrainingDay>().unwrap_err();
        assert_eq!(
            err,
            ProgramError::UnknownDay {
                day: "saturday".to_string()
            }
        );
    }

    #[test]
    fn test_tempo_strings() {
        assert_eq!(Tempo::Deload.to_string(), "4-1-2");
        assert_eq!(Tempo::Foundation.to_string(), "3-1-2");
        assert_eq!(Tempo::Standard.to_string(), "2-1-2");
    }

    #[test]
    fn test_rep_target_json_shape() {
        let fixed = serde_json::to_string(&RepTarget::Fixed(10)).unwrap();
        assert_eq!(fixed, "10");

        let range: RepTarget = serde_json::from_str(r#"{"min":6,"max":8}"#).unwrap();
        assert_eq!(range, RepTarget::Range { min: 6, max: 8 });
    }
}
