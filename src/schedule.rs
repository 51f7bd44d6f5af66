//! Block periodization schedule
//!
//! The 26-week program is split into five blocks. Blocks 1-4 run five
//! loading weeks followed by one deload week; block 5 is a single peak week
//! and a final deload. Each block focuses on one overload technique and a
//! target RPE band.
//!
//! | Weeks | Block | Technique                       | RPE | Deload |
//! |-------|-------|---------------------------------|-----|--------|
//! | 1-5   | 1     | Tempo 3-1-2                     | 6-7 | no     |
//! | 6     | 1     | Deload                          | 5-6 | yes    |
//! | 7-11  | 2     | Rest-Pause                      | 7-8 | no     |
//! | 12    | 2     | Deload                          | 5-6 | yes    |
//! | 13-17 | 3     | Drop-sets + Myo-reps            | 8   | no     |
//! | 18    | 3     | Deload                          | 5-6 | yes    |
//! | 19-23 | 4     | Clusters + Myo-reps + Partials  | 8-9 | no     |
//! | 24    | 4     | Deload                          | 5-6 | yes    |
//! | 25    | 5     | Peak Week                       | 8-9 | no     |
//! | 26    | 5     | Deload Final                    | 5-6 | yes    |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProgramError;

pub const FIRST_WEEK: u32 = 1;
pub const LAST_WEEK: u32 = 26;

/// Overload technique of a schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technique {
    Tempo,
    Deload,
    RestPause,
    DropSetsMyoReps,
    ClustersMyoRepsPartials,
    PeakWeek,
    DeloadFinal,
}

impl Technique {
    pub fn name(&self) -> &'static str {
        match self {
            Technique::Tempo => "Tempo 3-1-2",
            Technique::Deload => "Deload",
            Technique::RestPause => "Rest-Pause",
            Technique::DropSetsMyoReps => "Drop-sets + Myo-reps",
            Technique::ClustersMyoRepsPartials => "Clusters + Myo-reps + Partials",
            Technique::PeakWeek => "Peak Week",
            Technique::DeloadFinal => "Deload Final",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target RPE band, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpeBand {
    pub low: u8,
    pub high: u8,
}

impl RpeBand {
    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }
}

impl fmt::Display for RpeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// One row of the fixed schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockDefinition {
    pub block_index: u8,
    pub technique: Technique,
    pub rpe_band: RpeBand,
    pub weeks: &'static [u32],
    pub is_deload: bool,
}

const DELOAD_RPE: RpeBand = RpeBand::new(5, 6);

/// The full schedule; week lists partition 1..=26
pub const SCHEDULE: [BlockDefinition; 10] = [
    BlockDefinition {
        block_index: 1,
        technique: Technique::Tempo,
        rpe_band: RpeBand::new(6, 7),
        weeks: &[1, 2, 3, 4, 5],
        is_deload: false,
    },
    BlockDefinition {
        block_index: 1,
        technique: Technique::Deload,
        rpe_band: DELOAD_RPE,
        weeks: &[6],
        is_deload: true,
    },
    BlockDefinition {
        block_index: 2,
        technique: Technique::RestPause,
        rpe_band: RpeBand::new(7, 8),
        weeks: &[7, 8, 9, 10, 11],
        is_deload: false,
    },
    BlockDefinition {
        block_index: 2,
        technique: Technique::Deload,
        rpe_band: DELOAD_RPE,
        weeks: &[12],
        is_deload: true,
    },
    BlockDefinition {
        block_index: 3,
        technique: Technique::DropSetsMyoReps,
        rpe_band: RpeBand::new(8, 8),
        weeks: &[13, 14, 15, 16, 17],
        is_deload: false,
    },
    BlockDefinition {
        block_index: 3,
        technique: Technique::Deload,
        rpe_band: DELOAD_RPE,
        weeks: &[18],
        is_deload: true,
    },
    BlockDefinition {
        block_index: 4,
        technique: Technique::ClustersMyoRepsPartials,
        rpe_band: RpeBand::new(8, 9),
        weeks: &[19, 20, 21, 22, 23],
        is_deload: false,
    },
    BlockDefinition {
        block_index: 4,
        technique: Technique::Deload,
        rpe_band: DELOAD_RPE,
        weeks: &[24],
        is_deload: true,
    },
    BlockDefinition {
        block_index: 5,
        technique: Technique::PeakWeek,
        rpe_band: RpeBand::new(8, 9),
        weeks: &[25],
        is_deload: false,
    },
    BlockDefinition {
        block_index: 5,
        technique: Technique::DeloadFinal,
        rpe_band: DELOAD_RPE,
        weeks: &[26],
        is_deload: true,
    },
];

/// Block, technique and intensity for a single week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekClassification {
    pub week: u32,
    pub block_index: u8,
    pub technique: Technique,
    pub rpe_band: RpeBand,
    pub is_deload: bool,
}

/// Reject weeks outside the program horizon
pub fn ensure_week(week: u32) -> Result<u32, ProgramError> {
    if (FIRST_WEEK..=LAST_WEEK).contains(&week) {
        Ok(week)
    } else {
        Err(ProgramError::WeekOutOfRange {
            week,
            min: FIRST_WEEK,
            max: LAST_WEEK,
        })
    }
}

/// Classify a week of the program
pub fn classify_week(week: u32) -> Result<WeekClassification, ProgramError> {
    let week = ensure_week(week)?;

    let definition = SCHEDULE
        .iter()
        .find(|def| def.weeks.contains(&week))
        .ok_or(ProgramError::WeekOutOfRange {
            week,
            min: FIRST_WEEK,
            max: LAST_WEEK,
        })?;

    Ok(WeekClassification {
        week,
        block_index: definition.block_index,
        technique: definition.technique,
        rpe_band: definition.rpe_band,
        is_deload: definition.is_deload,
    })
}

/// Whether `week` is a scheduled deload week (false outside the horizon)
pub fn is_deload_week(week: u32) -> bool {
    classify_week(week).map(|c| c.is_deload).unwrap_or(false)
}

/// Weeks of the program, first to last
pub fn weeks() -> impl Iterator<Item = u32> {
    FIRST_WEEK..=LAST_WEEK
}

/// Training focus of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockFocus {
    pub name: &'static str,
    pub description: &'static str,
}

/// Focus name and description of a block, if the index exists
pub fn block_focus(block_index: u8) -> Option<BlockFocus> {
    let focus = match block_index {
        1 => BlockFocus {
            name: "Technical Foundations",
            description: "3s lowering, 1s pause, 2s lifting; paused stretch reps on flyes, curls and raises",
        },
        2 => BlockFocus {
            name: "Progressive Overload",
            description: "Last set of the main lifts: full reps, 20s rest, 2-4 more reps",
        },
        3 => BlockFocus {
            name: "Metabolic Overreach",
            description: "Drop-sets (-20 to -25%) on the last set; myo-reps on isolation work",
        },
        4 => BlockFocus {
            name: "Maximal Intensification",
            description: "Clusters on heavy lifts, myo-reps on all isolation work, partials to finish leg sets",
        },
        5 => BlockFocus {
            name: "Peak Week",
            description: "Strength test week at maximal loads, then a final deload",
        },
        _ => return None,
    };
    Some(focus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_deload_weeks() {
        let deloads = [6, 12, 18, 24, 26];
        for week in weeks() {
            let classification = classify_week(week).unwrap();
            assert_eq!(
                classification.is_deload,
                deloads.contains(&week),
                "week {}",
                week
            );
        }
    }

    #[test]
    fn test_schedule_partitions_program() {
        let mut seen = BTreeSet::new();
        for def in SCHEDULE.iter() {
            for week in def.weeks {
                assert!(seen.insert(*week), "week {} appears twice", week);
            }
        }
        let expected: BTreeSet<u32> = weeks().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_block_techniques() {
        let week3 = classify_week(3).unwrap();
        assert_eq!(week3.block_index, 1);
        assert_eq!(week3.technique.name(), "Tempo 3-1-2");
        assert_eq!(week3.rpe_band.to_string(), "6-7");

        let week12 = classify_week(12).unwrap();
        assert_eq!(week12.block_index, 2);
        assert_eq!(week12.technique, Technique::Deload);
        assert_eq!(week12.rpe_band.to_string(), "5-6");

        let week15 = classify_week(15).unwrap();
        assert_eq!(week15.technique.to_string(), "Drop-sets + Myo-reps");
        assert_eq!(week15.rpe_band.to_string(), "8");

        let week20 = classify_week(20).unwrap();
        assert_eq!(week20.block_index, 4);
        assert_eq!(week20.technique, Technique::ClustersMyoRepsPartials);

        let week25 = classify_week(25).unwrap();
        assert_eq!(week25.block_index, 5);
        assert_eq!(week25.technique, Technique::PeakWeek);
        assert!(!week25.is_deload);

        let week26 = classify_week(26).unwrap();
        assert_eq!(week26.technique.name(), "Deload Final");
        assert!(week26.is_deload);
    }

    #[test]
    fn test_out_of_range_weeks() {
        assert_eq!(
            classify_week(0).unwrap_err(),
            ProgramError::WeekOutOfRange {
                week: 0,
                min: 1,
                max: 26
            }
        );
        assert!(classify_week(27).is_err());
        assert!(!is_deload_week(30));
    }

    #[test]
    fn test_block_focus() {
        assert_eq!(block_focus(1).unwrap().name, "Technical Foundations");
        assert_eq!(block_focus(5).unwrap().name, "Peak Week");
        assert!(block_focus(6).is_none());
    }
}
