//! JSON export of generated programs

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::generator::ProgramGenerator;
use crate::models::WeekProgram;

/// Exported program document
#[derive(Debug, Serialize)]
pub struct ProgramExport {
    pub generated_at: DateTime<Utc>,
    pub weeks: Vec<WeekProgram>,
}

impl ProgramExport {
    /// Generate `weeks` in order; fails on the first week out of range
    pub fn build(generator: &ProgramGenerator, weeks: impl IntoIterator<Item = u32>) -> Result<Self> {
        let weeks = weeks
            .into_iter()
            .map(|week| generator.generate_week(week))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            generated_at: Utc::now(),
            weeks,
        })
    }
}

/// Export any serializable data structure to pretty JSON
pub fn export_json<T, P>(data: &T, output_path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let json_data = serde_json::to_string_pretty(data)?;

    if let Some(parent) = output_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&output_path, json_data)?;

    tracing::info!(path = %output_path.as_ref().display(), "Exported JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LiftRsError, ProgramError};
    use crate::schedule;
    use tempfile::tempdir;

    #[test]
    fn test_export_full_program() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("program.json");

        let export = ProgramExport::build(&ProgramGenerator::default(), schedule::weeks()).unwrap();
        assert_eq!(export.weeks.len(), 26);
        export_json(&export, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["weeks"][5]["week_number"], 6);
        assert_eq!(value["weeks"][5]["is_deload"], true);
        assert_eq!(value["weeks"][0]["workouts"][0]["exercises"][0]["id"], "w1_sun_1");
        assert_eq!(value["weeks"][0]["workouts"][0]["exercises"][0]["reps"]["min"], 6);
    }

    #[test]
    fn test_export_rejects_bad_week() {
        let result = ProgramExport::build(&ProgramGenerator::default(), [1, 2, 40]);
        assert!(matches!(
            result,
            Err(LiftRsError::Program(ProgramError::WeekOutOfRange { week: 40, .. }))
        ));
    }
}
