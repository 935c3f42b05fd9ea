use std::{
    fs::{read_dir, File},
    path::PathBuf,
};

use chrono::NaiveDateTime;
use congestion_tax::{
    calculator::Calculator,
    config::TaxConfig,
    rules::TaxRules,
    types::fee::Fee,
    vehicle::{Vehicle, VehicleType},
};
use serde::Deserialize;

/// Passages of a single day together with the expected outcome.
#[derive(Deserialize)]
pub struct PassageCase {
    pub vehicle: Option<VehicleType>,
    pub passages: Vec<NaiveDateTime>,
    pub total: Fee,
    pub total_before_cap: Option<Fee>,
}

pub struct JsonTest {
    pub path: PathBuf,
    pub config: TaxConfig,
    pub cases: Vec<(String, PassageCase)>,
}

pub fn collect_json_tests() -> Result<Vec<JsonTest>, Box<dyn std::error::Error>> {
    let mut tests = Vec::new();

    for test_dir in read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))? {
        let test_dir_path = test_dir?.path();

        if !test_dir_path.is_dir() {
            continue;
        }

        let mut config = None;
        let mut cases = Vec::new();

        for json_file in read_dir(&test_dir_path)? {
            let file_path = json_file?.path();

            if file_path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let file_stem = file_path.file_stem().unwrap();
            if file_stem == "rules" {
                config = Some(serde_json::from_reader(File::open(&file_path)?)?);
            } else {
                cases.push((
                    file_stem.to_string_lossy().to_string(),
                    serde_json::from_reader(File::open(&file_path)?)?,
                ));
            }
        }

        tests.push(JsonTest {
            config: config.unwrap_or_default(),
            cases,
            path: test_dir_path,
        });
    }

    Ok(tests)
}

pub fn validate_case(rules: &TaxRules, case: &PassageCase) -> Result<(), congestion_tax::Error> {
    let vehicle = case.vehicle.map(Vehicle::new);
    let report = Calculator::new(rules).build_report(vehicle.as_ref(), &case.passages)?;

    assert_eq!(report.total, case.total, "total");
    assert_eq!(report.passage_count(), case.passages.len(), "passage_count");

    if let Some(total_before_cap) = case.total_before_cap {
        assert_eq!(report.total_before_cap, total_before_cap, "total_before_cap");
    }

    Ok(())
}
