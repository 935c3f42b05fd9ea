use chrono::{NaiveDate, NaiveDateTime};
use congestion_tax::{
    calculator::Calculator,
    config::TaxConfig,
    rules::TaxRules,
    types::fee::Fee,
    vehicle::{Vehicle, VehicleType},
    Error,
};

mod common;

#[test]
fn test_json_files() {
    let mut should_panic = false;

    for json_test in common::collect_json_tests().unwrap() {
        eprintln!("\ntesting directory {:?}", json_test.path);

        let rules = TaxRules::new(&json_test.config).unwrap();

        for (name, case) in &json_test.cases {
            eprint!("  testing json case `{}`: ", name);

            let result = std::panic::catch_unwind(|| {
                common::validate_case(&rules, case).unwrap();
            });

            if result.is_err() {
                should_panic = true;
            } else {
                eprintln!("success")
            }
        }
    }

    if should_panic {
        panic!("not all json tests succeeded")
    }
}

fn passage(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2013, 6, 10)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

#[test]
fn total_never_exceeds_daily_cap() {
    let calculator = Calculator::gothenburg();
    let car = Vehicle::new(VehicleType::Car);

    // Every fifteen minutes over the whole day.
    let passages = (0..24)
        .flat_map(|hour| [0, 15, 30, 45].map(|minute| passage(hour, minute)))
        .collect::<Vec<_>>();

    for count in 0..=passages.len() {
        let tax = calculator.daily_tax(Some(&car), &passages[..count]).unwrap();
        assert!(tax <= Fee::new(60), "{count} passages cost {tax}");
    }
}

#[test]
fn schedule_from_config_file_must_cover_the_day() {
    let config: TaxConfig = serde_json::from_str(
        r#"{
            "schedule": [
                { "start_time": "06:00", "end_time": "17:59", "fee": 10 },
                { "start_time": "18:30", "end_time": "05:59", "fee": 0 }
            ]
        }"#,
    )
    .unwrap();

    assert!(matches!(
        TaxRules::new(&config),
        Err(Error::ScheduleGap { .. })
    ));
}

#[test]
fn flat_schedule_from_config_file() {
    let config: TaxConfig = serde_json::from_str(
        r#"{
            "schedule": [{ "start_time": "00:00", "end_time": "23:59", "fee": 5 }]
        }"#,
    )
    .unwrap();
    let rules = TaxRules::new(&config).unwrap();
    let car = Vehicle::new(VehicleType::Car);

    let tax = Calculator::new(&rules)
        .daily_tax(Some(&car), &[passage(0, 0), passage(3, 0), passage(23, 59)])
        .unwrap();

    assert_eq!(tax, Fee::new(15));
}
