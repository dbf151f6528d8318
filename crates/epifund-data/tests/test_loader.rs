//! Loader integration tests over tempfile-backed CSV fixtures.

use std::io::Write;

use epifund_common::{AppConfig, DatasetEntry, DatasetSource, LoadError};
use epifund_data::model::GroupKey;
use epifund_data::sources::spec_for;
use epifund_data::store::{DataStore, DatasetSlot};
use epifund_data::load_dataset;
use tempfile::NamedTempFile;

fn csv_fixture(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

const MASTER_CSV: &str = "\
Award ID,Funder,Year,Amount,Condition,Organization State
A-1,NIH,2019,\"$100,000\",Epilepsy,CA
A-2,NIH,2020,250000,Dravet Syndrome,NY
A-3,CURE,2020,,Epilepsy,CA
A-4,CURE,2021,50000.5,Epilepsy,
";

#[test]
fn test_loading_twice_is_deterministic() {
    let file = csv_fixture(MASTER_CSV);
    let spec = spec_for(DatasetSource::FundingMaster);
    let first = load_dataset(file.path(), &spec).unwrap();
    let second = load_dataset(file.path(), &spec).unwrap();
    assert_eq!(first.records, second.records);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_column_order_variation_is_tolerated() {
    let shuffled = "\
Amount,Organization State,Award ID,Condition,Funder,Year
1000,CA,A-1,Epilepsy,NIH,2022
";
    let file = csv_fixture(shuffled);
    let dataset = load_dataset(file.path(), &spec_for(DatasetSource::FundingMaster)).unwrap();
    assert_eq!(dataset.len(), 1);
    let rec = &dataset.records[0];
    assert_eq!(rec.id, "A-1");
    assert_eq!(rec.fiscal_year, Some(2022));
    assert_eq!(rec.amount, Some(1000.0));
    assert_eq!(rec.funder.as_deref(), Some("NIH"));
}

#[test]
fn test_renamed_column_is_a_schema_mismatch() {
    let renamed = "\
Award ID,Sponsor,Year,Amount,Condition,Organization State
A-1,NIH,2019,1000,Epilepsy,CA
";
    let file = csv_fixture(renamed);
    let err = load_dataset(file.path(), &spec_for(DatasetSource::FundingMaster)).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn { column, .. } if column == "Funder"));
}

#[test]
fn test_non_numeric_amount_fails_the_load() {
    let bad = "\
Award ID,Funder,Year,Amount,Condition,Organization State
A-1,NIH,2019,not-disclosed,Epilepsy,CA
";
    let file = csv_fixture(bad);
    let err = load_dataset(file.path(), &spec_for(DatasetSource::FundingMaster)).unwrap_err();
    match err {
        LoadError::BadCell { column, value, .. } => {
            assert_eq!(column, "Amount");
            assert_eq!(value, "not-disclosed");
        }
        other => panic!("expected BadCell, got {other:?}"),
    }
}

#[test]
fn test_missing_values_load_as_null_not_zero() {
    let file = csv_fixture(MASTER_CSV);
    let dataset = load_dataset(file.path(), &spec_for(DatasetSource::FundingMaster)).unwrap();
    let a3 = dataset.records.iter().find(|r| r.id == "A-3").unwrap();
    assert_eq!(a3.amount, None);
    let a4 = dataset.records.iter().find(|r| r.id == "A-4").unwrap();
    assert_eq!(a4.state, None);
    assert_eq!(a4.amount, Some(50000.5));
}

#[test]
fn test_missing_file_is_file_not_found() {
    let err = load_dataset(
        std::path::Path::new("/nonexistent/master.csv"),
        &spec_for(DatasetSource::FundingMaster),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound { .. }));
}

#[test]
fn test_dravet_baseline_drops_zero_fiscal_years() {
    let dravet = "\
Application ID,Fiscal Year,Total Cost,Administering IC,Organization State,Activity,Contact PI / Project Leader,Award Notice Date
10001,2019,\"$350,000\",NINDS,CA,R01,\"SMITH, JANE\",2019-04-01
10002,0,,NINDS,NY,R21,\"DOE, JOHN\",
10003,2020,400000,NICHD,TX,R01,\"DOE, JOHN\",06/15/2020
";
    let file = csv_fixture(dravet);
    let dataset = load_dataset(file.path(), &spec_for(DatasetSource::DravetSyndrome)).unwrap();
    assert_eq!(dataset.len(), 2);
    assert!(dataset.records.iter().all(|r| r.fiscal_year != Some(0)));
    assert!(dataset.supports(GroupKey::Investigator));
}

#[test]
fn test_store_marks_optional_sources_unavailable() {
    let file = csv_fixture(MASTER_CSV);
    let config = AppConfig {
        datasets: vec![
            DatasetEntry {
                source: DatasetSource::FundingMaster,
                path: file.path().display().to_string(),
                mandatory: true,
            },
            DatasetEntry {
                source: DatasetSource::Pitchbook,
                path: "/nonexistent/pitchbook.xlsx".into(),
                mandatory: false,
            },
        ],
        ..AppConfig::default()
    };
    let store = DataStore::load(&config).unwrap();
    assert!(matches!(
        store.slot(DatasetSource::FundingMaster),
        Some(DatasetSlot::Loaded(_))
    ));
    assert!(matches!(
        store.slot(DatasetSource::Pitchbook),
        Some(DatasetSlot::Unavailable(_))
    ));
    assert!(store.dataset(DatasetSource::Pitchbook).is_err());
}

#[test]
fn test_store_fails_startup_on_mandatory_load_error() {
    let config = AppConfig {
        datasets: vec![DatasetEntry {
            source: DatasetSource::DravetSyndrome,
            path: "/nonexistent/dravet.csv".into(),
            mandatory: true,
        }],
        ..AppConfig::default()
    };
    assert!(DataStore::load(&config).is_err());
}
