//! The five known source datasets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a source file. Each carries a fixed, documented column set;
/// the loader tolerates column order variation but not renaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSource {
    PediatricEpilepsy,
    ClinicalTrials,
    FundingMaster,
    DravetSyndrome,
    Pitchbook,
}

impl DatasetSource {
    pub const ALL: [DatasetSource; 5] = [
        DatasetSource::PediatricEpilepsy,
        DatasetSource::ClinicalTrials,
        DatasetSource::FundingMaster,
        DatasetSource::DravetSyndrome,
        DatasetSource::Pitchbook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSource::PediatricEpilepsy => "pediatric_epilepsy",
            DatasetSource::ClinicalTrials => "clinical_trials",
            DatasetSource::FundingMaster => "funding_master",
            DatasetSource::DravetSyndrome => "dravet_syndrome",
            DatasetSource::Pitchbook => "pitchbook",
        }
    }

    /// Human-readable name used in page headings and legends.
    pub fn label(&self) -> &'static str {
        match self {
            DatasetSource::PediatricEpilepsy => "Pediatric Epilepsy Grants",
            DatasetSource::ClinicalTrials => "Epilepsy Clinical Trials",
            DatasetSource::FundingMaster => "Epilepsy Funding Master",
            DatasetSource::DravetSyndrome => "NIH Dravet Syndrome Awards",
            DatasetSource::Pitchbook => "Pitchbook Venture Funding",
        }
    }

    /// Default file name for the source, relative to the data directory.
    pub fn default_file(&self) -> &'static str {
        match self {
            DatasetSource::PediatricEpilepsy => "Pediatric_Epilepsy_Grants.xlsx",
            DatasetSource::ClinicalTrials => "Epilepsy_ClinicalTrials.csv",
            DatasetSource::FundingMaster => "Epilepsy_Funding_Master.xlsx",
            DatasetSource::DravetSyndrome => "NIH_DravetSyndrome_2014_2024.csv",
            DatasetSource::Pitchbook => "Pitchbook_Ventures.xlsx",
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pediatric_epilepsy" => Ok(DatasetSource::PediatricEpilepsy),
            "clinical_trials" => Ok(DatasetSource::ClinicalTrials),
            "funding_master" => Ok(DatasetSource::FundingMaster),
            "dravet_syndrome" => Ok(DatasetSource::DravetSyndrome),
            "pitchbook" => Ok(DatasetSource::Pitchbook),
            other => Err(format!("unknown dataset \"{other}\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_round_trips_through_from_str() {
        for source in DatasetSource::ALL {
            assert_eq!(source.as_str().parse::<DatasetSource>().unwrap(), source);
        }
    }

    #[test]
    fn test_unknown_slug_is_rejected() {
        assert!("nih_master".parse::<DatasetSource>().is_err());
    }
}
