//! Process-wide store of loaded Datasets.
//!
//! Populated once at startup, read-only afterwards; concurrent requests
//! share it behind an `Arc` without locking because nothing mutates it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use epifund_common::{AppConfig, DatasetSource, LoadError};
use tracing::{info, warn};

use crate::loader::load_dataset;
use crate::model::Dataset;
use crate::sources::spec_for;

/// Outcome of loading one source at startup.
#[derive(Debug, Clone)]
pub enum DatasetSlot {
    Loaded(Arc<Dataset>),
    /// Load failed for an optional source; the reason is shown to views.
    Unavailable(String),
}

pub struct DataStore {
    slots: HashMap<DatasetSource, DatasetSlot>,
}

/// Per-source status line for the landing page's stat cards.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub source: DatasetSource,
    pub rows: Option<usize>,
    pub error: Option<String>,
}

impl DataStore {
    /// Load every configured source. A mandatory source that fails aborts
    /// startup; an optional one is recorded as unavailable.
    pub fn load(config: &AppConfig) -> Result<Self, LoadError> {
        let mut slots = HashMap::new();
        for entry in &config.datasets {
            let spec = spec_for(entry.source);
            match load_dataset(Path::new(&entry.path), &spec) {
                Ok(dataset) => {
                    slots.insert(entry.source, DatasetSlot::Loaded(Arc::new(dataset)));
                }
                Err(err) if entry.mandatory => {
                    return Err(err);
                }
                Err(err) => {
                    warn!(source = %entry.source, error = %err, "optional dataset unavailable");
                    slots.insert(entry.source, DatasetSlot::Unavailable(err.to_string()));
                }
            }
        }
        info!(sources = slots.len(), "data store populated");
        Ok(Self { slots })
    }

    pub fn slot(&self, source: DatasetSource) -> Option<&DatasetSlot> {
        self.slots.get(&source)
    }

    /// The dataset if loaded, otherwise the user-facing unavailability reason.
    pub fn dataset(&self, source: DatasetSource) -> Result<Arc<Dataset>, String> {
        match self.slots.get(&source) {
            Some(DatasetSlot::Loaded(ds)) => Ok(Arc::clone(ds)),
            Some(DatasetSlot::Unavailable(reason)) => Err(reason.clone()),
            None => Err(format!("dataset {} is not configured", source.as_str())),
        }
    }

    /// Stable-order summaries for the landing page.
    pub fn summaries(&self) -> Vec<SourceSummary> {
        DatasetSource::ALL
            .iter()
            .filter_map(|&source| {
                self.slots.get(&source).map(|slot| match slot {
                    DatasetSlot::Loaded(ds) => SourceSummary {
                        source,
                        rows: Some(ds.len()),
                        error: None,
                    },
                    DatasetSlot::Unavailable(reason) => SourceSummary {
                        source,
                        rows: None,
                        error: Some(reason.clone()),
                    },
                })
            })
            .collect()
    }
}
