use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::{ActCatalog, CatalogError};
use crate::error::StoreResult;
use crate::models::{Act, EventType};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    acts: Vec<Act>,
}

/// Catalog loaded once from a `{"acts": [...]}` JSON document and held in memory
#[derive(Debug, Clone)]
pub struct JsonActCatalog {
    acts: Arc<Vec<Act>>,
}

impl JsonActCatalog {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let path_label = path.display().to_string();

        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path_label.clone(),
            error: e.to_string(),
        })?;

        let catalog = Self::from_json_str(&contents).map_err(|e| match e {
            CatalogError::Parse { error, .. } => CatalogError::Parse {
                path: path_label.clone(),
                error,
            },
            other => other,
        })?;

        info!(
            path = %path_label,
            act_count = catalog.acts.len(),
            "Loaded act catalog"
        );
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| CatalogError::Parse {
            path: "<inline>".to_string(),
            error: e.to_string(),
        })?;
        Self::from_acts(file.acts)
    }

    /// Build a catalog from acts already in memory. Every act is validated and ids
    /// must be unique across the whole catalog.
    pub fn from_acts(mut acts: Vec<Act>) -> Result<Self, CatalogError> {
        let mut seen: HashSet<String> = HashSet::with_capacity(acts.len());
        for act in &acts {
            act.validate().map_err(|e| CatalogError::InvalidAct {
                act_id: act.id.clone(),
                reason: e.to_string(),
            })?;
            if !seen.insert(act.id.clone()) {
                return Err(CatalogError::DuplicateAct(act.id.clone()));
            }
        }

        acts.sort_by_key(|act| (act.event_type.as_str(), act.running_order));

        Ok(Self {
            acts: Arc::new(acts),
        })
    }

    pub fn len(&self) -> usize {
        self.acts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }
}

#[async_trait]
impl ActCatalog for JsonActCatalog {
    async fn list_acts(&self, event_type: Option<EventType>) -> StoreResult<Vec<Act>> {
        let acts: Vec<Act> = self
            .acts
            .iter()
            .filter(|act| event_type.map_or(true, |et| act.event_type == et))
            .cloned()
            .collect();
        debug!(event_type = ?event_type, act_count = acts.len(), "Listed acts");
        Ok(acts)
    }
}
