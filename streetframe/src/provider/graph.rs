//! In-memory panorama link graph.
//!
//! Serves panorama lookups from a fixed set of records, either built in code
//! or loaded from a JSON document:
//!
//! ```json
//! {
//!   "panoramas": [
//!     {
//!       "id": "p0",
//!       "location": {"lat": 0.0, "lng": 0.0},
//!       "links": [{"pano_id": "p1", "heading": 90.0}],
//!       "indoor": false
//!     }
//!   ]
//! }
//! ```
//!
//! Lookups are deterministic, which makes the graph the provider of choice
//! for tests and offline runs.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::coord::{distance, GeoPoint};
use crate::provider::{PanoramaProvider, PanoramaRecord, ProviderError};

#[derive(Debug, Clone, Deserialize)]
struct GraphEntry {
    #[serde(flatten)]
    record: PanoramaRecord,
    #[serde(default)]
    indoor: bool,
}

#[derive(Debug, Deserialize)]
struct GraphDocument {
    panoramas: Vec<GraphEntry>,
}

/// A panorama provider backed by an in-memory link graph.
#[derive(Debug, Clone, Default)]
pub struct PanoramaGraph {
    entries: Vec<GraphEntry>,
    index: HashMap<String, usize>,
}

impl PanoramaGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a graph from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ProviderError> {
        let document: GraphDocument = serde_json::from_str(json)
            .map_err(|e| ProviderError::InvalidResponse(format!("panorama graph: {}", e)))?;

        let mut graph = Self::new();
        for entry in document.panoramas {
            graph.insert_entry(entry);
        }
        Ok(graph)
    }

    /// Loads a graph from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ProviderError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ProviderError::Io(format!("{}: {}", path.display(), e)))?;
        let graph = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), panoramas = graph.len(), "Loaded panorama graph");
        Ok(graph)
    }

    /// Inserts an outdoor panorama, replacing any record with the same id.
    pub fn insert(&mut self, record: PanoramaRecord) {
        self.insert_entry(GraphEntry {
            record,
            indoor: false,
        });
    }

    /// Inserts an indoor panorama, replacing any record with the same id.
    pub fn insert_indoor(&mut self, record: PanoramaRecord) {
        self.insert_entry(GraphEntry {
            record,
            indoor: true,
        });
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_panorama(mut self, record: PanoramaRecord) -> Self {
        self.insert(record);
        self
    }

    /// Number of panoramas in the graph.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph holds no panoramas.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_entry(&mut self, entry: GraphEntry) {
        match self.index.get(&entry.record.id) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.index.insert(entry.record.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }
}

impl PanoramaProvider for PanoramaGraph {
    /// Closest panorama within the radius. Ties go to the panorama inserted
    /// first.
    fn nearest_panorama(
        &self,
        point: GeoPoint,
        radius_meters: f64,
        outdoor_only: bool,
    ) -> Result<PanoramaRecord, ProviderError> {
        let mut best: Option<(f64, &GraphEntry)> = None;

        for entry in &self.entries {
            if outdoor_only && entry.indoor {
                continue;
            }
            let meters = distance(point, entry.record.location);
            if meters > radius_meters {
                continue;
            }
            if best.map_or(true, |(closest, _)| meters < closest) {
                best = Some((meters, entry));
            }
        }

        best.map(|(_, entry)| entry.record.clone()).ok_or_else(|| {
            ProviderError::NotFound(format!("no panorama within {}m of {}", radius_meters, point))
        })
    }

    fn panorama_by_id(&self, id: &str) -> Result<PanoramaRecord, ProviderError> {
        self.index
            .get(id)
            .map(|&slot| self.entries[slot].record.clone())
            .ok_or_else(|| ProviderError::NotFound(id.to_string()))
    }

    fn name(&self) -> &str {
        "panorama-graph"
    }
}
