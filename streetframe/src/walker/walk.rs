//! The walk loop.

use std::collections::HashSet;

use crate::coord::GeoPoint;
use crate::provider::{PanoramaProvider, PanoramaRecord};
use crate::sector::{Candidate, Sector, SectorClassifier};

use super::phase::{MissPolicy, Phase};
use super::{
    AdjacencyResult, AdjacentPanorama, WalkError, WalkRequest, WalkerConfig, MAX_NEIGHBOR_COUNT,
};

/// Walks the panorama link graph to find adjacent panoramas.
///
/// All provider calls are made sequentially on the calling thread. The
/// walker holds no per-walk state, so one instance can serve concurrent
/// walks when the provider allows it.
pub struct AdjacentPanoramaWalker<P: PanoramaProvider> {
    provider: P,
    config: WalkerConfig,
}

impl<P: PanoramaProvider> AdjacentPanoramaWalker<P> {
    /// Creates a walker with the default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: WalkerConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs one walk.
    ///
    /// Returns a result with `request.neighbor_count` slots; unfilled slots
    /// are `None`. Fails when the count exceeds [`MAX_NEIGHBOR_COUNT`] or no
    /// panorama exists at the subject point.
    ///
    /// Each panorama is taken at most once per walk. The subject's panorama
    /// and every panorama already found are marked visited, and links back to
    /// them are skipped, so a back-link never refills a slot and a two-way
    /// link between neighbours cannot make the walk oscillate.
    pub fn walk(&self, request: &WalkRequest) -> Result<AdjacencyResult, WalkError> {
        if request.neighbor_count > MAX_NEIGHBOR_COUNT {
            return Err(WalkError::NeighborCountTooLarge {
                requested: request.neighbor_count,
                max: MAX_NEIGHBOR_COUNT,
            });
        }

        let mut slots: Vec<Option<AdjacentPanorama>> = vec![None; request.neighbor_count];
        if request.neighbor_count == 0 {
            return Ok(AdjacencyResult::from_slots(slots));
        }

        let subject_record = self.lookup(request.subject).map_err(|reason| {
            WalkError::PanoramaNotFound {
                point: request.subject,
                reason,
            }
        })?;

        let classifier = SectorClassifier::new(
            request.subject,
            request.reference,
            self.config.strategy,
            self.config.probe_scale,
        );

        tracing::debug!(
            subject = %request.subject,
            subject_pano = %subject_record.id,
            reference_heading = classifier.sectors().reference_heading(),
            orientation = %request.orientation,
            neighbor_count = request.neighbor_count,
            strategy = %self.config.strategy,
            "Starting adjacent panorama walk"
        );

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(subject_record.id.clone());

        'walk: for phase in Phase::plan(request.orientation, request.neighbor_count) {
            let mut active = request.subject;

            for slot in phase.slots.clone() {
                let record = if active == request.subject {
                    Some(subject_record.clone())
                } else {
                    match self.lookup(active) {
                        Ok(record) => Some(record),
                        Err(reason) => {
                            tracing::debug!(slot, point = %active, reason = %reason, "Hop lookup failed");
                            None
                        }
                    }
                };

                let found = record.and_then(|record| {
                    visited.insert(record.id.clone());
                    self.first_match(&record, phase.sector, &classifier, &visited)
                });

                match found {
                    Some(panorama) => {
                        tracing::debug!(
                            slot,
                            sector = %phase.sector,
                            pano_id = %panorama.pano_id,
                            point = %panorama.point,
                            "Found adjacent panorama"
                        );
                        visited.insert(panorama.pano_id.clone());
                        active = panorama.point;
                        slots[slot] = Some(panorama);
                    }
                    None => match phase.on_miss {
                        MissPolicy::Stay => {
                            tracing::debug!(slot, sector = %phase.sector, "No match, retrying from same point");
                        }
                        MissPolicy::Terminate => {
                            tracing::debug!(slot, sector = %phase.sector, "No match, ending walk");
                            break 'walk;
                        }
                    },
                }
            }
        }

        let result = AdjacencyResult::from_slots(slots);
        tracing::info!(
            provider = self.provider.name(),
            orientation = %request.orientation,
            requested = request.neighbor_count,
            found = result.count,
            "Adjacent panorama walk complete"
        );
        Ok(result)
    }

    fn lookup(&self, point: GeoPoint) -> Result<PanoramaRecord, String> {
        self.provider
            .nearest_panorama(
                point,
                self.config.search_radius_meters,
                self.config.outdoor_only,
            )
            .map_err(|e| e.to_string())
    }

    /// The first link of `record`, in provider order, whose target lies in
    /// `sector`. Links to visited panoramas and unresolvable links are
    /// skipped.
    fn first_match(
        &self,
        record: &PanoramaRecord,
        sector: Sector,
        classifier: &SectorClassifier,
        visited: &HashSet<String>,
    ) -> Option<AdjacentPanorama> {
        for link in &record.links {
            if visited.contains(&link.pano_id) {
                tracing::trace!(pano_id = %link.pano_id, "Skipping visited panorama");
                continue;
            }

            let target = match self.provider.panorama_by_id(&link.pano_id) {
                Ok(target) => target,
                Err(e) => {
                    let error = WalkError::LinkResolutionFailed {
                        pano_id: link.pano_id.clone(),
                        reason: e.to_string(),
                    };
                    tracing::debug!(error = %error, "Skipping link");
                    continue;
                }
            };

            if classifier.contains(sector, Candidate::Point(target.location)) {
                return Some(AdjacentPanorama {
                    pano_id: link.pano_id.clone(),
                    point: target.location,
                });
            }

            tracing::trace!(
                pano_id = %link.pano_id,
                link_heading = link.heading,
                sector = %sector,
                "Link outside target sector"
            );
        }
        None
    }
}
