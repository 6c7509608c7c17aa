//! Walker errors.

use thiserror::Error;

use crate::coord::GeoPoint;

/// Errors that can occur while walking the panorama link graph.
///
/// Only [`InvalidOrientation`](WalkError::InvalidOrientation),
/// [`NeighborCountTooLarge`](WalkError::NeighborCountTooLarge) and a
/// [`PanoramaNotFound`](WalkError::PanoramaNotFound) on the subject point are
/// returned to callers. Everything else shortens the result instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalkError {
    /// The orientation argument is not recognised.
    #[error("Invalid orientation '{0}': expected left-of, right-of or front-of")]
    InvalidOrientation(String),

    /// The request asks for more slots than a walk allows.
    #[error("Neighbor count {requested} exceeds the maximum of {max}")]
    NeighborCountTooLarge {
        /// Slots requested.
        requested: usize,
        /// Largest accepted count.
        max: usize,
    },

    /// No panorama was found at a lookup point.
    #[error("No panorama near {point}: {reason}")]
    PanoramaNotFound {
        /// Point that was searched around.
        point: GeoPoint,
        /// Provider failure description.
        reason: String,
    },

    /// A link's target panorama could not be resolved.
    #[error("Failed to resolve linked panorama {pano_id}: {reason}")]
    LinkResolutionFailed {
        /// Target panorama id of the link.
        pano_id: String,
        /// Provider failure description.
        reason: String,
    },
}
