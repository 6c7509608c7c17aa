//! Frame-set planning.
//!
//! Turns a place into the images that frame it: the panorama nearest the
//! place, the nearest panoramas to its left and right, and a map snapshot.
//!
//! # Flow
//!
//! ```text
//! place id ──geocode──► reference point
//!                          │
//!            nearest panorama (main frame)
//!                          │
//!          FrontOf walk from main, axis = main → reference
//!                          │
//!          left slots ─► left frame, right slots ─► right frame
//! ```
//!
//! Every frame looks at the reference point: its heading is the bearing
//! from the panorama's location to the reference.

use serde::Serialize;
use thiserror::Error;

use crate::coord::{bearing, GeoPoint};
use crate::imagery::{
    ImageSize, ImageUrlBuilder, ImageryError, StaticMapRequest, StreetViewImageRequest,
};
use crate::provider::{Geocoder, PanoramaProvider, ProviderError};
use crate::walker::{
    AdjacencyResult, AdjacentPanorama, AdjacentPanoramaWalker, Orientation, WalkError,
    WalkRequest, WalkerConfig, DEFAULT_NEIGHBOR_COUNT,
};

/// Default panorama zoom for frame images.
pub const DEFAULT_FRAME_ZOOM: f64 = 0.8;

/// Default Static Maps zoom for the map snapshot.
pub const DEFAULT_MAP_ZOOM: u8 = 17;

/// Errors from frame planning.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// The place could not be geocoded.
    #[error("Geocoding failed: {0}")]
    Geocode(#[source] ProviderError),

    /// No main panorama, or the walk failed.
    #[error("Panorama search failed: {0}")]
    Walk(#[from] WalkError),

    /// An image URL could not be built.
    #[error("Image request invalid: {0}")]
    Imagery(#[from] ImageryError),
}

/// Frame planning options.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    /// Interactive zoom for the panorama images.
    pub zoom: f64,
    /// Camera pitch for the panorama images.
    pub pitch: f64,
    /// Zoom for the map snapshot.
    pub map_zoom: u8,
    /// Size of every image.
    pub size: ImageSize,
    /// Slots for the adjacency walk; half left, half right.
    pub neighbor_count: usize,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_FRAME_ZOOM,
            pitch: 0.0,
            map_zoom: DEFAULT_MAP_ZOOM,
            size: ImageSize::default(),
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
        }
    }
}

/// One panorama image aimed at the reference point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub pano_id: String,
    pub point: GeoPoint,
    /// Camera heading toward the reference, [0, 360).
    pub heading: f64,
    pub image_url: String,
}

/// The images framing one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSet {
    /// Geocoded location of the place.
    pub reference: GeoPoint,
    pub main: Frame,
    pub left: Option<Frame>,
    pub right: Option<Frame>,
    pub map_url: String,
}

impl FrameSet {
    /// Frames present in the set, main first.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::once(&self.main)
            .chain(self.left.as_ref())
            .chain(self.right.as_ref())
    }
}

/// Plans frame sets for places.
pub struct FramePlanner<G: Geocoder, P: PanoramaProvider> {
    geocoder: G,
    walker: AdjacentPanoramaWalker<P>,
    urls: ImageUrlBuilder,
    options: FrameOptions,
}

impl<G: Geocoder, P: PanoramaProvider> FramePlanner<G, P> {
    pub fn new(geocoder: G, provider: P, urls: ImageUrlBuilder) -> Self {
        Self {
            geocoder,
            walker: AdjacentPanoramaWalker::new(provider),
            urls,
            options: FrameOptions::default(),
        }
    }

    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker = self.walker.with_config(config);
        self
    }

    pub fn with_options(mut self, options: FrameOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FrameOptions {
        &self.options
    }

    /// Plans the frame set for a place.
    ///
    /// Missing left or right frames are not an error.
    pub fn plan(&self, place_id: &str) -> Result<FrameSet, FrameError> {
        let geocoded = self.geocoder.geocode(place_id).map_err(FrameError::Geocode)?;
        let reference = geocoded.location;
        self.plan_at(reference)
    }

    /// Plans the frame set around an already known reference point.
    pub fn plan_at(&self, reference: GeoPoint) -> Result<FrameSet, FrameError> {
        let config = self.walker.config();
        let main = self
            .walker
            .provider()
            .nearest_panorama(reference, config.search_radius_meters, config.outdoor_only)
            .map_err(|e| WalkError::PanoramaNotFound {
                point: reference,
                reason: e.to_string(),
            })?;

        let request = WalkRequest::new(
            main.location,
            reference,
            Orientation::FrontOf,
            self.options.neighbor_count,
        );
        let adjacency = self.walker.walk(&request)?;
        let (left, right) = split_sides(&adjacency);

        let frame = |pano_id: &str, point: GeoPoint| self.frame(pano_id, point, reference);
        let frame_set = FrameSet {
            reference,
            main: frame(&main.id, main.location)?,
            left: left.map(|p| frame(&p.pano_id, p.point)).transpose()?,
            right: right.map(|p| frame(&p.pano_id, p.point)).transpose()?,
            map_url: self.urls.static_map_url(
                &StaticMapRequest::new(reference, self.options.map_zoom).with_size(self.options.size),
            )?,
        };

        tracing::info!(
            reference = %reference,
            main = %frame_set.main.pano_id,
            left = frame_set.left.as_ref().map(|f| f.pano_id.as_str()).unwrap_or("-"),
            right = frame_set.right.as_ref().map(|f| f.pano_id.as_str()).unwrap_or("-"),
            "Planned frame set"
        );
        Ok(frame_set)
    }

    fn frame(&self, pano_id: &str, point: GeoPoint, reference: GeoPoint) -> Result<Frame, FrameError> {
        let heading = bearing(point, reference);
        let request = StreetViewImageRequest::new(pano_id, heading, self.options.zoom)
            .with_pitch(self.options.pitch)
            .with_size(self.options.size);

        Ok(Frame {
            pano_id: pano_id.to_string(),
            point,
            heading,
            image_url: self.urls.street_view_url(&request)?,
        })
    }
}

/// First found panorama of the left half and of the right half of a
/// `FrontOf` result.
fn split_sides(
    adjacency: &AdjacencyResult,
) -> (Option<&AdjacentPanorama>, Option<&AdjacentPanorama>) {
    let half = adjacency.requested() / 2;
    let (left, right) = adjacency.locations.split_at(half);
    (left.iter().flatten().next(), right.iter().flatten().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::offset;
    use crate::provider::{GeocodeResult, GeocodeStatus, PanoramaGraph, PanoramaRecord};

    const PLACE: GeoPoint = GeoPoint::new(0.0, 0.001);

    struct FixedGeocoder(Result<GeoPoint, ProviderError>);

    impl Geocoder for FixedGeocoder {
        fn geocode(&self, _place_id: &str) -> Result<GeocodeResult, ProviderError> {
            self.0.clone().map(|location| GeocodeResult {
                location,
                location_type: None,
                status: GeocodeStatus::Ok,
            })
        }
    }

    /// Main panorama 20 m west of the place, looking east.
    fn street(with_right: bool) -> PanoramaGraph {
        let main_point = offset(PLACE, 20.0, 270.0);
        let mut main = PanoramaRecord::new("main", main_point).with_link("north", 0.0);
        if with_right {
            main = main.with_link("south", 180.0);
        }
        PanoramaGraph::new()
            .with_panorama(main)
            .with_panorama(PanoramaRecord::new("north", offset(main_point, 15.0, 0.0)))
            .with_panorama(PanoramaRecord::new("south", offset(main_point, 15.0, 180.0)))
    }

    fn planner(graph: PanoramaGraph, geocoded: Result<GeoPoint, ProviderError>) -> FramePlanner<FixedGeocoder, PanoramaGraph> {
        FramePlanner::new(FixedGeocoder(geocoded), graph, ImageUrlBuilder::new("k"))
    }

    #[test]
    fn test_plan_full_frame_set() {
        let frames = planner(street(true), Ok(PLACE)).plan("place").unwrap();

        assert_eq!(frames.reference, PLACE);
        assert_eq!(frames.main.pano_id, "main");
        assert_eq!(frames.left.as_ref().unwrap().pano_id, "north");
        assert_eq!(frames.right.as_ref().unwrap().pano_id, "south");
        assert_eq!(frames.frames().count(), 3);

        // Main looks due east at the place
        assert!((frames.main.heading - 90.0).abs() < 0.01);
        assert!(frames.main.image_url.contains("pano=main&fov=103.38&heading=90&pitch=0"));
        assert!(frames.map_url.contains("zoom=17"));
    }

    #[test]
    fn test_side_frames_look_at_place() {
        let frames = planner(street(true), Ok(PLACE)).plan("place").unwrap();
        let left = frames.left.unwrap();
        // North of the main panorama, so the place is south-east
        assert!(left.heading > 90.0 && left.heading < 180.0);
        assert_eq!(left.heading, bearing(left.point, PLACE));
    }

    #[test]
    fn test_partial_frame_set() {
        let frames = planner(street(false), Ok(PLACE)).plan("place").unwrap();
        assert!(frames.left.is_some());
        assert!(frames.right.is_none());
    }

    #[test]
    fn test_geocode_failure() {
        let result = planner(street(true), Err(ProviderError::Geocode(GeocodeStatus::ZeroResults)))
            .plan("nowhere");
        assert_eq!(
            result,
            Err(FrameError::Geocode(ProviderError::Geocode(GeocodeStatus::ZeroResults)))
        );
    }

    #[test]
    fn test_no_main_panorama() {
        let far_away = GeoPoint::new(45.0, 45.0);
        let result = planner(street(true), Ok(far_away)).plan("place");
        assert!(matches!(
            result,
            Err(FrameError::Walk(WalkError::PanoramaNotFound { .. }))
        ));
    }

    #[test]
    fn test_invalid_size_is_reported() {
        let options = FrameOptions {
            size: ImageSize::new(1000, 1000),
            ..FrameOptions::default()
        };
        let result = planner(street(true), Ok(PLACE)).with_options(options).plan("place");
        assert!(matches!(result, Err(FrameError::Imagery(ImageryError::InvalidSize { .. }))));
    }

    #[test]
    fn test_split_sides_uses_first_found_per_half() {
        let hit = |id: &str| {
            Some(AdjacentPanorama {
                pano_id: id.to_string(),
                point: GeoPoint::new(0.0, 0.0),
            })
        };
        let adjacency = AdjacencyResult {
            locations: vec![None, hit("l2"), hit("r1"), None],
            count: 2,
        };
        let (left, right) = split_sides(&adjacency);
        assert_eq!(left.unwrap().pano_id, "l2");
        assert_eq!(right.unwrap().pano_id, "r1");
    }
}
