//! Headless model of the map surface: camera, zoom limits and markers.

use mandi_core::{Bounds, CategoryCatalog, Coordinate, Place, PlaceId, DEFAULT_CENTER, SERVICE_AREA};

use crate::geolocation::{locate_or_default, Geolocator};

/// Marker colour for a coordinate picked but not yet published.
pub const PENDING_MARKER_COLOR: &str = "black";
/// Number of in-stock items listed in a marker popup.
pub const POPUP_PREVIEW_ITEMS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub default_center: Coordinate,
    pub default_zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub bounds: Bounds,
    /// Store-backed markers are hidden below this zoom.
    pub marker_min_zoom: u8,
    pub selected_zoom: u8,
    pub recenter_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: 16,
            min_zoom: 6,
            max_zoom: 18,
            bounds: SERVICE_AREA,
            marker_min_zoom: 13,
            selected_zoom: 16,
            recenter_zoom: 13,
        }
    }
}

/// Input coming back from the rendered map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Tap on the map background.
    Click(Coordinate),
    MarkerTap(PlaceId),
    ZoomEnd(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Store,
    Selected,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPopup {
    pub title: String,
    pub category_label: String,
    pub preview_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub place_id: Option<PlaceId>,
    pub position: Coordinate,
    pub color: String,
    pub kind: MarkerKind,
    pub popup: Option<MarkerPopup>,
}

impl MarkerSpec {
    fn for_place(place: &Place, kind: MarkerKind, catalog: &CategoryCatalog) -> Option<Self> {
        let position = place.position()?;
        let mut preview_items = place.in_stock_names();
        preview_items.truncate(POPUP_PREVIEW_ITEMS);
        Some(Self {
            place_id: Some(place.place_id),
            position,
            color: catalog.marker_color_for(&place.category).to_string(),
            kind,
            popup: Some(MarkerPopup {
                title: place.short_name().to_string(),
                category_label: catalog.label_for(&place.category).to_string(),
                preview_items,
            }),
        })
    }

    fn pending(position: Coordinate) -> Self {
        Self {
            place_id: None,
            position,
            color: PENDING_MARKER_COLOR.to_string(),
            kind: MarkerKind::Pending,
            popup: None,
        }
    }
}

/// Camera state of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    config: MapConfig,
    center: Coordinate,
    zoom: u8,
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl MapSurface {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        let center = config.bounds.clamp(config.default_center);
        let zoom = config.default_zoom.clamp(config.min_zoom, config.max_zoom);
        Self {
            config,
            center,
            zoom,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Apply a zoom change, clamped to the configured range.
    pub fn set_zoom(&mut self, zoom: u8) -> u8 {
        self.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.zoom
    }

    /// Move the camera. The target is clamped into the pan bounds; a
    /// non-finite target leaves the camera where it is.
    pub fn fly_to(&mut self, target: Coordinate, zoom: u8) {
        if !target.is_finite() {
            tracing::debug!(?target, "ignoring non-finite fly-to target");
            return;
        }
        self.center = self.config.bounds.clamp(target);
        self.set_zoom(zoom);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Whether store-backed markers are drawn at the current zoom.
    #[must_use]
    pub fn markers_visible(&self) -> bool {
        self.zoom >= self.config.marker_min_zoom
    }

    /// Where the camera should be for the current selection.
    ///
    /// A selected place wins, then a pending pick, then the default centre.
    #[must_use]
    pub fn camera_target(
        &self,
        selected: Option<&Place>,
        pending: Option<Coordinate>,
    ) -> (Coordinate, u8) {
        if let Some(position) = selected.and_then(Place::position) {
            return (position, self.config.selected_zoom);
        }
        if let Some(position) = pending.filter(Coordinate::is_finite) {
            return (position, self.config.default_zoom);
        }
        (self.config.default_center, self.config.default_zoom)
    }

    /// Fly to [`MapSurface::camera_target`].
    pub fn follow(&mut self, selected: Option<&Place>, pending: Option<Coordinate>) {
        let (target, zoom) = self.camera_target(selected, pending);
        self.fly_to(target, zoom);
    }

    /// Centre on the device position (or the default centre) at the
    /// re-centre zoom.
    pub async fn recenter(
        &mut self,
        geolocator: &dyn Geolocator,
        timeout: std::time::Duration,
    ) -> Coordinate {
        let position = locate_or_default(geolocator, timeout).await;
        self.fly_to(position, self.config.recenter_zoom);
        self.center
    }

    /// Markers to draw.
    ///
    /// `visible` places only render at or above the marker zoom and are
    /// skipped when their coordinates do not parse. The selected place and
    /// the pending pick always render.
    #[must_use]
    pub fn markers(
        &self,
        visible: &[&Place],
        selected: Option<&Place>,
        pending: Option<Coordinate>,
        catalog: &CategoryCatalog,
    ) -> Vec<MarkerSpec> {
        let selected_id = selected.map(|p| p.place_id);
        let mut markers = Vec::new();

        if self.markers_visible() {
            markers.extend(
                visible
                    .iter()
                    .filter(|place| Some(place.place_id) != selected_id)
                    .filter_map(|place| MarkerSpec::for_place(place, MarkerKind::Store, catalog)),
            );
        }
        if let Some(place) = selected {
            markers.extend(MarkerSpec::for_place(place, MarkerKind::Selected, catalog));
        }
        if let Some(position) = pending.filter(Coordinate::is_finite) {
            markers.push(MarkerSpec::pending(position));
        }
        markers
    }
}

#[cfg(test)]
#[path = "map_test.rs"]
mod tests;
