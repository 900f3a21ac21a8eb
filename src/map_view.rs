//! Map View
//!
//! A Leaflet map widget rendered into the page. Each call to
//! [`MapView::render`] produces an independent [`MapHandle`]; clicking a
//! rendered map reloads the page with the clicked point in the query string,
//! which is how the next request learns about the click.

use serde_json::{Value, json};

use crate::config::MapConfig;
use crate::html::{escape_html, script_json};
use crate::models::Coordinate;

/// Stylesheet and script tags for the Leaflet library
pub const MAP_ASSETS: &str = r#"<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>"#;

/// Page-level script that draws a map from its JSON options
pub const MAP_SCRIPT: &str = r#"<script>
function renderMap(id, opts) {
  const map = L.map(id).setView(opts.center, opts.zoom);
  L.tileLayer(opts.tiles, { attribution: opts.attribution, maxZoom: 19 }).addTo(map);
  if (opts.marker) {
    L.marker(opts.marker.position)
      .bindTooltip(opts.marker.tooltip)
      .bindPopup(opts.marker.popup)
      .addTo(map);
  }
  map.on('click', (e) => {
    const point = e.latlng.wrap();
    const params = new URLSearchParams({ lat: point.lat, lng: point.lng });
    window.location.search = params.toString();
  });
}
</script>"#;

/// A pin with hover and click text
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: Coordinate,
    /// Shown on hover
    pub tooltip: String,
    /// Shown on click
    pub popup: String,
}

impl Marker {
    pub fn new(position: Coordinate, tooltip: impl Into<String>, popup: impl Into<String>) -> Self {
        Self {
            position,
            tooltip: tooltip.into(),
            popup: popup.into(),
        }
    }
}

/// Map widget bound to one interaction
pub struct MapView<'a> {
    config: &'a MapConfig,
    click: Option<Coordinate>,
    rendered: usize,
}

impl<'a> MapView<'a> {
    /// `click` is the point the user clicked before this interaction, if any
    #[must_use]
    pub fn new(config: &'a MapConfig, click: Option<Coordinate>) -> Self {
        Self {
            config,
            click,
            rendered: 0,
        }
    }

    /// Render a map centered on `center` with an optional marker
    pub fn render(&mut self, center: Coordinate, marker: Option<Marker>, zoom: u8) -> MapHandle {
        let id = format!("map-{}", self.rendered);
        self.rendered += 1;

        MapHandle {
            id,
            center,
            zoom,
            marker,
            width: self.config.width,
            height: self.config.height,
            tiles: self.config.tile_url.clone(),
            attribution: self.config.attribution.clone(),
            click: self.click,
        }
    }
}

/// A rendered map
#[derive(Debug, Clone, PartialEq)]
pub struct MapHandle {
    id: String,
    center: Coordinate,
    zoom: u8,
    marker: Option<Marker>,
    width: u32,
    height: u32,
    tiles: String,
    attribution: String,
    click: Option<Coordinate>,
}

impl MapHandle {
    /// The most recent click reported for this map, if any
    #[must_use]
    pub fn last_click(&self) -> Option<Coordinate> {
        self.click
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[must_use]
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    fn options(&self) -> Value {
        let marker = self.marker.as_ref().map(|m| {
            json!({
                "position": [m.position.latitude, m.position.longitude],
                "tooltip": escape_html(&m.tooltip),
                "popup": escape_html(&m.popup),
            })
        });

        json!({
            "center": [self.center.latitude, self.center.longitude],
            "zoom": self.zoom,
            "tiles": self.tiles,
            "attribution": self.attribution,
            "marker": marker,
        })
    }

    /// Container element plus the call that draws into it
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<div id=\"{id}\" class=\"map\" style=\"width: {w}px; height: {h}px;\"></div>\n<script>renderMap(\"{id}\", {opts});</script>\n",
            id = self.id,
            w = self.width,
            h = self.height,
            opts = script_json(&self.options()),
        )
    }
}

/// Free-function form of [`MapHandle::last_click`]
#[must_use]
pub fn last_click(handle: &MapHandle) -> Option<Coordinate> {
    handle.last_click()
}
