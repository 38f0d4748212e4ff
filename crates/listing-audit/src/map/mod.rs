//! Colour rules for the point map of listings.

use crate::legality::rules;
use crate::listings::Listing;
use serde::{Deserialize, Serialize};

pub const UNIFORM_COLOR: &str = "#9b59b6";
pub const ILLEGAL_COLOR: &str = "black";
pub const LEGAL_COLOR: &str = "white";

/// Nightly prices at or above the top of this domain share the darkest step.
pub const PRICE_DOMAIN: (f64, f64) = (0.0, 500.0);

/// ColorBrewer Reds, nine steps, lightest first.
pub const PRICE_RAMP: [&str; 9] = [
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
    "#67000d",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapColorRule {
    #[default]
    #[serde(alias = "none")]
    Uniform,
    Legality,
    Price,
}

impl MapColorRule {
    pub const fn ordered() -> [Self; 3] {
        [Self::Uniform, Self::Legality, Self::Price]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Uniform => "None",
            Self::Legality => "Legality",
            Self::Price => "Price",
        }
    }

    /// Accepts the rule's snake_case name or its label, case-insensitively.
    pub fn from_name(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("uniform") {
            return Some(Self::Uniform);
        }
        Self::ordered()
            .into_iter()
            .find(|rule| rule.label().eq_ignore_ascii_case(value))
    }

    pub fn color_for(self, listing: &Listing) -> &'static str {
        match self {
            Self::Uniform => UNIFORM_COLOR,
            Self::Legality => {
                if rules::is_illegal(listing) {
                    ILLEGAL_COLOR
                } else {
                    LEGAL_COLOR
                }
            }
            Self::Price => price_color(listing.price),
        }
    }
}

/// Quantizes `price` over [`PRICE_DOMAIN`] into [`PRICE_RAMP`]. Values
/// outside the domain clamp to the end steps.
pub fn price_color(price: f64) -> &'static str {
    let (low, high) = PRICE_DOMAIN;
    let steps = PRICE_RAMP.len();
    let position = ((price - low) / (high - low) * steps as f64).floor();
    let index = if position.is_nan() || position < 0.0 {
        0
    } else {
        (position as usize).min(steps - 1)
    };
    PRICE_RAMP[index]
}

/// One listing drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
    pub illegal: bool,
    pub color: &'static str,
}

/// A titled point layer coloured by one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub title: String,
    pub color_rule: MapColorRule,
}

impl MapLayer {
    pub fn new(title: impl Into<String>, color_rule: MapColorRule) -> Self {
        Self {
            title: title.into(),
            color_rule,
        }
    }

    pub fn points(&self, listings: &[Listing]) -> Vec<MapPoint> {
        listings
            .iter()
            .map(|listing| MapPoint {
                latitude: listing.latitude,
                longitude: listing.longitude,
                price: listing.price,
                illegal: rules::is_illegal(listing),
                color: self.color_rule.color_for(listing),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::{APARTMENT, ENTIRE_HOME};

    fn listing(price: f64, illegal: Option<bool>) -> Listing {
        Listing {
            property_type: APARTMENT.to_string(),
            room_type: ENTIRE_HOME.to_string(),
            min_stay: 2,
            calculated_host_listings_count: 1,
            host_location: Some("New York, New York, United States".to_string()),
            price,
            latitude: 40.71,
            longitude: -73.99,
            illegal,
        }
    }

    #[test]
    fn price_ramp_quantizes_and_clamps() {
        assert_eq!(price_color(0.0), "#fff5f0");
        assert_eq!(price_color(55.0), "#fff5f0");
        assert_eq!(price_color(56.0), "#fee0d2");
        assert_eq!(price_color(250.0), "#fb6a4a");
        assert_eq!(price_color(499.0), "#67000d");
        assert_eq!(price_color(2_000.0), "#67000d");
        assert_eq!(price_color(-10.0), "#fff5f0");
    }

    #[test]
    fn legality_prefers_shipped_flag() {
        let layer = MapLayer::new("Legality", MapColorRule::Legality);
        let points = layer.points(&[listing(80.0, Some(false)), listing(80.0, None)]);

        assert_eq!(points[0].color, LEGAL_COLOR);
        assert!(!points[0].illegal);
        // Entire-home short-term apartment with no shipped verdict.
        assert_eq!(points[1].color, ILLEGAL_COLOR);
        assert!(points[1].illegal);
    }

    #[test]
    fn uniform_rule_ignores_listing() {
        let layer = MapLayer::new("All listings", MapColorRule::Uniform);
        let points = layer.points(&[listing(900.0, Some(true))]);
        assert_eq!(points[0].color, UNIFORM_COLOR);
        assert_eq!(points[0].latitude, 40.71);
    }

    #[test]
    fn rule_names_parse_from_labels() {
        assert_eq!(MapColorRule::from_name("none"), Some(MapColorRule::Uniform));
        assert_eq!(MapColorRule::from_name("Uniform"), Some(MapColorRule::Uniform));
        assert_eq!(MapColorRule::from_name("PRICE"), Some(MapColorRule::Price));
        assert_eq!(MapColorRule::from_name("borough"), None);
    }
}
