use serde::{Deserialize, Serialize};

/// Property type that makes a listing subject to the multiple-dwelling rules.
pub const APARTMENT: &str = "Apartment";
/// Room type for a whole unit rented without the host.
pub const ENTIRE_HOME: &str = "Entire home/apt";
/// Rentals shorter than this many nights are short-term.
pub const SHORT_TERM_NIGHTS: u32 = 30;

/// One scraped rental listing.
///
/// Deserialization runs through the loader's row type so the same text
/// normalisation applies to CSV files, JSON files and request bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "super::parser::ListingRow")]
pub struct Listing {
    pub property_type: String,
    pub room_type: String,
    pub min_stay: u32,
    pub calculated_host_listings_count: u32,
    pub host_location: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Precomputed verdict shipped with some snapshots. `None` means the
    /// verdict is derived from the classification rules.
    pub illegal: Option<bool>,
}

/// A listing snapshot loaded once and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDataset {
    listings: Vec<Listing>,
}

impl ListingDataset {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

impl From<Vec<Listing>> for ListingDataset {
    fn from(listings: Vec<Listing>) -> Self {
        Self::new(listings)
    }
}
