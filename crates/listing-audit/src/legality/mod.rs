mod domain;
pub mod rules;
pub mod views;

pub use domain::{Category, CategoryCounts};
pub use rules::ListingFlags;
pub use views::{CategoryEntry, ClassificationSummary, ReasonEntry};

use crate::listings::Listing;
use tracing::debug;

/// Members of every category for one dataset, borrowed from the listings.
#[derive(Debug, Clone)]
pub struct Classification<'a> {
    all: Vec<&'a Listing>,
    apartments: Vec<&'a Listing>,
    short_term: Vec<&'a Listing>,
    full_apt: Vec<&'a Listing>,
    host_mult: Vec<&'a Listing>,
    host_away: Vec<&'a Listing>,
    illegal: Vec<&'a Listing>,
    legal: Vec<&'a Listing>,
}

/// Partitions listings into the legality funnel.
///
/// Each stage filters the output of the previous one: apartments, then
/// short-term apartments, then the three host-presence tests. The reason
/// buckets apply the tests in priority order so a listing lands in at most one
/// of them, and `illegal` is exactly their union.
pub fn classify(listings: &[Listing]) -> Classification<'_> {
    let all: Vec<&Listing> = listings.iter().collect();

    let apartments: Vec<&Listing> = all
        .iter()
        .copied()
        .filter(|listing| rules::is_apartment(listing))
        .collect();

    let short_term: Vec<&Listing> = apartments
        .iter()
        .copied()
        .filter(|listing| rules::is_short_term(listing))
        .collect();

    let mut full_apt = Vec::new();
    let mut host_mult = Vec::new();
    let mut host_away = Vec::new();
    let mut illegal = Vec::new();

    for listing in &short_term {
        let flags = ListingFlags::evaluate(listing);
        match flags.reason() {
            Some(Category::FullApt) => full_apt.push(*listing),
            Some(Category::HostMult) => host_mult.push(*listing),
            Some(Category::HostAway) => host_away.push(*listing),
            _ => {}
        }
        if flags.any() {
            illegal.push(*listing);
        }
    }

    let legal: Vec<&Listing> = all
        .iter()
        .copied()
        .filter(|listing| rules::illegal_reason(listing).is_none())
        .collect();

    let classification = Classification {
        all,
        apartments,
        short_term,
        full_apt,
        host_mult,
        host_away,
        illegal,
        legal,
    };

    debug!(counts = ?classification.counts(), "listings classified");
    classification
}

impl<'a> Classification<'a> {
    pub fn members(&self, category: Category) -> &[&'a Listing] {
        match category {
            Category::All => &self.all,
            Category::Apartment => &self.apartments,
            Category::ShortTerm => &self.short_term,
            Category::FullApt => &self.full_apt,
            Category::HostMult => &self.host_mult,
            Category::HostAway => &self.host_away,
            Category::Illegal => &self.illegal,
            Category::Legal => &self.legal,
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            all: self.all.len(),
            apartment: self.apartments.len(),
            short_term: self.short_term.len(),
            full_apt: self.full_apt.len(),
            host_mult: self.host_mult.len(),
            host_away: self.host_away.len(),
            illegal: self.illegal.len(),
            legal: self.all.len() - self.illegal.len(),
        }
    }
}
