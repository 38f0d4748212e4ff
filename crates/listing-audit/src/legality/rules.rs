use super::domain::Category;
use crate::listings::{Listing, APARTMENT, ENTIRE_HOME, SHORT_TERM_NIGHTS};

pub fn is_apartment(listing: &Listing) -> bool {
    listing.property_type == APARTMENT
}

pub fn is_short_term(listing: &Listing) -> bool {
    listing.min_stay < SHORT_TERM_NIGHTS
}

/// Renting the whole unit means the host is not on the premises.
pub fn is_entire_apt(listing: &Listing) -> bool {
    listing.room_type == ENTIRE_HOME
}

/// A host cannot live in more than one of their listings.
pub fn host_has_multiple(listing: &Listing) -> bool {
    listing.calculated_host_listings_count > 1
}

/// A host based outside New York is not living at the listing. A missing
/// location gets the benefit of the doubt and never counts as away.
pub fn is_host_away(listing: &Listing) -> bool {
    match listing.host_location.as_deref() {
        Some(location) => {
            !location.contains("New York") && !location.contains("NY") && location != "US"
        }
        None => false,
    }
}

/// The three host-presence tests evaluated once per listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFlags {
    pub entire_apt: bool,
    pub host_multiple: bool,
    pub host_away: bool,
}

impl ListingFlags {
    pub fn evaluate(listing: &Listing) -> Self {
        Self {
            entire_apt: is_entire_apt(listing),
            host_multiple: host_has_multiple(listing),
            host_away: is_host_away(listing),
        }
    }

    pub const fn any(&self) -> bool {
        self.entire_apt || self.host_multiple || self.host_away
    }

    /// First matching reason in priority order full-apt > host-mult > host-away.
    pub const fn reason(&self) -> Option<Category> {
        if self.entire_apt {
            Some(Category::FullApt)
        } else if self.host_multiple {
            Some(Category::HostMult)
        } else if self.host_away {
            Some(Category::HostAway)
        } else {
            None
        }
    }
}

/// Reason a listing is illegal, or `None` when it is legal. Only short-term
/// apartments are ever illegal.
pub fn illegal_reason(listing: &Listing) -> Option<Category> {
    if is_apartment(listing) && is_short_term(listing) {
        ListingFlags::evaluate(listing).reason()
    } else {
        None
    }
}

/// Verdict for a single listing, preferring the one shipped with the snapshot.
pub fn is_illegal(listing: &Listing) -> bool {
    listing
        .illegal
        .unwrap_or_else(|| illegal_reason(listing).is_some())
}
