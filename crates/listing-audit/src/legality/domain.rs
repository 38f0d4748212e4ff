use serde::{Deserialize, Serialize};

/// Stages of the legality funnel. The three reason categories partition the
/// illegal short-term apartments; everything else is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    All,
    Apartment,
    ShortTerm,
    FullApt,
    HostMult,
    HostAway,
    Illegal,
    Legal,
}

impl Category {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::All,
            Self::Apartment,
            Self::ShortTerm,
            Self::FullApt,
            Self::HostMult,
            Self::HostAway,
            Self::Illegal,
            Self::Legal,
        ]
    }

    /// Reason categories in priority order.
    pub const fn illegal_reasons() -> [Self; 3] {
        [Self::FullApt, Self::HostMult, Self::HostAway]
    }

    /// Stable identifier used for node ids, link ids and CSS classes.
    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Apartment => "apts",
            Self::ShortTerm => "short",
            Self::FullApt => "full-apt",
            Self::HostMult => "host-mult",
            Self::HostAway => "host-away",
            Self::Illegal => "illegal",
            Self::Legal => "legal",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.id() == id)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::All => "total listings",
            Self::Apartment => "apartments",
            Self::ShortTerm => "short-term listings",
            Self::FullApt => "full-home rentals",
            Self::HostMult => "cases where host has multiple listings",
            Self::HostAway => "listings with host not in NYC",
            Self::Illegal => "illegal listings",
            Self::Legal => "legal listings",
        }
    }

    /// Short caption drawn beside the sankey bar. Reason nodes are too thin
    /// for prose and carry their legend code instead.
    pub const fn caption(self) -> &'static str {
        match self {
            Self::All => "total listings",
            Self::Apartment => "apartments",
            Self::ShortTerm => "short-term listings",
            Self::FullApt => "A",
            Self::HostMult => "B",
            Self::HostAway => "C",
            Self::Illegal => "illegal",
            Self::Legal => "legal",
        }
    }

    /// Column of the sankey diagram, 1 (all listings) through 5 (verdict).
    pub const fn level(self) -> u8 {
        match self {
            Self::All => 1,
            Self::Apartment => 2,
            Self::ShortTerm => 3,
            Self::FullApt | Self::HostMult | Self::HostAway => 4,
            Self::Illegal | Self::Legal => 5,
        }
    }

    pub const fn legend_code(self) -> Option<&'static str> {
        match self {
            Self::FullApt => Some("A"),
            Self::HostMult => Some("B"),
            Self::HostAway => Some("C"),
            _ => None,
        }
    }

    pub const fn legend_label(self) -> Option<&'static str> {
        match self {
            Self::FullApt => Some("full home rentals"),
            Self::HostMult => Some("host has multiple listings"),
            Self::HostAway => Some("host not in NYC"),
            _ => None,
        }
    }
}

/// Per-category totals for one dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub all: usize,
    pub apartment: usize,
    pub short_term: usize,
    pub full_apt: usize,
    pub host_mult: usize,
    pub host_away: usize,
    pub illegal: usize,
    pub legal: usize,
}

impl CategoryCounts {
    pub const fn get(&self, category: Category) -> usize {
        match category {
            Category::All => self.all,
            Category::Apartment => self.apartment,
            Category::ShortTerm => self.short_term,
            Category::FullApt => self.full_apt,
            Category::HostMult => self.host_mult,
            Category::HostAway => self.host_away,
            Category::Illegal => self.illegal,
            Category::Legal => self.legal,
        }
    }

    /// Largest count across every category; zero for an empty dataset.
    pub fn max(&self) -> usize {
        Category::ordered()
            .into_iter()
            .map(|category| self.get(category))
            .max()
            .unwrap_or(0)
    }

    /// Fraction of all listings that are illegal, 0.0 when there are none.
    pub fn illegal_share(&self) -> f64 {
        if self.all == 0 {
            0.0
        } else {
            self.illegal as f64 / self.all as f64
        }
    }

    /// Listings that leave the funnel straight to `Legal` at each stage:
    /// non-apartments, long stays, and short-term apartments with a present host.
    pub const fn legal_non_apartments(&self) -> usize {
        self.all.saturating_sub(self.apartment)
    }

    pub const fn legal_long_stays(&self) -> usize {
        self.apartment.saturating_sub(self.short_term)
    }

    pub const fn legal_short_stays(&self) -> usize {
        self.short_term.saturating_sub(self.illegal)
    }

    /// Number of listings travelling from `source` to `target` in the funnel.
    ///
    /// Flows into `Legal` are what each stage lets through; flows into
    /// `Illegal` are the whole reason bucket; every other flow carries the
    /// target's members. Pairs that cannot occur in the funnel carry nothing.
    pub const fn flow(&self, source: Category, target: Category) -> usize {
        match (source, target) {
            (Category::All, Category::Legal) => self.legal_non_apartments(),
            (Category::Apartment, Category::Legal) => self.legal_long_stays(),
            (Category::ShortTerm, Category::Legal) => self.legal_short_stays(),
            (Category::FullApt | Category::HostMult | Category::HostAway, Category::Illegal) => {
                self.get(source)
            }
            (Category::All, Category::Apartment)
            | (Category::Apartment, Category::ShortTerm)
            | (Category::ShortTerm, Category::FullApt)
            | (Category::ShortTerm, Category::HostMult)
            | (Category::ShortTerm, Category::HostAway)
            | (Category::ShortTerm, Category::Illegal) => self.get(target),
            _ => 0,
        }
    }
}
