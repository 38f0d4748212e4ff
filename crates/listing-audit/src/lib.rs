//! Legality audit of short-term rental listings.
//!
//! A listing dataset is partitioned into legality categories by [`legality::classify`],
//! and the resulting counts are laid out as a five-level sankey diagram by
//! [`flow::FlowLayoutEngine`]. Rendering is left to whichever client consumes the
//! geometry; this crate only derives it.

pub mod config;
pub mod error;
pub mod flow;
pub mod legality;
pub mod listings;
pub mod map;
pub mod router;
pub mod story;
pub mod telemetry;
