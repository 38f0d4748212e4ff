//! Sankey layout for the legality funnel.

mod layout;
mod scale;
mod topology;
mod views;

pub use layout::{FlowLayoutEngine, LayoutError};
pub use scale::LinearScale;
pub use topology::{Anchor, FlowTopology, LinkRef, LinkSpec, NodeSpec, StackSpec, VerticalPlacement};
pub use views::{FlowCanvas, FlowDiagram, FlowLink, FlowNode, LegendEntry};

use crate::legality::CategoryCounts;

/// Lays out the standard legality funnel on `canvas`.
pub fn standard_diagram(
    counts: &CategoryCounts,
    canvas: FlowCanvas,
) -> Result<FlowDiagram, LayoutError> {
    FlowLayoutEngine::standard(canvas).layout(counts)
}
