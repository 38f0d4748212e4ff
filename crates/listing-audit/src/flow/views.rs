use crate::legality::Category;
use serde::Serialize;

/// Pixel area the diagram is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowCanvas {
    pub width: f64,
    pub height: f64,
    pub bar_width: f64,
}

impl FlowCanvas {
    pub const fn new(width: f64, height: f64, bar_width: f64) -> Self {
        Self {
            width,
            height,
            bar_width,
        }
    }
}

/// A positioned bar of the sankey diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub id: &'static str,
    pub category: Category,
    pub level: u8,
    pub count: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub vertical_start: f64,
    pub height: f64,
    pub description: &'static str,
    pub caption: &'static str,
    pub label: String,
}

impl FlowNode {
    pub fn vertical_end(&self) -> f64 {
        self.vertical_start + self.height
    }

    pub fn center(&self) -> f64 {
        self.vertical_start + self.height / 2.0
    }
}

/// A positioned ribbon between two bars. Vertical positions are the ribbon's
/// centre line at each end; `thickness` is its stroke width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub id: String,
    pub source_id: &'static str,
    pub target_id: &'static str,
    pub source: Category,
    pub target: Category,
    pub value: usize,
    pub x_start: f64,
    pub x_end: f64,
    pub vertical_start: f64,
    pub vertical_end: f64,
    pub thickness: f64,
}

impl FlowLink {
    /// SVG path for the ribbon's centre line: a horizontal-tangent cubic
    /// curve between the two ends.
    pub fn path_data(&self) -> String {
        let mid = (self.x_start + self.x_end) / 2.0;
        format!(
            "M{},{}C{},{} {},{} {},{}",
            self.x_start,
            self.vertical_start,
            mid,
            self.vertical_start,
            mid,
            self.vertical_end,
            self.x_end,
            self.vertical_end
        )
    }
}

/// Key explaining the lettered reason bars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub id: &'static str,
    pub code: &'static str,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDiagram {
    pub canvas: FlowCanvas,
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
    pub legend: Vec<LegendEntry>,
}

impl FlowDiagram {
    pub fn node(&self, category: Category) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.category == category)
    }

    pub fn link(&self, source: Category, target: Category) -> Option<&FlowLink> {
        self.links
            .iter()
            .find(|link| link.source == source && link.target == target)
    }
}
