use crate::legality::Category;
use serde::Serialize;

/// Identifies a link by its endpoints. Each (source, target) pair appears at
/// most once in a topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LinkRef {
    pub source: Category,
    pub target: Category,
}

impl LinkRef {
    pub const fn new(source: Category, target: Category) -> Self {
        Self { source, target }
    }
}

/// Where one end of a link attaches to its node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "after")]
pub enum Anchor {
    /// Flush with the top edge of the node.
    Top,
    /// Flush with the bottom edge of the node.
    Bottom,
    /// Centred on the node.
    Center,
    /// Directly below the same end of an earlier link.
    ChainedAfter(LinkRef),
}

/// How a node's top edge is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum VerticalPlacement {
    /// Fixed fraction of the canvas height.
    FractionOfHeight(f64),
    Top,
    /// Bottom edge sits on the bottom of the canvas.
    BottomAnchored,
    /// Member of the evenly padded stack, in declaration order.
    Stacked,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeSpec {
    pub category: Category,
    pub placement: VerticalPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkSpec {
    pub source: Category,
    pub target: Category,
    pub start: Anchor,
    pub end: Anchor,
}

impl LinkSpec {
    pub const fn link_ref(&self) -> LinkRef {
        LinkRef::new(self.source, self.target)
    }
}

/// Band the stacked nodes share, as a fraction of the canvas height, and the
/// offset of the whole stack from the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StackSpec {
    pub band_fraction: f64,
    pub offset: f64,
}

impl Default for StackSpec {
    fn default() -> Self {
        Self {
            band_fraction: 0.45,
            offset: 15.0,
        }
    }
}

/// Hand-specified nodes and links of a flow diagram. Links are laid out in
/// declaration order, which chained anchors depend on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowTopology {
    nodes: Vec<NodeSpec>,
    links: Vec<LinkSpec>,
    stack: StackSpec,
}

impl FlowTopology {
    pub fn new(nodes: Vec<NodeSpec>, links: Vec<LinkSpec>, stack: StackSpec) -> Self {
        Self {
            nodes,
            links,
            stack,
        }
    }

    /// The legality funnel. Illegal links are declared before legal ones so
    /// the reason ribbons stack from the top of the verdict column.
    pub fn standard() -> Self {
        use Anchor::{Bottom, Center, ChainedAfter, Top};
        use Category::*;

        let node = |category, placement| NodeSpec {
            category,
            placement,
        };
        let link = |source, target, start, end| LinkSpec {
            source,
            target,
            start,
            end,
        };

        let nodes = vec![
            node(All, VerticalPlacement::FractionOfHeight(1.0 / 3.5)),
            node(Apartment, VerticalPlacement::FractionOfHeight(1.0 / 5.0)),
            node(ShortTerm, VerticalPlacement::FractionOfHeight(1.0 / 9.0)),
            node(FullApt, VerticalPlacement::Stacked),
            node(HostMult, VerticalPlacement::Stacked),
            node(HostAway, VerticalPlacement::Stacked),
            node(Illegal, VerticalPlacement::Top),
            node(Legal, VerticalPlacement::BottomAnchored),
        ];

        let links = vec![
            link(All, Apartment, Top, Center),
            link(Apartment, ShortTerm, Top, Center),
            link(ShortTerm, FullApt, Top, Center),
            link(
                ShortTerm,
                HostMult,
                ChainedAfter(LinkRef::new(ShortTerm, FullApt)),
                Center,
            ),
            link(
                ShortTerm,
                HostAway,
                ChainedAfter(LinkRef::new(ShortTerm, HostMult)),
                Center,
            ),
            link(FullApt, Illegal, Center, Top),
            link(
                HostMult,
                Illegal,
                Center,
                ChainedAfter(LinkRef::new(FullApt, Illegal)),
            ),
            link(HostAway, Illegal, Center, Bottom),
            link(All, Legal, Bottom, Bottom),
            link(ShortTerm, Legal, Bottom, Top),
            link(
                Apartment,
                Legal,
                Bottom,
                ChainedAfter(LinkRef::new(ShortTerm, Legal)),
            ),
        ];

        Self::new(nodes, links, StackSpec::default())
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn links(&self) -> &[LinkSpec] {
        &self.links
    }

    pub fn stack(&self) -> StackSpec {
        self.stack
    }
}

impl Default for FlowTopology {
    fn default() -> Self {
        Self::standard()
    }
}
