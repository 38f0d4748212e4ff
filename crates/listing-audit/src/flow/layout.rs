use super::scale::LinearScale;
use super::topology::{Anchor, FlowTopology, LinkRef, LinkSpec, NodeSpec, VerticalPlacement};
use super::views::{FlowCanvas, FlowDiagram, FlowLink, FlowNode, LegendEntry};
use crate::legality::{Category, CategoryCounts};
use std::collections::HashSet;
use tracing::debug;

/// Tallest bar as a fraction of the canvas height.
const MAX_BAR_FRACTION: f64 = 0.6;

/// Topology or canvas mistakes. These are programming errors and are never
/// caused by the listing data itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("node {0:?} is declared more than once")]
    DuplicateNode(Category),
    #[error("link {}-{} is declared more than once", .0.source.id(), .0.target.id())]
    DuplicateLink(LinkRef),
    #[error("link {}-{} references undeclared node {node:?}", .link.source.id(), .link.target.id())]
    UnknownNode { link: LinkRef, node: Category },
    #[error(
        "link {}-{} is chained after {}-{}, which is not declared before it",
        .link.source.id(),
        .link.target.id(),
        .reference.source.id(),
        .reference.target.id()
    )]
    UnresolvedLink { link: LinkRef, reference: LinkRef },
    #[error("canvas {width}x{height} cannot hold bars {bar_width} wide")]
    InvalidCanvas {
        width: f64,
        height: f64,
        bar_width: f64,
    },
}

#[derive(Debug, Clone, Copy)]
enum LinkEnd {
    Start,
    End,
}

/// Single-pass layout of a fixed topology. Positions come from the anchor and
/// placement rules declared per node and link; nothing is iterated or relaxed.
#[derive(Debug, Clone)]
pub struct FlowLayoutEngine {
    topology: FlowTopology,
    canvas: FlowCanvas,
}

impl FlowLayoutEngine {
    pub fn new(topology: FlowTopology, canvas: FlowCanvas) -> Self {
        Self { topology, canvas }
    }

    pub fn standard(canvas: FlowCanvas) -> Self {
        Self::new(FlowTopology::standard(), canvas)
    }

    pub fn canvas(&self) -> FlowCanvas {
        self.canvas
    }

    pub fn topology(&self) -> &FlowTopology {
        &self.topology
    }

    pub fn layout(&self, counts: &CategoryCounts) -> Result<FlowDiagram, LayoutError> {
        self.validate()?;

        let canvas = self.canvas;
        let specs = self.topology.nodes();

        let (min_level, max_level) = specs
            .iter()
            .map(|spec| spec.category.level())
            .fold(None, |acc: Option<(u8, u8)>, level| match acc {
                Some((lo, hi)) => Some((lo.min(level), hi.max(level))),
                None => Some((level, level)),
            })
            .unwrap_or((0, 0));
        let x_scale = LinearScale::new(
            (f64::from(min_level), f64::from(max_level)),
            (0.0, canvas.width - canvas.bar_width),
        );

        let max_count = specs
            .iter()
            .map(|spec| counts.get(spec.category))
            .max()
            .unwrap_or(0);
        let height_scale = LinearScale::new(
            (0.0, max_count as f64),
            (0.0, MAX_BAR_FRACTION * canvas.height),
        );

        let heights: Vec<f64> = specs
            .iter()
            .map(|spec| height_scale.apply(counts.get(spec.category) as f64))
            .collect();
        let starts = self.vertical_starts(specs, &heights);

        let nodes: Vec<FlowNode> = specs
            .iter()
            .zip(heights.iter().zip(starts))
            .map(|(spec, (&height, vertical_start))| {
                let count = counts.get(spec.category);
                let x_start = x_scale.apply(f64::from(spec.category.level()));
                FlowNode {
                    id: spec.category.id(),
                    category: spec.category,
                    level: spec.category.level(),
                    count,
                    x_start,
                    x_end: x_start + canvas.bar_width,
                    vertical_start,
                    height,
                    description: spec.category.description(),
                    caption: spec.category.caption(),
                    label: format!("{} {}", count, spec.category.description()),
                }
            })
            .collect();

        let mut links: Vec<FlowLink> = Vec::with_capacity(self.topology.links().len());
        for spec in self.topology.links() {
            let link = route_link(spec, &nodes, &links, counts, &height_scale)?;
            links.push(link);
        }

        let legend = nodes
            .iter()
            .filter_map(|node| {
                let code = node.category.legend_code()?;
                let label = node.category.legend_label()?;
                Some(LegendEntry {
                    id: node.id,
                    code,
                    label,
                    count: node.count,
                })
            })
            .collect();

        debug!(
            nodes = nodes.len(),
            links = links.len(),
            max_count,
            "flow diagram laid out"
        );

        Ok(FlowDiagram {
            canvas,
            nodes,
            links,
            legend,
        })
    }

    fn validate(&self) -> Result<(), LayoutError> {
        let canvas = self.canvas;
        let dimensions_valid = [canvas.width, canvas.height, canvas.bar_width]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0);
        if !dimensions_valid || canvas.bar_width > canvas.width {
            return Err(LayoutError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
                bar_width: canvas.bar_width,
            });
        }

        let mut declared = HashSet::new();
        for spec in self.topology.nodes() {
            if !declared.insert(spec.category) {
                return Err(LayoutError::DuplicateNode(spec.category));
            }
        }

        let mut seen_links: HashSet<LinkRef> = HashSet::new();
        for spec in self.topology.links() {
            let link = spec.link_ref();
            for node in [spec.source, spec.target] {
                if !declared.contains(&node) {
                    return Err(LayoutError::UnknownNode { link, node });
                }
            }

            for anchor in [spec.start, spec.end] {
                if let Anchor::ChainedAfter(reference) = anchor {
                    if !seen_links.contains(&reference) {
                        return Err(LayoutError::UnresolvedLink { link, reference });
                    }
                }
            }

            if !seen_links.insert(link) {
                return Err(LayoutError::DuplicateLink(link));
            }
        }

        Ok(())
    }

    fn vertical_starts(&self, specs: &[NodeSpec], heights: &[f64]) -> Vec<f64> {
        let canvas_height = self.canvas.height;
        let stack = self.topology.stack();

        let stacked: Vec<usize> = specs
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.placement == VerticalPlacement::Stacked)
            .map(|(index, _)| index)
            .collect();
        let stacked_height: f64 = stacked.iter().map(|&index| heights[index]).sum();
        let gaps = stacked.len().saturating_sub(1).max(1) as f64;
        // Negative when the stacked bars outgrow the band; they then overlap.
        let padding = (canvas_height * stack.band_fraction - stacked_height) / gaps;

        let mut stack_cursor = stack.offset;
        specs
            .iter()
            .zip(heights)
            .map(|(spec, &height)| match spec.placement {
                VerticalPlacement::FractionOfHeight(fraction) => canvas_height * fraction,
                VerticalPlacement::Top => 0.0,
                VerticalPlacement::BottomAnchored => canvas_height - height,
                VerticalPlacement::Stacked => {
                    let start = stack_cursor;
                    stack_cursor += height + padding;
                    start
                }
            })
            .collect()
    }
}

fn route_link(
    spec: &LinkSpec,
    nodes: &[FlowNode],
    placed: &[FlowLink],
    counts: &CategoryCounts,
    height_scale: &LinearScale,
) -> Result<FlowLink, LayoutError> {
    let link = spec.link_ref();
    let lookup = |category: Category| {
        nodes
            .iter()
            .find(|node| node.category == category)
            .ok_or(LayoutError::UnknownNode {
                link,
                node: category,
            })
    };
    let source = lookup(spec.source)?;
    let target = lookup(spec.target)?;

    let value = counts.flow(spec.source, spec.target);
    let thickness = height_scale.apply(value as f64);

    let vertical_start = resolve_anchor(spec.start, LinkEnd::Start, source, thickness, link, placed)?;
    let vertical_end = resolve_anchor(spec.end, LinkEnd::End, target, thickness, link, placed)?;

    Ok(FlowLink {
        id: format!("{}-{}", source.id, target.id),
        source_id: source.id,
        target_id: target.id,
        source: spec.source,
        target: spec.target,
        value,
        x_start: source.x_end,
        x_end: target.x_start,
        vertical_start,
        vertical_end,
        thickness,
    })
}

fn resolve_anchor(
    anchor: Anchor,
    end: LinkEnd,
    node: &FlowNode,
    thickness: f64,
    link: LinkRef,
    placed: &[FlowLink],
) -> Result<f64, LayoutError> {
    let half = thickness / 2.0;
    match anchor {
        Anchor::Top => Ok(node.vertical_start + half),
        Anchor::Bottom => Ok(node.vertical_end() - half),
        Anchor::Center => Ok(node.center()),
        Anchor::ChainedAfter(reference) => {
            let previous = placed
                .iter()
                .find(|candidate| {
                    candidate.source == reference.source && candidate.target == reference.target
                })
                .ok_or(LayoutError::UnresolvedLink { link, reference })?;
            let previous_edge = match end {
                LinkEnd::Start => previous.vertical_start,
                LinkEnd::End => previous.vertical_end,
            };
            Ok(previous_edge + previous.thickness / 2.0 + half)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::topology::StackSpec;

    fn canvas() -> FlowCanvas {
        FlowCanvas::new(440.0, 200.0, 40.0)
    }

    fn counts() -> CategoryCounts {
        CategoryCounts {
            all: 100,
            apartment: 60,
            short_term: 40,
            full_apt: 10,
            host_mult: 5,
            host_away: 3,
            illegal: 18,
            legal: 82,
        }
    }

    #[test]
    fn stacked_nodes_share_the_band_with_even_padding() {
        let diagram = FlowLayoutEngine::standard(canvas())
            .layout(&counts())
            .expect("layout succeeds");

        // 0.6 * 200 px spread over 100 listings.
        let full = diagram.node(Category::FullApt).expect("full-apt node");
        let mult = diagram.node(Category::HostMult).expect("host-mult node");
        let away = diagram.node(Category::HostAway).expect("host-away node");
        assert!((full.height - 12.0).abs() < 1e-9);
        assert!((mult.height - 6.0).abs() < 1e-9);
        assert!((away.height - 3.6).abs() < 1e-9);

        let padding = (200.0 * 0.45 - (12.0 + 6.0 + 3.6)) / 2.0;
        assert!((full.vertical_start - 15.0).abs() < 1e-9);
        assert!((mult.vertical_start - (12.0 + padding + 15.0)).abs() < 1e-9);
        assert!((away.vertical_start - (12.0 + 6.0 + 2.0 * padding + 15.0)).abs() < 1e-9);
    }

    #[test]
    fn oversized_stack_keeps_negative_padding() {
        let counts = CategoryCounts {
            all: 100,
            apartment: 90,
            short_term: 90,
            full_apt: 30,
            host_mult: 30,
            host_away: 30,
            illegal: 90,
            legal: 10,
        };
        let diagram = FlowLayoutEngine::standard(canvas())
            .layout(&counts)
            .expect("layout succeeds");

        // Each reason bar is 36 px against a 90 px band: padding is -9.
        let mult = diagram.node(Category::HostMult).expect("host-mult node");
        let away = diagram.node(Category::HostAway).expect("host-away node");
        assert!((mult.vertical_start - 42.0).abs() < 1e-9);
        assert!((away.vertical_start - 69.0).abs() < 1e-9);
    }

    #[test]
    fn fixed_placements_follow_canvas_height() {
        let diagram = FlowLayoutEngine::standard(canvas())
            .layout(&counts())
            .expect("layout succeeds");

        let all = diagram.node(Category::All).expect("all node");
        assert!((all.vertical_start - 200.0 / 3.5).abs() < 1e-9);
        assert!((all.height - 120.0).abs() < 1e-9);

        let illegal = diagram.node(Category::Illegal).expect("illegal node");
        assert_eq!(illegal.vertical_start, 0.0);

        let legal = diagram.node(Category::Legal).expect("legal node");
        assert!((legal.vertical_end() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn x_positions_span_levels_across_the_canvas() {
        let diagram = FlowLayoutEngine::standard(canvas())
            .layout(&counts())
            .expect("layout succeeds");

        let all = diagram.node(Category::All).expect("all node");
        let legal = diagram.node(Category::Legal).expect("legal node");
        let short = diagram.node(Category::ShortTerm).expect("short node");
        assert_eq!(all.x_start, 0.0);
        assert_eq!(legal.x_start, 400.0);
        assert_eq!(legal.x_end, 440.0);
        assert_eq!(short.x_start, 200.0);

        let link = diagram
            .link(Category::All, Category::Apartment)
            .expect("all-apts link");
        assert_eq!(link.x_start, all.x_end);
        assert_eq!(link.x_end, 100.0);
    }

    #[test]
    fn chained_link_reports_unresolved_reference() {
        let topology = FlowTopology::new(
            vec![
                NodeSpec {
                    category: Category::All,
                    placement: VerticalPlacement::Top,
                },
                NodeSpec {
                    category: Category::Legal,
                    placement: VerticalPlacement::BottomAnchored,
                },
            ],
            vec![LinkSpec {
                source: Category::All,
                target: Category::Legal,
                start: Anchor::ChainedAfter(LinkRef::new(Category::All, Category::Apartment)),
                end: Anchor::Top,
            }],
            StackSpec::default(),
        );

        let error = FlowLayoutEngine::new(topology, canvas())
            .layout(&counts())
            .expect_err("unresolved chain rejected");
        assert!(matches!(error, LayoutError::UnresolvedLink { .. }));
    }

    #[test]
    fn undeclared_nodes_are_rejected() {
        let topology = FlowTopology::new(
            vec![NodeSpec {
                category: Category::All,
                placement: VerticalPlacement::Top,
            }],
            vec![LinkSpec {
                source: Category::All,
                target: Category::Apartment,
                start: Anchor::Top,
                end: Anchor::Center,
            }],
            StackSpec::default(),
        );

        let error = FlowLayoutEngine::new(topology, canvas())
            .layout(&counts())
            .expect_err("unknown node rejected");
        assert_eq!(
            error,
            LayoutError::UnknownNode {
                link: LinkRef::new(Category::All, Category::Apartment),
                node: Category::Apartment,
            }
        );
    }

    #[test]
    fn bars_wider_than_canvas_are_rejected() {
        let error = FlowLayoutEngine::standard(FlowCanvas::new(30.0, 200.0, 40.0))
            .layout(&counts())
            .expect_err("canvas rejected");
        assert!(matches!(error, LayoutError::InvalidCanvas { .. }));
    }
}
