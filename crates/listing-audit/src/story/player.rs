use super::text::{self, Narration};
use super::{StoryFrame, StoryStep, Transition};
use crate::flow::{FlowTopology, LinkRef};
use crate::legality::{Category, CategoryCounts};
use chrono::NaiveDate;
use tracing::debug;

/// Step counter behind the Next, Skip and Restart controls.
///
/// The counter starts at 1 and names the step the next press of Next will
/// render. Frames are cumulative: step `n` shows everything steps `1..=n`
/// revealed.
#[derive(Debug, Clone)]
pub struct StoryPlayer {
    counts: CategoryCounts,
    snapshot_date: NaiveDate,
    links: Vec<LinkRef>,
    counter: u32,
}

impl StoryPlayer {
    pub fn new(counts: CategoryCounts, snapshot_date: NaiveDate) -> Self {
        let links = FlowTopology::standard()
            .links()
            .iter()
            .map(|link| link.link_ref())
            .collect();

        Self {
            counts,
            snapshot_date,
            links,
            counter: 1,
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    /// Renders the step the counter points at and advances it. Once the
    /// numbered steps are exhausted every press renders the final frame.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> StoryFrame {
        let step = StoryStep::from_index(self.counter);
        self.counter = self.counter.saturating_add(1);
        debug!(step = ?step, counter = self.counter, "story advanced");
        self.frame(step)
    }

    /// Jumps to the final frame. The counter is left alone, so a later Next
    /// continues from where the reader was.
    pub fn skip(&self) -> StoryFrame {
        self.frame(StoryStep::Final)
    }

    pub fn restart(&mut self) -> StoryFrame {
        self.counter = 1;
        debug!("story restarted");
        self.frame(StoryStep::Intro)
    }

    /// Renders `step` without touching the counter.
    pub fn frame(&self, step: StoryStep) -> StoryFrame {
        let (nodes, links) = self.revealed_through(step);

        let visible_nodes: Vec<&'static str> = Category::ordered()
            .into_iter()
            .filter(|category| nodes.contains(category))
            .map(Category::id)
            .collect();
        let visible_legend = Category::ordered()
            .into_iter()
            .filter(|category| nodes.contains(category))
            .filter_map(Category::legend_code)
            .collect();
        let visible_links = self
            .links
            .iter()
            .filter(|link| links.contains(link))
            .map(|link| format!("{}-{}", link.source.id(), link.target.id()))
            .collect();

        let narration = self.narration(step);

        StoryFrame {
            step,
            step_index: step.index(),
            visible_nodes,
            visible_links,
            visible_legend,
            show_labels: step != StoryStep::Intro,
            show_text: narration.is_some(),
            narration,
            next_label: match step {
                StoryStep::Intro => "Start",
                StoryStep::Verdict | StoryStep::Final => "End",
                _ => "Next",
            },
            controls_visible: step != StoryStep::Final,
            transition: match step {
                StoryStep::Intro => Transition::RESET,
                StoryStep::Verdict | StoryStep::Final => Transition::IMMEDIATE,
                _ => Transition::STEP,
            },
        }
    }

    fn revealed_through(&self, step: StoryStep) -> (Vec<Category>, Vec<LinkRef>) {
        let mut nodes = Vec::new();
        let mut links = Vec::new();

        for earlier in StoryStep::ordered()
            .into_iter()
            .take(step.index() as usize)
        {
            let reveal = earlier.reveals();
            if reveal.everything {
                return (Category::ordered().to_vec(), self.links.clone());
            }
            nodes.extend_from_slice(reveal.nodes);
            links.extend_from_slice(reveal.links);
        }

        (nodes, links)
    }

    fn narration(&self, step: StoryStep) -> Option<Narration> {
        let counts = &self.counts;
        let narration = match step {
            StoryStep::Intro => text::intro(counts, self.snapshot_date),
            StoryStep::Totals => text::totals(counts),
            StoryStep::ShortStays => text::short_stays(counts),
            StoryStep::HostPresence => text::host_presence(),
            StoryStep::FullHome => text::full_home(counts),
            StoryStep::MultipleListings => text::multiple_listings(counts),
            StoryStep::HostAway => text::host_away(counts),
            StoryStep::RemainingShortStays => text::remaining_short_stays(counts),
            StoryStep::Verdict => text::verdict(counts),
            StoryStep::Final => return None,
        };
        Some(narration)
    }
}
