//! Guided reveal of the legality funnel.
//!
//! The diagram is shown one stage at a time, each with two lines of
//! explanation. [`StoryPlayer`] owns the step counter and answers the Next,
//! Skip and Restart controls with a [`StoryFrame`] describing what is visible.

mod player;
mod text;

pub use player::StoryPlayer;
pub use text::{format_count, format_percent, Narration};

use crate::flow::LinkRef;
use crate::legality::Category;
use serde::Serialize;

/// Fade-out and reveal duration of every transition.
pub const FADE_MS: u64 = 1400;
/// Delay before newly revealed elements and the new text are swapped in.
pub const TEXT_SWAP_DELAY_MS: u64 = 1400;
/// Delay before the explanation fades back in.
pub const TEXT_FADE_IN_DELAY_MS: u64 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStep {
    Intro,
    Totals,
    ShortStays,
    HostPresence,
    FullHome,
    MultipleListings,
    HostAway,
    RemainingShortStays,
    Verdict,
    Final,
}

impl StoryStep {
    pub const LAST_NUMBERED: u32 = 8;

    pub const fn ordered() -> [Self; 8] {
        [
            Self::Totals,
            Self::ShortStays,
            Self::HostPresence,
            Self::FullHome,
            Self::MultipleListings,
            Self::HostAway,
            Self::RemainingShortStays,
            Self::Verdict,
        ]
    }

    /// 0 is the intro, 1 through 8 the numbered steps, anything later the
    /// final frame.
    pub const fn from_index(index: u32) -> Self {
        match index {
            0 => Self::Intro,
            1 => Self::Totals,
            2 => Self::ShortStays,
            3 => Self::HostPresence,
            4 => Self::FullHome,
            5 => Self::MultipleListings,
            6 => Self::HostAway,
            7 => Self::RemainingShortStays,
            8 => Self::Verdict,
            _ => Self::Final,
        }
    }

    pub const fn index(self) -> u32 {
        match self {
            Self::Intro => 0,
            Self::Totals => 1,
            Self::ShortStays => 2,
            Self::HostPresence => 3,
            Self::FullHome => 4,
            Self::MultipleListings => 5,
            Self::HostAway => 6,
            Self::RemainingShortStays => 7,
            Self::Verdict => 8,
            Self::Final => Self::LAST_NUMBERED + 1,
        }
    }

    /// Elements this step adds to what earlier steps revealed. The verdict
    /// and final frames reveal the whole diagram.
    const fn reveals(self) -> Reveal {
        use Category::*;
        match self {
            Self::Intro | Self::HostPresence => Reveal::NONE,
            Self::Totals => Reveal {
                nodes: &[All, Apartment, Legal],
                links: &[
                    LinkRef {
                        source: All,
                        target: Apartment,
                    },
                    LinkRef {
                        source: All,
                        target: Legal,
                    },
                ],
                everything: false,
            },
            Self::ShortStays => Reveal {
                nodes: &[ShortTerm],
                links: &[
                    LinkRef {
                        source: Apartment,
                        target: ShortTerm,
                    },
                    LinkRef {
                        source: Apartment,
                        target: Legal,
                    },
                ],
                everything: false,
            },
            Self::FullHome => Reveal {
                nodes: &[FullApt],
                links: &[LinkRef {
                    source: ShortTerm,
                    target: FullApt,
                }],
                everything: false,
            },
            Self::MultipleListings => Reveal {
                nodes: &[HostMult],
                links: &[LinkRef {
                    source: ShortTerm,
                    target: HostMult,
                }],
                everything: false,
            },
            Self::HostAway => Reveal {
                nodes: &[HostAway],
                links: &[LinkRef {
                    source: ShortTerm,
                    target: HostAway,
                }],
                everything: false,
            },
            Self::RemainingShortStays => Reveal {
                nodes: &[],
                links: &[LinkRef {
                    source: ShortTerm,
                    target: Legal,
                }],
                everything: false,
            },
            Self::Verdict | Self::Final => Reveal {
                nodes: &[],
                links: &[],
                everything: true,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Reveal {
    nodes: &'static [Category],
    links: &'static [LinkRef],
    everything: bool,
}

impl Reveal {
    const NONE: Self = Self {
        nodes: &[],
        links: &[],
        everything: false,
    };
}

/// Timing of the transition into a frame, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub fade_ms: u64,
    pub reveal_delay_ms: u64,
    pub text_swap_delay_ms: u64,
    pub text_fade_in_delay_ms: u64,
}

impl Transition {
    /// Numbered steps hide the text, reveal the new stage, then bring the
    /// text back.
    pub const STEP: Self = Self {
        fade_ms: FADE_MS,
        reveal_delay_ms: TEXT_SWAP_DELAY_MS,
        text_swap_delay_ms: TEXT_SWAP_DELAY_MS,
        text_fade_in_delay_ms: TEXT_FADE_IN_DELAY_MS,
    };

    /// Whole-diagram reveals start immediately.
    pub const IMMEDIATE: Self = Self {
        fade_ms: FADE_MS,
        reveal_delay_ms: 0,
        text_swap_delay_ms: TEXT_SWAP_DELAY_MS,
        text_fade_in_delay_ms: TEXT_FADE_IN_DELAY_MS,
    };

    /// Restart hides everything and fades the intro text straight back in.
    pub const RESET: Self = Self {
        fade_ms: FADE_MS,
        reveal_delay_ms: 0,
        text_swap_delay_ms: TEXT_SWAP_DELAY_MS,
        text_fade_in_delay_ms: TEXT_SWAP_DELAY_MS,
    };
}

/// Everything a renderer needs to draw one state of the guided reveal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryFrame {
    pub step: StoryStep,
    pub step_index: u32,
    pub visible_nodes: Vec<&'static str>,
    pub visible_links: Vec<String>,
    pub visible_legend: Vec<&'static str>,
    pub show_labels: bool,
    pub show_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<Narration>,
    pub next_label: &'static str,
    pub controls_visible: bool,
    pub transition: Transition,
}
