use crate::cli::ClassifyArgs;
use clap::Args;
use listing_audit::config::{AppConfig, ConfigError};
use listing_audit::error::AppError;
use listing_audit::flow::{standard_diagram, FlowCanvas};
use listing_audit::legality::{classify, Category, CategoryCounts};
use listing_audit::listings::{ListingDataset, ListingDatasetLoader};
use listing_audit::map::{MapColorRule, MapLayer};
use listing_audit::story::{format_count, StoryPlayer, StoryStep};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SankeyArgs {
    /// Listing snapshot (CSV or JSON). Falls back to APP_LISTINGS_PATH.
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
    /// Canvas width in pixels (defaults to APP_CANVAS_WIDTH)
    #[arg(long)]
    pub(crate) width: Option<f64>,
    /// Canvas height in pixels (defaults to APP_CANVAS_HEIGHT)
    #[arg(long)]
    pub(crate) height: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct StoryArgs {
    /// Listing snapshot (CSV or JSON). Falls back to APP_LISTINGS_PATH.
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
    /// Print one frame as JSON: 0 is the intro, 9 and above the final frame
    #[arg(long)]
    pub(crate) step: Option<u32>,
}

#[derive(Args, Debug)]
pub(crate) struct MapArgs {
    /// Listing snapshot (CSV or JSON). Falls back to APP_LISTINGS_PATH.
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
    /// Colour rule: none, legality or price
    #[arg(long, default_value = "none", value_parser = parse_color_rule)]
    pub(crate) color: MapColorRule,
}

fn parse_color_rule(raw: &str) -> Result<MapColorRule, String> {
    MapColorRule::from_name(raw)
        .ok_or_else(|| format!("unknown colour rule '{raw}' (expected none, legality or price)"))
}

fn load_dataset(config: &AppConfig, listings: Option<PathBuf>) -> Result<ListingDataset, AppError> {
    let path = listings
        .or_else(|| config.dataset.listings_path.clone())
        .ok_or(ConfigError::MissingListingsPath)?;
    Ok(ListingDatasetLoader::from_path(path)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(&config, args.listings)?;
    let counts = classify(dataset.listings()).counts();

    if args.json {
        return print_json(&counts.summary());
    }

    render_counts(&counts);
    Ok(())
}

fn render_counts(counts: &CategoryCounts) {
    let summary = counts.summary();
    println!("Listing legality summary");
    for entry in &summary.categories {
        println!(
            "- {:<40} {:>8} ({:.1}%)",
            entry.description,
            format_count(entry.count),
            entry.share_pct
        );
    }
    println!("Reasons (short-term apartments, first match wins):");
    for reason in &summary.reasons {
        println!(
            "  {} = {}: {}",
            reason.code,
            reason.label,
            format_count(reason.count)
        );
    }
    println!(
        "{} of {} listings illegal ({:.1}%)",
        format_count(counts.get(Category::Illegal)),
        format_count(counts.get(Category::All)),
        summary.illegal_share_pct
    );
}

pub(crate) fn run_sankey(args: SankeyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(&config, args.listings)?;
    let counts = classify(dataset.listings()).counts();

    let base = config.chart.canvas();
    let canvas = FlowCanvas {
        width: args.width.unwrap_or(base.width),
        height: args.height.unwrap_or(base.height),
        ..base
    };
    let diagram = standard_diagram(&counts, canvas)?;
    print_json(&diagram)
}

pub(crate) fn run_story(args: StoryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(&config, args.listings)?;
    let counts = classify(dataset.listings()).counts();
    let mut player = StoryPlayer::new(counts, config.dataset.snapshot_date);

    if let Some(step) = args.step {
        return print_json(&player.frame(StoryStep::from_index(step)));
    }

    let intro = player.restart();
    let mut frames = vec![intro];
    for _ in StoryStep::ordered() {
        frames.push(player.next());
    }

    for frame in frames {
        if let Some(narration) = frame.narration {
            println!("[{}] {}", frame.step_index, narration.top);
            println!("    {}", narration.bottom);
        }
    }
    Ok(())
}

pub(crate) fn run_map(args: MapArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = load_dataset(&config, args.listings)?;
    let layer = MapLayer::new(format!("Listings by {}", args.color.label()), args.color);
    print_json(&layer.points(dataset.listings()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_rule_parser_reports_choices() {
        assert_eq!(parse_color_rule("legality"), Ok(MapColorRule::Legality));
        let err = parse_color_rule("borough").expect_err("unknown rule");
        assert!(err.contains("expected none, legality or price"));
    }
}
