//! Subcommand implementations

use crate::config::{MasonConfig, CONFIG_FILE};
use crate::OutputFormat;
use anyhow::{Context, Result};
use mason_animation::{AnimationScheduler, Property};
use mason_core::events::event_types::POINTER_ENTER;
use mason_core::Event;
use mason_layout::{
    compute_layout, resolve_column_count, HeadlessHost, Item, ItemSet, Layout, MasonryEngine,
    PartialLayoutConfig, Viewport,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Simulated seconds spent at most waiting for animations to finish
const SETTLE_SECONDS: u32 = 10;

fn settle_limit(fps: u32) -> u32 {
    fps.saturating_mul(SETTLE_SECONDS)
}

pub struct LayoutArgs {
    pub items: Option<PathBuf>,
    pub width: Option<f32>,
    pub viewport_width: Option<f32>,
    pub gap: Option<f32>,
    pub format: OutputFormat,
}

pub struct SimulateArgs {
    pub items: Option<PathBuf>,
    pub resizes: Vec<f32>,
    pub fps: u32,
    pub frames_between: u32,
    pub hover: Option<String>,
    pub format: OutputFormat,
}

fn load_items(config: &MasonConfig, path: Option<&Path>) -> Result<Vec<Item>> {
    let Some(path) = path.or(config.items.as_deref()) else {
        anyhow::bail!("No item file given. Pass --items or set `items` in {}.", CONFIG_FILE);
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let items: Vec<Item> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!("loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

pub fn layout(config: &MasonConfig, args: LayoutArgs) -> Result<()> {
    let items = ItemSet::new(load_items(config, args.items.as_deref())?);

    let mut partial = config.layout.clone();
    partial.merge(PartialLayoutConfig {
        column_gap_px: args.gap,
        ..Default::default()
    });
    let layout_config = partial.resolve().context("Invalid layout configuration")?;

    let viewport_width = args.viewport_width.unwrap_or(config.viewport.width);
    let width = args.width.unwrap_or(viewport_width);
    let layout = compute_layout(
        items.as_slice(),
        width,
        resolve_column_count(viewport_width),
        layout_config.column_gap_px,
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&layout)?),
        OutputFormat::Table => print!("{}", layout_table(&layout)),
    }
    Ok(())
}

fn layout_table(layout: &Layout) -> String {
    let mut out = format!(
        "{:<20} {:>9} {:>9} {:>9} {:>9}\n",
        "id", "x", "y", "w", "h"
    );
    for item in &layout.items {
        out.push_str(&format!(
            "{:<20} {:>9.2} {:>9.2} {:>9.2} {:>9.2}\n",
            item.id.as_str(),
            item.x,
            item.y,
            item.w,
            item.h
        ));
    }
    out.push_str(&format!(
        "\ncolumns: {}  column width: {:.2}  container height: {:.2}\n",
        layout.columns, layout.column_width, layout.container_height
    ));
    if layout.degenerate {
        out.push_str("warning: container is narrower than its gaps\n");
    }
    out
}

#[derive(Debug, Serialize)]
struct TileReport {
    id: String,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    opacity: f32,
    scale: f32,
    hover: String,
}

#[derive(Debug, Serialize)]
struct SimulationReport {
    passes: usize,
    columns: usize,
    coalesced_resizes: usize,
    frames: u64,
    elapsed_ms: f64,
    container_height: f32,
    tiles: Vec<TileReport>,
}

/// Simulated frame clock
struct Frames {
    now_ms: f64,
    frame_ms: f64,
    count: u64,
}

impl Frames {
    fn step(&mut self, engine: &mut MasonryEngine<HeadlessHost, AnimationScheduler>) {
        self.now_ms += self.frame_ms;
        self.count += 1;
        engine.tick_at(self.now_ms);
    }

    /// Run frames until no animation is in flight, up to `limit` frames
    fn settle(&mut self, engine: &mut MasonryEngine<HeadlessHost, AnimationScheduler>, limit: u32) {
        for _ in 0..limit {
            self.step(engine);
            if !engine.animator().has_active_animations() {
                return;
            }
        }
        tracing::warn!("animations still running after {} frames", limit);
    }
}

pub fn simulate(config: &MasonConfig, args: SimulateArgs) -> Result<()> {
    let items = load_items(config, args.items.as_deref())?;
    let viewport = Viewport::from(&config.viewport);

    let mut engine = MasonryEngine::new(
        Some(HeadlessHost::new(viewport)),
        items,
        config.layout.clone(),
        AnimationScheduler::new(),
    );
    if let Some(err) = engine.error() {
        anyhow::bail!("Engine failed to start: {err}");
    }

    let fps = args.fps.max(1);
    let mut frames = Frames {
        now_ms: 0.0,
        frame_ms: 1000.0 / f64::from(fps),
        count: 0,
    };
    engine.tick_at(frames.now_ms);

    for width in &args.resizes {
        for _ in 0..args.frames_between {
            frames.step(&mut engine);
        }
        let event = engine
            .host_mut()
            .and_then(|host| host.resize_viewport(Viewport::new(*width, viewport.height)));
        if let Some(event) = event {
            engine.handle_event(&event);
        }
    }
    frames.settle(&mut engine, settle_limit(fps));

    if let Some(id) = &args.hover {
        let node = engine
            .tile(&id.as_str().into())
            .map(|tile| tile.node())
            .with_context(|| format!("No tile with id `{id}`"))?;
        engine.handle_event(&Event::pointer(POINTER_ENTER, node, 0.0, 0.0));
        frames.settle(&mut engine, settle_limit(fps));
    }

    let report = simulation_report(&engine, &frames);
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print!("{}", simulation_table(&report)),
    }
    Ok(())
}

fn simulation_report(
    engine: &MasonryEngine<HeadlessHost, AnimationScheduler>,
    frames: &Frames,
) -> SimulationReport {
    let host = engine.host();
    let tiles = engine
        .items()
        .iter()
        .filter_map(|item| engine.tile(&item.id))
        .map(|tile| {
            let rendered = host
                .and_then(|host| host.node(tile.node()))
                .and_then(|node| node.layer(0).copied())
                .unwrap_or_default();
            TileReport {
                id: tile.id().to_string(),
                x: rendered.resolved(Property::X),
                y: rendered.resolved(Property::Y),
                w: rendered.resolved(Property::Width),
                h: rendered.resolved(Property::Height),
                opacity: rendered.resolved(Property::Opacity),
                scale: rendered.resolved(Property::Scale),
                hover: format!("{:?}", tile.hover_state()),
            }
        })
        .collect();

    SimulationReport {
        passes: engine.passes(),
        columns: engine.columns(),
        coalesced_resizes: engine.coalesced_resizes(),
        frames: frames.count,
        elapsed_ms: frames.now_ms,
        container_height: host.map_or(0.0, |host| host.container_height()),
        tiles,
    }
}

fn simulation_table(report: &SimulationReport) -> String {
    let mut out = format!(
        "{:<20} {:>9} {:>9} {:>9} {:>9} {:>7} {:>6}  {}\n",
        "id", "x", "y", "w", "h", "opacity", "scale", "hover"
    );
    for tile in &report.tiles {
        out.push_str(&format!(
            "{:<20} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>7.2} {:>6.2}  {}\n",
            tile.id, tile.x, tile.y, tile.w, tile.h, tile.opacity, tile.scale, tile.hover
        ));
    }
    out.push_str(&format!(
        "\npasses: {}  columns: {}  coalesced resizes: {}  frames: {} ({:.0} ms)  container height: {:.2}\n",
        report.passes,
        report.columns,
        report.coalesced_resizes,
        report.frames,
        report.elapsed_ms,
        report.container_height
    ));
    out
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    let content = MasonConfig::with_defaults().to_toml()?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_table() {
        let items = vec![
            Item::image("a", "/a.jpg").with_height(400.0),
            Item::image("b", "/b.jpg").with_height(200.0),
        ];
        let table = layout_table(&compute_layout(&items, 630.0, 2, 24.0));
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].starts_with("a "));
        assert!(lines[2].contains("327.00"));
        assert!(table.contains("columns: 2  column width: 303.00"));
        assert!(!table.contains("warning"));
    }

    #[test]
    fn test_settle_limit_saturates() {
        assert_eq!(settle_limit(60), 600);
        assert_eq!(settle_limit(500_000_000), u32::MAX);
    }

    #[test]
    fn test_simulation_settles() {
        let items = vec![
            Item::image("a", "/a.jpg").with_height(400.0),
            Item::video("b", "/b.mp4"),
        ];
        let mut engine = MasonryEngine::new(
            Some(HeadlessHost::new(Viewport::new(1280.0, 800.0))),
            items,
            PartialLayoutConfig::default(),
            AnimationScheduler::new(),
        );
        let mut frames = Frames {
            now_ms: 0.0,
            frame_ms: 1000.0 / 60.0,
            count: 0,
        };
        engine.tick_at(0.0);
        frames.settle(&mut engine, 600);

        let report = simulation_report(&engine, &frames);
        assert_eq!(report.passes, 1);
        assert_eq!(report.columns, 3);
        assert!(report.frames < 600);
        assert_eq!(report.tiles.len(), 2);
        assert!((report.tiles[0].opacity - 1.0).abs() < 1e-4);
        assert!((report.tiles[1].x - report.tiles[1].w - 24.0).abs() < 1e-2);
        assert_eq!(report.tiles[0].hover, "Idle");
    }
}
