//! Terminal rendering.
//!
//! The current generation's pixel buffer is uploaded as is: every ARGB pixel
//! becomes a block of background-colored characters, `scale` columns wide and
//! `scale` rows tall.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sysinfo::SystemExt;

use crate::app::App;
use crate::universe::Universe;

const MIB: u64 = 1024 * 1024;

const GRID_TITLE: &str =
    "Game of Life [Space: Step | p: Play/Pause | c: Clear | r: Random | q: Quit]";

/// Maps an ARGB8888 pixel to a terminal color. Fully transparent pixels
/// show the black background.
pub fn pixel_color(pixel: u32) -> Color {
    let [alpha, red, green, blue] = pixel.to_be_bytes();
    if alpha == 0 {
        Color::Black
    } else {
        Color::Rgb(red, green, blue)
    }
}

/// Expands a row-major pixel buffer into terminal lines, producing only
/// the part that fits in `columns x rows` characters.
///
/// # Arguments
///
/// * `pixels` - `width * height` ARGB pixels
/// * `width` - Pixels per row
/// * `scale` - Characters per pixel edge
/// * `columns` - Visible characters per line
/// * `rows` - Visible lines
pub fn pixel_lines(
    pixels: &[u32],
    width: usize,
    scale: u32,
    columns: u16,
    rows: u16,
) -> Vec<Line<'static>> {
    let scale = scale.max(1) as usize;
    let width = width.max(1);
    let (columns, rows) = (usize::from(columns), usize::from(rows));
    let height = pixels.len() / width;

    let visible_rows = height.saturating_mul(scale).min(rows);
    let mut lines = Vec::with_capacity(visible_rows);
    for screen_row in 0..visible_rows {
        let start = (screen_row / scale) * width;
        let mut spans = Vec::new();
        let mut used = 0;
        for &pixel in &pixels[start..start + width] {
            if used >= columns {
                break;
            }
            let span_width = scale.min(columns - used);
            spans.push(Span::styled(
                " ".repeat(span_width),
                Style::default().bg(pixel_color(pixel)),
            ));
            used += span_width;
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// Screen area covered by a `width x height` pixel surface scaled by
/// `scale`, anchored at the top-left of `area` and clipped to it.
pub fn surface_rect(area: Rect, width: usize, height: usize, scale: u32) -> Rect {
    let scaled = |cells: usize| {
        u16::try_from(cells.saturating_mul(scale as usize)).unwrap_or(u16::MAX)
    };
    Rect::new(
        area.x,
        area.y,
        scaled(width).min(area.width),
        scaled(height).min(area.height),
    )
}

/// Lays out the grid and the statistics panel side by side.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
        .split(f.size());

    let surface = draw_grid(f, app, chunks[0]);
    app.set_surface(surface);
    draw_stats(f, app, chunks[1]);
}

/// Draws the game grid to the terminal interface.
///
/// # Returns
///
/// The area the grid pixels occupy, for mouse hit testing.
fn draw_grid(f: &mut Frame, app: &App, area: Rect) -> Rect {
    let block = Block::default().borders(Borders::ALL).title(GRID_TITLE);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let config = app.universe.config();
    let surface = surface_rect(inner, config.width(), config.height(), config.scale());
    let lines = pixel_lines(
        app.universe.raw_view(),
        config.width(),
        config.scale(),
        surface.width,
        surface.height,
    );
    f.render_widget(Paragraph::new(lines), surface);
    surface
}

/// Text of the statistics panel.
///
/// `memory` is `(used, total)` in bytes.
pub fn stats_text(universe: &Universe, running: bool, memory: (u64, u64)) -> String {
    let stats = universe.stats();
    let config = universe.config();
    let (used, total) = memory;
    format!(
        "Board: {}x{} (scale {})\n\
        Generation: {}\n\
        Alive: {} of {}\n\
        Born: {} ({:.2}/gen)\n\
        Died: {} ({:.2}/gen)\n\
        Memory: {} MiB / {} MiB\n\
        {}\n",
        config.width(),
        config.height(),
        config.scale(),
        stats.generation,
        stats.current_population,
        config.cell_count(),
        stats.cells_created,
        stats.birth_rate(),
        stats.cells_destroyed,
        stats.death_rate(),
        used / MIB,
        total / MIB,
        if running { "Running" } else { "Paused" }
    )
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let memory = (app.sys().used_memory(), app.sys().total_memory());
    let panel = Paragraph::new(stats_text(&app.universe, app.running, memory))
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(panel, area);
}
