//! # pixel_life
//!
//! Interactive Conway's Game of Life in the terminal, drawn with `ratatui`
//! on top of `crossterm`.
//!
//! ## Controls
//!
//! * Click (any button) / left drag: toggle the cell under the pointer
//! * Space: step forward one generation
//! * p: play/pause
//! * c: clear the grid
//! * r: random fill
//! * q / Esc: quit

use std::{
    fs::File,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use crossterm::event;
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};

use pixel_life::tui::{self, Tui};
use pixel_life::{ui, App, Args, Universe};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.life_config().context("invalid grid configuration")?;
    let density = args.density().context("invalid --density")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "creating boards: {}x{} cells, scale {}, seed {seed}",
        config.width(),
        config.height(),
        config.scale()
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut universe = Universe::new(config);
    if density > 0.0 {
        universe.randomize(&mut rng, density);
    }
    let mut app = App::new(universe, rng, args.reseed_density());

    info!("initializing terminal");
    tui::install_panic_hook();
    let mut tui = Tui::enter().context("failed to initialize terminal")?;
    let result = run(&mut tui, &mut app, args.tick_rate());
    tui.exit().context("failed to restore terminal")?;

    if let Err(err) = &result {
        error!("exiting after error: {err:#}");
    } else {
        info!("quit");
    }
    result
}

/// Sends log output to `--log-file` when given. Without one, logging stays
/// off unless `RUST_LOG` asks for it, since the UI owns the terminal.
fn init_logging(args: &Args) -> anyhow::Result<()> {
    let mut builder = match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    builder.format_timestamp_micros().init();
    Ok(())
}

/// Runs the event loop until the user quits.
///
/// The screen is redrawn only after input that changed something, a
/// computed generation, or a resize.
fn run(tui: &mut Tui, app: &mut App, tick_rate: Duration) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    while !app.should_quit {
        if needs_redraw {
            tui.terminal().draw(|f| ui::draw(f, app))?;
            needs_redraw = false;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let event = event::read()?;
            needs_redraw |= app.handle_event(&event)?;
        }

        if last_tick.elapsed() >= tick_rate {
            needs_redraw |= app.on_tick()?;
            last_tick = Instant::now();
        }
    }

    Ok(())
}
