//! Application state and input dispatch for the terminal front end.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;
use sysinfo::{System, SystemExt};

use crate::error::GridError;
use crate::universe::Universe;

/// Main application state container.
#[derive(Debug)]
pub struct App {
    /// The simulation, both generation buffers included
    pub universe: Universe,
    /// Whether generations advance on every tick
    pub running: bool,
    /// Set once the user asked to leave
    pub should_quit: bool,
    /// Fill ratio used by the reseed key
    reseed_density: f64,
    rng: StdRng,
    /// System information for resource monitoring
    sys: System,
    /// Screen area the grid pixels were last drawn into
    surface: Rect,
}

impl App {
    /// Creates the application around an already seeded universe.
    ///
    /// # Arguments
    ///
    /// * `universe` - The simulation to drive
    /// * `rng` - Random source for the reseed key
    /// * `reseed_density` - Fill ratio used when reseeding
    pub fn new(universe: Universe, rng: StdRng, reseed_density: f64) -> App {
        let mut sys = System::new();
        sys.refresh_memory();
        App {
            universe,
            running: false,
            should_quit: false,
            reseed_density,
            rng,
            sys,
            surface: Rect::default(),
        }
    }

    /// Builds an application whose reseed key draws from a seeded RNG.
    pub fn with_seed(universe: Universe, seed: u64, reseed_density: f64) -> App {
        App::new(universe, StdRng::seed_from_u64(seed), reseed_density)
    }

    pub fn sys(&self) -> &System {
        &self.sys
    }

    /// Records where the grid surface was drawn, for mouse hit testing.
    pub fn set_surface(&mut self, surface: Rect) {
        self.surface = surface;
    }

    pub fn surface(&self) -> Rect {
        self.surface
    }

    /// Advances the simulation by one generation.
    pub fn step(&mut self) -> Result<(), GridError> {
        info!("computing next generation");
        self.universe.step()?;
        self.sys.refresh_memory();
        Ok(())
    }

    /// Toggles the simulation between running and paused states.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        info!("{}", if self.running { "running" } else { "paused" });
    }

    /// Called once per tick period by the event loop.
    ///
    /// # Returns
    ///
    /// `true` if a generation was computed.
    pub fn on_tick(&mut self) -> Result<bool, GridError> {
        if !self.running {
            return Ok(false);
        }
        self.step()?;
        Ok(true)
    }

    /// Dispatches one terminal event.
    ///
    /// # Returns
    ///
    /// `true` if the event changed anything on screen.
    pub fn handle_event(&mut self, event: &Event) -> Result<bool, GridError> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => Ok(self.handle_mouse(mouse)),
            Event::Resize(..) => Ok(true),
            _ => Ok(false),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<bool, GridError> {
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.step()?,
            KeyCode::Char('p') => self.toggle_running(),
            KeyCode::Char('c') => self.universe.clear(),
            KeyCode::Char('r') => {
                let density = self.reseed_density;
                self.universe.randomize(&mut self.rng, density);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        match mouse.kind {
            MouseEventKind::Down(_) | MouseEventKind::Drag(MouseButton::Left) => {
                self.draw_at(mouse.column, mouse.row)
            }
            _ => false,
        }
    }

    /// Toggles the cell under terminal position `(column, row)`.
    fn draw_at(&mut self, column: u16, row: u16) -> bool {
        let surface = self.surface;
        // The surface may be clipped by a small terminal; hidden cells stay untouched.
        if column >= surface.right() || row >= surface.bottom() {
            debug!("pointer ({column}, {row}) is past the visible grid");
            return false;
        }
        let pixel_x = i32::from(column) - i32::from(surface.x);
        let pixel_y = i32::from(row) - i32::from(surface.y);
        match self.universe.toggle_at_pixel(pixel_x, pixel_y) {
            Ok(_) => true,
            Err(err) => {
                debug!("ignoring pointer at ({column}, {row}): {err}");
                false
            }
        }
    }
}
