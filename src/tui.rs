//! Terminal lifecycle: raw mode, alternate screen and mouse capture.
//!
//! Once raw mode is on, the terminal is put back on every way out: a failed
//! setup step, a normal exit, an early return, and a panic.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};

/// Runs `restore` when dropped, unless [`RestoreOnDrop::disarm`] was called.
pub struct RestoreOnDrop<F: FnMut()> {
    restore: Option<F>,
}

impl<F: FnMut()> RestoreOnDrop<F> {
    pub fn new(restore: F) -> Self {
        RestoreOnDrop {
            restore: Some(restore),
        }
    }

    /// Drops the restore action without running it.
    pub fn disarm(mut self) {
        self.restore = None;
    }
}

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            restore();
        }
    }
}

/// Leaves the alternate screen, stops mouse capture, shows the cursor and
/// turns raw mode off. Safe to call when only part of the setup happened.
pub fn restore() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    raw.and(screen)
}

fn restore_quietly() {
    if let Err(err) = restore() {
        warn!("failed to restore terminal: {err}");
    }
}

/// Restores the terminal before the previous panic hook prints its message,
/// so the report is not lost on the alternate screen.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_quietly();
        previous(info);
    }));
}

/// The full-screen terminal. Dropping it restores the terminal.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: RestoreOnDrop<fn()>,
}

impl Tui {
    /// Switches to raw mode, the alternate screen and mouse capture.
    ///
    /// # Errors
    ///
    /// Any I/O failure. Whatever part of the setup already happened is undone
    /// before returning.
    pub fn enter() -> io::Result<Tui> {
        enable_raw_mode()?;
        let guard = RestoreOnDrop::new(restore_quietly as fn());
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Tui { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restores the terminal now and reports whether that worked.
    pub fn exit(self) -> io::Result<()> {
        let Tui { guard, .. } = self;
        guard.disarm();
        restore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter() -> (Arc<AtomicUsize>, impl FnMut()) {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        (calls, move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn restores_once_on_drop() {
        let (calls, restore) = counter();
        drop(RestoreOnDrop::new(restore));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn restores_when_a_later_setup_step_fails() {
        fn setup(restore: impl FnMut()) -> io::Result<()> {
            let _guard = RestoreOnDrop::new(restore);
            Err(io::Error::new(io::ErrorKind::Other, "alternate screen unavailable"))
        }
        let (calls, restore) = counter();
        assert!(setup(restore).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn restores_while_unwinding() {
        let (calls, restore) = counter();
        let result = panic::catch_unwind(panic::AssertUnwindSafe(move || {
            let _guard = RestoreOnDrop::new(restore);
            panic!("simulation crashed");
        }));
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn disarmed_guard_does_nothing() {
        let (calls, restore) = counter();
        RestoreOnDrop::new(restore).disarm();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
