use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use parking_lot::Mutex;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;

pub type KioskTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal back on drop, and from the panic hook if the loop dies.
pub struct TerminalGuard {
    /// True while the kiosk owns the screen.
    active: Arc<Mutex<bool>>,
}

impl TerminalGuard {
    fn new() -> Self {
        let guard = Self {
            active: Arc::new(Mutex::new(true)),
        };
        guard.install_panic_hook();
        guard
    }

    fn install_panic_hook(&self) {
        let active = Arc::clone(&self.active);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            release(&active);
            default_hook(info);
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        release(&self.active);
    }
}

/// Restore the screen once; later calls are no-ops.
fn release(active: &Mutex<bool>) {
    let mut active = active.lock();
    if std::mem::replace(&mut *active, false) {
        restore_screen();
    }
}

fn restore_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show);
}

/// Raw mode, alternate screen, and bracketed paste so dropped image paths
/// arrive as a single paste event.
pub fn setup_terminal() -> io::Result<(KioskTerminal, TerminalGuard)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        Clear(ClearType::All),
        Hide
    ) {
        restore_screen();
        return Err(err);
    }

    let guard = TerminalGuard::new();
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}
