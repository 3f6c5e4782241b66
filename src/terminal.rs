//! Ownership of the terminal's display mode.
//!
//! Everything is drawn on stderr so that stdout carries nothing but the
//! confirmed path, ready for `cd "$(pickdir)"`.

use std::{
    io::{stderr, Result},
    panic,
    sync::Once,
};

use crossterm::{
    cursor, event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

#[cfg(unix)]
use nix::{
    libc::c_int,
    sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal},
};

/// Signals whose default action would kill us with the terminal still raw.
#[cfg(unix)]
const FATAL_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP];

/// Switches to raw mode on the alternate screen, with the cursor hidden and
/// mouse reporting on.
pub fn enter() -> Result<()> {
    enable_raw_mode()?;
    execute!(
        stderr(),
        EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture
    )?;
    Ok(())
}

/// Puts the terminal back the way the shell left it.
///
/// Best effort: this runs on the way out, where there is nothing useful to do
/// with a failure.
pub fn restore() {
    let _ = execute!(
        stderr(),
        event::DisableMouseCapture,
        cursor::Show,
        LeaveAlternateScreen
    );
    let _ = disable_raw_mode();
}

/// Restores the terminal when dropped.
///
/// Holding one for the lifetime of the event loop covers every way out of it:
/// normal return, `?` on an error, and unwinding panics. While it is alive,
/// SIGINT, SIGTERM and SIGHUP also restore the terminal before they kill the
/// process.
pub struct TermCleanup;

impl TermCleanup {
    /// Enters the display mode and returns the guard that undoes it.
    pub fn enter() -> Result<Self> {
        install_panic_hook();
        #[cfg(unix)]
        install_signal_handlers()?;
        // Created first so a half-finished `enter` is still undone.
        let guard = Self;
        enter()?;
        Ok(guard)
    }
}

impl Drop for TermCleanup {
    fn drop(&mut self) {
        restore();
        #[cfg(unix)]
        reset_signal_handlers();
    }
}

/// Restores the terminal before the panic message is printed, so the message
/// ends up on the normal screen instead of vanishing with the alternate one.
fn install_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| chain_panic_hook(restore));
}

/// Runs `before` ahead of whatever panic hook is currently set.
fn chain_panic_hook<F>(before: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        before();
        previous(info);
    }));
}

/// [Unix-only] Restores the terminal, then dies of `signum` as if no handler
/// had been installed.
#[cfg(unix)]
extern "C" fn restore_and_reraise(signum: c_int) {
    restore();
    if let Ok(sig) = Signal::try_from(signum) {
        // SA_RESETHAND already put the default action back.
        let _ = signal::raise(sig);
    }
}

/// [Unix-only] Routes the fatal signals through [`restore_and_reraise`].
#[cfg(unix)]
fn install_signal_handlers() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(restore_and_reraise),
        SaFlags::SA_RESETHAND,
        SigSet::empty(),
    );
    for sig in FATAL_SIGNALS {
        // SAFETY: the handler only writes escape sequences and re-raises.
        unsafe { signal::sigaction(sig, &action) }?;
    }
    Ok(())
}

/// [Unix-only] Puts the default action back on the fatal signals.
#[cfg(unix)]
fn reset_signal_handlers() {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    for sig in FATAL_SIGNALS {
        // SAFETY: installing the default disposition.
        let _ = unsafe { signal::sigaction(sig, &default) };
    }
}

/// [Unix-only] Stops the process on Ctrl+Z.
///
/// Raw mode swallows the terminal's own SIGTSTP, so the terminal is restored
/// and the signal raised by hand. Execution continues here after `fg`.
#[cfg(unix)]
pub fn suspend() -> Result<()> {
    log::debug!("suspending");
    restore();
    signal::raise(Signal::SIGTSTP)?;
    log::debug!("resumed");
    enter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn panic_hook_runs_before_previous_hook() {
        static RAN: AtomicUsize = AtomicUsize::new(0);

        chain_panic_hook(|| {
            RAN.fetch_add(1, Ordering::SeqCst);
        });
        let result = panic::catch_unwind(|| panic!("boom"));
        // Back to the default hook.
        drop(panic::take_hook());

        assert!(result.is_err());
        assert!(RAN.load(Ordering::SeqCst) >= 1);
    }

    #[cfg(unix)]
    #[test]
    fn fatal_signals_are_handled_while_installed() {
        let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());

        install_signal_handlers().expect("Failed to install handlers");
        for sig in FATAL_SIGNALS {
            // Swapping in the default hands back what was installed.
            let installed = unsafe { signal::sigaction(sig, &default) }.unwrap();
            assert!(
                matches!(installed.handler(), SigHandler::Handler(_)),
                "{sig} should have a handler"
            );
            assert!(installed.flags().contains(SaFlags::SA_RESETHAND));
        }

        install_signal_handlers().expect("Failed to install handlers");
        reset_signal_handlers();
        for sig in FATAL_SIGNALS {
            let current = unsafe { signal::sigaction(sig, &default) }.unwrap();
            assert!(
                matches!(current.handler(), SigHandler::SigDfl),
                "{sig} should be back to the default action"
            );
        }
    }
}
