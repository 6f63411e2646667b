//! Ctrl-C policy for the launcher.
//!
//! Outside a child process, Ctrl-C ends the run with `Quitting...` and status
//! 0. While a player or downloader runs, the launcher ignores it so that only
//! the child sees it, and the child's process group holds the terminal.

use std::io;

#[cfg(unix)]
const QUIT_MESSAGE: &[u8] = b"\nQuitting...\n";

#[cfg(unix)]
extern "C" fn quit_on_interrupt(_signum: libc::c_int) {
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            QUIT_MESSAGE.as_ptr().cast(),
            QUIT_MESSAGE.len(),
        );
        libc::_exit(0);
    }
}

/// Swaps the disposition of `signum`, returning the one it replaced.
#[cfg(unix)]
fn set_disposition(
    signum: libc::c_int,
    handler: libc::sighandler_t,
) -> io::Result<libc::sigaction> {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = handler;
        libc::sigemptyset(&mut action.sa_mask);
        action.sa_flags = 0;

        let mut previous: libc::sigaction = std::mem::zeroed();
        if libc::sigaction(signum, &action, &mut previous) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(previous)
    }
}

#[cfg(unix)]
pub fn install_quit_handler() -> io::Result<()> {
    let handler = quit_on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
    set_disposition(libc::SIGINT, handler).map(drop)
}

#[cfg(not(unix))]
pub fn install_quit_handler() -> io::Result<()> {
    Ok(())
}

/// Launcher-side state while a child process is in charge.
///
/// Dropping it takes the terminal back first, then restores the quit handler
/// and the other saved dispositions.
#[cfg(unix)]
pub(crate) struct ChildHandoff {
    saved: Vec<(libc::c_int, libc::sigaction)>,
    own_pgrp: Option<libc::pid_t>,
    handed_off: bool,
}

#[cfg(unix)]
impl ChildHandoff {
    pub(crate) fn begin() -> io::Result<Self> {
        let mut handoff = Self {
            saved: Vec::with_capacity(2),
            own_pgrp: None,
            handed_off: false,
        };
        // SIGTTOU stays ignored so tcsetpgrp works from the background group.
        for signum in [libc::SIGINT, libc::SIGTTOU] {
            let previous = set_disposition(signum, libc::SIG_IGN)?;
            handoff.saved.push((signum, previous));
        }

        let pgrp = unsafe { libc::tcgetpgrp(libc::STDIN_FILENO) };
        handoff.own_pgrp = (pgrp != -1).then_some(pgrp);
        Ok(handoff)
    }

    /// Whether stdin is a terminal the launcher can give away.
    pub(crate) fn owns_terminal(&self) -> bool {
        self.own_pgrp.is_some()
    }

    pub(crate) fn give_terminal_to(&mut self, child_pgrp: libc::pid_t) {
        if self.own_pgrp.is_some() {
            self.handed_off = unsafe { libc::tcsetpgrp(libc::STDIN_FILENO, child_pgrp) == 0 };
        }
    }
}

#[cfg(unix)]
impl Drop for ChildHandoff {
    fn drop(&mut self) {
        if let (true, Some(pgrp)) = (self.handed_off, self.own_pgrp) {
            unsafe {
                let _ = libc::tcsetpgrp(libc::STDIN_FILENO, pgrp);
            }
        }
        while let Some((signum, previous)) = self.saved.pop() {
            unsafe {
                let _ = libc::sigaction(signum, &previous, std::ptr::null_mut());
            }
        }
    }
}

#[cfg(not(unix))]
pub(crate) struct ChildHandoff;

#[cfg(not(unix))]
impl ChildHandoff {
    pub(crate) fn begin() -> io::Result<Self> {
        Ok(Self)
    }
}

/// Serializes tests that read or change process-wide signal dispositions.
#[cfg(test)]
pub(crate) static SIGNAL_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(all(test, unix))]
pub(crate) fn current_disposition(signum: libc::c_int) -> libc::sighandler_t {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        libc::sigaction(signum, std::ptr::null(), &mut action);
        action.sa_sigaction
    }
}
