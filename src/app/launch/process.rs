use std::process::{Child, Command as ProcessCommand, ExitStatus};

use anyhow::{Context, Result};

use crate::interrupt::ChildHandoff;

#[cfg(unix)]
use std::os::unix::process::CommandExt;

/// Child-side setup between fork and exec. Ignored signals survive exec, so
/// the player gets default Ctrl-C handling back here.
#[cfg(unix)]
fn reset_child(own_group: bool) -> impl FnMut() -> std::io::Result<()> + Send + Sync + 'static {
    move || {
        for signum in [libc::SIGINT, libc::SIGQUIT, libc::SIGTSTP, libc::SIGTTOU] {
            unsafe {
                libc::signal(signum, libc::SIG_DFL);
            }
        }
        if own_group && unsafe { libc::setpgid(0, 0) } != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }
}

#[cfg(unix)]
fn attach(cmd: &mut ProcessCommand, handoff: &ChildHandoff) {
    unsafe {
        cmd.pre_exec(reset_child(handoff.owns_terminal()));
    }
}

#[cfg(not(unix))]
fn attach(_cmd: &mut ProcessCommand, _handoff: &ChildHandoff) {}

#[cfg(unix)]
fn hand_terminal(handoff: &mut ChildHandoff, child: &Child) {
    handoff.give_terminal_to(child.id() as libc::pid_t);
}

#[cfg(not(unix))]
fn hand_terminal(_handoff: &mut ChildHandoff, _child: &Child) {}

/// Runs an external program attached to the terminal and waits for it.
pub(crate) fn run_attached(mut cmd: ProcessCommand) -> Result<ExitStatus> {
    let program = cmd.get_program().to_string_lossy().into_owned();
    let mut handoff = ChildHandoff::begin()
        .with_context(|| format!("failed to prepare terminal for {program}"))?;
    attach(&mut cmd, &handoff);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;
    hand_terminal(&mut handoff, &child);
    let status = child
        .wait()
        .with_context(|| format!("failed waiting on {program}"))?;
    drop(handoff);
    Ok(status)
}
