// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Hardware tick simulation.
//!
//! `ualarm` re-arms itself every period and the `SIGALRM` handler calls the
//! registered tick function, in signal context, once per period.

use core::cell::Cell;
use core::ptr::{addr_of, addr_of_mut};
use nix::errno::Errno;
use nix::libc;
use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

extern "C" {
    fn ualarm(useconds: libc::c_uint, interval: libc::c_uint) -> libc::c_int;
}

/// `ualarm` does not accept periods of a second or more.
const MAX_PERIOD_US: u32 = 1_000_000;

static mut TICK_HANDLER: Option<fn()> = None;

extern "C" fn handle_sigalrm(_signal: libc::c_int) {
    // Safety: only written by `PeriodicTick::new`, before the handler is
    // installed.
    if let Some(handler) = unsafe { *addr_of!(TICK_HANDLER) } {
        handler();
    }
}

pub struct PeriodicTick {
    period_us: Cell<u32>,
}

impl PeriodicTick {
    /// Install the `SIGALRM` handler that calls `handler` on every tick.
    ///
    /// The tick does not run until [`PeriodicTick::start`].
    ///
    /// # Safety
    ///
    /// Must be called at most once per process, before any other thread
    /// could receive `SIGALRM`. `handler` runs in signal context and must be
    /// async-signal-safe.
    pub unsafe fn new(handler: fn()) -> nix::Result<PeriodicTick> {
        *addr_of_mut!(TICK_HANDLER) = Some(handler);

        let action = SigAction::new(
            SigHandler::Handler(handle_sigalrm),
            SaFlags::SA_RESTART,
            SigSet::all(),
        );
        signal::sigaction(Signal::SIGALRM, &action)?;

        Ok(PeriodicTick {
            period_us: Cell::new(0),
        })
    }

    /// Fire the tick every `period_us` microseconds.
    pub fn start(&self, period_us: u32) -> nix::Result<()> {
        if period_us == 0 || period_us >= MAX_PERIOD_US {
            return Err(nix::Error::Sys(Errno::EINVAL));
        }

        let res = unsafe { ualarm(period_us, period_us) };
        if res == -1 {
            return Err(nix::Error::Sys(Errno::last()));
        }
        self.period_us.set(period_us);
        Ok(())
    }

    pub fn stop(&self) {
        unsafe {
            ualarm(0, 0);
        }
        self.period_us.set(0);
    }

    /// Current tick period, 0 while stopped.
    pub fn period_us(&self) -> u32 {
        self.period_us.get()
    }
}

impl Drop for PeriodicTick {
    fn drop(&mut self) {
        if self.period_us.get() != 0 {
            self.stop();
        }
    }
}

#[cfg(test)]
mod test {
    use super::PeriodicTick;

    fn ignore() {}

    #[test]
    fn start_rejects_out_of_range_periods() {
        let tick = unsafe { PeriodicTick::new(ignore) }.unwrap();
        assert!(tick.start(0).is_err());
        assert!(tick.start(1_000_000).is_err());
        assert_eq!(tick.period_us(), 0);
    }
}
