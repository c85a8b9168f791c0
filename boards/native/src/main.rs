// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Board file for running the software timers as a Linux process.
//!
//! A periodic `SIGALRM` stands in for the hardware timer interrupt. The
//! optional first argument is the tick period in microseconds:
//!
//! ```text
//! stimer-native [tick_period_us]
//! ```

use core::cell::Cell;
use core::fmt::Debug;
use core::ptr::{addr_of, addr_of_mut};
use core::sync::atomic::{AtomicBool, Ordering};

use posix_x86_64::{support, PeriodicTick, SignalMask};
use stimer::hil::time::{TimerClient, TimerMode};
use stimer::{debug, static_init, SoftTimer, SoftTimerMux};

mod io;

const DEFAULT_TICK_PERIOD_US: u32 = 1000;
const HEARTBEAT_MS: u32 = 250;
const STATUS_MS: u32 = 1000;
const STARTUP_MS: u32 = 100;
const RUN_TIME_MS: u32 = 5000;
/// The status timer stops the heartbeat after this many reports.
const HEARTBEAT_REPORTS: usize = 3;

type Mux = SoftTimerMux<'static, SignalMask>;

static mut TIMERS: Option<&'static Mux> = None;
static FINISHED: AtomicBool = AtomicBool::new(false);

/// Tick interrupt: runs in signal context once per period.
fn tick() {
    // Safety: set once in `setup` before the tick is started.
    if let Some(mux) = unsafe { *addr_of!(TIMERS) } {
        mux.handle_tick();
    }
}

struct Heartbeat {
    beats: Cell<usize>,
}

impl TimerClient for Heartbeat {
    fn fired(&self) {
        self.beats.set(self.beats.get() + 1);
        debug!("heartbeat {}", self.beats.get());
    }
}

struct Status {
    mux: &'static Mux,
    heartbeat: &'static SoftTimer<'static>,
    reports: Cell<usize>,
}

impl TimerClient for Status {
    fn fired(&self) {
        self.reports.set(self.reports.get() + 1);
        debug!(
            "status {}: {} active timers",
            self.reports.get(),
            self.mux.active_count()
        );
        if self.reports.get() == HEARTBEAT_REPORTS && self.mux.remove(self.heartbeat) {
            debug!("heartbeat stopped");
        }
    }
}

struct Shutdown;

impl TimerClient for Shutdown {
    fn fired(&self) {
        FINISHED.store(true, Ordering::Relaxed);
    }
}

fn announce() {
    debug!("startup delay elapsed");
}

static ANNOUNCE: fn() = announce;

fn fatal(what: &str, err: impl Debug) -> ! {
    eprintln!("stimer-native: {} failed: {:?}", what, err);
    std::process::exit(1);
}

/// Allocate the registry and the demo timers.
///
/// # Safety
///
/// Call once, from the main thread.
unsafe fn setup(tick_period_us: u32) -> (&'static Mux, PeriodicTick) {
    io::init();

    let mux: &'static Mux = static_init!(Mux, SoftTimerMux::new(SignalMask));
    mux.initialize(tick_period_us)
        .unwrap_or_else(|err| fatal("initialize", err));
    *addr_of_mut!(TIMERS) = Some(mux);

    let heartbeat_timer: &'static SoftTimer<'static> =
        static_init!(SoftTimer<'static>, SoftTimer::new());
    let heartbeat = static_init!(
        Heartbeat,
        Heartbeat {
            beats: Cell::new(0),
        }
    );
    mux.create(heartbeat_timer, TimerMode::Periodic, HEARTBEAT_MS, heartbeat)
        .unwrap_or_else(|err| fatal("heartbeat timer", err));

    let status_timer = static_init!(SoftTimer<'static>, SoftTimer::new());
    let status = static_init!(
        Status,
        Status {
            mux,
            heartbeat: heartbeat_timer,
            reports: Cell::new(0),
        }
    );
    mux.create(status_timer, TimerMode::Periodic, STATUS_MS, status)
        .unwrap_or_else(|err| fatal("status timer", err));

    let startup_timer = static_init!(SoftTimer<'static>, SoftTimer::new());
    mux.create(startup_timer, TimerMode::OneShot, STARTUP_MS, &ANNOUNCE)
        .unwrap_or_else(|err| fatal("startup timer", err));

    let shutdown_timer = static_init!(SoftTimer<'static>, SoftTimer::new());
    let shutdown = static_init!(Shutdown, Shutdown);
    mux.create(shutdown_timer, TimerMode::OneShot, RUN_TIME_MS, shutdown)
        .unwrap_or_else(|err| fatal("shutdown timer", err));

    let periodic_tick = PeriodicTick::new(tick).unwrap_or_else(|err| fatal("sigaction", err));
    periodic_tick
        .start(tick_period_us)
        .unwrap_or_else(|err| fatal("ualarm", err));

    (mux, periodic_tick)
}

fn main() {
    let tick_period_us = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u32>()
            .unwrap_or_else(|err| fatal("parsing tick period", err)),
        None => DEFAULT_TICK_PERIOD_US,
    };

    let (mux, periodic_tick) = unsafe { setup(tick_period_us) };
    debug!(
        "running {} timers on a {}us tick",
        mux.active_count(),
        mux.tick_period_us()
    );

    while !FINISHED.load(Ordering::Relaxed) {
        mux.service_timers();
        support::wfi();
    }

    periodic_tick.stop();
    debug!("done, {} timers left", mux.active_count());
}
