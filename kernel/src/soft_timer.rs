// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Multiplex many software timers over a single periodic hardware tick.
//!
//! A [`SoftTimerMux`] keeps an intrusive list of caller-owned [`SoftTimer`]
//! handles. Work is split across two execution contexts:
//!
//! - The hardware timer interrupt calls [`SoftTimerMux::handle_tick`] once
//!   per tick. It only counts every active timer down towards zero.
//! - The main loop calls [`SoftTimerMux::service_timers`]. It fires every
//!   timer whose count reached zero, reloads periodic timers and drops
//!   one-shot timers from the list.
//!
//! Creating and removing timers happens from the main loop as well. Those
//! list updates run inside [`InterruptMask::atomic`] so the tick handler
//! never sees a half-updated link.
//!
//! Usage
//! -----
//!
//! ```ignore
//! let mux = static_init!(
//!     SoftTimerMux<'static, SignalMask>,
//!     SoftTimerMux::new(SignalMask)
//! );
//! mux.initialize(1000)?; // 1 ms hardware tick
//!
//! let led_timer = static_init!(SoftTimer<'static>, SoftTimer::new());
//! mux.create(led_timer, TimerMode::Periodic, 500, blinker)?;
//!
//! // hardware timer ISR:
//! mux.handle_tick();
//!
//! // main loop:
//! loop {
//!     mux.service_timers();
//! }
//! ```

use core::cell::Cell;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::collections::list::{List, ListLink, ListNode};
use crate::config::CONFIG;
use crate::hil::time::{TimerClient, TimerMode};
use crate::platform::InterruptMask;
use crate::ErrorCode;

/// A caller-owned software timer handle.
///
/// The handle is inert until passed to [`SoftTimerMux::create`], and must
/// outlive the registry it is created in.
pub struct SoftTimer<'a> {
    mode: Cell<TimerMode>,
    /// Ticks left before the timer is due. Written by the tick interrupt.
    remaining: AtomicU32,
    /// Reload value for periodic timers, in ticks.
    period: Cell<u32>,
    client: Cell<Option<&'a dyn TimerClient>>,
    linked: Cell<bool>,
    /// Already looked at by the current dispatch pass.
    visited: Cell<bool>,
    next: ListLink<'a, SoftTimer<'a>>,
}

impl<'a> ListNode<'a, SoftTimer<'a>> for SoftTimer<'a> {
    fn next(&'a self) -> &'a ListLink<'a, SoftTimer<'a>> {
        &self.next
    }
}

impl<'a> SoftTimer<'a> {
    pub const fn new() -> SoftTimer<'a> {
        SoftTimer {
            mode: Cell::new(TimerMode::OneShot),
            remaining: AtomicU32::new(0),
            period: Cell::new(0),
            client: Cell::new(None),
            linked: Cell::new(false),
            visited: Cell::new(false),
            next: ListLink::empty(),
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode.get()
    }

    /// Ticks left before the timer is due. Zero means due for dispatch.
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining.load(Ordering::Relaxed)
    }

    /// Number of ticks the requested delay converted to.
    pub fn period_ticks(&self) -> u32 {
        self.period.get()
    }

    /// Whether the handle currently sits in a registry.
    pub fn is_active(&self) -> bool {
        self.linked.get()
    }

    fn fire_client(&self) {
        if let Some(client) = self.client.get() {
            client.fired();
        }
    }
}

/// The timer registry.
///
/// Holds the active timers and the period of the hardware tick that drives
/// them. The registry never allocates: handles are borrowed for `'a`.
pub struct SoftTimerMux<'a, M: InterruptMask = ()> {
    tick_period_us: Cell<u32>,
    timers: List<'a, SoftTimer<'a>>,
    mask: M,
}

impl<'a, M: InterruptMask> SoftTimerMux<'a, M> {
    pub const fn new(mask: M) -> SoftTimerMux<'a, M> {
        SoftTimerMux {
            tick_period_us: Cell::new(0),
            timers: List::new(),
            mask,
        }
    }

    /// Set the hardware tick period and empty the registry.
    ///
    /// Every timer that was active is unlinked and may be created again.
    /// Must be called before any other operation.
    pub fn initialize(&self, tick_period_us: u32) -> Result<(), ErrorCode> {
        if tick_period_us == 0 {
            return Err(ErrorCode::INVAL);
        }

        self.mask.atomic(|| {
            for timer in self.timers.iter() {
                timer.linked.set(false);
            }
            self.timers.clear();
            self.tick_period_us.set(tick_period_us);
        });

        if CONFIG.trace_timers {
            debug!("soft timers: tick period {}us", tick_period_us);
        }
        Ok(())
    }

    /// Period of the hardware tick in microseconds, 0 before
    /// [`SoftTimerMux::initialize`].
    pub fn tick_period_us(&self) -> u32 {
        self.tick_period_us.get()
    }

    /// Convert a delay in milliseconds to a whole number of hardware ticks,
    /// rounding down.
    ///
    /// Fails with `INVAL` for a delay shorter than one tick and with `SIZE`
    /// if the tick count does not fit in 32 bits.
    pub fn ticks_for_delay(&self, delay_ms: u32) -> Result<u32, ErrorCode> {
        let tick_period_us = self.tick_period_us.get();
        if tick_period_us == 0 {
            return Err(ErrorCode::OFF);
        }

        let ticks = u64::from(delay_ms) * 1000 / u64::from(tick_period_us);
        match u32::try_from(ticks) {
            Ok(0) => Err(ErrorCode::INVAL),
            Ok(ticks) => Ok(ticks),
            Err(_) => Err(ErrorCode::SIZE),
        }
    }

    /// Arm `timer` to call `client` after `delay_ms`, once or periodically.
    ///
    /// Fails with `OFF` before [`SoftTimerMux::initialize`], with `INVAL` or
    /// `SIZE` if `delay_ms` does not convert to a usable tick count, and
    /// with `ALREADY` if `timer` is active in this or another registry. On
    /// failure `timer` is left untouched.
    pub fn create(
        &self,
        timer: &'a SoftTimer<'a>,
        mode: TimerMode,
        delay_ms: u32,
        client: &'a dyn TimerClient,
    ) -> Result<(), ErrorCode> {
        let ticks = self.ticks_for_delay(delay_ms)?;
        if timer.linked.get() {
            return Err(ErrorCode::ALREADY);
        }

        timer.mode.set(mode);
        timer.period.set(ticks);
        timer.remaining.store(ticks, Ordering::Relaxed);
        timer.client.set(Some(client));
        // Not dispatched by a pass that is already running.
        timer.visited.set(true);

        self.mask.atomic(|| {
            self.timers.push_head(timer);
            timer.linked.set(true);
        });

        if CONFIG.trace_timers {
            debug!(
                "soft timers: create {:?} {}ms ({} ticks)",
                mode, delay_ms, ticks
            );
        }
        Ok(())
    }

    /// Remove `timer` from the registry.
    ///
    /// Returns `false`, with no side effect, if `timer` is not active here.
    /// Once this returns the caller may reuse the handle.
    pub fn remove(&self, timer: &'a SoftTimer<'a>) -> bool {
        let removed = self.unlink(timer);
        if removed && CONFIG.trace_timers {
            debug!("soft timers: remove {:?}", timer.mode.get());
        }
        removed
    }

    /// Whether `timer` is linked into this registry.
    pub fn is_active(&self, timer: &'a SoftTimer<'a>) -> bool {
        self.timers.contains(timer)
    }

    /// Number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Count every active timer down by one tick.
    ///
    /// Call this exactly once per hardware timer interrupt. It never calls a
    /// client, never touches the list links and never goes below zero: a due
    /// timer stays at zero until [`SoftTimerMux::service_timers`] handles it.
    pub fn handle_tick(&self) {
        for timer in self.timers.iter() {
            // The interrupt is the only decrementer and cannot be preempted
            // by the task context, so a plain load/store pair is enough.
            let remaining = timer.remaining.load(Ordering::Relaxed);
            if remaining > 0 {
                timer.remaining.store(remaining - 1, Ordering::Relaxed);
            }
        }
    }

    /// Fire every due timer.
    ///
    /// Call this repeatedly from the main loop, never from interrupt
    /// context. Clients may create or remove timers from their callback,
    /// and ticks may arrive while a callback runs. Each timer is looked at
    /// at most once per call. A timer created during a pass is not fired
    /// until the next call.
    pub fn service_timers(&self) {
        for timer in self.timers.iter() {
            timer.visited.set(false);
        }

        // Last visited timer that is still in this list.
        let mut anchor: Option<&'a SoftTimer<'a>> = None;
        let mut cursor = self.timers.head();
        while let Some(timer) = cursor {
            let mut fired = false;
            if !timer.visited.get() {
                timer.visited.set(true);
                if timer.remaining.load(Ordering::Relaxed) == 0 {
                    self.fire(timer);
                    fired = true;
                }
            }

            if fired {
                // The callback may have unlinked this timer, the one after
                // it or the anchor, or moved any of them to another
                // registry. Links of timers still in this list are intact.
                anchor = if self.timers.contains(timer) {
                    Some(timer)
                } else {
                    anchor.filter(|&prev| self.timers.contains(prev))
                };
                cursor = match anchor {
                    Some(prev) => prev.next.get(),
                    // Everything we could resume from is gone. Visited
                    // timers are skipped on the way back.
                    None => self.timers.head(),
                };
            } else {
                anchor = Some(timer);
                cursor = timer.next.get();
            }
        }
    }

    fn fire(&self, timer: &'a SoftTimer<'a>) {
        if CONFIG.trace_timers {
            debug!(
                "soft timers: fire {:?} after {} ticks",
                timer.mode.get(),
                timer.period.get()
            );
        }

        match timer.mode.get() {
            TimerMode::OneShot => {
                // Unlink first so the client can re-arm the same handle.
                self.unlink(timer);
                timer.fire_client();
            }
            TimerMode::Periodic => {
                timer.fire_client();
                // Unless the client removed it, start the next period.
                if timer.linked.get() {
                    timer.remaining.store(timer.period.get(), Ordering::Relaxed);
                }
            }
        }
    }

    fn unlink(&self, timer: &'a SoftTimer<'a>) -> bool {
        self.mask.atomic(|| {
            let removed = self.timers.remove(timer);
            if removed {
                timer.linked.set(false);
            }
            removed
        })
    }
}
