// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Generic support for POSIX x64 platforms (used for testing).
//!
//! Runs the software timers as a user space process. A periodic `SIGALRM`
//! plays the part of the hardware timer interrupt, and masking signals plays
//! the part of disabling interrupts. Since this crate only exists to run on
//! a development host, it depends on std.

pub mod support;
pub mod systick;

pub use crate::support::SignalMask;
pub use crate::systick::PeriodicTick;
