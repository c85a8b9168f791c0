// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Software timers multiplexed over one periodic hardware timer interrupt.
//!
//! The crate holds the timer registry ([`SoftTimerMux`]), the caller-owned
//! timer handles ([`SoftTimer`]) and the small amount of support code boards
//! need to wire them up: a debug output channel, static allocation macros and
//! the [`InterruptMask`](platform::InterruptMask) seam that chips implement.
//!
//! Nothing here allocates. All `unsafe` code is limited to the debug writer
//! and the static allocation macros.

#![warn(unreachable_pub)]
#![no_std]

pub mod collections;
#[macro_use]
pub mod debug;
pub mod hil;
pub mod platform;
pub mod soft_timer;
pub mod utilities;

mod config;
mod errorcode;

pub use crate::errorcode::ErrorCode;
pub use crate::soft_timer::{SoftTimer, SoftTimerMux};
