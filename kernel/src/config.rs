// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Data structure for storing compile-time configuration options.
//!
//! Options live in a `const` object rather than behind `#[cfg]` so that every
//! code path is type-checked even when disabled. The compiler folds the
//! constant afterwards, so a disabled option costs nothing in the binary.
//!
//! Values are picked from cargo features on the `stimer` crate:
//!
//! ```toml
//! [dependencies]
//! stimer = { path = "../../kernel", features = ["trace_timers"] }
//! ```

/// Data structure holding compile-time configuration options.
pub(crate) struct Config {
    /// Whether the registry should print a debug line every time a timer is
    /// created, removed or fired.
    ///
    /// The tick handler never prints, regardless of this option.
    pub(crate) trace_timers: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined.
pub(crate) const CONFIG: Config = Config {
    trace_timers: cfg!(feature = "trace_timers"),
};
