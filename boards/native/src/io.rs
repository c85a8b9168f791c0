// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

use std::io::Write;

use stimer::debug::{self, IoWrite};
use stimer::static_init;

/// Sends `debug!` output to stdout.
pub struct Writer;

impl IoWrite for Writer {
    fn write(&mut self, buf: &[u8]) -> usize {
        let mut stdout = std::io::stdout();
        match stdout.write_all(buf).and_then(|()| stdout.flush()) {
            Ok(()) => buf.len(),
            Err(_) => 0,
        }
    }
}

/// Route `debug!` to stdout.
///
/// # Safety
///
/// Call once, from the main thread, before any timer is created.
pub unsafe fn init() {
    let writer = static_init!(Writer, Writer);
    debug::set_debug_writer(writer);
}
