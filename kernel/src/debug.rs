// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Support for in-kernel debugging.
//!
//! A board registers an output sink once at startup with
//! [`set_debug_writer`]. After that, `debug!` prints a line prefixed with
//! the source location:
//!
//! ```ignore
//! debug!("timer {} fired", id);
//! ```
//!
//! Output is silently dropped until a sink is registered. `debug!` must only
//! be used from the task context, never from an interrupt handler.

use core::fmt::{Arguments, Result, Write};
use core::ptr::addr_of_mut;

/// Byte sink provided by the board, e.g. a UART or stdout.
pub trait IoWrite {
    /// Write out `buf`, returning the number of bytes consumed.
    fn write(&mut self, buf: &[u8]) -> usize;
}

static mut DEBUG_WRITER: Option<&'static mut dyn IoWrite> = None;

/// Register the sink used by `debug!`, replacing any previous one.
///
/// # Safety
///
/// Must be called from the task context while no `debug!` output is in
/// progress.
pub unsafe fn set_debug_writer(writer: &'static mut dyn IoWrite) {
    *addr_of_mut!(DEBUG_WRITER) = Some(writer);
}

/// Drop the registered sink; later `debug!` output is discarded.
///
/// # Safety
///
/// Same requirements as [`set_debug_writer`].
pub unsafe fn clear_debug_writer() {
    *addr_of_mut!(DEBUG_WRITER) = None;
}

struct DebugWriterWrapper<'w> {
    writer: &'w mut dyn IoWrite,
}

impl Write for DebugWriterWrapper<'_> {
    fn write_str(&mut self, s: &str) -> Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let written = self.writer.write(bytes);
            if written == 0 {
                // The sink is full, drop the rest of this line.
                break;
            }
            bytes = &bytes[written.min(bytes.len())..];
        }
        Ok(())
    }
}

pub fn begin_debug_fmt(args: Arguments, file_line: &(&'static str, u32)) {
    // Safety: the writer is only touched from the task context, which never
    // runs two `debug!` calls at once.
    let writer = unsafe { (*addr_of_mut!(DEBUG_WRITER)).as_deref_mut() };
    if let Some(writer) = writer {
        let mut wrapper = DebugWriterWrapper { writer };
        let (file, line) = *file_line;
        let _ = wrapper.write_fmt(format_args!("STIMER_DEBUG: {}:{}: ", file, line));
        let _ = wrapper.write_fmt(args);
        let _ = wrapper.write_str("\r\n");
    }
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print the location when hit
        $crate::debug!("")
    });
    ($($arg:tt)+) => ({
        $crate::debug::begin_debug_fmt(format_args!($($arg)+), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
}

#[cfg(test)]
mod test {
    extern crate std;

    use super::{clear_debug_writer, set_debug_writer, IoWrite};
    use std::boxed::Box;
    use std::string::String;
    use std::sync::Mutex;
    use std::vec::Vec;

    static CAPTURED: Mutex<Vec<u8>> = Mutex::new(Vec::new());

    struct Capture;

    impl IoWrite for Capture {
        fn write(&mut self, buf: &[u8]) -> usize {
            CAPTURED.lock().unwrap().extend_from_slice(buf);
            buf.len()
        }
    }

    #[test]
    fn prints_location_and_message() {
        let sink: &'static mut Capture = Box::leak(Box::new(Capture));
        unsafe { set_debug_writer(sink) };

        debug!("timer {} fired", 7);

        unsafe { clear_debug_writer() };
        debug!("dropped");

        let out = String::from_utf8_lossy(&CAPTURED.lock().unwrap()).into_owned();
        assert!(out.contains("STIMER_DEBUG: "));
        assert!(out.contains("debug.rs:"));
        assert!(out.contains(": timer 7 fired\r\n"));
        assert!(!out.contains("dropped"));
    }
}
