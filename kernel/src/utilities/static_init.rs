// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Support for statically initializing objects in memory.
//!
//! Timer handles and the registry are caller-owned and must outlive their
//! registration. On a board that simply means giving them `'static` storage:
//!
//! ```ignore
//! let timer = unsafe { static_init!(SoftTimer<'static>, SoftTimer::new()) };
//! ```

/// Allocates a statically-sized global buffer and initializes it with `$e`,
/// returning a `&'static mut $T`.
///
/// Because this instantiates a static object, `$T` cannot name generic
/// parameters of the enclosing function.
///
/// # Safety
///
/// The macro writes to a global without any locking. The code that expands
/// it must run at most once, otherwise the first value is overwritten
/// without running its destructor while references to it may still exist.
#[macro_export]
macro_rules! static_init {
    ($T:ty, $e:expr $(,)?) => {{
        let buf = $crate::static_buf!($T);
        buf.write($e)
    }};
}

/// Allocates a statically-sized global buffer for a `$T` without
/// initializing it, returning `&'static mut MaybeUninit<$T>`.
///
/// # Safety
///
/// Same requirements as [`static_init!`].
#[macro_export]
macro_rules! static_buf {
    ($T:ty $(,)?) => {{
        // Statically allocate a read-write buffer for the value without
        // actually writing anything.
        static mut BUF: core::mem::MaybeUninit<$T> = core::mem::MaybeUninit::uninit();
        &mut *core::ptr::addr_of_mut!(BUF)
    }};
}
