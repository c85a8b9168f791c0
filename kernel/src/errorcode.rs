// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Standard error enum for invoking operations

/// Errors returned by the software timer interfaces.
///
/// The numeric values are stable so board code can report them as plain
/// integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// The state requested is already set
    ALREADY = 2,
    /// The component has not been initialized
    OFF = 3,
    /// An invalid parameter was passed
    INVAL = 5,
    /// Parameter passed was too large
    SIZE = 6,
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

#[cfg(test)]
mod test {
    use super::ErrorCode;

    #[test]
    fn numeric_values() {
        assert_eq!(usize::from(ErrorCode::ALREADY), 2);
        assert_eq!(usize::from(ErrorCode::OFF), 3);
        assert_eq!(usize::from(ErrorCode::INVAL), 5);
        assert_eq!(usize::from(ErrorCode::SIZE), 6);
    }
}
