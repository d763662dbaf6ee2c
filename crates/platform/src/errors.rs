//! Errors for the `talus-platform` crate.

use crate::types::Word;
use thiserror::Error;

/// A raw error number reported by the kernel, exactly as it arrived in the
/// result register. Mapping it into any higher-level error taxonomy is the
/// responsibility of the layers above.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("kernel call failed (raw error number: {_0})")]
pub struct KernelError(pub i32);

/// A [Result] type for the [KernelError].
pub type KernelResult<T> = Result<T, KernelError>;

/// Classifies a raw result word from a kernel call.
///
/// Words in the kernel's reserved negative range are failures carrying an
/// error number; everything else is a successful result. The bound is the
/// last 4096 values of the word space, the same check musl applies:
/// <https://git.musl-libc.org/cgit/musl/tree/src/internal/syscall_ret.c>
#[inline]
pub const fn from_ret(value: Word) -> KernelResult<Word> {
    if value > -4096isize as Word {
        // The range check above keeps the cast from ever truncating a
        // legitimate result.
        Err(KernelError(-(value as i32)))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_words_pass_through() {
        assert_eq!(from_ret(0), Ok(0));
        assert_eq!(from_ret(42), Ok(42));
        // Full-width results such as mapped addresses stay intact.
        assert_eq!(from_ret(0x7f12_3456_7000), Ok(0x7f12_3456_7000));
    }

    #[test]
    fn test_error_range_is_classified() {
        assert_eq!(from_ret(-1isize as Word), Err(KernelError(1)));
        assert_eq!(from_ret(-38isize as Word), Err(KernelError(38)));
        assert_eq!(from_ret(-4095isize as Word), Err(KernelError(4095)));
    }

    #[test]
    fn test_musl_boundary() {
        // -4096 itself is outside the reserved range and counts as success.
        assert_eq!(from_ret(-4096isize as Word), Ok(-4096isize as Word));
    }
}
