//! Bulk memory fast paths for `x86_64`.
//!
//! The ascending copy and the fill ride the string instructions
//! (`rep movsb`, `rep stosb`); the ABI guarantees the direction flag is
//! clear at every function boundary, so both run ascending without
//! touching it. The descending copy deliberately avoids `std`/`cld`
//! altogether: an explicit indexed loop keeps the traversal direction out
//! of processor-global state, so no caller can ever observe it changed.

use core::arch::asm;

/// Copy `len` bytes from `src` to `dst` in ascending address order with
/// the bulk forward copy instruction.
///
/// # Safety
/// `src` must be readable and `dst` writable for `len` bytes, and `dst`
/// must not overlap `src` from above within `len` bytes.
#[inline]
pub(crate) unsafe fn copy_forward(dst: *mut u8, src: *const u8, len: usize) {
    asm!(
        "rep movsb",
        inout("rdi") dst => _,
        inout("rsi") src => _,
        inout("rcx") len => _,
        options(nostack, preserves_flags),
    );
}

/// Copy `len` bytes from `src` to `dst` in descending address order,
/// reading every byte before the ascending pass could have clobbered it.
///
/// # Safety
/// `src` must be readable and `dst` writable for `len` bytes.
#[inline]
pub(crate) unsafe fn copy_backward(dst: *mut u8, src: *const u8, len: usize) {
    if len == 0 {
        return;
    }
    // The movs between `dec` and `jnz` leave RFLAGS alone, so the loop
    // condition is the decrement hitting zero after copying index 0.
    asm!(
        "2:",
        "dec {i}",
        "mov {b}, byte ptr [{src} + {i}]",
        "mov byte ptr [{dst} + {i}], {b}",
        "jnz 2b",
        i = inout(reg) len => _,
        src = in(reg) src,
        dst = in(reg) dst,
        b = out(reg_byte) _,
        options(nostack),
    );
}

/// Store `byte` to every address in `[dst, dst + len)` with the bulk
/// store instruction.
///
/// # Safety
/// `dst` must be writable for `len` bytes.
#[inline]
pub(crate) unsafe fn fill(dst: *mut u8, byte: u8, len: usize) {
    asm!(
        "rep stosb",
        inout("rdi") dst => _,
        inout("rcx") len => _,
        in("al") byte,
        options(nostack, preserves_flags),
    );
}

// The C names, weakly bound: the Rust functions are the default
// implementations and a strong definition of the same name in the
// embedding application overrides them at link time. `memcpy` and
// `memmove` are two spellings of the one overlap-safe contract.
#[cfg(feature = "mem-symbols")]
core::arch::global_asm!(
    r#"
    .pushsection .text.memcpy, "ax", @progbits
    .weak memcpy
    .weak memmove
    .type memcpy, @function
    .type memmove, @function
memcpy:
memmove:
    jmp {copy}
    .size memcpy, . - memcpy
    .popsection

    .pushsection .text.memset, "ax", @progbits
    .weak memset
    .type memset, @function
memset:
    jmp {fill}
    .size memset, . - memset
    .popsection
    "#,
    copy = sym crate::mem::copy_bytes,
    fill = sym crate::mem::fill_bytes,
);

#[cfg(all(test, feature = "mem-symbols"))]
mod symbol_tests {
    extern "C" {
        fn memcpy(dst: *mut u8, src: *const u8, len: usize) -> *mut u8;
        fn memmove(dst: *mut u8, src: *const u8, len: usize) -> *mut u8;
        fn memset(dst: *mut u8, byte: i32, len: usize) -> *mut u8;
    }

    #[test]
    fn test_copy_symbols_resolve_and_copy() {
        let src = [7u8, 11, 13, 17, 19];
        let mut a = [0u8; 5];
        let mut b = [0u8; 5];
        unsafe {
            memcpy(a.as_mut_ptr(), src.as_ptr(), 5);
            memmove(b.as_mut_ptr(), src.as_ptr(), 5);
        }
        assert_eq!(a, src);
        assert_eq!(b, src);
    }

    #[test]
    fn test_fill_symbol_resolves_and_fills() {
        let mut buf = [0u8; 8];
        let ret = unsafe { memset(buf.as_mut_ptr(), 0x5A, 8) };
        assert_eq!(buf, [0x5A; 8]);
        assert_eq!(ret, buf.as_mut_ptr());
    }

    #[test]
    fn test_overlapping_memmove_is_safe() {
        let mut buf: Vec<u8> = (0u8..32).collect();
        let want: Vec<u8> = buf.clone();
        unsafe { memmove(buf.as_mut_ptr().add(4), buf.as_ptr(), 24) };
        assert_eq!(&buf[4..28], &want[0..24]);
    }
}
