//! Process startup sequence.
//!
//! The loader jumps to `_start` with the initial stack image at the stack
//! pointer. The System V ABI mandates two things before any further
//! control transfer: `%rsp` 16-byte aligned and a zero `%rbp` marking the
//! deepest frame for stack walkers. The raw, pre-alignment pointer is what
//! the runtime entry function receives; alignment adjusts the register,
//! never the image it points at.
//!
//! `_start_c` is the runtime entry function, normally registered with the
//! `#[rt_entry]` attribute from `talus-platform-proc`. It is defined to
//! terminate the process, so falling past the call is a fatal logic error
//! and lands on `hlt` rather than in unrelated memory.
//!
//! `_start` is weak: an embedding application that needs its own startup
//! sequence overrides it with a strong definition of the same name.

#[cfg(feature = "start")]
core::arch::global_asm!(
    r#"
    .pushsection .text._start, "ax", @progbits
    .weak _start
    .type _start, @function
_start:
    xor  ebp, ebp
    mov  rdi, rsp
    and  rsp, -16
    call _start_c
    hlt
    .size _start, . - _start
    .popsection
    "#
);

// Hosted test builds that enable `start` still assemble the block above,
// so the entry symbol has to resolve; the process entry itself stays the
// host libc's strong `_start`.
#[cfg(all(test, feature = "start"))]
#[no_mangle]
extern "C" fn _start_c(_stack: *const crate::types::Word) -> ! {
    unreachable!("the test harness never routes through _start")
}
