//! This module binds the native kernel for the compilation target and
//! exposes the seven fixed-arity system call entry points on it.

use crate::{traits::KernelCall, types::Word};
use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(all(target_arch = "x86_64", target_os = "linux"))] {
        #[doc = "The kernel reached by the `syscall` instruction on the `x86_64` Linux target."]
        pub(crate) type NativeKernel = crate::x86_64::LinuxKernel;
    } else {
        #[doc = "No-op stand-in for targets without a supported kernel interface."]
        #[derive(Debug)]
        pub(crate) struct NoopKernel;

        impl KernelCall for NoopKernel {
            unsafe fn kernel_call(_number: Word, _args: &[Word]) -> Word {
                0
            }
        }

        #[doc = "No-op stand-in for targets without a supported kernel interface."]
        pub(crate) type NativeKernel = NoopKernel;
    }
}

/// Transfer control into the native kernel with up to six arguments.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn kernel_call(number: Word, args: &[Word]) -> Word {
    NativeKernel::kernel_call(number, args)
}

/// Invoke a system call with no arguments on the native kernel.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn syscall0(number: Word) -> Word {
    NativeKernel::syscall0(number)
}

/// Invoke a system call with one argument on the native kernel.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn syscall1(number: Word, arg1: Word) -> Word {
    NativeKernel::syscall1(number, arg1)
}

/// Invoke a system call with two arguments on the native kernel.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn syscall2(number: Word, arg1: Word, arg2: Word) -> Word {
    NativeKernel::syscall2(number, arg1, arg2)
}

/// Invoke a system call with three arguments on the native kernel.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn syscall3(number: Word, arg1: Word, arg2: Word, arg3: Word) -> Word {
    NativeKernel::syscall3(number, arg1, arg2, arg3)
}

/// Invoke a system call with four arguments on the native kernel.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn syscall4(number: Word, arg1: Word, arg2: Word, arg3: Word, arg4: Word) -> Word {
    NativeKernel::syscall4(number, arg1, arg2, arg3, arg4)
}

/// Invoke a system call with five arguments on the native kernel.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn syscall5(
    number: Word,
    arg1: Word,
    arg2: Word,
    arg3: Word,
    arg4: Word,
    arg5: Word,
) -> Word {
    NativeKernel::syscall5(number, arg1, arg2, arg3, arg4, arg5)
}

/// Invoke a system call with six arguments on the native kernel.
///
/// # Safety
/// See [KernelCall::kernel_call].
#[inline]
pub unsafe fn syscall6(
    number: Word,
    arg1: Word,
    arg2: Word,
    arg3: Word,
    arg4: Word,
    arg5: Word,
    arg6: Word,
) -> Word {
    NativeKernel::syscall6(number, arg1, arg2, arg3, arg4, arg5, arg6)
}


#[cfg(all(test, target_arch = "x86_64", target_os = "linux"))]
mod linux_tests {
    use super::*;
    use crate::errors::{from_ret, KernelError};
    use std::os::fd::AsRawFd;

    const SYS_WRITE: Word = 1;
    const SYS_GETPID: Word = 39;

    #[test]
    fn test_getpid_matches_std() {
        let pid = unsafe { syscall0(SYS_GETPID) };
        assert_eq!(pid as u32, std::process::id());
    }

    #[test]
    fn test_write_reports_full_length() {
        let file = std::fs::OpenOptions::new().write(true).open("/dev/null").unwrap();
        let buf = b"talus";
        let ret = unsafe {
            syscall3(SYS_WRITE, file.as_raw_fd() as Word, buf.as_ptr() as Word, buf.len())
        };
        assert_eq!(from_ret(ret), Ok(buf.len()));
    }

    #[test]
    fn test_invalid_number_lands_in_error_range() {
        // Far above any allocated syscall number; 38 is ENOSYS.
        let ret = unsafe { syscall0(100_000_000) };
        assert_eq!(from_ret(ret), Err(KernelError(38)));
    }

    #[test]
    fn test_slice_dispatch_matches_fixed_arity() {
        let direct = unsafe { syscall0(SYS_GETPID) };
        let dispatched = unsafe { kernel_call(SYS_GETPID, &[]) };
        assert_eq!(direct, dispatched);
    }
}
