#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), no_std)]

#[cfg(feature = "tracing")]
extern crate alloc;

pub mod errors;

pub mod kernel;

pub mod mem;

pub mod stack;

#[cfg(feature = "tracing")]
pub mod tracing;

mod traits;
pub use traits::KernelCall;

mod types;
pub use types::Word;

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
pub(crate) mod x86_64;

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
pub use x86_64::LinuxKernel;
