extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Registers a function as the runtime entry function: the target the
/// startup sequence transfers to once the frame pointer is zeroed and the
/// stack is aligned.
///
/// The function keeps its name and body, must take the initial
/// `StackImage` by value, and must diverge; the startup sequence halts if
/// it ever returns, so terminating the process is this function's job.
/// The macro adds the `_start_c` glue symbol that wraps the captured raw
/// stack pointer in a `StackImage` and calls through.
#[proc_macro_attribute]
pub fn rt_entry(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(input as ItemFn);
    let fn_name = &input_fn.sig.ident;

    let expanded = quote! {
        #input_fn

        #[doc = "Runtime entry glue, called by the startup sequence with the raw initial stack pointer."]
        #[cfg(all(target_arch = "x86_64", target_os = "linux"))]
        #[no_mangle]
        pub extern "C" fn _start_c(stack: *const talus_platform::Word) -> ! {
            // The pre-alignment pointer is the image; the loader keeps it
            // valid for the life of the process.
            let image = unsafe { talus_platform::stack::StackImage::from_raw(stack) };
            #fn_name(image)
        }
    };

    TokenStream::from(expanded)
}
