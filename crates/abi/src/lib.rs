//! STORM ABI
//!
//! Everything a program running on the STORM Core demo SoC needs to get started: the entry point
//! and panic handler boilerplate, a handle on the memory-mapped IO ports and the demo's output
//! loop.
//!
//! The SoC exposes no console, the only external surface are the GPIO words. Programs log through
//! the `log` facade, which stays silent on hardware and is picked up by the host runner when the
//! same code is simulated.
#![cfg_attr(not(test), no_std)]

#[cfg(any(test, feature = "host"))]
extern crate alloc;

use core::hint;

pub mod fibonacci;
pub mod port;

pub use log;
pub use storm_core;

// ————————————————————————————— Core Control ——————————————————————————————— //

/// Park the core.
///
/// There is nothing to return to on the SoC, the core spins until an external reset.
pub fn park() -> ! {
    loop {
        hint::spin_loop();
    }
}

// —————————————————————————————— Binary Setup —————————————————————————————— //

/// Configure the entry point and panic handler of a STORM Core program.
///
/// The entry point loads the stack pointer from the `_stack_top` symbol of the linker script and
/// jumps into the provided function, which must never return. Nothing is emitted when building for
/// another target, so that the program's crate can still be checked on the host.
#[macro_export]
macro_rules! setup_binary {
    ($path:path) => {
        // The assembly entry point
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        core::arch::global_asm!(
            r#"
            .section .text._start, "ax"
            .align 4
            .global _start
            _start:
                // Load the stack pointer and jump into the program
                ldr sp, ={stack_top}
                b {entry}
            "#,
            entry = sym _binary_start,
            stack_top = sym _stack_top,
        );

        #[cfg(all(target_arch = "arm", target_os = "none"))]
        pub extern "C" fn _binary_start() -> ! {
            // Validate the signature of the entry point.
            let f: fn() -> ! = $path;

            f();
        }

        // Defined in the linker script
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        extern "C" {
            pub(crate) static _stack_top: u8;
        }

        // Also include the panic handler
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        $crate::binary_panic!();
    };
}

/// Configure a panic handler for a STORM Core program.
///
/// There is nowhere to report the panic on the SoC, the handler logs it and parks the core.
#[macro_export]
macro_rules! binary_panic {
    () => {
        #[panic_handler]
        fn panic(info: &core::panic::PanicInfo) -> ! {
            $crate::log::error!("Panic: {:#?} ", info);
            $crate::park();
        }
    };
}
