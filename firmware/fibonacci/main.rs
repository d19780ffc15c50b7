//! STORM Core demo program
//!
//! Outputs the Fibonacci sequence on the GPIO output port, forever.

#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_main)]

#[cfg(all(target_os = "none", not(target_arch = "arm")))]
compile_error!("The Fibonacci demo only runs on the ARM-compatible STORM Core");

use storm_abi::fibonacci;
use storm_abi::port::MmioPort;

storm_abi::setup_binary!(demo);

fn demo() -> ! {
    log::info!("Hello from the Fibonacci demo!");

    // SAFETY: we are running on the demo SoC, and this is the only handle on the output port.
    let mut gpio_out = unsafe { MmioPort::gpio_out() };
    fibonacci::run(&mut gpio_out);
}

/// Host builds only exist so that the workspace can be checked as a whole, the program itself
/// must run on the SoC (or be simulated with `runner run`).
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {
    // Use demo to avoid "never used" warnings.
    let _ = demo;

    eprintln!("The Fibonacci demo targets the STORM Core, use `runner run` to simulate it");
    std::process::exit(1);
}
