//! STORM Core definitions
//!
//! This crate holds the constants describing the STORM Core demo SoC: the memory map of the IO
//! devices, the internal system coprocessor register set and the reference output of the demo
//! program. It does not hold any code touching the hardware, so that the same definitions can be
//! used from the firmware, from host tooling, or from other software targeting the same SoC.

#![cfg_attr(not(test), no_std)]

pub mod regs;

// ——————————————————————————————— Memory Map ——————————————————————————————— //

/// IO device locations of the demo SoC.
///
/// The addresses are given exactly as the SoC documents them. They are wider than 32 bits, a
/// 32-bit core only sees the low word (see [`bus_address`]).
pub mod memory_map {
    /// General purpose output port (32-bit, write-only for the demo).
    pub const GPIO_OUT: u64 = 0xF_FFFF_E020;
    /// General purpose input port (32-bit). Reserved, the demo never reads it.
    pub const GPIO_IN: u64 = 0xF_FFFF_E024;

    /// Width of the GPIO registers, in bytes.
    pub const GPIO_WIDTH: usize = 4;

    /// Returns the address as seen on the core's bus.
    ///
    /// The conversion truncates to the native pointer width, which on the 32-bit core keeps the
    /// low word of the documented address.
    pub const fn bus_address(addr: u64) -> usize {
        addr as usize
    }
}

// ———————————————————————————— Fibonacci Output ———————————————————————————— //

/// Reference output of the demo program.
pub mod fibonacci {
    /// Number of values emitted per period of the output loop.
    pub const PERIOD: usize = 31;

    /// Value written once to the output port before the first period.
    pub const CLEAR_VALUE: u32 = 0;

    /// The values emitted by one period of the output loop, in order.
    pub const SEQUENCE: [u32; PERIOD] = sequence();

    /// Returns the value emitted at the given emission index (the initial clear excluded).
    pub const fn value_at(emission: usize) -> u32 {
        SEQUENCE[emission % PERIOD]
    }

    const fn sequence() -> [u32; PERIOD] {
        let mut values = [0u32; PERIOD];
        let mut num_a: u32 = 0;
        let mut num_b: u32 = 1;
        let mut i = 0;
        while i < PERIOD {
            values[i] = num_a;
            let tmp = num_a.wrapping_add(num_b);
            num_a = num_b;
            num_b = tmp;
            i += 1;
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::fibonacci::{value_at, PERIOD, SEQUENCE};
    use super::memory_map::{GPIO_IN, GPIO_OUT, GPIO_WIDTH};

    #[rustfmt::skip]
    const EXPECTED: [u32; 31] = [
        0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584, 4181, 6765,
        10946, 17711, 28657, 46368, 75025, 121393, 196418, 317811, 514229, 832040,
    ];

    #[test]
    fn reference_sequence() {
        assert_eq!(SEQUENCE, EXPECTED);
        assert_eq!(SEQUENCE[PERIOD - 1], 832040);
    }

    #[test]
    fn value_at_wraps_around_the_period() {
        assert_eq!(value_at(0), 0);
        assert_eq!(value_at(30), 832040);
        assert_eq!(value_at(31), 0);
        assert_eq!(value_at(33), 1);
        for n in 0..200 {
            assert_eq!(value_at(n), EXPECTED[n % 31]);
        }
    }

    #[test]
    fn gpio_layout() {
        assert_eq!(GPIO_IN - GPIO_OUT, GPIO_WIDTH as u64);
        // The 32-bit core sees the low word only
        assert_eq!(GPIO_OUT as u32, 0xFFFF_E020);
        assert_eq!(GPIO_IN as u32, 0xFFFF_E024);
    }
}
