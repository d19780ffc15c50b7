//! Regs subcommand
//!
//! Prints the memory map of the demo SoC and the system coprocessor register map.

use std::process::ExitCode;

use storm_core::memory_map::{GPIO_IN, GPIO_OUT};
use storm_core::regs::{self, sys_ctrl_0, SYS_CP_REGISTERS, SYS_CTRL_0_BITS};

use crate::RegsArgs;

pub fn regs(args: &RegsArgs) -> ExitCode {
    match &args.name {
        Some(name) => match regs::lookup(name) {
            Some(value) => {
                println!("{} = {}", name, value);
                ExitCode::SUCCESS
            }
            None => {
                log::error!("Unknown register or bit name '{}'", name);
                ExitCode::FAILURE
            }
        },
        None => {
            print_map();
            ExitCode::SUCCESS
        }
    }
}

fn print_map() {
    println!("IO devices");
    println!("  {:<12} 0x{:09x}", "GPIO_OUT", GPIO_OUT);
    println!("  {:<12} 0x{:09x}", "GPIO_IN", GPIO_IN);

    println!("System coprocessor registers");
    for (name, idx) in SYS_CP_REGISTERS {
        println!("  {:<12} {:>2}", name, idx);
    }

    println!("SYS_CTRL_0 bits");
    for (name, pos) in SYS_CTRL_0_BITS {
        println!("  {:<12} {:>2}  0x{:08x}", name, pos, sys_ctrl_0::bit(*pos));
    }
    println!("  {:<12} 16-31 0x{:08x}", "MBC", sys_ctrl_0::MBC_MASK);
}
