//! Simulation subcommands
//!
//! The demo is executed on the host against ports living in host memory, instead of the GPIO
//! output of the SoC.

use std::fmt;
use std::process::ExitCode;

use storm_abi::fibonacci::{self, OutputLoop};
use storm_abi::port::{Port, RecordingPort};
use storm_core::fibonacci::{value_at, CLEAR_VALUE, PERIOD};

use crate::config::{Config, DEFAULT_EMISSIONS, DEFAULT_TICKS};
use crate::{CheckArgs, RunArgs};

// —————————————————————————————————— Run ——————————————————————————————————— //

/// Simulate the demo and print every write to the output port.
pub fn run(args: &RunArgs, cfg: &Config) -> ExitCode {
    let emissions = resolve_emissions(args, cfg);
    log::info!("Simulating the Fibonacci demo for {} emissions", emissions);

    let mut port = RecordingPort::new();
    fibonacci::simulate(&mut port, emissions);

    let Some((clear, values)) = port.writes().split_first() else {
        log::error!("The demo did not write to the output port");
        return ExitCode::FAILURE;
    };
    println!("clear: {}", clear);
    for (n, value) in values.iter().enumerate() {
        println!("{:>6}: {}", n, value);
    }

    ExitCode::SUCCESS
}

/// Number of emissions to simulate: command line, then configuration, then default.
pub fn resolve_emissions(args: &RunArgs, cfg: &Config) -> usize {
    args.emissions
        .or(cfg.simulation.emissions)
        .unwrap_or(DEFAULT_EMISSIONS)
}

// ————————————————————————————————— Check —————————————————————————————————— //

/// Simulate the demo and verify its output against the reference sequence.
pub fn check(args: &CheckArgs, cfg: &Config) -> ExitCode {
    let ticks = resolve_ticks(args, cfg);
    log::info!("Checking the Fibonacci demo over {} ticks", ticks);

    let mut port = CheckingPort::new();
    let output = fibonacci::simulate(&mut port, ticks);

    match port.finish(&output, ticks) {
        Ok(()) => {
            log::info!(
                "Ok: {} values over {} periods, loop still running at position {}",
                ticks,
                ticks / PERIOD,
                output.position()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Number of ticks to check: command line, then configuration, then default.
pub fn resolve_ticks(args: &CheckArgs, cfg: &Config) -> usize {
    args.ticks.or(cfg.simulation.ticks).unwrap_or(DEFAULT_TICKS)
}

/// A deviation from the expected output.
#[derive(Debug, PartialEq, Eq)]
pub enum Mismatch {
    /// The number of writes does not match one clear plus one write per tick.
    WriteCount { expected: usize, found: usize },
    /// The first write is not the clear value.
    MissingClear { found: u32 },
    /// A value differs from the reference sequence.
    Value {
        emission: usize,
        expected: u32,
        found: u32,
    },
    /// The loop is not where it should be after the simulated ticks.
    Position { expected: usize, found: usize },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::WriteCount { expected, found } => {
                write!(f, "Expected {} writes, found {}", expected, found)
            }
            Mismatch::MissingClear { found } => {
                write!(f, "Expected the output to be cleared first, found {}", found)
            }
            Mismatch::Value {
                emission,
                expected,
                found,
            } => write!(
                f,
                "Emission {}: expected {}, found {}",
                emission, expected, found
            ),
            Mismatch::Position { expected, found } => write!(
                f,
                "Expected the loop at position {} of its period, found {}",
                expected, found
            ),
        }
    }
}

// ————————————————————————————— Checking Port —————————————————————————————— //

/// A port verifying each write against the reference output as it arrives.
///
/// Only the first mismatch is kept, so memory use does not depend on the number of writes.
#[derive(Debug, Default)]
pub struct CheckingPort {
    writes: usize,
    mismatch: Option<Mismatch>,
}

impl CheckingPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes received so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Verify the write count and the final state of a simulation of `ticks` ticks.
    pub fn finish(self, output: &OutputLoop, ticks: usize) -> Result<(), Mismatch> {
        if let Some(mismatch) = self.mismatch {
            return Err(mismatch);
        }
        if self.writes != ticks + 1 {
            return Err(Mismatch::WriteCount {
                expected: ticks + 1,
                found: self.writes,
            });
        }
        if output.position() != ticks % PERIOD {
            return Err(Mismatch::Position {
                expected: ticks % PERIOD,
                found: output.position(),
            });
        }
        Ok(())
    }
}

impl Port for CheckingPort {
    fn write(&mut self, value: u32) {
        if self.mismatch.is_none() {
            if self.writes == 0 {
                if value != CLEAR_VALUE {
                    self.mismatch = Some(Mismatch::MissingClear { found: value });
                }
            } else {
                let emission = self.writes - 1;
                let expected = value_at(emission);
                if value != expected {
                    self.mismatch = Some(Mismatch::Value {
                        emission,
                        expected,
                        found: value,
                    });
                }
            }
        }
        self.writes += 1;
    }
}
