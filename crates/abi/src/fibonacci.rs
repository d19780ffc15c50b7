//! Fibonacci output loop
//!
//! The demo program clears the output port once, then writes the Fibonacci sequence to it forever.
//! Each period restarts from `0, 1` and emits [`PERIOD`] values, one per tick. Terms are computed
//! with wrapping arithmetic: the last term of a period (832040) fits comfortably in 32 bits, a
//! longer period would silently wrap around.

use storm_core::fibonacci::{CLEAR_VALUE, PERIOD};

use crate::port::Port;

/// The state of the output loop.
///
/// The loop has a single state, running, and each tick is a self transition. There is no way out
/// of it other than resetting the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLoop {
    /// Next value to emit.
    num_a: u32,
    /// Term following `num_a`.
    num_b: u32,
    /// Number of values emitted in the current period.
    i: usize,
}

impl OutputLoop {
    /// Clear the output port and return a loop positioned at the start of its first period.
    pub fn start<P: Port>(port: &mut P) -> Self {
        port.write(CLEAR_VALUE);
        log::debug!("Output cleared, starting Fibonacci loop");
        Self::new_period()
    }

    fn new_period() -> Self {
        OutputLoop {
            num_a: 0,
            num_b: 1,
            i: 0,
        }
    }

    /// Emit the next value of the sequence.
    pub fn tick<P: Port>(&mut self, port: &mut P) {
        port.write(self.num_a);

        let tmp = self.num_a.wrapping_add(self.num_b);
        self.num_a = self.num_b;
        self.num_b = tmp;

        self.i += 1;
        if self.i == PERIOD {
            log::trace!("Period complete, restarting from 0");
            *self = Self::new_period();
        }
    }

    /// Returns the number of values already emitted in the current period.
    pub fn position(&self) -> usize {
        self.i
    }

    /// Returns the value the next tick will emit.
    pub fn next_value(&self) -> u32 {
        self.num_a
    }
}

/// Run the demo on the given port, forever.
pub fn run<P: Port>(port: &mut P) -> ! {
    let mut output = OutputLoop::start(port);
    loop {
        output.tick(port);
    }
}

/// Run the demo for a bounded number of ticks, and return the loop state.
///
/// The loop keeps running after the last tick, the returned state can be ticked further.
pub fn simulate<P: Port>(port: &mut P, ticks: usize) -> OutputLoop {
    let mut output = OutputLoop::start(port);
    for _ in 0..ticks {
        output.tick(port);
    }
    output
}

#[cfg(test)]
mod tests {
    use storm_core::fibonacci::{value_at, SEQUENCE};

    use super::*;
    use crate::port::RecordingPort;

    #[test]
    fn clears_before_emitting() {
        let mut port = RecordingPort::new();
        let output = OutputLoop::start(&mut port);

        assert_eq!(port.writes(), &[0]);
        assert_eq!(output.position(), 0);
        assert_eq!(output.next_value(), 0);
    }

    #[test]
    fn first_period() {
        let mut port = RecordingPort::new();
        simulate(&mut port, PERIOD);

        let writes = port.writes();
        assert_eq!(writes.len(), PERIOD + 1);
        assert_eq!(writes[0], CLEAR_VALUE);
        assert_eq!(&writes[1..], &SEQUENCE);
        assert_eq!(writes[PERIOD], 832040);
    }

    #[test]
    fn sixty_five_emissions() {
        let mut port = RecordingPort::new();
        simulate(&mut port, 65);

        // Two full periods, then the first three values of the third one
        let mut expected = SEQUENCE.to_vec();
        expected.extend_from_slice(&SEQUENCE);
        expected.extend_from_slice(&SEQUENCE[0..3]);
        assert_eq!(expected.len(), 65);
        assert_eq!(&port.writes()[1..], expected.as_slice());

        let cyclic: Vec<u32> = (0..65).map(value_at).collect();
        assert_eq!(expected, cyclic);
        assert_eq!(port.writes()[31], 832040);
        assert_eq!(port.writes()[32], 0);
    }

    #[test]
    fn sequence_is_periodic() {
        let mut port = RecordingPort::new();
        simulate(&mut port, 10 * PERIOD + 7);

        for (n, value) in port.writes()[1..].iter().enumerate() {
            assert_eq!(*value, value_at(n), "emission {}", n);
        }
    }

    #[test]
    fn period_restarts_from_zero() {
        let mut port = RecordingPort::new();
        let output = simulate(&mut port, PERIOD);

        assert_eq!(output.position(), 0);
        assert_eq!(output, OutputLoop::new_period());
    }

    #[test]
    fn still_running_after_many_ticks() {
        let mut port = RecordingPort::new();
        let mut output = simulate(&mut port, 10_000);

        assert_eq!(port.len(), 10_001);
        assert_eq!(output.position(), 10_000 % PERIOD);
        assert_eq!(output.next_value(), value_at(10_000));

        // The loop accepts further ticks
        output.tick(&mut port);
        assert_eq!(port.len(), 10_002);
        assert_eq!(port.writes()[10_001], value_at(10_000));
    }

    #[test]
    fn single_clear_only() {
        let mut port = RecordingPort::new();
        simulate(&mut port, 3 * PERIOD);

        // Zeros only appear as the clear and at the start of each period
        let zeros: Vec<usize> = port
            .writes()
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(zeros, vec![0, 1, 1 + PERIOD, 1 + 2 * PERIOD]);
    }
}
