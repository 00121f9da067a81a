//! Table-driven Moore state machines.
//!
//! A machine is an immutable array of state records; each record carries
//! an output pattern, a hold duration, and a next-state index per input
//! symbol. The transition is a pure function of (state, input). The table
//! is verified once at construction so a miswired static table surfaces
//! as an error instead of an index fault while the machine runs.

use ufmt::derive::uDebug;

/// One row of a Moore state table
#[derive(Clone, Copy, Debug)]
pub struct State<O: Copy, const NIN: usize> {
    /// Output pattern asserted while the machine sits in this state
    pub output: O,
    /// How long to hold this state before sampling the input again, in ms
    pub hold_ms: u32,
    /// Next-state index for each input symbol
    pub next: [u8; NIN],
}

/// State machine errors
#[derive(Debug, uDebug, PartialEq, Eq)]
pub enum FsmError {
    /// The table has no states
    EmptyTable,
    /// A next-state index points outside the table
    DanglingTransition,
    /// `step` was given an input symbol the table has no column for
    InputOutOfRange,
}

/// A Moore machine walking an immutable state table, starting at state 0
pub struct TableFsm<'a, O: Copy, const NIN: usize> {
    table: &'a [State<O, NIN>],
    current: usize,
}

impl<'a, O: Copy, const NIN: usize> TableFsm<'a, O, NIN> {
    /// Check the table once and wrap it.
    ///
    /// Every next-state index must land inside the table; next-state
    /// indices are `u8`, so tables are capped at 256 states.
    pub fn new(table: &'a [State<O, NIN>]) -> Result<TableFsm<'a, O, NIN>, FsmError> {
        if table.is_empty() {
            return Err(FsmError::EmptyTable);
        }
        for state in table {
            for &n in state.next.iter() {
                if n as usize >= table.len() {
                    return Err(FsmError::DanglingTransition);
                }
            }
        }
        Ok(TableFsm { table, current: 0 })
    }

    /// Take one transition for the given input symbol and return the new
    /// state's output.
    pub fn step(&mut self, input: usize) -> Result<O, FsmError> {
        // current is always in range: verified at construction and only
        // ever overwritten with verified next-state indices
        match self.table[self.current].next.get(input) {
            Some(&n) => {
                self.current = n as usize;
                Ok(self.table[self.current].output)
            }
            None => Err(FsmError::InputOutOfRange),
        }
    }

    /// Output of the current state
    pub fn output(&self) -> O {
        self.table[self.current].output
    }

    /// Hold duration of the current state in ms
    pub fn hold_ms(&self) -> u32 {
        self.table[self.current].hold_ms
    }

    /// Index of the current state
    pub fn state(&self) -> usize {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A two-intersection traffic light: go, warn, stop, ready.
    // Input bit 0 is a car waiting on the cross street.
    const GO: usize = 0;
    const WARN: usize = 1;
    const STOP: usize = 2;
    const READY: usize = 3;

    static LIGHTS: [State<u8, 2>; 4] = [
        State { output: 0b001, hold_ms: 3000, next: [GO as u8, WARN as u8] },
        State { output: 0b010, hold_ms: 500, next: [STOP as u8, STOP as u8] },
        State { output: 0b100, hold_ms: 2000, next: [READY as u8, READY as u8] },
        State { output: 0b110, hold_ms: 500, next: [GO as u8, GO as u8] },
    ];

    #[test]
    fn starts_at_state_zero() {
        let fsm = TableFsm::new(&LIGHTS).unwrap();
        assert_eq!(fsm.state(), GO);
        assert_eq!(fsm.output(), 0b001);
        assert_eq!(fsm.hold_ms(), 3000);
    }

    #[test]
    fn cycles_through_the_light_sequence() {
        let mut fsm = TableFsm::new(&LIGHTS).unwrap();
        // No cross traffic: stay green
        assert_eq!(fsm.step(0), Ok(0b001));
        assert_eq!(fsm.state(), GO);
        // Car arrives: warn, stop, ready, back to go
        assert_eq!(fsm.step(1), Ok(0b010));
        assert_eq!(fsm.step(1), Ok(0b100));
        assert_eq!(fsm.step(0), Ok(0b110));
        assert_eq!(fsm.step(0), Ok(0b001));
        assert_eq!(fsm.state(), GO);
    }

    #[test]
    fn rejects_out_of_range_input_without_moving() {
        let mut fsm = TableFsm::new(&LIGHTS).unwrap();
        assert_eq!(fsm.step(2), Err(FsmError::InputOutOfRange));
        assert_eq!(fsm.state(), GO);
    }

    #[test]
    fn rejects_bad_tables() {
        let empty: [State<u8, 2>; 0] = [];
        assert!(matches!(TableFsm::new(&empty), Err(FsmError::EmptyTable)));

        static DANGLING: [State<u8, 1>; 1] = [State { output: 0, hold_ms: 0, next: [7] }];
        assert!(matches!(
            TableFsm::new(&DANGLING),
            Err(FsmError::DanglingTransition)
        ));
    }
}
