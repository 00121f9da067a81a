//! Crate for operating the TM4C123GXL Launchpad

#![no_std]
#![warn(dead_code)]
#![deny(missing_docs)]

// In release mode, cause linker error if panic is possible
// Developing with panic-never can be difficult because it does not indicate *where*
// a panicking branch exists
#[cfg(all(not(debug_assertions), not(test)))]
extern crate panic_never;

extern crate cortex_m;
extern crate cortex_m_rt;
extern crate embedded_hal;
extern crate tm4c123x_hal;

// The hardware-facing modules only build for the target: the exception
// trampolines carry ARM inline assembly, and the host test runner brings
// its own panic handler
#[cfg(not(test))]
pub mod board;
#[cfg(not(test))]
pub mod startup;
#[cfg(not(test))]
pub mod drivers;
#[cfg(not(test))]
pub mod builtins;

pub mod heap;
pub mod fifo;
pub mod fsm;
pub mod sine;
