//! Example drivers for TM4C123 peripherals, one per technique

pub mod freqmeter; // Timer edge-time capture frequency counter
pub mod pwm; // M1PWM6 output on the blue LED pin
pub mod shiftreg; // SSI-driven 74HC595 output expander
pub mod udma; // Memory-to-memory transfers on the software uDMA channel
