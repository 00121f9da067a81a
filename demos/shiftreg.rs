//! Walk a bit across the outputs of a 74HC595 expander on SSI0.
//!
//! Wiring: PA2 -> SRCLK, PA5 -> SER, PA6 -> RCLK (storage latch).

#![no_std]
#![no_main]

extern crate embedded_hal;
extern crate tm4c123_launchpad;
extern crate tm4c123x_hal;

use core::fmt::Write;
use embedded_hal::blocking::delay::DelayMs;
use tm4c123_launchpad::board;
use tm4c123_launchpad::drivers::shiftreg::ShiftRegister;
use tm4c123x_hal::gpio::{GpioExt, AF2};
use tm4c123x_hal::serial;
use tm4c123x_hal::time::{Bps, Hertz};

#[no_mangle]
pub fn stellaris_main(board: board::Board) -> ! {
    let mut pins_a = board.GPIO_PORTA.split(&board.power_control);
    let mut uart = serial::Serial::uart0(
        board.UART0,
        pins_a.pa1.into_af_push_pull(&mut pins_a.control),
        pins_a.pa0.into_af_push_pull(&mut pins_a.control),
        (),
        (),
        Bps(115200),
        serial::NewlineMode::SwapLFtoCRLF,
        board::clocks(),
        &board.power_control,
    );
    let mut delay = tm4c123x_hal::delay::Delay::new(board.core_peripherals.SYST, board::clocks());

    let clk = pins_a.pa2.into_af_push_pull::<AF2>(&mut pins_a.control);
    let tx = pins_a.pa5.into_af_push_pull::<AF2>(&mut pins_a.control);
    let latch = pins_a.pa6.into_push_pull_output();

    let mut expander = ShiftRegister::new(
        board.SSI0,
        clk,
        tx,
        latch,
        Hertz(1_000_000),
        &board.power_control,
    );

    writeln!(uart, "Shift register walking-bit demo").unwrap_or_default();

    let mut position: u8 = 0;
    loop {
        let pattern: u8 = 1 << (position % 8);
        expander.write_latched(pattern);
        writeln!(uart, "outputs = {:08b}", pattern).unwrap_or_default();

        position = position.wrapping_add(1);
        delay.delay_ms(125u32);
    }
}
