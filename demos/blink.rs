//! A blinky-LED example application

#![no_std]
#![no_main]

extern crate embedded_hal;
extern crate tm4c123_launchpad;
extern crate tm4c123x_hal;

use core::fmt::Write;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::*; // GPIO set high/low
use embedded_hal::serial::Read as ReadHal;
use tm4c123_launchpad::board;
use tm4c123x_hal::gpio::GpioExt;
use tm4c123x_hal::serial;
use tm4c123x_hal::time::Bps;

#[no_mangle]
pub fn stellaris_main(mut board: board::Board) -> ! {
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

    let mut loops: u32 = 0;
    loop {
        loops = loops.wrapping_add(1);

        writeln!(uart, "Hello, world! Loops = {}", loops).unwrap_or_default();
        while let Ok(ch) = uart.read() {
            // Echo
            writeln!(uart, "byte read {}", ch).unwrap_or_default();
        }

        if board.button0.is_low().unwrap_or_default() {
            // White while SW1 is held
            let _ = board.led_red.set_high();
            let _ = board.led_green.set_high();
            let _ = board.led_blue.set_high();
            delay.delay_ms(250u32);
        } else {
            // Cycle the RGB channels
            let _ = board.led_blue.set_low();
            let _ = board.led_red.set_high();
            delay.delay_ms(250u32);
            let _ = board.led_red.set_low();
            let _ = board.led_green.set_high();
            delay.delay_ms(250u32);
            let _ = board.led_green.set_low();
            let _ = board.led_blue.set_high();
            delay.delay_ms(250u32);
        }
    }
}
