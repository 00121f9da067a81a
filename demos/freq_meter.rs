//! Measure the frequency of a signal on PB6 (T0CCP0) and report it over
//! UART0. The main loop polls the capture-event flag the way the original
//! interrupt-driven version polls its ISR-maintained mailbox.

#![no_std]
#![no_main]

extern crate embedded_hal;
extern crate tm4c123_launchpad;
extern crate tm4c123x_hal;

use core::fmt::Write;
use embedded_hal::digital::v2::*; // GPIO set high/low
use tm4c123_launchpad::board;
use tm4c123_launchpad::drivers::freqmeter::FrequencyMeter;
use tm4c123x_hal::gpio::{GpioExt, AF7};
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

    let mut pins_b = board.GPIO_PORTB.split(&board.power_control);
    let capture_pin = pins_b.pb6.into_af_push_pull::<AF7>(&mut pins_b.control);

    let mut meter = FrequencyMeter::new(board.TIMER0, capture_pin, &board.power_control);

    writeln!(uart, "Frequency counter on PB6").unwrap_or_default();

    let mut edges: u32 = 0;
    let mut led_on = false;
    loop {
        if let Some(period) = meter.try_period() {
            edges = edges.wrapping_add(1);

            // Toggle the blue LED so a live input is visible without a terminal
            led_on = !led_on;
            if led_on {
                let _ = board.led_blue.set_high();
            } else {
                let _ = board.led_blue.set_low();
            }

            // Print every 64th edge so a fast input doesn't saturate the UART
            if edges % 64 == 0 {
                let hz = meter.frequency_hz(period);
                writeln!(uart, "period = {} ticks, f = {} Hz", period, hz).unwrap_or_default();
            }
        }
    }
}
