//! A table-driven traffic light on the RGB LED.
//!
//! The two Launchpad switches act as car sensors. The light runs a
//! four-state Moore machine: green until a car shows up on the cross
//! street, then yellow, red, and a red+blue "ready" phase before green.

#![no_std]
#![no_main]

extern crate embedded_hal;
extern crate tm4c123_launchpad;
extern crate tm4c123x_hal;

use core::fmt::Write;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::*; // GPIO set high/low
use tm4c123_launchpad::board;
use tm4c123_launchpad::fsm::{State, TableFsm};
use tm4c123x_hal::gpio::GpioExt;
use tm4c123x_hal::serial;
use tm4c123x_hal::time::Bps;

// Output bit per LED channel
const RED: u8 = 0b001;
const BLUE: u8 = 0b010;
const GREEN: u8 = 0b100;

// State indices
const GO: u8 = 0;
const WARN: u8 = 1;
const STOP: u8 = 2;
const READY: u8 = 3;

// Input symbols are the 2-bit switch pattern: bit 0 = SW1, bit 1 = SW2.
// Any pressed switch is a car on the cross street.
static LIGHTS: [State<u8, 4>; 4] = [
    State { output: GREEN, hold_ms: 2000, next: [GO, WARN, WARN, WARN] },
    State { output: RED | GREEN, hold_ms: 800, next: [STOP, STOP, STOP, STOP] },
    State { output: RED, hold_ms: 2000, next: [READY, READY, READY, READY] },
    State { output: RED | BLUE, hold_ms: 600, next: [GO, GO, GO, GO] },
];

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

    let mut fsm = match TableFsm::new(&LIGHTS) {
        Ok(f) => f,
        Err(_) => board::safe(), // A broken static table is unrecoverable
    };

    writeln!(uart, "Traffic light: press SW1/SW2 for cross traffic").unwrap_or_default();

    loop {
        // Drive the lights for this state
        let out = fsm.output();
        let _ = if out & RED != 0 { board.led_red.set_high() } else { board.led_red.set_low() };
        let _ = if out & BLUE != 0 { board.led_blue.set_high() } else { board.led_blue.set_low() };
        let _ = if out & GREEN != 0 { board.led_green.set_high() } else { board.led_green.set_low() };

        // Hold, then sample the sensors and transition
        delay.delay_ms(fsm.hold_ms());

        let mut input: usize = 0;
        if board.button0.is_low().unwrap_or_default() {
            input |= 0b01;
        }
        if board.button1.is_low().unwrap_or_default() {
            input |= 0b10;
        }

        match fsm.step(input) {
            Ok(_) => {
                writeln!(uart, "state {} input {:02b}", fsm.state(), input).unwrap_or_default()
            }
            Err(e) => writeln!(uart, "fsm error: {:?}", e).unwrap_or_default(),
        }
    }
}
