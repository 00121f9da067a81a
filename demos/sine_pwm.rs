//! Breathe the blue LED with a sine wave: the SysTick interrupt steps a
//! binary angle through the interpolated sine table and loads the result
//! into the PWM compare register.

#![no_std]
#![no_main]

extern crate embedded_hal;
extern crate tm4c123_launchpad;
extern crate tm4c123x_hal;

use cortex_m::peripheral::syst::SystClkSource;

use core::fmt::Write;

use tm4c123_launchpad::board::{clocks, Board};
use tm4c123_launchpad::drivers::pwm::Pwm;
use tm4c123_launchpad::sine;
use tm4c123_launchpad::startup::Interrupt;
use tm4c123x_hal::gpio::{GpioExt, AF5};
use tm4c123x_hal::serial;
use tm4c123x_hal::time::Bps;

use irq::{handler, scope};

#[no_mangle]
pub fn stellaris_main(mut board: Board) -> ! {
    let mut pins_a = board.GPIO_PORTA.split(&board.power_control);
    let mut uart = serial::Serial::uart0(
        board.UART0,
        pins_a.pa1.into_af_push_pull(&mut pins_a.control),
        pins_a.pa0.into_af_push_pull(&mut pins_a.control),
        (),
        (),
        Bps(115200),
        serial::NewlineMode::SwapLFtoCRLF,
        clocks(),
        &board.power_control,
    );

    // Reclaim the blue LED pin for its PWM alternate function
    let pwm_pin = board
        .led_blue
        .into_af_push_pull::<AF5>(&mut board.portf_control);
    // 80 MHz / 4000 ticks = 20 kHz carrier, well above flicker
    let mut pwm = Pwm::new(board.PWM1, pwm_pin, 4000, &board.power_control);

    // SysTick at 1 kHz drives the modulation
    board
        .core_peripherals
        .SYST
        .set_reload(clocks().sysclk.0 / 1000);
    board
        .core_peripherals
        .SYST
        .set_clock_source(SystClkSource::Core);
    board.core_peripherals.SYST.clear_current();
    board.core_peripherals.SYST.enable_counter();
    board.core_peripherals.SYST.enable_interrupt();

    writeln!(uart, "Sine PWM breathing demo").unwrap_or_default();

    let mut angle: u16 = 0;
    let mut ticks: u32 = 0;

    handler!(
        systick_handler = || {
            // 32 counts/ms walks the full wave in about 2 seconds
            angle = angle.wrapping_add(32);
            pwm.set_duty(sine::duty(angle, pwm.period()));

            ticks = ticks.wrapping_add(1);
            if ticks % 1000 == 0 {
                writeln!(uart, "t = {} ms, angle = {}", ticks, angle).unwrap_or_default();
            }
        }
    );

    // Create a scope and register the systick interrupt handler
    scope(|s| {
        s.register(Interrupt::SysTick, systick_handler);

        loop {
            // Wait for interrupt
        }
    });

    // Main must not return
    loop {}
}
