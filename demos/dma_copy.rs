//! Memory-to-memory copy through the uDMA software channel, verified
//! word-by-word and reported over UART0.

#![no_std]
#![no_main]

extern crate embedded_hal;
extern crate tm4c123_launchpad;
extern crate tm4c123x_hal;

use core::fmt::Write;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::*; // GPIO set high/low
use tm4c123_launchpad::board;
use tm4c123_launchpad::drivers::udma::MemoryDma;
use tm4c123x_hal::gpio::GpioExt;
use tm4c123x_hal::serial;
use tm4c123x_hal::time::Bps;

const NWORDS: usize = 256;

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

    let mut dma = MemoryDma::new(board.UDMA, &board.power_control);

    let mut src = [0_u32; NWORDS];
    for (i, word) in src.iter_mut().enumerate() {
        *word = (i as u32).wrapping_mul(0x0101_0101);
    }
    let mut dst = [0_u32; NWORDS];

    let mut pass = true;
    match dma.transfer(&src, &mut dst) {
        Ok(()) => {
            let mut mismatches: usize = 0;
            for i in 0..NWORDS {
                if src[i] != dst[i] {
                    mismatches += 1;
                }
            }
            if mismatches == 0 {
                writeln!(uart, "DMA copy of {} words OK", NWORDS).unwrap_or_default();
            } else {
                pass = false;
                writeln!(uart, "DMA copy FAILED: {} mismatches", mismatches).unwrap_or_default();
            }
        }
        Err(e) => {
            pass = false;
            writeln!(uart, "DMA error: {:?}", e).unwrap_or_default();
        }
    }

    // Green heartbeat on success, red on failure
    loop {
        if pass {
            let _ = board.led_green.set_high();
            delay.delay_ms(500u32);
            let _ = board.led_green.set_low();
        } else {
            let _ = board.led_red.set_high();
            delay.delay_ms(150u32);
            let _ = board.led_red.set_low();
        }
        delay.delay_ms(500u32);
    }
}
