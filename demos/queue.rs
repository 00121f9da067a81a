//! Exercise the fixed-block heap and the linked-list FIFO end-to-end,
//! then run the FIFO as a line buffer for UART input.

#![no_std]
#![no_main]

extern crate embedded_hal;
extern crate tm4c123_launchpad;
extern crate tm4c123x_hal;

use core::fmt::Write;
use embedded_hal::serial::Read as ReadHal;
use tm4c123_launchpad::board;
use tm4c123_launchpad::fifo::{FifoError, ListFifo};
use tm4c123_launchpad::heap::BlockHeap;
use tm4c123x_hal::gpio::GpioExt;
use tm4c123x_hal::serial;
use tm4c123x_hal::time::Bps;

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

    // Drain the block pool, stamp each block, and hand everything back
    let mut heap: BlockHeap<8, 16> = BlockHeap::new();
    let mut handles: ListFifo<u8, 8> = ListFifo::new();
    let mut allocated: u32 = 0;
    while let Some(h) = heap.allocate() {
        heap.block_mut(&h)[1] = allocated;
        allocated += 1;
        // Park the index; the handle itself is consumed on release below
        let _ = handles.put(h.index() as u8);
        heap.release(h);
    }
    writeln!(
        uart,
        "heap: allocated {} of {} blocks, {} free after release",
        allocated,
        heap.capacity(),
        heap.free_blocks()
    )
    .unwrap_or_default();
    while let Some(idx) = handles.get() {
        writeln!(uart, "block {} cycled through the pool", idx).unwrap_or_default();
    }

    // Use the FIFO as a UART line buffer: queue bytes until newline or
    // full, then echo the whole line back at once
    let mut line: ListFifo<u8, 32> = ListFifo::new();
    writeln!(uart, "type a line:").unwrap_or_default();
    loop {
        if let Ok(ch) = uart.read() {
            let flush = match line.put(ch) {
                Ok(()) => ch == b'\n' || ch == b'\r',
                Err(FifoError::Full) => true,
            };
            if flush {
                write!(uart, "echo: ").unwrap_or_default();
                while let Some(b) = line.get() {
                    let _ = uart.write_char(b as char);
                }
                writeln!(uart).unwrap_or_default();
            }
        }
    }
}
