//! Driver for a 74HC595-style shift-register output expander on SSI0.
//!
//! The expander hangs off the SSI0 clock and transmit lines, plus one GPIO
//! driving the storage-register latch. Each 8-bit frame shifted out becomes
//! eight parallel outputs when the latch is pulsed.

use embedded_hal::digital::v2::OutputPin;
use tm4c123x_hal::gpio::{
    gpioa::{PA2, PA5},
    AlternateFunction, PushPull, AF2,
};
use tm4c123x_hal::sysctl::{control_power, reset, Domain, PowerControl, PowerState, RunMode};
use tm4c123x_hal::time::Hertz;
use tm4c123x_hal::tm4c123x::SSI0;

use crate::board::clocks;

/// Shift-register expander on SSI0.
///
/// The clock and transmit pins are consumed by-value in their alternate
/// function states so that a constructed driver is guaranteed to have its
/// pins routed to the peripheral.
pub struct ShiftRegister<LATCH: OutputPin> {
    ssi: SSI0,
    latch: LATCH,
    _clk: PA2<AlternateFunction<AF2, PushPull>>,
    _tx: PA5<AlternateFunction<AF2, PushPull>>,
}

impl<LATCH: OutputPin> ShiftRegister<LATCH> {
    /// Power up SSI0 and configure it as a mode-0 Freescale SPI master
    /// with 8-bit frames at (approximately) the requested bit rate.
    pub fn new(
        ssi: SSI0,
        clk: PA2<AlternateFunction<AF2, PushPull>>,
        tx: PA5<AlternateFunction<AF2, PushPull>>,
        latch: LATCH,
        bit_rate: Hertz,
        pc: &PowerControl,
    ) -> ShiftRegister<LATCH> {
        control_power(pc, Domain::Ssi0, RunMode::Run, PowerState::On);
        reset(pc, Domain::Ssi0);

        // Disable and select master mode before touching the clock configuration
        ssi.cr1.write(|w| w.sse().clear_bit().ms().clear_bit());

        // Clock the bit engine from the system clock.
        // SSIClk = SysClk / (CPSDVSR * (1 + SCR)); fix CPSDVSR at 2 and
        // solve for SCR, saturating at the 8-bit field limit.
        ssi.cc.write(|w| unsafe { w.bits(0) });
        let divisor = bit_rate.0.max(1);
        let scr = (clocks().sysclk.0 / (2 * divisor)).saturating_sub(1).min(255) as u8;
        ssi.cpsr.write(|w| unsafe { w.cpsdvsr().bits(2) });

        // Freescale format, SPO=0, SPH=0, 8-bit data
        ssi.cr0
            .write(|w| unsafe { w.scr().bits(scr).dss().bits(0x7) });

        // Enable
        ssi.cr1.modify(|_, w| w.sse().set_bit());

        ShiftRegister {
            ssi,
            latch,
            _clk: clk,
            _tx: tx,
        }
    }

    /// Queue one frame for the expander, busy-waiting until the transmit
    /// FIFO has room. The outputs do not change until [`latch`](Self::latch)
    /// is called.
    pub fn write(&mut self, pattern: u8) {
        while self.ssi.sr.read().tnf().bit_is_clear() {}
        self.ssi
            .dr
            .write(|w| unsafe { w.data().bits(pattern as u16) });
    }

    /// Busy-wait until the serial engine is idle, then pulse the storage
    /// latch so the shifted bits appear on the parallel outputs.
    pub fn latch(&mut self) {
        while self.ssi.sr.read().bsy().bit_is_set() {}
        let _ = self.latch.set_high();
        let _ = self.latch.set_low();
    }

    /// Shift one frame out and latch it onto the outputs.
    pub fn write_latched(&mut self, pattern: u8) {
        self.write(pattern);
        self.latch();
    }
}
