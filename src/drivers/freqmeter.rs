//! Driver for measuring an input frequency with Timer 0A edge-time capture.
//!
//! The timer free-runs in 16-bit split mode with the 8-bit prescaler
//! cascaded in, giving a 24-bit count of system clock cycles. Each rising
//! edge on T0CCP0 (PB6) snapshots the count; the period is the wrapped
//! difference between consecutive snapshots.

use tm4c123x_hal::gpio::{gpiob::PB6, AlternateFunction, PushPull, AF7};
use tm4c123x_hal::sysctl::{control_power, reset, Domain, PowerControl, PowerState, RunMode};
use tm4c123x_hal::tm4c123x::TIMER0;

use crate::board::clocks;

/// Capture values are 24 bits: 16-bit timer plus 8-bit prescaler
const CAPTURE_MASK: u32 = 0x00FF_FFFF;

/// Edge-time capture frequency counter on Timer 0A / PB6
pub struct FrequencyMeter {
    timer: TIMER0,
    last_edge: Option<u32>,
    _pin: PB6<AlternateFunction<AF7, PushPull>>,
}

impl FrequencyMeter {
    /// Power up Timer 0 and configure timer A for rising-edge time capture.
    pub fn new(
        timer: TIMER0,
        pin: PB6<AlternateFunction<AF7, PushPull>>,
        pc: &PowerControl,
    ) -> FrequencyMeter {
        control_power(pc, Domain::Timer0, RunMode::Run, PowerState::On);
        reset(pc, Domain::Timer0);

        // Disable timer A while configuring
        timer.ctl.write(|w| w.taen().clear_bit());

        // 16-bit split mode; capture mode, edge-time, count up
        timer.cfg.write(|w| unsafe { w.bits(0x4) });
        timer
            .tamr
            .write(|w| unsafe { w.tamr().bits(0x3).tacmr().set_bit().tacdir().set_bit() });

        // Capture on rising edges
        timer.ctl.modify(|_, w| unsafe { w.taevent().bits(0) });

        // Full-range interval with the prescaler as the top byte
        timer.tailr.write(|w| unsafe { w.bits(0xFFFF) });
        timer.tapr.write(|w| unsafe { w.tapsr().bits(0xFF) });

        // Clear any stale capture event, then enable
        timer.icr.write(|w| w.caecint().set_bit());
        timer.ctl.modify(|_, w| w.taen().set_bit());

        FrequencyMeter {
            timer,
            last_edge: None,
            _pin: pin,
        }
    }

    /// Check for a newly captured edge.
    ///
    /// Returns the period since the previous edge in timer ticks, or `None`
    /// if no edge has arrived (or if this edge is the first one and only
    /// primes the reference). This read-status / acknowledge / snapshot
    /// sequence is exactly what a capture interrupt handler would run; the
    /// main loop polls it instead because the hal carries no device
    /// interrupt vector definitions.
    pub fn try_period(&mut self) -> Option<u32> {
        if self.timer.ris.read().caeris().bit_is_clear() {
            return None;
        }
        // Acknowledge the capture event
        self.timer.icr.write(|w| w.caecint().set_bit());

        let now = self.timer.tar.read().bits() & CAPTURE_MASK;
        let period = self
            .last_edge
            .map(|prev| now.wrapping_sub(prev) & CAPTURE_MASK);
        self.last_edge = Some(now);
        period
    }

    /// Convert a period in timer ticks to a frequency in Hz.
    ///
    /// Ticks count system clock cycles, so the measurable floor is
    /// sysclk / 2^24 (about 5 Hz at 80 MHz).
    pub fn frequency_hz(&self, period_ticks: u32) -> u32 {
        match period_ticks {
            0 => 0,
            p => clocks().sysclk.0 / p,
        }
    }
}
