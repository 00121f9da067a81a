//! Driver for a single PWM output: M1PWM6 on PF2, the blue LED channel.
//!
//! Generator 3 of PWM module 1 runs in count-down mode, driving the pin
//! high on load and low on compare-A match, so the compare value sets the
//! off-time and `period - compare` is the on-time.

use tm4c123x_hal::gpio::{gpiof::PF2, AlternateFunction, PushPull, AF5};
use tm4c123x_hal::sysctl::{control_power, reset, Domain, PowerControl, PowerState, RunMode};
use tm4c123x_hal::tm4c123x::PWM1;

/// PWM output on PF2 / M1PWM6
pub struct Pwm {
    pwm: PWM1,
    period: u16,
    _pin: PF2<AlternateFunction<AF5, PushPull>>,
}

impl Pwm {
    /// Power up PWM module 1 and start generator 3 with the given period
    /// in PWM clock ticks and a 50% initial duty.
    ///
    /// Periods below 2 ticks are raised to 2 so the compare value always
    /// has somewhere legal to sit.
    pub fn new(
        pwm: PWM1,
        pin: PF2<AlternateFunction<AF5, PushPull>>,
        period: u16,
        pc: &PowerControl,
    ) -> Pwm {
        let period = period.max(2);

        control_power(pc, Domain::Pwm1, RunMode::Run, PowerState::On);
        reset(pc, Domain::Pwm1);

        // Disable generator 3 while configuring
        pwm._3_ctl.write(|w| unsafe { w.bits(0) });

        // GENA: drive high on load (ACTLOAD=3), low on compare A down (ACTCMPAD=2)
        pwm._3_gena.write(|w| unsafe { w.bits(0x0000_008C) });

        pwm._3_load.write(|w| unsafe { w.bits(period as u32) });
        pwm._3_cmpa.write(|w| unsafe { w.bits((period / 2) as u32) });

        // Enable the generator, then pass M1PWM6 through to the pin
        pwm._3_ctl.write(|w| unsafe { w.bits(1) });
        pwm.enable
            .modify(|r, w| unsafe { w.bits(r.bits() | (1 << 6)) });

        Pwm {
            pwm,
            period,
            _pin: pin,
        }
    }

    /// Set the on-time in PWM clock ticks.
    ///
    /// The compare value must stay strictly between zero and the load
    /// value for clean edges, so the duty is clamped to that range.
    pub fn set_duty(&mut self, duty: u16) {
        let d = duty.max(1).min(self.period - 1);
        let cmpa = self.period - d;
        self.pwm._3_cmpa.write(|w| unsafe { w.bits(cmpa as u32) });
    }

    /// Period in PWM clock ticks
    pub fn period(&self) -> u16 {
        self.period
    }
}
