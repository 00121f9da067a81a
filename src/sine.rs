//! Table-driven sine with linear interpolation, in integer math.
//!
//! Angles are 16-bit binary angles: a full turn is 65536 counts, so angle
//! arithmetic wraps for free. The table holds one full wave at 64 steps
//! plus a duplicate endpoint so interpolation never has to wrap an index.

use static_assertions::const_assert;

/// Table intervals per full turn
const STEPS: usize = 64;

/// round(32767 * sin(2*pi*i/64)) for i in 0..=64
static SINE_TABLE: [i16; STEPS + 1] = [
    0, 3212, 6393, 9512, 12539, 15446, 18204, 20787,
    23170, 25329, 27245, 28898, 30273, 31356, 32137, 32609,
    32767, 32609, 32137, 31356, 30273, 28898, 27245, 25329,
    23170, 20787, 18204, 15446, 12539, 9512, 6393, 3212,
    0, -3212, -6393, -9512, -12539, -15446, -18204, -20787,
    -23170, -25329, -27245, -28898, -30273, -31356, -32137, -32609,
    -32767, -32609, -32137, -31356, -30273, -28898, -27245, -25329,
    -23170, -20787, -18204, -15446, -12539, -9512, -6393, -3212,
    0,
];

const_assert!(STEPS.is_power_of_two());

/// Amplitude at the given binary angle, interpolated linearly between
/// table entries. Top 6 bits of the angle index the table; the remaining
/// 10 bits are the interpolation fraction.
pub fn sample(angle: u16) -> i16 {
    let index = (angle >> 10) as usize;
    let frac = (angle & 0x3FF) as i32;
    let y0 = SINE_TABLE[index] as i32;
    let y1 = SINE_TABLE[index + 1] as i32;
    (y0 + (((y1 - y0) * frac) >> 10)) as i16
}

/// Map a sample at the given angle onto a PWM on-time in `0..period`,
/// with the wave midpoint at half duty.
pub fn duty(angle: u16, period: u16) -> u16 {
    let unit = (sample(angle) as i32 + 32768) as u32; // 0..=65535
    ((unit * period as u32) >> 16) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_at_table_knots() {
        assert_eq!(sample(0), 0);
        assert_eq!(sample(1 << 10), 3212);
        assert_eq!(sample(16384), 32767); // quarter turn
        assert_eq!(sample(32768), 0); // half turn
        assert_eq!(sample(49152), -32767); // three-quarter turn
    }

    #[test]
    fn interpolates_between_knots() {
        // Halfway between entries 0 and 1: 0 + (3212 * 512 >> 10)
        assert_eq!(sample(512), 1606);
    }

    #[test]
    fn odd_half_wave_symmetry() {
        for angle in (0..32768u16).step_by(97) {
            let a = sample(angle) as i32;
            let b = sample(angle.wrapping_add(32768)) as i32;
            assert!((a + b).abs() <= 1, "asymmetry at angle {}", angle);
        }
    }

    #[test]
    fn monotone_on_first_quarter() {
        let mut prev = sample(0);
        for angle in (64..=16384u16).step_by(64) {
            let y = sample(angle);
            assert!(y >= prev, "dip at angle {}", angle);
            prev = y;
        }
    }

    #[test]
    fn duty_stays_inside_period() {
        // u16::MAX is the worst case: unit * period only fits in 32 bits unsigned
        for period in [4000u16, 32768, u16::MAX] {
            for angle in (0..=u16::MAX).step_by(31) {
                let d = duty(angle, period);
                assert!(d < period, "duty {} at angle {} period {}", d, angle, period);
            }
            assert_eq!(
                duty(16384, period),
                ((32767u32 + 32768) * period as u32 >> 16) as u16
            );
        }
    }
}
