//! Conversion of raw channel counts into lux.
//!
//! The ratio of channel 1 (IR) to the sum of both channels indicates the kind
//! of light source, and selects one of three empirical linear combinations.
//! Beyond a ratio of 0.85 the light is dominated by IR and cannot be measured.

use crate::config::{Gain, IntegrationTime};

const RATIO_BRANCH_2: f32 = 0.45;
const RATIO_BRANCH_3: f32 = 0.64;
const RATIO_OUT_OF_RANGE: f32 = 0.85;

/// Converts channel 0 (visible + IR) and channel 1 (IR) counts to lux
///
/// Returns 0 when the IR ratio is out of range or when both channels read 0.
///
/// # Arguments
/// * `ch0` - Channel 0 count
/// * `ch1` - Channel 1 count
/// * `gain` - The gain the counts were measured with
/// * `integration_time` - The integration time the counts were measured with
pub fn calculate(ch0: u16, ch1: u16, gain: Gain, integration_time: IntegrationTime) -> f32 {
    let ch0 = ch0 as f32;
    let ch1 = ch1 as f32;
    let sum = ch0 + ch1;

    if sum == 0.0 {
        return 0.0;
    }

    let ratio = ch1 / sum;

    let weighted = if ratio < RATIO_BRANCH_2 {
        1.7743 * ch0 + 1.1059 * ch1
    } else if ratio < RATIO_BRANCH_3 {
        4.2785 * ch0 - 1.9548 * ch1
    } else if ratio < RATIO_OUT_OF_RANGE {
        0.5926 * ch0 + 0.1185 * ch1
    } else {
        trace!("ltr303: IR ratio {} out of range", ratio);
        return 0.0;
    };

    return weighted / gain.factor() / integration_time.factor();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_lux(ch0: u16, ch1: u16) -> f32 {
        calculate(ch0, ch1, Gain::Gain1x, IntegrationTime::Ms200)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 0.01, "expected {expected}, got {actual}");
    }

    #[test]
    fn no_light_is_zero_not_nan() {
        assert_eq!(default_lux(0, 0), 0.0);
        assert_eq!(calculate(0, 0, Gain::Gain96x, IntegrationTime::Ms50), 0.0);
    }

    #[test]
    fn daylight_branch() {
        assert_close(default_lux(1000, 300), 1053.035);
        assert_close(default_lux(1000, 500), 1163.625);
        assert_close(default_lux(1000, 0), 887.15);
    }

    #[test]
    fn second_branch() {
        assert_close(default_lux(1000, 900), 1259.59);
    }

    #[test]
    fn third_branch() {
        // ratio 0.75
        assert_close(default_lux(100, 300), (59.26 + 35.55) / 2.0);
    }

    #[test]
    fn ir_dominated_light_is_out_of_range() {
        assert_eq!(default_lux(100, 800), 0.0);
        assert_eq!(default_lux(0, 0xFFFF), 0.0);
    }

    #[test]
    fn boundaries_belong_to_the_higher_bracket() {
        // ratio exactly 0.45
        assert_close(default_lux(55, 45), (4.2785 * 55.0 - 1.9548 * 45.0) / 2.0);
        // ratio exactly 0.64
        assert_close(default_lux(36, 64), (0.5926 * 36.0 + 0.1185 * 64.0) / 2.0);
        // ratio exactly 0.85
        assert_eq!(default_lux(15, 85), 0.0);
    }

    #[test]
    fn gain_and_integration_time_scale_the_result() {
        let base = default_lux(1000, 300);
        assert_close(calculate(1000, 300, Gain::Gain2x, IntegrationTime::Ms200), base / 2.0);
        assert_close(calculate(1000, 300, Gain::Gain1x, IntegrationTime::Ms100), base * 2.0);
        assert_close(calculate(1000, 300, Gain::Gain96x, IntegrationTime::Ms400), base / 96.0 / 2.0);
    }
}
