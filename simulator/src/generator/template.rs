use std::f64::consts::PI;

/// Altitude offset for sample `index` of a sine profile with the given period.
pub fn altitude_wave(index: usize, period: usize, amplitude: f64) -> f64 {
    let period = period.max(1) as f64;
    amplitude * ((index as f64 / period) * 2.0 * PI).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_starts_at_zero_and_peaks_at_quarter_period() {
        assert_eq!(altitude_wave(0, 8, 10.0), 0.0);
        assert!((altitude_wave(2, 8, 10.0) - 10.0).abs() < 1e-9);
    }
}
