use super::{check_range, polyval};
use crate::error::Result;

/// Nepers to decibels, to the precision used by the absorption fit.
const NEPER_TO_DB: f64 = 8.686;

/// 7th-order fit of `α / f²` against temperature, highest power first.
/// Pinkerton (1949).
const ABSORPTION_COEFFICIENTS: [f64; 8] = [
    3.869_387_679_459_408e-12,
    -6.402_634_551_821_596e-10,
    -6.210_860_973_978_427e-8,
    2.189_417_428_917_596e-5,
    -0.002_067_402_501_557,
    0.099_253_401_567_561,
    -2.899_633_796_917_384,
    56.723_531_840_522_71,
];

/// Ultrasound absorption in distilled water in dB/cm, for a frequency in
/// MHz and a temperature in °C.
///
/// # Errors
///
/// Returns [`MediumError::ParameterOutOfRange`](crate::error::MediumError)
/// if the temperature is outside 0–60 °C.
pub fn water_absorption(f_mhz: f64, temp: f64) -> Result<f64> {
    check_range("temperature", temp, 0.0, 60.0)?;
    let a_on_fsqr = polyval(&ABSORPTION_COEFFICIENTS, temp) * 1e-17;
    Ok(NEPER_TO_DB * 1e12 * f_mhz * f_mhz * a_on_fsqr)
}

/// Sound speed in distilled water in m/s (Marczak, 1997).
///
/// # Errors
///
/// Returns an error if the temperature is outside 0–95 °C.
pub fn water_sound_speed(temp: f64) -> Result<f64> {
    check_range("temperature", temp, 0.0, 95.0)?;
    Ok(polyval(
        &[
            2.787_860e-9,
            -1.398_845e-6,
            3.287_156e-4,
            -5.779_136e-2,
            5.038_813,
            1.402_385e3,
        ],
        temp,
    ))
}

/// Density of air-saturated water in kg/m³ (Jones and Harris, 1992).
///
/// # Errors
///
/// Returns an error if the temperature is outside 5–40 °C.
pub fn water_density(temp: f64) -> Result<f64> {
    check_range("temperature", temp, 5.0, 40.0)?;
    Ok(polyval(
        &[
            -3.821_216e-7,
            6.943_248e-5,
            -8.523_829e-3,
            6.337_563e-2,
            999.848_47,
        ],
        temp,
    ))
}

/// Parameter of nonlinearity B/A of water (Beyer, 1960).
///
/// # Errors
///
/// Returns an error if the temperature is outside 0–100 °C.
pub fn water_non_linearity(temp: f64) -> Result<f64> {
    check_range("temperature", temp, 0.0, 100.0)?;
    Ok(polyval(
        &[
            -4.587_913_769_504_693e-8,
            1.047_843_302_423_604e-5,
            -9.355_518_377_254_833e-4,
            5.380_874_771_364_909e-2,
            4.186_533_937_275_504,
        ],
        temp,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{MediumError, SonogridError};
    use approx::assert_relative_eq;

    #[test]
    fn sound_speed_at_twenty_degrees() {
        assert_relative_eq!(water_sound_speed(20.0).unwrap(), 1482.3, max_relative = 1e-3);
        assert_relative_eq!(water_sound_speed(0.0).unwrap(), 1402.385, max_relative = 1e-9);
    }

    #[test]
    fn sound_speed_peaks_near_seventy_four_degrees() {
        let peak = water_sound_speed(74.0).unwrap();
        assert!(peak > water_sound_speed(60.0).unwrap());
        assert!(peak > water_sound_speed(90.0).unwrap());
    }

    #[test]
    fn density_at_twenty_degrees() {
        assert_relative_eq!(water_density(20.0).unwrap(), 998.2, max_relative = 1e-4);
    }

    #[test]
    fn non_linearity_at_twenty_degrees() {
        let b_on_a = water_non_linearity(20.0).unwrap();
        assert!((4.9..5.1).contains(&b_on_a), "B/A = {b_on_a}");
    }

    #[test]
    fn absorption_scales_with_frequency_squared() {
        let a1 = water_absorption(1.0, 20.0).unwrap();
        let a3 = water_absorption(3.0, 20.0).unwrap();
        assert_relative_eq!(a3 / a1, 9.0, max_relative = 1e-12);
        // about 0.0022 dB/cm at 1 MHz
        assert!((0.0015..0.003).contains(&a1), "absorption = {a1}");
    }

    #[test]
    fn out_of_range_temperatures() {
        assert!(water_absorption(1.0, 61.0).is_err());
        assert!(water_sound_speed(-1.0).is_err());
        assert!(water_density(4.0).is_err());
        assert!(water_non_linearity(101.0).is_err());
        let err = water_density(41.0).unwrap_err();
        assert!(matches!(
            err,
            SonogridError::Medium(MediumError::ParameterOutOfRange { min, max, .. })
                if (min - 5.0).abs() < f64::EPSILON && (max - 40.0).abs() < f64::EPSILON
        ));
    }
}
