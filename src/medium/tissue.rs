use super::polyval;

/// Converts a CT number in Hounsfield units to density in kg/m³, using a
/// piecewise linear fit to the data of Schneider et al. (1996).
///
/// ```text
/// hu < 930             fat and air
/// 930 <= hu <= 1098    soft tissue
/// 1098 < hu < 1260     soft tissue to bone
/// hu >= 1260           bone
/// ```
#[must_use]
pub fn hounsfield_to_density(hu: f64) -> f64 {
    let fit: [f64; 2] = if hu < 930.0 {
        [1.025_793_065_681_423, -5.680_404_011_488_714]
    } else if hu <= 1098.0 {
        [0.908_270_969_126_4, 103.615_145_784_713_9]
    } else if hu < 1260.0 {
        [0.510_836_931_659_9, 539.997_718_922_870_4]
    } else {
        [0.662_537_091_245_1, 348.855_517_845_529_4]
    };
    polyval(&fit, hu)
}

/// Approximate sound speed in m/s for a CT number, from the density via the
/// soft-tissue relationship of Mast (2000).
#[must_use]
pub fn hounsfield_to_sound_speed(hu: f64) -> f64 {
    (hounsfield_to_density(hu) + 349.0) / 0.893
}
