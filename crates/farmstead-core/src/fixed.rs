use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Elapsed wall-clock time in seconds, fixed-point. The production state
/// machine is driven entirely by `Seconds` deltas so that identical tick
/// sequences produce identical progress on every platform.
pub type Seconds = Fixed64;

/// Convert an f64 to Seconds. Use only at the host boundary (clock reads,
/// config loading), never inside the sim loop.
#[inline]
pub fn secs(v: f64) -> Seconds {
    Seconds::from_num(v)
}

/// Convert a Fixed64 to f64. Use only for display, never in the sim loop.
#[inline]
pub fn to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Convert a Fixed64 to f32 for handing to the scene service.
#[inline]
pub fn to_f32(v: Fixed64) -> f32 {
    v.to_num::<f32>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_arithmetic() {
        let a = secs(1.5);
        let b = secs(0.25);
        assert_eq!(to_f64(a + b), 1.75);
        assert_eq!(to_f64(a - b), 1.25);
    }

    #[test]
    fn division_is_exact_for_dyadic_fractions() {
        let delta = secs(0.5);
        let cost = secs(8.0);
        assert_eq!(to_f64(delta / cost), 0.0625);
    }

    #[test]
    fn determinism() {
        let a = secs(1.0 / 3.0);
        let b = secs(1.0 / 3.0);
        assert_eq!(a, b);
    }
}
