//! Monetary rounding helpers shared by the statutory calculators.

/// Round a monetary amount to 2 decimal places, half away from zero.
///
/// Statutory contribution schedules in both jurisdictions publish
/// amounts in cents, so every calculator output passes through here.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_half_up() {
        assert_eq!(round_cents(1.006), 1.01);
        assert_eq!(round_cents(2.345), 2.35);
        assert_eq!(round_cents(439.999), 440.0);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_round_cents_truncates_sub_cent_noise() {
        assert_eq!(round_cents(520.0000001), 520.0);
    }
}
