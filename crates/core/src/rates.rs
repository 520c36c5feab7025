//! Fee rate policy
//!
//! Admin fee and interest are flat fractions of OTR. The defaults (3%
//! and 5%) are the current business parameters; they live behind this
//! struct so making them configurable never touches the engine's
//! control flow. Rates applied to an in-flight contract are whatever
//! the engine held when the unit of work committed.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Flat fee rates applied at contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePolicy {
    pub admin_fee_rate: Decimal,
    pub interest_rate: Decimal,
}

impl RatePolicy {
    pub fn new(admin_fee_rate: Decimal, interest_rate: Decimal) -> Self {
        Self {
            admin_fee_rate,
            interest_rate,
        }
    }

    /// Admin fee for a given principal.
    pub fn admin_fee(&self, otr: Decimal) -> Decimal {
        otr * self.admin_fee_rate
    }

    /// Interest amount for a given principal.
    pub fn interest(&self, otr: Decimal) -> Decimal {
        otr * self.interest_rate
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            admin_fee_rate: dec!(0.03),
            interest_rate: dec!(0.05),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rates() {
        let rates = RatePolicy::default();
        assert_eq!(rates.admin_fee(dec!(5000000)), dec!(150000.00));
        assert_eq!(rates.interest(dec!(5000000)), dec!(250000.00));
    }

    #[test]
    fn test_custom_rates() {
        let rates = RatePolicy::new(dec!(0.025), dec!(0.04));
        assert_eq!(rates.admin_fee(dec!(1000)), dec!(25.000));
        assert_eq!(rates.interest(dec!(1000)), dec!(40.00));
    }
}
