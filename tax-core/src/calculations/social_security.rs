//! Employee social-security contributions.

use rust_decimal::Decimal;

use crate::calculations::common::{percent_of, round_half_up};
use crate::models::{SocialSecurity, SocialSecurityConfig};

#[derive(Debug, Clone)]
pub struct SocialSecurityCalculator<'a> {
    config: Option<&'a SocialSecurityConfig>,
}

impl<'a> SocialSecurityCalculator<'a> {
    pub fn new(config: Option<&'a SocialSecurityConfig>) -> Self {
        Self { config }
    }

    /// Applies the employee rate to `base`, limited by the cap when the
    /// scheme has one. Jurisdictions without a scheme report zero at 0 %.
    pub fn calculate(
        &self,
        base: Decimal,
    ) -> SocialSecurity {
        let Some(config) = self.config else {
            return SocialSecurity {
                amount: Decimal::ZERO,
                rate: Decimal::ZERO,
            };
        };

        let capped = config.cap.map_or(base, |cap| base.min(cap));

        SocialSecurity {
            amount: round_half_up(percent_of(capped, config.employee_rate)),
            rate: config.employee_rate,
        }
    }
}
