use crate::error::PayrollError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One progressive tax band. `width = None` marks the final, unbounded band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBand {
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

/// The statutory rule table for one tax year.
///
/// Tax law changes periodically, so every constant the engine needs is data
/// here rather than code: rule tables can be loaded from JSON and swapped
/// without touching the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRules {
    /// Fixed relief subtracted from gross band tax.
    pub personal_relief: Decimal,
    /// Pension contribution rate on gross taxable income.
    pub pension_rate: Decimal,
    /// Absolute ceiling on the pension contribution. Applied after the rate,
    /// as a direct clamp on the computed amount.
    pub pension_cap: Decimal,
    /// Health insurance contribution rate, uncapped.
    pub health_rate: Decimal,
    /// Housing levy rate, uncapped.
    pub housing_rate: Decimal,
    /// Ceiling on the tax-deductible portion of the provident fund.
    pub provident_relief_cap: Decimal,
    /// Progressive bands, lowest first. The last band must be unbounded.
    pub bands: Vec<TaxBand>,
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            personal_relief: dec!(2400),
            pension_rate: dec!(0.06),
            pension_cap: dec!(2160),
            health_rate: dec!(0.0275),
            housing_rate: dec!(0.015),
            provident_relief_cap: dec!(30000),
            bands: vec![
                TaxBand { width: Some(dec!(24000)), rate: dec!(0.10) },
                TaxBand { width: Some(dec!(8333)), rate: dec!(0.25) },
                TaxBand { width: Some(dec!(467667)), rate: dec!(0.30) },
                TaxBand { width: Some(dec!(300000)), rate: dec!(0.325) },
                TaxBand { width: None, rate: dec!(0.35) },
            ],
        }
    }
}

impl TaxRules {
    /// Loads a rule table from JSON.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, PayrollError> {
        let rules: TaxRules = serde_json::from_reader(source)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), PayrollError> {
        for (name, rate) in [
            ("pension_rate", self.pension_rate),
            ("health_rate", self.health_rate),
            ("housing_rate", self.housing_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(PayrollError::RulesError(format!(
                    "{name} must be between 0 and 1, got {rate}"
                )));
            }
        }
        for (name, amount) in [
            ("personal_relief", self.personal_relief),
            ("pension_cap", self.pension_cap),
            ("provident_relief_cap", self.provident_relief_cap),
        ] {
            if amount < Decimal::ZERO {
                return Err(PayrollError::RulesError(format!(
                    "{name} must be non-negative, got {amount}"
                )));
            }
        }
        if self.bands.is_empty() {
            return Err(PayrollError::RulesError("band table is empty".into()));
        }
        let last = self.bands.len() - 1;
        for (i, band) in self.bands.iter().enumerate() {
            if band.rate < Decimal::ZERO || band.rate > Decimal::ONE {
                return Err(PayrollError::RulesError(format!(
                    "band {i} rate must be between 0 and 1, got {}",
                    band.rate
                )));
            }
            match band.width {
                Some(width) if width <= Decimal::ZERO => {
                    return Err(PayrollError::RulesError(format!(
                        "band {i} width must be positive, got {width}"
                    )));
                }
                None if i != last => {
                    return Err(PayrollError::RulesError(format!(
                        "band {i} is unbounded but not the final band"
                    )));
                }
                _ => {}
            }
        }
        if self.bands[last].width.is_some() {
            return Err(PayrollError::RulesError(
                "final band must be unbounded (width = null)".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        assert!(TaxRules::default().validate().is_ok());
    }

    #[test]
    fn test_rules_round_trip_through_json() {
        let rules = TaxRules::default();
        let json = serde_json::to_string(&rules).unwrap();
        let parsed = TaxRules::from_reader(json.as_bytes()).unwrap();
        assert_eq!(parsed, rules);
    }

    #[test]
    fn test_rejects_rate_above_one() {
        let mut rules = TaxRules::default();
        rules.health_rate = dec!(1.5);
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("health_rate"));
    }

    #[test]
    fn test_rejects_negative_cap() {
        let mut rules = TaxRules::default();
        rules.pension_cap = dec!(-10);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_band_table() {
        let mut rules = TaxRules::default();
        rules.bands.clear();
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_rejects_unbounded_band_before_last() {
        let mut rules = TaxRules::default();
        rules.bands[1].width = None;
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("not the final band"));
    }

    #[test]
    fn test_rejects_bounded_final_band() {
        // Income above a bounded top band would escape tax entirely.
        let mut rules = TaxRules::default();
        rules.bands.last_mut().unwrap().width = Some(dec!(100000));
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("final band must be unbounded"));
    }

    #[test]
    fn test_rejects_zero_width_band() {
        let mut rules = TaxRules::default();
        rules.bands[0].width = Some(dec!(0));
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let result = TaxRules::from_reader("{not json".as_bytes());
        assert!(matches!(
            result,
            Err(crate::error::PayrollError::RulesParseError(_))
        ));
    }
}
