//! Named single-parameter adjustments used to derive scenario copies.
use super::error::ConfigurationError;
use super::types::AssumptionInputs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every parameter an override can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    InitialMonthlyViews,
    MomGrowthRate,
    Rpm,
    MembershipPrice,
    ConversionRate,
    FreelanceEditor,
    Scriptwriter,
    AiSoftwareSuite,
    GearInvestment,
    YppActivationDelayMonths,
    AdsensePaymentThreshold,
    PlatformCutRate,
    DepreciationRate,
    TaxRate,
    ValuationMultiple,
    StartingCash,
}

impl Parameter {
    pub const ALL: [Parameter; 16] = [
        Parameter::InitialMonthlyViews,
        Parameter::MomGrowthRate,
        Parameter::Rpm,
        Parameter::MembershipPrice,
        Parameter::ConversionRate,
        Parameter::FreelanceEditor,
        Parameter::Scriptwriter,
        Parameter::AiSoftwareSuite,
        Parameter::GearInvestment,
        Parameter::YppActivationDelayMonths,
        Parameter::AdsensePaymentThreshold,
        Parameter::PlatformCutRate,
        Parameter::DepreciationRate,
        Parameter::TaxRate,
        Parameter::ValuationMultiple,
        Parameter::StartingCash,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::InitialMonthlyViews => "initial_monthly_views",
            Parameter::MomGrowthRate => "mom_growth_rate",
            Parameter::Rpm => "rpm",
            Parameter::MembershipPrice => "membership_price",
            Parameter::ConversionRate => "conversion_rate",
            Parameter::FreelanceEditor => "freelance_editor",
            Parameter::Scriptwriter => "scriptwriter",
            Parameter::AiSoftwareSuite => "ai_software_suite",
            Parameter::GearInvestment => "gear_investment",
            Parameter::YppActivationDelayMonths => "ypp_activation_delay_months",
            Parameter::AdsensePaymentThreshold => "adsense_payment_threshold",
            Parameter::PlatformCutRate => "platform_cut_rate",
            Parameter::DepreciationRate => "depreciation_rate",
            Parameter::TaxRate => "tax_rate",
            Parameter::ValuationMultiple => "valuation_multiple",
            Parameter::StartingCash => "starting_cash",
        }
    }

    fn read(self, i: &AssumptionInputs) -> f64 {
        match self {
            Parameter::InitialMonthlyViews => i.revenue_drivers.initial_monthly_views as f64,
            Parameter::MomGrowthRate => i.revenue_drivers.mom_growth_rate,
            Parameter::Rpm => i.revenue_drivers.rpm,
            Parameter::MembershipPrice => i.revenue_drivers.membership_price,
            Parameter::ConversionRate => i.revenue_drivers.conversion_rate,
            Parameter::FreelanceEditor => i.operating_costs.freelance_editor,
            Parameter::Scriptwriter => i.operating_costs.scriptwriter,
            Parameter::AiSoftwareSuite => i.operating_costs.ai_software_suite,
            Parameter::GearInvestment => i.capex.gear_investment,
            Parameter::YppActivationDelayMonths => i.timing.ypp_activation_delay_months as f64,
            Parameter::AdsensePaymentThreshold => i.timing.adsense_payment_threshold,
            Parameter::PlatformCutRate => i.ratios.platform_cut_rate,
            Parameter::DepreciationRate => i.ratios.depreciation_rate,
            Parameter::TaxRate => i.ratios.tax_rate,
            Parameter::ValuationMultiple => i.ratios.valuation_multiple,
            Parameter::StartingCash => i.funding.starting_cash,
        }
    }

    /// Writes `value` into the matching field. Count fields are rounded; real
    /// valued fields are stored as given and left to the validator.
    fn write(self, i: &mut AssumptionInputs, value: f64) -> Result<(), ConfigurationError> {
        match self {
            Parameter::InitialMonthlyViews => {
                i.revenue_drivers.initial_monthly_views = to_count(self.name(), value, u64::MAX as f64)? as u64
            }
            Parameter::YppActivationDelayMonths => {
                i.timing.ypp_activation_delay_months = to_count(self.name(), value, u32::MAX as f64)? as u32
            }
            Parameter::MomGrowthRate => i.revenue_drivers.mom_growth_rate = value,
            Parameter::Rpm => i.revenue_drivers.rpm = value,
            Parameter::MembershipPrice => i.revenue_drivers.membership_price = value,
            Parameter::ConversionRate => i.revenue_drivers.conversion_rate = value,
            Parameter::FreelanceEditor => i.operating_costs.freelance_editor = value,
            Parameter::Scriptwriter => i.operating_costs.scriptwriter = value,
            Parameter::AiSoftwareSuite => i.operating_costs.ai_software_suite = value,
            Parameter::GearInvestment => i.capex.gear_investment = value,
            Parameter::AdsensePaymentThreshold => i.timing.adsense_payment_threshold = value,
            Parameter::PlatformCutRate => i.ratios.platform_cut_rate = value,
            Parameter::DepreciationRate => i.ratios.depreciation_rate = value,
            Parameter::TaxRate => i.ratios.tax_rate = value,
            Parameter::ValuationMultiple => i.ratios.valuation_multiple = value,
            Parameter::StartingCash => i.funding.starting_cash = value,
        }
        Ok(())
    }
}

fn to_count(field: &'static str, value: f64, max: f64) -> Result<f64, ConfigurationError> {
    if !value.is_finite() {
        return Err(ConfigurationError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(ConfigurationError::Negative { field, value });
    }
    let rounded = value.round();
    if rounded > max {
        return Err(ConfigurationError::NotACount { field, value });
    }
    Ok(rounded)
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Parameter::ALL
            .iter()
            .copied()
            .find(|p| p.name() == key)
            .ok_or_else(|| ConfigurationError::UnknownParameter(key.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// Multiply the current value.
    Scale(f64),
    /// Replace the current value.
    Set(f64),
}

impl Adjustment {
    fn apply(self, current: f64) -> f64 {
        match self {
            Adjustment::Scale(factor) => current * factor,
            Adjustment::Set(value) => value,
        }
    }
}

/// One parameter adjustment, written as `name*factor` or `name=value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Override {
    pub parameter: Parameter,
    pub adjustment: Adjustment,
}

impl Override {
    pub fn scale(parameter: Parameter, factor: f64) -> Self {
        Self { parameter, adjustment: Adjustment::Scale(factor) }
    }

    pub fn set(parameter: Parameter, value: f64) -> Self {
        Self { parameter, adjustment: Adjustment::Set(value) }
    }

    pub(crate) fn apply_to(&self, inputs: &mut AssumptionInputs) -> Result<(), ConfigurationError> {
        let current = self.parameter.read(inputs);
        self.parameter.write(inputs, self.adjustment.apply(current))
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.adjustment {
            Adjustment::Scale(factor) => write!(f, "{}*{}", self.parameter, factor),
            Adjustment::Set(value) => write!(f, "{}={}", self.parameter, value),
        }
    }
}

impl FromStr for Override {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigurationError::MalformedOverride(s.to_string());
        let (name, value, scale) = if let Some((name, value)) = s.split_once('*') {
            (name, value, true)
        } else if let Some((name, value)) = s.split_once('=') {
            (name, value, false)
        } else {
            return Err(malformed());
        };

        let parameter: Parameter = name.parse()?;
        let value: f64 = value.trim().parse().map_err(|_| malformed())?;
        Ok(if scale { Override::scale(parameter, value) } else { Override::set(parameter, value) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::AssumptionSet;
    use rstest::rstest;

    #[rstest]
    #[case("conversion_rate*0.5", Override::scale(Parameter::ConversionRate, 0.5))]
    #[case("rpm=180", Override::set(Parameter::Rpm, 180.0))]
    #[case(" tax_rate = 0.3", Override::set(Parameter::TaxRate, 0.3))]
    #[case("ypp_activation_delay_months=9", Override::set(Parameter::YppActivationDelayMonths, 9.0))]
    fn test_parse_override(#[case] text: &str, #[case] expected: Override) {
        assert_eq!(text.parse::<Override>().unwrap(), expected);
    }

    #[rstest]
    #[case("conversion_rate")]
    #[case("rpm=lots")]
    #[case("rpm*")]
    fn test_parse_malformed_override(#[case] text: &str) {
        assert!(matches!(text.parse::<Override>(), Err(ConfigurationError::MalformedOverride(_))));
    }

    #[test]
    fn test_parse_unknown_parameter() {
        let err = "subscriber_magic*2".parse::<Override>().unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownParameter("subscriber_magic".into()));
    }

    #[test]
    fn test_every_parameter_name_round_trips() {
        for p in Parameter::ALL {
            assert_eq!(p.name().parse::<Parameter>().unwrap(), p);
        }
    }

    #[test]
    fn test_display_matches_parse_format() {
        let o = Override::scale(Parameter::ConversionRate, 0.5);
        assert_eq!(o.to_string(), "conversion_rate*0.5");
        assert_eq!(o.to_string().parse::<Override>().unwrap(), o);
    }

    #[test]
    fn test_with_overrides_derives_copy() {
        let base = AssumptionSet::default();
        let derived = base
            .with_overrides(&[
                Override::scale(Parameter::ConversionRate, 0.5),
                Override::set(Parameter::InitialMonthlyViews, 7_499.6),
            ])
            .unwrap();

        assert_eq!(derived.revenue_drivers().conversion_rate, 0.001);
        assert_eq!(derived.revenue_drivers().initial_monthly_views, 7_500);
        assert_eq!(base.revenue_drivers().conversion_rate, 0.002);
        assert_eq!(base.revenue_drivers().initial_monthly_views, 5_000);
    }

    #[test]
    fn test_override_result_is_validated() {
        let base = AssumptionSet::default();
        let err = base.with_overrides(&[Override::set(Parameter::TaxRate, 1.5)]).unwrap_err();
        assert!(matches!(err, ConfigurationError::RateOutOfRange { field: "tax_rate", .. }));

        let err = base
            .with_overrides(&[Override::scale(Parameter::YppActivationDelayMonths, -1.0)])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::Negative { .. }));
    }
}
