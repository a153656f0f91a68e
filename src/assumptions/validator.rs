//! Checks every parameter of an `AssumptionInputs` before a set is built.
use super::error::ConfigurationError;
use super::types::{AssumptionInputs, MAX_PROJECTION_YEARS};

/// Walks every parameter group and collects all problems, like a linter,
/// instead of stopping at the first one.
pub struct Validator<'a> {
    inputs: &'a AssumptionInputs,
}

impl<'a> Validator<'a> {
    pub fn new(inputs: &'a AssumptionInputs) -> Self {
        Self { inputs }
    }

    /// # Returns
    /// - `Ok(())` if no problems are found.
    /// - The single error when exactly one problem exists, otherwise
    ///   `ConfigurationError::Invalid` listing all of them.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let mut errors = Vec::new();
        let i = self.inputs;

        let r = &i.revenue_drivers;
        non_negative("mom_growth_rate", r.mom_growth_rate, &mut errors);
        non_negative("rpm", r.rpm, &mut errors);
        non_negative("membership_price", r.membership_price, &mut errors);
        rate("conversion_rate", r.conversion_rate, &mut errors);

        let c = &i.operating_costs;
        non_negative("freelance_editor", c.freelance_editor, &mut errors);
        non_negative("scriptwriter", c.scriptwriter, &mut errors);
        non_negative("ai_software_suite", c.ai_software_suite, &mut errors);

        non_negative("gear_investment", i.capex.gear_investment, &mut errors);
        non_negative("adsense_payment_threshold", i.timing.adsense_payment_threshold, &mut errors);
        match i.timing.projection_years {
            0 => errors.push(ConfigurationError::EmptyHorizon),
            years if years > MAX_PROJECTION_YEARS => {
                errors.push(ConfigurationError::HorizonTooLong { years, max: MAX_PROJECTION_YEARS })
            }
            _ => {}
        }

        let f = &i.ratios;
        rate("platform_cut_rate", f.platform_cut_rate, &mut errors);
        rate("depreciation_rate", f.depreciation_rate, &mut errors);
        rate("tax_rate", f.tax_rate, &mut errors);
        non_negative("valuation_multiple", f.valuation_multiple, &mut errors);

        non_negative("starting_cash", i.funding.starting_cash, &mut errors);

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ConfigurationError::Invalid(errors)),
        }
    }
}

fn finite(field: &'static str, value: f64, errors: &mut Vec<ConfigurationError>) -> bool {
    if value.is_finite() {
        true
    } else {
        errors.push(ConfigurationError::NonFinite { field, value });
        false
    }
}

fn non_negative(field: &'static str, value: f64, errors: &mut Vec<ConfigurationError>) {
    if finite(field, value, errors) && value < 0.0 {
        errors.push(ConfigurationError::Negative { field, value });
    }
}

fn rate(field: &'static str, value: f64, errors: &mut Vec<ConfigurationError>) {
    if finite(field, value, errors) && !(0.0..=1.0).contains(&value) {
        errors.push(ConfigurationError::RateOutOfRange { field, value });
    }
}
