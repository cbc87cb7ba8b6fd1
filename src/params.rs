use bon::Builder;
use garde::Validate;

// =======================================
// INDEX ESTIMATOR PARAMETER STRUCT
// =======================================
#[derive(Debug, Clone, Validate, Builder)]
pub struct IndexEstimatorParams {
    // Juvenility index D(5-14)/D(20+)
    // Must be finite and positive, every formula takes log10 of it
    #[garde(custom(validate_ratio))]
    pub juvenile_i: f64,

    // Senility index D(60+)/D(20+), only used by the growth rate
    #[garde(custom(validate_ratio))]
    pub senility_i: f64,
}

impl IndexEstimatorParams {
    /// Validate with cross-field validation using Result<(), garde::Report>
    pub fn validate_all(&self) -> Result<(), garde::Report> {
        // First run garde's built-in validations
        self.validate()?;

        // Then run our custom cross-field validations
        self.validate_custom_constraints()
    }

    /// Custom cross-field validations that garde can't handle with attributes
    fn validate_custom_constraints(&self) -> Result<(), garde::Report> {
        let mut errors: ErrorVec = Vec::new();
        let j = self.juvenile_i;
        let s = self.senility_i;

        // 1q0 and 5q0 take sqrt(log10(200 * juvenile_i))
        if 200.0 * j < 1.0 {
            errors.push((
                "juvenile_i",
                format!("juvenile_i {j} must be at least 0.005 (200 * juvenile_i >= 1)"),
            ));
        }

        // r raises log10(200 * juvenile_i * senility_i) to the power 0.03
        if 200.0 * j * s < 1.0 {
            errors.push((
                "senility_i",
                format!(
                    "200 * juvenile_i * senility_i ({j} * {s} * 200) must be at least 1 for the growth rate"
                ),
            ));
        }

        into_report(errors)
    }
}

// =======================================
// REDISTRIBUTION PARAMETER STRUCT
// =======================================
#[derive(Debug, Clone, Validate, Builder)]
pub struct RedistributionParams {
    // Probability of death before age 1
    #[garde(custom(validate_finite))]
    pub q1_0: f64,

    // Probability of death before age 5
    #[garde(custom(validate_below_one))]
    pub q5_0: f64,
}

impl RedistributionParams {
    /// Validate with cross-field validation using Result<(), garde::Report>
    pub fn validate_all(&self) -> Result<(), garde::Report> {
        self.validate()
    }
}

// =======================================
// PRIVATE FUNCTIONS
// =======================================

type ErrorVec = Vec<(&'static str, String)>;

fn into_report(errors: ErrorVec) -> Result<(), garde::Report> {
    let mut report = garde::Report::new();
    for (path, message) in errors {
        report.append(garde::Path::new(path), garde::Error::new(message));
    }

    // Return Ok if no errors, otherwise return the complete report
    if report.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}

fn validate_finite(value: &f64, _context: &()) -> garde::Result {
    if !value.is_finite() {
        return Err(garde::Error::new(format!("{value} is not a finite number")));
    }
    Ok(())
}

fn validate_below_one(value: &f64, context: &()) -> garde::Result {
    validate_finite(value, context)?;
    if *value >= 1.0 {
        return Err(garde::Error::new(format!(
            "{value} must be less than 1.0 as the known deaths are divided by (1 - 5q0)"
        )));
    }
    Ok(())
}

fn validate_ratio(value: &f64, context: &()) -> garde::Result {
    validate_finite(value, context)?;
    if *value <= 0.0 {
        return Err(garde::Error::new(format!(
            "{value} must be greater than 0.0 as it enters a logarithm"
        )));
    }
    Ok(())
}

// =======================================
// UNIT TESTS
// =======================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimator_params_accept_typical_ratios() {
        let params = IndexEstimatorParams::builder()
            .juvenile_i(0.30)
            .senility_i(0.05)
            .build();
        assert!(params.validate_all().is_ok());
    }

    #[test]
    fn test_estimator_params_reject_zero_juvenile() {
        let params = IndexEstimatorParams::builder()
            .juvenile_i(0.0)
            .senility_i(0.2)
            .build();
        let report = params.validate_all().unwrap_err();
        assert!(report.to_string().contains("juvenile_i"));
    }

    #[test]
    fn test_estimator_params_reject_nan() {
        let params = IndexEstimatorParams::builder()
            .juvenile_i(f64::NAN)
            .senility_i(0.2)
            .build();
        assert!(params.validate_all().is_err());
    }

    #[test]
    fn test_estimator_params_reject_tiny_juvenile() {
        // 200 * 0.004 < 1
        let params = IndexEstimatorParams::builder()
            .juvenile_i(0.004)
            .senility_i(10.0)
            .build();
        let report = params.validate_all().unwrap_err();
        assert!(report.to_string().contains("0.005"));
    }

    #[test]
    fn test_estimator_params_reject_small_product() {
        // 200 * 0.1 * 0.01 = 0.2
        let params = IndexEstimatorParams::builder()
            .juvenile_i(0.1)
            .senility_i(0.01)
            .build();
        let report = params.validate_all().unwrap_err();
        assert!(report.to_string().contains("senility_i"));
    }

    #[test]
    fn test_redistribution_params() {
        let ok = RedistributionParams::builder().q1_0(0.2).q5_0(0.4).build();
        assert!(ok.validate_all().is_ok());

        let certain = RedistributionParams::builder().q1_0(0.2).q5_0(1.0).build();
        assert!(certain.validate_all().is_err());

        let nan = RedistributionParams::builder()
            .q1_0(f64::NAN)
            .q5_0(0.4)
            .build();
        assert!(nan.validate_all().is_err());
    }
}
