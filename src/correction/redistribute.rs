use crate::LTResult;
use crate::dx_data::DeathData;
use crate::errors::CorrectionError;
use crate::params::RedistributionParams;
use bon::builder;
use log::debug;

/// How the corrected 0-5 deaths are written back, decided by the first class widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionPlan {
    /// First class spans 0-4: it receives all corrected 0-5 deaths.
    FiveYear,
    /// First classes span 0 and 1-4: split by 1q0.
    OneAndFourYear,
}

impl CorrectionPlan {
    pub fn from_widths(widths: &[u32]) -> Result<Self, CorrectionError> {
        match widths {
            [5, ..] => Ok(CorrectionPlan::FiveYear),
            [1, 4, ..] => Ok(CorrectionPlan::OneAndFourYear),
            _ => Err(CorrectionError::UnsupportedLayout {
                widths: widths.iter().take(2).copied().collect(),
            }),
        }
    }

    /// Labels of the age classes that receive corrected deaths.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            CorrectionPlan::FiveYear => &["0-4"],
            CorrectionPlan::OneAndFourYear => &["0", "1-4"],
        }
    }

    fn negative_count_cause(self) -> &'static str {
        match self {
            CorrectionPlan::FiveYear => {
                "5q0 is negative, which happens for juvenile_i below about 0.0296"
            }
            CorrectionPlan::OneAndFourYear => {
                "1q0 exceeds 5q0, which happens for juvenile_i below about 0.0462"
            }
        }
    }
}

/// Redistribute deaths to the youngest class(es) according to 1q0 and 5q0.
///
/// # Formula
/// ```text
/// D'   = (ΣDx - D₀) / (1 - 5q0)
/// D₀₋₅ = 5q0 · D'
/// D₀₋₁ = 1q0 · D'
/// ```
/// A single 0-4 class gets `D₀₋₅`; a 0 / 1-4 pair gets `D₀₋₁` and `D₀₋₅ - D₀₋₁`.
/// All other classes keep their counts. `data` is not modified.
///
/// # Errors
/// - [`CorrectionError::UnsupportedLayout`] for any other first-class layout
/// - [`CorrectionError::Domain`] when `5q0 >= 1` or a corrected count would be negative. With
///   the regression estimates the latter means `juvenile_i` below about 0.0296 (5-year first
///   class, `5q0 < 0`) or below about 0.0462 (0 / 1-4 pair, `1q0 > 5q0`)
///
/// # Example
/// ```rust
/// # use ltcorrection::prelude::*;
/// let data = ltdf! {
///     "a" => [5_u32, 5, 10, 20, 20],
///     "Dx" => [10.0_f64, 15.0, 20.0, 30.0, 25.0],
/// }?;
/// let corrected = redistribute_deaths().data(&data).q1_0(0.3).q5_0(0.5).call()?;
/// assert_eq!(corrected.deaths()?[0], 90.0);
/// # LTResult::Ok(())
/// ```
#[builder]
pub fn redistribute_deaths(data: &DeathData, q1_0: f64, q5_0: f64) -> LTResult<DeathData> {
    let params = RedistributionParams { q1_0, q5_0 };
    params
        .validate_all()
        .map_err(|report| {
            CorrectionError::domain(format!(
                "mortality quotients out of valid range for redistribution: {}",
                report.to_string().trim_end()
            ))
        })?;

    let widths = data.widths()?;
    let plan = CorrectionPlan::from_widths(&widths)?;

    let mut deaths = data.deaths()?;
    let total: f64 = deaths.iter().sum();
    let dx_sum_corrected = (total - deaths[0]) / (1.0 - q5_0);
    let dx5_0_corrected = q5_0 * dx_sum_corrected;

    match plan {
        CorrectionPlan::FiveYear => {
            deaths[0] = dx5_0_corrected;
        }
        CorrectionPlan::OneAndFourYear => {
            let dx1_0_corrected = q1_0 * dx_sum_corrected;
            deaths[0] = dx1_0_corrected;
            deaths[1] = dx5_0_corrected - dx1_0_corrected;
        }
    }

    let revised = &deaths[..plan.labels().len()];
    if let Some((label, negative)) = plan
        .labels()
        .iter()
        .zip(revised)
        .find(|(_, d)| **d < 0.0)
    {
        return Err(Box::new(CorrectionError::domain(format!(
            "corrected death count of age class {label} is negative ({negative:.3}) with \
             1q0 = {q1_0:.4} and 5q0 = {q5_0:.4}: {}",
            plan.negative_count_cause()
        ))));
    }

    debug!("redistributed deaths with {plan:?}: {revised:?}");
    data.with_deaths(deaths)
}
