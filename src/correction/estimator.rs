use crate::LTResult;
use crate::errors::CorrectionError;
use crate::helpers::round3;
use crate::params::IndexEstimatorParams;
use bon::builder;
use log::debug;

// =======================================
// INDEX NAMES
// =======================================

/// The five indices estimated by the correction, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexName {
    /// Life expectancy at birth.
    E0,
    /// Probability of death before age 1.
    Q1_0,
    /// Probability of death before age 5.
    Q5_0,
    /// Mortality (= natality) rate of the population.
    M,
    /// Intrinsic growth rate.
    R,
}

impl IndexName {
    pub const ALL: [IndexName; 5] = [
        IndexName::E0,
        IndexName::Q1_0,
        IndexName::Q5_0,
        IndexName::M,
        IndexName::R,
    ];

    /// Row label in the index table.
    pub fn label(self) -> &'static str {
        match self {
            IndexName::E0 => "e0",
            IndexName::Q1_0 => "1q0",
            IndexName::Q5_0 => "5q0",
            IndexName::M => "m",
            IndexName::R => "r",
        }
    }

    /// Published half-width of the estimate's range.
    pub fn offset(self) -> f64 {
        match self {
            IndexName::E0 => 1.503,
            IndexName::Q1_0 => 0.016,
            IndexName::Q5_0 => 0.041,
            IndexName::M => 0.002,
            IndexName::R => 0.006,
        }
    }
}

// =======================================
// ESTIMATES
// =======================================

/// One reported index: point estimate and range, each rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionIndex {
    pub name: IndexName,
    pub value: f64,
    pub range_start: f64,
    pub range_end: f64,
}

impl CorrectionIndex {
    /// Round the estimate and both bounds independently; the bounds use the unrounded estimate.
    pub fn from_estimate(name: IndexName, estimate: f64) -> Self {
        let offset = name.offset();
        Self {
            name,
            value: round3(estimate),
            range_start: round3(estimate - offset),
            range_end: round3(estimate + offset),
        }
    }
}

/// Full-precision regression estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionEstimates {
    pub e0: f64,
    pub q1_0: f64,
    pub q5_0: f64,
    pub m: f64,
    pub r: f64,
}

impl CorrectionEstimates {
    pub fn get(&self, name: IndexName) -> f64 {
        match name {
            IndexName::E0 => self.e0,
            IndexName::Q1_0 => self.q1_0,
            IndexName::Q5_0 => self.q5_0,
            IndexName::M => self.m,
            IndexName::R => self.r,
        }
    }

    /// Rounded indices in reporting order; position `i` holds `IndexName::ALL[i]`.
    pub fn to_indices(&self) -> [CorrectionIndex; 5] {
        IndexName::ALL.map(|name| CorrectionIndex::from_estimate(name, self.get(name)))
    }
}

// =======================================
// PUBLIC FUNCTIONS
// =======================================

/// Regression estimates of e0, 1q0, 5q0, m and r from the juvenility and senility indices.
///
/// # Formula
/// ```text
/// e0  = 78.721 · log10(√(1 / J)) - 3.384
/// 1q0 = 0.568 · √(log10(200 · J)) - 0.438
/// 5q0 = 1.154 · √(log10(200 · J)) - 1.014
/// m   = 0.127 · J + 0.016
/// r   = 1.484 · (log10(200 · J · S))^0.03 - 1.485
/// ```
/// where `J` is the juvenility index and `S` the senility index.
///
/// # Errors
/// [`CorrectionError::Domain`] when `J < 0.005`, `200 · J · S < 1`, or either index is not a
/// finite positive number.
///
/// # Example
/// ```rust
/// # use ltcorrection::prelude::*;
/// let estimates = correction_indices().juvenile_i(0.30).senility_i(0.05).call()?;
/// assert!(estimates.q1_0 < estimates.q5_0);
/// # LTResult::Ok(())
/// ```
#[builder]
pub fn correction_indices(juvenile_i: f64, senility_i: f64) -> LTResult<CorrectionEstimates> {
    let params = IndexEstimatorParams {
        juvenile_i,
        senility_i,
    };
    params
        .validate_all()
        .map_err(|report| {
            CorrectionError::domain(format!(
                "juvenile/senility ratio out of valid range: {}",
                report.to_string().trim_end()
            ))
        })?;

    let log_200j = (200.0 * juvenile_i).log10();

    let estimates = CorrectionEstimates {
        e0: 78.721 * (1.0 / juvenile_i).sqrt().log10() - 3.384,
        q1_0: 0.568 * log_200j.sqrt() - 0.438,
        q5_0: 1.154 * log_200j.sqrt() - 1.014,
        m: 0.127 * juvenile_i + 0.016,
        r: 1.484 * (200.0 * juvenile_i * senility_i).log10().powf(0.03) - 1.485,
    };

    debug!("correction estimates: {estimates:?}");
    Ok(estimates)
}
