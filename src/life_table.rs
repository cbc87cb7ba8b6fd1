//! # Life Table Construction
//!
//! Build an abridged life table from an age/death-count table ([`DeathData`]).
//!
//! ## Quick Start
//! ```rust
//! # use ltcorrection::prelude::*;
//! let data = ltdf! {
//!     "a" => [5_u32, 5, 10, 10, 10, 20],
//!     "Dx" => [12.0_f64, 4.0, 9.0, 21.0, 30.0, 24.0],
//! }?;
//! let config = LifeTableConfig::builder().agecor(false).build()?;
//! let lt = life_table().data(&data).config(&config).call()?;
//! println!("e0 = {:.2}", lt.e0()?);
//! # LTResult::Ok(())
//! ```
//!
//! ## Columns
//! - **x**: start age of the class
//! - **a**: class width in years
//! - **Ax**: average number of years lived in the class by those dying in it
//! - **Dx**: observed number of deaths
//! - **dx**: proportion of deaths (per 100)
//! - **lx**: survivors at the start of the class (per 100)
//! - **qx**: probability of death within the class (per 100)
//! - **px**: probability of survival through the class (per 100)
//! - **Lx**: person-years lived in the class
//! - **Tx**: person-years lived from the class onwards
//! - **ex**: life expectancy at the start of the class
//! - **rel_popx**: share of the living population in the class (per 100)
//!
//! ## Configuration Options
//! - **agecor**: adjust `Ax` for the youngest classes (default `true`)
//! - **agecorfac**: explicit `Ax / a` factors from the first class onwards (default empty)
//! - **option_spline**: interpolate adult classes of this width into 5-year classes (default none)

pub mod spline;

use self::spline::spline_adult_classes;
use crate::LTResult;
use crate::dx_data::DeathData;
use crate::errors::CorrectionError;
use crate::helpers::{class_start_ages, column_to_f64_vec, has_columns};
use bon::{bon, builder};
use garde::Validate;
use log::{debug, warn};
use polars::prelude::*;

/// Columns every life table carries, in order.
pub const LIFE_TABLE_COLUMNS: [&str; 12] = [
    "x", "a", "Ax", "Dx", "dx", "lx", "qx", "px", "Lx", "Tx", "ex", "rel_popx",
];

/// Radix of the life table.
const RADIX: f64 = 100.0;

// ===============================================
// LIFE TABLE CONFIGURATION
// ===============================================

/// Options forwarded to every life-table construction.
#[derive(Debug, Clone, PartialEq, Validate)]
#[garde(allow_unvalidated)]
pub struct LifeTableConfig {
    /// Adjust the average years lived by those dying in a class (`Ax`). When `false`,
    /// deaths are assumed to happen in the middle of each class.
    pub agecor: bool,

    /// `Ax / a` factors replacing the defaults from the first class onwards. Defaults are
    /// 1/3 for classes ending at or before age 5 and 1/2 for the others.
    #[garde(custom(validate_agecorfac))]
    pub agecorfac: Vec<f64>,

    /// Width of the adult (age >= 20) classes to interpolate into 5-year classes.
    #[garde(custom(validate_option_spline))]
    pub option_spline: Option<u32>,
}

impl Default for LifeTableConfig {
    fn default() -> Self {
        Self {
            agecor: true,
            agecorfac: Vec::new(),
            option_spline: None,
        }
    }
}

#[bon]
impl LifeTableConfig {
    #[builder]
    pub fn new(
        #[builder(default = true)] agecor: bool,
        #[builder(default)] agecorfac: Vec<f64>,
        option_spline: Option<u32>,
    ) -> LTResult<Self> {
        let config = LifeTableConfig {
            agecor,
            agecorfac,
            option_spline,
        };

        config
            .validate()
            .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

        Ok(config)
    }
}

fn validate_agecorfac(value: &Vec<f64>, _context: &()) -> garde::Result {
    if let Some(bad) = value.iter().find(|f| !(**f > 0.0 && **f <= 1.0)) {
        return Err(garde::Error::new(format!(
            "agecorfac {bad} must be within (0, 1] as it is a share of the class width"
        )));
    }
    Ok(())
}

fn validate_option_spline(value: &Option<u32>, _context: &()) -> garde::Result {
    match value {
        Some(step) if *step == 0 || step % spline::SPLINE_CLASS_WIDTH != 0 => Err(
            garde::Error::new(format!("option_spline {step} must be a positive multiple of 5")),
        ),
        _ => Ok(()),
    }
}

// ===============================================
// LIFE TABLE
// ===============================================

#[derive(Debug, Clone)]
pub struct LifeTable {
    /// Death counts the table was built from, before any spline interpolation.
    pub source: DeathData,

    /// Options the table was built with.
    pub config: LifeTableConfig,

    pub dataframe: DataFrame,
}

impl LifeTable {
    /// Resolve an arbitrary DataFrame as a life table.
    ///
    /// Fails with [`CorrectionError::TypeMismatch`] unless every life-table column is present.
    /// The `a`/`Dx` columns become the source death data.
    pub fn from_df(dataframe: DataFrame) -> LTResult<Self> {
        if !has_columns(&dataframe, &LIFE_TABLE_COLUMNS) {
            let found = dataframe
                .get_column_names()
                .iter()
                .map(|name| name.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Box::new(CorrectionError::TypeMismatch {
                found: format!("DataFrame with columns [{found}]"),
            }));
        }

        let source = DeathData::new(
            "Death data of an existing life table".to_string(),
            dataframe.select(["a", "Dx"])?,
        )?;

        Ok(Self {
            source,
            config: LifeTableConfig::default(),
            dataframe,
        })
    }

    pub fn column(&self, name: &str) -> LTResult<Vec<f64>> {
        column_to_f64_vec(&self.dataframe, name)
    }

    /// Life expectancy at birth.
    pub fn e0(&self) -> LTResult<f64> {
        self.column("ex")?
            .first()
            .copied()
            .ok_or_else(|| "Life table has no rows".into())
    }

    pub fn len(&self) -> usize {
        self.dataframe.height()
    }

    pub fn is_empty(&self) -> bool {
        self.dataframe.height() == 0
    }
}

// ===============================================
// PUBLIC FUNCTIONS
// ===============================================

/// Build a life table from death counts.
///
/// # Formula
/// ```text
/// Ax = a · f          f = agecorfac, 1/3 (class ends ≤ 5) or 1/2
/// dx = Dx / ΣDx · 100
/// lx = 100 - Σ(j<x) dj
/// qx = dx / lx · 100
/// px = 100 - qx
/// Lx = a · lx - (a - Ax) · dx
/// Tx = Σ(j≥x) Lj
/// ex = Tx / lx
/// rel_popx = Lx / ΣLx · 100
/// ```
///
/// # Example
/// ```rust
/// # use ltcorrection::prelude::*;
/// let data = DeathData::from_columns()
///     .a(vec![1, 4, 5, 10, 10, 10, 10, 10])
///     .dx(vec![3.0, 5.0, 4.0, 6.0, 12.0, 20.0, 25.0, 15.0])
///     .call()?;
/// let config = LifeTableConfig::builder().option_spline(10).build()?;
/// let lt = life_table().data(&data).config(&config).call()?;
/// assert_eq!(lt.len(), 12);
/// # LTResult::Ok(())
/// ```
#[builder]
pub fn life_table(data: &DeathData, config: Option<&LifeTableConfig>) -> LTResult<LifeTable> {
    let config = config.cloned().unwrap_or_default();
    config
        .validate()
        .map_err(|err| Box::new(err) as Box<dyn std::error::Error>)?;

    let (widths, deaths) = match config.option_spline {
        Some(step) => spline_adult_classes(&data.widths()?, &data.deaths()?, step)?,
        None => (data.widths()?, data.deaths()?),
    };

    let dataframe = compute_life_table(&widths, &deaths, &config)?;
    debug!(
        "built life table with {} classes from {} source classes",
        dataframe.height(),
        data.len()
    );

    Ok(LifeTable {
        source: data.clone(),
        config,
        dataframe,
    })
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

fn compute_life_table(
    widths: &[u32],
    deaths: &[f64],
    config: &LifeTableConfig,
) -> LTResult<DataFrame> {
    let n = widths.len();
    let x = class_start_ages(widths);
    let a: Vec<f64> = widths.iter().map(|&w| f64::from(w)).collect();

    if config.agecor && config.agecorfac.len() > n {
        warn!(
            "agecorfac has {} factors but the table only {} classes, the surplus is ignored",
            config.agecorfac.len(),
            n
        );
    }

    // Ax
    let ax: Vec<f64> = (0..n)
        .map(|i| {
            let factor = if config.agecor {
                config
                    .agecorfac
                    .get(i)
                    .copied()
                    .unwrap_or_else(|| default_agecor_factor(x[i], widths[i]))
            } else {
                0.5
            };
            a[i] * factor
        })
        .collect();

    // dx
    let total: f64 = deaths.iter().sum();
    let dx: Vec<f64> = deaths.iter().map(|&d| d / total * RADIX).collect();

    // lx
    let lx: Vec<f64> = dx
        .iter()
        .scan(RADIX, |alive, &d| {
            let l = *alive;
            *alive -= d;
            Some(l)
        })
        .collect();

    // qx, px
    let qx: Vec<f64> = dx
        .iter()
        .zip(&lx)
        .map(|(&d, &l)| if l > 0.0 { d / l * RADIX } else { RADIX })
        .collect();
    let px: Vec<f64> = qx.iter().map(|&q| RADIX - q).collect();

    // Lx
    let big_lx: Vec<f64> = (0..n)
        .map(|i| a[i] * lx[i] - (a[i] - ax[i]) * dx[i])
        .collect();

    // Tx, ex
    let mut tx = vec![0.0; n];
    let mut remaining = 0.0;
    for i in (0..n).rev() {
        remaining += big_lx[i];
        tx[i] = remaining;
    }
    let ex: Vec<f64> = tx
        .iter()
        .zip(&lx)
        .map(|(&t, &l)| if l > 0.0 { t / l } else { 0.0 })
        .collect();

    // rel_popx
    let sum_big_lx: f64 = big_lx.iter().sum();
    let rel_popx: Vec<f64> = big_lx.iter().map(|&l| l / sum_big_lx * RADIX).collect();

    let df = DataFrame::new(vec![
        Series::new("x".into(), x).into_column(),
        Series::new("a".into(), widths.to_vec()).into_column(),
        Series::new("Ax".into(), ax).into_column(),
        Series::new("Dx".into(), deaths.to_vec()).into_column(),
        Series::new("dx".into(), dx).into_column(),
        Series::new("lx".into(), lx).into_column(),
        Series::new("qx".into(), qx).into_column(),
        Series::new("px".into(), px).into_column(),
        Series::new("Lx".into(), big_lx).into_column(),
        Series::new("Tx".into(), tx).into_column(),
        Series::new("ex".into(), ex).into_column(),
        Series::new("rel_popx".into(), rel_popx).into_column(),
    ])?;

    Ok(df)
}

/// Infants and young children die early in their class.
fn default_agecor_factor(x: u32, a: u32) -> f64 {
    if x.saturating_add(a) <= 5 {
        1.0 / 3.0
    } else {
        0.5
    }
}
