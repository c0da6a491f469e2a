use crate::{algebra::*, solver::core::SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Settings for the [`QPSolver`](crate::solver::implementations::qp::QPSolver)
/// and the underlying [`PrimalDualIPM`](crate::solver::PrimalDualIPM) engine.
///
/// Build with [`DefaultSettingsBuilder`], which fills in defaults for any
/// field not specified and validates the result.

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///maximum number of iterations
    #[builder(default = "200")]
    pub max_iter: u32,

    ///maximum run time (seconds)
    #[builder(default = "f64::INFINITY")]
    pub time_limit: f64,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///primal and dual residual norm tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub tol_feas: T,

    ///surrogate duality gap tolerance
    #[builder(default = "(1e-8).as_T()")]
    pub tol_gap: T,

    ///barrier parameter growth factor.  Must be greater than one.
    #[builder(default = "(10.).as_T()")]
    pub barrier_mu: T,

    ///fraction of the maximum step to the boundary of λ ≥ 0
    #[builder(default = "(0.99).as_T()")]
    pub max_step_fraction: T,

    ///sufficient decrease factor for the residual norm line search
    #[builder(default = "(0.1).as_T()")]
    pub linesearch_alpha: T,

    ///step reduction factor for each line search backtrack
    #[builder(default = "(0.8).as_T()")]
    pub linesearch_backtrack_step: T,

    ///maximum number of backtracks per iteration
    #[builder(default = "100")]
    pub linesearch_max_iter: u32,

    ///terminate with insufficient progress for steps shorter than this
    #[builder(default = "(1e-10).as_T()")]
    pub min_terminate_step_length: T,

    ///initial margin added to the slack variable of the QP reformulation
    #[builder(default = "(1.).as_T()")]
    pub slack_margin: T,

    ///enable KKT static regularization
    #[builder(default = "true")]
    pub static_regularization_enable: bool,

    ///KKT static regularization parameter
    #[builder(default = "(1e-8).as_T()")]
    pub static_regularization_constant: T,

    ///additional regularization parameter w.r.t. the maximum abs diagonal term
    #[builder(default = "T::epsilon()*T::epsilon()")]
    pub static_regularization_proportional: T,

    ///enable KKT dynamic regularization
    #[builder(default = "true")]
    pub dynamic_regularization_enable: bool,

    ///KKT dynamic regularization threshold
    #[builder(default = "(1e-13).as_T()")]
    pub dynamic_regularization_eps: T,

    ///KKT dynamic regularization shift
    #[builder(default = "(2e-7).as_T()")]
    pub dynamic_regularization_delta: T,

    ///KKT direct solve with iterative refinement
    #[builder(default = "true")]
    pub iterative_refinement_enable: bool,

    ///iterative refinement relative tolerance
    #[builder(default = "(1e-13).as_T()")]
    pub iterative_refinement_reltol: T,

    ///iterative refinement absolute tolerance
    #[builder(default = "(1e-12).as_T()")]
    pub iterative_refinement_abstol: T,

    ///iterative refinement maximum iterations
    #[builder(default = "10")]
    pub iterative_refinement_max_iter: u32,

    ///iterative refinement stalling tolerance
    #[builder(default = "(5.0).as_T()")]
    pub iterative_refinement_stop_ratio: T,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> DefaultSettings<T>
where
    T: FloatT,
{
    /// Checks that the numerical parameters of the interior point
    /// method are within their legal ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_positive(self.tol_feas, "tol_feas")?;
        validate_positive(self.tol_gap, "tol_gap")?;
        validate_positive(self.min_terminate_step_length, "min_terminate_step_length")?;
        validate_barrier_mu(self.barrier_mu)?;
        validate_max_step_fraction(self.max_step_fraction)?;
        validate_linesearch_alpha(self.linesearch_alpha)?;
        validate_linesearch_backtrack_step(self.linesearch_backtrack_step)?;
        validate_slack_margin(self.slack_margin)?;
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)
impl From<SettingsError> for DefaultSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DefaultSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DefaultSettingsBuilder<T>
where
    T: FloatT,
{
    /// check any explicitly specified parameters for legal values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(v) = self.tol_feas {
            validate_positive(v, "tol_feas")?;
        }
        if let Some(v) = self.tol_gap {
            validate_positive(v, "tol_gap")?;
        }
        if let Some(v) = self.min_terminate_step_length {
            validate_positive(v, "min_terminate_step_length")?;
        }
        if let Some(v) = self.barrier_mu {
            validate_barrier_mu(v)?;
        }
        if let Some(v) = self.max_step_fraction {
            validate_max_step_fraction(v)?;
        }
        if let Some(v) = self.linesearch_alpha {
            validate_linesearch_alpha(v)?;
        }
        if let Some(v) = self.linesearch_backtrack_step {
            validate_linesearch_backtrack_step(v)?;
        }
        if let Some(v) = self.slack_margin {
            validate_slack_margin(v)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_positive<T: FloatT>(v: T, field: &'static str) -> Result<(), SettingsError> {
    if v > T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(field))
    }
}

fn validate_barrier_mu<T: FloatT>(v: T) -> Result<(), SettingsError> {
    if v > T::one() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("barrier_mu"))
    }
}

fn validate_max_step_fraction<T: FloatT>(v: T) -> Result<(), SettingsError> {
    if v > T::zero() && v < T::one() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("max_step_fraction"))
    }
}

fn validate_linesearch_alpha<T: FloatT>(v: T) -> Result<(), SettingsError> {
    if v > T::zero() && v < (0.5).as_T() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("linesearch_alpha"))
    }
}

fn validate_linesearch_backtrack_step<T: FloatT>(v: T) -> Result<(), SettingsError> {
    if v > T::zero() && v < T::one() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("linesearch_backtrack_step"))
    }
}

fn validate_slack_margin<T: FloatT>(v: T) -> Result<(), SettingsError> {
    if v > T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("slack_margin"))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = DefaultSettingsBuilder::<f64>::default().build().unwrap();
    assert!(settings.validate().is_ok());
    assert!(!settings.verbose);
    assert_eq!(settings.max_iter, 200);
    assert_eq!(settings.slack_margin, 1.0);

    // fail on illegal values
    assert!(DefaultSettingsBuilder::<f64>::default()
        .barrier_mu(1.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .slack_margin(0.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .slack_margin(f64::INFINITY)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .max_step_fraction(1.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .linesearch_alpha(0.5)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .linesearch_backtrack_step(0.0)
        .build()
        .is_err());

    assert!(DefaultSettingsBuilder::<f64>::default()
        .tol_feas(-1e-8)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .tol_gap(0.0)
        .build()
        .is_err());
    assert!(DefaultSettingsBuilder::<f64>::default()
        .min_terminate_step_length(f64::NAN)
        .build()
        .is_err());

    // legal non-default values
    assert!(DefaultSettingsBuilder::<f64>::default()
        .slack_margin(1e-3)
        .barrier_mu(50.0)
        .build()
        .is_ok());

    // directly construct a bad DefaultSettings and manually check
    let settings = DefaultSettings::<f64> {
        slack_margin: -1.0,
        ..DefaultSettings::default()
    };
    assert_eq!(
        settings.validate().unwrap_err().to_string(),
        "Bad value for field \"slack_margin\""
    );

    let settings = DefaultSettings::<f64> {
        tol_gap: -1.0,
        ..DefaultSettings::default()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("tol_gap"))
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_settings_partial_json() {
    let json = r#"{ "max_iter": 17, "slack_margin": 2.5 }"#;
    let settings: DefaultSettings<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(settings.max_iter, 17);
    assert_eq!(settings.slack_margin, 2.5);
    assert_eq!(settings.tol_feas, 1e-8);
}
