use super::descriptors::DescriptorRequest;
use thiserror::Error;

/// Temperature used for Boltzmann populations unless configured otherwise.
pub const DEFAULT_TEMPERATURE_K: f64 = 298.15;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Temperature must be a finite value greater than 0 K (got {0})")]
    InvalidTemperature(f64),

    #[error("Energy cutoff must not be negative (got {0} kcal/mol)")]
    NegativeCutoff(f64),

    #[error("Energy cutoff must be a finite number (got {0})")]
    NonFiniteCutoff(f64),

    #[error("Explicit rank selection is empty")]
    EmptyRankList,
}

/// Criteria restricting which ranks are reported or extracted.
///
/// Both criteria are optional. When both are present, an explicitly requested rank is only
/// selected if it also lies within the energy window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionCriteria {
    /// Relative-energy window in kcal/mol; ranks above it are excluded (inclusive boundary).
    pub cutoff_kcal: Option<f64>,
    /// 1-based ranks requested explicitly.
    pub explicit_ranks: Option<Vec<usize>>,
}

impl SelectionCriteria {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_cutoff(mut self, cutoff_kcal: f64) -> Self {
        self.cutoff_kcal = Some(cutoff_kcal);
        self
    }

    pub fn with_ranks(mut self, ranks: Vec<usize>) -> Self {
        self.explicit_ranks = Some(ranks);
        self
    }

    /// Checks the criteria for values that can never be satisfied.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for negative or non-finite cutoffs and for an explicitly
    /// empty rank list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(cutoff) = self.cutoff_kcal {
            if !cutoff.is_finite() {
                return Err(ConfigError::NonFiniteCutoff(cutoff));
            }
            if cutoff < 0.0 {
                return Err(ConfigError::NegativeCutoff(cutoff));
            }
        }
        if matches!(&self.explicit_ranks, Some(ranks) if ranks.is_empty()) {
            return Err(ConfigError::EmptyRankList);
        }
        Ok(())
    }
}

/// Parameters for one analysis pass.
///
/// This object is threaded explicitly into every stage; nothing is read from process-wide
/// state, so different temperatures can be analyzed side by side in the same process.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub temperature_k: f64,
    pub selection: SelectionCriteria,
    pub descriptor: Option<DescriptorRequest>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            temperature_k: DEFAULT_TEMPERATURE_K,
            selection: SelectionCriteria::default(),
            descriptor: None,
        }
    }
}

impl AnalysisConfig {
    /// Validates the configuration before any computation begins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTemperature`] for temperatures that are not finite and
    /// strictly positive, and propagates errors from [`SelectionCriteria::validate`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.temperature_k.is_finite() && self.temperature_k > 0.0) {
            return Err(ConfigError::InvalidTemperature(self.temperature_k));
        }
        self.selection.validate()
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    temperature_k: Option<f64>,
    cutoff_kcal: Option<f64>,
    explicit_ranks: Option<Vec<usize>>,
    descriptor: Option<DescriptorRequest>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature_k: f64) -> Self {
        self.temperature_k = Some(temperature_k);
        self
    }
    pub fn cutoff_kcal(mut self, cutoff: Option<f64>) -> Self {
        self.cutoff_kcal = cutoff;
        self
    }
    pub fn explicit_ranks(mut self, ranks: Option<Vec<usize>>) -> Self {
        self.explicit_ranks = ranks;
        self
    }
    pub fn descriptor(mut self, request: Option<DescriptorRequest>) -> Self {
        self.descriptor = request;
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let config = AnalysisConfig {
            temperature_k: self.temperature_k.unwrap_or(DEFAULT_TEMPERATURE_K),
            selection: SelectionCriteria {
                cutoff_kcal: self.cutoff_kcal,
                explicit_ranks: self.explicit_ranks,
            },
            descriptor: self.descriptor,
        };
        config.validate()?;
        Ok(config)
    }
}
