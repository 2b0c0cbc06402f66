use thiserror::Error;

use super::config::ConfigError;
use super::descriptors::{DescriptorError, RankedDescriptorError};
use super::energetics::EnergeticsError;
use super::selection::SelectionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Descriptor evaluation failed for rank {rank}: {source}")]
    Descriptor {
        rank: usize,
        #[source]
        source: DescriptorError,
    },

    #[error("Selection failed: {source}")]
    Selection {
        #[from]
        source: SelectionError,
    },

    #[error("Energetics failed: {source}")]
    Energetics {
        #[from]
        source: EnergeticsError,
    },
}

impl From<RankedDescriptorError> for EngineError {
    fn from(err: RankedDescriptorError) -> Self {
        EngineError::Descriptor {
            rank: err.rank,
            source: err.source,
        }
    }
}
