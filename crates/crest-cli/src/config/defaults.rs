use crestparse::core::io::xyz::EnergyPolicy;
use crestparse::engine::config::DEFAULT_TEMPERATURE_K;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub temperature: f64,
    pub energy_policy: EnergyPolicy,
    pub uniform_atom_count: bool,
    pub output_directory: PathBuf,
    pub prefix: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_K,
            energy_policy: EnergyPolicy::FirstNumeric,
            uniform_atom_count: true,
            output_directory: PathBuf::from("."),
            prefix: "conf".to_string(),
        }
    }
}
