pub mod analyze;
pub mod extract;

use crate::error::{CliError, Result};
use crestparse::core::io::traits::StructureFile;
use crestparse::core::io::xyz::{ParseOptions, XyzFile};
use crestparse::core::models::structure::Structure;
use std::path::Path;
use tracing::info;

/// Reads every structure of an XYZ ensemble, attributing parse failures to the file.
pub(crate) fn load_structures(path: &Path, options: &ParseOptions) -> Result<Vec<Structure>> {
    info!("Loading structures from {:?}", path);
    let structures = XyzFile::read_from_path_with_options(path, options).map_err(|e| {
        CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        }
    })?;
    info!("Successfully read in {} structures", structures.len());
    Ok(structures)
}
