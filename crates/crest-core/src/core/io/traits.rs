use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading structure ensembles and writing single structures.
///
/// Readers return every structure of a file in file order; writers emit one structure as a
/// standalone file, which is what the extractor needs.
pub trait StructureFile {
    /// Format-specific parsing options.
    type Options: Default;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads all structures from a buffered reader using the given options.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `options` - Format-specific parsing options.
    ///
    /// # Return
    ///
    /// Returns the parsed structures in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues. No partial
    /// result is returned.
    fn read_with_options(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Vec<Structure>, Self::Error>;

    /// Writes a single structure to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads all structures from a buffered reader using default options.
    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Structure>, Self::Error> {
        Self::read_with_options(reader, &Self::Options::default())
    }

    /// Reads all structures from a file path using default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Structure>, Self::Error> {
        Self::read_from_path_with_options(path, &Self::Options::default())
    }

    /// Reads all structures from a file path using the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path_with_options<P: AsRef<Path>>(
        path: P,
        options: &Self::Options,
    ) -> Result<Vec<Structure>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_with_options(&mut reader, options)
    }

    /// Writes a single structure to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(structure: &Structure, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(structure, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
