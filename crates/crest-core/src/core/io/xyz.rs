use crate::core::io::elements::symbol_for_atomic_number;
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Tokens that explicitly label the energy value on a comment line, compared
/// case-insensitively. Longer labels come first so that `energy=` wins over `energy`.
const ENERGY_LABELS: [&str; 4] = ["energy:", "energy=", "energy", "e="];

const MAX_PREALLOCATED_ATOMS: usize = 4096;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },
    #[error(
        "Inconsistent atom count in structure {structure} (line {line}): expected {expected}, found {found}"
    )]
    InconsistentAtomCount {
        structure: usize,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Input contains no structures")]
    NoStructures,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{value}' (must be a positive integer)")]
    InvalidAtomCount { value: String },
    #[error("No energy value found in comment line")]
    MissingEnergy,
    #[error("Comment line '{value}' contains several unlabeled numeric tokens")]
    AmbiguousEnergy { value: String },
    #[error("Atom line is empty")]
    MissingElement,
    #[error("Invalid element token '{value}'")]
    InvalidElement { value: String },
    #[error("Unknown atomic number {value}")]
    UnknownElement { value: String },
    #[error("Atom line has {found} coordinate(s), expected 3")]
    MissingCoordinates { found: usize },
    #[error("Invalid {axis} coordinate '{value}'")]
    InvalidCoordinate { axis: char, value: String },
}

/// Rule used to pick the energy out of a comment line.
///
/// Under both policies a line that is a bare number is that number, and an explicitly
/// labeled value (`energy: -42.1`, `E=-42.1`) takes precedence over any other token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnergyPolicy {
    /// Take the first whitespace-separated token that parses as a finite float.
    #[default]
    FirstNumeric,
    /// Like `FirstNumeric`, but reject unlabeled lines carrying more than one numeric token.
    Unambiguous,
}

impl fmt::Display for EnergyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyPolicy::FirstNumeric => write!(f, "first-numeric"),
            EnergyPolicy::Unambiguous => write!(f, "unambiguous"),
        }
    }
}

impl FromStr for EnergyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first-numeric" | "first_numeric" | "first" => Ok(EnergyPolicy::FirstNumeric),
            "unambiguous" | "strict" => Ok(EnergyPolicy::Unambiguous),
            other => Err(format!(
                "Unknown energy policy '{}'. Expected 'first-numeric' or 'unambiguous'.",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub energy_policy: EnergyPolicy,
    /// Reject files whose structures declare different atom counts.
    pub uniform_atom_count: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            energy_policy: EnergyPolicy::default(),
            uniform_atom_count: true,
        }
    }
}

/// Parses a float token, accepting Fortran `D` exponents and rejecting non-finite values.
pub(crate) fn parse_float(token: &str) -> Option<f64> {
    let value = token.parse::<f64>().ok().or_else(|| {
        if token.contains(['d', 'D']) {
            token.replace(['d', 'D'], "e").parse::<f64>().ok()
        } else {
            None
        }
    })?;
    value.is_finite().then_some(value)
}

fn labeled_energy(tokens: &[&str]) -> Option<f64> {
    for (i, token) in tokens.iter().enumerate() {
        let lower = token.to_ascii_lowercase();
        for label in ENERGY_LABELS {
            if lower == label {
                let mut next = i + 1;
                if matches!(tokens.get(next), Some(&"=") | Some(&":")) {
                    next += 1;
                }
                if let Some(value) = tokens.get(next).and_then(|t| parse_float(t)) {
                    return Some(value);
                }
            } else if let Some(value) = lower.strip_prefix(label).and_then(parse_float) {
                return Some(value);
            }
        }
    }
    None
}

/// Extracts the energy from an XYZ comment line.
///
/// The rule, in order: a line that is a bare float is that float; otherwise a value
/// following an energy label (`energy:`, `energy=`, `energy`, `E=`, optionally separated
/// by a lone `=` or `:` token, or fused like `E=-42.1`); otherwise the first token that
/// parses as a finite float. With [`EnergyPolicy::Unambiguous`] the last step fails if more
/// than one token is numeric.
///
/// # Errors
///
/// Returns [`XyzParseErrorKind::MissingEnergy`] if no numeric token exists and
/// [`XyzParseErrorKind::AmbiguousEnergy`] for ambiguous lines under the strict policy.
pub fn parse_energy(line: &str, policy: EnergyPolicy) -> Result<f64, XyzParseErrorKind> {
    let trimmed = line.trim();
    if let Some(value) = parse_float(trimmed) {
        return Ok(value);
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if let Some(value) = labeled_energy(&tokens) {
        return Ok(value);
    }

    let mut numeric = tokens.iter().filter_map(|t| parse_float(t));
    let first = numeric.next().ok_or(XyzParseErrorKind::MissingEnergy)?;
    if policy == EnergyPolicy::Unambiguous && numeric.next().is_some() {
        return Err(XyzParseErrorKind::AmbiguousEnergy {
            value: trimmed.to_string(),
        });
    }
    Ok(first)
}

fn parse_atom_count(line: &str) -> Result<usize, XyzParseErrorKind> {
    let trimmed = line.trim();
    match trimmed.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(XyzParseErrorKind::InvalidAtomCount {
            value: trimmed.to_string(),
        }),
    }
}

fn resolve_element(token: &str) -> Result<String, XyzParseErrorKind> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<u32>()
            .ok()
            .and_then(symbol_for_atomic_number)
            .map(str::to_string)
            .ok_or_else(|| XyzParseErrorKind::UnknownElement {
                value: token.to_string(),
            });
    }
    if token.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Ok(token.to_string())
    } else {
        Err(XyzParseErrorKind::InvalidElement {
            value: token.to_string(),
        })
    }
}

fn parse_atom_line(line: &str) -> Result<Atom, XyzParseErrorKind> {
    let mut tokens = line.split_whitespace();
    let element = resolve_element(tokens.next().ok_or(XyzParseErrorKind::MissingElement)?)?;

    let mut coords = [0.0f64; 3];
    for (found, (axis, slot)) in ['x', 'y', 'z'].into_iter().zip(coords.iter_mut()).enumerate() {
        let token = tokens
            .next()
            .ok_or(XyzParseErrorKind::MissingCoordinates { found })?;
        *slot = parse_float(token).ok_or_else(|| XyzParseErrorKind::InvalidCoordinate {
            axis,
            value: token.to_string(),
        })?;
    }

    Ok(Atom {
        element,
        position: Point3::new(coords[0], coords[1], coords[2]),
    })
}

struct LineCursor<I> {
    lines: I,
    line_num: usize,
}

impl<I: Iterator<Item = io::Result<String>>> LineCursor<I> {
    fn new(lines: I) -> Self {
        Self { lines, line_num: 0 }
    }

    fn next_line(&mut self) -> Result<Option<(usize, String)>, XyzError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line_res) => {
                let line = line_res?;
                self.line_num += 1;
                Ok(Some((self.line_num, line)))
            }
        }
    }

    fn next_non_blank(&mut self) -> Result<Option<(usize, String)>, XyzError> {
        while let Some((line_num, line)) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some((line_num, line)));
            }
        }
        Ok(None)
    }

    fn expect_line(&mut self, expected: impl FnOnce() -> String) -> Result<(usize, String), XyzError> {
        let next_line_num = self.line_num + 1;
        self.next_line()?.ok_or_else(|| XyzError::UnexpectedEof {
            line: next_line_num,
            expected: expected(),
        })
    }
}

/// Writes one structure as a standalone XYZ block.
///
/// Coordinates are printed in Rust's shortest round-trip representation, so reading the
/// block back yields bit-identical positions. A blank comment is replaced by the energy.
pub fn write_structure(structure: &Structure, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "{}", structure.atom_count())?;
    if structure.comment().trim().is_empty() {
        writeln!(writer, "{}", structure.energy())?;
    } else {
        writeln!(writer, "{}", structure.comment())?;
    }
    for atom in structure.atoms() {
        writeln!(
            writer,
            "{:<2} {:>20} {:>20} {:>20}",
            atom.element, atom.position.x, atom.position.y, atom.position.z
        )?;
    }
    Ok(())
}

pub struct XyzFile;

impl XyzFile {
    /// Parses a complete multi-structure XYZ text held in memory.
    pub fn parse_str(text: &str, options: &ParseOptions) -> Result<Vec<Structure>, XyzError> {
        Self::read_with_options(&mut text.as_bytes(), options)
    }
}

impl StructureFile for XyzFile {
    type Options = ParseOptions;
    type Error = XyzError;

    fn read_with_options(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Vec<Structure>, Self::Error> {
        let mut cursor = LineCursor::new(reader.lines());
        let mut structures: Vec<Structure> = Vec::new();

        while let Some((header_line, header)) = cursor.next_non_blank()? {
            let atom_count = parse_atom_count(&header).map_err(|kind| XyzError::Parse {
                line: header_line,
                kind,
            })?;

            if options.uniform_atom_count {
                if let Some(first) = structures.first() {
                    if first.atom_count() != atom_count {
                        return Err(XyzError::InconsistentAtomCount {
                            structure: structures.len() + 1,
                            line: header_line,
                            expected: first.atom_count(),
                            found: atom_count,
                        });
                    }
                }
            }

            let (comment_line, comment) = cursor.expect_line(|| "comment line".to_string())?;
            let energy = parse_energy(&comment, options.energy_policy).map_err(|kind| {
                XyzError::Parse {
                    line: comment_line,
                    kind,
                }
            })?;

            // The header is untrusted until its atom lines have been read.
            let mut atoms = Vec::with_capacity(atom_count.min(MAX_PREALLOCATED_ATOMS));
            for i in 0..atom_count {
                let (line_num, line) =
                    cursor.expect_line(|| format!("atom line {} of {}", i + 1, atom_count))?;
                let atom = parse_atom_line(&line).map_err(|kind| XyzError::Parse {
                    line: line_num,
                    kind,
                })?;
                atoms.push(atom);
            }

            structures.push(Structure::new(structures.len(), energy, &comment, atoms));
        }

        if structures.is_empty() {
            return Err(XyzError::NoStructures);
        }
        Ok(structures)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        write_structure(structure, writer)?;
        Ok(())
    }
}
