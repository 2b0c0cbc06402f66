use phf::{Map, phf_map};

/// Element symbols keyed by atomic number.
///
/// Some quantum chemistry programs write the atomic number instead of the symbol in the
/// first column of an XYZ atom line; the parser uses this table to normalize those files.
#[rustfmt::skip]
pub static ELEMENT_SYMBOLS: Map<u32, &'static str> = phf_map! {
    1u32 => "H",   2u32 => "He",
    3u32 => "Li",  4u32 => "Be",  5u32 => "B",   6u32 => "C",   7u32 => "N",   8u32 => "O",
    9u32 => "F",   10u32 => "Ne",
    11u32 => "Na", 12u32 => "Mg", 13u32 => "Al", 14u32 => "Si", 15u32 => "P",  16u32 => "S",
    17u32 => "Cl", 18u32 => "Ar",
    19u32 => "K",  20u32 => "Ca", 21u32 => "Sc", 22u32 => "Ti", 23u32 => "V",  24u32 => "Cr",
    25u32 => "Mn", 26u32 => "Fe", 27u32 => "Co", 28u32 => "Ni", 29u32 => "Cu", 30u32 => "Zn",
    31u32 => "Ga", 32u32 => "Ge", 33u32 => "As", 34u32 => "Se", 35u32 => "Br", 36u32 => "Kr",
    37u32 => "Rb", 38u32 => "Sr", 39u32 => "Y",  40u32 => "Zr", 41u32 => "Nb", 42u32 => "Mo",
    43u32 => "Tc", 44u32 => "Ru", 45u32 => "Rh", 46u32 => "Pd", 47u32 => "Ag", 48u32 => "Cd",
    49u32 => "In", 50u32 => "Sn", 51u32 => "Sb", 52u32 => "Te", 53u32 => "I",  54u32 => "Xe",
    55u32 => "Cs", 56u32 => "Ba",
    // Lanthanides
    57u32 => "La", 58u32 => "Ce", 59u32 => "Pr", 60u32 => "Nd", 61u32 => "Pm", 62u32 => "Sm",
    63u32 => "Eu", 64u32 => "Gd", 65u32 => "Tb", 66u32 => "Dy", 67u32 => "Ho", 68u32 => "Er",
    69u32 => "Tm", 70u32 => "Yb", 71u32 => "Lu",
    72u32 => "Hf", 73u32 => "Ta", 74u32 => "W",  75u32 => "Re", 76u32 => "Os", 77u32 => "Ir",
    78u32 => "Pt", 79u32 => "Au", 80u32 => "Hg", 81u32 => "Tl", 82u32 => "Pb", 83u32 => "Bi",
    84u32 => "Po", 85u32 => "At", 86u32 => "Rn",
};

/// Looks up the element symbol for an atomic number.
///
/// # Return
///
/// Returns `None` for atomic numbers outside the table.
pub fn symbol_for_atomic_number(atomic_number: u32) -> Option<&'static str> {
    ELEMENT_SYMBOLS.get(&atomic_number).copied()
}
