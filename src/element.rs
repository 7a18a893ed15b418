//! Element symbol lookup for the atoms a fragment may contain.
//!
//! Fragment validation only needs to know whether a symbol names a real
//! element and which symbols may appear outside brackets, so the table here
//! is symbols only.

/// Symbols allowed without brackets (the SMILES organic subset).
pub const ORGANIC_SUBSET: [&str; 10] = ["B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I"];

/// Lowercase aromatic symbols allowed inside brackets, with atomic numbers.
/// Two-letter entries come first so `se` wins over `s`.
pub const AROMATIC_BRACKET: [(&str, u8); 8] = [
    ("se", 34),
    ("te", 52),
    ("b", 5),
    ("c", 6),
    ("n", 7),
    ("o", 8),
    ("p", 15),
    ("s", 16),
];

/// Atomic number for an element symbol. Case-sensitive, like SMILES.
pub fn atomic_num(symbol: &str) -> Option<u8> {
    SYMBOLS
        .iter()
        .position(|s| *s == symbol)
        .map(|i| i as u8 + 1)
}

pub fn is_organic_subset(symbol: &str) -> bool {
    ORGANIC_SUBSET.contains(&symbol)
}

static SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_num_spot_check() {
        assert_eq!(atomic_num("H"), Some(1));
        assert_eq!(atomic_num("C"), Some(6));
        assert_eq!(atomic_num("Fe"), Some(26));
        assert_eq!(atomic_num("Og"), Some(118));
    }

    #[test]
    fn atomic_num_case_sensitive() {
        assert!(atomic_num("he").is_none());
        assert!(atomic_num("HE").is_none());
        assert!(atomic_num("").is_none());
        assert!(atomic_num("Xx").is_none());
    }

    #[test]
    fn r_and_a_are_not_elements() {
        // Attachment markers rely on these never resolving.
        assert!(atomic_num("R").is_none());
        assert!(atomic_num("A").is_none());
    }

    #[test]
    fn organic_subset() {
        assert!(is_organic_subset("C"));
        assert!(is_organic_subset("Br"));
        assert!(!is_organic_subset("Fe"));
        assert!(!is_organic_subset("c"));
    }

    #[test]
    fn aromatic_symbols_resolve() {
        for (sym, num) in AROMATIC_BRACKET {
            let upper: String = sym[..1].to_uppercase() + &sym[1..];
            assert_eq!(atomic_num(&upper), Some(num), "{sym}");
        }
    }
}
