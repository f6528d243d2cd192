//! Periodic table data for the elements the pipeline encounters.

/// A chemical element with the properties descriptor computation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub number: u8,
    pub symbol: &'static str,
    pub weight: f64,
    /// Number of valence electrons (for Kier-Hall valence deltas).
    pub valence_electrons: u8,
    /// Maximum bonding capacity used by the valence sanity check.
    pub max_bonds: u8,
    /// Single-bond covalent radius in Angstrom (sp3 where hybridization applies).
    pub covalent_radius: f64,
}

/// Elements that appear in laboratory solubility datasets: the SMILES organic
/// subset, the halogens, and the common salt counter-ions.
static ELEMENTS: &[Element] = &[
    Element { number: 1, symbol: "H", weight: 1.008, valence_electrons: 1, max_bonds: 1, covalent_radius: 0.32 },
    Element { number: 3, symbol: "Li", weight: 6.941, valence_electrons: 1, max_bonds: 1, covalent_radius: 1.34 },
    Element { number: 5, symbol: "B", weight: 10.81, valence_electrons: 3, max_bonds: 4, covalent_radius: 0.82 },
    Element { number: 6, symbol: "C", weight: 12.011, valence_electrons: 4, max_bonds: 4, covalent_radius: 0.77 },
    Element { number: 7, symbol: "N", weight: 14.007, valence_electrons: 5, max_bonds: 4, covalent_radius: 0.74 },
    Element { number: 8, symbol: "O", weight: 15.999, valence_electrons: 6, max_bonds: 3, covalent_radius: 0.74 },
    Element { number: 9, symbol: "F", weight: 18.998, valence_electrons: 7, max_bonds: 1, covalent_radius: 0.72 },
    Element { number: 11, symbol: "Na", weight: 22.990, valence_electrons: 1, max_bonds: 1, covalent_radius: 1.54 },
    Element { number: 12, symbol: "Mg", weight: 24.305, valence_electrons: 2, max_bonds: 2, covalent_radius: 1.30 },
    Element { number: 13, symbol: "Al", weight: 26.982, valence_electrons: 3, max_bonds: 4, covalent_radius: 1.18 },
    Element { number: 14, symbol: "Si", weight: 28.086, valence_electrons: 4, max_bonds: 4, covalent_radius: 1.11 },
    Element { number: 15, symbol: "P", weight: 30.974, valence_electrons: 5, max_bonds: 6, covalent_radius: 1.10 },
    Element { number: 16, symbol: "S", weight: 32.06, valence_electrons: 6, max_bonds: 6, covalent_radius: 1.04 },
    Element { number: 17, symbol: "Cl", weight: 35.45, valence_electrons: 7, max_bonds: 1, covalent_radius: 0.99 },
    Element { number: 19, symbol: "K", weight: 39.098, valence_electrons: 1, max_bonds: 1, covalent_radius: 1.96 },
    Element { number: 20, symbol: "Ca", weight: 40.078, valence_electrons: 2, max_bonds: 2, covalent_radius: 1.74 },
    Element { number: 26, symbol: "Fe", weight: 55.845, valence_electrons: 8, max_bonds: 6, covalent_radius: 1.25 },
    Element { number: 29, symbol: "Cu", weight: 63.546, valence_electrons: 11, max_bonds: 6, covalent_radius: 1.28 },
    Element { number: 30, symbol: "Zn", weight: 65.38, valence_electrons: 12, max_bonds: 4, covalent_radius: 1.33 },
    Element { number: 33, symbol: "As", weight: 74.922, valence_electrons: 5, max_bonds: 5, covalent_radius: 1.21 },
    Element { number: 34, symbol: "Se", weight: 78.96, valence_electrons: 6, max_bonds: 6, covalent_radius: 1.17 },
    Element { number: 35, symbol: "Br", weight: 79.904, valence_electrons: 7, max_bonds: 1, covalent_radius: 1.14 },
    Element { number: 47, symbol: "Ag", weight: 107.868, valence_electrons: 11, max_bonds: 4, covalent_radius: 1.45 },
    Element { number: 50, symbol: "Sn", weight: 118.710, valence_electrons: 4, max_bonds: 4, covalent_radius: 1.41 },
    Element { number: 53, symbol: "I", weight: 126.904, valence_electrons: 7, max_bonds: 1, covalent_radius: 1.33 },
];

/// Look up an element by its symbol (e.g. "C", "Na").
pub fn by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Look up an element by atomic number.
pub fn by_number(number: u8) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.number == number)
}
