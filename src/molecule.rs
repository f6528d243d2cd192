//! Molecular graph representation.
//!
//! A [`Molecule`] is the transient in-memory product of structural
//! validation: it lives through descriptor extraction and is discarded
//! afterwards, so it carries only what descriptors need.

/// Bond order classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondKind {
    /// Numeric order for valence arithmetic.
    pub fn order(self) -> f64 {
        match self {
            BondKind::Single => 1.0,
            BondKind::Double => 2.0,
            BondKind::Triple => 3.0,
            BondKind::Aromatic => 1.5,
        }
    }
}

/// An atom in the molecular graph. Hydrogens are implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub number: u8,
    pub charge: i8,
    pub isotope: Option<u16>,
    pub aromatic: bool,
    pub implicit_h: u8,
}

/// A bond between two atoms, referenced by index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub kind: BondKind,
}

/// A molecular graph with adjacency information.
#[derive(Debug, Clone)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    /// adjacency[atom] = (neighbor atom index, bond index)
    pub adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    /// Build a molecule, deriving the adjacency list from the bond list.
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (bi, bond) in bonds.iter().enumerate() {
            adjacency[bond.a].push((bond.b, bi));
            adjacency[bond.b].push((bond.a, bi));
        }
        Molecule { atoms, bonds, adjacency }
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Number of non-hydrogen graph atoms.
    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.number != 1).count()
    }

    /// Graph degree (number of explicit bonds) of an atom.
    pub fn degree(&self, atom: usize) -> usize {
        self.adjacency[atom].len()
    }

    /// Neighbor atom indices of an atom.
    pub fn neighbors(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[atom].iter().map(|&(n, _)| n)
    }

    /// The bond between two atoms, if one exists.
    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        self.adjacency[a]
            .iter()
            .find(|&&(n, _)| n == b)
            .map(|&(_, bi)| &self.bonds[bi])
    }

    /// Sum of bond orders incident to an atom (aromatic counts 1.5).
    pub fn bond_order_sum(&self, atom: usize) -> f64 {
        self.adjacency[atom]
            .iter()
            .map(|&(_, bi)| self.bonds[bi].kind.order())
            .sum()
    }

    /// Whether the atom participates in a double or triple bond.
    pub fn has_multiple_bond(&self, atom: usize) -> bool {
        self.adjacency[atom]
            .iter()
            .any(|&(_, bi)| matches!(self.bonds[bi].kind, BondKind::Double | BondKind::Triple))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethanol() -> Molecule {
        let atoms = vec![
            Atom { number: 6, charge: 0, isotope: None, aromatic: false, implicit_h: 3 },
            Atom { number: 6, charge: 0, isotope: None, aromatic: false, implicit_h: 2 },
            Atom { number: 8, charge: 0, isotope: None, aromatic: false, implicit_h: 1 },
        ];
        let bonds = vec![
            Bond { a: 0, b: 1, kind: BondKind::Single },
            Bond { a: 1, b: 2, kind: BondKind::Single },
        ];
        Molecule::new(atoms, bonds)
    }

    #[test]
    fn adjacency_built_from_bonds() {
        let mol = ethanol();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.degree(0), 1);
        assert_eq!(mol.degree(1), 2);
        assert_eq!(mol.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn bond_between_lookup() {
        let mol = ethanol();
        assert!(mol.bond_between(0, 1).is_some());
        assert!(mol.bond_between(0, 2).is_none());
    }

    #[test]
    fn bond_order_sum_counts_orders() {
        let atoms = vec![
            Atom { number: 6, charge: 0, isotope: None, aromatic: false, implicit_h: 2 },
            Atom { number: 6, charge: 0, isotope: None, aromatic: false, implicit_h: 2 },
        ];
        let bonds = vec![Bond { a: 0, b: 1, kind: BondKind::Double }];
        let mol = Molecule::new(atoms, bonds);
        assert!((mol.bond_order_sum(0) - 2.0).abs() < 1e-12);
        assert!(mol.has_multiple_bond(0));
    }

    #[test]
    fn heavy_atoms_exclude_hydrogen() {
        let atoms = vec![
            Atom { number: 1, charge: 0, isotope: None, aromatic: false, implicit_h: 0 },
            Atom { number: 8, charge: 0, isotope: None, aromatic: false, implicit_h: 1 },
        ];
        let bonds = vec![Bond { a: 0, b: 1, kind: BondKind::Single }];
        let mol = Molecule::new(atoms, bonds);
        assert_eq!(mol.heavy_atom_count(), 1);
    }
}
