//! Structure validation: parsing plus chemical sanitization.
//!
//! Parsing failures surface as [`AquasolError::Parse`]; a graph that parses
//! but is chemically inconsistent fails sanitization with
//! [`AquasolError::InvalidStructure`]. Both are deterministic and permanent
//! for a given notation, so there is nothing to retry.

use crate::element;
use crate::error::{AquasolError, Result};
use crate::molecule::{BondKind, Molecule};
use crate::ring;
use crate::smiles;

/// Parse and sanitize a structural notation string.
pub fn validate(notation: &str) -> Result<Molecule> {
    let mol = smiles::parse(notation.trim())?;
    sanitize(&mol)?;
    Ok(mol)
}

/// Chemical consistency checks on a parsed graph.
pub fn sanitize(mol: &Molecule) -> Result<()> {
    if mol.atom_count() == 0 {
        return Err(AquasolError::InvalidStructure("empty molecule".into()));
    }

    for (i, atom) in mol.atoms.iter().enumerate() {
        let elem = element::by_number(atom.number).ok_or_else(|| {
            AquasolError::InvalidStructure(format!("atom {i}: unsupported element {}", atom.number))
        })?;

        if atom.charge.abs() > 4 {
            return Err(AquasolError::InvalidStructure(format!(
                "atom {i} ({}): formal charge {} out of range",
                elem.symbol, atom.charge
            )));
        }

        // aromatic bonds occupy one sigma slot each plus one shared pi slot
        let mut used: f64 = mol.adjacency[i]
            .iter()
            .map(|&(_, bi)| match mol.bonds[bi].kind {
                BondKind::Aromatic => 1.0,
                kind => kind.order(),
            })
            .sum();
        if atom.aromatic {
            used += 1.0;
        }
        let occupancy = used.round() as usize + atom.implicit_h as usize;
        if occupancy > elem.max_bonds as usize {
            return Err(AquasolError::InvalidStructure(format!(
                "atom {i} ({}): valence {occupancy} exceeds maximum {}",
                elem.symbol, elem.max_bonds
            )));
        }
    }

    check_aromaticity(mol)?;
    Ok(())
}

/// Every atom flagged aromatic must sit in a ring whose members are all
/// aromatic; an aromatic flag outside such a ring is an inconsistency.
fn check_aromaticity(mol: &Molecule) -> Result<()> {
    if !mol.atoms.iter().any(|a| a.aromatic) {
        return Ok(());
    }

    let rings = ring::sssr(mol);
    let mut in_aromatic_ring = vec![false; mol.atom_count()];
    for r in &rings {
        if ring::is_aromatic_ring(mol, r) {
            for &i in r {
                in_aromatic_ring[i] = true;
            }
        }
    }

    for (i, atom) in mol.atoms.iter().enumerate() {
        if atom.aromatic && !in_aromatic_ring[i] {
            return Err(AquasolError::InvalidStructure(format!(
                "atom {i}: aromatic atom outside any aromatic ring"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_structures() {
        for smi in [
            "CCO",
            "CC(=O)O",
            "c1ccccc1",
            "CC(=O)Oc1ccccc1C(=O)O",
            "CC(=O)[O-].[Na+]",
            "c1ccc2ccccc2c1",
        ] {
            assert!(validate(smi).is_ok(), "rejected {smi}");
        }
    }

    #[test]
    fn rejects_syntax_errors_as_parse() {
        match validate("C1CC(") {
            Err(AquasolError::Parse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_pentavalent_carbon() {
        match validate("C(C)(C)(C)(C)C") {
            Err(AquasolError::InvalidStructure(_)) => {}
            other => panic!("expected invalid structure, got {other:?}"),
        }
    }

    #[test]
    fn rejects_overfilled_bracket_hydrogens() {
        assert!(validate("[CH5]").is_err());
        assert!(validate("[OH4]").is_err());
    }

    #[test]
    fn rejects_acyclic_aromatic_atoms() {
        match validate("cc") {
            Err(AquasolError::InvalidStructure(_)) => {}
            other => panic!("expected invalid structure, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_notation() {
        assert!(validate("").is_err());
        assert!(validate("   ").is_err());
    }

    #[test]
    fn aromatic_ring_with_substituent_is_fine() {
        assert!(validate("Cc1ccccc1O").is_ok());
    }

    #[test]
    fn charged_atoms_within_range() {
        assert!(validate("[NH4+]").is_ok());
        assert!(validate("[O-]S(=O)(=O)[O-]").is_ok());
    }
}
