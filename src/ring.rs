//! Ring perception (smallest set of smallest rings) and classification.

use std::collections::VecDeque;

use crate::molecule::{BondKind, Molecule};

/// Find the smallest set of smallest rings, each ring a list of atom indices.
///
/// For every bond between two cycle atoms, the shortest alternative path
/// between its endpoints closes a candidate ring; candidates are deduplicated
/// and trimmed to the cyclomatic count `bonds - atoms + components`.
pub fn sssr(mol: &Molecule) -> Vec<Vec<usize>> {
    if mol.bond_count() == 0 {
        return Vec::new();
    }

    let cyclomatic = mol.bond_count() as isize - mol.atom_count() as isize
        + component_count(mol) as isize;
    if cyclomatic <= 0 {
        return Vec::new();
    }

    let in_cycle = cycle_atoms(mol);
    let mut rings: Vec<Vec<usize>> = Vec::new();

    for (bi, bond) in mol.bonds.iter().enumerate() {
        if !in_cycle[bond.a] || !in_cycle[bond.b] {
            continue;
        }
        if let Some(mut ring) = detour_path(mol, bond.a, bond.b, bi, &in_cycle) {
            canonicalize(&mut ring);
            if !rings.contains(&ring) {
                rings.push(ring);
            }
        }
    }

    rings.sort_by_key(|r| r.len());
    rings.truncate(cyclomatic as usize);
    rings
}

/// Per-atom flag: belongs to at least one ring.
pub fn ring_membership(mol: &Molecule, rings: &[Vec<usize>]) -> Vec<bool> {
    let mut member = vec![false; mol.atom_count()];
    for ring in rings {
        for &i in ring {
            member[i] = true;
        }
    }
    member
}

/// Sorted, deduplicated indices of bonds that lie on a perceived ring.
pub fn ring_bonds(mol: &Molecule, rings: &[Vec<usize>]) -> Vec<usize> {
    let mut out = Vec::new();
    for ring in rings {
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[(i + 1) % ring.len()];
            for &(n, bi) in &mol.adjacency[a] {
                if n == b {
                    out.push(bi);
                }
            }
        }
    }
    out.sort_unstable();
    out.dedup();
    out
}

/// A ring is aromatic when every member atom is aromatic.
pub fn is_aromatic_ring(mol: &Molecule, ring: &[usize]) -> bool {
    ring.iter().all(|&i| mol.atoms[i].aromatic)
}

/// A ring is saturated when every ring bond is a plain single bond and no
/// member atom is aromatic.
pub fn is_saturated_ring(mol: &Molecule, ring: &[usize]) -> bool {
    if is_aromatic_ring(mol, ring) {
        return false;
    }
    (0..ring.len()).all(|i| {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        mol.bond_between(a, b)
            .map(|bond| bond.kind == BondKind::Single)
            .unwrap_or(false)
            && !mol.atoms[a].aromatic
    })
}

fn component_count(mol: &Molecule) -> usize {
    let n = mol.atom_count();
    let mut seen = vec![false; n];
    let mut components = 0;
    for start in 0..n {
        if seen[start] {
            continue;
        }
        components += 1;
        let mut queue = VecDeque::from([start]);
        seen[start] = true;
        while let Some(cur) = queue.pop_front() {
            for neighbor in mol.neighbors(cur) {
                if !seen[neighbor] {
                    seen[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }
    components
}

/// Mark cycle atoms by iteratively peeling degree-<=1 atoms.
fn cycle_atoms(mol: &Molecule) -> Vec<bool> {
    let n = mol.atom_count();
    let mut degree: Vec<usize> = (0..n).map(|i| mol.degree(i)).collect();
    let mut peeled = vec![false; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| degree[i] <= 1).collect();

    while let Some(atom) = queue.pop_front() {
        if peeled[atom] {
            continue;
        }
        peeled[atom] = true;
        for neighbor in mol.neighbors(atom) {
            if !peeled[neighbor] {
                degree[neighbor] -= 1;
                if degree[neighbor] <= 1 {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    peeled.iter().map(|&p| !p).collect()
}

/// BFS shortest path from `from` to `to` through cycle atoms, avoiding one bond.
fn detour_path(
    mol: &Molecule,
    from: usize,
    to: usize,
    skip_bond: usize,
    in_cycle: &[bool],
) -> Option<Vec<usize>> {
    let n = mol.atom_count();
    let mut parent = vec![usize::MAX; n];
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([from]);
    seen[from] = true;

    while let Some(cur) = queue.pop_front() {
        if cur == to {
            let mut path = vec![to];
            let mut node = to;
            while node != from {
                node = parent[node];
                path.push(node);
            }
            path.reverse();
            return Some(path);
        }
        for &(neighbor, bi) in &mol.adjacency[cur] {
            if bi == skip_bond || seen[neighbor] || !in_cycle[neighbor] {
                continue;
            }
            seen[neighbor] = true;
            parent[neighbor] = cur;
            queue.push_back(neighbor);
        }
    }
    None
}

/// Rotate/reflect so the ring starts at its smallest index and runs in the
/// lexicographically smaller direction, making deduplication a plain compare.
fn canonicalize(ring: &mut Vec<usize>) {
    if ring.is_empty() {
        return;
    }
    let min_pos = (0..ring.len()).min_by_key(|&i| ring[i]).unwrap_or(0);
    ring.rotate_left(min_pos);
    if ring.len() > 2 && ring[ring.len() - 1] < ring[1] {
        ring[1..].reverse();
    }
}
