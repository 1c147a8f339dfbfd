//! Killer cage generation over a solved grid.

use gridwing_core::{Board, Cage, ValueSet};
use rand::{Rng, RngExt};

/// Smallest cage the generator aims for.
pub const MIN_CAGE_SIZE: usize = 2;
/// Largest cage the generator will build.
pub const MAX_CAGE_SIZE: usize = 5;

/// Partitions a solved board into killer cages.
///
/// Cages are grown region by region: a random unclaimed cell seeds each
/// cage, then adjacent unclaimed cells are merged until a randomly chosen
/// target size in `2..=5` is reached or no neighbor qualifies. A cage
/// never contains the same value twice, so its sum constraint stays
/// satisfiable. Single-cell leftovers are folded into an adjacent cage
/// when one can legally absorb them.
///
/// # Examples
///
/// ```
/// use gridwing_core::{Board, GameType, codec};
/// use gridwing_generator::CageGenerator;
/// use rand::SeedableRng as _;
///
/// let solved = codec::parse_board("532614416523653241124356345162261435", GameType::CLASSIC_6X6)
///     .unwrap();
/// let mut rng = rand_pcg::Pcg64::seed_from_u64(1);
/// let cages = CageGenerator::new(&solved).generate(&mut rng);
///
/// let covered: usize = cages.iter().map(|cage| cage.size()).sum();
/// assert_eq!(covered, 36);
/// ```
#[derive(Debug)]
pub struct CageGenerator<'a> {
    board: &'a Board,
}

impl<'a> CageGenerator<'a> {
    /// Creates a generator over a fully solved board.
    #[must_use]
    pub fn new(board: &'a Board) -> Self {
        debug_assert!(board.is_full(), "cages are generated over a solved grid");
        Self { board }
    }

    /// Generates a cage partition of the board.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Cage> {
        let size = self.board.size();
        let mut unused: Vec<(u8, u8)> = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .collect();
        let mut cages = Vec::new();

        while !unused.is_empty() {
            let start = unused.swap_remove(rng.random_range(0..unused.len()));
            let target = rng.random_range(MIN_CAGE_SIZE..=MAX_CAGE_SIZE);
            let mut cells = vec![start];
            let mut values = ValueSet::only(self.board.value(start.0, start.1));

            while cells.len() < target {
                let frontier = self.frontier(&cells, &unused, values);
                if frontier.is_empty() {
                    break;
                }
                let pick = frontier[rng.random_range(0..frontier.len())];
                unused.retain(|pos| *pos != pick);
                values.insert(self.board.value(pick.0, pick.1));
                cells.push(pick);
            }

            cages.push(Cage {
                id: 0,
                sum: self.sum_of(&cells),
                cells,
            });
        }

        self.merge_singletons(&mut cages);
        for (id, cage) in cages.iter_mut().enumerate() {
            cage.id = u16::try_from(id).expect("cage counts fit in u16");
        }
        cages
    }

    /// Returns unclaimed neighbors of the cage that would not duplicate a
    /// value.
    fn frontier(
        &self,
        cells: &[(u8, u8)],
        unused: &[(u8, u8)],
        values: ValueSet,
    ) -> Vec<(u8, u8)> {
        let mut frontier = Vec::new();
        for &(row, col) in cells {
            for neighbor in self.neighbors(row, col) {
                if unused.contains(&neighbor)
                    && !values.contains(self.board.value(neighbor.0, neighbor.1))
                    && !frontier.contains(&neighbor)
                {
                    frontier.push(neighbor);
                }
            }
        }
        frontier
    }

    fn neighbors(&self, row: u8, col: u8) -> Vec<(u8, u8)> {
        let size = self.board.size();
        let mut neighbors = Vec::with_capacity(4);
        if row > 0 {
            neighbors.push((row - 1, col));
        }
        if col > 0 {
            neighbors.push((row, col - 1));
        }
        if col + 1 < size {
            neighbors.push((row, col + 1));
        }
        if row + 1 < size {
            neighbors.push((row + 1, col));
        }
        neighbors
    }

    fn sum_of(&self, cells: &[(u8, u8)]) -> u16 {
        cells
            .iter()
            .map(|&(row, col)| u16::from(self.board.value(row, col)))
            .sum()
    }

    /// Folds single-cell cages into an adjacent cage that can absorb them.
    fn merge_singletons(&self, cages: &mut Vec<Cage>) {
        let mut i = 0;
        while i < cages.len() {
            if cages[i].size() > 1 {
                i += 1;
                continue;
            }
            let cell = cages[i].cells[0];
            let value = self.board.value(cell.0, cell.1);
            let host = cages.iter().position(|other| {
                other.size() > 1
                    && other.size() < MAX_CAGE_SIZE
                    && other
                        .cells
                        .iter()
                        .any(|&(row, col)| adjacent((row, col), cell))
                    && other
                        .cells
                        .iter()
                        .all(|&(row, col)| self.board.value(row, col) != value)
            });
            match host {
                Some(host) => {
                    let orphan = cages.remove(i);
                    let host = if host > i { host - 1 } else { host };
                    cages[host].cells.push(cell);
                    cages[host].sum += orphan.sum;
                }
                None => {
                    log::debug!("leaving a single-cell cage at r{}c{}", cell.0 + 1, cell.1 + 1);
                    i += 1;
                }
            }
        }
    }
}

fn adjacent(a: (u8, u8), b: (u8, u8)) -> bool {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    dr + dc == 1
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use gridwing_core::{GameType, codec};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    fn solved_6x6() -> Board {
        codec::parse_board("532614416523653241124356345162261435", GameType::CLASSIC_6X6).unwrap()
    }

    #[test]
    fn test_cages_partition_the_board() {
        let board = solved_6x6();
        let mut rng = Pcg64::seed_from_u64(42);
        let cages = CageGenerator::new(&board).generate(&mut rng);

        let mut seen = BTreeSet::new();
        for cage in &cages {
            for &pos in &cage.cells {
                assert!(seen.insert(pos), "cell {pos:?} appears in two cages");
            }
        }
        assert_eq!(seen.len(), 36);
    }

    #[test]
    fn test_cage_sums_and_sizes() {
        let board = solved_6x6();
        let mut rng = Pcg64::seed_from_u64(7);
        let cages = CageGenerator::new(&board).generate(&mut rng);

        for cage in &cages {
            assert!(cage.size() <= MAX_CAGE_SIZE);
            let sum: u16 = cage
                .cells
                .iter()
                .map(|&(row, col)| u16::from(board.value(row, col)))
                .sum();
            assert_eq!(sum, cage.sum);

            let distinct: BTreeSet<u8> = cage
                .cells
                .iter()
                .map(|&(row, col)| board.value(row, col))
                .collect();
            assert_eq!(distinct.len(), cage.size(), "cage repeats a value");

            // every cell connects to the rest of its cage
            if cage.size() > 1 {
                for &pos in &cage.cells {
                    assert!(
                        cage.cells.iter().any(|&other| adjacent(pos, other)),
                        "cell {pos:?} is disconnected from its cage"
                    );
                }
            }
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let board = solved_6x6();
        let mut rng = Pcg64::seed_from_u64(3);
        let cages = CageGenerator::new(&board).generate(&mut rng);
        for (i, cage) in cages.iter().enumerate() {
            assert_eq!(usize::from(cage.id), i);
        }
    }
}
