/**
 * Random regex-tree synthesis with the GROW strategy: pick a random
 * operator at every level down to the requested depth, then a leaf.
 */

use rand::Rng;
use rx_syntax::Node;

/// Per-invocation generation context. Holds the symbol pools and the
/// running position counter; built fresh for every tree and thrown away
/// afterwards.
pub(crate) struct GrowContext {
    // Letters not placed yet take priority over repeats
    unused: Vec<char>,
    used: Vec<char>,
    empty_allowed: bool,
    empty_used: bool,
    next_position: usize,
}

impl GrowContext {
    pub(crate) fn over_letters(letters: &[char], include_empty: bool) -> Self {
        assert!(!letters.is_empty(), "generation needs at least one symbol");
        Self{
            unused: letters.to_vec(),
            used: Vec::new(),
            empty_allowed: include_empty,
            empty_used: false,
            next_position: 0,
        }
    }

    pub(crate) fn grow<R>(&mut self, rng: &mut R, depth: usize) -> Box<Node> where R : Rng {
        self.grow_level(rng, depth, false)
    }

    fn grow_level<R>(&mut self, rng: &mut R, depth: usize, under_star: bool) -> Box<Node>
        where R : Rng {

        if depth == 0 {
            return self.leaf(rng);
        }

        // A closure directly under a closure would collapse, so only the
        // binary operators are on offer there
        let choices = if under_star { 2 } else { 3 };
        Box::new(match rng.gen_range(0, choices) {
            0 => {
                let first = self.grow_level(rng, depth - 1, false);
                let second = self.grow_level(rng, depth - 1, false);
                Node::Sequence{ first, second }
            },

            1 => {
                let first = self.grow_level(rng, depth - 1, false);
                let second = self.grow_level(rng, depth - 1, false);
                Node::Alternative{ first, second }
            },

            _ => Node::Star{ subnode: self.grow_level(rng, depth - 1, true) },
        })
    }

    fn leaf<R>(&mut self, rng: &mut R) -> Box<Node> where R : Rng {
        if self.empty_allowed && !self.empty_used && rng.gen_range(0, 4) == 0 {
            self.empty_used = true;
            return Box::new(Node::Empty);
        }

        let symbol = if !self.unused.is_empty() {
            let symbol = self.unused.remove(0);
            self.used.push(symbol);
            symbol
        }
        else {
            self.used[rng.gen_range(0, self.used.len())]
        };

        self.next_position += 1;
        Box::new(Node::Literal{ symbol, position: self.next_position })
    }
}

/// Generates a tree of exactly the requested depth over the first
/// `alphabet_size` lowercase letters. Distinct letters are placed before
/// any letter repeats; `include_empty` allows a single ε leaf. Positions
/// are assigned left-to-right from 1.
pub fn generate_tree<R>(rng: &mut R, depth: usize, alphabet_size: usize, include_empty: bool)
    -> Box<Node> where R : Rng {

    assert!(alphabet_size >= 1 && alphabet_size <= 26, "alphabet must be 1..=26 letters");
    let letters: Vec<char> = (0..alphabet_size)
        .map(|i| (b'a' + i as u8) as char)
        .collect();
    GrowContext::over_letters(&letters, include_empty).grow(rng, depth)
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod grow_tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn generated_trees_have_the_requested_depth() {
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        for depth in 0..7 {
            for _ in 0..20 {
                let tree = generate_tree(&mut rng, depth, 3, false);
                assert_eq!(tree.depth(), depth);
            }
        }
    }

    #[test]
    fn positions_are_contiguous_from_one() {
        let mut rng = Mcg128Xsl64::seed_from_u64(2);
        for _ in 0..50 {
            let tree = generate_tree(&mut rng, 5, 4, true);
            let positions = tree.positions();
            let expected: Vec<usize> = (1..=positions.len()).collect();
            assert_eq!(positions, expected);
        }
    }

    #[test]
    fn symbols_stay_inside_the_alphabet() {
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        for _ in 0..50 {
            let tree = generate_tree(&mut rng, 4, 2, false);
            for symbol in tree.symbols() {
                assert!(symbol == 'a' || symbol == 'b');
            }
            assert!(!tree.contains_empty());
        }
    }

    #[test]
    fn distinct_letters_come_before_repeats() {
        let mut rng = Mcg128Xsl64::seed_from_u64(4);
        for _ in 0..50 {
            let tree = generate_tree(&mut rng, 3, 2, false);
            // A depth-3 tree has at least two leaves only if some binary
            // operator was chosen; with both letters demanded first, any
            // tree with two or more literals must use both
            let literal_count = tree.positions().len();
            if literal_count >= 2 {
                assert_eq!(tree.symbols().len(), 2);
            }
        }
    }

    #[test]
    fn at_most_one_empty_leaf() {
        let mut rng = Mcg128Xsl64::seed_from_u64(5);
        for _ in 0..100 {
            let tree = generate_tree(&mut rng, 4, 3, true);
            let empties = tree.preorder()
                .into_iter()
                .filter(|n| **n == Node::Empty)
                .count();
            assert!(empties <= 1);
        }
    }

    #[test]
    fn no_star_directly_under_star() {
        let mut rng = Mcg128Xsl64::seed_from_u64(6);
        for _ in 0..100 {
            let tree = generate_tree(&mut rng, 5, 3, true);
            for node in tree.preorder() {
                if let Node::Star{ subnode } = node {
                    if let Node::Star{ .. } = **subnode {
                        panic!("generated a doubled closure");
                    }
                }
            }
        }
    }
}
