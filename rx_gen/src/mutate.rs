/**
 * Near-equivalent tree mutations: replace one randomly chosen subtree with
 * a freshly grown one of the same depth, keeping the rest of the tree
 * intact.
 */

use rand::Rng;
use rx_syntax::{ast, Node};
use crate::grow::GrowContext;

// Fresh letters widen the replacement alphabet when the tree's own symbols
// cannot produce a structurally different subtree (a single-letter leaf
// being the typical case)
const WIDEN_AFTER_ATTEMPTS: usize = 16;

/// Replaces one uniformly chosen node of the tree with a freshly generated
/// subtree of the same depth, renumbering every literal position
/// left-to-right. An end-marker augmented input is stripped first and
/// re-augmented at the end. The result is never structurally equal to the
/// input.
pub fn mutate<R>(tree: &Node, rng: &mut R) -> Box<Node> where R : Rng {
    let (inner, was_augmented) = match ast::strip_end_marker(tree) {
        Some(stripped) => (stripped, true),
        None => (tree, false),
    };

    let nodes = inner.preorder();
    let chosen = nodes[rng.gen_range(0, nodes.len())];
    let replacement = distinct_replacement(rng, inner, chosen);

    let mut replaced = false;
    let rebuilt = substitute(inner, chosen, &replacement, &mut replaced);
    assert!(replaced, "the chosen node was not found during the rebuild");

    if was_augmented {
        ast::augment(rebuilt)
    }
    else {
        ast::renumber(rebuilt)
    }
}

/// Collects the original plus generated mutations until `count` pairwise
/// structurally distinct expressions are gathered. Deterministic for a
/// given random source.
pub fn alternatives<R>(tree: &Node, count: usize, rng: &mut R) -> Vec<Box<Node>>
    where R : Rng {

    let mut result: Vec<Box<Node>> = Vec::new();
    if count == 0 {
        return result;
    }
    result.push(Box::new(tree.clone()));

    while result.len() < count {
        // Mutating any already accepted member keeps the pool growing even
        // when the original admits only a handful of direct mutations
        let base = rng.gen_range(0, result.len());
        let candidate = mutate(&result[base], rng);
        if result.iter().all(|existing| **existing != *candidate) {
            result.push(candidate);
        }
    }

    result
}

/// Grows replacement subtrees over the tree's own alphabet until one
/// differs from the chosen node.
fn distinct_replacement<R>(rng: &mut R, tree: &Node, chosen: &Node) -> Box<Node>
    where R : Rng {

    let mut letters = tree.symbols();
    letters.sort();
    if letters.is_empty() {
        letters.push('a');
    }
    let mut include_empty = tree.contains_empty();
    let depth = chosen.depth();

    let mut attempts = 0;
    loop {
        let replacement = GrowContext::over_letters(&letters, include_empty).grow(rng, depth);
        if *replacement != *chosen {
            return replacement;
        }

        attempts += 1;
        if attempts % WIDEN_AFTER_ATTEMPTS == 0 {
            match next_fresh_letter(&letters) {
                Some(letter) => letters.push(letter),
                // Out of fresh lowercase letters; ε still breaks the tie
                None => include_empty = true,
            }
        }
    }
}

fn next_fresh_letter(letters: &[char]) -> Option<char> {
    (b'a'..=b'z').map(|b| b as char).find(|c| !letters.contains(c))
}

/// Rebuilds the tree top-down, swapping the first pre-order occurrence that
/// is structurally equal to `target` for the replacement.
fn substitute(node: &Node, target: &Node, replacement: &Node, done: &mut bool) -> Box<Node> {
    if !*done && node == target {
        *done = true;
        return Box::new(replacement.clone());
    }

    Box::new(match node {
        Node::Empty => Node::Empty,

        Node::Literal{ symbol, position } => Node::Literal{ symbol: *symbol, position: *position },

        Node::Sequence{ first, second } => {
            let first = substitute(first, target, replacement, done);
            let second = substitute(second, target, replacement, done);
            Node::Sequence{ first, second }
        },

        Node::Alternative{ first, second } => {
            let first = substitute(first, target, replacement, done);
            let second = substitute(second, target, replacement, done);
            Node::Alternative{ first, second }
        },

        Node::Star{ subnode } => Node::Star{ subnode: substitute(subnode, target, replacement, done) },
    })
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod mutation_tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;
    use rx_syntax::parse;

    #[test]
    fn substitution_replaces_the_first_preorder_match() {
        // Structural matching: with duplicate subtrees the leftmost one goes
        let tree = parse("a|a").unwrap();
        let target = parse("a").unwrap();
        let replacement = parse("b").unwrap();

        let mut done = false;
        let result = substitute(&tree, &target, &replacement, &mut done);

        assert!(done);
        assert_eq!(*result, *parse("b|a").unwrap());
    }

    #[test]
    fn substitution_reaches_nested_nodes() {
        let tree = parse("(a|b)*c").unwrap();
        let target = parse("a|b").unwrap();
        let replacement = parse("ab").unwrap();

        let mut done = false;
        let result = substitute(&tree, &target, &replacement, &mut done);

        assert!(done);
        assert_eq!(*result, *parse("(ab)*c").unwrap());
    }

    #[test]
    fn replacement_always_differs_from_the_chosen_subtree() {
        let mut rng = Mcg128Xsl64::seed_from_u64(20);
        let tree = parse("(a|b)*c").unwrap();
        for node in tree.preorder() {
            for _ in 0..10 {
                let replacement = distinct_replacement(&mut rng, &tree, node);
                assert_ne!(*replacement, *node);
                assert_eq!(replacement.depth(), node.depth());
            }
        }
    }
}
