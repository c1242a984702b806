
extern crate rand;
extern crate rand_pcg;
extern crate rx_fsa;
extern crate rx_gen;
extern crate rx_syntax;

use std::io::{self, BufRead};
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use rx_fsa::attrs::Attributes;
use rx_fsa::{dfa, nfa};
use rx_gen::alternatives;
use rx_syntax::{augment, parse};

fn main() {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.unwrap();
        if line.is_empty() {
            continue;
        }

        let tree = match parse(&line) {
            Ok(tree) => tree,
            Err(err) => {
                println!("{}", err);
                continue;
            },
        };

        println!("expression: {}", tree);
        let augmented = augment(tree.clone());
        println!("augmented:  {}", augmented);

        let attrs = Attributes::evaluate(&augmented);
        println!();
        println!("followpos:");
        for position in attrs.positions() {
            let follow = attrs.followpos(position)
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {} -> {{{}}}", position, follow);
        }

        println!();
        println!("nodes (pre-order):");
        for (index, node) in attrs.nodes().iter().enumerate() {
            let firstpos = node.firstpos
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let lastpos = node.lastpos
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("  #{} {} nullable={} firstpos={{{}}} lastpos={{{}}}",
                index, node.expression, node.nullable, firstpos, lastpos);
        }

        println!();
        println!("direct construction:");
        let direct = dfa::Automaton::from_attributes(&attrs);
        print!("{}", direct);

        println!();
        println!("thompson + subset construction:");
        let nf = nfa::Automaton::from_regex(&tree);
        let subset = dfa::Automaton::from_nfa(&nf);
        print!("{}", subset);

        // Seed off the expression so re-entering a line repeats its output
        let seed = line.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut rng = Mcg128Xsl64::seed_from_u64(seed);
        println!();
        println!("alternatives:");
        for alternative in alternatives(&tree, 4, &mut rng) {
            println!("  {}", alternative);
        }

        println!();
    }
}
