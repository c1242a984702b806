/**
 * Bottom-up evaluation of the classical syntax-tree attributes (nullable,
 * firstpos, lastpos, followpos) that drive the position-based DFA
 * construction.
 */

use std::collections::{BTreeMap, BTreeSet};
use rx_syntax::{Node, END_MARKER};

/// The attributes of a single tree node, kept in depth-first pre-order so
/// renderers can label nodes by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAttributes {
    /// Printed form of the subtree rooted here.
    pub expression: String,
    pub nullable: bool,
    pub firstpos: BTreeSet<usize>,
    pub lastpos: BTreeSet<usize>,
}

/// The result of evaluating a whole tree, computed once and cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    nullable: bool,
    firstpos: BTreeSet<usize>,
    lastpos: BTreeSet<usize>,
    followpos: BTreeMap<usize, BTreeSet<usize>>,
    symbol_positions: BTreeMap<char, BTreeSet<usize>>,
    nodes: Vec<NodeAttributes>,
}

impl Attributes {
    /// Evaluates every attribute of the given tree in one bottom-up pass.
    pub fn evaluate(root: &Node) -> Self {
        let mut attrs = Self{
            nullable: false,
            firstpos: BTreeSet::new(),
            lastpos: BTreeSet::new(),
            followpos: BTreeMap::new(),
            symbol_positions: BTreeMap::new(),
            nodes: Vec::new(),
        };
        let (nullable, firstpos, lastpos) = attrs.eval_node(root);
        attrs.nullable = nullable;
        attrs.firstpos = firstpos;
        attrs.lastpos = lastpos;
        attrs
    }

    fn eval_node(&mut self, node: &Node) -> (bool, BTreeSet<usize>, BTreeSet<usize>) {
        // Reserve this node's pre-order slot before descending
        let index = self.nodes.len();
        self.nodes.push(NodeAttributes{
            expression: node.to_string(),
            nullable: false,
            firstpos: BTreeSet::new(),
            lastpos: BTreeSet::new(),
        });

        let (nullable, firstpos, lastpos) = match node {
            Node::Empty => (true, BTreeSet::new(), BTreeSet::new()),

            Node::Literal{ symbol, position } => {
                assert!(*position > 0, "literal '{}' has no assigned position", symbol);
                self.symbol_positions
                    .entry(*symbol)
                    .or_insert_with(BTreeSet::new)
                    .insert(*position);
                // Every position owns a followpos entry, even if it stays empty
                self.followpos.entry(*position).or_insert_with(BTreeSet::new);
                let mut here = BTreeSet::new();
                here.insert(*position);
                (false, here.clone(), here)
            },

            Node::Star{ subnode } => {
                let (_, firstpos, lastpos) = self.eval_node(subnode);
                // The closure feeds back into itself
                for p in &lastpos {
                    self.followpos.get_mut(p).unwrap().extend(firstpos.iter().cloned());
                }
                (true, firstpos, lastpos)
            },

            Node::Sequence{ first, second } => {
                let (n1, f1, l1) = self.eval_node(first);
                let (n2, f2, l2) = self.eval_node(second);
                for p in &l1 {
                    self.followpos.get_mut(p).unwrap().extend(f2.iter().cloned());
                }
                let firstpos = if n1 { f1.union(&f2).cloned().collect() } else { f1 };
                let lastpos = if n2 { l1.union(&l2).cloned().collect() } else { l2 };
                (n1 && n2, firstpos, lastpos)
            },

            Node::Alternative{ first, second } => {
                let (n1, f1, l1) = self.eval_node(first);
                let (n2, f2, l2) = self.eval_node(second);
                (n1 || n2,
                 f1.union(&f2).cloned().collect(),
                 l1.union(&l2).cloned().collect())
            },
        };

        self.nodes[index].nullable = nullable;
        self.nodes[index].firstpos = firstpos.clone();
        self.nodes[index].lastpos = lastpos.clone();
        (nullable, firstpos, lastpos)
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn firstpos(&self) -> &BTreeSet<usize> {
        &self.firstpos
    }

    pub fn lastpos(&self) -> &BTreeSet<usize> {
        &self.lastpos
    }

    /// The followpos set of a position. Every position of the tree has an
    /// entry here.
    pub fn followpos(&self, position: usize) -> &BTreeSet<usize> {
        self.followpos
            .get(&position)
            .expect("position does not belong to this tree")
    }

    pub fn followpos_table(&self) -> &BTreeMap<usize, BTreeSet<usize>> {
        &self.followpos
    }

    pub fn symbol_positions(&self) -> &BTreeMap<char, BTreeSet<usize>> {
        &self.symbol_positions
    }

    /// Every position of the tree, in increasing order.
    pub fn positions(&self) -> BTreeSet<usize> {
        self.followpos.keys().cloned().collect()
    }

    /// The input alphabet: every literal symbol except the end marker.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.symbol_positions
            .keys()
            .cloned()
            .filter(|c| *c != END_MARKER)
            .collect()
    }

    /// The position of the end marker. The tree must have been augmented.
    pub fn end_marker_position(&self) -> usize {
        let positions = self.symbol_positions
            .get(&END_MARKER)
            .expect("expression is not end-marker augmented");
        assert!(positions.len() == 1, "more than one end marker in the tree");
        *positions.iter().next().unwrap()
    }

    /// Per-node attributes in depth-first pre-order.
    pub fn nodes(&self) -> &[NodeAttributes] {
        &self.nodes
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
