/**
 * Nondeterministic finite automaton built from a regex tree with Thompson's
 * construction. States carry at most one destination per symbol plus a set
 * of epsilon destinations; the whole automaton has a single accepting state,
 * the exit of the outermost fragment.
 */

use std::collections::{BTreeMap, BTreeSet};
use rx_syntax::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(usize);

impl State {
    pub fn id(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    state_counter: usize,
    start: State,
    accepting: State,
    transitions: BTreeMap<State, BTreeMap<char, State>>,
    epsilon: BTreeMap<State, BTreeSet<State>>,
}

impl Automaton {
    /// Builds the automaton of an (unaugmented) regex tree. The entry of the
    /// outermost fragment becomes the start state, its exit the single
    /// accepting state.
    pub fn from_regex(rx: &Node) -> Self {
        let mut nfa = Self{
            state_counter: 0,
            start: State(0),
            accepting: State(0),
            transitions: BTreeMap::new(),
            epsilon: BTreeMap::new(),
        };
        let (entry, exit) = construct(&mut nfa, rx);
        nfa.start = entry;
        nfa.accepting = exit;
        nfa
    }

    fn unique_state(&mut self) -> State {
        self.state_counter += 1;
        State(self.state_counter)
    }

    fn add_transition(&mut self, from: State, on: char, to: State) {
        let from_map = self.transitions.entry(from).or_insert_with(BTreeMap::new);
        let previous = from_map.insert(on, to);
        // Thompson fragments only put symbol edges on fresh states
        assert!(previous.is_none(), "two destinations for one symbol");
    }

    fn add_epsilon_transition(&mut self, from: State, to: State) {
        let from_map = self.epsilon.entry(from).or_insert_with(BTreeSet::new);
        from_map.insert(to);
    }

    /// The states reachable from `state` through epsilon edges only,
    /// including the state itself.
    pub fn epsilon_closure(&self, state: State) -> BTreeSet<State> {
        let mut result = BTreeSet::new();
        let mut touched = BTreeSet::new();

        let mut stk = vec![state];
        while let Some(top) = stk.pop() {
            result.insert(top);

            if let Some(states) = self.epsilon.get(&top) {
                for s in states {
                    if !touched.contains(s) {
                        touched.insert(*s);
                        stk.push(*s);
                    }
                }
            }
        }

        result
    }

    pub fn start(&self) -> State {
        self.start
    }

    pub fn is_accepting(&self, state: &State) -> bool {
        *state == self.accepting
    }

    pub fn transition(&self, from: State, on: char) -> Option<State> {
        self.transitions.get(&from).and_then(|m| m.get(&on)).cloned()
    }

    pub fn epsilon_from(&self, from: &State) -> Option<&BTreeSet<State>> {
        self.epsilon.get(from)
    }

    pub fn states(&self) -> impl Iterator<Item = State> {
        (1..=self.state_counter).map(State)
    }

    pub fn state_count(&self) -> usize {
        self.state_counter
    }

    /// Every symbol appearing on an edge of the automaton.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.transitions
            .values()
            .flat_map(|m| m.keys().cloned())
            .collect()
    }
}

impl From<&Node> for Automaton {
    fn from(rx: &Node) -> Self {
        Self::from_regex(rx)
    }
}

/**
 * Thompson's construction. Every case returns the (entry, exit) state pair
 * of the built fragment; the state counter threads through the automaton.
 */

fn construct(nfa: &mut Automaton, rx: &Node) -> (State, State) {
    match rx {
        Node::Empty => construct_empty(nfa),

        Node::Literal{ symbol, .. } => construct_literal(nfa, *symbol),

        Node::Sequence{ first, second } => construct_sequence(nfa, first, second),

        Node::Alternative{ first, second } => construct_alternative(nfa, first, second),

        Node::Star{ subnode } => construct_star(nfa, subnode),
    }
}

fn construct_literal(nfa: &mut Automaton, symbol: char) -> (State, State) {
    let entry = nfa.unique_state();
    let exit = nfa.unique_state();

    nfa.add_transition(entry, symbol, exit);

    (entry, exit)
}

fn construct_empty(nfa: &mut Automaton) -> (State, State) {
    let entry = nfa.unique_state();
    let exit = nfa.unique_state();

    nfa.add_epsilon_transition(entry, exit);

    (entry, exit)
}

fn construct_sequence(nfa: &mut Automaton, left: &Node, right: &Node) -> (State, State) {
    let (l_entry, l_exit) = construct(nfa, left);
    let (r_entry, r_exit) = construct(nfa, right);

    nfa.add_epsilon_transition(l_exit, r_entry);

    (l_entry, r_exit)
}

fn construct_alternative(nfa: &mut Automaton, left: &Node, right: &Node) -> (State, State) {
    let entry = nfa.unique_state();
    let exit = nfa.unique_state();

    let (l_entry, l_exit) = construct(nfa, left);
    let (r_entry, r_exit) = construct(nfa, right);

    nfa.add_epsilon_transition(entry, l_entry);
    nfa.add_epsilon_transition(entry, r_entry);

    nfa.add_epsilon_transition(l_exit, exit);
    nfa.add_epsilon_transition(r_exit, exit);

    (entry, exit)
}

fn construct_star(nfa: &mut Automaton, subnode: &Node) -> (State, State) {
    // The closure reuses the child's entry and exit: a skip edge accepts the
    // empty word, a loop edge repeats the child. Keeping the fragment free
    // of extra states makes the subset construction land on the same state
    // sets as the position construction.
    let (entry, exit) = construct(nfa, subnode);

    nfa.add_epsilon_transition(entry, exit);
    nfa.add_epsilon_transition(exit, entry);

    (entry, exit)
}

// Tests ///////////////////////////////////////////////////////////////////////
