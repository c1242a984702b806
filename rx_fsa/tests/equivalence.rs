
extern crate rx_fsa;
extern crate rx_syntax;

use rx_fsa::attrs::Attributes;
use rx_fsa::{dfa, nfa};
use rx_syntax::{parse, parse_augmented};

fn direct_dfa(rx: &str) -> dfa::Automaton<usize> {
    let attrs = Attributes::evaluate(&parse_augmented(rx).unwrap());
    dfa::Automaton::from_attributes(&attrs)
}

fn subset_dfa(rx: &str) -> dfa::Automaton<nfa::State> {
    let nf = nfa::Automaton::from_regex(&parse(rx).unwrap());
    dfa::Automaton::from_nfa(&nf)
}

fn final_count<K>(dfa: &dfa::Automaton<K>) -> usize where K : Ord {
    dfa.states().filter(|s| dfa.is_accepting(s)).count()
}

#[test]
fn both_constructions_agree_on_the_dragon_book_regex() {
    let direct = direct_dfa("((a|b*)a*c)*");
    let subset = subset_dfa("((a|b*)a*c)*");

    assert_eq!(direct.state_count(), 4);
    assert_eq!(subset.state_count(), 4);

    assert_eq!(final_count(&direct), 1);
    assert_eq!(final_count(&subset), 1);

    // Both start states accept: the whole expression is nullable
    assert!(direct.is_accepting(&direct.start()));
    assert!(subset.is_accepting(&subset.start()));
}

#[test]
fn both_constructions_accept_the_same_words() {
    // The constructions may carve up states differently (the direct one
    // keeps an explicit dead state), so compare them by running words.
    let cases = ["((a|b*)a*c)*", "a*b", "(ab|c)*", "a|b", "ab"];
    let words = ["", "a", "b", "c", "ab", "ba", "aab", "abc", "cab",
                 "aacc", "bbacbac", "abab", "cc"];

    for rx in &cases {
        let direct = direct_dfa(rx);
        let subset = subset_dfa(rx);

        for word in &words {
            assert_eq!(
                runs_to_accepting(&direct, word),
                runs_to_accepting(&subset, word),
                "constructions disagree on {:?} for {:?}", word, rx);
        }
    }
}

fn runs_to_accepting<K>(dfa: &dfa::Automaton<K>, word: &str) -> bool where K : Ord {
    let mut state = dfa.start();
    for c in word.chars() {
        match dfa.transition(state, c) {
            Some(to) => state = to,
            None => return false,
        }
    }
    dfa.is_accepting(&state)
}
