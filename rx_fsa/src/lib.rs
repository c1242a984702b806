
extern crate rx_syntax;

pub mod attrs;
pub mod nfa;
pub mod dfa;

#[test]
fn foo() {
    let rx = r"((a|b*)a*c)*";

    let augmented = rx_syntax::parse_augmented(rx).unwrap();
    let attrs = attrs::Attributes::evaluate(&augmented);
    let direct = dfa::Automaton::from_attributes(&attrs);
    println!("direct:\n{}", direct);

    let ast = rx_syntax::parse(rx).unwrap();
    let nf = nfa::Automaton::from_regex(&ast);
    let subset = dfa::Automaton::from_nfa(&nf);
    println!("subset:\n{}", subset);
}
