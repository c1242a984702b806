
extern crate rand;
extern crate rx_syntax;

mod grow;
mod mutate;

pub use grow::generate_tree;
pub use mutate::{alternatives, mutate};
