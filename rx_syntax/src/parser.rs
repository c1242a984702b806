/**
 * A simple parser to parse a string into a regex AST.
 */

use std::fmt;
use crate::ast::{self, Node, EMPTY_SYMBOL, END_MARKER, SEQUENCE_MARKER};

/*
 * Reference grammar for the parser:
 *
 * alternative ::=
 *               | sequence '|' alternative
 *               | sequence
 *               ;
 *
 * sequence    ::=
 *               | quantified '.' sequence
 *               | quantified sequence
 *               | quantified
 *               ;
 *
 * quantified  ::=
 *               | atom '*'*
 *               ;
 *
 * atom        ::=
 *               | '(' alternative ')'
 *               | EPSILON
 *               | ANY_NONSPECIAL_CHAR
 *               ;
 *
 * Concatenation is written by juxtaposition, the explicit operator ('.' or
 * the printed '·') is optional. Stacked stars collapse into a single Star
 * node. The whole input must be consumed.
 */

/// The one error the parser surfaces. Both lexical failures (unrecognized
/// characters) and structural ones (tokens not matching the grammar) map
/// here; callers never need to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidExpression;

impl fmt::Display for InvalidExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid regular expression")
    }
}

impl std::error::Error for InvalidExpression { }

/// A small helper to ease the Chars interface a bit
#[derive(Clone)]
struct Chars<'a>(std::str::Chars<'a>);

impl <'a> Chars<'a> {
    fn next(&self) -> Option<(char, Chars<'a>)> {
        let mut clone = self.clone();
        match clone.0.next() {
            Some(c) => Some((c, clone)),
            None => None,
        }
    }
}

/**
 * Actual parsing.
 */

/// Parses an expression into a tree with literal positions assigned
/// left-to-right from 1. The end marker is not appended here, see
/// `parse_augmented`.
pub fn parse(source: &str) -> Result<Box<Node>, InvalidExpression> {
    let (node, it) = parse_alternative(Chars(source.chars()))?;
    if it.next().is_some() {
        // Trailing input the grammar could not consume
        return Err(InvalidExpression);
    }
    Ok(ast::renumber(node))
}

/// Parses and augments: the result is the expression concatenated with the
/// end marker, positions covering 1..n with the marker last.
pub fn parse_augmented(source: &str) -> Result<Box<Node>, InvalidExpression> {
    Ok(ast::augment(parse(source)?))
}

type ParseResult<'a, T> = Result<(T, Chars<'a>), InvalidExpression>;

fn parse_alternative(it: Chars<'_>) -> ParseResult<'_, Box<Node>> {
    let (first, it) = parse_sequence(it)?;
    if let Some(('|', it)) = it.next() {
        let (second, it) = parse_alternative(it)?;
        Ok((Box::new(Node::Alternative{ first, second }), it))
    }
    else {
        Ok((first, it))
    }
}

fn parse_sequence(it: Chars<'_>) -> ParseResult<'_, Box<Node>> {
    let (first, it) = parse_quantified(it)?;
    // An explicit operator commits to a second operand
    if let Some((c, after)) = it.next() {
        if c == '.' || c == SEQUENCE_MARKER {
            let (second, after) = parse_sequence(after)?;
            return Ok((Box::new(Node::Sequence{ first, second }), after));
        }
    }
    if let Ok((second, it)) = parse_sequence(it.clone()) {
        Ok((Box::new(Node::Sequence{ first, second }), it))
    }
    else {
        Ok((first, it))
    }
}

fn parse_quantified(it: Chars<'_>) -> ParseResult<'_, Box<Node>> {
    let (subnode, mut it) = parse_atom(it)?;
    let mut starred = false;
    while let Some(('*', next)) = it.next() {
        starred = true;
        it = next;
    }
    if starred {
        Ok((Box::new(Node::Star{ subnode }), it))
    }
    else {
        Ok((subnode, it))
    }
}

fn parse_atom(it: Chars<'_>) -> ParseResult<'_, Box<Node>> {
    match it.next() {
        Some(('(', it)) => {
            let (node, it) = parse_alternative(it)?;
            if let Some((')', it)) = it.next() {
                Ok((node, it))
            }
            else {
                Err(InvalidExpression)
            }
        },

        Some((c, it)) => {
            if c == EMPTY_SYMBOL {
                Ok((Box::new(Node::Empty), it))
            }
            else if is_symbol_char(c) {
                Ok((Box::new(Node::Literal{ symbol: c, position: 0 }), it))
            }
            else {
                Err(InvalidExpression)
            }
        },

        None => Err(InvalidExpression),
    }
}

fn is_symbol_char(c: char) -> bool {
    !c.is_control() && !is_meta_char(c)
}

fn is_meta_char(c: char) -> bool {
    // The end marker is reserved for augmentation
    c == END_MARKER || c == EMPTY_SYMBOL || c == SEQUENCE_MARKER || "()|*.".contains(c)
}

// Tests ///////////////////////////////////////////////////////////////////////
