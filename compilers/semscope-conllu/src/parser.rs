use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, digit1, space0},
    combinator::{all_consuming, map, map_res, opt, rest, value},
    multi::separated_list1,
    sequence::{pair, preceded, separated_pair, tuple},
    IResult,
};

/// First column of a CoNLL-U row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowId {
    /// Syntactic word, 1-based
    Word(u32),
    /// Multiword token range ("1-2"), carries no syntax
    Range(u32, u32),
    /// Empty node ("3.1"), only referenced from enhanced dependencies
    Empty(u32, u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment<'a> {
    Text(&'a str),
    NewDoc(Option<&'a str>),
    Other(&'a str),
}

/// One `head:label` entry of the DEPS column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdge<'a> {
    pub head: u32,
    /// Head is an empty node ("3.1:nsubj")
    pub to_empty_node: bool,
    pub label: &'a str,
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

pub fn row_id(input: &str) -> IResult<&str, RowId> {
    all_consuming(alt((
        map(separated_pair(number, char('-'), number), |(a, b)| RowId::Range(a, b)),
        map(separated_pair(number, char('.'), number), |(a, b)| RowId::Empty(a, b)),
        map(number, RowId::Word),
    )))(input)
}

/// HEAD column: a number, or "_" when the row is unparsed.
pub fn head(input: &str) -> IResult<&str, Option<u32>> {
    all_consuming(alt((value(None, char('_')), map(number, Some))))(input)
}

fn key_value<'a>(key: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(tuple((tag(key), space0, char('='), space0)), rest)
}

pub fn comment(input: &str) -> IResult<&str, Comment<'_>> {
    preceded(
        pair(char('#'), space0),
        alt((
            map(key_value("text"), |t: &str| Comment::Text(t.trim_end())),
            map(
                preceded(tag("newdoc"), opt(preceded(space0, key_value("id")))),
                |id: Option<&str>| Comment::NewDoc(id.map(str::trim)),
            ),
            map(rest, Comment::Other),
        )),
    )(input)
}

fn enhanced_edge(input: &str) -> IResult<&str, RawEdge<'_>> {
    map(
        tuple((
            number,
            opt(preceded(char('.'), number)),
            char(':'),
            take_till1(|c: char| c == '|'),
        )),
        |(head, sub, _, label)| RawEdge {
            head,
            to_empty_node: sub.is_some(),
            label,
        },
    )(input)
}

/// DEPS column: "_" or "head:label|head:label".
pub fn deps(input: &str) -> IResult<&str, Vec<RawEdge<'_>>> {
    all_consuming(alt((
        value(Vec::new(), char('_')),
        separated_list1(char('|'), enhanced_edge),
    )))(input)
}

/// MISC column check for "SpaceAfter=No".
pub fn space_after(misc: &str) -> bool {
    !misc.split('|').any(|kv| kv == "SpaceAfter=No")
}
