use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{alpha1, char, line_ending, multispace0, multispace1, not_line_ending};
use nom::combinator::{opt, peek, value};
use nom::error::ParseError;
use nom::multi::{many0, many0_count};
use nom::sequence::{delimited, tuple};
use nom::IResult;

use crate::error::ModelError;

#[derive(Debug)]
pub struct RawProcess {
    pub nodes: Vec<RawNode>,
    pub transitions: Vec<RawTransition>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RawNode {
    pub id: String,
    pub kind: String,
    pub parent: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RawTransition {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Parses a whole definition, turning leftover input into a syntax error
/// with the line it starts on.
pub fn parse_process(input: &str) -> Result<RawProcess, ModelError> {
    match parse(input) {
        Ok((rest, raw)) if rest.is_empty() => Ok(raw),
        Ok((rest, _)) => Err(syntax_error(input, rest)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(syntax_error(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(ModelError::Syntax {
            line: input.lines().count(),
            message: "unexpected end of input".to_string(),
        }),
    }
}

pub fn parse(input: &str) -> IResult<&str, RawProcess> {
    let (input, _) = skip(input)?;
    let (input, nodes) = nodes(input)?;
    let (input, _) = skip(input)?;
    let (input, transitions) = transitions(input)?;
    let (input, _) = skip(input)?;

    Ok((input, RawProcess { nodes, transitions }))
}

/// Parse the node section
/// nodes { <node>: <kind>(<parent>) \n ... }
fn nodes(input: &str) -> IResult<&str, Vec<RawNode>> {
    let (input, (_, _, nodes, _, _)) = tuple((
        tag("nodes"),
        ws(char('{')),
        many0(node_line),
        skip,
        char('}'),
    ))(input)?;

    Ok((input, nodes))
}

/// Parse the transition section
/// transitions { <transition>: <source> -> <target> \n ... }
fn transitions(input: &str) -> IResult<&str, Vec<RawTransition>> {
    let (input, (_, _, transitions, _, _)) = tuple((
        tag("transitions"),
        ws(char('{')),
        many0(transition_line),
        skip,
        char('}'),
    ))(input)?;

    Ok((input, transitions))
}

/// Parse a node: id, kind keyword and optional owning node
/// <node>: <kind>
/// <node>: <kind>(<parent>)
fn node_line<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, RawNode, E> {
    let parent = delimited(ws(char('(')), name, ws(char(')')));

    let (input, (_, id, _, kind, parent)) =
        tuple((skip, name, char(':'), name, opt(parent)))(input)?;

    let raw_node = RawNode {
        id: id.to_string(),
        kind: kind.to_string(),
        parent: parent.map(|p: &str| p.to_string()),
    };
    Ok((input, raw_node))
}

/// Parse a transition with its source and target node
/// <transition>: <source> -> <target>
fn transition_line<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, RawTransition, E> {
    let arrow = ws(tag("->"));

    let (input, (_, id, _, source, _, target)) =
        tuple((skip, name, char(':'), name, arrow, name))(input)?;

    let raw_transition = RawTransition {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
    };
    Ok((input, raw_transition))
}

/// Parse a name
/// with isalphanumerical or underscore
fn name<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, &'a str, E> {
    let (i, (_, _, name, _)) = tuple((
        multispace0,
        peek(alpha1),
        take_while(|i: char| i.is_alphanumeric() || i == '_'),
        multispace0,
    ))(i)?;
    Ok((i, name))
}

/// Parse a comment
/// #This is a comment until a linebreak
fn comment<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, (), E> {
    value((), tuple((char('#'), not_line_ending, opt(line_ending))))(i)
}

/// Skip whitespace and comments
fn skip<'a, E: ParseError<&'a str>>(i: &'a str) -> IResult<&'a str, (), E> {
    value((), many0_count(alt((value((), multispace1), comment))))(i)
}

/// Trim, ignore whitespaces before and after
fn ws<'a, F, O, E: ParseError<&'a str>>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: Fn(&'a str) -> IResult<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

fn syntax_error(input: &str, rest: &str) -> ModelError {
    let consumed = &input[..input.len() - rest.len()];
    let near = rest.lines().next().unwrap_or("").trim();
    ModelError::Syntax {
        line: consumed.matches('\n').count() + 1,
        message: if near.is_empty() {
            "unexpected end of input".to_string()
        } else {
            format!("unexpected input `{}`", near)
        },
    }
}
