//! Structural parser for the schema language.
//!
//! Built from `nom` combinators. Grammar:
//!
//! ```text
//! schema      := (definition)*
//! definition  := "definition" type_name "{" (relation | permission)* "}"
//! relation    := "relation" ident ":" subject ("|" subject)* end
//! permission  := "permission" ident "=" expression end
//! subject     := type_name ("#" ident | ":*")?
//! type_name   := ident ("/" ident)?
//! end         := ";" | newline | before "}" | end of input
//! ```
//!
//! `//` and `/* */` comments count as whitespace anywhere whitespace is
//! allowed. Permission expressions are scanned, not modeled.

use nom::{
    IResult, Offset,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char as pchar, satisfy},
    combinator::{cut, eof, map, not, opt, peek, recognize, value},
    error::{ContextError, ErrorKind, ParseError as NomParseError, context},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, terminated, tuple},
};

use crate::error::ParseError;
use crate::syntax::{
    Definition, Ident, PermissionStmt, RelationStmt, Span, Statement, SubjectRef, SyntaxTree,
};

/// Parse schema text into a [`SyntaxTree`].
///
/// Stops at the first syntax error. Duplicate alternatives within one relation
/// are also reported here.
pub fn parse(text: &str) -> Result<SyntaxTree, ParseError> {
    let result = tuple((
        ws_nl,
        many0(terminated(definition, ws_nl)),
        context("`definition`", eof),
    ))(text);

    match result {
        Ok((_, (_, definitions, _))) => {
            let tree = lower(text, definitions)?;
            tracing::debug!(definitions = tree.definitions.len(), "Parsed schema");
            Ok(tree)
        }
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(e.into_parse_error(text)),
        Err(nom::Err::Incomplete(_)) => {
            let end = locate(text, &text[text.len()..]);
            Err(ParseError {
                line: end.line,
                column: end.column,
                expected: "complete input".to_string(),
                found: "end of input".to_string(),
            })
        }
    }
}

type PResult<'a, T> = IResult<&'a str, T, SyntaxError<'a>>;

/// Error carried through the combinators.
///
/// Keeps the innermost `context` label and the position furthest into the
/// input.
#[derive(Debug)]
struct SyntaxError<'a> {
    input: &'a str,
    expected: Option<&'static str>,
}

impl<'a> SyntaxError<'a> {
    fn expected(input: &'a str, what: &'static str) -> Self {
        Self {
            input,
            expected: Some(what),
        }
    }

    fn into_parse_error(self, source: &str) -> ParseError {
        let span = locate(source, self.input);
        ParseError {
            line: span.line,
            column: span.column,
            expected: self.expected.unwrap_or("valid schema syntax").to_string(),
            found: describe(self.input),
        }
    }
}

impl<'a> NomParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        Self {
            input,
            expected: None,
        }
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        if other.input.len() < self.input.len() {
            other
        } else {
            self
        }
    }
}

impl<'a> ContextError<&'a str> for SyntaxError<'a> {
    fn add_context(_input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.expected.get_or_insert(ctx);
        other
    }
}

fn fail<'a, T>(input: &'a str, what: &'static str) -> PResult<'a, T> {
    Err(nom::Err::Error(SyntaxError::expected(input, what)))
}

// Borrowed nodes; lowered into the owned tree once parsing succeeded.

struct DefinitionNode<'a> {
    name: &'a str,
    statements: Vec<StatementNode<'a>>,
}

enum StatementNode<'a> {
    Relation {
        name: &'a str,
        subjects: Vec<SubjectNode<'a>>,
    },
    Permission {
        name: &'a str,
        expression: &'a str,
    },
}

struct SubjectNode<'a> {
    resource_type: &'a str,
    suffix: Option<Suffix<'a>>,
}

#[derive(Clone)]
enum Suffix<'a> {
    Subrelation(&'a str),
    Wildcard,
}

fn definition(input: &str) -> PResult<'_, DefinitionNode<'_>> {
    let (input, _) = keyword("definition")(input)?;
    let (input, (name, _, statements, _)) = cut(tuple((
        preceded(ws_nl, context("type name", type_name)),
        preceded(ws_nl, context("`{`", pchar('{'))),
        many0(preceded(ws_nl, alt((relation, permission)))),
        preceded(
            ws_nl,
            context("`relation`, `permission` or `}`", pchar('}')),
        ),
    )))(input)?;
    Ok((input, DefinitionNode { name, statements }))
}

fn relation(input: &str) -> PResult<'_, StatementNode<'_>> {
    let (input, _) = keyword("relation")(input)?;
    let (input, (name, _, subjects, _)) = cut(tuple((
        preceded(ws_nl, context("relation name", identifier)),
        preceded(ws_nl, context("`:`", pchar(':'))),
        preceded(
            ws_nl,
            separated_list1(tuple((ws_nl, pchar('|'), ws_nl)), cut(subject)),
        ),
        statement_end,
    )))(input)?;
    Ok((input, StatementNode::Relation { name, subjects }))
}

fn permission(input: &str) -> PResult<'_, StatementNode<'_>> {
    let (input, _) = keyword("permission")(input)?;
    let (input, (name, _, expression, _)) = cut(tuple((
        preceded(ws_nl, context("permission name", identifier)),
        preceded(ws_nl, context("`=`", pchar('='))),
        preceded(ws_nl, expression),
        statement_end,
    )))(input)?;
    Ok((input, StatementNode::Permission { name, expression }))
}

fn subject(input: &str) -> PResult<'_, SubjectNode<'_>> {
    let (input, resource_type) = context("subject type", type_name)(input)?;
    let (input, suffix) = opt(alt((
        map(
            preceded(pchar('#'), cut(context("subrelation name", identifier))),
            Suffix::Subrelation,
        ),
        value(Suffix::Wildcard, tag(":*")),
    )))(input)?;
    Ok((
        input,
        SubjectNode {
            resource_type,
            suffix,
        },
    ))
}

fn statement_end(input: &str) -> PResult<'_, ()> {
    preceded(
        ws,
        context(
            "end of statement",
            alt((
                value((), pchar(';')),
                value((), pchar('\n')),
                value((), peek(pchar('}'))),
                value((), eof),
            )),
        ),
    )(input)
}

/// Scan a permission expression up to its terminator.
///
/// Tracks parenthesis depth and whether an operand is due, which is enough to
/// find where the statement ends. A newline ends the expression only at depth
/// zero after a complete operand, so trailing operators continue the line, and
/// so does a following line that starts with an operator.
fn expression(input: &str) -> PResult<'_, &str> {
    let mut rest = input;
    let mut depth = 0usize;
    let mut needs_operand = true;
    let mut after_dot = false;
    let mut call_allowed = false;
    let mut end = 0usize;

    loop {
        let (r, _) = if depth > 0 || needs_operand {
            ws_nl(rest)?
        } else {
            continuation(rest)?
        };
        rest = r;

        match rest.chars().next() {
            None | Some('\n' | ';' | '}') => {
                if depth > 0 {
                    return fail(rest, "`)`");
                }
                if needs_operand {
                    return fail(rest, if end == 0 { "permission expression" } else { "operand" });
                }
                break;
            }
            Some('(') => {
                if !needs_operand && !call_allowed {
                    return fail(rest, "operator");
                }
                depth += 1;
                needs_operand = true;
                after_dot = false;
                call_allowed = false;
                rest = &rest[1..];
            }
            Some(')') => {
                if depth == 0 {
                    return fail(rest, "balanced parentheses");
                }
                if needs_operand {
                    return fail(rest, "operand");
                }
                depth -= 1;
                after_dot = false;
                call_allowed = false;
                rest = &rest[1..];
            }
            Some(c @ ('+' | '-' | '&' | '.' | ',')) => {
                if needs_operand {
                    return fail(rest, "operand");
                }
                let width = if rest.starts_with("->") { 2 } else { 1 };
                needs_operand = true;
                after_dot = c == '.';
                call_allowed = false;
                rest = &rest[width..];
            }
            Some(c) if c.is_ascii_lowercase() => {
                if !needs_operand {
                    return fail(rest, "operator");
                }
                let (r, _) = identifier(rest)?;
                needs_operand = false;
                call_allowed = after_dot;
                after_dot = false;
                rest = r;
            }
            Some(_) => return fail(rest, "permission expression"),
        }
        end = input.offset(rest);
    }

    Ok((rest, input[..end].trim()))
}

/// Whitespace after a complete operand, crossing a newline only when the next
/// line starts with an operator.
fn continuation(input: &str) -> PResult<'_, ()> {
    let (same_line, _) = ws(input)?;
    let (next_line, _) = ws_nl(same_line)?;
    if next_line.starts_with(['+', '-', '&']) {
        Ok((next_line, ()))
    } else {
        Ok((same_line, ()))
    }
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

fn identifier(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_lowercase()),
        take_while(is_ident_continue),
    ))(input)
}

/// `name` or `prefix/name`.
fn type_name(input: &str) -> PResult<'_, &str> {
    recognize(pair(identifier, opt(pair(pchar('/'), identifier))))(input)
}

fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    terminated(
        tag(kw),
        not(satisfy(|c: char| c.is_ascii_alphanumeric() || c == '_')),
    )
}

/// Spaces, tabs and comments on the current line.
fn ws(input: &str) -> PResult<'_, ()> {
    value(
        (),
        many0(alt((
            take_while1(|c: char| c == ' ' || c == '\t' || c == '\r'),
            line_comment,
            block_comment,
        ))),
    )(input)
}

/// Any whitespace including newlines, and comments.
fn ws_nl(input: &str) -> PResult<'_, ()> {
    value(
        (),
        many0(alt((
            take_while1(|c: char| c.is_whitespace()),
            line_comment,
            block_comment,
        ))),
    )(input)
}

fn line_comment(input: &str) -> PResult<'_, &str> {
    recognize(pair(tag("//"), take_while(|c: char| c != '\n')))(input)
}

fn block_comment(input: &str) -> PResult<'_, &str> {
    let (rest, _) = tag("/*")(input)?;
    match rest.find("*/") {
        Some(end) => Ok((&rest[end + 2..], &input[..end + 4])),
        None => Err(nom::Err::Failure(SyntaxError::expected(
            &rest[rest.len()..],
            "`*/`",
        ))),
    }
}

/// 1-based line and column of `fragment`, a suffix of `source`.
fn locate(source: &str, fragment: &str) -> Span {
    let before = &source[..source.offset(fragment)];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |last| last.chars().count())
        + 1;
    Span::new(line, column)
}

/// Human-readable description of what sits at the error position.
fn describe(rest: &str) -> String {
    match rest.chars().next() {
        None => "end of input".to_string(),
        Some('\n' | '\r') => "end of line".to_string(),
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
            let word: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect();
            format!("`{word}`")
        }
        Some(c) => format!("`{c}`"),
    }
}

fn lower(source: &str, definitions: Vec<DefinitionNode<'_>>) -> Result<SyntaxTree, ParseError> {
    let ident = |fragment: &str| Ident {
        name: fragment.to_string(),
        span: locate(source, fragment),
    };

    let mut tree = SyntaxTree::default();
    for node in definitions {
        let mut statements = Vec::with_capacity(node.statements.len());
        for statement in node.statements {
            match statement {
                StatementNode::Relation { name, subjects } => {
                    let mut lowered: Vec<SubjectRef> = Vec::with_capacity(subjects.len());
                    for subject in subjects {
                        let subject_ref = SubjectRef {
                            resource_type: ident(subject.resource_type),
                            subrelation: match &subject.suffix {
                                Some(Suffix::Subrelation(sub)) => Some(ident(*sub)),
                                _ => None,
                            },
                            wildcard: matches!(subject.suffix, Some(Suffix::Wildcard)),
                        };
                        if lowered.iter().any(|seen| seen.same_subject(&subject_ref)) {
                            let span = subject_ref.resource_type.span;
                            return Err(ParseError {
                                line: span.line,
                                column: span.column,
                                expected: "distinct subject types".to_string(),
                                found: format!("duplicate `{subject_ref}`"),
                            });
                        }
                        lowered.push(subject_ref);
                    }
                    statements.push(Statement::Relation(RelationStmt {
                        name: ident(name),
                        subjects: lowered,
                    }));
                }
                StatementNode::Permission { name, expression } => {
                    statements.push(Statement::Permission(PermissionStmt {
                        name: ident(name),
                        expression: expression.to_string(),
                    }));
                }
            }
        }
        tree.definitions.push(Definition {
            name: ident(node.name),
            statements,
        });
    }
    Ok(tree)
}
