//! Command line parser.
//!
//! Comments, builtins and the split between variable and the rest of the line
//! are recognised by hand. Method calls and their argument literals are parsed
//! with chumsky.

use chumsky::error::{RichPattern, RichReason};
use chumsky::prelude::*;

use crate::ast::{Command, Constructor, Literal, MethodCall};
use crate::error::{ParseError, ParseErrorKind};

type ParserInput<'a> = &'a str;
type ParserExtra<'a> = extra::Err<Rich<'a, char>>;

/// Raw argument text and its byte offset.
type RawArgument<'a> = (&'a str, usize);

/// Method name (if any), offset of `(`, and raw arguments.
type RawCall<'a> = ((Option<&'a str>, usize), Vec<RawArgument<'a>>);

/// Parse one line of input into a command.
///
/// # Errors
///
/// Returns a `ParseError` if the line matches none of the command forms, or if
/// a method call's argument list is malformed.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let trimmed = line.trim();
    let start = leading_whitespace(line);

    if trimmed.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, 0));
    }
    if trimmed.starts_with('#') {
        return Ok(Command::Comment);
    }
    match trimmed {
        "help" => return Ok(Command::Help),
        "exit" => return Ok(Command::Exit),
        _ => {}
    }

    // The variable comes first, so the first `=` or `.` ends it; any later
    // one belongs to the value or the arguments.
    match line.find(['=', '.']) {
        Some(at) if line[at..].starts_with('=') => parse_assignment(line, at),
        Some(at) => parse_call(line, at),
        None => Err(ParseError::new(
            ParseErrorKind::Unrecognized(trimmed.to_string()),
            start,
        )),
    }
}

/// Whether `name` can be bound as a session variable.
///
/// Variable names use ASCII letters, digits and underscores, and may not be
/// purely numeric.
pub fn is_variable_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.chars().all(|c| c.is_ascii_digit())
}

fn is_method_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Validate the text before `=` or `.` as a variable name.
fn variable(text: &str) -> Result<String, ParseError> {
    let name = text.trim();
    if is_variable_name(name) {
        Ok(name.to_string())
    } else {
        Err(ParseError::new(
            ParseErrorKind::InvalidVariableName(name.to_string()),
            leading_whitespace(text),
        ))
    }
}

fn parse_assignment(line: &str, eq: usize) -> Result<Command, ParseError> {
    let var = variable(&line[..eq])?;
    let expr: String = line[eq + 1..]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if expr == Constructor::SalesDb.as_str() {
        Ok(Command::Assign {
            var,
            value: Constructor::SalesDb,
        })
    } else {
        Err(ParseError::new(
            ParseErrorKind::UnsupportedExpression(expr),
            eq + 1,
        ))
    }
}

fn parse_call(line: &str, dot: usize) -> Result<Command, ParseError> {
    let var = variable(&line[..dot])?;
    let offset = dot + 1;

    let (output, errs) = call().parse(&line[offset..]).into_output_errors();
    let ((name, open), raw) = match (output, errs.first()) {
        (Some(call), None) => call,
        (_, Some(err)) => return Err(call_error(err, offset)),
        (None, None) => {
            return Err(ParseError::new(
                ParseErrorKind::Unrecognized(line.trim().to_string()),
                offset,
            ))
        }
    };

    let Some(name) = name else {
        return Err(ParseError::new(
            ParseErrorKind::MissingMethodName,
            offset + open,
        ));
    };
    if !is_method_name(name) {
        return Err(ParseError::new(
            ParseErrorKind::InvalidMethodName(name.to_string()),
            offset + leading_whitespace(&line[offset..]),
        ));
    }
    let args = raw
        .iter()
        .map(|(token, at)| parse_literal(token, offset + at))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Command::Call {
        var,
        call: MethodCall {
            name: name.to_string(),
            args,
        },
    })
}

/// Translate a failed call parse into a positioned error.
///
/// The only custom error the call grammar emits is for an unclosed quote. At
/// the end of input the error depends on whether `(` was still expected.
fn call_error(err: &Rich<'_, char>, offset: usize) -> ParseError {
    let expects = |pattern: fn(&RichPattern<'_, char>) -> bool| err.expected().any(pattern);
    let kind = match (err.reason(), err.found()) {
        (RichReason::Custom(_), _) => ParseErrorKind::UnterminatedString,
        (_, None) if expects(|p| matches!(p, RichPattern::Token(c) if **c == '(')) => {
            ParseErrorKind::MissingParenthesis
        }
        (_, None) => ParseErrorKind::UnclosedParenthesis,
        (_, Some(_)) if expects(|p| matches!(p, RichPattern::EndOfInput)) => {
            ParseErrorKind::TrailingInput
        }
        (_, Some(c)) => ParseErrorKind::UnexpectedChar(*c),
    };
    ParseError::new(kind, offset + err.span().start)
}

/// Parse `name(arg, ...)`.
///
/// Arguments are kept as raw text here and checked as literals afterwards.
/// Empty arguments between commas are dropped.
fn call<'a>() -> impl Parser<'a, ParserInput<'a>, RawCall<'a>, ParserExtra<'a>> {
    let name = any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice();
    let commas = just(',').padded().repeated();
    let separator = just(',').padded().repeated().at_least(1);
    let arguments = commas
        .clone()
        .ignore_then(raw_argument().separated_by(separator).collect::<Vec<_>>())
        .then_ignore(commas)
        .padded();

    name.or_not()
        .padded()
        .then(just::<_, ParserInput<'a>, ParserExtra<'a>>('(').map_with(|_, e| e.span().start))
        .then(arguments)
        .then_ignore(just(')'))
        .padded()
}

/// One argument: quoted strings and bare characters up to a delimiter.
fn raw_argument<'a>() -> impl Parser<'a, ParserInput<'a>, RawArgument<'a>, ParserExtra<'a>> + Clone
{
    let bare = any()
        .filter(|c: &char| !c.is_whitespace() && !"(),'\"".contains(*c))
        .ignored();
    choice((quoted('"'), quoted('\''), bare))
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|text, e| (text, e.span().start))
}

/// A quoted run inside a raw argument. A missing closing quote is reported but
/// does not stop the parse.
fn quoted<'a>(quote: char) -> impl Parser<'a, ParserInput<'a>, (), ParserExtra<'a>> + Clone {
    just(quote)
        .ignore_then(string_body(quote))
        .then(just(quote).or_not())
        .validate(|(_, closing), e, emitter| {
            if closing.is_none() {
                emitter.emit(Rich::custom(e.span(), "unterminated string literal"));
            }
        })
}

/// Parse one argument token as a literal.
fn parse_literal(token: &str, position: usize) -> Result<Literal, ParseError> {
    let (result, errs) = literal()
        .then_ignore(end())
        .parse(token)
        .into_output_errors();

    result.ok_or_else(|| {
        let first = errs.first();
        let reason = first.map_or_else(
            || "expected a string, integer or float".to_string(),
            ToString::to_string,
        );
        let at = first.map_or(0, |e| e.span().start);
        ParseError::new(
            ParseErrorKind::InvalidLiteral {
                token: token.to_string(),
                reason,
            },
            position + at,
        )
    })
}

/// Parse a string, integer or float literal.
fn literal<'a>() -> impl Parser<'a, ParserInput<'a>, Literal, ParserExtra<'a>> + Clone {
    choice((
        string_literal('"').map(Literal::String),
        string_literal('\'').map(Literal::String),
        number(),
    ))
}

/// Parse a string literal delimited by `quote`, with backslash escapes.
fn string_literal<'a>(
    quote: char,
) -> impl Parser<'a, ParserInput<'a>, String, ParserExtra<'a>> + Clone {
    just(quote)
        .ignore_then(string_body(quote))
        .then_ignore(just(quote))
}

/// Characters between `quote`s: anything but the quote, or an escaped character.
fn string_body<'a>(
    quote: char,
) -> impl Parser<'a, ParserInput<'a>, String, ParserExtra<'a>> + Clone {
    any()
        .filter(move |c: &char| *c != quote && *c != '\\')
        .or(just('\\').ignore_then(any()))
        .repeated()
        .collect::<String>()
}

/// Parse digits.
fn digits<'a>() -> impl Parser<'a, ParserInput<'a>, &'a str, ParserExtra<'a>> + Clone {
    one_of("0123456789").repeated().at_least(1).to_slice()
}

/// Parse an integer or, when it has a fractional part, a float.
fn number<'a>() -> impl Parser<'a, ParserInput<'a>, Literal, ParserExtra<'a>> + Clone {
    one_of("+-")
        .or_not()
        .then(digits())
        .then(just('.').then(digits()).or_not())
        .to_slice()
        .try_map(|text: &str, span| {
            if text.contains('.') {
                text.parse::<f64>()
                    .map(Literal::Float)
                    .map_err(|_| Rich::custom(span, "invalid float"))
            } else {
                text.parse::<i64>()
                    .map(Literal::Integer)
                    .map_err(|_| Rich::custom(span, "integer out of range"))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(line: &str) -> MethodCall {
        match parse(line).unwrap() {
            Command::Call { call, .. } => call,
            other => panic!("Expected method call, got {other:?}"),
        }
    }

    fn error_kind(line: &str) -> ParseErrorKind {
        parse(line).unwrap_err().kind
    }

    #[test]
    fn test_comment() {
        assert_eq!(parse("# a comment").unwrap(), Command::Comment);
        assert_eq!(parse("   #x.remove(1)").unwrap(), Command::Comment);
    }

    #[test]
    fn test_builtins() {
        assert_eq!(parse("help").unwrap(), Command::Help);
        assert_eq!(parse("  exit  ").unwrap(), Command::Exit);
    }

    #[test]
    fn test_empty() {
        assert_eq!(error_kind(""), ParseErrorKind::Empty);
        assert_eq!(error_kind("   \t"), ParseErrorKind::Empty);
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            parse("x = SalesDB()").unwrap(),
            Command::Assign {
                var: "x".to_string(),
                value: Constructor::SalesDb
            }
        );
        assert_eq!(
            parse("  sales_2023=SalesDB ( )").unwrap(),
            Command::Assign {
                var: "sales_2023".to_string(),
                value: Constructor::SalesDb
            }
        );
    }

    #[test]
    fn test_assignment_rejects_expressions() {
        assert_eq!(
            error_kind("x = __import__('os').system('ls')"),
            ParseErrorKind::UnsupportedExpression("__import__('os').system('ls')".to_string())
        );
        assert_eq!(
            error_kind("x = 1 + 2"),
            ParseErrorKind::UnsupportedExpression("1+2".to_string())
        );
        assert_eq!(
            error_kind("x = SalesDB() = y"),
            ParseErrorKind::UnsupportedExpression("SalesDB()=y".to_string())
        );
    }

    #[test]
    fn test_invalid_variable_names() {
        for line in ["123 = SalesDB()", "a-b = SalesDB()", " = SalesDB()", "x y.view()"] {
            assert!(
                matches!(error_kind(line), ParseErrorKind::InvalidVariableName(_)),
                "{line:?} should be rejected"
            );
        }
        assert!(parse("_1 = SalesDB()").is_ok());
        assert!(parse("1x = SalesDB()").is_ok());
    }

    #[test]
    fn test_method_without_args() {
        let parsed = parse("x.view()").unwrap();
        assert_eq!(
            parsed,
            Command::Call {
                var: "x".to_string(),
                call: MethodCall {
                    name: "view".to_string(),
                    args: vec![]
                }
            }
        );
        assert_eq!(call("x . to_usd ( ) ").name, "to_usd");
    }

    #[test]
    fn test_integer_args() {
        assert_eq!(
            call("x.remove(4, 5, 9)").args,
            vec![Literal::Integer(4), Literal::Integer(5), Literal::Integer(9)]
        );
        assert_eq!(call("x.remove(1,,2,)").args.len(), 2);
        assert_eq!(call("x.remove(-3)").args, vec![Literal::Integer(-3)]);
    }

    #[test]
    fn test_mixed_args_keep_quoted_whitespace() {
        let args = call(
            "x._unsafe_insert('orange', 4.0, 88, 111111111, 'Amanda', '06/05/1933', 'Fresh, ripe')",
        )
        .args;
        assert_eq!(
            args,
            vec![
                Literal::String("orange".to_string()),
                Literal::Float(4.0),
                Literal::Integer(88),
                Literal::Integer(111_111_111),
                Literal::String("Amanda".to_string()),
                Literal::String("06/05/1933".to_string()),
                Literal::String("Fresh, ripe".to_string()),
            ]
        );
        assert_eq!(
            call(r#"x.save("my file (1).csv")"#).args,
            vec![Literal::String("my file (1).csv".to_string())]
        );
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            call(r"x.save('it\'s.csv')").args,
            vec![Literal::String("it's.csv".to_string())]
        );
    }

    #[test]
    fn test_quoted_equals_is_not_assignment() {
        assert_eq!(
            call("x.save('a=b.csv')").args,
            vec![Literal::String("a=b.csv".to_string())]
        );
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let err = parse("x.insert(").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedParenthesis);
        assert_eq!(err.position, 9);

        assert_eq!(error_kind("x.view"), ParseErrorKind::MissingParenthesis);
        assert_eq!(error_kind("x.view)"), ParseErrorKind::UnexpectedChar(')'));
        assert_eq!(error_kind("x.view())"), ParseErrorKind::TrailingInput);
        assert_eq!(error_kind("x.view()(1)"), ParseErrorKind::TrailingInput);
        assert_eq!(error_kind("x.remove((1))"), ParseErrorKind::UnexpectedChar('('));
        assert_eq!(error_kind("x.(1)"), ParseErrorKind::MissingMethodName);
        assert_eq!(parse("x.(1)").unwrap_err().position, 2);
        assert_eq!(error_kind("x."), ParseErrorKind::MissingParenthesis);
    }

    #[test]
    fn test_missing_separator() {
        let err = parse("x.remove(1 2)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('2'));
        assert_eq!(err.position, 11);
    }

    #[test]
    fn test_quoted_delimiters_inside_arguments() {
        assert_eq!(
            call(r#"x.save("a)b", 'c,(d')"#).args,
            vec![
                Literal::String("a)b".to_string()),
                Literal::String("c,(d".to_string())
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse("x.save('oops)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err.position, 7);
    }

    #[test]
    fn test_non_literal_arguments_rejected() {
        for line in ["x.remove(a)", "x.save(path)", "x.remove(1.)", "x.save('a'b)"] {
            assert!(
                matches!(error_kind(line), ParseErrorKind::InvalidLiteral { .. }),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_method_name() {
        assert_eq!(
            error_kind("x.9lives()"),
            ParseErrorKind::InvalidMethodName("9lives".to_string())
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            error_kind("  hello world"),
            ParseErrorKind::Unrecognized("hello world".to_string())
        );
        assert_eq!(parse("  hello").unwrap_err().position, 2);
    }

    #[test]
    fn test_literal_positions() {
        let err = parse("x.remove(1, zz)").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidLiteral { .. }));
        assert_eq!(err.position, 12);
    }
}
