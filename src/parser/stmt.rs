use crate::{
    ast::{
        expressions::Expr,
        statements::{Stmt, ValueCases},
        types::Value,
    },
    errors::errors::{SyntaxError, SyntaxErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    else {
        return Err(parser.unexpected_detailed("expected the start of a statement"));
    };

    stmt_fn(parser)
}

fn expect_identifier(parser: &mut Parser, context: &str) -> Result<String, SyntaxError> {
    let error = parser.unexpected_detailed(&format!("expected identifier {}", context));
    Ok(parser.expect_error(TokenKind::Identifier, Some(error))?.value)
}

/// Parses `( expr )`, the head of `if`, `while` and `switch`.
fn parse_parenthesized(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(expr)
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.advance();

    let name = expect_identifier(parser, "during variable declaration")?;
    parser.expect(TokenKind::Assignment)?;
    let initial_expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl { name, initial_expr })
}

pub fn parse_var_update_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    let name = expect_identifier(parser, "in assignment")?;

    let error = parser.unexpected_detailed("expected `=` after variable name");
    parser.expect_error(TokenKind::Assignment, Some(error))?;
    let new_expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarUpdate { name, new_expr })
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.advance();

    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print(expr))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.advance();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::Block(statements))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.advance();

    let condition = parse_parenthesized(parser)?;
    let true_branch = Box::new(parse_stmt(parser)?);

    let false_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        true_branch,
        false_branch,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.advance();

    let condition = parse_parenthesized(parser)?;
    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::While { condition, body })
}

/// A case label: an optionally negated number, or a boolean.
fn parse_case_value(parser: &mut Parser) -> Result<Value, SyntaxError> {
    let negated = parser.current_token_kind() == TokenKind::Dash;
    if negated {
        parser.advance();
    }

    let token = parser.current_token().clone();
    match token.kind {
        TokenKind::Number => {
            let number: f64 = token.value.parse().map_err(|_| {
                SyntaxError::new(
                    SyntaxErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;
            parser.advance();
            Ok(Value::Num(if negated { -number } else { number }))
        }
        TokenKind::Boolean if !negated => {
            parser.advance();
            Ok(Value::Bool(token.value == "true"))
        }
        _ => Err(parser.unexpected_detailed("expected a number or boolean case label")),
    }
}

/// `switch (e) { case v: s ... default: s }`. Later cases with an equal label
/// replace earlier ones; `default` must come last and at most once.
pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.advance();

    let focus = parse_parenthesized(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut value_cases = ValueCases::new();
    let mut default_case = None;

    loop {
        match parser.current_token_kind() {
            TokenKind::Case => {
                if default_case.is_some() {
                    return Err(parser.unexpected_detailed("`case` must come before `default`"));
                }
                parser.advance();
                let value = parse_case_value(parser)?;
                parser.expect(TokenKind::Colon)?;
                let body = parse_stmt(parser)?;
                value_cases.insert(value, body);
            }
            TokenKind::Default => {
                if default_case.is_some() {
                    return Err(parser.unexpected_detailed("a switch has at most one `default`"));
                }
                parser.advance();
                parser.expect(TokenKind::Colon)?;
                default_case = Some(Box::new(parse_stmt(parser)?));
            }
            TokenKind::CloseCurly => break,
            _ => return Err(parser.unexpected_detailed("expected `case`, `default` or `}`")),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Stmt::Switch {
        focus,
        value_cases,
        default_case,
    })
}
