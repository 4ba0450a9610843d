use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, PrefixOperator},
        types::SourceType,
    },
    errors::errors::{SyntaxError, SyntaxErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, SyntaxError> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected());
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than `bp`, keep folding it into lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(&next_bp) = parser.get_bp_lookup().get(&token_kind) else {
            break;
        };
        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected());
        };
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let value = parser.current_token().value.parse().map_err(|_| {
                SyntaxError::new(
                    SyntaxErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                )
            })?;
            parser.advance();
            Ok(Expr::Number(value))
        }
        TokenKind::Boolean => Ok(Expr::Boolean(parser.advance().value == "true")),
        TokenKind::Identifier => Ok(Expr::Symbol(parser.advance().value.clone())),
        _ => Err(parser.unexpected()),
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Plus),
        TokenKind::Dash => Some(BinaryOperator::Minus),
        TokenKind::Star => Some(BinaryOperator::Times),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Caret => Some(BinaryOperator::Exponent),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        TokenKind::Less => Some(BinaryOperator::LessThan),
        TokenKind::Equals => Some(BinaryOperator::Equal),
        _ => None,
    }
}

fn parse_binary_rhs(
    parser: &mut Parser,
    left: Expr,
    rhs_bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    let Some(operator) = binary_operator(parser.current_token_kind()) else {
        return Err(parser.unexpected());
    };
    parser.advance();

    let right = parse_expr(parser, rhs_bp)?;
    Ok(Expr::binary(left, operator, right))
}

/// Left-associative infix operators.
pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    parse_binary_rhs(parser, left, bp)
}

/// `^` is right-associative: its rhs is parsed one level below it, so a
/// following `^` still binds into the rhs.
pub fn parse_exponent_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    parse_binary_rhs(parser, left, BindingPower::Unary)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    let operator = match parser.current_token_kind() {
        TokenKind::Dash => PrefixOperator::Negate,
        TokenKind::Not => PrefixOperator::Not,
        _ => return Err(parser.unexpected()),
    };
    parser.advance();

    let rhs = parse_expr(parser, BindingPower::Unary)?;
    Ok(Expr::prefix(operator, rhs))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `input<num>` or `input<bool>`.
pub fn parse_input_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    parser.advance();
    parser.expect(TokenKind::Less)?;

    let type_token = parser.current_token().clone();
    let ty = match type_token.kind {
        TokenKind::TypeName | TokenKind::Identifier => SourceType::from_name(&type_token.value)
            .ok_or_else(|| {
                SyntaxError::new(
                    SyntaxErrorImpl::UnknownType {
                        type_: type_token.value.clone(),
                    },
                    type_token.span.start.clone(),
                )
            })?,
        _ => return Err(parser.unexpected_detailed("expected a type name")),
    };
    parser.advance();

    parser.expect(TokenKind::Greater)?;
    Ok(Expr::Input(ty))
}
