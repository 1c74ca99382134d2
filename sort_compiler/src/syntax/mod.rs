//! Syntax analysis: infix token stream to postfix order

mod error;
mod parser;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::PostfixParser;

use crate::logging::codes;
use crate::tokens::{Token, TokenStream};
use crate::{log_debug, log_success};

/// Convert a token stream to postfix order with logging
pub fn to_postfix(stream: &TokenStream) -> SyntaxResult<Vec<Token>> {
    to_postfix_with_parser(&PostfixParser::new(), stream)
}

pub fn to_postfix_with_parser(
    parser: &PostfixParser,
    stream: &TokenStream,
) -> SyntaxResult<Vec<Token>> {
    let result = parser.to_postfix(stream);

    match &result {
        Ok(postfix) => {
            log_success!(
                codes::success::POSTFIX_CONVERSION_COMPLETE,
                "Postfix conversion completed",
                "tokens" => postfix.len()
            );
        }
        Err(error) => {
            log_debug!(code = error.error_code(), "Expression rejected by parser",
                "reason" => error
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Operator;

    #[test]
    fn test_to_postfix_drops_brackets() {
        let stream = TokenStream::from_tokens(vec![
            Token::OpenBracket,
            Token::operand("str"),
            Token::Operator(Operator::Add),
            Token::operand("dex"),
            Token::CloseBracket,
        ]);

        let postfix = to_postfix(&stream).unwrap();
        assert_eq!(postfix.len(), 3);
        assert!(postfix
            .iter()
            .all(|t| !matches!(t, Token::OpenBracket | Token::CloseBracket)));
    }
}
