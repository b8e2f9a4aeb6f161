//! Token scanning for expression text.

use super::ParseError;

/// Characters that end a token.  Parentheses end the token before them but
/// are left in the remainder for the parser.
fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '(' | ')')
}

/// Split the next token off `src`.
///
/// Returns the token and the unconsumed remainder, both trimmed.  An empty
/// token (end of input, or a delimiter where a token was expected) is
/// [`ParseError::UnexpectedEnd`].
pub(crate) fn scan_token(src: &str) -> Result<(&str, &str), ParseError> {
    let src = src.trim_start();
    let end = src.find(is_delimiter).unwrap_or(src.len());
    let (token, rest) = src.split_at(end);
    if token.is_empty() {
        return Err(ParseError::UnexpectedEnd);
    }
    Ok((token, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(scan_token("sw  2)").unwrap(), ("sw", "2)"));
        assert_eq!(scan_token("min\tw\nh").unwrap(), ("min", "w\nh"));
    }

    #[test]
    fn parentheses_stay_in_remainder() {
        assert_eq!(scan_token("x)").unwrap(), ("x", ")"));
        assert_eq!(scan_token("+(").unwrap(), ("+", "("));
    }

    #[test]
    fn last_token_has_empty_remainder() {
        assert_eq!(scan_token("42").unwrap(), ("42", ""));
        assert_eq!(scan_token("  sh \n").unwrap(), ("sh", ""));
    }

    #[test]
    fn empty_input_is_unexpected_end() {
        assert_eq!(scan_token(""), Err(ParseError::UnexpectedEnd));
        assert_eq!(scan_token("   "), Err(ParseError::UnexpectedEnd));
    }

    #[test]
    fn delimiter_where_token_expected_is_unexpected_end() {
        assert_eq!(scan_token(")"), Err(ParseError::UnexpectedEnd));
        assert_eq!(scan_token("(+ 1 2)"), Err(ParseError::UnexpectedEnd));
    }
}
