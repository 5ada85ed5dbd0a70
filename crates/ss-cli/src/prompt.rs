//! Parsing of raw prompt input.

use thiserror::Error;

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Leave the session.
    Quit,
    /// Pick the numbered choice (1-based, not yet range-checked).
    Pick(usize),
}

/// Input that is neither a number nor an exit command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Not a recognised command or number.
    #[error("enter the number of your choice, or 'quit' to leave (got '{0}')")]
    Malformed(String),
}

/// Parse one line typed at the prompt.
pub fn parse_input(raw: &str) -> Result<Input, InputError> {
    let input = raw.trim();
    if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
        return Ok(Input::Quit);
    }
    if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
        return input
            .parse()
            .map(Input::Pick)
            .map_err(|_| InputError::Malformed(input.to_string()));
    }
    Err(InputError::Malformed(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands() {
        assert_eq!(parse_input("quit"), Ok(Input::Quit));
        assert_eq!(parse_input("  EXIT \n"), Ok(Input::Quit));
        assert_eq!(parse_input("Quit"), Ok(Input::Quit));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_input("3\n"), Ok(Input::Pick(3)));
        assert_eq!(parse_input(" 0 "), Ok(Input::Pick(0)));
    }

    #[test]
    fn malformed() {
        assert!(parse_input("abc").is_err());
        assert!(parse_input("").is_err());
        assert!(parse_input("-1").is_err());
        assert!(parse_input("2.5").is_err());
        assert!(parse_input("99999999999999999999999999").is_err());
    }
}
