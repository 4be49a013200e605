//! Parsing of composition arguments such as `N2=0.78,O2=0.22`.

use crate::error::{CliError, CliResult};

/// Split `name=value` pairs separated by commas.
///
/// Names are checked against the model later, when the composition is set.
pub fn parse_fractions(text: &str) -> CliResult<Vec<(String, f64)>> {
    let mut out = Vec::new();
    for item in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, value) = item.split_once('=').ok_or_else(|| {
            CliError::InvalidArgument(format!("expected NAME=FRACTION, got '{item}'"))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "missing species name in '{item}'"
            )));
        }
        let value: f64 = value.trim().parse().map_err(|_| {
            CliError::InvalidArgument(format!("'{}' is not a number in '{item}'", value.trim()))
        })?;
        out.push((name.to_string(), value));
    }
    if out.is_empty() {
        return Err(CliError::InvalidArgument(
            "composition must name at least one species".to_string(),
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_air() {
        let parsed = parse_fractions("N2=0.78,O2=0.22").unwrap();
        assert_eq!(
            parsed,
            vec![("N2".to_string(), 0.78), ("O2".to_string(), 0.22)]
        );
    }

    #[test]
    fn tolerates_whitespace_and_trailing_comma() {
        let parsed = parse_fractions(" N2 = 1.0 , ").unwrap();
        assert_eq!(parsed, vec![("N2".to_string(), 1.0)]);
    }

    #[test]
    fn rejects_malformed_items() {
        assert!(parse_fractions("N2").is_err());
        assert!(parse_fractions("=0.5").is_err());
        assert!(parse_fractions("N2=abc").is_err());
        assert!(parse_fractions("").is_err());
    }
}
