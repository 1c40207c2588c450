//! Scenario-file parser: whitespace-delimited tokens, fixed section first.
//!
//! The fixed section (arena extent, player, enemy) must parse completely or
//! startup aborts. The mirror section is best-effort: the first malformed
//! mirror entry stops ingestion without failing the scenario.

use std::{error::Error, fmt, str::SplitWhitespace};

use tank_duel_core::{
    Direction, GridDimensions, MatchSetup, Mirror, MirrorOrientation, GridPos, TankSeed,
};

/// Parses a complete scenario file.
pub(crate) fn parse_scenario(text: &str) -> Result<MatchSetup, ScenarioParseError> {
    let mut tokens = text.split_whitespace();

    let rows = require_number(&mut tokens, "row count")?;
    let cols = require_number(&mut tokens, "column count")?;

    let player = require_tank(&mut tokens, "player row", "player column", "player heading")?;
    let enemy = require_tank(&mut tokens, "enemy row", "enemy column", "enemy heading")?;

    let mirrors = read_mirrors(&mut tokens);

    Ok(MatchSetup {
        dimensions: GridDimensions::new(rows, cols),
        player,
        enemy,
        mirrors,
    })
}

fn require_number(
    tokens: &mut SplitWhitespace<'_>,
    field: &'static str,
) -> Result<u32, ScenarioParseError> {
    let token = tokens
        .next()
        .ok_or(ScenarioParseError::MissingToken { field })?;
    token
        .parse()
        .map_err(|_| ScenarioParseError::InvalidNumber {
            field,
            token: token.to_owned(),
        })
}

fn require_tank(
    tokens: &mut SplitWhitespace<'_>,
    row_field: &'static str,
    col_field: &'static str,
    heading_field: &'static str,
) -> Result<TankSeed, ScenarioParseError> {
    let row = require_number(tokens, row_field)?;
    let col = require_number(tokens, col_field)?;

    let token = tokens.next().ok_or(ScenarioParseError::MissingToken {
        field: heading_field,
    })?;
    let heading = single_char(token)
        .and_then(Direction::from_scenario_char)
        .ok_or_else(|| ScenarioParseError::InvalidHeading {
            field: heading_field,
            token: token.to_owned(),
        })?;

    Ok(TankSeed::new(GridPos::new(row, col), heading))
}

fn read_mirrors(tokens: &mut SplitWhitespace<'_>) -> Vec<Mirror> {
    let mut mirrors = Vec::new();

    loop {
        let Some(row_token) = tokens.next() else {
            break;
        };
        let Ok(row) = row_token.parse::<u32>() else {
            break;
        };
        let Some(col) = tokens.next().and_then(|token| token.parse::<u32>().ok()) else {
            break;
        };
        let Some(orientation) = tokens
            .next()
            .and_then(single_char)
            .and_then(MirrorOrientation::from_scenario_char)
        else {
            break;
        };

        mirrors.push(Mirror::new(GridPos::new(row, col), orientation));
    }

    mirrors
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(first)
}

/// Fixed-section parse failures that abort startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScenarioParseError {
    /// A required token was missing from the scenario file.
    MissingToken {
        /// Which value the parser was reading.
        field: &'static str,
    },
    /// A coordinate or extent token was not an unsigned number.
    InvalidNumber {
        /// Which value the parser was reading.
        field: &'static str,
        /// The offending token.
        token: String,
    },
    /// A heading token was not one of `u`, `d`, `l`, `r`.
    InvalidHeading {
        /// Which value the parser was reading.
        field: &'static str,
        /// The offending token.
        token: String,
    },
}

impl fmt::Display for ScenarioParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken { field } => {
                write!(formatter, "scenario file is missing the {field}")
            }
            Self::InvalidNumber { field, token } => {
                write!(formatter, "scenario {field} `{token}` is not a number")
            }
            Self::InvalidHeading { field, token } => write!(
                formatter,
                "scenario {field} `{token}` is not one of u, d, l, r"
            ),
        }
    }
}

impl Error for ScenarioParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_complete_scenario_parses() {
        let setup = parse_scenario("10 10\n2 2 r\n2 7 l\n5 5 b\n3 6 f\n")
            .expect("scenario is well-formed");

        assert_eq!(setup.dimensions, GridDimensions::new(10, 10));
        assert_eq!(
            setup.player,
            TankSeed::new(GridPos::new(2, 2), Direction::Right)
        );
        assert_eq!(
            setup.enemy,
            TankSeed::new(GridPos::new(2, 7), Direction::Left)
        );
        assert_eq!(
            setup.mirrors,
            vec![
                Mirror::new(GridPos::new(5, 5), MirrorOrientation::BackSlash),
                Mirror::new(GridPos::new(3, 6), MirrorOrientation::ForwardSlash),
            ]
        );
    }

    #[test]
    fn a_mirrorless_scenario_parses() {
        let setup = parse_scenario("8 12  4 4 u  6 6 d").expect("scenario is well-formed");
        assert!(setup.mirrors.is_empty());
    }

    #[test]
    fn a_truncated_dimensions_line_aborts() {
        let error = parse_scenario("10").expect_err("the column count is missing");
        assert_eq!(
            error,
            ScenarioParseError::MissingToken {
                field: "column count"
            }
        );
    }

    #[test]
    fn a_scenario_with_only_dimensions_aborts_before_any_tank_exists() {
        let error = parse_scenario("10 10").expect_err("the fixed section is incomplete");
        assert_eq!(
            error,
            ScenarioParseError::MissingToken {
                field: "player row"
            }
        );
    }

    #[test]
    fn a_malformed_fixed_section_aborts() {
        let error = parse_scenario("10 10\n2 two r\n2 7 l").expect_err("non-numeric column");
        assert_eq!(
            error,
            ScenarioParseError::InvalidNumber {
                field: "player column",
                token: "two".to_owned(),
            }
        );

        let error = parse_scenario("10 10\n2 2 x\n2 7 l").expect_err("bad heading");
        assert_eq!(
            error,
            ScenarioParseError::InvalidHeading {
                field: "player heading",
                token: "x".to_owned(),
            }
        );

        let error = parse_scenario("10 10\n2 2 r\n2 7 left").expect_err("multi-char heading");
        assert_eq!(
            error,
            ScenarioParseError::InvalidHeading {
                field: "enemy heading",
                token: "left".to_owned(),
            }
        );
    }

    #[test]
    fn a_malformed_mirror_entry_stops_ingestion_quietly() {
        let setup = parse_scenario("10 10\n2 2 r\n2 7 l\n5 5 b\n6 oops f\n7 7 f\n")
            .expect("the fixed section is intact");

        // The well-formed leading mirror survives; everything from the
        // malformed entry onward is dropped.
        assert_eq!(
            setup.mirrors,
            vec![Mirror::new(GridPos::new(5, 5), MirrorOrientation::BackSlash)]
        );
    }

    #[test]
    fn a_dangling_partial_mirror_is_ignored() {
        let setup = parse_scenario("10 10\n2 2 r\n2 7 l\n5 5\n").expect("fixed section intact");
        assert!(setup.mirrors.is_empty());
    }

    #[test]
    fn an_unknown_orientation_stops_ingestion() {
        let setup = parse_scenario("10 10\n2 2 r\n2 7 l\n5 5 u\n6 6 b\n")
            .expect("fixed section intact");
        assert!(
            setup.mirrors.is_empty(),
            "a tank heading is not a mirror orientation",
        );
    }
}
