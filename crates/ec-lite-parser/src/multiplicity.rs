// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relationship multiplicity strings: `(lower..upper)`, where upper may be `*`

use ec_lite_model::{EcError, RelationshipMultiplicity, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0},
    combinator::{all_consuming, map, map_res},
    sequence::{delimited, separated_pair},
    IResult, Parser,
};

/// Parse a bound (digits)
fn bound(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| {
        lexical_core::parse::<u32>(digits.as_bytes())
    })
    .parse(input)
}

/// Parse an upper bound (digits or `*`)
fn upper_bound(input: &str) -> IResult<&str, Option<u32>> {
    alt((map(char('*'), |_| None), map(bound, Some))).parse(input)
}

/// Parse `(lower..upper)` into its two bounds
fn bounds(input: &str) -> IResult<&str, (u32, Option<u32>)> {
    delimited(
        (multispace0, char('(')),
        separated_pair(bound, tag(".."), upper_bound),
        (char(')'), multispace0),
    )
    .parse(input)
}

/// Parse a multiplicity string
///
/// Fails with `InvalidMultiplicity` on malformed input, on bounds that do
/// not fit in a `u32` and when lower exceeds upper.
pub fn parse_multiplicity(input: &str) -> Result<RelationshipMultiplicity> {
    let invalid = || EcError::InvalidMultiplicity(input.to_string());
    let (_, (lower, upper)) = all_consuming(bounds).parse(input).map_err(|_| invalid())?;
    RelationshipMultiplicity::new(lower, upper).map_err(|_| invalid())
}
