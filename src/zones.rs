// Hardiness zone range parser ("<min> to <max>")

use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, space1, u8 as zone_number},
    combinator::{all_consuming, map},
    sequence::{delimited, preceded, separated_pair, terminated},
    IResult,
};

/// Inclusive hardiness zone range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRange {
    pub min: u8,
    pub max: u8,
}

impl ZoneRange {
    pub fn contains(&self, zone: u8) -> bool {
        self.min <= zone && zone <= self.max
    }

    /// Every integer zone in the range. Empty when min exceeds max.
    pub fn zones(&self) -> impl Iterator<Item = u8> {
        self.min..=self.max
    }
}

fn zone_range(input: &str) -> IResult<&str, ZoneRange> {
    map(
        separated_pair(
            preceded(multispace0, zone_number),
            delimited(space1, tag("to"), space1),
            terminated(zone_number, multispace0),
        ),
        |(min, max)| ZoneRange { min, max },
    )(input)
}

/// Parse a `HardinessZones` cell. Absent or malformed text yields `None`.
pub fn parse_zone_range(text: Option<&str>) -> Option<ZoneRange> {
    let text = text?;
    all_consuming(zone_range)(text).ok().map(|(_, range)| range)
}
