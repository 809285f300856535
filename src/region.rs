//! Region name normalisation.
//!
//! Habitat ranges are free text ("Eastern U.S.A.", "temperate Asia", ...).
//! They are folded onto a small closed set of regions by substring matching
//! against known aliases. Text that matches no alias is kept as a
//! title-cased pseudo-region.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Usa,
    Uk,
    Europe,
    Asia,
    Africa,
    Australia,
    SouthAmerica,
    NorthAmerica,
    Mediterranean,
    Tropical,
}

impl Region {
    /// Match order. The first region owning a matching alias wins.
    pub const ALL: [Region; 10] = [
        Region::Usa,
        Region::Uk,
        Region::Europe,
        Region::Asia,
        Region::Africa,
        Region::Australia,
        Region::SouthAmerica,
        Region::NorthAmerica,
        Region::Mediterranean,
        Region::Tropical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::Usa => "USA",
            Region::Uk => "UK",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::Africa => "Africa",
            Region::Australia => "Australia",
            Region::SouthAmerica => "South America",
            Region::NorthAmerica => "North America",
            Region::Mediterranean => "Mediterranean",
            Region::Tropical => "Tropical",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Region::Usa => &["United States", "US", "U.S.A.", "U.S.", "America"],
            Region::Uk => &["United Kingdom", "Great Britain", "England", "Britain"],
            Region::Europe => &["European", "EU", "European Union"],
            Region::Asia => &["Asian", "East Asia", "South Asia", "Southeast Asia"],
            Region::Africa => &["African", "North Africa", "South Africa", "Sub-Saharan Africa"],
            Region::Australia => &["Australian", "Oceania", "Pacific"],
            Region::SouthAmerica => &["Latin America", "Central America", "Caribbean"],
            Region::NorthAmerica => &["Canada", "Mexico", "Central America"],
            Region::Mediterranean => &["Mediterranean Basin", "Mediterranean Region"],
            Region::Tropical => &["Tropics", "Tropical Region", "Equatorial"],
        }
    }

    /// Representative (longitude, latitude) for records without coordinates
    pub fn coordinates(self) -> (f64, f64) {
        match self {
            Region::Usa => (-98.5795, 39.8283),
            Region::Uk => (-0.1278, 51.5074),
            Region::Europe => (10.4515, 51.1657),
            Region::Asia => (100.6197, 34.0479),
            Region::Africa => (20.9394, 6.8770),
            Region::Australia => (133.7751, -25.2744),
            Region::SouthAmerica => (-58.3816, -23.4425),
            Region::NorthAmerica => (-98.5795, 39.8283),
            Region::Mediterranean => (14.2681, 40.8518),
            Region::Tropical => (0.0, 0.0),
        }
    }

    pub fn from_name(name: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of normalising a habitat string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedRegion {
    Canonical(Region),
    /// No alias matched: the cleaned input, title-cased
    Other(String),
}

impl NormalizedRegion {
    pub fn as_str(&self) -> &str {
        match self {
            NormalizedRegion::Canonical(r) => r.name(),
            NormalizedRegion::Other(s) => s,
        }
    }

    pub fn canonical(&self) -> Option<Region> {
        match self {
            NormalizedRegion::Canonical(r) => Some(*r),
            NormalizedRegion::Other(_) => None,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            NormalizedRegion::Canonical(r) => r.name().to_string(),
            NormalizedRegion::Other(s) => s,
        }
    }
}

/// Collapse whitespace, drop periods and commas, lower-case
fn clean(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| *c != '.' && *c != ',')
        .collect::<String>()
        .to_lowercase()
}

fn title_case(cleaned: &str) -> String {
    cleaned
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalise a free-text habitat range.
///
/// Returns `None` for absent or blank input. Aliases are compared after the
/// same cleaning as the input, so "U.S.A." and "usa" are equivalent.
pub fn normalize_region(habitat: Option<&str>) -> Option<NormalizedRegion> {
    let cleaned = clean(habitat?);
    if cleaned.is_empty() {
        return None;
    }

    let matched = Region::ALL.into_iter().find(|region| {
        region
            .aliases()
            .iter()
            .any(|alias| cleaned.contains(clean(alias).as_str()))
    });

    Some(match matched {
        Some(region) => NormalizedRegion::Canonical(region),
        None => NormalizedRegion::Other(title_case(&cleaned)),
    })
}

/// Convenience wrapper returning the region label as a string
pub fn standardize_region(habitat: Option<&str>) -> Option<String> {
    normalize_region(habitat).map(NormalizedRegion::into_string)
}
