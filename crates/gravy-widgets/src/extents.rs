//! Sum of border, margin and padding widths across elements.

use serde::{Deserialize, Serialize};

use crate::geometry::Side;

/// Read access to an element's computed style.
pub trait StyleSource {
    /// Computed value of a camel-cased CSS property (e.g. `paddingLeft`).
    fn css(&self, property: &str) -> Option<String>;
}

impl<S: StyleSource + ?Sized> StyleSource for &S {
    fn css(&self, property: &str) -> Option<String> {
        (**self).css(property)
    }
}

/// Which layer of the box model to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxEdge {
    /// Border width (`b`).
    Border,
    /// Margin (`m`).
    Margin,
    /// Padding (`p`).
    Padding,
}

impl BoxEdge {
    /// Parse a one-letter edge code; unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(Self::Border),
            'm' => Some(Self::Margin),
            'p' => Some(Self::Padding),
            _ => None,
        }
    }

    const fn css_prefix(self) -> &'static str {
        match self {
            Self::Border => "border",
            Self::Margin => "margin",
            Self::Padding => "padding",
        }
    }
}

/// Camel-cased CSS property for `edge` on `side` (`borderTopWidth`, `marginLeft`, ...).
#[must_use]
pub fn property_name(edge: BoxEdge, side: Side) -> String {
    let suffix = if edge == BoxEdge::Border { "Width" } else { "" };
    format!("{}{}{suffix}", edge.css_prefix(), side.css_suffix())
}

/// Total of the requested edges and sides over every element.
///
/// `types` is a list of edge codes (`b`, `m`, `p`) and `sides` a list of side
/// codes (`l`, `r`, `t`, `b`); for example `extents(els, "bp", "lr")` adds up
/// left and right borders and padding. Unknown codes are ignored, as are
/// values without a leading integer.
#[must_use]
pub fn extents<I>(elements: I, types: &str, sides: &str) -> i64
where
    I: IntoIterator,
    I::Item: StyleSource,
{
    let edges: Vec<BoxEdge> = types.chars().filter_map(BoxEdge::from_code).collect();
    let sides: Vec<Side> = sides
        .chars()
        .filter_map(|code| Side::from_code(code).ok())
        .collect();

    let mut total: i64 = 0;
    for element in elements {
        for &edge in &edges {
            for &side in &sides {
                if let Some(value) = element
                    .css(&property_name(edge, side))
                    .as_deref()
                    .and_then(parse_leading_int)
                {
                    total = total.saturating_add(value);
                }
            }
        }
    }
    total
}

/// Integer prefix of a CSS length (`"12px"` -> 12, `" -3.5em"` -> -3).
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_names_follow_css_casing() {
        assert_eq!(property_name(BoxEdge::Border, Side::Left), "borderLeftWidth");
        assert_eq!(property_name(BoxEdge::Padding, Side::Top), "paddingTop");
        assert_eq!(property_name(BoxEdge::Margin, Side::Bottom), "marginBottom");
    }

    #[test]
    fn edge_codes_parse() {
        assert_eq!(BoxEdge::from_code('m'), Some(BoxEdge::Margin));
        assert_eq!(BoxEdge::from_code('z'), None);
    }

    #[test]
    fn leading_int_parsing_matches_css_lengths() {
        assert_eq!(parse_leading_int("12px"), Some(12));
        assert_eq!(parse_leading_int(" -3.5em"), Some(-3));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("auto"), None);
        assert_eq!(parse_leading_int(""), None);
    }
}
