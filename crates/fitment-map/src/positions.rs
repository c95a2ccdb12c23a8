//! Position phrase expansion.
//!
//! Each axis is scanned with an ordered list of case-insensitive patterns.
//! A pattern resolves the axis to one concrete value, or to "both" when the
//! phrase names both sides. Axes resolved to "both" are expanded into every
//! combination; the other axes stay fixed.

use std::sync::LazyLock;

use regex::Regex;

use fitment_model::{Position, PositionAxis, PositionGroup};

/// What a matching pattern resolves an axis to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisMatch {
    Single(Position),
    Both,
}

struct AxisPattern {
    regex: Regex,
    outcome: AxisMatch,
}

fn pattern(source: &str, outcome: AxisMatch) -> AxisPattern {
    AxisPattern {
        regex: Regex::new(&format!("(?i){source}")).expect("Invalid position regex"),
        outcome,
    }
}

static AXIS_PATTERNS: LazyLock<Vec<(PositionAxis, Vec<AxisPattern>)>> = LazyLock::new(|| {
    use AxisMatch::{Both, Single};

    vec![
        (
            PositionAxis::FrontRear,
            vec![
                pattern(r"\bfront\s*(?:and|&|or|/|,)\s*rear\b", Both),
                pattern(r"\brear\s*(?:and|&|or|/|,)\s*front\b", Both),
                pattern(
                    r"\bvaries\s+with\s+application\b",
                    Single(Position::VariesWithApplication),
                ),
                pattern(r"\bfront\b", Single(Position::Front)),
                pattern(r"\brear\b", Single(Position::Rear)),
            ],
        ),
        (
            PositionAxis::LeftRight,
            vec![
                pattern(r"\bboth\s+sides\b", Both),
                pattern(r"\bleft\s*(?:and|&|or|/|,)\s*right\b", Both),
                pattern(r"\bright\s*(?:and|&|or|/|,)\s*left\b", Both),
                pattern(r"\b(?:lh\s*(?:and|&|or|/)\s*rh|rh\s*(?:and|&|or|/)\s*lh)\b", Both),
                pattern(r"\bdriver(?:'s)?(?:\s+side)?\b", Single(Position::Left)),
                pattern(r"\bpassenger(?:'s)?(?:\s+side)?\b", Single(Position::Right)),
                pattern(r"\b(?:left|lh)\b", Single(Position::Left)),
                pattern(r"\b(?:right|rh)\b", Single(Position::Right)),
                pattern(r"\bcent(?:er|re)\b", Single(Position::Center)),
            ],
        ),
        (
            PositionAxis::UpperLower,
            vec![
                pattern(r"\bupper\s*(?:and|&|or|/|,)\s*lower\b", Both),
                pattern(r"\blower\s*(?:and|&|or|/|,)\s*upper\b", Both),
                pattern(r"\bupper\b", Single(Position::Upper)),
                pattern(r"\blower\b", Single(Position::Lower)),
            ],
        ),
        (
            PositionAxis::InnerOuter,
            vec![
                pattern(r"\binner\s*(?:and|&|or|/|,)\s*outer\b", Both),
                pattern(r"\bouter\s*(?:and|&|or|/|,)\s*inner\b", Both),
                pattern(r"\b(?:inner|inboard)\b", Single(Position::Inner)),
                pattern(r"\b(?:outer|outboard)\b", Single(Position::Outer)),
            ],
        ),
    ]
});

/// Expands a position phrase into every concrete position group it names.
///
/// Text without any recognised keyword yields one group with every axis N/A.
/// The result holds `2^n` groups, where `n` is the number of axes whose
/// phrase names both sides.
pub fn extract_positions(text: &str) -> Vec<PositionGroup> {
    let mut base = PositionGroup::default();
    let mut both_axes = Vec::new();

    for (axis, patterns) in AXIS_PATTERNS.iter() {
        let Some(found) = patterns.iter().find(|p| p.regex.is_match(text)) else {
            continue;
        };
        match found.outcome {
            AxisMatch::Single(position) => base.set(*axis, position),
            AxisMatch::Both => both_axes.push(*axis),
        }
    }

    expand_combinations(base, &both_axes)
}

fn expand_combinations(base: PositionGroup, axes: &[PositionAxis]) -> Vec<PositionGroup> {
    let Some((axis, rest)) = axes.split_first() else {
        return vec![base];
    };
    axis.pair()
        .into_iter()
        .flat_map(|value| expand_combinations(base.with(*axis, value), rest))
        .collect()
}
