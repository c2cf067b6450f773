//! Shared fixtures for unit tests here and in the language server crate.

use crate::document::Position;

/// Marker for the cursor inside fixture sources.
pub const CURSOR: &str = "$0";

pub const SAMPLE: &str = r#"// Northern woods
LOCATION forest {
    name: "Dark forest"
    description: "Old trees block out the sun"
    type: wilderness
    # location_cursor
    PROPERTIES {
        danger_level: 3
        weather: [rain, fog]
    }
    RESOURCES {
        RESOURCE herb {
            min_amount: 1
            # herb_cursor
            rarity: COMMON
        }
    }
    CHARACTERS {
        CHARACTER hermit {
            name: "Hermit"
            STATS {
                # stats_cursor
            }
        }
    }
}

ITEM sword {
    name: "Iron sword"
    rarity: RARE
}
"#;

/// Split a fixture into lines and return the position of the [`CURSOR`] marker,
/// which is removed from the text.
pub fn fixture(source: &str) -> (Vec<String>, Position) {
    let mut position = None;
    let lines: Vec<String> = source
        .split('\n')
        .enumerate()
        .map(|(line, text)| match text.find(CURSOR) {
            Some(byte) if position.is_none() => {
                position = Some(Position::new(line, text[..byte].chars().count()));
                text.replacen(CURSOR, "", 1)
            }
            _ => text.to_string(),
        })
        .collect();
    let position = position.unwrap_or_else(|| panic!("fixture has no {} marker", CURSOR));
    (lines, position)
}

/// Position of the first occurrence of `needle` in `SAMPLE`, offset by `column_offset`
/// characters.
pub fn sample_position(needle: &str, column_offset: usize) -> Position {
    let (line, text) = SAMPLE
        .lines()
        .enumerate()
        .find(|(_, text)| text.contains(needle))
        .unwrap_or_else(|| panic!("snippet not found: {}", needle));
    let byte = text.find(needle).unwrap_or_default();
    Position::new(line, text[..byte].chars().count() + column_offset)
}

pub fn sample_lines() -> Vec<String> {
    SAMPLE.lines().map(str::to_string).collect()
}
