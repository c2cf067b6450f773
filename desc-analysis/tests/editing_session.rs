//! Queries against a complete world file, the way an editor issues them while the
//! author moves through the document.

use desc_analysis::{
    completion_items, hover, resolve, BlockKeyword, DocumentView, LineIndex, Position,
    SuggestionKind,
};

const WORLD: &str = include_str!("fixtures/world.desc");

fn world() -> LineIndex {
    LineIndex::new(WORLD)
}

/// Position at the end of the first line containing `needle`.
fn end_of_line_with(document: &LineIndex, needle: &str) -> Position {
    (0..document.line_count())
        .find_map(|line| {
            let text = document.line_text(line)?;
            text.contains(needle)
                .then(|| Position::new(line, text.chars().count()))
        })
        .unwrap_or_else(|| panic!("line containing {} not found", needle))
}

fn labels(document: &LineIndex, position: Position) -> Vec<String> {
    completion_items(document, position)
        .into_iter()
        .map(|suggestion| suggestion.label)
        .collect()
}

#[test]
fn every_line_resolves_to_its_block() {
    let document = world();
    let cases = [
        ("Riverside village", Some(BlockKeyword::Location)),
        ("danger_level", Some(BlockKeyword::Properties)),
        ("Forest path", Some(BlockKeyword::Connection)),
        ("\"Ford\"", Some(BlockKeyword::Connection)),
        ("Mind the wolves", Some(BlockKeyword::Character)),
        ("Northern lands", None),
        ("Herbal tea", Some(BlockKeyword::Item)),
    ];
    for (needle, expected) in cases {
        let position = end_of_line_with(&document, needle);
        assert_eq!(resolve(&document, position).block, expected, "line with {}", needle);
    }
}

#[test]
fn blank_line_between_sections_offers_keywords() {
    let document = world();
    let icon = end_of_line_with(&document, "village.png");
    let blank = Position::new(icon.line + 1, 0);
    let suggestions = completion_items(&document, blank);
    assert_eq!(suggestions.len(), 15);
    assert!(suggestions.iter().all(|s| s.kind == SuggestionKind::Keyword));
}

#[test]
fn partially_typed_property_inside_connection() {
    let document = world();
    let name = end_of_line_with(&document, "Ford");
    let position = Position::new(name.line, 14);
    assert_eq!(
        document.line_text(name.line).map(|text| &text[..14]),
        Some("            na")
    );
    assert_eq!(labels(&document, position), ["id", "name", "condition", "icon"]);
}

#[test]
fn location_properties_after_closed_nested_blocks() {
    // Start typing a property just above the brace that closes LOCATION village.
    let mut lines: Vec<&str> = WORLD.lines().collect();
    let closing = lines
        .iter()
        .position(|line| *line == "}")
        .expect("location closing brace");
    lines.insert(closing, "    colo");
    let document = LineIndex::new(lines.join("\n"));

    let position = end_of_line_with(&document, "    colo");
    assert_eq!(position.line, closing);
    assert_eq!(
        resolve(&document, position).block,
        Some(BlockKeyword::Location)
    );
    assert_eq!(
        labels(&document, position),
        ["name", "description", "type", "color", "icon"]
    );
}

#[test]
fn cursor_before_closing_braces_stays_inside() {
    let document = world();
    let characters_close = end_of_line_with(&document, "Mind the wolves").line + 2;
    assert_eq!(document.line_text(characters_close), Some("    }"));
    assert_eq!(
        resolve(&document, Position::new(characters_close, 4)).block,
        Some(BlockKeyword::Characters)
    );
    assert_eq!(
        resolve(&document, Position::new(characters_close + 1, 0)).block,
        Some(BlockKeyword::Location)
    );
    assert_eq!(
        resolve(&document, Position::new(characters_close + 1, 1)).block,
        None
    );
}

#[test]
fn cursor_before_nested_opener_reports_the_outer_block() {
    let document = world();
    let river = end_of_line_with(&document, "CONNECTION river");
    assert_eq!(
        resolve(&document, Position::new(river.line, 8)).block,
        Some(BlockKeyword::Connections)
    );
    assert_eq!(
        resolve(&document, river).block,
        Some(BlockKeyword::Connection)
    );
}

#[test]
fn rarity_value_completion_in_item() {
    let document = world();
    let rarity = end_of_line_with(&document, "rarity: UNCOMMON");
    let position = Position::new(rarity.line, "    rarity:".len());
    assert_eq!(
        labels(&document, position),
        ["COMMON", "UNCOMMON", "RARE", "EPIC", "LEGENDARY", "MYTHIC"]
    );
}

#[test]
fn region_block_gets_no_property_help() {
    let document = world();
    let climate = end_of_line_with(&document, "climate: cold");
    assert!(hover(&document, Position::new(climate.line, 6)).is_none());
    assert!(completion_items(&document, Position::new(climate.line, 6)).is_empty());
}

#[test]
fn hover_documents_keywords_and_properties() {
    let document = world();
    let connection = end_of_line_with(&document, "CONNECTION forest");
    let keyword = hover(&document, Position::new(connection.line, 10)).expect("keyword hover");
    assert_eq!(keyword.contents, "**CONNECTION** - block definition keyword in DESC");

    let weight = end_of_line_with(&document, "weight: 0.2");
    let property = hover(&document, Position::new(weight.line, 5)).expect("property hover");
    assert!(property.contents.contains("Item weight"));
    assert!(property.contents.ends_with("Type: _number_"));
}
