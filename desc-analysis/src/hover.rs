use crate::completion::SEPARATOR;
use crate::context::{is_identifier_char, resolve};
use crate::document::{DocumentView, Position, Range};
use crate::schema::schema;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverResult {
    pub range: Range,
    /// Markdown.
    pub contents: String,
}

/// Identifier under (or immediately before) the cursor, with its range.
pub fn word_at<D>(document: &D, position: Position) -> Option<(Range, &str)>
where
    D: DocumentView + ?Sized,
{
    let line = document.line_text(position.line)?;
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let column = position.column.min(chars.len());

    let anchor = if column < chars.len() && is_identifier_char(chars[column].1) {
        column
    } else if column > 0 && is_identifier_char(chars[column - 1].1) {
        column - 1
    } else {
        return None;
    };

    let start = (0..anchor)
        .rev()
        .take_while(|&idx| is_identifier_char(chars[idx].1))
        .last()
        .unwrap_or(anchor);
    let end = (anchor..chars.len())
        .find(|&idx| !is_identifier_char(chars[idx].1))
        .unwrap_or(chars.len());

    let start_byte = chars[start].0;
    let end_byte = chars.get(end).map(|(byte, _)| *byte).unwrap_or(line.len());
    let range = Range::new(
        Position::new(position.line, start),
        Position::new(position.line, end),
    );
    Some((range, &line[start_byte..end_byte]))
}

/// Documentation for the word at `position`.
pub fn hover<D>(document: &D, position: Position) -> Option<HoverResult>
where
    D: DocumentView + ?Sized,
{
    let (range, word) = word_at(document, position)?;
    hover_for_word(document, position, word, range)
}

/// Documentation for a word the caller already extracted from the document.
///
/// Keywords are documented as such. Any other word on a `name: value` line is
/// documented as the property `name` of the enclosing block, if that block declares it.
pub fn hover_for_word<D>(
    document: &D,
    position: Position,
    word: &str,
    range: Range,
) -> Option<HoverResult>
where
    D: DocumentView + ?Sized,
{
    if schema().is_keyword(word) {
        return Some(HoverResult {
            range,
            contents: format!("**{}** - block definition keyword in DESC", word),
        });
    }

    let line = document.line_text(position.line)?;
    let (name, _) = line.split_once(SEPARATOR)?;
    let block = resolve(document, position).block?;
    let descriptor = schema().property(block, name.trim())?;
    Some(HoverResult {
        range,
        contents: format!(
            "**{}**\n\n{}\n\nType: _{}_",
            descriptor.name, descriptor.detail, descriptor.ty
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture, sample_lines, sample_position};

    fn hover_at(source: &str) -> Option<HoverResult> {
        let (lines, position) = fixture(source);
        hover(&lines, position)
    }

    #[test]
    fn keyword_hover_documents_block_definition() {
        let result = hover_at("ITE$0M sword {\n}").expect("keyword hover");
        assert_eq!(result.contents, "**ITEM** - block definition keyword in DESC");
        assert_eq!(
            result.range,
            Range::new(Position::new(0, 0), Position::new(0, 4))
        );
    }

    #[test]
    fn keyword_hover_works_outside_blocks() {
        let lines = sample_lines();
        let position = sample_position("ITEM sword", 2);
        assert!(hover(&lines, position).is_some());
        assert!(hover_at("  } TOPIC$0").is_some());
    }

    #[test]
    fn property_hover_uses_enclosing_block() {
        let result = hover_at("ITEM sword {\n    wei$0ght: 3\n}").expect("property hover");
        assert_eq!(result.contents, "**weight**\n\nItem weight\n\nType: _number_");
        assert_eq!(
            result.range,
            Range::new(Position::new(1, 4), Position::new(1, 10))
        );
    }

    #[test]
    fn same_property_name_differs_per_block() {
        let lines = sample_lines();
        let herb = hover(&lines, sample_position("rarity: COMMON", 1)).expect("herb rarity");
        assert!(herb.contents.contains("Resource rarity"));
        let sword = hover(&lines, sample_position("rarity: RARE", 1)).expect("sword rarity");
        assert!(sword.contents.contains("Item rarity"));
    }

    #[test]
    fn hovering_the_value_documents_the_property() {
        let result = hover_at("ITEM sword {\n    rarity: EP$0IC\n}").expect("value hover");
        assert!(result.contents.starts_with("**rarity**"));
        assert_eq!(
            result.range,
            Range::new(Position::new(1, 12), Position::new(1, 16))
        );
    }

    #[test]
    fn cursor_at_end_of_word_still_hovers() {
        assert!(hover_at("ITEM$0 sword {\n}").is_some());
    }

    #[test]
    fn unknown_word_without_separator_has_no_hover() {
        assert!(hover_at("ITEM sword {\n    someth$0ing\n}").is_none());
        assert!(hover_at("foo$0").is_none());
    }

    #[test]
    fn region_is_not_documented() {
        assert!(hover_at("REG$0ION north {\n}").is_none());
        assert!(hover_at("REGION north {\n    cli$0mate: cold\n}").is_none());
    }

    #[test]
    fn undeclared_property_has_no_hover() {
        assert!(hover_at("ITEM sword {\n    colo$0r: red\n}").is_none());
    }

    #[test]
    fn whitespace_has_no_hover() {
        assert!(hover_at("ITEM sword {\n   $0 \n}").is_none());
    }

    #[test]
    fn word_ranges_count_characters() {
        let lines = vec!["    name: Лесной"];
        let (range, word) = word_at(&lines, Position::new(0, 12)).expect("word");
        assert_eq!(word, "Лесной");
        assert_eq!(range.start.column, 10);
        assert_eq!(range.end.column, 16);
    }

    #[test]
    fn hover_is_idempotent() {
        let (lines, position) = fixture("RESOURCE herb {\n    min_am$0ount: 1\n}");
        assert_eq!(hover(&lines, position), hover(&lines, position));
        assert!(hover(&lines, position).is_some());
    }
}
