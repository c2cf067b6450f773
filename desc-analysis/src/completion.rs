use crate::context::resolve;
use crate::document::{line_prefix, DocumentView, Position};
use crate::schema::{schema, BlockKeyword, PropertyDescriptor};
use lsp_types::CompletionItemKind;
use serde::Serialize;

/// Separates a property name from its value.
pub const SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestionKind {
    Keyword,
    Property,
    EnumValue,
    Literal,
}

impl From<SuggestionKind> for CompletionItemKind {
    fn from(kind: SuggestionKind) -> Self {
        match kind {
            SuggestionKind::Keyword => CompletionItemKind::KEYWORD,
            SuggestionKind::Property => CompletionItemKind::PROPERTY,
            SuggestionKind::EnumValue => CompletionItemKind::ENUM_MEMBER,
            SuggestionKind::Literal => CompletionItemKind::VALUE,
        }
    }
}

/// A completion candidate, independent of any editor protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    pub detail: String,
    pub documentation: Option<String>,
    pub insert_text: Option<String>,
}

impl Suggestion {
    fn new(label: impl Into<String>, kind: SuggestionKind, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: detail.into(),
            documentation: None,
            insert_text: None,
        }
    }

    fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = Some(text.into());
        self
    }
}

/// What the text before the cursor asks for. Exactly one applies per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompletionContext<'a> {
    BlockKeyword,
    Value { property: &'a str },
    Property(BlockKeyword),
    Nothing,
}

/// Produce suggestions for the cursor position, most specific context first.
pub fn completion_items<D>(document: &D, position: Position) -> Vec<Suggestion>
where
    D: DocumentView + ?Sized,
{
    let prefix = line_prefix(document, position);
    let context = detect_context(document, position, prefix);
    tracing::debug!(line = position.line, column = position.column, ?context, "completion");

    match context {
        CompletionContext::BlockKeyword => keyword_completions(),
        CompletionContext::Value { property } => value_completions(property),
        CompletionContext::Property(block) => property_completions(block),
        CompletionContext::Nothing => Vec::new(),
    }
}

fn detect_context<'a, D>(document: &D, position: Position, prefix: &'a str) -> CompletionContext<'a>
where
    D: DocumentView + ?Sized,
{
    let trimmed = prefix.trim();
    if trimmed.is_empty() {
        return CompletionContext::BlockKeyword;
    }
    if let Some(property) = trimmed.strip_suffix(SEPARATOR) {
        return CompletionContext::Value {
            property: property.trim(),
        };
    }
    if !prefix.contains(SEPARATOR) {
        if let Some(block) = resolve(document, position).block {
            return CompletionContext::Property(block);
        }
    }
    CompletionContext::Nothing
}

fn keyword_completions() -> Vec<Suggestion> {
    schema()
        .keywords()
        .iter()
        .map(|keyword| {
            Suggestion::new(keyword.as_str(), SuggestionKind::Keyword, "DESC keyword")
                .with_documentation(format!("**{}** block definition", keyword))
        })
        .collect()
}

fn value_completions(property: &str) -> Vec<Suggestion> {
    match schema().enum_values_for(property) {
        Some(values) => values
            .iter()
            .map(|value| {
                Suggestion::new(
                    *value,
                    SuggestionKind::EnumValue,
                    format!("value for `{}`", property),
                )
            })
            .collect(),
        None => LITERAL_PLACEHOLDERS
            .iter()
            .map(|(label, detail)| Suggestion::new(*label, SuggestionKind::Literal, *detail))
            .collect(),
    }
}

fn property_completions(block: BlockKeyword) -> Vec<Suggestion> {
    schema()
        .properties_for(block)
        .iter()
        .map(property_suggestion)
        .collect()
}

fn property_suggestion(descriptor: &PropertyDescriptor) -> Suggestion {
    Suggestion::new(descriptor.name, SuggestionKind::Property, descriptor.detail)
        .with_documentation(format!(
            "**{}** - {} (type: {})",
            descriptor.name, descriptor.detail, descriptor.ty
        ))
        .with_insert_text(format!("{}{} ", descriptor.name, SEPARATOR))
}

const LITERAL_PLACEHOLDERS: &[(&str, &str)] = &[
    ("\"string\"", "String value"),
    ("'string'", "String value (single quotes)"),
    ("0", "Numeric value"),
    ("true", "Boolean value (true)"),
    ("false", "Boolean value (false)"),
    ("null", "Absent value"),
    ("[]", "Array"),
    ("{}", "Block"),
];
