//! Main language server implementation

use std::collections::HashMap;
use std::sync::Arc;

use desc_analysis::{
    completion_items, hover as compute_hover, DocumentView, HoverResult, LineIndex,
    Position as DescPosition, Range as DescRange, Suggestion,
};
use desc_config::DescConfig;
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse, Documentation, Hover,
    HoverContents, HoverParams, HoverProviderCapability, InitializeParams, InitializeResult,
    InitializedParams, MarkupContent, MarkupKind, Position, Range, ServerCapabilities, ServerInfo,
    TextDocumentItem, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
};
use tower_lsp::Client;

pub trait LspClient: Send + Sync + Clone + 'static {}
impl LspClient for Client {}

pub trait FeatureProvider: Send + Sync + 'static {
    fn completion(&self, document: &LineIndex, position: DescPosition) -> Vec<Suggestion>;
    fn hover(&self, document: &LineIndex, position: DescPosition) -> Option<HoverResult>;
}

#[derive(Default)]
pub struct DefaultFeatureProvider;

impl DefaultFeatureProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureProvider for DefaultFeatureProvider {
    fn completion(&self, document: &LineIndex, position: DescPosition) -> Vec<Suggestion> {
        completion_items(document, position)
    }

    fn hover(&self, document: &LineIndex, position: DescPosition) -> Option<HoverResult> {
        compute_hover(document, position)
    }
}

/// Runtime switches taken from [`DescConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub completion_enabled: bool,
    pub hover_enabled: bool,
    pub trigger_characters: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            completion_enabled: true,
            hover_enabled: true,
            trigger_characters: vec![":".to_string()],
        }
    }
}

impl From<&DescConfig> for ServerSettings {
    fn from(config: &DescConfig) -> Self {
        Self {
            completion_enabled: config.completion.enabled,
            hover_enabled: config.hover.enabled,
            trigger_characters: config.completion.trigger_characters.clone(),
        }
    }
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, Arc<LineIndex>>>,
}

impl DocumentStore {
    async fn upsert(&self, uri: Url, text: String) {
        let document = Arc::new(LineIndex::new(text));
        self.entries.write().await.insert(uri, document);
    }

    async fn get(&self, uri: &Url) -> Option<Arc<LineIndex>> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }
}

pub struct DescLanguageServer<C = Client, P = DefaultFeatureProvider> {
    _client: C,
    documents: DocumentStore,
    features: Arc<P>,
    settings: ServerSettings,
}

impl DescLanguageServer<Client, DefaultFeatureProvider> {
    pub fn new(client: Client) -> Self {
        Self::with_settings(client, ServerSettings::default())
    }

    pub fn with_settings(client: Client, settings: ServerSettings) -> Self {
        Self::with_features(client, Arc::new(DefaultFeatureProvider::new()), settings)
    }
}

impl<C, P> DescLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    pub fn with_features(client: C, features: Arc<P>, settings: ServerSettings) -> Self {
        Self {
            _client: client,
            documents: DocumentStore::default(),
            features,
            settings,
        }
    }

    async fn store(&self, uri: Url, text: String) {
        self.documents.upsert(uri, text).await;
    }

    async fn document(&self, uri: &Url) -> Option<Arc<LineIndex>> {
        self.documents.get(uri).await
    }
}

/// Character column for a UTF-16 offset into `line`, clamped to the line end.
fn utf16_to_char_column(line: &str, utf16: usize) -> usize {
    let mut units = 0;
    for (column, ch) in line.chars().enumerate() {
        if units >= utf16 {
            return column;
        }
        units += ch.len_utf16();
    }
    line.chars().count()
}

fn char_to_utf16_column(line: &str, column: usize) -> u32 {
    line.chars().take(column).map(char::len_utf16).sum::<usize>() as u32
}

fn from_lsp_position(document: &LineIndex, position: Position) -> DescPosition {
    let line = position.line as usize;
    let column = match document.line_text(line) {
        Some(text) => utf16_to_char_column(text, position.character as usize),
        None => position.character as usize,
    };
    DescPosition::new(line, column)
}

fn to_lsp_position(document: &LineIndex, position: DescPosition) -> Position {
    let character = match document.line_text(position.line) {
        Some(text) => char_to_utf16_column(text, position.column),
        None => position.column as u32,
    };
    Position::new(position.line as u32, character)
}

fn to_lsp_range(document: &LineIndex, range: &DescRange) -> Range {
    Range {
        start: to_lsp_position(document, range.start),
        end: to_lsp_position(document, range.end),
    }
}

fn to_completion_item(suggestion: Suggestion) -> CompletionItem {
    CompletionItem {
        label: suggestion.label,
        kind: Some(suggestion.kind.into()),
        detail: Some(suggestion.detail),
        documentation: suggestion.documentation.map(|value| {
            Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            })
        }),
        insert_text: suggestion.insert_text,
        ..CompletionItem::default()
    }
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for DescLanguageServer<C, P>
where
    C: LspClient,
    P: FeatureProvider,
{
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        let completion_provider = self.settings.completion_enabled.then(|| CompletionOptions {
            trigger_characters: Some(self.settings.trigger_characters.clone()),
            ..CompletionOptions::default()
        });
        let hover_provider = self
            .settings
            .hover_enabled
            .then_some(HoverProviderCapability::Simple(true));

        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            completion_provider,
            hover_provider,
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "desc-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!("desc language server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("desc language server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: lsp_types::DidOpenTextDocumentParams) {
        let TextDocumentItem { uri, text, .. } = params.text_document;
        tracing::debug!(%uri, "document opened");
        self.store(uri, text).await;
    }

    async fn did_change(&self, params: lsp_types::DidChangeTextDocumentParams) {
        if let Some(change) = params.content_changes.into_iter().last() {
            self.store(params.text_document.uri, change.text).await;
        }
    }

    async fn did_close(&self, params: lsp_types::DidCloseTextDocumentParams) {
        tracing::debug!(uri = %params.text_document.uri, "document closed");
        self.documents.remove(&params.text_document.uri).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        if !self.settings.completion_enabled {
            return Ok(None);
        }
        let uri = &params.text_document_position.text_document.uri;
        let Some(document) = self.document(uri).await else {
            tracing::warn!(%uri, "completion requested for unknown document");
            return Ok(None);
        };
        let position = from_lsp_position(&document, params.text_document_position.position);
        let items = self
            .features
            .completion(&document, position)
            .into_iter()
            .map(to_completion_item)
            .collect();
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        if !self.settings.hover_enabled {
            return Ok(None);
        }
        let uri = &params.text_document_position_params.text_document.uri;
        if let Some(document) = self.document(uri).await {
            let position = from_lsp_position(&document, params.text_document_position_params.position);
            if let Some(result) = self.features.hover(&document, position) {
                return Ok(Some(Hover {
                    contents: HoverContents::Markup(MarkupContent {
                        kind: MarkupKind::Markdown,
                        value: result.contents,
                    }),
                    range: Some(to_lsp_range(&document, &result.range)),
                }));
            }
        }
        Ok(None)
    }
}
