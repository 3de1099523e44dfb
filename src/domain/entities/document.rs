use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub chunk_index: usize,
    pub metadata: ChunkMetadata,
}

impl DocumentChunk {
    pub fn new(document_id: Uuid, content: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            content: content.into(),
            chunk_index,
            metadata: ChunkMetadata::default(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub source: Option<String>,
}

/// A retrieved chunk and its similarity to the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: DocumentChunk,
    pub score: f32,
}

impl SearchResult {
    pub fn page_content(&self) -> &str {
        &self.chunk.content
    }
}

/// Splits content into chunks by paragraph boundaries.
///
/// Paragraphs are joined until they exceed `chunk_size`, then a new chunk starts.
/// Each chunk is assigned a sequential index starting from 0.
pub fn chunk_content(document: &Document, content: &str, chunk_size: usize) -> Vec<DocumentChunk> {
    let paragraphs = content
        .split("\n\n")
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut chunks = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, chunks: &mut Vec<DocumentChunk>| {
        let index = chunks.len();
        chunks.push(
            DocumentChunk::new(document.id, current.as_str(), index).with_source(&document.name),
        );
        current.clear();
    };

    for paragraph in paragraphs {
        if !current.is_empty() && current.len() + paragraph.len() + 2 > chunk_size {
            flush(&mut current, &mut chunks);
        }

        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(paragraph);
    }

    if !current.is_empty() {
        flush(&mut current, &mut chunks);
    }

    chunks
}
