use crate::{
    error::{Result, SuitError},
    framework::{self, Framework},
};
use serde::Serialize;
use tantivy::{
    collector::TopDocs,
    query::QueryParser,
    schema::{Field, Schema, Value, STORED, STRING, TEXT},
    Index, IndexWriter, ReloadPolicy, TantivyDocument,
};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub score: f32,
}

// ---------------------------------------------------------------------------
// FrameworkIndex
// ---------------------------------------------------------------------------

struct Fields {
    id: Field,
    title: Field,
    body: Field,
}

pub struct FrameworkIndex {
    index: Index,
    reader: tantivy::IndexReader,
    fields: Fields,
}

impl FrameworkIndex {
    /// Build an ephemeral in-RAM index from the given frameworks.
    ///
    /// Indexed fields:
    /// - `id`:    STRING (exact-match, stored), e.g. `id:c4-model`
    /// - `title`: TEXT (tokenized, stored), primary full-text field
    /// - `body`:  TEXT (tokenized, not stored), id words + document content
    pub fn build(frameworks: &[Framework]) -> Result<Self> {
        let (schema, fields) = build_schema();

        let index = Index::create_in_ram(schema);

        let mut writer: IndexWriter = index
            .writer(15_000_000)
            .map_err(|e| SuitError::Search(e.to_string()))?;

        for f in frameworks {
            let mut doc = TantivyDocument::default();
            doc.add_text(fields.id, &f.id);
            doc.add_text(fields.title, &f.title);
            // Tokenized id so "driven" finds "domain-driven-design".
            let body = format!("{} {}", f.id.replace('-', " "), f.content);
            doc.add_text(fields.body, body);

            writer
                .add_document(doc)
                .map_err(|e| SuitError::Search(e.to_string()))?;
        }

        writer
            .commit()
            .map_err(|e| SuitError::Search(e.to_string()))?;

        // Manual reload: we only ever read after the single commit above
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e: tantivy::TantivyError| SuitError::Search(e.to_string()))?;

        Ok(Self {
            index,
            reader,
            fields,
        })
    }

    /// BM25 full-text search. Returns up to `limit` results sorted by score descending.
    ///
    /// Supported query syntax:
    /// - Bare terms: `ports adapters`      (AND by default)
    /// - Phrase:     `"bounded contexts"`
    /// - Boolean:    `events OR aggregates`, `layers NOT hexagonal`
    /// - Field scope: `title:twelve`, `id:c4-model`
    /// - Prefix:     `aggreg*`
    pub fn search(&self, query_str: &str, limit: usize) -> Result<Vec<SearchResult>> {
        if limit == 0 {
            return Ok(vec![]);
        }
        let searcher = self.reader.searcher();

        let default_fields = vec![self.fields.title, self.fields.body];
        let mut parser = QueryParser::for_index(&self.index, default_fields);
        parser.set_conjunction_by_default();

        let query = match parser.parse_query(query_str) {
            Ok(q) => q,
            Err(e) => {
                tracing::debug!(query = query_str, error = %e, "unparseable framework query");
                return Ok(vec![]);
            }
        };

        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(limit))
            .map_err(|e| SuitError::Search(e.to_string()))?;

        let mut results = Vec::with_capacity(top_docs.len());
        for (score, doc_addr) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(doc_addr)
                .map_err(|e| SuitError::Search(e.to_string()))?;

            let id = doc
                .get_first(self.fields.id)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let title = doc
                .get_first(self.fields.title)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            results.push(SearchResult { id, title, score });
        }

        Ok(results)
    }
}

/// Search the bundled framework library.
pub fn search_frameworks(query: &str, limit: usize) -> Result<Vec<SearchResult>> {
    let index = FrameworkIndex::build(&framework::list())?;
    index.search(query, limit)
}

fn build_schema() -> (Schema, Fields) {
    let mut builder = Schema::builder();

    let id = builder.add_text_field("id", STRING | STORED);
    let title = builder.add_text_field("title", TEXT | STORED);
    let body = builder.add_text_field("body", TEXT);

    let schema = builder.build();
    let fields = Fields { id, title, body };
    (schema, fields)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
