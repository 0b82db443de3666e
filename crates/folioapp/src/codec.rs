//! # Page Records
//!
//! The page collection travels as one JSON array, both in the local storage blob
//! and in the remote backup file:
//!
//! ```text
//! [
//!   {
//!     "id": "18f3a2c01b2-4e1f0a9c",
//!     "title": "Groceries",
//!     "content": "milk\neggs",
//!     "blocks": [{"id": "b-...", "type": "paragraph", "text": "milk", "checked": false}],
//!     "updatedAt": "2024-05-01T10:00:00.123456Z",
//!     "isFavorite": false,
//!     "parentId": null
//!   }
//! ]
//! ```
//!
//! There is no schema version. Decoding is explicit and per field: every record
//! either becomes a fully populated [`Page`] or the whole decode fails. Only a
//! missing `id` is fatal; every other field falls back to a default.
//!
//! Records written before block editing carry only `content`; records written
//! by block-only clients carry only `blocks`. The missing half is derived (see
//! [`blocks_from_content`] and [`content_from_blocks`]).

use crate::error::{FolioError, Result};
use crate::model::{
    blocks_from_content, content_from_blocks, normalize_title, Block, BlockType, Page,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageRecord<'a> {
    id: &'a str,
    title: &'a str,
    content: &'a str,
    blocks: &'a [Block],
    updated_at: DateTime<Utc>,
    is_favorite: bool,
    parent_id: Option<&'a str>,
}

impl<'a> From<&'a Page> for PageRecord<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            id: &page.id,
            title: &page.title,
            content: &page.content,
            blocks: &page.blocks,
            updated_at: page.updated_at,
            is_favorite: page.is_favorite,
            parent_id: page.parent_id.as_deref(),
        }
    }
}

/// Encodes the full collection as one JSON array.
pub fn encode_pages(pages: &[Page]) -> Result<String> {
    let records: Vec<PageRecord<'_>> = pages.iter().map(PageRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(FolioError::Serialization)
}

/// Decodes a JSON array of page records.
pub fn decode_pages(raw: &str) -> Result<Vec<Page>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| FolioError::Decode(format!("invalid JSON: {}", e)))?;
    let records = value
        .as_array()
        .ok_or_else(|| FolioError::Decode("expected a JSON array of pages".to_string()))?;

    records
        .iter()
        .enumerate()
        .map(|(position, record)| decode_page(record, position))
        .collect()
}

fn decode_page(record: &Value, position: usize) -> Result<Page> {
    let fields = record
        .as_object()
        .ok_or_else(|| FolioError::Decode(format!("record {} is not an object", position)))?;

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => {
            return Err(FolioError::Decode(format!(
                "record {} has no id",
                position
            )))
        }
    };

    let title = normalize_title(fields.get("title").and_then(Value::as_str).unwrap_or(""));
    let content = fields.get("content").and_then(Value::as_str);
    let blocks = fields.get("blocks").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_object)
            .map(decode_block)
            .collect::<Vec<Block>>()
    });

    let (content, blocks) = match (content, blocks) {
        (Some(content), Some(blocks)) => (content.to_string(), blocks),
        (Some(content), None) => (content.to_string(), blocks_from_content(content)),
        (None, Some(blocks)) => (content_from_blocks(&blocks), blocks),
        (None, None) => (String::new(), blocks_from_content("")),
    };

    let updated_at = match fields.get("updatedAt").and_then(Value::as_str) {
        Some(stamp) => parse_timestamp(stamp).unwrap_or_else(|| {
            tracing::debug!(page = %id, stamp, "unparsable updatedAt, using now");
            Utc::now()
        }),
        None => Utc::now(),
    };

    Ok(Page {
        id,
        title,
        content,
        blocks,
        updated_at,
        is_favorite: fields
            .get("isFavorite")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        parent_id: fields
            .get("parentId")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn decode_block(fields: &Map<String, Value>) -> Block {
    let kind = BlockType::from_tag(fields.get("type").and_then(Value::as_str).unwrap_or(""));
    let text = fields.get("text").and_then(Value::as_str).unwrap_or("");
    let mut block = Block::new(kind, text);
    if let Some(id) = fields.get("id").and_then(Value::as_str) {
        block.id = id.to_string();
    }
    block.checked = fields
        .get("checked")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    block.tone = fields
        .get("tone")
        .and_then(Value::as_str)
        .map(str::to_string);
    block
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
