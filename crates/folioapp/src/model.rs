use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TITLE: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    Paragraph,
    Heading,
    Todo,
    Code,
}

impl BlockType {
    /// Unknown tags fall back to a paragraph.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "heading" => BlockType::Heading,
            "todo" => BlockType::Todo,
            "code" => BlockType::Code,
            _ => BlockType::Paragraph,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockType,
    pub text: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl Block {
    pub fn new(kind: BlockType, text: impl Into<String>) -> Self {
        Self {
            id: new_block_id(),
            kind,
            text: text.into(),
            checked: false,
            tone: None,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockType::Paragraph, text)
    }

    /// The markdown fragment this block stands for in a content string.
    pub fn to_markdown(&self) -> String {
        match self.kind {
            BlockType::Heading => format!("# {}", self.text),
            BlockType::Todo if self.checked => format!("- [x] {}", self.text),
            BlockType::Todo => format!("- [ ] {}", self.text),
            BlockType::Code => format!("```\n{}\n```", self.text),
            BlockType::Paragraph => self.text.clone(),
        }
    }
}

/// One note. `content` and `blocks` describe the same body; edits to one
/// re-derive the other through [`blocks_from_content`] / [`content_from_blocks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub content: String,
    pub blocks: Vec<Block>,
    pub updated_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub parent_id: Option<String>,
}

impl Page {
    pub fn new(parent_id: Option<String>) -> Self {
        Self {
            id: new_page_id(),
            title: DEFAULT_TITLE.to_string(),
            content: String::new(),
            blocks: blocks_from_content(""),
            updated_at: Utc::now(),
            is_favorite: false,
            parent_id,
        }
    }

    /// Bumps `updated_at` to now, or 1 ms past its current value when the
    /// clock has not moved past it.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::milliseconds(1)
        };
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = normalize_title(title);
    }

    pub fn set_content(&mut self, content: String) {
        self.blocks = blocks_from_content(&content);
        self.content = content;
    }

    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.content = content_from_blocks(&blocks);
        self.blocks = blocks;
    }

    /// Content plus every block's text, used for search.
    pub fn flattened_text(&self) -> String {
        let mut text = self.content.clone();
        for block in &self.blocks {
            text.push('\n');
            text.push_str(&block.text);
        }
        text
    }

    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.flattened_text().to_lowercase().contains(needle_lower)
    }
}

/// A committed change coming from the editor. Absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct PagePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub blocks: Option<Vec<Block>>,
}

impl PagePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = Some(blocks);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.blocks.is_none()
    }
}

pub fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One paragraph block per line. Empty content yields a single empty paragraph.
pub fn blocks_from_content(content: &str) -> Vec<Block> {
    content
        .split('\n')
        .map(|line| Block::paragraph(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Rebuilds a markdown content string, each block followed by a blank line.
pub fn content_from_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&block.to_markdown());
        out.push_str("\n\n");
    }
    out.trim().to_string()
}

/// Millisecond timestamp in hex plus a short random suffix.
pub fn new_page_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{:x}-{}", millis, &suffix[..8])
}

fn new_block_id() -> String {
    format!("b-{}", &Uuid::new_v4().simple().to_string()[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_become_untitled() {
        assert_eq!(normalize_title(""), "Untitled");
        assert_eq!(normalize_title("   \t "), "Untitled");
        assert_eq!(normalize_title("  Plans "), "Plans");
    }

    #[test]
    fn new_page_has_defaults() {
        let page = Page::new(None);
        assert_eq!(page.title, "Untitled");
        assert_eq!(page.content, "");
        assert_eq!(page.blocks.len(), 1);
        assert_eq!(page.blocks[0].kind, BlockType::Paragraph);
        assert!(!page.is_favorite);
        assert!(page.parent_id.is_none());
    }

    #[test]
    fn page_ids_are_distinct() {
        let a = new_page_id();
        let b = new_page_id();
        assert_ne!(a, b);
    }

    #[test]
    fn touch_always_advances() {
        let mut page = Page::new(None);
        let before = page.updated_at;
        page.touch();
        assert!(page.updated_at > before);
        let second = page.updated_at;
        page.touch();
        assert!(page.updated_at > second);
    }

    #[test]
    fn touch_past_a_future_timestamp_adds_one_milli() {
        let mut page = Page::new(None);
        let ahead = Utc::now() + TimeDelta::hours(1);
        page.updated_at = ahead;
        page.touch();
        assert_eq!(page.updated_at, ahead + TimeDelta::milliseconds(1));
    }

    #[test]
    fn content_splits_into_paragraph_lines() {
        let blocks = blocks_from_content("one\ntwo\r\n\nfour");
        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "", "four"]);
        assert!(blocks.iter().all(|b| b.kind == BlockType::Paragraph));
    }

    #[test]
    fn empty_content_is_one_empty_paragraph() {
        let blocks = blocks_from_content("");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "");
    }

    #[test]
    fn blocks_render_to_markdown() {
        let mut done = Block::new(BlockType::Todo, "ship it");
        done.checked = true;
        let blocks = vec![
            Block::new(BlockType::Heading, "Title"),
            Block::paragraph("body"),
            Block::new(BlockType::Todo, "write tests"),
            done,
            Block::new(BlockType::Code, "let x = 1;"),
        ];
        assert_eq!(
            content_from_blocks(&blocks),
            "# Title\n\nbody\n\n- [ ] write tests\n\n- [x] ship it\n\n```\nlet x = 1;\n```"
        );
    }

    #[test]
    fn setting_blocks_rederives_content() {
        let mut page = Page::new(None);
        page.set_blocks(vec![Block::new(BlockType::Heading, "Hi")]);
        assert_eq!(page.content, "# Hi");

        page.set_content("a\nb".to_string());
        assert_eq!(page.blocks.len(), 2);
    }

    #[test]
    fn search_matches_block_text() {
        let mut page = Page::new(None);
        page.title = "Errands".to_string();
        page.blocks = vec![Block::new(BlockType::Todo, "Buy MILK")];
        assert!(page.matches("milk"));
        assert!(page.matches("rand"));
        assert!(!page.matches("bread"));
    }
}
