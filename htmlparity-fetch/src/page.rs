use serde::{Deserialize, Serialize};

/// Kind of a content block, as tagged by the page API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Page,
    Text,
    Header,
    SubHeader,
    SubSubHeader,
    BulletedList,
    NumberedList,
    ToDo,
    Quote,
    Code,
    Divider,
    Toggle,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            children: Vec::new(),
            language: None,
            checked: false,
        }
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }
}

/// One fetched page. The root block is always of kind `page`; its children
/// are the page content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTree {
    pub root: Block,
}

impl PageTree {
    pub fn new(root: Block) -> Self {
        Self { root }
    }

    pub fn id(&self) -> &str {
        &self.root.id
    }

    pub fn title(&self) -> &str {
        &self.root.title
    }

    /// Raw ids of every sub-page referenced from this page, in document order.
    ///
    /// A sub-page's own content is not searched; it belongs to that page.
    /// Duplicates are kept.
    pub fn sub_pages(&self) -> Vec<String> {
        let mut ids = Vec::new();
        collect_sub_pages(&self.root.children, &mut ids);
        ids
    }
}

fn collect_sub_pages(blocks: &[Block], ids: &mut Vec<String>) {
    for block in blocks {
        if block.kind == BlockKind::Page {
            ids.push(block.id.clone());
            continue;
        }
        collect_sub_pages(&block.children, ids);
    }
}
