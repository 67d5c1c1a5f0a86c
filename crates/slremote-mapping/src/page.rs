//! Pages, subpage areas and subpages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubPageAreaId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubPageId(pub(crate) usize);

impl PageId {
    /// Registration position.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl SubPageAreaId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl SubPageId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed text shown on a screen while its page or subpage is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLabel {
    pub column: u8,
    pub field: u8,
    pub text: String,
}

impl DisplayLabel {
    pub fn new(column: u8, field: u8, text: impl Into<String>) -> Self {
        Self {
            column,
            field,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub(crate) name: String,
    pub(crate) areas: Vec<SubPageAreaId>,
    pub(crate) labels: Vec<DisplayLabel>,
}

impl Page {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn areas(&self) -> &[SubPageAreaId] {
        &self.areas
    }

    pub fn labels(&self) -> &[DisplayLabel] {
        &self.labels
    }
}

/// A group of mutually exclusive subpages within one page.
#[derive(Debug, Clone)]
pub struct SubPageArea {
    pub(crate) name: String,
    pub(crate) page: PageId,
    pub(crate) sub_pages: Vec<SubPageId>,
}

impl SubPageArea {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn sub_pages(&self) -> &[SubPageId] {
        &self.sub_pages
    }
}

#[derive(Debug, Clone)]
pub struct SubPage {
    pub(crate) name: String,
    pub(crate) area: SubPageAreaId,
    pub(crate) labels: Vec<DisplayLabel>,
}

impl SubPage {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> SubPageAreaId {
        self.area
    }

    pub fn labels(&self) -> &[DisplayLabel] {
        &self.labels
    }
}
