mod defaults;

pub use defaults::initial_houses;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing model values from user input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unknown status '{0}' (expected traffic, highlight, catalog or sold)")]
    UnknownStatus(String),

    #[error("Unknown media kind '{0}' (expected image or video)")]
    UnknownMediaKind(String),
}

/// Pipeline stage a listing occupies on the board
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Priority listings for paid campaigns
    Traffic,
    /// Premium visual production (reels, stories)
    Highlight,
    /// Available in the general portfolio
    #[default]
    Catalog,
    /// Sold or archived
    Sold,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Traffic,
        Status::Highlight,
        Status::Catalog,
        Status::Sold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Traffic => "traffic",
            Status::Highlight => "highlight",
            Status::Catalog => "catalog",
            Status::Sold => "sold",
        }
    }

    /// Board column describing this status
    pub fn column(&self) -> &'static Column {
        COLUMNS
            .iter()
            .find(|c| c.status == *self)
            .unwrap_or(&COLUMNS[2])
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "traffic" => Ok(Status::Traffic),
            "highlight" => Ok(Status::Highlight),
            "catalog" => Ok(Status::Catalog),
            "sold" => Ok(Status::Sold),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// Kind of a gallery attachment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => f.write_str("image"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(ModelError::UnknownMediaKind(s.to_string())),
        }
    }
}

/// One gallery attachment on a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub id: String,
    /// URI or embedded data reference
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

impl MediaItem {
    /// Create a media item with a freshly generated id
    pub fn new(url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            kind,
        }
    }
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: String,
    pub name: String,
    /// Display price, already formatted (e.g. "R$ 950.000")
    pub price: String,
    pub description: String,
    pub address: String,
    pub cover_image: String,
    pub status: Status,
    #[serde(default)]
    pub gallery: Vec<MediaItem>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl House {
    /// Features joined the way the description prompt expects them
    pub fn feature_text(&self) -> String {
        self.features.join(", ")
    }
}

/// Static display metadata for one board column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub status: Status,
    pub title: &'static str,
    pub description: &'static str,
}

/// The four board columns, in display order
pub static COLUMNS: [Column; 4] = [
    Column {
        status: Status::Traffic,
        title: "Paid Traffic",
        description: "Priority listings for campaigns.",
    },
    Column {
        status: Status::Highlight,
        title: "Premium Highlight",
        description: "Visual production for reels and stories.",
    },
    Column {
        status: Status::Catalog,
        title: "General Catalog",
        description: "Available in the portfolio.",
    },
    Column {
        status: Status::Sold,
        title: "Sold",
        description: "Negotiated or archived.",
    },
];
