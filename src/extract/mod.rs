//! Extraction passes over a parsed document
//!
//! Every extractor is a pure function from a [`Document`] to an ordered list
//! of one kind of [`Record`]. Extractors never fail: a document without
//! matches simply yields nothing. Results are accumulated in a [`ResultSet`]
//! by the caller.

mod media;
mod record;
mod table;
mod text;

pub use media::{extract_audio, extract_images, extract_video};
pub use record::{Record, ResultSet};
pub use table::extract_tables;
pub use text::{extract_meta, extract_tags};

use crate::document::Document;
use std::fmt;

/// A requested extraction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Text of the given tags
    Tags(Vec<String>),
    Images,
    Video,
    Audio,
    Meta,
    Tables,
}

impl Extraction {
    /// Runs this pass over `document`
    ///
    /// # Example
    ///
    /// ```
    /// use skraper::document::Document;
    /// use skraper::extract::Extraction;
    ///
    /// let doc = Document::from_html(r#"<img src="a.png"><img>"#);
    /// assert_eq!(Extraction::Images.apply(&doc).len(), 1);
    /// ```
    pub fn apply(&self, document: &Document) -> Vec<Record> {
        match self {
            Self::Tags(tags) => extract_tags(document, tags),
            Self::Images => extract_images(document),
            Self::Video => extract_video(document),
            Self::Audio => extract_audio(document),
            Self::Meta => extract_meta(document),
            Self::Tables => extract_tables(document),
        }
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tags(tags) => write!(f, "tags [{}]", tags.join(", ")),
            Self::Images => f.write_str("images"),
            Self::Video => f.write_str("video"),
            Self::Audio => f.write_str("audio"),
            Self::Meta => f.write_str("meta"),
            Self::Tables => f.write_str("tables"),
        }
    }
}
