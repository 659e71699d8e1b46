use serde::{Deserialize, Serialize};

/// One unit of extracted data
///
/// Serializes externally tagged, so every JSON object has a single field named
/// after the variant:
///
/// ```
/// use skraper::extract::Record;
///
/// let record = Record::Image { src: "x.png".to_string() };
/// let json = serde_json::to_string(&record).unwrap();
/// assert_eq!(json, r#"{"image":{"src":"x.png"}}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Record {
    /// Trimmed text of an element selected by tag name
    Tag { name: String, text: String },

    /// `src` of an `<img>`
    Image { src: String },

    /// `src` of a `<video>` or one of its `<source>` children
    Video { src: String },

    /// `src` of an `<audio>` or one of its `<source>` children
    Audio { src: String },

    /// `name`/`content` pair of a `<meta>`; either may be absent
    Meta {
        name: Option<String>,
        content: Option<String>,
    },

    /// One body row of a table, with the header cells of that table
    TableRow {
        headers: Vec<String>,
        cells: Vec<String>,
    },
}

impl Record {
    /// Variant tag, as used in the JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tag { .. } => "tag",
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
            Self::Audio { .. } => "audio",
            Self::Meta { .. } => "meta",
            Self::TableRow { .. } => "table_row",
        }
    }

    /// Column names for tabular output
    ///
    /// Table rows use their table's header cells, padded with `column_N`
    /// where the row is wider than the header.
    pub fn field_names(&self) -> Vec<String> {
        match self {
            Self::Tag { .. } => vec!["name".to_string(), "text".to_string()],
            Self::Image { .. } | Self::Video { .. } | Self::Audio { .. } => {
                vec!["src".to_string()]
            }
            Self::Meta { .. } => vec!["name".to_string(), "content".to_string()],
            Self::TableRow { headers, cells } => (0..headers.len().max(cells.len()))
                .map(|i| match headers.get(i) {
                    Some(header) => header.clone(),
                    None => format!("column_{}", i + 1),
                })
                .collect(),
        }
    }

    /// Cell values for tabular output, aligned with [`Record::field_names`]
    pub fn values(&self) -> Vec<String> {
        match self {
            Self::Tag { name, text } => vec![name.clone(), text.clone()],
            Self::Image { src } | Self::Video { src } | Self::Audio { src } => vec![src.clone()],
            Self::Meta { name, content } => vec![
                name.clone().unwrap_or_default(),
                content.clone().unwrap_or_default(),
            ],
            Self::TableRow { cells, .. } => cells.clone(),
        }
    }
}

/// Ordered, append-only collection of records
///
/// Never deduplicated. Serializes as a plain array of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl ResultSet {
    /// Creates an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records, preserving their order after everything already held
    pub fn append<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl From<Vec<Record>> for ResultSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
