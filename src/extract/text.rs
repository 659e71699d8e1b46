use crate::document::Document;
use crate::extract::Record;

/// Extracts the trimmed text of every element matching each tag, tag by tag
///
/// Empty text is recorded as an empty string.
pub fn extract_tags(document: &Document, tags: &[String]) -> Vec<Record> {
    tags.iter()
        .flat_map(|tag| {
            document.find_all(tag).into_iter().map(move |element| Record::Tag {
                name: tag.clone(),
                text: element.text(),
            })
        })
        .collect()
}

/// Extracts every `<meta>` as a name/content pair
pub fn extract_meta(document: &Document) -> Vec<Record> {
    document
        .find_all("meta")
        .into_iter()
        .map(|meta| Record::Meta {
            name: meta.attr("name").map(str::to_string),
            content: meta.attr("content").map(str::to_string),
        })
        .collect()
}
