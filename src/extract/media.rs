use crate::document::{Document, Element};
use crate::extract::Record;

/// Extracts the `src` of every `<img>` that has one
pub fn extract_images(document: &Document) -> Vec<Record> {
    document
        .find_all("img")
        .into_iter()
        .filter_map(|img| img.attr("src"))
        .map(|src| Record::Image {
            src: src.to_string(),
        })
        .collect()
}

/// Extracts the sources of every `<video>`
pub fn extract_video(document: &Document) -> Vec<Record> {
    media_sources(document, "video")
        .into_iter()
        .map(|src| Record::Video { src })
        .collect()
}

/// Extracts the sources of every `<audio>`
pub fn extract_audio(document: &Document) -> Vec<Record> {
    media_sources(document, "audio")
        .into_iter()
        .map(|src| Record::Audio { src })
        .collect()
}

/// The element's own `src`, or else the `src` of each nested `<source>`
fn media_sources(document: &Document, tag: &str) -> Vec<String> {
    document
        .find_all(tag)
        .into_iter()
        .flat_map(|element| element_sources(&element))
        .collect()
}

fn element_sources(element: &Element<'_>) -> Vec<String> {
    if let Some(src) = element.attr("src") {
        return vec![src.to_string()];
    }

    element
        .find_all("source[src]")
        .into_iter()
        .filter_map(|source| source.attr("src"))
        .map(str::to_string)
        .collect()
}
