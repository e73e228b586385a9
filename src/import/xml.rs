//! Genres from XML.
use super::{finish_import, read_file, ImportSummary, Parsed};
use crate::db::models::genre::{NewGenre, TxManager as _};
use crate::db::DatabaseConnection;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;

/// A `<genre>` element being read.
#[derive(Default)]
struct OpenGenre {
    position: usize,
    depth: usize,
    attribute: Option<String>,
    text: String,
    text_done: bool,
}

impl OpenGenre {
    fn from_start(
        element: &BytesStart<'_>,
        position: usize,
        depth: usize,
    ) -> anyhow::Result<Self> {
        let mut genre = Self {
            position,
            depth,
            ..Self::default()
        };
        for attr in element.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == b"name" {
                let value = attr.unescape_value()?;
                let value = value.trim();
                if !value.is_empty() {
                    genre.attribute = Some(value.to_owned());
                }
            }
        }
        Ok(genre)
    }

    fn into_genre(self) -> Option<NewGenre> {
        let name = self.attribute.or_else(|| {
            let text = self.text.trim();
            (!text.is_empty()).then(|| text.to_owned())
        })?;
        Some(NewGenre { name })
    }
}

/// Parse every `<genre>` element of an XML document, at any depth.
///
/// The name is the `name` attribute when it is not blank, otherwise the
/// trimmed text that precedes the element's first child. Nested genres are
/// each parsed on their own. Elements with neither are skipped and reported
/// by their 1-based position among `<genre>` elements, in document order.
///
/// # Errors
/// Errors if the document is not well-formed XML, including documents that
/// end with elements still open.
pub fn parse_genres(contents: &str) -> anyhow::Result<Parsed<NewGenre>> {
    let mut reader = Reader::from_str(contents);
    reader.check_end_names(true);
    let mut buf = Vec::new();
    let mut position = 0;
    let mut depth = 0_usize;
    let mut open: Vec<OpenGenre> = Vec::new();
    let mut closed: Vec<(usize, Option<NewGenre>)> = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                end_text(&mut open, depth);
                depth += 1;
                if e.local_name().as_ref() == b"genre" {
                    position += 1;
                    open.push(OpenGenre::from_start(&e, position, depth)?);
                }
            }
            Event::Empty(e) => {
                end_text(&mut open, depth);
                if e.local_name().as_ref() == b"genre" {
                    position += 1;
                    let genre = OpenGenre::from_start(&e, position, depth)?;
                    closed.push((position, genre.into_genre()));
                }
            }
            Event::Text(e) => {
                if let Some(genre) = text_target(&mut open, depth) {
                    genre.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(genre) = text_target(&mut open, depth) {
                    genre.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"genre"
                    && open.last().is_some_and(|genre| genre.depth == depth)
                {
                    if let Some(genre) = open.pop() {
                        closed.push((genre.position, genre.into_genre()));
                    }
                }
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| anyhow::anyhow!("Unexpected closing tag in XML"))?;
            }
            Event::Eof => break,
            _ => (),
        }
        buf.clear();
    }
    if depth != 0 || !open.is_empty() {
        anyhow::bail!("XML document ended with {depth} unclosed element(s)");
    }
    closed.sort_by_key(|&(position, _)| position);
    let mut parsed = Parsed::default();
    for (position, genre) in closed {
        match genre {
            Some(genre) => parsed.records.push(genre),
            None => parsed.skipped.push(position),
        }
    }
    Ok(parsed)
}

/// The open genre whose own text is being read at `depth`, if any.
fn text_target(open: &mut [OpenGenre], depth: usize) -> Option<&mut OpenGenre> {
    open.last_mut()
        .filter(|genre| genre.depth == depth && !genre.text_done)
}

/// A child element ends the text of the genre directly enclosing it.
fn end_text(open: &mut [OpenGenre], depth: usize) {
    if let Some(genre) = text_target(open, depth) {
        genre.text_done = true;
    }
}

/// Import genres from an XML file in one transaction.
///
/// # Errors
/// Errors if the file cannot be read or parsed, or the insert fails. Nothing
/// is imported then.
pub async fn import_genres(conn: &DatabaseConnection, path: &Path) -> anyhow::Result<ImportSummary> {
    let parsed = parse_genres(&read_file(path)?)?;
    let summary = ImportSummary {
        inserted: parsed.records.len(),
        skipped: parsed.skipped,
    };
    let mut tx = conn.begin().await?;
    let outcome = tx.insert_bulk(parsed.records).await;
    finish_import(tx, "genres", outcome, summary).await
}
