//! Atom feed parsing

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use trendpost_domain::{FeedEntry, FeedError};

/// Parse the `entry` elements of an Atom document, in document order.
///
/// The root element must be `feed` and it must contain at least one `entry`.
/// Only the direct `title` and `published` children of an entry are read;
/// entries whose `published` timestamp is missing or not RFC 3339 are skipped.
pub fn parse_atom_entries(xml: &str) -> Result<Vec<FeedEntry>, FeedError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut saw_feed = false;
    let mut entry_count = 0usize;
    let mut current: Option<EntryBuilder> = None;
    let mut entries = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);

                if path.is_empty() {
                    if name != "feed" {
                        return Err(FeedError::MissingElement("feed"));
                    }
                    saw_feed = true;
                } else if path.len() == 1 && name == "entry" {
                    entry_count += 1;
                    current = Some(EntryBuilder::default());
                }

                path.push(name);
            }
            Ok(Event::Empty(e)) => {
                let name = local_name(&e);

                if path.is_empty() {
                    if name != "feed" {
                        return Err(FeedError::MissingElement("feed"));
                    }
                    saw_feed = true;
                } else if path.len() == 1 && name == "entry" {
                    entry_count += 1;
                    tracing::debug!("Skipping empty feed entry");
                }
            }
            Ok(Event::End(_)) => {
                let name = path.pop();

                if path.len() == 1 && name.as_deref() == Some("entry") {
                    if let Some(entry) = current.take().and_then(EntryBuilder::build) {
                        entries.push(entry);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| FeedError::Parse(e.to_string()))?;
                append_text(&path, current.as_mut(), &text)?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_text(&path, current.as_mut(), &text)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FeedError::Parse(format!(
                    "{} at position {}",
                    e,
                    reader.error_position()
                )));
            }
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(FeedError::Parse(format!(
            "unexpected end of document inside <{}>",
            path.join("><")
        )));
    }

    if !saw_feed {
        return Err(FeedError::MissingElement("feed"));
    }

    if entry_count == 0 {
        return Err(FeedError::MissingElement("entry"));
    }

    Ok(entries)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn append_text(
    path: &[String],
    entry: Option<&mut EntryBuilder>,
    text: &str,
) -> Result<(), FeedError> {
    if path.is_empty() {
        return Err(FeedError::Parse(
            "text content outside of the root element".to_string(),
        ));
    }

    // feed > entry > field
    if path.len() != 3 {
        return Ok(());
    }

    if let Some(entry) = entry {
        match path[2].as_str() {
            "title" => entry.title.push_str(text),
            "published" => entry.published.push_str(text),
            _ => {}
        }
    }

    Ok(())
}

#[derive(Default)]
struct EntryBuilder {
    title: String,
    published: String,
}

impl EntryBuilder {
    fn build(self) -> Option<FeedEntry> {
        match OffsetDateTime::parse(self.published.trim(), &Rfc3339) {
            Ok(published_at) => Some(FeedEntry {
                title: self.title,
                published_at,
            }),
            Err(e) => {
                tracing::debug!(
                    title = %self.title,
                    published = %self.published,
                    error = %e,
                    "Skipping entry without a valid published timestamp"
                );
                None
            }
        }
    }
}
