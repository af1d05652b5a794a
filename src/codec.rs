use std::io::{BufRead, Read};

use log::debug;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::data::BoundsBox;
use crate::errors::{Error, Result};

/// A value that is exchanged with the API as a whole XML document.
pub trait OsmDocument: DeserializeOwned + Serialize {
    /// Name of the root element.
    const ROOT: &'static str;

    /// Bounding boxes carried by the document, in document order.
    fn bounds(&self) -> Vec<BoundsBox> {
        Vec::new()
    }
}

/// Name of the first element in `xml`, skipping the declaration, comments and whitespace.
fn root_name(xml: &str) -> std::result::Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(Some(String::from_utf8_lossy(e.name().as_ref()).into_owned()))
            }
            Event::Eof => return Ok(None),
            _ => (),
        }
    }
}

/// Decode a whole document. Fails with [`Error::StructuralMismatch`] when the root element is
/// not `T::ROOT` or the content does not fit the shape of `T`.
pub fn decode<T: OsmDocument>(xml: &str) -> Result<T> {
    match root_name(xml).map_err(|err| Error::mismatch(T::ROOT, err.to_string()))? {
        Some(name) if name == T::ROOT => (),
        Some(name) => return Err(Error::mismatch(T::ROOT, format!("unexpected root element <{name}>"))),
        None => return Err(Error::mismatch(T::ROOT, "document has no root element")),
    }

    debug!(root = T::ROOT, len = xml.len(); "Decoding document");
    quick_xml::de::from_str(xml).map_err(|err| Error::from_de(T::ROOT, err))
}

pub fn decode_reader<T: OsmDocument, R: BufRead>(mut read: R) -> Result<T> {
    let mut xml = String::new();
    read.read_to_string(&mut xml)?;
    decode(&xml)
}

/// Encode a document with `T::ROOT` as its root element.
pub fn encode<T: OsmDocument>(document: &T) -> Result<String> {
    debug!(root = T::ROOT; "Encoding document");
    quick_xml::se::to_string_with_root(T::ROOT, document).map_err(|err| Error::from_se(T::ROOT, err))
}
