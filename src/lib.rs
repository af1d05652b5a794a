//! Typed model of the XML documents served by the OpenStreetMap API 0.6: changeset lists,
//! `osmChange` documents, element histories and the elements themselves.
//!
//! Decoding and encoding go through [`codec::decode`] and [`codec::encode`], which check the
//! root element and hand the rest to quick-xml's serde support.

pub mod codec;
pub mod data;
pub mod errors;

pub use codec::{decode, decode_reader, encode, OsmDocument};
pub use errors::{Error, Result};
