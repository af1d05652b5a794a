use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Geographic bounding rectangle in degrees. The serde derive is the JSON form
/// (`minlat`, `minlon`, `maxlat`, `maxlon`); the XML form lives on the changeset attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct BoundsBox {
    pub minlat: f64,
    pub minlon: f64,
    pub maxlat: f64,
    pub maxlon: f64,
}

/// Attribute that [`BoundsBox::maxlon`] is read from when decoding XML.
///
/// Some clients of the API read `maxlon` from `max_lat`, so their boxes have the maximum
/// latitude mirrored into the maximum longitude. `MaxLat` reproduces that reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MaxLonAttribute {
    #[default]
    MaxLon,
    MaxLat,
}

impl BoundsBox {
    pub fn from_attributes(
        min_lat: f64,
        min_lon: f64,
        max_lat: f64,
        max_lon: f64,
        source: MaxLonAttribute,
    ) -> Self {
        BoundsBox {
            minlat: min_lat,
            minlon: min_lon,
            maxlat: max_lat,
            maxlon: match source {
                MaxLonAttribute::MaxLon => max_lon,
                MaxLonAttribute::MaxLat => max_lat,
            },
        }
    }

    /// Read the `min_lat`, `min_lon`, `max_lat` and `max_lon` attributes of any element,
    /// typically a `<changeset>`. Missing attributes read as zero.
    pub fn from_xml_attributes(xml: &str, source: MaxLonAttribute) -> Result<Self> {
        let attributes: BoundsAttributes =
            quick_xml::de::from_str(xml).map_err(|err| Error::from_de("bounds", err))?;
        Ok(BoundsBox::from_attributes(
            attributes.min_lat,
            attributes.min_lon,
            attributes.max_lat,
            attributes.max_lon,
            source,
        ))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Deserialize)]
struct BoundsAttributes {
    #[serde(rename = "@min_lat", default)]
    min_lat: f64,
    #[serde(rename = "@min_lon", default)]
    min_lon: f64,
    #[serde(rename = "@max_lat", default)]
    max_lat: f64,
    #[serde(rename = "@max_lon", default)]
    max_lon: f64,
}
