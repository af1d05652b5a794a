use serde::{Deserialize, Serialize};

use crate::codec::OsmDocument;

use super::osm::{Node, Relation, Way};

/// Licensing and generator metadata the API puts on the `<osm>` root of list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributionBasicInfo {
    pub version: String,
    pub generator: String,
    pub copyright: String,
    pub attribution: String,
    pub license: String,
}

/// Every version of one element, as returned by `/api/0.6/{node|way|relation}/{id}/history`.
/// Versions are kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "HistoryWire", into = "HistoryWire")]
pub struct History {
    pub nodes: Vec<Node>,
    pub ways: Vec<Way>,
    pub relations: Vec<Relation>,
    pub attribution: AttributionBasicInfo,
}

impl OsmDocument for History {
    const ROOT: &'static str = "osm";
}

#[derive(Deserialize, Serialize)]
#[serde(rename = "osm")]
struct HistoryWire {
    #[serde(rename = "@version", default)]
    version: String,
    #[serde(rename = "@generator", default)]
    generator: String,
    #[serde(rename = "@copyright", default)]
    copyright: String,
    #[serde(rename = "@attribution", default)]
    attribution: String,
    #[serde(rename = "@license", default)]
    license: String,
    #[serde(rename = "node", default)]
    nodes: Vec<Node>,
    #[serde(rename = "way", default)]
    ways: Vec<Way>,
    #[serde(rename = "relation", default)]
    relations: Vec<Relation>,
}

impl From<HistoryWire> for History {
    fn from(wire: HistoryWire) -> Self {
        History {
            nodes: wire.nodes,
            ways: wire.ways,
            relations: wire.relations,
            attribution: AttributionBasicInfo {
                version: wire.version,
                generator: wire.generator,
                copyright: wire.copyright,
                attribution: wire.attribution,
                license: wire.license,
            },
        }
    }
}

impl From<History> for HistoryWire {
    fn from(history: History) -> Self {
        let AttributionBasicInfo {
            version,
            generator,
            copyright,
            attribution,
            license,
        } = history.attribution;
        HistoryWire {
            version,
            generator,
            copyright,
            attribution,
            license,
            nodes: history.nodes,
            ways: history.ways,
            relations: history.relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::History;
    use crate::codec::{decode, encode};
    use crate::data::{ChangesetList, Tag};

    const NODE_HISTORY_EXAMPLE: &str = include_str!("test-data/node_history.xml");

    #[test]
    fn load_node_history() {
        let history: History = decode(NODE_HISTORY_EXAMPLE).expect("Loading history failed.");

        assert_eq!(history.attribution.version, "0.6");
        assert_eq!(history.attribution.generator, "OpenStreetMap server");
        assert_eq!(
            history.attribution.copyright,
            "OpenStreetMap and contributors"
        );
        assert_eq!(
            history.attribution.attribution,
            "http://www.openstreetmap.org/copyright"
        );
        assert_eq!(
            history.attribution.license,
            "http://opendatacommons.org/licenses/odbl/1-0/"
        );

        assert!(history.ways.is_empty());
        assert!(history.relations.is_empty());
        assert_eq!(
            history
                .nodes
                .iter()
                .map(|node| node.element.version)
                .collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let last = &history.nodes[2];
        assert!(!last.element.visible);
        assert!(last.tags.is_empty());
        assert_eq!(
            last.element.timestamp,
            Some(Utc.with_ymd_and_hms(2014, 2, 11, 18, 2, 55).unwrap())
        );
        assert_eq!(history.nodes[1].tags, vec![Tag::new("amenity", "bench")]);
    }

    #[test]
    fn history_round_trip() {
        let history: History = decode(NODE_HISTORY_EXAMPLE).expect("Loading history failed.");
        let xml = encode(&history).expect("Encoding history failed.");

        assert!(xml.starts_with("<osm "));
        assert!(xml.contains(r#"generator="OpenStreetMap server""#));

        let reloaded: History = decode(&xml).expect("Reloading history failed.");
        assert_eq!(reloaded, history);
    }

    #[test]
    fn history_and_changeset_list_share_root() {
        let list: ChangesetList = decode(NODE_HISTORY_EXAMPLE).expect("Loading list failed.");
        assert!(list.changesets.is_empty());
        assert_eq!(list.attribution.version, "0.6");
    }
}
