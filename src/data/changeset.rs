use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::OsmDocument;

use super::bounds::{BoundsBox, MaxLonAttribute};
use super::history::AttributionBasicInfo;
use super::osm::{Node, Relation, Tag, UserBasicInfo, Way};
use super::OsmId;

/// Page of changeset summaries, as returned by `/api/0.6/changesets`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "ChangesetListWire", into = "ChangesetListWire")]
pub struct ChangesetList {
    pub changesets: Vec<ChangesetInfo>,
    pub attribution: AttributionBasicInfo,
}

/// Summary of one changeset. The bounding box is read from the `min_lat`, `min_lon`, `max_lat`
/// and `max_lon` attributes and is all zeros when the changeset has none.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "ChangesetInfoWire", into = "ChangesetInfoWire")]
pub struct ChangesetInfo {
    pub id: OsmId,
    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub open: bool,
    pub bounds: BoundsBox,
    pub comments_count: i32,
    pub tags: Vec<Tag>,
    pub user: UserBasicInfo,
}

/// An `osmChange` document: the creations, modifications and deletions of one changeset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "OsmChangeWire", into = "OsmChangeWire")]
pub struct Changeset {
    pub created_nodes: Vec<Node>,
    pub created_ways: Vec<Way>,
    pub created_relations: Vec<Relation>,
    pub modified_nodes: Vec<Node>,
    pub modified_ways: Vec<Way>,
    pub modified_relations: Vec<Relation>,
    pub deleted_nodes: Vec<Node>,
    pub deleted_ways: Vec<Way>,
    pub deleted_relations: Vec<Relation>,
}

impl OsmDocument for ChangesetList {
    const ROOT: &'static str = "osm";

    fn bounds(&self) -> Vec<BoundsBox> {
        self.changesets.iter().map(|changeset| changeset.bounds).collect()
    }
}

impl OsmDocument for ChangesetInfo {
    const ROOT: &'static str = "changeset";

    fn bounds(&self) -> Vec<BoundsBox> {
        vec![self.bounds]
    }
}

impl OsmDocument for Changeset {
    const ROOT: &'static str = "osmChange";
}

#[derive(Deserialize, Serialize)]
#[serde(rename = "osm")]
struct ChangesetListWire {
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
    #[serde(rename = "changeset", default)]
    changesets: Vec<ChangesetInfo>,
}

impl From<ChangesetListWire> for ChangesetList {
    fn from(wire: ChangesetListWire) -> Self {
        ChangesetList {
            changesets: wire.changesets,
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

impl From<ChangesetList> for ChangesetListWire {
    fn from(list: ChangesetList) -> Self {
        let AttributionBasicInfo {
            version,
            generator,
            copyright,
            attribution,
            license,
        } = list.attribution;
        ChangesetListWire {
            version,
            generator,
            copyright,
            attribution,
            license,
            changesets: list.changesets,
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename = "changeset")]
struct ChangesetInfoWire {
    #[serde(rename = "@id")]
    id: OsmId,
    #[serde(rename = "@created_at", default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "@closed_at", default, skip_serializing_if = "Option::is_none")]
    closed_at: Option<DateTime<Utc>>,
    #[serde(rename = "@open", default)]
    open: bool,
    #[serde(rename = "@user", default)]
    user: String,
    #[serde(rename = "@uid", default)]
    uid: i64,
    #[serde(rename = "@min_lat", default)]
    min_lat: f64,
    #[serde(rename = "@min_lon", default)]
    min_lon: f64,
    #[serde(rename = "@max_lat", default)]
    max_lat: f64,
    #[serde(rename = "@max_lon", default)]
    max_lon: f64,
    #[serde(rename = "@comments_count", default)]
    comments_count: i32,
    #[serde(rename = "tag", default)]
    tags: Vec<Tag>,
}

impl From<ChangesetInfoWire> for ChangesetInfo {
    fn from(wire: ChangesetInfoWire) -> Self {
        ChangesetInfo {
            id: wire.id,
            created_at: wire.created_at,
            closed_at: wire.closed_at,
            open: wire.open,
            bounds: BoundsBox::from_attributes(
                wire.min_lat,
                wire.min_lon,
                wire.max_lat,
                wire.max_lon,
                MaxLonAttribute::MaxLon,
            ),
            comments_count: wire.comments_count,
            tags: wire.tags,
            user: UserBasicInfo {
                user: wire.user,
                uid: wire.uid,
            },
        }
    }
}

impl From<ChangesetInfo> for ChangesetInfoWire {
    fn from(info: ChangesetInfo) -> Self {
        ChangesetInfoWire {
            id: info.id,
            created_at: info.created_at,
            closed_at: info.closed_at,
            open: info.open,
            user: info.user.user,
            uid: info.user.uid,
            min_lat: info.bounds.minlat,
            min_lon: info.bounds.minlon,
            max_lat: info.bounds.maxlat,
            max_lon: info.bounds.maxlon,
            comments_count: info.comments_count,
            tags: info.tags,
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename = "osmChange")]
struct OsmChangeWire {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    create: Vec<ActionWire>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    modify: Vec<ActionWire>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    delete: Vec<ActionWire>,
}

/// Contents of one `<create>`, `<modify>` or `<delete>` block. A document may repeat blocks.
#[derive(Default, Deserialize, Serialize)]
struct ActionWire {
    #[serde(rename = "node", default)]
    nodes: Vec<Node>,
    #[serde(rename = "way", default)]
    ways: Vec<Way>,
    #[serde(rename = "relation", default)]
    relations: Vec<Relation>,
}

impl ActionWire {
    /// A single block holding all three lists, or no block at all when they are empty.
    fn group(nodes: Vec<Node>, ways: Vec<Way>, relations: Vec<Relation>) -> Vec<ActionWire> {
        if nodes.is_empty() && ways.is_empty() && relations.is_empty() {
            Vec::new()
        } else {
            vec![ActionWire {
                nodes,
                ways,
                relations,
            }]
        }
    }

    fn concat(blocks: Vec<ActionWire>) -> (Vec<Node>, Vec<Way>, Vec<Relation>) {
        let mut nodes = Vec::new();
        let mut ways = Vec::new();
        let mut relations = Vec::new();
        for block in blocks {
            nodes.extend(block.nodes);
            ways.extend(block.ways);
            relations.extend(block.relations);
        }
        (nodes, ways, relations)
    }
}

impl From<OsmChangeWire> for Changeset {
    fn from(wire: OsmChangeWire) -> Self {
        let (created_nodes, created_ways, created_relations) = ActionWire::concat(wire.create);
        let (modified_nodes, modified_ways, modified_relations) = ActionWire::concat(wire.modify);
        let (deleted_nodes, deleted_ways, deleted_relations) = ActionWire::concat(wire.delete);
        Changeset {
            created_nodes,
            created_ways,
            created_relations,
            modified_nodes,
            modified_ways,
            modified_relations,
            deleted_nodes,
            deleted_ways,
            deleted_relations,
        }
    }
}

impl From<Changeset> for OsmChangeWire {
    fn from(changeset: Changeset) -> Self {
        OsmChangeWire {
            create: ActionWire::group(
                changeset.created_nodes,
                changeset.created_ways,
                changeset.created_relations,
            ),
            modify: ActionWire::group(
                changeset.modified_nodes,
                changeset.modified_ways,
                changeset.modified_relations,
            ),
            delete: ActionWire::group(
                changeset.deleted_nodes,
                changeset.deleted_ways,
                changeset.deleted_relations,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Changeset, ChangesetInfo, ChangesetList};
    use crate::codec::{decode, encode, OsmDocument};
    use crate::data::{BoundsBox, ElementKind, NodeRef, Tag};

    const CHANGESETS_EXAMPLE: &str = include_str!("test-data/changesets.xml");
    const OSM_CHANGE_EXAMPLE: &str = include_str!("test-data/osmchange.xml");

    #[test]
    fn load_changeset_list() {
        let list: ChangesetList = decode(CHANGESETS_EXAMPLE).expect("Loading changesets failed.");

        assert_eq!(list.attribution.generator, "OpenStreetMap server");
        assert_eq!(list.changesets.len(), 2);

        let closed = &list.changesets[0];
        assert_eq!(closed.id, 10);
        assert_eq!(
            closed.created_at,
            Some(Utc.with_ymd_and_hms(2005, 5, 9, 19, 36, 6).unwrap())
        );
        assert_eq!(
            closed.closed_at,
            Some(Utc.with_ymd_and_hms(2005, 5, 9, 20, 36, 6).unwrap())
        );
        assert!(!closed.open);
        assert_eq!(closed.comments_count, 3);
        assert_eq!(closed.user.user, "fred");
        assert_eq!(closed.user.uid, 1);
        assert_eq!(
            closed.bounds,
            BoundsBox {
                minlat: 51.5073,
                minlon: -0.1419,
                maxlat: 51.5152,
                maxlon: -0.1196,
            }
        );
        assert_eq!(
            closed.tags,
            vec![
                Tag::new("comment", "Added bus stops"),
                Tag::new("created_by", "JOSM/1.5"),
            ]
        );

        let open = &list.changesets[1];
        assert!(open.open);
        assert_eq!(open.closed_at, None);
        assert_eq!(open.bounds, BoundsBox::default());
        assert!(open.tags.is_empty());

        assert_eq!(list.bounds(), vec![closed.bounds, open.bounds]);
    }

    #[test]
    fn changeset_list_round_trip() {
        let list: ChangesetList = decode(CHANGESETS_EXAMPLE).expect("Loading changesets failed.");
        let xml = encode(&list).expect("Encoding changesets failed.");

        assert!(!xml.contains("closed_at=\"\""));

        let reloaded: ChangesetList = decode(&xml).expect("Reloading changesets failed.");
        assert_eq!(reloaded, list);
    }

    #[test]
    fn single_changeset_document() {
        let info: ChangesetInfo = decode(
            r#"<changeset id="42" open="true" user="bob" uid="7" min_lat="1" min_lon="2" max_lat="3" max_lon="4" comments_count="0"><tag k="comment" v="x"/></changeset>"#,
        )
        .expect("Loading changeset failed.");

        assert_eq!(info.id, 42);
        assert_eq!(info.created_at, None);
        assert_eq!(info.bounds.maxlon, 4.0);
        assert_eq!(info.bounds(), vec![info.bounds]);
    }

    #[test]
    fn load_osm_change() {
        let changeset: Changeset = decode(OSM_CHANGE_EXAMPLE).expect("Loading osmChange failed.");

        assert_eq!(
            changeset
                .created_nodes
                .iter()
                .map(|node| node.element.id)
                .collect::<Vec<_>>(),
            vec![-1, -2, -3]
        );
        assert_eq!(changeset.created_ways.len(), 1);
        assert_eq!(
            changeset.created_ways[0].node_refs,
            vec![NodeRef::new(-1), NodeRef::new(-2)]
        );
        assert!(changeset.created_relations.is_empty());

        assert_eq!(changeset.modified_nodes.len(), 1);
        assert_eq!(changeset.modified_nodes[0].lat, 51.5);
        assert!(changeset.modified_ways.is_empty());
        assert_eq!(changeset.modified_relations.len(), 1);
        assert_eq!(
            changeset.modified_relations[0].members[0].kind(),
            Some(ElementKind::Way)
        );

        assert!(changeset.deleted_nodes.is_empty());
        assert_eq!(changeset.deleted_ways.len(), 1);
        assert_eq!(changeset.deleted_ways[0].element.id, 99);
        assert!(changeset.deleted_relations.is_empty());
    }

    #[test]
    fn groups_stay_separate() {
        let changeset: Changeset = decode(
            r#"<osmChange><create><node id="1"/></create><modify><way id="2"/></modify><delete><relation id="3"/></delete></osmChange>"#,
        )
        .expect("Loading osmChange failed.");

        assert_eq!(changeset.created_nodes.len(), 1);
        assert_eq!(changeset.created_nodes[0].element.id, 1);
        assert_eq!(changeset.modified_ways.len(), 1);
        assert_eq!(changeset.modified_ways[0].element.id, 2);
        assert_eq!(changeset.deleted_relations.len(), 1);
        assert_eq!(changeset.deleted_relations[0].element.id, 3);

        assert!(changeset.created_ways.is_empty());
        assert!(changeset.created_relations.is_empty());
        assert!(changeset.modified_nodes.is_empty());
        assert!(changeset.modified_relations.is_empty());
        assert!(changeset.deleted_nodes.is_empty());
        assert!(changeset.deleted_ways.is_empty());
    }

    #[test]
    fn osm_change_round_trip() {
        let changeset: Changeset = decode(OSM_CHANGE_EXAMPLE).expect("Loading osmChange failed.");
        let xml = encode(&changeset).expect("Encoding osmChange failed.");

        assert!(xml.starts_with("<osmChange>"));
        assert_eq!(xml.matches("<create>").count(), 1);
        assert_eq!(xml.matches("<modify>").count(), 1);
        assert_eq!(xml.matches("<delete>").count(), 1);

        let reloaded: Changeset = decode(&xml).expect("Reloading osmChange failed.");
        assert_eq!(reloaded, changeset);
    }

    #[test]
    fn empty_groups_are_not_written() {
        let changeset = Changeset {
            created_nodes: vec![Default::default()],
            ..Default::default()
        };
        let xml = encode(&changeset).expect("Encoding osmChange failed.");

        assert!(xml.contains("<create><node "));
        assert!(!xml.contains("<modify"));
        assert!(!xml.contains("<delete"));
    }
}
