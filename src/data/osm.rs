use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::OsmDocument;

use super::OsmId;

/// Free-form key/value annotation of an element or changeset. Keys are not unique within a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tag {
    #[serde(rename = "@k")]
    pub key: String,
    #[serde(rename = "@v", default)]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The three primitive feature kinds, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "node" => Some(ElementKind::Node),
            "way" => Some(ElementKind::Way),
            "relation" => Some(ElementKind::Relation),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and versioning shared by nodes, ways and relations. Written as attributes of the
/// element itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementBasicInfo {
    pub id: OsmId,
    pub changeset_id: OsmId,
    pub timestamp: Option<DateTime<Utc>>,
    pub version: i64,
    pub visible: bool,
}

/// Author of an element or changeset. Written as the `user` and `uid` attributes of its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserBasicInfo {
    pub user: String,
    pub uid: i64,
}

/// Reference from a way to a node by id. The node is never resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodeRef {
    #[serde(rename = "@ref")]
    pub node_id: OsmId,
}

impl NodeRef {
    pub fn new(node_id: OsmId) -> Self {
        NodeRef { node_id }
    }

    pub fn kind(&self) -> ElementKind {
        ElementKind::Node
    }
}

/// Typed, roled reference from a relation to another element.
///
/// `member_type` is kept exactly as it appeared in the document; use [`RelationMember::kind`]
/// to interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelationMember {
    #[serde(rename = "@type", default)]
    pub member_type: String,
    #[serde(rename = "@ref")]
    pub member_ref: OsmId,
    #[serde(rename = "@role", default)]
    pub role: String,
}

impl RelationMember {
    pub fn new(kind: ElementKind, member_ref: OsmId, role: impl Into<String>) -> Self {
        RelationMember {
            member_type: kind.as_str().to_string(),
            member_ref,
            role: role.into(),
        }
    }

    /// The referenced element kind, if the type string names one.
    pub fn kind(&self) -> Option<ElementKind> {
        ElementKind::from_name(&self.member_type)
    }
}

/// Point feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "ElementWire", into = "ElementWire")]
pub struct Node {
    pub element: ElementBasicInfo,
    pub user: UserBasicInfo,
    pub lat: f64,
    pub lon: f64,
    pub tags: Vec<Tag>,
}

/// Polyline or polygon feature, as an ordered list of node references.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "ElementWire", into = "ElementWire")]
pub struct Way {
    pub element: ElementBasicInfo,
    pub user: UserBasicInfo,
    pub node_refs: Vec<NodeRef>,
    pub tags: Vec<Tag>,
}

/// Composite feature grouping other elements.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "ElementWire", into = "ElementWire")]
pub struct Relation {
    pub element: ElementBasicInfo,
    pub user: UserBasicInfo,
    pub members: Vec<RelationMember>,
    pub tags: Vec<Tag>,
}

impl OsmDocument for Node {
    const ROOT: &'static str = "node";
}

impl OsmDocument for Way {
    const ROOT: &'static str = "way";
}

impl OsmDocument for Relation {
    const ROOT: &'static str = "relation";
}

/// Attribute and child layout shared by `<node>`, `<way>` and `<relation>`. The embedded
/// identity and user fields sit next to the element's own attributes.
#[derive(Default, Deserialize, Serialize)]
struct ElementWire {
    #[serde(rename = "@id")]
    id: OsmId,
    #[serde(rename = "@changeset", default)]
    changeset: OsmId,
    #[serde(rename = "@timestamp", default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "@version", default)]
    version: i64,
    #[serde(rename = "@visible", default)]
    visible: bool,
    #[serde(rename = "@user", default)]
    user: String,
    #[serde(rename = "@uid", default)]
    uid: i64,
    #[serde(rename = "@lat", default, skip_serializing_if = "Option::is_none")]
    lat: Option<f64>,
    #[serde(rename = "@lon", default, skip_serializing_if = "Option::is_none")]
    lon: Option<f64>,
    #[serde(rename = "nd", default)]
    node_refs: Vec<NodeRef>,
    #[serde(rename = "member", default)]
    members: Vec<RelationMember>,
    #[serde(rename = "tag", default)]
    tags: Vec<Tag>,
}

impl ElementWire {
    fn new(element: ElementBasicInfo, user: UserBasicInfo, tags: Vec<Tag>) -> Self {
        ElementWire {
            id: element.id,
            changeset: element.changeset_id,
            timestamp: element.timestamp,
            version: element.version,
            visible: element.visible,
            user: user.user,
            uid: user.uid,
            tags,
            ..Default::default()
        }
    }

    fn element(&self) -> ElementBasicInfo {
        ElementBasicInfo {
            id: self.id,
            changeset_id: self.changeset,
            timestamp: self.timestamp,
            version: self.version,
            visible: self.visible,
        }
    }
}

impl From<ElementWire> for Node {
    fn from(wire: ElementWire) -> Self {
        Node {
            element: wire.element(),
            user: UserBasicInfo {
                user: wire.user,
                uid: wire.uid,
            },
            lat: wire.lat.unwrap_or_default(),
            lon: wire.lon.unwrap_or_default(),
            tags: wire.tags,
        }
    }
}

impl From<Node> for ElementWire {
    fn from(node: Node) -> Self {
        ElementWire {
            lat: Some(node.lat),
            lon: Some(node.lon),
            ..ElementWire::new(node.element, node.user, node.tags)
        }
    }
}

impl From<ElementWire> for Way {
    fn from(wire: ElementWire) -> Self {
        Way {
            element: wire.element(),
            user: UserBasicInfo {
                user: wire.user,
                uid: wire.uid,
            },
            node_refs: wire.node_refs,
            tags: wire.tags,
        }
    }
}

impl From<Way> for ElementWire {
    fn from(way: Way) -> Self {
        ElementWire {
            node_refs: way.node_refs,
            ..ElementWire::new(way.element, way.user, way.tags)
        }
    }
}

impl From<ElementWire> for Relation {
    fn from(wire: ElementWire) -> Self {
        Relation {
            element: wire.element(),
            user: UserBasicInfo {
                user: wire.user,
                uid: wire.uid,
            },
            members: wire.members,
            tags: wire.tags,
        }
    }
}

impl From<Relation> for ElementWire {
    fn from(relation: Relation) -> Self {
        ElementWire {
            members: relation.members,
            ..ElementWire::new(relation.element, relation.user, relation.tags)
        }
    }
}
