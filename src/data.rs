pub mod bounds;
pub mod changeset;
pub mod history;
pub mod osm;

pub use self::bounds::{BoundsBox, MaxLonAttribute};
pub use self::changeset::{Changeset, ChangesetInfo, ChangesetList};
pub use self::history::{AttributionBasicInfo, History};
pub use self::osm::{
    ElementBasicInfo, ElementKind, Node, NodeRef, Relation, RelationMember, Tag, UserBasicInfo, Way,
};

/// Identifier of a node, way, relation or changeset. Only meaningful together with the kind
/// of thing it names.
pub type OsmId = i64;
