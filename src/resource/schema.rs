use super::data::ResourceData;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrKind {
    String,
    StringSet,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrMode {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub kind: AttrKind,
    pub mode: AttrMode,
    pub force_new: bool,
    pub default: Option<&'static str>,
}

pub const ATTR_ZONE: &str = "zone";
pub const ATTR_NAME: &str = "name";
pub const ATTR_TYPE: &str = "type";
pub const ATTR_RDATA: &str = "rdata";
pub const ATTR_TTL: &str = "ttl";
pub const ATTR_HOSTNAME: &str = "hostname";

pub const DEFAULT_TTL: &str = "3600";

const RECORD_SCHEMA: &[AttributeSchema] = &[
    AttributeSchema {
        name: ATTR_ZONE,
        kind: AttrKind::String,
        mode: AttrMode::Required,
        force_new: true,
        default: None,
    },
    AttributeSchema {
        name: ATTR_NAME,
        kind: AttrKind::String,
        mode: AttrMode::Required,
        force_new: true,
        default: None,
    },
    AttributeSchema {
        name: ATTR_TYPE,
        kind: AttrKind::String,
        mode: AttrMode::Required,
        force_new: true,
        default: None,
    },
    AttributeSchema {
        name: ATTR_RDATA,
        kind: AttrKind::StringSet,
        mode: AttrMode::Required,
        force_new: false,
        default: None,
    },
    AttributeSchema {
        name: ATTR_TTL,
        kind: AttrKind::String,
        mode: AttrMode::Optional,
        force_new: false,
        default: Some(DEFAULT_TTL),
    },
    AttributeSchema {
        name: ATTR_HOSTNAME,
        kind: AttrKind::String,
        mode: AttrMode::Computed,
        force_new: false,
        default: None,
    },
];

/// Attributes of the record resource.
pub fn schema() -> &'static [AttributeSchema] {
    RECORD_SCHEMA
}

pub fn apply_defaults(d: &mut ResourceData) {
    for attr in schema() {
        if let Some(default) = attr.default {
            if !d.is_set(attr.name) {
                d.set(attr.name, default);
            }
        }
    }
}

/// Required attributes that are unset in `d`.
pub fn missing_required(d: &ResourceData) -> Vec<&'static str> {
    schema()
        .iter()
        .filter(|attr| attr.mode == AttrMode::Required && !d.is_set(attr.name))
        .map(|attr| attr.name)
        .collect()
}

fn differs(attr: &AttributeSchema, old: &ResourceData, new: &ResourceData) -> bool {
    match attr.kind {
        AttrKind::String => old.get_string(attr.name) != new.get_string(attr.name),
        AttrKind::StringSet => old.get_set(attr.name) != new.get_set(attr.name),
    }
}

/// True when a force-new attribute changed between `old` and `new`.
pub fn requires_replacement(old: &ResourceData, new: &ResourceData) -> bool {
    schema()
        .iter()
        .filter(|attr| attr.force_new)
        .any(|attr| differs(attr, old, new))
}

/// True when any configurable attribute changed.
pub fn has_changes(old: &ResourceData, new: &ResourceData) -> bool {
    schema()
        .iter()
        .filter(|attr| attr.mode != AttrMode::Computed)
        .any(|attr| differs(attr, old, new))
}
