use log::info;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::provider::RRSetApi;
use crate::record::{RRSet, RRSetKey, parse_id};

use super::data::ResourceData;
use super::schema::{
    ATTR_HOSTNAME, ATTR_NAME, ATTR_RDATA, ATTR_TTL, ATTR_TYPE, ATTR_ZONE, apply_defaults,
    has_changes, missing_required, requires_replacement,
};

const DEFAULT_TTL_SECS: u32 = 3600;

////////////////////////////////////////////////////////////
// Typed record
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq)]
pub struct RRSetResource {
    pub zone: String,
    pub owner_name: String,
    pub rr_type: String,
    pub rdata: Vec<String>,
    pub ttl: u32,
}

impl RRSetResource {
    pub fn key(&self) -> RRSetKey {
        RRSetKey::new(&self.zone, &self.rr_type, &self.owner_name)
    }

    pub fn rrset(&self) -> RRSet {
        RRSet {
            owner_name: self.owner_name.clone(),
            rr_type: self.rr_type.clone(),
            ttl: self.ttl,
            rdata: self.rdata.clone(),
        }
    }

    /// Resource id, `name.zone`.
    pub fn id(&self) -> String {
        format!("{}.{}", self.owner_name, self.zone)
    }
}

impl TryFrom<&ResourceData> for RRSetResource {
    type Error = Error;

    fn try_from(d: &ResourceData) -> Result<Self> {
        let missing = missing_required(d);
        if !missing.is_empty() {
            return Err(Error::InvalidResource(format!(
                "missing required attribute(s): {}",
                missing.join(", ")
            )));
        }

        let key = key_from(d)?;
        Ok(Self {
            zone: key.zone,
            owner_name: key.owner_name,
            rr_type: key.rr_type,
            rdata: d.get_set(ATTR_RDATA),
            ttl: ttl_from(d)?,
        })
    }
}

/// Record set key of `d`; only zone, name and type have to be known.
fn key_from(d: &ResourceData) -> Result<RRSetKey> {
    let get = |attr: &str| {
        d.get_str(attr)
            .ok_or_else(|| Error::InvalidResource(format!("{} is required", attr)))
    };

    Ok(RRSetKey::new(get(ATTR_ZONE)?, get(ATTR_TYPE)?, get(ATTR_NAME)?))
}

fn ttl_from(d: &ResourceData) -> Result<u32> {
    let invalid = |v: &Value| Error::InvalidResource(format!("ttl {} is not a valid TTL", v));

    let Some(v) = d.get(ATTR_TTL) else {
        return Ok(DEFAULT_TTL_SECS);
    };

    match v {
        Value::String(s) if s.is_empty() => Ok(DEFAULT_TTL_SECS),
        Value::String(s) => s.trim().parse().map_err(|_| invalid(v)),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| invalid(v)),
        _ => Err(invalid(v)),
    }
}

/// Decodes a TXT answer; the API returns them JSON encoded a second time.
fn decode_txt(raw: &str) -> String {
    match serde_json::from_str::<String>(raw) {
        Ok(s) => s,
        Err(e) => {
            info!("TXT answer parse error: {}", e);
            raw.to_string()
        }
    }
}

fn hostname(owner_name: &str, zone: &str) -> String {
    if owner_name.is_empty() {
        zone.to_string()
    } else if owner_name.ends_with('.') {
        owner_name.to_string()
    } else {
        format!("{}.{}", owner_name, zone)
    }
}

/// Writes the remote state of `rrset` back into `d`.
pub fn populate_from_rrset(rrset: &RRSet, d: &mut ResourceData) {
    let zone = d.get_str(ATTR_ZONE).unwrap_or_default().to_string();
    let is_txt = rrset.is_txt()
        || d.get_str(ATTR_TYPE)
            .is_some_and(|t| t.eq_ignore_ascii_case("TXT"));

    d.set(ATTR_TTL, rrset.ttl.to_string());

    if is_txt {
        d.set_set(ATTR_RDATA, rrset.rdata.iter().map(|r| decode_txt(r)));
    } else {
        d.set_set(ATTR_RDATA, rrset.rdata.iter().cloned());
    }

    d.set(ATTR_HOSTNAME, hostname(&rrset.owner_name, &zone));
}

////////////////////////////////////////////////////////////
// Plan
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    Create,
    Update,
    Replace,
    NoOp,
}

/// What it takes to move from the refreshed state `current` to `desired`.
pub fn plan(current: Option<&ResourceData>, desired: &ResourceData) -> Change {
    let mut desired = desired.clone();
    apply_defaults(&mut desired);

    match current {
        None => Change::Create,
        Some(current) if current.is_gone() => Change::Create,
        Some(current) if requires_replacement(current, &desired) => Change::Replace,
        Some(current) if has_changes(current, &desired) => Change::Update,
        Some(_) => Change::NoOp,
    }
}

////////////////////////////////////////////////////////////
// CRUD handlers
////////////////////////////////////////////////////////////
/// Handlers of the record resource, bound to an API client.
pub struct RecordResource<'a> {
    api: &'a dyn RRSetApi,
}

impl<'a> RecordResource<'a> {
    pub fn new(api: &'a dyn RRSetApi) -> Self {
        Self { api }
    }

    pub async fn create(&self, d: &mut ResourceData) -> Result<()> {
        apply_defaults(d);
        let r = RRSetResource::try_from(&*d)?;

        info!("ultradns_record create: {:?}", r);
        self.api
            .create(&r.key(), &r.rrset())
            .await
            .map_err(|e| Error::Provider(format!("create failed: {}", e)))?;

        d.set_id(r.id());
        info!("ultradns_record.id: {}", d.id());

        self.read(d).await
    }

    pub async fn read(&self, d: &mut ResourceData) -> Result<()> {
        let key = key_from(d)?;

        match self.api.select(&key).await {
            Ok(rrsets) => match rrsets.first() {
                Some(rrset) => {
                    populate_from_rrset(rrset, d);
                    Ok(())
                }
                None => {
                    info!("ultradns_record {} has no record sets, removing", d.id());
                    d.set_id("");
                    Ok(())
                }
            },
            Err(e) if e.is_not_found() => {
                info!("ultradns_record {} not found, removing", d.id());
                d.set_id("");
                Ok(())
            }
            Err(e) => Err(Error::Provider(format!("not found: {}", e))),
        }
    }

    pub async fn update(&self, d: &mut ResourceData) -> Result<()> {
        apply_defaults(d);
        let r = RRSetResource::try_from(&*d)?;

        info!("ultradns_record update: {:?}", r);
        self.api
            .update(&r.key(), &r.rrset())
            .await
            .map_err(|e| Error::Provider(format!("update failed: {}", e)))?;

        self.read(d).await
    }

    pub async fn delete(&self, d: &mut ResourceData) -> Result<()> {
        let key = key_from(d)?;

        info!("ultradns_record delete: {:?}", key);
        self.api
            .delete(&key)
            .await
            .map_err(|e| Error::Provider(format!("delete failed: {}", e)))?;

        d.set_id("");
        Ok(())
    }

    /// Recovers name and zone from the id of `d`.
    ///
    /// Id parse failures are returned as is and leave nothing behind.
    pub fn import(&self, mut d: ResourceData) -> Result<Vec<ResourceData>> {
        let (name, zone) = parse_id(d.id())?.into_parts();

        d.set(ATTR_NAME, name);
        d.set(ATTR_ZONE, zone);
        Ok(vec![d])
    }

    /// Import from explicit fields, for ids that cannot be split unambiguously.
    pub fn import_fields(&self, name: &str, zone: &str, rr_type: &str) -> ResourceData {
        let mut d = ResourceData::with_id(&format!("{}.{}", name, zone));
        d.set(ATTR_NAME, name);
        d.set(ATTR_ZONE, zone);
        d.set(ATTR_TYPE, rr_type);
        d
    }
}
