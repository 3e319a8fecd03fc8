use serde::{Deserialize, Serialize};

pub mod import_id;
pub use import_id::{ImportId, is_dns_name, parse_id};

pub type ZoneName = String;

////////////////////////////////////////////////////////////
// RRSet key
////////////////////////////////////////////////////////////
/// Addresses one record set: zone + record type + owner name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RRSetKey {
    pub zone: ZoneName,
    pub rr_type: String,
    pub owner_name: String,
}

impl RRSetKey {
    pub fn new(zone: &str, rr_type: &str, owner_name: &str) -> Self {
        Self {
            zone: zone.to_string(),
            rr_type: rr_type.to_string(),
            owner_name: owner_name.to_string(),
        }
    }

    /// Path of the record set relative to the API version root.
    pub fn uri(&self) -> String {
        let rr_type = if self.rr_type.is_empty() {
            "ANY"
        } else {
            self.rr_type.as_str()
        };
        format!("zones/{}/rrsets/{}/{}", self.zone, rr_type, self.owner_name)
    }
}

////////////////////////////////////////////////////////////
// RRSet
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RRSet {
    #[serde(rename = "ownerName", default)]
    pub owner_name: String,

    #[serde(rename = "rrtype", default)]
    pub rr_type: String,

    #[serde(default)]
    pub ttl: u32,

    #[serde(default)]
    pub rdata: Vec<String>,
}

impl RRSet {
    pub fn is_txt(&self) -> bool {
        // the API reports types as e.g. "TXT (16)"
        self.rr_type
            .split_whitespace()
            .next()
            .is_some_and(|t| t.eq_ignore_ascii_case("TXT"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RRSetList {
    #[serde(rename = "zoneName", default)]
    pub zone_name: String,

    #[serde(rename = "rrSets", default)]
    pub rrsets: Vec<RRSet>,
}
