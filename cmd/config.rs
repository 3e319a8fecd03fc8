use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use udns_record::error::Result;
use udns_record::provider::ProviderConfig;
use udns_record::resource::ResourceData;
use udns_record::resource::schema::{ATTR_NAME, ATTR_RDATA, ATTR_TTL, ATTR_TYPE, ATTR_ZONE};

////////////////////////////////////////////////////////////
// TTL
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CfgTTL {
    #[default]
    Default,
    Value(u32),
}

impl<'de> Deserialize<'de> for CfgTTL {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TTLVisitor;

        impl<'de> serde::de::Visitor<'de> for TTLVisitor {
            type Value = CfgTTL;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a TTL in seconds")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.is_empty() || v.eq_ignore_ascii_case("default") {
                    Ok(CfgTTL::Default)
                } else {
                    Ok(CfgTTL::Value(v.trim().parse().map_err(E::custom)?))
                }
            }

            fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u32::try_from(v).map(CfgTTL::Value).map_err(E::custom)
            }

            fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u32::try_from(v).map(CfgTTL::Value).map_err(E::custom)
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(CfgTTL::Default)
            }
        }

        deserializer.deserialize_any(TTLVisitor)
    }
}

////////////////////////////////////////////////////////////
// Record
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Deserialize)]
pub struct CfgRecord {
    pub zone: String,
    pub name: String,
    pub r#type: String,
    pub rdata: Vec<String>,

    #[serde(default)]
    pub ttl: CfgTTL,
}

impl CfgRecord {
    pub fn id(&self) -> String {
        format!("{}.{}", self.name, self.zone)
    }

    pub fn into_resource_data(self) -> ResourceData {
        let mut d = ResourceData::with_id(&self.id());
        d.set(ATTR_ZONE, self.zone);
        d.set(ATTR_NAME, self.name);
        d.set(ATTR_TYPE, self.r#type);
        d.set_set(ATTR_RDATA, self.rdata);
        if let CfgTTL::Value(ttl) = self.ttl {
            d.set(ATTR_TTL, ttl.to_string());
        }
        d
    }
}

////////////////////////////////////////////////////////////
// Yaml parser
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cfg {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub records: Vec<CfgRecord>,
}

pub struct Parser;

impl Parser {
    pub fn parse_yaml<P: AsRef<Path>>(path: P) -> Result<Cfg> {
        let reader = Self::file_reader(path)?;
        let config: Cfg = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    fn file_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let f = std::fs::File::open(path)?;
        Ok(BufReader::new(f))
    }
}

////////////////////////////////////////////////////////////
// Unit test
////////////////////////////////////////////////////////////
#[cfg(test)]
#[path = "config_test.rs"]
mod test;
