use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::schema::*;
use super::*;
use crate::error::{Error, Result};
use crate::provider::{ApiError, ApiErrors, RRSetApi};
use crate::record::{RRSet, RRSetKey};

/// In-memory record store behaving like the API.
#[derive(Default)]
struct FakeApi {
    rrsets: Mutex<HashMap<RRSetKey, RRSet>>,
    unavailable: bool,
    empty: bool,
}

impl FakeApi {
    fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    fn empty() -> Self {
        Self {
            empty: true,
            ..Default::default()
        }
    }

    fn insert(&self, key: RRSetKey, rrset: RRSet) {
        self.rrsets.lock().unwrap().insert(key, rrset);
    }

    fn get(&self, key: &RRSetKey) -> Option<RRSet> {
        self.rrsets.lock().unwrap().get(key).cloned()
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            Err(Error::HttpError("status: 503, body: ".to_string()))
        } else {
            Ok(())
        }
    }

    fn not_found() -> Error {
        Error::Api(ApiErrors(vec![ApiError {
            code: ApiErrors::RECORDS_NOT_FOUND,
            message: "Data not found.".to_string(),
        }]))
    }
}

#[async_trait]
impl RRSetApi for FakeApi {
    async fn select(&self, key: &RRSetKey) -> Result<Vec<RRSet>> {
        self.check()?;
        if self.empty {
            return Ok(vec![]);
        }
        self.get(key).map(|r| vec![r]).ok_or_else(FakeApi::not_found)
    }

    async fn create(&self, key: &RRSetKey, rrset: &RRSet) -> Result<()> {
        self.check()?;
        // the API stores fully qualified owner names
        let mut stored = rrset.clone();
        stored.owner_name = format!("{}.{}.", key.owner_name, key.zone);
        self.insert(key.clone(), stored);
        Ok(())
    }

    async fn update(&self, key: &RRSetKey, rrset: &RRSet) -> Result<()> {
        self.check()?;
        if self.get(key).is_none() {
            return Err(FakeApi::not_found());
        }
        self.create(key, rrset).await
    }

    async fn delete(&self, key: &RRSetKey) -> Result<()> {
        self.check()?;
        match self.rrsets.lock().unwrap().remove(key) {
            Some(_) => Ok(()),
            None => Err(FakeApi::not_found()),
        }
    }
}

fn www_data() -> ResourceData {
    let mut d = ResourceData::new();
    d.set(ATTR_ZONE, "example.com");
    d.set(ATTR_NAME, "www");
    d.set(ATTR_TYPE, "A");
    d.set_set(
        ATTR_RDATA,
        vec!["10.0.0.2".to_string(), "10.0.0.1".to_string()],
    );
    d
}

#[test]
fn test_schema_defaults_and_required() {
    let mut d = ResourceData::new();
    apply_defaults(&mut d);
    assert_eq!(d.get_str(ATTR_TTL), Some(DEFAULT_TTL));
    assert_eq!(missing_required(&d), vec!["zone", "name", "type", "rdata"]);

    let mut d = www_data();
    d.set(ATTR_TTL, "300");
    apply_defaults(&mut d);
    assert_eq!(d.get_str(ATTR_TTL), Some("300"));
    assert!(missing_required(&d).is_empty());

    let computed: Vec<_> = schema()
        .iter()
        .filter(|a| a.mode == AttrMode::Computed)
        .map(|a| a.name)
        .collect();
    assert_eq!(computed, vec!["hostname"]);
}

#[test]
fn test_rrset_resource_from_data() {
    let mut d = www_data();
    d.set(ATTR_TTL, "300");

    let r = RRSetResource::try_from(&d).unwrap();
    assert_eq!(r.zone, "example.com");
    assert_eq!(r.owner_name, "www");
    assert_eq!(r.rr_type, "A");
    assert_eq!(r.rdata, vec!["10.0.0.1", "10.0.0.2"]);
    assert_eq!(r.ttl, 300);
    assert_eq!(r.id(), "www.example.com");
    assert_eq!(r.key(), RRSetKey::new("example.com", "A", "www"));

    d.set(ATTR_TTL, 60);
    assert_eq!(RRSetResource::try_from(&d).unwrap().ttl, 60);
}

#[test]
fn test_rrset_resource_rejects_invalid_data() {
    let mut d = www_data();
    d.set(ATTR_TTL, "one hour");
    match RRSetResource::try_from(&d) {
        Err(Error::InvalidResource(msg)) => assert!(msg.contains("one hour")),
        other => panic!("expected invalid ttl, got {:?}", other),
    }

    let mut d = www_data();
    d.set_set(ATTR_RDATA, Vec::<String>::new());
    match RRSetResource::try_from(&d) {
        Err(Error::InvalidResource(msg)) => assert!(msg.contains("rdata")),
        other => panic!("expected missing rdata, got {:?}", other),
    }
}

#[test]
fn test_populate_from_rrset() {
    let mut d = www_data();
    let rrset = RRSet {
        owner_name: "www".to_string(),
        rr_type: "A (1)".to_string(),
        ttl: 120,
        rdata: vec!["10.0.0.3".to_string()],
    };
    populate_from_rrset(&rrset, &mut d);
    assert_eq!(d.get_str(ATTR_TTL), Some("120"));
    assert_eq!(d.get_set(ATTR_RDATA), vec!["10.0.0.3"]);
    assert_eq!(d.get_str(ATTR_HOSTNAME), Some("www.example.com"));

    let rrset = RRSet {
        owner_name: "www.example.com.".to_string(),
        ..rrset
    };
    populate_from_rrset(&rrset, &mut d);
    assert_eq!(d.get_str(ATTR_HOSTNAME), Some("www.example.com."));

    let rrset = RRSet {
        owner_name: String::new(),
        ..rrset
    };
    populate_from_rrset(&rrset, &mut d);
    assert_eq!(d.get_str(ATTR_HOSTNAME), Some("example.com"));
}

#[test]
fn test_populate_decodes_txt_answers() {
    let mut d = www_data();
    d.set(ATTR_TYPE, "TXT");
    let rrset = RRSet {
        owner_name: "www.example.com.".to_string(),
        rr_type: "TXT (16)".to_string(),
        ttl: 300,
        rdata: vec![
            "\"v=spf1 -all\"".to_string(),
            "not json".to_string(),
        ],
    };

    populate_from_rrset(&rrset, &mut d);
    assert_eq!(d.get_set(ATTR_RDATA), vec!["not json", "v=spf1 -all"]);
}

#[tokio::test]
async fn test_record_create_read_update_delete() {
    let api = FakeApi::default();
    let resource = RecordResource::new(&api);

    let mut d = www_data();
    resource.create(&mut d).await.unwrap();
    assert_eq!(d.id(), "www.example.com");
    assert_eq!(d.get_str(ATTR_TTL), Some("3600"));
    assert_eq!(d.get_str(ATTR_HOSTNAME), Some("www.example.com."));

    let key = RRSetKey::new("example.com", "A", "www");
    assert_eq!(api.get(&key).unwrap().rdata, vec!["10.0.0.1", "10.0.0.2"]);

    d.set(ATTR_TTL, "60");
    d.set_set(ATTR_RDATA, vec!["10.0.0.9".to_string()]);
    resource.update(&mut d).await.unwrap();
    assert_eq!(api.get(&key).unwrap().ttl, 60);
    assert_eq!(d.get_set(ATTR_RDATA), vec!["10.0.0.9"]);

    resource.delete(&mut d).await.unwrap();
    assert!(d.is_gone());
    assert!(api.get(&key).is_none());
}

#[tokio::test]
async fn test_record_read_not_found_clears_id() {
    let api = FakeApi::default();
    let resource = RecordResource::new(&api);

    let mut d = www_data();
    d.set_id("www.example.com");
    resource.read(&mut d).await.unwrap();
    assert!(d.is_gone());
}

#[tokio::test]
async fn test_record_read_empty_result_clears_id() {
    let api = FakeApi::empty();
    let resource = RecordResource::new(&api);

    let mut d = www_data();
    d.set_id("www.example.com");
    resource.read(&mut d).await.unwrap();
    assert!(d.is_gone());
}

#[tokio::test]
async fn test_record_read_other_errors_fail() {
    let api = FakeApi::unavailable();
    let resource = RecordResource::new(&api);

    let mut d = www_data();
    d.set_id("www.example.com");
    match resource.read(&mut d).await {
        Err(Error::Provider(msg)) => assert!(msg.starts_with("not found: ")),
        other => panic!("expected provider error, got {:?}", other),
    }
    assert_eq!(d.id(), "www.example.com");

    let mut d = www_data();
    match resource.create(&mut d).await {
        Err(Error::Provider(msg)) => assert!(msg.starts_with("create failed: ")),
        other => panic!("expected provider error, got {:?}", other),
    }
    assert!(d.is_gone());
}

#[tokio::test]
async fn test_record_import_then_read() {
    let api = FakeApi::default();
    api.insert(
        RRSetKey::new("example.com", "CNAME", "www.acme"),
        RRSet {
            owner_name: "www.acme.example.com.".to_string(),
            rr_type: "CNAME (5)".to_string(),
            ttl: 300,
            rdata: vec!["acme.example.net.".to_string()],
        },
    );
    let resource = RecordResource::new(&api);

    let mut imported = resource
        .import(ResourceData::with_id("www.acme.example.com"))
        .unwrap();
    assert_eq!(imported.len(), 1);

    let mut d = imported.remove(0);
    assert_eq!(d.get_str(ATTR_NAME), Some("www.acme"));
    assert_eq!(d.get_str(ATTR_ZONE), Some("example.com"));

    d.set(ATTR_TYPE, "CNAME");
    resource.read(&mut d).await.unwrap();
    assert_eq!(d.id(), "www.acme.example.com");
    assert_eq!(d.get_set(ATTR_RDATA), vec!["acme.example.net."]);
    assert_eq!(d.get_str(ATTR_TTL), Some("300"));
}

#[test]
fn test_record_import_errors_propagate() {
    let api = FakeApi::default();
    let resource = RecordResource::new(&api);

    match resource.import(ResourceData::with_id("app.domain.com.domain.com")) {
        Err(Error::AmbiguousId(id)) => assert_eq!(id, "app.domain.com.domain.com"),
        other => panic!("expected ambiguous id, got {:?}", other),
    }

    match resource.import(ResourceData::with_id("nodothere")) {
        Err(Error::UnparseableId(id)) => assert_eq!(id, "nodothere"),
        other => panic!("expected unparseable id, got {:?}", other),
    }
}

#[test]
fn test_record_import_fields() {
    let api = FakeApi::default();
    let resource = RecordResource::new(&api);

    let d = resource.import_fields("app.domain", "com.domain.com", "A");
    assert_eq!(d.id(), "app.domain.com.domain.com");
    assert_eq!(d.get_str(ATTR_NAME), Some("app.domain"));
    assert_eq!(d.get_str(ATTR_ZONE), Some("com.domain.com"));
    assert_eq!(d.get_str(ATTR_TYPE), Some("A"));
}

#[test]
fn test_plan() {
    let desired = www_data();
    assert_eq!(plan(None, &desired), Change::Create);
    assert_eq!(plan(Some(&ResourceData::new()), &desired), Change::Create);

    let mut current = www_data();
    current.set_id("www.example.com");
    current.set(ATTR_TTL, "3600");
    current.set(ATTR_HOSTNAME, "www.example.com.");
    assert_eq!(plan(Some(&current), &desired), Change::NoOp);

    let mut changed = www_data();
    changed.set(ATTR_TTL, "60");
    assert_eq!(plan(Some(&current), &changed), Change::Update);

    // refreshed ttl is text, configured ttl may be a number
    let mut numeric = www_data();
    numeric.set(ATTR_TTL, 3600);
    assert_eq!(plan(Some(&current), &numeric), Change::NoOp);

    numeric.set(ATTR_TTL, 60);
    assert_eq!(plan(Some(&current), &numeric), Change::Update);

    let mut moved = www_data();
    moved.set(ATTR_ZONE, "example.org");
    assert_eq!(plan(Some(&current), &moved), Change::Replace);
}

#[test]
fn test_resource_data_get_string() {
    let mut d = ResourceData::new();
    d.set(ATTR_TTL, 300);
    assert_eq!(d.get_string(ATTR_TTL), Some("300".to_string()));
    assert_eq!(d.get_str(ATTR_TTL), None);

    d.set(ATTR_TTL, "");
    assert_eq!(d.get_string(ATTR_TTL), None);
}

#[test]
fn test_resource_data_yaml() {
    let mut d = www_data();
    d.set_id("www.example.com");
    let yaml = serde_yaml::to_string(&d).unwrap();
    let back: ResourceData = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, d);
    assert_eq!(back.get(ATTR_RDATA), Some(&json!(["10.0.0.1", "10.0.0.2"])));
}
