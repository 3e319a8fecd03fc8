//! Recovering `(name, zone)` from a record id of the form `name.zone`.
//!
//! Both parts may contain dots themselves, e.g. name `app.domain` in zone
//! `com.domain.com` and name `app.domain.com` in zone `domain.com` both
//! produce `app.domain.com.domain.com`. Every split point is therefore tried
//! and the id is only accepted when exactly one split has a plausible DNS
//! name on both sides.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static RE_DNS_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(([a-zA-Z]{1})|([a-zA-Z]{1}[a-zA-Z]{1})|([a-zA-Z]{1}[0-9]{1})|([0-9]{1}[a-zA-Z]{1})",
        r"|([a-zA-Z0-9][a-zA-Z0-9\-_]{1,61}[a-zA-Z0-9]))",
        r"\.([a-zA-Z]{2,6}|[a-zA-Z0-9\-]{2,30}\.[a-zA-Z]{2,3})$",
    ))
    .expect("valid DNS name pattern")
});

/// A `(name, zone)` split of an id where both halves look like DNS names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub name: String,
    pub zone: String,
}

impl ImportId {
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.zone)
    }
}

/// Heuristic check that `s` is a label followed by a TLD-like suffix.
///
/// This is not an RFC 1035 validator. It only exists to tell the valid
/// splits of an import id apart from the invalid ones.
pub fn is_dns_name(s: &str) -> bool {
    !s.is_empty() && RE_DNS_NAME.is_match(s)
}

/// Splits `id` into its name and zone.
///
/// Fails with [`Error::UnparseableId`] when no split validates and with
/// [`Error::AmbiguousId`] when more than one does.
pub fn parse_id(id: &str) -> Result<ImportId> {
    let matches = candidates(id);
    debug!("import id {:?}: {} candidate split(s)", id, matches.len());

    let mut iter = matches.into_iter();
    match (iter.next(), iter.next()) {
        (None, _) => Err(Error::UnparseableId(id.to_string())),
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => Err(Error::AmbiguousId(id.to_string())),
    }
}

/// All splits of `id` with a valid name and zone, in left to right order.
fn candidates(id: &str) -> Vec<ImportId> {
    let items: Vec<&str> = id.split('.').collect();

    (0..items.len())
        .filter_map(|i| {
            let (name_tokens, zone_tokens) = items.split_at(i);
            if name_tokens.is_empty() || zone_tokens.is_empty() {
                return None;
            }

            let name = name_tokens.join(".");
            let zone = zone_tokens.join(".");
            (is_dns_name(&name) && is_dns_name(&zone)).then_some(ImportId { name, zone })
        })
        .collect()
}
