mod data;
pub use data::ResourceData;

pub mod schema;
pub use schema::{AttrKind, AttrMode, AttributeSchema, schema};

mod rrset;
pub use rrset::{Change, RRSetResource, RecordResource, plan, populate_from_rrset};

#[cfg(test)]
mod unit_test;
