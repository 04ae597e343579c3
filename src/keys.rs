//! Preference key names.
//!
//! All keys live in one namespace per store. Each key is always read and
//! written with the same [`PrefType`].

use crate::accessor::PrefType;

pub const ID: &str = "id";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const DATE_OF_BIRTH: &str = "date_of_birth";
pub const CHILDREN: &str = "children";
pub const IS_DEV: &str = "is_dev";
pub const CHARGE: &str = "charge";
pub const BALANCE: &str = "balance";

/// A known key and the type it is always accessed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub name: &'static str,
    pub pref_type: PrefType,
}

impl KeySpec {
    const fn new(name: &'static str, pref_type: PrefType) -> Self {
        Self { name, pref_type }
    }
}

/// Every known key, in profile order.
pub const ALL: [KeySpec; 8] = [
    KeySpec::new(ID, PrefType::Int),
    KeySpec::new(FIRST_NAME, PrefType::String),
    KeySpec::new(LAST_NAME, PrefType::String),
    KeySpec::new(DATE_OF_BIRTH, PrefType::Long),
    KeySpec::new(CHILDREN, PrefType::StringSet),
    KeySpec::new(IS_DEV, PrefType::Bool),
    KeySpec::new(CHARGE, PrefType::Float),
    KeySpec::new(BALANCE, PrefType::Double),
];

/// Look up a known key by name.
pub fn lookup(name: &str) -> Option<KeySpec> {
    ALL.iter().copied().find(|spec| spec.name == name)
}
