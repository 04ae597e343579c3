//! A user profile kept in the default store.
//!
//! [`Profile`] binds one typed accessor per profile field. It is the
//! reference consumer of the accessor API: one side seeds the fields, the
//! other reads them back through independent accessors.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

use crate::accessor::Pref;
use crate::error::Result;
use crate::keys;
use crate::store::value::non_finite_label;
use crate::store::Context;

/// Sample date of birth: May 15, 1970 8:15:56 AM, in seconds since the epoch.
pub const SAMPLE_DATE_OF_BIRTH: i64 = 11_607_356;

/// Typed accessors for every profile field.
#[derive(Debug)]
pub struct Profile {
    pub id: Pref<i32>,
    pub first_name: Pref<String>,
    pub last_name: Pref<String>,
    pub date_of_birth: Pref<i64>,
    pub children: Pref<BTreeSet<String>>,
    pub is_dev: Pref<bool>,
    pub charge: Pref<f32>,
    pub balance: Pref<f64>,
}

/// Values read from a [`Profile`]. `None` means the field was never set.
///
/// Serialized, unset fields are `null` and non-finite floats are the
/// strings `"NaN"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<i64>,
    pub children: Option<BTreeSet<String>>,
    pub is_dev: Option<bool>,
    #[serde(serialize_with = "serialize_f32")]
    pub charge: Option<f32>,
    #[serde(serialize_with = "serialize_f64")]
    pub balance: Option<f64>,
}

fn serialize_f32<S>(value: &Option<f32>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.and_then(|v| non_finite_label(f64::from(v))) {
        Some(label) => serializer.serialize_str(label),
        None => value.serialize(serializer),
    }
}

fn serialize_f64<S>(value: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.and_then(non_finite_label) {
        Some(label) => serializer.serialize_str(label),
        None => value.serialize(serializer),
    }
}

impl Profile {
    /// Bind the profile fields in the context's default store.
    pub fn new(ctx: &Context) -> Self {
        Self {
            id: ctx.int_pref(keys::ID),
            first_name: ctx.string_pref(keys::FIRST_NAME),
            last_name: ctx.string_pref(keys::LAST_NAME),
            date_of_birth: ctx.long_pref(keys::DATE_OF_BIRTH),
            children: ctx.string_set_pref(keys::CHILDREN),
            is_dev: ctx.bool_pref(keys::IS_DEV),
            charge: ctx.float_pref(keys::CHARGE),
            balance: ctx.double_pref(keys::BALANCE),
        }
    }

    /// Write the sample profile.
    pub fn seed_sample(&self) -> Result<()> {
        self.id.set(7)?;
        self.first_name.set("John".to_string())?;
        self.last_name.set("Walker".to_string())?;
        self.date_of_birth.set(SAMPLE_DATE_OF_BIRTH)?;
        self.children
            .set(["Milly", "Niu"].iter().map(|s| s.to_string()).collect())?;
        self.is_dev.set(true)?;
        self.charge.set(70.0)?;
        self.balance.set(25659.72)?;
        Ok(())
    }

    /// Read every field.
    pub fn snapshot(&self) -> Result<ProfileSnapshot> {
        Ok(ProfileSnapshot {
            id: self.id.read()?,
            first_name: self.first_name.read()?,
            last_name: self.last_name.read()?,
            date_of_birth: self.date_of_birth.read()?,
            children: self.children.read()?,
            is_dev: self.is_dev.read()?,
            charge: self.charge.read()?,
            balance: self.balance.read()?,
        })
    }

    /// Remove every profile field.
    pub fn clear(&self) -> Result<()> {
        self.id.clear()?;
        self.first_name.clear()?;
        self.last_name.clear()?;
        self.date_of_birth.clear()?;
        self.children.clear()?;
        self.is_dev.clear()?;
        self.charge.clear()?;
        self.balance.clear()?;
        Ok(())
    }
}

impl ProfileSnapshot {
    /// One `(key, rendered value)` line per field, in key order of
    /// [`keys::ALL`]. Unset fields render as `None`.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        fn show<T: std::fmt::Debug>(value: &Option<T>) -> String {
            match value {
                Some(v) => format!("{:?}", v),
                None => "None".to_string(),
            }
        }

        vec![
            (keys::ID, show(&self.id)),
            (keys::FIRST_NAME, show(&self.first_name)),
            (keys::LAST_NAME, show(&self.last_name)),
            (keys::DATE_OF_BIRTH, show(&self.date_of_birth)),
            (keys::CHILDREN, show(&self.children)),
            (keys::IS_DEV, show(&self.is_dev)),
            (keys::CHARGE, show(&self.charge)),
            (keys::BALANCE, show(&self.balance)),
        ]
    }

    /// Log every field at info level.
    pub fn log(&self) {
        for (key, value) in self.lines() {
            tracing::info!("{}: {}", key, value);
        }
    }
}
