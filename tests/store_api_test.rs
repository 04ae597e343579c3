//! Integration tests for the typed accessor API.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use prefstore::double::{decode_double, encode_double};
use prefstore::{keys, Context, PrefError, PrefValue, Profile};
use tempfile::TempDir;

fn set_of(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn profile_scenario() {
    let temp = TempDir::new().unwrap();
    let ctx = Context::new(temp.path());

    let id = ctx.int_pref(keys::ID);
    let first_name = ctx.string_pref(keys::FIRST_NAME);
    let children = ctx.string_set_pref(keys::CHILDREN);
    let balance = ctx.double_pref(keys::BALANCE);
    let is_dev = ctx.bool_pref(keys::IS_DEV);

    id.set(7).unwrap();
    first_name.set("John".to_string()).unwrap();
    children.set(set_of(&["Milly", "Niu"])).unwrap();
    balance.set(25659.72).unwrap();
    is_dev.set(true).unwrap();
    is_dev.write(None).unwrap();

    assert_eq!(id.read().unwrap(), Some(7));
    assert_eq!(first_name.read().unwrap().as_deref(), Some("John"));
    assert_eq!(children.read().unwrap(), Some(set_of(&["Niu", "Milly"])));
    assert_eq!(balance.read().unwrap(), Some(25659.72));
    assert_eq!(is_dev.read().unwrap(), None);
}

#[test]
fn values_survive_new_context() {
    let temp = TempDir::new().unwrap();

    {
        let ctx = Context::new(temp.path());
        Profile::new(&ctx).seed_sample().unwrap();
    }

    let ctx = Context::new(temp.path());
    let snapshot = Profile::new(&ctx).snapshot().unwrap();
    assert_eq!(snapshot.id, Some(7));
    assert_eq!(snapshot.last_name.as_deref(), Some("Walker"));
    assert_eq!(snapshot.charge, Some(70.0));
    assert_eq!(
        snapshot.balance.map(f64::to_bits),
        Some(25659.72_f64.to_bits())
    );
}

#[test]
fn independent_keys_do_not_interfere() {
    let temp = TempDir::new().unwrap();
    let ctx = Context::new(temp.path());

    let first_name = ctx.string_pref(keys::FIRST_NAME);
    let last_name = ctx.string_pref(keys::LAST_NAME);

    first_name.set("John".to_string()).unwrap();
    last_name.set("Walker".to_string()).unwrap();
    last_name.set("Doe".to_string()).unwrap();
    last_name.clear().unwrap();

    assert_eq!(first_name.read().unwrap().as_deref(), Some("John"));
}

#[test]
fn never_written_reads_absent_for_every_type() {
    let temp = TempDir::new().unwrap();
    let ctx = Context::new(temp.path());

    assert!(ctx.int_pref("a").read().unwrap().is_none());
    assert!(ctx.long_pref("b").read().unwrap().is_none());
    assert!(ctx.float_pref("c").read().unwrap().is_none());
    assert!(ctx.double_pref("d").read().unwrap().is_none());
    assert!(ctx.bool_pref("e").read().unwrap().is_none());
    assert!(ctx.string_pref("f").read().unwrap().is_none());
    assert!(ctx.string_set_pref("g").read().unwrap().is_none());
}

#[test]
fn clearing_removes_from_store() {
    let temp = TempDir::new().unwrap();
    let ctx = Context::new(temp.path());
    let dob = ctx.long_pref(keys::DATE_OF_BIRTH);

    dob.set(11607356).unwrap();
    assert!(ctx.default_preferences().unwrap().contains(keys::DATE_OF_BIRTH));

    dob.clear().unwrap();
    assert_eq!(dob.read().unwrap(), None);
    assert!(!ctx.default_preferences().unwrap().contains(keys::DATE_OF_BIRTH));
}

#[test]
fn double_is_stored_as_raw_bits() {
    let temp = TempDir::new().unwrap();
    let ctx = Context::new(temp.path());

    ctx.double_pref(keys::BALANCE).set(-0.0).unwrap();

    let raw = ctx.default_preferences().unwrap().get(keys::BALANCE);
    assert_eq!(raw, Some(PrefValue::Long(i64::MIN)));
    let read = ctx.double_pref(keys::BALANCE).read().unwrap().unwrap();
    assert_eq!(read, 0.0);
    assert!(read.is_sign_negative());
}

#[test]
fn double_bits_survive_fresh_context() {
    let temp = TempDir::new().unwrap();
    let values = [
        f64::from_bits(0x7ff8_0000_dead_beef),
        f64::from_bits(0xfff0_0000_0000_0001),
        f64::from_bits(i64::MAX as u64),
        -0.0,
        25659.72,
    ];

    {
        let ctx = Context::new(temp.path());
        for (i, value) in values.iter().enumerate() {
            ctx.double_pref(format!("balance_{}", i)).set(*value).unwrap();
        }
    }

    let on_disk = std::fs::read_to_string(temp.path().join("shared_preferences.yml")).unwrap();
    assert!(on_disk.contains(&i64::MIN.to_string()));

    let ctx = Context::new(temp.path());
    for (i, value) in values.iter().enumerate() {
        let read = ctx
            .double_pref(format!("balance_{}", i))
            .read()
            .unwrap()
            .unwrap();
        assert_eq!(read.to_bits(), value.to_bits(), "balance_{}", i);
    }
}

#[test]
fn two_contexts_on_one_dir_keep_both_keys() {
    let temp = TempDir::new().unwrap();
    let c = Context::new(temp.path());
    let d = Context::new(temp.path());

    assert_eq!(c.int_pref("x").read().unwrap(), None);
    assert_eq!(d.int_pref("y").read().unwrap(), None);

    c.int_pref("x").set(1).unwrap();
    d.int_pref("y").set(2).unwrap();
    assert_eq!(d.int_pref("x").read().unwrap(), Some(1));

    drop(c);
    drop(d);

    let fresh = Context::new(temp.path());
    assert_eq!(fresh.int_pref("x").read().unwrap(), Some(1));
    assert_eq!(fresh.int_pref("y").read().unwrap(), Some(2));
}

#[test]
fn signed_zeros_differ_only_in_bits() {
    let pos = encode_double(0.0);
    let neg = encode_double(-0.0);
    assert_ne!(pos, neg);
    assert_eq!(decode_double(pos), decode_double(neg));
    assert_ne!(decode_double(pos).to_bits(), decode_double(neg).to_bits());
}

#[test]
fn wrong_accessor_type_fails_fast() {
    let temp = TempDir::new().unwrap();
    let ctx = Context::new(temp.path());

    ctx.string_pref(keys::FIRST_NAME)
        .set("John".to_string())
        .unwrap();

    let err = ctx.double_pref(keys::FIRST_NAME).read().unwrap_err();
    assert!(matches!(err, PrefError::TypeMismatch { .. }));
}

#[test]
fn concurrent_writers_on_distinct_keys() {
    let temp = TempDir::new().unwrap();
    let ctx = Arc::new(Context::new(temp.path()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let pref = ctx.int_pref(format!("counter_{}", i));
                for n in 0..10 {
                    pref.set(n).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let reopened = Context::new(temp.path());
    for i in 0..8 {
        assert_eq!(
            reopened.int_pref(format!("counter_{}", i)).read().unwrap(),
            Some(9)
        );
    }
}

#[test]
fn unreadable_store_is_storage_unavailable() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("shared_preferences.yml"), ":: not yaml ::\n- [").unwrap();
    let ctx = Context::new(temp.path());

    let err = ctx.int_pref(keys::ID).read().unwrap_err();
    assert!(matches!(err, PrefError::StorageUnavailable { .. }));
}
