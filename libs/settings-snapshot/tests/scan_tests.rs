//! Integration tests for member discovery

use settings_snapshot::{
    scan, try_scan, Access, MemberDescriptor, Settings, SettingsBase, SettingValue, SnapshotError,
    Visibility,
};
use std::cell::RefCell;

mod common;
use common::{EmptySettings, NetworkSettings, ServerSettings, ServiceSettings};

fn names<T: Settings>(target: &RefCell<T>) -> Vec<&'static str> {
    scan(target).map(|s| s.name()).collect()
}

#[test]
fn test_one_handle_per_eligible_member() {
    let target = RefCell::new(ServiceSettings::new());
    assert_eq!(names(&target), vec!["timeout", "name"]);
}

#[test]
fn test_ineligible_members_are_excluded() {
    let target = RefCell::new(NetworkSettings::new());

    // base: marker type, revision: readonly, cache: skipped,
    // token and secret: not public
    assert_eq!(
        names(&target),
        vec!["port", "host_name", "ratio", "backoff", "proxy", "verbose"]
    );
}

#[test]
fn test_descriptors_cover_ineligible_members_too() {
    fn find(name: &str) -> &'static MemberDescriptor<NetworkSettings> {
        NetworkSettings::members()
            .iter()
            .find(|m| m.name() == name)
            .unwrap()
    }
    let members = NetworkSettings::members();

    assert_eq!(find("section").declaring_type(), Some(SettingsBase::TYPE_NAME));
    assert_eq!(find("revision").access(), Access::ReadOnly);
    assert_eq!(find("token").visibility(), Visibility::Private);
    assert_eq!(find("secret").visibility(), Visibility::Private);
    assert!(members.iter().all(|m| m.name() != "cache"));
}

#[test]
fn test_marker_members_remain_readable_and_untouched() {
    let target = RefCell::new(NetworkSettings::new());
    let snapshot: Vec<_> = scan(&target).collect();

    assert!(snapshot.iter().all(|s| s.declaring_type() != SettingsBase::TYPE_NAME));
    assert_eq!(target.borrow().base.section, "network");
    assert_eq!(target.borrow().secret(), "hunter2");
}

#[test]
fn test_flattened_user_type_stays_eligible() {
    let target = RefCell::new(ServerSettings {
        name: "edge".to_string(),
        limits: common::Limits { max_connections: 64 },
    });
    let settings: Vec<_> = scan(&target).collect();

    assert_eq!(settings.len(), 2);
    assert_eq!(settings[1].name(), "max_connections");
    assert!(settings[1].declaring_type().ends_with("common::Limits"));
    assert!(settings[0].declaring_type().ends_with("common::ServerSettings"));

    settings[1].set_value(128u32);
    assert_eq!(target.borrow().limits.max_connections, 128);
}

#[test]
fn test_no_eligible_members() {
    let target = RefCell::new(EmptySettings {
        base: SettingsBase::default(),
        version: 1,
    });
    assert_eq!(scan(&target).count(), 0);
}

#[test]
fn test_order_is_stable_across_instances() {
    let first = RefCell::new(NetworkSettings::new());
    let second = RefCell::new(NetworkSettings::new());
    second.borrow_mut().port = 9090;

    assert_eq!(names(&first), names(&second));
    assert_eq!(names(&first), names(&first));
}

#[test]
fn test_defaults_match_values_after_scan() {
    let target = RefCell::new(NetworkSettings::new());

    for setting in scan(&target) {
        assert!(!setting.changed(), "{setting} changed right after scan");
        assert_eq!(setting.default().cloned(), setting.value());
    }
}

#[test]
fn test_partial_consumption_reads_only_consumed_members() {
    let target = RefCell::new(ServiceSettings::new());
    let mut settings = scan(&target);
    let timeout = settings.next().unwrap();

    // name is captured later, after the target changed
    target.borrow_mut().name = "renamed".to_string();
    let name = settings.next().unwrap();

    assert_eq!(timeout.default(), Some(&SettingValue::I32(30)));
    assert_eq!(name.default(), Some(&SettingValue::from("renamed")));
}

#[test]
fn test_absent_target_is_invalid_argument() {
    let err = try_scan::<ServiceSettings>(None).err().unwrap();
    assert_eq!(err, SnapshotError::InvalidArgument { name: "target" });
    assert_eq!(err.to_string(), "Invalid argument: target must not be absent");
}

#[test]
fn test_type_name_is_module_qualified() {
    assert!(ServiceSettings::TYPE_NAME.ends_with("common::ServiceSettings"));
    assert!(SettingsBase::TYPE_NAME.ends_with("::SettingsBase"));
}
