use crate::{Identity, Profile, ProfileUpdate, Role};

use chrono::{Duration, Timelike};
use googletest::prelude::*;

#[test]
fn given_identity_when_profile_built_then_copies_attributes() {
    let identity = Identity::new("u1").with_email("a@b.com");

    let profile = Profile::from_identity(&identity, Role::User);

    assert_that!(profile.id, eq("u1"));
    assert_that!(profile.email, some(eq("a@b.com")));
    assert_that!(profile.display_name, none());
    assert_that!(profile.role, eq(Role::User));
    assert_that!(profile.created_at, eq(profile.updated_at));
}

#[test]
fn given_new_profile_then_timestamps_have_millisecond_precision() {
    let profile = Profile::from_identity(&Identity::new("u1"), Role::User);

    assert_that!(profile.created_at.nanosecond() % 1_000_000, eq(0));
}

#[test]
fn given_local_fallback_then_role_is_user() {
    let profile = Profile::local_fallback(&Identity::new("u3"));

    assert_that!(profile.role, eq(Role::User));
}

#[test]
fn given_user_profile_when_elevated_then_admin_and_changed() {
    let mut profile = Profile::from_identity(&Identity::new("u2"), Role::User);

    assert!(profile.elevate());
    assert_that!(profile.role, eq(Role::Admin));
}

#[test]
fn given_admin_profile_when_elevated_then_unchanged() {
    let mut profile = Profile::from_identity(&Identity::new("u2"), Role::Admin);

    assert!(!profile.elevate());
    assert_that!(profile.role, eq(Role::Admin));
}

#[test]
fn given_update_when_applied_then_created_at_is_preserved() {
    let mut profile = Profile::from_identity(&Identity::new("u1"), Role::User);
    let created_at = profile.created_at;
    let later = profile.updated_at + Duration::seconds(30);
    let update = ProfileUpdate {
        display_name: Some("Grace".to_string()),
        updated_at: Some(later),
        ..ProfileUpdate::default()
    };

    profile.apply(&update);

    assert_that!(profile.display_name, some(eq("Grace")));
    assert_that!(profile.updated_at, eq(later));
    assert_that!(profile.created_at, eq(created_at));
}

#[test]
fn given_profile_when_serialized_then_uses_camel_case_fields() {
    let profile = Profile::from_identity(&Identity::new("u1"), Role::Admin);

    let json = serde_json::to_string(&profile).unwrap();

    assert_that!(json, contains_substring("\"displayName\""));
    assert_that!(json, contains_substring("\"createdAt\""));
    assert_that!(json, contains_substring("\"role\":\"admin\""));
}

#[test]
fn given_default_update_then_is_empty() {
    assert!(ProfileUpdate::default().is_empty());
    assert!(!ProfileUpdate::role(Role::Admin).is_empty());
    assert!(!ProfileUpdate::default().touched().is_empty());
}
