use crate::Identity;

use googletest::prelude::*;

#[test]
fn given_identity_builder_when_built_then_fields_set() {
    let identity = Identity::new("u1")
        .with_email("a@b.com")
        .with_display_name("Ada")
        .with_avatar_ref("https://img/ada.png");

    assert_that!(identity.id, eq("u1"));
    assert_that!(identity.email, some(eq("a@b.com")));
    assert_that!(identity.display_name, some(eq("Ada")));
    assert_that!(identity.avatar_ref, some(eq("https://img/ada.png")));
}

#[test]
fn given_blank_id_when_validated_then_error() {
    let identity = Identity::new("   ");

    assert_that!(identity.validate(), err(anything()));
}

#[test]
fn given_missing_optional_fields_when_deserialized_then_none() {
    let identity: Identity = serde_json::from_str(r#"{"id":"u9"}"#).unwrap();

    assert_that!(identity.email, none());
    assert_that!(identity.display_name, none());
    assert_that!(identity.avatar_ref, none());
}
