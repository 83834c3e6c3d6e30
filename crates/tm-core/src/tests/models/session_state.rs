use crate::{Identity, Profile, ProfileSource, Role, SessionState};

#[test]
fn test_idle_is_loading_without_identity() {
    let state = SessionState::default();

    assert_eq!(state, SessionState::Idle);
    assert!(state.is_loading());
    assert!(state.identity().is_none());
    assert!(state.profile().is_none());
}

#[test]
fn test_resolving_has_identity_but_no_profile() {
    let state = SessionState::Resolving {
        identity: Identity::new("u1"),
    };

    assert!(state.is_loading());
    assert_eq!(state.identity().map(|i| i.id.as_str()), Some("u1"));
    assert!(state.profile().is_none());
}

#[test]
fn test_resolved_projects_profile_and_source() {
    let identity = Identity::new("u2");
    let profile = Profile::from_identity(&identity, Role::Admin);
    let state = SessionState::Resolved {
        identity,
        profile,
        source: ProfileSource::Stored,
    };

    assert!(!state.is_loading());
    assert!(state.is_admin());
    assert_eq!(state.source(), Some(ProfileSource::Stored));
    assert_eq!(state.name(), "resolved");
}

#[test]
fn test_signed_out_is_not_loading() {
    let state = SessionState::SignedOut;

    assert!(!state.is_loading());
    assert!(state.identity().is_none());
    assert!(!state.is_admin());
}
