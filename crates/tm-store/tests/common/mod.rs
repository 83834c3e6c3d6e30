#![allow(dead_code)]

use tm_core::{Identity, Profile, Role};

/// Creates a test Profile with an email derived from the id
pub fn create_test_profile(id: &str, role: Role) -> Profile {
    let identity = Identity::new(id)
        .with_email(format!("{}@example.com", id))
        .with_display_name(format!("User {}", id));
    Profile::from_identity(&identity, role)
}
