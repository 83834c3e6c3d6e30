use crate::{ResolverOptions, SessionOptions};

use googletest::prelude::*;
use tm_config::SessionConfig;

#[test]
fn given_default_options_then_refresh_and_reconcile_enabled() {
    let options = SessionOptions::default();

    assert_that!(options.resolver.force_refresh_claims, eq(true));
    assert_that!(options.reconcile_on_reconnect, eq(true));
}

#[test]
fn given_session_config_when_converted_then_flags_carried() {
    let config = SessionConfig {
        force_refresh_claims: false,
        reconcile_on_reconnect: false,
    };

    let options = SessionOptions::from(&config);

    assert_that!(
        options.resolver,
        eq(ResolverOptions {
            force_refresh_claims: false
        })
    );
    assert_that!(options.reconcile_on_reconnect, eq(false));
}
