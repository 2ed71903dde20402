//! Users, identity resolution and the health check.

mod common;

use mtg_manager::models::Identity;
use mtg_manager::{MtgManager, MtgManagerError, StaticIdentity};

#[test]
fn create_assigns_id_and_timestamp() {
    let fx = common::setup_manager();
    assert_eq!(fx.alice.email, "alice@example.com");
    assert_eq!(fx.alice.name.as_deref(), Some("Alice"));
    assert_eq!(fx.bob.name, None);
    assert_ne!(fx.alice.id, fx.bob.id);
    // 2024-01-01T00:00:00
    assert_eq!(fx.alice.created_at.len(), 19);
    assert_eq!(&fx.alice.created_at[10..11], "T");
}

#[test]
fn duplicate_email_is_rejected() {
    let fx = common::setup_manager();
    let err = fx
        .manager
        .users()
        .create(" alice@example.com ", None)
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::InvalidArgument(_)));
    assert_eq!(fx.manager.users().count().unwrap(), 2);
}

#[test]
fn blank_email_is_rejected() {
    let fx = common::setup_manager();
    assert!(fx.manager.users().create("  ", Some("Nobody")).is_err());
}

#[test]
fn find_by_email_and_id() {
    let fx = common::setup_manager();
    let users = fx.manager.users();
    assert_eq!(
        users.find_by_email("bob@example.com").unwrap(),
        Some(fx.bob.clone())
    );
    assert_eq!(users.find_by_id(&fx.alice.id).unwrap(), Some(fx.alice.clone()));
    assert_eq!(users.find_by_email("carol@example.com").unwrap(), None);
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_signed_in_user() {
    let fx = common::setup_manager();
    let provider = StaticIdentity::signed_in(Identity::new("alice@example.com"));
    let user = fx.manager.users().resolve(&provider).unwrap();
    assert_eq!(user, fx.alice);
}

#[test]
fn resolve_anonymous_is_unauthorized() {
    let fx = common::setup_manager();
    let err = fx
        .manager
        .users()
        .resolve(&StaticIdentity::anonymous())
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::Unauthorized(_)));
}

#[test]
fn resolve_unknown_email_is_not_found() {
    let fx = common::setup_manager();
    let provider = || Some(Identity::new("carol@example.com"));
    let err = fx.manager.users().resolve(&provider).unwrap_err();
    assert!(matches!(err, MtgManagerError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// health
// ---------------------------------------------------------------------------

#[test]
fn health_reports_user_count() {
    let fx = common::setup_manager();
    let health = fx.manager.health().unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.user_count, 2);
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn health_on_empty_database() {
    let manager = MtgManager::builder()
        .in_memory()
        .offline(true)
        .build()
        .unwrap();
    assert_eq!(manager.health().unwrap().user_count, 0);
}
