mod common;

use std::sync::Arc;
use std::time::Duration;

use bazaar_application::BundleBuilder;
use bazaar_core::BazaarError;
use bazaar_core::capability::OwnerOrAdministrator;
use bazaar_core::catalog::{
    CatalogRepository, DEFAULT_OPTION_EMOJI, DEFAULT_PANEL_ICON, OptionFields, PanelFields,
    SessionKey,
};
use bazaar_infrastructure::JsonCatalogRepository;
use common::{ADMIN, Fixture, admin, member, owner};

fn pack_panel() -> PanelFields {
    PanelFields::new("Pack", "d").with_icon("📦")
}

#[tokio::test]
async fn test_draft_with_one_option_finalizes_into_bundle() {
    let fx = Fixture::new().await;

    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    let count = fx
        .builder
        .add_option(&admin(), &key, OptionFields::new("5 Rooms", "2.90"))
        .await
        .unwrap();
    assert_eq!(count, 1);

    let bundle_id = fx.builder.finalize(&admin(), &key).await.unwrap();

    let bundle = fx.catalog.find_bundle(&bundle_id).await.unwrap().unwrap();
    assert_eq!(bundle.title, "Pack");
    assert_eq!(bundle.options.len(), 1);
    assert_eq!(bundle.options[0].price, "2.90");
    assert!(fx.builder.sessions().get(&key).await.is_none());
}

#[tokio::test]
async fn test_finalize_empty_draft_keeps_session() {
    let fx = Fixture::new().await;
    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();

    let err = fx.builder.finalize(&admin(), &key).await.unwrap_err();

    assert_eq!(err, BazaarError::EmptyBundle);
    assert!(fx.builder.sessions().get(&key).await.is_some());
    assert!(fx.catalog.list_bundles().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_finalize_reports_session_not_found() {
    let fx = Fixture::new().await;
    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    fx.builder
        .add_option(&admin(), &key, OptionFields::new("A", "1.00"))
        .await
        .unwrap();

    fx.builder.finalize(&admin(), &key).await.unwrap();
    let err = fx.builder.finalize(&admin(), &key).await.unwrap_err();

    assert!(matches!(err, BazaarError::SessionNotFound { .. }));
    assert_eq!(fx.catalog.list_bundles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_finalize_commits_once() {
    let fx = Fixture::new().await;
    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    fx.builder
        .add_option(&admin(), &key, OptionFields::new("A", "1.00"))
        .await
        .unwrap();

    let (by_admin, by_owner) = (admin(), owner());
    let (first, second) = tokio::join!(
        fx.builder.finalize(&by_admin, &key),
        fx.builder.finalize(&by_owner, &key)
    );

    assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
    assert_eq!(fx.catalog.list_bundles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_option_without_draft() {
    let fx = Fixture::new().await;

    let err = fx
        .builder
        .add_option(&admin(), &SessionKey(ADMIN), OptionFields::new("A", "1"))
        .await
        .unwrap_err();

    assert!(matches!(err, BazaarError::SessionNotFound { .. }));
}

#[tokio::test]
async fn test_restarting_draft_discards_previous_options() {
    let fx = Fixture::new().await;
    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    for name in ["A", "B"] {
        fx.builder
            .add_option(&admin(), &key, OptionFields::new(name, "1.00"))
            .await
            .unwrap();
    }

    let restarted = fx
        .builder
        .start_draft(&admin(), PanelFields::new("Second", "d"))
        .await
        .unwrap();
    assert_eq!(restarted, key);
    assert_eq!(fx.builder.sessions().len().await, 1);

    fx.builder
        .add_option(&admin(), &key, OptionFields::new("C", "3.00"))
        .await
        .unwrap();
    let bundle_id = fx.builder.finalize(&admin(), &key).await.unwrap();

    let bundle = fx.catalog.find_bundle(&bundle_id).await.unwrap().unwrap();
    assert_eq!(bundle.title, "Second");
    assert_eq!(bundle.options.len(), 1);
    assert_eq!(bundle.options[0].name, "C");
}

#[tokio::test]
async fn test_sessions_are_isolated_per_actor() {
    let fx = Fixture::new().await;
    let admin_key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    let owner_key = fx
        .builder
        .start_draft(&owner(), PanelFields::new("Other", "d"))
        .await
        .unwrap();
    assert_ne!(admin_key, owner_key);

    fx.builder
        .add_option(&owner(), &owner_key, OptionFields::new("X", "9"))
        .await
        .unwrap();

    let admin_session = fx.builder.sessions().get(&admin_key).await.unwrap();
    assert_eq!(admin_session.option_count(), 0);
    assert_eq!(admin_session.draft.title, "Pack");
}

#[tokio::test]
async fn test_unauthorized_steps_do_not_mutate() {
    let fx = Fixture::new().await;

    let err = fx
        .builder
        .start_draft(&member(), pack_panel())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert!(fx.builder.sessions().is_empty().await);

    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    fx.builder
        .add_option(&admin(), &key, OptionFields::new("A", "1"))
        .await
        .unwrap();

    let err = fx
        .builder
        .add_option(&member(), &key, OptionFields::new("B", "2"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let err = fx.builder.finalize(&member(), &key).await.unwrap_err();
    assert!(err.is_unauthorized());

    let err = fx.builder.cancel(&member(), &key).await.unwrap_err();
    assert!(err.is_unauthorized());

    assert_eq!(fx.builder.sessions().get(&key).await.unwrap().option_count(), 1);
    assert!(fx.catalog.list_bundles().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_commit_restores_session() {
    let fx = Fixture::new().await;
    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    fx.builder
        .add_option(&admin(), &key, OptionFields::new("A", "1.00"))
        .await
        .unwrap();

    fx.catalog.fail_inserts(true);
    let err = fx.builder.finalize(&admin(), &key).await.unwrap_err();
    assert!(matches!(err, BazaarError::Io { .. }));
    assert_eq!(fx.builder.sessions().get(&key).await.unwrap().option_count(), 1);

    fx.catalog.fail_inserts(false);
    fx.builder.finalize(&admin(), &key).await.unwrap();
    assert!(fx.builder.sessions().get(&key).await.is_none());
}

#[tokio::test]
async fn test_cancel_discards_draft() {
    let fx = Fixture::new().await;
    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();

    fx.builder.cancel(&owner(), &key).await.unwrap();

    let err = fx
        .builder
        .add_option(&admin(), &key, OptionFields::new("A", "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, BazaarError::SessionNotFound { .. }));
    let err = fx.builder.cancel(&admin(), &key).await.unwrap_err();
    assert!(matches!(err, BazaarError::SessionNotFound { .. }));
}

#[tokio::test]
async fn test_sweep_reclaims_idle_drafts() {
    let fx = Fixture::new().await;
    let builder = BundleBuilder::new(fx.catalog.clone(), Arc::new(OwnerOrAdministrator))
        .with_session_ttl(Duration::ZERO);
    let key = builder.start_draft(&admin(), pack_panel()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    assert_eq!(builder.sweep_expired().await, 1);
    assert!(builder.sessions().get(&key).await.is_none());
    assert_eq!(fx.builder.sweep_expired().await, 0);
}

#[tokio::test]
async fn test_panel_and_option_defaults() {
    let fx = Fixture::new().await;
    let mut panel = PanelFields::new("Pack", "d").with_icon("   ");
    panel.image_url = Some("".to_string());
    let key = fx.builder.start_draft(&admin(), panel).await.unwrap();
    fx.builder
        .add_option(&admin(), &key, OptionFields::new("5 Rooms", "2.90"))
        .await
        .unwrap();
    let bundle_id = fx.builder.finalize(&admin(), &key).await.unwrap();

    let reopened = JsonCatalogRepository::open_in(fx.temp_dir.path())
        .await
        .unwrap();
    let bundle = reopened.find_bundle(&bundle_id).await.unwrap().unwrap();
    assert_eq!(bundle.icon, DEFAULT_PANEL_ICON);
    assert_eq!(bundle.image_url, None);
    assert_eq!(bundle.options[0].emoji, DEFAULT_OPTION_EMOJI);
    assert_eq!(bundle.options[0].description, "Price: 2.90");
    assert_eq!(bundle.edited_at, None);
}

#[tokio::test]
async fn test_edit_bundle_replaces_panel_fields_only() {
    let fx = Fixture::new().await;
    let key = fx.builder.start_draft(&admin(), pack_panel()).await.unwrap();
    fx.builder
        .add_option(&admin(), &key, OptionFields::new("A", "1.00"))
        .await
        .unwrap();
    let bundle_id = fx.builder.finalize(&admin(), &key).await.unwrap();

    let edited = fx
        .builder
        .edit_bundle(&owner(), &bundle_id, PanelFields::new("Renamed", "new").with_icon("🎁"))
        .await
        .unwrap();
    assert_eq!(edited.title, "Renamed");
    assert_eq!(edited.icon, "🎁");
    assert_eq!(edited.options.len(), 1);
    assert!(edited.edited_at.is_some());

    let stored = fx.catalog.find_bundle(&bundle_id).await.unwrap().unwrap();
    assert_eq!(stored, edited);
}

#[tokio::test]
async fn test_edit_bundle_checks_capability_before_lookup() {
    let fx = Fixture::new().await;

    let err = fx
        .builder
        .edit_bundle(&member(), "drop_missing", PanelFields::new("X", "y"))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let err = fx
        .builder
        .edit_bundle(&admin(), "drop_missing", PanelFields::new("X", "y"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
