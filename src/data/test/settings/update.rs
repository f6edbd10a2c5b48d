use super::*;

/// Tests the full settings update.
///
/// Expected: Ok with every field replaced
#[tokio::test]
async fn replaces_all_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(SystemSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let settings = repo.update(full_param()).await.unwrap();

    assert!(settings.applications_open);
    assert!(!settings.can_register);
    assert_eq!(settings.site_theme, "light");
    assert_eq!(settings.min_application_length, 300);
    assert_eq!(settings.panel_api_key.as_deref(), Some("key"));
    assert_eq!(
        settings.ticket_webhook.as_deref(),
        Some("https://discord.com/api/webhooks/1/a")
    );
    assert!(settings.application_webhook.is_none());

    Ok(())
}

/// Tests the single-toggle setter.
///
/// Expected: Ok with only the applications toggle changed
#[tokio::test]
async fn flips_applications_toggle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(SystemSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let before = repo.get_or_create().await.unwrap();
    assert!(!before.applications_open);

    let after = repo.set_applications_open(true).await.unwrap();

    assert!(after.applications_open);
    assert_eq!(after.can_register, before.can_register);

    Ok(())
}
