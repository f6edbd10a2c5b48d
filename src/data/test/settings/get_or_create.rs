use super::*;

/// Tests that the first read seeds the default settings row.
///
/// Expected: Ok with closed applications and open registration
#[tokio::test]
async fn seeds_defaults_on_first_read() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(SystemSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let settings = repo.get_or_create().await.unwrap();

    assert!(!settings.applications_open);
    assert!(settings.can_register);
    assert_eq!(settings.min_application_length, 500);
    assert_eq!(settings.max_application_length, 750);

    Ok(())
}

/// Tests that repeated reads reuse the single row.
///
/// Expected: Ok with identical settings both times
#[tokio::test]
async fn reuses_existing_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(SystemSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SettingsRepository::new(db);
    let first = repo.get_or_create().await.unwrap();
    let second = repo.get_or_create().await.unwrap();

    assert_eq!(first, second);

    use sea_orm::EntityTrait;
    let count = SystemSetting::find().all(db).await?.len();
    assert_eq!(count, 1);

    Ok(())
}
