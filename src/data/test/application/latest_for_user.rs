use super::*;

/// Tests that the latest application wins.
///
/// The cooldown window is measured from this row, so ordering matters.
///
/// Expected: Ok with the most recently created application
#[tokio::test]
async fn returns_most_recent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let faction = factory::create_faction(db).await?;

    let repo = ApplicationRepository::new(db);
    let first = repo.create(param(user.id, faction.id)).await?;
    repo.set_rejected(first.id, None).await?;
    let second = repo.create(param(user.id, faction.id)).await?;

    let latest = repo.latest_for_user(user.id).await?;

    assert_eq!(latest.map(|a| a.id), Some(second.id));

    Ok(())
}

/// Tests a user with no applications.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_applications() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = ApplicationRepository::new(db);
    assert!(repo.latest_for_user(user.id).await?.is_none());

    Ok(())
}
