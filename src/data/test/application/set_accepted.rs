use super::*;

/// Tests accepting a pending application.
///
/// Expected: Ok with status accepted
#[tokio::test]
async fn accepts_pending_application() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let faction = factory::create_faction(db).await?;

    let repo = ApplicationRepository::new(db);
    let application = repo.create(param(user.id, faction.id)).await?;

    let accepted = repo.set_accepted(application.id).await?;

    assert_eq!(accepted.status, ApplicationStatus::Accepted);

    Ok(())
}

/// Tests that accepting a previously rejected application clears the
/// rejection reason.
///
/// Expected: Ok with status accepted and no stale reason
#[tokio::test]
async fn clears_rejection_reason_on_accept() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let faction = factory::create_faction(db).await?;

    let repo = ApplicationRepository::new(db);
    let application = repo.create(param(user.id, faction.id)).await?;
    repo.set_rejected(application.id, Some("too short".to_string()))
        .await?;

    let accepted = repo.set_accepted(application.id).await?;

    assert_eq!(accepted.status, ApplicationStatus::Accepted);
    assert!(accepted.rejection_reason.is_none());

    Ok(())
}

/// Tests accepting a missing application.
///
/// Expected: Err(RecordNotFound)
#[tokio::test]
async fn fails_for_missing_application() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ApplicationRepository::new(db);
    let result = repo.set_accepted(12345).await;

    assert!(result.is_err());

    Ok(())
}
