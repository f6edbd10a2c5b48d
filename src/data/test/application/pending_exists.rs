use super::*;

/// Tests the pending-application check used by the resubmission gate.
///
/// Expected: true only while a pending application exists
#[tokio::test]
async fn detects_pending_applications() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let faction = factory::create_faction(db).await?;

    let repo = ApplicationRepository::new(db);
    assert!(!repo.pending_exists_for_user(user.id).await?);

    let application = repo.create(param(user.id, faction.id)).await?;
    assert!(repo.pending_exists_for_user(user.id).await?);

    repo.set_rejected(application.id, Some("nope".to_string()))
        .await?;
    assert!(!repo.pending_exists_for_user(user.id).await?);

    Ok(())
}

/// Tests that another user's pending application doesn't leak into the
/// check.
///
/// Expected: false for a user with no applications
#[tokio::test]
async fn scoped_to_the_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let applicant = factory::create_user(db).await?;
    let bystander = factory::create_user(db).await?;
    let faction = factory::create_faction(db).await?;

    let repo = ApplicationRepository::new(db);
    repo.create(param(applicant.id, faction.id)).await?;

    assert!(!repo.pending_exists_for_user(bystander.id).await?);

    Ok(())
}
