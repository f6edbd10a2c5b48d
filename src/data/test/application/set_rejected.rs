use super::*;

/// Tests rejecting an application with a reason.
///
/// Expected: Ok with status rejected and the reason stored
#[tokio::test]
async fn rejects_with_reason() -> Result<(), DbErr> {
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

    let rejected = repo
        .set_rejected(application.id, Some("backstory too thin".to_string()))
        .await?;

    assert_eq!(rejected.status, ApplicationStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("backstory too thin")
    );

    Ok(())
}

/// Tests that an accepted application can be flipped to rejected.
///
/// The two terminal states stay mutually exclusive by construction since
/// status is a single column.
///
/// Expected: Ok with status rejected
#[tokio::test]
async fn overrides_previous_accept() -> Result<(), DbErr> {
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
    repo.set_accepted(application.id).await?;

    let rejected = repo.set_rejected(application.id, None).await?;

    assert_eq!(rejected.status, ApplicationStatus::Rejected);

    Ok(())
}
