use super::*;

/// Tests creating a new application.
///
/// Expected: Ok with status pending and no rejection reason
#[tokio::test]
async fn creates_pending_application() -> Result<(), DbErr> {
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

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(application.rejection_reason.is_none());
    assert_eq!(application.user_id, user.id);
    assert_eq!(application.character_name, "Aldric");

    Ok(())
}
