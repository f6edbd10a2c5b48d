use super::*;

/// Tests the dashboard status counts.
///
/// Expected: Ok with one application counted in each bucket
#[tokio::test]
async fn counts_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_application_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let faction = factory::create_faction(db).await?;
    let repo = ApplicationRepository::new(db);

    for status in [
        ApplicationStatus::Pending,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ] {
        let user = factory::create_user(db).await?;
        factory::application::ApplicationFactory::new(db, user.id, faction.id)
            .status(status)
            .build()
            .await?;
    }

    let counts = repo.counts().await?;

    assert_eq!(counts.pending, 1);
    assert_eq!(counts.accepted, 1);
    assert_eq!(counts.rejected, 1);

    Ok(())
}
