use super::*;

/// Tests the dashboard funnel counts.
///
/// Builds one user in each funnel stage and verifies each count picks up
/// exactly its stage.
///
/// Expected: Ok with unlinked=1, linked-unwhitelisted=1, whitelisted=1
#[tokio::test]
async fn funnel_counts_split_by_stage() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    // Fresh account, nothing linked.
    factory::create_user(db).await?;
    // Fully linked but not whitelisted.
    factory::user::UserFactory::new(db)
        .minecraft("Linked", "11111111-1111-1111-1111-111111111111")
        .discord_id("1001")
        .build()
        .await?;
    // Whitelisted.
    factory::user::UserFactory::new(db)
        .minecraft("Listed", "22222222-2222-2222-2222-222222222222")
        .discord_id("1002")
        .whitelisted(true)
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert_eq!(repo.count_unlinked().await?, 1);
    assert_eq!(repo.count_linked_unwhitelisted().await?, 1);
    assert_eq!(repo.count_whitelisted().await?, 1);

    Ok(())
}

/// Tests the whitelisted roster query.
///
/// Expected: Ok with only whitelisted users, ordered by username
#[tokio::test]
async fn whitelisted_roster_is_sorted() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("zeta")
        .whitelisted(true)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("alpha")
        .whitelisted(true)
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("middle")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let roster = repo.get_whitelisted().await?;

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].username, "alpha");
    assert_eq!(roster[1].username, "zeta");

    Ok(())
}
