use super::*;

/// Tests case-insensitive username lookup.
///
/// Login and registration must treat `Steve` and `steve` as the same
/// account name.
///
/// Expected: Ok with the user found under any casing
#[tokio::test]
async fn matches_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("Steve")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let found = repo.find_by_username("steve").await?;
    assert!(found.is_some());

    let found = repo.find_by_username("STEVE").await?;
    assert!(found.is_some());

    Ok(())
}

/// Tests lookup of a username that doesn't exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let found = repo.find_by_username("nobody").await?;

    assert!(found.is_none());

    Ok(())
}
