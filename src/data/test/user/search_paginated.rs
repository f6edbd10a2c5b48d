use super::*;

/// Tests the unfiltered DataTables query.
///
/// Expected: Ok with all users, filtered == total
#[tokio::test]
async fn returns_all_without_filter() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_user(db).await?;
    }

    let repo = UserRepository::new(db);
    let (users, filtered, total) = repo.search_paginated(None, 0, 25).await?;

    assert_eq!(users.len(), 3);
    assert_eq!(filtered, 3);
    assert_eq!(total, 3);

    Ok(())
}

/// Tests the substring filter on username and email.
///
/// Expected: Ok with only matching rows and the unfiltered total intact
#[tokio::test]
async fn filters_by_username_or_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("alpha")
        .email("alpha@example.com")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("beta")
        .email("beta@example.com")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("gamma")
        .email("contact-alpha@elsewhere.net")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let (users, filtered, total) = repo.search_paginated(Some("alpha"), 0, 25).await?;

    assert_eq!(users.len(), 2);
    assert_eq!(filtered, 2);
    assert_eq!(total, 3);

    Ok(())
}

/// Tests offset/limit paging with newest-first ordering.
///
/// Expected: Ok with the requested window
#[tokio::test]
async fn pages_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(factory::create_user(db).await?.id);
    }

    let repo = UserRepository::new(db);
    let (page, filtered, _total) = repo.search_paginated(None, 1, 2).await?;

    assert_eq!(filtered, 5);
    assert_eq!(page.len(), 2);
    // Newest first: offset 1 skips the latest id.
    assert_eq!(page[0].id, ids[3]);
    assert_eq!(page[1].id, ids[2]);

    Ok(())
}
