use super::*;

/// Tests linking a Minecraft identity to a user.
///
/// Expected: Ok with username and UUID stored
#[tokio::test]
async fn stores_minecraft_identity() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .link_minecraft(LinkMinecraftParam {
            user_id: user.id,
            minecraft_username: "Steve".to_string(),
            minecraft_uuid: "069a79f4-44e9-4726-a5be-fca90e38aaf5".to_string(),
        })
        .await?;

    assert_eq!(updated.minecraft_username.as_deref(), Some("Steve"));
    assert_eq!(
        updated.minecraft_uuid.as_deref(),
        Some("069a79f4-44e9-4726-a5be-fca90e38aaf5")
    );

    Ok(())
}

/// Tests that linking to a missing user fails.
///
/// Expected: Err(RecordNotFound)
#[tokio::test]
async fn fails_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .link_minecraft(LinkMinecraftParam {
            user_id: 999,
            minecraft_username: "Steve".to_string(),
            minecraft_uuid: "069a79f4-44e9-4726-a5be-fca90e38aaf5".to_string(),
        })
        .await;

    assert!(result.is_err());

    Ok(())
}

/// Tests lookup by linked Minecraft UUID.
///
/// Expected: Ok with the linked user found
#[tokio::test]
async fn finds_user_by_minecraft_uuid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_whitelisted_user(db).await?;
    let uuid = user.minecraft_uuid.clone().unwrap();

    let repo = UserRepository::new(db);
    let found = repo.find_by_minecraft_uuid(&uuid).await?;

    assert!(found.is_some());
    assert_eq!(found.unwrap().id, user.id);

    Ok(())
}
