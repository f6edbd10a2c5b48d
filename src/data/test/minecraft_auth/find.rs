use super::*;

/// Tests the unspent-code lookup used by the linking flow.
///
/// Expected: Ok(Some) for a fresh code, Ok(None) once it's marked used
#[tokio::test]
async fn finds_only_unused_codes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(MinecraftAuthentication)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_auth_code(db, "012345", "uuid-1", "Steve", false).await?;
    factory::create_auth_code(db, "678901", "uuid-2", "Alex", true).await?;

    let repo = MinecraftAuthRepository::new(db);

    assert!(repo.find_unused_by_code("012345").await?.is_some());
    assert!(repo.find_unused_by_code("678901").await?.is_none());
    // But the spent row is still visible to the any-state lookup.
    assert!(repo.find_by_code("678901").await?.is_some());

    Ok(())
}

/// Tests the per-player unspent-code lookup used by the intake endpoint.
///
/// Expected: Ok(Some) with the player's waiting code
#[tokio::test]
async fn finds_waiting_code_by_uuid() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(MinecraftAuthentication)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_auth_code(db, "012345", "uuid-1", "Steve", false).await?;

    let repo = MinecraftAuthRepository::new(db);
    let waiting = repo.find_unused_by_uuid("uuid-1").await?;

    assert_eq!(waiting.map(|c| c.auth_code), Some("012345".to_string()));

    Ok(())
}

/// Tests deleting a consumed code row.
///
/// Expected: Ok with the row gone
#[tokio::test]
async fn deletes_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(MinecraftAuthentication)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let code = factory::create_auth_code(db, "012345", "uuid-1", "Steve", false).await?;

    let repo = MinecraftAuthRepository::new(db);
    repo.delete(code.id).await?;

    assert!(repo.find_by_code("012345").await?.is_none());

    Ok(())
}
