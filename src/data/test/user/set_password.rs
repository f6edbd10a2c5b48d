use super::*;

/// Tests that a password reset rotates the session UUID.
///
/// Rotating the UUID is what invalidates existing sessions, so this is
/// load-bearing for the reset flow.
///
/// Expected: Ok with new hash stored and a different session id
#[tokio::test]
async fn rotates_session_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let old_session_id = user.session_id;

    let repo = UserRepository::new(db);
    let updated = repo.set_password(user.id, "new-hash").await?;

    assert_eq!(updated.password_hash, "new-hash");
    assert_ne!(updated.session_id, old_session_id);

    Ok(())
}

/// Tests that the old session UUID no longer resolves after a reset.
///
/// Expected: Ok(None) for the old UUID, Ok(Some) for the new one
#[tokio::test]
async fn old_session_id_stops_resolving() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let old_session_id = user.session_id;

    let repo = UserRepository::new(db);
    let updated = repo.set_password(user.id, "new-hash").await?;

    assert!(repo.find_by_session_id(old_session_id).await?.is_none());
    assert!(repo.find_by_session_id(updated.session_id).await?.is_some());

    Ok(())
}
