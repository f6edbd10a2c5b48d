use super::*;

/// Tests creating a new user at registration.
///
/// Verifies the repository stores the provided identity, generates a
/// session UUID, and starts every flag off.
///
/// Expected: Ok with a fresh unprivileged user
#[tokio::test]
async fn creates_new_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .create(CreateUserParam {
            username: "Steve".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$hash".to_string(),
            email: "steve@example.com".to_string(),
        })
        .await;

    assert!(result.is_ok());
    let user = result.unwrap();
    assert_eq!(user.username, "Steve");
    assert_eq!(user.email, "steve@example.com");
    assert!(!user.is_admin);
    assert!(!user.is_whitelisted);
    assert!(!user.email_confirmed);

    Ok(())
}

/// Tests that two users get distinct session UUIDs.
///
/// Expected: Ok with different session ids
#[tokio::test]
async fn generates_unique_session_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo
        .create(CreateUserParam {
            username: "first".to_string(),
            password_hash: "hash".to_string(),
            email: "first@example.com".to_string(),
        })
        .await?;
    let second = repo
        .create(CreateUserParam {
            username: "second".to_string(),
            password_hash: "hash".to_string(),
            email: "second@example.com".to_string(),
        })
        .await?;

    assert_ne!(first.session_id, second.session_id);

    Ok(())
}

/// Tests that duplicate usernames violate the unique constraint.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(User).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(CreateUserParam {
        username: "Steve".to_string(),
        password_hash: "hash".to_string(),
        email: "steve@example.com".to_string(),
    })
    .await?;

    let result = repo
        .create(CreateUserParam {
            username: "Steve".to_string(),
            password_hash: "hash".to_string(),
            email: "other@example.com".to_string(),
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
