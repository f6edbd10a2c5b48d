use super::*;

/// Tests creating a ticket.
///
/// Expected: Ok with status open and a generated UUID
#[tokio::test]
async fn creates_open_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let department = factory::create_department(db).await?;

    let repo = TicketRepository::new(db);
    let ticket = repo.create(&param(user.id, department.id)).await?;

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.owner_id, user.id);
    assert_eq!(ticket.subject, "Stuck in a wall");
    assert!(!ticket.id.is_nil());

    Ok(())
}

/// Tests that two tickets get distinct UUIDs.
///
/// Expected: Ok with different ids
#[tokio::test]
async fn generates_unique_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let department = factory::create_department(db).await?;

    let repo = TicketRepository::new(db);
    let first = repo.create(&param(user.id, department.id)).await?;
    let second = repo.create(&param(user.id, department.id)).await?;

    assert_ne!(first.id, second.id);

    Ok(())
}
