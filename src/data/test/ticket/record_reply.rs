use super::*;

/// Tests the reply side effects on the ticket row.
///
/// Expected: Ok with the new status and a bumped last_replied_at
#[tokio::test]
async fn updates_status_and_reply_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let department = factory::create_department(db).await?;
    let ticket = factory::create_ticket(db, user.id, department.id).await?;
    let before = ticket.last_replied_at;

    let repo = TicketRepository::new(db);
    let updated = repo.record_reply(ticket.id, TicketStatus::Answered).await?;

    assert_eq!(updated.status, TicketStatus::Answered);
    assert!(updated.last_replied_at >= before);

    Ok(())
}

/// Tests recording a reply against a missing ticket.
///
/// Expected: Err(RecordNotFound)
#[tokio::test]
async fn fails_for_missing_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let result = repo
        .record_reply(uuid::Uuid::new_v4(), TicketStatus::Replied)
        .await;

    assert!(result.is_err());

    Ok(())
}
