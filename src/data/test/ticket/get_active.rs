use super::*;
use entity::ticket::TicketStatus as Status;

/// Tests the staff queue query.
///
/// Active means not closed and not answered: those are the tickets
/// waiting on staff.
///
/// Expected: Ok with only open and replied tickets
#[tokio::test]
async fn excludes_closed_and_answered() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let department = factory::create_department(db).await?;

    let open = factory::ticket::TicketFactory::new(db, user.id, department.id)
        .status(Status::Open)
        .build()
        .await?;
    let replied = factory::ticket::TicketFactory::new(db, user.id, department.id)
        .status(Status::Replied)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, user.id, department.id)
        .status(Status::Answered)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, user.id, department.id)
        .status(Status::Closed)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let active = repo.get_active().await?;

    let ids: Vec<_> = active.iter().map(|t| t.id).collect();
    assert_eq!(active.len(), 2);
    assert!(ids.contains(&open.id));
    assert!(ids.contains(&replied.id));

    Ok(())
}

/// Tests the per-status queue query.
///
/// Expected: Ok with only the requested status
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let department = factory::create_department(db).await?;

    factory::ticket::TicketFactory::new(db, user.id, department.id)
        .status(Status::Closed)
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, user.id, department.id)
        .status(Status::Open)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let closed = repo.get_by_status(TicketStatus::Closed).await?;

    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].status, TicketStatus::Closed);

    Ok(())
}
