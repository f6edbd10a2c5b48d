use super::*;

/// Tests moving a ticket to another department.
///
/// Expected: Ok with the new department id stored
#[tokio::test]
async fn moves_ticket() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let first = factory::create_department(db).await?;
    let second = factory::create_department(db).await?;
    let ticket = factory::create_ticket(db, user.id, first.id).await?;

    let repo = TicketRepository::new(db);
    let moved = repo.set_department(ticket.id, second.id).await?;

    assert_eq!(moved.department_id, second.id);

    Ok(())
}
