use super::*;

/// Tests that a user only sees their own tickets.
///
/// Expected: Ok with the owner's tickets only
#[tokio::test]
async fn scoped_to_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let department = factory::create_department(db).await?;

    let mine = factory::create_ticket(db, owner.id, department.id).await?;
    factory::create_ticket(db, other.id, department.id).await?;

    let repo = TicketRepository::new(db);
    let tickets = repo.get_for_owner(owner.id).await?;

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id, mine.id);

    Ok(())
}
