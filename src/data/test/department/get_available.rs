use super::*;

/// Tests the user-facing department list.
///
/// Hidden or disabled departments must not show up in the ticket
/// creation choices.
///
/// Expected: Ok with only the visible, enabled department
#[tokio::test]
async fn excludes_hidden_and_disabled() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(TicketDepartment)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let visible = factory::create_department(db).await?;
    factory::department::DepartmentFactory::new(db)
        .hidden(true)
        .build()
        .await?;
    factory::department::DepartmentFactory::new(db)
        .disabled(true)
        .build()
        .await?;

    let repo = DepartmentRepository::new(db);
    let available = repo.get_available().await?;

    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, visible.id);

    Ok(())
}
