use super::*;

/// Tests the hide/disable toggles.
///
/// Expected: Ok with flags flipped and reverted
#[tokio::test]
async fn toggles_hidden_and_disabled() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(TicketDepartment)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let department = factory::create_department(db).await?;
    let repo = DepartmentRepository::new(db);

    repo.set_hidden(department.id, true).await?;
    repo.set_disabled(department.id, true).await?;

    let reloaded = repo.find_by_id(department.id).await?.unwrap();
    assert!(reloaded.is_hidden);
    assert!(reloaded.is_disabled);

    repo.set_hidden(department.id, false).await?;
    repo.set_disabled(department.id, false).await?;

    let reloaded = repo.find_by_id(department.id).await?.unwrap();
    assert!(!reloaded.is_hidden);
    assert!(!reloaded.is_disabled);

    Ok(())
}
