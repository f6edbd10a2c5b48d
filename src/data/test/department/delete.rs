use super::*;

/// Tests deleting a department.
///
/// Expected: Ok with the row gone afterwards
#[tokio::test]
async fn deletes_department() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(TicketDepartment)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let department = factory::create_department(db).await?;
    let repo = DepartmentRepository::new(db);

    repo.delete(department.id).await?;

    assert!(repo.find_by_id(department.id).await?.is_none());

    Ok(())
}
