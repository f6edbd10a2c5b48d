use super::*;

/// Tests creating and updating a department.
///
/// Expected: Ok with fields stored and later replaced
#[tokio::test]
async fn creates_and_updates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(TicketDepartment)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DepartmentRepository::new(db);
    let department = repo.create(param("Support")).await?;

    assert_eq!(department.name, "Support");
    assert!(department.accepts_tickets());

    let updated = repo
        .update(
            department.id,
            UpsertDepartmentParam {
                name: "General Support".to_string(),
                description: "All the things".to_string(),
                is_hidden: true,
                is_disabled: false,
            },
        )
        .await?;

    assert_eq!(updated.name, "General Support");
    assert!(updated.is_hidden);
    assert!(!updated.accepts_tickets());

    Ok(())
}
