use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Ticket};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Ticket)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements generated from entities, executed in order
    /// during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables should be added in dependency order (tables with foreign keys
    /// after their referenced tables).
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables for the account-linking flows: User plus the
    /// auth-code and email-confirmation tables.
    pub fn with_account_tables(self) -> Self {
        self.with_table(User)
            .with_table(MinecraftAuthentication)
            .with_table(EmailConfirmation)
            .with_table(AuditLog)
    }

    /// Adds the tables for the application workflow in dependency order:
    /// User, Faction, Application, Character.
    pub fn with_application_tables(self) -> Self {
        self.with_table(User)
            .with_table(Faction)
            .with_table(Application)
            .with_table(Character)
    }

    /// Adds the tables for the ticket workflow in dependency order:
    /// User, TicketDepartment, Ticket, TicketReply.
    pub fn with_ticket_tables(self) -> Self {
        self.with_table(User)
            .with_table(TicketDepartment)
            .with_table(Ticket)
            .with_table(TicketReply)
    }

    /// Builds and initializes the test context with configured tables.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
