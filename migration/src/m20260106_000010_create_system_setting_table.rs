use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SystemSetting::Table)
                    .if_not_exists()
                    .col(pk_auto(SystemSetting::Id))
                    .col(boolean(SystemSetting::ApplicationsOpen).default(false))
                    .col(boolean(SystemSetting::CanRegister).default(true))
                    .col(boolean(SystemSetting::JoinDiscordOnRegister).default(false))
                    .col(boolean(SystemSetting::MaintenanceMode).default(false))
                    .col(string(SystemSetting::SiteTheme).default("dark"))
                    .col(integer(SystemSetting::MinApplicationLength).default(500))
                    .col(integer(SystemSetting::MaxApplicationLength).default(750))
                    .col(string_null(SystemSetting::PanelApiKey))
                    .col(string_null(SystemSetting::PanelApiUrl))
                    .col(string_null(SystemSetting::LiveServerUuid))
                    .col(string_null(SystemSetting::StagingServerUuid))
                    .col(string_null(SystemSetting::FallbackServerUuid))
                    .col(string_null(SystemSetting::TicketWebhook))
                    .col(string_null(SystemSetting::ApplicationWebhook))
                    .col(string_null(SystemSetting::GeneralWebhook))
                    .col(string_null(SystemSetting::DevWebhook))
                    .col(timestamp(SystemSetting::CreatedAt))
                    .col(timestamp(SystemSetting::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSetting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SystemSetting {
    Table,
    Id,
    ApplicationsOpen,
    CanRegister,
    JoinDiscordOnRegister,
    MaintenanceMode,
    SiteTheme,
    MinApplicationLength,
    MaxApplicationLength,
    PanelApiKey,
    PanelApiUrl,
    LiveServerUuid,
    StagingServerUuid,
    FallbackServerUuid,
    TicketWebhook,
    ApplicationWebhook,
    GeneralWebhook,
    DevWebhook,
    CreatedAt,
    UpdatedAt,
}
