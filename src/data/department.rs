//! Ticket department data repository.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::department::{TicketDepartment, UpsertDepartmentParam};

pub struct DepartmentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DepartmentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, param: UpsertDepartmentParam) -> Result<TicketDepartment, DbErr> {
        let now = Utc::now();
        let entity = entity::ticket_department::ActiveModel {
            name: ActiveValue::Set(param.name),
            description: ActiveValue::Set(param.description),
            is_hidden: ActiveValue::Set(param.is_hidden),
            is_disabled: ActiveValue::Set(param.is_disabled),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(TicketDepartment::from_entity(entity))
    }

    pub async fn update(
        &self,
        id: i32,
        param: UpsertDepartmentParam,
    ) -> Result<TicketDepartment, DbErr> {
        let entity = self.require(id).await?;

        let mut active: entity::ticket_department::ActiveModel = entity.into();
        active.name = ActiveValue::Set(param.name);
        active.description = ActiveValue::Set(param.description);
        active.is_hidden = ActiveValue::Set(param.is_hidden);
        active.is_disabled = ActiveValue::Set(param.is_disabled);
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(TicketDepartment::from_entity(active.update(self.db).await?))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<TicketDepartment>, DbErr> {
        let entity = entity::prelude::TicketDepartment::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(TicketDepartment::from_entity))
    }

    pub async fn get_all(&self) -> Result<Vec<TicketDepartment>, DbErr> {
        let entities = entity::prelude::TicketDepartment::find()
            .order_by_asc(entity::ticket_department::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(TicketDepartment::from_entity)
            .collect())
    }

    /// Departments users may open tickets in: neither hidden nor disabled.
    pub async fn get_available(&self) -> Result<Vec<TicketDepartment>, DbErr> {
        let entities = entity::prelude::TicketDepartment::find()
            .filter(entity::ticket_department::Column::IsHidden.eq(false))
            .filter(entity::ticket_department::Column::IsDisabled.eq(false))
            .order_by_asc(entity::ticket_department::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(TicketDepartment::from_entity)
            .collect())
    }

    pub async fn set_hidden(&self, id: i32, hidden: bool) -> Result<(), DbErr> {
        self.set_flag(id, entity::ticket_department::Column::IsHidden, hidden)
            .await
    }

    pub async fn set_disabled(&self, id: i32, disabled: bool) -> Result<(), DbErr> {
        self.set_flag(id, entity::ticket_department::Column::IsDisabled, disabled)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::TicketDepartment::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    async fn require(&self, id: i32) -> Result<entity::ticket_department::Model, DbErr> {
        entity::prelude::TicketDepartment::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "Department with id {} not found",
                id
            )))
    }

    async fn set_flag(
        &self,
        id: i32,
        column: entity::ticket_department::Column,
        value: bool,
    ) -> Result<(), DbErr> {
        entity::prelude::TicketDepartment::update_many()
            .filter(entity::ticket_department::Column::Id.eq(id))
            .col_expr(column, Expr::value(value))
            .col_expr(
                entity::ticket_department::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }
}
