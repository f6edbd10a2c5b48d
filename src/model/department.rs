//! Ticket department domain models and parameters.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct TicketDepartment {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_hidden: bool,
    pub is_disabled: bool,
}

impl TicketDepartment {
    pub fn from_entity(entity: entity::ticket_department::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            is_hidden: entity.is_hidden,
            is_disabled: entity.is_disabled,
        }
    }

    /// Whether users may open new tickets in this department.
    pub fn accepts_tickets(&self) -> bool {
        !self.is_hidden && !self.is_disabled
    }

    pub fn into_dto(self) -> TicketDepartmentDto {
        TicketDepartmentDto {
            id: self.id,
            name: self.name,
            description: self.description,
            is_hidden: self.is_hidden,
            is_disabled: self.is_disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDepartmentDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_hidden: bool,
    pub is_disabled: bool,
}

/// Parameters for creating or editing a department.
#[derive(Debug, Clone)]
pub struct UpsertDepartmentParam {
    pub name: String,
    pub description: String,
    pub is_hidden: bool,
    pub is_disabled: bool,
}
