// src/models/scheduling.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use utoipa::ToSchema;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "pay_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    Hourly, // Pago por hora (sujeito a tolerância de atraso/saída)
    Daily,  // Diária fechada (não policiado por horário)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "shift_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    Draft,
    Published,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "assignment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Accepted,
    Confirmed,
    Rejected,
    Removed,
}

impl AssignmentStatus {
    /// Apenas estes contam como "escalado" para fins de reconciliação.
    pub fn is_counted(&self) -> bool {
        matches!(
            self,
            AssignmentStatus::Pending | AssignmentStatus::Accepted | AssignmentStatus::Confirmed
        )
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Recepção - Manhã")]
    pub title: String,

    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    pub date: NaiveDate,

    // Janela de relógio de parede; end_time <= start_time indica que o
    // turno atravessa a meia-noite.
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,

    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,

    #[schema(example = 2)]
    pub slots: i32,

    pub pay_type: PayType,
    pub status: ShiftStatus,

    pub client_id: Option<Uuid>,
    pub location_id: Option<Uuid>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Shift {
    /// Janela formatada para exibição (ex: "09:00 - 17:00").
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub shift_id: Uuid,
    pub employee_id: Uuid,
    pub status: AssignmentStatus,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Maria")]
    pub first_name: String,

    #[schema(example = "da Silva")]
    pub last_name: String,

    pub created_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
