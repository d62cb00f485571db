// src/models/availability.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use utoipa::ToSchema;

/// Regra recorrente semanal de indisponibilidade.
/// `weekdays` usa 0 = segunda ... 6 = domingo (num_days_from_monday).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityConfig {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub employee_id: Uuid,

    #[schema(example = json!([5, 6]))]
    pub weekdays: Vec<i16>,

    // Janela opcional dentro do dia; hoje serve apenas para exibição,
    // o bloqueio vale para o dia inteiro.
    #[schema(value_type = Option<String>, example = "08:00:00")]
    pub start_time: Option<NaiveTime>,

    #[schema(value_type = Option<String>, example = "12:00:00")]
    pub end_time: Option<NaiveTime>,

    #[schema(value_type = Option<String>, format = Date)]
    pub effective_from: Option<NaiveDate>,

    #[schema(value_type = Option<String>, format = Date)]
    pub effective_to: Option<NaiveDate>,

    #[schema(example = "Faculdade aos sábados")]
    pub reason: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

impl AvailabilityConfig {
    /// A regra vale na data? (intervalo de vigência inclusivo nas duas pontas)
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.effective_from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.effective_to {
            if date > to {
                return false;
            }
        }
        true
    }

    /// A regra bloqueia o dia da semana desta data?
    pub fn blocks_date(&self, date: NaiveDate) -> bool {
        let weekday = date.weekday().num_days_from_monday() as i16;
        self.weekdays.contains(&weekday)
    }
}

/// Exceção por data exata; sempre prevalece sobre as regras recorrentes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityOverride {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub employee_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-03-15")]
    pub date: NaiveDate,

    pub available: bool,

    #[schema(example = "Atestado médico")]
    pub reason: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

/// Resultado da resolução: disponível ou não, e por quê.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDecision {
    pub available: bool,

    #[schema(example = "Faculdade aos sábados")]
    pub reason: Option<String>,
}

impl AvailabilityDecision {
    pub fn available() -> Self {
        Self { available: true, reason: None }
    }

    pub fn unavailable(reason: Option<String>) -> Self {
        Self { available: false, reason }
    }
}
