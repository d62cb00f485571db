// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use uuid::Uuid;
use crate::common::error::AppError; // Usamos o nosso AppError para rejeição

// O nome do nosso cabeçalho HTTP customizado
const TENANT_ID_HEADER: &str = "x-tenant-id";

// O nosso extrator.
// Ele armazena o UUID da empresa que o utilizador quer aceder; todas as
// leituras e escritas do serviço são filtradas por ele.
#[derive(Debug, Clone)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    // Usamos AppError como rejeição, pois ele já implementa IntoResponse
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {

        // Tenta ler o cabeçalho x-tenant-id
        let header_value = parts
            .headers
            .get(TENANT_ID_HEADER)
            .ok_or(AppError::MissingTenantId)?;

        // Tenta converter o valor do cabeçalho para uma string
        let value_str = header_value
            .to_str()
            .map_err(|_| AppError::InvalidTenantId)?;

        // Tenta converter a string para um UUID
        let tenant_id = Uuid::parse_str(value_str).map_err(|_| AppError::InvalidTenantId)?;

        // Sucesso! Retorna o contexto.
        Ok(TenantContext(tenant_id))
    }
}
