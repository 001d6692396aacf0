use serde::Serialize;

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfoDto {
    pub message: String,
    pub version: String,
    pub docs: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub database: String,
    pub version: String,
}
