use crate::dto::main::{HealthDto, ServiceInfoDto};
use crate::models::config::ServerConfig;
use crate::repository::StorageHealth;

/// Describes the running service for `GET /`.
pub fn service_info(config: &ServerConfig) -> ServiceInfoDto {
    ServiceInfoDto {
        message: format!("Welcome to {}", config.app_name),
        version: config.app_version.clone(),
        docs: "/docs".to_string(),
    }
}

/// Reports the process as healthy together with the storage status.
///
/// The process itself is always reported healthy; an unreachable database
/// only shows up in the `database` field.
pub fn health_check<R>(config: &ServerConfig, repo: &R) -> HealthDto
where
    R: StorageHealth + ?Sized,
{
    HealthDto {
        status: "healthy".to_string(),
        database: repo.storage_status().as_str().to_string(),
        version: config.app_version.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use crate::repository::test::FailingRepository;

    #[test]
    fn service_info_uses_configured_name_and_version() {
        let config = ServerConfig::default();
        let info = service_info(&config);
        assert_eq!(info.message, "Welcome to Bookmarks API");
        assert_eq!(info.version, config.app_version);
        assert_eq!(info.docs, "/docs");
    }

    #[test]
    fn health_reflects_storage_status() {
        let config = ServerConfig::default();

        let memory = health_check(&config, &InMemoryRepository::new());
        assert_eq!(memory.status, "healthy");
        assert_eq!(memory.database, "disconnected");

        let failing = health_check(&config, &FailingRepository);
        assert_eq!(failing.status, "healthy");
        assert_eq!(failing.database, "error");
    }
}
