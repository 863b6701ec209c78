use utoipa::OpenApi;

pub const HEALTH_TAG: &str = "Health";
pub const STATUS_TAG: &str = "Status";
pub const CONFIG_TAG: &str = "Config";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Statusboard",
        description = "Configuration health and deployment status for a running service",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::config_health::ConfigValue,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Configuration health endpoints"),
        (name = STATUS_TAG, description = "Dependency, commit and deployment metadata"),
        (name = CONFIG_TAG, description = "Effective monitored configuration"),
    )
)]
pub struct ApiDoc;
