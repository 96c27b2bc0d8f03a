//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::domain::{CatalogRequest, CatalogResponse};
use crate::errors::ErrorDetail;
use crate::types::{MessageResponse, Pagination};

/// API documentation root.
///
/// The five entity routers share one handler set, so the schema components
/// are registered once; paths follow the `/api/v1/{entity}` convention.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "File Track API",
        description = "CRUD and paginated search over the system's reference catalogs: \
                       roles, departments, document categories, documentary topics and \
                       settlements.",
        version = "0.1.0",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    components(schemas(
        CatalogRequest,
        CatalogResponse,
        MessageResponse,
        Pagination,
        ErrorDetail
    )),
    tags(
        (name = "Roles", description = "Manages roles within the system"),
        (name = "Departments", description = "Manages departments within the system"),
        (name = "Document categories", description = "Manages document categories within the system"),
        (name = "Documentary topics", description = "Manages documentary topics within the system"),
        (name = "Settlements", description = "Manages settlements within the system")
    )
)]
pub struct ApiDoc;
