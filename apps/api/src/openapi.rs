//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "E-commerce REST API: accounts, profiles, and the product catalog",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    nest(
        (path = "/api/auth", api = domain_users::ApiDoc),
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Auth", description = "Account and profile endpoints"),
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;
