use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored product.
#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: Uuid,
    #[schema(example = "Phone")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 300.0)]
    pub price: f64,
    pub available: bool,
}

/// Create/update payload. `id` is ignored; `name`, `price` and `available` are required.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    pub id: Option<Uuid>,
    #[schema(min_length = 3, example = "Phone")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(minimum = 0.0, example = 300.0)]
    pub price: Option<f64>,
    pub available: Option<bool>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Product API", version = "1.0", description = "API for managing products"),
    paths(
        crate::routes::health,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::list,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            ProductInputDoc,
            crate::routes::products::DeleteResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "products", description = "Operations related to products")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_product_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/products"]["post"].is_object());
        assert!(doc["paths"]["/products/{id}"]["delete"].is_object());
        assert!(doc["components"]["schemas"]["ProductDoc"].is_object());
    }
}
