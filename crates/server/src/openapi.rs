use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: Uuid,
    pub name: String,
    /// Exact decimal, rendered as a string.
    #[schema(example = "9.99")]
    pub price: String,
    pub stock: i32,
}

/// Writable product fields; `id` is assigned by the server.
#[derive(ToSchema)]
pub struct ProductInputDoc {
    #[schema(example = "Widget")]
    pub name: String,
    /// Decimal as a JSON string or number, must be >= 0.
    #[schema(example = "9.99")]
    pub price: String,
    /// Must be >= 0.
    #[schema(example = 5)]
    pub stock: i32,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    /// A message, or a list of `{field, message}` for validation errors.
    pub details: Option<String>,
}

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::get,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            ProductInputDoc,
            ErrorDoc,
            MessageDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;
