use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProverbDoc {
    pub id: u64,
    pub text_dari: String,
    pub text_pashto: String,
    pub translation_en: String,
    pub meaning: String,
    pub category: String,
}

#[derive(ToSchema, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProverbInputDoc {
    pub text_dari: String,
    pub text_pashto: String,
    pub translation_en: String,
    pub meaning: String,
    pub category: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::proverbs::list_proverbs,
        crate::routes::proverbs::random_proverb,
        crate::routes::proverbs::get_proverb,
        crate::routes::proverbs::create_proverb,
        crate::routes::proverbs::update_proverb,
        crate::routes::proverbs::delete_proverb,
    ),
    components(
        schemas(
            HealthResponse,
            ProverbDoc,
            ProverbInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "proverbs")
    )
)]
pub struct ApiDoc;
