use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FoodLens API",
        description = "Ingredient extraction and health analysis for food package photos"
    ),
    tags(
        (name = "label-analysis", description = "Photo upload and analysis"),
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;
