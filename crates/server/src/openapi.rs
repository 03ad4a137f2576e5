use utoipa::OpenApi;

/// `/add/` form fields. Checkboxes count as ticked when present and non-empty.
#[derive(utoipa::ToSchema)]
pub struct AddCafeFormDoc {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub loc: String,
    pub seats: String,
    pub toilet: Option<String>,
    pub wifi: Option<String>,
    pub sockets: Option<String>,
    pub calls: Option<String>,
    pub coffee_price: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cafes::random,
        crate::routes::cafes::all,
        crate::routes::cafes::search,
        crate::routes::cafes::add,
        crate::routes::cafes::update_price,
        crate::routes::cafes::report_closed,
    ),
    components(schemas(AddCafeFormDoc)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "cafes", description = "Cafe records"),
    )
)]
pub struct ApiDoc;
