//! Reference data for post forms.
//!
//! ```text
//! GET /api/v1/categories
//! GET /api/v1/locations
//! ```

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CategoryResponse, LocationResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Published categories in title order.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories", body = [CategoryResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listCategories",
    security([])
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.reference_data.list_categories().await?;
    Ok(web::Json(
        categories.iter().map(CategoryResponse::from).collect(),
    ))
}

/// Published locations in title order.
#[utoipa::path(
    get,
    path = "/api/v1/locations",
    responses(
        (status = 200, description = "Locations", body = [LocationResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reference"],
    operation_id = "listLocations",
    security([])
)]
#[get("/locations")]
pub async fn list_locations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LocationResponse>>> {
    let locations = state.reference_data.list_locations().await?;
    Ok(web::Json(
        locations.iter().map(LocationResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{category, fixed_now};
    use crate::domain::{Error, Location, LocationId};
    use crate::inbound::http::test_utils::MockPorts;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn reference_lists_are_rendered_in_port_order() {
        let mut ports = MockPorts::default();
        ports
            .reference_data
            .expect_list_categories()
            .returning(|| Ok(vec![category("art", true), category("travel", true)]));
        ports.reference_data.expect_list_locations().returning(|| {
            Ok(vec![Location {
                id: LocationId::new(4),
                title: "Lisbon".into(),
                is_published: true,
                created_at: fixed_now(),
            }])
        });
        let app = test::init_service(
            App::new().app_data(ports.into_state()).service(
                web::scope("/api/v1")
                    .service(list_categories)
                    .service(list_locations),
            ),
        )
        .await;

        let categories: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/v1/categories").to_request(),
        )
        .await;
        let slugs: Vec<&str> = categories
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|item| item["slug"].as_str())
            .collect();
        assert_eq!(slugs, ["art", "travel"]);

        let locations: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/v1/locations").to_request(),
        )
        .await;
        assert_eq!(locations, json!([{"id": 4, "title": "Lisbon"}]));
    }

    #[rstest]
    #[actix_web::test]
    async fn store_failures_are_redacted() {
        let mut ports = MockPorts::default();
        ports
            .reference_data
            .expect_list_categories()
            .returning(|| Err(Error::internal("connection refused on 10.0.0.3")));
        let app = test::init_service(
            App::new()
                .app_data(ports.into_state())
                .service(web::scope("/api/v1").service(list_categories)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/categories").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
