//! HTTP handlers and route configuration.

mod feed;
mod health;
mod votes;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check)),
    )
    .route("/", web::get().to(feed::index))
    .route("/", web::post().to(feed::create_yap))
    .route("/yap/{id}", web::get().to(feed::view_yap))
    .route("/{id}/vote/{direction}", web::post().to(votes::cast_vote));
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};

    use yap_core::domain::YapId;
    use yap_shared::ApiResponse;
    use yap_shared::dto::{CreateYapForm, FeedResponse, VoteForm, YapResponse};

    use super::configure_routes;
    use crate::config::AppConfig;
    use crate::state::AppState;

    fn test_state() -> AppState {
        let config = AppConfig::from_lookup(|key| match key {
            "CSRF_SECRET" => Some("test-secret".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::in_memory(config)
    }

    fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|c| c.name() == "yap-session")
            .map(|c| c.into_owned())
    }

    fn feed_request(cookie: Option<&Cookie<'static>>) -> test::TestRequest {
        let req = test::TestRequest::get().uri("/");
        match cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        }
    }

    fn create_request(
        cookie: &Cookie<'static>,
        token: &str,
        content: &str,
        region: &str,
    ) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/")
            .cookie(cookie.clone())
            .set_form(CreateYapForm {
                content: content.to_string(),
                region: region.to_string(),
                csrf: token.to_string(),
            })
    }

    fn vote_request(
        cookie: &Cookie<'static>,
        token: &str,
        id: &str,
        direction: &str,
    ) -> test::TestRequest {
        test::TestRequest::post()
            .uri(&format!("/{}/vote/{}", id, direction))
            .cookie(cookie.clone())
            .set_form(VoteForm {
                csrf: token.to_string(),
            })
    }

    fn only_yap(feed: &ApiResponse<FeedResponse>) -> &YapResponse {
        let yaps = &feed.data.as_ref().unwrap().yaps;
        assert_eq!(yaps.len(), 1);
        &yaps[0]
    }

    #[actix_web::test]
    async fn test_post_vote_and_score_flow() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        // First visit establishes the session
        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = session_cookie(&resp).expect("session cookie");
        let feed: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
        let tokens = feed.data.unwrap().csrf;

        let resp = test::call_service(
            &app,
            create_request(&cookie, &tokens.create, "hello", "lhr").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        let resp = test::call_service(&app, feed_request(Some(&cookie)).to_request()).await;
        assert!(session_cookie(&resp).is_none());
        let feed: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
        let yap = only_yap(&feed).clone();
        assert_eq!(yap.content, "hello");
        assert_eq!(yap.region, "lhr");
        assert_eq!(yap.score, 0);

        for (direction, expected) in [("up", 1), ("down", 0)] {
            let resp = test::call_service(
                &app,
                vote_request(&cookie, &tokens.vote, &yap.id, direction).to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);

            let feed: ApiResponse<FeedResponse> =
                test::call_and_read_body_json(&app, feed_request(Some(&cookie)).to_request())
                    .await;
            assert_eq!(only_yap(&feed).score, expected);
        }

        let missing = YapId::new().to_string();
        let resp = test::call_service(
            &app,
            vote_request(&cookie, &tokens.vote, &missing, "up").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(Some(&cookie)).to_request()).await;
        assert_eq!(only_yap(&feed).id, yap.id);
        assert_eq!(only_yap(&feed).score, 0);
    }

    #[actix_web::test]
    async fn test_mutation_without_session_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(None).to_request()).await;
        let tokens = feed.data.unwrap().csrf;

        let req = test::TestRequest::post()
            .uri("/")
            .set_form(CreateYapForm {
                content: "hello".to_string(),
                region: "lhr".to_string(),
                csrf: tokens.create,
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(None).to_request()).await;
        assert!(feed.data.unwrap().yaps.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_csrf_field_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        let cookie = session_cookie(&resp).unwrap();

        let req = test::TestRequest::post()
            .uri("/")
            .cookie(cookie)
            .set_form(vec![("content", "hello"), ("region", "lhr")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_token_from_another_session_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        let cookie_a = session_cookie(&resp).unwrap();
        let feed_a: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
        let tokens_a = feed_a.data.unwrap().csrf;

        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        let cookie_b = session_cookie(&resp).unwrap();
        assert_ne!(cookie_a.value(), cookie_b.value());

        let resp = test::call_service(
            &app,
            create_request(&cookie_b, &tokens_a.create, "hello", "lhr").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // A legitimate yap from session A, then a cross-session vote on it
        let resp = test::call_service(
            &app,
            create_request(&cookie_a, &tokens_a.create, "hello", "lhr").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(Some(&cookie_a)).to_request()).await;
        let id = only_yap(&feed).id.clone();

        let resp = test::call_service(
            &app,
            vote_request(&cookie_b, &tokens_a.vote, &id, "up").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(Some(&cookie_a)).to_request()).await;
        assert_eq!(only_yap(&feed).score, 0);
    }

    #[actix_web::test]
    async fn test_create_token_cannot_vote() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        let cookie = session_cookie(&resp).unwrap();
        let feed: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
        let tokens = feed.data.unwrap().csrf;

        test::call_service(
            &app,
            create_request(&cookie, &tokens.create, "hello", "syd").to_request(),
        )
        .await;
        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(Some(&cookie)).to_request()).await;
        let id = only_yap(&feed).id.clone();

        let resp = test::call_service(
            &app,
            vote_request(&cookie, &tokens.create, &id, "up").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_invalid_yaps_are_bad_requests() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        let cookie = session_cookie(&resp).unwrap();
        let feed: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
        let tokens = feed.data.unwrap().csrf;

        let too_long = "a".repeat(241);
        for (content, region) in [(too_long.as_str(), "lhr"), ("hello", "fra"), ("hello", "LHR")] {
            let resp = test::call_service(
                &app,
                create_request(&cookie, &tokens.create, content, region).to_request(),
            )
            .await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{region}");
        }

        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(Some(&cookie)).to_request()).await;
        assert!(feed.data.unwrap().yaps.is_empty());
    }

    #[actix_web::test]
    async fn test_bad_vote_paths_are_bad_requests() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        let cookie = session_cookie(&resp).unwrap();
        let feed: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
        let tokens = feed.data.unwrap().csrf;

        let resp = test::call_service(
            &app,
            vote_request(&cookie, &tokens.vote, "not-an-id", "up").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let id = YapId::new().to_string();
        let resp = test::call_service(
            &app,
            vote_request(&cookie, &tokens.vote, &id, "sideways").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_view_single_yap() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let resp = test::call_service(&app, feed_request(None).to_request()).await;
        let cookie = session_cookie(&resp).unwrap();
        let feed: ApiResponse<FeedResponse> = test::read_body_json(resp).await;
        let tokens = feed.data.unwrap().csrf;

        test::call_service(
            &app,
            create_request(&cookie, &tokens.create, "hello", "iad").to_request(),
        )
        .await;
        let feed: ApiResponse<FeedResponse> =
            test::call_and_read_body_json(&app, feed_request(Some(&cookie)).to_request()).await;
        let id = only_yap(&feed).id.clone();
        test::call_service(
            &app,
            vote_request(&cookie, &tokens.vote, &id, "up").to_request(),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/yap/{}", id))
            .to_request();
        let body: ApiResponse<YapResponse> = test::call_and_read_body_json(&app, req).await;
        let yap = body.data.unwrap();
        assert_eq!(yap.region, "iad");
        assert_eq!(yap.score, 1);

        let req = test::TestRequest::get()
            .uri(&format!("/yap/{}", YapId::new()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/yap/garbage").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "in-memory");
    }
}
