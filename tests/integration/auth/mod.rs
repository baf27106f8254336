//! Init data authentication integration tests
//!
//! Exercises `POST /v1/auth/telegram` and `GET /v1/auth/whoami` end to end,
//! including the guarantee that every rejection looks the same to clients.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{assert_unauthorized, TestApp};

const USER: &str = r#"{"id":123,"first_name":"Test","username":"testuser","language_code":"en","is_premium":true}"#;

mod test_validate_endpoint {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_valid_init_data() {
        let app = TestApp::new();
        let init_data = app.init_data(USER, 0);

        let (status, body) = app
            .post_json("/v1/auth/telegram", json!({ "initData": init_data }))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["user"]["id"], 123);
        assert_eq!(body["user"]["username"], "testuser");
        assert_eq!(body["user"]["is_premium"], true);
        assert!(body["auth_date"].is_i64());
    }

    #[test_log::test(tokio::test)]
    async fn test_tampered_init_data() {
        let app = TestApp::new();
        let tampered = app.init_data(USER, 0).replace("testuser", "hacker");

        let (status, body) = app
            .post_json("/v1/auth/telegram", json!({ "initData": tampered }))
            .await
            .unwrap();

        assert_unauthorized(status, &body);
    }

    #[test_log::test(tokio::test)]
    async fn test_expired_init_data() {
        let app = TestApp::new();
        let stale = app.init_data(USER, 7200);

        let (status, body) = app
            .post_json("/v1/auth/telegram", json!({ "initData": stale }))
            .await
            .unwrap();

        assert_unauthorized(status, &body);
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_hash() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json(
                "/v1/auth/telegram",
                json!({ "initData": "auth_date=1715551981&user=%7B%22id%22%3A1%7D" }),
            )
            .await
            .unwrap();

        assert_unauthorized(status, &body);
    }

    #[test_log::test(tokio::test)]
    async fn test_rejections_are_indistinguishable() {
        let app = TestApp::new();
        let forged = app.init_data(USER, 0).replace("testuser", "hacker");
        let stale = app.init_data(USER, 7200);

        let (_, forged_body) = app
            .post_json("/v1/auth/telegram", json!({ "initData": forged }))
            .await
            .unwrap();
        let (_, stale_body) = app
            .post_json("/v1/auth/telegram", json!({ "initData": stale }))
            .await
            .unwrap();

        assert_eq!(forged_body, stale_body);
    }

    #[test_log::test(tokio::test)]
    async fn test_missing_auth_date_policy() {
        let signed_without_date = |app: &TestApp| {
            miniapp_auth::sign_init_data([("user", USER)], &app.config.bot_token)
        };

        let lenient = TestApp::new();
        let (status, body) = lenient
            .post_json(
                "/v1/auth/telegram",
                json!({ "initData": signed_without_date(&lenient) }),
            )
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(body["auth_date"].is_null());

        let strict = TestApp::with_require_auth_date(true);
        let (status, body) = strict
            .post_json(
                "/v1/auth/telegram",
                json!({ "initData": signed_without_date(&strict) }),
            )
            .await
            .unwrap();
        assert_unauthorized(status, &body);
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_init_data_is_a_bad_request() {
        let app = TestApp::new();

        let (status, body) = app
            .post_json("/v1/auth/telegram", json!({ "initData": "" }))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[test_log::test(tokio::test)]
    async fn test_non_string_init_data_is_a_bad_request() {
        let app = TestApp::new();

        let (status, _) = app
            .post_json("/v1/auth/telegram", json!({ "initData": 42 }))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test_log::test(tokio::test)]
    async fn test_unparsable_user_still_validates() {
        let app = TestApp::new();
        let init_data = app.init_data("{broken", 0);

        let (status, body) = app
            .post_json("/v1/auth/telegram", json!({ "initData": init_data }))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert!(body["user"].is_null());
    }
}

mod test_whoami {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_whoami_with_init_data() {
        let app = TestApp::new();
        let header = format!("tma {}", app.init_data(USER, 0));

        let (status, body) = app.get("/v1/auth/whoami", Some(&header)).await.unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["auth_method"], "init_data");
        assert_eq!(body["display_name"], "Test");
        assert_eq!(body["user"]["id"], 123);
    }

    #[test_log::test(tokio::test)]
    async fn test_whoami_missing_header() {
        let app = TestApp::new();

        let (status, body) = app.get("/v1/auth/whoami", None).await.unwrap();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");
    }

    #[test_log::test(tokio::test)]
    async fn test_whoami_wrong_scheme() {
        let app = TestApp::new();
        let header = format!("Bearer {}", app.init_data(USER, 0));

        let (status, body) = app.get("/v1/auth/whoami", Some(&header)).await.unwrap();

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_AUTHORIZATION");
    }

    #[test_log::test(tokio::test)]
    async fn test_whoami_expired() {
        let app = TestApp::new();
        let header = format!("tma {}", app.init_data(USER, 7200));

        let (status, body) = app.get("/v1/auth/whoami", Some(&header)).await.unwrap();

        assert_unauthorized(status, &body);
    }

    #[test_log::test(tokio::test)]
    async fn test_whoami_requires_identity() {
        let app = TestApp::new();
        let auth_date = chrono::Utc::now().timestamp().to_string();
        let init_data = miniapp_auth::sign_init_data(
            [("auth_date", auth_date.as_str())],
            &app.config.bot_token,
        );

        let (status, body) = app
            .get("/v1/auth/whoami", Some(&format!("tma {init_data}")))
            .await
            .unwrap();

        assert_unauthorized(status, &body);
    }
}
