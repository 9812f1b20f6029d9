use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use url::Url;
use ventureos_application::{AuthorizationService, IdentityProvider, RoleRepository};
use ventureos_core::AppError;
use wiremock::matchers::{bearer_token, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{PlatformClient, PlatformClientConfig};

const API_KEY: &str = "studio-key";

fn client(server: &MockServer) -> PlatformClient {
    let base_url =
        Url::parse(format!("{}/api", server.uri()).as_str()).unwrap_or_else(|_| unreachable!());
    PlatformClient::new(PlatformClientConfig {
        base_url,
        api_key: API_KEY.to_owned(),
        timeout: Duration::from_secs(5),
    })
    .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn provider_email_casing_reaches_assignment_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(bearer_token("user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "Ana@Studio.io",
            "full_name": "Ana",
            "role": "user"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/entities/RoleAssignment"))
        .and(query_param("user_email", "Ana@Studio.io"))
        .and(header("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "a1",
            "user_email": "Ana@Studio.io",
            "role_id": "r1",
            "scope": "global"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Role"))
        .and(header("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "r1",
            "name": "Partner",
            "permissions": { "ventures": { "view": true } }
        }])))
        .mount(&server)
        .await;

    let client = Arc::new(client(&server));
    let Ok(identity) = client.current_identity("user-token").await else {
        panic!("identity lookup failed");
    };
    assert_eq!(identity.email(), "ana@studio.io");

    let service = AuthorizationService::new(client);
    let Ok(context) = service.load_access_context(&identity).await else {
        panic!("access context failed");
    };
    assert_eq!(context.assignments().len(), 1);
    assert!(context.has_permission("ventures", "view"));

    server.verify().await;
}

#[tokio::test]
async fn rejected_access_token_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(bearer_token("expired"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(bearer_token("suspended"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client(&server);
    for token in ["expired", "suspended"] {
        assert!(
            matches!(
                client.current_identity(token).await,
                Err(AppError::Unauthorized(_))
            ),
            "{token}"
        );
    }
}

#[tokio::test]
async fn missing_role_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Role/r9"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Role/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1",
            "name": "Partner"
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(matches!(client.find_role("r9").await, Ok(None)));
    assert!(
        client
            .find_role("r1")
            .await
            .is_ok_and(|role| role.is_some_and(|role| role.name == "Partner"))
    );
}

#[tokio::test]
async fn entity_requests_carry_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entities/Role"))
        .and(header("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "r1", "name": "Partner" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let roles = client(&server).list_roles().await;
    assert!(roles.is_ok_and(|roles| roles.len() == 1));

    server.verify().await;
}
