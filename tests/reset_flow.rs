mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use common::{client::TestClient, flash_of, location_of, TestContext};
use quillpress::utils::password;
use quillpress::utils::token::RESET_TOKEN_TTL_MINUTES;

#[tokio::test]
async fn request_responses_do_not_reveal_account_existence() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.ctx.clone());
    let app = test::init_service(client.create_app()).await;

    client
        .create_test_user("corey", "corey@example.com", "hunter22")
        .await;

    let req = test::TestRequest::post()
        .uri("/reset_password")
        .set_form(&[("email", "corey@example.com")])
        .to_request();
    let known = test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/reset_password")
        .set_form(&[("email", "ghost@example.com")])
        .to_request();
    let unknown = test::call_service(&app, req).await;

    assert_eq!(known.status(), StatusCode::SEE_OTHER);
    assert_eq!(unknown.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&known), "/login");
    assert_eq!(location_of(&unknown), "/login");
    assert_eq!(flash_of(&known), flash_of(&unknown));
}

#[tokio::test]
async fn valid_token_resets_the_password() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.ctx.clone());
    let app = test::init_service(client.create_app()).await;

    let user_id = client
        .create_test_user("corey", "corey@example.com", "hunter22")
        .await;
    let token = ctx.ctx.reset_tokens.issue(user_id).expect("issuing failed");

    let req = test::TestRequest::get()
        .uri(&format!("/reset_password/{token}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(page.contains("Choose a new password"));

    let req = test::TestRequest::post()
        .uri(&format!("/reset_password/{token}"))
        .set_form(&[("password", "new-hunter23"), ("confirm_password", "new-hunter23")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/login");

    let user = ctx.ctx.db.get_user_by_id(&user_id).await.expect("lookup failed");
    assert!(password::verify(&user.password_hash, "new-hunter23"));
    assert!(!password::verify(&user.password_hash, "hunter22"));
}

#[tokio::test]
async fn mismatched_passwords_re_render_the_form() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.ctx.clone());
    let app = test::init_service(client.create_app()).await;

    let user_id = client
        .create_test_user("corey", "corey@example.com", "hunter22")
        .await;
    let token = ctx.ctx.reset_tokens.issue(user_id).expect("issuing failed");

    let req = test::TestRequest::post()
        .uri(&format!("/reset_password/{token}"))
        .set_form(&[("password", "new-hunter23"), ("confirm_password", "different")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let page = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
    assert!(page.contains("Passwords must match."));

    let user = ctx.ctx.db.get_user_by_id(&user_id).await.expect("lookup failed");
    assert!(password::verify(&user.password_hash, "hunter22"));
}

#[tokio::test]
async fn garbage_token_redirects_to_the_request_step() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.ctx.clone());
    let app = test::init_service(client.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/reset_password/definitely-not-a-token")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/reset_password");
    let flash = flash_of(&resp).expect("flash missing");
    assert_eq!(flash.level, "warning");
    assert_eq!(flash.message, "That is an invalid or expired token.");
}

#[tokio::test]
async fn expired_token_redirects_to_the_request_step() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.ctx.clone());
    let app = test::init_service(client.create_app()).await;

    let user_id = client
        .create_test_user("corey", "corey@example.com", "hunter22")
        .await;
    let issued = Utc::now() - Duration::minutes(RESET_TOKEN_TTL_MINUTES + 1);
    let token = ctx
        .ctx
        .reset_tokens
        .issue_at(user_id, issued)
        .expect("issuing failed");

    let req = test::TestRequest::get()
        .uri(&format!("/reset_password/{token}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/reset_password");
}

#[tokio::test]
async fn session_cookie_cannot_be_replayed_as_a_reset_token() {
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.ctx.clone());
    let app = test::init_service(client.create_app()).await;

    let user_id = client
        .create_test_user("corey", "corey@example.com", "hunter22")
        .await;
    let session_jwt = client.session_cookie(user_id).value().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/reset_password/{session_jwt}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&resp), "/reset_password");
}
