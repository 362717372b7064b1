//! End-to-end tests of the Facebook cookie extractors inside an actix-web
//! application.
//!
//! Run with `cargo test --features testing`.

use actix_social::testing::{facebook_config, signed_cookie_value};
use actix_social::{FacebookAccessToken, FacebookConfig, FacebookCookie, FacebookUserId};
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse, Responder};

async fn whoami(user_id: FacebookUserId) -> impl Responder {
    HttpResponse::Ok().body(user_id.into_inner())
}

async fn maybe_whoami(user_id: Option<FacebookUserId>) -> impl Responder {
    match user_id {
        Some(user_id) => HttpResponse::Ok().body(user_id.into_inner()),
        None => HttpResponse::Ok().body("anonymous".to_owned()),
    }
}

async fn token_echo(access_token: FacebookAccessToken) -> impl Responder {
    HttpResponse::Ok().body(access_token.into_inner())
}

async fn field_count(cookie: FacebookCookie) -> impl Responder {
    HttpResponse::Ok().body(cookie.len().to_string())
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/whoami", web::get().to(whoami))
        .route("/maybe-whoami", web::get().to(maybe_whoami))
        .route("/token", web::get().to(token_echo))
        .route("/fields", web::get().to(field_count));
}

fn auth_cookie(fields: &[(&str, &str)]) -> Cookie<'static> {
    Cookie::new(facebook_config().cookie_name(), signed_cookie_value(fields))
}

#[actix_web::test]
async fn required_extractor_resolves_from_a_valid_cookie() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(facebook_config()))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .cookie(auth_cookie(&[("uid", "24500"), ("access_token", "tok")]))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "24500");

    let req = test::TestRequest::get()
        .uri("/token")
        .cookie(auth_cookie(&[("uid", "24500"), ("access_token", "tok")]))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "tok");
}

#[actix_web::test]
async fn required_extractor_fails_without_the_cookie() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(facebook_config()))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn required_extractor_fails_when_the_field_is_absent() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(facebook_config()))
            .configure(routes),
    )
    .await;

    // Cookie verifies but carries no access_token field
    let req = test::TestRequest::get()
        .uri("/token")
        .cookie(auth_cookie(&[("uid", "24500")]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn optional_extractor_resolves_to_none_without_the_cookie() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(facebook_config()))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/maybe-whoami").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "anonymous");

    let req = test::TestRequest::get()
        .uri("/maybe-whoami")
        .cookie(auth_cookie(&[("uid", "24500")]))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "24500");
}

#[actix_web::test]
async fn tampered_cookies_are_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(facebook_config()))
            .configure(routes),
    )
    .await;

    let forged = signed_cookie_value(&[("uid", "24500")]).replace("24500", "24501");
    let cookie = Cookie::new(facebook_config().cookie_name(), forged);

    let req = test::TestRequest::get()
        .uri("/whoami")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The optional form degrades to anonymous instead of failing
    let req = test::TestRequest::get()
        .uri("/maybe-whoami")
        .cookie(cookie)
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "anonymous");
}

#[actix_web::test]
async fn whole_payload_extractor_exposes_every_field() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(facebook_config()))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/fields")
        .cookie(auth_cookie(&[
            ("uid", "24500"),
            ("access_token", "tok"),
            ("expires", "0"),
        ]))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "3");
}

#[actix_web::test]
async fn missing_configuration_is_a_server_error() {
    // No FacebookConfig registered as app data
    let app = test::init_service(App::new().configure(routes)).await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .cookie(auth_cookie(&[("uid", "24500")]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn wrong_app_secret_rejects_the_cookie() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(FacebookConfig::new(
                "190291501880",
                "a-different-secret",
            )))
            .configure(routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/whoami")
        .cookie(auth_cookie(&[("uid", "24500")]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
