//! tests/api/login.rs

use crate::helpers::{assert_is_redirect_to, spawn_app};

#[tokio::test]
async fn an_error_flash_message_is_set_on_failure() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let login_body = serde_json::json!({
        "username": "random-username",
        "password": "random-password"
    });
    let response = app.post_login(&login_body).await;

    // Assert
    assert_is_redirect_to(&response, "/login");
    let flash_cookie = response.cookies().find(|c| c.name() == "_flash");
    assert!(flash_cookie.is_some());

    // Act - Part 2
    let html_page = app.get_html("/login").await;
    assert!(html_page.contains(r#"<p class="error"><i>Invalid username or password</i></p>"#));

    // Act - Part 3
    let html_page = app.get_html("/login").await;
    assert!(!html_page.contains("Invalid username or password"));
}

#[tokio::test]
async fn a_wrong_password_is_rejected() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_login(&serde_json::json!({
            "username": &app.test_user.username,
            "password": "not-the-password"
        }))
        .await;

    // Assert
    assert_is_redirect_to(&response, "/login");
    let html_page = app.get_html("/app/dashboard").await;
    assert!(!html_page.contains("Welcome"));
}

#[tokio::test]
async fn username_and_password_are_required() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_login(&serde_json::json!({
            "username": &app.test_user.username,
            "password": ""
        }))
        .await;

    // Assert
    assert_is_redirect_to(&response, "/login");
    let html_page = app.get_html("/login").await;
    assert!(html_page.contains("Username and password are required."));
}

#[tokio::test]
async fn redirect_to_dashboard_after_login_success() {
    // Arrange
    let app = spawn_app().await;

    // Act - Part 1 - Login
    let response = app.test_user.login(&app).await;
    assert_is_redirect_to(&response, "/app/dashboard");

    // Act - Part 2 - Follow the redirect
    let html_page = app.get_html("/app/dashboard").await;
    assert!(html_page.contains(&format!("Welcome, {}!", app.test_user.username)));
    assert!(html_page.contains("Upload a file to start the analysis."));

    // Act - Part 3 - The root path leads back to the current page
    let response = app.get_response_from_url("/").await;
    assert_is_redirect_to(&response, "/app/dashboard");
}

#[tokio::test]
async fn you_must_be_logged_in_to_see_the_app_pages() {
    // Arrange
    let app = spawn_app().await;

    for path in ["/app/dashboard", "/app/profile"] {
        // Act
        let response = app.get_response_from_url(path).await;

        // Assert
        assert_is_redirect_to(&response, "/login");
        let html_page = app.get_html("/login").await;
        assert!(html_page.contains("You need to be logged in to access this page."));
    }
}

#[tokio::test]
async fn anonymous_posts_never_reach_the_handler() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post_form(
            "/app/profile",
            &serde_json::json!({
                "first_name": "Mallory",
                "last_name": &app.test_user.last_name,
                "email": &app.test_user.email,
                "phone_number": &app.test_user.phone_number,
                "new_password": "",
                "confirm_password": ""
            }),
        )
        .await;

    // Assert
    assert_is_redirect_to(&response, "/login");
    assert_eq!(
        app.first_name(&app.test_user.username).await.unwrap(),
        app.test_user.first_name
    );
}
