//! tests/api/register.rs

use crate::helpers::{assert_is_redirect_to, spawn_app, TestUser};

#[tokio::test]
async fn a_new_session_starts_on_the_register_page() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_response_from_url("/").await;

    // Assert
    assert_is_redirect_to(&response, "/register");
    let html_page = app.get_html("/register").await;
    assert!(html_page.contains("<h1>Register</h1>"));
}

#[tokio::test]
async fn register_persists_the_new_user_and_moves_on_to_login() {
    // Arrange
    let app = spawn_app().await;
    let body = TestUser::registration_form();

    // Act - Part 1 - Register
    let response = app.post_register(&body).await;
    assert_is_redirect_to(&response, "/login");

    // Act - Part 2 - Follow the redirect
    let html_page = app.get_html("/login").await;
    assert!(html_page.contains(r#"<p class="success"><i>Registration successful!</i></p>"#));

    // Act - Part 3 - The new account can log in
    let username = body["username"].as_str().unwrap();
    let password_hash = app.password_hash(username).await.unwrap();
    assert!(password_hash.starts_with("$argon2id$"));
    assert_ne!(password_hash, body["password"].as_str().unwrap());
    let response = app.post_login(&serde_json::json!({
        "username": username,
        "password": body["password"],
    }))
    .await;
    assert_is_redirect_to(&response, "/app/dashboard");
}

#[tokio::test]
async fn register_reports_invalid_form_data() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = vec![
        ("username", "", "All fields are required."),
        ("email", "   ", "All fields are required."),
        ("confirm_password", "something-different", "Passwords do not match."),
        ("email", "definitely-not-an-email", "Invalid email address."),
        ("email", "ada@example.c", "Invalid email address."),
        ("phone_number", "0123456789", "Invalid phone number."),
        ("phone_number", "+12345", "Invalid phone number."),
    ];

    for (field, value, message) in test_cases {
        let mut body = TestUser::registration_form();
        body[field] = serde_json::Value::from(value);

        // Act
        let response = app.post_register(&body).await;

        // Assert
        assert_is_redirect_to(&response, "/register");
        let html_page = app.get_html("/register").await;
        assert!(
            html_page.contains(&format!(r#"<p class="error"><i>{}</i></p>"#, message)),
            "The register page did not show `{}` when {} was `{}`.",
            message,
            field,
            value
        );
        let username = body["username"].as_str().unwrap();
        assert!(app.password_hash(username).await.is_none());
    }
}

#[tokio::test]
async fn register_rejects_an_already_used_username_email_or_phone() {
    // Arrange
    let app = spawn_app().await;
    let taken = [
        ("username", app.test_user.username.clone()),
        ("email", app.test_user.email.clone()),
        ("phone_number", app.test_user.phone_number.clone()),
    ];

    for (field, value) in taken {
        let mut body = TestUser::registration_form();
        body[field] = serde_json::Value::from(value.as_str());

        // Act
        let response = app.post_register(&body).await;

        // Assert
        assert_is_redirect_to(&response, "/register");
        let html_page = app.get_html("/register").await;
        assert!(
            html_page.contains("Username, email, or phone number already in use."),
            "A duplicated {} was accepted.",
            field
        );
    }
}
