//! tests/api/profile.rs

use crate::helpers::{assert_is_redirect_to, spawn_app, TestApp};

fn profile_body(app: &TestApp) -> serde_json::Value {
    serde_json::json!({
        "first_name": &app.test_user.first_name,
        "last_name": &app.test_user.last_name,
        "email": &app.test_user.email,
        "phone_number": &app.test_user.phone_number,
        "new_password": "",
        "confirm_password": ""
    })
}

#[tokio::test]
async fn the_profile_form_shows_the_stored_values() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    // Act
    let html_page = app.get_html("/app/profile").await;

    // Assert
    assert!(html_page.contains("<h1>Edit Profile</h1>"));
    assert!(html_page.contains(&format!(r#"value="{}""#, app.test_user.email)));
    assert!(html_page.contains(&format!(r#"value="{}""#, app.test_user.phone_number)));
}

#[tokio::test]
async fn saving_without_a_password_keeps_the_stored_hash() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let hash_before = app.password_hash(&app.test_user.username).await.unwrap();
    let mut body = profile_body(&app);
    body["first_name"] = "Amazing Grace".into();

    // Act
    let response = app.post_form("/app/profile", &body).await;

    // Assert
    assert_is_redirect_to(&response, "/app/profile");
    let html_page = app.get_html("/app/profile").await;
    assert!(html_page.contains("User updated successfully!"));
    assert!(html_page.contains(r#"value="Amazing Grace""#));
    assert_eq!(
        app.password_hash(&app.test_user.username).await.unwrap(),
        hash_before
    );
}

#[tokio::test]
async fn a_new_password_replaces_the_old_one() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let new_password = uuid::Uuid::new_v4().to_string();
    let mut body = profile_body(&app);
    body["new_password"] = new_password.as_str().into();
    body["confirm_password"] = new_password.as_str().into();

    // Act - Part 1 - Change password
    let response = app.post_form("/app/profile", &body).await;
    assert_is_redirect_to(&response, "/app/profile");

    // Act - Part 2 - The old password no longer works
    app.post_logout().await;
    let response = app.test_user.login(&app).await;
    assert_is_redirect_to(&response, "/login");

    // Act - Part 3 - The new one does
    let response = app
        .post_login(&serde_json::json!({
            "username": &app.test_user.username,
            "password": &new_password
        }))
        .await;
    assert_is_redirect_to(&response, "/app/dashboard");
}

#[tokio::test]
async fn invalid_profile_changes_are_reported() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let test_cases = vec![
        ("email", "grace.example.com", "Invalid email address."),
        ("phone_number", "12-34", "Invalid phone number."),
        ("new_password", "long-enough-password", "Passwords do not match."),
        ("last_name", "", "All fields are required."),
    ];

    for (field, value, message) in test_cases {
        let mut body = profile_body(&app);
        body[field] = value.into();

        // Act
        let response = app.post_form("/app/profile", &body).await;

        // Assert
        assert_is_redirect_to(&response, "/app/profile");
        let html_page = app.get_html("/app/profile").await;
        assert!(
            html_page.contains(message),
            "The profile page did not show `{}` for {} = `{}`.",
            message,
            field,
            value
        );
    }
}

#[tokio::test]
async fn an_email_of_another_account_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    let other = crate::helpers::TestUser::registration_form();
    app.post_register(&other).await;
    app.test_user.login(&app).await;
    let mut body = profile_body(&app);
    body["email"] = other["email"].clone();

    // Act
    let response = app.post_form("/app/profile", &body).await;

    // Assert
    assert_is_redirect_to(&response, "/app/profile");
    let html_page = app.get_html("/app/profile").await;
    assert!(html_page.contains("Username, email, or phone number already in use."));
}
