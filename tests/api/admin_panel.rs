//! tests/api/admin_panel.rs

use crate::helpers::{assert_is_redirect_to, spawn_app, TestApp, ADMIN_USERNAME};

fn update_body(app: &TestApp) -> serde_json::Value {
    serde_json::json!({
        "username": &app.test_user.username,
        "first_name": &app.test_user.first_name,
        "last_name": &app.test_user.last_name,
        "email": &app.test_user.email,
        "phone_number": &app.test_user.phone_number,
        "new_password": "",
        "confirm_password": ""
    })
}

fn selected_user_path(app: &TestApp) -> String {
    format!("/admin/users?username={}", app.test_user.username)
}

#[tokio::test]
async fn you_must_be_logged_in_as_admin_to_see_the_admin_panel() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_response_from_url("/admin/users").await;

    // Assert
    assert_is_redirect_to(&response, "/admin/login");
    let html_page = app.get_html("/admin/login").await;
    assert!(html_page.contains("You need to be logged in as an admin to access this page."));
}

#[tokio::test]
async fn a_logged_in_user_is_not_an_admin() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;

    // Act
    let response = app
        .post_form("/admin/users/delete", &serde_json::json!({ "username": &app.test_user.username }))
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/login");
    assert!(app.password_hash(&app.test_user.username).await.is_some());
}

#[tokio::test]
async fn invalid_admin_credentials_are_rejected() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = [
        (ADMIN_USERNAME, "wrong-password"),
        (app.test_user.username.as_str(), app.test_user.password.as_str()),
    ];

    for (username, password) in test_cases {
        // Act
        let response = app
            .post_admin_login(&serde_json::json!({
                "username": username,
                "password": password
            }))
            .await;

        // Assert
        assert_is_redirect_to(&response, "/admin/login");
        let html_page = app.get_html("/admin/login").await;
        assert!(html_page.contains("Invalid admin username or password"));
    }
}

#[tokio::test]
async fn the_admin_sees_all_users() {
    // Arrange
    let app = spawn_app().await;

    // Act - Part 1 - Login
    let response = app.login_admin().await;
    assert_is_redirect_to(&response, "/admin/users");

    // Act - Part 2 - Follow the redirect
    let html_page = app.get_html("/admin/users").await;
    assert!(html_page.contains("<h1>Admin Panel</h1>"));
    assert!(html_page.contains(&format!("<td>{}</td>", app.test_user.username)));
    assert!(html_page.contains(&format!("<td>{}</td>", app.test_user.email)));
    assert!(!html_page.contains("password_hash"));
    assert!(!html_page.contains("$argon2id$"));

    // Act - Part 3 - An admin is not a regular user
    let response = app.get_response_from_url("/app/dashboard").await;
    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn the_admin_can_update_a_user() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    let hash_before = app.password_hash(&app.test_user.username).await.unwrap();
    let mut body = update_body(&app);
    body["first_name"] = "Rear Admiral".into();

    // Act
    let response = app.post_form("/admin/users/update", &body).await;

    // Assert
    assert_is_redirect_to(&response, &selected_user_path(&app));
    let html_page = app.get_html(&selected_user_path(&app)).await;
    assert!(html_page.contains("User updated successfully!"));
    assert_eq!(
        app.first_name(&app.test_user.username).await.unwrap(),
        "Rear Admiral"
    );
    assert_eq!(
        app.password_hash(&app.test_user.username).await.unwrap(),
        hash_before
    );
}

#[tokio::test]
async fn the_admin_can_reset_a_password() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    let mut body = update_body(&app);
    body["new_password"] = "a-brand-new-password".into();
    body["confirm_password"] = "a-brand-new-password".into();

    // Act
    let response = app.post_form("/admin/users/update", &body).await;
    assert_is_redirect_to(&response, &selected_user_path(&app));

    // Assert
    let response = app
        .post_login(&serde_json::json!({
            "username": &app.test_user.username,
            "password": "a-brand-new-password"
        }))
        .await;
    assert_is_redirect_to(&response, "/app/dashboard");
}

#[tokio::test]
async fn invalid_updates_are_reported_on_the_admin_panel() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;
    let mut body = update_body(&app);
    body["phone_number"] = "555".into();

    // Act
    let response = app.post_form("/admin/users/update", &body).await;

    // Assert
    assert_is_redirect_to(&response, &selected_user_path(&app));
    let html_page = app.get_html(&selected_user_path(&app)).await;
    assert!(html_page.contains("Invalid phone number."));
}

#[tokio::test]
async fn deleting_a_user_needs_confirmation() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act - Part 1 - The panel shows no confirmation by default
    let html_page = app.get_html(&selected_user_path(&app)).await;
    assert!(!html_page.contains("Yes, delete user"));

    // Act - Part 2 - Ask for confirmation
    let html_page = app
        .get_html(&format!("{}&confirm_delete=true", selected_user_path(&app)))
        .await;
    assert!(html_page.contains("This action cannot be undone."));
    assert!(html_page.contains("Yes, delete user"));
    assert!(html_page.contains("No, cancel"));

    // Act - Part 3 - Confirm
    let response = app
        .post_form(
            "/admin/users/delete",
            &serde_json::json!({ "username": &app.test_user.username }),
        )
        .await;
    assert_is_redirect_to(&response, "/admin/users");
    let html_page = app.get_html("/admin/users").await;
    assert!(html_page.contains("User deleted successfully!"));
    assert!(!html_page.contains(&format!("<td>{}</td>", app.test_user.username)));

    // Act - Part 4 - The deleted user can no longer log in
    app.post_logout().await;
    let response = app.test_user.login(&app).await;
    assert_is_redirect_to(&response, "/login");
}

#[tokio::test]
async fn deleting_an_unknown_user_is_reported() {
    // Arrange
    let app = spawn_app().await;
    app.login_admin().await;

    // Act
    let response = app
        .post_form("/admin/users/delete", &serde_json::json!({ "username": "nobody" }))
        .await;

    // Assert
    assert_is_redirect_to(&response, "/admin/users");
    let html_page = app.get_html("/admin/users").await;
    assert!(html_page.contains("not found."));
}
