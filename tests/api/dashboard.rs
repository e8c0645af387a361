//! tests/api/dashboard.rs

use crate::helpers::{assert_is_redirect_to, spawn_app, TestApp};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use scraper::{Html, Selector};

const SALES: &str = "region,units,price\nnorth,10,1.5\nsouth,20,2.5\nnorth,5,3.5\n\
    east,7,4.0\nwest,1,0.5\nsouth,3,1.0\n";

async fn logged_in_app_with(file_name: &str, content: Vec<u8>) -> TestApp {
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let response = app.upload_file(file_name, content).await;
    assert_is_redirect_to(&response, "/app/dashboard");
    app
}

fn cell_texts(html_page: &str, selector: &str) -> Vec<String> {
    let document = Html::parse_document(html_page);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|e| e.text().collect::<String>())
        .collect()
}

#[tokio::test]
async fn an_uploaded_csv_is_previewed_with_a_heatmap() {
    // Arrange
    let app = logged_in_app_with("sales.csv", SALES.as_bytes().to_vec()).await;

    // Act
    let html_page = app.get_html("/app/dashboard").await;

    // Assert
    assert!(html_page.contains("Uploaded sales.csv."));
    assert!(html_page.contains("Data Preview"));
    assert_eq!(
        cell_texts(&html_page, "table#preview th"),
        vec!["region", "units", "price"]
    );
    // the preview is limited to the first five rows
    assert_eq!(cell_texts(&html_page, "table#preview tr").len(), 6);
    assert!(html_page.contains("Heatmap of Correlation Matrix"));
    assert!(cell_texts(&html_page, "p#dimensions").is_empty());
}

#[tokio::test]
async fn selected_options_are_shown() {
    // Arrange
    let app = logged_in_app_with("sales.csv", SALES.as_bytes().to_vec()).await;

    // Act
    let html_page = app
        .get_html(
            "/app/dashboard?show_dimensions=true&show_descriptions=true\
            &show_statistics=true&show_value_counts=true",
        )
        .await;

    // Assert
    assert!(html_page.contains("Data Dimensions: (6, 3)"));
    assert_eq!(
        cell_texts(&html_page, "ul#descriptions li"),
        vec!["region: object", "units: int64", "price: float64"]
    );
    assert_eq!(
        cell_texts(&html_page, "table#statistics th"),
        vec!["", "units", "price", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
    );
    assert!(html_page.contains("Value Counts of Fields:"));
}

#[tokio::test]
async fn the_selected_chart_is_rendered() {
    // Arrange
    let app = logged_in_app_with("sales.csv", SALES.as_bytes().to_vec()).await;

    for (plot_type, label) in [
        ("bar", "Bar Chart"),
        ("line", "Line Chart"),
        ("scatter", "Scatter Plot"),
        ("pie", "Pie Chart"),
    ] {
        // Act
        let html_page = app
            .get_html(&format!(
                "/app/dashboard?plot_type={}&x_col=region&y_col=units",
                plot_type
            ))
            .await;

        // Assert
        let document = Html::parse_document(&html_page);
        let chart = Selector::parse("div#chart svg").unwrap();
        assert!(
            document.select(&chart).next().is_some(),
            "No {} was rendered.",
            label
        );
        assert!(html_page.contains(label));
    }
}

#[tokio::test]
async fn a_pie_chart_of_numbers_over_numbers_is_skipped_with_a_message() {
    // Arrange
    let app = logged_in_app_with("sales.csv", SALES.as_bytes().to_vec()).await;

    // Act
    let html_page = app
        .get_html("/app/dashboard?plot_type=pie&x_col=units&y_col=price")
        .await;

    // Assert
    assert!(html_page.contains("Pie chart requires categorical data for"));
    assert!(cell_texts(&html_page, "div#chart svg").is_empty());
}

#[tokio::test]
async fn a_heatmap_needs_numeric_columns() {
    // Arrange
    let app = logged_in_app_with(
        "names.csv",
        b"first,last\nada,lovelace\nalan,turing\n".to_vec(),
    )
    .await;

    // Act
    let html_page = app.get_html("/app/dashboard").await;

    // Assert
    assert!(html_page.contains("No numeric columns found in the dataset to generate a heatmap."));
}

#[tokio::test]
async fn a_byte_order_mark_does_not_end_up_in_the_header() {
    // Arrange
    let mut content = vec![0xEF, 0xBB, 0xBF];
    content.extend_from_slice("city,visitors\nZürich,10\nMünchen,12\n".as_bytes());
    let app = logged_in_app_with("cities.CSV", content).await;

    // Act
    let html_page = app.get_html("/app/dashboard").await;

    // Assert
    assert_eq!(
        cell_texts(&html_page, "table#preview th"),
        vec!["city", "visitors"]
    );
    assert!(html_page.contains("Zürich"));
}

#[tokio::test]
async fn unsupported_and_broken_files_are_rejected() {
    // Arrange
    let app = spawn_app().await;
    app.test_user.login(&app).await;
    let test_cases = vec![
        (
            "notes.txt",
            b"a,b\n1,2\n".to_vec(),
            "Unsupported file type. Please upload a CSV or Excel file.",
        ),
        (
            "broken.xlsx",
            b"this is not a spreadsheet".to_vec(),
            "Error parsing the file. Please check the file format.",
        ),
        ("empty.csv", Vec::new(), "The uploaded file contains no data."),
        ("header.csv", b"a,b\n".to_vec(), "The uploaded file contains no data."),
    ];

    for (file_name, content, message) in test_cases {
        // Act
        let response = app.upload_file(file_name, content).await;

        // Assert
        assert_is_redirect_to(&response, "/app/dashboard");
        let html_page = app.get_html("/app/dashboard").await;
        assert!(
            html_page.contains(message),
            "Uploading {} did not show `{}`.",
            file_name,
            message
        );
        assert!(html_page.contains("Upload a file to start the analysis."));
    }
}

#[tokio::test]
async fn a_new_upload_replaces_the_previous_one() {
    // Arrange
    let app = logged_in_app_with("sales.csv", SALES.as_bytes().to_vec()).await;

    // Act
    let response = app
        .upload_file("other.csv", b"colour,count\nred,1\n".to_vec())
        .await;

    // Assert
    assert_is_redirect_to(&response, "/app/dashboard");
    let html_page = app.get_html("/app/dashboard").await;
    assert_eq!(
        cell_texts(&html_page, "table#preview th"),
        vec!["colour", "count"]
    );
}

#[tokio::test]
async fn an_upload_dropped_by_the_cleanup_must_be_uploaded_again() {
    // Arrange
    let app = logged_in_app_with("sales.csv", SALES.as_bytes().to_vec()).await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    assert_eq!(app.dataset_store.remove_idle(chrono::TimeDelta::zero()), 1);

    // Act - Part 1 - Open the dashboard
    let html_page = app.get_html("/app/dashboard").await;

    // Assert
    assert!(html_page.contains("The uploaded file is no longer available. Please upload it again."));

    // Act - Part 2 - The stale upload is forgotten
    let html_page = app.get_html("/app/dashboard").await;
    assert!(html_page.contains("Upload a file to start the analysis."));
}

#[tokio::test]
async fn an_uploaded_workbook_is_previewed_with_its_types() {
    // Arrange
    let mut worksheet = Worksheet::new();
    let date = Format::new().set_num_format("yyyy-mm-dd");
    for (col, header) in ["region", "units", "since"].iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row, (region, units, since)) in [("north", 10.0, 45292.0), ("south", 20.0, 45323.0)]
        .into_iter()
        .enumerate()
    {
        let row = row as u32 + 1;
        worksheet.write_string(row, 0, region).unwrap();
        worksheet.write_number(row, 1, units).unwrap();
        worksheet.write_number_with_format(row, 2, since, &date).unwrap();
    }
    let mut workbook = Workbook::new();
    workbook.push_worksheet(worksheet);
    let bytes = workbook.save_to_buffer().unwrap();
    let app = logged_in_app_with("sales.xlsx", bytes).await;

    // Act
    let html_page = app.get_html("/app/dashboard?show_descriptions=true").await;

    // Assert
    assert_eq!(
        cell_texts(&html_page, "table#preview th"),
        vec!["region", "units", "since"]
    );
    assert_eq!(
        cell_texts(&html_page, "table#preview td"),
        vec!["north", "10", "2024-01-01", "south", "20", "2024-02-01"]
    );
    assert_eq!(
        cell_texts(&html_page, "ul#descriptions li"),
        vec!["region: object", "units: int64", "since: object"]
    );
}
