use axum::response::Html;

/// GET /
/// The single interactive page: resume upload, target role input, trigger
/// button, progress indicator, result display, and report download link.
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
