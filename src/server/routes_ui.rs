use crate::server::AppContext;
use axum::{extract::State, response::Html, routing::get, Router};

const INDEX_TEMPLATE: &str = include_str!("index.html");

pub fn ui_routes() -> Router<AppContext> {
    Router::new().route("/", get(index))
}

async fn index(State(ctx): State<AppContext>) -> Html<String> {
    Html(render_index(ctx.library.complete_count()))
}

fn render_index(total_videos: usize) -> String {
    INDEX_TEMPLATE.replace("{{ total_videos }}", &total_videos.to_string())
}
