#![cfg(feature = "web")]

use axum::{
    Router,
    extract::{Multipart, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::{AppConfig, ColumnNames};
use crate::error::{Error, Result};
use crate::loader;

pub struct AppState {
    config: AppConfig,
    names: ColumnNames,
}

#[derive(Deserialize)]
struct PlotQuery {
    file: String,
}

/// Start the web server
///
/// Routes: `/` serves the upload form, `POST /upload` stores a workbook and
/// redirects to the render endpoint, and `GET /network_plot` runs the full
/// pipeline and returns the page with both figures.
///
/// # Arguments
/// * `config` - Bind address and uploads directory
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
pub async fn run(config: AppConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.upload_dir)?;

    let listener = TcpListener::bind(&config.addr).await?;
    log::info!("Listening on http://{}", config.addr);

    let state = Arc::new(AppState {
        names: ColumnNames::default(),
        config,
    });

    let app = Router::new()
        .route("/", get(serve_landing))
        .route("/upload", post(upload))
        .route("/network_plot", get(network_plot))
        .with_state(state);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_landing() -> Html<&'static str> {
    Html(include_str!("./static/landing.html"))
}

/// Accept a workbook upload and redirect to the render endpoint.
///
/// The extension is checked before any bytes are read; non-`.xlsx` uploads
/// are rejected with a plain-text 400. Same-name uploads overwrite.
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Load(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        loader::check_extension(&filename)?;
        let name = sanitize_filename(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Load(e.to_string()))?;
        let dest = state.config.upload_dir.join(&name);
        tokio::fs::write(&dest, &data).await?;
        log::info!("stored upload {:?} ({} bytes)", dest, data.len());

        return Ok(Redirect::to(&format!(
            "/network_plot?file={}",
            urlencoding::encode(&name)
        )));
    }

    Err(Error::Load("upload contained no \"file\" field".to_string()))
}

/// Run the pipeline on a previously uploaded workbook.
///
/// The page is built per request and returned in the response body, so
/// concurrent renders never share an output file.
async fn network_plot(
    Query(params): Query<PlotQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>> {
    let name = sanitize_filename(&params.file)?;
    let path = state.config.upload_dir.join(&name);
    log::info!("rendering network plot for {:?}", path);

    let page = crate::render_network_page(&path, &state.names)?;
    Ok(Html(page))
}

// Strip any path components so uploads can only land inside the uploads
// directory.
fn sanitize_filename(name: &str) -> Result<String> {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .ok_or_else(|| Error::InvalidFileType(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(
            sanitize_filename("../../etc/graph.xlsx").unwrap(),
            "graph.xlsx"
        );
        assert_eq!(sanitize_filename("graph.xlsx").unwrap(), "graph.xlsx");
    }

    #[test]
    fn test_sanitize_rejects_empty_names() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("..").is_err());
    }
}
