//! Route handlers for the file endpoints and the test report

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::Redirect,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use replacer_core::{SearchMode, Substitution, report::load_report_stats};

use crate::{error::ApiResult, state::AppState};

pub const FILES_PATH: &str = "/files";

#[derive(Debug, Serialize, Deserialize)]
pub struct FilesResponse {
    pub status: String,
    pub files: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddFileRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceRequest {
    pub to_replace: String,
    pub with_this: String,
    /// Match `to_replace` as a plain string rather than a regex
    #[serde(default)]
    pub fixed_strings: bool,
    #[serde(default)]
    pub advanced_regex: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub status: String,
    pub report: Value,
}

/// GET /files
pub async fn list_files(State(state): State<Arc<AppState>>) -> ApiResult<Json<FilesResponse>> {
    let files = state.store.list().await?;
    info!("Listed {} files", files.len());

    Ok(Json(FilesResponse {
        status: "ok".to_owned(),
        files,
    }))
}

/// POST /files/add/:name
pub async fn add_file(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
    body: Result<Json<AddFileRequest>, JsonRejection>,
) -> ApiResult<Redirect> {
    let Path(name) = name?;
    let Json(request) = body?;
    state.store.write(&name, &request.text).await?;
    info!("Added {name} ({} bytes)", request.text.len());

    Ok(Redirect::to(FILES_PATH))
}

/// PUT /files/replace/:old_file/:new_file
///
/// `toReplace` is a regular expression unless `fixedStrings` is set.
pub async fn replace_file(
    State(state): State<Arc<AppState>>,
    files: Result<Path<(String, String)>, PathRejection>,
    body: Result<Json<ReplaceRequest>, JsonRejection>,
) -> ApiResult<Redirect> {
    let Path((old_file, new_file)) = files?;
    let Json(request) = body?;
    let substitution = Substitution::new(
        &request.to_replace,
        &request.with_this,
        SearchMode::from_flags(request.fixed_strings, request.advanced_regex),
    )?;

    let summary = state
        .store
        .replace_into_with(&old_file, &substitution, &new_file, |step| {
            info!("{old_file} -> {new_file}: {step}");
        })
        .await?;
    info!(
        "Replaced {} matches from {} into {}",
        summary.num_replacements, summary.source, summary.target
    );

    Ok(Redirect::to(FILES_PATH))
}

/// GET /report
pub async fn report(State(state): State<Arc<AppState>>) -> ApiResult<Json<ReportResponse>> {
    let report = load_report_stats(&state.report_path).await?;
    info!("Served report from {}", state.report_path.display());

    Ok(Json(ReportResponse {
        status: "ok".to_owned(),
        report,
    }))
}
