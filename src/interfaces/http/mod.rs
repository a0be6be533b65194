pub mod error;
pub mod page;
pub mod upload;

use actix_cors::Cors;
use actix_multipart::form::{MultipartForm, MultipartFormConfig};
use actix_web::{dev::Server, get, middleware, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::application::{CsvPreview, RenderCycle};
use crate::domain::csv::UploadedFile;
use crate::domain::error::{AppError, Result};
use crate::domain::frame::Frame;
use crate::domain::widgets::{WidgetForm, WidgetValues};
use crate::infrastructure::config::AppConfig;

use self::error::status_for;
use self::page::{render_error_page, render_page};
use self::upload::PageForm;

/// Entries kept in the in-memory log buffer
const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub config: AppConfig,
    pub render: RenderCycle,
    pub preview: CsvPreview,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    pub fn new(config: AppConfig, logs: Arc<Mutex<Vec<LogEntry>>>) -> Self {
        let preview = CsvPreview::new(config.preview_config());
        Self {
            render: RenderCycle::new(preview.clone()),
            preview,
            config,
            logs,
        }
    }
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub file_name: Option<String>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Run one render cycle on the blocking pool
async fn run_cycle(
    data: &web::Data<HttpState>,
    form: WidgetForm,
    submitted_form: bool,
    upload: Option<UploadedFile>,
) -> Result<Frame> {
    let render = data.render.clone();
    let today = today();

    web::block(move || {
        let values = WidgetValues::from_form(&form, submitted_form, today)?;
        render.run(&values, upload.as_ref(), today)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Render worker failed: {}", e)))?
}

fn page_response(data: &web::Data<HttpState>, result: Result<Frame>) -> HttpResponse {
    match result {
        Ok(frame) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(render_page(&frame)),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Page",
                &format!("Render cycle failed: {}", e),
            );
            HttpResponse::build(status_for(&e))
                .content_type("text/html; charset=utf-8")
                .body(render_error_page(&e))
        }
    }
}

#[get("/")]
async fn index(data: web::Data<HttpState>, query: web::Query<WidgetForm>) -> impl Responder {
    let result = run_cycle(&data, query.into_inner(), false, None).await;
    page_response(&data, result)
}

#[post("/")]
async fn submit(
    data: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<PageForm>,
) -> impl Responder {
    let (fields, upload) = form.into_parts();

    if let Some(file) = &upload {
        add_log(
            &data.logs,
            "INFO",
            "Upload",
            &format!(
                "Received upload '{}' ({} bytes)",
                file.file_name,
                file.bytes.len()
            ),
        );
    }

    let result = run_cycle(&data, fields, true, upload).await;
    page_response(&data, result)
}

#[post("/preview")]
async fn api_preview(
    data: web::Data<HttpState>,
    query: web::Query<PreviewQuery>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let file = UploadedFile::new(
        query
            .into_inner()
            .file_name
            .unwrap_or_else(|| "upload.csv".to_string()),
        body.to_vec(),
    );
    let preview_case = data.preview.clone();

    let preview = web::block(move || preview_case.preview_upload(&file))
        .await
        .map_err(|e| AppError::Internal(format!("Preview worker failed: {}", e)))?
        .map_err(|e| {
            add_log(&data.logs, "ERROR", "Preview", &format!("Preview failed: {}", e));
            e
        })?;

    add_log(
        &data.logs,
        "INFO",
        "Preview",
        &format!(
            "Preview built: {} of {} rows, {} columns",
            preview.rows.len(),
            preview.total_rows,
            preview.columns.len()
        ),
    );

    Ok(HttpResponse::Ok().json(preview))
}

#[get("/frame")]
async fn api_frame(
    data: web::Data<HttpState>,
    query: web::Query<WidgetForm>,
) -> Result<HttpResponse> {
    let frame = run_cycle(&data, query.into_inner(), false, None).await?;
    Ok(HttpResponse::Ok().json(frame))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };

    match level {
        "ERROR" => tracing::error!(source, "{}", message),
        "WARN" => tracing::warn!(source, "{}", message),
        _ => tracing::info!(source, "{}", message),
    }

    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Register state, body limits and every route
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<HttpState>) {
    let limit = state.config.max_upload_bytes;

    cfg.app_data(state)
        .app_data(
            MultipartFormConfig::default()
                .total_limit(limit)
                .memory_limit(limit),
        )
        .app_data(web::PayloadConfig::new(limit))
        .service(index)
        .service(submit)
        .service(health)
        .service(
            web::scope("/api")
                .wrap(Cors::permissive()) // Allow all origins for local tool
                .service(api_preview)
                .service(api_frame)
                .service(get_logs),
        );
}

pub fn start_server(state: HttpState) -> std::io::Result<Server> {
    let bind_address = state.config.bind_address();
    let state = web::Data::new(state);

    add_log(
        &state.logs,
        "INFO",
        "HttpServer",
        &format!(
            "Listening on http://{}:{}",
            bind_address.0, bind_address.1
        ),
    );

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(middleware::Logger::default())
            .configure(move |cfg| configure(cfg, state))
    })
    .bind(bind_address)?
    .run();

    Ok(server)
}
