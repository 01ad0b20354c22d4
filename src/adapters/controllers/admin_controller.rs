use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::{
    adapters::{
        controllers::file_controller::parse_id,
        state::AppState,
        views::admin::{self, FileListPage},
    },
    application::{dto::uploaded_file_dto::FileQuery, error::ApplicationError},
};

pub const PER_PAGE: u32 = 25;

#[derive(Debug, Default, Deserialize)]
pub struct AdminListParams {
    pub q: Option<String>,
    pub content_type: Option<String>,
    pub page: Option<String>,
    pub deleted: Option<u64>,
}

pub struct AdminController;

impl AdminController {
    /// GET /admin/
    pub async fn index() -> Redirect {
        Redirect::to("/admin/files/")
    }

    /// GET /admin/files/
    pub async fn list_files(
        State(app_state): State<AppState>,
        Query(params): Query<AdminListParams>,
    ) -> Result<Html<String>, ApplicationError> {
        let mut query = FileQuery {
            search: params.q.clone(),
            content_type: params.content_type.clone(),
            ..Default::default()
        };

        let total = app_state.file_repository.count(&query).await?;
        let pages = total.div_ceil(PER_PAGE as u64).max(1) as u32;
        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, pages);

        query.limit = Some(PER_PAGE);
        query.offset = Some((page - 1) * PER_PAGE);

        let files = app_state.file_repository.list(&query).await?;
        let content_types = app_state.file_repository.content_types().await?;

        let listing = FileListPage {
            files,
            total,
            page,
            pages,
            search: query.search_term().map(str::to_string),
            content_type: query.content_type_filter().map(str::to_string),
            content_types,
            deleted: params.deleted,
        };

        Ok(Html(admin::file_list(&listing)))
    }

    /// GET /admin/files/{id}/
    pub async fn file_detail(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Html<String>, ApplicationError> {
        let file = app_state.file_repository.get(parse_id(&id)?).await?;
        Ok(Html(admin::file_detail(&file)))
    }

    /// POST /admin/files/{id}/delete/
    pub async fn delete_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Redirect, ApplicationError> {
        let deleted = app_state.file_repository.delete(parse_id(&id)?).await?;
        info!("Admin deleted uploaded file record {}", deleted.id);
        Ok(Redirect::to("/admin/files/?deleted=1"))
    }

    /// POST /admin/files/delete/ with repeated `ids` form fields
    pub async fn bulk_delete(
        State(app_state): State<AppState>,
        Form(fields): Form<Vec<(String, String)>>,
    ) -> Result<Redirect, ApplicationError> {
        let ids: Vec<i64> = fields
            .iter()
            .filter(|(name, _)| name == "ids")
            .filter_map(|(_, value)| value.trim().parse::<i64>().ok())
            .collect();

        let deleted = app_state.file_repository.delete_many(&ids).await?;
        info!("Admin bulk-deleted {} uploaded file record(s)", deleted);

        Ok(Redirect::to(&format!("/admin/files/?deleted={}", deleted)))
    }
}
