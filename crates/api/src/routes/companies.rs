//! Company profile routes.
//!
//! Every lookup is scoped to the caller; another owner's company is reported
//! as not found.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer};
use tracing::info;
use uuid::Uuid;

use crate::{ApiError, ApiResult, AppState, middleware::AuthUser};
use finreport_core::company::{
    CompanyProfile, CompanySize, Industry, normalize_inn, validate_name, validate_optional_fields,
    validate_profile,
};
use finreport_db::{
    CompanyRepository, entities::companies, repositories::UpdateCompanyInput,
};

/// Creates the companies router (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/companies", post(create_company))
        .route("/companies/me", get(list_my_companies))
        .route(
            "/companies/{company_id}",
            get(get_company).put(update_company).delete(delete_company),
        )
}

/// Request body for creating a company.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    /// Company name.
    pub name: String,
    /// INN, 10 or 12 digits.
    pub inn: String,
    /// Industry.
    pub industry: Industry,
    /// Size class, small when omitted.
    #[serde(default)]
    pub size: CompanySize,
    /// Description.
    pub description: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
}

impl From<CreateCompanyRequest> for CompanyProfile {
    fn from(req: CreateCompanyRequest) -> Self {
        Self {
            name: req.name,
            inn: req.inn,
            industry: req.industry,
            size: req.size,
            description: req.description,
            address: req.address,
            phone: req.phone,
            website: req.website,
        }
    }
}

/// Partial update. For optional fields, an explicit `null` clears the value
/// and an absent key leaves it unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompanyRequest {
    /// New name.
    pub name: Option<String>,
    /// New INN.
    pub inn: Option<String>,
    /// New industry.
    pub industry: Option<Industry>,
    /// New size class.
    pub size: Option<CompanySize>,
    /// New description.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New address.
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    /// New phone.
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    /// New website.
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateCompanyRequest {
    /// Validates the supplied fields and normalizes the INN.
    fn into_input(self) -> Result<UpdateCompanyInput, ApiError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        let inn = self.inn.as_deref().map(normalize_inn).transpose()?;
        validate_optional_fields(
            self.description.as_ref().and_then(Option::as_deref),
            self.address.as_ref().and_then(Option::as_deref),
            self.phone.as_ref().and_then(Option::as_deref),
            self.website.as_ref().and_then(Option::as_deref),
        )?;

        Ok(UpdateCompanyInput {
            name: self.name,
            inn,
            industry: self.industry,
            size: self.size,
            description: self.description,
            address: self.address,
            phone: self.phone,
            website: self.website,
        })
    }
}

/// POST /companies - Create a company owned by the caller.
///
/// A duplicate INN for the same owner answers 409 Conflict. Earlier
/// releases of this API answered 400 Bad Request for the same case.
async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCompanyRequest>,
) -> ApiResult<(StatusCode, Json<companies::Model>)> {
    let mut profile = CompanyProfile::from(payload);
    validate_profile(&mut profile)?;

    let company = CompanyRepository::new((*state.db).clone())
        .create(auth.user_id(), profile)
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /companies/me - The caller's companies, newest first.
async fn list_my_companies(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<companies::Model>>> {
    let companies = CompanyRepository::new((*state.db).clone())
        .list_by_owner(auth.user_id())
        .await?;

    Ok(Json(companies))
}

/// GET /companies/{company_id}
async fn get_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
) -> ApiResult<Json<companies::Model>> {
    let company = CompanyRepository::new((*state.db).clone())
        .find_owned(company_id, auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("Company not found"))?;

    Ok(Json(company))
}

/// PUT /companies/{company_id} - Partial update.
///
/// Changing the INN to one the owner already uses answers 409 Conflict.
async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> ApiResult<Json<companies::Model>> {
    let input = payload.into_input()?;

    let company = CompanyRepository::new((*state.db).clone())
        .update(company_id, auth.user_id(), input)
        .await?;

    info!(company_id = %company_id, user_id = %auth.user_id(), "Company updated");
    Ok(Json(company))
}

/// DELETE /companies/{company_id} - Removes the company with its periods and metrics.
async fn delete_company(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(company_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    CompanyRepository::new((*state.db).clone())
        .delete_with_dependents(company_id, auth.user_id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
