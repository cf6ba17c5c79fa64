//! Language selection route handlers.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bazaar_core::Language;

use crate::error::Result;
use crate::models::session;

/// The visitor's language selection.
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageSelection {
    pub language: Language,
}

/// Read the selected interface language.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<LanguageSelection> {
    Json(LanguageSelection {
        language: session::language(&session).await,
    })
}

/// Persist a language choice and echo it back.
#[instrument(skip(session), fields(language = ?selection.language))]
pub async fn set(
    session: Session,
    Json(selection): Json<LanguageSelection>,
) -> Result<Json<LanguageSelection>> {
    session::set_language(&session, selection.language).await?;
    Ok(Json(selection))
}
