pub mod artists;
pub mod shows;
pub mod venues;

use axum::{response::Html, Json};
use axum_extra::extract::FormRejection;
use sea_orm::{
    prelude::DateTimeWithTimeZone,
    sea_query::{BinOper, Expr, Func, SimpleExpr},
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel,
};
use serde::{Deserialize, Serialize};

use crate::error::{render, PageError};
use crate::forms::FormErrors;
use crate::templates::HomeTemplate;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

#[derive(Serialize)]
pub struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

pub(crate) fn now() -> DateTimeWithTimeZone {
    chrono::Utc::now().fixed_offset()
}

/// Case-insensitive substring match on a text column.
///
/// Both sides go through the database's `LOWER`, so column and term fold the
/// same way. SQLite only folds ASCII letters; Postgres folds all of Unicode.
pub(crate) fn name_contains<C: ColumnTrait>(column: C, term: &str) -> SimpleExpr {
    // Escape LIKE wildcards so user input only matches literally.
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(format!("%{escaped}%"))).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant('\\'.into())),
    );
    Expr::expr(Func::lower(Expr::col(column))).binary(BinOper::Like, pattern)
}

/// GET /
pub async fn home() -> Result<Html<String>, PageError> {
    home_page(Vec::new())
}

pub(crate) fn home_page(messages: Vec<String>) -> Result<Html<String>, PageError> {
    render(&HomeTemplate { messages })
}

/// GET /healthz
pub async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// A create body that could not be decoded (wrong content type, a repeated
/// single-value field) gets the same generic notice as a failed insert.
pub(crate) fn form_rejected(
    entity: &'static str,
    rejection: FormRejection,
) -> Result<Html<String>, PageError> {
    tracing::warn!(entity, error = %rejection, "form body rejected");
    home_page(vec![failure_message(entity)])
}

fn failure_message(entity: &str) -> String {
    format!("An error occurred. {entity} could not be listed.")
}

/// Finish a create submission.
///
/// Invalid forms report their fields without touching the database. Valid
/// records are inserted atomically; a failed insert is rolled back and
/// reported generically. All three outcomes render the home page.
pub(crate) async fn create_record<A>(
    db: &DatabaseConnection,
    entity: &'static str,
    validated: Result<(A, String), FormErrors>,
) -> Result<Html<String>, PageError>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    let messages = match validated {
        Err(errors) => {
            tracing::debug!(entity, fields = ?errors.fields(), "form rejected");
            errors.into_messages()
        }
        Ok((record, success)) => match gigboard_db::insert_atomic(db, record).await {
            Ok(_) => {
                tracing::info!(entity, "record listed");
                vec![success]
            }
            Err(e) => {
                tracing::error!(entity, error = %e, "insert failed, transaction rolled back");
                vec![failure_message(entity)]
            }
        },
    };
    home_page(messages)
}
