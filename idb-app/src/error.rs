use diesel::QueryResult;
use idb_db::{ModelError, QueryConvertError};
use log::{debug, error};
use miette::Diagnostic;
use rocket::http::{ContentType, Status};
use rocket::response::Responder;
use rocket::{Request, Response};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    DbError(#[from] diesel::result::Error),

    #[error(transparent)]
    ModelError(#[from] ModelError),

    #[error("{}", .0.reason_lossy())]
    Rejected(Status),
}

impl From<QueryConvertError> for AppError {
    fn from(value: QueryConvertError) -> Self {
        match value {
            QueryConvertError::Query(err) => AppError::DbError(err),
            QueryConvertError::Convert(err) => AppError::ModelError(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::NotFound(_) | AppError::DbError(diesel::result::Error::NotFound) => {
                Status::NotFound
            }
            AppError::DbError(_) | AppError::ModelError(_) => Status::InternalServerError,
            AppError::Rejected(status) => *status,
        }
    }
}

/// Names the missing row when a lookup comes back empty.
pub trait OrNotFound<T> {
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T, AppError>;
}

impl<T> OrNotFound<T> for QueryResult<T> {
    fn or_not_found(self, what: impl FnOnce() -> String) -> Result<T, AppError> {
        self.map_err(|err| match err {
            diesel::result::Error::NotFound => AppError::NotFound(what()),
            err => AppError::DbError(err),
        })
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for AppError {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status == Status::NotFound {
            debug!("{} -> {}", req.uri(), self);
        } else {
            error!("{} -> {:#?}", req.uri(), self);
        }

        let rendered = serde_json::json!({
            "status": status.code,
            "error": self.to_string(),
        })
        .to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(rendered.len(), std::io::Cursor::new(rendered))
            .ok()
    }
}

/// Requests that match no route get the same JSON body as a failed lookup.
#[rocket::catch(404)]
pub fn not_found(req: &Request<'_>) -> AppError {
    AppError::NotFound(req.uri().path().to_string())
}

/// Everything else Rocket answers on its own, e.g. a failed `Db` guard.
/// A path segment that doesn't parse as the route's id type means no such
/// record, so that is a 404 too.
#[rocket::catch(default)]
pub fn fallback(status: Status, req: &Request<'_>) -> AppError {
    if status == Status::UnprocessableEntity {
        AppError::NotFound(req.uri().path().to_string())
    } else {
        AppError::Rejected(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::get;
    use rocket::local::blocking::Client;

    #[get("/missing")]
    fn missing() -> Result<&'static str, AppError> {
        Err(AppError::NotFound("player 12".to_string()))
    }

    #[get("/no-row")]
    fn no_row() -> Result<&'static str, AppError> {
        Err(diesel::result::Error::NotFound.into())
    }

    #[get("/bad-row")]
    fn bad_row() -> Result<&'static str, AppError> {
        Err(ModelError::UnknownPlayerKind {
            row_id: 5,
            kind: "catcher".to_string(),
        }
        .into())
    }

    #[get("/players/<player_id>")]
    fn typed(player_id: i64) -> Result<&'static str, AppError> {
        Err(AppError::NotFound(format!("player {player_id}")))
    }

    #[get("/unavailable")]
    fn unavailable() -> Status {
        Status::ServiceUnavailable
    }

    fn client() -> Client {
        let rocket = rocket::build()
            .mount("/", rocket::routes![missing, no_row, bad_row, typed, unavailable])
            .register("/", rocket::catchers![not_found, fallback]);
        Client::tracked(rocket).expect("valid rocket instance")
    }


    #[test]
    fn not_found_is_404_with_json_body() {
        let client = client();
        let response = client.get("/missing").dispatch();

        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(response.content_type(), Some(ContentType::JSON));

        let body: serde_json::Value = response.into_json().expect("json body");
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "player 12 not found");
    }

    #[test]
    fn missing_row_is_404() {
        let client = client();
        let response = client.get("/no-row").dispatch();
        assert_eq!(response.status(), Status::NotFound);
    }

    #[test]
    fn conversion_failure_is_500() {
        let client = client();
        let response = client.get("/bad-row").dispatch();
        assert_eq!(response.status(), Status::InternalServerError);
    }

    #[test]
    fn unknown_route_is_json_404() {
        let client = client();
        let response = client.get("/players/not-a-number/extra").dispatch();

        assert_eq!(response.status(), Status::NotFound);
        let body: serde_json::Value = response.into_json().expect("json body");
        assert_eq!(body["error"], "/players/not-a-number/extra not found");
    }

    #[test]
    fn query_convert_error_keeps_not_found() {
        let err: AppError = QueryConvertError::Query(diesel::result::Error::NotFound).into();
        assert_eq!(err.status(), Status::NotFound);
    }

    #[test]
    fn unparseable_ids_are_json_404() {
        let client = client();
        for path in ["/players/abc", "/players/99999999999999999999", "/players/1.5"] {
            let response = client.get(path).dispatch();
            assert_eq!(response.status(), Status::NotFound, "{path}");
            assert_eq!(response.content_type(), Some(ContentType::JSON), "{path}");

            let body: serde_json::Value = response.into_json().expect("json body");
            assert_eq!(body["status"], 404, "{path}");
            assert_eq!(body["error"], format!("{path} not found"));
        }
    }

    #[test]
    fn other_statuses_keep_their_code_with_json_body() {
        let client = client();
        let response = client.get("/unavailable").dispatch();

        assert_eq!(response.status(), Status::ServiceUnavailable);
        let body: serde_json::Value = response.into_json().expect("json body");
        assert_eq!(body["status"], 503);
        assert_eq!(body["error"], "Service Unavailable");
    }

    #[test]
    fn or_not_found_names_the_missing_row() {
        let missing: QueryResult<()> = Err(diesel::result::Error::NotFound);
        let err = missing.or_not_found(|| "team 9".to_string()).unwrap_err();
        assert_eq!(err.status(), Status::NotFound);
        assert_eq!(err.to_string(), "team 9 not found");

        let broken: QueryResult<()> = Err(diesel::result::Error::BrokenTransactionManager);
        let err = broken.or_not_found(|| "team 9".to_string()).unwrap_err();
        assert_eq!(err.status(), Status::InternalServerError);
    }
}
