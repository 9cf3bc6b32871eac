use axum::{
    async_trait,
    extract::{rejection::FormRejection, Form, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::ServerError;

pub(crate) mod not_found;
pub(crate) mod todo;

pub(crate) use not_found::*;
pub(crate) use todo::*;

/// A form whose input has been checked.
///
/// A request without a urlencoded body counts as an empty form. Only a malformed body is
/// rejected; failed validation is handed to the handler, which decides where to send the user.
#[derive(Debug)]
pub(crate) struct ValidatedForm<T>(pub(crate) Result<T, ValidationErrors>);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate + Default,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => value,
            Err(FormRejection::InvalidFormContentType(_)) => T::default(),
            Err(rejection) => return Err(rejection.into()),
        };
        Ok(ValidatedForm(value.validate().map(|()| value)))
    }
}

/// The `:id` segment of a todo route. Anything that is not an integer is a missing page.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TodoId(pub(crate) i32);

#[async_trait]
impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|_| ServerError::NotFound)?;
        Ok(TodoId(id))
    }
}
