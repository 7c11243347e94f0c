use mandi_store::StoreError;
use thiserror::Error;

use crate::manage::ManageError;
use crate::registration::RegistrationError;
use crate::session::AuthError;
use crate::view::ViewError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Manage(#[from] ManageError),

    #[error("cannot publish: {0}")]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
