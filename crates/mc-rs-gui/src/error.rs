//! Menu toolkit error types.

use thiserror::Error;

use crate::manager::MenuId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuiError {
    #[error("invalid menu size {0}: must be a positive multiple of 9")]
    InvalidSize(usize),

    #[error("menu {0} is not registered")]
    NotRegistered(MenuId),

    #[error("menu does not have a paginated layout")]
    NotPaginated,

    #[error("page {page} out of range (pages: {pages})")]
    PageOutOfRange { page: usize, pages: usize },
}
