use std::error::Error;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod routes;
pub mod serialize;
pub mod store;
pub mod validate;

pub fn unpack_error(err: &dyn Error) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, StorageError};

    #[test]
    fn unpack_error_walks_the_source_chain() {
        let err = ApiError::from(StorageError::MissingRow("bookmarks"));
        assert_eq!(unpack_error(&err), "storage failure: insert into bookmarks returned no row");
    }
}
