//! Response envelope DTOs.
//!
//! # Design
//! Every server reply is a `{ code, message, data }` envelope. These types
//! only describe that shape; the requester decodes into them but never
//! branches on `code`. Interpreting a non-success code is up to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Business-level status carried in every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCode {
    Success,
    Fail,
    NotFound,
    Unauthorized,
    Forbidden,
    ValidateError,
}

impl ResponseCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResponseCode::Success => "success",
            ResponseCode::Fail => "fail",
            ResponseCode::NotFound => "not_found",
            ResponseCode::Unauthorized => "unauthorized",
            ResponseCode::Forbidden => "forbidden",
            ResponseCode::ValidateError => "validate_error",
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, ResponseCode::Success)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The standard wrapper around every API payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub code: ResponseCode,
    pub message: String,
    pub data: T,
}

impl<T> ResponseEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Unwrap the payload, turning any non-success code into
    /// `ApiError::Rejected`.
    pub fn into_data(self) -> Result<T, ApiError> {
        if self.code.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// Page position and totals for list responses. `current_page <= total_page`
/// is the server's responsibility and is not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total_page: u64,
    pub total_record: u64,
    pub current_page: u64,
    pub page_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub list: Vec<T>,
    pub paginator: PageInfo,
}

pub type PaginatedEnvelope<T> = ResponseEnvelope<Paginated<T>>;

/// Output of an application preview/debug run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDebugOutput {
    pub content: String,
}

pub type DebugAppResponse = ResponseEnvelope<AppDebugOutput>;
