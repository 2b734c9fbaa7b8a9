use core_types::TrialId;
use database::Page;
use serde::{Deserialize, Serialize};

/// The envelope every non-paged response is wrapped in.
///
/// On failure `ok` is false, `error` carries the message and `data` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDto<T> {
    pub ok: bool,
    pub error: Option<String>,
    pub data: Vec<T>,
}

impl<T> ResponseDto<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            ok: true,
            error: None,
            data,
        }
    }

    pub fn single(item: T) -> Self {
        Self::success(vec![item])
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
            data: Vec::new(),
        }
    }
}

/// The envelope of the paged listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePageDto<T> {
    pub ok: bool,
    pub error: Option<String>,
    pub data: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> From<Page<T>> for ResponsePageDto<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            ok: true,
            error: None,
            data: page.content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        }
    }
}

/// Body of `PUT /v1/trials/update-status`. The status stays text so that an
/// unknown value is reported as an invalid status rather than a malformed body.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusChangeRequest {
    pub id: TrialId,
    pub status: String,
}
