use crate::error::DbError;
use async_trait::async_trait;
use core_types::{CoreError, Trial, TrialId, TrialStatus};
use std::cmp::Ordering;
use std::str::FromStr;

/// A change applied to one trial inside a single read-modify-write.
///
/// Returning an error aborts the write and leaves the stored record as it was.
pub type Mutation = Box<dyn FnOnce(&mut Trial) -> Result<(), CoreError> + Send>;

/// The persistence contract for trials.
///
/// Implementations return trials exactly as stored; status derivation is the
/// caller's job.
#[async_trait]
pub trait TrialStore: Send + Sync {
    /// One page of trials, ascending by the requested key, ties broken by id.
    async fn find_all(&self, request: PageRequest) -> Result<Page<Trial>, DbError>;

    async fn find_by_id(&self, id: TrialId) -> Result<Option<Trial>, DbError>;

    /// All trials whose stored status equals `status`, ordered by id.
    async fn find_by_status(&self, status: TrialStatus) -> Result<Vec<Trial>, DbError>;

    async fn find_all_unpaged(&self) -> Result<Vec<Trial>, DbError>;

    /// Inserts the trial, or replaces the stored one with the same id.
    async fn save(&self, trial: &Trial) -> Result<Trial, DbError>;

    /// Loads the trial, applies `mutation` and writes the result back atomically.
    ///
    /// Fails with `DbError::NotFound` when no trial has this id and with
    /// `DbError::Rejected` when the mutation refuses the change.
    async fn modify(&self, id: TrialId, mutation: Mutation) -> Result<Trial, DbError>;

    /// Permanently removes the trial.
    async fn delete(&self, trial: &Trial) -> Result<(), DbError>;
}

/// The column a page is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Status,
    EndDate,
}

impl SortKey {
    pub(crate) fn column(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Status => "status",
            SortKey::EndDate => "end_date",
        }
    }

    /// Orders two trials the way the SQL `ORDER BY <column> ASC, id ASC` does.
    pub(crate) fn compare(&self, a: &Trial, b: &Trial) -> Ordering {
        let primary = match self {
            SortKey::Id => Ordering::Equal,
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            SortKey::EndDate => a.end_date.cmp(&b.end_date),
        };
        primary.then(a.id.cmp(&b.id))
    }
}

impl FromStr for SortKey {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "status" => Ok(SortKey::Status),
            "endDate" | "end_date" => Ok(SortKey::EndDate),
            other => Err(DbError::InvalidQuery(format!(
                "No property '{other}' found for type Trial"
            ))),
        }
    }
}

/// A zero-based page request. Only `new` builds one, so `size` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: SortKey,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: SortKey) -> Result<Self, DbError> {
        if size == 0 {
            return Err(DbError::InvalidQuery(
                "Page size must not be less than one".to_string(),
            ));
        }
        Ok(Self { page, size, sort })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size));
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
