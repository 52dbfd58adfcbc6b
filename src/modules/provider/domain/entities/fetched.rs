use crate::shared::errors::AppResult;

/// Outcome of a fan-out provider call.
///
/// One provider's outage never fails a whole reconciliation, so failures are
/// carried as an explicit empty value instead of an error the caller has to
/// remember to swallow.
#[derive(Debug, Clone)]
pub enum Fetched<T> {
    Data(T),
    Empty,
}

impl<T> Fetched<T> {
    /// Convert a provider call result, downgrading failure to `Empty` with a
    /// warning attributed to `source`.
    pub fn from_result(result: AppResult<T>, source: &str) -> Self {
        match result {
            Ok(value) => Fetched::Data(value),
            Err(e) => {
                log::warn!("{} fetch failed, continuing without it: {}", source, e);
                Fetched::Empty
            }
        }
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Fetched::Data(value) => Some(value),
            Fetched::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fetched::Empty)
    }
}

impl<T: Default> Fetched<T> {
    pub fn into_data_or_default(self) -> T {
        match self {
            Fetched::Data(value) => value,
            Fetched::Empty => T::default(),
        }
    }
}
