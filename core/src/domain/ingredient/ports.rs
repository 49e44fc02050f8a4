use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, ingredient::entities::TermList};

/// Source of the unhealthy-ingredient term list.
#[cfg_attr(test, mockall::automock)]
pub trait TermListRepository: Send + Sync {
    fn load_terms(&self) -> impl Future<Output = Result<TermList, CoreError>> + Send;
}
