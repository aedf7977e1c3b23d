//! Errors produced by the operators themselves and the hook that receives
//! errors nobody subscribed for.

use std::{
  convert::Infallible,
  fmt::Debug,
  sync::{PoisonError, RwLock},
};

use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError {
  /// `element_at` was asked for an index past the end of its source.
  #[error("argument out of range: index {index} but the source completed after {len} elements")]
  ArgumentOutOfRange { index: usize, len: usize },
  /// A fetch collaborator answered with a status outside `200..300`.
  #[error("request failed with status {status}")]
  Fetch { status: u16 },
  #[error("decode failed: {0}")]
  Decode(String),
  #[error("{0}")]
  Other(String),
}

impl From<Infallible> for RxError {
  fn from(err: Infallible) -> Self { match err {} }
}

type UnhandledErrorHook = Box<dyn Fn(&dyn Debug) + Send + Sync>;

static UNHANDLED_ERROR_HOOK: Lazy<RwLock<Option<UnhandledErrorHook>>> =
  Lazy::new(|| RwLock::new(None));

/// Installs a process wide hook that receives every error which reaches a
/// subscriber without an error callback. Replaces the previous hook.
pub fn set_unhandled_error_hook<F>(hook: F)
where
  F: Fn(&dyn Debug) + Send + Sync + 'static,
{
  *UNHANDLED_ERROR_HOOK
    .write()
    .unwrap_or_else(PoisonError::into_inner) = Some(Box::new(hook));
}

/// Removes the hook installed by [`set_unhandled_error_hook`]; unhandled
/// errors are only logged afterwards.
pub fn reset_unhandled_error_hook() {
  UNHANDLED_ERROR_HOOK
    .write()
    .unwrap_or_else(PoisonError::into_inner)
    .take();
}

pub(crate) fn report_unhandled(err: &dyn Debug) {
  tracing::error!(error = ?err, "unhandled error in observable stream");
  let hook = UNHANDLED_ERROR_HOOK
    .read()
    .unwrap_or_else(PoisonError::into_inner);
  if let Some(hook) = hook.as_ref() {
    hook(err);
  }
}
