//! Environment variables and the wall clock.

use chrono::{DateTime, Utc};
use std::env;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    pub(crate) fn now_impl(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
