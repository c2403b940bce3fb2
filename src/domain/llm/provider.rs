use async_trait::async_trait;

use crate::domain::profile::ModelProfile;
use crate::domain::DomainError;

/// Issues explanation requests against a profile's backend
#[async_trait]
pub trait CompletionClient: Send + Sync + std::fmt::Debug {
    /// Explain `term` using `profile`; `None` means the caller could not resolve a profile
    async fn explain(
        &self,
        profile: Option<&ModelProfile>,
        term: &str,
    ) -> Result<String, DomainError>;

    /// Connectivity check: any failure is reported as `false`
    async fn test_connection(&self, profile: &ModelProfile) -> bool {
        self.explain(Some(profile), "test").await.is_ok()
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records requested terms and answers with a canned result
    #[derive(Debug)]
    pub struct MockCompletionClient {
        result: Result<String, DomainError>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockCompletionClient {
        pub fn with_text(text: impl Into<String>) -> Self {
            Self {
                result: Ok(text.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_error(error: DomainError) -> Self {
            Self {
                result: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// (profile id, term) pairs seen so far
        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for MockCompletionClient {
        async fn explain(
            &self,
            profile: Option<&ModelProfile>,
            term: &str,
        ) -> Result<String, DomainError> {
            let profile = profile.ok_or_else(|| DomainError::model_not_found("no profile"))?;
            self.calls
                .lock()
                .unwrap()
                .push((profile.id().to_string(), term.to_string()));
            self.result.clone()
        }
    }
}
