//! Model registry - CRUD, validation and default resolution for model profiles

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ConfigService;
use crate::domain::profile::{
    LEGACY_MODEL_NAME, LEGACY_PROFILE_ID, MAX_MAX_TOKENS, MAX_TEMPERATURE, MIN_MAX_TOKENS,
    MIN_TEMPERATURE,
};
use crate::domain::storage::{
    LEGACY_API_KEY, LEGACY_MAX_TOKENS_KEY, LEGACY_MODEL_KEY, LEGACY_TEMPERATURE_KEY, MODELS_KEY,
};
use crate::domain::{
    preset_profiles, validate_profile, CredentialValidator, DomainError,
    HeuristicCredentialValidator, KeyValueStore, KeyValueStoreExt, ModelProfile, ProfileDraft,
    ProfileValidationError,
};

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    /// Number of profiles written
    pub imported: usize,
    /// One `"<id>: <reason>"` line per rejected profile
    pub errors: Vec<String>,
}

/// Owns the persisted list of model profiles
///
/// Every mutation rewrites the whole list in a single store write. Two
/// concurrent mutations race and the last write wins; callers that need
/// ordering must serialize their calls.
#[derive(Clone)]
pub struct ModelRegistry {
    store: Arc<dyn KeyValueStore>,
    config: ConfigService,
    credentials: Arc<dyn CredentialValidator>,
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ModelRegistry {
    /// Registry using the heuristic credential check
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_credential_validator(store, Arc::new(HeuristicCredentialValidator))
    }

    pub fn with_credential_validator(
        store: Arc<dyn KeyValueStore>,
        credentials: Arc<dyn CredentialValidator>,
    ) -> Self {
        Self {
            config: ConfigService::new(store.clone()),
            store,
            credentials,
        }
    }

    /// The configuration service sharing this registry's store
    pub fn config(&self) -> &ConfigService {
        &self.config
    }

    /// All profiles in insertion order
    pub async fn list_all(&self) -> Result<Vec<ModelProfile>, DomainError> {
        let profiles: Option<Vec<ModelProfile>> = self.store.get_json(MODELS_KEY).await?;
        Ok(profiles.unwrap_or_default())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<ModelProfile>, DomainError> {
        let profiles = self.list_all().await?;
        Ok(profiles.into_iter().find(|p| p.id() == id))
    }

    /// Profiles that are enabled and carry a credential, order preserved
    pub async fn list_enabled(&self) -> Result<Vec<ModelProfile>, DomainError> {
        let profiles = self.list_all().await?;
        Ok(profiles.into_iter().filter(ModelProfile::is_eligible).collect())
    }

    /// Field-level validation; an empty list means the draft is valid
    pub fn validate(&self, draft: &ProfileDraft) -> Vec<ProfileValidationError> {
        validate_profile(draft, self.credentials.as_ref())
    }

    /// Validate and insert or replace a profile
    pub async fn save(&self, profile: ModelProfile) -> Result<(), DomainError> {
        self.ensure_valid(&ProfileDraft::from(&profile))?;

        let mut profiles = self.list_all().await?;
        match profiles.iter_mut().find(|p| p.id() == profile.id()) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }

        self.write(&profiles).await?;
        info!(profile_id = profile.id(), "Saved model profile");
        Ok(())
    }

    /// Validate a draft, then save the profile it describes
    pub async fn save_draft(&self, draft: ProfileDraft) -> Result<ModelProfile, DomainError> {
        self.ensure_valid(&draft)?;
        let profile = draft.into_profile();
        self.save(profile.clone()).await?;
        Ok(profile)
    }

    /// Remove a profile; unknown ids are ignored
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut profiles = self.list_all().await?;
        let before = profiles.len();
        profiles.retain(|p| p.id() != id);

        if profiles.len() == before {
            debug!(profile_id = id, "Delete of unknown profile ignored");
            return Ok(());
        }

        self.write(&profiles).await?;
        info!(profile_id = id, "Deleted model profile");
        Ok(())
    }

    /// Whether a profile other than `exclude_id` already uses `id`
    pub async fn id_exists(&self, id: &str, exclude_id: Option<&str>) -> Result<bool, DomainError> {
        let profiles = self.list_all().await?;
        Ok(profiles
            .iter()
            .any(|p| p.id() == id && Some(p.id()) != exclude_id))
    }

    /// The profile explanations should use when none is named explicitly
    pub async fn resolve_default_id(&self) -> Result<Option<String>, DomainError> {
        let config = self.config.get().await?;
        let enabled = self.list_enabled().await?;

        if let Some(selected) = config.selected_model_id() {
            if enabled.iter().any(|p| p.id() == selected) {
                return Ok(Some(selected.to_string()));
            }
        }

        Ok(enabled.first().map(|p| p.id().to_string()))
    }

    /// Record `id` as the explicitly selected profile
    pub async fn set_default(&self, id: &str) -> Result<(), DomainError> {
        let profile = self.get_by_id(id).await?.ok_or_else(|| {
            DomainError::profile_not_found(format!("Profile '{}' does not exist", id))
        })?;

        if !profile.is_eligible() {
            return Err(DomainError::profile_not_configured(format!(
                "{} is not enabled or has no credential configured",
                profile.display_name()
            )));
        }

        let mut config = self.config.get().await?;
        config.set_selected_model_id(id);
        self.config.save(&config).await?;

        info!(profile_id = id, "Default model profile changed");
        Ok(())
    }

    /// Seed the preset profiles into an empty registry. Returns true when seeded.
    pub async fn initialize_defaults(&self) -> Result<bool, DomainError> {
        if !self.list_all().await?.is_empty() {
            return Ok(false);
        }

        let presets = preset_profiles();
        self.write(&presets).await?;
        info!(count = presets.len(), "Seeded preset model profiles");
        Ok(true)
    }

    /// Move top-level settings left by a single-model install onto the profiles,
    /// then remove them. Returns true when any legacy key was found.
    ///
    /// The legacy credential goes to the relay preset, which is enabled and selected,
    /// unless that preset already has a credential of its own. Out-of-range legacy
    /// values are dropped.
    pub async fn migrate_legacy_settings(&self) -> Result<bool, DomainError> {
        let keys = [
            LEGACY_API_KEY,
            LEGACY_MODEL_KEY,
            LEGACY_MAX_TOKENS_KEY,
            LEGACY_TEMPERATURE_KEY,
        ];
        let legacy = self.store.get(&keys).await?;
        if legacy.is_empty() {
            return Ok(false);
        }

        let credential = legacy
            .get(LEGACY_API_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|key| !key.is_empty());
        let model = legacy
            .get(LEGACY_MODEL_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|model| !model.is_empty());
        let max_tokens = legacy
            .get(LEGACY_MAX_TOKENS_KEY)
            .and_then(Value::as_f64)
            .filter(|n| n.fract() == 0.0 && (MIN_MAX_TOKENS..=MAX_MAX_TOKENS).contains(n))
            .map(|n| n as u32);
        let temperature = legacy
            .get(LEGACY_TEMPERATURE_KEY)
            .and_then(Value::as_f64)
            .filter(|t| (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(t));

        let mut profiles = self.list_all().await?;
        let mut changed = false;
        let mut selected = None;

        if let Some(credential) = credential {
            let target = profiles
                .iter_mut()
                .find(|p| p.id() == LEGACY_PROFILE_ID && !p.is_configured());
            if let Some(target) = target {
                target.set_credential(credential);
                target.set_enabled(true);
                selected = Some(target.id().to_string());
                changed = true;
            }
        }

        for profile in &mut profiles {
            if let Some(model) = model {
                if profile.default_model_name() == LEGACY_MODEL_NAME {
                    profile.set_default_model_name(model);
                    changed = true;
                }
            }
            if let Some(max_tokens) = max_tokens {
                profile.set_max_tokens(max_tokens);
                changed = true;
            }
            if let Some(temperature) = temperature {
                profile.set_temperature(temperature);
                changed = true;
            }
        }

        if changed {
            self.write(&profiles).await?;
        }

        if let Some(id) = selected.as_deref() {
            let mut config = self.config.get().await?;
            config.set_selected_model_id(id);
            self.config.save(&config).await?;
        }

        let found: Vec<&str> = legacy.keys().map(String::as_str).collect();
        self.store.remove(&found).await?;

        info!(
            keys = ?found,
            selected = selected.as_deref().unwrap_or(""),
            "Migrated legacy settings"
        );
        Ok(true)
    }

    /// Import profiles one by one; a bad entry never aborts the batch
    pub async fn import_profiles(
        &self,
        drafts: Vec<ProfileDraft>,
    ) -> Result<ImportReport, DomainError> {
        let mut report = ImportReport::default();

        for draft in drafts {
            let label = draft.label().to_string();

            let errors = self.validate(&draft);
            if !errors.is_empty() {
                report.errors.push(format!("{}: {}", label, join_messages(&errors)));
                continue;
            }

            if self.id_exists(&label, None).await? {
                report.errors.push(format!("{}: ID already exists", label));
                continue;
            }

            match self.save(draft.into_profile()).await {
                Ok(()) => report.imported += 1,
                Err(e @ DomainError::Storage { .. }) => return Err(e),
                Err(e) => report.errors.push(format!("{}: {}", label, e.message())),
            }
        }

        if !report.errors.is_empty() {
            warn!(
                imported = report.imported,
                rejected = report.errors.len(),
                "Some profiles were not imported"
            );
        }
        Ok(report)
    }

    /// Every profile, with credentials blanked unless asked for
    pub async fn export_profiles(
        &self,
        include_credentials: bool,
    ) -> Result<Vec<ModelProfile>, DomainError> {
        let profiles = self.list_all().await?;

        if include_credentials {
            Ok(profiles)
        } else {
            Ok(profiles.iter().map(ModelProfile::without_credential).collect())
        }
    }

    fn ensure_valid(&self, draft: &ProfileDraft) -> Result<(), DomainError> {
        let errors = self.validate(draft);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(
                errors.iter().map(ToString::to_string).collect(),
            ))
        }
    }

    async fn write(&self, profiles: &[ModelProfile]) -> Result<(), DomainError> {
        self.store.set_json(MODELS_KEY, &profiles).await
    }
}

fn join_messages(errors: &[ProfileValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::MockCredentialValidator;
    use crate::domain::storage::mock::MockKeyValueStore;
    use crate::domain::storage::CONFIG_KEY;
    use serde_json::json;

    fn create_registry() -> (ModelRegistry, Arc<MockKeyValueStore>) {
        let store = Arc::new(MockKeyValueStore::new());
        (ModelRegistry::new(store.clone()), store)
    }

    fn profile(id: &str) -> ModelProfile {
        ModelProfile::new(id, format!("Model {}", id), "https://example.test/v1", "m1")
            .with_credential("sk-abcdefghij")
            .with_enabled(true)
    }

    fn draft(id: &str) -> ProfileDraft {
        ProfileDraft::from(&profile(id))
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let (registry, _) = create_registry();

        assert!(registry.list_all().await.unwrap().is_empty());
        assert!(registry.list_enabled().await.unwrap().is_empty());
        assert!(registry.get_by_id("anything").await.unwrap().is_none());
        assert_eq!(registry.resolve_default_id().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let (registry, store) = create_registry();

        registry.save(profile("a")).await.unwrap();

        let loaded = registry.get_by_id("a").await.unwrap().unwrap();
        assert_eq!(loaded, profile("a"));
        assert_eq!(store.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_resave_replaces_in_place() {
        let (registry, store) = create_registry();

        registry.save(profile("a")).await.unwrap();
        registry.save(profile("b")).await.unwrap();
        registry
            .save(profile("a").with_temperature(1.5))
            .await
            .unwrap();

        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), "a");
        assert_eq!(all[0].temperature(), Some(1.5));
        assert_eq!(all[1].id(), "b");
        assert_eq!(store.writes().len(), 3);
    }

    #[tokio::test]
    async fn test_save_invalid_profile_is_rejected_without_write() {
        let (registry, store) = create_registry();
        let invalid = ModelProfile::new("bad id", "", "not-a-url", "m1");

        let err = registry.save(invalid).await.unwrap_err();
        match err {
            DomainError::Validation { messages } => assert_eq!(messages.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn test_save_draft_builds_profile() {
        let (registry, _) = create_registry();
        let draft = ProfileDraft {
            temperature: None,
            max_tokens: Some(64.0),
            ..draft("drafted")
        };

        let saved = registry.save_draft(draft).await.unwrap();
        assert_eq!(saved.max_tokens(), Some(64));
        assert_eq!(registry.get_by_id("drafted").await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_save_draft_reports_missing_fields() {
        let (registry, _) = create_registry();

        let err = registry.save_draft(ProfileDraft::default()).await.unwrap_err();
        assert_eq!(err.kind(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_delete() {
        let (registry, store) = create_registry();
        registry.save(profile("a")).await.unwrap();
        registry.save(profile("b")).await.unwrap();

        registry.delete("a").await.unwrap();

        let ids: Vec<String> = registry
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["b"]);
        assert_eq!(store.writes().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_noop() {
        let (registry, store) = create_registry();
        registry.save(profile("a")).await.unwrap();

        registry.delete("nonexistent").await.unwrap();

        assert_eq!(registry.list_all().await.unwrap().len(), 1);
        assert_eq!(store.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_list_enabled_filters_and_keeps_order() {
        let (registry, _) = create_registry();
        registry.save(profile("a")).await.unwrap();
        registry
            .save(profile("b").with_enabled(false))
            .await
            .unwrap();
        registry
            .save(profile("c").with_credential(""))
            .await
            .unwrap();
        registry.save(profile("d")).await.unwrap();

        let ids: Vec<String> = registry
            .list_enabled()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[tokio::test]
    async fn test_resolve_default_id() {
        let (registry, _) = create_registry();
        registry
            .save(profile("disabled").with_enabled(false))
            .await
            .unwrap();
        registry.save(profile("first")).await.unwrap();
        registry.save(profile("second")).await.unwrap();

        assert_eq!(
            registry.resolve_default_id().await.unwrap().as_deref(),
            Some("first")
        );

        registry.set_default("second").await.unwrap();
        assert_eq!(
            registry.resolve_default_id().await.unwrap().as_deref(),
            Some("second")
        );

        registry.delete("second").await.unwrap();
        assert_eq!(
            registry.resolve_default_id().await.unwrap().as_deref(),
            Some("first")
        );
    }

    #[tokio::test]
    async fn test_stale_selection_falls_back() {
        let store = Arc::new(
            MockKeyValueStore::new()
                .with_value(CONFIG_KEY, json!({ "selectedModelId": "gone" })),
        );
        let registry = ModelRegistry::new(store);
        registry.save(profile("a")).await.unwrap();

        assert_eq!(registry.resolve_default_id().await.unwrap().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_null_selection_falls_back() {
        let store = Arc::new(MockKeyValueStore::new().with_value(
            CONFIG_KEY,
            json!({ "selectedModelId": null, "theme": "dark" }),
        ));
        let registry = ModelRegistry::new(store.clone());
        registry.save(profile("a")).await.unwrap();

        assert_eq!(registry.resolve_default_id().await.unwrap().as_deref(), Some("a"));

        registry.set_default("a").await.unwrap();
        let config = store.value(CONFIG_KEY).unwrap();
        assert_eq!(config["selectedModelId"], "a");
        assert_eq!(config["theme"], "dark");
    }

    #[tokio::test]
    async fn test_set_default_errors() {
        let (registry, store) = create_registry();
        registry
            .save(profile("off").with_enabled(false))
            .await
            .unwrap();
        registry
            .save(profile("nokey").with_credential(""))
            .await
            .unwrap();

        let err = registry.set_default("nonexistent").await.unwrap_err();
        assert!(matches!(err, DomainError::ProfileNotFound { .. }));

        let err = registry.set_default("off").await.unwrap_err();
        assert!(matches!(err, DomainError::ProfileNotConfigured { .. }));

        let err = registry.set_default("nokey").await.unwrap_err();
        assert!(matches!(err, DomainError::ProfileNotConfigured { .. }));

        assert!(store.value(CONFIG_KEY).is_none());
    }

    #[tokio::test]
    async fn test_set_default_preserves_other_settings() {
        let store = Arc::new(
            MockKeyValueStore::new().with_value(CONFIG_KEY, json!({ "theme": "dark" })),
        );
        let registry = ModelRegistry::new(store.clone());
        registry.save(profile("a")).await.unwrap();

        registry.set_default("a").await.unwrap();

        let config = store.value(CONFIG_KEY).unwrap();
        assert_eq!(config["selectedModelId"], "a");
        assert_eq!(config["theme"], "dark");
    }

    #[tokio::test]
    async fn test_initialize_defaults_is_idempotent() {
        let (registry, store) = create_registry();

        assert!(registry.initialize_defaults().await.unwrap());
        assert!(!registry.initialize_defaults().await.unwrap());

        let all = registry.list_all().await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id(), "openai-gpt35");
        assert_eq!(store.writes().len(), 1);

        // Presets have no credential, so nothing is eligible yet
        assert!(registry.list_enabled().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_defaults_keeps_existing_profiles() {
        let (registry, _) = create_registry();
        registry.save(profile("mine")).await.unwrap();

        assert!(!registry.initialize_defaults().await.unwrap());
        assert_eq!(registry.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_id_exists() {
        let (registry, _) = create_registry();
        registry.save(profile("a")).await.unwrap();

        assert!(registry.id_exists("a", None).await.unwrap());
        assert!(!registry.id_exists("a", Some("a")).await.unwrap());
        assert!(!registry.id_exists("b", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_import_profiles_collects_errors() {
        let (registry, _) = create_registry();
        registry.save(profile("existing")).await.unwrap();

        let report = registry
            .import_profiles(vec![
                draft("new-one"),
                draft("existing"),
                ProfileDraft {
                    api_url: Some("nope".to_string()),
                    ..draft("broken")
                },
                draft("new-two"),
            ])
            .await
            .unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0], "existing: ID already exists");
        assert!(report.errors[1].starts_with("broken: Invalid API URL"));
        assert_eq!(registry.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_export_blanks_credentials() {
        let (registry, _) = create_registry();
        registry.save(profile("a")).await.unwrap();

        let exported = registry.export_profiles(false).await.unwrap();
        assert_eq!(exported[0].credential(), "");
        assert!(exported[0].is_enabled());

        let full = registry.export_profiles(true).await.unwrap();
        assert_eq!(full[0].credential(), "sk-abcdefghij");
    }

    #[tokio::test]
    async fn test_legacy_credential_moves_to_relay_preset() {
        let store = Arc::new(
            MockKeyValueStore::new()
                .with_value(LEGACY_API_KEY, json!("sk-legacy123456"))
                .with_value(CONFIG_KEY, json!({ "theme": "dark" })),
        );
        let registry = ModelRegistry::new(store.clone());
        registry.initialize_defaults().await.unwrap();

        assert!(registry.migrate_legacy_settings().await.unwrap());

        let relay = registry.get_by_id(LEGACY_PROFILE_ID).await.unwrap().unwrap();
        assert_eq!(relay.credential(), "sk-legacy123456");
        assert!(relay.is_eligible());
        assert_eq!(
            registry.resolve_default_id().await.unwrap().as_deref(),
            Some(LEGACY_PROFILE_ID)
        );
        assert_eq!(store.value(CONFIG_KEY).unwrap()["theme"], "dark");
        assert!(store.value(LEGACY_API_KEY).is_none());
    }

    #[tokio::test]
    async fn test_legacy_credential_does_not_overwrite() {
        let store = Arc::new(
            MockKeyValueStore::new().with_value(LEGACY_API_KEY, json!("sk-legacy123456")),
        );
        let registry = ModelRegistry::new(store.clone());
        registry
            .save(
                ModelProfile::new(LEGACY_PROFILE_ID, "Relay", "https://example.test/v1", "m1")
                    .with_credential("sk-current12345"),
            )
            .await
            .unwrap();
        let writes = store.writes().len();

        assert!(registry.migrate_legacy_settings().await.unwrap());

        let relay = registry.get_by_id(LEGACY_PROFILE_ID).await.unwrap().unwrap();
        assert_eq!(relay.credential(), "sk-current12345");
        assert!(!relay.is_enabled());
        assert_eq!(store.writes().len(), writes);
        assert!(store.value(LEGACY_API_KEY).is_none());
    }

    #[tokio::test]
    async fn test_legacy_generation_settings_apply_to_profiles() {
        let store = Arc::new(
            MockKeyValueStore::new()
                .with_value(LEGACY_MODEL_KEY, json!("gpt-3.5-turbo-16k"))
                .with_value(LEGACY_MAX_TOKENS_KEY, json!(500))
                .with_value(LEGACY_TEMPERATURE_KEY, json!(0.2)),
        );
        let registry = ModelRegistry::new(store.clone());
        registry.initialize_defaults().await.unwrap();

        assert!(registry.migrate_legacy_settings().await.unwrap());

        let gpt35 = registry.get_by_id("openai-gpt35").await.unwrap().unwrap();
        assert_eq!(gpt35.default_model_name(), "gpt-3.5-turbo-16k");
        assert_eq!(gpt35.max_tokens(), Some(500));
        assert_eq!(gpt35.temperature(), Some(0.2));

        // Only profiles on the old model name are renamed
        let gpt4 = registry.get_by_id("openai-gpt4").await.unwrap().unwrap();
        assert_eq!(gpt4.default_model_name(), "gpt-4");
        assert_eq!(gpt4.max_tokens(), Some(500));

        for key in [LEGACY_MODEL_KEY, LEGACY_MAX_TOKENS_KEY, LEGACY_TEMPERATURE_KEY] {
            assert!(store.value(key).is_none());
        }
        assert!(store.value(CONFIG_KEY).is_none());
    }

    #[tokio::test]
    async fn test_legacy_out_of_range_values_are_dropped() {
        let store = Arc::new(
            MockKeyValueStore::new()
                .with_value(LEGACY_MAX_TOKENS_KEY, json!(0))
                .with_value(LEGACY_TEMPERATURE_KEY, json!(5.0)),
        );
        let registry = ModelRegistry::new(store.clone());
        registry.save(profile("a")).await.unwrap();

        assert!(registry.migrate_legacy_settings().await.unwrap());

        let a = registry.get_by_id("a").await.unwrap().unwrap();
        assert_eq!(a, profile("a"));
        assert!(store.value(LEGACY_TEMPERATURE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_no_legacy_settings() {
        let (registry, store) = create_registry();
        registry.initialize_defaults().await.unwrap();
        let writes = store.writes().len();

        assert!(!registry.migrate_legacy_settings().await.unwrap());
        assert_eq!(store.writes().len(), writes);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let registry = ModelRegistry::new(Arc::new(
            MockKeyValueStore::new().with_write_error("quota exceeded"),
        ));

        let err = registry.save(profile("a")).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));

        let err = registry.initialize_defaults().await.unwrap_err();
        assert!(matches!(err, DomainError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_custom_credential_validator() {
        let mut validator = MockCredentialValidator::new();
        validator.expect_is_valid().returning(|_| false);

        let registry = ModelRegistry::with_credential_validator(
            Arc::new(MockKeyValueStore::new()),
            Arc::new(validator),
        );

        let errors = registry.validate(&draft("a"));
        assert_eq!(errors, vec![ProfileValidationError::InvalidCredential]);
    }
}
