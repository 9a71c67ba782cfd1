//! Language Context
//!
//! Single owner of the active language. Consumers read `language()` and call
//! `translate()` on every render; language changes go through
//! `set_language()` / `switch_language()` and are announced on `subscribe()`.
//!
//! ```text
//! set_language(code) → validate → state update → PreferenceStore::save → LanguageEvent::Changed
//! switch_language(code, loader) → Loading → load bundles → (latest language?) → Ready + save
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockWriteGuard};

use crossbeam_channel::{Receiver, Sender};
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::constants::NAMESPACES;
use crate::domain::{CategoryMetadata, generate_category_display_name, generate_category_metadata};
use crate::error::{Error, Result};
use crate::i18n::{BundleLoader, Language, LocaleStore, Params, Resolver};
use crate::states::I18nConfig;
use crate::utils::PreferenceStore;

/// Lifecycle of the active language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Translations come from this language
    Ready(Language),
    /// `pending` bundles are loading; `current` is still what consumers see
    Loading { current: Language, pending: Language },
}

impl Phase {
    /// Language consumers should render with
    pub fn language(self) -> Language {
        match self {
            Phase::Ready(language) => language,
            Phase::Loading { current, .. } => current,
        }
    }

    pub fn is_loading(self) -> bool {
        matches!(self, Phase::Loading { .. })
    }
}

/// Notifications for subscribed consumers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageEvent {
    /// Active language changed; bound translations must be re-resolved
    Changed { from: Language, to: Language },
    /// Bundles for `language` started loading
    LoadStarted { language: Language },
    /// Bundles for `language` arrived; bound translations must be re-resolved
    BundlesLoaded { language: Language },
    /// Loading `language` failed; the previous language stays active
    LoadFailed { language: Language, message: String },
}

/// Result of an async language switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The requested language is now active
    Applied,
    /// A newer request arrived while loading; this one was discarded
    Superseded,
}

struct State {
    phase: Phase,
    store: Arc<LocaleStore>,
    /// Bumped by every accepted language request
    generation: u64,
    /// Language of the latest request
    requested: Language,
}

impl State {
    fn is_latest(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// An older request may still commit if it asked for the same language
    /// as the latest one
    fn accepts(&self, generation: u64, language: Language) -> bool {
        self.is_latest(generation) || self.requested == language
    }
}

struct Inner {
    state: RwLock<State>,
    preferences: Box<dyn PreferenceStore>,
    subscribers: Mutex<Vec<Sender<LanguageEvent>>>,
}

/// Session-wide language state, cheap to clone
#[derive(Clone)]
pub struct LanguageContext {
    inner: Arc<Inner>,
}

/// Best supported match for the OS locale
pub fn system_language() -> Option<Language> {
    let current = locale_config::Locale::current().to_string();
    current
        .split(',')
        .find_map(|tag| Language::from_locale_tag(tag.trim()))
}

impl LanguageContext {
    /// Create a context, restoring the stored preference if there is one
    pub fn new(store: LocaleStore, preferences: impl PreferenceStore + 'static) -> Self {
        Self::init(store, Box::new(preferences), None)
    }

    /// Create a context from configuration: bundles, preference file and
    /// optional OS locale detection
    pub fn from_config(config: &I18nConfig) -> Result<Self> {
        let store = config.locale_store()?;
        let detected = if config.detect_system_locale {
            system_language()
        } else {
            None
        };
        Ok(Self::init(store, Box::new(config.preference_store()), detected))
    }

    fn init(store: LocaleStore, preferences: Box<dyn PreferenceStore>, detected: Option<Language>) -> Self {
        let stored = preferences.load();
        let language = stored.or(detected).unwrap_or(Language::DEFAULT);
        info!(
            language = %language,
            restored = stored.is_some(),
            "Language context ready"
        );

        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(State {
                    phase: Phase::Ready(language),
                    store: Arc::new(store),
                    generation: 0,
                    requested: language,
                }),
                preferences,
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    // ==================== Getters ====================

    fn read_state<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Language consumers should render with
    pub fn language(&self) -> Language {
        self.read_state(|s| s.phase.language())
    }

    pub fn phase(&self) -> Phase {
        self.read_state(|s| s.phase)
    }

    /// Snapshot of the current locale store
    pub fn store(&self) -> Arc<LocaleStore> {
        self.read_state(|s| s.store.clone())
    }

    /// Translate a key in the active language. Never fails: unknown keys
    /// come back unchanged.
    pub fn translate(&self, namespace: &str, key: &str, params: Option<&Params>) -> String {
        let (language, store) = self.read_state(|s| (s.phase.language(), s.store.clone()));
        store.resolve(language, namespace, key, params)
    }

    /// Translate without parameters
    pub fn t(&self, namespace: &str, key: &str) -> String {
        self.translate(namespace, key, None)
    }

    /// Display name of a category in the active language
    pub fn category_display_name(&self, category_id: &str) -> String {
        let translate: &dyn Fn(&str, &str) -> String = &|ns, key| self.translate(ns, key, None);
        generate_category_display_name(category_id, self.language(), Some(translate))
    }

    /// Category metadata for the active language, sorted by display name
    pub fn category_metadata(&self, counts: &BTreeMap<String, usize>) -> Vec<CategoryMetadata> {
        let translate: &dyn Fn(&str, &str) -> String = &|ns, key| self.translate(ns, key, None);
        generate_category_metadata(counts, self.language(), Some(translate))
    }

    // ==================== Subscriptions ====================

    /// Receive language events; dropping the receiver unsubscribes
    pub fn subscribe(&self) -> Receiver<LanguageEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn notify(&self, event: LanguageEvent) {
        debug!(event = ?event, "Language event");
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    // ==================== Setters ====================

    fn parse_supported(code: &str) -> Result<Language> {
        code.parse().map_err(|e: Error| {
            warn!(code, "Rejecting unsupported language");
            e
        })
    }

    /// Register a request for `language`, returning its generation
    fn request(&self, language: Language) -> u64 {
        let mut state = self.write_state();
        state.generation += 1;
        state.requested = language;
        state.generation
    }

    /// Switch to `code` immediately and persist it.
    ///
    /// Unsupported codes leave the language untouched and write nothing.
    /// An async switch still in flight is superseded unless it is loading the
    /// same language, in which case its bundles are still merged when they
    /// arrive.
    pub fn set_language(&self, code: &str) -> Result<()> {
        let language = Self::parse_supported(code)?;
        let generation = self.request(language);
        self.commit(generation, language, Vec::new());
        Ok(())
    }

    /// Switch to `code`, first loading any of its bundles the store lacks.
    ///
    /// The previous language stays visible while loading. When several
    /// switches overlap, only the most recently requested one is applied, no
    /// matter which load finishes first.
    pub async fn switch_language<L: BundleLoader>(&self, code: &str, loader: &L) -> Result<LoadOutcome> {
        let language = Self::parse_supported(code)?;
        let generation = self.request(language);

        let store = self.store();
        let missing: Vec<&str> = NAMESPACES
            .into_iter()
            .filter(|ns| !store.has_bundle(language, ns))
            .collect();
        drop(store);

        if missing.is_empty() {
            return Ok(self.commit(generation, language, Vec::new()));
        }

        {
            let mut state = self.write_state();
            if !state.accepts(generation, language) {
                return Ok(LoadOutcome::Superseded);
            }
            if state.is_latest(generation) {
                state.phase = Phase::Loading {
                    current: state.phase.language(),
                    pending: language,
                };
            }
            // Sent under the lock so a newer commit cannot overtake it
            self.notify(LanguageEvent::LoadStarted { language });
        }
        let _loading = LoadingGuard {
            ctx: self,
            generation,
        };

        let loads = missing.iter().map(|namespace| async move {
            loader
                .load(language, namespace)
                .await
                .map(|bundle| (language, namespace.to_string(), bundle))
        });

        match try_join_all(loads).await {
            Ok(bundles) => Ok(self.commit(generation, language, bundles)),
            Err(e) => {
                warn!(error = %e, language = %language, "Failed to load language bundles");
                let mut state = self.write_state();
                if !state.accepts(generation, language) {
                    return Ok(LoadOutcome::Superseded);
                }
                if state.is_latest(generation) {
                    state.phase = Phase::Ready(state.phase.language());
                }
                self.notify(LanguageEvent::LoadFailed {
                    language,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Apply `language` if the request for `generation` is still accepted
    fn commit(
        &self,
        generation: u64,
        language: Language,
        bundles: Vec<(Language, String, serde_json::Value)>,
    ) -> LoadOutcome {
        let loaded = !bundles.is_empty();
        let previous = {
            let mut state = self.write_state();
            if !state.accepts(generation, language) {
                debug!(language = %language, generation, "Discarding superseded language load");
                return LoadOutcome::Superseded;
            }
            if loaded {
                state.store = Arc::new(state.store.with_bundles(bundles));
            }
            let previous = state.phase.language();
            state.phase = Phase::Ready(language);
            previous
        };

        self.inner.preferences.save(language);

        if loaded {
            self.notify(LanguageEvent::BundlesLoaded { language });
        }
        if previous != language {
            info!(from = %previous, to = %language, "Language changed");
            self.notify(LanguageEvent::Changed {
                from: previous,
                to: language,
            });
        }
        LoadOutcome::Applied
    }
}

/// Puts a `Loading` phase back to `Ready` when a switch is dropped before its
/// bundles arrive
struct LoadingGuard<'a> {
    ctx: &'a LanguageContext,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.ctx.write_state();
        if !state.is_latest(self.generation) {
            return;
        }
        if let Phase::Loading { current, pending } = state.phase {
            debug!(language = %pending, "Language load cancelled");
            state.phase = Phase::Ready(current);
            self.ctx.notify(LanguageEvent::LoadFailed {
                language: pending,
                message: "load cancelled".to_string(),
            });
        }
    }
}

impl std::fmt::Debug for LanguageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageContext")
            .field("phase", &self.phase())
            .field("bundles", &self.store().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NS_CATEGORIES, NS_COMMON, NS_HOMEPAGE};
    use crate::i18n::EmbeddedLoader;
    use crate::utils::MemoryPreferenceStore;
    use serde_json::{Value, json};
    use std::time::Duration;

    fn embedded() -> LocaleStore {
        LocaleStore::embedded().expect("embedded bundles")
    }

    /// Only the English bundles, so switching to zh has to load
    fn english_only() -> LocaleStore {
        let full = embedded();
        let mut builder = LocaleStore::builder();
        for ns in NAMESPACES {
            let bundle = full.get_bundle(Language::En, ns).expect("en bundle").clone();
            builder = builder.bundle(Language::En, ns, bundle);
        }
        builder.build()
    }

    /// Loader that waits before serving embedded bundles
    struct SlowLoader {
        delay: Duration,
    }

    impl BundleLoader for SlowLoader {
        async fn load(&self, language: Language, namespace: &str) -> Result<Value> {
            tokio::time::sleep(self.delay).await;
            EmbeddedLoader.load(language, namespace).await
        }
    }

    struct FailingLoader;

    impl BundleLoader for FailingLoader {
        async fn load(&self, language: Language, namespace: &str) -> Result<Value> {
            Err(Error::MissingNamespace {
                language: language.code().to_string(),
                namespace: namespace.to_string(),
            })
        }
    }

    #[test]
    fn starts_in_default_language_without_preference() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::new());
        assert_eq!(ctx.phase(), Phase::Ready(Language::En));
    }

    #[test]
    fn restores_stored_preference() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::with_value("zh"));
        assert_eq!(ctx.language(), Language::Zh);
    }

    #[test]
    fn ignores_invalid_stored_preference() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::with_value("fr"));
        assert_eq!(ctx.language(), Language::En);
    }

    #[test]
    fn detected_language_applies_only_without_preference() {
        let ctx = LanguageContext::init(embedded(), Box::new(MemoryPreferenceStore::new()), Some(Language::Zh));
        assert_eq!(ctx.language(), Language::Zh);

        let stored = MemoryPreferenceStore::with_value("en");
        let ctx = LanguageContext::init(embedded(), Box::new(stored), Some(Language::Zh));
        assert_eq!(ctx.language(), Language::En);
    }

    #[test]
    fn set_language_persists_across_reload() {
        let storage = MemoryPreferenceStore::new();
        let ctx = LanguageContext::new(embedded(), storage.clone());
        ctx.set_language("zh").expect("zh is supported");
        assert_eq!(ctx.language(), Language::Zh);
        assert_eq!(storage.raw().as_deref(), Some("zh"));

        let reloaded = LanguageContext::new(embedded(), storage);
        assert_eq!(reloaded.language(), Language::Zh);
    }

    #[test]
    fn unsupported_language_is_rejected_without_writing() {
        let storage = MemoryPreferenceStore::new();
        let ctx = LanguageContext::new(embedded(), storage.clone());
        let events = ctx.subscribe();

        let err = ctx.set_language("fr").expect_err("fr is unsupported");
        assert!(matches!(err, Error::UnsupportedLanguage { .. }));
        assert_eq!(ctx.language(), Language::En);
        assert_eq!(storage.writes(), 0);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn works_in_memory_when_storage_is_unavailable() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::unavailable());
        ctx.set_language("zh").expect("zh is supported");
        assert_eq!(ctx.language(), Language::Zh);
        assert_ne!(ctx.t(NS_COMMON, "navigation.title"), "navigation.title");
    }

    #[test]
    fn translate_follows_language_changes() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::new());
        let english = ctx.t(NS_COMMON, "navigation.subagents");
        ctx.set_language("zh").expect("zh");
        let chinese = ctx.t(NS_COMMON, "navigation.subagents");
        assert_ne!(english, chinese);
        assert_eq!(ctx.t(NS_COMMON, "no.such.key"), "no.such.key");
    }

    #[test]
    fn translate_interpolates_params() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::new());
        let params = Params::from([("count", 43)]);
        let text = ctx.translate(NS_COMMON, "stats.subagents", Some(&params));
        assert!(text.contains("43"), "{text}");
        assert!(!text.contains("{{count}}"), "{text}");
    }

    #[test]
    fn subscribers_hear_about_changes() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::new());
        let events = ctx.subscribe();

        ctx.set_language("zh").expect("zh");
        ctx.set_language("zh").expect("zh again");

        assert_eq!(
            events.try_recv().ok(),
            Some(LanguageEvent::Changed {
                from: Language::En,
                to: Language::Zh
            })
        );
        assert!(events.try_recv().is_err(), "no event when the language is unchanged");
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::new());
        drop(ctx.subscribe());
        ctx.set_language("zh").expect("zh");
        assert!(ctx.inner.subscribers.lock().expect("lock").is_empty());
    }

    #[test]
    fn category_names_follow_language() {
        let ctx = LanguageContext::new(embedded(), MemoryPreferenceStore::new());
        assert_eq!(
            ctx.category_display_name("development-architecture"),
            "Development & Architecture"
        );
        ctx.set_language("zh").expect("zh");
        assert_ne!(
            ctx.category_display_name("development-architecture"),
            "Development & Architecture"
        );

        let counts = BTreeMap::from([("ai-tools".to_string(), 2), ("data-ai".to_string(), 5)]);
        let metadata = ctx.category_metadata(&counts);
        assert_eq!(metadata.len(), 2);
        assert!(metadata.iter().any(|m| m.id == "ai-tools" && m.display_name == "AI & Tools"));
    }

    #[tokio::test]
    async fn switch_loads_missing_bundles() {
        let storage = MemoryPreferenceStore::new();
        let ctx = LanguageContext::new(english_only(), storage.clone());
        let events = ctx.subscribe();

        let outcome = ctx.switch_language("zh", &EmbeddedLoader).await.expect("switch");
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(ctx.phase(), Phase::Ready(Language::Zh));
        assert!(ctx.store().has_all(Language::Zh, &NAMESPACES));
        assert_eq!(storage.raw().as_deref(), Some("zh"));

        assert_eq!(events.try_recv().ok(), Some(LanguageEvent::LoadStarted { language: Language::Zh }));
        assert_eq!(events.try_recv().ok(), Some(LanguageEvent::BundlesLoaded { language: Language::Zh }));
        assert_eq!(
            events.try_recv().ok(),
            Some(LanguageEvent::Changed {
                from: Language::En,
                to: Language::Zh
            })
        );
    }

    #[tokio::test]
    async fn old_language_stays_visible_while_loading() {
        let ctx = LanguageContext::new(english_only(), MemoryPreferenceStore::new());
        let english = ctx.t(NS_HOMEPAGE, "hero.subtitle");

        let loader = SlowLoader {
            delay: Duration::from_millis(50),
        };
        let switching = ctx.switch_language("zh", &loader);
        let observe = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            (ctx.phase(), ctx.t(NS_HOMEPAGE, "hero.subtitle"))
        };
        let (outcome, (phase, during)) = tokio::join!(switching, observe);

        assert_eq!(
            phase,
            Phase::Loading {
                current: Language::En,
                pending: Language::Zh
            }
        );
        assert_eq!(during, english);
        assert_eq!(outcome.expect("switch"), LoadOutcome::Applied);
        assert_ne!(ctx.t(NS_HOMEPAGE, "hero.subtitle"), english);
    }

    #[tokio::test]
    async fn latest_request_wins_when_earlier_load_finishes_last() {
        let storage = MemoryPreferenceStore::new();
        let ctx = LanguageContext::new(english_only(), storage.clone());
        let slow = SlowLoader {
            delay: Duration::from_millis(50),
        };

        let (first, second) = tokio::join!(
            ctx.switch_language("zh", &slow),
            ctx.switch_language("en", &EmbeddedLoader)
        );

        assert_eq!(first.expect("zh request"), LoadOutcome::Superseded);
        assert_eq!(second.expect("en request"), LoadOutcome::Applied);
        assert_eq!(ctx.phase(), Phase::Ready(Language::En));
        assert!(!ctx.store().has_bundle(Language::Zh, NS_CATEGORIES));
        assert_eq!(storage.raw().as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn earlier_load_of_latest_language_still_applies() {
        let ctx = LanguageContext::new(english_only(), MemoryPreferenceStore::new());
        let slow = SlowLoader {
            delay: Duration::from_millis(60),
        };
        let fast = SlowLoader {
            delay: Duration::from_millis(5),
        };

        let first = ctx.switch_language("zh", &slow);
        let second = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            ctx.set_language("en")?;
            ctx.switch_language("zh", &fast).await
        };
        let (first, second) = tokio::join!(first, second);

        // The en request in between is gone, but zh is what was asked for last
        assert_eq!(first.expect("first"), LoadOutcome::Applied);
        assert_eq!(second.expect("second"), LoadOutcome::Applied);
        assert_eq!(ctx.phase(), Phase::Ready(Language::Zh));
    }

    #[tokio::test]
    async fn sync_set_to_loading_language_keeps_its_bundles() {
        let storage = MemoryPreferenceStore::new();
        let ctx = LanguageContext::new(english_only(), storage.clone());
        let english = ctx.t(NS_HOMEPAGE, "hero.subtitle");
        let events = ctx.subscribe();
        let slow = SlowLoader {
            delay: Duration::from_millis(40),
        };

        let switching = ctx.switch_language("zh", &slow);
        let setting = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            ctx.set_language("zh")
        };
        let (outcome, set) = tokio::join!(switching, setting);

        set.expect("zh");
        assert_eq!(outcome.expect("switch"), LoadOutcome::Applied);
        assert_eq!(ctx.phase(), Phase::Ready(Language::Zh));
        assert!(ctx.store().has_all(Language::Zh, &NAMESPACES));
        assert_ne!(ctx.t(NS_HOMEPAGE, "hero.subtitle"), english);
        assert_eq!(storage.raw().as_deref(), Some("zh"));

        assert_eq!(events.try_recv().ok(), Some(LanguageEvent::LoadStarted { language: Language::Zh }));
        assert_eq!(
            events.try_recv().ok(),
            Some(LanguageEvent::Changed {
                from: Language::En,
                to: Language::Zh
            })
        );
        assert_eq!(events.try_recv().ok(), Some(LanguageEvent::BundlesLoaded { language: Language::Zh }));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn cancelled_switch_returns_to_ready() {
        let storage = MemoryPreferenceStore::new();
        let ctx = LanguageContext::new(english_only(), storage.clone());
        let events = ctx.subscribe();
        let slow = SlowLoader {
            delay: Duration::from_millis(50),
        };

        let timed_out = tokio::time::timeout(Duration::from_millis(5), ctx.switch_language("zh", &slow)).await;

        assert!(timed_out.is_err());
        assert_eq!(ctx.phase(), Phase::Ready(Language::En));
        assert!(!ctx.store().has_bundle(Language::Zh, NS_COMMON));
        assert_eq!(storage.writes(), 0);

        assert_eq!(events.try_recv().ok(), Some(LanguageEvent::LoadStarted { language: Language::Zh }));
        assert!(matches!(
            events.try_recv().ok(),
            Some(LanguageEvent::LoadFailed { language: Language::Zh, .. })
        ));
    }

    #[tokio::test]
    async fn cancelled_stale_switch_leaves_newer_state_alone() {
        let ctx = LanguageContext::new(english_only(), MemoryPreferenceStore::new());
        let slow = SlowLoader {
            delay: Duration::from_millis(50),
        };

        let switching = tokio::time::timeout(Duration::from_millis(20), ctx.switch_language("zh", &slow));
        let setting = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            ctx.set_language("en")
        };
        let (timed_out, set) = tokio::join!(switching, setting);

        set.expect("en");
        assert!(timed_out.is_err());
        assert_eq!(ctx.phase(), Phase::Ready(Language::En));
    }

    #[tokio::test]
    async fn sync_set_supersedes_in_flight_switch() {
        let ctx = LanguageContext::new(english_only(), MemoryPreferenceStore::new());
        let slow = SlowLoader {
            delay: Duration::from_millis(40),
        };

        let switching = ctx.switch_language("zh", &slow);
        let setting = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            ctx.set_language("en")
        };
        let (outcome, set) = tokio::join!(switching, setting);

        set.expect("en");
        assert_eq!(outcome.expect("switch"), LoadOutcome::Superseded);
        assert_eq!(ctx.phase(), Phase::Ready(Language::En));
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_language() {
        let storage = MemoryPreferenceStore::new();
        let ctx = LanguageContext::new(english_only(), storage.clone());
        let events = ctx.subscribe();

        let err = ctx.switch_language("zh", &FailingLoader).await.expect_err("load fails");
        assert!(matches!(err, Error::MissingNamespace { .. }));
        assert_eq!(ctx.phase(), Phase::Ready(Language::En));
        assert_eq!(storage.writes(), 0);

        assert_eq!(events.try_recv().ok(), Some(LanguageEvent::LoadStarted { language: Language::Zh }));
        assert!(matches!(
            events.try_recv().ok(),
            Some(LanguageEvent::LoadFailed { language: Language::Zh, .. })
        ));
    }

    #[tokio::test]
    async fn switch_rejects_unsupported_language() {
        let ctx = LanguageContext::new(english_only(), MemoryPreferenceStore::new());
        let err = ctx
            .switch_language("fr", &EmbeddedLoader)
            .await
            .expect_err("fr is unsupported");
        assert!(matches!(err, Error::UnsupportedLanguage { .. }));
        assert_eq!(ctx.phase(), Phase::Ready(Language::En));
    }

    #[test]
    fn custom_store_resolution_goes_through_context() {
        let store = LocaleStore::builder()
            .bundle(Language::En, NS_COMMON, json!({"greeting": "Hello {{name}}"}))
            .build();
        let ctx = LanguageContext::new(store, MemoryPreferenceStore::with_value("zh"));
        let params = Params::from([("name", "Ada")]);
        assert_eq!(ctx.translate(NS_COMMON, "greeting", Some(&params)), "Hello Ada");
        assert_eq!(ctx.translate(NS_COMMON, "greeting", Some(&Params::new())), "Hello {{name}}");
    }
}
