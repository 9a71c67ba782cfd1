//! Category - Display Names, Icons and Metadata
//!
//! Category ids come from document frontmatter (`development-architecture`).
//! Non-default languages look the name up in the `categories` namespace;
//! otherwise the id is humanized.

use std::collections::BTreeMap;

use crate::constants::NS_CATEGORIES;
use crate::i18n::Language;

/// Translator callback: `(namespace, key) -> text`, returning the key itself
/// when no translation exists
pub type Translate<'a> = &'a dyn Fn(&str, &str) -> String;

/// Words with a fixed spelling in humanized names
const SPECIAL_CASES: &[(&str, &str)] = &[
    ("ai", "AI"),
    ("api", "API"),
    ("ui", "UI"),
    ("ux", "UX"),
    ("defi", "DeFi"),
    ("ml", "ML"),
    ("ci", "CI"),
    ("cd", "CD"),
];

const DEFAULT_ICON: &str = "📦";

const CATEGORY_ICONS: &[(&str, &str)] = &[
    // Subagent categories
    ("development-architecture", "🏗️"),
    ("language-specialists", "💻"),
    ("infrastructure-operations", "🚀"),
    ("quality-security", "🛡️"),
    ("data-ai", "📊"),
    ("specialized-domains", "🎯"),
    ("crypto-trading", "💰"),
    ("business-finance", "💼"),
    ("design-experience", "🎨"),
    ("blockchain-web3", "🔗"),
    ("sales-marketing", "📣"),
    // Command categories
    ("api-development", "🔌"),
    ("automation-workflow", "⚙️"),
    ("ci-deployment", "🔄"),
    ("code-analysis-testing", "🧪"),
    ("context-loading-priming", "📥"),
    ("database-operations", "🗄️"),
    ("documentation-changelogs", "📝"),
    ("framework-svelte", "🔥"),
    ("game-development", "🎮"),
    ("integration-sync", "🔗"),
    ("miscellaneous", "🔧"),
    ("monitoring-observability", "📊"),
    ("performance-optimization", "⚡"),
    ("project-setup", "🏁"),
    ("project-task-management", "📋"),
    ("security-audit", "🔒"),
    ("simulation-modeling", "🔮"),
    ("team-collaboration", "👥"),
    ("typescript-migration", "📘"),
    ("utilities-debugging", "🐛"),
    ("version-control-git", "🌿"),
    ("workflow-orchestration", "🎭"),
];

/// Display record for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMetadata {
    pub id: String,
    pub display_name: String,
    pub icon: &'static str,
    pub count: usize,
}

fn humanize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some((_, special)) = SPECIAL_CASES.iter().find(|(w, _)| *w == lower) {
        return special.to_string();
    }

    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `development-architecture` → `Development & Architecture`
pub fn humanize_category_id(category_id: &str) -> String {
    category_id
        .split('-')
        .map(humanize_word)
        .collect::<Vec<_>>()
        .join(" & ")
}

fn translated_name(category_id: &str, translate: Translate<'_>) -> Option<String> {
    ["subagentCategories", "commandCategories"]
        .into_iter()
        .find_map(|group| {
            let key = format!("{group}.{category_id}");
            let name = translate(NS_CATEGORIES, &key);
            (!name.is_empty() && name != key).then_some(name)
        })
}

/// User-facing category name.
///
/// For a non-default language with a translator, the `categories` namespace
/// is tried under `subagentCategories` then `commandCategories`; everything
/// else falls back to [`humanize_category_id`].
pub fn generate_category_display_name(
    category_id: &str,
    language: Language,
    translate: Option<Translate<'_>>,
) -> String {
    if let Some(translate) = translate.filter(|_| !language.is_default()) {
        if let Some(name) = translated_name(category_id, translate) {
            return name;
        }
    }
    humanize_category_id(category_id)
}

/// Icon for a category, with a generic box for unknown ids
pub fn get_category_icon(category_id: &str) -> &'static str {
    CATEGORY_ICONS
        .iter()
        .find(|(id, _)| *id == category_id)
        .map_or(DEFAULT_ICON, |(_, icon)| *icon)
}

/// Build metadata for every category, sorted by display name
pub fn generate_category_metadata(
    counts: &BTreeMap<String, usize>,
    language: Language,
    translate: Option<Translate<'_>>,
) -> Vec<CategoryMetadata> {
    let mut metadata: Vec<_> = counts
        .iter()
        .map(|(id, &count)| CategoryMetadata {
            id: id.clone(),
            display_name: generate_category_display_name(id, language, translate),
            icon: get_category_icon(id),
            count,
        })
        .collect();
    metadata.sort_by(|a, b| {
        a.display_name
            .to_lowercase()
            .cmp(&b.display_name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    metadata
}
