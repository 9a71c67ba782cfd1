//! Site i18n - Main Entry Point
//!
//! Prints the i18n test page (navigation, features, categories, buttons and
//! stats) in the active language. An optional language code argument switches
//! and persists the language first.

use site_i18n::constants::{NS_COMMON, NS_HOMEPAGE};
use site_i18n::helpers::is_development;
use site_i18n::states::{I18nConfig, LanguageContext, i18n_common, i18n_homepage};
use site_i18n::{Language, Params};

const SUBAGENT_CATEGORIES: [&str; 7] = [
    "development-architecture",
    "language-specialists",
    "infrastructure-operations",
    "quality-security",
    "data-ai",
    "specialized-domains",
    "crypto-trading",
];

const COMMAND_CATEGORIES: [&str; 7] = [
    "version-control-git",
    "code-analysis-testing",
    "context-loading-priming",
    "documentation-changelogs",
    "project-task-management",
    "ci-deployment",
    "miscellaneous",
];

fn render(ctx: &LanguageContext) {
    let current = Params::new().with("language", ctx.language().display_name());
    println!("{}", ctx.translate(NS_COMMON, "language.current", Some(&current)));
    println!(
        "{}",
        Language::ALL
            .map(|l| format!("{} ({})", l.display_name(), l.code()))
            .join(" | ")
    );

    println!("\n# {}", i18n_common(ctx, "navigation.title"));
    for key in ["subagents", "commands", "mcpServers", "documentation", "cliTool", "contribute"] {
        println!("  - {}", i18n_common(ctx, &format!("navigation.{key}")));
    }

    println!("\n# {}", i18n_homepage(ctx, "hero.title"));
    println!("{}", ctx.t(NS_HOMEPAGE, "hero.subtitle"));
    for feature in ["easyInstallation", "automaticInvocation", "qualityAssured"] {
        println!(
            "  * {}: {}",
            i18n_common(ctx, &format!("features.{feature}.title")),
            i18n_common(ctx, &format!("features.{feature}.description"))
        );
    }

    println!("\n# {}", i18n_common(ctx, "sections.categoriesOverview"));
    for id in SUBAGENT_CATEGORIES.iter().chain(COMMAND_CATEGORIES.iter()) {
        println!("  {id}: {}", ctx.category_display_name(id));
    }

    println!();
    let buttons: Vec<_> = ["copyMarkdown", "downloadFile", "installWithCli", "browseAll"]
        .into_iter()
        .map(|key| format!("[{}]", i18n_common(ctx, &format!("buttons.{key}"))))
        .collect();
    println!("{}", buttons.join(" "));

    println!();
    for (key, count) in [("stats.subagents", 43), ("stats.commands", 39), ("stats.mcpServers", 100)] {
        let params = Params::from([("count", count)]);
        println!("{}", ctx.translate(NS_COMMON, key, Some(&params)));
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    let level = if is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = I18nConfig::try_load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using default configuration");
        I18nConfig::default()
    });
    let ctx = LanguageContext::from_config(&config)?;

    if let Some(code) = std::env::args().nth(1) {
        if let Err(e) = ctx.set_language(&code) {
            tracing::warn!(error = %e, code = %code, "Keeping current language");
        }
    }

    render(&ctx);
    Ok(())
}
