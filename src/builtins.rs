//! Built-in symbol handlers
//!
//! The stock symbols cover what a new-file template usually wants: the
//! script's name in a few shapes, the current date and time, and ambient
//! project/user identity. Ambient reads (clock, environment, project
//! metadata) sit behind injected providers so expansion is deterministic
//! under fixed providers.

use std::env;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::config::ProjectInfo;
use crate::engine::SymbolRegistry;

/// Source of the current moment
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Source of ambient user identity
pub trait Environment: Send + Sync {
    fn username(&self) -> Option<String>;
}

/// Reads the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn username(&self) -> Option<String> {
        env::var("USER").or_else(|_| env::var("USERNAME")).ok()
    }
}

/// Providers the built-in handlers close over
pub struct BuiltinContext {
    pub clock: Arc<dyn Clock>,
    pub environment: Arc<dyn Environment>,
    pub project: ProjectInfo,
}

impl Default for BuiltinContext {
    fn default() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            environment: Arc::new(SystemEnvironment),
            project: ProjectInfo::default(),
        }
    }
}

impl BuiltinContext {
    /// Create a context with system providers and no project metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project metadata
    pub fn with_project(mut self, project: ProjectInfo) -> Self {
        self.project = project;
        self
    }

    /// Set the clock provider
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the environment provider
    pub fn with_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }
}

/// Built-in symbol names with one-line descriptions, for `--symbols`
pub const BUILTIN_SYMBOLS: &[(&str, &str)] = &[
    ("NAME", "file name of the new script, without extension"),
    ("SCRIPTNAME", "file name with spaces removed"),
    ("SCRIPTNAME_LOWER", "SCRIPTNAME with a lowercased leading character"),
    ("NOTRIM", "always empty; marks whitespace that must survive trimming"),
    ("DAY", "current day of month, two digits"),
    ("MONTH", "current month, two digits"),
    ("YEAR", "current year, four digits"),
    ("DATE", "current date, YYYY-MM-DD"),
    ("TIME", "current time, HH:MM"),
    ("PROJECTNAME", "project name from stencil.toml"),
    ("COMPANY", "company name from stencil.toml"),
    ("AUTHOR", "current user name"),
];

/// Register the stock symbols against `context`'s providers.
///
/// Registration is first-write-wins, so any of these can be shadowed by
/// registering a custom handler for the name beforehand.
pub fn register_builtins(registry: &mut SymbolRegistry, context: &BuiltinContext) {
    registry.register_fn("NOTRIM", |_, _| Some(String::new()));
    registry.register_fn("NAME", |_, path| file_stem(path));
    registry.register_fn("SCRIPTNAME", |_, path| script_name(path));
    registry.register_fn("SCRIPTNAME_LOWER", |_, path| {
        script_name(path).as_deref().and_then(lower_leading)
    });

    for (symbol, format) in [
        ("DAY", "%d"),
        ("MONTH", "%m"),
        ("YEAR", "%Y"),
        ("DATE", "%Y-%m-%d"),
        ("TIME", "%H:%M"),
    ] {
        let clock = Arc::clone(&context.clock);
        registry.register_fn(symbol, move |_, _| {
            Some(clock.now().format(format).to_string())
        });
    }

    // Handlers for unconfigured metadata decline, so the token passes
    // through literally and missing config is visible in the output.
    let name = context.project.name.clone();
    registry.register_fn("PROJECTNAME", move |_, _| name.clone());
    let company = context.project.company.clone();
    registry.register_fn("COMPANY", move |_, _| company.clone());

    let environment = Arc::clone(&context.environment);
    registry.register_fn("AUTHOR", move |_, _| environment.username());
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

fn script_name(path: &Path) -> Option<String> {
    file_stem(path).map(|stem| stem.replace(' ', ""))
}

/// Lowercase an uppercase leading character; a leading character without
/// an uppercase form gets a `my` prefix and is uppercased instead.
/// Declines on an empty name.
fn lower_leading(name: &str) -> Option<String> {
    let mut chars = name.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    if first.is_uppercase() {
        Some(format!("{}{}", first.to_lowercase(), rest))
    } else {
        Some(format!("my{}{}", first.to_uppercase(), rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::expand_to_string;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Local>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    struct FixedEnvironment(&'static str);

    impl Environment for FixedEnvironment {
        fn username(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn fixed_context() -> BuiltinContext {
        let moment = Local.with_ymd_and_hms(2021, 3, 7, 14, 5, 0).unwrap();
        BuiltinContext::new()
            .with_clock(Arc::new(FixedClock(moment)))
            .with_environment(Arc::new(FixedEnvironment("dana")))
            .with_project(ProjectInfo {
                name: Some("Skyline".to_string()),
                company: Some("Acme".to_string()),
            })
    }

    fn registry() -> SymbolRegistry {
        let mut registry = SymbolRegistry::new();
        register_builtins(&mut registry, &fixed_context());
        registry
    }

    #[test]
    fn test_name_symbols() {
        let registry = registry();
        let path = Path::new("src/Game Over Screen.rs");

        assert_eq!(
            registry.resolve("NAME", path),
            Some("Game Over Screen".to_string())
        );
        assert_eq!(
            registry.resolve("SCRIPTNAME", path),
            Some("GameOverScreen".to_string())
        );
        assert_eq!(
            registry.resolve("SCRIPTNAME_LOWER", path),
            Some("gameOverScreen".to_string())
        );
    }

    #[test]
    fn test_scriptname_lower_fallback_for_lowercase_leading() {
        let registry = registry();
        assert_eq!(
            registry.resolve("SCRIPTNAME_LOWER", Path::new("widget.rs")),
            Some("myWidget".to_string())
        );
    }

    #[test]
    fn test_scriptname_lower_fallback_for_nonalphabetic_leading() {
        let registry = registry();
        assert_eq!(
            registry.resolve("SCRIPTNAME_LOWER", Path::new("3dView.rs")),
            Some("my3dView".to_string())
        );
    }

    #[test]
    fn test_scriptname_lower_declines_on_empty_stem() {
        let registry = registry();

        // No stem at all, and a stem that empties out once spaces are
        // stripped: both decline, so the token passes through.
        assert_eq!(registry.resolve("SCRIPTNAME_LOWER", Path::new("")), None);
        assert_eq!(registry.resolve("SCRIPTNAME_LOWER", Path::new("   .rs")), None);

        let out = expand_to_string(
            "fn #SCRIPTNAME_LOWER#()",
            &registry,
            Path::new("   .rs"),
        );
        assert_eq!(out, "fn #SCRIPTNAME_LOWER#()");
    }

    #[test]
    fn test_notrim_is_empty() {
        let registry = registry();
        assert_eq!(
            registry.resolve("NOTRIM", Path::new("any")),
            Some(String::new())
        );
    }

    #[test]
    fn test_date_symbols_under_fixed_clock() {
        let registry = registry();
        let path = Path::new("any");

        assert_eq!(registry.resolve("DAY", path), Some("07".to_string()));
        assert_eq!(registry.resolve("MONTH", path), Some("03".to_string()));
        assert_eq!(registry.resolve("YEAR", path), Some("2021".to_string()));
        assert_eq!(registry.resolve("DATE", path), Some("2021-03-07".to_string()));
        assert_eq!(registry.resolve("TIME", path), Some("14:05".to_string()));
    }

    #[test]
    fn test_project_and_author_symbols() {
        let registry = registry();
        let path = Path::new("any");

        assert_eq!(
            registry.resolve("PROJECTNAME", path),
            Some("Skyline".to_string())
        );
        assert_eq!(registry.resolve("COMPANY", path), Some("Acme".to_string()));
        assert_eq!(registry.resolve("AUTHOR", path), Some("dana".to_string()));
    }

    #[test]
    fn test_unconfigured_project_metadata_declines() {
        let mut registry = SymbolRegistry::new();
        let context = fixed_context().with_project(ProjectInfo::default());
        register_builtins(&mut registry, &context);

        // Registered, but the token still passes through literally.
        assert!(registry.contains("PROJECTNAME"));
        let out = expand_to_string("// #PROJECTNAME#", &registry, Path::new("a.rs"));
        assert_eq!(out, "// #PROJECTNAME#");
    }

    #[test]
    fn test_builtins_can_be_shadowed() {
        let mut registry = SymbolRegistry::new();
        registry.register_fn("AUTHOR", |_, _| Some("overridden".to_string()));
        register_builtins(&mut registry, &fixed_context());

        assert_eq!(
            registry.resolve("AUTHOR", Path::new("any")),
            Some("overridden".to_string())
        );
    }

    #[test]
    fn test_full_template_expansion() {
        let template = "\
// Created by #AUTHOR# for #PROJECTNAME# on #DATE#
pub struct #SCRIPTNAME#;

impl #SCRIPTNAME# {
    pub fn new() -> Self {
        #SCRIPTNAME#
    }
}
";
        let out = expand_to_string(template, &registry(), Path::new("src/Hud Panel.rs"));
        assert_eq!(
            out,
            "\
// Created by dana for Skyline on 2021-03-07
pub struct HudPanel;

impl HudPanel {
    pub fn new() -> Self {
        HudPanel
    }
}
"
        );
    }
}
