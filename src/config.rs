use serde::Deserialize;
use std::path::PathBuf;

fn default_main_method() -> String {
    "main".to_string()
}

/// Base directories the host resolves controller and middleware references
/// against.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub controllers: String,
    pub middlewares: String,
}

/// Namespace prefixes stripped/added by the host when resolving controller
/// and middleware references.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Namespaces {
    pub controllers: String,
    pub middlewares: String,
}

/// Router construction options.
///
/// All fields have defaults, so a config can be built field-by-field from
/// `RouterConfig::default()` or deserialized from TOML via
/// [`from_toml_str`](RouterConfig::from_toml_str) with any subset of keys
/// present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// When true, dispatch-time errors propagate to the host instead of
    /// being converted into a 500 response.
    pub debug: bool,

    /// Root folder stripped from the request URI when the application is not
    /// served from a web root.
    pub base_folder: String,

    /// The controller action treated as a group's index action; its name is
    /// omitted from generated paths.
    pub main_method: String,

    /// Path of the persisted route snapshot, if route caching is enabled.
    pub cache: Option<PathBuf>,

    pub paths: Paths,
    pub namespaces: Namespaces,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            debug: false,
            base_folder: String::new(),
            main_method: default_main_method(),
            cache: None,
            paths: Paths::default(),
            namespaces: Namespaces::default(),
        }
    }
}

impl RouterConfig {
    /// Parses a config from TOML text.
    pub fn from_toml_str(text: &str) -> crate::Result<RouterConfig> {
        Ok(toml::from_str(text)?)
    }
}
