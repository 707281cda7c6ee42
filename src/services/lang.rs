use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::core::config::Settings;
use crate::error::{Error, Result};

pub const CORE_COMPONENT: &str = "moodle";
pub const QUIZ_COMPONENT: &str = "quiz";
pub const PLUGIN_COMPONENT: &str = "quiz_answersheets";
const LANGCONFIG_COMPONENT: &str = "langconfig";

const BUNDLED_EN: &str = include_str!("../../lang/en.json");

type Components = HashMap<String, HashMap<String, String>>;

/// Values interpolated into a catalog string. `{$a}` takes `Text`,
/// `{$a->name}` takes the `name` entry of `Fields`.
#[derive(Debug, Clone, Default)]
pub enum StringArgs {
    #[default]
    None,
    Text(String),
    Fields(Map<String, Value>),
}

impl From<Value> for StringArgs {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StringArgs::None,
            Value::Object(map) => StringArgs::Fields(map),
            Value::String(text) => StringArgs::Text(text),
            other => StringArgs::Text(other.to_string()),
        }
    }
}

/// Localized string lookup, keyed by string id and owning component.
pub trait StringCatalog: Send + Sync {
    fn has_string(&self, key: &str, component: &str) -> bool;

    /// Fails with [`Error::MissingString`] when the key is unknown.
    fn get_string(&self, key: &str, component: &str, args: &StringArgs) -> Result<String>;

    fn decimal_separator(&self) -> String {
        ".".to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LangCatalog {
    components: Components,
}

impl LangCatalog {
    /// The English strings shipped with the crate.
    pub fn bundled() -> Self {
        static BUNDLED: OnceLock<Components> = OnceLock::new();
        let components = BUNDLED.get_or_init(|| {
            serde_json::from_str(BUNDLED_EN).unwrap_or_else(|err| {
                tracing::error!(error = %err, "Bundled language pack is malformed");
                Components::new()
            })
        });
        Self { components: components.clone() }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self { components: serde_json::from_str(raw)? })
    }

    /// Bundled strings overlaid with the pack at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let load_error = |source: anyhow::Error| Error::CatalogLoad {
            path: path.display().to_string(),
            source,
        };
        let raw = fs::read_to_string(path).map_err(|err| load_error(err.into()))?;
        let overlay: Components = serde_json::from_str(&raw).map_err(|err| load_error(err.into()))?;

        let mut catalog = Self::bundled();
        let mut overridden = 0usize;
        for (component, strings) in overlay {
            overridden += strings.len();
            catalog.components.entry(component).or_default().extend(strings);
        }
        tracing::info!(path = %path.display(), overridden, "Loaded language pack");
        Ok(catalog)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match &settings.lang().lang_path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::bundled()),
        }
    }

    pub fn with_string(mut self, component: &str, key: &str, value: &str) -> Self {
        self.components
            .entry(component.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn without_string(mut self, component: &str, key: &str) -> Self {
        if let Some(strings) = self.components.get_mut(component) {
            strings.remove(key);
        }
        self
    }

    fn lookup(&self, key: &str, component: &str) -> Option<&String> {
        self.components.get(component).and_then(|strings| strings.get(key))
    }
}

impl StringCatalog for LangCatalog {
    fn has_string(&self, key: &str, component: &str) -> bool {
        self.lookup(key, component).is_some()
    }

    fn get_string(&self, key: &str, component: &str, args: &StringArgs) -> Result<String> {
        let template = self.lookup(key, component).ok_or_else(|| {
            tracing::warn!(key, component, "Requested string is not defined");
            Error::MissingString { key: key.to_string(), component: component.to_string() }
        })?;
        Ok(interpolate(template, args))
    }

    fn decimal_separator(&self) -> String {
        self.lookup("decsep", LANGCONFIG_COMPONENT).cloned().unwrap_or_else(|| ".".to_string())
    }
}

fn interpolate(template: &str, args: &StringArgs) -> String {
    match args {
        StringArgs::None => template.to_string(),
        StringArgs::Text(value) => template.replace("{$a}", value),
        StringArgs::Fields(fields) => {
            const OPEN: &str = "{$a->";
            let mut output = String::with_capacity(template.len());
            let mut rest = template;
            while let Some(start) = rest.find(OPEN) {
                output.push_str(&rest[..start]);
                let after = &rest[start + OPEN.len()..];
                let Some(end) = after.find('}') else {
                    output.push_str(&rest[start..]);
                    rest = "";
                    break;
                };
                match fields.get(&after[..end]) {
                    Some(value) => output.push_str(&render_value(value)),
                    // Unknown placeholders stay visible so they are easy to spot.
                    None => output.push_str(&rest[start..start + OPEN.len() + end + 1]),
                }
                rest = &after[end + 1..];
            }
            output.push_str(rest);
            output
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
