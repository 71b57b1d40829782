//! Generator options and the resolved configuration view
//!
//! Raw options arrive as JSON (either from the generator block of the schema,
//! where every value is a string, or from a hand-written request). They are
//! resolved exactly once per run into a [`Config`] which every writer reads.

use crate::GeneratorError;
use once_cell::unsync::OnceCell;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Default import path of the generated client
pub const DEFAULT_CLIENT_IMPORT_PATH: &str = "@prisma/client";

/// Default import path of the client runtime library
pub const DEFAULT_RUNTIME_LIBRARY_IMPORT_PATH: &str = "@prisma/client/runtime/library";

/// How generated declarations are laid out on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Everything in one `index.ts`
    #[default]
    SingleFile,
    /// One file per declaration group plus barrel files
    MultiFile,
}

impl FromStr for OutputMode {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "singleFile" | "single-file" | "single" => Ok(OutputMode::SingleFile),
            "multiFile" | "multi-file" | "multi" => Ok(OutputMode::MultiFile),
            other => Err(GeneratorError::InvalidConfig(format!(
                "unknown output mode \"{}\"",
                other
            ))),
        }
    }
}

/// Semantic version of the targeted client
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct ClientVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    #[serde(default)]
    pub patch: u32,
}

impl ClientVersion {
    /// Create a version triple
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether the client names default argument types `XDefaultArgs`
    ///
    /// Clients before 5.1 use `XArgs` for the same type.
    pub fn uses_default_args(&self) -> bool {
        self.major > 5 || (self.major == 5 && self.minor >= 1)
    }
}

impl fmt::Display for ClientVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ClientVersion {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeneratorError::InvalidConfig(format!("invalid client version \"{}\"", s));

        // Pre-release and build suffixes do not affect naming
        let core = s
            .trim()
            .trim_start_matches('v')
            .split(['-', '+'])
            .next()
            .unwrap_or_default();

        let mut parts = core.split('.');
        let mut next = |required: bool| -> Result<u32, GeneratorError> {
            match parts.next() {
                Some(p) => p.parse::<u32>().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let major = next(true)?;
        let minor = next(false)?;
        let patch = next(false)?;

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(ClientVersion::new(major, minor, patch))
    }
}

/// Version as written in options: `"5.1.0"` or `{ "major": 5, ... }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawClientVersion {
    /// Dotted version string
    Text(String),
    /// Explicit triple
    Parts(ClientVersion),
}

/// Generator options as received, before resolution
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// `singleFile` or `multiFile`
    #[serde(default)]
    pub output_mode: Option<String>,
    /// Legacy switch for multi-file output
    #[serde(default, deserialize_with = "lenient_bool")]
    pub use_multiple_files: Option<bool>,
    /// Reference bare runtime types instead of the client namespace
    #[serde(default, deserialize_with = "lenient_bool")]
    pub native_client_runtime: Option<bool>,
    /// Strip `undefined` members after every object schema
    #[serde(default, deserialize_with = "lenient_bool")]
    pub strict_optional_properties: Option<bool>,
    /// Import path of the generated client
    #[serde(default)]
    pub client_import_path: Option<String>,
    /// Import path of the client runtime library
    #[serde(default)]
    pub client_runtime_library_import_path: Option<String>,
    /// Version of the targeted client
    #[serde(default)]
    pub target_client_version: Option<RawClientVersion>,
    /// Emit model and composite type schemas
    #[serde(default, deserialize_with = "lenient_bool")]
    pub create_model_types: Option<bool>,
    /// Emit select, include, args and input object schemas
    #[serde(default, deserialize_with = "lenient_bool")]
    pub create_input_types: Option<bool>,
    /// Emit select schemas and `select` arguments
    #[serde(default, deserialize_with = "lenient_bool")]
    pub add_select_type: Option<bool>,
    /// Emit include schemas and `include` arguments
    #[serde(default, deserialize_with = "lenient_bool")]
    pub add_include_type: Option<bool>,
    /// Enable optional-defaults variants
    #[serde(default, deserialize_with = "lenient_bool")]
    pub create_optional_default_values_types: Option<bool>,
    /// Enable relation variants
    #[serde(default, deserialize_with = "lenient_bool")]
    pub create_relation_values_types: Option<bool>,
    /// Enable partial variants
    #[serde(default, deserialize_with = "lenient_bool")]
    pub create_partial_types: Option<bool>,
    /// Optional model fields become `.nullish()`
    #[serde(default, deserialize_with = "lenient_bool")]
    pub write_nullish_in_model_types: Option<bool>,
    /// `DateTime` uses `z.coerce.date()`
    #[serde(default, deserialize_with = "lenient_bool")]
    pub coerce_date: Option<bool>,
    /// List relations reference `FindManyArgs` in select and include
    #[serde(default, deserialize_with = "lenient_bool")]
    pub list_relation_find_many_args: Option<bool>,
}

/// Accept `true`, `false`, `"true"` and `"false"`
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(b)) => Ok(Some(b)),
        Some(Raw::Text(s)) => match s.trim() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(D::Error::custom(format!(
                "expected \"true\" or \"false\", got \"{}\"",
                other
            ))),
        },
    }
}

/// Resolved, read-only configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Output layout
    pub output_mode: OutputMode,
    /// Native client runtime mode
    pub native_client_runtime: bool,
    /// Strict optional property mode
    pub strict_optional_properties: bool,
    /// Import path of the generated client
    pub client_import_path: String,
    /// Import path of the client runtime library
    pub runtime_library_import_path: String,
    /// Targeted client version, `None` means newest
    pub client_version: Option<ClientVersion>,
    /// Emit model and composite type schemas
    pub create_model_types: bool,
    /// Emit select, include, args and input object schemas
    pub create_input_types: bool,
    /// Emit select schemas
    pub add_select_type: bool,
    /// Emit include schemas
    pub add_include_type: bool,
    /// Toggle for optional-defaults variants
    pub create_optional_default_values_types: bool,
    /// Toggle for relation variants
    pub create_relation_values_types: bool,
    /// Toggle for partial variants
    pub create_partial_types: bool,
    /// Optional model fields become `.nullish()`
    pub write_nullish_in_model_types: bool,
    /// `DateTime` uses `z.coerce.date()`
    pub coerce_date: bool,
    /// List relations reference `FindManyArgs`
    pub list_relation_find_many_args: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::SingleFile,
            native_client_runtime: false,
            strict_optional_properties: false,
            client_import_path: DEFAULT_CLIENT_IMPORT_PATH.to_string(),
            runtime_library_import_path: DEFAULT_RUNTIME_LIBRARY_IMPORT_PATH.to_string(),
            client_version: None,
            create_model_types: true,
            create_input_types: true,
            add_select_type: true,
            add_include_type: true,
            create_optional_default_values_types: false,
            create_relation_values_types: false,
            create_partial_types: false,
            write_nullish_in_model_types: false,
            coerce_date: true,
            list_relation_find_many_args: true,
        }
    }
}

impl Config {
    /// Resolve raw options against the defaults
    pub fn from_options(options: GeneratorOptions) -> Result<Self, GeneratorError> {
        let defaults = Config::default();

        let output_mode = match (options.output_mode.as_deref(), options.use_multiple_files) {
            (Some(mode), _) => mode.parse()?,
            (None, Some(true)) => OutputMode::MultiFile,
            (None, _) => defaults.output_mode,
        };

        let client_version = match options.target_client_version {
            Some(RawClientVersion::Text(text)) => Some(text.parse()?),
            Some(RawClientVersion::Parts(parts)) => Some(parts),
            None => None,
        };

        let client_import_path =
            non_empty_path(options.client_import_path, "clientImportPath")?
                .unwrap_or(defaults.client_import_path);
        let runtime_library_import_path = non_empty_path(
            options.client_runtime_library_import_path,
            "clientRuntimeLibraryImportPath",
        )?
        .unwrap_or(defaults.runtime_library_import_path);

        Ok(Self {
            output_mode,
            native_client_runtime: options
                .native_client_runtime
                .unwrap_or(defaults.native_client_runtime),
            strict_optional_properties: options
                .strict_optional_properties
                .unwrap_or(defaults.strict_optional_properties),
            client_import_path,
            runtime_library_import_path,
            client_version,
            create_model_types: options
                .create_model_types
                .unwrap_or(defaults.create_model_types),
            create_input_types: options
                .create_input_types
                .unwrap_or(defaults.create_input_types),
            add_select_type: options.add_select_type.unwrap_or(defaults.add_select_type),
            add_include_type: options.add_include_type.unwrap_or(defaults.add_include_type),
            create_optional_default_values_types: options
                .create_optional_default_values_types
                .unwrap_or(defaults.create_optional_default_values_types),
            create_relation_values_types: options
                .create_relation_values_types
                .unwrap_or(defaults.create_relation_values_types),
            create_partial_types: options
                .create_partial_types
                .unwrap_or(defaults.create_partial_types),
            write_nullish_in_model_types: options
                .write_nullish_in_model_types
                .unwrap_or(defaults.write_nullish_in_model_types),
            coerce_date: options.coerce_date.unwrap_or(defaults.coerce_date),
            list_relation_find_many_args: options
                .list_relation_find_many_args
                .unwrap_or(defaults.list_relation_find_many_args),
        })
    }

    /// Output goes to one file per declaration group
    pub fn is_multi_file(&self) -> bool {
        self.output_mode == OutputMode::MultiFile
    }

    /// Whether default argument types are named `XDefaultArgs`
    pub fn uses_default_args(&self) -> bool {
        self.client_version
            .map_or(true, |version| version.uses_default_args())
    }

    /// Select schemas are written
    pub fn writes_select(&self) -> bool {
        self.create_input_types && self.add_select_type
    }

    /// Include schemas are written
    pub fn writes_include(&self) -> bool {
        self.create_input_types && self.add_include_type
    }
}

fn non_empty_path(path: Option<String>, key: &str) -> Result<Option<String>, GeneratorError> {
    match path {
        Some(p) if p.trim().is_empty() => Err(GeneratorError::InvalidConfig(format!(
            "{} must not be empty",
            key
        ))),
        Some(p) => Ok(Some(p.trim().to_string())),
        None => Ok(None),
    }
}

/// A value that is initialized once per run and read-only afterwards
///
/// A second `initialize` without `reset` fails with `AlreadyInitialized`,
/// reading before `initialize` fails with `NotInitialized`.
#[derive(Debug)]
pub struct Slot<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> Slot<T> {
    /// Create an empty slot; `name` appears in lifecycle errors
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Store the value, failing if one is already present
    pub fn initialize(&self, value: T) -> Result<&T, GeneratorError> {
        self.cell
            .set(value)
            .map_err(|_| GeneratorError::AlreadyInitialized(self.name))?;
        self.get()
    }

    /// Read the stored value
    pub fn get(&self) -> Result<&T, GeneratorError> {
        self.cell
            .get()
            .ok_or(GeneratorError::NotInitialized(self.name))
    }

    /// Whether a value is present
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Drop the stored value, if any
    pub fn reset(&mut self) {
        self.cell.take();
    }
}
