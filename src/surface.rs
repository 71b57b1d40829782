//! Target surface resolution
//!
//! Maps a library construct to the type name written in generated code and
//! the module it is imported from. This is the only place that branches on
//! native-client-runtime mode.

use crate::config::Config;
use crate::extended::Sentinel;

/// Module exporting the JSON-null sentinels in native mode
pub const SENTINEL_MODULE: &str = "@prisma/client/runtime/index-browser";

/// Module exporting the `Decimal` class in native mode
pub const DECIMAL_MODULE: &str = "decimal.js";

/// Namespace exported by the generated client
pub const CLIENT_NAMESPACE: &str = "Prisma";

/// A construct of the client library referenced by generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// The JSON value type
    JsonValue,
    /// The JSON input value type
    InputJsonValue,
    /// The structural Decimal type
    DecimalJsLike,
    /// The `Decimal` class, used as a value
    DecimalClass,
    /// A JSON-null sentinel, used as a value
    Sentinel(Sentinel),
}

/// Where a resolved name comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceImport {
    /// Module path
    pub path: String,
    /// Imported name
    pub name: String,
    /// Only used in type positions
    pub type_only: bool,
}

/// A resolved construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Name written in generated code, e.g. `Prisma.JsonValue`
    pub type_name: String,
    /// Import that brings the name into scope
    pub import: SurfaceImport,
}

/// Resolver for one run
#[derive(Debug, Clone)]
pub struct Surface {
    native: bool,
    client_path: String,
    runtime_path: String,
}

impl Surface {
    /// Create a resolver from the run configuration
    pub fn new(config: &Config) -> Self {
        Self {
            native: config.native_client_runtime,
            client_path: config.client_import_path.clone(),
            runtime_path: config.runtime_library_import_path.clone(),
        }
    }

    /// Native-client-runtime mode
    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Resolve a construct
    pub fn resolve(&self, construct: Construct) -> Resolved {
        match construct {
            _ if !self.native => {
                let (name, type_only) = generic_member(construct);
                self.namespaced(name, type_only)
            }
            Construct::JsonValue => self.bare("JsonValue", &self.runtime_path, true),
            Construct::InputJsonValue => self.bare("InputJsonValue", &self.runtime_path, true),
            Construct::DecimalJsLike => self.bare("DecimalJsLike", &self.runtime_path, true),
            Construct::DecimalClass => self.bare("Decimal", DECIMAL_MODULE, false),
            Construct::Sentinel(sentinel) => self.bare(sentinel.name(), SENTINEL_MODULE, false),
        }
    }

    /// A type of the client namespace, e.g. `Prisma.UserSelect`
    ///
    /// Native clients export no namespace to annotate with, so there is
    /// nothing to resolve and no import to register.
    pub fn client_type(&self, name: &str) -> Option<Resolved> {
        if self.native {
            None
        } else {
            Some(self.namespaced(name, true))
        }
    }

    fn namespaced(&self, member: &str, type_only: bool) -> Resolved {
        Resolved {
            type_name: format!("{}.{}", CLIENT_NAMESPACE, member),
            import: SurfaceImport {
                path: self.client_path.clone(),
                name: CLIENT_NAMESPACE.to_string(),
                type_only,
            },
        }
    }

    fn bare(&self, name: &str, path: &str, type_only: bool) -> Resolved {
        Resolved {
            type_name: name.to_string(),
            import: SurfaceImport {
                path: path.to_string(),
                name: name.to_string(),
                type_only,
            },
        }
    }
}

/// Namespace member and type-only flag of a construct in generic mode
fn generic_member(construct: Construct) -> (&'static str, bool) {
    match construct {
        Construct::JsonValue => ("JsonValue", true),
        Construct::InputJsonValue => ("InputJsonValue", true),
        Construct::DecimalJsLike => ("DecimalJsLike", true),
        Construct::DecimalClass => ("Decimal", false),
        Construct::Sentinel(sentinel) => (sentinel.name(), false),
    }
}
