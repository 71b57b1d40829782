//! Content writers for Zod schema declarations
//!
//! Each writer is a stateless function of the entity it writes and a
//! [`Context`]. Writers register the imports their output needs on the
//! [`FileWriter`]; in single-file output those registrations are dropped.

pub mod args;
pub mod enums;
pub mod field;
pub mod helpers;
pub mod input;
pub mod model;
pub mod relation;
pub mod select;
pub mod union;

use crate::config::Config;
use crate::extended::ExtendedDmmf;
use crate::surface::{Construct, Surface};
use crate::writer::{Decl, Directory, FileWriter};

/// Annotation of declarations without a client type to check against
pub const UNTYPED_ANNOTATION: &str = "z.ZodTypeAny";

/// Everything a content writer may read
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Resolved configuration
    pub config: &'a Config,
    /// Extended metamodel
    pub dmmf: &'a ExtendedDmmf,
    /// Target surface resolver
    pub surface: &'a Surface,
}

impl<'a> Context<'a> {
    /// Resolve a surface construct and register its import
    pub fn surface_name(&self, w: &mut FileWriter, construct: Construct) -> String {
        let resolved = self.surface.resolve(construct);
        w.import_surface(&resolved);
        resolved.type_name
    }

    /// `z.ZodType<Prisma.X>` annotation for a client type
    pub fn client_type_annotation(&self, w: &mut FileWriter, name: &str) -> String {
        self.client_omit_annotation(w, name, &[])
    }

    /// `z.ZodType<Omit<Prisma.X, 'a' | 'b'>>`, or the plain annotation when
    /// nothing is omitted. `z.ZodTypeAny` when the client has no namespace.
    pub fn client_omit_annotation(&self, w: &mut FileWriter, name: &str, omitted: &[String]) -> String {
        let Some(resolved) = self.surface.client_type(name) else {
            return UNTYPED_ANNOTATION.to_string();
        };
        w.import_surface(&resolved);

        if omitted.is_empty() {
            format!("z.ZodType<{}>", resolved.type_name)
        } else {
            format!("z.ZodType<Omit<{}, {}>>", resolved.type_name, omitted.join(" | "))
        }
    }

    /// `.transform(ru)` in strict-optional mode, registering the helper
    pub fn strict_transform(&self, w: &mut FileWriter) -> &'static str {
        if self.config.strict_optional_properties {
            w.reference(&helper_file(helpers::RU_FILE), "ru");
            ".transform(ru)"
        } else {
            ""
        }
    }
}

/// Deferred reference, so declarations may refer to each other in any order
pub fn lazy(name: &str) -> String {
    format!("z.lazy(() => {})", name)
}

/// File of a model or composite type and all of its variants
pub fn model_file(entity: &str) -> Decl {
    Decl::new(Directory::ModelSchema, format!("{}Schema", entity))
}

/// File of an enum or input object schema
pub fn input_file(name: &str) -> Decl {
    Decl::new(Directory::InputTypeSchemas, format!("{}Schema", name))
}

/// File of a select, include or argument schema, e.g. `UserSelect`
pub fn output_file(name: &str) -> Decl {
    Decl::new(Directory::OutputTypeSchemas, format!("{}Schema", name))
}

/// File of a helper schema or function
pub fn helper_file(file: &str) -> Decl {
    Decl::new(Directory::InputTypeSchemas, file)
}

/// Reference `{name}Schema` of an enum or input object
pub fn input_schema(w: &mut FileWriter, name: &str) -> String {
    let schema = format!("{}Schema", name);
    w.reference(&input_file(name), &schema);
    schema
}

/// Reference `{name}Schema` of a select, include or argument schema
pub fn output_schema(w: &mut FileWriter, name: &str) -> String {
    let schema = format!("{}Schema", name);
    w.reference(&output_file(name), &schema);
    schema
}

/// Reference an export of a helper file
pub fn helper(w: &mut FileWriter, file: &str, name: &str) -> String {
    w.reference(&helper_file(file), name);
    name.to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared fixtures for content writer tests

    use crate::config::Config;
    use crate::dmmf::{Datamodel, DatamodelEnum, Document, EnumValue, Field, FieldKind, Model};
    use crate::extended::ExtendedDmmf;
    use crate::surface::Surface;

    pub fn scalar(name: &str, type_name: &str) -> Field {
        Field {
            name: name.to_string(),
            kind: FieldKind::Scalar,
            type_name: type_name.to_string(),
            is_required: true,
            ..Default::default()
        }
    }

    pub fn object(name: &str, type_name: &str, is_list: bool) -> Field {
        Field {
            name: name.to_string(),
            kind: FieldKind::Object,
            type_name: type_name.to_string(),
            is_list,
            is_required: true,
            ..Default::default()
        }
    }

    pub fn enum_field(name: &str, type_name: &str) -> Field {
        Field {
            name: name.to_string(),
            kind: FieldKind::Enum,
            type_name: type_name.to_string(),
            is_required: true,
            ..Default::default()
        }
    }

    /// `User` (id, email, role, posts) and `Post` (id, title, author)
    pub fn blog() -> Document {
        let mut id = scalar("id", "Int");
        id.is_id = true;
        id.has_default_value = true;
        id.default = Some(serde_json::json!({ "name": "autoincrement", "args": [] }));

        let mut role = enum_field("role", "Role");
        role.has_default_value = true;
        role.default = Some(serde_json::json!("USER"));

        let mut name = scalar("name", "String");
        name.is_required = false;

        let mut author = object("author", "User", false);
        author.is_required = false;

        Document {
            datamodel: Datamodel {
                models: vec![
                    Model {
                        name: "User".to_string(),
                        fields: vec![
                            id.clone(),
                            scalar("email", "String"),
                            name,
                            role,
                            object("posts", "Post", true),
                        ],
                        documentation: Some("A registered user".to_string()),
                        ..Default::default()
                    },
                    Model {
                        name: "Post".to_string(),
                        fields: vec![id, scalar("title", "String"), author],
                        ..Default::default()
                    },
                ],
                enums: vec![DatamodelEnum {
                    name: "Role".to_string(),
                    values: vec![
                        EnumValue {
                            name: "USER".to_string(),
                            db_name: None,
                        },
                        EnumValue {
                            name: "ADMIN".to_string(),
                            db_name: None,
                        },
                    ],
                    documentation: None,
                }],
                types: Vec::new(),
            },
            ..Default::default()
        }
    }

    pub struct Fixture {
        pub config: Config,
        pub dmmf: ExtendedDmmf,
        pub surface: Surface,
    }

    impl Fixture {
        pub fn new(document: &Document, config: Config) -> Self {
            let dmmf = ExtendedDmmf::new(document, &config).unwrap();
            let surface = Surface::new(&config);
            Self {
                config,
                dmmf,
                surface,
            }
        }

        pub fn context(&self) -> super::Context<'_> {
            super::Context {
                config: &self.config,
                dmmf: &self.dmmf,
                surface: &self.surface,
            }
        }
    }
}
