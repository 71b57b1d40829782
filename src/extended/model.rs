//! Extended views over models, composite types, fields and enums

use super::NameIndex;
use crate::config::Config;
use crate::directives::{parse_documentation, Directives};
use crate::dmmf::{DatamodelEnum, Field, FieldKind, Model};
use crate::types::ScalarKind;
use crate::GeneratorError;
use heck::ToTitleCase;
use serde_json::Value;

/// What a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// A scalar column
    Scalar(ScalarKind),
    /// An enum column
    Enum,
    /// A relation to another model
    Relation,
    /// An embedded composite type
    Composite,
}

/// A field with every derived flag writers need
#[derive(Debug, Clone)]
pub struct ExtendedField {
    /// Field name
    pub name: String,
    /// Scalar name or referenced model/enum/type name
    pub type_name: String,
    /// Classification
    pub class: FieldClass,
    /// Field is a list
    pub is_list: bool,
    /// Field is required
    pub is_required: bool,
    /// Field has a default or is maintained by the client (`@updatedAt`)
    pub is_optional_default_field: bool,
    /// Static default rendered as a literal, when it can be
    pub default_literal: Option<String>,
    /// Directives from the field documentation
    pub directives: Directives,
    /// Documentation with directive lines removed
    pub documentation: Option<String>,
}

impl ExtendedField {
    pub(crate) fn new(
        owner: &str,
        field: &Field,
        names: &NameIndex,
    ) -> Result<Self, GeneratorError> {
        let unknown = || GeneratorError::UnknownFieldType {
            entity: owner.to_string(),
            field: field.name.clone(),
            type_name: field.type_name.clone(),
        };

        let class = match field.kind {
            FieldKind::Scalar => {
                FieldClass::Scalar(ScalarKind::from_name(&field.type_name).ok_or_else(unknown)?)
            }
            FieldKind::Enum if names.is_enum(&field.type_name) => FieldClass::Enum,
            FieldKind::Object if names.is_composite(&field.type_name) => FieldClass::Composite,
            FieldKind::Object if names.is_model(&field.type_name) => FieldClass::Relation,
            FieldKind::Enum | FieldKind::Object | FieldKind::Unsupported => return Err(unknown()),
        };

        let documentation = parse_documentation(
            &format!("{}.{}", owner, field.name),
            field.documentation.as_deref(),
        )?;

        let default_literal = if field.is_list {
            None
        } else {
            field
                .default
                .as_ref()
                .and_then(|value| default_literal(class, value))
        };

        Ok(Self {
            name: field.name.clone(),
            type_name: field.type_name.clone(),
            class,
            is_list: field.is_list,
            is_required: field.is_required,
            is_optional_default_field: field.has_default_value || field.is_updated_at,
            default_literal,
            directives: documentation.directives,
            documentation: documentation.text,
        })
    }

    /// Scalar kind, if this is a scalar field
    pub fn scalar(&self) -> Option<ScalarKind> {
        match self.class {
            FieldClass::Scalar(kind) => Some(kind),
            _ => None,
        }
    }

    /// Field is a scalar or an enum
    pub fn is_scalar_like(&self) -> bool {
        matches!(self.class, FieldClass::Scalar(_) | FieldClass::Enum)
    }

    /// Field is a relation or a composite type
    pub fn is_relation_like(&self) -> bool {
        matches!(self.class, FieldClass::Relation | FieldClass::Composite)
    }

    /// Field holds JSON
    pub fn is_json(&self) -> bool {
        self.scalar() == Some(ScalarKind::Json)
    }

    /// Field is commented out of model schemas
    pub fn omit_in_model(&self) -> bool {
        self.directives.omit.model
    }

    /// Field is commented out of create/update input schemas
    pub fn omit_in_input(&self) -> bool {
        self.directives.omit.input
    }

    /// Error object passed to the base validator
    pub fn error_object(&self) -> Option<String> {
        self.directives.error_object()
    }
}

/// Render a static default as a literal, `None` for function defaults
fn default_literal(class: FieldClass, value: &Value) -> Option<String> {
    match (class, value) {
        (FieldClass::Enum, Value::String(s)) => Some(quote_single(s)),
        (FieldClass::Scalar(kind), value) if kind.supports_literal_default() => match value {
            Value::String(s) if kind == ScalarKind::String => Some(quote_single(s)),
            Value::Number(n) if matches!(kind, ScalarKind::Int | ScalarKind::Float) => {
                Some(n.to_string())
            }
            Value::Bool(b) if kind == ScalarKind::Boolean => Some(b.to_string()),
            _ => None,
        },
        _ => None,
    }
}

/// Quote a string as a single-quoted TypeScript literal
pub fn quote_single(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            // Line terminators inside string literals
            '\u{2028}' => quoted.push_str("\\u2028"),
            '\u{2029}' => quoted.push_str("\\u2029"),
            c => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Which model variants are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantFlags {
    /// `XOptionalDefaults`
    pub optional_defaults: bool,
    /// `XRelations` / `XWithRelations`
    pub relations: bool,
    /// `XOptionalDefaultsWithRelations`
    pub optional_defaults_relations: bool,
    /// `XPartial`
    pub partial: bool,
    /// `XPartialWithRelations`
    pub partial_relations: bool,
}

/// A model or composite type with derived emission data
#[derive(Debug, Clone)]
pub struct ExtendedModel {
    /// Name as declared
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<ExtendedField>,
    /// Directives from the model documentation
    pub directives: Directives,
    /// Documentation with directive lines removed
    pub documentation: Option<String>,
    /// Name used in section headings, e.g. `USER PROFILE`
    pub heading_name: String,
    /// Names of optional JSON fields
    pub optional_json_fields: Vec<String>,
    /// `'a' | 'b'` union of the optional JSON field names
    pub optional_json_field_union: String,
    /// Variants to write
    pub variants: VariantFlags,
}

impl ExtendedModel {
    pub(crate) fn new(
        model: &Model,
        names: &NameIndex,
        config: &Config,
    ) -> Result<Self, GeneratorError> {
        let fields = model
            .fields
            .iter()
            .map(|field| ExtendedField::new(&model.name, field, names))
            .collect::<Result<Vec<_>, _>>()?;

        let documentation = parse_documentation(&model.name, model.documentation.as_deref())?;

        let optional_json_fields: Vec<String> = fields
            .iter()
            .filter(|f| f.is_json() && !f.is_required)
            .map(|f| f.name.clone())
            .collect();

        let optional_json_field_union = optional_json_fields
            .iter()
            .map(|name| quote_single(name))
            .collect::<Vec<_>>()
            .join(" | ");

        let has_optional_defaults = fields
            .iter()
            .any(|f| f.is_scalar_like() && f.is_optional_default_field);
        let has_relations = fields.iter().any(ExtendedField::is_relation_like);

        let optional_defaults = config.create_optional_default_values_types && has_optional_defaults;
        let relations = config.create_relation_values_types && has_relations;
        let partial = config.create_partial_types && !fields.is_empty();

        let variants = VariantFlags {
            optional_defaults,
            relations,
            optional_defaults_relations: optional_defaults && relations,
            partial,
            partial_relations: partial && relations,
        };

        Ok(Self {
            name: model.name.clone(),
            heading_name: model.name.to_title_case().to_uppercase(),
            fields,
            directives: documentation.directives,
            documentation: documentation.text,
            optional_json_fields,
            optional_json_field_union,
            variants,
        })
    }

    /// Scalar and enum fields in declaration order
    pub fn scalar_fields(&self) -> impl Iterator<Item = &ExtendedField> {
        self.fields.iter().filter(|f| f.is_scalar_like())
    }

    /// Relation and composite fields in declaration order
    pub fn relation_fields(&self) -> impl Iterator<Item = &ExtendedField> {
        self.fields.iter().filter(|f| f.is_relation_like())
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&ExtendedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Model has optional JSON fields
    pub fn has_optional_json_fields(&self) -> bool {
        !self.optional_json_fields.is_empty()
    }

    /// Model-level error object
    pub fn error_object(&self) -> Option<String> {
        self.directives.error_object()
    }

    /// Model-level validator chain fragments
    pub fn custom_validators(&self) -> &[String] {
        &self.directives.validators
    }
}

/// A datamodel enum
#[derive(Debug, Clone)]
pub struct ExtendedEnum {
    /// Enum name
    pub name: String,
    /// Value names in order
    pub values: Vec<String>,
    /// Directives from the enum documentation
    pub directives: Directives,
    /// Documentation with directive lines removed
    pub documentation: Option<String>,
}

impl ExtendedEnum {
    pub(crate) fn new(enum_def: &DatamodelEnum) -> Result<Self, GeneratorError> {
        let documentation = parse_documentation(&enum_def.name, enum_def.documentation.as_deref())?;

        Ok(Self {
            name: enum_def.name.clone(),
            values: enum_def.values.iter().map(|v| v.name.clone()).collect(),
            directives: documentation.directives,
            documentation: documentation.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names() -> NameIndex {
        NameIndex::from_parts(&["User", "Post"], &["Role"], &["Address"])
    }

    fn field(name: &str, kind: FieldKind, type_name: &str) -> Field {
        Field {
            name: name.to_string(),
            kind,
            type_name: type_name.to_string(),
            is_required: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_fields() {
        let names = names();
        let scalar = ExtendedField::new("User", &field("id", FieldKind::Scalar, "Int"), &names).unwrap();
        assert_eq!(scalar.class, FieldClass::Scalar(ScalarKind::Int));

        let role = ExtendedField::new("User", &field("role", FieldKind::Enum, "Role"), &names).unwrap();
        assert_eq!(role.class, FieldClass::Enum);

        let posts = ExtendedField::new("User", &field("posts", FieldKind::Object, "Post"), &names).unwrap();
        assert_eq!(posts.class, FieldClass::Relation);

        let address =
            ExtendedField::new("User", &field("address", FieldKind::Object, "Address"), &names).unwrap();
        assert_eq!(address.class, FieldClass::Composite);
    }

    #[test]
    fn test_quote_single_escapes_line_terminators() {
        assert_eq!(quote_single("it's"), r"'it\'s'");
        assert_eq!(quote_single("a\\b"), r"'a\\b'");
        assert_eq!(
            quote_single("one\ntwo\r\nthree\u{2028}four\u{2029}"),
            r"'one\ntwo\r\nthree\u2028four\u2029'"
        );
    }

    #[test]
    fn test_unknown_types_are_fatal() {
        let names = names();
        let err = ExtendedField::new("User", &field("geo", FieldKind::Scalar, "Geometry"), &names)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownFieldType { .. }));

        let err = ExtendedField::new("User", &field("x", FieldKind::Unsupported, "Unsupported"), &names)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownFieldType { .. }));

        let err = ExtendedField::new("User", &field("team", FieldKind::Object, "Team"), &names)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownFieldType { .. }));
    }

    #[test]
    fn test_default_literals() {
        let names = names();
        let mut name = field("name", FieldKind::Scalar, "String");
        name.has_default_value = true;
        name.default = Some(json!("it's"));
        let name = ExtendedField::new("User", &name, &names).unwrap();
        assert_eq!(name.default_literal.as_deref(), Some("'it\\'s'"));
        assert!(name.is_optional_default_field);

        let mut id = field("id", FieldKind::Scalar, "Int");
        id.has_default_value = true;
        id.default = Some(json!({ "name": "autoincrement", "args": [] }));
        let id = ExtendedField::new("User", &id, &names).unwrap();
        assert!(id.default_literal.is_none());
        assert!(id.is_optional_default_field);
    }

    #[test]
    fn test_updated_at_is_optional_default() {
        let mut updated = field("updatedAt", FieldKind::Scalar, "DateTime");
        updated.is_updated_at = true;
        let updated = ExtendedField::new("User", &updated, &names()).unwrap();
        assert!(updated.is_optional_default_field);
        assert!(updated.default_literal.is_none());
    }

    #[test]
    fn test_optional_defaults_variant_needs_eligible_field() {
        let config = Config {
            create_optional_default_values_types: true,
            ..Config::default()
        };
        let model = Model {
            name: "Post".to_string(),
            fields: vec![field("title", FieldKind::Scalar, "String")],
            ..Default::default()
        };
        let extended = ExtendedModel::new(&model, &names(), &config).unwrap();
        assert!(!extended.variants.optional_defaults);
    }

    #[test]
    fn test_optional_json_union() {
        let mut meta = field("meta", FieldKind::Scalar, "Json");
        meta.is_required = false;
        let mut extra = field("extra", FieldKind::Scalar, "Json");
        extra.is_required = false;
        let model = Model {
            name: "UserProfile".to_string(),
            fields: vec![field("data", FieldKind::Scalar, "Json"), meta, extra],
            ..Default::default()
        };
        let extended =
            ExtendedModel::new(&model, &names(), &Config::default()).unwrap();
        assert_eq!(extended.optional_json_fields, vec!["meta", "extra"]);
        assert_eq!(extended.optional_json_field_union, "'meta' | 'extra'");
        assert_eq!(extended.heading_name, "USER PROFILE");
    }
}
