//! Extended metamodel
//!
//! Every flag a writer needs is derived here exactly once per run, so the
//! content writers never look at the raw document.

pub mod model;
pub mod schema;

pub use model::{ExtendedEnum, ExtendedField, ExtendedModel, FieldClass, VariantFlags};
pub use schema::{
    Action, ExtendedArg, ExtendedInputType, ExtendedOperation, ExtendedOutputField,
    ExtendedOutputType, ExtendedSchemaEnum, InputShape, InputTypeRef, SelectShape, Sentinel,
};

use crate::config::Config;
use crate::dmmf::{Document, FieldKind, Location, TypeRef};
use crate::GeneratorError;
use std::collections::HashSet;
use tracing::debug;

/// Name lookup for classifying references
#[derive(Debug, Default)]
pub(crate) struct NameIndex {
    models: HashSet<String>,
    enums: HashSet<String>,
    composites: HashSet<String>,
}

impl NameIndex {
    fn new(document: &Document) -> Self {
        let datamodel = &document.datamodel;
        Self {
            models: datamodel.models.iter().map(|m| m.name.clone()).collect(),
            enums: datamodel.enums.iter().map(|e| e.name.clone()).collect(),
            composites: datamodel.types.iter().map(|t| t.name.clone()).collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(models: &[&str], enums: &[&str], composites: &[&str]) -> Self {
        let set = |names: &[&str]| names.iter().map(|n| n.to_string()).collect();
        Self {
            models: set(models),
            enums: set(enums),
            composites: set(composites),
        }
    }

    pub(crate) fn is_model(&self, name: &str) -> bool {
        self.models.contains(name)
    }

    pub(crate) fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub(crate) fn is_composite(&self, name: &str) -> bool {
        self.composites.contains(name)
    }
}

/// Which variant of a relation target a reference asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationVariant {
    /// Plain relation schemas
    Base,
    /// Optional-defaults relation schemas
    OptionalDefaults,
    /// Partial relation schemas
    Partial,
}

/// The derived metamodel for one run
#[derive(Debug, Clone)]
pub struct ExtendedDmmf {
    /// Database models
    pub models: Vec<ExtendedModel>,
    /// Composite types
    pub types: Vec<ExtendedModel>,
    /// Datamodel enums
    pub enums: Vec<ExtendedEnum>,
    /// Schema enums not declared in the datamodel
    pub schema_enums: Vec<ExtendedSchemaEnum>,
    /// Input object types
    pub input_object_types: Vec<ExtendedInputType>,
    /// Output types of models and composite types
    pub output_object_types: Vec<ExtendedOutputType>,
    /// Root operations mapped to models
    pub operations: Vec<ExtendedOperation>,
    /// A JSON value appears anywhere
    pub has_json_types: bool,
    /// A Decimal value appears anywhere
    pub has_decimal_types: bool,
    /// Import directive lines, first occurrence order
    pub custom_imports: Vec<String>,
}

impl ExtendedDmmf {
    /// Derive the metamodel from a document
    pub fn new(document: &Document, config: &Config) -> Result<Self, GeneratorError> {
        let names = NameIndex::new(document);
        let datamodel = &document.datamodel;
        let schema = &document.schema;

        let models = datamodel
            .models
            .iter()
            .map(|m| ExtendedModel::new(m, &names, config))
            .collect::<Result<Vec<_>, _>>()?;

        let types = datamodel
            .types
            .iter()
            .map(|t| ExtendedModel::new(t, &names, config))
            .collect::<Result<Vec<_>, _>>()?;

        let enums = datamodel
            .enums
            .iter()
            .map(ExtendedEnum::new)
            .collect::<Result<Vec<_>, _>>()?;

        let schema_enums = schema
            .enum_types
            .iter()
            .filter(|e| !names.is_enum(&e.name))
            .map(ExtendedSchemaEnum::new)
            .collect();

        let input_object_types = schema
            .input_object_types
            .iter()
            .map(|input| ExtendedInputType::new(input, &models))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        let output_object_types: Vec<ExtendedOutputType> = schema
            .output_object_types
            .iter()
            .filter(|o| names.is_model(&o.name) || names.is_composite(&o.name))
            .filter(|o| seen.insert(o.name.clone()))
            .map(|o| ExtendedOutputType::new(o, &names, config))
            .collect();

        let mut operations = Vec::new();
        for root in schema
            .output_object_types
            .prisma
            .iter()
            .filter(|o| o.name == "Query" || o.name == "Mutation")
        {
            for field in &root.fields {
                match ExtendedOperation::new(
                    &field.name,
                    &field.args,
                    &names,
                    &output_object_types,
                    config,
                )? {
                    Some(operation) => operations.push(operation),
                    None => debug!(operation = %field.name, "skipping operation without a model"),
                }
            }
        }

        let has_json_types = document_has_scalar(document, "Json");
        let has_decimal_types = document_has_scalar(document, "Decimal");

        let mut custom_imports = Vec::new();
        let import_lines = models
            .iter()
            .chain(types.iter())
            .flat_map(|m| m.directives.imports.iter())
            .chain(enums.iter().flat_map(|e| e.directives.imports.iter()));
        for line in import_lines {
            if !custom_imports.contains(line) {
                custom_imports.push(line.clone());
            }
        }

        debug!(
            models = models.len(),
            types = types.len(),
            enums = enums.len(),
            inputs = input_object_types.len(),
            operations = operations.len(),
            has_json_types,
            has_decimal_types,
            "derived extended metamodel"
        );

        Ok(Self {
            models,
            types,
            enums,
            schema_enums,
            input_object_types,
            output_object_types,
            operations,
            has_json_types,
            has_decimal_types,
            custom_imports,
        })
    }

    /// Look up a model or composite type
    pub fn entity(&self, name: &str) -> Option<&ExtendedModel> {
        self.models
            .iter()
            .chain(self.types.iter())
            .find(|m| m.name == name)
    }

    /// Look up a model output type
    pub fn output_type(&self, name: &str) -> Option<&ExtendedOutputType> {
        self.output_object_types.iter().find(|o| o.name == name)
    }

    /// An include schema is written for `name`
    pub fn has_include(&self, name: &str) -> bool {
        self.output_type(name).is_some_and(|o| o.has_relation_fields)
    }

    /// Name of the best emitted variant of `target` for a reference
    pub fn variant_target(&self, target: &str, variant: RelationVariant) -> String {
        let Some(entity) = self.entity(target) else {
            return target.to_string();
        };
        let flags = &entity.variants;

        let base = if flags.relations {
            format!("{}WithRelations", target)
        } else {
            target.to_string()
        };

        match variant {
            RelationVariant::Base => base,
            RelationVariant::OptionalDefaults if flags.optional_defaults_relations => {
                format!("{}OptionalDefaultsWithRelations", target)
            }
            RelationVariant::OptionalDefaults if flags.optional_defaults => {
                format!("{}OptionalDefaults", target)
            }
            RelationVariant::Partial if flags.partial_relations => {
                format!("{}PartialWithRelations", target)
            }
            RelationVariant::Partial if flags.partial => format!("{}Partial", target),
            RelationVariant::OptionalDefaults | RelationVariant::Partial => base,
        }
    }
}

/// Whether a scalar appears in the datamodel or any schema shape
fn document_has_scalar(document: &Document, scalar: &str) -> bool {
    let datamodel = &document.datamodel;
    let schema = &document.schema;
    let is_scalar = |t: &TypeRef| t.location == Location::Scalar && t.type_name == scalar;

    let in_datamodel = datamodel
        .models
        .iter()
        .chain(datamodel.types.iter())
        .flat_map(|m| m.fields.iter())
        .any(|f| f.kind == FieldKind::Scalar && f.type_name == scalar);

    let in_inputs = schema
        .input_object_types
        .iter()
        .flat_map(|i| i.fields.iter())
        .flat_map(|a| a.input_types.iter())
        .any(is_scalar);

    let in_outputs = schema.output_object_types.iter().flat_map(|o| o.fields.iter()).any(|f| {
        is_scalar(&f.output_type)
            || f.args
                .iter()
                .flat_map(|a| a.input_types.iter())
                .any(is_scalar)
    });

    in_datamodel || in_inputs || in_outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmmf::{Datamodel, Field, InputType, Model, SchemaArg};

    fn scalar(name: &str, type_name: &str) -> Field {
        Field {
            name: name.to_string(),
            kind: FieldKind::Scalar,
            type_name: type_name.to_string(),
            is_required: true,
            ..Default::default()
        }
    }

    fn relation(name: &str, target: &str) -> Field {
        Field {
            name: name.to_string(),
            kind: FieldKind::Object,
            type_name: target.to_string(),
            is_required: true,
            ..Default::default()
        }
    }

    fn document() -> Document {
        let mut id = scalar("id", "Int");
        id.has_default_value = true;
        Document {
            datamodel: Datamodel {
                models: vec![
                    Model {
                        name: "User".to_string(),
                        fields: vec![id, scalar("email", "String"), relation("posts", "Post")],
                        documentation: Some("@zod.import([\"import a from 'a'\"])".to_string()),
                        ..Default::default()
                    },
                    Model {
                        name: "Post".to_string(),
                        fields: vec![scalar("title", "String")],
                        documentation: Some(
                            "@zod.import([\"import b from 'b'\", \"import a from 'a'\"])".to_string(),
                        ),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_custom_imports_deduplicated_in_order() {
        let dmmf = ExtendedDmmf::new(&document(), &Config::default()).unwrap();
        assert_eq!(dmmf.custom_imports, vec!["import a from 'a'", "import b from 'b'"]);
    }

    #[test]
    fn test_json_and_decimal_detection_through_args_only() {
        let mut doc = document();
        assert!(!ExtendedDmmf::new(&doc, &Config::default()).unwrap().has_json_types);

        doc.schema.input_object_types.prisma.push(InputType {
            name: "RawFilter".to_string(),
            fields: vec![SchemaArg {
                name: "value".to_string(),
                input_types: vec![TypeRef {
                    type_name: "Decimal".to_string(),
                    location: Location::Scalar,
                    ..Default::default()
                }],
                ..Default::default()
            }],
        });

        let dmmf = ExtendedDmmf::new(&doc, &Config::default()).unwrap();
        assert!(dmmf.has_decimal_types);
        assert!(!dmmf.has_json_types);
    }

    #[test]
    fn test_variant_target_resolution() {
        let plain = ExtendedDmmf::new(&document(), &Config::default()).unwrap();
        assert_eq!(plain.variant_target("User", RelationVariant::Partial), "User");

        let config = Config {
            create_relation_values_types: true,
            create_partial_types: true,
            create_optional_default_values_types: true,
            ..Config::default()
        };
        let dmmf = ExtendedDmmf::new(&document(), &config).unwrap();
        assert_eq!(dmmf.variant_target("User", RelationVariant::Base), "UserWithRelations");
        assert_eq!(
            dmmf.variant_target("User", RelationVariant::Partial),
            "UserPartialWithRelations"
        );
        assert_eq!(
            dmmf.variant_target("User", RelationVariant::OptionalDefaults),
            "UserOptionalDefaultsWithRelations"
        );
        // Post has neither relations nor eligible defaults
        assert_eq!(dmmf.variant_target("Post", RelationVariant::Base), "Post");
        assert_eq!(dmmf.variant_target("Post", RelationVariant::OptionalDefaults), "Post");
        assert_eq!(dmmf.variant_target("Post", RelationVariant::Partial), "PostPartial");
    }

    #[test]
    fn test_unknown_field_type_fails_derivation() {
        let mut doc = document();
        doc.datamodel.models[1].fields.push(scalar("shape", "Geometry"));
        assert!(matches!(
            ExtendedDmmf::new(&doc, &Config::default()),
            Err(GeneratorError::UnknownFieldType { .. })
        ));
    }
}
