//! Extended views over the generated schema: input objects, output objects,
//! root operations and schema enums

use super::model::ExtendedModel;
use super::NameIndex;
use crate::config::Config;
use crate::dmmf::{InputType, Location, OutputType, SchemaArg, SchemaEnum, TypeRef};
use crate::types::{InputScalar, ScalarKind};
use crate::GeneratorError;

/// One permitted shape of an argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputShape {
    /// A scalar value
    Scalar(ScalarKind),
    /// The literal `true`
    True,
    /// Another input object type
    InputObject(String),
    /// A schema or datamodel enum
    Enum(String),
}

/// A filtered input type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTypeRef {
    /// Shape of the value
    pub shape: InputShape,
    /// Reference is a list
    pub is_list: bool,
}

/// An argument of an input object or an operation
#[derive(Debug, Clone)]
pub struct ExtendedArg {
    /// Argument name
    pub name: String,
    /// Argument must be supplied
    pub is_required: bool,
    /// Argument accepts `null`
    pub is_nullable: bool,
    /// Permitted shapes, field references and `Null` removed
    pub input_types: Vec<InputTypeRef>,
    /// Argument belongs to a model field omitted from inputs
    pub omit: bool,
}

impl ExtendedArg {
    /// Build an argument, returning `None` when no shape survives filtering
    pub(crate) fn new(owner: &str, arg: &SchemaArg) -> Result<Option<Self>, GeneratorError> {
        let mut input_types = Vec::new();

        for type_ref in &arg.input_types {
            if let Some(filtered) = filter_input_type(owner, &arg.name, type_ref)? {
                input_types.push(filtered);
            }
        }

        if input_types.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            name: arg.name.clone(),
            is_required: arg.is_required,
            is_nullable: arg.is_nullable,
            input_types,
            omit: false,
        }))
    }

    /// More than one shape is permitted
    pub fn has_multiple_types(&self) -> bool {
        self.input_types.len() > 1
    }
}

fn filter_input_type(
    owner: &str,
    arg_name: &str,
    type_ref: &TypeRef,
) -> Result<Option<InputTypeRef>, GeneratorError> {
    let shape = match type_ref.location {
        Location::FieldRefTypes | Location::OutputObjectTypes => return Ok(None),
        Location::InputObjectTypes => InputShape::InputObject(type_ref.type_name.clone()),
        Location::EnumTypes => InputShape::Enum(type_ref.type_name.clone()),
        Location::Scalar => match InputScalar::from_name(&type_ref.type_name) {
            Some(InputScalar::Null) => return Ok(None),
            Some(InputScalar::True) => InputShape::True,
            Some(InputScalar::Kind(kind)) => InputShape::Scalar(kind),
            None => {
                return Err(GeneratorError::UnknownFieldType {
                    entity: owner.to_string(),
                    field: arg_name.to_string(),
                    type_name: type_ref.type_name.clone(),
                })
            }
        },
    };

    Ok(Some(InputTypeRef {
        shape,
        is_list: type_ref.is_list,
    }))
}

/// An input object type
#[derive(Debug, Clone)]
pub struct ExtendedInputType {
    /// Type name
    pub name: String,
    /// Arguments in order
    pub fields: Vec<ExtendedArg>,
}

impl ExtendedInputType {
    pub(crate) fn new(input: &InputType, models: &[ExtendedModel]) -> Result<Self, GeneratorError> {
        let mut fields = Vec::with_capacity(input.fields.len());
        for arg in &input.fields {
            if let Some(extended) = ExtendedArg::new(&input.name, arg)? {
                fields.push(extended);
            }
        }

        if let Some(model) = writing_model(&input.name, models) {
            for field in &mut fields {
                field.omit = model.field(&field.name).is_some_and(|f| f.omit_in_input());
            }
        }

        Ok(Self {
            name: input.name.clone(),
            fields,
        })
    }
}

/// The model a create or update input writes to, by longest name prefix
fn writing_model<'a>(input_name: &str, models: &'a [ExtendedModel]) -> Option<&'a ExtendedModel> {
    models
        .iter()
        .filter(|model| {
            input_name.strip_prefix(model.name.as_str()).is_some_and(|rest| {
                ["Create", "Update", "UncheckedCreate", "UncheckedUpdate"]
                    .iter()
                    .any(|action| rest.starts_with(action))
            })
        })
        .max_by_key(|model| model.name.len())
}

/// How a field appears in a select or include schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectShape {
    /// `z.boolean().optional()`
    Flag,
    /// Boolean or find-many arguments of the target model
    FindManyArgs(String),
    /// Boolean or default arguments of the target type
    Args(String),
}

/// A field of a model output type
#[derive(Debug, Clone)]
pub struct ExtendedOutputField {
    /// Field name
    pub name: String,
    /// Referenced type name
    pub type_name: String,
    /// Where the referenced type lives
    pub location: Location,
    /// Field is a list
    pub is_list: bool,
    /// Shape in select and include schemas
    pub select: SelectShape,
    /// Field points at a model and may be included
    pub is_includable: bool,
}

impl ExtendedOutputField {
    /// Field is an object
    pub fn is_object_output_type(&self) -> bool {
        self.location == Location::OutputObjectTypes
    }

    /// Field is a list
    pub fn is_list_output_type(&self) -> bool {
        self.is_list
    }

    /// Field is the `_count` aggregate
    pub fn is_count_field(&self) -> bool {
        self.name == "_count"
    }
}

/// Output type of a model or composite type
#[derive(Debug, Clone)]
pub struct ExtendedOutputType {
    /// Type name, equal to the model name
    pub name: String,
    /// Fields in order
    pub fields: Vec<ExtendedOutputField>,
    /// Type has a `_count` field
    pub has_count_field: bool,
    /// Type has fields pointing at models
    pub has_relation_fields: bool,
}

impl ExtendedOutputType {
    pub(crate) fn new(output: &OutputType, names: &NameIndex, config: &Config) -> Self {
        let fields: Vec<ExtendedOutputField> = output
            .fields
            .iter()
            .map(|field| {
                let type_ref = &field.output_type;
                let is_object = type_ref.location == Location::OutputObjectTypes;
                let is_count = field.name == "_count";
                let targets_model = is_object && names.is_model(&type_ref.type_name);

                let select = if !is_object {
                    SelectShape::Flag
                } else if is_count {
                    SelectShape::Args(format!("{}CountOutputType", output.name))
                } else if type_ref.is_list && targets_model && config.list_relation_find_many_args {
                    SelectShape::FindManyArgs(type_ref.type_name.clone())
                } else {
                    SelectShape::Args(type_ref.type_name.clone())
                };

                ExtendedOutputField {
                    name: field.name.clone(),
                    type_name: type_ref.type_name.clone(),
                    location: type_ref.location,
                    is_list: type_ref.is_list,
                    select,
                    is_includable: targets_model || (is_object && is_count),
                }
            })
            .collect();

        Self {
            name: output.name.clone(),
            has_count_field: fields.iter().any(ExtendedOutputField::is_count_field),
            has_relation_fields: fields
                .iter()
                .any(|f| f.is_includable && !f.is_count_field()),
            fields,
        }
    }

    /// Fields listed in the include schema
    pub fn include_fields(&self) -> impl Iterator<Item = &ExtendedOutputField> {
        self.fields.iter().filter(|f| f.is_includable)
    }
}

/// Action of a root operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `findUnique`
    FindUnique,
    /// `findUniqueOrThrow`
    FindUniqueOrThrow,
    /// `findFirst`
    FindFirst,
    /// `findFirstOrThrow`
    FindFirstOrThrow,
    /// `findMany`
    FindMany,
    /// `createOne`
    Create,
    /// `createMany`
    CreateMany,
    /// `createManyAndReturn`
    CreateManyAndReturn,
    /// `upsertOne`
    Upsert,
    /// `deleteOne`
    Delete,
    /// `deleteMany`
    DeleteMany,
    /// `updateOne`
    Update,
    /// `updateMany`
    UpdateMany,
    /// `updateManyAndReturn`
    UpdateManyAndReturn,
    /// `aggregate`
    Aggregate,
    /// `groupBy`
    GroupBy,
}

const ACTION_PREFIXES: &[(&str, Action)] = &[
    ("findUnique", Action::FindUnique),
    ("findFirst", Action::FindFirst),
    ("findMany", Action::FindMany),
    ("createOne", Action::Create),
    ("createMany", Action::CreateMany),
    ("upsertOne", Action::Upsert),
    ("deleteOne", Action::Delete),
    ("deleteMany", Action::DeleteMany),
    ("updateOne", Action::Update),
    ("updateMany", Action::UpdateMany),
    ("aggregate", Action::Aggregate),
    ("groupBy", Action::GroupBy),
];

impl Action {
    /// Name used in argument type names, e.g. `FindUniqueOrThrow`
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::FindUnique => "FindUnique",
            Action::FindUniqueOrThrow => "FindUniqueOrThrow",
            Action::FindFirst => "FindFirst",
            Action::FindFirstOrThrow => "FindFirstOrThrow",
            Action::FindMany => "FindMany",
            Action::Create => "Create",
            Action::CreateMany => "CreateMany",
            Action::CreateManyAndReturn => "CreateManyAndReturn",
            Action::Upsert => "Upsert",
            Action::Delete => "Delete",
            Action::DeleteMany => "DeleteMany",
            Action::Update => "Update",
            Action::UpdateMany => "UpdateMany",
            Action::UpdateManyAndReturn => "UpdateManyAndReturn",
            Action::Aggregate => "Aggregate",
            Action::GroupBy => "GroupBy",
        }
    }

    fn with_suffix(self, suffix: &str) -> Option<Self> {
        match (self, suffix) {
            (Action::FindUnique, "OrThrow") => Some(Action::FindUniqueOrThrow),
            (Action::FindFirst, "OrThrow") => Some(Action::FindFirstOrThrow),
            (Action::CreateMany, "AndReturn") => Some(Action::CreateManyAndReturn),
            (Action::UpdateMany, "AndReturn") => Some(Action::UpdateManyAndReturn),
            _ => None,
        }
    }

    /// The operation returns model records that can be shaped with `select`
    pub fn returns_records(&self) -> bool {
        !matches!(
            self,
            Action::Aggregate
                | Action::GroupBy
                | Action::CreateMany
                | Action::CreateManyAndReturn
                | Action::UpdateMany
                | Action::UpdateManyAndReturn
                | Action::DeleteMany
        )
    }
}

/// Split `findUniqueUserOrThrow` into its action and model name
pub(crate) fn parse_operation_name(name: &str, names: &NameIndex) -> Option<(Action, String)> {
    for (prefix, action) in ACTION_PREFIXES {
        let Some(rest) = name.strip_prefix(prefix) else {
            continue;
        };

        if names.is_model(rest) {
            return Some((*action, rest.to_string()));
        }

        for suffix in ["OrThrow", "AndReturn"] {
            if let Some(model) = rest.strip_suffix(suffix) {
                if names.is_model(model) {
                    if let Some(action) = action.with_suffix(suffix) {
                        return Some((action, model.to_string()));
                    }
                }
            }
        }
    }

    None
}

/// A root query or mutation mapped to a model
#[derive(Debug, Clone)]
pub struct ExtendedOperation {
    /// Root field name, e.g. `findUniqueUserOrThrow`
    pub name: String,
    /// Target model
    pub model_name: String,
    /// Action
    pub action: Action,
    /// Argument type name, e.g. `UserFindUniqueOrThrowArgs`
    pub arg_name: String,
    /// Arguments in order
    pub args: Vec<ExtendedArg>,
    /// A `select` argument is written
    pub write_select: bool,
    /// An `include` argument is written
    pub write_include: bool,
}

impl ExtendedOperation {
    pub(crate) fn new(
        name: &str,
        args: &[SchemaArg],
        names: &NameIndex,
        output_types: &[ExtendedOutputType],
        config: &Config,
    ) -> Result<Option<Self>, GeneratorError> {
        let Some((action, model_name)) = parse_operation_name(name, names) else {
            return Ok(None);
        };

        let arg_name = format!("{}{}Args", model_name, action.type_name());

        let mut extended_args = Vec::with_capacity(args.len());
        for arg in args {
            if let Some(extended) = ExtendedArg::new(&arg_name, arg)? {
                extended_args.push(extended);
            }
        }

        let write_select = config.writes_select() && action.returns_records();
        let write_include = write_select
            && config.writes_include()
            && output_types
                .iter()
                .any(|t| t.name == model_name && t.has_relation_fields);

        Ok(Some(Self {
            name: name.to_string(),
            model_name,
            action,
            arg_name,
            args: extended_args,
            write_select,
            write_include,
        }))
    }
}

/// JSON-null sentinels a schema enum value maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// `JsonNull`
    JsonNull,
    /// `DbNull`
    DbNull,
    /// `AnyNull`
    AnyNull,
}

impl Sentinel {
    /// Bare sentinel name
    pub fn name(&self) -> &'static str {
        match self {
            Sentinel::JsonNull => "JsonNull",
            Sentinel::DbNull => "DbNull",
            Sentinel::AnyNull => "AnyNull",
        }
    }
}

/// Schema enums whose values are rewritten to sentinels
pub const NULLABLE_JSON_ENUMS: &[&str] = &[
    "JsonNullValueInput",
    "NullableJsonNullValueInput",
    "JsonNullValueFilter",
];

/// An enum of the generated schema
#[derive(Debug, Clone)]
pub struct ExtendedSchemaEnum {
    /// Enum name
    pub name: String,
    /// Values in order
    pub values: Vec<String>,
    /// Values are rewritten to JSON-null sentinels
    pub rewrites_json_nulls: bool,
}

impl ExtendedSchemaEnum {
    pub(crate) fn new(schema_enum: &SchemaEnum) -> Self {
        Self {
            name: schema_enum.name.clone(),
            values: schema_enum.values.clone(),
            rewrites_json_nulls: NULLABLE_JSON_ENUMS.contains(&schema_enum.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmmf::SchemaField;

    fn names() -> NameIndex {
        NameIndex::from_parts(&["User", "Post", "UserProfile"], &["Role"], &["Address"])
    }

    fn type_ref(type_name: &str, location: Location, is_list: bool) -> TypeRef {
        TypeRef {
            type_name: type_name.to_string(),
            location,
            is_list,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_operation_names() {
        let names = names();
        assert_eq!(
            parse_operation_name("findUniqueUserOrThrow", &names),
            Some((Action::FindUniqueOrThrow, "User".to_string()))
        );
        assert_eq!(
            parse_operation_name("createOnePost", &names),
            Some((Action::Create, "Post".to_string()))
        );
        assert_eq!(
            parse_operation_name("createManyUserProfileAndReturn", &names),
            Some((Action::CreateManyAndReturn, "UserProfile".to_string()))
        );
        assert_eq!(
            parse_operation_name("findUniqueUserProfile", &names),
            Some((Action::FindUnique, "UserProfile".to_string()))
        );
        assert_eq!(parse_operation_name("executeRaw", &names), None);
        assert_eq!(parse_operation_name("findManyTeam", &names), None);
    }

    #[test]
    fn test_operation_flags() {
        let names = names();
        let output = OutputType {
            name: "User".to_string(),
            fields: vec![SchemaField {
                name: "posts".to_string(),
                output_type: type_ref("Post", Location::OutputObjectTypes, true),
                ..Default::default()
            }],
        };
        let config = Config::default();
        let outputs = vec![ExtendedOutputType::new(&output, &names, &config)];

        let find = ExtendedOperation::new("findManyUser", &[], &names, &outputs, &config)
            .unwrap()
            .unwrap();
        assert_eq!(find.arg_name, "UserFindManyArgs");
        assert!(find.write_select);
        assert!(find.write_include);

        let aggregate = ExtendedOperation::new("aggregateUser", &[], &names, &outputs, &config)
            .unwrap()
            .unwrap();
        assert_eq!(aggregate.arg_name, "UserAggregateArgs");
        assert!(!aggregate.write_select);
        assert!(!aggregate.write_include);

        let post = ExtendedOperation::new("deleteOnePost", &[], &names, &outputs, &config)
            .unwrap()
            .unwrap();
        assert_eq!(post.arg_name, "PostDeleteArgs");
        assert!(post.write_select);
        assert!(!post.write_include);
    }

    #[test]
    fn test_arg_filtering() {
        let arg = SchemaArg {
            name: "name".to_string(),
            is_required: false,
            is_nullable: true,
            input_types: vec![
                type_ref("String", Location::Scalar, false),
                type_ref("StringFieldRefInput", Location::FieldRefTypes, false),
                type_ref("Null", Location::Scalar, false),
            ],
        };
        let extended = ExtendedArg::new("UserWhereInput", &arg).unwrap().unwrap();
        assert_eq!(extended.input_types.len(), 1);
        assert!(!extended.has_multiple_types());
        assert_eq!(extended.input_types[0].shape, InputShape::Scalar(ScalarKind::String));
    }

    #[test]
    fn test_arg_with_only_null_is_dropped() {
        let arg = SchemaArg {
            name: "nothing".to_string(),
            input_types: vec![type_ref("Null", Location::Scalar, false)],
            ..Default::default()
        };
        assert!(ExtendedArg::new("X", &arg).unwrap().is_none());
    }

    #[test]
    fn test_unknown_input_scalar_is_fatal() {
        let arg = SchemaArg {
            name: "geo".to_string(),
            input_types: vec![type_ref("Geometry", Location::Scalar, false)],
            ..Default::default()
        };
        assert!(matches!(
            ExtendedArg::new("X", &arg),
            Err(GeneratorError::UnknownFieldType { .. })
        ));
    }

    #[test]
    fn test_output_select_shapes() {
        let output = OutputType {
            name: "User".to_string(),
            fields: vec![
                SchemaField {
                    name: "id".to_string(),
                    output_type: type_ref("Int", Location::Scalar, false),
                    ..Default::default()
                },
                SchemaField {
                    name: "posts".to_string(),
                    output_type: type_ref("Post", Location::OutputObjectTypes, true),
                    ..Default::default()
                },
                SchemaField {
                    name: "address".to_string(),
                    output_type: type_ref("Address", Location::OutputObjectTypes, false),
                    ..Default::default()
                },
                SchemaField {
                    name: "_count".to_string(),
                    output_type: type_ref("UserCountOutputType", Location::OutputObjectTypes, false),
                    ..Default::default()
                },
            ],
        };

        let extended = ExtendedOutputType::new(&output, &names(), &Config::default());
        assert_eq!(extended.fields[0].select, SelectShape::Flag);
        assert_eq!(extended.fields[1].select, SelectShape::FindManyArgs("Post".to_string()));
        assert_eq!(extended.fields[2].select, SelectShape::Args("Address".to_string()));
        assert_eq!(
            extended.fields[3].select,
            SelectShape::Args("UserCountOutputType".to_string())
        );
        assert!(extended.has_count_field);
        assert!(extended.has_relation_fields);
        let include: Vec<_> = extended.include_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(include, vec!["posts", "_count"]);

        let config = Config {
            list_relation_find_many_args: false,
            ..Config::default()
        };
        let fallback = ExtendedOutputType::new(&output, &names(), &config);
        assert_eq!(fallback.fields[1].select, SelectShape::Args("Post".to_string()));
    }

    #[test]
    fn test_nullable_json_enums() {
        let schema_enum = SchemaEnum {
            name: "NullableJsonNullValueInput".to_string(),
            values: vec!["DbNull".to_string(), "JsonNull".to_string()],
        };
        assert!(ExtendedSchemaEnum::new(&schema_enum).rewrites_json_nulls);
        let plain = SchemaEnum {
            name: "SortOrder".to_string(),
            values: vec!["asc".to_string(), "desc".to_string()],
        };
        assert!(!ExtendedSchemaEnum::new(&plain).rewrites_json_nulls);
    }
}
