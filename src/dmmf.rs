//! Schema Document (DMMF) structs for serde deserialization.
//!
//! This is the read-only metamodel handed to the generator: the datamodel
//! (models, enums, composite types) and the generated schema of input and
//! output object shapes. Only the subset the generator reads is modelled;
//! unknown keys are ignored.

use serde::Deserialize;

/// Root of the metamodel
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Declared models, enums and composite types
    pub datamodel: Datamodel,
    /// Generated input/output object shapes
    #[serde(default)]
    pub schema: Schema,
}

/// The user-declared part of the metamodel
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Datamodel {
    /// Database-backed models
    #[serde(default)]
    pub models: Vec<Model>,
    /// Declared enums
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
    /// Composite (embedded) types
    #[serde(default)]
    pub types: Vec<Model>,
}

/// A model or composite type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Model name as declared
    pub name: String,
    /// Mapped database name
    #[serde(default)]
    pub db_name: Option<String>,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Triple-slash documentation, directive lines included
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Field kind as reported by the metamodel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Scalar column
    #[default]
    Scalar,
    /// Relation or composite reference
    Object,
    /// Enum column
    Enum,
    /// `Unsupported("...")` column
    Unsupported,
}

/// A model or composite type field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name
    pub name: String,
    /// Kind of the field
    #[serde(default)]
    pub kind: FieldKind,
    /// Scalar type name or referenced model/enum/type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Field is a list
    #[serde(default)]
    pub is_list: bool,
    /// Field is required (non-optional)
    #[serde(default)]
    pub is_required: bool,
    /// Field is the id
    #[serde(default)]
    pub is_id: bool,
    /// Field carries a unique constraint
    #[serde(default)]
    pub is_unique: bool,
    /// Field is read-only (foreign key scalar)
    #[serde(default)]
    pub is_read_only: bool,
    /// Field is generated
    #[serde(default)]
    pub is_generated: bool,
    /// Field is `@updatedAt`
    #[serde(default)]
    pub is_updated_at: bool,
    /// Field has a default value
    #[serde(default)]
    pub has_default_value: bool,
    /// Static value or `{ name, args }` function default
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    /// Name of the relation for object fields
    #[serde(default)]
    pub relation_name: Option<String>,
    /// Triple-slash documentation, directive lines included
    #[serde(default)]
    pub documentation: Option<String>,
}

/// An enum declared in the datamodel
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    /// Enum name
    pub name: String,
    /// Values in declaration order
    #[serde(default)]
    pub values: Vec<EnumValue>,
    /// Triple-slash documentation
    #[serde(default)]
    pub documentation: Option<String>,
}

/// A single datamodel enum value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// Value name
    pub name: String,
    /// Mapped database name
    #[serde(default)]
    pub db_name: Option<String>,
}

/// Generated schema of input and output object shapes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Input object types
    #[serde(default)]
    pub input_object_types: Namespaced<InputType>,
    /// Output object types
    #[serde(default)]
    pub output_object_types: Namespaced<OutputType>,
    /// Enum types
    #[serde(default)]
    pub enum_types: Namespaced<SchemaEnum>,
}

/// Items split into the `prisma` and `model` namespaces
#[derive(Debug, Clone, Deserialize)]
pub struct Namespaced<T> {
    /// Client namespace items
    #[serde(default = "Vec::new")]
    pub prisma: Vec<T>,
    /// Model namespace items
    #[serde(default = "Vec::new")]
    pub model: Vec<T>,
}

impl<T> Default for Namespaced<T> {
    fn default() -> Self {
        Self {
            prisma: Vec::new(),
            model: Vec::new(),
        }
    }
}

impl<T> Namespaced<T> {
    /// Iterate the client namespace first, then the model namespace
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.prisma.iter().chain(self.model.iter())
    }
}

/// An input object type such as `UserWhereInput`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputType {
    /// Type name
    pub name: String,
    /// Fields (arguments) of the input object
    #[serde(default)]
    pub fields: Vec<SchemaArg>,
}

/// An argument of an input object or an operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaArg {
    /// Argument name
    pub name: String,
    /// Argument must be supplied
    #[serde(default)]
    pub is_required: bool,
    /// Argument accepts `null`
    #[serde(default)]
    pub is_nullable: bool,
    /// Permitted input shapes
    #[serde(default)]
    pub input_types: Vec<TypeRef>,
}

/// Where a referenced type is defined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    /// Built-in scalar
    #[default]
    Scalar,
    /// Input object type
    InputObjectTypes,
    /// Output object type
    OutputObjectTypes,
    /// Enum type
    EnumTypes,
    /// Field reference type
    FieldRefTypes,
}

/// A reference to a type from an argument or an output field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Referenced type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Namespace of the referenced type
    #[serde(default)]
    pub namespace: Option<String>,
    /// Location of the referenced type
    #[serde(default)]
    pub location: Location,
    /// Reference is a list
    #[serde(default)]
    pub is_list: bool,
}

/// An output object type such as `User` or `Query`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputType {
    /// Type name
    pub name: String,
    /// Fields of the output object
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

/// A field of an output object type
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// Field may be `null`
    #[serde(default)]
    pub is_nullable: bool,
    /// Type of the field
    pub output_type: TypeRef,
    /// Arguments accepted by the field
    #[serde(default)]
    pub args: Vec<SchemaArg>,
}

/// An enum of the generated schema such as `SortOrder`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaEnum {
    /// Enum name
    pub name: String,
    /// Values in order
    #[serde(default)]
    pub values: Vec<String>,
}
