//! Scalar and enum field lines of model schemas
//!
//! A field line is the base expression followed by additions in a fixed
//! order: list, optional, nullable, default.

use super::{helper, helpers, input_schema, Context};
use crate::extended::{ExtendedField, FieldClass, RelationVariant};
use crate::types::ScalarKind;
use crate::writer::FileWriter;

/// Which declaration a field line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// The base model schema
    Plain,
    /// The optional-defaults schema
    OptionalDefaults,
    /// A partial schema
    Partial,
}

/// Write one `name: expression,` line for a scalar or enum field
pub fn write_model_field(ctx: &Context<'_>, w: &mut FileWriter, field: &ExtendedField, mode: FieldMode) {
    let base = base_expression(ctx, w, field);
    let additions = additions(ctx, field, mode);

    w.conditional_write(field.omit_in_model(), "// omitted: ")
        .write(&format!("{}: {}{},", field.name, base, additions))
        .new_line();
}

fn base_expression(ctx: &Context<'_>, w: &mut FileWriter, field: &ExtendedField) -> String {
    match field.class {
        FieldClass::Scalar(ScalarKind::Json) if is_nullable_json(field) => {
            helper(w, helpers::NULLABLE_JSON_VALUE_FILE, "NullableJsonValue")
        }
        FieldClass::Scalar(ScalarKind::Json) => {
            helper(w, helpers::JSON_VALUE_FILE, "JsonValueSchema")
        }
        FieldClass::Scalar(ScalarKind::Decimal) => {
            helper(w, helpers::DECIMAL_JS_LIKE_FILE, "DecimalJsLikeSchema")
        }
        FieldClass::Scalar(kind) => {
            let error = field.error_object();
            let mut expression = kind
                .primitive(ctx.config.coerce_date)
                .map(|p| p.render(error.as_deref()))
                .unwrap_or_default();
            for validator in &field.directives.validators {
                expression.push_str(validator);
            }
            expression
        }
        FieldClass::Enum => input_schema(w, &field.type_name),
        FieldClass::Relation | FieldClass::Composite => {
            super::relation::target_schema(ctx, w, field, RelationVariant::Base)
        }
    }
}

/// Optional JSON is written as `NullableJsonValue.optional()`
fn is_nullable_json(field: &ExtendedField) -> bool {
    field.is_json() && !field.is_required && !field.is_list
}

fn additions(ctx: &Context<'_>, field: &ExtendedField, mode: FieldMode) -> String {
    let mut out = String::new();

    if field.is_list {
        out.push_str(".array()");
    }

    let optional = match mode {
        FieldMode::Plain => false,
        FieldMode::OptionalDefaults => field.is_optional_default_field,
        FieldMode::Partial => true,
    };
    if optional || is_nullable_json(field) {
        out.push_str(".optional()");
    }

    // NullableJsonValue already accepts null
    if !field.is_required && !is_nullable_json(field) {
        if ctx.config.write_nullish_in_model_types {
            out.push_str(".nullish()");
        } else {
            out.push_str(".nullable()");
        }
    }

    if mode == FieldMode::OptionalDefaults {
        if let Some(literal) = &field.default_literal {
            out.push_str(&format!(".default({})", literal));
        }
    }

    out
}
