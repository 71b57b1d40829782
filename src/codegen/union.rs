//! Argument lines of input objects and operation arguments
//!
//! An argument permits one or more input shapes. Shapes are written through
//! three branches: plain scalars, references to other schemas, and the
//! special JSON and Decimal scalars that need helper schemas.

use super::{helper, helpers, input_schema, lazy, Context};
use crate::extended::{ExtendedArg, InputShape, InputTypeRef};
use crate::surface::Construct;
use crate::types::ScalarKind;
use crate::writer::FileWriter;

/// Write `name: expression.optional().nullable(),`
///
/// Several shapes become `z.union([ ... ])`; a single shape is written bare.
/// Optional and nullable apply to the whole argument. `deferred` wraps schema
/// references in `z.lazy`.
pub fn write_arg(ctx: &Context<'_>, w: &mut FileWriter, arg: &ExtendedArg, deferred: bool) {
    let expression = if arg.has_multiple_types() {
        let branches: Vec<String> = arg
            .input_types
            .iter()
            .map(|input_type| input_type_expression(ctx, w, input_type, deferred))
            .collect();
        format!("z.union([ {} ])", branches.join(", "))
    } else {
        arg.input_types
            .first()
            .map(|input_type| input_type_expression(ctx, w, input_type, deferred))
            .unwrap_or_default()
    };

    w.conditional_write(arg.omit, "// omitted: ")
        .write(&format!("{}: {}", arg.name, expression))
        .conditional_write(!arg.is_required, ".optional()")
        .conditional_write(arg.is_nullable, ".nullable()")
        .write(",")
        .new_line();
}

/// Expression of a single input shape, including `.array()` for lists
pub fn input_type_expression(
    ctx: &Context<'_>,
    w: &mut FileWriter,
    input_type: &InputTypeRef,
    deferred: bool,
) -> String {
    let base = match &input_type.shape {
        InputShape::Scalar(ScalarKind::Decimal) => {
            return decimal_expression(ctx, w, input_type.is_list);
        }
        InputShape::Scalar(ScalarKind::Json) => {
            helper(w, helpers::INPUT_JSON_VALUE_FILE, "InputJsonValueSchema")
        }
        InputShape::Scalar(kind) => scalar_expression(ctx, *kind),
        InputShape::True => "z.literal(true)".to_string(),
        InputShape::InputObject(name) | InputShape::Enum(name) => {
            let schema = input_schema(w, name);
            if deferred {
                lazy(&schema)
            } else {
                schema
            }
        }
    };

    if input_type.is_list {
        format!("{}.array()", base)
    } else {
        base
    }
}

fn scalar_expression(ctx: &Context<'_>, kind: ScalarKind) -> String {
    kind.primitive(ctx.config.coerce_date)
        .map(|primitive| primitive.render(None))
        .unwrap_or_default()
}

/// Decimal input accepts numbers, strings, Decimal instances and look-alikes
fn decimal_expression(ctx: &Context<'_>, w: &mut FileWriter, is_list: bool) -> String {
    let decimal = ctx.surface_name(w, Construct::DecimalClass);
    let is_valid = helper(w, helpers::IS_VALID_DECIMAL_INPUT_FILE, "isValidDecimalInput");

    if is_list {
        let list = helper(w, helpers::DECIMAL_JS_LIKE_FILE, "DecimalJsLikeListSchema");
        format!(
            "z.union([ z.number().array(), z.string().array(), z.instanceof({decimal}).array(), {list} ])\
             .refine((v) => Array.isArray(v) && (v as any[]).every((v) => {is_valid}(v)), {{ message: 'Must be a Decimal' }})"
        )
    } else {
        let like = helper(w, helpers::DECIMAL_JS_LIKE_FILE, "DecimalJsLikeSchema");
        format!(
            "z.union([ z.number(), z.string(), z.instanceof({decimal}), {like} ])\
             .refine((v) => {is_valid}(v), {{ message: 'Must be a Decimal' }})"
        )
    }
}
