//! Auxiliary schemas shared by generated declarations
//!
//! JSON helpers are written only when the metamodel contains JSON values,
//! Decimal helpers only when it contains Decimal values, and `ru` only in
//! strict-optional mode. Library type names come from the surface resolver.

use super::{helper, Context};
use crate::extended::Sentinel;
use crate::surface::Construct;
use crate::writer::FileWriter;

/// File exporting `transformJsonNull` and `NullableJsonInput`
pub const TRANSFORM_JSON_NULL_FILE: &str = "transformJsonNull";
/// File exporting `JsonValueSchema` and `JsonValueType`
pub const JSON_VALUE_FILE: &str = "JsonValueSchema";
/// File exporting `NullableJsonValue`
pub const NULLABLE_JSON_VALUE_FILE: &str = "NullableJsonValue";
/// File exporting `InputJsonValueSchema`
pub const INPUT_JSON_VALUE_FILE: &str = "InputJsonValueSchema";
/// File exporting `DecimalJsLikeSchema` and `DecimalJsLikeListSchema`
pub const DECIMAL_JS_LIKE_FILE: &str = "DecimalJsLikeSchema";
/// File exporting `DECIMAL_STRING_REGEX` and `isValidDecimalInput`
pub const IS_VALID_DECIMAL_INPUT_FILE: &str = "isValidDecimalInput";
/// File exporting `ru`
pub const RU_FILE: &str = "ru";

/// A helper file and its primary export
#[derive(Debug, Clone, Copy)]
pub struct HelperUnit {
    /// File stem
    pub file: &'static str,
    /// Default export
    pub primary: &'static str,
    /// Content writer
    pub write: fn(&Context<'_>, &mut FileWriter),
}

/// Helpers needed by this run, in declaration order
pub fn helper_units(ctx: &Context<'_>) -> Vec<HelperUnit> {
    let mut units = Vec::new();

    if ctx.config.strict_optional_properties {
        units.push(HelperUnit {
            file: RU_FILE,
            primary: "ru",
            write: write_ru,
        });
    }

    if ctx.dmmf.has_json_types {
        units.push(HelperUnit {
            file: TRANSFORM_JSON_NULL_FILE,
            primary: "transformJsonNull",
            write: write_transform_json_null,
        });
        units.push(HelperUnit {
            file: JSON_VALUE_FILE,
            primary: "JsonValueSchema",
            write: write_json_value,
        });
        units.push(HelperUnit {
            file: NULLABLE_JSON_VALUE_FILE,
            primary: "NullableJsonValue",
            write: write_nullable_json_value,
        });
        units.push(HelperUnit {
            file: INPUT_JSON_VALUE_FILE,
            primary: "InputJsonValueSchema",
            write: write_input_json_value,
        });
    }

    if ctx.dmmf.has_decimal_types {
        units.push(HelperUnit {
            file: DECIMAL_JS_LIKE_FILE,
            primary: "DecimalJsLikeSchema",
            write: write_decimal_js_like,
        });
        units.push(HelperUnit {
            file: IS_VALID_DECIMAL_INPUT_FILE,
            primary: "isValidDecimalInput",
            write: write_is_valid_decimal_input,
        });
    }

    units
}

/// `ru`: strips `undefined` members so optional properties stay absent
pub fn write_ru(_ctx: &Context<'_>, w: &mut FileWriter) {
    w.blank_line()
        .write_line("export type RemoveUndefined<T> = { [K in keyof T]: Exclude<T[K], undefined> };")
        .blank_line()
        .write_line("export const ru = <T extends object>(value: T): RemoveUndefined<T> =>")
        .with_indentation_level(1, |w| {
            w.write_line(
                "Object.fromEntries(Object.entries(value).filter(([, v]) => v !== undefined)) as RemoveUndefined<T>;",
            );
        });
}

/// `NullableJsonInput` and `transformJsonNull`
pub fn write_transform_json_null(ctx: &Context<'_>, w: &mut FileWriter) {
    let json_value = ctx.surface_name(w, Construct::JsonValue);
    let db_null = ctx.surface_name(w, Construct::Sentinel(Sentinel::DbNull));
    let json_null = ctx.surface_name(w, Construct::Sentinel(Sentinel::JsonNull));

    w.blank_line()
        .write(&format!(
            "export type NullableJsonInput = {} | null | 'JsonNull' | 'DbNull' | typeof {} | typeof {};",
            json_value, db_null, json_null
        ))
        .blank_line()
        .write("export const transformJsonNull = (v?: NullableJsonInput) => ")
        .inline_block(|w| {
            w.write_line(&format!("if (!v || v === 'DbNull') return {};", db_null))
                .write_line(&format!("if (v === 'JsonNull') return {};", json_null))
                .write_line("return v;");
        })
        .write(";")
        .new_line();
}

/// `JsonValueSchema` and `JsonValueType`
pub fn write_json_value(ctx: &Context<'_>, w: &mut FileWriter) {
    let json_value = ctx.surface_name(w, Construct::JsonValue);

    w.blank_line()
        .write_line(&format!(
            "export const JsonValueSchema: z.ZodType<{}> = z.lazy(() =>",
            json_value
        ))
        .with_indentation_level(1, |w| {
            w.write_line("z.union([")
                .with_indentation_level(2, |w| {
                    w.write_line("z.string(),")
                        .write_line("z.number(),")
                        .write_line("z.boolean(),")
                        .write_line("z.literal(null),")
                        .write_line("z.record(z.string(), z.lazy(() => JsonValueSchema.optional())),")
                        .write_line("z.array(z.lazy(() => JsonValueSchema)),");
                })
                .write_line("])");
        })
        .write_line(");")
        .blank_line()
        .write_line("export type JsonValueType = z.infer<typeof JsonValueSchema>;");
}

/// `NullableJsonValue`: JSON or a null marker, transformed to a sentinel
pub fn write_nullable_json_value(_ctx: &Context<'_>, w: &mut FileWriter) {
    let json_value = helper(w, JSON_VALUE_FILE, "JsonValueSchema");
    let transform = helper(w, TRANSFORM_JSON_NULL_FILE, "transformJsonNull");

    w.blank_line()
        .write_line("export const NullableJsonValue = z")
        .with_indentation_level(1, |w| {
            w.write_line(&format!(
                ".union([{}, z.literal('DbNull'), z.literal('JsonNull')])",
                json_value
            ))
            .write_line(".nullable()")
            .write_line(&format!(".transform((v) => {}(v));", transform));
        })
        .blank_line()
        .write_line("export type NullableJsonValueType = z.infer<typeof NullableJsonValue>;");
}

/// `InputJsonValueSchema` and `InputJsonValueType`
pub fn write_input_json_value(ctx: &Context<'_>, w: &mut FileWriter) {
    let input_json_value = ctx.surface_name(w, Construct::InputJsonValue);

    w.blank_line()
        .write_line(&format!(
            "export const InputJsonValueSchema: z.ZodType<{}> = z.lazy(() =>",
            input_json_value
        ))
        .with_indentation_level(1, |w| {
            w.write_line("z.union([")
                .with_indentation_level(2, |w| {
                    w.write_line("z.string(),")
                        .write_line("z.number(),")
                        .write_line("z.boolean(),")
                        .write_line("z.object({ toJSON: z.any() }),")
                        .write_line(
                            "z.record(z.string(), z.lazy(() => z.union([InputJsonValueSchema, z.literal(null)]))),",
                        )
                        .write_line(
                            "z.array(z.lazy(() => z.union([InputJsonValueSchema, z.literal(null)]))),",
                        );
                })
                .write_line("])");
        })
        .write_line(");")
        .blank_line()
        .write_line("export type InputJsonValueType = z.infer<typeof InputJsonValueSchema>;");
}

/// `DecimalJsLikeSchema` and `DecimalJsLikeListSchema`
pub fn write_decimal_js_like(ctx: &Context<'_>, w: &mut FileWriter) {
    let decimal = ctx.surface_name(w, Construct::DecimalClass);
    let decimal_js_like = ctx.surface_name(w, Construct::DecimalJsLike);

    w.blank_line()
        .write_line("export const DecimalJsLikeSchema = z.preprocess((v, c) => {")
        .with_indentation_level(1, |w| {
            w.write_line(&format!(
                "return {d}.isDecimal(v) && !(v instanceof {d}) ? new {d}(v) : v;",
                d = decimal
            ));
        })
        .write_line(&format!("}}, z.instanceof({}));", decimal))
        .blank_line()
        .write_line(&format!(
            "export const DecimalJsLikeListSchema: z.ZodType<{}[]> = z.object({{",
            decimal_js_like
        ))
        .with_indentation_level(1, |w| {
            w.write_line("d: z.array(z.number()),")
                .write_line("e: z.number(),")
                .write_line("s: z.number(),")
                .write_line("toFixed: z.function(z.tuple([]), z.string()),");
        })
        .write_line("}).array();");
}

/// `DECIMAL_STRING_REGEX` and `isValidDecimalInput`
pub fn write_is_valid_decimal_input(ctx: &Context<'_>, w: &mut FileWriter) {
    let decimal_js_like = ctx.surface_name(w, Construct::DecimalJsLike);

    w.blank_line()
        .write_line(
            r"export const DECIMAL_STRING_REGEX = /^(?:-?Infinity|NaN|-?(?:0[bB][01]+(?:\.[01]+)?(?:[pP][-+]?\d+)?|0[oO][0-7]+(?:\.[0-7]+)?(?:[pP][-+]?\d+)?|0[xX][\da-fA-F]+(?:\.[\da-fA-F]+)?(?:[pP][-+]?\d+)?|(?:\d+|\d*\.\d+)(?:[eE][-+]?\d+)?))$/;",
        )
        .blank_line()
        .write_line("export const isValidDecimalInput =")
        .with_indentation_level(1, |w| {
            w.write(&format!(
                "(v?: null | string | number | {t}): v is string | number | {t} => ",
                t = decimal_js_like
            ))
            .inline_block(|w| {
                w.write_line("if (v === undefined || v === null) return false;")
                    .write_line("return (")
                    .with_indentation_level(3, |w| {
                        w.write_line(
                            "(typeof v === 'object' && 'd' in v && 'e' in v && 's' in v && 'toFixed' in v) ||",
                        )
                        .write_line("(typeof v === 'string' && DECIMAL_STRING_REGEX.test(v)) ||")
                        .write_line("typeof v === 'number'");
                    })
                    .write(")");
            })
            .write(";")
            .new_line();
        });
}
