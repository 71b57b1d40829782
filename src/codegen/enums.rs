//! Enum schemas

use super::Context;
use crate::extended::model::quote_single;
use crate::extended::{ExtendedEnum, ExtendedSchemaEnum, Sentinel};
use crate::surface::Construct;
use crate::writer::FileWriter;

/// Order in which sentinel rewrites are chained
const SENTINEL_ORDER: [Sentinel; 3] = [Sentinel::JsonNull, Sentinel::DbNull, Sentinel::AnyNull];

fn enum_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote_single(v))
        .collect::<Vec<_>>()
        .join(",")
}

/// A datamodel enum and its template-literal `XType`
pub fn write_custom_enum(_ctx: &Context<'_>, w: &mut FileWriter, enum_def: &ExtendedEnum) {
    let name = &enum_def.name;

    for line in &enum_def.directives.imports {
        w.import_verbatim(line);
    }

    w.blank_line()
        .jsdoc(enum_def.documentation.as_deref())
        .write(&format!(
            "export const {}Schema = z.enum([{}]);",
            name,
            enum_values(&enum_def.values)
        ))
        .blank_line()
        .write_line(&format!(
            "export type {name}Type = `${{z.infer<typeof {name}Schema>}}`"
        ));
}

/// A schema enum; the nullable-JSON enums rewrite values to sentinels
pub fn write_schema_enum(ctx: &Context<'_>, w: &mut FileWriter, schema_enum: &ExtendedSchemaEnum) {
    let values = enum_values(&schema_enum.values);

    w.blank_line()
        .write(&format!("export const {}Schema = z.enum([{}])", schema_enum.name, values));

    if schema_enum.rewrites_json_nulls {
        let mut chain = String::new();
        for sentinel in SENTINEL_ORDER {
            if schema_enum.values.iter().any(|v| v == sentinel.name()) {
                let target = ctx.surface_name(w, Construct::Sentinel(sentinel));
                chain.push_str(&format!("value === '{}' ? {} : ", sentinel.name(), target));
            }
        }
        w.write(&format!(".transform((value) => ({}value))", chain));
    }

    w.write(";").new_line();
}
