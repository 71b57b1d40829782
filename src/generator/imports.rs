//! Import block of the single output file
//!
//! Multi-file units collect their imports while they are written. The single
//! file instead opens with a fixed block decided by the run: the surface mode
//! and whether JSON or Decimal values appear anywhere.

use crate::codegen::Context;
use crate::surface::{CLIENT_NAMESPACE, DECIMAL_MODULE, SENTINEL_MODULE};
use crate::writer::ImportStatement;

fn statement(items: &[&str], from: &str, type_only: bool) -> String {
    ImportStatement {
        items: items.iter().map(|i| i.to_string()).collect(),
        from: from.to_string(),
        type_only,
    }
    .render()
}

/// Import lines of `index.ts`, in order, custom directive imports last
pub fn single_file_imports(ctx: &Context<'_>) -> Vec<String> {
    let config = ctx.config;
    let dmmf = ctx.dmmf;
    let client = config.client_import_path.as_str();
    let runtime = config.runtime_library_import_path.as_str();

    let mut lines = vec![statement(&["z"], "zod", false)];

    if ctx.surface.is_native() {
        if dmmf.has_decimal_types {
            lines.push(statement(&["Decimal"], DECIMAL_MODULE, false));
        }

        let mut runtime_types = Vec::new();
        if dmmf.has_json_types {
            runtime_types.extend(["type JsonValue", "type InputJsonValue"]);
        }
        if dmmf.has_decimal_types {
            runtime_types.push("type DecimalJsLike");
        }
        if !runtime_types.is_empty() {
            lines.push(statement(&runtime_types, runtime, false));
        }

        if dmmf.has_json_types {
            lines.push(statement(&["DbNull", "JsonNull", "AnyNull"], SENTINEL_MODULE, false));
        }
    } else {
        // Sentinels and the Decimal class are namespace members used as values
        let type_only = !(dmmf.has_json_types || dmmf.has_decimal_types);
        lines.push(statement(&[CLIENT_NAMESPACE], client, type_only));
    }

    lines.extend(dmmf.custom_imports.iter().cloned());
    lines
}
