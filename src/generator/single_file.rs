//! Single-file output: every declaration in one `index.ts`

use super::imports::single_file_imports;
use crate::codegen::args::write_operation_args;
use crate::codegen::enums::{write_custom_enum, write_schema_enum};
use crate::codegen::helpers::helper_units;
use crate::codegen::input::write_input_type;
use crate::codegen::model::write_model;
use crate::codegen::select::output_units;
use crate::codegen::Context;
use crate::writer::{FileWriter, HeadingStyle};
use crate::GeneratedFile;
use tracing::debug;

/// Name of the generated file
pub const INDEX_FILE: &str = "index.ts";

const HEADER: &str = "// Generated by zod-prisma-gen. Do not edit.";

fn section(w: &mut FileWriter, title: &str) {
    w.blank_line().heading(title, HeadingStyle::Fat);
}

/// Write `index.ts`
///
/// Sections follow dependency order where it matters for plain references:
/// helpers and enums first, then models, select and include schemas, input
/// objects and finally operation arguments.
pub fn generate(ctx: &Context<'_>) -> GeneratedFile {
    let config = ctx.config;
    let dmmf = ctx.dmmf;
    let mut w = FileWriter::single();

    w.write_line(HEADER).blank_line();
    for line in single_file_imports(ctx) {
        w.write_line(&line);
    }

    let helpers = helper_units(ctx);
    if !helpers.is_empty() {
        section(&mut w, "HELPER FUNCTIONS");
        for unit in &helpers {
            (unit.write)(ctx, &mut w);
        }
    }

    let schema_enums: &[_] = if config.create_input_types {
        &dmmf.schema_enums
    } else {
        &[]
    };
    if !schema_enums.is_empty() || !dmmf.enums.is_empty() {
        section(&mut w, "ENUMS");
        for schema_enum in schema_enums {
            write_schema_enum(ctx, &mut w, schema_enum);
        }
        for enum_def in &dmmf.enums {
            write_custom_enum(ctx, &mut w, enum_def);
        }
    }

    if config.create_model_types {
        if !dmmf.models.is_empty() {
            section(&mut w, "MODELS");
            for model in &dmmf.models {
                write_model(ctx, &mut w, model);
            }
        }
        if !dmmf.types.is_empty() {
            section(&mut w, "COMPOSITE TYPES");
            for composite in &dmmf.types {
                write_model(ctx, &mut w, composite);
            }
        }
    }

    let outputs: Vec<_> = dmmf
        .output_object_types
        .iter()
        .map(|output| (output, output_units(ctx, output)))
        .filter(|(_, units)| !units.is_empty())
        .collect();
    if !outputs.is_empty() {
        section(&mut w, "SELECT & INCLUDE");
        for (output, units) in &outputs {
            w.blank_line()
                .heading(&format!("{} SELECT & INCLUDE", output.name.to_uppercase()), HeadingStyle::Slim);
            for unit in units {
                (unit.write)(ctx, &mut w, output);
            }
        }
    }

    if config.create_input_types {
        if !dmmf.input_object_types.is_empty() {
            section(&mut w, "INPUT TYPES");
            for input in &dmmf.input_object_types {
                write_input_type(ctx, &mut w, input);
            }
        }
        if !dmmf.operations.is_empty() {
            section(&mut w, "ARGS");
            for operation in &dmmf.operations {
                write_operation_args(ctx, &mut w, operation);
            }
        }
    }

    let content = w.finish();
    debug!(bytes = content.len(), "wrote single file");
    GeneratedFile {
        name: INDEX_FILE.to_string(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::test_support::{blog, Fixture};
    use crate::config::Config;

    #[test]
    fn test_section_order() {
        let fixture = Fixture::new(&blog(), Config::default());
        let file = generate(&fixture.context());
        assert_eq!(file.name, "index.ts");

        let content = &file.content;
        assert!(content.starts_with(
            "// Generated by zod-prisma-gen. Do not edit.\n\n\
             import { z } from 'zod';\n\
             import type { Prisma } from '@prisma/client';\n\n"
        ), "{content}");

        let enums = content.find("// ENUMS").unwrap();
        let models = content.find("// MODELS").unwrap();
        assert!(enums < models);
        assert!(content.contains("export const RoleSchema = z.enum(['USER','ADMIN']);"));
        assert!(content.contains("export const UserSchema = z.object({"));
        assert!(!content.contains("HELPER FUNCTIONS"));
        assert!(!content.contains("// ARGS"), "no operations in the fixture");
    }

    #[test]
    fn test_model_types_toggle() {
        let config = Config {
            create_model_types: false,
            ..Config::default()
        };
        let fixture = Fixture::new(&blog(), config);
        let content = generate(&fixture.context()).content;
        assert!(!content.contains("UserSchema"), "{content}");
        assert!(content.contains("RoleSchema"));
    }
}
