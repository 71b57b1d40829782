//! Input object schemas

use super::union::write_arg;
use super::Context;
use crate::extended::ExtendedInputType;
use crate::writer::FileWriter;

/// `XSchema: z.ZodType<Prisma.X> = z.object({...}).strict();`
///
/// References to other input objects and enums are deferred since input
/// objects are mutually recursive. When model fields are omitted from input
/// the annotation drops them with `Omit`.
pub fn write_input_type(ctx: &Context<'_>, w: &mut FileWriter, input: &ExtendedInputType) {
    let omitted: Vec<String> = input
        .fields
        .iter()
        .filter(|f| f.omit)
        .map(|f| format!("'{}'", f.name))
        .collect();
    let annotation = ctx.client_omit_annotation(w, &input.name, &omitted);

    w.blank_line()
        .write(&format!(
            "export const {}Schema: {} = z.object(",
            input.name, annotation
        ))
        .inline_block(|w| {
            for field in &input.fields {
                write_arg(ctx, w, field, true);
            }
        })
        .write(").strict()");

    let transform = ctx.strict_transform(w);
    w.write(transform).write(";").new_line();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::test_support::{blog, Fixture};
    use crate::config::Config;
    use crate::dmmf::{InputType, Location, SchemaArg, TypeRef};
    use crate::writer::{Decl, Directory};

    fn arg(name: &str, shapes: &[(&str, Location, bool)], is_required: bool, is_nullable: bool) -> SchemaArg {
        SchemaArg {
            name: name.to_string(),
            is_required,
            is_nullable,
            input_types: shapes
                .iter()
                .map(|(type_name, location, is_list)| TypeRef {
                    type_name: type_name.to_string(),
                    location: *location,
                    is_list: *is_list,
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn document() -> crate::dmmf::Document {
        let mut doc = blog();
        doc.datamodel.models[0].fields[1].documentation =
            Some("@zod.omit([\"input\"])".to_string());
        doc.schema.input_object_types.prisma = vec![
            InputType {
                name: "UserWhereInput".to_string(),
                fields: vec![
                    arg(
                        "AND",
                        &[
                            ("UserWhereInput", Location::InputObjectTypes, false),
                            ("UserWhereInput", Location::InputObjectTypes, true),
                        ],
                        false,
                        false,
                    ),
                    arg(
                        "name",
                        &[
                            ("StringNullableFilter", Location::InputObjectTypes, false),
                            ("String", Location::Scalar, false),
                        ],
                        false,
                        true,
                    ),
                    arg("role", &[("Role", Location::EnumTypes, false)], false, false),
                ],
            },
            InputType {
                name: "UserCreateInput".to_string(),
                fields: vec![
                    arg("email", &[("String", Location::Scalar, false)], true, false),
                    arg("name", &[("String", Location::Scalar, false), ("Null", Location::Scalar, false)], false, true),
                ],
            },
        ];
        doc
    }

    fn render(config: Config, name: &str, w: &mut FileWriter) {
        let fixture = Fixture::new(&document(), config);
        let ctx = fixture.context();
        let input = ctx
            .dmmf
            .input_object_types
            .iter()
            .find(|i| i.name == name)
            .unwrap();
        write_input_type(&ctx, w, input);
    }

    #[test]
    fn test_where_input_defers_references() {
        let mut w = FileWriter::single();
        render(Config::default(), "UserWhereInput", &mut w);
        assert_eq!(
            w.finish(),
            "export const UserWhereInputSchema: z.ZodType<Prisma.UserWhereInput> = z.object({\n\
             \x20 AND: z.union([ z.lazy(() => UserWhereInputSchema), z.lazy(() => UserWhereInputSchema).array() ]).optional(),\n\
             \x20 name: z.union([ z.lazy(() => StringNullableFilterSchema), z.string() ]).optional().nullable(),\n\
             \x20 role: z.lazy(() => RoleSchema).optional(),\n\
             }).strict();\n"
        );
    }

    #[test]
    fn test_omitted_input_fields() {
        let mut w = FileWriter::single();
        render(Config::default(), "UserCreateInput", &mut w);
        let out = w.finish();
        assert!(out.starts_with(
            "export const UserCreateInputSchema: z.ZodType<Omit<Prisma.UserCreateInput, 'email'>> = z.object({\n"
        ), "{out}");
        assert!(out.contains("  // omitted: email: z.string(),\n"), "{out}");
        assert!(out.contains("  name: z.string().optional().nullable(),\n"), "{out}");
    }

    #[test]
    fn test_native_client_has_no_namespace_annotation() {
        let config = Config {
            native_client_runtime: true,
            ..Config::default()
        };
        let mut w = FileWriter::multi(Decl::new(Directory::InputTypeSchemas, "UserCreateInputSchema"));
        render(config, "UserCreateInput", &mut w);
        let out = w.finish();
        assert!(out.starts_with("export const UserCreateInputSchema: z.ZodTypeAny = z.object({\n"), "{out}");
        assert!(!out.contains("Prisma"), "{out}");
    }

    #[test]
    fn test_multi_file_imports() {
        let config = Config {
            strict_optional_properties: true,
            ..Config::default()
        };
        let mut w = FileWriter::multi(Decl::new(Directory::InputTypeSchemas, "UserWhereInputSchema"));
        w.import_zod();
        render(config, "UserWhereInput", &mut w);
        let out = w.finish();
        assert!(out.starts_with(
            "import { z } from 'zod';\n\
             import type { Prisma } from '@prisma/client';\n\
             import { StringNullableFilterSchema } from './StringNullableFilterSchema';\n\
             import { RoleSchema } from './RoleSchema';\n\
             import { ru } from './ru';\n\n"
        ), "{out}");
        assert!(out.contains("}).strict().transform(ru);\n"), "{out}");
    }
}
