//! Model and composite type schemas with their variants
//!
//! The base schema holds scalar and enum fields only. Relation and composite
//! fields appear in the relation variants, each as a deferred reference so
//! mutually recursive models resolve at validation time.

use super::field::{write_model_field, FieldMode};
use super::relation::{write_relation, write_relation_type};
use super::{helper_file, helpers, Context};
use crate::extended::{ExtendedModel, RelationVariant};
use crate::writer::{FileWriter, HeadingStyle};

/// Write a model or composite type and every variant flagged for it
pub fn write_model(ctx: &Context<'_>, w: &mut FileWriter, model: &ExtendedModel) {
    let name = &model.name;
    let heading = &model.heading_name;

    for line in &model.directives.imports {
        w.import_verbatim(line);
    }

    w.blank_line()
        .heading(&format!("{} SCHEMA", heading), HeadingStyle::Fat)
        .blank_line()
        .jsdoc(model.documentation.as_deref())
        .write(&format!("export const {}Schema = z.object(", name))
        .inline_block(|w| {
            for field in model.scalar_fields() {
                write_model_field(ctx, w, field, FieldMode::Plain);
            }
        });
    if let Some(error) = model.error_object() {
        w.write(&format!(", {}", error));
    }
    w.write(");")
        .blank_line()
        .write_line(&format!("export type {name} = z.infer<typeof {name}Schema>;"));

    if !model.custom_validators().is_empty() {
        w.blank_line()
            .heading(&format!("{} CUSTOM VALIDATORS SCHEMA", heading), HeadingStyle::Fat)
            .blank_line()
            .write(&format!("export const {name}CustomValidatorsSchema = {name}Schema"));
        for validator in model.custom_validators() {
            w.write(validator);
        }
        w.write(";").blank_line().write_line(&format!(
            "export type {name}CustomValidators = z.infer<typeof {name}CustomValidatorsSchema>;"
        ));
    }

    let variants = model.variants;

    if variants.partial {
        w.blank_line()
            .heading(&format!("{} PARTIAL SCHEMA", heading), HeadingStyle::Fat)
            .blank_line()
            .write_line(&format!("export const {name}PartialSchema = {name}Schema.partial();"))
            .blank_line()
            .write_line(&format!(
                "export type {name}Partial = z.infer<typeof {name}PartialSchema>;"
            ));
    }

    if variants.optional_defaults {
        w.blank_line()
            .heading(&format!("{} OPTIONAL DEFAULTS SCHEMA", heading), HeadingStyle::Slim)
            .blank_line()
            .write(&format!(
                "export const {name}OptionalDefaultsSchema = {name}Schema.merge(z.object("
            ))
            .inline_block(|w| {
                for field in model.scalar_fields().filter(|f| f.is_optional_default_field) {
                    write_model_field(ctx, w, field, FieldMode::OptionalDefaults);
                }
            })
            .write("));")
            .blank_line()
            .write_line(&format!(
                "export type {name}OptionalDefaults = z.infer<typeof {name}OptionalDefaultsSchema>;"
            ));
    }

    if variants.relations {
        w.blank_line()
            .heading(&format!("{} RELATION SCHEMA", heading), HeadingStyle::Slim);
        let relations = format!("{}Relations", name);
        write_relations_type(ctx, w, model, &relations, RelationVariant::Base, false);
        write_composed(ctx, w, model, &format!("{}WithRelations", name), "", &relations, RelationVariant::Base, false);
    }

    if variants.optional_defaults_relations {
        w.blank_line().heading(
            &format!("{} OPTIONAL DEFAULTS RELATION SCHEMA", heading),
            HeadingStyle::Slim,
        );
        let relations = format!("{}OptionalDefaultsRelations", name);
        write_relations_type(ctx, w, model, &relations, RelationVariant::OptionalDefaults, false);
        write_composed(
            ctx,
            w,
            model,
            &format!("{}OptionalDefaultsWithRelations", name),
            "OptionalDefaults",
            &relations,
            RelationVariant::OptionalDefaults,
            false,
        );
    }

    if variants.partial_relations {
        w.blank_line()
            .heading(&format!("{} PARTIAL RELATION SCHEMA", heading), HeadingStyle::Slim);
        let relations = format!("{}PartialRelations", name);
        write_relations_type(ctx, w, model, &relations, RelationVariant::Partial, true);
        write_composed(
            ctx,
            w,
            model,
            &format!("{}PartialWithRelations", name),
            "Partial",
            &relations,
            RelationVariant::Partial,
            true,
        );

        if variants.optional_defaults_relations {
            write_composed(
                ctx,
                w,
                model,
                &format!("{}OptionalDefaultsWithPartialRelations", name),
                "OptionalDefaults",
                &relations,
                RelationVariant::Partial,
                true,
            );
        }

        if variants.relations {
            write_composed(
                ctx,
                w,
                model,
                &format!("{}WithPartialRelations", name),
                "",
                &relations,
                RelationVariant::Partial,
                true,
            );
        }
    }
}

/// `export type XRelations = { ... };`
fn write_relations_type(
    ctx: &Context<'_>,
    w: &mut FileWriter,
    model: &ExtendedModel,
    type_name: &str,
    variant: RelationVariant,
    partial: bool,
) {
    w.blank_line()
        .write(&format!("export type {} = ", type_name))
        .inline_block(|w| {
            for field in model.relation_fields() {
                write_relation_type(ctx, w, field, variant, partial);
            }
        })
        .write(";")
        .new_line();
}

/// A composed type over a base schema plus its deferred relation schema
///
/// `base` names the base variant suffix: `""`, `"Partial"` or
/// `"OptionalDefaults"`.
#[allow(clippy::too_many_arguments)]
fn write_composed(
    ctx: &Context<'_>,
    w: &mut FileWriter,
    model: &ExtendedModel,
    type_name: &str,
    base: &str,
    relations: &str,
    variant: RelationVariant,
    partial: bool,
) {
    let base_schema = format!("{}{}Schema", model.name, base);

    w.blank_line();
    if model.has_optional_json_fields() {
        w.reference_type(&helper_file(helpers::JSON_VALUE_FILE), "JsonValueType");
        w.write(&format!(
            "export type {} = Omit<z.infer<typeof {}>, {}> & ",
            type_name, base_schema, model.optional_json_field_union
        ))
        .inline_block(|w| {
            for field in &model.optional_json_fields {
                w.write_line(&format!("{}?: JsonValueType | null;", field));
            }
        })
        .write(" & ");
    } else {
        w.write(&format!(
            "export type {} = z.infer<typeof {}> & ",
            type_name, base_schema
        ));
    }
    w.write(relations).write(";");

    w.blank_line()
        .write(&format!(
            "export const {type_name}Schema: z.ZodType<{type_name}> = {base_schema}.merge(z.object("
        ))
        .inline_block(|w| {
            for field in model.relation_fields() {
                write_relation(ctx, w, field, variant, partial);
            }
        })
        .write("));")
        .new_line();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::test_support::{blog, scalar, Fixture};
    use crate::config::Config;

    fn render(fixture: &Fixture, model: &str) -> String {
        let ctx = fixture.context();
        let mut w = FileWriter::single();
        write_model(&ctx, &mut w, ctx.dmmf.entity(model).unwrap());
        w.finish()
    }

    #[test]
    fn test_base_schema_holds_scalar_and_enum_fields() {
        let fixture = Fixture::new(&blog(), Config::default());
        let out = render(&fixture, "User");
        assert!(out.starts_with(
            "/////////////////////////////////////////\n// USER SCHEMA\n/////////////////////////////////////////\n\n/**\n * A registered user\n */\n"
        ), "{out}");
        assert!(out.contains(
            "export const UserSchema = z.object({\n  id: z.number().int(),\n  email: z.string(),\n  name: z.string().nullable(),\n  role: RoleSchema,\n});\n"
        ), "{out}");
        assert!(out.contains("export type User = z.infer<typeof UserSchema>;"));
        assert!(!out.contains("posts"), "relations stay out of the base schema: {out}");
        assert!(!out.contains("WithRelations"));
    }

    #[test]
    fn test_all_variants() {
        let config = Config {
            create_optional_default_values_types: true,
            create_relation_values_types: true,
            create_partial_types: true,
            ..Config::default()
        };
        let fixture = Fixture::new(&blog(), config);
        let out = render(&fixture, "User");

        for declaration in [
            "export const UserPartialSchema = UserSchema.partial();",
            "export const UserOptionalDefaultsSchema = UserSchema.merge(z.object({\n  id: z.number().int().optional(),\n  role: RoleSchema.optional().default('USER'),\n}));",
            "export type UserRelations = {\n  posts: PostWithRelations[];\n};",
            "export type UserWithRelations = z.infer<typeof UserSchema> & UserRelations;",
            "export const UserWithRelationsSchema: z.ZodType<UserWithRelations> = UserSchema.merge(z.object({\n  posts: z.lazy(() => PostWithRelationsSchema).array(),\n}));",
            "export type UserOptionalDefaultsRelations = {\n  posts: PostOptionalDefaultsWithRelations[];\n};",
            "export type UserPartialRelations = {\n  posts?: PostPartialWithRelations[];\n};",
            "posts: z.lazy(() => PostPartialWithRelationsSchema).array().optional(),",
            "export const UserOptionalDefaultsWithPartialRelationsSchema: z.ZodType<UserOptionalDefaultsWithPartialRelations> = UserOptionalDefaultsSchema.merge(z.object({",
            "export const UserWithPartialRelationsSchema: z.ZodType<UserWithPartialRelations> = UserSchema.merge(z.object({",
        ] {
            assert!(out.contains(declaration), "missing `{declaration}` in:\n{out}");
        }
    }

    #[test]
    fn test_optional_json_fields_in_composed_types() {
        let mut doc = blog();
        let mut meta = scalar("meta", "Json");
        meta.is_required = false;
        doc.datamodel.models[0].fields.push(meta);

        let config = Config {
            create_relation_values_types: true,
            ..Config::default()
        };
        let fixture = Fixture::new(&doc, config);
        let out = render(&fixture, "User");
        assert!(out.contains(
            "export type UserWithRelations = Omit<z.infer<typeof UserSchema>, 'meta'> & {\n  meta?: JsonValueType | null;\n} & UserRelations;"
        ), "{out}");
    }

    #[test]
    fn test_custom_validators_and_model_error() {
        let mut doc = blog();
        doc.datamodel.models[1].documentation = Some(
            "@zod.validators([\".refine((p) => p.title.length > 0)\"])\n@zod.error([\"invalid_type_error: 'post'\"])"
                .to_string(),
        );
        let fixture = Fixture::new(&doc, Config::default());
        let out = render(&fixture, "Post");
        assert!(out.contains("}, { invalid_type_error: 'post' });"), "{out}");
        assert!(out.contains(
            "export const PostCustomValidatorsSchema = PostSchema.refine((p) => p.title.length > 0);"
        ), "{out}");
    }
}
