//! Relation and composite field lines of model relation variants
//!
//! Every relation is a deferred reference to the best emitted variant of its
//! target, so models may refer to each other in any order.

use super::{lazy, model_file, Context};
use crate::extended::{ExtendedField, RelationVariant};
use crate::writer::FileWriter;

/// Deferred reference to the target schema of a relation field
pub fn target_schema(
    ctx: &Context<'_>,
    w: &mut FileWriter,
    field: &ExtendedField,
    variant: RelationVariant,
) -> String {
    let schema = format!("{}Schema", ctx.dmmf.variant_target(&field.type_name, variant));
    w.reference(&model_file(&field.type_name), &schema);
    lazy(&schema)
}

/// Target type name of a relation field
pub fn target_type(
    ctx: &Context<'_>,
    w: &mut FileWriter,
    field: &ExtendedField,
    variant: RelationVariant,
) -> String {
    let name = ctx.dmmf.variant_target(&field.type_name, variant);
    w.reference_type(&model_file(&field.type_name), &name);
    name
}

/// Write `name: z.lazy(() => TargetSchema)...,`
///
/// `partial` makes the field optional regardless of its requiredness.
pub fn write_relation(
    ctx: &Context<'_>,
    w: &mut FileWriter,
    field: &ExtendedField,
    variant: RelationVariant,
    partial: bool,
) {
    let target = target_schema(ctx, w, field, variant);

    w.conditional_write(field.omit_in_model(), "// omitted: ")
        .write(&format!("{}: {}", field.name, target))
        .conditional_write(field.is_list, ".array()")
        .conditional_write(partial || !field.is_required, ".optional()")
        .conditional_write(!field.is_required, ".nullable()")
        .write(",")
        .new_line();
}

/// Write `name?: Target[] | null;` for a relations type alias
pub fn write_relation_type(
    ctx: &Context<'_>,
    w: &mut FileWriter,
    field: &ExtendedField,
    variant: RelationVariant,
    partial: bool,
) {
    let target = target_type(ctx, w, field, variant);

    w.conditional_write(field.omit_in_model(), "// omitted: ")
        .write(&field.name)
        .conditional_write(partial || !field.is_required, "?")
        .write(": ")
        .write(&target)
        .conditional_write(field.is_list, "[]")
        .conditional_write(!field.is_required, " | null")
        .write(";")
        .new_line();
}
