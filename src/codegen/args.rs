//! Argument schemas of root operations

use super::union::write_arg;
use super::{output_schema, Context};
use crate::extended::ExtendedOperation;
use crate::writer::FileWriter;

/// Arguments the writer supplies itself
const SHAPING_ARGS: [&str; 2] = ["select", "include"];

/// `XFindManyArgsSchema: z.ZodType<Prisma.XFindManyArgs> = z.object({...}).strict();`
///
/// Arguments reference input objects directly; only select and include of the
/// model are written first.
pub fn write_operation_args(ctx: &Context<'_>, w: &mut FileWriter, operation: &ExtendedOperation) {
    let annotation = ctx.client_type_annotation(w, &operation.arg_name);
    let select = operation
        .write_select
        .then(|| output_schema(w, &format!("{}Select", operation.model_name)));
    let include = operation
        .write_include
        .then(|| output_schema(w, &format!("{}Include", operation.model_name)));

    w.blank_line()
        .write(&format!(
            "export const {}Schema: {} = z.object(",
            operation.arg_name, annotation
        ))
        .inline_block(|w| {
            if let Some(select) = &select {
                w.write_line(&format!("select: {}.optional(),", select));
            }
            if let Some(include) = &include {
                w.write_line(&format!("include: {}.optional(),", include));
            }
            for arg in operation
                .args
                .iter()
                .filter(|arg| !SHAPING_ARGS.contains(&arg.name.as_str()))
            {
                write_arg(ctx, w, arg, false);
            }
        })
        .write(").strict()");

    let transform = ctx.strict_transform(w);
    w.write(transform).write(";").new_line();
}
