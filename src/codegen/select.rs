//! Select, include and default argument schemas of output types

use super::{lazy, output_schema, Context};
use crate::extended::{ExtendedOutputField, ExtendedOutputType, SelectShape};
use crate::writer::FileWriter;

/// One declaration written for an output type
#[derive(Debug, Clone)]
pub struct OutputUnit {
    /// Declared name without the `Schema` suffix, e.g. `UserSelect`
    pub name: String,
    /// Writer of the declaration
    pub write: fn(&Context<'_>, &mut FileWriter, &ExtendedOutputType),
}

/// Declarations written for `output`, in order
pub fn output_units(ctx: &Context<'_>, output: &ExtendedOutputType) -> Vec<OutputUnit> {
    let select = ctx.config.writes_select();
    let include = ctx.config.writes_include() && ctx.dmmf.has_include(&output.name);
    let mut units = Vec::new();

    let mut push = |suffix: &str, write: fn(&Context<'_>, &mut FileWriter, &ExtendedOutputType)| {
        units.push(OutputUnit {
            name: format!("{}{}", output.name, suffix),
            write,
        })
    };

    if select {
        push("Select", write_select);
    }
    if include {
        push("Include", write_include);
    }
    if select || ctx.config.writes_include() {
        push("Args", write_model_args);
        if output.has_count_field {
            push("CountOutputTypeArgs", write_count_args);
            push("CountOutputTypeSelect", write_count_select);
        }
    }

    units
}

/// Client type name of default arguments, by client version
fn args_type_name(ctx: &Context<'_>, name: &str) -> String {
    if ctx.config.uses_default_args() {
        format!("{}DefaultArgs", name)
    } else {
        format!("{}Args", name)
    }
}

/// `z.union([z.boolean(),z.lazy(() => TArgsSchema)]).optional()`
fn select_expression(ctx: &Context<'_>, w: &mut FileWriter, field: &ExtendedOutputField) -> String {
    let target = match &field.select {
        SelectShape::Flag => return "z.boolean().optional()".to_string(),
        SelectShape::FindManyArgs(model) => {
            let find_many = format!("{}FindManyArgs", model);
            if ctx.dmmf.operations.iter().any(|op| op.arg_name == find_many) {
                find_many
            } else {
                format!("{}Args", model)
            }
        }
        SelectShape::Args(name) => format!("{}Args", name),
    };

    format!(
        "z.union([z.boolean(),{}]).optional()",
        lazy(&output_schema(w, &target))
    )
}

/// Close an object schema: `.strict()`, the strict-optional transform and `;`
fn close_object(ctx: &Context<'_>, w: &mut FileWriter) {
    let transform = ctx.strict_transform(w);
    w.write(".strict()").write(transform).write(";").new_line();
}

/// `XSelectSchema` over every field of the output type
pub fn write_select(ctx: &Context<'_>, w: &mut FileWriter, output: &ExtendedOutputType) {
    let annotation = ctx.client_type_annotation(w, &format!("{}Select", output.name));

    w.blank_line()
        .write(&format!(
            "export const {}SelectSchema: {} = z.object(",
            output.name, annotation
        ))
        .inline_block(|w| {
            for field in &output.fields {
                let expression = select_expression(ctx, w, field);
                w.write_line(&format!("{}: {},", field.name, expression));
            }
        })
        .write(")");
    close_object(ctx, w);
}

/// `XIncludeSchema` over the object fields of the output type
pub fn write_include(ctx: &Context<'_>, w: &mut FileWriter, output: &ExtendedOutputType) {
    let annotation = ctx.client_type_annotation(w, &format!("{}Include", output.name));

    w.blank_line()
        .write(&format!(
            "export const {}IncludeSchema: {} = z.object(",
            output.name, annotation
        ))
        .inline_block(|w| {
            for field in output.include_fields() {
                let expression = select_expression(ctx, w, field);
                w.write_line(&format!("{}: {},", field.name, expression));
            }
        })
        .write(")");
    close_object(ctx, w);
}

/// `XArgsSchema`, the default arguments of a relation or composite field
pub fn write_model_args(ctx: &Context<'_>, w: &mut FileWriter, output: &ExtendedOutputType) {
    let name = &output.name;
    let annotation = ctx.client_type_annotation(w, &args_type_name(ctx, name));
    let select = ctx
        .config
        .writes_select()
        .then(|| lazy(&output_schema(w, &format!("{}Select", name))));
    let include = (ctx.config.writes_include() && ctx.dmmf.has_include(name))
        .then(|| lazy(&output_schema(w, &format!("{}Include", name))));

    w.blank_line()
        .write(&format!("export const {}ArgsSchema: {} = z.object(", name, annotation))
        .inline_block(|w| {
            if let Some(select) = &select {
                w.write_line(&format!("select: {}.optional(),", select));
            }
            if let Some(include) = &include {
                w.write_line(&format!("include: {}.optional(),", include));
            }
        })
        .write(")");
    close_object(ctx, w);
}

/// `XCountOutputTypeSelectSchema` over the list relations of the type
pub fn write_count_select(ctx: &Context<'_>, w: &mut FileWriter, output: &ExtendedOutputType) {
    let annotation =
        ctx.client_type_annotation(w, &format!("{}CountOutputTypeSelect", output.name));

    w.blank_line()
        .write(&format!(
            "export const {}CountOutputTypeSelectSchema: {} = z.object(",
            output.name, annotation
        ))
        .inline_block(|w| {
            for field in output
                .fields
                .iter()
                .filter(|f| f.is_list_output_type() && f.is_object_output_type() && !f.is_count_field())
            {
                w.write_line(&format!("{}: z.boolean().optional(),", field.name));
            }
        })
        .write(")");
    close_object(ctx, w);
}

/// `XCountOutputTypeArgsSchema`
pub fn write_count_args(ctx: &Context<'_>, w: &mut FileWriter, output: &ExtendedOutputType) {
    let name = format!("{}CountOutputType", output.name);
    let annotation = ctx.client_type_annotation(w, &args_type_name(ctx, &name));
    let select = lazy(&output_schema(w, &format!("{}Select", name)));

    w.blank_line()
        .write(&format!("export const {}ArgsSchema: {} = z.object(", name, annotation))
        .inline_block(|w| {
            w.write_line(&format!("select: {}.nullish(),", select));
        })
        .write(")");
    close_object(ctx, w);
}
