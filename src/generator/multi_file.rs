//! Multi-file output
//!
//! Every declaration group is written to its own unit with the imports it
//! registered while being written. Each directory gets a barrel `index.ts`
//! and the output root an `index.ts` re-exporting the directories.

use crate::codegen::args::write_operation_args;
use crate::codegen::enums::{write_custom_enum, write_schema_enum};
use crate::codegen::helpers::helper_units;
use crate::codegen::input::write_input_type;
use crate::codegen::model::write_model;
use crate::codegen::select::output_units;
use crate::codegen::{helper_file, input_file, model_file, output_file, Context};
use crate::writer::{Decl, Directory, FileWriter};
use crate::GeneratedFile;
use std::collections::BTreeMap;
use tracing::debug;

const BARREL_FILE: &str = "index.ts";

/// Collects units and remembers which files each directory holds
#[derive(Debug, Default)]
struct Output {
    files: Vec<GeneratedFile>,
    directories: BTreeMap<Directory, Vec<String>>,
}

impl Output {
    /// Write one unit exporting `primary` by default
    fn unit(&mut self, decl: Decl, primary: &str, body: impl FnOnce(&mut FileWriter)) {
        let mut w = FileWriter::multi(decl.clone());
        w.import_zod();
        body(&mut w);
        w.blank_line()
            .write_line(&format!("export default {};", primary));

        let name = format!("{}/{}.ts", decl.dir.as_str(), decl.file);
        debug!(file = %name, "wrote unit");
        self.files.push(GeneratedFile {
            name,
            content: w.finish(),
        });
        self.directories.entry(decl.dir).or_default().push(decl.file);
    }

    /// Append the directory barrels and the root index
    fn finish(mut self) -> Vec<GeneratedFile> {
        let mut root = String::new();

        for (dir, files) in &self.directories {
            let content: String = files
                .iter()
                .map(|file| format!("export * from './{}';\n", file))
                .collect();
            self.files.push(GeneratedFile {
                name: format!("{}/{}", dir.as_str(), BARREL_FILE),
                content,
            });
            root.push_str(&format!("export * from './{}';\n", dir.as_str()));
        }

        self.files.push(GeneratedFile {
            name: BARREL_FILE.to_string(),
            content: root,
        });
        self.files
    }
}

/// Write every unit, the barrels and the root index
pub fn generate(ctx: &Context<'_>) -> Vec<GeneratedFile> {
    let config = ctx.config;
    let dmmf = ctx.dmmf;
    let mut out = Output::default();

    for unit in helper_units(ctx) {
        out.unit(helper_file(unit.file), unit.primary, |w| (unit.write)(ctx, w));
    }

    if config.create_input_types {
        for schema_enum in &dmmf.schema_enums {
            out.unit(
                input_file(&schema_enum.name),
                &format!("{}Schema", schema_enum.name),
                |w| write_schema_enum(ctx, w, schema_enum),
            );
        }
    }

    for enum_def in &dmmf.enums {
        out.unit(
            input_file(&enum_def.name),
            &format!("{}Schema", enum_def.name),
            |w| write_custom_enum(ctx, w, enum_def),
        );
    }

    if config.create_model_types {
        for model in dmmf.models.iter().chain(dmmf.types.iter()) {
            out.unit(
                model_file(&model.name),
                &format!("{}Schema", model.name),
                |w| write_model(ctx, w, model),
            );
        }
    }

    for output in &dmmf.output_object_types {
        for unit in output_units(ctx, output) {
            out.unit(
                output_file(&unit.name),
                &format!("{}Schema", unit.name),
                |w| (unit.write)(ctx, w, output),
            );
        }
    }

    if config.create_input_types {
        for input in &dmmf.input_object_types {
            out.unit(
                input_file(&input.name),
                &format!("{}Schema", input.name),
                |w| write_input_type(ctx, w, input),
            );
        }

        for operation in &dmmf.operations {
            out.unit(
                output_file(&operation.arg_name),
                &format!("{}Schema", operation.arg_name),
                |w| write_operation_args(ctx, w, operation),
            );
        }
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::test_support::{blog, Fixture};
    use crate::config::{Config, OutputMode};

    fn files(config: Config) -> Vec<GeneratedFile> {
        let fixture = Fixture::new(
            &blog(),
            Config {
                output_mode: OutputMode::MultiFile,
                ..config
            },
        );
        generate(&fixture.context())
    }

    fn find<'a>(files: &'a [GeneratedFile], name: &str) -> &'a str {
        &files
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("missing {name}"))
            .content
    }

    #[test]
    fn test_layout_and_barrels() {
        let files = files(Config::default());
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "inputTypeSchemas/RoleSchema.ts",
                "modelSchema/UserSchema.ts",
                "modelSchema/PostSchema.ts",
                "modelSchema/index.ts",
                "inputTypeSchemas/index.ts",
                "index.ts",
            ]
        );
        assert_eq!(
            find(&files, "modelSchema/index.ts"),
            "export * from './UserSchema';\nexport * from './PostSchema';\n"
        );
        assert_eq!(
            find(&files, "index.ts"),
            "export * from './modelSchema';\nexport * from './inputTypeSchemas';\n"
        );
    }

    #[test]
    fn test_unit_imports_and_default_export() {
        let files = files(Config {
            create_relation_values_types: true,
            ..Config::default()
        });
        let user = find(&files, "modelSchema/UserSchema.ts");
        assert!(user.starts_with(
            "import { z } from 'zod';\n\
             import { RoleSchema } from '../inputTypeSchemas/RoleSchema';\n\
             import { PostWithRelationsSchema } from './PostSchema';\n\
             import type { PostWithRelations } from './PostSchema';\n\n"
        ), "{user}");
        assert!(user.ends_with("\n\nexport default UserSchema;\n"), "{user}");

        let role = find(&files, "inputTypeSchemas/RoleSchema.ts");
        assert!(role.starts_with("import { z } from 'zod';\n\nexport const RoleSchema"), "{role}");
    }

    #[test]
    fn test_custom_imports_stay_in_their_unit() {
        let mut doc = blog();
        doc.datamodel.models[1].documentation =
            Some("@zod.import([\"import { slug } from '../slug';\"])".to_string());
        let fixture = Fixture::new(
            &doc,
            Config {
                output_mode: OutputMode::MultiFile,
                ..Config::default()
            },
        );
        let files = generate(&fixture.context());
        assert!(find(&files, "modelSchema/PostSchema.ts").contains("import { slug } from '../slug';\n"));
        assert!(!find(&files, "modelSchema/UserSchema.ts").contains("slug"));
    }
}
