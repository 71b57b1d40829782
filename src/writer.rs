//! Text emission primitives
//!
//! [`FileWriter`] is a small code-block writer: chained writes, automatic
//! two-space indentation inside blocks, blank-line collapsing, and an import
//! set that collects what the written code references. In single-file output
//! the import set is ignored because every declaration shares one file.

use crate::surface::Resolved;

/// Indentation unit
pub const INDENT: &str = "  ";

/// Output directory of a multi-file declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Directory {
    /// Model and composite type schemas
    ModelSchema,
    /// Enum, input object and helper schemas
    InputTypeSchemas,
    /// Select, include and argument schemas
    OutputTypeSchemas,
}

impl Directory {
    /// Directory name on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Directory::ModelSchema => "modelSchema",
            Directory::InputTypeSchemas => "inputTypeSchemas",
            Directory::OutputTypeSchemas => "outputTypeSchemas",
        }
    }
}

/// The file a declaration is written to in multi-file output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    /// Directory
    pub dir: Directory,
    /// File stem, without `.ts`
    pub file: String,
}

impl Decl {
    /// Declaration in `dir/file.ts`
    pub fn new(dir: Directory, file: impl Into<String>) -> Self {
        Self {
            dir,
            file: file.into(),
        }
    }

    /// Path of `self` relative to a file in `from`
    fn relative_to(&self, from: Directory) -> String {
        if self.dir == from {
            format!("./{}", self.file)
        } else {
            format!("../{}/{}", self.dir.as_str(), self.file)
        }
    }
}

/// Which file a writer is producing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unit {
    /// The single `index.ts`
    Single,
    /// One declaration file of multi-file output
    Multi(Decl),
}

/// A rendered import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Imported names
    pub items: Vec<String>,
    /// Module path
    pub from: String,
    /// `import type`
    pub type_only: bool,
}

impl ImportStatement {
    /// Render as a single line
    pub fn render(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        format!(
            "import {}{{ {} }} from '{}';",
            type_keyword,
            self.items.join(", "),
            self.from
        )
    }
}

#[derive(Debug, Clone, Default)]
struct ImportEntry {
    from: String,
    values: Vec<String>,
    types: Vec<String>,
}

/// Named imports merged per module path, in first-registration order
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    entries: Vec<ImportEntry>,
}

impl ImportSet {
    /// Register `name` from `from`
    pub fn add(&mut self, from: &str, name: &str, type_only: bool) {
        let index = match self.entries.iter().position(|e| e.from == from) {
            Some(index) => index,
            None => {
                self.entries.push(ImportEntry {
                    from: from.to_string(),
                    ..Default::default()
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[index];
        let names = if type_only {
            &mut entry.types
        } else {
            &mut entry.values
        };
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    /// One value and one type-only statement per module, as needed
    ///
    /// A name imported as a value is not repeated as a type.
    pub fn statements(&self) -> Vec<ImportStatement> {
        let mut statements = Vec::new();

        for entry in &self.entries {
            if !entry.values.is_empty() {
                statements.push(ImportStatement {
                    items: entry.values.clone(),
                    from: entry.from.clone(),
                    type_only: false,
                });
            }

            let types: Vec<String> = entry
                .types
                .iter()
                .filter(|t| !entry.values.contains(t))
                .cloned()
                .collect();
            if !types.is_empty() {
                statements.push(ImportStatement {
                    items: types,
                    from: entry.from.clone(),
                    type_only: true,
                });
            }
        }

        statements
    }
}

/// Section heading style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// Framed by full comment rules
    Fat,
    /// Title over a dashed rule
    Slim,
}

const FAT_RULE: &str = "/////////////////////////////////////////";
const SLIM_RULE: &str = "//------------------------------------------------------";

/// Writer for one output file
#[derive(Debug, Clone)]
pub struct FileWriter {
    buf: String,
    indent: usize,
    at_line_start: bool,
    unit: Unit,
    zod: bool,
    imports: ImportSet,
    verbatim_imports: Vec<String>,
}

impl FileWriter {
    /// Writer for the single `index.ts`
    pub fn single() -> Self {
        Self::new(Unit::Single)
    }

    /// Writer for one multi-file declaration
    pub fn multi(decl: Decl) -> Self {
        Self::new(Unit::Multi(decl))
    }

    fn new(unit: Unit) -> Self {
        Self {
            buf: String::new(),
            indent: 0,
            at_line_start: true,
            unit,
            zod: false,
            imports: ImportSet::default(),
            verbatim_imports: Vec::new(),
        }
    }

    /// Writing the single output file
    pub fn is_single_file(&self) -> bool {
        self.unit == Unit::Single
    }

    /// Write text, indenting every line that starts inside it
    pub fn write(&mut self, text: &str) -> &mut Self {
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.buf.push('\n');
                self.at_line_start = true;
            }
            if segment.is_empty() {
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent {
                    self.buf.push_str(INDENT);
                }
                self.at_line_start = false;
            }
            self.buf.push_str(segment);
        }
        self
    }

    /// Write text on a line of its own
    pub fn write_line(&mut self, text: &str) -> &mut Self {
        if !self.at_line_start {
            self.new_line();
        }
        self.write(text).new_line()
    }

    /// End the current line
    pub fn new_line(&mut self) -> &mut Self {
        self.buf.push('\n');
        self.at_line_start = true;
        self
    }

    /// Ensure exactly one empty line before the next write
    ///
    /// Does nothing at the start of the file.
    pub fn blank_line(&mut self) -> &mut Self {
        if self.buf.is_empty() {
            return self;
        }
        if !self.at_line_start {
            self.new_line();
        }
        if !self.buf.ends_with("\n\n") {
            self.new_line();
        }
        self
    }

    /// Write `text` when `condition` holds
    pub fn conditional_write(&mut self, condition: bool, text: &str) -> &mut Self {
        if condition {
            self.write(text);
        }
        self
    }

    /// Write `{`, the indented body, and `}` without a trailing newline
    pub fn inline_block(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.write("{").new_line();
        self.indent += 1;
        body(self);
        if !self.at_line_start {
            self.new_line();
        }
        self.indent -= 1;
        self.write("}")
    }

    /// Run `body` at an absolute indentation level
    pub fn with_indentation_level(&mut self, level: usize, body: impl FnOnce(&mut Self)) -> &mut Self {
        let previous = self.indent;
        self.indent = level;
        body(self);
        self.indent = previous;
        self
    }

    /// Section heading
    pub fn heading(&mut self, text: &str, style: HeadingStyle) -> &mut Self {
        match style {
            HeadingStyle::Fat => self
                .write_line(FAT_RULE)
                .write_line(&format!("// {}", text))
                .write_line(FAT_RULE),
            HeadingStyle::Slim => self
                .write_line(&format!("// {}", text))
                .write_line(SLIM_RULE),
        }
    }

    /// JSDoc block from cleaned documentation, nothing for `None`
    pub fn jsdoc(&mut self, documentation: Option<&str>) -> &mut Self {
        let Some(documentation) = documentation else {
            return self;
        };

        self.write_line("/**");
        for line in documentation.lines() {
            let line = line.trim_end().replace("*/", "*\\/");
            if line.is_empty() {
                self.write_line(" *");
            } else {
                self.write_line(&format!(" * {}", line));
            }
        }
        self.write_line(" */")
    }

    /// Register `import { z } from 'zod'`
    pub fn import_zod(&mut self) -> &mut Self {
        self.zod = true;
        self
    }

    /// Register a named import; ignored in single-file output
    pub fn import(&mut self, from: &str, name: &str, type_only: bool) -> &mut Self {
        if !self.is_single_file() {
            self.imports.add(from, name, type_only);
        }
        self
    }

    /// Register the import of a resolved surface construct
    pub fn import_surface(&mut self, resolved: &Resolved) -> &mut Self {
        let import = &resolved.import;
        self.import(&import.path, &import.name, import.type_only)
    }

    /// Register a verbatim import line; ignored in single-file output
    pub fn import_verbatim(&mut self, line: &str) -> &mut Self {
        if !self.is_single_file() && !self.verbatim_imports.iter().any(|l| l == line) {
            self.verbatim_imports.push(line.to_string());
        }
        self
    }

    /// Register `name`, declared in `decl`, as referenced from this file
    pub fn reference(&mut self, decl: &Decl, name: &str) -> &mut Self {
        self.reference_as(decl, name, false)
    }

    /// Like [`FileWriter::reference`] for names only used as types
    pub fn reference_type(&mut self, decl: &Decl, name: &str) -> &mut Self {
        self.reference_as(decl, name, true)
    }

    fn reference_as(&mut self, decl: &Decl, name: &str, type_only: bool) -> &mut Self {
        if let Unit::Multi(current) = &self.unit {
            if current != decl {
                let path = decl.relative_to(current.dir);
                self.imports.add(&path, name, type_only);
            }
        }
        self
    }

    /// Text written so far, without imports
    pub fn body(&self) -> &str {
        &self.buf
    }

    /// The complete file: registered imports, then the body
    pub fn finish(self) -> String {
        let mut out = String::new();

        if !self.is_single_file() {
            if self.zod {
                out.push_str("import { z } from 'zod';\n");
            }
            for statement in self.imports.statements() {
                out.push_str(&statement.render());
                out.push('\n');
            }
            for line in &self.verbatim_imports {
                out.push_str(line);
                out.push('\n');
            }
            if !out.is_empty() {
                out.push('\n');
            }
        }

        out.push_str(self.buf.trim_start_matches('\n'));
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_block_indents() {
        let mut w = FileWriter::single();
        w.write("export const A = z.object(")
            .inline_block(|w| {
                w.write_line("a: z.string(),");
                w.write("b: z.object(").inline_block(|w| {
                    w.write_line("c: z.number(),");
                });
                w.write(",").new_line();
            })
            .write(")");

        assert_eq!(
            w.body(),
            "export const A = z.object({\n  a: z.string(),\n  b: z.object({\n    c: z.number(),\n  }),\n})"
        );
    }

    #[test]
    fn test_blank_lines_collapse() {
        let mut w = FileWriter::single();
        w.blank_line().write("a").blank_line().blank_line().write("b");
        assert_eq!(w.body(), "a\n\nb");
    }

    #[test]
    fn test_with_indentation_level() {
        let mut w = FileWriter::single();
        w.write_line("x =")
            .with_indentation_level(2, |w| {
                w.write_line("y");
            })
            .write_line("z");
        assert_eq!(w.body(), "x =\n    y\nz\n");
    }

    #[test]
    fn test_heading_styles() {
        let mut w = FileWriter::single();
        w.heading("USER SCHEMA", HeadingStyle::Slim);
        assert_eq!(
            w.body(),
            "// USER SCHEMA\n//------------------------------------------------------\n"
        );
    }

    #[test]
    fn test_jsdoc() {
        let mut w = FileWriter::single();
        w.jsdoc(Some("A user\n\nends */ here"));
        assert_eq!(w.body(), "/**\n * A user\n *\n * ends *\\/ here\n */\n");

        let mut empty = FileWriter::single();
        empty.jsdoc(None);
        assert_eq!(empty.body(), "");
    }

    #[test]
    fn test_import_set_merges_and_splits() {
        let mut set = ImportSet::default();
        set.add("@prisma/client", "Prisma", true);
        set.add("./UserSchema", "UserSchema", false);
        set.add("./UserSchema", "UserWithRelations", true);
        set.add("./UserSchema", "UserSchema", false);
        set.add("@prisma/client", "Prisma", false);

        let rendered: Vec<String> = set.statements().iter().map(|s| s.render()).collect();
        assert_eq!(
            rendered,
            vec![
                "import { Prisma } from '@prisma/client';",
                "import { UserSchema } from './UserSchema';",
                "import type { UserWithRelations } from './UserSchema';",
            ]
        );
    }

    #[test]
    fn test_references_resolve_relative_paths() {
        let mut w = FileWriter::multi(Decl::new(Directory::OutputTypeSchemas, "UserSelectSchema"));
        w.import_zod()
            .reference(&Decl::new(Directory::OutputTypeSchemas, "PostFindManyArgsSchema"), "PostFindManyArgsSchema")
            .reference(&Decl::new(Directory::ModelSchema, "UserSchema"), "UserSchema")
            .reference(&Decl::new(Directory::OutputTypeSchemas, "UserSelectSchema"), "UserSelectSchema");
        w.write_line("export default 1;");

        assert_eq!(
            w.finish(),
            "import { z } from 'zod';\n\
             import { PostFindManyArgsSchema } from './PostFindManyArgsSchema';\n\
             import { UserSchema } from '../modelSchema/UserSchema';\n\
             \n\
             export default 1;\n"
        );
    }

    #[test]
    fn test_single_file_ignores_imports() {
        let mut w = FileWriter::single();
        w.import_zod()
            .import("@prisma/client", "Prisma", true)
            .import_verbatim("import a from 'a';")
            .write_line("const a = 1;");
        assert_eq!(w.finish(), "const a = 1;\n");
    }
}
