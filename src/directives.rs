//! Documentation directive parsing
//!
//! Schema authors steer generation through directive lines embedded in
//! triple-slash documentation:
//!
//! ```text
//! /// A registered user
//! /// @zod.import(["import { isEmail } from '../validators'"])
//! /// @zod.validators([".refine((u) => isEmail(u.email))"])
//! ```
//!
//! A directive line has the shape `@<namespace>.<name>(<array>)` where the
//! argument is an array of single- or double-quoted string literals. Only the
//! `zod` namespace is interpreted. Unknown names are ignored, but a known
//! directive with a malformed argument list is a hard error so the author
//! never loses a directive silently.

use crate::GeneratorError;

/// Namespace interpreted by this generator
pub const DIRECTIVE_NAMESPACE: &str = "zod";

/// A single recognized directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Verbatim import statements
    Import(Vec<String>),
    /// Validator-chain fragments such as `.min(1)`
    Validators(Vec<String>),
    /// Error-object entries such as `invalid_type_error: 'x'`
    Error(Vec<String>),
    /// Places the field is omitted from (`model`, `input`)
    Omit(Vec<String>),
}

impl Directive {
    fn from_name(name: &str, args: Vec<String>) -> Option<Self> {
        match name {
            "import" => Some(Directive::Import(args)),
            "validators" => Some(Directive::Validators(args)),
            "error" => Some(Directive::Error(args)),
            "omit" => Some(Directive::Omit(args)),
            _ => None,
        }
    }

    fn is_known(name: &str) -> bool {
        matches!(name, "import" | "validators" | "error" | "omit")
    }
}

/// Where a field is omitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OmitTargets {
    /// Omitted from model schemas
    pub model: bool,
    /// Omitted from input object schemas
    pub input: bool,
}

/// All directives of one entity, merged in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Verbatim import statements
    pub imports: Vec<String>,
    /// Validator-chain fragments
    pub validators: Vec<String>,
    /// Error-object entries
    pub error_entries: Vec<String>,
    /// Omit targets
    pub omit: OmitTargets,
}

impl Directives {
    /// The error entries rendered as an object literal
    pub fn error_object(&self) -> Option<String> {
        if self.error_entries.is_empty() {
            None
        } else {
            Some(format!("{{ {} }}", self.error_entries.join(", ")))
        }
    }

    fn push(&mut self, directive: Directive) {
        match directive {
            Directive::Import(lines) => self.imports.extend(lines),
            Directive::Validators(chain) => self.validators.extend(chain),
            Directive::Error(entries) => self.error_entries.extend(entries),
            Directive::Omit(targets) => {
                for target in targets {
                    match target.as_str() {
                        "model" => self.omit.model = true,
                        "input" => self.omit.input = true,
                        _ => {}
                    }
                }
            }
        }
    }
}

/// Parsed documentation of an entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
    /// Directives found in the documentation
    pub directives: Directives,
    /// Documentation with directive lines removed, `None` if nothing is left
    pub text: Option<String>,
}

/// Parse the documentation attached to `entity`
///
/// `entity` names the model, enum or field (`User.email`) in errors.
pub fn parse_documentation(
    entity: &str,
    documentation: Option<&str>,
) -> Result<Documentation, GeneratorError> {
    let mut parsed = Documentation::default();
    let Some(documentation) = documentation else {
        return Ok(parsed);
    };

    let mut text_lines = Vec::new();

    for raw_line in documentation.lines() {
        let line = raw_line.trim();

        match parse_directive_line(line) {
            Ok(DirectiveLine::Text) => text_lines.push(raw_line.trim_end()),
            Ok(DirectiveLine::Ignored) => {}
            Ok(DirectiveLine::Directive(directive)) => parsed.directives.push(directive),
            Err(reason) => {
                return Err(GeneratorError::DirectiveParse {
                    entity: entity.to_string(),
                    line: line.to_string(),
                    reason,
                })
            }
        }
    }

    // Drop leading and trailing blank lines left behind by removed directives
    while text_lines.first().is_some_and(|l| l.trim().is_empty()) {
        text_lines.remove(0);
    }
    while text_lines.last().is_some_and(|l| l.trim().is_empty()) {
        text_lines.pop();
    }

    if !text_lines.is_empty() {
        parsed.text = Some(text_lines.join("\n"));
    }

    Ok(parsed)
}

/// Classification of one documentation line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveLine {
    /// Plain documentation text, kept
    Text,
    /// A directive of this namespace this generator does not know, dropped
    Ignored,
    /// A recognized directive
    Directive(Directive),
}

/// Classify a single trimmed documentation line
///
/// Returns the reason as `Err` when a known directive is malformed.
pub fn parse_directive_line(line: &str) -> Result<DirectiveLine, String> {
    let Some(rest) = line.strip_prefix('@') else {
        return Ok(DirectiveLine::Text);
    };

    let Some((namespace, rest)) = rest.split_once('.') else {
        return Ok(DirectiveLine::Text);
    };

    if namespace != DIRECTIVE_NAMESPACE {
        return Ok(DirectiveLine::Text);
    }

    let name_end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (name, args) = rest.split_at(name_end);

    if !Directive::is_known(name) {
        return Ok(DirectiveLine::Ignored);
    }

    let args = args.trim();
    let inner = args
        .strip_prefix('(')
        .and_then(|a| a.strip_suffix(')'))
        .ok_or_else(|| format!("expected `@{}.{}([...])`", namespace, name))?;

    let values = parse_string_array(inner)?;

    Ok(Directive::from_name(name, values).map_or(DirectiveLine::Ignored, DirectiveLine::Directive))
}

/// Parse `["a", 'b']` into its string literals
pub fn parse_string_array(input: &str) -> Result<Vec<String>, String> {
    let mut chars = input.trim().chars().peekable();
    let mut values = Vec::new();

    if chars.next() != Some('[') {
        return Err("argument must be an array of string literals".to_string());
    }

    loop {
        skip_whitespace(&mut chars);

        match chars.next() {
            Some(']') => break,
            Some(quote @ ('"' | '\'')) => {
                values.push(parse_quoted(&mut chars, quote)?);

                skip_whitespace(&mut chars);
                match chars.next() {
                    Some(',') => continue,
                    Some(']') => break,
                    Some(c) => return Err(format!("unexpected `{}` after string literal", c)),
                    None => return Err("unterminated array".to_string()),
                }
            }
            Some(c) => return Err(format!("expected a string literal, found `{}`", c)),
            None => return Err("unterminated array".to_string()),
        }
    }

    skip_whitespace(&mut chars);
    if let Some(c) = chars.next() {
        return Err(format!("unexpected `{}` after array", c));
    }

    Ok(values)
}

fn skip_whitespace(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

/// Read a string literal body up to the closing `quote`
fn parse_quoted(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    quote: char,
) -> Result<String, String> {
    let mut value = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(escaped) => value.push(escaped),
                None => break,
            },
            c if c == quote => return Ok(value),
            c => value.push(c),
        }
    }

    Err("unterminated string literal".to_string())
}
