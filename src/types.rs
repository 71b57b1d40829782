//! Scalar type classification and mapping to Zod primitives
//!
//! The metamodel names scalar types by string. The set is closed: anything
//! outside it is rejected during metamodel construction rather than guessed.

/// A scalar type of the datamodel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// `String`
    String,
    /// `Int`
    Int,
    /// `BigInt`
    BigInt,
    /// `Float`
    Float,
    /// `Decimal`, arbitrary precision
    Decimal,
    /// `Boolean`
    Boolean,
    /// `DateTime`
    DateTime,
    /// `Json`
    Json,
    /// `Bytes`
    Bytes,
}

impl ScalarKind {
    /// Look up a scalar by its metamodel name
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "String" => ScalarKind::String,
            "Int" => ScalarKind::Int,
            "BigInt" => ScalarKind::BigInt,
            "Float" => ScalarKind::Float,
            "Decimal" => ScalarKind::Decimal,
            "Boolean" => ScalarKind::Boolean,
            "DateTime" => ScalarKind::DateTime,
            "Json" => ScalarKind::Json,
            "Bytes" => ScalarKind::Bytes,
            _ => return None,
        };
        Some(kind)
    }

    /// The Zod primitive for a plain scalar, `None` for special scalars
    pub fn primitive(&self, coerce_date: bool) -> Option<ZodPrimitive> {
        let primitive = match self {
            ScalarKind::String => ZodPrimitive::call("z.string"),
            ScalarKind::Int => ZodPrimitive::call("z.number").with_suffix(".int()"),
            ScalarKind::BigInt => ZodPrimitive::call("z.bigint"),
            ScalarKind::Float => ZodPrimitive::call("z.number"),
            ScalarKind::Boolean => ZodPrimitive::call("z.boolean"),
            ScalarKind::DateTime if coerce_date => ZodPrimitive::call("z.coerce.date"),
            ScalarKind::DateTime => ZodPrimitive::call("z.date"),
            ScalarKind::Bytes => ZodPrimitive::call("z.instanceof").with_argument("Uint8Array"),
            ScalarKind::Decimal | ScalarKind::Json => return None,
        };
        Some(primitive)
    }

    /// Whether a static default of this scalar can be written as a literal
    pub fn supports_literal_default(&self) -> bool {
        matches!(
            self,
            ScalarKind::String | ScalarKind::Int | ScalarKind::Float | ScalarKind::Boolean
        )
    }
}

/// A scalar referenced from an input type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputScalar {
    /// A datamodel scalar
    Kind(ScalarKind),
    /// The literal `true` (aggregate selections)
    True,
    /// The `Null` pseudo-type; nullability is carried by the argument
    Null,
}

impl InputScalar {
    /// Look up an input scalar by its schema name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "True" | "true" => Some(InputScalar::True),
            "Null" | "null" => Some(InputScalar::Null),
            other => ScalarKind::from_name(other).map(InputScalar::Kind),
        }
    }
}

/// A Zod constructor call such as `z.number().int()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodPrimitive {
    /// Callee, e.g. `z.number`
    pub call: &'static str,
    /// Fixed first argument, e.g. `Uint8Array` for `z.instanceof`
    pub argument: Option<&'static str>,
    /// Chain written after the call, e.g. `.int()`
    pub suffix: &'static str,
}

impl ZodPrimitive {
    const fn call(call: &'static str) -> Self {
        Self {
            call,
            argument: None,
            suffix: "",
        }
    }

    const fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    const fn with_argument(mut self, argument: &'static str) -> Self {
        self.argument = Some(argument);
        self
    }

    /// Render the call, passing `error` as the params object if present
    pub fn render(&self, error: Option<&str>) -> String {
        let args = match (self.argument, error) {
            (Some(arg), Some(err)) => format!("{}, {}", arg, err),
            (Some(arg), None) => arg.to_string(),
            (None, Some(err)) => err.to_string(),
            (None, None) => String::new(),
        };
        format!("{}({}){}", self.call, args, self.suffix)
    }
}
