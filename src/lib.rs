//! zod-prisma-gen library
//!
//! This crate turns a Prisma DMMF document into Zod validation schemas,
//! written as TypeScript source, for every model, enum, input object and
//! operation argument type.

#![deny(warnings)]
#![deny(missing_docs)]

pub mod codegen;
pub mod config;
pub mod directives;
pub mod dmmf;
pub mod extended;
pub mod generator;
pub mod surface;
pub mod types;
pub mod writer;

use config::GeneratorOptions;
use dmmf::Document;
use generator::Generator;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A run value was initialized twice without a reset
    #[error("{0} is already initialized")]
    AlreadyInitialized(&'static str),

    /// A run value was read before it was initialized
    #[error("{0} is not initialized")]
    NotInitialized(&'static str),

    /// A recognized documentation directive has a malformed argument list
    #[error("Invalid directive on {entity}: {reason} in `{line}`")]
    DirectiveParse {
        /// Model, enum or field carrying the directive
        entity: String,
        /// Raw directive line
        line: String,
        /// What is wrong with it
        reason: String,
    },

    /// Encountered an unknown or unsupported field type
    #[error("Unknown field type {type_name} for {entity}.{field}")]
    UnknownFieldType {
        /// Owning model, composite type or input object
        entity: String,
        /// Field or argument name
        field: String,
        /// Referenced type name
        type_name: String,
    },

    /// Invalid generator options
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to decode the JSON request
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A generated file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path with `/` separators, e.g. `modelSchema/UserSchema.ts`
    pub name: String,
    /// File content
    pub content: String,
}

/// A generation request as read by the binary
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// The schema document
    pub dmmf: Document,
    /// Generator options
    #[serde(default)]
    pub options: GeneratorOptions,
}

/// Generate Zod schemas for a schema document
///
/// This is the main entry point for the code generator.
pub fn generate(
    document: &Document,
    options: GeneratorOptions,
) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let generator = Generator::new();
    generator.initialize_config(options)?;
    generator.initialize_dmmf(document)?;
    generator.generate()
}

/// Generate Zod schemas from a JSON-encoded [`GenerateRequest`]
pub fn generate_from_bytes(bytes: &[u8]) -> Result<Vec<GeneratedFile>, GeneratorError> {
    let request: GenerateRequest = serde_json::from_slice(bytes)?;
    generate(&request.dmmf, request.options)
}
