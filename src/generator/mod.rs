//! Generation runs
//!
//! A [`Generator`] owns the two initialize-once values of a run: the resolved
//! [`Config`] and the [`ExtendedDmmf`] derived from it. Both are read-only once
//! set; a fresh `Generator` or [`Generator::reset`] starts a new run.

pub mod imports;
pub mod multi_file;
pub mod single_file;

use crate::codegen::Context;
use crate::config::{Config, GeneratorOptions, Slot};
use crate::dmmf::Document;
use crate::extended::ExtendedDmmf;
use crate::surface::Surface;
use crate::{GeneratedFile, GeneratorError};
use tracing::{debug, info};

/// One generation run
#[derive(Debug)]
pub struct Generator {
    config: Slot<Config>,
    dmmf: Slot<ExtendedDmmf>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// A run with nothing initialized
    pub const fn new() -> Self {
        Self {
            config: Slot::new("config"),
            dmmf: Slot::new("dmmf"),
        }
    }

    /// Resolve and store the configuration
    pub fn initialize_config(&self, options: GeneratorOptions) -> Result<&Config, GeneratorError> {
        if self.config.is_initialized() {
            return Err(GeneratorError::AlreadyInitialized("config"));
        }
        let config = Config::from_options(options)?;
        debug!(?config, "resolved configuration");
        self.config.initialize(config)
    }

    /// Derive and store the extended metamodel
    ///
    /// Requires the configuration, since variant flags depend on it.
    pub fn initialize_dmmf(&self, document: &Document) -> Result<&ExtendedDmmf, GeneratorError> {
        let config = self.config.get()?;
        if self.dmmf.is_initialized() {
            return Err(GeneratorError::AlreadyInitialized("dmmf"));
        }
        self.dmmf.initialize(ExtendedDmmf::new(document, config)?)
    }

    /// The resolved configuration
    pub fn config(&self) -> Result<&Config, GeneratorError> {
        self.config.get()
    }

    /// The extended metamodel
    pub fn dmmf(&self) -> Result<&ExtendedDmmf, GeneratorError> {
        self.dmmf.get()
    }

    /// Forget both values so the run object can be initialized again
    pub fn reset(&mut self) {
        self.config.reset();
        self.dmmf.reset();
    }

    /// Write every output file of the run
    pub fn generate(&self) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let config = self.config()?;
        let dmmf = self.dmmf()?;
        let surface = Surface::new(config);
        let ctx = Context {
            config,
            dmmf,
            surface: &surface,
        };

        let files = if config.is_multi_file() {
            multi_file::generate(&ctx)
        } else {
            vec![single_file::generate(&ctx)]
        };

        info!(
            files = files.len(),
            multi_file = config.is_multi_file(),
            native = surface.is_native(),
            "generated zod schemas"
        );
        Ok(files)
    }
}
