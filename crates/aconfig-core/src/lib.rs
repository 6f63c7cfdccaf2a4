//! Flag declaration parsing and layered override resolution
//!
//! This crate turns flag declaration files and ordered layers of override
//! files into one resolved value and permission per flag:
//!
//! - **Line grammar**: tolerant `key: value` / block lexer shared by both file kinds
//! - **Declarations**: package and flag names, validated for consistency
//! - **Overrides**: ordered `name`/`state`/`permission` fields per file
//! - **Layers**: folder precedence for debuggable and release builds
//! - **Resolver**: fold of all override assignments into a [`ResolvedTable`]
//!
//! # Example
//!
//! ```ignore
//! use aconfig_core::{GeneratorConfig, resolve_config};
//!
//! let config = GeneratorConfig::load("aconfig.toml".as_ref())?;
//! let table = resolve_config(&config)?;
//! for flag in &table.flags {
//!     println!("{} = {}", flag.name, flag.value);
//! }
//! ```

pub mod config;
pub mod declaration;
pub mod error;
pub mod layer;
pub mod overrides;
pub mod plan;
pub mod policy;
pub mod release;
pub mod resolver;
pub mod state;
pub mod syntax;

pub use config::{CONFIG_FILE_NAME, GeneratorConfig, OutputKind};
pub use declaration::{DeclarationFile, DeclarationSet, FlagDeclaration, is_valid_flag_name};
pub use error::{Error, Result};
pub use layer::{LayerPlan, LayerSettings, OverrideLayer};
pub use overrides::{OverrideField, OverrideKey};
pub use plan::{ResolutionPlan, resolve_config};
pub use policy::{ResolveOptions, StatePolicy, UndeclaredPolicy, WritablePolicy};
pub use resolver::{Origin, ResolvedFlag, ResolvedTable, Resolver};
pub use state::{FlagState, Permission};
