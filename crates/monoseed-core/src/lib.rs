//! monoseed core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the monoseed
//! monorepo scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          monoseed-cli (CLI)             │
//! │   flags, config file, prompts, output   │
//! └──────────────────┬──────────────────────┘
//!                    │ ScaffoldOptions::resolve → ScaffoldConfig
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │            (ScaffoldService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  Filesystem, ProcessRunner, Addons, ... │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    monoseed-adapters (Infrastructure)   │
//! │  LocalFilesystem, SystemProcessRunner   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use monoseed_core::prelude::*;
//!
//! let config = ScaffoldOptions {
//!     project_name: Some("my-project".into()),
//!     all: true,
//!     ..Default::default()
//! }
//! .resolve()?;
//!
//! let service = ScaffoldService::new(filesystem, runner, probe, addons);
//! let result = service.scaffold(&config, &SilentSink);
//! assert!(result.success());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ScaffoldResult, ScaffoldService, ScaffoldWarning,
        ports::{
            AddonCatalog, CommandSpec, ConnectivityProbe, Filesystem, ProcessOutcome,
            ProcessOutput, ProcessRunner, ProgressSink, SilentSink, StepStatus,
        },
    };
    pub use crate::domain::{
        AddonBundle, License, ModuleSelection, OptionalModule, PackageManager, PlannedAction,
        ProjectName, ScaffoldConfig, ScaffoldOptions, Stage, TemplateSource, TemplateVariables,
    };
    pub use crate::error::{MonoseedError, MonoseedResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
