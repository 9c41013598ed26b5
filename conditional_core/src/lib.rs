//! # Conditional Core
//!
//! Decides which protocol effects apply to a running dialogue. A DGDL protocol
//! attaches conditionals to its moves; each conditional lists requirements that
//! must all hold, the effects to apply when they do, and an optional
//! else-if/else fallback chain.
//!
//! ## Core Components
//!
//! - **requirements**: The requirement kinds a conditional can test
//! - **registry**: Maps requirement kinds to evaluators, open for extension
//! - **evaluators**: Built-in event, role, store and external-arbitration checks
//! - **resolver**: Walks a conditional chain and selects the effect set
//! - **arbitration**: Client for delegating a decision to an external service
//! - **metadata**: Best-effort player and description extraction from DGDL text
//!
//! ## Example
//!
//! ```no_run
//! use conditional_core::{Conditional, ConditionalResolver, EngineConfig, RequirementRegistry};
//! use dialogue_state::DialogueState;
//!
//! let registry = RequirementRegistry::from_config(&EngineConfig::default());
//! let resolver = ConditionalResolver::new(&registry);
//! let conditional: Conditional = serde_json::from_str(r#"{"requirements": [], "effects": []}"#).unwrap();
//! let effects = resolver.resolve(&DialogueState::new(), &conditional, None).unwrap();
//! assert!(effects.is_empty());
//! ```

pub mod arbitration;
pub mod config;
pub mod error;
pub mod evaluators;
pub mod interaction;
pub mod metadata;
pub mod registry;
pub mod requirements;
pub mod resolver;

pub use arbitration::*;
pub use config::*;
pub use error::*;
pub use evaluators::*;
pub use interaction::*;
pub use metadata::*;
pub use registry::*;
pub use requirements::*;
pub use resolver::*;
