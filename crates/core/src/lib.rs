pub mod engine;
pub mod error;
pub mod model;
pub mod registry;
pub mod resolver;

pub use engine::binding::BindingEngine;
pub use engine::sequencer::{SequencerState, StepSequencer};
pub use engine::{Answer, ResolutionUnit};
pub use error::{CoreError, Result};
pub use registry::ResourceRegistry;
pub use resolver::context::ResolutionContext;
