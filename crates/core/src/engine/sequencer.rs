// Step sequencer - the finite driver on top of the binding engine. External
// drivers (a wizard, a scripted runner) pull units, render them however they
// like, and submit answers; "back" is re-submitting a previous unit's answer.

use crate::engine::binding::BindingEngine;
use crate::engine::{Answer, ResolutionUnit};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    AwaitingAnswer,
    Done,
}

pub struct StepSequencer {
    engine: BindingEngine,
    state: SequencerState,
    pending: Option<ResolutionUnit>,
}

impl StepSequencer {
    pub fn new(engine: BindingEngine) -> Self {
        Self {
            engine,
            state: SequencerState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn engine(&self) -> &BindingEngine {
        &self.engine
    }

    pub fn into_engine(self) -> BindingEngine {
        self.engine
    }

    /// The next outstanding demand. While an answer is awaited the pending
    /// unit is re-yielded unchanged; once no demand remains the sequencer is
    /// done and stays done.
    pub fn next_unit(&mut self) -> Result<Option<ResolutionUnit>> {
        match self.state {
            SequencerState::Done => Ok(None),
            SequencerState::AwaitingAnswer => Ok(self.pending.clone()),
            SequencerState::Idle => match self.engine.next_demand()? {
                Some(unit) => {
                    self.pending = Some(unit.clone());
                    self.state = SequencerState::AwaitingAnswer;
                    Ok(Some(unit))
                }
                None => {
                    self.state = SequencerState::Done;
                    Ok(None)
                }
            },
        }
    }

    /// Whether presenting a step is needed at all. Most table layouts
    /// resolve most bindings automatically; a driver skips its step when
    /// this is false.
    pub fn is_required(&mut self) -> Result<bool> {
        Ok(self.next_unit()?.is_some())
    }

    /// Binds `answer` into the target of `unit` and re-evaluates.
    pub fn submit(&mut self, unit: &ResolutionUnit, answer: Answer) -> Result<()> {
        self.engine.submit(unit, answer)?;
        self.pending = None;
        self.state = SequencerState::Idle;
        Ok(())
    }
}
