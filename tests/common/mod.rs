use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use clearloop::client::config::AppConfig;
use clearloop::client::core::errors::{FrameError, SetupError};
use clearloop::client::core::{ClearPass, FrameOutcome, InputEvent, PresentationBackend};
use winit::dpi::PhysicalSize;

/// Resources a backend acquires during setup, in order
pub const RESOURCES: [&str; 4] = ["windowing", "window", "context", "renderer"];

/// A call made into the backend
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Acquire(&'static str),
    Poll,
    Wait,
    QuerySize,
    Present(ClearPass),
    Release(&'static str),
}

pub type Journal = Rc<RefCell<Vec<Call>>>;

/// Backend that replays scripted input and records every call made into it.
///
/// Once the script runs out, every poll reports a quit so a test can never loop forever.
pub struct ScriptedBackend {
    journal: Journal,
    polls: VecDeque<Vec<InputEvent>>,
    sizes: RefCell<VecDeque<PhysicalSize<u32>>>,
    size: Cell<PhysicalSize<u32>>,
    outcomes: VecDeque<Result<FrameOutcome, FrameError>>,
}

impl ScriptedBackend {
    pub fn new(journal: Journal) -> Self {
        journal
            .borrow_mut()
            .extend(RESOURCES.into_iter().map(Call::Acquire));

        ScriptedBackend {
            journal,
            polls: VecDeque::new(),
            sizes: RefCell::default(),
            size: Cell::new(PhysicalSize::new(1280, 720)),
            outcomes: VecDeque::new(),
        }
    }

    /// Every call made into this backend so far
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Events returned by the next poll
    pub fn then_poll(mut self, events: Vec<InputEvent>) -> Self {
        self.polls.push_back(events);
        self
    }

    /// Polls that return nothing
    pub fn then_idle(mut self, polls: usize) -> Self {
        for _ in 0..polls {
            self.polls.push_back(Vec::new());
        }
        self
    }

    /// Sizes reported by consecutive size queries, the last one sticks
    pub fn with_sizes(mut self, sizes: Vec<PhysicalSize<u32>>) -> Self {
        self.sizes = RefCell::new(sizes.into());
        self
    }

    /// Results of consecutive presents, [`FrameOutcome::Presented`] once exhausted
    pub fn with_outcomes(mut self, outcomes: Vec<Result<FrameOutcome, FrameError>>) -> Self {
        self.outcomes = outcomes.into();
        self
    }
}

impl ScriptedBackend {
    fn replay(&mut self, events: &mut Vec<InputEvent>) {
        match self.polls.pop_front() {
            Some(scripted) => events.extend(scripted),
            None => events.push(InputEvent::QuitRequested),
        }
    }
}

impl PresentationBackend for ScriptedBackend {
    fn setup(_config: &AppConfig) -> Result<Self, SetupError> {
        Ok(ScriptedBackend::new(Journal::default()))
    }

    fn poll_events(&mut self, events: &mut Vec<InputEvent>) {
        self.journal.borrow_mut().push(Call::Poll);
        self.replay(events);
    }

    fn wait_events(&mut self, events: &mut Vec<InputEvent>) {
        self.journal.borrow_mut().push(Call::Wait);
        self.replay(events);
    }

    fn viewport_size(&self) -> PhysicalSize<u32> {
        self.journal.borrow_mut().push(Call::QuerySize);
        if let Some(next) = self.sizes.borrow_mut().pop_front() {
            self.size.set(next);
        }
        self.size.get()
    }

    fn clear_and_present(&mut self, pass: &ClearPass) -> Result<FrameOutcome, FrameError> {
        self.journal.borrow_mut().push(Call::Present(*pass));
        self.outcomes.pop_front().unwrap_or(Ok(FrameOutcome::Presented))
    }

    fn shutdown(self) {
        self.journal
            .borrow_mut()
            .extend(RESOURCES.into_iter().rev().map(Call::Release));
    }
}

/// Backend whose setup always fails
pub struct BrokenBackend;

impl PresentationBackend for BrokenBackend {
    fn setup(_config: &AppConfig) -> Result<Self, SetupError> {
        Err(SetupError::NoAdapter)
    }

    fn poll_events(&mut self, _events: &mut Vec<InputEvent>) {
        unreachable!("setup never succeeds")
    }

    fn wait_events(&mut self, _events: &mut Vec<InputEvent>) {
        unreachable!("setup never succeeds")
    }

    fn viewport_size(&self) -> PhysicalSize<u32> {
        unreachable!("setup never succeeds")
    }

    fn clear_and_present(&mut self, _pass: &ClearPass) -> Result<FrameOutcome, FrameError> {
        unreachable!("setup never succeeds")
    }

    fn shutdown(self) {
        unreachable!("setup never succeeds")
    }
}

/// Every poll and wait recorded in the journal, in order
pub fn event_reads(journal: &Journal) -> Vec<Call> {
    journal
        .borrow()
        .iter()
        .filter(|call| matches!(call, Call::Poll | Call::Wait))
        .cloned()
        .collect()
}

/// Every present recorded in the journal
pub fn presents(journal: &Journal) -> Vec<ClearPass> {
    journal
        .borrow()
        .iter()
        .filter_map(|call| match call {
            Call::Present(pass) => Some(*pass),
            _ => None,
        })
        .collect()
}
