//! Named input events and the bindings that route them to locomotion actions.

use std::collections::HashMap;

use engine::input_log;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    Pressed,
    Released,
}

/// Raw input as delivered by the platform layer.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Continuous axis, roughly -1..1, sent every frame
    Axis { name: String, value: f32 },
    /// Discrete button edge
    Action { name: String, phase: ActionPhase },
}

impl InputEvent {
    pub fn axis(name: &str, value: f32) -> Self {
        InputEvent::Axis {
            name: name.to_string(),
            value,
        }
    }

    pub fn action(name: &str, phase: ActionPhase) -> Self {
        InputEvent::Action {
            name: name.to_string(),
            phase,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocomotionAction {
    MoveForward,
    MoveRight,
    Teleport,
}

/// An event resolved against the bindings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundInput {
    Axis(LocomotionAction, f32),
    Action(LocomotionAction),
}

#[derive(Debug, Default)]
pub struct InputBindings {
    axes: HashMap<String, LocomotionAction>,
    actions: HashMap<(String, ActionPhase), LocomotionAction>,
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_axis(&mut self, name: &str, action: LocomotionAction) {
        self.axes.insert(name.to_string(), action);
    }

    pub fn bind_action(&mut self, name: &str, phase: ActionPhase, action: LocomotionAction) {
        self.actions.insert((name.to_string(), phase), action);
    }

    /// Look up what an event means, or `None` if nothing is bound to it.
    pub fn resolve(&self, event: &InputEvent) -> Option<BoundInput> {
        match event {
            InputEvent::Axis { name, value } => self
                .axes
                .get(name)
                .map(|action| BoundInput::Axis(*action, *value)),
            InputEvent::Action { name, phase } => {
                let bound = self
                    .actions
                    .get(&(name.clone(), *phase))
                    .map(|action| BoundInput::Action(*action));
                if bound.is_none() {
                    input_log!(TRACE, "unbound action {} {:?}", name, phase);
                }
                bound
            }
        }
    }
}

/// Turns an analog trigger into press/release edges.
#[derive(Clone, Debug)]
pub struct TriggerEdge {
    threshold: f32,
    was_pressed: bool,
}

impl TriggerEdge {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            was_pressed: false,
        }
    }

    /// Feed this frame's trigger value; returns the edge crossed, if any.
    pub fn update(&mut self, value: f32) -> Option<ActionPhase> {
        let is_pressed = value >= self.threshold;

        let edge = match (self.was_pressed, is_pressed) {
            (false, true) => Some(ActionPhase::Pressed),
            (true, false) => Some(ActionPhase::Released),
            _ => None,
        };

        self.was_pressed = is_pressed;
        edge
    }

    pub fn is_pressed(&self) -> bool {
        self.was_pressed
    }
}
