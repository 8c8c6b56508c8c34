use eframe::egui::{InputState, Key};

use super::camera::MoveState;

/// Fixed mapping from physical keys to semantic actions. Every field is
/// declared up front with a default; nothing is injected dynamically.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct KeyBindings {
    pub(in crate::app) first_person_view: Key,
    pub(in crate::app) top_view: Key,
    pub(in crate::app) user_interface: Key,
    pub(in crate::app) mini_map: Key,
    pub(in crate::app) help: Key,
    pub(in crate::app) statistics: Key,
    pub(in crate::app) forward: Key,
    pub(in crate::app) backward: Key,
    pub(in crate::app) strafe_left: Key,
    pub(in crate::app) strafe_right: Key,
    pub(in crate::app) up: Key,
    pub(in crate::app) up_alt: Key,
    pub(in crate::app) down: Key,
    pub(in crate::app) rotate_left: Key,
    pub(in crate::app) rotate_left_alt: Key,
    pub(in crate::app) rotate_right: Key,
    pub(in crate::app) rotate_right_alt: Key,
    pub(in crate::app) rotate_up: Key,
    pub(in crate::app) rotate_down: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            first_person_view: Key::Num1,
            top_view: Key::Num2,
            user_interface: Key::U,
            mini_map: Key::M,
            help: Key::H,
            statistics: Key::C,
            forward: Key::W,
            backward: Key::S,
            strafe_left: Key::A,
            strafe_right: Key::D,
            up: Key::P,
            up_alt: Key::Space,
            down: Key::L,
            rotate_left: Key::Q,
            rotate_left_alt: Key::ArrowLeft,
            rotate_right: Key::E,
            rotate_right_alt: Key::ArrowRight,
            rotate_up: Key::ArrowUp,
            rotate_down: Key::ArrowDown,
        }
    }
}

impl KeyBindings {
    /// Movement keys are sampled every frame rather than edge-triggered.
    pub(in crate::app) fn sample_moves(&self, input: &InputState) -> MoveState {
        MoveState {
            forward: input.key_down(self.forward),
            backward: input.key_down(self.backward),
            left: input.key_down(self.strafe_left),
            right: input.key_down(self.strafe_right),
            up: input.key_down(self.up) || input.key_down(self.up_alt),
            down: input.key_down(self.down),
            rotate_left: input.key_down(self.rotate_left) || input.key_down(self.rotate_left_alt),
            rotate_right: input.key_down(self.rotate_right)
                || input.key_down(self.rotate_right_alt),
            rotate_up: input.key_down(self.rotate_up),
            rotate_down: input.key_down(self.rotate_down),
        }
    }

    /// Rows for the help panel.
    pub(in crate::app) fn help_rows(&self) -> Vec<(&'static str, String)> {
        let pair = |a: Key, b: Key| format!("{} / {}", a.name(), b.name());
        vec![
            ("First-person view", self.first_person_view.name().to_owned()),
            ("Top view", self.top_view.name().to_owned()),
            ("Move forward / backward", pair(self.forward, self.backward)),
            (
                "Strafe left / right",
                pair(self.strafe_left, self.strafe_right),
            ),
            (
                "Strafe up",
                format!("{} / {}", self.up.name(), self.up_alt.name()),
            ),
            ("Strafe down", self.down.name().to_owned()),
            (
                "Rotate left / right",
                format!(
                    "{} / {} / {} / {}",
                    self.rotate_left.name(),
                    self.rotate_left_alt.name(),
                    self.rotate_right.name(),
                    self.rotate_right_alt.name()
                ),
            ),
            (
                "Rotate up / down",
                pair(self.rotate_up, self.rotate_down),
            ),
            ("Interface panel", self.user_interface.name().to_owned()),
            ("Mini-map", self.mini_map.name().to_owned()),
            ("Help", self.help.name().to_owned()),
            ("Statistics", self.statistics.name().to_owned()),
        ]
    }
}
