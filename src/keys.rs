// Pure keyboard mapping, shared by the keydown handler and host tests.
use starburst_core::VisualMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    TogglePlayback,
    CycleMode,
    SelectMode(VisualMode),
    RandomizeOrbits,
    ShiftStars,
    ToggleOverlay,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Spacebar" => Some(KeyAction::TogglePlayback),
        "m" | "M" => Some(KeyAction::CycleMode),
        "1" => Some(KeyAction::SelectMode(VisualMode::Universe)),
        "2" => Some(KeyAction::SelectMode(VisualMode::Firework)),
        "o" | "O" => Some(KeyAction::RandomizeOrbits),
        "s" | "S" => Some(KeyAction::ShiftStars),
        "h" | "H" => Some(KeyAction::ToggleOverlay),
        _ => None,
    }
}

/// Keys whose browser default (page scroll) must be suppressed.
#[inline]
pub fn suppresses_default(action: KeyAction) -> bool {
    matches!(action, KeyAction::TogglePlayback)
}
