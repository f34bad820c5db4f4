//! Operator commands and their key bindings

/// A discrete operator action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    NextItem,
    PreviousItem,
    ToggleVisibility,
    ToggleBoundingBox,
    ToggleEdges,
    ToggleBackground,
    Reload,
    ResetView,
    Statistics,
    GrowPoints,
    ShrinkPoints,
    Quit,
}

impl Command {
    pub const ALL: [Command; 12] = [
        Command::ResetView,
        Command::ToggleBackground,
        Command::PreviousItem,
        Command::ToggleVisibility,
        Command::NextItem,
        Command::ToggleBoundingBox,
        Command::Reload,
        Command::ToggleEdges,
        Command::Statistics,
        Command::GrowPoints,
        Command::ShrinkPoints,
        Command::Quit,
    ];

    /// Command bound to a typed character, case-insensitive
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key.to_ascii_uppercase().as_str() {
            "L" => Command::NextItem,
            "J" => Command::PreviousItem,
            "K" => Command::ToggleVisibility,
            "B" => Command::ToggleBoundingBox,
            "E" => Command::ToggleEdges,
            "C" => Command::ToggleBackground,
            "O" => Command::Reload,
            "R" => Command::ResetView,
            "S" => Command::Statistics,
            "+" | "=" => Command::GrowPoints,
            "-" => Command::ShrinkPoints,
            "Q" => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    pub fn key(self) -> &'static str {
        match self {
            Command::NextItem => "L",
            Command::PreviousItem => "J",
            Command::ToggleVisibility => "K",
            Command::ToggleBoundingBox => "B",
            Command::ToggleEdges => "E",
            Command::ToggleBackground => "C",
            Command::Reload => "O",
            Command::ResetView => "R",
            Command::Statistics => "S",
            Command::GrowPoints => "+",
            Command::ShrinkPoints => "-",
            Command::Quit => "Q",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::NextItem => "Next item",
            Command::PreviousItem => "Previous item",
            Command::ToggleVisibility => "Toggle item visibility (on/off)",
            Command::ToggleBoundingBox => "Toggle bounding box outline (on/off)",
            Command::ToggleEdges => "Toggle edges (on/off)",
            Command::ToggleBackground => "Toggle background color (black/white)",
            Command::Reload => "Load new items (folder)",
            Command::ResetView => "Reset view",
            Command::Statistics => "Compute parameter statistics",
            Command::GrowPoints => "Increase point size",
            Command::ShrinkPoints => "Decrease point size",
            Command::Quit => "Quit",
        }
    }
}

/// Key reference printed at startup
pub fn help_text() -> String {
    Command::ALL
        .iter()
        .map(|command| format!("    [{}] {}\n", command.key(), command.description()))
        .collect()
}
