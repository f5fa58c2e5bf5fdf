use serde::Serialize;

pub const GOAL_OUTCOME: &str = "Goal";

/// Carries longer than this (seconds) are drawn as extended carries.
pub const EXTENDED_CARRY_MIN_SECS: f64 = 3.5;

/// Completed passes longer than this (pitch units) are drawn as long passes.
pub const LONG_PASS_MIN_LENGTH: f64 = 40.0;

/// `duel.type.id` codes counted as a won defensive duel (11 is a tackle).
pub const SUCCESSFUL_DUEL_CODES: &[u32] = &[11, 4, 15, 16, 17];

/// `interception.outcome.id` codes counted as a won interception.
pub const SUCCESSFUL_INTERCEPTION_CODES: &[u32] = &[4, 15, 16, 17];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    BallRecovery,
    Dispossessed,
    Duel,
    Block,
    /// Code 9. The dashboard's "block" defensive layer is built from this code.
    Clearance,
    Interception,
    Dribble,
    Shot,
    Pressure,
    Pass,
    StartingXi,
    TacticalShift,
    BallReceipt,
    Carry,
}

impl EventType {
    pub fn from_id(id: u32) -> Option<Self> {
        let kind = match id {
            2 => EventType::BallRecovery,
            3 => EventType::Dispossessed,
            4 => EventType::Duel,
            6 => EventType::Block,
            9 => EventType::Clearance,
            10 => EventType::Interception,
            14 => EventType::Dribble,
            16 => EventType::Shot,
            17 => EventType::Pressure,
            30 => EventType::Pass,
            35 => EventType::StartingXi,
            36 => EventType::TacticalShift,
            42 => EventType::BallReceipt,
            43 => EventType::Carry,
            _ => return None,
        };
        Some(kind)
    }

    pub fn id(self) -> u32 {
        match self {
            EventType::BallRecovery => 2,
            EventType::Dispossessed => 3,
            EventType::Duel => 4,
            EventType::Block => 6,
            EventType::Clearance => 9,
            EventType::Interception => 10,
            EventType::Dribble => 14,
            EventType::Shot => 16,
            EventType::Pressure => 17,
            EventType::Pass => 30,
            EventType::StartingXi => 35,
            EventType::TacticalShift => 36,
            EventType::BallReceipt => 42,
            EventType::Carry => 43,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventType::BallRecovery => "Ball Recovery",
            EventType::Dispossessed => "Dispossessed",
            EventType::Duel => "Duel",
            EventType::Block => "Block",
            EventType::Clearance => "Clearance",
            EventType::Interception => "Interception",
            EventType::Dribble => "Dribble",
            EventType::Shot => "Shot",
            EventType::Pressure => "Pressure",
            EventType::Pass => "Pass",
            EventType::StartingXi => "Starting XI",
            EventType::TacticalShift => "Tactical Shift",
            EventType::BallReceipt => "Ball Receipt*",
            EventType::Carry => "Carry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionGroup {
    BallReceipt,
    Defence,
    Carry,
    Pass,
    Shot,
}

impl ActionGroup {
    pub const ALL: [ActionGroup; 5] = [
        ActionGroup::BallReceipt,
        ActionGroup::Defence,
        ActionGroup::Carry,
        ActionGroup::Pass,
        ActionGroup::Shot,
    ];

    pub fn type_codes(self) -> &'static [u32] {
        match self {
            ActionGroup::BallReceipt => &[42],
            ActionGroup::Defence => &[4, 9, 10],
            ActionGroup::Carry => &[43],
            ActionGroup::Pass => &[30],
            ActionGroup::Shot => &[16],
        }
    }

    pub fn contains(self, type_id: u32) -> bool {
        self.type_codes().contains(&type_id)
    }
}

pub fn is_successful_duel_code(code: u32) -> bool {
    SUCCESSFUL_DUEL_CODES.contains(&code)
}

pub fn is_successful_interception_code(code: u32) -> bool {
    SUCCESSFUL_INTERCEPTION_CODES.contains(&code)
}
