/// Why an action declined to change the game state.
///
/// None of these are faults: the state is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    InsufficientFunds { needed: u64, available: i64 },
    InsufficientSeeds { seed_id: String },
    LevelTooLow { required: u32, current: u32 },
    UnknownItem(String),
    UnknownPlot(u32),
    ToolNotOwned(&'static str),
    AlreadyOwned(String),
    NotNextInChain { next: String },
    FullyExpanded,
    MaxLevel(&'static str),
    InputExceedsCap { cap: u32 },
    InvalidAmount,
    NoCharges,
    NoHordeWaiting,
    BattleInProgress,
    NoBattlePending,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::InsufficientFunds { needed, available } => {
                write!(f, "Not enough money! Need ${}, have ${}", needed, available)
            }
            Rejection::InsufficientSeeds { seed_id } => write!(f, "Out of seeds! ({})", seed_id),
            Rejection::LevelTooLow { required, current } => {
                write!(f, "Requires level {} (you are level {})", required, current)
            }
            Rejection::UnknownItem(id) => write!(f, "Unknown item: {}", id),
            Rejection::UnknownPlot(index) => write!(f, "No plot #{}", index),
            Rejection::ToolNotOwned(tool) => write!(f, "You don't own a {}", tool),
            Rejection::AlreadyOwned(name) => write!(f, "Already owned: {}", name),
            Rejection::NotNextInChain { next } => write!(f, "Upgrade to {} first", next),
            Rejection::FullyExpanded => write!(f, "All plots are already unlocked"),
            Rejection::MaxLevel(what) => write!(f, "{} is already at max level", what),
            Rejection::InputExceedsCap { cap } => write!(f, "Max ${}", cap),
            Rejection::InvalidAmount => write!(f, "Amount must be between $1 and your balance"),
            Rejection::NoCharges => write!(f, "Generator needs recharging!"),
            Rejection::NoHordeWaiting => write!(f, "No horde at the gates"),
            Rejection::BattleInProgress => write!(f, "Battle already in progress"),
            Rejection::NoBattlePending => write!(f, "No battle to finish"),
        }
    }
}

impl std::error::Error for Rejection {}
