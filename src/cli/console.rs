use crate::player::StatKind;
use crate::session::ToolKind;

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectTool(ToolKind),
    SelectSeed(Option<String>),
    Click(u32),
    BuySeed(String),
    BuyTool,
    BuyShovel,
    BuyPet(String),
    Upgrade(StatKind),
    Unlock,
    Generate(u32),
    UpgradeGenerator,
    Fight,
    State,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  tool hand|hoe|shovel     pick up a tool
  seed <id>|none           select a seed to plant
  click <plot>             use the selection on a plot
  buy seed <id>            buy one seed
  buy tool                 buy the next hoe
  buy shovel               buy the shovel
  buy pet <id>             adopt a pet
  upgrade defense|strength|skill
  unlock                   clear the next plot of land
  generate <amount>        spend money on random seeds
  upgrade-generator        improve generator odds
  fight                    fight the horde at the gates
  state                    print the full session as JSON
  status                   print a one-line summary
  help                     show this list
  quit                     end the session";

/// Parse a console line. Blank input is an error so callers can ignore it.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Err("empty command".to_string());
    };

    let command = match (verb.to_ascii_lowercase().as_str(), args) {
        ("tool", [name]) => match ToolKind::parse(name) {
            Some(ToolKind::Seed) | None => {
                return Err(format!("Unknown tool '{}'. Use hand, hoe or shovel", name));
            }
            Some(tool) => Command::SelectTool(tool),
        },
        ("seed", ["none"]) => Command::SelectSeed(None),
        ("seed", [id]) => Command::SelectSeed(Some(id.to_string())),
        ("click", [index]) => Command::Click(parse_number(index, "plot")?),
        ("buy", ["seed", id]) => Command::BuySeed(id.to_string()),
        ("buy", ["tool"]) | ("buy", ["hoe"]) => Command::BuyTool,
        ("buy", ["shovel"]) => Command::BuyShovel,
        ("buy", ["pet", id]) => Command::BuyPet(id.to_string()),
        ("upgrade", [stat]) => match StatKind::parse(stat) {
            Some(stat) => Command::Upgrade(stat),
            None => return Err(format!("Unknown stat '{}'. Use defense, strength or skill", stat)),
        },
        ("unlock", []) => Command::Unlock,
        ("generate", [amount]) => Command::Generate(parse_number(amount, "amount")?),
        ("upgrade-generator", []) => Command::UpgradeGenerator,
        ("fight", []) => Command::Fight,
        ("state", []) => Command::State,
        ("status", []) => Command::Status,
        ("help", []) => Command::Help,
        ("quit", []) | ("exit", []) => Command::Quit,
        _ => return Err(format!("Unrecognized command '{}'. Type 'help'", line.trim())),
    };
    Ok(command)
}

fn parse_number(s: &str, what: &str) -> Result<u32, String> {
    s.parse()
        .map_err(|_| format!("Invalid {} '{}': expected a non-negative number", what, s))
}
