use parley_core::scenario::{DraftField, ScenarioFlag};

/// Slash commands offered for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/scenarios",
    "/start",
    "/toggle",
    "/custom",
    "/draft",
    "/suggest",
    "/tips",
    "/replay",
    "/live",
    "/step",
    "/back",
    "/forward",
    "/help",
    "/exit",
];

/// Edits on the open custom scenario draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    Show,
    Set { field: DraftField, value: String },
    Build,
    Discard,
}

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scenarios,
    Start(String),
    Toggle { id: String, flag: ScenarioFlag },
    /// Open a draft: AI-written from an idea, or blank.
    Custom(Option<String>),
    Draft(DraftEdit),
    Suggest,
    Tips,
    Replay,
    Live,
    Step(usize),
    Back,
    Forward,
    /// Trainer option by displayed position (0-based).
    Pick(usize),
    Help,
    Exit,
    /// Anything that is not a command is said to the persona.
    Say(String),
    /// A malformed command, with the usage hint to show.
    Usage(&'static str),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "quit" | "exit" => return Command::Exit,
            "1" | "2" | "3" => {
                let position: usize = line.parse().unwrap_or(1);
                return Command::Pick(position - 1);
            }
            _ => {}
        }
        let Some(body) = line.strip_prefix('/') else {
            return Command::Say(line.to_string());
        };

        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };
        match name {
            "scenarios" => Command::Scenarios,
            "start" if !rest.is_empty() => Command::Start(rest.to_string()),
            "start" => Command::Usage("/start <scenario-id>"),
            "toggle" => parse_toggle(rest),
            "custom" if rest.is_empty() => Command::Custom(None),
            "custom" => Command::Custom(Some(rest.to_string())),
            "draft" => parse_draft(rest),
            "suggest" => Command::Suggest,
            "tips" => Command::Tips,
            "replay" => Command::Replay,
            "live" => Command::Live,
            "step" => rest
                .parse()
                .map(Command::Step)
                .unwrap_or(Command::Usage("/step <n>")),
            "back" => Command::Back,
            "forward" => Command::Forward,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => Command::Usage("unknown command, try /help"),
        }
    }
}

fn parse_toggle(rest: &str) -> Command {
    const USAGE: &str = "/toggle <scenario-id> suggestions|trainer";
    let mut parts = rest.split_whitespace();
    let (Some(id), Some(flag), None) = (parts.next(), parts.next(), parts.next()) else {
        return Command::Usage(USAGE);
    };
    let flag = match flag {
        "suggestions" => ScenarioFlag::Suggestions,
        "trainer" => ScenarioFlag::TrainerMode,
        _ => return Command::Usage(USAGE),
    };
    Command::Toggle {
        id: id.to_string(),
        flag,
    }
}

fn parse_draft(rest: &str) -> Command {
    const USAGE: &str = "/draft [set <field> <value> | build | discard]";
    let (action, rest) = match rest.split_once(char::is_whitespace) {
        Some((action, rest)) => (action, rest.trim()),
        None => (rest, ""),
    };
    let edit = match (action, rest) {
        ("", "") => DraftEdit::Show,
        ("build", "") => DraftEdit::Build,
        ("discard", "") => DraftEdit::Discard,
        ("set", rest) => {
            let Some((field, value)) = rest.split_once(char::is_whitespace) else {
                return Command::Usage("/draft set <field> <value>");
            };
            let Ok(field) = field.parse::<DraftField>() else {
                return Command::Usage("unknown draft field, see /draft");
            };
            DraftEdit::Set {
                field,
                value: value.trim().to_string(),
            }
        }
        _ => return Command::Usage(USAGE),
    };
    Command::Draft(edit)
}
