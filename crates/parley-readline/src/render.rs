//! Colored terminal output for the REPL.

use colored::Colorize;
use parley_application::SessionView;
use parley_core::metrics::{MetricKind, Metrics};
use parley_core::replay::ViewMode;
use parley_core::scenario::{DraftField, PersonaTips, Scenario, ScenarioCatalog, ScenarioDraft};
use parley_core::session::{Message, PLACEHOLDER_TEXT, Sender};
use parley_core::trainer::TrainerOptionsSet;
use strum::IntoEnumIterator;

pub fn banner() {
    println!("{}", "=== Parley ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/scenarios' to list scenarios, '/start <id>' to begin, '/help' for everything else, or 'quit' to exit."
            .bright_black()
    );
    println!();
}

pub fn help() {
    let lines = [
        ("/scenarios", "list scenarios and their flags"),
        ("/start <id>", "start a session on a scenario"),
        ("/toggle <id> suggestions|trainer", "switch a flag before starting"),
        ("/custom [idea]", "open a custom scenario draft, AI-written or blank"),
        ("/draft", "show the open draft"),
        ("/draft set <field> <value>", "edit a draft field (traits comma-separated)"),
        ("/draft build, /draft discard", "add the draft to the list, or drop it"),
        ("/suggest", "ask for suggestions (when enabled)"),
        ("/tips", "show the persona's do's and don'ts"),
        ("/replay, /live", "scrub through history, then return"),
        ("/step <n>, /back, /forward", "move the replay position"),
        ("1, 2, 3", "send a trainer option"),
        ("quit", "leave"),
    ];
    for (command, description) in lines {
        println!("  {:<36} {}", command.bright_cyan(), description.bright_black());
    }
}

pub fn info(text: &str) {
    println!("{}", text.bright_black());
}

pub fn warning(text: &str) {
    println!("{}", text.yellow());
}

pub fn error(text: &str) {
    eprintln!("{}", text.red());
}

fn on_off(value: bool) -> colored::ColoredString {
    if value { "on".green() } else { "off".bright_black() }
}

pub fn scenarios(catalog: &ScenarioCatalog) {
    for scenario in catalog.scenarios() {
        println!(
            "{} {}  suggestions: {}  trainer: {}",
            format!("[{}]", scenario.id).bright_magenta(),
            scenario.title.bold(),
            on_off(scenario.suggestions_enabled),
            on_off(scenario.trainer_mode),
        );
        println!("    {}", scenario.description.bright_black());
    }
}

pub fn scenario_intro(scenario: &Scenario) {
    println!("{}", scenario.title.bright_magenta().bold());
    println!("{}", scenario.description);
    println!("{} {}", "Objective:".bold(), scenario.user_objective);
    println!(
        "{} {} ({})",
        "Talking to:".bold(),
        scenario.persona.name,
        scenario.persona.role
    );
    if let Some(tips) = &scenario.persona.tips {
        persona_tips(tips);
    }
    println!();
}

pub fn persona_tips(tips: &PersonaTips) {
    for tip in &tips.dos {
        println!("  {} {}", "do".green(), tip);
    }
    for tip in &tips.donts {
        println!("  {} {}", "don't".red(), tip);
    }
}

pub fn draft(draft: &ScenarioDraft) {
    let fields = [
        (DraftField::Title, draft.title.clone()),
        (DraftField::Description, draft.description.clone()),
        (DraftField::UserObjective, draft.user_objective.clone()),
        (DraftField::PersonaName, draft.persona_name.clone()),
        (DraftField::PersonaRole, draft.persona_role.clone()),
        (DraftField::PersonaKeyTraits, draft.persona_key_traits.join(", ")),
        (DraftField::PersonaMotivations, draft.persona_motivations.clone()),
        (DraftField::InitialAiMessage, draft.initial_ai_message.clone()),
    ];
    println!("{}", "Custom scenario draft".bright_magenta().bold());
    for (field, value) in fields {
        let value = if value.is_empty() {
            "(empty)".bright_black().to_string()
        } else {
            value
        };
        println!("  {:<22} {}", field.to_string().bright_cyan(), value);
    }
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        warning(&format!("Missing: {}", missing.join(", ")));
    }
}

pub fn message(message: &Message) {
    match message.sender {
        Sender::User => {
            println!("{}", format!("> {}", message.text).green());
            if let Some(analysis) = message.analysis() {
                println!("  {}", analysis.reason.bright_black().italic());
            }
        }
        Sender::Ai if message.text == PLACEHOLDER_TEXT => {
            println!("{}", PLACEHOLDER_TEXT.bright_black());
        }
        Sender::Ai => {
            for line in message.text.lines() {
                println!("{}", line.bright_blue());
            }
            if let Some(insight) = message.insight() {
                println!("  {}", format!("insight: {insight}").bright_black().italic());
            }
        }
    }
}

fn delta(value: i16) -> String {
    match value {
        0 => String::new(),
        v if v > 0 => format!(" (+{v})").green().to_string(),
        v => format!(" ({v})").red().to_string(),
    }
}

pub fn metrics(metrics: &Metrics) {
    let deltas = metrics.deltas_or_zero();
    let parts: Vec<String> = MetricKind::iter()
        .map(|kind| {
            format!(
                "{} {}%{}",
                kind.label(),
                metrics.get(kind),
                delta(deltas.get(kind))
            )
        })
        .collect();
    println!("{}", parts.join("  ").bold());
}

pub fn trainer_options(set: &TrainerOptionsSet) {
    println!("{}", "Pick a response:".bright_yellow());
    for (position, (_, text)) in set.ordered().enumerate() {
        println!("  {} {}", format!("{}.", position + 1).bright_yellow(), text);
    }
}

pub fn suggestions(items: &[String]) {
    println!("{}", "Suggestions:".bright_yellow());
    for item in items {
        println!("  - {}", item.yellow());
    }
}

pub fn view(view: &SessionView) {
    if view.mode == ViewMode::Replay {
        println!(
            "{}",
            format!("-- replay {}/{} --", view.step, view.total).bright_magenta()
        );
    }
    for entry in &view.messages {
        message(entry);
    }
    metrics(&view.metrics);
}
