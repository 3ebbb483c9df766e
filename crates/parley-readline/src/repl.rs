//! REPL state and command dispatch.
//!
//! The setup screen is the scenario catalog plus at most one open custom
//! scenario draft; the chat screen is the active `ChatSession`. Only one
//! session exists at a time.

use parley_application::{AdvisoryService, ChatSession, SessionFactory, TurnOutcome};
use parley_core::replay::ViewMode;
use parley_core::scenario::{ScenarioBuilder, ScenarioCatalog, ScenarioDraft, ScenarioFlag};
use parley_core::{ParleyError, Result};

use crate::command::{Command, DraftEdit};
use crate::render;

pub enum Flow {
    Continue,
    Exit,
}

pub struct Repl {
    catalog: ScenarioCatalog,
    factory: SessionFactory,
    advisory: AdvisoryService,
    draft: Option<ScenarioDraft>,
    session: Option<ChatSession>,
}

impl Repl {
    pub fn new(factory: SessionFactory, advisory: AdvisoryService) -> Self {
        Self {
            catalog: ScenarioCatalog::new(),
            factory,
            advisory,
            draft: None,
            session: None,
        }
    }

    /// Ids offered for completion after `/start` and `/toggle`.
    pub fn scenario_ids(&self) -> Vec<String> {
        self.catalog.scenarios().iter().map(|s| s.id.clone()).collect()
    }

    /// Runs one command. Errors are the user's to fix; they never end the REPL.
    pub async fn handle(&mut self, command: Command) -> Flow {
        match self.dispatch(command).await {
            Ok(flow) => flow,
            Err(err) => {
                render::error(&err.to_string());
                Flow::Continue
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => render::help(),
            Command::Usage(usage) => render::warning(&format!("Usage: {usage}")),
            Command::Scenarios => render::scenarios(&self.catalog),
            Command::Start(id) => self.start(&id).await?,
            Command::Toggle { id, flag } => {
                let enabled = self.catalog.toggle(&id, flag)?;
                let name = match flag {
                    ScenarioFlag::Suggestions => "suggestions",
                    ScenarioFlag::TrainerMode => "trainer mode",
                };
                render::info(&format!(
                    "{name} {} for '{id}'",
                    if enabled { "enabled" } else { "disabled" }
                ));
            }
            Command::Custom(idea) => self.custom(idea.as_deref()).await,
            Command::Draft(edit) => self.edit_draft(edit)?,
            Command::Suggest => self.suggest().await?,
            Command::Tips => {
                let scenario = self.session()?.scenario().await;
                match &scenario.persona.tips {
                    Some(tips) => render::persona_tips(tips),
                    None => render::info("No tips for this persona."),
                }
            }
            Command::Replay => render::view(&self.session()?.enter_replay().await),
            Command::Live => render::view(&self.session()?.exit_replay().await),
            Command::Step(step) => {
                let session = self.session()?;
                if session.view_mode().await == ViewMode::Live {
                    session.enter_replay().await;
                }
                render::view(&session.replay_seek(step).await?);
            }
            Command::Back => render::view(&self.session()?.replay_step_backward().await),
            Command::Forward => render::view(&self.session()?.replay_step_forward().await),
            Command::Pick(index) => {
                let session = self.session()?.clone();
                self.leave_replay(&session).await;
                let outcome = session.choose_trainer_option(index).await?;
                self.after_turn(&session, &outcome).await;
            }
            Command::Say(text) => {
                let session = self.session()?.clone();
                self.leave_replay(&session).await;
                let outcome = session.submit_turn(&text).await?;
                self.after_turn(&session, &outcome).await;
            }
        }
        Ok(Flow::Continue)
    }

    fn session(&self) -> Result<&ChatSession> {
        self.session
            .as_ref()
            .ok_or_else(|| ParleyError::not_found("session", "none started; use /start <id>"))
    }

    pub async fn start(&mut self, id: &str) -> Result<()> {
        let scenario = self.catalog.get(id)?.clone();
        render::info("Preparing the scenario...");
        let session = self.factory.start(scenario).await;

        let scenario = session.scenario().await;
        render::scenario_intro(&scenario);
        render::view(&session.view().await);
        if scenario.trainer_mode {
            if let Some(set) = session.wait_for_trainer_options().await {
                render::trainer_options(&set);
            }
        }
        self.session = Some(session);
        Ok(())
    }

    async fn custom(&mut self, idea: Option<&str>) {
        let draft = match idea {
            Some(idea) => {
                render::info("Drafting a scenario...");
                self.advisory.draft_scenario(idea).await
            }
            None => ScenarioDraft::default(),
        };
        render::draft(&draft);
        render::info("Edit with /draft set <field> <value>, then /draft build.");
        self.draft = Some(draft);
    }

    fn edit_draft(&mut self, edit: DraftEdit) -> Result<()> {
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| ParleyError::not_found("draft", "none open; use /custom [idea]"))?;
        match edit {
            DraftEdit::Show => render::draft(draft),
            DraftEdit::Set { field, value } => {
                draft.set(field, &value);
                render::info(&format!("{field} updated."));
            }
            DraftEdit::Discard => {
                self.draft = None;
                render::info("Draft discarded.");
            }
            DraftEdit::Build => {
                // An incomplete draft stays open for further edits.
                let scenario = ScenarioBuilder::new(draft.clone()).build()?;
                let id = scenario.id.clone();
                self.catalog.add(scenario);
                self.draft = None;
                render::info(&format!(
                    "Added '{id}'. Use /toggle {id} suggestions|trainer, then /start {id}."
                ));
            }
        }
        Ok(())
    }

    async fn suggest(&self) -> Result<()> {
        let session = self.session()?;
        let scenario = session.scenario().await;
        if !scenario.suggestions_enabled {
            render::warning(&format!(
                "Suggestions are off for this scenario (/toggle {} suggestions before /start).",
                scenario.id
            ));
            return Ok(());
        }
        render::info("Thinking of suggestions...");
        let history = session.history().await;
        render::suggestions(&self.advisory.suggestions(&history, &scenario).await);
        Ok(())
    }

    async fn leave_replay(&self, session: &ChatSession) {
        if session.view_mode().await == ViewMode::Replay {
            render::info("Back to live.");
            session.exit_replay().await;
        }
    }

    async fn after_turn(&self, session: &ChatSession, outcome: &TurnOutcome) {
        render::message(&outcome.user_message);
        render::message(&outcome.ai_message);
        render::metrics(&outcome.metrics);

        if session.scenario().await.trainer_mode {
            if let Some(set) = session.wait_for_trainer_options().await {
                render::trainer_options(&set);
            }
        }
    }
}
