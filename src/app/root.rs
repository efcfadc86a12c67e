use {
    eframe::{
        Frame, Storage,
        egui::{Context, Visuals},
    },
    serde::{Deserialize, Serialize},
    std::mem,
};

use crate::{
    Cli,
    app::{AppState, BootstrapState, PhaseView, RunningState},
    config::DF,
    data::HistoryLoader,
    domain::DashboardInputs,
    engine::DashboardEngine,
    ui::{UI_CONFIG, render_bootstrap},
    utils::{AppInstant, today_local},
};

#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct App {
    /// Sidebar selections. Persist across sessions.
    pub(crate) inputs: DashboardInputs,
    #[serde(skip)]
    pub(crate) engine: Option<DashboardEngine>,
    /// Set when the loader could not be built; nothing else can run.
    #[serde(skip)]
    pub(crate) startup_error: Option<String>,
    #[serde(skip)]
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self {
            inputs: DashboardInputs::defaults_for(today_local()),
            engine: None,
            startup_error: None,
            state: AppState::default(),
        }
    }
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let mut app: App = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        if let Some(ticker) = args.ticker {
            app.inputs.ticker = ticker;
        }
        app.inputs = app.inputs.clone().sanitized();

        match HistoryLoader::yahoo(args.prefer_api) {
            Ok(loader) => {
                log::info!(
                    "Loading {} via {} (prefer_api: {})",
                    app.inputs.ticker,
                    loader.provider_signature(),
                    args.prefer_api
                );
                let mut engine = DashboardEngine::new(loader);
                engine.submit(app.inputs.clone());
                app.engine = Some(engine);
                app.state = AppState::Bootstrapping(BootstrapState::new(app.inputs.ticker));
            }
            Err(e) => {
                log::error!("Could not start the data loader: {:#}", e);
                app.startup_error = Some(format!("{:#}", e));
                app.state = AppState::Running(RunningState);
            }
        }

        app
    }

    /// Re-submits when an edit changed the data or forecast inputs.
    fn submit_if_changed(&mut self) {
        if let Some(engine) = &mut self.engine {
            if engine.needs_submit(&self.inputs) {
                engine.submit(self.inputs.clone());
            }
        }
    }

    pub(crate) fn tick_bootstrap_state(
        &mut self,
        ctx: &Context,
        state: &mut BootstrapState,
    ) -> AppState {
        let still_loading = match &mut self.engine {
            Some(engine) => {
                engine.update();
                engine.is_calculating()
            }
            None => false,
        };

        if !still_loading {
            #[cfg(debug_assertions)]
            if DF.log_engine {
                log::info!("Bootstrap complete for {}", state.ticker);
            }
            ctx.request_repaint();
            return AppState::Running(RunningState);
        }

        ctx.request_repaint();
        render_bootstrap(ctx, state);
        AppState::Bootstrapping(state.clone())
    }

    /// RUNNING PHASE MAIN LOOP
    pub(crate) fn tick_running_state(&mut self, ctx: &Context) {
        let start = AppInstant::now();
        if let Some(engine) = &mut self.engine {
            engine.update();
        }
        let engine_time = start.elapsed().as_micros();

        if self.render_side_panel(ctx) {
            self.submit_if_changed();
        }

        let start = AppInstant::now();
        self.render_central_panel(ctx);
        let central_time = start.elapsed().as_micros();

        // Results arrive on a channel, not as input events
        if self.engine.as_ref().is_some_and(|e| e.is_calculating()) {
            ctx.request_repaint();
        }

        if DF.log_performance && engine_time + central_time > 500_000 {
            log::warn!(
                "🐢 SLOW FRAME: Engine: {}us | Central: {}us",
                engine_time,
                central_time
            );
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Bootstrapping(mut s) => s.tick(self, ctx),
            AppState::Running(mut s) => s.tick(self, ctx),
        };
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        #[cfg(debug_assertions)]
        if DF.log_inputs {
            log::info!("💾 SAVE [App]: {:?}", self.inputs);
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
