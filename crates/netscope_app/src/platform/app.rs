use std::sync::{mpsc, Arc};

use eframe::egui;
use netscope_core::{update, AppState, AppViewModel, Msg};
use netscope_logging::{ns_info, ns_warn};

use super::config::{self, AppConfig};
use super::effects::{EffectRunner, Notify};
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let env = |key: &str| std::env::var(key).ok();
    let path = config::config_path(env);
    let (config, config_error) = match config::load(&path) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    let config = config::apply_env_overrides(config, env);

    netscope_logging::initialize(&config.log_settings());
    if let Some(err) = config_error {
        ns_warn!("{}; using defaults", err);
    }
    if config.level_filter().is_none() {
        ns_warn!("Unknown log level {:?}; using Info", config.log_level);
    }
    ns_info!("Starting netscope_app (config {:?})", path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::constants::WINDOW_TITLE)
            .with_inner_size([ui::constants::WINDOW_WIDTH, ui::constants::WINDOW_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(NetscopeApp::new(cc, &config)?))),
    )
    .map_err(|err| anyhow::anyhow!("window failed: {err}"))
}

struct NetscopeApp {
    // single source of truth (UI thread only)
    state: AppState,
    view: AppViewModel,
    msg_rx: mpsc::Receiver<Msg>,
    effects: EffectRunner,
}

impl NetscopeApp {
    fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig) -> anyhow::Result<Self> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let ctx = cc.egui_ctx.clone();
        let notify: Notify = Arc::new(move || ctx.request_repaint());
        let effects = EffectRunner::new(
            config.scrape_settings(),
            config.loading_interval(),
            msg_tx,
            notify,
        )?;

        let state = AppState::new();
        let view = state.view();
        Ok(Self {
            state,
            view,
            msg_rx,
            effects,
        })
    }

    fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
        self.effects.run(effects);
    }
}

impl eframe::App for NetscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        let mut inbox = Vec::new();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui::render::status_bar(ui, &self.view);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::render::draw(ui, &self.view, &mut inbox);
        });

        if !inbox.is_empty() {
            for msg in inbox {
                self.dispatch_msg(msg);
            }
            ctx.request_repaint();
        }
    }
}
