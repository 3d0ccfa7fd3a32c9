use {
    anyhow::Context as _,
    eframe::{
        Frame, Storage,
        egui::{CentralPanel, Context, Visuals},
    },
    poll_promise::Promise,
    std::{mem, sync::Arc, time::Duration},
    tokio::runtime::{Builder, Runtime},
};

use crate::{
    Cli,
    app::{AppState, GateState, PendingValidation, PhaseView, TrackingState, UiPrefs},
    config::{API, ApiConfig, DF},
    data::{HttpTrackingSource, TrackingSource},
    engine::{IdentityGate, TrackingPoller},
    ui::{
        GateAction, MapSurface, NavAction, PlotMap, SidebarAction, SidebarStats, UI_CONFIG,
        render_error_banner, render_gate, render_map_overlays, render_navbar, render_sidebar,
    },
};

/// Validation gets this long on top of the HTTP timeout before it is abandoned.
const VALIDATION_GRACE: Duration = Duration::from_secs(2);

pub struct App {
    prefs: UiPrefs,
    source: Arc<dyn TrackingSource>,
    gate: IdentityGate,
    poller: TrackingPoller,
    map: MapSurface<PlotMap>,
    state: AppState,
    // Dropped last so the poller can still abort its timer task.
    runtime: Runtime,
}

impl App {
    pub(crate) fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<Self> {
        let prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("geoflow-worker")
            .build()
            .context("failed to start the async runtime")?;

        let api_config = ApiConfig::resolve(args.backend_url.as_deref());
        if api_config.base_url.is_empty() {
            log::warn!("No backend URL configured; every request will fail.");
        }
        let source: Arc<dyn TrackingSource> = Arc::new(
            HttpTrackingSource::from_config(api_config).context("failed to build the HTTP client")?,
        );

        let repaint_ctx = cc.egui_ctx.clone();
        let poller = TrackingPoller::new(Arc::clone(&source), runtime.handle().clone())
            .with_interval(Duration::from_secs(args.poll_secs))
            .with_notifier(Arc::new(move || repaint_ctx.request_repaint()));

        let mut app = Self {
            prefs,
            source,
            gate: IdentityGate::new(),
            poller,
            map: MapSurface::new(),
            state: AppState::default(),
            runtime,
        };

        if let Some(user) = args.user.filter(|u| !u.trim().is_empty()) {
            app.prefs.last_user_input = user.trim().to_string();
            let pending = app.start_validation(&cc.egui_ctx, user.trim().to_string());
            app.state = AppState::Gate(GateState {
                pending: Some(pending),
            });
        }

        Ok(app)
    }

    /// Run `validate_user` on the runtime; the UI picks the result up in a later frame.
    fn start_validation(&mut self, ctx: &Context, user_id: String) -> PendingValidation {
        self.gate.begin_submit();

        let source = Arc::clone(&self.source);
        let repaint_ctx = ctx.clone();
        let limit = Duration::from_millis(API.timeout_ms) + VALIDATION_GRACE;

        let _guard = self.runtime.enter();
        Promise::spawn_async(async move {
            let outcome = tokio::time::timeout(limit, source.validate_user(&user_id))
                .await
                .with_context(|| format!("validation of '{}' did not finish", user_id));
            repaint_ctx.request_repaint();
            outcome
        })
    }

    pub(crate) fn tick_gate_state(&mut self, ctx: &Context, state: &mut GateState) -> AppState {
        if let Some(pending) = state.pending.take() {
            match pending.try_take() {
                Ok(outcome) => {
                    if self.gate.finish_submit(outcome) {
                        return self.enter_tracking();
                    }
                }
                Err(pending) => state.pending = Some(pending),
            }
        }

        match render_gate(
            ctx,
            &mut self.prefs.last_user_input,
            self.gate.is_validating(),
            self.gate.error(),
        ) {
            Some(GateAction::Submit(user_id)) => {
                state.pending = Some(self.start_validation(ctx, user_id));
            }
            Some(GateAction::InputEdited | GateAction::Cleared) => self.gate.clear_error(),
            None => {}
        }

        AppState::Gate(mem::take(state))
    }

    fn enter_tracking(&mut self) -> AppState {
        if DF.log_gate {
            log::info!("Entering tracking view for {:?}", self.gate.user_id());
        }
        self.poller.bind_user(self.gate.user_id());
        AppState::Tracking(TrackingState)
    }

    /// "Change User": drop the user, the session and the map, then reopen the prompt.
    fn change_user(&mut self) -> AppState {
        self.gate.reset();
        self.poller.bind_user(None);
        self.map.teardown();
        AppState::Gate(GateState::default())
    }

    /// TRACKING PHASE MAIN LOOP
    pub(crate) fn tick_tracking_state(&mut self, ctx: &Context) -> AppState {
        self.poller.update();

        let user_id = self.gate.user_id().unwrap_or_default().to_string();
        let session = self.poller.state();
        let is_loading = session.is_loading;
        let has_points = !session.coordinates.is_empty();

        let nav = render_navbar(ctx, &user_id, self.prefs.sidebar_open, is_loading);

        let mut sidebar = None;
        if self.prefs.sidebar_open {
            sidebar = render_sidebar(
                ctx,
                &SidebarStats {
                    user_id: &user_id,
                    location_count: session.points.len(),
                    last_update: session.last_update.as_ref(),
                    is_loading,
                },
            );
        }

        if let Some(message) = &session.error {
            render_error_banner(ctx, message);
        }

        let revision = session.revision;
        let coordinates = session.coordinates.clone();
        let map_rect = CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                self.map.load(|| PlotMap::new("tracking_map"));
                if let Err(e) = self.map.sync(revision, &coordinates) {
                    log::error!("Map redraw for revision {} failed: {}", revision, e);
                }
                self.map.widget_mut().map(|map| map.show(ui).rect)
            })
            .inner;

        if let Some(rect) = map_rect {
            render_map_overlays(ctx, rect, has_points, is_loading);
        }

        if sidebar == Some(SidebarAction::Refresh) {
            self.poller.refetch();
        }

        match nav {
            Some(NavAction::ToggleSidebar) => {
                self.prefs.sidebar_open = !self.prefs.sidebar_open;
                AppState::Tracking(TrackingState)
            }
            Some(NavAction::ChangeUser) => self.change_user(),
            None => AppState::Tracking(TrackingState),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Gate(mut s) => s.tick(self, ctx),
            AppState::Tracking(mut s) => s.tick(self, ctx),
        };
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::light();
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.selection.bg_fill = UI_CONFIG.colors.accent;
    ctx.set_visuals(visuals);
    ctx.style_mut(|s| s.interaction.selectable_labels = false);
}
