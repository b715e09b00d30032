//! Py2Win Application
//!
//! The eframe application: lays out the window, turns button presses into
//! runner and profile calls, and drains the running build once per frame.

use eframe::egui;
use std::path::Path;
use tracing::{debug, error, info, warn};

use py2win::config::Config;
use py2win::models::BuildConfig;
use py2win::profile::{self, Profile};
use py2win::runner::{BuildRunner, BuildStream};
use py2win::state::{AppState, BuildForm, STATUS_READY};
use py2win::ui::{
    visuals, BuildFormView, FormAction, LogAction, LogView, ResourceAction, ResourceListView,
    UiColors,
};

/// Storage key of the persisted form
const FORM_STORAGE_KEY: &str = "py2win_form";

pub struct Py2WinApp {
    config: Config,
    state: AppState,
    runner: BuildRunner,
    /// Build in progress, if any
    build: Option<BuildStream>,
    colors: UiColors,
    show_about: bool,
}

impl Py2WinApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        cc.egui_ctx.set_visuals(visuals(config.ui.theme));

        let mut state = AppState::new(config.ui.max_log_lines);
        if let Some(form) = cc
            .storage
            .and_then(|storage| eframe::get_value::<BuildForm>(storage, FORM_STORAGE_KEY))
        {
            debug!("Restored form from previous session");
            state.form = form;
        }

        let mut app = Self {
            runner: BuildRunner::from_config(&config.packager),
            colors: UiColors::for_theme(config.ui.theme),
            config,
            state,
            build: None,
            show_about: false,
        };
        app.check_tool();
        app
    }

    /// Fill the form from a profile given on the command line
    pub fn apply_profile(&mut self, config: &BuildConfig) {
        self.state.form.apply_config(config);
        debug!("Applied startup profile for {}", config.script_path.display());
    }

    /// Probe for the packager and update the build trigger
    fn check_tool(&mut self) {
        let available = self.runner.tool_available();
        if available {
            info!("Found packager '{}'", self.runner.builder().program());
        } else {
            warn!("Packager '{}' not found", self.runner.builder().program());
        }
        self.state.set_tool_available(available);
    }

    fn start_build(&mut self) {
        let Some(config) = self.state.prepare_build() else {
            return;
        };

        match self.runner.start_build(&config) {
            Ok(stream) => self.build = Some(stream),
            Err(e) => {
                error!("Build did not start: {}", e);
                self.state.build_rejected(&e);
            }
        }
    }

    /// Fold queued build events into the state
    fn poll_build(&mut self, ctx: &egui::Context) {
        let Some(build) = self.build.as_mut() else {
            return;
        };

        for event in build.drain_pending() {
            self.state.apply_event(event);
        }

        if build.is_finished() {
            if let Some(elapsed) = build.elapsed() {
                info!("Build {} took {:?}", build.id(), elapsed);
            }
            self.build = None;
        } else {
            ctx.request_repaint_after(self.config.ui.poll_interval());
        }
    }

    fn handle_form_action(&mut self, action: FormAction) {
        match action {
            FormAction::BrowseScript => {
                self.state.set_status("Browsing for Python script...");
                let picked = rfd::FileDialog::new()
                    .set_title("Select a Python Script")
                    .add_filter("Python files", &["py", "pyw"])
                    .add_filter("All files", &["*"])
                    .pick_file();
                match picked {
                    Some(path) => {
                        self.state.set_status(format!("Selected script: {}", file_name(&path)));
                        self.state.form.script_path = path.display().to_string();
                    }
                    None => self.state.set_status(STATUS_READY),
                }
            }
            FormAction::BrowseIcon => {
                self.state.set_status("Browsing for icon file...");
                let picked = rfd::FileDialog::new()
                    .set_title("Select an Icon File")
                    .add_filter("Icon files", &["ico"])
                    .add_filter("All files", &["*"])
                    .pick_file();
                match picked {
                    Some(path) => {
                        self.state.set_status(format!("Selected icon: {}", file_name(&path)));
                        self.state.form.icon_path = path.display().to_string();
                    }
                    None => self.state.set_status(STATUS_READY),
                }
            }
            FormAction::BrowseDistDir => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select Output Folder")
                    .pick_folder()
                {
                    self.state.set_status(format!("Output folder: {}", path.display()));
                    self.state.form.dist_dir = path.display().to_string();
                }
            }
        }
    }

    fn handle_resource_action(&mut self, action: ResourceAction) {
        match action {
            ResourceAction::AddFiles => {
                if let Some(paths) = rfd::FileDialog::new()
                    .set_title("Select File(s) to Bundle")
                    .pick_files()
                {
                    let picked = paths.len();
                    let added = self.state.form.add_files(paths);
                    debug!("Added {} of {} picked files", added, picked);
                    self.state.set_status(format!("Added {} file(s).", added));
                }
            }
            ResourceAction::AddFolder => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select a Folder to Bundle")
                    .pick_folder()
                {
                    let name = file_name(&path);
                    if self.state.form.add_folder(path) {
                        self.state.set_status(format!("Added folder: {}", name));
                    }
                }
            }
            ResourceAction::RemoveSelected => self.state.remove_selected_resources(),
        }
    }

    fn handle_log_action(&mut self, action: LogAction) {
        match action {
            LogAction::Copy => {
                let text = self.state.log.to_text();
                match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
                    Ok(()) => self.state.set_status("Log copied to clipboard."),
                    Err(e) => {
                        warn!("Clipboard unavailable: {}", e);
                        self.state.set_status(format!("Error: Could not copy log: {}", e));
                    }
                }
            }
            LogAction::Clear => self.state.log.clear(),
        }
    }

    fn profile_dialog(&self, title: &str) -> rfd::FileDialog {
        rfd::FileDialog::new()
            .set_title(title)
            .set_directory(self.config.profiles.effective_directory())
            .add_filter("Py2Win Profiles", &[profile::PROFILE_EXTENSION])
            .add_filter("All files", &["*"])
    }

    fn save_profile(&mut self) {
        self.state.set_status("Saving profile...");
        let Some(path) = self
            .profile_dialog("Save Build Profile")
            .set_file_name("profile.json")
            .save_file()
        else {
            self.state.set_status("Save cancelled.");
            return;
        };

        let path = profile::with_profile_extension(path);
        match Profile::from_config(&self.state.form.snapshot()).save(&path) {
            Ok(()) => self
                .state
                .set_status(format!("Profile saved to {}", file_name(&path))),
            Err(e) => {
                error!("{}", e);
                self.state.notice(e.user_message());
                self.state.set_status(e.user_message());
            }
        }
    }

    fn load_profile(&mut self) {
        self.state.set_status("Loading profile...");
        let Some(path) = self.profile_dialog("Load Build Profile").pick_file() else {
            self.state.set_status("Load cancelled.");
            return;
        };

        match profile::load_profile(&path) {
            Ok(config) => {
                self.state.form.apply_config(&config);
                self.state
                    .set_status(format!("Profile loaded from {}", file_name(&path)));
            }
            Err(e) => {
                error!("{}", e);
                self.state.notice(format!("Error loading profile: {}", e));
                self.state.set_status(e.user_message());
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let idle = !self.state.is_building();
        ui.horizontal(|ui| {
            if ui.add_enabled(idle, egui::Button::new("Load Profile...")).clicked() {
                self.load_profile();
            }
            if ui.add_enabled(idle, egui::Button::new("Save Profile...")).clicked() {
                self.save_profile();
            }
            ui.separator();
            if ui
                .add_enabled(idle, egui::Button::new("Re-check PyInstaller"))
                .clicked()
            {
                self.check_tool();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("About").clicked() {
                    self.show_about = true;
                }
            });
        });
    }

    fn about_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("About Py2Win")
            .open(&mut self.show_about)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(py2win::NAME);
                ui.label(format!("Version {}", py2win::VERSION));
                ui.add_space(6.0);
                ui.label(py2win::DESCRIPTION);
                ui.label(format!("Packager: {}", self.runner.builder().program()));
            });
    }
}

impl eframe::App for Py2WinApp {
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_build(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(2.0);
            self.toolbar(ui);
            ui.add_space(2.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.state.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let idle = !self.state.is_building();

            if let Some(action) = BuildFormView::show(ui, &mut self.state.form, idle) {
                self.handle_form_action(action);
            }
            ui.add_space(6.0);

            if let Some(action) = ResourceListView::show(ui, &mut self.state.form, idle) {
                self.handle_resource_action(action);
            }
            ui.add_space(6.0);

            let build_button = egui::Button::new(
                egui::RichText::new(self.state.build_button_label()).strong(),
            )
            .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add_enabled(self.state.can_build(), build_button).clicked() {
                self.start_build();
            }
            ui.add_space(6.0);

            if let Some(action) = LogView::toolbar(ui, &self.state.log, &mut self.state.auto_scroll) {
                self.handle_log_action(action);
            }
            LogView::show(ui, &self.state.log, &self.colors, self.state.auto_scroll);
        });

        self.about_window(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, FORM_STORAGE_KEY, &self.state.form);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
