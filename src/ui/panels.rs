use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use octs_plot::chart::PlotKind;
use octs_plot::color::hex_to_rgb;
use octs_plot::data::loader::load_file;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – model groups
// ---------------------------------------------------------------------------

/// Render the model group panel with two-level visibility switches.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Models");
    ui.separator();

    if state.table.is_none() {
        ui.label("No payload loaded.");
        return;
    }

    // Snapshot names and flags so the loop can mutate state.
    let groups: Vec<(String, bool, Vec<(String, bool)>)> = state
        .groups
        .iter()
        .map(|g| {
            (
                g.name.clone(),
                g.is_visible,
                g.models
                    .iter()
                    .map(|m| (m.name.clone(), m.is_visible))
                    .collect(),
            )
        })
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (g_idx, (name, group_visible, models)) in groups.iter().enumerate() {
                let n_visible = models.iter().filter(|(_, v)| *v).count();
                let header_text = format!("{name}  ({n_visible}/{})", models.len());

                ui.horizontal(|ui: &mut Ui| {
                    let mut checked = *group_visible;
                    if ui.checkbox(&mut checked, "").changed() {
                        state.toggle_group(g_idx);
                    }
                    egui::CollapsingHeader::new(RichText::new(header_text).strong())
                        .id_salt(("group", g_idx))
                        .default_open(true)
                        .show(ui, |ui: &mut Ui| {
                            ui.horizontal(|ui: &mut Ui| {
                                if ui.small_button("All").clicked() {
                                    state.set_group_models(g_idx, true);
                                }
                                if ui.small_button("None").clicked() {
                                    state.set_group_models(g_idx, false);
                                }
                            });

                            for (model, visible) in models {
                                let mut text = RichText::new(model);
                                if let Some(c) = model_colour(state, model) {
                                    text = text.color(c);
                                }
                                let mut checked = *visible;
                                if ui.checkbox(&mut checked, text).changed() {
                                    state.toggle_model(g_idx, model);
                                }
                            }
                        });
                });
            }
        });
}

/// Legend colour of a model, if it is currently plotted.
fn model_colour(state: &AppState, model: &str) -> Option<Color32> {
    let bundle = state.bundle.as_ref()?;
    let idx = bundle.series.iter().position(|s| s.name() == model)?;
    let rgb = hex_to_rgb(bundle.styling.colors.get(idx)?).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open payload…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.bundle.is_some(), egui::Button::new("Export series…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let mut kind = state.plot_kind;
        egui::ComboBox::from_id_salt("plot_kind")
            .selected_text(kind.display_name())
            .show_ui(ui, |ui: &mut Ui| {
                for k in PlotKind::ALL {
                    ui.selectable_value(&mut kind, k, k.display_name());
                }
            });
        if kind != state.plot_kind {
            state.set_plot_kind(kind);
        }

        ui.label("Title");
        let hint = state.config.title(state.plot_kind).to_string();
        if ui
            .add(egui::TextEdit::singleline(&mut state.title).hint_text(hint))
            .changed()
        {
            state.rebuild();
        }

        ui.separator();

        if let (Some(table), Some(bundle)) = (&state.table, &state.bundle) {
            ui.label(format!(
                "{} models loaded, {} visible",
                table.len(),
                bundle.series.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Open {} payload", state.plot_kind))
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match load_file(&path, state.plot_kind) {
            Ok(table) => {
                log::info!(
                    "Loaded {} models: {:?}",
                    table.len(),
                    table.names().collect::<Vec<_>>()
                );
                let group = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Models")
                    .to_string();
                state.set_table(table, &group);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export series")
        .set_file_name(format!("{}.json", state.plot_kind))
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match state.export(&path) {
            Ok(()) => log::info!("Exported series to {}", path.display()),
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
