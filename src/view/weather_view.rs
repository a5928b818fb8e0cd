use std::time::Duration;

use eframe::egui::{self, Color32, RichText};

use crate::controller::WeatherController;
use crate::presenter::WeatherViewModel;
use crate::state::WeatherState;
use crate::use_case::{WeatherGateway, WeatherMode};
use crate::view::icon;
use crate::view_model::{Inbox, Shared};
use crate::view_name::ViewName;
use crate::weather_type::{determine_weather_type, WeatherType};

pub const TITLE_LABEL: &str = "Weather";
pub const CITY_LABEL: &str = "City name";
pub const CITY_INFO_LABEL: &str = "City: ";
pub const TEMPERATURE_LABEL: &str = "Temperature: ";
pub const CONDITION_LABEL: &str = "Condition: ";
pub const PET_LABEL: &str = "Pet: ";
pub const GET_WEATHER_BUTTON_LABEL: &str = "Get Weather";
pub const SETTINGS_LABEL: &str = "Settings";

/// One weather screen (current, hourly or daily).
pub struct WeatherView<G> {
    controller: WeatherController<G>,
    inbox: Inbox<WeatherState>,
    state: WeatherState,
    city_input: String,
    error_dialog: Option<String>,
    weather_type: WeatherType,
    animation_time: f64,
}

impl<G> WeatherView<G>
where
    G: WeatherGateway + Send + Sync + 'static,
{
    pub fn new(view_model: &Shared<WeatherViewModel>, controller: WeatherController<G>) -> Self {
        let mut vm = view_model.borrow_mut();
        let inbox = vm.subscribe();
        Self {
            controller,
            inbox,
            state: vm.get_state(),
            city_input: String::new(),
            error_dialog: None,
            weather_type: WeatherType::Unknown,
            animation_time: 0.0,
        }
    }

    pub fn mode(&self) -> WeatherMode {
        self.controller.mode()
    }

    pub fn view_name(&self) -> ViewName {
        self.mode().view_name()
    }

    pub fn controller(&self) -> &WeatherController<G> {
        &self.controller
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Presents finished lookups and renders every snapshot published since
    /// the last frame.
    pub fn poll(&mut self) {
        self.controller.poll();
        for state in self.inbox.drain() {
            self.property_change(state);
        }
    }

    fn property_change(&mut self, state: WeatherState) {
        self.set_fields(&state);
        if let Some(error) = &state.error_message {
            self.error_dialog = Some(error.clone());
        }
        self.state = state;
    }

    fn set_fields(&mut self, state: &WeatherState) {
        // Unsubmitted input is dropped on every render.
        self.city_input.clear();
        self.weather_type = determine_weather_type(&state.condition);
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.animation_time += ctx.input(|i| i.unstable_dt) as f64;
        if self.state.has_report() {
            ctx.request_repaint();
        } else if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let modal_open = self.error_dialog.is_some();
        let frame = egui::Frame::central_panel(&ctx.style()).fill(icon::background_color(self.weather_type));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.set_enabled(!modal_open);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(TITLE_LABEL).size(32.0).strong().color(Color32::WHITE));
                ui.add_space(10.0);
                self.input_row(ui);
                self.button_row(ui);
                ui.separator();
                self.info_panel(ui);
            });
        });

        self.error_window(ctx);
    }

    fn input_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(CITY_LABEL);
            let response = ui.add(egui::TextEdit::singleline(&mut self.city_input).desired_width(180.0));
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.controller.execute(&self.city_input);
            }

            // Always shows this screen's own mode again after a pick.
            let own = self.mode();
            let mut selected = own;
            egui::ComboBox::from_id_source(("weather-mode", own.label()))
                .selected_text(own.label())
                .show_ui(ui, |ui| {
                    for mode in WeatherMode::ALL {
                        ui.selectable_value(&mut selected, mode, mode.label());
                    }
                });
            if selected != own {
                self.controller.switch_to(selected);
            }
        });
    }

    fn button_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(GET_WEATHER_BUTTON_LABEL).clicked() {
                self.controller.execute(&self.city_input);
            }
            if ui.button(SETTINGS_LABEL).clicked() {
                self.controller.switch_to_logged_in_view();
            }
            if self.is_busy() {
                ui.spinner();
            }
        });
    }

    fn info_panel(&self, ui: &mut egui::Ui) {
        let line = |ui: &mut egui::Ui, label: &str, value: &str| {
            ui.label(RichText::new(format!("{label}{value}")).size(18.0).color(Color32::WHITE));
        };
        line(ui, CITY_INFO_LABEL, &self.state.city);
        line(ui, TEMPERATURE_LABEL, &self.state.temperature);
        line(ui, CONDITION_LABEL, &self.state.condition);
        line(ui, PET_LABEL, &self.state.pet_type);

        if !self.state.description.is_empty() {
            ui.add_space(10.0);
            ui.label(
                RichText::new(&self.state.description)
                    .size(15.0)
                    .monospace()
                    .color(Color32::WHITE),
            );
        }

        ui.add_space(20.0);
        let (rect, _) = ui.allocate_exact_size(egui::Vec2::splat(160.0), egui::Sense::hover());
        icon::paint(ui.painter(), rect, self.weather_type, self.animation_time);
    }

    fn error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_dialog.clone() else {
            return;
        };

        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.error_dialog = None;
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::presenter::{LoggedInViewModel, WeatherPresenter, WeatherViewModels};
    use crate::state::LoggedInState;
    use crate::use_case::tests::FakeGateway;
    use crate::use_case::{WeatherInteractor, WeatherOutputData};
    use crate::view_manager::ViewManagerModel;

    fn view(mode: WeatherMode) -> (WeatherView<FakeGateway>, Rc<WeatherPresenter>) {
        let weather = WeatherViewModels::new("dog");
        let presenter = Rc::new(WeatherPresenter::new(
            mode,
            weather.clone(),
            LoggedInViewModel::shared(ViewName::LoggedIn, LoggedInState::new("sam", "dog")),
            ViewManagerModel::shared(ViewName::Weather),
        ));
        let controller = WeatherController::new(
            Arc::new(WeatherInteractor::new(FakeGateway::toronto())),
            Rc::clone(&presenter),
        );
        (WeatherView::new(weather.get(mode), controller), presenter)
    }

    #[test]
    fn render_clears_input_and_updates_fields() {
        let (mut view, presenter) = view(WeatherMode::Current);
        view.city_input = "Tor".to_string();

        presenter.prepare_success_view(WeatherOutputData {
            city: "Toronto".to_string(),
            temperature: "20C".to_string(),
            condition: "Light rain".to_string(),
            description: "Wet".to_string(),
        });
        view.poll();

        assert!(view.city_input.is_empty());
        assert_eq!(view.state.city, "Toronto");
        assert_eq!(view.weather_type, WeatherType::Rain);
        assert!(view.error_dialog.is_none());
    }

    #[test]
    fn error_opens_dialog() {
        let (mut view, presenter) = view(WeatherMode::Hourly);
        view.city_input = "Nowhere".to_string();

        presenter.prepare_fail_view("API unreachable");
        view.poll();

        assert_eq!(view.error_dialog.as_deref(), Some("API unreachable"));
        assert!(view.city_input.is_empty());
        assert_eq!(view.view_name(), ViewName::Hourly);
    }

    #[test]
    fn nothing_rendered_without_notification() {
        let (mut view, _presenter) = view(WeatherMode::Daily);
        view.city_input = "Par".to_string();

        view.poll();

        assert_eq!(view.city_input, "Par");
    }
}
