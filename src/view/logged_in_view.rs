use eframe::egui::{self, RichText};

use crate::controller::LoggedInController;
use crate::presenter::LoggedInViewModel;
use crate::state::LoggedInState;
use crate::view_model::{Inbox, Shared};

pub const PET_TYPES: [&str; 5] = ["dog", "cat", "rabbit", "bird", "none"];
pub const BACK_BUTTON_LABEL: &str = "Back to weather";

/// Home/settings screen of the logged-in user.
pub struct LoggedInView {
    controller: LoggedInController,
    inbox: Inbox<LoggedInState>,
    state: LoggedInState,
}

impl LoggedInView {
    pub fn new(view_model: &Shared<LoggedInViewModel>, controller: LoggedInController) -> Self {
        let mut vm = view_model.borrow_mut();
        let inbox = vm.subscribe();
        Self {
            controller,
            inbox,
            state: vm.get_state(),
        }
    }

    pub fn poll(&mut self) {
        if let Some(latest) = self.inbox.drain().pop() {
            self.state = latest;
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Settings").size(28.0).strong());
                ui.label(format!("Logged in as {}", self.state.username));
                ui.add_space(10.0);

                let mut pet_type = self.state.pet_type.clone();
                ui.horizontal(|ui| {
                    ui.label("Pet type");
                    egui::ComboBox::from_id_source("pet-type")
                        .selected_text(pet_type.as_str())
                        .show_ui(ui, |ui| {
                            for pet in PET_TYPES {
                                ui.selectable_value(&mut pet_type, pet.to_string(), pet);
                            }
                        });
                });
                if pet_type != self.state.pet_type {
                    self.controller.change_pet_type(&pet_type);
                }

                ui.add_space(10.0);
                if let Some(last) = self.state.last_view {
                    ui.label(format!("You came from the {last} view."));
                }
                if ui.button(BACK_BUTTON_LABEL).clicked() {
                    self.controller.return_to_last_view();
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::presenter::{LoggedInPresenter, WeatherViewModels};
    use crate::view_manager::ViewManagerModel;
    use crate::view_name::ViewName;

    #[test]
    fn picks_up_latest_state() {
        let logged_in = LoggedInViewModel::shared(ViewName::LoggedIn, LoggedInState::new("sam", "dog"));
        let presenter = Rc::new(LoggedInPresenter::new(
            logged_in.clone(),
            WeatherViewModels::new("dog"),
            ViewManagerModel::shared(ViewName::LoggedIn),
        ));
        let mut view = LoggedInView::new(&logged_in, LoggedInController::new(Rc::clone(&presenter)));

        presenter.change_pet_type("cat");
        presenter.change_pet_type("bird");
        view.poll();

        assert_eq!(view.state.pet_type, "bird");
        assert_eq!(view.state.username, "sam");
    }
}
