//! Presenters turn use-case outcomes and navigation requests into view-model
//! updates. They never render; screens change only because the root
//! container observes the [`ViewManagerModel`].

use log::{debug, warn};

use crate::state::{LoggedInState, WeatherState};
use crate::use_case::{WeatherMode, WeatherOutcome, WeatherOutputData};
use crate::view_manager::ViewManagerModel;
use crate::view_model::{Shared, ViewModel};
use crate::view_name::ViewName;

pub type WeatherViewModel = ViewModel<WeatherState>;
pub type LoggedInViewModel = ViewModel<LoggedInState>;

/// The current, hourly and daily weather view-models.
#[derive(Clone)]
pub struct WeatherViewModels {
    current: Shared<WeatherViewModel>,
    hourly: Shared<WeatherViewModel>,
    daily: Shared<WeatherViewModel>,
}

impl WeatherViewModels {
    pub fn new(pet_type: &str) -> Self {
        let make = |mode: WeatherMode| {
            WeatherViewModel::shared(mode.view_name(), WeatherState::with_pet_type(pet_type))
        };
        Self {
            current: make(WeatherMode::Current),
            hourly: make(WeatherMode::Hourly),
            daily: make(WeatherMode::Daily),
        }
    }

    pub fn get(&self, mode: WeatherMode) -> &Shared<WeatherViewModel> {
        match mode {
            WeatherMode::Current => &self.current,
            WeatherMode::Hourly => &self.hourly,
            WeatherMode::Daily => &self.daily,
        }
    }
}

/// Presenter for one weather screen.
pub struct WeatherPresenter {
    mode: WeatherMode,
    weather_view_models: WeatherViewModels,
    logged_in_view_model: Shared<LoggedInViewModel>,
    view_manager: Shared<ViewManagerModel>,
}

impl WeatherPresenter {
    pub fn new(
        mode: WeatherMode,
        weather_view_models: WeatherViewModels,
        logged_in_view_model: Shared<LoggedInViewModel>,
        view_manager: Shared<ViewManagerModel>,
    ) -> Self {
        Self {
            mode,
            weather_view_models,
            logged_in_view_model,
            view_manager,
        }
    }

    pub fn mode(&self) -> WeatherMode {
        self.mode
    }

    fn own_view_model(&self) -> &Shared<WeatherViewModel> {
        self.weather_view_models.get(self.mode)
    }

    pub fn present(&self, outcome: WeatherOutcome) {
        match outcome {
            Ok(data) => self.prepare_success_view(data),
            Err(e) => {
                warn!("{} weather lookup failed: {e}", self.mode);
                self.prepare_fail_view(&e.to_string());
            }
        }
    }

    pub fn prepare_success_view(&self, data: WeatherOutputData) {
        let view_name = {
            let mut vm = self.own_view_model().borrow_mut();
            let mut state = vm.get_state();
            state.city = data.city;
            state.temperature = data.temperature;
            state.condition = data.condition;
            state.description = data.description;
            state.error_message = None;
            vm.set_state(state);
            vm.notify_changed();
            vm.view_name()
        };

        self.activate(view_name);
    }

    /// Records the error on the current state; everything else already shown
    /// stays as it was and the active screen does not change.
    pub fn prepare_fail_view(&self, error: &str) {
        let mut vm = self.own_view_model().borrow_mut();
        vm.state_mut().error_message = Some(error.to_string());
        vm.notify_changed();
    }

    /// Moves to another weather screen, carrying the pet type along.
    pub fn switch_to_mode(&self, target: WeatherMode) {
        if target == self.mode {
            debug!("Already on the {} view", target.view_name());
            return;
        }

        let pet_type = self.own_view_model().borrow().state().pet_type.clone();
        let view_name = {
            let mut vm = self.weather_view_models.get(target).borrow_mut();
            vm.state_mut().pet_type = pet_type;
            vm.notify_changed();
            vm.view_name()
        };

        self.activate(view_name);
    }

    /// Goes to the logged-in screen, remembering this one as the place to return to.
    pub fn switch_to_logged_in_view(&self) {
        let here = self.mode.view_name();
        let logged_in = {
            let mut vm = self.logged_in_view_model.borrow_mut();
            let mut state = vm.get_state();
            state.last_view = Some(here);
            vm.set_state(state);
            vm.notify_changed();
            vm.view_name()
        };

        self.activate(logged_in);
    }

    fn activate(&self, view: ViewName) {
        debug!("{} presenter switching to {view}", self.mode);
        let mut manager = self.view_manager.borrow_mut();
        manager.set_active_view(view);
        manager.notify_changed();
    }
}

/// Presenter for the logged-in (settings) screen.
pub struct LoggedInPresenter {
    logged_in_view_model: Shared<LoggedInViewModel>,
    weather_view_models: WeatherViewModels,
    view_manager: Shared<ViewManagerModel>,
}

impl LoggedInPresenter {
    pub fn new(
        logged_in_view_model: Shared<LoggedInViewModel>,
        weather_view_models: WeatherViewModels,
        view_manager: Shared<ViewManagerModel>,
    ) -> Self {
        Self {
            logged_in_view_model,
            weather_view_models,
            view_manager,
        }
    }

    /// Stores the new pet type and hands it to every weather screen.
    pub fn change_pet_type(&self, pet_type: &str) {
        debug!("Pet type changed to {pet_type}");
        {
            let mut vm = self.logged_in_view_model.borrow_mut();
            vm.state_mut().pet_type = pet_type.to_string();
            vm.notify_changed();
        }

        for mode in WeatherMode::ALL {
            let mut vm = self.weather_view_models.get(mode).borrow_mut();
            vm.state_mut().pet_type = pet_type.to_string();
            vm.notify_changed();
        }
    }

    pub fn return_to_last_view(&self) {
        let target = self
            .logged_in_view_model
            .borrow()
            .state()
            .last_view
            .unwrap_or(ViewName::Weather);
        debug!("Returning to {target}");

        let mut manager = self.view_manager.borrow_mut();
        manager.set_active_view(target);
        manager.notify_changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use crate::view_model::Inbox;

    struct Fixture {
        weather: WeatherViewModels,
        logged_in: Shared<LoggedInViewModel>,
        manager: Shared<ViewManagerModel>,
        manager_inbox: Inbox<ViewName>,
    }

    impl Fixture {
        fn new() -> Self {
            let manager = ViewManagerModel::shared(ViewName::Weather);
            let manager_inbox = manager.borrow_mut().subscribe();
            Self {
                weather: WeatherViewModels::new("dog"),
                logged_in: LoggedInViewModel::shared(
                    ViewName::LoggedIn,
                    LoggedInState::new("sam", "dog"),
                ),
                manager,
                manager_inbox,
            }
        }

        fn presenter(&self, mode: WeatherMode) -> WeatherPresenter {
            WeatherPresenter::new(
                mode,
                self.weather.clone(),
                self.logged_in.clone(),
                self.manager.clone(),
            )
        }

        fn logged_in_presenter(&self) -> LoggedInPresenter {
            LoggedInPresenter::new(self.logged_in.clone(), self.weather.clone(), self.manager.clone())
        }

        fn state(&self, mode: WeatherMode) -> WeatherState {
            self.weather.get(mode).borrow().get_state()
        }

        fn active(&self) -> ViewName {
            self.manager.borrow().get_active_view()
        }
    }

    fn toronto() -> WeatherOutputData {
        WeatherOutputData {
            city: "Toronto".to_string(),
            temperature: "20C".to_string(),
            condition: "Sunny".to_string(),
            description: "Clear skies".to_string(),
        }
    }

    #[test]
    fn success_replaces_fields_and_clears_error() {
        let fixture = fixture_with_error(WeatherMode::Hourly, "timeout");
        let presenter = fixture.presenter(WeatherMode::Hourly);
        let inbox = fixture.weather.get(WeatherMode::Hourly).borrow_mut().subscribe();

        presenter.prepare_success_view(toronto());

        let state = fixture.state(WeatherMode::Hourly);
        assert_eq!(state.city, "Toronto");
        assert_eq!(state.temperature, "20C");
        assert_eq!(state.condition, "Sunny");
        assert_eq!(state.description, "Clear skies");
        assert_eq!(state.error_message, None);
        assert_eq!(inbox.len(), 1);
        assert_eq!(fixture.active(), ViewName::Hourly);
        assert_eq!(fixture.active().as_str(), "hourly");
        assert_eq!(fixture.manager_inbox.drain(), vec![ViewName::Hourly]);
    }

    fn fixture_with_error(mode: WeatherMode, error: &str) -> Fixture {
        let fixture = Fixture::new();
        fixture.weather.get(mode).borrow_mut().state_mut().error_message = Some(error.to_string());
        fixture
    }

    #[test]
    fn failure_only_touches_error_message() {
        let fixture = Fixture::new();
        let presenter = fixture.presenter(WeatherMode::Hourly);
        presenter.prepare_success_view(toronto());
        fixture.manager_inbox.drain();
        fixture.manager.borrow_mut().set_active_view(ViewName::Daily);
        let before = fixture.state(WeatherMode::Hourly);
        let inbox = fixture.weather.get(WeatherMode::Hourly).borrow_mut().subscribe();

        presenter.prepare_fail_view("API unreachable");

        assert_eq!(inbox.len(), 1);

        let after = fixture.state(WeatherMode::Hourly);
        assert_eq!(after.error_message.as_deref(), Some("API unreachable"));
        assert_eq!(after.city, "Toronto");
        assert_eq!(
            WeatherState {
                error_message: None,
                ..after
            },
            before
        );
        assert_eq!(fixture.active(), ViewName::Daily);
        assert!(fixture.manager_inbox.is_empty());
    }

    #[test]
    fn present_routes_errors_to_fail_view() {
        let fixture = Fixture::new();
        let presenter = fixture.presenter(WeatherMode::Current);

        presenter.present(Err(WeatherError::EmptyCity));

        assert_eq!(
            fixture.state(WeatherMode::Current).error_message.as_deref(),
            Some("Please enter a city name.")
        );
        assert!(fixture.manager_inbox.is_empty());
    }

    #[test]
    fn switching_mode_carries_pet_type() {
        let fixture = Fixture::new();
        fixture.weather.get(WeatherMode::Hourly).borrow_mut().state_mut().pet_type = "cat".to_string();
        let presenter = fixture.presenter(WeatherMode::Hourly);

        presenter.switch_to_mode(WeatherMode::Daily);

        assert_eq!(fixture.state(WeatherMode::Daily).pet_type, "cat");
        assert_eq!(fixture.state(WeatherMode::Current).pet_type, "dog");
        assert_eq!(fixture.active(), ViewName::Daily);
        assert_eq!(fixture.manager_inbox.drain(), vec![ViewName::Daily]);
    }

    #[test]
    fn switching_to_own_mode_is_ignored() {
        let fixture = Fixture::new();
        let presenter = fixture.presenter(WeatherMode::Current);

        presenter.switch_to_mode(WeatherMode::Current);

        assert!(fixture.manager_inbox.is_empty());
    }

    #[test]
    fn leaving_for_home_records_last_view() {
        let fixture = Fixture::new();
        let presenter = fixture.presenter(WeatherMode::Hourly);
        let inbox = fixture.logged_in.borrow_mut().subscribe();

        presenter.switch_to_logged_in_view();

        let published = inbox.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].last_view, Some(ViewName::Hourly));
        assert_eq!(fixture.logged_in.borrow().state().last_view, Some(ViewName::Hourly));
        assert_eq!(fixture.active(), ViewName::LoggedIn);
        assert_eq!(fixture.manager_inbox.drain(), vec![ViewName::LoggedIn]);
    }

    #[test]
    fn return_goes_back_where_the_user_left() {
        let fixture = Fixture::new();
        fixture.presenter(WeatherMode::Daily).switch_to_logged_in_view();
        fixture.manager_inbox.drain();

        fixture.logged_in_presenter().return_to_last_view();

        assert_eq!(fixture.active(), ViewName::Daily);
        assert_eq!(fixture.manager_inbox.drain(), vec![ViewName::Daily]);
    }

    #[test]
    fn return_without_history_goes_to_current_weather() {
        let fixture = Fixture::new();
        fixture.manager.borrow_mut().set_active_view(ViewName::LoggedIn);

        fixture.logged_in_presenter().return_to_last_view();

        assert_eq!(fixture.active(), ViewName::Weather);
    }

    #[test]
    fn pet_type_change_reaches_every_weather_screen() {
        let fixture = Fixture::new();
        let inbox = fixture.weather.get(WeatherMode::Current).borrow_mut().subscribe();

        fixture.logged_in_presenter().change_pet_type("rabbit");

        assert_eq!(fixture.logged_in.borrow().state().pet_type, "rabbit");
        for mode in WeatherMode::ALL {
            assert_eq!(fixture.state(mode).pet_type, "rabbit");
        }
        assert_eq!(inbox.len(), 1);
        assert!(fixture.manager_inbox.is_empty());
    }
}
