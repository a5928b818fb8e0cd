use std::rc::Rc;
use std::sync::Arc;

use eframe::{egui, App, Frame};
use log::info;

use crate::config::Config;
use crate::controller::{LoggedInController, WeatherController};
use crate::presenter::{LoggedInPresenter, LoggedInViewModel, WeatherPresenter, WeatherViewModels};
use crate::state::LoggedInState;
use crate::use_case::{WeatherGateway, WeatherInteractor, WeatherMode};
use crate::view::{LoggedInView, WeatherView};
use crate::view_manager::ViewManagerModel;
use crate::view_model::Inbox;
use crate::view_name::ViewName;
use crate::weather::OpenWeatherGateway;

/// Root container: shows whichever view the view manager names.
pub struct WeatherApp<G> {
    view_manager_inbox: Inbox<ViewName>,
    active_view: ViewName,
    weather_views: Vec<WeatherView<G>>,
    logged_in_view: LoggedInView,
}

impl<G> WeatherApp<G>
where
    G: WeatherGateway + Send + Sync + 'static,
{
    /// Wires view-models, presenters, controllers and views around `gateway`.
    pub fn new(config: &Config, gateway: G) -> Self {
        let view_manager = ViewManagerModel::shared(ViewName::Weather);
        let weather_view_models = WeatherViewModels::new(&config.pet_type);
        let logged_in_view_model = LoggedInViewModel::shared(
            ViewName::LoggedIn,
            LoggedInState::new(config.username.clone(), config.pet_type.clone()),
        );
        let interactor = Arc::new(WeatherInteractor::new(gateway));

        let weather_views = WeatherMode::ALL
            .into_iter()
            .map(|mode| {
                let presenter = Rc::new(WeatherPresenter::new(
                    mode,
                    weather_view_models.clone(),
                    Rc::clone(&logged_in_view_model),
                    Rc::clone(&view_manager),
                ));
                let controller = WeatherController::new(Arc::clone(&interactor), presenter);
                WeatherView::new(weather_view_models.get(mode), controller)
            })
            .collect();

        let logged_in_presenter = Rc::new(LoggedInPresenter::new(
            Rc::clone(&logged_in_view_model),
            weather_view_models,
            Rc::clone(&view_manager),
        ));
        let logged_in_view = LoggedInView::new(
            &logged_in_view_model,
            LoggedInController::new(logged_in_presenter),
        );

        let view_manager_inbox = view_manager.borrow_mut().subscribe();
        let active_view = view_manager.borrow().get_active_view();
        let app = Self {
            view_manager_inbox,
            active_view,
            weather_views,
            logged_in_view,
        };

        if let (Some(city), Some(view)) = (&config.city, app.weather_view(WeatherMode::Current)) {
            view.controller().execute(city);
        }
        app
    }

    pub fn active_view(&self) -> ViewName {
        self.active_view
    }

    fn weather_view(&self, mode: WeatherMode) -> Option<&WeatherView<G>> {
        self.weather_views.iter().find(|v| v.mode() == mode)
    }

    /// One UI tick of state propagation: finished lookups, view snapshots,
    /// then the active view.
    pub fn poll(&mut self) {
        for view in &mut self.weather_views {
            view.poll();
        }
        self.logged_in_view.poll();

        if let Some(next) = self.view_manager_inbox.drain().pop() {
            if next != self.active_view {
                info!("Switching from {} to {next}", self.active_view);
            }
            self.active_view = next;
        }
    }
}

impl<G> App for WeatherApp<G>
where
    G: WeatherGateway + Send + Sync + 'static,
{
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll();

        let active = self.active_view;
        match active {
            ViewName::LoggedIn => self.logged_in_view.show(ctx),
            _ => {
                if let Some(view) = self.weather_views.iter_mut().find(|v| v.view_name() == active) {
                    view.show(ctx);
                }
            }
        }

        // Lookups may finish on any screen, not only the visible one.
        if self.weather_views.iter().any(WeatherView::is_busy) {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

pub fn run_app(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let gateway = OpenWeatherGateway::new(config.api_base_url.clone(), config.api_key.clone(), config.units);
    let app = WeatherApp::new(&config, gateway);

    info!("Starting egui application...");
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(640.0, 720.0)),
        ..Default::default()
    };

    eframe::run_native("Pet Weather", native_options, Box::new(|_cc| Box::new(app)))?;
    Ok(())
}
