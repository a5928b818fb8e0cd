//! Input boundary between the views and the use case.
//!
//! Fetches run on a background thread with their own tokio runtime. Their
//! outcomes come back over a channel and are handed to the presenter from
//! [`WeatherController::poll`], which the UI calls once per frame, so
//! view-models are only ever touched on the UI thread. Only the most recent
//! lookup is presented; an earlier one that finishes later is dropped.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use log::{debug, info};

use crate::error::WeatherError;
use crate::presenter::{LoggedInPresenter, WeatherPresenter};
use crate::use_case::{WeatherGateway, WeatherInteractor, WeatherMode, WeatherOutcome};

pub struct WeatherController<G> {
    interactor: Arc<WeatherInteractor<G>>,
    presenter: Rc<WeatherPresenter>,
    sender: Sender<(u64, WeatherOutcome)>,
    receiver: Receiver<(u64, WeatherOutcome)>,
    in_flight: Cell<usize>,
    latest_request: Cell<u64>,
}

impl<G> WeatherController<G>
where
    G: WeatherGateway + Send + Sync + 'static,
{
    pub fn new(interactor: Arc<WeatherInteractor<G>>, presenter: Rc<WeatherPresenter>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            interactor,
            presenter,
            sender,
            receiver,
            in_flight: Cell::new(0),
            latest_request: Cell::new(0),
        }
    }

    pub fn mode(&self) -> WeatherMode {
        self.presenter.mode()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// Starts a lookup for `city`; the outcome is presented by a later `poll`.
    pub fn execute(&self, city: &str) {
        let mode = self.mode();
        info!("Fetching {mode} weather for {city:?}");

        let city = city.to_string();
        let interactor = Arc::clone(&self.interactor);
        let sender = self.sender.clone();
        let request = self.latest_request.get() + 1;
        self.latest_request.set(request);
        self.in_flight.set(self.in_flight.get() + 1);

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(interactor.execute(&city, mode)),
                Err(e) => Err(WeatherError::Runtime(e)),
            };
            if sender.send((request, outcome)).is_err() {
                debug!("UI went away before the {mode} lookup finished");
            }
        });
    }

    /// Presents the finished lookup for the latest request, if it has come
    /// back. Returns how many outcomes were presented.
    pub fn poll(&self) -> usize {
        let mut presented = 0;
        while let Ok((request, outcome)) = self.receiver.try_recv() {
            self.in_flight.set(self.in_flight.get().saturating_sub(1));
            if request < self.latest_request.get() {
                debug!("Dropping stale {} lookup #{request}", self.mode());
                continue;
            }
            self.presenter.present(outcome);
            presented += 1;
        }
        presented
    }

    pub fn switch_to_logged_in_view(&self) {
        self.presenter.switch_to_logged_in_view();
    }

    pub fn switch_to_current_view(&self) {
        self.presenter.switch_to_mode(WeatherMode::Current);
    }

    pub fn switch_to_hourly_view(&self) {
        self.presenter.switch_to_mode(WeatherMode::Hourly);
    }

    pub fn switch_to_daily_view(&self) {
        self.presenter.switch_to_mode(WeatherMode::Daily);
    }

    pub fn switch_to(&self, mode: WeatherMode) {
        match mode {
            WeatherMode::Current => self.switch_to_current_view(),
            WeatherMode::Hourly => self.switch_to_hourly_view(),
            WeatherMode::Daily => self.switch_to_daily_view(),
        }
    }
}

pub struct LoggedInController {
    presenter: Rc<LoggedInPresenter>,
}

impl LoggedInController {
    pub fn new(presenter: Rc<LoggedInPresenter>) -> Self {
        Self { presenter }
    }

    pub fn change_pet_type(&self, pet_type: &str) {
        self.presenter.change_pet_type(pet_type);
    }

    pub fn return_to_last_view(&self) {
        self.presenter.return_to_last_view();
    }
}
