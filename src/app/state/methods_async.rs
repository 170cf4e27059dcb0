use chrono::Utc;

use super::input::{command_char, is_ctrl_c, text_char};
use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCommand {
    Quit,
    OpenSearch,
    Refresh,
    SetFahrenheit,
    SetCelsius,
    Help,
}

fn command_from_char(ch: char) -> Option<KeyCommand> {
    match ch {
        'q' => Some(KeyCommand::Quit),
        '/' | 'l' => Some(KeyCommand::OpenSearch),
        'r' => Some(KeyCommand::Refresh),
        'f' => Some(KeyCommand::SetFahrenheit),
        'c' => Some(KeyCommand::SetCelsius),
        '?' => Some(KeyCommand::Help),
        _ => None,
    }
}

impl AppState {
    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.handle_bootstrap(tx, cli).await?,
            AppEvent::TickFrame => self.handle_tick_frame(),
            AppEvent::TickRefresh => self.handle_tick_refresh(tx, cli).await?,
            AppEvent::Input(input) => self.handle_input(input, tx, cli).await?,
            AppEvent::FetchStarted => self.handle_fetch_started(),
            AppEvent::GeocodeResolved(resolution) => {
                self.handle_geocode_resolved(tx, resolution);
            }
            AppEvent::FetchSucceeded(bundle) => self.handle_fetch_succeeded(bundle),
            AppEvent::FetchFailed(err) => self.handle_fetch_failed(tx, err),
            AppEvent::SearchStarted(query) => self.handle_search_started(&query),
            AppEvent::SearchCompleted { query, results } => {
                self.handle_search_completed(query, results);
            }
            AppEvent::SearchFailed { query, error } => self.handle_search_failed(&query, error),
            AppEvent::Quit => {
                self.search_debouncer.cancel();
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    pub(crate) async fn handle_bootstrap(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        cli.validate()?;
        start_frame_task(tx.clone());
        start_refresh_task(tx.clone(), cli.refresh_interval);
        if !self.settings.onboarding_complete {
            info!("first launch, showing onboarding");
            self.mode = AppMode::Onboarding;
            self.onboarding_slide = 0;
            return Ok(());
        }
        self.start_fetch(tx, cli).await
    }

    pub(crate) fn handle_tick_frame(&mut self) {
        self.frame_tick = self.frame_tick.wrapping_add(1);
        self.refresh_meta.state = evaluate_freshness(
            self.refresh_meta.last_success,
            self.refresh_meta.consecutive_failures,
            self.refresh_interval_secs,
        );
    }

    pub(crate) async fn handle_tick_refresh(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        if !matches!(
            self.mode,
            AppMode::Ready | AppMode::Error | AppMode::Loading
        ) || self.awaiting_permission(cli)
        {
            return Ok(());
        }
        self.start_fetch(tx, cli).await
    }

    pub(crate) fn handle_fetch_started(&mut self) {
        self.fetch_in_flight = true;
        self.loading_message = if self.weather.is_some() {
            "Refreshing...".to_string()
        } else {
            "Fetching weather...".to_string()
        };
        if self.weather.is_none() {
            self.mode = AppMode::Loading;
        }
        self.refresh_meta.last_attempt = Some(Utc::now());
        self.refresh_meta.clear_retry();
    }

    pub(crate) fn handle_geocode_resolved(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        resolution: GeocodeResolution,
    ) {
        match resolution {
            GeocodeResolution::Selected(location) => {
                debug!(location = %location.display_name(), "location resolved");
                self.selected_location = Some(location.clone());
                self.pending_locations.clear();
                self.fetch_weather(tx, location);
            }
            GeocodeResolution::NeedsDisambiguation(locations) => {
                self.pending_locations = locations;
                self.fetch_in_flight = false;
                self.mode = AppMode::SelectingLocation;
                self.loading_message = "Choose a location (1-5)".to_string();
            }
            GeocodeResolution::NotFound(city) => {
                self.fetch_in_flight = false;
                self.mode = AppMode::Error;
                self.last_error = Some(format!("No location found for {city}"));
            }
        }
    }

    pub(crate) fn handle_fetch_succeeded(&mut self, bundle: WeatherBundle) {
        info!(
            location = %bundle.location.display_name(),
            days = bundle.daily.len(),
            "weather updated"
        );
        let location = bundle.location.clone();
        let moved = self
            .weather
            .as_ref()
            .is_none_or(|previous| !previous.location.same_place(&location));
        self.fetch_in_flight = false;
        self.weather = Some(bundle);
        self.mode = AppMode::Ready;
        self.last_error = None;
        self.refresh_meta.mark_success();
        self.backoff.reset();
        if moved {
            self.forecast_scroll = 0;
        }
        if self
            .settings
            .last_location
            .as_ref()
            .is_none_or(|saved| !saved.same_place(&location))
        {
            self.settings.last_location = Some(location);
            self.persist_settings();
        }
    }

    pub(crate) fn handle_fetch_failed(&mut self, tx: &mpsc::Sender<AppEvent>, err: String) {
        warn!(error = %err, "weather fetch failed");
        self.fetch_in_flight = false;
        self.last_error = Some(err);
        self.mode = AppMode::Error;
        self.refresh_meta.mark_failure();
        self.refresh_meta.state = evaluate_freshness(
            self.refresh_meta.last_success,
            self.refresh_meta.consecutive_failures,
            self.refresh_interval_secs,
        );
        let delay = self.backoff.next_delay();
        self.refresh_meta.schedule_retry_in(delay);
        schedule_retry(tx.clone(), delay);
    }

    pub(crate) async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.handle_key_press(key, tx, cli).await?;
        }
        Ok(())
    }

    pub(crate) async fn handle_key_press(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        if is_ctrl_c(key) {
            tx.send(AppEvent::Quit).await?;
            return Ok(());
        }
        if self.mode == AppMode::Onboarding {
            return self.handle_onboarding_key(key, tx, cli).await;
        }
        if self.permission_prompt_open {
            return self.handle_permission_key(key, tx).await;
        }
        if self.search.open {
            return self.handle_search_key(key, tx).await;
        }
        if self.help_open {
            self.help_open = false;
            return Ok(());
        }
        self.handle_main_key(key, tx, cli).await
    }

    async fn handle_onboarding_key(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match key.code {
            KeyCode::Right | KeyCode::Enter => {
                if self.onboarding_slide + 1 < ONBOARDING_SLIDES.len() {
                    self.onboarding_slide += 1;
                } else {
                    self.finish_onboarding(tx, cli).await?;
                }
            }
            KeyCode::Left => self.onboarding_slide = self.onboarding_slide.saturating_sub(1),
            KeyCode::Esc => tx.send(AppEvent::Quit).await?,
            _ => match command_char(key) {
                Some('s') => self.finish_onboarding(tx, cli).await?,
                Some('q') => tx.send(AppEvent::Quit).await?,
                _ => {}
            },
        }
        Ok(())
    }

    pub(crate) async fn finish_onboarding(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        info!("onboarding complete");
        self.settings.onboarding_complete = true;
        self.persist_settings();
        self.onboarding_slide = 0;
        self.mode = AppMode::Loading;
        self.start_fetch(tx, cli).await
    }

    async fn handle_permission_key(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.grant_location_permission(tx).await?,
            KeyCode::Esc => self.deny_location_permission(),
            _ => match command_char(key) {
                Some('y') => self.grant_location_permission(tx).await?,
                Some('n') => self.deny_location_permission(),
                _ => {}
            },
        }
        Ok(())
    }

    async fn handle_search_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match key.code {
            KeyCode::Esc => self.close_search(),
            KeyCode::Enter => self.confirm_search_selection(tx).await?,
            KeyCode::Up => self.search.selected = self.search.selected.saturating_sub(1),
            KeyCode::Down => {
                self.search.selected = (self.search.selected + 1).min(self.search.results.len());
            }
            KeyCode::Backspace => {
                if self.search.query.pop().is_some() {
                    self.on_query_changed(tx);
                }
            }
            _ => {
                if let Some(ch) = text_char(key) {
                    self.search.query.push(ch);
                    self.on_query_changed(tx);
                }
            }
        }
        Ok(())
    }

    async fn handle_main_key(
        &mut self,
        key: KeyEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                tx.send(AppEvent::Quit).await?;
                return Ok(());
            }
            KeyCode::F(1) => {
                self.help_open = true;
                return Ok(());
            }
            KeyCode::Up => {
                self.forecast_scroll = self.forecast_scroll.saturating_sub(1);
                return Ok(());
            }
            KeyCode::Down => {
                self.forecast_scroll = (self.forecast_scroll + 1).min(self.max_forecast_scroll());
                return Ok(());
            }
            KeyCode::Char(digit @ '1'..='5') if self.mode == AppMode::SelectingLocation => {
                let idx = (digit as usize) - ('1' as usize);
                return self.select_pending_location(idx, tx).await;
            }
            _ => {}
        }

        let Some(command) = command_char(key).and_then(command_from_char) else {
            return Ok(());
        };
        match command {
            KeyCommand::Quit => tx.send(AppEvent::Quit).await?,
            KeyCommand::OpenSearch => self.open_search(),
            KeyCommand::Refresh => self.start_fetch(tx, cli).await?,
            KeyCommand::SetFahrenheit => self.set_units(Units::Fahrenheit),
            KeyCommand::SetCelsius => self.set_units(Units::Celsius),
            KeyCommand::Help => self.help_open = true,
        }
        Ok(())
    }
}
