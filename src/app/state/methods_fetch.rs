use super::*;

impl AppState {
    /// Starts a weather fetch for whatever location applies right now: the
    /// selected one, `--lat/--lon`, the CLI city, or the current location.
    pub(crate) async fn start_fetch(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        if self.fetch_blocked() {
            return Ok(());
        }
        if let Some(location) = self.selected_location.clone() {
            tx.send(AppEvent::FetchStarted).await?;
            self.fetch_weather(tx, location);
            return Ok(());
        }
        if let Some((lat, lon)) = cli.coordinates() {
            tx.send(AppEvent::FetchStarted).await?;
            self.start_coords_lookup(tx, lat, lon);
            return Ok(());
        }
        if let Some(city) = cli.city_query() {
            tx.send(AppEvent::FetchStarted).await?;
            self.start_city_lookup(tx, city);
            return Ok(());
        }
        if self.settings.location_permission != LocationPermission::Granted
            && let Some(saved) = self.settings.last_location.clone()
        {
            debug!(location = %saved.display_name(), "using last saved location");
            self.selected_location = Some(saved.clone());
            tx.send(AppEvent::FetchStarted).await?;
            self.fetch_weather(tx, saved);
            return Ok(());
        }
        self.request_current_location(tx).await
    }

    pub(crate) fn fetch_blocked(&self) -> bool {
        self.fetch_in_flight
            || self.permission_prompt_open
            || matches!(self.mode, AppMode::SelectingLocation | AppMode::Onboarding)
    }

    /// True when the only way forward is an answer to the location prompt.
    pub(crate) fn awaiting_permission(&self, cli: &Cli) -> bool {
        self.selected_location.is_none()
            && cli.coordinates().is_none()
            && cli.city_query().is_none()
            && self.settings.last_location.is_none()
            && self.settings.location_permission != LocationPermission::Granted
    }

    pub(crate) async fn request_current_location(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        if self.settings.location_permission == LocationPermission::Granted {
            return self.start_current_location_lookup(tx).await;
        }
        debug!(permission = ?self.settings.location_permission, "asking for location permission");
        self.permission_prompt_open = true;
        if self.weather.is_none() {
            self.loading_message = "Waiting for location permission...".to_string();
        }
        Ok(())
    }

    pub(crate) async fn grant_location_permission(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        info!("location permission granted");
        self.permission_prompt_open = false;
        self.settings.location_permission = LocationPermission::Granted;
        self.persist_settings();
        self.start_current_location_lookup(tx).await
    }

    pub(crate) fn deny_location_permission(&mut self) {
        info!("location permission denied");
        self.permission_prompt_open = false;
        self.settings.location_permission = LocationPermission::Denied;
        self.persist_settings();
        self.last_error = Some(PERMISSION_REQUIRED_MESSAGE.to_string());
        if self.weather.is_none() {
            self.mode = AppMode::Error;
        }
    }

    async fn start_current_location_lookup(&self, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        tx.send(AppEvent::FetchStarted).await?;
        let locator = self.locator.clone();
        let geocoder = self.geocoder.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match locate(&locator, &geocoder).await {
                Ok(location) => AppEvent::GeocodeResolved(GeocodeResolution::Selected(location)),
                Err(err) => AppEvent::FetchFailed(format!("{err:#}")),
            };
            let _ = tx2.send(event).await;
        });
        Ok(())
    }

    fn start_coords_lookup(&self, tx: &mpsc::Sender<AppEvent>, lat: f64, lon: f64) {
        let geocoder = self.geocoder.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let location = match geocoder.reverse(lat, lon).await {
                Ok(Some(named)) => named,
                Ok(None) => Location::from_coords(lat, lon),
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "reverse geocoding failed");
                    Location::from_coords(lat, lon)
                }
            };
            let _ = tx2
                .send(AppEvent::GeocodeResolved(GeocodeResolution::Selected(
                    location,
                )))
                .await;
        });
    }

    fn start_city_lookup(&self, tx: &mpsc::Sender<AppEvent>, city: String) {
        let geocoder = self.geocoder.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match geocoder.resolve(city).await {
                Ok(resolution) => AppEvent::GeocodeResolved(resolution),
                Err(err) => AppEvent::FetchFailed(format!("{err:#}")),
            };
            let _ = tx2.send(event).await;
        });
    }

    pub(crate) fn fetch_weather(&self, tx: &mpsc::Sender<AppEvent>, location: Location) {
        let client = self.weather_client.clone();
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match client.fetch(location).await {
                Ok(bundle) => AppEvent::FetchSucceeded(bundle),
                Err(err) => AppEvent::FetchFailed(format!("{err:#}")),
            };
            let _ = tx2.send(event).await;
        });
    }

    /// Switches to `location` immediately, even with another fetch in flight.
    /// Whichever result arrives last is what stays on screen.
    pub(crate) async fn switch_to_location(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        location: Location,
    ) -> Result<()> {
        info!(location = %location.display_name(), "switching location");
        self.selected_location = Some(location.clone());
        self.pending_locations.clear();
        if self.mode == AppMode::SelectingLocation {
            self.mode = AppMode::Loading;
        }
        tx.send(AppEvent::FetchStarted).await?;
        self.fetch_weather(tx, location);
        Ok(())
    }

    pub(crate) async fn select_pending_location(
        &mut self,
        idx: usize,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        if let Some(selected) = self.pending_locations.get(idx).cloned() {
            self.switch_to_location(tx, selected).await?;
        }
        Ok(())
    }
}
