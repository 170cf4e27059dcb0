use super::*;

impl AppState {
    pub fn open_search(&mut self) {
        self.search_debouncer.cancel();
        self.help_open = false;
        self.search = SearchSheet {
            open: true,
            ..SearchSheet::default()
        };
    }

    pub(crate) fn close_search(&mut self) {
        self.search_debouncer.cancel();
        self.search = SearchSheet::default();
    }

    pub(crate) async fn confirm_search_selection(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        if self.search_in_flight() {
            debug!(
                timer_pending = self.search_debouncer.is_pending(),
                "selection ignored while a search is pending"
            );
            return Ok(());
        }
        if self.search.current_location_selected() {
            self.close_search();
            return self.request_current_location(tx).await;
        }
        let Some(location) = self.search.results.get(self.search.selected).cloned() else {
            return Ok(());
        };
        self.close_search();
        self.switch_to_location(tx, location).await
    }

    /// Reacts to an edit of the query: short queries clear the results, cached
    /// queries answer at once, anything else is searched after the debounce.
    pub(crate) fn on_query_changed(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.search.selected = 0;
        self.search.error = None;
        let query = self.search.query.trim().to_string();

        if !is_searchable(&query) {
            self.search_debouncer.cancel();
            self.search.results.clear();
            self.search.loading = false;
            self.search.active_query = None;
            return;
        }
        if self.search.active_query.as_deref() == Some(query.as_str()) {
            return;
        }

        self.search.active_query = Some(query.clone());
        if let Some(cached) = self.search_cache.get(&cache_key(&query)) {
            self.search.results = cached.clone();
            self.search.loading = false;
            self.search_debouncer.cancel();
            return;
        }

        self.search.results.clear();
        self.search.loading = true;
        let geocoder = self.geocoder.clone();
        let tx = tx.clone();
        self.search_debouncer.schedule(async move {
            debug!(%query, "city search fired");
            if tx.send(AppEvent::SearchStarted(query.clone())).await.is_err() {
                return;
            }
            let event = match geocoder.search(&query).await {
                Ok(results) => AppEvent::SearchCompleted { query, results },
                Err(err) => AppEvent::SearchFailed {
                    query,
                    error: format!("{err:#}"),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    pub(crate) fn handle_search_started(&mut self, query: &str) {
        if self.is_active_query(query) {
            self.search.loading = true;
        }
    }

    pub(crate) fn handle_search_completed(&mut self, query: String, results: Vec<Location>) {
        self.search_cache.put(cache_key(&query), results.clone());
        if !self.is_active_query(&query) {
            debug!(%query, "stale search results ignored");
            return;
        }
        self.search.results = results;
        self.search.loading = false;
        self.search.selected = 0;
        self.search.error = None;
    }

    pub(crate) fn handle_search_failed(&mut self, query: &str, error: String) {
        if !self.is_active_query(query) {
            return;
        }
        warn!(%query, %error, "city search failed");
        self.search.loading = false;
        self.search.error = Some(error);
    }

    /// True from the moment a search is scheduled until its outcome arrives.
    #[must_use]
    pub fn search_in_flight(&self) -> bool {
        self.search.loading
    }

    fn is_active_query(&self, query: &str) -> bool {
        self.search.open && self.search.active_query.as_deref() == Some(query)
    }
}

pub(crate) fn cache_key(query: &str) -> String {
    query.trim().to_lowercase()
}
