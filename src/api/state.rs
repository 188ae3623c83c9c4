use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::AppConfig;
use crate::extract::{AnthropicExtractor, Extractor};
use crate::layout::{LayoutEngine, Palette};
use crate::session::Session;

pub type SharedExtractor = Arc<dyn Extractor + Send + Sync + 'static>;

pub struct AppState {
    pub session: Session,
    pub config: AppConfig,
    pub extractor: SharedExtractor,
    pub palette: Palette,
    // Pins the month used for undated schedules, otherwise today
    pub today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let extractor = Arc::new(AnthropicExtractor::from_config(&config));
        Self::with_extractor(config, extractor)
    }

    pub fn with_extractor(config: AppConfig, extractor: SharedExtractor) -> Self {
        Self {
            session: Session::new(),
            config,
            extractor,
            palette: Palette::default(),
            today: None,
        }
    }

    pub fn engine(&self) -> LayoutEngine<'_> {
        layout_engine(&self.palette, &self.config, self.today)
    }
}

/// Split out from `AppState::engine` so callers can hold the engine while
/// mutably borrowing the session.
pub fn layout_engine<'a>(
    palette: &'a Palette,
    config: &AppConfig,
    today: Option<NaiveDate>,
) -> LayoutEngine<'a> {
    let engine = LayoutEngine::new(palette, config.detector.detector());
    match today {
        Some(today) => engine.with_today(today),
        None => engine,
    }
}
