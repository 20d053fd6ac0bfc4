use tracing::{debug, warn};

use crate::core::{
    CandleGeometry, OhlcBar, OhlcColumns, OhlcSeries, PriceScale, TimeScale, Viewport,
    ViewportState, project_candles,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionMode, InteractionState};
use crate::render::{NullRenderer, Renderer};

use super::{ChartConfig, ChartLayout, PriceRangeSync, TimeRangeListener};

/// Candlestick chart whose price range follows the visible time window.
///
/// The chart owns its series, both axis scales and exactly one
/// [`TimeRangeListener`]. Every committed time-range change runs the
/// listener and applies the price range it derives. Nothing else writes the
/// price range after construction.
pub struct RangeSyncedChart<R: Renderer = NullRenderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) layout: ChartLayout,
    pub(super) series: OhlcSeries,
    pub(super) time_scale: TimeScale,
    pub(super) price_scale: PriceScale,
    pub(super) sync: PriceRangeSync,
    pub(super) interaction: InteractionState,
    pub(super) redraw_pending: bool,
}

impl RangeSyncedChart<NullRenderer> {
    /// Builds a headless chart with default configuration.
    pub fn create(series: OhlcSeries, title: &str) -> ChartResult<Self> {
        Self::create_with_config(series, title, ChartConfig::default())
    }

    pub fn create_with_config(
        series: OhlcSeries,
        title: &str,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        Self::with_renderer(NullRenderer::default(), series, title, config)
    }
}

impl<R: Renderer> RangeSyncedChart<R> {
    pub fn with_renderer(
        renderer: R,
        series: OhlcSeries,
        title: &str,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        if series.is_empty() {
            return Err(ChartError::InvalidData(
                "candlestick chart requires at least one bar".to_owned(),
            ));
        }
        if config.strict_integrity {
            series.validate_integrity()?;
        }

        let time_scale = TimeScale::from_bars(series.bars())?;
        let price_scale = PriceScale::from_bars_tuned(series.bars(), config.initial_price_tuning)?;
        let sync = PriceRangeSync::new(config.margin_pad, config.empty_window_policy)?;
        let layout = ChartLayout::for_title(title, config);

        debug!(
            title = %layout.title,
            bars = series.len(),
            "created range-synced candlestick chart"
        );

        Ok(Self {
            renderer,
            config,
            layout,
            series,
            time_scale,
            price_scale,
            sync,
            interaction: InteractionState::default(),
            redraw_pending: true,
        })
    }

    /// Range-change event entry point: commits `(start, end)` as the visible
    /// time window and re-derives the price range from the committed window.
    ///
    /// Equal bounds commit a window of `min_time_span` centered on the instant.
    pub fn on_time_range_changed(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.time_scale
            .set_visible_range_with_min_span(start, end, self.config.min_time_span)?;
        self.emit_time_range_changed();
        Ok(())
    }

    /// Notifies the listener with the committed range (never the raw request)
    /// and applies its result.
    pub(super) fn emit_time_range_changed(&mut self) {
        let committed = self.time_scale.visible_range();
        let update = self.sync.on_time_range_changed(committed, &self.series);
        let Some((min, max)) = update.range() else {
            return;
        };

        let min_span = self.config.initial_price_tuning.min_span_absolute;
        match PriceScale::with_min_span(min, max, min_span) {
            Ok(scale) => {
                if scale != self.price_scale {
                    self.price_scale = scale;
                    self.redraw_pending = true;
                }
            }
            Err(err) => warn!(
                error = %err,
                "skipping price range update for visible window"
            ),
        }
    }

    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    #[must_use]
    pub fn series(&self) -> &OhlcSeries {
        &self.series
    }

    /// Parallel trace arrays in series index order.
    #[must_use]
    pub fn candlestick_trace(&self) -> OhlcColumns {
        self.series.columns()
    }

    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        ViewportState {
            time_range: self.time_scale.visible_range(),
            price_range: self.price_scale.domain(),
        }
    }

    #[must_use]
    pub fn time_range(&self) -> (f64, f64) {
        self.time_scale.visible_range()
    }

    #[must_use]
    pub fn price_range(&self) -> (f64, f64) {
        self.price_scale.domain()
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn price_scale(&self) -> PriceScale {
        self.price_scale
    }

    #[must_use]
    pub fn pixel_viewport(&self) -> Viewport {
        self.config.viewport()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    /// `true` after a price-range change until the next `render`.
    #[must_use]
    pub fn is_redraw_pending(&self) -> bool {
        self.redraw_pending
    }

    /// Bars inside the committed time window, borrowed from the series.
    #[must_use]
    pub fn visible_bars(&self) -> &[OhlcBar] {
        let (start, end) = self.time_scale.visible_range();
        self.series.window(start, end)
    }

    pub fn project_visible_candles(&self, body_width_px: f64) -> ChartResult<Vec<CandleGeometry>> {
        project_candles(
            self.visible_bars(),
            self.time_scale,
            self.price_scale,
            self.pixel_viewport(),
            body_width_px,
        )
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
