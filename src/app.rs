//! Application state and the timer-driven event loop.
//!
//! Everything the dashboard shows lives in `App`; the loop draws a frame,
//! polls input for up to one frame interval, then fires whichever simulation
//! timers have elapsed. Single task, no shared state — the last timer to run
//! wins for any given slice.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use tracing::{info, warn};

use crate::market::{Asset, Market, SortKey};
use crate::news::{self, Article, NewsItem, NewsSort, ResearchReport, SortOrder};
use crate::portfolio::{self, PortfolioStore, PortfolioSummary};
use crate::sentiment::{self, GaugeAnimation, SentimentFactor};
use crate::series::{self, Horizon, PricePoint, StepUnit};
use crate::theme::{self, Mode, Theme};

/// Simulation cadences. Market prices wiggle every 5 s, sentiment factors
/// drift every 10 s, a manual refresh lands after 1.5 s, and input is polled
/// at the ~20 ms animation frame rate.
pub const DEFAULT_MARKET_TICK: Duration = Duration::from_secs(5);
const SENTIMENT_TICK: Duration = Duration::from_secs(10);
const REFRESH_DELAY: Duration = Duration::from_millis(1500);
const FRAME_POLL: Duration = Duration::from_millis(20);

const PERFORMANCE_DAYS: usize = 30;
const SENTIMENT_HISTORY_DAYS: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Market,
    Charts,
    Portfolio,
    Sentiment,
    News,
    Research,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Self::Market,
        Self::Charts,
        Self::Portfolio,
        Self::Sentiment,
        Self::News,
        Self::Research,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Charts => "Charts",
            Self::Portfolio => "Portfolio",
            Self::Sentiment => "Sentiment",
            Self::News => "News",
            Self::Research => "Research",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn next(self) -> Page {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Page {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    ChartSearch,
    NewsSearch,
    ResearchSearch,
    HoldingForm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Symbol,
    Quantity,
    Price,
}

/// Add/edit holding form. Edit mode keeps the symbol fixed and only cycles
/// through quantity and price.
#[derive(Clone, Debug)]
pub struct HoldingForm {
    pub editing: bool,
    pub symbol: String,
    pub quantity: String,
    pub price: String,
    pub field: FormField,
}

impl HoldingForm {
    fn next_field(&mut self) {
        self.field = match (self.field, self.editing) {
            (FormField::Symbol, _) => FormField::Quantity,
            (FormField::Quantity, _) => FormField::Price,
            (FormField::Price, true) => FormField::Quantity,
            (FormField::Price, false) => FormField::Symbol,
        };
    }

    fn active_field(&mut self) -> &mut String {
        match self.field {
            FormField::Symbol => &mut self.symbol,
            FormField::Quantity => &mut self.quantity,
            FormField::Price => &mut self.price,
        }
    }
}

/// The news page is either the list, an open article, or the terminal
/// not-found state for an id with no article.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewsView {
    List,
    Reader(String),
    NotFound(String),
}

pub struct App {
    pub should_quit: bool,
    pub page: Page,
    pub theme: Theme,
    pub input_mode: InputMode,
    pref_path: PathBuf,
    market_tick: Duration,

    pub market: Market,
    pub market_selected: usize,

    pub chart_search: String,
    pub chart_selected: usize,
    pub horizon: Horizon,
    pub chart_series: Vec<PricePoint>,
    pub chart_change: (f64, f64),
    pub chart_updated: DateTime<Utc>,

    pub portfolio: PortfolioStore,
    pub histories: HashMap<String, Vec<PricePoint>>,
    pub portfolio_selected: usize,
    pub notice: Option<String>,
    pub form: Option<HoldingForm>,
    pub refreshing: bool,
    refresh_due: Option<Instant>,

    pub factors: Vec<SentimentFactor>,
    pub gauge: GaugeAnimation,
    pub sentiment_history: Vec<(DateTime<Utc>, u8)>,

    pub news_items: Vec<NewsItem>,
    pub articles: Vec<Article>,
    pub reports: Vec<ResearchReport>,
    pub news_search: String,
    pub news_category: usize,
    pub news_sort: NewsSort,
    pub news_order: SortOrder,
    pub news_selected: usize,
    pub news_view: NewsView,
    pub research_search: String,
    pub research_category: usize,
    pub research_premium_only: bool,
    pub research_selected: usize,
}

impl App {
    pub fn new(mode: Mode, pref_path: PathBuf, market_tick: Duration) -> Self {
        let market = Market::seeded();

        // Every asset gets a 30-day daily history up front; the portfolio
        // performance chart reads from these.
        let mut histories = HashMap::new();
        for asset in &market.assets {
            histories.insert(
                asset.symbol.to_string(),
                series::generate(
                    asset.base_price,
                    asset.volatility,
                    PERFORMANCE_DAYS,
                    StepUnit::Day,
                ),
            );
        }

        let factors = sentiment::seed_factors();
        let composite = sentiment::aggregate(&factors);

        let mut app = Self {
            should_quit: false,
            page: Page::Market,
            theme: Theme::from_mode(mode),
            input_mode: InputMode::Normal,
            pref_path,
            market_tick,
            market,
            market_selected: 0,
            chart_search: String::new(),
            chart_selected: 0,
            horizon: Horizon::D7,
            chart_series: Vec::new(),
            chart_change: (0.0, 0.0),
            chart_updated: Utc::now(),
            portfolio: PortfolioStore::seeded(),
            histories,
            portfolio_selected: 0,
            notice: None,
            form: None,
            refreshing: false,
            refresh_due: None,
            factors,
            gauge: GaugeAnimation::new(composite),
            sentiment_history: series::sentiment_walk(SENTIMENT_HISTORY_DAYS),
            news_items: news::seed_news(),
            articles: news::seed_articles(),
            reports: news::seed_reports(),
            news_search: String::new(),
            news_category: 0,
            news_sort: NewsSort::Date,
            news_order: SortOrder::Desc,
            news_selected: 0,
            news_view: NewsView::List,
            research_search: String::new(),
            research_category: 0,
            research_premium_only: false,
            research_selected: 0,
        };
        app.regenerate_chart();
        app
    }

    pub async fn run(&mut self, terminal: &mut crate::tui::Tui) -> io::Result<()> {
        let mut last_market = Instant::now();
        let mut last_sentiment = Instant::now();

        while !self.should_quit {
            terminal.draw(|f| crate::ui::render(f, self))?;

            if event::poll(FRAME_POLL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            let mut rng = rand::thread_rng();
            if last_market.elapsed() >= self.market_tick {
                self.market.tick(&mut rng);
                last_market = Instant::now();
            }
            if last_sentiment.elapsed() >= SENTIMENT_TICK {
                sentiment::drift_factors(&mut self.factors, &mut rng);
                self.gauge.retarget(sentiment::aggregate(&self.factors));
                last_sentiment = Instant::now();
            }
            if let Some(due) = self.refresh_due {
                if Instant::now() >= due {
                    self.portfolio.refresh_nudge(&mut rng);
                    self.refresh_due = None;
                    self.refreshing = false;
                    self.notice = Some("Portfolio data refreshed".to_string());
                }
            }
            self.gauge.tick();
        }
        Ok(())
    }

    // ── Derived views ───────────────────────────────────────────────────────

    pub fn chart_assets(&self) -> Vec<&Asset> {
        self.market.search(&self.chart_search)
    }

    pub fn chart_asset(&self) -> Option<&Asset> {
        let assets = self.chart_assets();
        if assets.is_empty() {
            return None;
        }
        assets.get(self.chart_selected.min(assets.len() - 1)).copied()
    }

    pub fn summary(&self) -> PortfolioSummary {
        portfolio::valuate(self.portfolio.holdings(), |symbol| {
            self.market.find(symbol).map(|a| a.price)
        })
    }

    pub fn performance(&self) -> Vec<(DateTime<Utc>, f64)> {
        portfolio::performance_series(
            self.portfolio.holdings(),
            |symbol| self.histories.get(symbol).map(|v| v.as_slice()),
            PERFORMANCE_DAYS,
        )
    }

    pub fn filtered_news(&self) -> Vec<&NewsItem> {
        news::filter_and_sort(
            &self.news_items,
            &self.news_search,
            news::CATEGORIES[self.news_category],
            self.news_sort,
            self.news_order,
        )
    }

    pub fn filtered_reports(&self) -> Vec<&ResearchReport> {
        news::filter_reports(
            &self.reports,
            &self.research_search,
            news::CATEGORIES[self.research_category],
            self.research_premium_only,
        )
    }

    pub fn open_article(&self) -> Option<&Article> {
        match &self.news_view {
            NewsView::Reader(id) => news::lookup(&self.articles, id),
            _ => None,
        }
    }

    // ── Input handling ──────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::HoldingForm => self.handle_form_key(key),
            InputMode::ChartSearch | InputMode::NewsSearch | InputMode::ResearchSearch => {
                self.handle_search_key(key)
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.page == Page::News && self.news_view != NewsView::List {
                    self.news_view = NewsView::List;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Tab => self.page = self.page.next(),
            KeyCode::BackTab => self.page = self.page.prev(),
            KeyCode::Char('t') => self.toggle_theme(),
            _ => match self.page {
                Page::Market => self.handle_market_key(key),
                Page::Charts => self.handle_charts_key(key),
                Page::Portfolio => self.handle_portfolio_key(key),
                Page::Sentiment => self.handle_sentiment_key(key),
                Page::News => self.handle_news_key(key),
                Page::Research => self.handle_research_key(key),
            },
        }
    }

    fn handle_market_key(&mut self, key: KeyEvent) {
        let len = self.market.assets.len();
        match key.code {
            KeyCode::Up => self.market_selected = step_back(self.market_selected),
            KeyCode::Down => self.market_selected = step_forward(self.market_selected, len),
            KeyCode::Char('n') => self.market.toggle_sort(SortKey::Name),
            KeyCode::Char('p') => self.market.toggle_sort(SortKey::Price),
            KeyCode::Char('c') => self.market.toggle_sort(SortKey::Change),
            KeyCode::Char('m') => self.market.toggle_sort(SortKey::MarketCap),
            KeyCode::Char('v') => self.market.toggle_sort(SortKey::Volume),
            _ => {}
        }
    }

    fn handle_charts_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.chart_selected = step_back(self.chart_selected);
                self.regenerate_chart();
            }
            KeyCode::Down => {
                self.chart_selected = step_forward(self.chart_selected, self.chart_assets().len());
                self.regenerate_chart();
            }
            KeyCode::Char('h') => {
                self.horizon = self.horizon.next();
                self.regenerate_chart();
            }
            KeyCode::Char('g') => self.regenerate_chart(),
            KeyCode::Char('/') => self.input_mode = InputMode::ChartSearch,
            _ => {}
        }
    }

    fn handle_portfolio_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.portfolio_selected = step_back(self.portfolio_selected),
            KeyCode::Down => {
                self.portfolio_selected =
                    step_forward(self.portfolio_selected, self.portfolio.len())
            }
            KeyCode::Char('a') => {
                self.form = Some(HoldingForm {
                    editing: false,
                    symbol: String::new(),
                    quantity: String::new(),
                    price: String::new(),
                    field: FormField::Symbol,
                });
                self.input_mode = InputMode::HoldingForm;
            }
            KeyCode::Char('e') => {
                if let Some(holding) =
                    self.portfolio.holdings().get(self.portfolio_selected)
                {
                    self.form = Some(HoldingForm {
                        editing: true,
                        symbol: holding.symbol.clone(),
                        quantity: holding.quantity.to_string(),
                        price: holding.cost_basis.to_string(),
                        field: FormField::Quantity,
                    });
                    self.input_mode = InputMode::HoldingForm;
                }
            }
            KeyCode::Char('d') => {
                let symbol = self
                    .portfolio
                    .holdings()
                    .get(self.portfolio_selected)
                    .map(|h| h.symbol.clone());
                if let Some(symbol) = symbol {
                    match self.portfolio.remove(&symbol) {
                        Ok(()) => self.notice = Some(format!("Removed {}", symbol)),
                        Err(e) => self.notice = Some(e.to_string()),
                    }
                    self.portfolio_selected =
                        self.portfolio_selected.min(self.portfolio.len().saturating_sub(1));
                }
            }
            KeyCode::Char('r') => {
                if self.refresh_due.is_none() {
                    self.refresh_due = Some(Instant::now() + REFRESH_DELAY);
                    self.refreshing = true;
                    self.notice = Some("Refreshing...".to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_sentiment_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('g') {
            self.sentiment_history = series::sentiment_walk(SENTIMENT_HISTORY_DAYS);
        }
    }

    fn handle_news_key(&mut self, key: KeyEvent) {
        if self.news_view != NewsView::List {
            // Reader and not-found screens only navigate back.
            if matches!(key.code, KeyCode::Char('b') | KeyCode::Backspace) {
                self.news_view = NewsView::List;
            }
            return;
        }
        match key.code {
            KeyCode::Up => self.news_selected = step_back(self.news_selected),
            KeyCode::Down => {
                self.news_selected = step_forward(self.news_selected, self.filtered_news().len())
            }
            KeyCode::Enter => {
                let id = {
                    let items = self.filtered_news();
                    items
                        .get(self.news_selected.min(items.len().saturating_sub(1)))
                        .map(|item| item.id.to_string())
                };
                if let Some(id) = id {
                    self.news_view = if news::lookup(&self.articles, &id).is_some() {
                        NewsView::Reader(id)
                    } else {
                        NewsView::NotFound(id)
                    };
                }
            }
            KeyCode::Char('/') => self.input_mode = InputMode::NewsSearch,
            KeyCode::Char('c') => {
                self.news_category = (self.news_category + 1) % news::CATEGORIES.len();
                self.news_selected = 0;
            }
            KeyCode::Char('d') => self.toggle_news_sort(NewsSort::Date),
            KeyCode::Char('l') => self.toggle_news_sort(NewsSort::Likes),
            _ => {}
        }
    }

    fn toggle_news_sort(&mut self, sort: NewsSort) {
        if self.news_sort == sort {
            self.news_order = match self.news_order {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            };
        } else {
            self.news_sort = sort;
            self.news_order = SortOrder::Desc;
        }
    }

    fn handle_research_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.research_selected = step_back(self.research_selected),
            KeyCode::Down => {
                self.research_selected =
                    step_forward(self.research_selected, self.filtered_reports().len())
            }
            KeyCode::Char('/') => self.input_mode = InputMode::ResearchSearch,
            KeyCode::Char('c') => {
                self.research_category = (self.research_category + 1) % news::CATEGORIES.len();
                self.research_selected = 0;
            }
            KeyCode::Char('p') => {
                self.research_premium_only = !self.research_premium_only;
                self.research_selected = 0;
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let done = matches!(key.code, KeyCode::Esc | KeyCode::Enter);
        match self.input_mode {
            InputMode::ChartSearch => {
                match key.code {
                    KeyCode::Backspace => {
                        self.chart_search.pop();
                    }
                    KeyCode::Char(c) => self.chart_search.push(c),
                    _ => {}
                }
                self.chart_selected = 0;
                self.regenerate_chart();
            }
            InputMode::NewsSearch => {
                match key.code {
                    KeyCode::Backspace => {
                        self.news_search.pop();
                    }
                    KeyCode::Char(c) => self.news_search.push(c),
                    _ => {}
                }
                self.news_selected = 0;
            }
            InputMode::ResearchSearch => {
                match key.code {
                    KeyCode::Backspace => {
                        self.research_search.pop();
                    }
                    KeyCode::Char(c) => self.research_search.push(c),
                    _ => {}
                }
                self.research_selected = 0;
            }
            _ => {}
        }
        if done {
            self.input_mode = InputMode::Normal;
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab => form.next_field(),
            KeyCode::Enter => {
                if form.field == FormField::Price {
                    self.submit_form();
                } else {
                    form.next_field();
                }
            }
            KeyCode::Backspace => {
                form.active_field().pop();
            }
            KeyCode::Char(c) => {
                if form.field == FormField::Symbol {
                    for upper in c.to_uppercase() {
                        form.symbol.push(upper);
                    }
                } else {
                    form.active_field().push(c);
                }
            }
            _ => {}
        }
    }

    /// Validate and apply the open holding form. Invalid input keeps the form
    /// open and surfaces a notice; it never reaches the store.
    fn submit_form(&mut self) {
        let Some(form) = &self.form else { return };
        let editing = form.editing;
        let symbol = form.symbol.trim().to_uppercase();
        let quantity = form.quantity.trim().parse::<f64>();
        let price = form.price.trim().parse::<f64>();

        let (Ok(quantity), Ok(price)) = (quantity, price) else {
            self.notice = Some("Quantity and buy price must be numeric".to_string());
            return;
        };
        if self.market.find(&symbol).is_none() {
            self.notice = Some(format!("Unknown symbol: {}", symbol));
            return;
        }

        let result = if editing {
            self.portfolio.edit(&symbol, quantity, price)
        } else {
            self.portfolio.add(&symbol, quantity, price)
        };
        match result {
            Ok(()) => {
                self.notice = Some(if editing {
                    format!("Updated {}", symbol)
                } else {
                    format!("Added {}", symbol)
                });
                self.form = None;
                self.input_mode = InputMode::Normal;
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        match theme::save_mode(&self.pref_path, self.theme.mode) {
            Ok(()) => info!("Saved theme preference: {:?}", self.theme.mode),
            Err(e) => warn!("Could not persist theme preference: {}", e),
        }
    }

    /// Rebuild the chart series for the currently selected asset and horizon.
    /// A fresh walk per invocation; nothing is cached across calls.
    pub fn regenerate_chart(&mut self) {
        let params = self.chart_asset().map(|a| (a.base_price, a.volatility));
        let Some((base, vol)) = params else {
            self.chart_series.clear();
            self.chart_change = (0.0, 0.0);
            return;
        };
        let points =
            series::generate(base, vol, self.horizon.point_count(), self.horizon.step_unit());
        self.chart_change = series::change_summary(&points);
        self.chart_series = points;
        self.chart_updated = Utc::now();
    }
}

fn step_back(current: usize) -> usize {
    current.saturating_sub(1)
}

fn step_forward(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        let pref = std::env::temp_dir().join(format!("coinpulse-app-{}.json", std::process::id()));
        App::new(Mode::Dark, pref, DEFAULT_MARKET_TICK)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_tab_cycles_pages() {
        let mut app = test_app();
        assert_eq!(app.page, Page::Market);
        for _ in 0..Page::ALL.len() {
            app.handle_key(press(KeyCode::Tab));
        }
        assert_eq!(app.page, Page::Market, "tab should cycle back to the first page");
    }

    #[test]
    fn test_duplicate_add_via_form_leaves_holdings_unchanged() {
        let mut app = test_app();
        app.page = Page::Portfolio;
        let before = app.portfolio.len();

        app.handle_key(press(KeyCode::Char('a')));
        assert_eq!(app.input_mode, InputMode::HoldingForm);
        type_str(&mut app, "btc");
        app.handle_key(press(KeyCode::Tab));
        type_str(&mut app, "1.0");
        app.handle_key(press(KeyCode::Tab));
        type_str(&mut app, "40000");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.portfolio.len(), before, "duplicate add must not grow holdings");
        assert!(app.notice.as_deref().is_some_and(|n| n.contains("already")));
        // The form stays open so the user can correct it.
        assert_eq!(app.input_mode, InputMode::HoldingForm);
    }

    #[test]
    fn test_add_new_holding_via_form() {
        let mut app = test_app();
        app.page = Page::Portfolio;
        let before = app.portfolio.len();

        app.handle_key(press(KeyCode::Char('a')));
        type_str(&mut app, "doge");
        app.handle_key(press(KeyCode::Tab));
        type_str(&mut app, "5000");
        app.handle_key(press(KeyCode::Tab));
        type_str(&mut app, "0.07");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.portfolio.len(), before + 1);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.form.is_none());
    }

    #[test]
    fn test_non_numeric_quantity_rejected() {
        let mut app = test_app();
        app.page = Page::Portfolio;
        let before = app.portfolio.len();

        app.handle_key(press(KeyCode::Char('a')));
        type_str(&mut app, "dot");
        app.handle_key(press(KeyCode::Tab));
        type_str(&mut app, "lots");
        app.handle_key(press(KeyCode::Tab));
        type_str(&mut app, "6.5");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.portfolio.len(), before);
        assert!(app.notice.as_deref().is_some_and(|n| n.contains("numeric")));
    }

    #[test]
    fn test_news_reader_not_found_is_terminal_state() {
        let mut app = test_app();
        app.page = Page::News;

        // Walk down to an item that has no full article behind it.
        for _ in 0..8 {
            app.handle_key(press(KeyCode::Down));
        }
        app.handle_key(press(KeyCode::Enter));
        assert!(matches!(app.news_view, NewsView::NotFound(_)));

        // Esc returns to the list rather than quitting.
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.news_view, NewsView::List);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_news_reader_opens_known_article() {
        let mut app = test_app();
        app.page = Page::News;
        app.handle_key(press(KeyCode::Enter));
        assert!(matches!(app.news_view, NewsView::Reader(_)));
        assert!(app.open_article().is_some());
    }

    #[test]
    fn test_horizon_cycle_regenerates_series() {
        let mut app = test_app();
        app.page = Page::Charts;
        assert_eq!(app.chart_series.len(), Horizon::D7.point_count() + 1);

        app.handle_key(press(KeyCode::Char('h')));
        assert_eq!(app.horizon, Horizon::D30);
        assert_eq!(app.chart_series.len(), Horizon::D30.point_count() + 1);
    }

    #[test]
    fn test_chart_search_narrows_selection() {
        let mut app = test_app();
        app.page = Page::Charts;
        app.handle_key(press(KeyCode::Char('/')));
        type_str(&mut app, "solana");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Normal);
        let asset = app.chart_asset().expect("search should leave one match");
        assert_eq!(asset.symbol, "SOL");
    }

    #[test]
    fn test_summary_tracks_market_prices() {
        let app = test_app();
        let summary = app.summary();
        assert!(summary.total_value > 0.0);
        let sum: f64 = summary.allocations.iter().map(|a| a.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }
}
